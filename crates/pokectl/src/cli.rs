//! Command line definition for pokectl

use clap::{Args, Parser, Subcommand};
use poke_common::{FeatureField, FeatureVector, PredictorConfig};

#[derive(Parser, Debug)]
#[command(name = "pokectl")]
#[command(about = "PokéPredict - predict a Pokémon's rarity from its base stats", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Prediction service URL (overrides config file and POKEPREDICT_ENDPOINT)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Print the final state as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Submit one set of stats and print the predicted rarity
    Predict(StatArgs),

    /// Prompt for the stats, predict, and repeat
    Interactive,

    /// Show the effective configuration
    Config,
}

/// Raw stat values. Anything that does not start with an integer counts as 0.
#[derive(Args, Debug, Default, Clone)]
pub struct StatArgs {
    /// HP (1-255)
    #[arg(long, allow_hyphen_values = true)]
    pub hp: Option<String>,

    /// Attack (1-255)
    #[arg(long, allow_hyphen_values = true)]
    pub attack: Option<String>,

    /// Defense (1-255)
    #[arg(long, allow_hyphen_values = true)]
    pub defense: Option<String>,

    /// Special attack (1-255)
    #[arg(long, allow_hyphen_values = true)]
    pub sp_atk: Option<String>,

    /// Special defense (1-255)
    #[arg(long, allow_hyphen_values = true)]
    pub sp_def: Option<String>,

    /// Speed (1-255)
    #[arg(long, allow_hyphen_values = true)]
    pub speed: Option<String>,

    /// Generation (1-9)
    #[arg(long, allow_hyphen_values = true)]
    pub generation: Option<String>,
}

impl StatArgs {
    /// Fields given on the command line, in form order
    pub fn edits(&self) -> Vec<(FeatureField, &str)> {
        FeatureField::ALL
            .iter()
            .filter_map(|field| self.raw(*field).map(|raw| (*field, raw)))
            .collect()
    }

    /// Fold the edits into `vector`, one field at a time
    pub fn apply(&self, vector: FeatureVector) -> FeatureVector {
        self.edits()
            .into_iter()
            .fold(vector, |acc, (field, raw)| acc.update(field, raw))
    }

    fn raw(&self, field: FeatureField) -> Option<&str> {
        let value = match field {
            FeatureField::Hp => &self.hp,
            FeatureField::Attack => &self.attack,
            FeatureField::Defense => &self.defense,
            FeatureField::SpAtk => &self.sp_atk,
            FeatureField::SpDef => &self.sp_def,
            FeatureField::Speed => &self.speed,
            FeatureField::Generation => &self.generation,
        };
        value.as_deref()
    }
}

impl Cli {
    /// Apply command line overrides on top of a loaded config
    pub fn apply_overrides(&self, mut config: PredictorConfig) -> PredictorConfig {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_predict_args() {
        let cli = parse(&[
            "pokectl", "predict", "--hp", "45", "--sp-atk", "65", "--generation", "1",
        ]);
        let Commands::Predict(stats) = cli.command else {
            panic!("expected predict");
        };
        assert_eq!(stats.hp.as_deref(), Some("45"));
        assert_eq!(stats.sp_atk.as_deref(), Some("65"));
        assert_eq!(stats.attack, None);

        let v = stats.apply(FeatureVector::default());
        assert_eq!(v.hp, 45);
        assert_eq!(v.sp_atk, 65);
        assert_eq!(v.attack, 0);
        assert_eq!(v.generation, 1);
    }

    #[test]
    fn test_non_numeric_value_is_accepted_and_coerced() {
        let cli = parse(&["pokectl", "predict", "--speed", "fast", "--hp", "-3"]);
        let Commands::Predict(stats) = cli.command else {
            panic!("expected predict");
        };
        let v = stats.apply(FeatureVector::default());
        assert_eq!(v.speed, 0);
        assert_eq!(v.hp, -3);
    }

    #[test]
    fn test_edits_in_form_order() {
        let stats = StatArgs {
            generation: Some("2".into()),
            hp: Some("10".into()),
            ..Default::default()
        };
        assert_eq!(
            stats.edits(),
            vec![(FeatureField::Hp, "10"), (FeatureField::Generation, "2")]
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&[
            "pokectl",
            "predict",
            "--json",
            "--endpoint",
            "http://localhost:5000/api/predict",
            "--timeout",
            "3",
        ]);
        assert!(cli.json);

        let config = cli.apply_overrides(PredictorConfig::default());
        assert_eq!(config.endpoint, "http://localhost:5000/api/predict");
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn test_no_overrides_keeps_config() {
        let cli = parse(&["pokectl", "config"]);
        assert!(matches!(cli.command, Commands::Config));
        assert_eq!(
            cli.apply_overrides(PredictorConfig::default()),
            PredictorConfig::default()
        );
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["pokectl"]).is_err());
        assert!(Cli::try_parse_from(["pokectl", "predict", "--mana", "3"]).is_err());
    }
}
