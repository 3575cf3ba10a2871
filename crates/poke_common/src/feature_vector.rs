//! Feature vector - the seven stats sent to the prediction service
//!
//! Input coercion is deliberately permissive: anything that does not start
//! with an integer becomes 0, and nothing is clamped. The 1-255 / 1-9 ranges
//! are advisory and only surfaced as warnings by the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// Advisory range for the six base stats
pub const STAT_RANGE: RangeInclusive<i64> = 1..=255;

/// Advisory range for the generation number
pub const GENERATION_RANGE: RangeInclusive<i64> = 1..=9;

/// One of the seven input fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureField {
    Hp,
    Attack,
    Defense,
    SpAtk,
    SpDef,
    Speed,
    Generation,
}

impl FeatureField {
    /// All fields in form order
    pub const ALL: [FeatureField; 7] = [
        FeatureField::Hp,
        FeatureField::Attack,
        FeatureField::Defense,
        FeatureField::SpAtk,
        FeatureField::SpDef,
        FeatureField::Speed,
        FeatureField::Generation,
    ];

    /// Key used on the wire
    pub fn name(&self) -> &'static str {
        match self {
            FeatureField::Hp => "hp",
            FeatureField::Attack => "attack",
            FeatureField::Defense => "defense",
            FeatureField::SpAtk => "sp_atk",
            FeatureField::SpDef => "sp_def",
            FeatureField::Speed => "speed",
            FeatureField::Generation => "generation",
        }
    }

    /// Human-readable label for prompts
    pub fn label(&self) -> &'static str {
        match self {
            FeatureField::Hp => "HP",
            FeatureField::Attack => "Attack",
            FeatureField::Defense => "Defense",
            FeatureField::SpAtk => "Sp. Atk",
            FeatureField::SpDef => "Sp. Def",
            FeatureField::Speed => "Speed",
            FeatureField::Generation => "Generation",
        }
    }

    pub fn advisory_range(&self) -> RangeInclusive<i64> {
        match self {
            FeatureField::Generation => GENERATION_RANGE,
            _ => STAT_RANGE,
        }
    }
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Field name that is not one of the seven wire names
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field '{0}' (expected one of: hp, attack, defense, sp_atk, sp_def, speed, generation)")]
pub struct UnknownField(pub String);

impl FromStr for FeatureField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Snapshot of the form, serialized with field names verbatim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub hp: i64,
    pub attack: i64,
    pub defense: i64,
    pub sp_atk: i64,
    pub sp_def: i64,
    pub speed: i64,
    pub generation: i64,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            hp: 0,
            attack: 0,
            defense: 0,
            sp_atk: 0,
            sp_def: 0,
            speed: 0,
            generation: 1,
        }
    }
}

impl FeatureVector {
    pub fn get(&self, field: FeatureField) -> i64 {
        match field {
            FeatureField::Hp => self.hp,
            FeatureField::Attack => self.attack,
            FeatureField::Defense => self.defense,
            FeatureField::SpAtk => self.sp_atk,
            FeatureField::SpDef => self.sp_def,
            FeatureField::Speed => self.speed,
            FeatureField::Generation => self.generation,
        }
    }

    /// Copy of this vector with one field replaced
    pub fn with(mut self, field: FeatureField, value: i64) -> Self {
        let slot = match field {
            FeatureField::Hp => &mut self.hp,
            FeatureField::Attack => &mut self.attack,
            FeatureField::Defense => &mut self.defense,
            FeatureField::SpAtk => &mut self.sp_atk,
            FeatureField::SpDef => &mut self.sp_def,
            FeatureField::Speed => &mut self.speed,
            FeatureField::Generation => &mut self.generation,
        };
        *slot = value;
        self
    }

    /// Apply a raw field edit. See [`update`].
    pub fn update(self, field: FeatureField, raw_input: &str) -> Self {
        update(self, field, raw_input)
    }

    /// Fields whose value lies outside the advisory range
    pub fn advisory_violations(&self) -> Vec<FeatureField> {
        FeatureField::ALL
            .iter()
            .copied()
            .filter(|field| !field.advisory_range().contains(&self.get(*field)))
            .collect()
    }
}

/// Produce a new vector with `field` set from `raw_input`.
///
/// Never fails: input without a leading integer yields 0, and out-of-range
/// values are kept as-is.
pub fn update(vector: FeatureVector, field: FeatureField, raw_input: &str) -> FeatureVector {
    vector.with(field, parse_leading_int(raw_input))
}

/// Leading-integer parse: skips leading whitespace, accepts one sign, reads
/// decimal digits up to the first non-digit. Saturates instead of overflowing.
fn parse_leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut value: i64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(10) else { break };
        seen_digit = true;
        value = value.saturating_mul(10).saturating_add(i64::from(d));
    }

    if !seen_digit {
        return 0;
    }
    if negative {
        -value
    } else {
        value
    }
}
