//! Exit codes for pokectl

use poke_common::{ErrorCategory, SubmissionState};

/// Exit code for success
pub const EXIT_SUCCESS: i32 = 0;

/// Exit code for general errors (setup failures, unknown prediction errors)
pub const EXIT_GENERAL_ERROR: i32 = 1;

/// Exit code for invalid command line usage
pub const EXIT_USAGE: i32 = 64;

/// Exit code when the service answered with a non-2xx status
pub const EXIT_HTTP_ERROR: i32 = 65;

/// Exit code when the service could not be reached
pub const EXIT_SERVICE_UNAVAILABLE: i32 = 70;

/// Exit code for the state a command finished in
pub fn exit_code(state: &SubmissionState) -> i32 {
    match state.category() {
        None => EXIT_SUCCESS,
        Some(ErrorCategory::HttpError) => EXIT_HTTP_ERROR,
        Some(ErrorCategory::ConnectionError) => EXIT_SERVICE_UNAVAILABLE,
        Some(ErrorCategory::UnknownError) => EXIT_GENERAL_ERROR,
    }
}
