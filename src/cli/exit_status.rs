use std::process::ExitCode;

/// Exit status of the CLI.
///
/// - `Success` (0): no issues found
/// - `Failure` (1): issues found (drift, invalid entries, pending translations, parse errors)
/// - `Error` (2): internal error (config error, missing directory, no usages found)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_error_count(error_count: usize) -> Self {
        if error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
