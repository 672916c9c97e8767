use git_swift_core::outcome::SessionOutcome;
use std::process::ExitCode;

pub type CliResult<T> = Result<T, CliError>;

/// A failure that ends the process before or instead of a session outcome.
#[derive(Debug, Clone)]
pub struct CliError {
    message: String,
    code: u8,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: 1,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u8 {
        self.code
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(value: anyhow::Error) -> Self {
        Self::new(format!("{value:#}"))
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::new(value.to_string())
    }
}

pub fn print_error(error: &CliError) {
    eprintln!("Error: {}", error.message());
}

/// Print the closing line for `outcome` and pick the exit code.
pub fn report(outcome: &SessionOutcome) -> ExitCode {
    if let Some(message) = outcome.final_message() {
        if outcome.is_failure() {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }
    ExitCode::from(exit_code(outcome))
}

pub fn exit_code(outcome: &SessionOutcome) -> u8 {
    u8::from(outcome.is_failure())
}
