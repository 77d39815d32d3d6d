use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid weight: {0}")]
    Weight(String),
    #[error("Invalid bar standard: {0}")]
    BarStandard(String),
    #[error("Invalid rep count: {0}")]
    Reps(String),
    #[error("Missing parameter: {0}")]
    Missing(&'static str),
}

#[derive(Error, Debug)]
pub enum WaitlistError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Storage failure: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("Storage connection is unavailable.")]
    Poisoned,
}

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Mail transport failed: {0}")]
    Transport(String),
    #[error("Invalid mail address {0}")]
    Address(String),
    #[error("Could not build message: {0}")]
    Message(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("{0} must be set when SMTP_SERVER is")]
    Missing(&'static str),
}
