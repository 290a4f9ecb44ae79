use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("help requested")]
    DisplayHelp(String),
    #[error("version requested")]
    DisplayVersion(String),
    #[error("{0}")]
    Usage(String),
    #[error("invalid value {value:?} for {arg}: {reason}")]
    InvalidValue {
        arg: &'static str,
        value: String,
        reason: String,
    },
}
