use std::{fmt, path::PathBuf, str::FromStr};

#[derive(Debug)]
pub struct TypeParseError(String);

impl fmt::Display for TypeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unexpected value: {}", self.0)
    }
}

impl std::error::Error for TypeParseError {}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Color {
    Auto,
    Always,
    Never,
}

impl Color {
    /// Resolves `Auto` against the terminal stdout is attached to
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => atty::is(atty::Stream::Stdout),
            Self::Always => true,
            Self::Never => false,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::Auto
    }
}

impl FromStr for Color {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "always" => Ok(Self::Always),
            "never" => Ok(Self::Never),
            invalid => Err(TypeParseError(invalid.to_owned())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Auto => "auto",
            Self::Always => "always",
            Self::Never => "never",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Text
    }
}

impl FromStr for OutputFormat {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            invalid => Err(TypeParseError(invalid.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Where the sample comes from
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    File(PathBuf),
    Generate,
}

impl Default for Input {
    fn default() -> Self {
        Self::Generate
    }
}
