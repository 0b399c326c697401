use std::fmt;

#[derive(Debug)]
pub enum Error {
    Message(String),
    Io(std::io::Error),
    Json(serde_json::Error),
    InputRequired(String),
    InvalidVersion(String),
    CommandFailed { command: String, code: Option<i32> },
}

impl Error {
    pub fn msg<M: Into<String>>(msg: M) -> Self {
        Self::Message(msg.into())
    }

    /// Exit status a CLI should use when this error ends the process.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message(msg) => write!(f, "{msg}"),
            Error::Io(err) => write!(f, "io error: {err}"),
            Error::Json(err) => write!(f, "json error: {err}"),
            Error::InputRequired(name) => write!(f, "Input required and not supplied: {name}"),
            Error::InvalidVersion(version) => {
                write!(f, "version should start with `v` and have no empty parts: '{version}'")
            }
            Error::CommandFailed {
                command,
                code: Some(code),
            } => write!(f, "command failed with {code}: {command}"),
            Error::CommandFailed { command, code: None } => {
                write!(f, "command terminated by signal: {command}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
