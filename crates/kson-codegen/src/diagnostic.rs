use std::fmt::{self, Display};

///
/// Level
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    Warning,
}

///
/// Diagnostic
///
/// Advisory output of a generation pass; never stops it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Warning => write!(f, "warning: {}", self.message),
        }
    }
}
