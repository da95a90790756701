use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by a platform collaborator such as a touch sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformError {
    pub kind: PlatformErrorKind,
    pub message: Option<String>,
}

impl PlatformError {
    pub fn new(kind: PlatformErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: Some(message.into()) }
    }

    pub fn simple(kind: PlatformErrorKind) -> Self {
        Self { kind, message: None }
    }
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.message {
            Some(msg) => write!(f, "{msg}"),
            None => write!(f, "{:#?}", self.kind),
        }
    }
}

impl Error for PlatformError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformErrorKind {
    /// The sink refused or failed to replay a sample sequence.
    InjectionFailed,
    /// The sequence violated the sink's ordering expectations.
    InvalidSequence,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn display_prefers_message() {
        let err = PlatformError::new(PlatformErrorKind::InjectionFailed, "device gone");
        assert_eq!(err.to_string(), "device gone");
    }

    #[rstest]
    fn display_falls_back_to_kind() {
        let err = PlatformError::simple(PlatformErrorKind::InvalidSequence);
        assert_eq!(err.to_string(), "InvalidSequence");
    }
}
