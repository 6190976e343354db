//! Unified error type for the lightsd-lib crate.
//!
//! Attribute write failures (`NodeError`) never surface here: the driver
//! absorbs them into its fallback logic, so only `UnsupportedCategory` is
//! ever returned by `set_light_state`.

use std::fmt;

/// Unified error type for lightsd-lib operations.
#[derive(Debug)]
pub enum LightsError {
    /// The requested light id matches no known descriptor.
    UnsupportedCategory(i32),
    /// Standard I/O error (config read, transport streams).
    Io(std::io::Error),
    /// Configuration validation error.
    Config(String),
    /// Color parsing error.
    Color(String),
    /// Malformed request line.
    Protocol(String),
}

impl fmt::Display for LightsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LightsError::UnsupportedCategory(id) => write!(f, "Light not supported: id {id}"),
            LightsError::Io(e) => write!(f, "I/O error: {e}"),
            LightsError::Config(e) => write!(f, "Config error: {e}"),
            LightsError::Color(e) => write!(f, "Color error: {e}"),
            LightsError::Protocol(e) => write!(f, "Protocol error: {e}"),
        }
    }
}

impl std::error::Error for LightsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LightsError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LightsError {
    fn from(e: std::io::Error) -> Self {
        LightsError::Io(e)
    }
}

/// Crate-level Result alias using [`LightsError`].
pub type Result<T> = std::result::Result<T, LightsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let e: LightsError = io_err.into();
        assert!(matches!(e, LightsError::Io(_)));
    }

    #[test]
    fn display_unsupported_category() {
        let e = LightsError::UnsupportedCategory(42);
        assert_eq!(e.to_string(), "Light not supported: id 42");
    }

    #[test]
    fn display_config_error() {
        let e = LightsError::Config("invalid input".into());
        assert_eq!(e.to_string(), "Config error: invalid input");
    }

    #[test]
    fn display_color_error() {
        let e = LightsError::Color("bad hex".into());
        assert_eq!(e.to_string(), "Color error: bad hex");
    }

    #[test]
    fn display_protocol_error() {
        let e = LightsError::Protocol("expected object".into());
        assert_eq!(e.to_string(), "Protocol error: expected object");
    }

    #[test]
    fn source_chains_io_error() {
        let e = LightsError::Io(std::io::Error::other("stdout closed"));
        let source = std::error::Error::source(&e).unwrap();
        assert!(source.to_string().contains("stdout closed"));
    }

    #[test]
    fn source_none_for_string_variants() {
        let e = LightsError::Config("test".into());
        assert!(std::error::Error::source(&e).is_none());
        let e = LightsError::UnsupportedCategory(9);
        assert!(std::error::Error::source(&e).is_none());
    }
}
