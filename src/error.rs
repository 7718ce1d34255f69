use std::fmt;

/// Errors raised by the decoding library
///
/// All variants are fatal for the operation that raised them: a sub-ISD that
/// exhausts its enumeration returns normally, it does not error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodingError {
    /// Invalid module parameters, raised at `initialize`
    Config { module: &'static str, reason: String },
    /// Mis-shaped inputs (H/S/w dimensions), raised at parse or `initialize`
    Input { reason: String },
    /// The ISD update cannot find a pivot for the current column
    DegenerateInstance { reason: String },
    /// A reconstructed solution violated an internal invariant; signals a bug
    InternalInvariant { module: &'static str, reason: String },
    /// The challenge-file parser rejected its input
    Parse { reason: String },
    /// A solver method was called in the wrong state
    State { expected: &'static str, actual: &'static str },
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodingError::Config { module, reason } => {
                write!(f, "{}: configuration error: {}", module, reason)
            }
            DecodingError::Input { reason } => write!(f, "input error: {}", reason),
            DecodingError::DegenerateInstance { reason } => {
                write!(f, "degenerate instance: {}", reason)
            }
            DecodingError::InternalInvariant { module, reason } => {
                write!(f, "{}: internal invariant violation: {}", module, reason)
            }
            DecodingError::Parse { reason } => write!(f, "parse error: {}", reason),
            DecodingError::State { expected, actual } => {
                write!(f, "invalid solver state: expected {}, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for DecodingError {}

impl DecodingError {
    pub fn config(module: &'static str, reason: impl Into<String>) -> Self {
        DecodingError::Config { module, reason: reason.into() }
    }

    pub fn input(reason: impl Into<String>) -> Self {
        DecodingError::Input { reason: reason.into() }
    }

    pub fn degenerate(reason: impl Into<String>) -> Self {
        DecodingError::DegenerateInstance { reason: reason.into() }
    }

    pub fn invariant(module: &'static str, reason: impl Into<String>) -> Self {
        DecodingError::InternalInvariant { module, reason: reason.into() }
    }

    pub fn parse(reason: impl Into<String>) -> Self {
        DecodingError::Parse { reason: reason.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_component() {
        let e = DecodingError::config("stern_dumer", "p must be at least 2");
        assert_eq!(e.to_string(), "stern_dumer: configuration error: p must be at least 2");
    }

    #[test]
    fn test_degenerate_display() {
        let e = DecodingError::degenerate("cannot find pivot");
        assert!(e.to_string().contains("degenerate instance"));
    }
}
