use thiserror::Error;

/// Error returned by mask construction, set algebra and export.
///
/// The payload is boxed to keep `Result<T>` small on the happy path.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn invalid_arg(name: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn invalid_format(element: impl Into<String>, message: impl Into<String>) -> Error {
        ErrorKind::InvalidFormat {
            element: element.into(),
            message: message.into(),
        }
        .into()
    }

    pub fn out_of_range(name: impl Into<String>, value: i64, bound: usize) -> Error {
        ErrorKind::OutOfRange {
            name: name.into(),
            value,
            bound,
        }
        .into()
    }

    pub fn negative_index(name: impl Into<String>, value: i64) -> Error {
        ErrorKind::NegativeIndex {
            name: name.into(),
            value,
        }
        .into()
    }

    pub fn kind_mismatch(left: impl Into<String>, right: impl Into<String>) -> Error {
        ErrorKind::KindMismatch {
            left: left.into(),
            right: right.into(),
        }
        .into()
    }

    pub fn domain_mismatch(operation: impl Into<String>) -> Error {
        ErrorKind::DomainMismatch {
            operation: operation.into(),
        }
        .into()
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        ErrorKind::Io {
            context: context.into(),
            source,
        }
        .into()
    }

    /// Returns `true` for any of the input validation failures (negative index,
    /// invalid argument, malformed sequence, range violation).
    pub fn is_validation(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::InvalidArgument { .. }
                | ErrorKind::InvalidFormat { .. }
                | ErrorKind::OutOfRange { .. }
                | ErrorKind::NegativeIndex { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid argument {name}: {message}")]
    InvalidArgument { name: String, message: String },

    #[error("invalid encoding of '{element}': {message}")]
    InvalidFormat { element: String, message: String },

    #[error("{name} = {value} is out of range, the domain has {bound} elements")]
    OutOfRange {
        name: String,
        value: i64,
        bound: usize,
    },

    #[error("negative index is not allowed: {name} = {value}")]
    NegativeIndex { name: String, value: i64 },

    #[error("illegal mix of mask kinds: {left} and {right}")]
    KindMismatch { left: String, right: String },

    #[error("{operation}: masks are associated with different domains")]
    DomainMismatch { operation: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
