//! Errors for the Horned-Frame library
use thiserror::Error;

/// Error for the Horned-Frame library
#[derive(Debug, Error)]
pub enum HornedError {
    /// An IO Error, raised by a serializer or loader collaborator
    #[error("IO Error: {0}")]
    IOError(#[from] std::io::Error),

    /// An error found while parsing an identifier
    #[error("Parsing Error: {0}")]
    ParserError(Box<dyn std::error::Error>),

    /// Data has been given that we cannot make sense of or would
    /// result in invalid OWL
    #[error("Validity Error: {0}")]
    ValidityError(String),

    /// The identifier allocator did not find a free identifier
    #[error("Identifier Exhaustion: no free identifier in idspace {idspace} after {attempts} attempts")]
    IdentifierExhaustion { idspace: String, attempts: usize },

    /// The reasoner could not answer a query. This is passed through
    /// unchanged from the reasoner implementation.
    #[error("Reasoner Error: {0}")]
    ReasonerError(Box<dyn std::error::Error>),
}

macro_rules! invalid {
    ($($arg:tt)*) => {
        crate::error::HornedError::ValidityError(format!($($arg)*))
    }
}

pub(crate) use invalid;

impl HornedError {
    pub fn invalid<S: Into<String>>(s: S) -> HornedError {
        HornedError::ValidityError(s.into())
    }

    pub fn reasoner<E: std::error::Error + 'static>(e: E) -> HornedError {
        HornedError::ReasonerError(Box::new(e))
    }
}

impl From<oxiri::IriParseError> for HornedError {
    fn from(e: oxiri::IriParseError) -> Self {
        Self::ParserError(e.into())
    }
}
