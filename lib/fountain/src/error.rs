use oxttl::TurtleParseError;
use rdf_fragments_model::NamedNode;
use std::error::Error;

/// An error returned by a [Fountain](crate::Fountain).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FountainError {
    /// The type has never been registered.
    #[error("The type {0} is not known to the fountain")]
    UnknownType(NamedNode),
    /// A vocabulary could not be read.
    #[error(transparent)]
    Vocabulary(#[from] TurtleParseError),
    /// Error from the store behind the fountain.
    #[error("{0}")]
    Other(#[source] Box<dyn Error + Send + Sync + 'static>),
}
