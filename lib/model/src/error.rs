use oxiri::IriParseError;
use oxrdf::{TermParseError, VariableNameParseError};
use std::fmt::{Display, Formatter};

/// The position of a term inside a triple pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternPosition {
    Subject,
    Predicate,
    Object,
}

impl Display for PatternPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternPosition::Subject => f.write_str("subject"),
            PatternPosition::Predicate => f.write_str("predicate"),
            PatternPosition::Object => f.write_str("object"),
        }
    }
}

/// An error raised while decoding an evaluation plan.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlanDecodingError {
    /// The plan is not valid JSON or does not have the expected shape.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// The term cannot appear at the given position of a triple pattern.
    #[error("The term {term} is not supported as the {position} of a triple pattern")]
    UnsupportedTerm {
        position: PatternPosition,
        term: String,
    },
    /// A variable has an invalid name.
    #[error(transparent)]
    InvalidVariable(#[from] VariableNameParseError),
    /// A literal or bracketed IRI could not be parsed.
    #[error(transparent)]
    InvalidTerm(#[from] TermParseError),
    /// A seed is not an absolute IRI.
    #[error("The seed {seed} is not a valid IRI: {source}")]
    InvalidSeed {
        seed: String,
        #[source]
        source: IriParseError,
    },
}
