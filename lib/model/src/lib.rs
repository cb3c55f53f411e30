mod error;
mod plan;
mod prefixes;
pub mod vocab;

pub use error::*;
pub use plan::*;
pub use prefixes::PrefixMap;

// Re-export some oxrdf types.
pub use oxiri::Iri;
pub use oxrdf::{
    BlankNode, BlankNodeRef, GraphName, GraphNameRef, IriParseError, Literal, LiteralRef,
    NamedNode, NamedNodeRef, Quad, QuadRef, Subject, SubjectRef, Term, TermParseError, TermRef,
    Triple, TripleRef, Variable, VariableNameParseError, VariableRef,
};
pub use spargebra::term::{NamedNodePattern, TermPattern, TriplePattern};
