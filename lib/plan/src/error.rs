use oxrdfio::RdfFormat;
use rdf_fragments_fountain::FountainError;
use rdf_fragments_model::IriParseError;
use spargebra::SparqlSyntaxError;
use std::io;

/// An error raised while building a plan graph.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PlanGraphError {
    /// The fountain could not answer a type query. The plan refers to types the fountain does not
    /// know, so the graph would be inconsistent.
    #[error(transparent)]
    Fountain(#[from] FountainError),
}

/// An error raised while deriving the roots of a query.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum QueryRootsError {
    /// The query is not valid SPARQL.
    #[error(transparent)]
    Syntax(#[from] SparqlSyntaxError),
}

/// An error raised while serializing a plan graph.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ExportError {
    /// An error raised while writing the content.
    #[error(transparent)]
    Io(#[from] io::Error),
    /// A prefix of the plan is bound to an invalid namespace.
    #[error(transparent)]
    InvalidPrefix(#[from] IriParseError),
    /// Plan graphs use named graphs, so the format must support datasets.
    #[error("A RDF format supporting datasets was expected, {0} found")]
    DatasetFormatExpected(RdfFormat),
}
