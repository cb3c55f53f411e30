//! Vocabularies used by plan graphs.

pub use oxrdf::vocab::{rdf, rdfs, xsd};

/// The vocabulary of plan graphs. The fragment collector relies on these names.
pub mod agora {
    use oxrdf::NamedNodeRef;

    pub const PREFIX: &str = "agora";
    pub const NAMESPACE: &str = "http://agora.org#";

    /// The named graph holding the search trees and their steps.
    pub const TREES: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#trees");

    pub const SEARCH_SPACE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#SearchSpace");
    pub const TRIPLE_PATTERN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#TriplePattern");
    pub const SEARCH_TREE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#SearchTree");
    pub const CYCLE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#Cycle");
    pub const VARIABLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#Variable");
    pub const LITERAL: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#Literal");

    pub const DEFINED_BY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#definedBy");
    pub const SUBJECT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#subject");
    pub const PREDICATE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#predicate");
    pub const OBJECT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#object");
    pub const VALUE: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#value");
    pub const ON_PROPERTY: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#onProperty");
    pub const EXPECTED_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#expectedType");
    pub const NEXT: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#next");
    pub const BY_PATTERN: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#byPattern");
    pub const HAS_SEED: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#hasSeed");
    pub const FROM_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#fromType");
    pub const LENGTH: NamedNodeRef<'_> = NamedNodeRef::new_unchecked("http://agora.org#length");
    pub const CHECK_TYPE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#checkType");
    pub const GOES_THROUGH_CYCLE: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#goesThroughCycle");
    pub const IS_CYCLE_START_OF: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://agora.org#isCycleStartOf");
}

/// The subset of OWL needed to read vocabularies.
pub mod owl {
    use oxrdf::NamedNodeRef;

    pub const CLASS: NamedNodeRef<'_> =
        NamedNodeRef::new_unchecked("http://www.w3.org/2002/07/owl#Class");
}
