use crate::QueryRootsError;
use rdf_fragments_model::{NamedNode, TermPattern, TriplePattern, Variable};
use spargebra::algebra::GraphPattern;
use spargebra::Query;
use std::collections::{BTreeSet, HashSet};

/// The top-level variables and IRIs of a query.
///
/// Type information only flows along the trees of patterns whose subjects are roots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryRoots {
    variables: BTreeSet<Variable>,
    iris: BTreeSet<NamedNode>,
}

impl QueryRoots {
    /// Creates the root set from explicit terms. Terms that are neither variables nor IRIs are
    /// ignored.
    pub fn new(roots: impl IntoIterator<Item = TermPattern>) -> Self {
        let mut result = Self::default();
        for root in roots {
            match root {
                TermPattern::Variable(variable) => {
                    result.variables.insert(variable);
                }
                TermPattern::NamedNode(iri) => {
                    result.iris.insert(iri);
                }
                _ => {}
            }
        }
        result
    }

    /// Computes the roots of a basic graph pattern.
    ///
    /// The roots are the subjects that never occur as an object. If every subject is also an
    /// object, all subjects are roots.
    pub fn from_patterns<'a>(patterns: impl IntoIterator<Item = &'a TriplePattern>) -> Self {
        let patterns = patterns.into_iter().collect::<Vec<_>>();
        let objects = patterns
            .iter()
            .map(|pattern| &pattern.object)
            .collect::<HashSet<_>>();

        let roots = patterns
            .iter()
            .map(|pattern| &pattern.subject)
            .filter(|subject| !objects.contains(subject))
            .cloned()
            .collect::<Self>();
        if !roots.is_empty() {
            return roots;
        }
        patterns
            .iter()
            .map(|pattern| pattern.subject.clone())
            .collect()
    }

    /// Parses a SPARQL query and computes the roots of all triple patterns it contains.
    pub fn from_sparql(query: &str) -> Result<Self, QueryRootsError> {
        let query = Query::parse(query, None)?;
        let pattern = match &query {
            Query::Select { pattern, .. }
            | Query::Construct { pattern, .. }
            | Query::Describe { pattern, .. }
            | Query::Ask { pattern, .. } => pattern,
        };

        let mut patterns = Vec::new();
        collect_triple_patterns(pattern, &mut patterns);
        Ok(Self::from_patterns(&patterns))
    }

    /// Returns whether `subject` is a root. Variables are compared by name.
    pub fn contains(&self, subject: &TermPattern) -> bool {
        match subject {
            TermPattern::Variable(variable) => self.variables.contains(variable),
            TermPattern::NamedNode(iri) => self.iris.contains(iri),
            _ => false,
        }
    }

    pub fn variables(&self) -> &BTreeSet<Variable> {
        &self.variables
    }

    pub fn iris(&self) -> &BTreeSet<NamedNode> {
        &self.iris
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty() && self.iris.is_empty()
    }
}

impl FromIterator<TermPattern> for QueryRoots {
    fn from_iter<T: IntoIterator<Item = TermPattern>>(iter: T) -> Self {
        Self::new(iter)
    }
}

fn collect_triple_patterns(pattern: &GraphPattern, result: &mut Vec<TriplePattern>) {
    match pattern {
        GraphPattern::Bgp { patterns } => result.extend(patterns.iter().cloned()),
        GraphPattern::Join { left, right }
        | GraphPattern::LeftJoin { left, right, .. }
        | GraphPattern::Union { left, right }
        | GraphPattern::Minus { left, right } => {
            collect_triple_patterns(left, result);
            collect_triple_patterns(right, result);
        }
        GraphPattern::Filter { inner, .. }
        | GraphPattern::Graph { inner, .. }
        | GraphPattern::Extend { inner, .. }
        | GraphPattern::OrderBy { inner, .. }
        | GraphPattern::Project { inner, .. }
        | GraphPattern::Distinct { inner }
        | GraphPattern::Reduced { inner }
        | GraphPattern::Slice { inner, .. }
        | GraphPattern::Group { inner, .. }
        | GraphPattern::Service { inner, .. } => collect_triple_patterns(inner, result),
        _ => {}
    }
}
