use crate::graph::{PatternId, PatternNode, PlanGraph};
use rdf_fragments_model::TriplePattern;
use rustc_hash::FxHashMap;

/// Deduplicates triple patterns. Equal `(subject, predicate, object)` tuples share one
/// [PatternNode].
#[derive(Debug, Default)]
pub struct PatternRegistry {
    index: FxHashMap<TriplePattern, PatternId>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node of `pattern`, creating it in `graph` on first encounter.
    ///
    /// The check flag of an existing node is set if it has none yet.
    pub fn get_or_create(
        &mut self,
        graph: &mut PlanGraph,
        pattern: &TriplePattern,
        check_type: Option<bool>,
    ) -> PatternId {
        if let Some(id) = self.index.get(pattern) {
            let node = &mut graph.patterns[id.0];
            if node.check_type.is_none() {
                node.check_type = check_type;
            }
            return *id;
        }

        let id = PatternId(graph.patterns.len());
        graph.patterns.push(PatternNode {
            pattern: pattern.clone(),
            check_type,
        });
        self.index.insert(pattern.clone(), id);
        id
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
