use crate::graph::{PlanGraph, StepId, TreeId};
use crate::PlanGraphError;
use rdf_fragments_fountain::Fountain;
use rdf_fragments_model::{NamedNode, TermPattern};
use std::collections::BTreeSet;
use tracing::debug;

/// Normalizes the trees of a propagated graph.
///
/// Only the most specific starting types of each tree are kept. Steps directly below a tree root
/// that serve a pattern with an IRI subject add that subject to the seeds of the tree and are no
/// longer entry points of any cycle.
///
/// Cycles are not pruned again afterwards. A cycle that was only anchored at promoted steps stays
/// in the graph without any entry point.
pub fn post_process<F: Fountain + ?Sized>(
    graph: &mut PlanGraph,
    fountain: &F,
) -> Result<(), PlanGraphError> {
    for tree in &mut graph.trees {
        tree.from_types = most_specific_types(&tree.from_types, fountain)?;
    }

    let promotions = seed_promotions(graph);
    for (tree, step, seed) in &promotions {
        graph.tree_mut(*tree).seeds.insert(seed.clone());
        graph.step_mut(*step).cycle_starts.clear();
    }

    debug!(promoted_seeds = promotions.len(), "Post-processed plan graph");
    Ok(())
}

/// Drops every type that has a proper subtype among `types`. If that would drop every type, which
/// happens for cyclic hierarchies, `types` is returned as it is.
fn most_specific_types<F: Fountain + ?Sized>(
    types: &BTreeSet<NamedNode>,
    fountain: &F,
) -> Result<BTreeSet<NamedNode>, PlanGraphError> {
    let mut result = BTreeSet::new();
    for ty in types {
        let subtypes = fountain.subtypes(ty.as_ref())?;
        let has_proper_subtype = types
            .iter()
            .any(|other| other != ty && subtypes.contains(other));
        if !has_proper_subtype {
            result.insert(ty.clone());
        }
    }

    if result.is_empty() {
        return Ok(types.clone());
    }
    Ok(result)
}

fn seed_promotions(graph: &PlanGraph) -> Vec<(TreeId, StepId, NamedNode)> {
    let mut result = Vec::new();
    for (tree_id, tree) in graph.trees() {
        for step in tree.children() {
            for pattern in graph.step(*step).patterns() {
                if let TermPattern::NamedNode(subject) = graph.pattern(*pattern).subject() {
                    result.push((tree_id, *step, subject.clone()));
                }
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rdf_fragments_fountain::MemoryFountain;

    fn ex(local: &str) -> NamedNode {
        NamedNode::new_unchecked(format!("http://ex.org/{local}"))
    }

    fn fountain() -> MemoryFountain {
        let mut fountain = MemoryFountain::new();
        fountain.add_subtype(ex("Film"), ex("Work"));
        fountain.add_subtype(ex("Documentary"), ex("Film"));
        fountain.add_type(ex("Person"));
        fountain.add_subtype(ex("Loop1"), ex("Loop2"));
        fountain.add_subtype(ex("Loop2"), ex("Loop1"));
        fountain
    }

    #[test]
    fn supertypes_are_dropped() {
        let types = BTreeSet::from([ex("Work"), ex("Documentary"), ex("Person")]);
        assert_eq!(
            most_specific_types(&types, &fountain()).unwrap(),
            BTreeSet::from([ex("Documentary"), ex("Person")])
        );
    }

    #[test]
    fn cyclic_hierarchy_keeps_all_types() {
        let types = BTreeSet::from([ex("Loop1"), ex("Loop2")]);
        assert_eq!(most_specific_types(&types, &fountain()).unwrap(), types);
    }
}
