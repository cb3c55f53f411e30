use crate::graph::{PlanGraph, StepId};
use crate::{PlanGraphError, QueryRoots};
use rdf_fragments_fountain::Fountain;
use rdf_fragments_model::NamedNode;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Propagates type assertions along the trees and anchors cycles at the steps that may enter
/// them.
///
/// A step takes part only if all patterns served by it or by its siblings have a root of the
/// query as their subject. The expected types of such a step are widened by the subtypes of every
/// asserted type it already expects. A cycle is anchored at every participating step whose
/// expected types share a type with the subtypes of the cycle's root types. Cycles without any
/// anchor are removed from the graph.
pub fn propagate_and_prune<F: Fountain + ?Sized>(
    mut graph: PlanGraph,
    fountain: &F,
    roots: &QueryRoots,
) -> Result<PlanGraph, PlanGraphError> {
    let step_types = widen_expected_types(&mut graph, fountain, roots)?;

    let mut cycle_roots = Vec::new();
    for cycle in graph.cycles() {
        let mut root_types = BTreeSet::new();
        for ty in cycle.expected_types() {
            root_types.extend(fountain.subtypes(ty.as_ref())?);
        }
        cycle_roots.push((cycle.id().clone(), root_types));
    }

    let mut pruned = Vec::new();
    for (cycle, root_types) in cycle_roots {
        let starts = step_types
            .iter()
            .filter(|(_, types)| !types.is_disjoint(&root_types))
            .map(|(step, _)| *step)
            .collect::<Vec<_>>();
        if starts.is_empty() {
            pruned.push(cycle);
            continue;
        }
        for step in starts {
            graph.step_mut(step).cycle_starts.insert(cycle.clone());
        }
    }

    for cycle in &pruned {
        debug!(%cycle, "Pruning cycle without entry point");
        graph.remove_cycle(cycle);
    }

    debug!(
        eligible_steps = step_types.len(),
        cycles = graph.cycles.len(),
        pruned = pruned.len(),
        "Propagated types"
    );
    Ok(graph)
}

/// Widens the expected types of all eligible steps and returns their resulting types.
fn widen_expected_types<F: Fountain + ?Sized>(
    graph: &mut PlanGraph,
    fountain: &F,
    roots: &QueryRoots,
) -> Result<BTreeMap<StepId, BTreeSet<NamedNode>>, PlanGraphError> {
    let mut result = BTreeMap::new();
    for id in (0..graph.steps.len()).map(StepId) {
        if graph.step(id).expected_types.is_empty() {
            continue;
        }

        let near = graph.near_patterns(id);
        let anchored = near
            .iter()
            .all(|pattern| roots.contains(graph.pattern(*pattern).subject()));
        if near.is_empty() || !anchored {
            continue;
        }

        let mut widened = BTreeSet::new();
        for pattern in &near {
            let Some(ty) = graph.pattern(*pattern).asserted_type() else {
                continue;
            };
            if graph.step(id).expected_types.contains(ty) {
                widened.extend(fountain.subtypes(ty.as_ref())?);
            }
        }

        let step = graph.step_mut(id);
        step.expected_types.extend(widened);
        result.insert(id, step.expected_types.clone());
    }
    Ok(result)
}
