use crate::graph::{Cycle, CycleId, PlanGraph};
use rdf_fragments_fountain::{Fountain, FountainError};
use rdf_fragments_model::{PlanCycle, PlanStep};
use rustc_hash::FxHashSet;
use tracing::trace;

/// Describes each cycle of a plan exactly once.
///
/// Cycles with more than one step are described in both directions. The reversed description
/// uses the id of the cycle suffixed with `r`.
pub struct CycleDescriber<'a, F: ?Sized> {
    fountain: &'a F,
    seen: FxHashSet<CycleId>,
}

impl<'a, F: Fountain + ?Sized> CycleDescriber<'a, F> {
    pub fn new(fountain: &'a F) -> Self {
        Self {
            fountain,
            seen: FxHashSet::default(),
        }
    }

    /// Describes `cycle` and its reversed form, returning the ids of all descriptions that exist
    /// in `graph` afterward.
    pub fn describe_plan_cycle(
        &mut self,
        graph: &mut PlanGraph,
        cycle: &PlanCycle,
    ) -> Result<Vec<CycleId>, FountainError> {
        let id = CycleId::new(cycle.id.as_str());
        let reversed_id = id.reversed();
        let mut ids = Vec::new();
        ids.extend(self.describe(graph, id, &cycle.steps)?);
        if cycle.steps.len() > 1 {
            let reversed = cycle.steps.iter().rev().cloned().collect::<Vec<_>>();
            ids.extend(self.describe(graph, reversed_id, &reversed)?);
        }
        Ok(ids)
    }

    /// Describes a single chain. Later calls with the same id reuse the first description.
    ///
    /// The root of the cycle expects the subtypes of the first step's type. Returns [None] for
    /// an empty chain, which has no type to start from.
    pub fn describe(
        &mut self,
        graph: &mut PlanGraph,
        id: CycleId,
        steps: &[PlanStep],
    ) -> Result<Option<CycleId>, FountainError> {
        if self.seen.contains(&id) {
            return Ok(graph.cycles.contains_key(&id).then_some(id));
        }
        self.seen.insert(id.clone());

        let Some(first) = steps.first() else {
            trace!(cycle = %id, "Skipping cycle without steps");
            return Ok(None);
        };

        let expected_types = self.fountain.subtypes(first.expected_type.as_ref())?;
        graph.cycles.insert(
            id.clone(),
            Cycle {
                id: id.clone(),
                expected_types,
                steps: steps.to_vec(),
            },
        );
        Ok(Some(id))
    }
}
