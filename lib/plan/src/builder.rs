use crate::cycles::CycleDescriber;
use crate::graph::{
    ChainNode, CycleId, PatternId, PlanGraph, SearchSpace, SearchTree, Step, StepId, StepLabel,
    TreeId,
};
use crate::post_process::post_process;
use crate::propagation::propagate_and_prune;
use crate::registry::PatternRegistry;
use crate::{PlanGraphError, QueryRoots, TreeFingerprint};
use rdf_fragments_fountain::Fountain;
use rdf_fragments_model::{
    asserted_type, is_type_pattern, EvaluationPlan, NamedNode, PlanEntry, PlanPath, PrefixMap,
    TermPattern, TriplePattern,
};
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

/// Builds the plan graph of `plan`.
///
/// This builds the trees and cycles of all entries, propagates types along the trees, prunes
/// the cycles that cannot be entered from the `roots` of the query, and finally normalizes the
/// starting types and seeds of the trees.
pub fn build_plan_graph<F: Fountain + ?Sized>(
    plan: &EvaluationPlan,
    fountain: &F,
    roots: &QueryRoots,
) -> Result<PlanGraph, PlanGraphError> {
    let graph = build_initial_graph(plan, fountain)?;
    let mut graph = propagate_and_prune(graph, fountain, roots)?;
    post_process(&mut graph, fountain)?;
    Ok(graph)
}

/// Builds the trees and cycles of all entries of `plan` without propagating types.
pub fn build_initial_graph<F: Fountain + ?Sized>(
    plan: &EvaluationPlan,
    fountain: &F,
) -> Result<PlanGraph, PlanGraphError> {
    let mut builder = PlanGraphBuilder::new(fountain, plan.prefixes.clone());
    for entry in &plan.entries {
        builder.add_entry(entry)?;
    }
    Ok(builder.build())
}

/// Incrementally compiles plan entries into a [PlanGraph].
///
/// All registries are local to the builder. Trees are identified by the fingerprint of their
/// seeds, steps by their parent and label, and patterns by their terms.
pub struct PlanGraphBuilder<'a, F: ?Sized> {
    graph: PlanGraph,
    patterns: PatternRegistry,
    trees: FxHashMap<TreeFingerprint, TreeId>,
    steps: FxHashMap<(ChainNode, StepLabel), StepId>,
    cycles: CycleDescriber<'a, F>,
    entries: usize,
}

impl<'a, F: Fountain + ?Sized> PlanGraphBuilder<'a, F> {
    pub fn new(fountain: &'a F, prefixes: PrefixMap) -> Self {
        Self {
            graph: PlanGraph::new(prefixes),
            patterns: PatternRegistry::new(),
            trees: FxHashMap::default(),
            steps: FxHashMap::default(),
            cycles: CycleDescriber::new(fountain),
            entries: 0,
        }
    }

    /// Adds the search space, the pattern and the paths of `entry`.
    ///
    /// The cycles of the entry are described when the first path of the entry is included and
    /// are linked to every tree the entry contributes to.
    pub fn add_entry(&mut self, entry: &PlanEntry) -> Result<(), PlanGraphError> {
        self.entries += 1;
        let check_type = if is_type_pattern(&entry.pattern) {
            entry.hints.check
        } else {
            None
        };
        let pattern = self
            .patterns
            .get_or_create(&mut self.graph, &entry.pattern, check_type);
        self.graph.spaces.push(SearchSpace {
            context: entry.context.clone(),
            pattern,
        });

        let mut described: Option<Vec<CycleId>> = None;
        for path in &entry.paths {
            let Some(from_type) = starting_type(&entry.pattern, path) else {
                trace!(
                    context = entry.context,
                    seeds = path.seeds.len(),
                    "Skipping path without a starting type"
                );
                continue;
            };

            if described.is_none() {
                let mut ids = Vec::new();
                for cycle in &entry.cycles {
                    ids.extend(self.cycles.describe_plan_cycle(&mut self.graph, cycle)?);
                }
                described = Some(ids);
            }
            let cycles = described.as_deref().unwrap_or_default();
            self.include_path(pattern, &entry.pattern, path, from_type, cycles);
        }
        Ok(())
    }

    /// Returns the graph built so far.
    pub fn build(self) -> PlanGraph {
        debug!(
            entries = self.entries,
            patterns = self.patterns.len(),
            trees = self.trees.len(),
            steps = self.steps.len(),
            cycles = self.graph.cycles.len(),
            "Built initial plan graph"
        );
        self.graph
    }

    fn include_path(
        &mut self,
        pattern_id: PatternId,
        pattern: &TriplePattern,
        path: &PlanPath,
        from_type: NamedNode,
        cycles: &[CycleId],
    ) {
        let tree_id = self.get_or_create_tree(TreeFingerprint::from_seeds(&path.seeds));
        let tree = self.graph.tree_mut(tree_id);
        tree.from_types.insert(from_type);
        tree.seeds.extend(path.seeds.iter().cloned());
        tree.cycles.extend(cycles.iter().cloned());
        tree.length += path.steps.len();

        let asserted = asserted_type(pattern);
        let last = path.steps.len().saturating_sub(1);
        let mut node = ChainNode::Tree(tree_id);
        for (i, step) in path.steps.iter().enumerate() {
            let label = if i < last || asserted.is_some() {
                StepLabel::Property(step.property.clone())
            } else {
                StepLabel::End
            };
            let id = self.get_or_create_step(node, label);
            self.graph
                .step_mut(id)
                .expected_types
                .insert(step.expected_type.clone());
            node = ChainNode::Step(id);
        }

        if let Some(ty) = asserted {
            let leaf = self.get_or_create_step(node, StepLabel::End);
            let leaf = self.graph.step_mut(leaf);
            leaf.expected_types.insert(ty.clone());
            leaf.patterns.insert(pattern_id);
            if path.check == Some(true) {
                leaf.check_type = Some(true);
            }
        } else {
            match node {
                ChainNode::Tree(tree) => self.graph.tree_mut(tree).patterns.insert(pattern_id),
                ChainNode::Step(step) => self.graph.step_mut(step).patterns.insert(pattern_id),
            };
        }
    }

    fn get_or_create_tree(&mut self, fingerprint: TreeFingerprint) -> TreeId {
        if let Some(id) = self.trees.get(&fingerprint) {
            return *id;
        }

        let id = TreeId(self.graph.trees.len());
        self.trees.insert(fingerprint.clone(), id);
        self.graph.trees.push(SearchTree::new(fingerprint));
        id
    }

    fn get_or_create_step(&mut self, parent: ChainNode, label: StepLabel) -> StepId {
        let key = (parent, label);
        if let Some(id) = self.steps.get(&key) {
            return *id;
        }

        let id = StepId(self.graph.steps.len());
        self.graph.steps.push(Step::new(parent, key.1.clone()));
        match parent {
            ChainNode::Tree(tree) => self.graph.tree_mut(tree).children.push(id),
            ChainNode::Step(step) => self.graph.step_mut(step).children.push(id),
        }
        self.steps.insert(key, id);
        id
    }
}

/// The starting type of a path is the type of its first step. Paths without steps start at the
/// object of the pattern, which must be an IRI, and only if they have seeds.
fn starting_type(pattern: &TriplePattern, path: &PlanPath) -> Option<NamedNode> {
    match path.steps.first() {
        Some(step) => Some(step.expected_type.clone()),
        None if path.seeds.is_empty() => None,
        None => match &pattern.object {
            TermPattern::NamedNode(object) => Some(object.clone()),
            _ => None,
        },
    }
}
