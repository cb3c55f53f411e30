use crate::TreeFingerprint;
use rdf_fragments_model::{
    asserted_type, NamedNode, NamedNodePattern, PlanStep, PrefixMap, TermPattern, TriplePattern,
    Variable,
};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{Display, Formatter};

/// Identifies a [PatternNode] within a [PlanGraph]. Patterns are numbered in the order they are
/// first encountered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternId(pub(crate) usize);

impl PatternId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl Display for PatternId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "tp{}", self.0)
    }
}

/// Identifies a [SearchTree] within a [PlanGraph].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TreeId(pub(crate) usize);

impl TreeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifies a [Step] within a [PlanGraph].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub(crate) usize);

impl StepId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Identifies a [Cycle]. This is the planner's cycle id, suffixed with `r` for the reversed
/// description of a multi-step cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CycleId(String);

impl CycleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id of the reversed description of this cycle.
    pub fn reversed(&self) -> Self {
        Self(format!("{}r", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for CycleId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A node that can have steps as children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChainNode {
    Tree(TreeId),
    Step(StepId),
}

/// The label of a step. Together with the parent, the label identifies a step.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StepLabel {
    /// Follow the given property.
    Property(NamedNode),
    /// The leaf of a chain. The property to follow is given by the pattern the leaf serves.
    End,
}

impl StepLabel {
    /// Returns the property to follow, if any.
    pub fn property(&self) -> Option<&NamedNode> {
        match self {
            StepLabel::Property(property) => Some(property),
            StepLabel::End => None,
        }
    }
}

/// The search space of a single plan entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpace {
    pub(crate) context: String,
    pub(crate) pattern: PatternId,
}

impl SearchSpace {
    pub fn context(&self) -> &str {
        &self.context
    }

    /// The pattern that defines this search space.
    pub fn pattern(&self) -> PatternId {
        self.pattern
    }
}

/// A deduplicated triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternNode {
    pub(crate) pattern: TriplePattern,
    pub(crate) check_type: Option<bool>,
}

impl PatternNode {
    pub fn pattern(&self) -> &TriplePattern {
        &self.pattern
    }

    pub fn subject(&self) -> &TermPattern {
        &self.pattern.subject
    }

    /// Whether the collector must verify the type assertion of this pattern.
    pub fn check_type(&self) -> Option<bool> {
        self.check_type
    }

    /// Returns the asserted type if this pattern has the shape `?s rdf:type <T>`.
    pub fn asserted_type(&self) -> Option<&NamedNode> {
        asserted_type(&self.pattern)
    }
}

/// A traversal plan that discovers instances of its starting types from a set of seeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTree {
    pub(crate) fingerprint: TreeFingerprint,
    pub(crate) from_types: BTreeSet<NamedNode>,
    pub(crate) seeds: BTreeSet<NamedNode>,
    pub(crate) length: usize,
    pub(crate) cycles: BTreeSet<CycleId>,
    pub(crate) patterns: BTreeSet<PatternId>,
    pub(crate) children: Vec<StepId>,
}

impl SearchTree {
    pub(crate) fn new(fingerprint: TreeFingerprint) -> Self {
        Self {
            fingerprint,
            from_types: BTreeSet::new(),
            seeds: BTreeSet::new(),
            length: 0,
            cycles: BTreeSet::new(),
            patterns: BTreeSet::new(),
            children: Vec::new(),
        }
    }

    pub fn fingerprint(&self) -> &TreeFingerprint {
        &self.fingerprint
    }

    pub fn from_types(&self) -> &BTreeSet<NamedNode> {
        &self.from_types
    }

    pub fn seeds(&self) -> &BTreeSet<NamedNode> {
        &self.seeds
    }

    /// The sum of the step counts of all paths merged into this tree.
    pub fn length(&self) -> usize {
        self.length
    }

    /// The cycles this tree goes through.
    pub fn cycles(&self) -> &BTreeSet<CycleId> {
        &self.cycles
    }

    /// Patterns served directly by the tree root. This happens for zero-step paths of patterns
    /// that are no type assertions.
    pub fn patterns(&self) -> &BTreeSet<PatternId> {
        &self.patterns
    }

    pub fn children(&self) -> &[StepId] {
        &self.children
    }
}

/// A step of a tree chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub(crate) parent: ChainNode,
    pub(crate) label: StepLabel,
    pub(crate) expected_types: BTreeSet<NamedNode>,
    pub(crate) patterns: BTreeSet<PatternId>,
    pub(crate) check_type: Option<bool>,
    pub(crate) cycle_starts: BTreeSet<CycleId>,
    pub(crate) children: Vec<StepId>,
}

impl Step {
    pub(crate) fn new(parent: ChainNode, label: StepLabel) -> Self {
        Self {
            parent,
            label,
            expected_types: BTreeSet::new(),
            patterns: BTreeSet::new(),
            check_type: None,
            cycle_starts: BTreeSet::new(),
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> ChainNode {
        self.parent
    }

    pub fn label(&self) -> &StepLabel {
        &self.label
    }

    pub fn property(&self) -> Option<&NamedNode> {
        self.label.property()
    }

    pub fn expected_types(&self) -> &BTreeSet<NamedNode> {
        &self.expected_types
    }

    /// The patterns this step serves.
    pub fn patterns(&self) -> &BTreeSet<PatternId> {
        &self.patterns
    }

    pub fn check_type(&self) -> Option<bool> {
        self.check_type
    }

    /// The cycles that may be entered at this step.
    pub fn cycle_starts(&self) -> &BTreeSet<CycleId> {
        &self.cycle_starts
    }

    pub fn children(&self) -> &[StepId] {
        &self.children
    }
}

/// A self-referential property chain. Trees reference cycles but do not own them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub(crate) id: CycleId,
    pub(crate) expected_types: BTreeSet<NamedNode>,
    pub(crate) steps: Vec<PlanStep>,
}

impl Cycle {
    pub fn id(&self) -> &CycleId {
        &self.id
    }

    /// The types at which the cycle may start.
    pub fn expected_types(&self) -> &BTreeSet<NamedNode> {
        &self.expected_types
    }

    pub fn steps(&self) -> &[PlanStep] {
        &self.steps
    }
}

/// The compiled form of an evaluation plan.
///
/// The graph consists of search spaces, deduplicated patterns, search trees with their step
/// chains and cycle descriptions. A fragment collector starts at the search spaces and follows
/// the chains of the trees to decide what to fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanGraph {
    pub(crate) prefixes: PrefixMap,
    pub(crate) spaces: Vec<SearchSpace>,
    pub(crate) patterns: Vec<PatternNode>,
    pub(crate) trees: Vec<SearchTree>,
    pub(crate) steps: Vec<Step>,
    pub(crate) cycles: BTreeMap<CycleId, Cycle>,
}

impl PlanGraph {
    pub(crate) fn new(prefixes: PrefixMap) -> Self {
        Self {
            prefixes,
            ..Self::default()
        }
    }

    /// The prefixes of the plan this graph was built from.
    pub fn prefixes(&self) -> &PrefixMap {
        &self.prefixes
    }

    pub fn spaces(&self) -> &[SearchSpace] {
        &self.spaces
    }

    pub fn patterns(&self) -> impl Iterator<Item = (PatternId, &PatternNode)> {
        self.patterns
            .iter()
            .enumerate()
            .map(|(i, pattern)| (PatternId(i), pattern))
    }

    pub fn pattern(&self, id: PatternId) -> &PatternNode {
        &self.patterns[id.0]
    }

    pub fn trees(&self) -> impl Iterator<Item = (TreeId, &SearchTree)> {
        self.trees
            .iter()
            .enumerate()
            .map(|(i, tree)| (TreeId(i), tree))
    }

    pub fn tree(&self, id: TreeId) -> &SearchTree {
        &self.trees[id.0]
    }

    /// Looks up the tree with the given fingerprint.
    pub fn tree_by_fingerprint(&self, fingerprint: &TreeFingerprint) -> Option<TreeId> {
        self.trees
            .iter()
            .position(|tree| &tree.fingerprint == fingerprint)
            .map(TreeId)
    }

    pub fn steps(&self) -> impl Iterator<Item = (StepId, &Step)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| (StepId(i), step))
    }

    pub fn step(&self, id: StepId) -> &Step {
        &self.steps[id.0]
    }

    /// Returns the steps following `node`.
    pub fn children(&self, node: ChainNode) -> &[StepId] {
        match node {
            ChainNode::Tree(tree) => &self.trees[tree.0].children,
            ChainNode::Step(step) => &self.steps[step.0].children,
        }
    }

    pub fn cycles(&self) -> impl Iterator<Item = &Cycle> {
        self.cycles.values()
    }

    pub fn cycle(&self, id: &CycleId) -> Option<&Cycle> {
        self.cycles.get(id)
    }

    /// Returns the patterns served by `step` or by one of its siblings.
    pub fn near_patterns(&self, step: StepId) -> BTreeSet<PatternId> {
        self.children(self.steps[step.0].parent)
            .iter()
            .flat_map(|sibling| self.steps[sibling.0].patterns.iter().copied())
            .collect()
    }

    /// Returns all variables used by the patterns. Variables are identified by their name.
    pub fn variables(&self) -> BTreeSet<&Variable> {
        self.patterns
            .iter()
            .flat_map(|node| {
                let subject = match &node.pattern.subject {
                    TermPattern::Variable(v) => Some(v),
                    _ => None,
                };
                let object = match &node.pattern.object {
                    TermPattern::Variable(v) => Some(v),
                    _ => None,
                };
                subject.into_iter().chain(object)
            })
            .collect()
    }

    /// Removes a cycle together with every reference to it.
    pub(crate) fn remove_cycle(&mut self, id: &CycleId) -> Option<Cycle> {
        let cycle = self.cycles.remove(id)?;
        for tree in &mut self.trees {
            tree.cycles.remove(id);
        }
        for step in &mut self.steps {
            step.cycle_starts.remove(id);
        }
        Some(cycle)
    }

    pub(crate) fn step_mut(&mut self, id: StepId) -> &mut Step {
        &mut self.steps[id.0]
    }

    pub(crate) fn tree_mut(&mut self, id: TreeId) -> &mut SearchTree {
        &mut self.trees[id.0]
    }

    fn fmt_iri(&self, iri: &NamedNode) -> String {
        self.prefixes
            .compact(iri.as_str())
            .unwrap_or_else(|| iri.to_string())
    }

    fn fmt_term(&self, term: &TermPattern) -> String {
        match term {
            TermPattern::NamedNode(iri) => self.fmt_iri(iri),
            term => term.to_string(),
        }
    }

    fn fmt_iris<'a>(&self, iris: impl IntoIterator<Item = &'a NamedNode>) -> String {
        iris.into_iter()
            .map(|iri| self.fmt_iri(iri))
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn fmt_step(&self, f: &mut Formatter<'_>, id: StepId, depth: usize) -> std::fmt::Result {
        let step = &self.steps[id.0];
        let indent = "  ".repeat(depth);
        match &step.label {
            StepLabel::Property(property) => write!(f, "{indent}{}", self.fmt_iri(property))?,
            StepLabel::End => write!(f, "{indent}#end")?,
        }
        write!(f, " [{}]", self.fmt_iris(&step.expected_types))?;
        if !step.patterns.is_empty() {
            write!(f, " byPattern: {}", join(&step.patterns))?;
        }
        if let Some(check) = step.check_type {
            write!(f, " checkType: {check}")?;
        }
        if !step.cycle_starts.is_empty() {
            write!(f, " isCycleStartOf: {}", join(&step.cycle_starts))?;
        }
        writeln!(f)?;

        for child in &step.children {
            self.fmt_step(f, *child, depth + 1)?;
        }
        Ok(())
    }
}

fn join<T: Display>(items: impl IntoIterator<Item = T>) -> String {
    items
        .into_iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for PlanGraph {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for space in &self.spaces {
            writeln!(f, "SearchSpace {} definedBy {}", space.context, space.pattern)?;
        }

        for (id, node) in self.patterns() {
            let predicate = match &node.pattern.predicate {
                NamedNodePattern::NamedNode(iri) => self.fmt_iri(iri),
                NamedNodePattern::Variable(v) => v.to_string(),
            };
            write!(
                f,
                "TriplePattern {id}: {} {predicate} {}",
                self.fmt_term(&node.pattern.subject),
                self.fmt_term(&node.pattern.object)
            )?;
            if let Some(check) = node.check_type {
                write!(f, " checkType: {check}")?;
            }
            writeln!(f)?;
        }

        for tree in &self.trees {
            writeln!(f, "SearchTree {} length: {}", tree.fingerprint, tree.length)?;
            writeln!(f, "  fromType: {}", self.fmt_iris(&tree.from_types))?;
            if !tree.seeds.is_empty() {
                writeln!(f, "  hasSeed: {}", self.fmt_iris(&tree.seeds))?;
            }
            if !tree.cycles.is_empty() {
                writeln!(f, "  goesThroughCycle: {}", join(&tree.cycles))?;
            }
            if !tree.patterns.is_empty() {
                writeln!(f, "  byPattern: {}", join(&tree.patterns))?;
            }
            for child in &tree.children {
                self.fmt_step(f, *child, 1)?;
            }
        }

        for cycle in self.cycles.values() {
            writeln!(
                f,
                "Cycle {} [{}]",
                cycle.id,
                self.fmt_iris(&cycle.expected_types)
            )?;
            for (depth, step) in cycle.steps.iter().enumerate() {
                writeln!(
                    f,
                    "{}{} [{}]",
                    "  ".repeat(depth + 1),
                    self.fmt_iri(&step.property),
                    self.fmt_iri(&step.expected_type)
                )?;
            }
        }
        Ok(())
    }
}
