use rdf_fragments_fountain::MemoryFountain;
use rdf_fragments_model::{
    parse_pattern_term, EvaluationPlan, NamedNode, PatternPosition, PrefixMap,
};
use rdf_fragments_plan::{
    build_plan_graph, PlanGraph, PlanGraphError, SearchTree, StepId, TreeFingerprint,
};

const VOCABULARY: &str = r#"
    @prefix ex: <http://ex.org/> .
    @prefix owl: <http://www.w3.org/2002/07/owl#> .
    @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .

    ex:Work a owl:Class .
    ex:Film a owl:Class ; rdfs:subClassOf ex:Work .
    ex:Documentary a owl:Class ; rdfs:subClassOf ex:Film .
    ex:Person a owl:Class .
    ex:Student a owl:Class ; rdfs:subClassOf ex:Person .
    ex:Place a owl:Class .
"#;

pub fn ex(local: &str) -> NamedNode {
    NamedNode::new_unchecked(format!("http://ex.org/{local}"))
}

pub fn fountain() -> MemoryFountain {
    MemoryFountain::from_vocabulary(VOCABULARY.as_bytes()).unwrap()
}

/// Builds the plan graph of a JSON plan. Roots are written like pattern terms.
pub fn try_build(plan: &str, roots: &[&str]) -> Result<PlanGraph, PlanGraphError> {
    let plan = EvaluationPlan::from_json_str(plan).unwrap();
    let roots = roots
        .iter()
        .map(|root| parse_pattern_term(&PrefixMap::new(), PatternPosition::Subject, root).unwrap())
        .collect();
    build_plan_graph(&plan, &fountain(), &roots)
}

pub fn build(plan: &str, roots: &[&str]) -> PlanGraph {
    try_build(plan, roots).unwrap()
}

pub fn tree<'a>(graph: &'a PlanGraph, seeds: &[&str]) -> &'a SearchTree {
    let seeds = seeds.iter().map(|s| ex(s)).collect::<Vec<_>>();
    let id = graph
        .tree_by_fingerprint(&TreeFingerprint::from_seeds(&seeds))
        .unwrap();
    graph.tree(id)
}

/// Follows the children of a tree along the given step indices.
pub fn step(graph: &PlanGraph, tree: &SearchTree, path: &[usize]) -> StepId {
    let mut current = tree.children()[path[0]];
    for index in &path[1..] {
        current = graph.step(current).children()[*index];
    }
    current
}
