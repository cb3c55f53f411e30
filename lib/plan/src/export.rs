use crate::graph::{CycleId, PatternId, PlanGraph, StepId, StepLabel};
use crate::ExportError;
use oxrdfio::{RdfFormat, RdfSerializer};
use rdf_fragments_model::vocab::{agora, rdf, rdfs, xsd};
use rdf_fragments_model::{
    BlankNode, GraphName, Literal, NamedNodePattern, NamedNodeRef, Quad, Subject, Term,
    TermPattern, Variable,
};
use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::io::Write;

impl PlanGraph {
    /// Describes the graph as RDF.
    ///
    /// Search spaces and patterns are placed in the default graph. Trees and their steps are
    /// placed in the `agora:trees` graph. Every cycle is described in a graph of its own, named
    /// after the cycle node.
    pub fn to_quads(&self) -> Vec<Quad> {
        let mut quads = QuadCollector::new(self);
        quads.describe_patterns();
        quads.describe_trees();
        quads.describe_cycles();
        quads.quads
    }

    /// Serializes the graph. The format must support named graphs.
    pub fn write_to<W: Write>(&self, format: RdfFormat, writer: W) -> Result<W, ExportError> {
        if !format.supports_datasets() {
            return Err(ExportError::DatasetFormatExpected(format));
        }

        let mut serializer =
            RdfSerializer::from_format(format).with_prefix(agora::PREFIX, agora::NAMESPACE)?;
        for (prefix, namespace) in self.prefixes.iter() {
            serializer = serializer.with_prefix(prefix, namespace)?;
        }

        let mut serializer = serializer.for_writer(writer);
        for quad in self.to_quads() {
            serializer.serialize_quad(&quad)?;
        }
        Ok(serializer.finish()?)
    }
}

struct QuadCollector<'a> {
    graph: &'a PlanGraph,
    cycle_nodes: BTreeMap<&'a CycleId, BlankNode>,
    literal_nodes: FxHashMap<&'a Literal, BlankNode>,
    quads: Vec<Quad>,
}

impl<'a> QuadCollector<'a> {
    fn new(graph: &'a PlanGraph) -> Self {
        let cycle_nodes = graph
            .cycles
            .keys()
            .enumerate()
            .map(|(i, id)| (id, BlankNode::new_unchecked(format!("cycle_{i}"))))
            .collect();
        Self {
            graph,
            cycle_nodes,
            literal_nodes: FxHashMap::default(),
            quads: Vec::new(),
        }
    }

    fn add(
        &mut self,
        subject: impl Into<Subject>,
        predicate: NamedNodeRef<'_>,
        object: impl Into<Term>,
        graph_name: impl Into<GraphName>,
    ) {
        self.quads
            .push(Quad::new(subject, predicate, object, graph_name));
    }

    fn describe_patterns(&mut self) {
        let graph = self.graph;
        for (i, space) in graph.spaces.iter().enumerate() {
            let node = BlankNode::new_unchecked(format!("space_{i}"));
            self.add(
                node.clone(),
                rdf::TYPE,
                agora::SEARCH_SPACE.into_owned(),
                GraphName::DefaultGraph,
            );
            self.add(
                node,
                agora::DEFINED_BY,
                pattern_node(space.pattern),
                GraphName::DefaultGraph,
            );
        }

        for variable in graph.variables() {
            let node = variable_node(variable);
            self.add(
                node.clone(),
                rdf::TYPE,
                agora::VARIABLE.into_owned(),
                GraphName::DefaultGraph,
            );
            self.add(
                node,
                rdfs::LABEL,
                Literal::new_simple_literal(variable.to_string()),
                GraphName::DefaultGraph,
            );
        }

        for (id, pattern) in graph.patterns() {
            let node = pattern_node(id);
            let triple = pattern.pattern();
            self.add(
                node.clone(),
                rdf::TYPE,
                agora::TRIPLE_PATTERN.into_owned(),
                GraphName::DefaultGraph,
            );
            self.add(
                node.clone(),
                rdfs::LABEL,
                Literal::new_simple_literal(node.as_str()),
                GraphName::DefaultGraph,
            );

            if let Some(subject) = term_node(&triple.subject) {
                self.add(node.clone(), agora::SUBJECT, subject, GraphName::DefaultGraph);
            }
            let predicate: Term = match &triple.predicate {
                NamedNodePattern::NamedNode(iri) => iri.clone().into(),
                NamedNodePattern::Variable(variable) => variable_node(variable).into(),
            };
            self.add(node.clone(), agora::PREDICATE, predicate, GraphName::DefaultGraph);
            match &triple.object {
                TermPattern::Literal(literal) => {
                    let value = self.literal_node(literal);
                    self.add(node.clone(), agora::OBJECT, value, GraphName::DefaultGraph);
                }
                object => {
                    if let Some(object) = term_node(object) {
                        self.add(node.clone(), agora::OBJECT, object, GraphName::DefaultGraph);
                    }
                }
            }

            if let Some(check) = pattern.check_type() {
                self.add(node, agora::CHECK_TYPE, Literal::from(check), GraphName::DefaultGraph);
            }
        }
    }

    /// Equal literals share one value node.
    fn literal_node(&mut self, literal: &'a Literal) -> BlankNode {
        if let Some(node) = self.literal_nodes.get(literal) {
            return node.clone();
        }

        let node = BlankNode::new_unchecked(format!("lit_{}", self.literal_nodes.len()));
        self.literal_nodes.insert(literal, node.clone());
        self.add(
            node.clone(),
            rdf::TYPE,
            agora::LITERAL.into_owned(),
            GraphName::DefaultGraph,
        );
        self.add(node.clone(), agora::VALUE, literal.clone(), GraphName::DefaultGraph);
        node
    }

    fn describe_trees(&mut self) {
        let graph = self.graph;
        let trees_graph = GraphName::NamedNode(agora::TREES.into_owned());
        for (_, tree) in graph.trees() {
            let node = BlankNode::new_unchecked(format!("tree_{}", tree.fingerprint()));
            self.add(node.clone(), rdf::TYPE, agora::SEARCH_TREE.into_owned(), trees_graph.clone());
            for ty in tree.from_types() {
                self.add(node.clone(), agora::FROM_TYPE, ty.clone(), trees_graph.clone());
            }
            for seed in tree.seeds() {
                self.add(node.clone(), agora::HAS_SEED, seed.clone(), trees_graph.clone());
            }
            self.add(
                node.clone(),
                agora::LENGTH,
                Literal::new_typed_literal(tree.length().to_string(), xsd::INTEGER),
                trees_graph.clone(),
            );
            for pattern in tree.patterns() {
                self.add(
                    node.clone(),
                    agora::BY_PATTERN,
                    pattern_node(*pattern),
                    trees_graph.clone(),
                );
            }
            for child in tree.children() {
                self.add(node.clone(), agora::NEXT, step_node(*child), trees_graph.clone());
            }
            for cycle in tree.cycles() {
                if let Some(cycle_node) = self.cycle_nodes.get(cycle).cloned() {
                    self.add(
                        node.clone(),
                        agora::GOES_THROUGH_CYCLE,
                        cycle_node.clone(),
                        cycle_node,
                    );
                }
            }
        }

        for (id, step) in graph.steps() {
            let node = step_node(id);
            if let StepLabel::Property(property) = step.label() {
                self.add(node.clone(), agora::ON_PROPERTY, property.clone(), trees_graph.clone());
            }
            for ty in step.expected_types() {
                self.add(node.clone(), agora::EXPECTED_TYPE, ty.clone(), trees_graph.clone());
            }
            for pattern in step.patterns() {
                self.add(
                    node.clone(),
                    agora::BY_PATTERN,
                    pattern_node(*pattern),
                    trees_graph.clone(),
                );
            }
            if let Some(check) = step.check_type() {
                self.add(
                    node.clone(),
                    agora::CHECK_TYPE,
                    Literal::from(check),
                    trees_graph.clone(),
                );
            }
            for cycle in step.cycle_starts() {
                if let Some(cycle_node) = self.cycle_nodes.get(cycle).cloned() {
                    self.add(
                        node.clone(),
                        agora::IS_CYCLE_START_OF,
                        cycle_node,
                        trees_graph.clone(),
                    );
                }
            }
            for child in step.children() {
                self.add(node.clone(), agora::NEXT, step_node(*child), trees_graph.clone());
            }
        }
    }

    fn describe_cycles(&mut self) {
        let graph = self.graph;
        for cycle in graph.cycles() {
            let Some(node) = self.cycle_nodes.get(cycle.id()).cloned() else {
                continue;
            };
            let cycle_graph = GraphName::from(node.clone());
            self.add(node.clone(), rdf::TYPE, agora::CYCLE.into_owned(), cycle_graph.clone());
            self.add(
                node.clone(),
                rdfs::LABEL,
                Literal::new_simple_literal(cycle.id().as_str()),
                cycle_graph.clone(),
            );
            for ty in cycle.expected_types() {
                self.add(node.clone(), agora::EXPECTED_TYPE, ty.clone(), cycle_graph.clone());
            }

            let mut previous = node.clone();
            for (j, step) in cycle.steps().iter().enumerate() {
                let step_node = BlankNode::new_unchecked(format!("{}_{j}", node.as_str()));
                self.add(previous, agora::NEXT, step_node.clone(), cycle_graph.clone());
                self.add(
                    step_node.clone(),
                    agora::ON_PROPERTY,
                    step.property.clone(),
                    cycle_graph.clone(),
                );
                self.add(
                    step_node.clone(),
                    agora::EXPECTED_TYPE,
                    step.expected_type.clone(),
                    cycle_graph.clone(),
                );
                previous = step_node;
            }
        }
    }
}

fn pattern_node(id: PatternId) -> BlankNode {
    BlankNode::new_unchecked(format!("tp_{}", id.index()))
}

fn step_node(id: StepId) -> BlankNode {
    BlankNode::new_unchecked(format!("step_{}", id.index()))
}

fn variable_node(variable: &Variable) -> BlankNode {
    BlankNode::new_unchecked(format!("var_{}", variable.as_str()))
}

/// Variables become variable nodes and IRIs are used as they are.
fn term_node(term: &TermPattern) -> Option<Term> {
    match term {
        TermPattern::Variable(variable) => Some(variable_node(variable).into()),
        TermPattern::NamedNode(iri) => Some(iri.clone().into()),
        TermPattern::Literal(literal) => Some(literal.clone().into()),
        _ => None,
    }
}
