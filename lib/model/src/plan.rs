use crate::{PatternPosition, PlanDecodingError, PrefixMap};
use oxrdf::vocab::rdf;
use oxrdf::{Literal, NamedNode, Variable};
use spargebra::term::{NamedNodePattern, TermPattern, TriplePattern};
use std::io::Read;
use std::str::FromStr;

/// A single step of a path or a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlanStep {
    /// The property to follow.
    pub property: NamedNode,
    /// The type of the node reached by following [Self::property].
    pub expected_type: NamedNode,
}

impl PlanStep {
    pub fn new(property: NamedNode, expected_type: NamedNode) -> Self {
        Self {
            property,
            expected_type,
        }
    }
}

/// A self-referential property chain the planner found for a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanCycle {
    /// The planner's identifier of the cycle.
    pub id: String,
    pub steps: Vec<PlanStep>,
}

/// A candidate path that reaches a triple pattern from a list of seeds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanPath {
    pub steps: Vec<PlanStep>,
    /// The seeds in the order given by the planner. The order is part of the tree identity.
    pub seeds: Vec<NamedNode>,
    pub check: Option<bool>,
}

/// Hints the planner attaches to a triple pattern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanHints {
    /// Whether the collector must verify type assertions. Only meaningful for `rdf:type`
    /// patterns.
    pub check: Option<bool>,
}

/// The evaluation plan of a single triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    /// Opaque identifier of the search space.
    pub context: String,
    pub pattern: TriplePattern,
    pub hints: PlanHints,
    pub cycles: Vec<PlanCycle>,
    pub paths: Vec<PlanPath>,
}

/// The output of the planner: for every triple pattern, the paths, seeds and cycles that can
/// reach it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvaluationPlan {
    pub prefixes: PrefixMap,
    pub entries: Vec<PlanEntry>,
}

impl EvaluationPlan {
    /// Decodes a plan from its JSON representation.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, PlanDecodingError> {
        let plan: wire::EvaluationPlan = serde_json::from_reader(reader)?;
        plan.decode()
    }

    /// Decodes a plan from its JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, PlanDecodingError> {
        let plan: wire::EvaluationPlan = serde_json::from_str(json)?;
        plan.decode()
    }
}

/// Returns the asserted type if `pattern` has the shape `?s rdf:type <T>`.
pub fn asserted_type(pattern: &TriplePattern) -> Option<&NamedNode> {
    match (&pattern.predicate, &pattern.object) {
        (NamedNodePattern::NamedNode(p), TermPattern::NamedNode(t)) if p.as_ref() == rdf::TYPE => {
            Some(t)
        }
        _ => None,
    }
}

/// Returns whether the predicate of `pattern` is `rdf:type`.
pub fn is_type_pattern(pattern: &TriplePattern) -> bool {
    matches!(&pattern.predicate, NamedNodePattern::NamedNode(p) if p.as_ref() == rdf::TYPE)
}

/// Parses a single term of a triple pattern.
///
/// `?name` is a variable, `a` is `rdf:type`, quoted strings and numbers are literals and
/// everything else is an IRI, possibly in compact form.
pub fn parse_pattern_term(
    prefixes: &PrefixMap,
    position: PatternPosition,
    raw: &str,
) -> Result<TermPattern, PlanDecodingError> {
    let raw = raw.trim();
    if let Some(name) = raw.strip_prefix('?').or_else(|| raw.strip_prefix('$')) {
        return Ok(Variable::new(name)?.into());
    }
    if raw == "a" {
        return Ok(rdf::TYPE.into_owned().into());
    }
    if raw.starts_with('"')
        || raw.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+')
    {
        return Ok(Literal::from_str(raw)?.into());
    }
    if raw.starts_with("_:") || raw.starts_with("<<") || raw.is_empty() {
        return Err(PlanDecodingError::UnsupportedTerm {
            position,
            term: raw.to_owned(),
        });
    }
    Ok(prefixes.expand(raw).into())
}

/// Parses `[subject, predicate, object]` into a [TriplePattern].
pub fn parse_triple_pattern(
    prefixes: &PrefixMap,
    [subject, predicate, object]: &[String; 3],
) -> Result<TriplePattern, PlanDecodingError> {
    let unsupported = |position, term: &TermPattern| PlanDecodingError::UnsupportedTerm {
        position,
        term: term.to_string(),
    };

    let subject = match parse_pattern_term(prefixes, PatternPosition::Subject, subject)? {
        term @ (TermPattern::Variable(_) | TermPattern::NamedNode(_)) => term,
        term => return Err(unsupported(PatternPosition::Subject, &term)),
    };
    let predicate = match parse_pattern_term(prefixes, PatternPosition::Predicate, predicate)? {
        TermPattern::NamedNode(node) => NamedNodePattern::NamedNode(node),
        term => return Err(unsupported(PatternPosition::Predicate, &term)),
    };
    let object = match parse_pattern_term(prefixes, PatternPosition::Object, object)? {
        term @ (TermPattern::Variable(_) | TermPattern::NamedNode(_) | TermPattern::Literal(_)) => {
            term
        }
        term => return Err(unsupported(PatternPosition::Object, &term)),
    };

    Ok(TriplePattern {
        subject,
        predicate,
        object,
    })
}

/// The JSON shape produced by the planner.
mod wire {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Deserialize)]
    pub struct EvaluationPlan {
        #[serde(default)]
        prefixes: BTreeMap<String, String>,
        #[serde(alias = "plan")]
        entries: Vec<PlanEntry>,
    }

    #[derive(Deserialize)]
    struct PlanEntry {
        context: Id,
        pattern: [String; 3],
        #[serde(default)]
        hints: Hints,
        #[serde(default)]
        cycles: Vec<Cycle>,
        #[serde(default)]
        paths: Vec<Path>,
    }

    #[derive(Deserialize, Default)]
    struct Hints {
        check: Option<bool>,
    }

    #[derive(Deserialize)]
    struct Cycle {
        #[serde(alias = "id")]
        cycle: Id,
        steps: Vec<Step>,
    }

    #[derive(Deserialize)]
    struct Path {
        #[serde(default)]
        steps: Vec<Step>,
        #[serde(default)]
        seeds: Vec<String>,
        check: Option<bool>,
    }

    #[derive(Deserialize)]
    struct Step {
        property: String,
        #[serde(rename = "type")]
        ty: String,
    }

    /// Planners use numbers or strings as identifiers.
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Number(i64),
        Text(String),
    }

    impl Id {
        fn into_string(self) -> String {
            match self {
                Id::Number(n) => n.to_string(),
                Id::Text(s) => s,
            }
        }
    }

    impl EvaluationPlan {
        pub fn decode(self) -> Result<super::EvaluationPlan, PlanDecodingError> {
            let prefixes = self.prefixes.into_iter().collect::<PrefixMap>();
            let entries = self
                .entries
                .into_iter()
                .map(|entry| entry.decode(&prefixes))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(super::EvaluationPlan { prefixes, entries })
        }
    }

    impl PlanEntry {
        fn decode(self, prefixes: &PrefixMap) -> Result<super::PlanEntry, PlanDecodingError> {
            let pattern = parse_triple_pattern(prefixes, &self.pattern)?;
            let cycles = self
                .cycles
                .into_iter()
                .map(|cycle| PlanCycle {
                    id: cycle.cycle.into_string(),
                    steps: decode_steps(prefixes, cycle.steps),
                })
                .collect();
            let paths = self
                .paths
                .into_iter()
                .map(|path| path.decode(prefixes))
                .collect::<Result<Vec<_>, _>>()?;

            Ok(super::PlanEntry {
                context: self.context.into_string(),
                pattern,
                hints: PlanHints {
                    check: self.hints.check,
                },
                cycles,
                paths,
            })
        }
    }

    impl Path {
        fn decode(self, prefixes: &PrefixMap) -> Result<PlanPath, PlanDecodingError> {
            let seeds = self
                .seeds
                .into_iter()
                .map(decode_seed)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(PlanPath {
                steps: decode_steps(prefixes, self.steps),
                seeds,
                check: self.check,
            })
        }
    }

    fn decode_steps(prefixes: &PrefixMap, steps: Vec<Step>) -> Vec<PlanStep> {
        steps
            .into_iter()
            .map(|step| PlanStep::new(prefixes.expand(&step.property), prefixes.expand(&step.ty)))
            .collect()
    }

    fn decode_seed(seed: String) -> Result<NamedNode, PlanDecodingError> {
        let iri = seed
            .strip_prefix('<')
            .and_then(|s| s.strip_suffix('>'))
            .unwrap_or(&seed);
        NamedNode::new(iri).map_err(|source| PlanDecodingError::InvalidSeed {
            seed: seed.clone(),
            source,
        })
    }
}
