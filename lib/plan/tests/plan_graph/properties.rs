use crate::test_utils::{build, ex, step, tree, try_build};
use rdf_fragments_fountain::FountainError;
use rdf_fragments_model::vocab::agora;
use rdf_fragments_model::Term;
use rdf_fragments_plan::{CycleId, PlanGraphError, StepLabel};
use std::collections::BTreeSet;

#[test]
fn equal_patterns_share_one_node() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [
                {
                    "context": 0,
                    "pattern": ["?film", "a", "ex:Film"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/f1"]}]
                },
                {
                    "context": 1,
                    "pattern": ["?film", "a", "ex:Film"],
                    "paths": [{
                        "steps": [{"property": "ex:directed", "type": "ex:Film"}],
                        "seeds": ["http://ex.org/d1"]
                    }]
                }
            ]
        }"#,
        &["?film"],
    );

    assert_eq!(graph.patterns().count(), 1);
    assert_eq!(graph.spaces().len(), 2);
    assert_eq!(graph.spaces()[0].pattern(), graph.spaces()[1].pattern());
    assert_eq!(graph.trees().count(), 2);
}

#[test]
fn paths_with_equal_seeds_share_one_tree() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [
                {
                    "context": 0,
                    "pattern": ["?film", "a", "ex:Film"],
                    "paths": [
                        {
                            "steps": [{"property": "ex:directed", "type": "ex:Film"}],
                            "seeds": ["http://ex.org/d1"]
                        },
                        {"steps": [], "seeds": ["http://ex.org/d1"]},
                        {"steps": [], "seeds": ["http://ex.org/d1", "http://ex.org/d2"]}
                    ]
                },
                {
                    "context": 1,
                    "pattern": ["?film", "ex:title", "?title"],
                    "paths": [{
                        "steps": [
                            {"property": "ex:directed", "type": "ex:Film"},
                            {"property": "ex:title", "type": "ex:Title"}
                        ],
                        "seeds": ["http://ex.org/d1"]
                    }]
                }
            ]
        }"#,
        &["?film"],
    );

    assert_eq!(graph.trees().count(), 2);
    let shared = tree(&graph, &["d1"]);
    assert_eq!(shared.length(), 3);
    assert_eq!(shared.seeds(), &BTreeSet::from([ex("d1")]));
    assert_eq!(tree(&graph, &["d1", "d2"]).length(), 0);

    let directed = graph.step(step(&graph, shared, &[0]));
    assert_eq!(directed.property(), Some(&ex("directed")));
    assert_eq!(directed.children().len(), 1);
    let leaf = graph.step(directed.children()[0]);
    assert_eq!(leaf.label(), &StepLabel::End);
    assert_eq!(leaf.patterns().len(), 2);
}

#[test]
fn cycle_without_entry_point_is_pruned() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [{
                "context": 0,
                "pattern": ["?p", "a", "ex:Person"],
                "cycles": [{"cycle": 5, "steps": [{"property": "ex:locatedIn", "type": "ex:Place"}]}],
                "paths": [{
                    "steps": [{"property": "ex:knows", "type": "ex:Person"}],
                    "seeds": ["http://ex.org/s1"]
                }]
            }]
        }"#,
        &["?p"],
    );

    assert_eq!(graph.cycles().count(), 0);
    assert!(tree(&graph, &["s1"]).cycles().is_empty());
    assert!(graph.steps().all(|(_, step)| step.cycle_starts().is_empty()));
    assert!(!graph
        .to_quads()
        .iter()
        .any(|quad| quad.object == Term::from(agora::CYCLE.into_owned())));
}

#[test]
fn cycle_is_anchored_at_the_only_eligible_step() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [
                {
                    "context": 0,
                    "pattern": ["?p", "a", "ex:Person"],
                    "cycles": [{"cycle": 6, "steps": [{"property": "ex:knows", "type": "ex:Person"}]}],
                    "paths": [{
                        "steps": [{"property": "ex:knows", "type": "ex:Person"}],
                        "seeds": ["http://ex.org/s1"]
                    }]
                },
                {
                    "context": 1,
                    "pattern": ["?x", "a", "ex:Person"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/s2"]}]
                }
            ]
        }"#,
        &["?p"],
    );

    let cycle = CycleId::new("6");
    assert!(graph.cycle(&cycle).is_some());

    let leaf = step(&graph, tree(&graph, &["s1"]), &[0, 0]);
    let starts = graph
        .steps()
        .filter(|(_, step)| step.cycle_starts().contains(&cycle))
        .map(|(id, _)| id)
        .collect::<Vec<_>>();
    assert_eq!(starts, vec![leaf]);
    assert_eq!(
        graph.step(leaf).expected_types(),
        &BTreeSet::from([ex("Person"), ex("Student")])
    );
}

#[test]
fn type_assertion_on_non_root_subject_does_not_widen() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [
                {
                    "context": 0,
                    "pattern": ["?film", "a", "ex:Film"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/f1"]}]
                },
                {
                    "context": 1,
                    "pattern": ["?other", "a", "ex:Film"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/f1"]}]
                },
                {
                    "context": 2,
                    "pattern": ["?work", "a", "ex:Work"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/w1"]}]
                }
            ]
        }"#,
        &["?film"],
    );

    let shared = graph.step(step(&graph, tree(&graph, &["f1"]), &[0]));
    assert_eq!(shared.patterns().len(), 2);
    assert_eq!(shared.expected_types(), &BTreeSet::from([ex("Film")]));

    let work = graph.step(step(&graph, tree(&graph, &["w1"]), &[0]));
    assert_eq!(work.expected_types(), &BTreeSet::from([ex("Work")]));
}

#[test]
fn leaf_of_iri_subject_becomes_seed() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [{
                "context": 0,
                "pattern": ["ex:alice", "ex:knows", "?friend"],
                "cycles": [{"cycle": 9, "steps": [{"property": "ex:knows", "type": "ex:Person"}]}],
                "paths": [{
                    "steps": [{"property": "ex:knows", "type": "ex:Person"}],
                    "seeds": ["http://ex.org/s1"]
                }]
            }]
        }"#,
        &["<http://ex.org/alice>"],
    );

    let tree = tree(&graph, &["s1"]);
    assert_eq!(tree.seeds(), &BTreeSet::from([ex("alice"), ex("s1")]));
    let leaf = graph.step(step(&graph, tree, &[0]));
    assert_eq!(leaf.label(), &StepLabel::End);
    assert!(leaf.cycle_starts().is_empty());
    assert!(graph.cycle(&CycleId::new("9")).is_some());
}

#[test]
fn from_types_keep_the_most_specific_types() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [
                {
                    "context": 0,
                    "pattern": ["?w", "a", "ex:Work"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/s1"]}]
                },
                {
                    "context": 1,
                    "pattern": ["?d", "a", "ex:Documentary"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/s1"]}]
                },
                {
                    "context": 2,
                    "pattern": ["?p", "a", "ex:Person"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/s1"]}]
                }
            ]
        }"#,
        &[],
    );

    assert_eq!(
        tree(&graph, &["s1"]).from_types(),
        &BTreeSet::from([ex("Documentary"), ex("Person")])
    );
}

#[test]
fn unknown_cycle_type_is_an_error() {
    let result = try_build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [{
                "context": 0,
                "pattern": ["?p", "a", "ex:Person"],
                "cycles": [{"cycle": 1, "steps": [{"property": "ex:knows", "type": "ex:Alien"}]}],
                "paths": [{"steps": [], "seeds": ["http://ex.org/s1"]}]
            }]
        }"#,
        &["?p"],
    );

    assert!(matches!(
        result,
        Err(PlanGraphError::Fountain(FountainError::UnknownType(ty))) if ty == ex("Alien")
    ));
}

#[test]
fn check_hint_of_a_later_equal_pattern_is_kept() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [
                {
                    "context": 0,
                    "pattern": ["?p", "a", "ex:Person"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/s1"]}]
                },
                {
                    "context": 1,
                    "pattern": ["?p", "a", "ex:Person"],
                    "hints": {"check": true},
                    "paths": [{"steps": [], "seeds": ["http://ex.org/s2"]}]
                }
            ]
        }"#,
        &["?p"],
    );

    assert_eq!(graph.patterns().count(), 1);
    let (_, pattern) = graph.patterns().next().unwrap();
    assert_eq!(pattern.check_type(), Some(true));
}

#[test]
fn sibling_type_assertion_widens_step() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [
                {
                    "context": 0,
                    "pattern": ["?p", "a", "ex:Person"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/s1"]}]
                },
                {
                    "context": 1,
                    "pattern": ["?p", "a", "ex:Person"],
                    "paths": [{
                        "steps": [{"property": "ex:knows", "type": "ex:Person"}],
                        "seeds": ["http://ex.org/s1"]
                    }]
                }
            ]
        }"#,
        &["?p"],
    );

    let tree = tree(&graph, &["s1"]);
    let end = graph.step(step(&graph, tree, &[0]));
    assert_eq!(end.label(), &StepLabel::End);
    let knows = graph.step(step(&graph, tree, &[1]));
    assert_eq!(knows.property(), Some(&ex("knows")));
    assert!(knows.patterns().is_empty());
    assert_eq!(
        knows.expected_types(),
        &BTreeSet::from([ex("Person"), ex("Student")])
    );
}

#[test]
fn sibling_type_assertion_on_non_root_subject_blocks_step() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [
                {
                    "context": 0,
                    "pattern": ["?other", "a", "ex:Person"],
                    "paths": [{"steps": [], "seeds": ["http://ex.org/s1"]}]
                },
                {
                    "context": 1,
                    "pattern": ["?p", "a", "ex:Person"],
                    "cycles": [{"cycle": 3, "steps": [{"property": "ex:knows", "type": "ex:Person"}]}],
                    "paths": [{
                        "steps": [{"property": "ex:knows", "type": "ex:Person"}],
                        "seeds": ["http://ex.org/s1"]
                    }]
                }
            ]
        }"#,
        &["?p"],
    );

    let tree = tree(&graph, &["s1"]);
    let knows_id = step(&graph, tree, &[1]);
    let knows = graph.step(knows_id);
    assert_eq!(knows.property(), Some(&ex("knows")));
    assert_eq!(knows.expected_types(), &BTreeSet::from([ex("Person")]));
    assert!(knows.cycle_starts().is_empty());

    let other = graph.step(step(&graph, tree, &[0]));
    assert_eq!(other.expected_types(), &BTreeSet::from([ex("Person")]));
    assert!(other.cycle_starts().is_empty());

    // The leaf below `knows` only serves the root pattern and still anchors the cycle.
    let leaf = step(&graph, tree, &[1, 0]);
    assert_eq!(
        graph.step(leaf).cycle_starts(),
        &BTreeSet::from([CycleId::new("3")])
    );
}
