use crate::test_utils::{build, ex, step, tree};
use rdf_fragments_plan::CycleId;
use std::collections::BTreeSet;

#[test]
fn single_seed_type_assertion() {
    let graph = build(
        r#"{
            "prefixes": {
                "ex": "http://ex.org/",
                "rdf": "http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            },
            "plan": [{
                "context": 0,
                "pattern": ["?film", "rdf:type", "ex:Film"],
                "cycles": [],
                "paths": [{"steps": [], "seeds": ["http://ex.org/film1"]}]
            }]
        }"#,
        &["?film"],
    );

    let tree = tree(&graph, &["film1"]);
    assert_eq!(graph.trees().count(), 1);
    assert_eq!(tree.from_types(), &BTreeSet::from([ex("Film")]));
    assert_eq!(tree.seeds(), &BTreeSet::from([ex("film1")]));
    assert_eq!(tree.length(), 0);
    assert_eq!(tree.children().len(), 1);

    insta::assert_snapshot!(graph.to_string().trim_end(), @r"
    SearchSpace 0 definedBy tp0
    TriplePattern tp0: ?film rdf:type ex:Film
    SearchTree c3cf7ffa8e43f638133f115c488d2228 length: 0
      fromType: ex:Film
      hasSeed: ex:film1
      #end [ex:Documentary, ex:Film] byPattern: tp0
    ");
}

#[test]
fn two_step_cycle_is_entered_in_both_directions() {
    let graph = build(
        r#"{
            "prefixes": {
                "ex": "http://ex.org/",
                "rdf": "http://www.w3.org/1999/02/22-rdf-syntax-ns#"
            },
            "plan": [{
                "context": 0,
                "pattern": ["?p", "a", "ex:Person"],
                "cycles": [{
                    "cycle": 1,
                    "steps": [
                        {"property": "ex:hasFriend", "type": "ex:Person"},
                        {"property": "ex:hasFriend", "type": "ex:Person"}
                    ]
                }],
                "paths": [{"steps": [], "seeds": ["http://ex.org/p1"]}]
            }]
        }"#,
        &["?p"],
    );

    let leaf = graph.step(step(&graph, tree(&graph, &["p1"]), &[0]));
    assert_eq!(
        leaf.cycle_starts(),
        &BTreeSet::from([CycleId::new("1"), CycleId::new("1r")])
    );

    insta::assert_snapshot!(graph.to_string().trim_end(), @r"
    SearchSpace 0 definedBy tp0
    TriplePattern tp0: ?p rdf:type ex:Person
    SearchTree a5f461b096b859a580150acb1ae63d9c length: 0
      fromType: ex:Person
      hasSeed: ex:p1
      goesThroughCycle: 1, 1r
      #end [ex:Person, ex:Student] byPattern: tp0 isCycleStartOf: 1, 1r
    Cycle 1 [ex:Person, ex:Student]
      ex:hasFriend [ex:Person]
        ex:hasFriend [ex:Person]
    Cycle 1r [ex:Person, ex:Student]
      ex:hasFriend [ex:Person]
        ex:hasFriend [ex:Person]
    ");
}

#[test]
fn n_quads_export_uses_plan_vocabulary() {
    let graph = build(
        r#"{
            "prefixes": {"ex": "http://ex.org/"},
            "plan": [{
                "context": 0,
                "pattern": ["?p", "a", "ex:Person"],
                "hints": {"check": true},
                "cycles": [{"cycle": 1, "steps": [{"property": "ex:knows", "type": "ex:Person"}]}],
                "paths": [{"steps": [{"property": "ex:knows", "type": "ex:Person"}], "seeds": ["http://ex.org/p1"]}]
            }]
        }"#,
        &["?p"],
    );

    let output = graph
        .write_to(oxrdfio::RdfFormat::NQuads, Vec::new())
        .unwrap();
    let output = String::from_utf8(output).unwrap();
    for name in [
        "SearchSpace",
        "TriplePattern",
        "SearchTree",
        "Cycle",
        "Variable",
        "definedBy",
        "subject",
        "predicate",
        "object",
        "onProperty",
        "expectedType",
        "next",
        "byPattern",
        "hasSeed",
        "fromType",
        "length",
        "checkType",
        "goesThroughCycle",
        "isCycleStartOf",
    ] {
        assert!(
            output.contains(&format!("<http://agora.org#{name}>")),
            "missing {name}"
        );
    }
}
