//! Compiles evaluation plans into plan graphs.
//!
//! An evaluation plan lists, for every triple pattern of a query, the property paths, seeds and
//! cycles that can reach the pattern. The [PlanGraph] merges this information into shared search
//! trees and cycle descriptions that a fragment collector can follow.
//!
//! ```
//! use rdf_fragments_fountain::MemoryFountain;
//! use rdf_fragments_model::{EvaluationPlan, NamedNode};
//! use rdf_fragments_plan::{build_plan_graph, QueryRoots};
//!
//! let plan = EvaluationPlan::from_json_str(r#"{
//!     "prefixes": {"ex": "http://ex.org/"},
//!     "plan": [{
//!         "context": 0,
//!         "pattern": ["?film", "a", "ex:Film"],
//!         "paths": [{"steps": [], "seeds": ["http://ex.org/film1"]}]
//!     }]
//! }"#)?;
//! let mut fountain = MemoryFountain::new();
//! fountain.add_type(NamedNode::new("http://ex.org/Film")?);
//! let roots = QueryRoots::from_sparql("SELECT * WHERE { ?film a <http://ex.org/Film> }")?;
//!
//! let graph = build_plan_graph(&plan, &fountain, &roots)?;
//! assert_eq!(graph.trees().count(), 1);
//! # Result::<_, Box<dyn std::error::Error>>::Ok(())
//! ```

mod builder;
mod cycles;
mod error;
mod export;
mod fingerprint;
mod graph;
mod post_process;
mod propagation;
mod registry;
mod roots;

pub use builder::{build_initial_graph, build_plan_graph, PlanGraphBuilder};
pub use cycles::CycleDescriber;
pub use error::*;
pub use fingerprint::TreeFingerprint;
pub use graph::*;
pub use post_process::post_process;
pub use propagation::propagate_and_prune;
pub use registry::PatternRegistry;
pub use roots::QueryRoots;
