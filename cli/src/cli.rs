use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "rdf-fragments")]
/// Compiles the evaluation plans of a federated query planner into plan graphs
pub struct Args {
    /// Log the phases of the build
    ///
    /// Without this flag, the log level is taken from the RUST_LOG environment variable and
    /// defaults to warnings.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the plan graph of an evaluation plan and serialize it as RDF
    Build {
        #[command(flatten)]
        input: PlanInput,
        /// The format of the output
        ///
        /// It can be an extension like "nq" or a MIME type like "application/n-quads". Only
        /// formats supporting named graphs are allowed.
        ///
        /// By default the format is guessed from the output file extension, or N-Quads is used.
        #[arg(long)]
        format: Option<String>,
        /// File to write the plan graph to
        ///
        /// If no file is given, stdout is written.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
    /// Print a human-readable outline of the plan graph of an evaluation plan
    Summary {
        #[command(flatten)]
        input: PlanInput,
    },
}

#[derive(clap::Args)]
pub struct PlanInput {
    /// The evaluation plan in JSON
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub plan: PathBuf,
    /// Turtle vocabulary declaring the known classes and their rdfs:subClassOf hierarchy
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub vocabulary: PathBuf,
    /// SPARQL query the plan was computed for
    ///
    /// The subjects of the query that never occur as objects are its roots.
    #[arg(short, long, conflicts_with = "root", value_hint = ValueHint::FilePath)]
    pub query: Option<PathBuf>,
    /// A root of the query, like "?film" or "<http://example.com/s>"
    ///
    /// Compact names are expanded with the prefixes of the plan. Can be repeated.
    #[arg(short, long)]
    pub root: Vec<String>,
}
