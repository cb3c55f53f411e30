use crate::cli::{Args, Command, PlanInput};
use anyhow::{bail, Context};
use clap::Parser;
use oxrdfio::RdfFormat;
use rdf_fragments_fountain::MemoryFountain;
use rdf_fragments_model::{parse_pattern_term, EvaluationPlan, PatternPosition};
use rdf_fragments_plan::{build_plan_graph, PlanGraph, QueryRoots};
use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{self, stdout, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.command {
        Command::Build {
            input,
            format,
            output,
        } => {
            let format = if let Some(format) = format {
                rdf_format_from_name(&format)?
            } else if let Some(file) = &output {
                rdf_format_from_path(file)?
            } else {
                RdfFormat::NQuads
            };
            if !format.supports_datasets() {
                bail!("The format {format} does not support named graphs")
            }

            let graph = build_graph(&input)?;
            if let Some(output) = output {
                let file = File::create(&output)
                    .with_context(|| format!("Cannot create {}", output.display()))?;
                close_file_writer(graph.write_to(format, BufWriter::new(file))?)?;
            } else {
                graph.write_to(format, stdout().lock())?.flush()?;
            }
            Ok(())
        }
        Command::Summary { input } => {
            let graph = build_graph(&input)?;
            let mut stdout = stdout().lock();
            write!(stdout, "{graph}")?;
            stdout.flush()?;
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_graph(input: &PlanInput) -> anyhow::Result<PlanGraph> {
    let plan = File::open(&input.plan)
        .with_context(|| format!("Cannot open the plan {}", input.plan.display()))?;
    let plan = EvaluationPlan::from_json_reader(BufReader::new(plan))
        .with_context(|| format!("Invalid plan {}", input.plan.display()))?;

    let vocabulary = File::open(&input.vocabulary).with_context(|| {
        format!("Cannot open the vocabulary {}", input.vocabulary.display())
    })?;
    let fountain = MemoryFountain::from_vocabulary(BufReader::new(vocabulary))
        .with_context(|| format!("Invalid vocabulary {}", input.vocabulary.display()))?;

    let roots = if let Some(query) = &input.query {
        let query = fs::read_to_string(query)
            .with_context(|| format!("Cannot read the query {}", query.display()))?;
        QueryRoots::from_sparql(&query)?
    } else {
        input
            .root
            .iter()
            .map(|root| {
                parse_pattern_term(&plan.prefixes, PatternPosition::Subject, root)
                    .with_context(|| format!("Invalid root {root}"))
            })
            .collect::<anyhow::Result<QueryRoots>>()?
    };
    debug!(
        variables = roots.variables().len(),
        iris = roots.iris().len(),
        "Derived query roots"
    );

    Ok(build_plan_graph(&plan, &fountain, &roots)?)
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn rdf_format_from_path(path: &Path) -> anyhow::Result<RdfFormat> {
    format_from_path(path, |ext| {
        RdfFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    if let Some(t) = RdfFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = RdfFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

fn close_file_writer(writer: BufWriter<File>) -> io::Result<()> {
    let mut file = writer
        .into_inner()
        .map_err(io::IntoInnerError::into_error)?;
    file.flush()?;
    file.sync_all()
}
