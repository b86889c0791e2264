use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;

use xml2rdf::conversion::options::ConversionOptions;
use xml2rdf::conversion::xml_reader::{convert_reader, ConversionStats};
use xml2rdf::emitter::jsonl::JsonLinesEmitter;
use xml2rdf::emitter::ntriples::NTriplesEmitter;
use xml2rdf::emitter::turtle::TurtleEmitter;
use xml2rdf::emitter::TriplesEmitter;
use xml2rdf::model::iri::IdStrategy;

/// Convert XML documents to RDF.
#[derive(Parser)]
#[command(name = "xml2rdf", version, about)]
struct Cli {
    /// Input XML file [default: stdin].
    input: Option<PathBuf>,

    /// Output file path [default: stdout].
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format: ntriples, turtle, jsonl.
    #[arg(short, long, value_name = "FORMAT", default_value = "ntriples")]
    format: String,

    /// JSON file with conversion options.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Fold text-only leaf elements into literal properties of their parent.
    #[arg(long)]
    auto_detect_literals: bool,

    /// Convert elements without children to shallow links.
    #[arg(long)]
    shallow: bool,

    /// Also treat elements whose children all became literals as shallow.
    #[arg(long)]
    shallow_relaxed: bool,

    /// Use UUID based identifiers instead of blank nodes.
    #[arg(long)]
    uuid_ids: bool,

    /// Namespace for elements without one.
    #[arg(long, value_name = "URI")]
    base_namespace: Option<String>,

    /// Suffix appended to namespaces not ending in '/' or '#'.
    #[arg(long, value_name = "SUFFIX")]
    namespace_suffix: Option<String>,

    /// Force every element and attribute into this namespace.
    #[arg(long, value_name = "URI")]
    override_namespace: Option<String>,

    /// Use xsi:type to override element types.
    #[arg(long)]
    xsi_type: bool,

    /// Resolve prefixed names in attribute values.
    #[arg(long)]
    resolve_qnames: bool,

    /// Emit the position of each element among its siblings.
    #[arg(long)]
    index: bool,

    /// Verbose output.
    #[arg(short, long)]
    verbose: bool,

    /// Quiet output.
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Options from `--config`, with command-line flags layered on top.
    fn options(&self) -> Result<ConversionOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => ConversionOptions::load(path)?,
            None => ConversionOptions::default(),
        };
        options.auto_detect_literal_properties |= self.auto_detect_literals;
        options.shallow_without_children |= self.shallow;
        options.shallow_with_literal_children |= self.shallow_relaxed;
        options.xsi_type_support |= self.xsi_type;
        options.resolve_qnames_in_attribute_values |= self.resolve_qnames;
        options.add_index |= self.index;
        if self.uuid_ids {
            options.id_strategy = IdStrategy::RandomUnique;
        }
        if let Some(ns) = &self.base_namespace {
            options.base_namespace = Some(ns.clone());
        }
        if let Some(suffix) = &self.namespace_suffix {
            options.namespace_suffix = Some(suffix.clone());
        }
        if let Some(ns) = &self.override_namespace {
            options.namespace_override = Some(ns.clone());
        }
        Ok(options)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "xml2rdf=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn convert_with<R: BufRead, E: TriplesEmitter>(
    input: R,
    options: ConversionOptions,
    mut emitter: E,
) -> Result<ConversionStats, Box<dyn std::error::Error>> {
    let stats = convert_reader(input, options, &mut emitter)?;
    emitter.flush()?;
    Ok(stats)
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.options()?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) if path.as_os_str() != "-" => {
            if cli.verbose {
                eprintln!("Converting input from: {}", path.display());
            }
            Box::new(BufReader::new(File::open(path)?))
        }
        _ => {
            if cli.verbose {
                eprintln!("Converting input from: <stdin>");
            }
            Box::new(BufReader::new(io::stdin().lock()))
        }
    };

    // Determine output writer
    let output_writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let format = cli.format.to_lowercase();
    let stats = match format.as_str() {
        "ntriples" | "nt" => convert_with(input, options, NTriplesEmitter::new(output_writer))?,
        "turtle" | "ttl" => convert_with(input, options, TurtleEmitter::new(output_writer))?,
        "jsonl" | "json" => convert_with(input, options, JsonLinesEmitter::new(output_writer))?,
        _ => {
            return Err(
                format!("Unknown format: {format}. Use 'ntriples', 'turtle' or 'jsonl'.").into(),
            );
        }
    };

    // Print summary to stderr (unless quiet)
    if !cli.quiet {
        eprintln!(
            "Emitted {} triples from {} elements",
            stats.triples, stats.elements
        );
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
