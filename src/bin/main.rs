//! semantiaz CLI - build, convert and assess semantic models
//!
//! Usage:
//!   semantiaz build <snapshot.json> [--format yaml|json|turtle|cypher] [--samples]
//!   semantiaz convert <file> --from <format> --to <format>
//!   semantiaz assess <snapshot.json> [--json]
//!   semantiaz fingerprint <file> [--from <format>]
//!
//! Examples:
//!   semantiaz build clinical.json --name clinical > clinical.yaml
//!   semantiaz convert clinical.yaml --from yaml --to turtle
//!   semantiaz assess clinical.json

use clap::{Parser, Subcommand, ValueEnum};
use env_logger::Env;
use semantiaz::config::Settings;
use semantiaz::convert::{Decoder, Encoder, GraphCodec, GraphOptions, SchemaCodec};
use semantiaz::metadata::{CollectedMetadata, MetadataProvider, SnapshotMetadataProvider};
use semantiaz::model::SemanticModel;
use semantiaz::quality;
use semantiaz::semantic::SemanticModelBuilder;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "semantiaz")]
#[command(about = "semantiaz - Semantic models from relational metadata")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $SEMANTIAZ_CONFIG, ./semantiaz.toml, then the user config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a semantic model from a metadata snapshot
    Build {
        /// Snapshot JSON (defaults to provider.snapshot from the config)
        snapshot: Option<PathBuf>,

        /// Model name (overrides builder.model_name)
        #[arg(short, long)]
        name: Option<String>,

        /// Output format
        #[arg(short, long, default_value = "yaml")]
        format: Format,

        /// Include sampled rows in Cypher output
        #[arg(long)]
        samples: bool,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a model between formats
    Convert {
        /// Input model file
        file: PathBuf,

        /// Input format
        #[arg(long)]
        from: Format,

        /// Output format
        #[arg(long)]
        to: Format,

        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Score a database's readiness for a semantic layer
    Assess {
        /// Snapshot JSON (defaults to provider.snapshot from the config)
        snapshot: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the SHA-256 fingerprint of a model
    Fingerprint {
        /// Model file
        file: PathBuf,

        /// Input format
        #[arg(long, default_value = "yaml")]
        from: Format,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Schema document, YAML
    Yaml,
    /// Schema document, JSON
    Json,
    /// OWL ontology, Turtle
    Turtle,
    /// Graph statements (encode only)
    Cypher,
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => return fail("Error loading config", e),
    };

    match cli.command {
        Commands::Build {
            snapshot,
            name,
            format,
            samples,
            output,
        } => cmd_build(&settings, snapshot, name, format, samples, output).await,
        Commands::Convert {
            file,
            from,
            to,
            output,
        } => cmd_convert(&settings, file, from, to, output),
        Commands::Assess { snapshot, json } => cmd_assess(&settings, snapshot, json).await,
        Commands::Fingerprint { file, from } => cmd_fingerprint(&settings, file, from),
    }
}

async fn cmd_build(
    settings: &Settings,
    snapshot: Option<PathBuf>,
    name: Option<String>,
    format: Format,
    samples: bool,
    output: Option<PathBuf>,
) -> ExitCode {
    let sample_rows = samples && matches!(format, Format::Cypher);
    let collected = match collect(settings, snapshot, sample_rows).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let mut options = settings.builder.clone();
    if let Some(name) = name {
        options.model_name = name;
    }
    let outcome = match SemanticModelBuilder::new(options).build(&collected.tables) {
        Ok(outcome) => outcome,
        Err(e) => return fail("Build error", e),
    };
    for advisory in &outcome.advisories {
        log::warn!("{}", advisory);
    }
    eprintln!("{}", outcome.model.summary());

    let text = if sample_rows {
        let codec = GraphCodec::new(GraphOptions::from(&settings.graph));
        let mut text = codec
            .statements_with_samples(&outcome.model, &collected.samples)
            .join("\n");
        text.push('\n');
        Ok(text)
    } else {
        match encoder(settings, format) {
            Ok(encoder) => encode(encoder.as_ref(), &outcome.model),
            Err(code) => return code,
        }
    };
    match text {
        Ok(text) => write_output(output.as_deref(), &text),
        Err(code) => code,
    }
}

fn cmd_convert(
    settings: &Settings,
    file: PathBuf,
    from: Format,
    to: Format,
    output: Option<PathBuf>,
) -> ExitCode {
    let model = match read_model(settings, &file, from) {
        Ok(m) => m,
        Err(code) => return code,
    };
    let encoder = match encoder(settings, to) {
        Ok(e) => e,
        Err(code) => return code,
    };
    match encode(encoder.as_ref(), &model) {
        Ok(text) => write_output(output.as_deref(), &text),
        Err(code) => code,
    }
}

async fn cmd_assess(settings: &Settings, snapshot: Option<PathBuf>, json: bool) -> ExitCode {
    let collected = match collect(settings, snapshot, false).await {
        Ok(c) => c,
        Err(code) => return code,
    };

    let report = quality::assess(&collected.tables);
    if json {
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => return fail("Error serializing report", e),
        }
    } else {
        print!("{}", report);
    }
    ExitCode::SUCCESS
}

fn cmd_fingerprint(settings: &Settings, file: PathBuf, from: Format) -> ExitCode {
    let model = match read_model(settings, &file, from) {
        Ok(m) => m,
        Err(code) => return code,
    };
    match model.fingerprint() {
        Ok(hash) => {
            println!("{}", hash);
            ExitCode::SUCCESS
        }
        Err(e) => fail("Error hashing model", e),
    }
}

async fn collect(
    settings: &Settings,
    snapshot: Option<PathBuf>,
    with_samples: bool,
) -> Result<CollectedMetadata, ExitCode> {
    let path = match snapshot {
        Some(path) => path,
        None => match settings.provider.resolved_snapshot() {
            Ok(Some(path)) => path,
            Ok(None) => {
                eprintln!("Error: no snapshot given and provider.snapshot is not configured");
                return Err(ExitCode::FAILURE);
            }
            Err(e) => return Err(fail("Error resolving snapshot path", e)),
        },
    };

    let provider = SnapshotMetadataProvider::from_file(&path)
        .await
        .map_err(|e| fail("Error loading snapshot", e))?;
    let concurrency = settings.provider.max_concurrency;
    let collected = if with_samples {
        provider
            .collect_with_samples(concurrency, settings.graph.row_limit)
            .await
    } else {
        provider.collect_all(concurrency).await
    }
    .map_err(|e| fail("Error reading metadata", e))?;

    for failure in &collected.failures {
        log::warn!("skipped '{}': {}", failure.table, failure.error);
    }
    Ok(collected)
}

fn encoder(settings: &Settings, format: Format) -> Result<Box<dyn Encoder>, ExitCode> {
    Ok(match format {
        Format::Yaml => Box::new(SchemaCodec::yaml()),
        Format::Json => Box::new(SchemaCodec::json()),
        Format::Turtle => Box::new(
            settings
                .ontology
                .codec()
                .map_err(|e| fail("Error in ontology settings", e))?,
        ),
        Format::Cypher => Box::new(GraphCodec::new(GraphOptions::from(&settings.graph))),
    })
}

fn encode(encoder: &dyn Encoder, model: &SemanticModel) -> Result<String, ExitCode> {
    let dropped = encoder.unrepresented();
    if !dropped.is_empty() {
        let fields: Vec<String> = dropped.iter().map(ToString::to_string).collect();
        log::info!("{} output omits: {}", encoder.format_name(), fields.join(", "));
    }
    encoder
        .encode(model)
        .map_err(|e| fail("Conversion error", e))
}

fn read_model(settings: &Settings, file: &Path, format: Format) -> Result<SemanticModel, ExitCode> {
    let source = fs::read_to_string(file)
        .map_err(|e| fail(&format!("Error reading file '{}'", file.display()), e))?;

    let decoded = match format {
        Format::Yaml => SchemaCodec::yaml().decode(&source),
        Format::Json => SchemaCodec::json().decode(&source),
        Format::Turtle => settings
            .ontology
            .codec()
            .map_err(|e| fail("Error in ontology settings", e))?
            .decode(&source),
        Format::Cypher => {
            eprintln!("Error: cypher is an output-only format");
            return Err(ExitCode::FAILURE);
        }
    };
    decoded.map_err(|e| fail(&format!("Error decoding '{}'", file.display()), e))
}

fn write_output(output: Option<&Path>, text: &str) -> ExitCode {
    match output {
        Some(path) => match fs::write(path, text) {
            Ok(()) => {
                log::info!("wrote {}", path.display());
                ExitCode::SUCCESS
            }
            Err(e) => fail(&format!("Error writing '{}'", path.display()), e),
        },
        None => {
            print!("{}", text);
            ExitCode::SUCCESS
        }
    }
}

fn fail(context: &str, error: impl Display) -> ExitCode {
    eprintln!("{}: {}", context, error);
    ExitCode::FAILURE
}
