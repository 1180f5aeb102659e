//! BucketStack command line.
//!
//! Resolves context from the environment, an optional context file and
//! `-c key=value` pairs, assembles the storage bucket stack and prints the
//! CloudFormation template, or writes it as a cloud assembly with
//! `--output`.
//!
//! Logs go to stderr; set `RUST_LOG` (or `LOG_LEVEL`) to adjust verbosity.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};
use bucketstack_core::{BucketStackConfig, BucketStackError, ErrorKind};
use bucketstack_model::{BucketCategory, BucketConfig};
use bucketstack_synth::assembly::write_assembly;
use bucketstack_synth::{AppContext, Context, assemble, preset};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Binary version.
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Parser)]
#[command(
    name = "bucketstack",
    version,
    about = "Synthesize CloudFormation templates for S3 intelligent-tiering storage buckets",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    synth: SynthArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Synthesize the stack template (default)
    Synth(SynthArgs),
    /// Print the bucket presets as JSON
    Presets,
}

#[derive(Debug, Clone, Default, Args)]
struct SynthArgs {
    /// Context value, repeatable
    #[arg(short = 'c', long = "context", value_name = "KEY=VALUE")]
    context: Vec<String>,

    /// JSON context file, `{"context": {...}}` or a flat object
    #[arg(long, value_name = "PATH")]
    context_file: Option<PathBuf>,

    /// Write a cloud assembly to this directory instead of printing
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Let CloudFormation name the bucket unless `bucketName` is given
    #[arg(long)]
    no_generated_name: bool,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,
}

/// Initialize the tracing subscriber on stderr.
///
/// `RUST_LOG` wins when set; otherwise `log_level` is used as the filter.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// Process exit code for `err`: 2 for configuration errors, 3 for
/// validation errors, 1 otherwise.
fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<BucketStackError>().map(BucketStackError::kind) {
        Some(ErrorKind::Configuration) => 2,
        Some(ErrorKind::Validation) => 3,
        Some(ErrorKind::Internal) | None => 1,
    }
}

/// Layer the context file and `-c` pairs over `base`, lowest precedence
/// first.
fn load_context(args: &SynthArgs, base: Context) -> Result<Context> {
    let mut context = base;
    if let Some(path) = &args.context_file {
        context.merge(Context::from_file(path)?);
    }
    context.merge(Context::from_pairs(&args.context)?);
    Ok(context)
}

fn output_dir(args: &SynthArgs, config: &BucketStackConfig) -> Option<PathBuf> {
    args.output
        .clone()
        .or_else(|| config.output_dir.as_deref().map(PathBuf::from))
}

fn synth(args: &SynthArgs, config: &BucketStackConfig, base: Context) -> Result<()> {
    let context = load_context(args, base)?;
    let app = AppContext::resolve(&context, Utc::now(), !args.no_generated_name)?;
    let stack = assemble(&app.to_stack_props())?;
    let pretty = config.pretty && !args.compact;

    match output_dir(args, config) {
        Some(dir) => write_to(&dir, &stack, config, pretty),
        None => {
            let json = stack.to_json(pretty)?;
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").context("failed to write template to stdout")?;
            Ok(())
        }
    }
}

fn write_to(
    dir: &Path,
    stack: &bucketstack_synth::Stack,
    config: &BucketStackConfig,
    pretty: bool,
) -> Result<()> {
    let env = config.stack_environment()?;
    let path = write_assembly(dir, stack, &env, pretty)?;
    info!(path = %path.display(), "synthesized stack");
    Ok(())
}

fn presets_table() -> BTreeMap<&'static str, BucketConfig> {
    BucketCategory::ALL
        .into_iter()
        .filter_map(|category| preset(category).map(|config| (category.as_str(), config)))
        .collect()
}

fn presets(config: &BucketStackConfig) -> Result<()> {
    let table = presets_table();
    let json = if config.pretty {
        serde_json::to_string_pretty(&table)?
    } else {
        serde_json::to_string(&table)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("failed to write presets to stdout")?;
    Ok(())
}

fn run(cli: Cli, config: &BucketStackConfig) -> Result<()> {
    match cli.command {
        Some(Command::Synth(args)) => synth(&args, config, Context::from_env()),
        Some(Command::Presets) => presets(config),
        None => synth(&cli.synth, config, Context::from_env()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = BucketStackConfig::from_env();

    if let Err(err) = init_tracing(&config.log_level) {
        eprintln!("error: {err:#}");
        return ExitCode::from(1);
    }

    info!(version = VERSION, "starting BucketStack");

    match run(cli, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = exit_code(&err);
            error!(exit_code = code, "synthesis failed");
            eprintln!("error: {err:#}");
            ExitCode::from(code)
        }
    }
}
