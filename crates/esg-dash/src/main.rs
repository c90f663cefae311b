//! esg-dash - Apparel climate risk and sustainability dashboard builder
//!
//! The main entry point, handling:
//! - Building the static dashboard page
//! - Validating a dataset against the chart contract
//! - Inspecting the dataset and configuration

use clap::{Args, Parser, Subcommand, ValueEnum};
use esg_common::{Dataset, DATASET_SCHEMA_VERSION};
use esg_config::{load_config, DashboardConfig, ValidationReport, CONFIG_SCHEMA_VERSION};
use esg_dash::exit_codes::ExitCode;
use esg_dash::logging::{init_logging, LogConfig, LogFormat, LogLevel};
use esg_dash::{build_site, load_dataset, BuildOptions, DashError};
use esg_report::ReportTheme;
use std::path::PathBuf;
use tracing::error;

/// Build and check the apparel climate risk dashboard
#[derive(Parser)]
#[command(name = "esg-dash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Dataset JSON file (defaults to $ESG_DASH_DATASET, then the built-in dataset)
    #[arg(long, global = true)]
    dataset: Option<PathBuf>,

    /// Config file (defaults to $ESG_DASH_CONFIG, $ESG_DASH_CONFIG_DIR or ~/.config/esg-dash/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Log output format on stderr
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the dataset and write the dashboard page
    Build(BuildArgs),

    /// Check the dataset against the chart contract
    Validate(ValidateArgs),

    /// Print the resolved dataset
    Dataset(DatasetArgs),

    /// Show configuration
    Config(ConfigArgs),

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
struct BuildArgs {
    /// Output directory (overrides build.output_dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Public base path, e.g. /my-site/ (empty to omit)
    #[arg(long)]
    base_path: Option<String>,

    /// Initial theme: light, dark or auto
    #[arg(long)]
    theme: Option<ReportTheme>,

    /// Page title
    #[arg(long)]
    title: Option<String>,

    /// Fail without writing when the dataset has validation errors
    #[arg(long)]
    strict: bool,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum ReportFormat {
    #[default]
    Human,
    Json,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Output format
    #[arg(long, short = 'f', value_enum, default_value_t = ReportFormat::Human)]
    format: ReportFormat,
}

#[derive(Args, Debug)]
struct DatasetArgs {
    /// Print the dataset JSON Schema instead of the data
    #[arg(long)]
    schema: bool,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
enum ConfigCommands {
    /// Print the effective configuration
    Show,
    /// Print the built-in default configuration
    Default,
}

fn main() -> std::process::ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::ArgsError.into()
            } else {
                ExitCode::Clean.into()
            };
        }
    };

    let log_config = LogConfig::from_env(
        LogLevel::from_verbosity(cli.global.verbose, cli.global.quiet),
        cli.global.log_format,
    );
    init_logging(&log_config);

    let result = match &cli.command {
        Commands::Build(args) => run_build(&cli.global, args),
        Commands::Validate(args) => run_validate(&cli.global, args),
        Commands::Dataset(args) => run_dataset(&cli.global, args),
        Commands::Config(args) => run_config(&cli.global, args),
        Commands::Version => {
            print_version();
            Ok(ExitCode::Clean)
        }
    };

    match result {
        Ok(code) => code.into(),
        Err(err) => {
            error!(code = %err.exit_code(), "{err}");
            eprintln!("Error: {err}");
            err.exit_code().into()
        }
    }
}

// ============================================================================
// Command implementations
// ============================================================================

fn run_build(global: &GlobalOpts, args: &BuildArgs) -> Result<ExitCode, DashError> {
    let loaded = load_config(global.config.as_deref())?;
    let dataset = load_dataset(global.dataset.as_deref())?;

    let options = BuildOptions {
        output_dir: args.output.clone(),
        base_path: args.base_path.clone(),
        theme: args.theme,
        title: args.title.clone(),
        strict: args.strict,
    };
    let outcome = build_site(&loaded.config, &dataset.dataset, &options)?;

    println!("{}", outcome.path.display());
    if !outcome.report.is_clean() {
        eprintln!("{}", outcome.report.summary());
    }
    Ok(ExitCode::Clean)
}

fn run_validate(global: &GlobalOpts, args: &ValidateArgs) -> Result<ExitCode, DashError> {
    let loaded = load_dataset(global.dataset.as_deref())?;
    let report = esg_config::validate_dataset(&loaded.dataset);

    match args.format {
        ReportFormat::Human => print_report_human(&report, loaded.path.as_deref()),
        ReportFormat::Json => {
            let response = serde_json::json!({
                "dataset": loaded.path.as_ref().map(|p| p.display().to_string()),
                "source": loaded.source.to_string(),
                "summary": {
                    "errors": report.errors().count(),
                    "warnings": report.warnings().count(),
                },
                "issues": report.issues,
            });
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(ExitCode::from_report(&report))
}

fn print_report_human(report: &ValidationReport, path: Option<&std::path::Path>) {
    let name = path.map_or_else(|| "built-in dataset".to_string(), |p| p.display().to_string());
    for issue in &report.issues {
        println!("{issue}");
    }
    if report.is_clean() {
        println!("{name}: ok");
    } else {
        println!("{name}: {}", report.summary());
    }
}

fn run_dataset(global: &GlobalOpts, args: &DatasetArgs) -> Result<ExitCode, DashError> {
    if args.schema {
        println!("{}", serde_json::to_string_pretty(&Dataset::json_schema())?);
        return Ok(ExitCode::Clean);
    }
    let loaded = load_dataset(global.dataset.as_deref())?;
    println!("{}", loaded.dataset.to_json_pretty()?);
    Ok(ExitCode::Clean)
}

fn run_config(global: &GlobalOpts, args: &ConfigArgs) -> Result<ExitCode, DashError> {
    let config = match args.command {
        ConfigCommands::Show => load_config(global.config.as_deref())?.config,
        ConfigCommands::Default => DashboardConfig::default(),
    };
    println!("{}", config.to_json()?);
    Ok(ExitCode::Clean)
}

fn print_version() {
    println!("esg-dash {}", env!("CARGO_PKG_VERSION"));
    println!("dataset schema version: {}", DATASET_SCHEMA_VERSION);
    println!("config schema version: {}", CONFIG_SCHEMA_VERSION);
}
