// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, Context};
use log::{warn, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::fs::File;
use std::io::BufReader;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use stalign::app_config::{self, Config};
use stalign::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compute operations between two versions of one transcript
    Compute(ComputeArgs),

    /// Compute operations for every transcript of a folder
    Batch(BatchArgs),

    /// Generate shell completions for stalign
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct ComputeArgs {
    /// Old version of the transcript
    #[arg(long, value_name = "FILE")]
    from: PathBuf,

    /// Persistent ids of the old version (JSON)
    #[arg(long, value_name = "FILE")]
    from_ids: PathBuf,

    /// New version of the transcript
    #[arg(long, value_name = "FILE")]
    to: PathBuf,

    /// Report file, stdout when omitted
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// First operation id to hand out
    #[arg(long)]
    starting_id: Option<u64>,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Folder with the old transcript versions
    #[arg(long, value_name = "DIR")]
    from_dir: PathBuf,

    /// Folder with the new transcript versions, reports are written here
    #[arg(long, value_name = "DIR")]
    to_dir: PathBuf,

    /// Folder with the persistent id files
    #[arg(long, value_name = "DIR")]
    ids_dir: PathBuf,

    /// Force overwrite of existing reports
    #[arg(short, long)]
    force_overwrite: bool,
}

/// stalign - subtitle alignment and operation extraction
///
/// Aligns two versions of a subtitled transcript and derives the edit
/// operations that turn the old subtitles into the new ones.
#[derive(Parser, Debug)]
#[command(name = "stalign")]
#[command(version)]
#[command(about = "Subtitle alignment and operation extraction")]
#[command(long_about = "stalign aligns two versions of a subtitled transcript and derives typed subtitle operations.

EXAMPLES:
    stalign compute --from old/65-0725m.at --from-ids ids/65-0725m.ids.json --to new/65-0725m.at
    stalign compute --from a.at --from-ids a.ids.json --to b.at -o ops.json --starting-id 2
    stalign batch --from-dir old/ --to-dir new/ --ids-dir ids/
    stalign completions bash > stalign.bash

CONFIGURATION:
    Configuration is stored in stalign.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "stalign.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, global = true, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, tag, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Accept everything, the effective level is set through set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "stalign", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = load_config(&cli.config_path, cli.log_level.clone())?;
    if let Commands::Compute(args) = &cli.command {
        if let Some(starting_id) = args.starting_id {
            config.extraction.starting_operation_id = starting_id;
        }
    }

    config.validate()
        .context("Configuration validation failed")?;

    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let controller = Controller::with_config(config)?;

    match cli.command {
        Commands::Compute(args) => {
            controller.run(&args.from, &args.from_ids, &args.to, args.output.as_deref())?;
        }
        Commands::Batch(args) => {
            let summary = controller
                .run_folder(&args.from_dir, &args.to_dir, &args.ids_dir, args.force_overwrite)
                .await?;
            for (file, message) in &summary.failed {
                warn!("Failed: {:?}: {}", file, message);
            }
        }
        Commands::Completions { .. } => {}
    }

    Ok(())
}

// Load the configuration file, creating a default one when missing
fn load_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    let mut config = if Path::new(config_path).exists() {
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?
    } else {
        warn!("Config file not found at '{}', creating default config.", config_path);

        let config = Config::default();
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;
        info!("Default configuration written to {}", config_path);

        config
    };

    if let Some(log_level) = log_level {
        config.log_level = log_level.into();
    }

    Ok(config)
}
