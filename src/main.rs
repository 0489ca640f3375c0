// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::{Path, PathBuf};

use subshift::app_config::{self, Config};
use subshift::{Adjustment, Controller, TimeShift};

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

/// Delta given on the command line
#[derive(Args, Debug, Clone)]
struct TimeArgs {
    /// Minutes to shift (negative values move subtitles earlier)
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    minutes: i32,

    /// Seconds to shift
    #[arg(short, long, default_value_t = 0, allow_negative_numbers = true)]
    seconds: i32,

    /// Milliseconds to shift
    #[arg(long = "ms", default_value_t = 0, allow_negative_numbers = true)]
    milliseconds: i32,

    /// Show subtitles earlier, whatever the sign of the values
    #[arg(long, conflicts_with = "delay")]
    advance: bool,

    /// Show subtitles later, whatever the sign of the values
    #[arg(long)]
    delay: bool,
}

impl TimeArgs {
    fn to_shift(&self) -> TimeShift {
        let mut shift = TimeShift::new(self.minutes, self.seconds, self.milliseconds);
        if self.advance {
            shift.make_negative();
        } else if self.delay {
            shift.make_positive();
        }
        shift
    }
}

#[derive(Args, Debug)]
struct ShiftArgs {
    /// Input .srt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    time: TimeArgs,

    /// First subtitle number to shift (defaults to the first subtitle)
    #[arg(long)]
    from: Option<u32>,

    /// Last subtitle number to shift (defaults to the last subtitle)
    #[arg(long)]
    to: Option<u32>,

    /// Output file (single file input only)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ProportionalArgs {
    /// Input .srt file or directory to process
    #[arg(value_name = "INPUT_PATH")]
    input_path: PathBuf,

    #[command(flatten)]
    time: TimeArgs,

    /// Subtitle number that receives the full shift
    #[arg(short, long)]
    anchor: u32,

    /// Output file (single file input only)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shift all subtitles, or the ones between --from and --to
    Shift(ShiftArgs),

    /// Shift from an anchor subtitle onward and taper the earlier ones
    Proportional(ProportionalArgs),

    /// Print a subtitle file as parsed
    Show {
        /// Input .srt file
        #[arg(value_name = "INPUT_PATH")]
        input_path: PathBuf,
    },

    /// Generate shell completions for subshift
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// subshift - SubRip subtitle timing editor
///
/// Fixes subtitles that are out of sync with their video by shifting them
/// uniformly, over a range, or proportionally from an anchor subtitle.
#[derive(Parser, Debug)]
#[command(name = "subshift")]
#[command(version)]
#[command(about = "Shift the timing of SubRip (.srt) subtitles")]
#[command(long_about = "subshift parses SubRip subtitle files and shifts their timing.

EXAMPLES:
    subshift shift -s 2 movie.srt                   # Delay every subtitle by 2 seconds
    subshift shift --ms 500 --advance movie.srt     # Show every subtitle 500ms earlier
    subshift shift -s 1 --from 10 --to 20 movie.srt # Only subtitles 10 to 20
    subshift proportional -a 300 -s 4 movie.srt     # Subtitle 300 onward +4s, earlier ones tapered
    subshift shift -m 1 /movies/                    # Every .srt below a directory
    subshift completions bash > subshift.bash       # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json", global = true)]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum, global = true)]
    log_level: Option<CliLogLevel>,

    /// Encoding of the subtitle files (e.g. UTF-8, windows-1252)
    #[arg(short, long, global = true)]
    encoding: Option<String>,

    /// Force overwrite of existing output files
    #[arg(short, long, global = true)]
    force_overwrite: bool,
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
        let logger = Box::new(CustomLogger::new(LevelFilter::Trace));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji and ANSI color for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                color,
                now,
                emoji,
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Info until the config says otherwise
    CustomLogger::init(LevelFilter::Info)?;

    let cli = CommandLineOptions::parse();

    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(*shell, &mut cmd, "subshift", &mut std::io::stdout());
        return Ok(());
    }

    if let Some(level) = &cli.log_level {
        let level: app_config::LogLevel = level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let config = load_config(&cli)?;
    let controller = Controller::with_config(config).context("Configuration validation failed")?;

    match cli.command {
        Commands::Shift(args) => {
            let shift = args.time.to_shift();
            let adjustment = if args.from.is_some() || args.to.is_some() {
                Adjustment::Range {
                    shift,
                    from: args.from,
                    to: args.to,
                }
            } else {
                Adjustment::All(shift)
            };
            run_adjustment(&controller, &args.input_path, adjustment, args.output.as_deref(), cli.force_overwrite)
        }
        Commands::Proportional(args) => {
            let adjustment = Adjustment::Proportional {
                shift: args.time.to_shift(),
                anchor: args.anchor,
            };
            run_adjustment(&controller, &args.input_path, adjustment, args.output.as_deref(), cli.force_overwrite)
        }
        Commands::Show { input_path } => show(&controller, &input_path),
        Commands::Completions { .. } => Ok(()),
    }
}

/// Load or create the config file and apply command line overrides
fn load_config(cli: &CommandLineOptions) -> Result<Config> {
    let mut config = Config::load_or_create(&cli.config_path)?;

    if let Some(encoding) = &cli.encoding {
        config.encoding = encoding.clone();
    }

    match &cli.log_level {
        Some(level) => config.log_level = level.clone().into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn run_adjustment(
    controller: &Controller,
    input_path: &Path,
    adjustment: Adjustment,
    output: Option<&Path>,
    force_overwrite: bool,
) -> Result<()> {
    if adjustment.shift().is_zero() {
        warn!("The requested shift is zero, subtitles will keep their timing");
    }

    if input_path.is_file() {
        if let Some(written) = controller.run(input_path, adjustment, output, force_overwrite)? {
            info!("Success: {:?}", written);
        }
    } else if input_path.is_dir() {
        if output.is_some() {
            warn!("--output is ignored when processing a directory");
        }
        controller.run_folder(input_path, adjustment, force_overwrite)?;
    } else {
        return Err(anyhow!("Input path does not exist: {:?}", input_path));
    }

    Ok(())
}

fn show(controller: &Controller, input_path: &Path) -> Result<()> {
    let document = controller.open(input_path)?;

    match (document.first_number(), document.last_number()) {
        (Some(first), Some(last)) => info!(
            "{} subtitles, numbered {} to {}",
            document.len(),
            first,
            last
        ),
        _ => info!("No subtitles in {:?}", input_path),
    }

    print!("{}", document.render());
    Ok(())
}
