//! Rivals Access CLI - inspect how user records resolve to roles,
//! permissions, navigation and dashboard sections.

mod commands;
mod input;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use rivals_access_core::config::Config;
use rivals_access_core::error::{AccessError, ErrorResponse};
use rivals_access_core::telemetry::{init_telemetry, LogFormat};

use commands::{check, config, inspect, manage, nav, roles, sections};
use output::OutputFormat;

/// Rivals Access - role and permission resolution
#[derive(Parser)]
#[command(
    name = "rivals-access",
    version,
    about = "Rivals Access - role and permission resolution",
    long_about = "Inspect the role registry and evaluate permissions, navigation, dashboard sections and management authority for a user record.",
    propagate_version = true
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "table")]
    output: OutputFormat,

    /// User record: inline JSON, a JSON/YAML file, or `-` for stdin (anonymous if omitted)
    #[arg(short, long, global = true, env = "RIVALS_ACCESS_USER")]
    user: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log evaluation details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in roles, or show one role's definition
    Roles(roles::RolesArgs),

    /// Show the user's resolved roles, landing route and badge
    Inspect,

    /// Check a permission, a literal role, or a minimum role
    Check(check::CheckArgs),

    /// List the navigation entries visible to the user
    Nav,

    /// List dashboard sections and whether the user may open them
    Sections,

    /// Check whether the user may manage a target user
    Manage(manage::ManageArgs),

    /// Configuration management
    #[command(subcommand)]
    Config(config::ConfigCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    init_logging(cli.verbose);

    let format = cli.output;
    if let Err(e) = run(cli) {
        report_error(&e, format);
        std::process::exit(1);
    }

    Ok(())
}

impl Commands {
    fn needs_user(&self) -> bool {
        !matches!(self, Self::Roles(_) | Self::Config(_))
    }
}

fn run(cli: Cli) -> Result<()> {
    let format = cli.output;

    let user = if cli.command.needs_user() {
        let source = cli.user.or_else(config::load_user_source);
        input::load_user(source.as_deref())?
    } else {
        None
    };
    let user = user.as_ref();

    match cli.command {
        Commands::Roles(args) => roles::execute(args, format),
        Commands::Inspect => inspect::execute(user, format),
        Commands::Check(args) => check::execute(args, user, format),
        Commands::Nav => nav::execute(user, format),
        Commands::Sections => sections::execute(user, format),
        Commands::Manage(args) => manage::execute(args, user, format),
        Commands::Config(cmd) => config::execute(cmd, format),
    }
}

/// Logs go to stderr: compact, `warn` by default, `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let mut config = Config::load().unwrap_or_default();
    config.telemetry.logging.level = if verbose { "debug" } else { "warn" }.to_string();
    config.telemetry.logging.format = LogFormat::Compact;
    config.telemetry.logging.include_location = false;

    if let Err(e) = init_telemetry(&config.telemetry) {
        output::print_error(&format!("Failed to initialize logging: {:#}", e));
    }
}

fn report_error(error: &anyhow::Error, format: OutputFormat) {
    let access_error = error.chain().find_map(|cause| cause.downcast_ref::<AccessError>());

    match (format, access_error) {
        (OutputFormat::Json | OutputFormat::Yaml, Some(access_error)) => {
            access_error.log();
            if output::print_item(&ErrorResponse::from(access_error), format).is_err() {
                output::print_error(&format!("{:#}", error));
            }
        }
        _ => output::print_error(&format!("{:#}", error)),
    }
}
