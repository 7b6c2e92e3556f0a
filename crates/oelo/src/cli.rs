//! Clap derive structures for the `oelo` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use oelo_core::Rgb;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// oelo -- control Oelo lighting zones from the command line
#[derive(Debug, Parser)]
#[command(
    name = "oelo",
    version,
    about = "Control Oelo multi-zone lighting controllers",
    long_about = "Poll, watch and command the zones of an Oelo lighting controller\n\
        over its local HTTP API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller address (host, host:port or URL; overrides config)
    #[arg(long, short = 'a', env = "OELO_ADDRESS", global = true)]
    pub address: Option<String>,

    /// Number of zones wired to the controller (1-6; overrides config)
    #[arg(long, env = "OELO_ZONE_COUNT", global = true)]
    pub zones: Option<u8>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "OELO_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "OELO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check that the controller answers and report what it sees
    Probe,

    /// Show the state of every zone (or just the given ones)
    #[command(alias = "st")]
    Status(StatusArgs),

    /// Change one or more zones
    Set(SetArgs),

    /// Keep polling and print zone changes as they happen
    Watch(WatchArgs),

    /// List the built-in effects
    #[command(alias = "fx")]
    Effects,

    /// Inspect or write the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Status / Set / Watch ─────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct StatusArgs {
    /// Zone numbers to show (default: all configured zones)
    pub zones: Vec<u8>,
}

#[derive(Debug, Args)]
#[command(group(
    clap::ArgGroup::new("change")
        .required(true)
        .multiple(true)
        .args(["on", "off", "brightness", "color", "effect"])
))]
pub struct SetArgs {
    /// Zone numbers to change
    #[arg(required = true)]
    pub zones: Vec<u8>,

    /// Turn the zones on
    #[arg(long, conflicts_with = "off")]
    pub on: bool,

    /// Turn the zones off
    #[arg(long, conflicts_with_all = ["brightness", "color", "effect"])]
    pub off: bool,

    /// Brightness (0-255)
    #[arg(long, short = 'b')]
    pub brightness: Option<u8>,

    /// Solid color as R,G,B or #rrggbb
    #[arg(long, short = 'c', conflicts_with = "effect", value_parser = parse_rgb)]
    pub color: Option<Rgb>,

    /// Effect name (see `oelo effects`)
    #[arg(long, short = 'e')]
    pub effect: Option<String>,
}

fn parse_rgb(value: &str) -> Result<Rgb, String> {
    value.parse()
}

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Seconds between polls (overrides config)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file + environment)
    Show,

    /// Print the configuration file path
    Path,

    /// Write a configuration file for a controller
    Init {
        /// Controller address to store
        address: String,

        /// Number of zones wired to the controller
        #[arg(long = "zone-count", default_value_t = 6)]
        zone_count: u8,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: Shell,
}
