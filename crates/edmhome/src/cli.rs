//! Clap derive structures for the `edmhome` CLI.
//!
//! Kept free of crate-internal imports: `build.rs` includes this file to
//! render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// edmhome -- EDM home screens for a beamline hutch
#[derive(Debug, Parser)]
#[command(
    name = "edmhome",
    version,
    about = "Generate EDM home screens from the device database",
    long_about = "Groups the devices of a hutch by stand and by parent device, then renders\n\
        the hutch as a tree of EDM displays: a home screen of stand indicators,\n\
        one screen per stand, one display per device group.",
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
    /// Configuration file (YAML or TOML)
    #[arg(long, short = 'c', env = "EDMHOME_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// JSON device database (overrides config)
    #[arg(long, short = 'd', env = "EDMHOME_DATABASE", global = true)]
    pub database: Option<PathBuf>,

    /// Hutch name (overrides config)
    #[arg(long, env = "EDMHOME_HUTCH", global = true)]
    pub hutch: Option<String>,

    /// Directory relative device screens resolve against (overrides config)
    #[arg(long, env = "EDMHOME_STATIC_DIR", global = true)]
    pub static_dir: Option<PathBuf>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EDMHOME_OUTPUT",
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
    /// Write the screens of the hutch (or one stand) into a directory
    #[command(alias = "b")]
    Build(BuildArgs),

    /// Open the screens in the EDM viewer; temp files go when it exits
    #[command(alias = "open")]
    Show(ShowArgs),

    /// Print the hutch → stand → group → device tree
    #[command(alias = "t")]
    Tree(TreeArgs),

    /// List the devices that made it through the filters
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Screens ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct BuildArgs {
    /// Output directory (overrides config `build_dir`)
    #[arg(long, short = 'b', env = "EDMHOME_BUILD_DIR")]
    pub build_dir: Option<PathBuf>,

    /// Root file name (defaults to the screen alias)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Build a single stand instead of the whole hutch
    #[arg(long, short = 's')]
    pub stand: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Open a single stand instead of the whole hutch
    #[arg(long, short = 's')]
    pub stand: Option<String>,

    /// Viewer executable (overrides config `viewer.executable`)
    #[arg(long, env = "EDMHOME_VIEWER_EXECUTABLE")]
    pub viewer: Option<String>,
}

#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Only this stand
    #[arg(long, short = 's')]
    pub stand: Option<String>,
}

#[derive(Debug, Args)]
pub struct DevicesArgs {
    /// Only devices on this stand
    #[arg(long, short = 's')]
    pub stand: Option<String>,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration (file, env, and flags merged)
    Show,

    /// Print the config file path
    Path,

    /// Write a starter config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
