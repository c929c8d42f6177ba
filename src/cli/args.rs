//! CLI argument definitions
//!
//! Global CLI options and configuration merging logic.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::{Config, ConfigColorMode, ConfigStatus};
use crate::core::StatusBucket;

use super::commands::Commands;

#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq)]
pub(crate) enum ColorMode {
    /// Auto-detect based on terminal (default)
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub(crate) enum StatusArg {
    /// Pending orders
    Pending,
    /// Accepted, Preparing and On the way
    Accepted,
    /// Delivered orders
    Delivered,
    /// No status constraint
    All,
}

impl StatusArg {
    pub(crate) fn bucket(self) -> Option<StatusBucket> {
        match self {
            StatusArg::Pending => Some(StatusBucket::Pending),
            StatusArg::Accepted => Some(StatusBucket::Accepted),
            StatusArg::Delivered => Some(StatusBucket::Delivered),
            StatusArg::All => None,
        }
    }
}

impl From<ConfigStatus> for StatusArg {
    fn from(status: ConfigStatus) -> Self {
        match status {
            ConfigStatus::Pending => StatusArg::Pending,
            ConfigStatus::Accepted => StatusArg::Accepted,
            ConfigStatus::Delivered => StatusArg::Delivered,
            ConfigStatus::All => StatusArg::All,
        }
    }
}

/// Default `--input` when neither the CLI nor the config names one
pub(crate) const DEFAULT_INPUT: &str = "orders";

#[derive(Parser)]
#[command(name = "orderstats")]
#[command(about = "Per-restaurant order analytics: item sales and order status summaries", version)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Restaurant display name (matched case-insensitively against line items)
    #[arg(short, long, global = true, value_name = "NAME")]
    pub(crate) restaurant: Option<String>,

    /// Orders file (.json/.jsonl), directory of exports, or "-" for stdin
    #[arg(short, long, global = true, value_name = "PATH")]
    pub(crate) input: Option<String>,

    /// Only orders created on this day (YYYYMMDD, YYYY-MM-DD, today, yesterday)
    #[arg(short, long, global = true)]
    pub(crate) date: Option<String>,

    /// Start of the time-of-day window, inclusive
    #[arg(long, global = true, value_name = "HH:MM")]
    pub(crate) from: Option<String>,

    /// End of the time-of-day window, inclusive
    #[arg(long, global = true, value_name = "HH:MM")]
    pub(crate) to: Option<String>,

    /// Only orders in this status group
    #[arg(short, long, global = true, value_enum)]
    pub(crate) status: Option<StatusArg>,

    /// Output as JSON
    #[arg(short, long, global = true)]
    pub(crate) json: bool,

    /// Output as CSV
    #[arg(long, global = true, conflicts_with = "json")]
    pub(crate) csv: bool,

    /// Filter JSON output with jq expression (requires jq installed; implies --json)
    #[arg(long, global = true, value_name = "FILTER", conflicts_with = "csv")]
    pub(crate) jq: Option<String>,

    /// Timezone for dates and times of day (e.g., "Asia/Kolkata", "UTC"; default: local)
    #[arg(long, global = true, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Color output mode
    #[arg(long, global = true, value_enum, default_value = "auto")]
    pub(crate) color: ColorMode,

    /// Disable colored output (shorthand for --color=never)
    #[arg(long, global = true)]
    pub(crate) no_color: bool,

    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub(crate) debug: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "PATH")]
    pub(crate) config: Option<PathBuf>,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.no_color && config.no_color {
            self.no_color = true;
        }

        // Enum values: config only applies while the CLI is at its default
        if let Some(color) = config.color
            && self.color == ColorMode::Auto
        {
            self.color = match color {
                ConfigColorMode::Auto => ColorMode::Auto,
                ConfigColorMode::Always => ColorMode::Always,
                ConfigColorMode::Never => ColorMode::Never,
            };
        }
        if self.status.is_none() {
            self.status = config.status.map(StatusArg::from);
        }

        // String options: only apply if CLI didn't set them
        if self.restaurant.is_none() {
            self.restaurant = config.restaurant.clone();
        }
        if self.input.is_none() {
            self.input = config.input.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }

        self
    }

    pub(crate) fn use_color(&self) -> bool {
        if self.no_color {
            return false;
        }
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    pub(crate) fn input(&self) -> &str {
        self.input.as_deref().unwrap_or(DEFAULT_INPUT)
    }

    pub(crate) fn wants_json(&self) -> bool {
        self.json || self.jq.is_some()
    }
}
