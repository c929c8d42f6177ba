//! CLI subcommand definitions

use clap::Subcommand;

/// Main CLI commands
#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Commands {
    /// Item breakdown and order summary (default)
    Report,
    /// Per-item sales breakdown
    Items,
    /// Order status summary
    Summary,
}

/// Which of the two output structures a command renders
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct View {
    pub(crate) items: bool,
    pub(crate) summary: bool,
}

impl View {
    pub(crate) fn from_command(cmd: Option<Commands>) -> Self {
        match cmd {
            Some(Commands::Report) | None => View {
                items: true,
                summary: true,
            },
            Some(Commands::Items) => View {
                items: true,
                summary: false,
            },
            Some(Commands::Summary) => View {
                items: false,
                summary: true,
            },
        }
    }
}
