use std::path::PathBuf;

use clap::Parser;

use kram_common::i18n::Message;

// clap's generated help and version are disabled: both are localized and
// printed by `kram` itself.
#[derive(Parser, Debug, Default)]
#[command(name = "kram", disable_help_flag = true, disable_version_flag = true)]
pub struct Args {
    /// Show program version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// Show this help message
    #[arg(short = 'h', long)]
    pub help: bool,

    /// Show current RAM statistics
    #[arg(short = 'c', long)]
    pub check: bool,

    /// Drop caches periodically until interrupted
    #[arg(short = 'd', long)]
    pub daemon: bool,

    /// Interface language (en, ru); overrides the config file
    #[arg(long)]
    pub lang: Option<String>,

    /// Path to config file (default: /etc/kram/config.toml if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the effective configuration with defaults filled in
    #[arg(long)]
    pub print_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Version,
    Help,
    PrintConfig,
    Check,
    Daemon,
    Hint,
}

impl Mode {
    /// Pick the single mode to run. When several flags are given the first
    /// match wins in the order version, help, print-config, check, daemon.
    pub fn select(args: &Args) -> Self {
        if args.version {
            Mode::Version
        } else if args.help {
            Mode::Help
        } else if args.print_config {
            Mode::PrintConfig
        } else if args.check {
            Mode::Check
        } else if args.daemon {
            Mode::Daemon
        } else {
            Mode::Hint
        }
    }

    /// The fixed message printed by the modes that only display text.
    /// These modes never read the config file.
    pub fn display_message(self) -> Option<Message<'static>> {
        match self {
            Mode::Version => Some(Message::Version(env!("CARGO_PKG_VERSION"))),
            Mode::Help => Some(Message::Help),
            Mode::Hint => Some(Message::HelpHint),
            Mode::PrintConfig | Mode::Check | Mode::Daemon => None,
        }
    }
}
