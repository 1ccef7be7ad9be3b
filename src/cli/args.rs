use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Cache Nuker — selectively nuke browser caches, cookies and site storage
#[derive(Parser, Debug)]
#[command(
    name = "cachenuker",
    version,
    about = "Selectively nuke browser caches, cookies and site storage",
    long_about = "Cache Nuker clears browser caches, cookies and site storage category by\n\
                  category, either for the whole browser profile or only for the site\n\
                  you are on.",
    after_help = "EXAMPLES:\n  \
        cachenuker list                                   Show categories and what is selected\n  \
        cachenuker list --site https://example.com/a      Show what site scope allows\n  \
        cachenuker clear --dry-run                        Simulate clearing the default selection\n  \
        cachenuker clear --select-all --yes               Clear every category for all time\n  \
        cachenuker clear --site https://example.com --scope site --toggle cache\n  \
        cachenuker clear --profile-dir ~/.config/google-chrome/Default\n  \
        cachenuker config set step_delay_ms 0             Turn off the per-step pause"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format [default: config `output_format`, else human]
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode — minimal output
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// Which site is open and which scope to target
#[derive(Args, Debug, Clone)]
pub struct TargetArgs {
    /// URL of the active page; its origin is the target of site scope
    #[arg(long, value_name = "URL", env = "CACHENUKER_SITE")]
    pub site: Option<String>,

    /// Clearing scope (defaults to the configured scope)
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List data categories with their selection state
    List {
        #[command(flatten)]
        target: TargetArgs,
    },

    /// Clear the selected categories
    Clear {
        #[command(flatten)]
        target: TargetArgs,

        /// Flip these categories, in order (e.g. --toggle cache,history)
        #[arg(long, value_delimiter = ',', value_name = "ID")]
        toggle: Vec<String>,

        /// Select every available category, or deselect them if all are selected
        #[arg(long)]
        select_all: bool,

        /// Browser profile directory to clear
        #[arg(long, value_name = "DIR", conflicts_with = "dry_run")]
        profile_dir: Option<PathBuf>,

        /// Simulate — log what would be cleared without touching anything
        #[arg(long)]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset to default configuration
    Reset,

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Initialize the data directory and default config
    Init,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ScopeArg {
    Global,
    Site,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Quiet,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_clear_flags() {
        let cli = Cli::parse_from([
            "cachenuker",
            "clear",
            "--site",
            "https://example.com",
            "--scope",
            "site",
            "--toggle",
            "cache,cookies",
            "--toggle",
            "webSQL",
            "--dry-run",
            "-y",
        ]);
        match cli.command {
            Commands::Clear {
                target,
                toggle,
                dry_run,
                yes,
                select_all,
                profile_dir,
            } => {
                assert_eq!(target.site.as_deref(), Some("https://example.com"));
                assert!(matches!(target.scope, Some(ScopeArg::Site)));
                assert_eq!(toggle, vec!["cache", "cookies", "webSQL"]);
                assert!(dry_run && yes && !select_all);
                assert!(profile_dir.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_profile_dir_conflicts_with_dry_run() {
        let res = Cli::try_parse_from([
            "cachenuker",
            "clear",
            "--dry-run",
            "--profile-dir",
            "/tmp/Default",
        ]);
        assert!(res.is_err());
    }
}
