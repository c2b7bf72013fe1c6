//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--interactive` / `--no-interactive`: Control prompts
//! - `--quiet` / `-q`: Minimal output
//!
//! # Create Mode
//!
//! `webflow-scripts my-site` (a bare project name instead of a command)
//! scaffolds a new project into `./my-site`, like `init` does for the
//! current directory.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::ui::prompts::stdin_is_terminal;

/// webflow-scripts - Easy script management for Webflow sites
#[derive(Parser, Debug)]
#[command(name = "webflow-scripts")]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "\
CREATE MODE:
    # Scaffold a new project into ./my-site
    webflow-scripts my-site"
)]
pub struct Cli {
    /// Run as if webflow-scripts was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable interactive prompts
    #[arg(long = "interactive", global = true, conflicts_with = "no_interactive")]
    pub interactive_flag: bool,

    /// Disable interactive prompts
    #[arg(long, global = true)]
    pub no_interactive: bool,

    /// Project directory to create (create mode)
    #[arg(value_name = "PROJECT_NAME")]
    pub project_name: Option<String>,

    #[command(flatten)]
    pub answers: AnswerArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Determine if interactive mode is enabled.
    ///
    /// Returns true if:
    /// - `--interactive` was explicitly set, OR
    /// - Neither `--no-interactive` nor `--quiet` was set AND stdin is a TTY
    pub fn interactive(&self) -> bool {
        if self.interactive_flag {
            true
        } else if self.no_interactive || self.quiet {
            false
        } else {
            stdin_is_terminal()
        }
    }
}

/// Answers for project setup. Any answer left out is prompted for.
#[derive(Args, Debug, Clone, Default)]
pub struct AnswerArgs {
    /// GitHub username
    #[arg(long, value_name = "USER")]
    pub github_user: Option<String>,

    /// GitHub repository name (defaults to the directory name)
    #[arg(long, value_name = "NAME")]
    pub repo: Option<String>,

    /// Webflow staging domain, e.g. my-site.webflow.io
    #[arg(long, value_name = "DOMAIN")]
    pub webflow_domain: Option<String>,

    /// Production domain
    #[arg(long, value_name = "DOMAIN")]
    pub custom_domain: Option<String>,

    /// Don't host built assets on GitHub Pages
    #[arg(long)]
    pub no_github_pages: bool,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize a project in the current directory
    #[command(
        name = "init",
        long_about = "Initialize a Webflow scripts project.\n\n\
            Asks for your GitHub username, repository name, and Webflow staging domain, \
            then writes the project configuration, an example script, the Webflow embed \
            code, and a README. Existing files are never overwritten.",
        after_help = "\
WORKFLOW EXAMPLES:
    # Answer the questions interactively
    webflow-scripts init

    # Scaffold into a new directory without prompts
    webflow-scripts init my-site --no-interactive \\
        --github-user octocat --webflow-domain my-site.webflow.io"
    )]
    Init {
        /// Directory to create (defaults to the current directory)
        name: Option<String>,

        #[command(flatten)]
        answers: AnswerArgs,
    },

    /// Create a new script from the template
    #[command(
        name = "new",
        after_help = "\
AFTER CREATING:
    Global:        add the name to ScriptConfig.global in the embed code
    Page-specific: <script>window.pageScript = \"NAME\";</script> in page settings"
    )]
    New {
        /// Script name, e.g. `forms` creates src/scripts/forms.js
        name: String,
    },

    /// Generate the Webflow embed code
    #[command(name = "embed")]
    Embed,

    /// Show the project configuration
    #[command(name = "test")]
    Test,

    /// Show the requests the script router would make for a page
    #[command(
        name = "plan",
        long_about = "Run the script router against a page configuration.\n\n\
            Resolves the base URL for the given host exactly as the router does on a live \
            page, then walks the load sequence and prints each request in order. With \
            --fetch every resource is requested over HTTP, and the command fails on the \
            first resource that does not return a 2xx status.",
        after_help = "\
WORKFLOW EXAMPLES:
    # What does the staging site request?
    webflow-scripts plan --host my-site.webflow.io --global alert --page-script home

    # Check that production assets are actually deployed
    webflow-scripts plan --host example.com --page page.json --fetch

    # Force production assets while on staging
    webflow-scripts plan --host my-site.webflow.io --base-url https://cdn.example.com/v2"
    )]
    Plan(PlanArgs),

    /// Get, set, or list global configuration values
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completion scripts
    #[command(
        name = "completion",
        after_help = "\
INSTALLATION:
    # Bash
    webflow-scripts completion bash > ~/.local/share/bash-completion/completions/webflow-scripts

    # Zsh
    webflow-scripts completion zsh > ~/.zfunc/_webflow-scripts

    # Fish
    webflow-scripts completion fish > ~/.config/fish/completions/webflow-scripts.fish"
    )]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Arguments for `plan`.
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Hostname the page is served from
    #[arg(long, default_value = "localhost")]
    pub host: String,

    /// Page configuration file (JSON)
    #[arg(long, value_name = "FILE")]
    pub page: Option<PathBuf>,

    /// Global scripts (body), added to the page configuration
    #[arg(long = "global", value_name = "NAME")]
    pub globals: Vec<String>,

    /// Page script
    #[arg(long, value_name = "NAME")]
    pub page_script: Option<String>,

    /// Page styles
    #[arg(long = "style", value_name = "NAME")]
    pub styles: Vec<String>,

    /// Force the base URL (like SCRIPT_BASE_URL on the page)
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// Production URL (defaults to the project's GitHub Pages URL)
    #[arg(long, value_name = "URL")]
    pub production_url: Option<String>,

    /// Per-resource timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Fetch every resource over HTTP
    #[arg(long)]
    pub fetch: bool,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },
    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Value to set
        value: String,
    },
    /// List all configuration values
    List,
}

/// Supported shells for completion
#[derive(clap::ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_name_is_create_mode() {
        let cli = Cli::try_parse_from(["webflow-scripts", "my-site", "--github-user", "octocat"]).unwrap();
        assert_eq!(cli.project_name.as_deref(), Some("my-site"));
        assert_eq!(cli.answers.github_user.as_deref(), Some("octocat"));
        assert!(cli.command.is_none());
    }

    #[test]
    fn subcommand_wins_over_name() {
        let cli = Cli::try_parse_from(["webflow-scripts", "new", "forms"]).unwrap();
        assert!(cli.project_name.is_none());
        assert!(matches!(cli.command, Some(Command::New { ref name }) if name == "forms"));
    }

    #[test]
    fn quiet_implies_non_interactive() {
        let cli = Cli::try_parse_from(["webflow-scripts", "-q", "test"]).unwrap();
        assert!(!cli.interactive());

        let cli = Cli::try_parse_from(["webflow-scripts", "--interactive", "test"]).unwrap();
        assert!(cli.interactive());
    }

    #[test]
    fn plan_flags() {
        let cli = Cli::try_parse_from([
            "webflow-scripts",
            "plan",
            "--host",
            "site.webflow.io",
            "--global",
            "a",
            "--global",
            "b",
            "--style",
            "theme",
            "--fetch",
        ])
        .unwrap();

        let Some(Command::Plan(args)) = cli.command else {
            panic!("expected plan");
        };
        assert_eq!(args.host, "site.webflow.io");
        assert_eq!(args.globals, vec!["a", "b"]);
        assert_eq!(args.styles, vec!["theme"]);
        assert!(args.fetch);
    }
}
