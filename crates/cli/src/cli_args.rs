//! Command-line argument parsing and validation.
//!
//! This module defines the command-line interface structure using the
//! `clap` crate.

use clap::{Parser, Subcommand};

/// Command-line arguments for the `azcx` binary.
///
/// # Examples
///
/// ```rust
/// use clap::Parser;
/// use azcx_cli::cli_args::Args;
///
/// let args = Args::parse_from(["azcx", "my-subscription"]);
/// assert_eq!(args.target.as_deref(), Some("my-subscription"));
/// ```
#[derive(Parser, Debug)] // requires `derive` feature
#[command(
    name = "azcx",
    version,
    about = "Fast Azure subscription switcher",
    long_about = "azcx - A fast Azure subscription context switcher, inspired by kubectx.

Examples:
  azcx                    # Interactive fuzzy finder
  azcx my-subscription    # Switch to subscription by name
  azcx -                  # Switch to previous subscription
  azcx -c                 # Show current subscription
  azcx -l                 # List all subscriptions"
)]
#[command(term_width = 0)] // Just to make testing across clap features easier
pub struct Args {
    /// Path to the Azure CLI profile.
    ///
    /// If not provided, defaults to `$AZURE_CONFIG_DIR/azureProfile.json`,
    /// or `~/.azure/azureProfile.json` when `AZURE_CONFIG_DIR` is unset.
    #[arg(long, global = true)]
    pub profile_path: Option<String>,

    /// Path to the azcx config holding aliases and the previous subscription.
    ///
    /// If not provided, defaults to `~/.config/azcx/config.json`
    /// (`%APPDATA%\azcx\config.json` on Windows).
    #[arg(long, global = true)]
    pub config_path: Option<String>,

    /// Show current subscription
    #[arg(long, short = 'c', action, conflicts_with_all = ["list", "target"])]
    pub current: bool,

    /// List all subscriptions
    #[arg(long, short = 'l', action, conflicts_with = "target")]
    pub list: bool,

    /// Subscription name, id, alias, or `-` for the previous subscription.
    ///
    /// If not provided, an interactive fuzzy finder is shown.
    #[arg(num_args(1))]
    pub target: Option<String>,

    #[command(subcommand)]
    pub command: Option<AzcxCommand>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum AzcxCommand {
    /// Manage subscription aliases
    ///
    /// Examples:
    ///   azcx alias                          # List all aliases
    ///   azcx alias dev=my-dev-subscription  # Create alias 'dev'
    ///   azcx alias -d dev                   # Delete alias 'dev'
    #[command(verbatim_doc_comment)]
    Alias {
        /// Delete an alias
        #[arg(long, short = 'd', value_name = "ALIAS", conflicts_with = "assignment")]
        delete: Option<String>,

        /// Alias to create, as `alias=subscription`
        assignment: Option<String>,
    },

    /// Refresh subscription list from Azure
    ///
    /// Fetches the latest subscription list by running `az account list --refresh`.
    Refresh,
}
