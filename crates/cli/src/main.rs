use std::io::stdout;
use std::process::ExitCode;

use clap::Parser;
use log::debug;

use azcx_cli::cli_args::{Args, AzcxCommand};
use azcx_cli::commands::{self, AliasAction};
use azcx_cli::fuzzy_selection::{fuzzy_select, SelectorTheme};
use azcx_core::aliases::FileAliasStore;
use azcx_core::config;
use azcx_core::error::Result;
use azcx_core::profile::FileProfileStore;

fn execute() -> Result<()> {
    let args = Args::parse();
    let mut stdout = stdout();

    let profile_path = config::get_profile_path(&args.profile_path);
    let config_path = config::get_alias_config_path(&args.config_path);
    debug!("Profile path: `{}`", profile_path.display());
    debug!("Config path: `{}`", config_path.display());

    let profiles = FileProfileStore::new(profile_path);
    let aliases = FileAliasStore::new(config_path);

    match args.command {
        Some(AzcxCommand::Alias { delete, assignment }) => {
            return commands::manage_aliases(
                &aliases,
                AliasAction::from_args(delete, assignment),
                &mut stdout,
            );
        }
        Some(AzcxCommand::Refresh) => return commands::refresh(&mut stdout),
        None => {}
    }

    if args.current {
        return commands::show_current(&profiles, &mut stdout);
    }

    if args.list {
        return commands::list_subscriptions(&profiles, &mut stdout);
    }

    match args.target {
        Some(target) => commands::switch_to(&profiles, &aliases, &target, &mut stdout),
        None => {
            let theme = SelectorTheme::from_env();
            let selector = |names: &[String]| fuzzy_select(names, &theme);
            commands::switch_interactive(&profiles, &aliases, selector, &mut stdout)
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
