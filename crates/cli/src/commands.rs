//! Handlers for each `azcx` invocation.
//!
//! Every handler writes its user-facing output to the given writer, so the
//! binary passes stdout and tests pass a buffer.

use std::io::Write;

use log::{debug, info};

use azcx_core::aliases::{parse_alias_assignment, AliasStore};
use azcx_core::error::{Error, Result};
use azcx_core::execution;
use azcx_core::profile::ProfileStore;
use azcx_core::switcher::{SwitchOutcome, Switcher};

const DEFAULT_MARKER: &str = "* ";
const NON_DEFAULT_MARKER: &str = "  ";

/// What `azcx alias` was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasAction {
    List,
    Create(String),
    Delete(String),
}

impl AliasAction {
    #[must_use]
    pub fn from_args(delete: Option<String>, assignment: Option<String>) -> Self {
        match (delete, assignment) {
            (Some(alias), _) => Self::Delete(alias),
            (None, Some(assignment)) => Self::Create(assignment),
            (None, None) => Self::List,
        }
    }
}

/// Prints the default subscription as `name (id)`.
///
/// # Errors
///
/// Fails if the profile can't be loaded or the output can't be written.
pub fn show_current(profiles: &dyn ProfileStore, out: &mut impl Write) -> Result<()> {
    let profile = profiles.load()?;

    match profile.current_subscription() {
        Some(current) => writeln!(out, "{current}")?,
        None => writeln!(out, "No subscription selected")?,
    }

    Ok(())
}

/// Prints every subscription name in profile order, marking the default one.
///
/// # Errors
///
/// Fails if the profile can't be loaded or the output can't be written.
pub fn list_subscriptions(profiles: &dyn ProfileStore, out: &mut impl Write) -> Result<()> {
    let profile = profiles.load()?;

    for subscription in profile.subscriptions() {
        let marker = if subscription.is_default() {
            DEFAULT_MARKER
        } else {
            NON_DEFAULT_MARKER
        };
        writeln!(out, "{marker}{}", subscription.name())?;
    }

    Ok(())
}

/// Lists, creates or deletes aliases.
///
/// # Errors
///
/// - [`Error::InvalidAliasFormat`] / [`Error::EmptyAlias`] for a bad assignment
/// - [`Error::AliasNotFound`] when deleting an unknown alias
/// - any load/save error from the store
pub fn manage_aliases(
    aliases: &dyn AliasStore,
    action: AliasAction,
    out: &mut impl Write,
) -> Result<()> {
    let mut config = aliases.load()?;

    match action {
        AliasAction::List => {
            if config.aliases.is_empty() {
                writeln!(out, "No aliases configured")?;
            }
            for (alias, target) in config.list() {
                writeln!(out, "{alias} -> {target}")?;
            }
        }
        AliasAction::Create(assignment) => {
            let (alias, target) = parse_alias_assignment(&assignment)?;
            config.create(alias, target)?;
            aliases.save(&config)?;
            info!("Created alias `{alias}` for `{target}`");
            writeln!(out, "Created alias '{alias}' -> '{target}'")?;
        }
        AliasAction::Delete(alias) => {
            let target = config.delete(&alias)?;
            aliases.save(&config)?;
            info!("Deleted alias `{alias}` (was `{target}`)");
            writeln!(out, "Deleted alias '{alias}'")?;
        }
    }

    Ok(())
}

/// Asks `selector` to pick one of the profile's subscription names.
///
/// The selector gets the names in profile order and returns the chosen one,
/// or an empty string if the user backed out.
///
/// # Errors
///
/// Returns [`Error::NoSubscriptions`] for an empty profile, without calling
/// the selector.
pub fn select_target<F>(profiles: &dyn ProfileStore, selector: F) -> Result<String>
where
    F: FnOnce(&[String]) -> Result<String>,
{
    let names = profiles.load()?.names();
    if names.is_empty() {
        return Err(Error::NoSubscriptions);
    }

    debug!("Offering {} subscriptions", names.len());
    selector(&names)
}

/// Switches to `token` and reports the result.
///
/// # Errors
///
/// See [`Switcher::switch`]. An empty `token` is [`Error::EmptyTarget`].
pub fn switch_to(
    profiles: &dyn ProfileStore,
    aliases: &dyn AliasStore,
    token: &str,
    out: &mut impl Write,
) -> Result<()> {
    let SwitchOutcome { name, .. } = Switcher::new(profiles, aliases).switch(token)?;
    writeln!(out, "Switched to {name}")?;
    Ok(())
}

/// Lets `selector` pick a subscription, then switches to it.
///
/// Backing out of the selector is not an error: nothing is written and
/// nothing is printed.
///
/// # Errors
///
/// See [`select_target`] and [`switch_to`].
pub fn switch_interactive<F>(
    profiles: &dyn ProfileStore,
    aliases: &dyn AliasStore,
    selector: F,
    out: &mut impl Write,
) -> Result<()>
where
    F: FnOnce(&[String]) -> Result<String>,
{
    let selection = select_target(profiles, selector)?;
    if selection.is_empty() {
        info!("No subscription selected, nothing to switch");
        return Ok(());
    }

    switch_to(profiles, aliases, &selection, out)
}

/// Re-fetches the subscription list through the Azure CLI.
///
/// # Errors
///
/// Fails if `az` can't be started or exits unsuccessfully.
pub fn refresh(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Refreshing subscriptions from Azure...")?;
    out.flush()?;

    execution::refresh_subscriptions()?;

    writeln!(out, "Subscriptions refreshed successfully")?;
    Ok(())
}
