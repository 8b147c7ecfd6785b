//! Switching the default subscription.
//!
//! A switch runs in a fixed order: resolve `-` to the previous subscription,
//! follow one alias, load the profile, mark the target as default, then save
//! the profile and finally the new previous pointer. Nothing is written
//! unless the target was found, so a failed switch never moves the previous
//! pointer.

use log::{debug, info};

use crate::aliases::{AliasConfig, AliasStore};
use crate::error::{Error, Result};
use crate::profile::ProfileStore;

/// Token meaning "the subscription that was active before the last switch"
pub const PREVIOUS_TOKEN: &str = "-";

/// `name` is now the default; `previous` was the default before.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchOutcome {
    pub name: String,
    pub previous: Option<String>,
}

pub struct Switcher<'a> {
    profiles: &'a dyn ProfileStore,
    aliases: &'a dyn AliasStore,
}

impl<'a> Switcher<'a> {
    pub fn new(profiles: &'a dyn ProfileStore, aliases: &'a dyn AliasStore) -> Self {
        Self { profiles, aliases }
    }

    /// Makes the subscription named by `token` the default.
    ///
    /// `token` may be a subscription name or id (case-insensitive), an alias,
    /// or [`PREVIOUS_TOKEN`].
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyTarget`] for an empty token, before either store is read
    /// - [`Error::NoPreviousSubscription`] for `-` with no recorded previous
    /// - [`Error::SubscriptionNotFound`] if nothing matches; nothing is saved
    /// - any load/save error from the stores
    pub fn switch(&self, token: &str) -> Result<SwitchOutcome> {
        if token.is_empty() {
            return Err(Error::EmptyTarget);
        }

        let mut config = self.aliases.load()?;

        let working_token = resolve_previous(token, &config)?;
        let target = config.resolve(&working_token).to_string();
        if target != working_token {
            debug!("Alias `{working_token}` resolves to `{target}`");
        }

        let mut profile = self.profiles.load()?;
        let previous = profile
            .current_subscription()
            .map(|s| s.name().to_string());
        debug!("Current subscription: {previous:?}");

        let name = profile.set_default(&target)?.name().to_string();

        self.profiles.save(&profile)?;

        if let Some(previous) = &previous {
            config.previous_subscription = previous.clone();
            self.aliases.save(&config)?;
        }

        info!("Switched from {previous:?} to `{name}`");
        Ok(SwitchOutcome { name, previous })
    }
}

fn resolve_previous(token: &str, config: &AliasConfig) -> Result<String> {
    if token != PREVIOUS_TOKEN {
        return Ok(token.to_string());
    }

    let previous = config.previous().ok_or(Error::NoPreviousSubscription)?;
    debug!("`{PREVIOUS_TOKEN}` resolves to previous subscription `{previous}`");
    Ok(previous.to_string())
}
