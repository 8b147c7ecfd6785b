//! azcx's own config: subscription aliases and the previous-subscription
//! pointer used by `azcx -`.

use std::path::PathBuf;

use indexmap::IndexMap;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::file_handling::{read_optional, strip_bom, write_whole_file};

const ALIAS_FILE_DESCRIPTION: &str = "azcx config";

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AliasConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub previous_subscription: String,

    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub aliases: IndexMap<String, String>,
}

impl AliasConfig {
    /// Creates or replaces an alias.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyAlias`] if either side is empty.
    pub fn create(&mut self, alias: &str, target: &str) -> Result<()> {
        if alias.is_empty() || target.is_empty() {
            return Err(Error::EmptyAlias);
        }

        self.aliases.insert(alias.to_string(), target.to_string());
        Ok(())
    }

    /// Removes an alias, keeping the order of the remaining ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AliasNotFound`] if no such alias exists.
    pub fn delete(&mut self, alias: &str) -> Result<String> {
        self.aliases
            .shift_remove(alias)
            .ok_or_else(|| Error::AliasNotFound(alias.to_string()))
    }

    /// Follows at most one alias.
    ///
    /// An alias pointing at another alias name resolves to that name, not to
    /// what the second alias points at.
    #[must_use]
    pub fn resolve<'a>(&'a self, token: &'a str) -> &'a str {
        self.aliases.get(token).map_or(token, String::as_str)
    }

    /// Aliases in the order they were created.
    pub fn list(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    /// The subscription that was active before the last switch, if recorded.
    #[must_use]
    pub fn previous(&self) -> Option<&str> {
        Some(self.previous_subscription.as_str()).filter(|p| !p.is_empty())
    }
}

/// Splits `alias=target` on the first `=`.
///
/// # Errors
///
/// [`Error::InvalidAliasFormat`] when there is no `=`, [`Error::EmptyAlias`]
/// when either half is empty.
pub fn parse_alias_assignment(input: &str) -> Result<(&str, &str)> {
    let (alias, target) = input
        .split_once('=')
        .ok_or_else(|| Error::InvalidAliasFormat(input.to_string()))?;

    if alias.is_empty() || target.is_empty() {
        return Err(Error::EmptyAlias);
    }

    Ok((alias, target))
}

/// Loads and saves the alias config.
pub trait AliasStore {
    /// A missing backing file yields an empty config.
    ///
    /// # Errors
    ///
    /// I/O errors other than "not found", and parse errors.
    fn load(&self) -> Result<AliasConfig>;

    /// # Errors
    ///
    /// I/O errors writing the backing file.
    fn save(&self, config: &AliasConfig) -> Result<()>;
}

/// `config.json` in azcx's config directory.
#[derive(Debug, Clone)]
pub struct FileAliasStore {
    path: PathBuf,
}

impl FileAliasStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl AliasStore for FileAliasStore {
    fn load(&self) -> Result<AliasConfig> {
        let path = self.path.display().to_string();
        let Some(contents) = read_optional(ALIAS_FILE_DESCRIPTION, &self.path)? else {
            return Ok(AliasConfig::default());
        };

        let config: serde_json::Result<AliasConfig> = serde_json::from_slice(strip_bom(&contents));

        match config {
            Ok(mut config) => {
                config.aliases.retain(|alias, target| {
                    let keep = !alias.is_empty() && !target.is_empty();
                    if !keep {
                        warn!("Ignoring empty alias entry `{alias}` -> `{target}` in `{path}`");
                    }
                    keep
                });
                debug!(
                    "Loaded {} aliases from `{path}`, previous: {:?}",
                    config.aliases.len(),
                    config.previous()
                );
                Ok(config)
            }
            Err(e) => Err(Error::json_error("reading", ALIAS_FILE_DESCRIPTION, &path, e)),
        }
    }

    fn save(&self, config: &AliasConfig) -> Result<()> {
        let path = self.path.display().to_string();
        let contents = serde_json::to_string_pretty(config)
            .map_err(|e| Error::json_error("writing", ALIAS_FILE_DESCRIPTION, &path, e))?;

        write_whole_file(ALIAS_FILE_DESCRIPTION, &self.path, contents.as_bytes(), true)?;
        info!("Saved azcx config to `{path}`");
        Ok(())
    }
}
