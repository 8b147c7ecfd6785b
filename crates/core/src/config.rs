//! Path resolution for the Azure profile and the azcx alias file.
//!
//! Both paths can be overridden from the command line; otherwise the profile
//! follows the Azure CLI's own `AZURE_CONFIG_DIR` convention and the alias
//! file lives in the platform's usual config directory. Shell expansions like
//! `~` are resolved.

use std::path::PathBuf;

use log::debug;

/// Environment variable the Azure CLI uses to relocate its config directory
pub const AZURE_CONFIG_DIR_VAR: &str = "AZURE_CONFIG_DIR";

/// Default Azure CLI config directory
const DEFAULT_AZURE_CONFIG_DIR: &str = "~/.azure";
/// File name of the Azure CLI profile inside its config directory
const PROFILE_FILE_NAME: &str = "azureProfile.json";

#[cfg(not(windows))]
const DEFAULT_ALIAS_CONFIG_PATH: &str = "~/.config/azcx/config.json";
#[cfg(windows)]
const DEFAULT_ALIAS_CONFIG_PATH: &str = "$APPDATA/azcx/config.json";
#[cfg(windows)]
const FALLBACK_ALIAS_CONFIG_PATH: &str = "~/AppData/Roaming/azcx/config.json";

/// Resolves the Azure profile path.
///
/// Precedence: explicit argument, then `$AZURE_CONFIG_DIR/azureProfile.json`,
/// then `~/.azure/azureProfile.json`.
///
/// # Examples
///
/// ```
/// use azcx_core::config::get_profile_path;
///
/// let custom = get_profile_path(&Some("/tmp/profile.json".to_string()));
/// assert_eq!(custom.to_str(), Some("/tmp/profile.json"));
/// ```
pub fn get_profile_path(profile_path_arg: &Option<String>) -> PathBuf {
    let azure_config_dir = std::env::var(AZURE_CONFIG_DIR_VAR).ok();
    resolve_profile_path(profile_path_arg, azure_config_dir.as_deref())
}

fn resolve_profile_path(
    profile_path_arg: &Option<String>,
    azure_config_dir: Option<&str>,
) -> PathBuf {
    if let Some(profile_path) = profile_path_arg {
        return PathBuf::from(shellexpand::tilde(profile_path).as_ref());
    }

    let config_dir = match azure_config_dir {
        Some(dir) if !dir.is_empty() => {
            debug!("Using {AZURE_CONFIG_DIR_VAR}=`{dir}`");
            dir
        }
        _ => DEFAULT_AZURE_CONFIG_DIR,
    };

    PathBuf::from(shellexpand::tilde(config_dir).as_ref()).join(PROFILE_FILE_NAME)
}

/// Resolves the alias registry path.
///
/// If a custom path is provided, uses that path. Otherwise, uses the
/// platform default (`~/.config/azcx/config.json`, or
/// `%APPDATA%\azcx\config.json` on Windows).
pub fn get_alias_config_path(config_path_arg: &Option<String>) -> PathBuf {
    if let Some(config_path) = config_path_arg {
        return PathBuf::from(shellexpand::tilde(config_path).as_ref());
    }

    default_alias_config_path()
}

#[cfg(not(windows))]
fn default_alias_config_path() -> PathBuf {
    PathBuf::from(shellexpand::tilde(DEFAULT_ALIAS_CONFIG_PATH).as_ref())
}

#[cfg(windows)]
fn default_alias_config_path() -> PathBuf {
    match shellexpand::full(DEFAULT_ALIAS_CONFIG_PATH) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(FALLBACK_ALIAS_CONFIG_PATH).as_ref()),
    }
}
