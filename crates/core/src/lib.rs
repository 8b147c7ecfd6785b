//! azcx Core Library
//!
//! This crate provides the core functionality for azcx, a fast Azure
//! subscription context switcher in the spirit of `kubectx`. It reads and
//! rewrites the Azure CLI's own profile so that exactly one subscription is
//! the default, and keeps a small config of aliases and the previously
//! active subscription.
//!
//! # Key Features
//!
//! - **Profile Handling**: Load/save `azureProfile.json`, keeping every field
//!   azcx doesn't understand
//! - **Aliases**: Short names for long subscription names, one level deep
//! - **Switching**: Switch by name, id, alias or `-` (previous subscription)
//! - **Refresh**: Ask the Azure CLI to re-fetch the subscription list
//!
//! # Examples
//!
//! Switching subscriptions using the default file locations:
//!
//! ```no_run
//! use azcx_core::aliases::FileAliasStore;
//! use azcx_core::config::{get_alias_config_path, get_profile_path};
//! use azcx_core::profile::FileProfileStore;
//! use azcx_core::switcher::Switcher;
//!
//! let profiles = FileProfileStore::new(get_profile_path(&None));
//! let aliases = FileAliasStore::new(get_alias_config_path(&None));
//! let outcome = Switcher::new(&profiles, &aliases).switch("my-subscription")?;
//! println!("{outcome:?}");
//! # Ok::<(), azcx_core::error::Error>(())
//! ```

pub mod aliases;
pub mod config;
pub mod error;
pub mod execution;
pub mod file_handling;
pub mod profile;
pub mod switcher;
