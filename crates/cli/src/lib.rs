//! azcx CLI Library
//!
//! This crate provides the command-line interface for azcx, a fast Azure
//! subscription switcher in the spirit of `kubectx`. It parses arguments,
//! runs the interactive fuzzy finder, and prints the results of each command.
//!
//! # Key Features
//!
//! - **Interactive Selection**: Full-screen fuzzy finder over subscription names
//! - **Direct Switching**: Switch by name, id, alias, or `-` for the previous one
//! - **Aliases**: Short names for long subscription names
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`commands`]: One handler per invocation, writing to any [`std::io::Write`]
//! - [`fuzzy_selection`]: The terminal selector and its pure state machine
//!
//! # Examples
//!
//! ```bash
//! # Interactive mode - shows the fuzzy finder
//! azcx
//!
//! # Switch by name, id or alias
//! azcx my-subscription
//!
//! # Back to the previous subscription
//! azcx -
//!
//! # Show or list
//! azcx -c
//! azcx -l
//!
//! # Aliases
//! azcx alias prod=my-production-subscription
//! azcx alias -d prod
//! ```

pub mod cli_args;
pub mod commands;
pub mod fuzzy_selection;
