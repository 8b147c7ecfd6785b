//! End-to-end tests for the command handlers against real files.

use azcx_cli::cli_args::Args;
use azcx_cli::commands::{self, AliasAction};
use azcx_cli::fuzzy_selection::{update, SelectorEvent, SelectorState, Step};
use azcx_core::aliases::FileAliasStore;
use azcx_core::error::{Error, Result};
use azcx_core::profile::FileProfileStore;
use clap::Parser;
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    profile_path: PathBuf,
    config_path: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let profile_path = dir.path().join("azureProfile.json");
        let config_path = dir.path().join(".config").join("azcx").join("config.json");

        let profile = json!({
            "installationId": "abc",
            "subscriptions": [
                {"id": "sub-1", "name": "my-dev-subscription", "isDefault": true},
                {"id": "sub-2", "name": "my-production-subscription", "isDefault": false},
                {"id": "sub-3", "name": "staging", "isDefault": false, "state": "Enabled"}
            ]
        });
        fs::write(&profile_path, serde_json::to_string_pretty(&profile).unwrap()).unwrap();

        Self {
            _dir: dir,
            profile_path,
            config_path,
        }
    }

    fn profiles(&self) -> FileProfileStore {
        FileProfileStore::new(&self.profile_path)
    }

    fn aliases(&self) -> FileAliasStore {
        FileAliasStore::new(&self.config_path)
    }

    fn run(&self, f: impl FnOnce(&Self, &mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(self, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn config_json(&self) -> Value {
        serde_json::from_str(&fs::read_to_string(&self.config_path).unwrap()).unwrap()
    }
}

/// Drives the selector state machine with scripted key presses.
fn scripted_selector(events: Vec<SelectorEvent>) -> impl FnOnce(&[String]) -> Result<String> {
    move |names| {
        let mut state = SelectorState::new(names.to_vec());
        for event in events {
            match update(state, event) {
                Step::Continue(next) => state = next,
                Step::Done(selection) => return Ok(selection),
            }
        }
        Ok(String::new())
    }
}

#[test]
fn test_current_and_list() {
    let ws = Workspace::new();

    assert_eq!(
        ws.run(|ws, out| commands::show_current(&ws.profiles(), out)),
        "my-dev-subscription (sub-1)\n"
    );
    assert_eq!(
        ws.run(|ws, out| commands::list_subscriptions(&ws.profiles(), out)),
        "* my-dev-subscription\n  my-production-subscription\n  staging\n"
    );
}

#[test]
fn test_alias_workflow() {
    let ws = Workspace::new();

    let created = ws.run(|ws, out| {
        commands::manage_aliases(
            &ws.aliases(),
            AliasAction::Create("prod=my-production-subscription".to_string()),
            out,
        )
    });
    assert_eq!(created, "Created alias 'prod' -> 'my-production-subscription'\n");
    assert_eq!(
        ws.config_json(),
        json!({"aliases": {"prod": "my-production-subscription"}})
    );

    let switched =
        ws.run(|ws, out| commands::switch_to(&ws.profiles(), &ws.aliases(), "prod", out));
    assert_eq!(switched, "Switched to my-production-subscription\n");
    assert_eq!(
        ws.run(|ws, out| commands::list_subscriptions(&ws.profiles(), out)),
        "  my-dev-subscription\n* my-production-subscription\n  staging\n"
    );

    let deleted = ws.run(|ws, out| {
        commands::manage_aliases(&ws.aliases(), AliasAction::Delete("prod".to_string()), out)
    });
    assert_eq!(deleted, "Deleted alias 'prod'\n");
    assert_eq!(
        ws.config_json(),
        json!({"previousSubscription": "my-dev-subscription"})
    );
    assert_eq!(
        ws.run(|ws, out| commands::manage_aliases(&ws.aliases(), AliasAction::List, out)),
        "No aliases configured\n"
    );
}

#[test]
fn test_switch_back_and_forth() {
    let ws = Workspace::new();

    ws.run(|ws, out| commands::switch_to(&ws.profiles(), &ws.aliases(), "staging", out));
    let back = ws.run(|ws, out| commands::switch_to(&ws.profiles(), &ws.aliases(), "-", out));

    assert_eq!(back, "Switched to my-dev-subscription\n");
    assert_eq!(
        ws.config_json()["previousSubscription"],
        json!("staging")
    );
}

#[test]
fn test_interactive_selection_switches() {
    let ws = Workspace::new();

    let mut events: Vec<SelectorEvent> = "stag".chars().map(SelectorEvent::Input).collect();
    events.push(SelectorEvent::Confirm);

    let output = ws.run(|ws, out| {
        commands::switch_interactive(&ws.profiles(), &ws.aliases(), scripted_selector(events), out)
    });
    assert_eq!(output, "Switched to staging\n");
}

#[test]
fn test_interactive_cancel_changes_nothing() {
    let ws = Workspace::new();
    let before = fs::read(&ws.profile_path).unwrap();
    let events = vec![SelectorEvent::Down, SelectorEvent::Cancel];

    let output = ws.run(|ws, out| {
        commands::switch_interactive(&ws.profiles(), &ws.aliases(), scripted_selector(events), out)
    });

    assert_eq!(output, "");
    assert_eq!(fs::read(&ws.profile_path).unwrap(), before);
    assert!(!ws.config_path.exists());
}

#[test]
fn test_empty_explicit_target_is_rejected() {
    let ws = Workspace::new();
    let before = fs::read(&ws.profile_path).unwrap();
    let args = Args::parse_from(["azcx", ""]);
    let target = args.target.unwrap_or_default();
    let mut out = Vec::new();

    let result = commands::switch_to(&ws.profiles(), &ws.aliases(), &target, &mut out);

    assert!(matches!(result, Err(Error::EmptyTarget)));
    assert!(out.is_empty());
    assert_eq!(fs::read(&ws.profile_path).unwrap(), before);
    assert!(!ws.config_path.exists());
}

#[test]
fn test_unknown_target_fails_without_output() {
    let ws = Workspace::new();
    let mut out = Vec::new();

    let result = commands::switch_to(&ws.profiles(), &ws.aliases(), "nope", &mut out);

    assert!(matches!(result, Err(Error::SubscriptionNotFound(ref name)) if name == "nope"));
    assert!(out.is_empty());
    assert!(!ws.config_path.exists());
}

#[test]
fn test_missing_profile_mentions_login() {
    let dir = TempDir::new().unwrap();
    let profiles = FileProfileStore::new(dir.path().join("azureProfile.json"));

    let error = commands::show_current(&profiles, &mut Vec::new()).unwrap_err();
    assert!(error.to_string().contains("az login"));
}
