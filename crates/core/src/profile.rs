//! The Azure CLI profile document and its subscription records.
//!
//! The profile is owned by the Azure CLI, so azcx only understands a handful
//! of fields: each subscription's `id`, `name` and `isDefault`. Everything else
//! (tenant ids, user info, `installationId`, fields added by future CLI
//! versions) is kept in ordered field maps and written back untouched.

use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use log::{debug, info};
use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::file_handling::{strip_bom, write_whole_file};

/// Top-level key holding the subscription array
pub const SUBSCRIPTIONS_KEY: &str = "subscriptions";

const ID_KEY: &str = "id";
const NAME_KEY: &str = "name";
const IS_DEFAULT_KEY: &str = "isDefault";

const PROFILE_FILE_DESCRIPTION: &str = "Azure profile";

/// One switchable subscription.
///
/// A typed view over the record's full field map, so unrecognised fields
/// survive a load/save round trip in their original order.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    fields: Map<String, Value>,
}

impl Subscription {
    /// Builds a record carrying only the fields azcx understands.
    pub fn new(id: &str, name: &str, is_default: bool) -> Self {
        let mut fields = Map::new();
        fields.insert(ID_KEY.to_string(), Value::String(id.to_string()));
        fields.insert(NAME_KEY.to_string(), Value::String(name.to_string()));
        fields.insert(IS_DEFAULT_KEY.to_string(), Value::Bool(is_default));
        Self { fields }
    }

    fn from_value(value: Value, position: usize) -> std::result::Result<Self, String> {
        let Value::Object(fields) = value else {
            return Err(format!("subscription #{position} is not an object"));
        };

        for key in [ID_KEY, NAME_KEY] {
            match fields.get(key) {
                None | Some(Value::Null | Value::String(_)) => {}
                Some(other) => {
                    return Err(format!(
                        "subscription #{position} has a non-string `{key}`: {other}"
                    ))
                }
            }
        }

        match fields.get(IS_DEFAULT_KEY) {
            None | Some(Value::Null | Value::Bool(_)) => {}
            Some(other) => {
                return Err(format!(
                    "subscription #{position} has a non-boolean `{IS_DEFAULT_KEY}`: {other}"
                ))
            }
        }

        Ok(Self { fields })
    }

    fn string_field(&self, key: &str) -> &str {
        self.fields.get(key).and_then(Value::as_str).unwrap_or("")
    }

    #[must_use]
    pub fn id(&self) -> &str {
        self.string_field(ID_KEY)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.string_field(NAME_KEY)
    }

    #[must_use]
    pub fn is_default(&self) -> bool {
        self.fields
            .get(IS_DEFAULT_KEY)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn set_default(&mut self, is_default: bool) {
        self.fields
            .insert(IS_DEFAULT_KEY.to_string(), Value::Bool(is_default));
    }

    /// Case-insensitive match against either the name or the id.
    #[must_use]
    pub fn matches(&self, name_or_id: &str) -> bool {
        let wanted = name_or_id.to_lowercase();
        self.name().to_lowercase() == wanted || self.id().to_lowercase() == wanted
    }
}

impl Display for Subscription {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{} ({})", self.name(), self.id())
    }
}

/// The whole profile document.
///
/// `fields` is the original top-level object. While loaded, the
/// `subscriptions` slot holds a placeholder so its position is remembered;
/// the live records are spliced back in when serialising.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    fields: Map<String, Value>,
    subscriptions: Vec<Subscription>,
    /// The file had `"subscriptions": null`
    null_subscriptions: bool,
}

impl Profile {
    /// A profile with no top-level fields besides its subscriptions.
    pub fn new(subscriptions: Vec<Subscription>) -> Self {
        let mut fields = Map::new();
        fields.insert(SUBSCRIPTIONS_KEY.to_string(), Value::Null);
        Self {
            fields,
            subscriptions,
            null_subscriptions: false,
        }
    }

    /// Parses a profile, tolerating a leading byte order mark.
    ///
    /// `path` is only used for error messages.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if the content is not JSON and
    /// [`Error::MalformedProfile`] if it is JSON of the wrong shape.
    pub fn from_json(contents: &[u8], path: &str) -> Result<Self> {
        let root: Value = serde_json::from_slice(strip_bom(contents))
            .map_err(|e| Error::json_error("parsing", PROFILE_FILE_DESCRIPTION, path, e))?;

        let Value::Object(mut fields) = root else {
            return Err(Error::malformed_profile(path, "top level is not an object"));
        };

        let null_subscriptions = matches!(fields.get(SUBSCRIPTIONS_KEY), Some(Value::Null));

        let subscriptions = match fields.get_mut(SUBSCRIPTIONS_KEY) {
            None => Vec::new(),
            Some(slot) => match slot.take() {
                Value::Null => Vec::new(),
                Value::Array(values) => values
                    .into_iter()
                    .enumerate()
                    .map(|(position, value)| Subscription::from_value(value, position))
                    .collect::<std::result::Result<Vec<_>, _>>()
                    .map_err(|reason| Error::malformed_profile(path, reason))?,
                _ => {
                    return Err(Error::malformed_profile(
                        path,
                        format!("`{SUBSCRIPTIONS_KEY}` is not an array"),
                    ))
                }
            },
        };

        Ok(Self {
            fields,
            subscriptions,
            null_subscriptions,
        })
    }

    /// Serialises the profile as pretty-printed JSON, without a byte order mark.
    pub fn to_json(&self, path: &str) -> Result<String> {
        let mut fields = self.fields.clone();

        // An untouched `null` slot is written back as `null`
        let splice = !self.subscriptions.is_empty()
            || (fields.contains_key(SUBSCRIPTIONS_KEY) && !self.null_subscriptions);

        if splice {
            let records = self
                .subscriptions
                .iter()
                .map(|s| Value::Object(s.fields.clone()))
                .collect();
            // preserve_order keeps an existing key at its original position
            fields.insert(SUBSCRIPTIONS_KEY.to_string(), Value::Array(records));
        }

        serde_json::to_string_pretty(&Value::Object(fields))
            .map_err(|e| Error::json_error("writing", PROFILE_FILE_DESCRIPTION, path, e))
    }

    #[must_use]
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Subscription names in profile order, as offered to the selector.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.subscriptions
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    /// The subscription currently marked as default, if any.
    #[must_use]
    pub fn current_subscription(&self) -> Option<&Subscription> {
        self.subscriptions.iter().find(|s| s.is_default())
    }

    /// Marks the first subscription matching `name_or_id` as the default and
    /// every other subscription as not default.
    ///
    /// Only the first match in profile order is selected, so duplicated names
    /// or ids still end with a single default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SubscriptionNotFound`] if nothing matches. The profile
    /// is not modified in that case.
    pub fn set_default(&mut self, name_or_id: &str) -> Result<&Subscription> {
        let selected = self
            .subscriptions
            .iter()
            .position(|s| s.matches(name_or_id))
            .ok_or_else(|| Error::SubscriptionNotFound(name_or_id.to_string()))?;

        for (index, subscription) in self.subscriptions.iter_mut().enumerate() {
            subscription.set_default(index == selected);
        }

        Ok(&self.subscriptions[selected])
    }
}

/// Loads and saves the profile document.
pub trait ProfileStore {
    /// # Errors
    ///
    /// I/O errors (rendered with an `az login` hint) and parse errors.
    fn load(&self) -> Result<Profile>;

    /// # Errors
    ///
    /// I/O errors writing the backing file.
    fn save(&self, profile: &Profile) -> Result<()>;
}

/// The Azure CLI's `azureProfile.json`.
#[derive(Debug, Clone)]
pub struct FileProfileStore {
    path: PathBuf,
}

impl FileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ProfileStore for FileProfileStore {
    fn load(&self) -> Result<Profile> {
        let path = self.path.display().to_string();
        debug!("Loading Azure profile from `{path}`");

        let contents = std::fs::read(&self.path).map_err(|original| Error::ProfileUnreadable {
            path: path.clone(),
            original,
        })?;

        let profile = Profile::from_json(&contents, &path)?;
        debug!("Loaded {} subscriptions", profile.subscriptions().len());
        Ok(profile)
    }

    fn save(&self, profile: &Profile) -> Result<()> {
        let path = self.path.display().to_string();
        let contents = profile.to_json(&path)?;

        write_whole_file(PROFILE_FILE_DESCRIPTION, &self.path, contents.as_bytes(), false)?;
        info!("Saved Azure profile to `{path}`");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile_from(value: Value) -> Profile {
        Profile::from_json(value.to_string().as_bytes(), "test").unwrap()
    }

    fn dev_prod_profile() -> Profile {
        Profile::new(vec![
            Subscription::new("11111111-aaaa", "dev", true),
            Subscription::new("22222222-bbbb", "prod", false),
        ])
    }

    fn defaults(profile: &Profile) -> Vec<bool> {
        profile
            .subscriptions()
            .iter()
            .map(Subscription::is_default)
            .collect()
    }

    #[test]
    fn test_current_subscription() {
        let profile = dev_prod_profile();
        assert_eq!(profile.current_subscription().unwrap().name(), "dev");
    }

    #[test]
    fn test_current_subscription_none() {
        let profile = Profile::new(vec![Subscription::new("1", "dev", false)]);
        assert!(profile.current_subscription().is_none());
    }

    #[test]
    fn test_set_default_by_name() {
        let mut profile = dev_prod_profile();
        let selected = profile.set_default("prod").unwrap();
        assert_eq!(selected.name(), "prod");
        assert_eq!(defaults(&profile), vec![false, true]);
    }

    #[test]
    fn test_set_default_case_insensitive_name_and_id() {
        let mut profile = dev_prod_profile();
        profile.set_default("PROD").unwrap();
        assert_eq!(defaults(&profile), vec![false, true]);

        profile.set_default("11111111-AAAA").unwrap();
        assert_eq!(defaults(&profile), vec![true, false]);
    }

    #[test]
    fn test_set_default_not_found_leaves_profile_unchanged() {
        let mut profile = dev_prod_profile();
        let before = profile.clone();

        let result = profile.set_default("staging");

        assert!(matches!(result, Err(Error::SubscriptionNotFound(ref t)) if t == "staging"));
        assert_eq!(profile, before);
    }

    #[test]
    fn test_set_default_duplicate_names_first_match_wins() {
        let mut profile = Profile::new(vec![
            Subscription::new("1", "other", true),
            Subscription::new("2", "shared", false),
            Subscription::new("3", "Shared", false),
            Subscription::new("shared", "by-id", false),
        ]);

        let selected = profile.set_default("shared").unwrap();

        assert_eq!(selected.id(), "2");
        assert_eq!(defaults(&profile), vec![false, true, false, false]);
    }

    #[test]
    fn test_set_default_always_leaves_exactly_one_default() {
        let mut profile = Profile::new(vec![
            Subscription::new("1", "a", true),
            Subscription::new("2", "b", true),
            Subscription::new("3", "c", false),
        ]);

        for token in ["c", "a", "b", "3"] {
            profile.set_default(token).unwrap();
            let count = profile
                .subscriptions()
                .iter()
                .filter(|s| s.is_default())
                .count();
            assert_eq!(count, 1, "after switching to {token}");
        }
    }

    #[test]
    fn test_set_default_marks_records_missing_flag() {
        let mut profile = profile_from(json!({
            "subscriptions": [{"id": "1", "name": "a"}, {"id": "2", "name": "b"}]
        }));

        profile.set_default("b").unwrap();

        let written: Value = serde_json::from_str(&profile.to_json("test").unwrap()).unwrap();
        assert_eq!(written["subscriptions"][0]["isDefault"], json!(false));
        assert_eq!(written["subscriptions"][1]["isDefault"], json!(true));
    }

    #[test]
    fn test_round_trip_preserves_unknown_fields() {
        let original = json!({
            "installationId": "abc-123",
            "subscriptions": [
                {
                    "id": "1",
                    "name": "dev",
                    "state": "Enabled",
                    "user": {"name": "me@example.com", "type": "user"},
                    "isDefault": true,
                    "tenantId": "t-1",
                    "managedByTenants": []
                }
            ],
            "futureField": [1, 2, 3]
        });

        let profile = profile_from(original.clone());
        let written: Value = serde_json::from_str(&profile.to_json("test").unwrap()).unwrap();

        assert_eq!(written, original);
    }

    #[test]
    fn test_round_trip_preserves_key_order() {
        let text = concat!(
            r#"{"zeta":1,"#,
            r#""subscriptions":[{"name":"a","zz":true,"id":"1","isDefault":false}],"#,
            r#""alpha":2}"#
        );
        let profile = Profile::from_json(text.as_bytes(), "test").unwrap();

        let written: Value = serde_json::from_str(&profile.to_json("test").unwrap()).unwrap();
        let top_keys: Vec<&String> = written.as_object().unwrap().keys().collect();
        assert_eq!(top_keys, vec!["zeta", "subscriptions", "alpha"]);

        let record_keys: Vec<&String> = written["subscriptions"][0]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(record_keys, vec!["name", "zz", "id", "isDefault"]);
    }

    #[test]
    fn test_switch_only_changes_default_flags() {
        let original = json!({
            "installationId": "abc",
            "subscriptions": [
                {"id": "1", "name": "dev", "isDefault": true, "tenantId": "t"},
                {"id": "2", "name": "prod", "isDefault": false, "tenantId": "t"}
            ]
        });
        let mut profile = profile_from(original.clone());

        profile.set_default("prod").unwrap();

        let mut expected = original;
        expected["subscriptions"][0]["isDefault"] = json!(false);
        expected["subscriptions"][1]["isDefault"] = json!(true);
        let written: Value = serde_json::from_str(&profile.to_json("test").unwrap()).unwrap();
        assert_eq!(written, expected);
    }

    #[test]
    fn test_from_json_strips_bom() {
        let mut contents = vec![0xEF, 0xBB, 0xBF];
        let json = br#"{"subscriptions":[{"id":"1","name":"dev","isDefault":true}]}"#;
        contents.extend_from_slice(json);

        let profile = Profile::from_json(&contents, "test").unwrap();
        assert_eq!(profile.names(), vec!["dev"]);
    }

    #[test]
    fn test_to_json_has_no_bom() {
        let profile = dev_prod_profile();
        let written = profile.to_json("test").unwrap();
        assert!(written.starts_with('{'));
    }

    #[test]
    fn test_from_json_invalid_json() {
        let result = Profile::from_json(b"{not json", "test");
        assert!(matches!(result, Err(Error::Json { .. })));
    }

    #[test]
    fn test_from_json_root_not_object() {
        let result = Profile::from_json(b"[]", "test");
        assert!(matches!(result, Err(Error::MalformedProfile { .. })));
    }

    #[test]
    fn test_from_json_subscriptions_not_array() {
        let result = Profile::from_json(br#"{"subscriptions": {}}"#, "test");
        assert!(matches!(result, Err(Error::MalformedProfile { .. })));
    }

    #[test]
    fn test_from_json_wrongly_typed_name() {
        let result = Profile::from_json(br#"{"subscriptions": [{"id": "1", "name": 5}]}"#, "test");
        assert!(matches!(result, Err(Error::MalformedProfile { .. })));
    }

    #[test]
    fn test_from_json_wrongly_typed_is_default() {
        let result = Profile::from_json(
            br#"{"subscriptions": [{"id": "1", "name": "a", "isDefault": "yes"}]}"#,
            "test",
        );
        assert!(matches!(result, Err(Error::MalformedProfile { .. })));
    }

    #[test]
    fn test_from_json_missing_fields_default() {
        let profile = profile_from(json!({"subscriptions": [{"state": "Enabled"}]}));
        let subscription = &profile.subscriptions()[0];
        assert_eq!(subscription.id(), "");
        assert_eq!(subscription.name(), "");
        assert!(!subscription.is_default());
    }

    #[test]
    fn test_from_json_without_subscriptions() {
        let profile = profile_from(json!({"installationId": "abc"}));
        assert!(profile.subscriptions().is_empty());

        let written: Value = serde_json::from_str(&profile.to_json("test").unwrap()).unwrap();
        assert_eq!(written, json!({"installationId": "abc"}));
    }

    #[test]
    fn test_null_subscriptions_written_back_as_null() {
        let profile = profile_from(json!({"installationId": "x", "subscriptions": null}));
        assert!(profile.subscriptions().is_empty());

        let written: Value = serde_json::from_str(&profile.to_json("test").unwrap()).unwrap();
        assert_eq!(written, json!({"installationId": "x", "subscriptions": null}));
    }

    #[test]
    fn test_subscription_display() {
        let subscription = Subscription::new("1234", "dev", false);
        assert_eq!(format!("{subscription}"), "dev (1234)");
    }
}
