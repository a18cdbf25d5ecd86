//! Typed views over the `[user]` and `[authors]` sections.

use indexmap::IndexMap;
use serde::Serialize;

use crate::ini::{IniDocument, is_storable_key};

/// Section holding the resolved identity.
pub const USER_SECTION: &str = "user";

/// Section holding the author roster.
pub const AUTHORS_SECTION: &str = "authors";

/// Remember duration used when none is stored.
pub const DEFAULT_REMEMBER_MINUTES: f64 = 1.0;

/// Longest remember duration honoured, roughly nineteen centuries.
pub const MAX_REMEMBER_MINUTES: f64 = 1.0e9;

const NAME_KEY: &str = "name";
const EMAIL_KEY: &str = "email";
const EXPIRES_KEY: &str = "expires";
const REMEMBER_KEY: &str = "rememberminutes";

/// Format a number the way the store keeps it: one fractional digit.
pub fn format_fixed(value: f64) -> String {
    format!("{value:.1}")
}

/// Parse a stored number. Unparseable or non-finite values yield `None`.
pub fn parse_fixed(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Contents of the `[user]` section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserState {
    pub name: Option<String>,
    pub email: Option<String>,
    /// Unix timestamp in seconds. `None` when absent or unparseable.
    pub expires: Option<f64>,
    pub remember_minutes: f64,
}

impl Default for UserState {
    fn default() -> Self {
        Self {
            name: None,
            email: None,
            expires: None,
            remember_minutes: DEFAULT_REMEMBER_MINUTES,
        }
    }
}

impl UserState {
    /// Read the `[user]` section, defaulting anything missing or malformed.
    pub fn from_document(doc: &IniDocument) -> Self {
        Self {
            name: doc.get(USER_SECTION, NAME_KEY).map(str::to_string),
            email: doc.get(USER_SECTION, EMAIL_KEY).map(str::to_string),
            expires: doc.get(USER_SECTION, EXPIRES_KEY).and_then(parse_fixed),
            remember_minutes: doc
                .get(USER_SECTION, REMEMBER_KEY)
                .and_then(parse_fixed)
                .unwrap_or(DEFAULT_REMEMBER_MINUTES),
        }
    }

    /// Expiry timestamp, `0.0` when unknown.
    pub fn expires_at(&self) -> f64 {
        self.expires.unwrap_or(0.0)
    }

    /// Expired unless `now` is strictly before the expiry.
    pub fn is_expired(&self, now: f64) -> bool {
        now >= self.expires_at()
    }

    /// Expiry for a remember confirmed at `now`.
    ///
    /// The stored duration is clamped to `0..=MAX_REMEMBER_MINUTES` so the
    /// result stays finite and representable in the store.
    pub fn remember_until(&self, now: f64) -> f64 {
        now + 60.0 * self.remember_minutes.clamp(0.0, MAX_REMEMBER_MINUTES)
    }

    /// Write this state into the `[user]` section.
    ///
    /// `rememberminutes` is always rewritten. Unknown fields are left alone
    /// so an unparseable `expires` survives until something replaces it.
    pub fn apply_to(&self, doc: &mut IniDocument) {
        if let Some(name) = &self.name {
            doc.set(USER_SECTION, NAME_KEY, name);
        }
        if let Some(email) = &self.email {
            doc.set(USER_SECTION, EMAIL_KEY, email);
        }
        if let Some(expires) = self.expires {
            doc.set(USER_SECTION, EXPIRES_KEY, &format_fixed(expires));
        }
        doc.set(
            USER_SECTION,
            REMEMBER_KEY,
            &format_fixed(self.remember_minutes),
        );
    }
}

/// Known authors, name to email, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AuthorRoster(IndexMap<String, String>);

impl AuthorRoster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: &IniDocument) -> Self {
        Self(doc.entries(AUTHORS_SECTION))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn email_for(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Add an author unless the name is already known. Existing entries are
    /// never replaced, and names that cannot be stored as a key are skipped.
    /// Returns whether the roster grew.
    pub fn insert_if_absent(&mut self, name: &str, email: &str) -> bool {
        if self.0.contains_key(name) || !is_storable_key(name) {
            return false;
        }
        self.0.insert(name.to_string(), email.to_string());
        true
    }

    /// Write every roster entry into the `[authors]` section.
    pub fn apply_to(&self, doc: &mut IniDocument) {
        doc.add_section(AUTHORS_SECTION);
        for (name, email) in self.iter() {
            doc.set(AUTHORS_SECTION, name, email);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_section_defaults() {
        let doc = IniDocument::parse("[core]\n\tbare = false\n").unwrap();
        let user = UserState::from_document(&doc);
        assert_eq!(user, UserState::default());
        assert_eq!(user.expires_at(), 0.0);
        assert_eq!(user.remember_minutes, 1.0);
    }

    #[test]
    fn test_malformed_numbers_default() {
        let doc =
            IniDocument::parse("[user]\n\texpires = soon\n\trememberminutes = lots\n").unwrap();
        let user = UserState::from_document(&doc);
        assert_eq!(user.expires, None);
        assert_eq!(user.remember_minutes, DEFAULT_REMEMBER_MINUTES);
    }

    #[test]
    fn test_non_finite_numbers_are_rejected() {
        assert_eq!(parse_fixed("inf"), None);
        assert_eq!(parse_fixed("NaN"), None);
        assert_eq!(parse_fixed(" 12.5 "), Some(12.5));
    }

    #[test]
    fn test_fixed_point_has_one_digit() {
        assert_eq!(format_fixed(1.0), "1.0");
        assert_eq!(format_fixed(1700000000.26), "1700000000.3");
        assert_eq!(format_fixed(15.0), "15.0");
    }

    #[test]
    fn test_expiry_is_strict() {
        let user = UserState {
            expires: Some(100.0),
            ..UserState::default()
        };
        assert!(!user.is_expired(99.9));
        assert!(user.is_expired(100.0));
        assert!(user.is_expired(100.1));
    }

    #[test]
    fn test_apply_normalizes_remember_minutes() {
        let mut doc = IniDocument::parse("[user]\n\trememberminutes = 5\n").unwrap();
        let user = UserState::from_document(&doc);
        user.apply_to(&mut doc);
        assert_eq!(doc.to_string(), "[user]\n\trememberminutes = 5.0\n");
    }

    #[test]
    fn test_apply_keeps_unparseable_expires() {
        let mut doc = IniDocument::parse("[user]\n\texpires = never\n").unwrap();
        let mut user = UserState::from_document(&doc);
        user.name = Some("Alice".to_string());
        user.apply_to(&mut doc);
        assert_eq!(doc.get(USER_SECTION, "expires"), Some("never"));
        assert_eq!(doc.get(USER_SECTION, "name"), Some("Alice"));
    }

    #[test]
    fn test_roster_is_case_sensitive() {
        let mut roster = AuthorRoster::new();
        assert!(roster.insert_if_absent("Bob", "b@x.com"));
        assert!(roster.insert_if_absent("bob", "lower@x.com"));
        assert!(!roster.insert_if_absent("Bob", "other@x.com"));

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.email_for("Bob"), Some("b@x.com"));
        assert_eq!(roster.email_for("bob"), Some("lower@x.com"));
    }

    #[test]
    fn test_roster_round_trips_through_document() {
        let mut doc = IniDocument::parse("[authors]\n\tAlice = a@x.com\n").unwrap();
        let mut roster = AuthorRoster::from_document(&doc);
        roster.insert_if_absent("Bob", "b@x.com");
        roster.apply_to(&mut doc);

        assert_eq!(
            doc.to_string(),
            "[authors]\n\tAlice = a@x.com\n\tBob = b@x.com\n"
        );
        assert_eq!(
            roster.names().collect::<Vec<_>>(),
            vec!["Alice", "Bob"]
        );
    }

    #[test]
    fn test_remember_until_stays_finite() {
        let mut user = UserState {
            remember_minutes: 1.0e307,
            ..UserState::default()
        };
        let expires = user.remember_until(1_700_000_000.0);
        assert!(expires.is_finite());
        assert_eq!(expires, 1_700_000_000.0 + 60.0 * MAX_REMEMBER_MINUTES);
        assert_eq!(parse_fixed(&format_fixed(expires)), Some(expires));

        user.remember_minutes = -5.0;
        assert_eq!(user.remember_until(100.0), 100.0);

        user.remember_minutes = 2.0;
        assert_eq!(user.remember_until(100.0), 220.0);
    }

    #[test]
    fn test_roster_skips_unstorable_names() {
        let mut roster = AuthorRoster::new();
        assert!(!roster.insert_if_absent("#Bob", "b@x.com"));
        assert!(!roster.insert_if_absent("a=b", "ab@x.com"));
        assert!(!roster.insert_if_absent("", "ghost@x.com"));
        assert!(roster.insert_if_absent("Alice Smith", "a@x.com"));
        assert_eq!(roster.names().collect::<Vec<_>>(), vec!["Alice Smith"]);
    }
}
