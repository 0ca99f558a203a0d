//! Rule store: the list of named pattern rules the user can toggle.
//!
//! Rules are plain data. Their patterns are shown in the UI but nothing in
//! this crate compiles or runs them.

use crate::file_utils::{generate_unique_id, random_color};
use crate::schema::Rule;
use rand::Rng;

/// Built-in rules as `(id, name, pattern, color)`.
///
/// The ids double as the categories of the scanner's sample data.
pub const DEFAULT_RULES: [(&str, &str, &str, &str); 4] = [
    ("name", "Name", r"[A-Z][a-z]+ [A-Z][a-z]+", "#ef4444"),
    (
        "trade",
        "Trade Name",
        r"[A-Z][A-Z\s]+(?:PVT|LTD|LLP|INC)",
        "#f59e0b",
    ),
    (
        "gstin",
        "GSTIN",
        r"\d{2}[A-Z]{5}\d{4}[A-Z]{1}[A-Z\d]{1}[Z]{1}[A-Z\d]{1}",
        "#10b981",
    ),
    ("arn", "ARN", r"ARN-[A-Z0-9]{10}", "#8b5cf6"),
];

pub fn default_rules() -> Vec<Rule> {
    DEFAULT_RULES
        .iter()
        .map(|(id, name, pattern, color)| Rule {
            id: (*id).into(),
            name: (*name).into(),
            pattern: (*pattern).into(),
            enabled: true,
            color: (*color).into(),
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    rules: Vec<Rule>,
}

impl RuleStore {
    pub fn with_defaults() -> Self {
        Self {
            rules: default_rules(),
        }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|r| r.id == id)
    }

    /// Flips the enabled flag. Returns `false` if no rule has this id.
    pub fn toggle(&mut self, id: &str) -> bool {
        match self.rules.iter_mut().find(|r| r.id == id) {
            Some(rule) => {
                rule.enabled = !rule.enabled;
                true
            }
            None => false,
        }
    }

    /// Appends an enabled rule with a random id and color.
    ///
    /// Returns `None` without touching the store when either field is empty.
    /// The pattern is stored as typed; it is not validated.
    pub fn add<R: Rng + ?Sized>(&mut self, name: &str, pattern: &str, rng: &mut R) -> Option<&Rule> {
        if name.is_empty() || pattern.is_empty() {
            return None;
        }
        let id = generate_unique_id(rng, |candidate| self.find(candidate).is_some());
        let color = random_color(rng);
        self.rules.push(Rule {
            id,
            name: name.to_string(),
            pattern: pattern.to_string(),
            enabled: true,
            color,
        });
        self.rules.last()
    }

    /// Deletes the rule with this id. Returns `false` if it did not exist.
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|r| r.id != id);
        self.rules.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_defaults() {
        let store = RuleStore::with_defaults();
        let ids: Vec<_> = store.rules().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["name", "trade", "gstin", "arn"]);
        assert!(store.rules().iter().all(|r| r.enabled));
        assert_eq!(store.find("gstin").unwrap().name, "GSTIN");
        assert_eq!(store.find("arn").unwrap().pattern, r"ARN-[A-Z0-9]{10}");
        assert_eq!(store.find("name").unwrap().color, "#ef4444");
    }

    #[test]
    fn test_toggle_flips_only_target() {
        let mut store = RuleStore::with_defaults();
        assert!(store.toggle("trade"));
        assert!(!store.find("trade").unwrap().enabled);
        assert!(store.find("name").unwrap().enabled);

        assert!(store.toggle("trade"));
        assert!(store.find("trade").unwrap().enabled);
    }

    #[test]
    fn test_toggle_unknown_is_noop() {
        let mut store = RuleStore::with_defaults();
        assert!(!store.toggle("missing"));
        assert!(store.rules().iter().all(|r| r.enabled));
    }

    #[test]
    fn test_add_rule() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut store = RuleStore::with_defaults();
        let added = store.add("Phone Number", r"\d{10}", &mut rng).cloned().unwrap();

        assert_eq!(store.len(), 5);
        assert_eq!(added.name, "Phone Number");
        assert_eq!(added.pattern, r"\d{10}");
        assert!(added.enabled);
        assert_eq!(added.id.len(), 7);
        assert!(added.color.starts_with('#'));
        assert_eq!(store.rules().last().unwrap(), &added);
    }

    #[test]
    fn test_add_accepts_unparseable_pattern_and_duplicate_name() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut store = RuleStore::with_defaults();
        assert!(store.add("Name", "([unclosed", &mut rng).is_some());
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_add_ignores_empty_input() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut store = RuleStore::with_defaults();
        assert!(store.add("", r"\d+", &mut rng).is_none());
        assert!(store.add("Phone", "", &mut rng).is_none());
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn test_remove() {
        let mut store = RuleStore::with_defaults();
        assert!(store.remove("name"));
        assert!(store.find("name").is_none());
        assert_eq!(store.len(), 3);
        assert!(!store.remove("name"));
    }

    #[test]
    fn test_added_ids_are_unique() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut store = RuleStore::default();
        for i in 0..100 {
            store.add(&format!("rule {}", i), "x", &mut rng);
        }
        let mut ids: Vec<_> = store.rules().iter().map(|r| r.id.clone()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 100);
    }
}
