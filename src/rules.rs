//! Label rule table for the PCB WACV 2019 dataset
//!
//! A label is run through three checks in a fixed order: category normalization,
//! removal, then substitution. Every check looks at the original label text and
//! none of them short-circuits the others, so a later match overrides an earlier
//! one and removal overrides everything.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{NormalizeError, Result};

const CATEGORY_PREFIXES: &[&str] = &[
    "resistor",
    "capacitor",
    "pins",
    "connector",
    "pads",
    "ic",
    "transistor",
    "diode",
    "jumper",
    "led",
    "button",
    "switch",
    "inductor",
    "switch",
    "clock",
    "potentiometer",
    "transformer",
    "fuse",
    "buzzer",
    "display",
    "heatsink",
    "battery",
];

const REMOVAL_PREFIXES: &[&str] = &["text", "\"component text", "unknown"];

const SUBSTITUTIONS: &[(&str, &str)] = &[
    ("\"diode zener array\"", "diode_zener_array"),
    ("\"resistor network\"", "resistor_network"),
    ("\"resistor jumper\"", "resistor_jumper"),
    ("\"capacitor jumper\"", "capacitor_jumper"),
    ("\"emi filter\"", "emi_filter"),
    ("\"test point\"", "test_point"),
    ("\"ferrite bead\"", "ferrite_bead"),
    ("\"zener diode\"", "zener_diode"),
    ("\"electrolytic capacitor\"", "electrolytic_capacitor"),
];

/// Immutable label vocabulary, built once and passed to every conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTable {
    pub category_prefixes: Vec<String>,
    pub removal_prefixes: Vec<String>,
    /// Ordered `(prefix, replacement)` pairs; the first matching prefix wins.
    pub substitutions: Vec<(String, String)>,
}

/// Outcome of running one label through the rule pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelAction {
    Keep,
    Rename(String),
    Remove,
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::pcb_wacv_2019()
    }
}

impl RuleTable {
    /// The vocabulary of the PCB WACV 2019 dataset.
    pub fn pcb_wacv_2019() -> Self {
        Self {
            category_prefixes: CATEGORY_PREFIXES.iter().map(|s| s.to_string()).collect(),
            removal_prefixes: REMOVAL_PREFIXES.iter().map(|s| s.to_string()).collect(),
            substitutions: SUBSTITUTIONS
                .iter()
                .map(|(from, to)| (from.to_string(), to.to_string()))
                .collect(),
        }
    }

    /// Load a rule table from a JSON file with the same field names.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| NormalizeError::io(path, e))?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| NormalizeError::Rules {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Run `label` through category, removal and substitution in that order.
    ///
    /// Empty labels are always kept. The returned action never renames a label
    /// to itself.
    pub fn apply(&self, label: &str) -> LabelAction {
        if label.is_empty() {
            return LabelAction::Keep;
        }

        let mut renamed: Option<String> = None;

        if self.matches_category(label) {
            if let Some(token) = label.split_whitespace().next() {
                renamed = Some(token.to_string());
            }
        }

        if self.matches_removal(label) {
            return LabelAction::Remove;
        }

        if let Some(replacement) = self.substitution_for(label) {
            renamed = Some(replacement.to_string());
        }

        match renamed {
            Some(new_label) if new_label != label => LabelAction::Rename(new_label),
            _ => LabelAction::Keep,
        }
    }

    pub fn matches_category(&self, label: &str) -> bool {
        self.category_prefixes
            .iter()
            .any(|prefix| label.starts_with(prefix.as_str()))
    }

    pub fn matches_removal(&self, label: &str) -> bool {
        self.removal_prefixes
            .iter()
            .any(|prefix| label.starts_with(prefix.as_str()))
    }

    /// First replacement in table order whose prefix starts `label`.
    pub fn substitution_for(&self, label: &str) -> Option<&str> {
        self.substitutions
            .iter()
            .find(|(prefix, _)| label.starts_with(prefix.as_str()))
            .map(|(_, replacement)| replacement.as_str())
    }

    /// Every label this table can produce: first tokens of the categories and
    /// the substitution targets.
    pub fn canonical_labels(&self) -> Vec<&str> {
        self.category_prefixes
            .iter()
            .filter_map(|prefix| prefix.split_whitespace().next())
            .chain(self.substitutions.iter().map(|(_, to)| to.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keeps_first_token() {
        let rules = RuleTable::default();
        assert_eq!(
            rules.apply("resistor R19"),
            LabelAction::Rename("resistor".to_string())
        );
        assert_eq!(
            rules.apply("capacitor C4 smd 0603"),
            LabelAction::Rename("capacitor".to_string())
        );
        assert_eq!(
            rules.apply("ic\tU1"),
            LabelAction::Rename("ic".to_string())
        );
        assert_eq!(rules.apply("resistor"), LabelAction::Keep);
    }

    #[test]
    fn test_category_is_prefix_not_word_match() {
        let rules = RuleTable::default();
        // "ledger" starts with "led"; only whitespace splits the label
        assert_eq!(
            rules.apply("ledger strip"),
            LabelAction::Rename("ledger".to_string())
        );
        assert_eq!(rules.apply("crystal Y1"), LabelAction::Keep);
    }

    #[test]
    fn test_removal_prefixes() {
        let rules = RuleTable::default();
        assert_eq!(rules.apply("text"), LabelAction::Remove);
        assert_eq!(rules.apply("text label near J3"), LabelAction::Remove);
        assert_eq!(rules.apply("\"component text\" 12"), LabelAction::Remove);
        assert_eq!(rules.apply("unknown"), LabelAction::Remove);
        assert_eq!(rules.apply("unknown part"), LabelAction::Remove);
    }

    #[test]
    fn test_substitution_wins_over_category() {
        let rules = RuleTable {
            category_prefixes: vec!["\"zener".to_string()],
            ..RuleTable::default()
        };
        assert_eq!(
            rules.apply("\"zener diode\" D3"),
            LabelAction::Rename("zener_diode".to_string())
        );
    }

    #[test]
    fn test_removal_wins_over_everything() {
        let rules = RuleTable {
            category_prefixes: vec!["text".to_string()],
            removal_prefixes: vec!["text".to_string()],
            substitutions: vec![("text".to_string(), "silkscreen".to_string())],
        };
        assert_eq!(rules.apply("text T1"), LabelAction::Remove);
    }

    #[test]
    fn test_substitution_first_match_in_table_order() {
        let rules = RuleTable {
            category_prefixes: vec![],
            removal_prefixes: vec![],
            substitutions: vec![
                ("\"resistor".to_string(), "resistor_any".to_string()),
                ("\"resistor network\"".to_string(), "resistor_network".to_string()),
            ],
        };
        assert_eq!(
            rules.apply("\"resistor network\" RN1"),
            LabelAction::Rename("resistor_any".to_string())
        );
    }

    #[test]
    fn test_default_substitutions() {
        let rules = RuleTable::default();
        for (from, to) in SUBSTITUTIONS {
            let label = format!("{} X1", from);
            assert_eq!(rules.apply(&label), LabelAction::Rename(to.to_string()));
        }
    }

    #[test]
    fn test_empty_and_unmatched_labels_are_kept() {
        let rules = RuleTable::default();
        assert_eq!(rules.apply(""), LabelAction::Keep);
        assert_eq!(rules.apply(" resistor R1"), LabelAction::Keep);
        assert_eq!(rules.apply("Resistor R1"), LabelAction::Keep);
    }

    #[test]
    fn test_default_table_is_idempotent() {
        let rules = RuleTable::default();
        for label in rules.canonical_labels() {
            assert_eq!(rules.apply(label), LabelAction::Keep, "label {:?}", label);
        }
    }

    #[test]
    fn test_rule_table_json_round_trip_keeps_order() {
        let rules = RuleTable::default();
        let json = serde_json::to_string(&rules).unwrap();
        let parsed: RuleTable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, rules);
        assert_eq!(parsed.substitutions[0].1, "diode_zener_array");
        assert_eq!(parsed.substitutions[8].1, "electrolytic_capacitor");
    }
}
