//! Effective-suffix tables for registrable domain detection.
//!
//! The built-in table is parsed from `data/suffixes.dat`, a versioned asset
//! in Public Suffix List format embedded at compile time. A different asset
//! can be loaded at runtime with [`SuffixTable::load`], and the full compiled
//! Public Suffix List is available through [`PublicSuffixList`].

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use psl::{List, Psl};
use tracing::debug;

use crate::error::PwmError;

const BUILTIN_DATA: &str = include_str!("../../data/suffixes.dat");

static BUILTIN: Lazy<SuffixTable> = Lazy::new(|| {
    // The embedded asset is covered by tests; a broken asset degrades to
    // the two-label fallback instead of aborting.
    SuffixTable::parse(BUILTIN_DATA).unwrap_or_default()
});

/// Capability shared by every suffix source: report how many trailing labels
/// of a host form its effective suffix.
pub trait SuffixRules: Send + Sync {
    /// Number of trailing `labels` matched by the longest applicable rule,
    /// or `None` if no rule matches.
    fn suffix_len(&self, labels: &[&str]) -> Option<usize>;
}

impl<T: SuffixRules + ?Sized> SuffixRules for &T {
    fn suffix_len(&self, labels: &[&str]) -> Option<usize> {
        (**self).suffix_len(labels)
    }
}

/// How a suffix rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// All labels match literally (`co.uk`).
    Normal,
    /// Leftmost label matches anything (`*.ck`).
    Wildcard,
    /// Carves a registrable name out of a wildcard (`!www.ck`).
    Exception,
}

/// One parsed line of a suffix data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixRule {
    /// Lowercased labels, leftmost first, without `*` or `!` markers.
    pub labels: Vec<String>,
    pub kind: RuleKind,
}

impl SuffixRule {
    /// Parse a single rule such as `act.edu.au`, `*.kawasaki.jp` or `!city.kawasaki.jp`.
    ///
    /// Returns `None` when the rule text is malformed.
    pub fn parse(rule: &str) -> Option<SuffixRule> {
        let (kind, body) = if let Some(rest) = rule.strip_prefix('!') {
            (RuleKind::Exception, rest)
        } else if let Some(rest) = rule.strip_prefix("*.") {
            (RuleKind::Wildcard, rest)
        } else {
            (RuleKind::Normal, rule)
        };

        let labels: Vec<String> = body.split('.').map(str::to_lowercase).collect();
        if labels.iter().any(|l| l.is_empty() || l.contains('*') || l.contains('!')) {
            return None;
        }
        // An exception needs a label to strip and a parent to fall back to.
        if kind == RuleKind::Exception && labels.len() < 2 {
            return None;
        }

        Some(SuffixRule { labels, kind })
    }
}

#[derive(Debug, Default)]
struct Node {
    children: HashMap<String, Node>,
    terminal: bool,
    wildcard: bool,
    exception: bool,
}

/// Immutable trie of suffix rules keyed by reversed label sequence.
///
/// Lookup walks the host's labels right to left, so it costs one map lookup
/// per label no matter how many rules are loaded.
#[derive(Debug, Default)]
pub struct SuffixTable {
    root: Node,
    rules: usize,
}

impl SuffixTable {
    /// The table built from the embedded data asset, shared process-wide.
    pub fn builtin() -> &'static SuffixTable {
        &BUILTIN
    }

    /// Build a table from rules.
    pub fn from_rules<I: IntoIterator<Item = SuffixRule>>(rules: I) -> Self {
        let mut table = SuffixTable::default();
        for rule in rules {
            table.insert(rule);
        }
        table
    }

    /// Parse data in Public Suffix List format.
    ///
    /// Blank lines and `//` comments are skipped and only the first
    /// whitespace-separated token of each line is read.
    ///
    /// # Examples
    ///
    /// ```
    /// use pwmaker::{SuffixTable, SuffixRules};
    ///
    /// let table = SuffixTable::parse("// demo\nuk\nco.uk\n").unwrap();
    /// assert_eq!(table.suffix_len(&["www", "google", "co", "uk"]), Some(2));
    /// ```
    pub fn parse(data: &str) -> Result<Self, PwmError> {
        let mut rules = Vec::new();
        for (idx, line) in data.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with("//") {
                continue;
            }
            let token = line.split_whitespace().next().unwrap_or(line);
            let rule = SuffixRule::parse(token).ok_or_else(|| PwmError::InvalidSuffixRule {
                line: idx + 1,
                rule: token.to_string(),
            })?;
            rules.push(rule);
        }

        let table = SuffixTable::from_rules(rules);
        debug!(rules = table.rules, "suffix table parsed");
        Ok(table)
    }

    /// Read and parse a suffix data file.
    pub fn load(path: &Path) -> Result<Self, PwmError> {
        let data = fs::read_to_string(path)?;
        SuffixTable::parse(&data)
    }

    /// Number of rules loaded.
    pub fn len(&self) -> usize {
        self.rules
    }

    pub fn is_empty(&self) -> bool {
        self.rules == 0
    }

    fn insert(&mut self, rule: SuffixRule) {
        let mut node = &mut self.root;
        for label in rule.labels.iter().rev() {
            node = node.children.entry(label.clone()).or_default();
        }
        match rule.kind {
            RuleKind::Normal => node.terminal = true,
            RuleKind::Wildcard => node.wildcard = true,
            RuleKind::Exception => node.exception = true,
        }
        self.rules += 1;
    }
}

impl SuffixRules for SuffixTable {
    fn suffix_len(&self, labels: &[&str]) -> Option<usize> {
        let mut node = &self.root;
        let mut matched = None;

        for (idx, label) in labels.iter().rev().enumerate() {
            let depth = idx + 1;
            let child = node.children.get(label.to_lowercase().as_str());

            if let Some(child) = child {
                if child.exception {
                    return Some(depth - 1);
                }
            }
            if node.wildcard {
                matched = Some(depth);
            }
            match child {
                Some(child) => {
                    if child.terminal {
                        matched = Some(depth);
                    }
                    node = child;
                }
                None => break,
            }
        }

        matched
    }
}

/// Suffix rules backed by the `psl` crate's compiled Public Suffix List.
///
/// Only explicitly listed suffixes count as matches; the list's implicit
/// `*` rule is ignored so that unknown TLDs take the splitter's fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct PublicSuffixList;

impl SuffixRules for PublicSuffixList {
    fn suffix_len(&self, labels: &[&str]) -> Option<usize> {
        let host = labels.join(".").to_lowercase();
        let suffix = List.suffix(host.as_bytes())?;
        if !suffix.is_known() {
            return None;
        }
        Some(suffix.as_bytes().split(|b| *b == b'.').count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(host: &str) -> Vec<&str> {
        host.split('.').collect()
    }

    #[test]
    fn test_parse_rule_kinds() {
        let rule = SuffixRule::parse("Act.Edu.AU").unwrap();
        assert_eq!(rule.kind, RuleKind::Normal);
        assert_eq!(rule.labels, vec!["act", "edu", "au"]);

        assert_eq!(SuffixRule::parse("*.ck").unwrap().kind, RuleKind::Wildcard);
        assert_eq!(SuffixRule::parse("!www.ck").unwrap().kind, RuleKind::Exception);
    }

    #[test]
    fn test_parse_rejects_malformed_rules() {
        assert!(SuffixRule::parse("co..uk").is_none());
        assert!(SuffixRule::parse("foo.*.uk").is_none());
        assert!(SuffixRule::parse("!").is_none());
        assert!(SuffixRule::parse("!ck").is_none());
    }

    #[test]
    fn test_parse_reports_line_numbers() {
        let err = SuffixTable::parse("uk\n\n// note\nco..uk\n").unwrap_err();
        assert_eq!(
            err,
            PwmError::InvalidSuffixRule { line: 4, rule: "co..uk".to_string() }
        );
    }

    #[test]
    fn test_longest_match_wins() {
        let table = SuffixTable::parse("au\nedu.au\nact.edu.au\n").unwrap();
        assert_eq!(table.suffix_len(&labels("www.google.act.edu.au")), Some(3));
        assert_eq!(table.suffix_len(&labels("www.unsw.edu.au")), Some(2));
        assert_eq!(table.suffix_len(&labels("example.au")), Some(1));
        assert_eq!(table.suffix_len(&labels("example.com")), None);
    }

    #[test]
    fn test_wildcard_and_exception() {
        let table = SuffixTable::parse("*.ck\n!www.ck\n").unwrap();
        assert_eq!(table.suffix_len(&labels("shop.co.ck")), Some(2));
        assert_eq!(table.suffix_len(&labels("www.ck")), Some(1));
        assert_eq!(table.suffix_len(&labels("a.www.ck")), Some(1));
    }

    #[test]
    fn test_case_insensitive() {
        let table = SuffixTable::parse("co.uk\n").unwrap();
        assert_eq!(table.suffix_len(&labels("WWW.Google.CO.UK")), Some(2));
    }

    #[test]
    fn test_builtin_table_loads() {
        let table = SuffixTable::builtin();
        assert!(table.len() > 100);
        assert_eq!(table.suffix_len(&labels("www.google.dnepropetrovsk.ua")), Some(2));
        assert_eq!(table.suffix_len(&labels("www.mysite.tx.us")), Some(2));
    }

    #[test]
    fn test_builtin_asset_is_well_formed() {
        assert!(SuffixTable::parse(BUILTIN_DATA).is_ok());
    }

    #[test]
    fn test_public_suffix_list() {
        let psl = PublicSuffixList;
        assert_eq!(psl.suffix_len(&labels("www.google.co.uk")), Some(2));
        assert_eq!(psl.suffix_len(&labels("example.com")), Some(1));
        assert_eq!(psl.suffix_len(&labels("host.notarealtld")), None);
    }
}
