//! Local label-selector evaluation.
//!
//! The Kubernetes API has no native regex support, so selectors containing
//! the `=~` operator are evaluated here against an unfiltered pod list.

use std::collections::BTreeMap;

use regex::Regex;
use tracing::warn;

/// Marker for regex clauses (`key=~pattern`).
pub const REGEX_OPERATOR: &str = "=~";

/// True when the selector needs local evaluation instead of native
/// label-selector delegation.
pub fn is_regex_selector(selector: &str) -> bool {
    selector.contains(REGEX_OPERATOR)
}

/// Evaluate a comma-separated selector against a pod's labels.
///
/// Each clause is either `key=~pattern` (the key must exist and its value
/// must satisfy a regex search) or `key=value` (exact match). All clauses
/// must match. Unsupported clauses and invalid regex patterns reject the pod
/// rather than aborting the request (fail-closed).
pub fn matches_selector(labels: Option<&BTreeMap<String, String>>, selector: &str) -> bool {
    let Some(labels) = labels else {
        return false;
    };

    for clause in selector.split(',') {
        let clause = clause.trim();
        if clause.is_empty() {
            continue;
        }

        if let Some((key, pattern)) = clause.split_once(REGEX_OPERATOR) {
            let key = key.trim();
            let pattern = pattern.trim();

            let Some(value) = labels.get(key) else {
                return false;
            };

            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(value) {
                        return false;
                    }
                }
                Err(err) => {
                    warn!(pattern, %err, "Invalid regex pattern in label selector");
                    return false;
                }
            }
        } else if clause.contains('=') && !clause.contains("!=") {
            let Some((key, expected)) = clause.split_once('=') else {
                return false;
            };
            match labels.get(key.trim()) {
                Some(value) if value == expected.trim() => {}
                _ => return false,
            }
        } else {
            warn!(clause, "Unsupported label selector clause");
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn exact_match_clause() {
        let l = labels(&[("app", "nginx")]);
        assert!(matches_selector(Some(&l), "app=nginx"));
        assert!(!matches_selector(Some(&l), "app=redis"));
        assert!(!matches_selector(Some(&l), "tier=web"));
    }

    #[test]
    fn regex_clause_searches_value() {
        let l = labels(&[("app", "nginx-frontend")]);
        assert!(matches_selector(Some(&l), "app=~nginx.*"));
        assert!(matches_selector(Some(&l), "app=~frontend"));
        assert!(!matches_selector(Some(&l), "app=~^backend$"));
    }

    #[test]
    fn regex_alternation() {
        let l = labels(&[("environment", "staging")]);
        assert!(matches_selector(Some(&l), "environment=~dev|staging"));
        assert!(!matches_selector(Some(&l), "environment=~dev|prod"));
    }

    #[test]
    fn clauses_are_anded() {
        let l = labels(&[("app", "nginx"), ("tier", "web")]);
        assert!(matches_selector(Some(&l), "app=nginx,tier=web"));
        assert!(matches_selector(Some(&l), "app=~ngin.,tier=web"));
        assert!(!matches_selector(Some(&l), "app=nginx,tier=db"));
    }

    #[test]
    fn missing_key_in_regex_clause_rejects() {
        let l = labels(&[("app", "nginx")]);
        assert!(!matches_selector(Some(&l), "team=~.*"));
    }

    #[test]
    fn no_labels_never_match() {
        assert!(!matches_selector(None, "app=nginx"));
        assert!(!matches_selector(None, "app=~.*"));
        let empty = BTreeMap::new();
        assert!(!matches_selector(Some(&empty), "app=nginx"));
    }

    #[test]
    fn invalid_regex_fails_closed() {
        let l = labels(&[("app", "nginx")]);
        assert!(!matches_selector(Some(&l), "app=~["));
    }

    #[test]
    fn unsupported_clause_fails_closed() {
        let l = labels(&[("app", "nginx")]);
        assert!(!matches_selector(Some(&l), "app!=redis"));
        assert!(!matches_selector(Some(&l), "app"));
        // One bad clause rejects even when others match
        assert!(!matches_selector(Some(&l), "app=nginx,app!=redis"));
    }

    #[test]
    fn whitespace_and_empty_clauses_are_tolerated() {
        let l = labels(&[("app", "nginx")]);
        assert!(matches_selector(Some(&l), " app = nginx "));
        assert!(matches_selector(Some(&l), "app=nginx,"));
        assert!(matches_selector(Some(&l), "app =~ ngin."));
    }

    #[test]
    fn local_exact_match_mirrors_native_semantics() {
        // The same exact-match selector must select the same pods whether it
        // is delegated to the API or evaluated locally alongside a regex.
        let pods = [
            labels(&[("app", "nginx"), ("tier", "web")]),
            labels(&[("app", "redis")]),
            labels(&[("app", "nginx")]),
        ];
        let matched: Vec<usize> = pods
            .iter()
            .enumerate()
            .filter(|(_, l)| matches_selector(Some(l), "app=nginx"))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(matched, vec![0, 2]);
    }
}
