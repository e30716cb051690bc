//! Filter expression evaluation.
//!
//! A filter token is an optional `no-` prefix plus a keyword naming a
//! sync state, a modification flag, or the literal `remote` (tests
//! whether a push remote is configured). Tokens fold into a single
//! boolean under AND or OR; blank and unrecognized tokens are inert.

use crate::git::status::{ModFlag, RepoStatus, SyncState};

const NEGATION_PREFIX: &str = "no-";
const KEYWORD_REMOTE: &str = "remote";

/// How multiple filter expressions combine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combine {
    /// Every expression must hold (AND)
    All,
    /// At least one expression must hold (OR)
    Any,
}

impl Combine {
    /// Identity element for the fold.
    fn seed(self) -> bool {
        match self {
            Combine::All => true,
            Combine::Any => false,
        }
    }

    fn fold(self, acc: bool, value: bool) -> bool {
        match self {
            Combine::All => acc && value,
            Combine::Any => acc || value,
        }
    }
}

/// Evaluates the filter expressions against a repository status.
///
/// Unrecognized keywords skip the fold entirely, so they can neither
/// satisfy an OR nor fail an AND.
pub fn matches(status: &RepoStatus, filters: &[String], combine: Combine) -> bool {
    let mut result = combine.seed();

    for raw in filters {
        let token = raw.trim();
        if token.is_empty() {
            continue;
        }

        let (keyword, expect) = match token.strip_prefix(NEGATION_PREFIX) {
            Some(rest) => (rest, false),
            None => (token, true),
        };

        let test = if let Some(state) = SyncState::from_keyword(keyword) {
            status.sync == state
        } else if let Some(flag) = ModFlag::from_keyword(keyword) {
            status.modifications.contains(flag)
        } else if keyword == KEYWORD_REMOTE {
            !status.remote_url.is_empty()
        } else {
            continue;
        };

        result = combine.fold(result, test == expect);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::status::Modifications;
    use std::path::PathBuf;

    fn status(sync: SyncState, modifications: Modifications, remote_url: &str) -> RepoStatus {
        RepoStatus {
            path: PathBuf::from("/work/repo"),
            branch: "main".to_string(),
            remote_url: remote_url.to_string(),
            sync,
            modifications,
        }
    }

    fn filters(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| (*t).to_string()).collect()
    }

    #[test]
    fn test_and_requires_every_expression() {
        let ahead_no_remote = status(SyncState::Ahead, Modifications::default(), "");
        let ahead_with_remote = status(
            SyncState::Ahead,
            Modifications::default(),
            "git@example.com:me/repo.git",
        );

        let exprs = filters(&["ahead", "no-remote"]);
        assert!(matches(&ahead_no_remote, &exprs, Combine::All));
        assert!(!matches(&ahead_with_remote, &exprs, Combine::All));
    }

    #[test]
    fn test_or_accepts_any_expression() {
        let behind_no_remote = status(SyncState::Behind, Modifications::default(), "");
        let behind_with_remote = status(
            SyncState::Behind,
            Modifications::default(),
            "git@example.com:me/repo.git",
        );

        let exprs = filters(&["ahead", "no-remote"]);
        assert!(matches(&behind_no_remote, &exprs, Combine::Any));
        assert!(!matches(&behind_with_remote, &exprs, Combine::Any));
    }

    #[test]
    fn test_negation_round_trip() {
        let mut modifications = Modifications::default();
        modifications.stashed = true;
        let s = status(SyncState::Diverged, modifications, "https://example.com/r.git");

        for keyword in [
            "uptodate", "ahead", "behind", "diverged", "unknown", "added", "modified", "removed",
            "deleted", "stashed", "changed", "remote",
        ] {
            let plain = matches(&s, &[keyword.to_string()], Combine::All);
            let negated = matches(&s, &[format!("no-{keyword}")], Combine::All);
            assert_ne!(plain, negated, "negation of {keyword:?} should flip the result");
        }
    }

    #[test]
    fn test_blank_and_unrecognized_tokens_are_inert() {
        let s = status(SyncState::UpToDate, Modifications::default(), "");

        assert!(matches(&s, &filters(&["", "   ", "bogus-keyword"]), Combine::All));
        // Under OR they contribute nothing either: the seed stays false
        assert!(!matches(&s, &filters(&["", "bogus-keyword"]), Combine::Any));
    }

    #[test]
    fn test_empty_filter_list_matches_under_and() {
        let s = status(SyncState::Behind, Modifications::default(), "");
        assert!(matches(&s, &[], Combine::All));
        assert!(!matches(&s, &[], Combine::Any));
    }

    #[test]
    fn test_remote_keyword_tests_presence() {
        let with_remote = status(
            SyncState::UpToDate,
            Modifications::default(),
            "git@example.com:me/repo.git",
        );
        let without_remote = status(SyncState::UpToDate, Modifications::default(), "");

        assert!(matches(&with_remote, &filters(&["remote"]), Combine::All));
        assert!(!matches(&without_remote, &filters(&["remote"]), Combine::All));
        assert!(matches(&without_remote, &filters(&["no-remote"]), Combine::All));
    }

    #[test]
    fn test_diverged_and_changed_scenario() {
        let mut modifications = Modifications::default();
        modifications.modified = true;
        modifications.unknown = true;
        modifications.stashed = true;
        let s = status(SyncState::Diverged, modifications, "");

        assert!(matches(&s, &filters(&["diverged", "changed"]), Combine::All));
    }

    #[test]
    fn test_changed_is_false_for_clean_repo() {
        let s = status(SyncState::UpToDate, Modifications::default(), "");
        assert!(!matches(&s, &filters(&["changed"]), Combine::All));
        assert!(matches(&s, &filters(&["no-changed"]), Combine::All));
    }

    #[test]
    fn test_whitespace_around_tokens_is_trimmed() {
        let s = status(SyncState::Ahead, Modifications::default(), "");
        assert!(matches(&s, &filters(&["  ahead  "]), Combine::All));
    }
}
