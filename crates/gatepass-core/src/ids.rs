//! ID prefixes for store-generated identifiers.
//!
//! IDs take the form `{prefix}-{8 hex chars}`, e.g. `gat-a3f8b2c1`.

pub const PREFIX_USER: &str = "usr";
pub const PREFIX_GATE: &str = "gat";
pub const PREFIX_VISIT_LOG: &str = "vlg";

/// Every prefix in use, for exhaustive tests.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_USER, PREFIX_GATE, PREFIX_VISIT_LOG];

/// Check whether `id` carries the given prefix followed by a dash.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .is_some_and(|rest| rest.starts_with('-') && rest.len() > 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_are_distinct() {
        let mut seen = ALL_PREFIXES.to_vec();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), ALL_PREFIXES.len());
    }

    #[test]
    fn has_prefix_requires_dash_and_body() {
        assert!(has_prefix("gat-0a1b2c3d", PREFIX_GATE));
        assert!(!has_prefix("gat-", PREFIX_GATE));
        assert!(!has_prefix("gate-0a1b", PREFIX_GATE));
        assert!(!has_prefix("usr-0a1b2c3d", PREFIX_GATE));
    }
}
