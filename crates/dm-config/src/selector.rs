//! Environment profile selection
//!
//! Exactly one profile from `SystemSettings` applies per resolver. A profile
//! requested by name always wins; otherwise profiles are tried in
//! declaration order and the first whose `HOSTNAME` equals the host is used.

use crate::schema::EnvironmentProfile;
use crate::{Error, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// A profile together with the name it was declared under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectedProfile {
    pub name: String,
    pub profile: EnvironmentProfile,
}

/// Select the environment profile for `host`.
///
/// # Arguments
///
/// * `profiles` - `SystemSettings` in declaration order
/// * `host` - Runtime host identity
/// * `requested` - Profile name requested by the caller, bypassing host matching
///
/// # Errors
///
/// `NoMatchingProfile` when the requested name is absent, or when no profile
/// matches and nothing was requested.
pub fn select_profile(
    profiles: &IndexMap<String, EnvironmentProfile>,
    host: &str,
    requested: Option<&str>,
) -> Result<SelectedProfile> {
    let found = match requested {
        Some(name) => profiles.get_key_value(name),
        None => profiles.iter().find(|(_, profile)| profile.matches_host(host)),
    };

    match found {
        Some((name, profile)) => {
            tracing::info!(profile = %name, host, requested, "Selected system profile");
            Ok(SelectedProfile {
                name: name.clone(),
                profile: profile.clone(),
            })
        }
        None => Err(Error::NoMatchingProfile {
            host: host.to_string(),
            requested: requested.map(str::to_string),
            available: profiles.keys().cloned().collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(pattern: &str, root: &str) -> EnvironmentProfile {
        EnvironmentProfile {
            hostname_pattern: pattern.to_string(),
            projects_root: root.to_string(),
            assets_root: String::new(),
            archive_root: String::new(),
            config_root: String::new(),
        }
    }

    fn profiles() -> IndexMap<String, EnvironmentProfile> {
        [
            ("srv".to_string(), profile("srv1", "/archive/data/")),
            ("srv-dup".to_string(), profile("srv1", "/scratch/data/")),
            ("local".to_string(), profile("", "tests/")),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn first_matching_profile_in_declaration_order_wins() {
        let selected = select_profile(&profiles(), "srv1", None).unwrap();
        assert_eq!(selected.name, "srv");
        assert_eq!(selected.profile.projects_root, "/archive/data/");
    }

    #[test]
    fn requested_profile_overrides_host_match() {
        let selected = select_profile(&profiles(), "srv1", Some("local")).unwrap();
        assert_eq!(selected.name, "local");
    }

    #[test]
    fn empty_pattern_is_not_selected_by_host() {
        let err = select_profile(&profiles(), "", None).unwrap_err();
        assert!(matches!(err, Error::NoMatchingProfile { .. }));
    }

    #[test]
    fn unknown_requested_profile_fails_and_lists_available() {
        let err = select_profile(&profiles(), "srv1", Some("archive")).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("archive"), "got: {message}");
        assert!(message.contains("srv, srv-dup, local"), "got: {message}");
    }

    #[test]
    fn selection_is_deterministic() {
        let first = select_profile(&profiles(), "srv1", None).unwrap();
        let second = select_profile(&profiles(), "srv1", None).unwrap();
        assert_eq!(first, second);
    }
}
