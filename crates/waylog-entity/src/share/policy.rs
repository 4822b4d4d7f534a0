//! Per-link policy derivation.
//!
//! Policies are never stored in normalized form. Each request re-derives
//! them from the sparse override map persisted on the share link, so a flag
//! added in a later release picks up its default on old links without a
//! migration. Both camelCase and snake_case spellings are accepted because
//! stored override maps may have been written by older clients.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Alias pair + default for one boolean flag.
type FlagSpec = (&'static str, &'static str, bool);

const HIDE_EXACT_DATES: FlagSpec = ("hideExactDates", "hide_exact_dates", false);
const ALLOW_DOWNLOADS: FlagSpec = ("allowDownloads", "allow_downloads", true);

const SHOW_OWNER: FlagSpec = ("showOwner", "show_owner", true);
const SHOW_STATS: FlagSpec = ("showStats", "show_stats", true);
const SHOW_GLOBE: FlagSpec = ("showGlobe", "show_globe", true);
const SHOW_HIGHLIGHTS: FlagSpec = ("showHighlights", "show_highlights", false);
const SHOW_MOMENTS: FlagSpec = ("showMoments", "show_moments", true);
const SHOW_MEDIA: FlagSpec = ("showMedia", "show_media", true);
const SHOW_TAGS: FlagSpec = ("showTags", "show_tags", true);
const SHOW_PROFILE_BIO: FlagSpec = ("showProfileBio", "show_profile_bio", true);
const SHOW_TRIP_LIST: FlagSpec = ("showTripList", "show_trip_list", true);
const SHOW_TRIP_DESCRIPTIONS: FlagSpec = ("showTripDescriptions", "show_trip_descriptions", true);

/// Resolve one flag from the override map.
///
/// The camelCase alias wins if both spellings are present. Non-boolean
/// values and unknown keys fall through to the default.
fn flag(overrides: &Value, spec: FlagSpec) -> bool {
    let (camel, snake, default) = spec;
    overrides
        .get(camel)
        .or_else(|| overrides.get(snake))
        .and_then(Value::as_bool)
        .unwrap_or(default)
}

/// Privacy policy: how much detail a guest may extract, independent of
/// which sections they can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacyPolicy {
    /// Reduce all dates to month + year precision.
    pub hide_exact_dates: bool,
    /// Permit full-resolution download URLs.
    pub allow_downloads: bool,
}

impl PrivacyPolicy {
    /// Derive the policy from a stored override map.
    pub fn from_overrides(overrides: &Value) -> Self {
        Self {
            hide_exact_dates: flag(overrides, HIDE_EXACT_DATES),
            allow_downloads: flag(overrides, ALLOW_DOWNLOADS),
        }
    }
}

impl Default for PrivacyPolicy {
    fn default() -> Self {
        Self::from_overrides(&Value::Null)
    }
}

/// Visibility policy: which sections of the record graph are exposed.
///
/// Flags are orthogonal. Disabling `show_moments` still lets `show_media`
/// evaluation proceed as a no-op over zero entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityPolicy {
    /// Expose the owner block.
    pub show_owner: bool,
    /// Expose aggregate statistics.
    pub show_stats: bool,
    /// Expose coordinates (globe view).
    pub show_globe: bool,
    /// Expose curated highlights.
    pub show_highlights: bool,
    /// Expose the moment timeline.
    pub show_moments: bool,
    /// Expose media attached to moments.
    pub show_media: bool,
    /// Expose trip tags.
    pub show_tags: bool,
    /// Expose the owner's bio inside the owner block.
    pub show_profile_bio: bool,
    /// Expose the trip list (profile scope only).
    pub show_trip_list: bool,
    /// Expose trip descriptions.
    pub show_trip_descriptions: bool,
}

impl VisibilityPolicy {
    /// Derive the policy from a stored override map.
    pub fn from_overrides(overrides: &Value) -> Self {
        Self {
            show_owner: flag(overrides, SHOW_OWNER),
            show_stats: flag(overrides, SHOW_STATS),
            show_globe: flag(overrides, SHOW_GLOBE),
            show_highlights: flag(overrides, SHOW_HIGHLIGHTS),
            show_moments: flag(overrides, SHOW_MOMENTS),
            show_media: flag(overrides, SHOW_MEDIA),
            show_tags: flag(overrides, SHOW_TAGS),
            show_profile_bio: flag(overrides, SHOW_PROFILE_BIO),
            show_trip_list: flag(overrides, SHOW_TRIP_LIST),
            show_trip_descriptions: flag(overrides, SHOW_TRIP_DESCRIPTIONS),
        }
    }
}

impl Default for VisibilityPolicy {
    fn default() -> Self {
        Self::from_overrides(&Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_overrides_yield_documented_defaults() {
        let privacy = PrivacyPolicy::from_overrides(&json!({}));
        assert!(!privacy.hide_exact_dates);
        assert!(privacy.allow_downloads);

        let visibility = VisibilityPolicy::from_overrides(&json!({}));
        assert!(visibility.show_owner);
        assert!(visibility.show_stats);
        assert!(visibility.show_globe);
        assert!(!visibility.show_highlights);
        assert!(visibility.show_moments);
        assert!(visibility.show_media);
        assert!(visibility.show_tags);
        assert!(visibility.show_profile_bio);
        assert!(visibility.show_trip_list);
        assert!(visibility.show_trip_descriptions);
    }

    #[test]
    fn both_spellings_are_accepted() {
        let camel = VisibilityPolicy::from_overrides(&json!({"showMoments": false}));
        let snake = VisibilityPolicy::from_overrides(&json!({"show_moments": false}));
        assert_eq!(camel, snake);
        assert!(!camel.show_moments);
    }

    #[test]
    fn non_boolean_values_fall_back_to_defaults() {
        let privacy = PrivacyPolicy::from_overrides(&json!({
            "allowDownloads": "no",
            "hideExactDates": 1,
        }));
        assert!(privacy.allow_downloads);
        assert!(!privacy.hide_exact_dates);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let visibility = VisibilityPolicy::from_overrides(&json!({
            "showFutureFeature": false,
            "show_globe": false,
        }));
        assert!(!visibility.show_globe);
        assert!(visibility.show_owner);
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = VisibilityPolicy::from_overrides(&json!({
            "showMoments": false,
            "show_tags": false,
        }));
        let reserialized = serde_json::to_value(first).unwrap();
        let second = VisibilityPolicy::from_overrides(&reserialized);
        assert_eq!(first, second);
    }

    #[test]
    fn null_and_missing_map_behave_identically() {
        assert_eq!(
            PrivacyPolicy::from_overrides(&Value::Null),
            PrivacyPolicy::from_overrides(&json!({})),
        );
    }
}
