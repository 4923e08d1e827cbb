//! Discovery filtering.
//!
//! Pure filtering over profiles already loaded for one event. The result
//! keeps the input order, so identical inputs always give identical output.

use validator::ValidationError;

use crate::models::{EventProfile, GenderIdentity};

/// Youngest age the discovery filter defaults to.
pub const DEFAULT_MIN_AGE: i32 = 18;

/// Oldest age the discovery filter defaults to.
pub const DEFAULT_MAX_AGE: i32 = 120;

/// Filters chosen by the viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryFilters {
    pub min_age: i32,
    pub max_age: i32,
    pub gender: Option<GenderIdentity>,
    /// Empty means "any interests".
    pub interests: Vec<String>,
}

impl Default for DiscoveryFilters {
    fn default() -> Self {
        Self {
            min_age: DEFAULT_MIN_AGE,
            max_age: DEFAULT_MAX_AGE,
            gender: None,
            interests: Vec::new(),
        }
    }
}

impl DiscoveryFilters {
    /// Rejects an empty age range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_age > self.max_age {
            let mut err = ValidationError::new("age_range");
            err.message = Some("min_age cannot exceed max_age".into());
            return Err(err);
        }
        Ok(())
    }

    fn accepts_age(&self, age: i32) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }

    fn accepts_gender(&self, gender: GenderIdentity) -> bool {
        self.gender.map(|wanted| wanted == gender).unwrap_or(true)
    }

    fn accepts_interests(&self, interests: &[String]) -> bool {
        if self.interests.is_empty() {
            return true;
        }
        interests.iter().any(|tag| {
            let tag = shared::validation::normalize_tag(tag);
            self.interests
                .iter()
                .any(|wanted| shared::validation::normalize_tag(wanted) == tag)
        })
    }
}

/// Both attendees' preferences are satisfied by the other's gender.
pub fn is_mutually_compatible(viewer: &EventProfile, candidate: &EventProfile) -> bool {
    viewer.interested_in.accepts(candidate.gender_identity)
        && candidate.interested_in.accepts(viewer.gender_identity)
}

/// Whether `candidate` should be shown to `viewer`.
pub fn passes_filters(
    viewer: &EventProfile,
    candidate: &EventProfile,
    filters: &DiscoveryFilters,
) -> bool {
    candidate.is_visible
        && candidate.event_id == viewer.event_id
        && candidate.session_id != viewer.session_id
        && is_mutually_compatible(viewer, candidate)
        && filters.accepts_age(candidate.age)
        && filters.accepts_gender(candidate.gender_identity)
        && filters.accepts_interests(&candidate.interests)
}

/// Profiles from `candidates` that pass [`passes_filters`], in input order.
pub fn discover<'a>(
    viewer: &EventProfile,
    candidates: &'a [EventProfile],
    filters: &DiscoveryFilters,
) -> Vec<&'a EventProfile> {
    candidates
        .iter()
        .filter(|candidate| passes_filters(viewer, candidate, filters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InterestedIn;
    use chrono::Utc;
    use uuid::Uuid;

    const EVENT: Uuid = Uuid::from_u128(0xE1);

    fn profile(
        session: &str,
        age: i32,
        gender: GenderIdentity,
        interested_in: InterestedIn,
        interests: &[&str],
    ) -> EventProfile {
        EventProfile {
            id: Uuid::new_v4(),
            event_id: EVENT,
            session_id: session.to_string(),
            first_name: session.to_uppercase(),
            age,
            gender_identity: gender,
            interested_in,
            interests: interests.iter().map(|s| s.to_string()).collect(),
            is_visible: true,
            profile_photo_url: None,
            profile_color: "#FF5A5F".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_compatibility_is_checked_both_ways() {
        let viewer = profile("me", 30, GenderIdentity::Man, InterestedIn::Everyone, &[]);
        let candidate = profile("her", 28, GenderIdentity::Woman, InterestedIn::Women, &[]);

        // Viewer is open to everyone, but the candidate only wants women.
        assert!(!is_mutually_compatible(&viewer, &candidate));
        assert!(discover(&viewer, &[candidate.clone()], &DiscoveryFilters::default()).is_empty());

        let woman_viewer = profile("me", 30, GenderIdentity::Woman, InterestedIn::Everyone, &[]);
        assert!(is_mutually_compatible(&woman_viewer, &candidate));
    }

    #[test]
    fn test_age_range_is_inclusive() {
        let viewer = profile("me", 30, GenderIdentity::Man, InterestedIn::Women, &[]);
        let candidates = vec![
            profile("a", 24, GenderIdentity::Woman, InterestedIn::Men, &[]),
            profile("b", 25, GenderIdentity::Woman, InterestedIn::Men, &[]),
            profile("c", 35, GenderIdentity::Woman, InterestedIn::Men, &[]),
            profile("d", 36, GenderIdentity::Woman, InterestedIn::Men, &[]),
        ];
        let filters = DiscoveryFilters {
            min_age: 25,
            max_age: 35,
            ..Default::default()
        };

        let ids: Vec<&str> = discover(&viewer, &candidates, &filters)
            .iter()
            .map(|p| p.session_id.as_str())
            .collect();
        assert_eq!(ids, vec!["b", "c"]);
    }

    #[test]
    fn test_gender_filter() {
        let viewer = profile("me", 30, GenderIdentity::NonBinary, InterestedIn::Everyone, &[]);
        let candidates = vec![
            profile("a", 30, GenderIdentity::Man, InterestedIn::Everyone, &[]),
            profile("b", 30, GenderIdentity::NonBinary, InterestedIn::Everyone, &[]),
        ];
        let filters = DiscoveryFilters {
            gender: Some(GenderIdentity::NonBinary),
            ..Default::default()
        };

        let result = discover(&viewer, &candidates, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].session_id, "b");
    }

    #[test]
    fn test_interest_filter_needs_one_shared_tag() {
        let viewer = profile("me", 30, GenderIdentity::Woman, InterestedIn::Everyone, &[]);
        let candidates = vec![
            profile("a", 30, GenderIdentity::Man, InterestedIn::Everyone, &["Techno", "Hiking"]),
            profile("b", 30, GenderIdentity::Man, InterestedIn::Everyone, &["Chess"]),
            profile("c", 30, GenderIdentity::Man, InterestedIn::Everyone, &[]),
        ];
        let filters = DiscoveryFilters {
            interests: vec![" techno ".to_string(), "jazz".to_string()],
            ..Default::default()
        };

        let result = discover(&viewer, &candidates, &filters);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].session_id, "a");
    }

    #[test]
    fn test_self_and_hidden_profiles_are_excluded() {
        let viewer = profile("me", 30, GenderIdentity::Man, InterestedIn::Everyone, &[]);
        let mut hidden = profile("hidden", 30, GenderIdentity::Man, InterestedIn::Everyone, &[]);
        hidden.is_visible = false;
        let mut elsewhere = profile("other", 30, GenderIdentity::Man, InterestedIn::Everyone, &[]);
        elsewhere.event_id = Uuid::from_u128(0xE2);

        let candidates = vec![viewer.clone(), hidden, elsewhere];
        assert!(discover(&viewer, &candidates, &DiscoveryFilters::default()).is_empty());
    }

    #[test]
    fn test_discover_is_idempotent_and_order_preserving() {
        let viewer = profile("me", 30, GenderIdentity::Man, InterestedIn::Everyone, &[]);
        let candidates: Vec<EventProfile> = ["z", "a", "m", "b"]
            .iter()
            .map(|s| profile(s, 30, GenderIdentity::Woman, InterestedIn::Everyone, &[]))
            .collect();
        let filters = DiscoveryFilters::default();

        let first: Vec<Uuid> = discover(&viewer, &candidates, &filters)
            .iter()
            .map(|p| p.id)
            .collect();
        let second: Vec<Uuid> = discover(&viewer, &candidates, &filters)
            .iter()
            .map(|p| p.id)
            .collect();

        assert_eq!(first, second);
        let expected: Vec<Uuid> = candidates.iter().map(|p| p.id).collect();
        assert_eq!(first, expected);
    }

    #[test]
    fn test_filters_validate_age_range() {
        assert!(DiscoveryFilters::default().validate().is_ok());
        let inverted = DiscoveryFilters {
            min_age: 40,
            max_age: 30,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());
    }
}
