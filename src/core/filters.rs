use crate::core::distance::haversine_meters;
use crate::models::UserProfile;

/// Check the non-geographic candidate criteria, all conjunctive.
///
/// A target qualifies when it is someone else, not yet swiped on, at the same
/// university, a verified and complete account, inside the actor's preferred
/// age window, and the gender interest holds in both directions.
#[inline]
pub fn is_candidate(actor: &UserProfile, target: &UserProfile) -> bool {
    // Never show self, or anyone already swiped on
    if target.id == actor.id {
        return false;
    }
    if actor.liked_users.contains(&target.id) || actor.disliked_users.contains(&target.id) {
        return false;
    }

    // University-restricted pool
    if target.university != actor.university {
        return false;
    }

    // Only verified, complete accounts are shown
    if !target.is_verified || !target.profile_completed {
        return false;
    }

    // Age window
    if !actor.age_range.contains(target.age) {
        return false;
    }

    mutual_interest(actor, target)
}

/// Gender reciprocity: the actor wants the target's gender AND the target
/// wants the actor's. Checked in both directions, not just one.
#[inline]
pub fn mutual_interest(actor: &UserProfile, target: &UserProfile) -> bool {
    actor.interested_in.accepts(target.gender) && target.interested_in.accepts(actor.gender)
}

/// Geo gate, active only when the actor has a real location. Targets without
/// a location are excluded once the gate is active; the comparison happens in
/// unrounded meters.
#[inline]
pub fn within_reach(actor: &UserProfile, target: &UserProfile) -> bool {
    if !actor.located() {
        return true;
    }
    if !target.located() {
        return false;
    }

    let meters = haversine_meters(
        actor.location.latitude,
        actor.location.longitude,
        target.location.latitude,
        target.location.longitude,
    );

    meters <= f64::from(actor.max_distance_km) * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, Gender, GeoPoint, InterestedIn, UserProfile};
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(gender: Gender, interested_in: InterestedIn, age: u8) -> UserProfile {
        let now = Utc::now();
        UserProfile {
            id: Uuid::new_v4(),
            email: "someone@uni-bonn.de".to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            age,
            gender,
            interested_in,
            university: "uni-bonn.de".to_string(),
            course: "CS".to_string(),
            year_of_study: 2,
            bio: "hi".to_string(),
            photos: vec![crate::models::Photo {
                url: "p.jpg".to_string(),
                is_main: true,
            }],
            location: GeoPoint::UNSET,
            age_range: AgeRange { min: 18, max: 30 },
            max_distance_km: 50,
            is_verified: true,
            profile_completed: true,
            liked_users: vec![],
            disliked_users: vec![],
            matches: vec![],
            last_active: now,
            created_at: now,
        }
    }

    #[test]
    fn test_mutual_interest_both_directions() {
        let actor = profile(Gender::Male, InterestedIn::Female, 22);
        let target = profile(Gender::Female, InterestedIn::Male, 23);
        assert!(mutual_interest(&actor, &target));

        // Target is not interested back
        let target = profile(Gender::Female, InterestedIn::Female, 23);
        assert!(!mutual_interest(&actor, &target));

        // "both" accepts anyone
        let actor = profile(Gender::NonBinary, InterestedIn::Both, 22);
        let target = profile(Gender::Female, InterestedIn::Both, 23);
        assert!(mutual_interest(&actor, &target));

        // One-directional interest is not enough
        let target = profile(Gender::Female, InterestedIn::Male, 23);
        assert!(!mutual_interest(&actor, &target));
    }

    #[test]
    fn test_candidate_excludes_other_university() {
        let actor = profile(Gender::Male, InterestedIn::Female, 22);
        let mut target = profile(Gender::Female, InterestedIn::Male, 23);
        target.university = "tu-berlin.de".to_string();
        assert!(!is_candidate(&actor, &target));
    }

    #[test]
    fn test_candidate_excludes_seen_and_self() {
        let mut actor = profile(Gender::Male, InterestedIn::Female, 22);
        let target = profile(Gender::Female, InterestedIn::Male, 23);
        assert!(is_candidate(&actor, &target));

        actor.liked_users.push(target.id);
        assert!(!is_candidate(&actor, &target));

        actor.liked_users.clear();
        actor.disliked_users.push(target.id);
        assert!(!is_candidate(&actor, &target));

        let self_copy = actor.clone();
        assert!(!is_candidate(&actor, &self_copy));
    }

    #[test]
    fn test_candidate_requires_verified_complete() {
        let actor = profile(Gender::Male, InterestedIn::Female, 22);

        let mut target = profile(Gender::Female, InterestedIn::Male, 23);
        target.is_verified = false;
        assert!(!is_candidate(&actor, &target));

        let mut target = profile(Gender::Female, InterestedIn::Male, 23);
        target.profile_completed = false;
        assert!(!is_candidate(&actor, &target));
    }

    #[test]
    fn test_candidate_age_window() {
        let mut actor = profile(Gender::Male, InterestedIn::Female, 22);
        actor.age_range = AgeRange { min: 20, max: 24 };

        let target = profile(Gender::Female, InterestedIn::Male, 24);
        assert!(is_candidate(&actor, &target));

        let target = profile(Gender::Female, InterestedIn::Male, 25);
        assert!(!is_candidate(&actor, &target));
    }

    #[test]
    fn test_within_reach() {
        let mut actor = profile(Gender::Male, InterestedIn::Female, 22);
        let mut target = profile(Gender::Female, InterestedIn::Male, 23);

        // No actor location: gate inactive
        assert!(within_reach(&actor, &target));

        // 0.09 degrees of latitude is roughly 10 km
        actor.location = GeoPoint::new(7.0982, 50.7374);
        target.location = GeoPoint::new(7.0982, 50.8274);
        actor.max_distance_km = 50;
        assert!(within_reach(&actor, &target));

        actor.max_distance_km = 5;
        assert!(!within_reach(&actor, &target));

        // Gate active but target unlocated
        actor.max_distance_km = 50;
        target.location = GeoPoint::UNSET;
        assert!(!within_reach(&actor, &target));
    }
}
