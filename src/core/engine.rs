use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::core::distance::{calculate_bounding_box, haversine_meters, is_within_bounding_box, round_km};
use crate::core::filters;
use crate::error::CoreError;
use crate::models::{BoundingBox, CandidateSummary, UserProfile};
use crate::services::{Notification, NotificationBridge, UserDirectory};

/// Result of a like action
#[derive(Debug)]
pub struct MatchOutcome {
    pub is_match: bool,
    pub matched_user: Option<CandidateSummary>,
}

/// Matchmaking orchestrator: candidate feed, swipes, and mutual-match
/// reconciliation.
///
/// All pair mutations go through `UserDirectory::lock_pair`, which serializes
/// on the unordered pair. That is what keeps a concurrent `A.like(B)` /
/// `B.like(A)` from ever producing an asymmetric match.
pub struct MatchingEngine {
    directory: Arc<UserDirectory>,
    notifier: Arc<dyn NotificationBridge>,
    candidate_limit: usize,
}

impl MatchingEngine {
    pub fn new(
        directory: Arc<UserDirectory>,
        notifier: Arc<dyn NotificationBridge>,
        candidate_limit: usize,
    ) -> Self {
        Self {
            directory,
            notifier,
            candidate_limit,
        }
    }

    /// Compute the candidate feed for a user. Pure read, no side effects.
    ///
    /// Filtering is conjunctive: seen-set/self exclusion, same university,
    /// verified and complete targets, age window, mutual gender interest,
    /// and (when the actor has a real location) max distance in unrounded
    /// meters, with the bounding box as a cheap pre-filter before exact
    /// haversine. Ranked most recently active first, capped at the
    /// configured limit.
    pub async fn get_candidates(&self, user_id: Uuid) -> Result<Vec<CandidateSummary>, CoreError> {
        let actor = self.directory.read_profile(user_id).await?;
        if !actor.profile_completed {
            return Err(CoreError::ProfileIncomplete);
        }

        let bbox = if actor.located() {
            Some(calculate_bounding_box(
                actor.location.latitude,
                actor.location.longitude,
                f64::from(actor.max_distance_km),
            ))
        } else {
            None
        };

        let pool = self.directory.snapshot_all().await;
        let total = pool.len();

        let mut candidates: Vec<CandidateSummary> = pool
            .into_iter()
            .filter(|target| filters::is_candidate(&actor, target))
            .filter_map(|target| self.locate_and_summarize(&actor, target, bbox.as_ref()))
            .collect();

        candidates.sort_by(|a, b| b.last_active.cmp(&a.last_active));
        candidates.truncate(self.candidate_limit);

        tracing::debug!(
            "candidate feed for {}: {} of {} profiles",
            user_id,
            candidates.len(),
            total
        );
        Ok(candidates)
    }

    /// Apply the geo gate and attach the display distance.
    fn locate_and_summarize(
        &self,
        actor: &UserProfile,
        target: UserProfile,
        bbox: Option<&BoundingBox>,
    ) -> Option<CandidateSummary> {
        match bbox {
            Some(bbox) => {
                // Geo filtering active: unlocated targets drop out
                if !target.located() {
                    return None;
                }
                if !is_within_bounding_box(target.location.latitude, target.location.longitude, bbox)
                {
                    return None;
                }
                let meters = haversine_meters(
                    actor.location.latitude,
                    actor.location.longitude,
                    target.location.latitude,
                    target.location.longitude,
                );
                if meters > f64::from(actor.max_distance_km) * 1000.0 {
                    return None;
                }
                Some(target.summary(Some(round_km(meters / 1000.0))))
            }
            // Actor has no location, so no distance can be shown either
            None => Some(target.summary(None)),
        }
    }

    /// Record a like and reconcile a mutual match.
    ///
    /// The reciprocity read and both match writes happen under the pair lock,
    /// so the interleaving of two concurrent reciprocal likes cannot observe
    /// or produce a half-recorded match.
    pub async fn like(&self, actor_id: Uuid, target_id: Uuid) -> Result<MatchOutcome, CoreError> {
        if actor_id == target_id {
            return Err(CoreError::Validation("cannot swipe on yourself".to_string()));
        }

        let (mut actor, mut target) = self.directory.lock_pair(actor_id, target_id).await?;

        if actor.liked_users.contains(&target_id) {
            return Err(CoreError::AlreadyLiked);
        }

        // A target id sits in at most one of the two swipe sets
        actor.disliked_users.retain(|id| *id != target_id);
        actor.liked_users.push(target_id);
        actor.last_active = Utc::now();

        let is_match = target.liked_users.contains(&actor_id);
        let matched_user = if is_match {
            if !actor.matches.contains(&target_id) {
                actor.matches.push(target_id);
            }
            if !target.matches.contains(&actor_id) {
                target.matches.push(actor_id);
            }

            let distance_km = if actor.located() && target.located() {
                Some(round_km(
                    haversine_meters(
                        actor.location.latitude,
                        actor.location.longitude,
                        target.location.latitude,
                        target.location.longitude,
                    ) / 1000.0,
                ))
            } else {
                None
            };
            Some(target.summary(distance_km))
        } else {
            None
        };

        drop(actor);
        drop(target);

        if is_match {
            tracing::info!("mutual match formed: {} <-> {}", actor_id, target_id);
            self.notifier.publish(Notification::MatchFormed {
                user_a: actor_id,
                user_b: target_id,
            });
        } else {
            tracing::debug!("like recorded: {} -> {}", actor_id, target_id);
        }

        Ok(MatchOutcome {
            is_match,
            matched_user,
        })
    }

    /// Record a dislike. One-directional: only the actor's sets change.
    pub async fn dislike(&self, actor_id: Uuid, target_id: Uuid) -> Result<(), CoreError> {
        if actor_id == target_id {
            return Err(CoreError::Validation("cannot swipe on yourself".to_string()));
        }

        let (mut actor, _target) = self.directory.lock_pair(actor_id, target_id).await?;

        if actor.disliked_users.contains(&target_id) {
            return Err(CoreError::AlreadyDisliked);
        }

        actor.liked_users.retain(|id| *id != target_id);
        actor.disliked_users.push(target_id);
        actor.last_active = Utc::now();

        tracing::debug!("dislike recorded: {} -> {}", actor_id, target_id);
        Ok(())
    }

    /// Dissolve a match and purge the like history in both directions, so a
    /// later re-like can re-establish contact. Idempotent: unmatching a
    /// non-matched pair is a no-op, not an error.
    pub async fn unmatch(&self, actor_id: Uuid, target_id: Uuid) -> Result<(), CoreError> {
        if actor_id == target_id {
            return Err(CoreError::Validation("cannot unmatch yourself".to_string()));
        }

        let (mut actor, mut target) = self.directory.lock_pair(actor_id, target_id).await?;

        let was_matched = actor.matches.contains(&target_id);
        actor.matches.retain(|id| *id != target_id);
        target.matches.retain(|id| *id != actor_id);
        actor.liked_users.retain(|id| *id != target_id);
        target.liked_users.retain(|id| *id != actor_id);
        actor.last_active = Utc::now();

        tracing::debug!(
            "unmatch: {} -> {} (was matched: {})",
            actor_id,
            target_id,
            was_matched
        );
        Ok(())
    }
}
