use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;
use validator::Validate;

use crate::error::CoreError;
use crate::models::{
    AgeRange, GeoPoint, Photo, RegisterProfileRequest, UpdatePreferencesRequest,
    UpdateProfileRequest, UserProfile,
};

/// In-process profile store and the owner of the per-user / per-pair
/// serialization contract.
///
/// Every profile lives behind its own async mutex; operations that touch a
/// pair of profiles acquire both locks in ascending-id order, so concurrent
/// mutations of the same unordered pair always serialize and can never
/// deadlock against each other.
pub struct UserDirectory {
    inner: RwLock<DirectoryInner>,
    allowed_domains: Vec<String>,
}

struct DirectoryInner {
    by_id: HashMap<Uuid, Arc<Mutex<UserProfile>>>,
    by_email: HashMap<String, Uuid>,
}

impl UserDirectory {
    /// `allowed_domains` is the institutional-email gate; an empty list
    /// disables the restriction (development mode).
    pub fn new(allowed_domains: Vec<String>) -> Self {
        Self {
            inner: RwLock::new(DirectoryInner {
                by_id: HashMap::new(),
                by_email: HashMap::new(),
            }),
            allowed_domains: allowed_domains
                .into_iter()
                .map(|d| d.to_lowercase())
                .collect(),
        }
    }

    /// Register a new profile. The university is derived from the email
    /// domain; the account starts unverified and incomplete.
    pub async fn register(&self, req: RegisterProfileRequest) -> Result<UserProfile, CoreError> {
        req.validate()?;

        let email = req.email.trim().to_lowercase();
        let domain = email
            .rsplit_once('@')
            .map(|(_, domain)| domain.to_string())
            .ok_or_else(|| CoreError::Validation("email has no domain".to_string()))?;

        if !self.allowed_domains.is_empty() && !self.allowed_domains.contains(&domain) {
            return Err(CoreError::Validation(format!(
                "email domain {} is not a registered institution",
                domain
            )));
        }

        let mut inner = self.inner.write().await;
        if inner.by_email.contains_key(&email) {
            return Err(CoreError::Validation(format!(
                "email {} is already registered",
                email
            )));
        }

        let now = Utc::now();
        let mut profile = UserProfile {
            id: Uuid::new_v4(),
            email: email.clone(),
            first_name: req.first_name,
            last_name: req.last_name,
            age: req.age,
            gender: req.gender,
            interested_in: req.interested_in,
            university: domain,
            course: req.course,
            year_of_study: req.year_of_study,
            bio: String::new(),
            photos: vec![],
            location: GeoPoint::UNSET,
            age_range: AgeRange { min: 18, max: 30 },
            max_distance_km: 50,
            is_verified: false,
            profile_completed: false,
            liked_users: vec![],
            disliked_users: vec![],
            matches: vec![],
            last_active: now,
            created_at: now,
        };
        profile.recompute_completed();

        inner.by_email.insert(email, profile.id);
        inner
            .by_id
            .insert(profile.id, Arc::new(Mutex::new(profile.clone())));

        tracing::info!("registered profile {} at {}", profile.id, profile.university);
        Ok(profile)
    }

    /// Flip the verification flag; called by the email-verification boundary.
    pub async fn mark_verified(&self, user_id: Uuid) -> Result<(), CoreError> {
        let handle = self.handle(user_id).await?;
        let mut profile = handle.lock().await;
        profile.is_verified = true;
        tracing::debug!("profile {} verified", user_id);
        Ok(())
    }

    /// Update the free-form profile fields.
    pub async fn update_profile(&self, req: UpdateProfileRequest) -> Result<UserProfile, CoreError> {
        req.validate()?;

        let handle = self.handle(req.user_id).await?;
        let mut profile = handle.lock().await;

        if let Some(bio) = req.bio {
            profile.bio = bio;
        }
        if let Some(course) = req.course {
            profile.course = course;
        }
        if let Some(year) = req.year_of_study {
            profile.year_of_study = year;
        }

        profile.recompute_completed();
        profile.last_active = Utc::now();
        tracing::debug!("profile {} updated", req.user_id);
        Ok(profile.clone())
    }

    /// Set or clear the profile location. `(0, 0)` clears it.
    pub async fn set_location(
        &self,
        user_id: Uuid,
        longitude: f64,
        latitude: f64,
    ) -> Result<(), CoreError> {
        if !(-180.0..=180.0).contains(&longitude) || !(-90.0..=90.0).contains(&latitude) {
            return Err(CoreError::Validation(
                "coordinates out of range".to_string(),
            ));
        }

        let handle = self.handle(user_id).await?;
        let mut profile = handle.lock().await;
        profile.location = GeoPoint::new(longitude, latitude);
        profile.last_active = Utc::now();
        Ok(())
    }

    /// Update matching preferences.
    pub async fn set_preferences(&self, req: UpdatePreferencesRequest) -> Result<(), CoreError> {
        req.validate()?;
        if req.min_age > req.max_age {
            return Err(CoreError::Validation(
                "ageRange minimum exceeds maximum".to_string(),
            ));
        }

        let handle = self.handle(req.user_id).await?;
        let mut profile = handle.lock().await;
        profile.age_range = AgeRange {
            min: req.min_age,
            max: req.max_age,
        };
        profile.max_distance_km = req.max_distance_km;
        profile.last_active = Utc::now();
        Ok(())
    }

    /// Append a photo. The first photo of an empty list becomes main.
    pub async fn add_photo(&self, user_id: Uuid, url: String) -> Result<UserProfile, CoreError> {
        let handle = self.handle(user_id).await?;
        let mut profile = handle.lock().await;

        if profile.photos.len() >= 6 {
            return Err(CoreError::Validation(
                "a profile holds at most 6 photos".to_string(),
            ));
        }
        if profile.photos.iter().any(|p| p.url == url) {
            return Err(CoreError::Validation("photo already present".to_string()));
        }

        let is_main = profile.photos.is_empty();
        profile.photos.push(Photo { url, is_main });
        profile.recompute_completed();
        profile.last_active = Utc::now();
        Ok(profile.clone())
    }

    /// Remove a photo by url. Removing the main photo promotes the first
    /// remaining one, so a non-empty list always has exactly one main entry.
    pub async fn remove_photo(&self, user_id: Uuid, url: &str) -> Result<UserProfile, CoreError> {
        let handle = self.handle(user_id).await?;
        let mut profile = handle.lock().await;

        let index = profile
            .photos
            .iter()
            .position(|p| p.url == url)
            .ok_or_else(|| CoreError::NotFound(format!("photo {}", url)))?;

        let removed = profile.photos.remove(index);
        if removed.is_main {
            if let Some(first) = profile.photos.first_mut() {
                first.is_main = true;
            }
        }

        profile.recompute_completed();
        profile.last_active = Utc::now();
        Ok(profile.clone())
    }

    /// Mark the given photo as main, clearing the flag everywhere else.
    pub async fn set_main_photo(&self, user_id: Uuid, url: &str) -> Result<(), CoreError> {
        let handle = self.handle(user_id).await?;
        let mut profile = handle.lock().await;

        if !profile.photos.iter().any(|p| p.url == url) {
            return Err(CoreError::NotFound(format!("photo {}", url)));
        }
        for photo in &mut profile.photos {
            photo.is_main = photo.url == url;
        }
        profile.last_active = Utc::now();
        Ok(())
    }

    pub async fn touch_last_active(&self, user_id: Uuid) -> Result<(), CoreError> {
        let handle = self.handle(user_id).await?;
        handle.lock().await.last_active = Utc::now();
        Ok(())
    }

    /// Clone the current state of a profile.
    pub async fn read_profile(&self, user_id: Uuid) -> Result<UserProfile, CoreError> {
        let handle = self.handle(user_id).await?;
        let profile = handle.lock().await;
        Ok(profile.clone())
    }

    pub async fn exists(&self, user_id: Uuid) -> bool {
        self.inner.read().await.by_id.contains_key(&user_id)
    }

    /// Whether the pair is currently matched. The match set is symmetric, so
    /// one side is authoritative.
    pub async fn are_matched(&self, a: Uuid, b: Uuid) -> Result<bool, CoreError> {
        if !self.exists(b).await {
            return Err(CoreError::NotFound(format!("user {}", b)));
        }
        let profile = self.read_profile(a).await?;
        Ok(profile.matches.contains(&b))
    }

    /// Snapshot every profile; the candidate scan works off this copy.
    pub async fn snapshot_all(&self) -> Vec<UserProfile> {
        let handles: Vec<Arc<Mutex<UserProfile>>> =
            self.inner.read().await.by_id.values().cloned().collect();

        let mut profiles = Vec::with_capacity(handles.len());
        for handle in handles {
            profiles.push(handle.lock().await.clone());
        }
        profiles
    }

    /// Lock both profiles of a pair, in ascending-id order. Guards are
    /// returned in argument order. Callers must pass two distinct ids.
    pub async fn lock_pair(
        &self,
        a: Uuid,
        b: Uuid,
    ) -> Result<(OwnedMutexGuard<UserProfile>, OwnedMutexGuard<UserProfile>), CoreError> {
        debug_assert_ne!(a, b);
        let handle_a = self.handle(a).await?;
        let handle_b = self.handle(b).await?;

        if a < b {
            let guard_a = handle_a.lock_owned().await;
            let guard_b = handle_b.lock_owned().await;
            Ok((guard_a, guard_b))
        } else {
            let guard_b = handle_b.lock_owned().await;
            let guard_a = handle_a.lock_owned().await;
            Ok((guard_a, guard_b))
        }
    }

    async fn handle(&self, user_id: Uuid) -> Result<Arc<Mutex<UserProfile>>, CoreError> {
        self.inner
            .read()
            .await
            .by_id
            .get(&user_id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound(format!("user {}", user_id)))
    }
}
