use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Profile gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

/// Who a user wants to be shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestedIn {
    Male,
    Female,
    Both,
}

impl InterestedIn {
    /// Whether this preference accepts the given gender.
    pub fn accepts(self, gender: Gender) -> bool {
        match self {
            InterestedIn::Both => true,
            InterestedIn::Male => gender == Gender::Male,
            InterestedIn::Female => gender == Gender::Female,
        }
    }
}

/// Profile photo reference; storage and upload validation live outside the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    #[serde(rename = "isMain")]
    pub is_main: bool,
}

/// A (longitude, latitude) pair. `(0, 0)` is the "unset" sentinel and is
/// never treated as a real coordinate by the geo filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl GeoPoint {
    pub const UNSET: GeoPoint = GeoPoint {
        longitude: 0.0,
        latitude: 0.0,
    };

    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self { longitude, latitude }
    }

    pub fn is_set(&self) -> bool {
        self.longitude != 0.0 || self.latitude != 0.0
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::UNSET
    }
}

/// Preferred candidate age window, both bounds inclusive.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    pub fn contains(&self, age: u8) -> bool {
        age >= self.min && age <= self.max
    }
}

/// User profile with demographics, preferences and relationship sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(rename = "interestedIn")]
    pub interested_in: InterestedIn,
    pub university: String,
    pub course: String,
    #[serde(rename = "yearOfStudy")]
    pub year_of_study: u8,
    pub bio: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub location: GeoPoint,
    #[serde(rename = "ageRange")]
    pub age_range: AgeRange,
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: u16,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(rename = "profileCompleted", default)]
    pub profile_completed: bool,
    #[serde(rename = "likedUsers", default)]
    pub liked_users: Vec<Uuid>,
    #[serde(rename = "dislikedUsers", default)]
    pub disliked_users: Vec<Uuid>,
    #[serde(default)]
    pub matches: Vec<Uuid>,
    #[serde(rename = "lastActive")]
    pub last_active: DateTime<Utc>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Whether the profile carries a real coordinate to filter on.
    pub fn located(&self) -> bool {
        self.location.is_set()
    }

    pub fn main_photo(&self) -> Option<&Photo> {
        self.photos.iter().find(|p| p.is_main)
    }

    /// Recompute the derived `profile_completed` flag.
    ///
    /// Demographics are typed and validated at registration, so completion
    /// hinges on the free-form tail: names, university, bio and at least one
    /// photo. Call this after every mutation that could affect it; the flag
    /// is never set by hand.
    pub fn recompute_completed(&mut self) {
        self.profile_completed = !self.first_name.is_empty()
            && !self.last_name.is_empty()
            && !self.university.is_empty()
            && !self.bio.is_empty()
            && !self.photos.is_empty();
    }

    /// Build the candidate-facing summary of this profile.
    pub fn summary(&self, distance_km: Option<u32>) -> CandidateSummary {
        CandidateSummary {
            user_id: self.id,
            first_name: self.first_name.clone(),
            age: self.age,
            gender: self.gender,
            university: self.university.clone(),
            course: self.course.clone(),
            bio: self.bio.clone(),
            photos: self.photos.clone(),
            distance_km,
            last_active: self.last_active,
        }
    }
}

/// Candidate feed entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateSummary {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    pub age: u8,
    pub gender: Gender,
    pub university: String,
    pub course: String,
    pub bio: String,
    pub photos: Vec<Photo>,
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<u32>,
    #[serde(rename = "lastActive")]
    pub last_active: DateTime<Utc>,
}

/// Unordered pair of user ids; the identity of a match or a conversation.
///
/// The constructor sorts, so `{A,B}` and `{B,A}` hash and compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserPair(Uuid, Uuid);

impl UserPair {
    pub fn new(a: Uuid, b: Uuid) -> Self {
        if a <= b {
            UserPair(a, b)
        } else {
            UserPair(b, a)
        }
    }

    pub fn lower(&self) -> Uuid {
        self.0
    }

    pub fn upper(&self) -> Uuid {
        self.1
    }
}

/// Message payload kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Image,
    Location,
}

impl Default for MessageKind {
    fn default() -> Self {
        MessageKind::Text
    }
}

/// Read receipt on a message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadReceipt {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "readAt")]
    pub read_at: DateTime<Utc>,
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    #[serde(rename = "senderId")]
    pub sender_id: Uuid,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: MessageKind,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "readBy", default)]
    pub read_by: Vec<ReadReceipt>,
}

impl Message {
    pub fn read_by_user(&self, user_id: Uuid) -> bool {
        self.read_by.iter().any(|r| r.user_id == user_id)
    }
}

/// Denormalized pointer to the newest non-deleted message of a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastMessage {
    pub content: String,
    #[serde(rename = "senderId")]
    pub sender_id: Uuid,
    pub timestamp: DateTime<Utc>,
}

/// A two-party conversation between matched users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub participants: [Uuid; 2],
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(rename = "lastMessage")]
    pub last_message: Option<LastMessage>,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Conversation {
    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }

    pub fn counterpart_of(&self, user_id: Uuid) -> Option<Uuid> {
        if !self.has_participant(user_id) {
            return None;
        }
        self.participants.iter().copied().find(|p| *p != user_id)
    }

    /// Rebuild `last_message` from the current message tail. This is the only
    /// place the pointer is derived; it is never assigned anywhere else.
    pub fn recompute_last_message(&mut self) {
        self.last_message = self.messages.last().map(|m| LastMessage {
            content: m.content.clone(),
            sender_id: m.sender_id,
            timestamp: m.created_at,
        });
    }
}

/// Conversation list entry: summary + counterpart excerpt + last message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationOverview {
    #[serde(rename = "conversationId")]
    pub conversation_id: Uuid,
    pub counterpart: CounterpartExcerpt,
    #[serde(rename = "lastMessage")]
    pub last_message: Option<LastMessage>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// The slice of a counterpart's profile shown in chat listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterpartExcerpt {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "firstName")]
    pub first_name: String,
    pub age: u8,
    pub university: String,
    #[serde(rename = "mainPhotoUrl")]
    pub main_photo_url: Option<String>,
}

/// Geospatial bounding box used as a cheap pre-filter before exact haversine.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
