//! UniMatch - matching and chat core for the UniMatch campus dating app
//!
//! This library implements the two non-trivial subsystems of the app: the
//! matching engine (candidate filtering, distance ranking and mutual-match
//! reconciliation) and the conversation store (per-pair chat identity,
//! pagination and read-receipt tracking). Everything else (auth, email
//! delivery, photo storage, the push transport) lives behind narrow
//! collaborator boundaries.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{calculate_bounding_box, haversine_distance, round_km},
    MatchOutcome, MatchingEngine,
};
pub use crate::error::CoreError;
pub use crate::models::{CandidateSummary, Conversation, Message, UserProfile};
pub use crate::services::{
    ChannelBridge, ConversationStore, Notification, NotificationBridge, NullBridge, UserDirectory,
};
