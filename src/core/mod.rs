// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod filters;

pub use distance::{calculate_bounding_box, haversine_distance, haversine_meters, is_within_bounding_box, round_km};
pub use engine::{MatchOutcome, MatchingEngine};
pub use filters::{is_candidate, mutual_interest, within_reach};
