// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeRange, BoundingBox, CandidateSummary, Conversation, ConversationOverview,
    CounterpartExcerpt, Gender, GeoPoint, InterestedIn, LastMessage, Message, MessageKind, Photo,
    ReadReceipt, UserPair, UserProfile,
};
pub use requests::{
    AddPhotoRequest, DeleteMessageRequest, FindCandidatesRequest, ListConversationsQuery,
    ListMessagesQuery, MarkReadRequest, OpenConversationRequest, PhotoRefRequest,
    RegisterProfileRequest, SendMessageRequest, SwipeRequest, UpdateLocationRequest,
    UpdatePreferencesRequest, UpdateProfileRequest, VerifyProfileRequest,
};
pub use responses::{
    AckResponse, CandidatesResponse, ConversationListResponse, ErrorResponse, HealthResponse,
    MessagesPageResponse, SwipeResponse,
};
