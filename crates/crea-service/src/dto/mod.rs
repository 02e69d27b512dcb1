//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    ApplyMembershipRequest, ChangePasswordRequest, CreateAchievementRequest,
    CreateAdvertisementRequest, CreateBodyMemberRequest, CreateBreakingNewsRequest,
    CreateCircularRequest, CreateCourtCaseRequest, CreateDonationRequest, CreateEventRequest,
    CreateExternalLinkRequest, CreateManualRequest, CreateNotificationRequest, CreatePostRequest,
    CreateTopicRequest, LoginRequest, LogoutRequest, PutSettingRequest, RefreshTokenRequest,
    RegisterRequest, RejectMembershipRequest, ResetPasswordRequest, SendOtpRequest,
    SetActiveRequest, UpdateAchievementRequest, UpdateAdvertisementRequest,
    UpdateBodyMemberRequest, UpdateBreakingNewsRequest, UpdateCircularRequest,
    UpdateCourtCaseRequest, UpdateEventRequest, UpdateExternalLinkRequest, UpdateManualRequest,
    UpdatePostRequest, UpdateProfileRequest, UpdateRoleRequest, UpdateTopicRequest,
    UploadedFile, VerifyPaymentRequest,
};

pub use responses::{
    AchievementResponse, AdvertisementResponse, ApiResponse, ApplicantResponse, AuthResponse,
    BodyMemberResponse, BreakingNewsResponse, CheckoutOrderResponse, CircularResponse,
    CourtCaseResponse, CreateDonationResponse, DocumentResponse, DonationResponse, EventResponse,
    ExternalLinkResponse, HealthChecks, HealthResponse, ManualResponse, MembershipApplyResponse,
    MembershipPlansResponse, MembershipResponse, MessageResponse, NotificationCountResponse,
    NotificationListResponse, NotificationResponse, OtpSentResponse, PageOrder,
    PaginatedResponse, PaginationMeta, PlanResponse, PostResponse, ReadinessResponse,
    SettingResponse, TopicListResponse, TopicResponse, UploadResponse, UserResponse,
    WebhookResponse,
};

pub use mappers::checkout_order;
