//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::Utc;
use crea_core::entities::{
    Achievement, Advertisement, BodyMember, BreakingNews, Circular, CourtCase, Donation, Event,
    ExternalLink, ForumPost, ForumTopic, Manual, Membership, MembershipApplicant, Notification,
    Setting, User,
};
use crea_core::{DocumentSource, PaymentOrder, StoredFile};

use super::responses::{
    AchievementResponse, AdvertisementResponse, ApplicantResponse, BodyMemberResponse,
    BreakingNewsResponse, CheckoutOrderResponse, CircularResponse, CourtCaseResponse,
    DocumentResponse, DonationResponse, EventResponse, ExternalLinkResponse, ManualResponse,
    MembershipResponse, NotificationResponse, PostResponse, SettingResponse, TopicResponse,
    UploadResponse, UserResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            designation: user.designation.clone(),
            division: user.division.clone(),
            department: user.department.clone(),
            employee_id: user.employee_id.clone(),
            role: user.role.as_str().to_string(),
            email_verified: user.email_verified,
            is_active: user.is_active,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

// ============================================================================
// Event & Document Mappers
// ============================================================================

impl From<&Event> for EventResponse {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.to_string(),
            title: event.title.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            starts_at: event.starts_at,
            ends_at: event.ends_at,
            image_url: event.image_url.clone(),
            is_upcoming: event.is_upcoming(Utc::now()),
            created_by: event.created_by.to_string(),
            created_at: event.created_at,
            updated_at: event.updated_at,
        }
    }
}

impl From<&DocumentSource> for DocumentResponse {
    fn from(source: &DocumentSource) -> Self {
        match source {
            DocumentSource::Url { url } => Self {
                kind: "url",
                url: url.clone(),
                original_name: None,
                content_type: None,
                size: None,
            },
            DocumentSource::File(file) => Self {
                kind: "file",
                url: file.public_url(),
                original_name: Some(file.original_name.clone()),
                content_type: Some(file.content_type.clone()),
                size: Some(file.size),
            },
        }
    }
}

impl From<&Circular> for CircularResponse {
    fn from(circular: &Circular) -> Self {
        Self {
            id: circular.id.to_string(),
            title: circular.title.clone(),
            circular_number: circular.circular_number.clone(),
            issued_on: circular.issued_on,
            category: circular.category.clone(),
            document: DocumentResponse::from(&circular.source),
            created_by: circular.created_by.to_string(),
            created_at: circular.created_at,
            updated_at: circular.updated_at,
        }
    }
}

impl From<&Manual> for ManualResponse {
    fn from(manual: &Manual) -> Self {
        Self {
            id: manual.id.to_string(),
            title: manual.title.clone(),
            description: manual.description.clone(),
            category: manual.category.clone(),
            document: DocumentResponse::from(&manual.source),
            created_by: manual.created_by.to_string(),
            created_at: manual.created_at,
            updated_at: manual.updated_at,
        }
    }
}

impl From<&CourtCase> for CourtCaseResponse {
    fn from(case: &CourtCase) -> Self {
        Self {
            id: case.id.to_string(),
            case_number: case.case_number.clone(),
            title: case.title.clone(),
            court: case.court.clone(),
            status: case.status.as_str().to_string(),
            next_hearing: case.next_hearing,
            description: case.description.clone(),
            document: case.document.as_ref().map(DocumentResponse::from),
            created_by: case.created_by.to_string(),
            created_at: case.created_at,
            updated_at: case.updated_at,
        }
    }
}

impl From<&StoredFile> for UploadResponse {
    fn from(file: &StoredFile) -> Self {
        Self {
            url: file.public_url(),
            path: file.path.clone(),
            original_name: file.original_name.clone(),
            content_type: file.content_type.clone(),
            size: file.size,
        }
    }
}

// ============================================================================
// Forum Mappers
// ============================================================================

impl From<&ForumTopic> for TopicResponse {
    fn from(topic: &ForumTopic) -> Self {
        Self {
            id: topic.id.to_string(),
            title: topic.title.clone(),
            body: topic.body.clone(),
            category: topic.category.clone(),
            author_id: topic.author_id.to_string(),
            author_name: None,
            is_pinned: topic.is_pinned,
            is_locked: topic.is_locked,
            post_count: topic.post_count,
            last_post_at: topic.last_post_at,
            created_at: topic.created_at,
            updated_at: topic.updated_at,
        }
    }
}

impl From<&ForumPost> for PostResponse {
    fn from(post: &ForumPost) -> Self {
        Self {
            id: post.id.to_string(),
            topic_id: post.topic_id.to_string(),
            author_id: post.author_id.to_string(),
            body: post.body.clone(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

// ============================================================================
// Membership & Payment Mappers
// ============================================================================

impl From<&MembershipApplicant> for ApplicantResponse {
    fn from(a: &MembershipApplicant) -> Self {
        Self {
            full_name: a.full_name.clone(),
            email: a.email.clone(),
            phone: a.phone.clone(),
            designation: a.designation.clone(),
            division: a.division.clone(),
            department: a.department.clone(),
            employee_id: a.employee_id.clone(),
            date_of_birth: a.date_of_birth,
            address: a.address.clone(),
        }
    }
}

impl From<&Membership> for MembershipResponse {
    fn from(m: &Membership) -> Self {
        Self {
            id: m.id.to_string(),
            user_id: m.user_id.to_string(),
            plan: m.plan.as_str().to_string(),
            status: m.status.as_str().to_string(),
            applicant: ApplicantResponse::from(&m.applicant),
            amount: m.amount,
            order_id: m.order_id.clone(),
            payment_id: m.payment_id.clone(),
            membership_number: m.membership_number.clone(),
            valid_until: m.valid_until,
            rejection_reason: m.rejection_reason.clone(),
            activated_at: m.activated_at,
            is_current: m.is_current(Utc::now()),
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&Donation> for DonationResponse {
    fn from(d: &Donation) -> Self {
        Self {
            id: d.id.to_string(),
            user_id: d.user_id.map(|id| id.to_string()),
            donor_name: d.donor_name.clone(),
            email: d.email.clone(),
            phone: d.phone.clone(),
            amount: d.amount,
            purpose: d.purpose.clone(),
            message: d.message.clone(),
            status: d.status.as_str().to_string(),
            order_id: d.order_id.clone(),
            payment_id: d.payment_id.clone(),
            paid_at: d.paid_at,
            created_at: d.created_at,
            updated_at: d.updated_at,
        }
    }
}

/// Checkout details for an order opened with the gateway
pub fn checkout_order(order: &PaymentOrder, key_id: &str) -> CheckoutOrderResponse {
    CheckoutOrderResponse {
        order_id: order.id.clone(),
        amount: order.amount,
        currency: order.currency.clone(),
        key_id: key_id.to_string(),
    }
}

// ============================================================================
// Notification & Setting Mappers
// ============================================================================

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id.to_string(),
            user_id: n.user_id.to_string(),
            title: n.title.clone(),
            message: n.message.clone(),
            link: n.link.clone(),
            is_read: n.is_read(),
            read_at: n.read_at,
            created_at: n.created_at,
        }
    }
}

impl From<&Setting> for SettingResponse {
    fn from(s: &Setting) -> Self {
        Self {
            key: s.key.clone(),
            value: s.value.clone(),
            updated_at: s.updated_at,
        }
    }
}

// ============================================================================
// Site Content Mappers
// ============================================================================

impl From<&ExternalLink> for ExternalLinkResponse {
    fn from(l: &ExternalLink) -> Self {
        Self {
            id: l.id.to_string(),
            title: l.title.clone(),
            url: l.url.clone(),
            category: l.category.clone(),
            position: l.position,
            created_at: l.created_at,
            updated_at: l.updated_at,
        }
    }
}

impl From<&BodyMember> for BodyMemberResponse {
    fn from(m: &BodyMember) -> Self {
        Self {
            id: m.id.to_string(),
            name: m.name.clone(),
            designation: m.designation.clone(),
            division: m.division.clone(),
            phone: m.phone.clone(),
            email: m.email.clone(),
            photo_url: m.photo_url.clone(),
            position: m.position,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

impl From<&Advertisement> for AdvertisementResponse {
    fn from(ad: &Advertisement) -> Self {
        Self {
            id: ad.id.to_string(),
            title: ad.title.clone(),
            image_url: ad.image_url.clone(),
            link_url: ad.link_url.clone(),
            is_active: ad.is_active,
            starts_at: ad.starts_at,
            ends_at: ad.ends_at,
            position: ad.position,
            created_at: ad.created_at,
            updated_at: ad.updated_at,
        }
    }
}

impl From<&Achievement> for AchievementResponse {
    fn from(a: &Achievement) -> Self {
        Self {
            id: a.id.to_string(),
            title: a.title.clone(),
            description: a.description.clone(),
            achieved_on: a.achieved_on,
            image_url: a.image_url.clone(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

impl From<&BreakingNews> for BreakingNewsResponse {
    fn from(n: &BreakingNews) -> Self {
        Self {
            id: n.id.to_string(),
            text: n.text.clone(),
            link: n.link.clone(),
            is_active: n.is_active,
            position: n.position,
            created_at: n.created_at,
            updated_at: n.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crea_core::Snowflake;

    #[test]
    fn test_file_document_exposes_public_url() {
        let source = DocumentSource::File(StoredFile {
            path: "documents/9.pdf".into(),
            original_name: "Transfer order.pdf".into(),
            content_type: "application/pdf".into(),
            size: 1200,
        });
        let doc = DocumentResponse::from(&source);
        assert_eq!(doc.kind, "file");
        assert_eq!(doc.url, "/uploads/documents/9.pdf");
        assert_eq!(doc.size, Some(1200));

        let json = serde_json::to_value(DocumentResponse::from(&DocumentSource::Url {
            url: "https://indianrailways.gov.in/x.pdf".into(),
        }))
        .unwrap();
        assert_eq!(json["kind"], "url");
        assert!(json.get("size").is_none());
    }

    #[test]
    fn test_user_ids_are_strings() {
        let user = User::new(Snowflake::new(1_234_567_890_123), "Asha".into(), "asha@example.com");
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert_eq!(json["id"], "1234567890123");
        assert_eq!(json["role"], "member");
    }

    #[test]
    fn test_checkout_order() {
        let order = PaymentOrder {
            id: "order_A1".into(),
            amount: 50_000,
            currency: "INR".into(),
            receipt: Some("42".into()),
        };
        let checkout = checkout_order(&order, "rzp_test_key");
        assert_eq!(checkout.order_id, "order_A1");
        assert_eq!(checkout.amount, 50_000);
        assert_eq!(checkout.key_id, "rzp_test_key");
    }
}
