//! Membership and donation mappers

use crea_core::entities::{
    Donation, DonationStatus, Membership, MembershipApplicant, MembershipPlan, MembershipStatus,
};
use crea_core::value_objects::Snowflake;

use crate::models::{DonationModel, MembershipModel};

impl From<MembershipModel> for Membership {
    fn from(model: MembershipModel) -> Self {
        Membership {
            id: Snowflake::new(model.id),
            user_id: Snowflake::new(model.user_id),
            plan: model.plan.parse().unwrap_or(MembershipPlan::Annual),
            status: model.status.parse().unwrap_or(MembershipStatus::Pending),
            applicant: MembershipApplicant {
                full_name: model.full_name,
                email: model.email,
                phone: model.phone,
                designation: model.designation,
                division: model.division,
                department: model.department,
                employee_id: model.employee_id,
                date_of_birth: model.date_of_birth,
                address: model.address,
            },
            amount: model.amount,
            order_id: model.order_id,
            payment_id: model.payment_id,
            membership_number: model.membership_number,
            valid_until: model.valid_until,
            rejection_reason: model.rejection_reason,
            activated_at: model.activated_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<DonationModel> for Donation {
    fn from(model: DonationModel) -> Self {
        Donation {
            id: Snowflake::new(model.id),
            user_id: model.user_id.map(Snowflake::new),
            donor_name: model.donor_name,
            email: model.email,
            phone: model.phone,
            amount: model.amount,
            purpose: model.purpose,
            message: model.message,
            status: model.status.parse().unwrap_or(DonationStatus::Created),
            order_id: model.order_id,
            payment_id: model.payment_id,
            paid_at: model.paid_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
