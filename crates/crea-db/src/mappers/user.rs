//! User entity <-> model mapper

use crea_core::entities::User;
use crea_core::value_objects::Snowflake;

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            designation: model.designation,
            division: model.division,
            department: model.department,
            employee_id: model.employee_id,
            role: model.role.parse().unwrap_or_default(),
            email_verified: model.email_verified,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
