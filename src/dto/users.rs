use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Gender, User};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub gender: Option<Gender>,
}

/// Partial profile update: absent fields are left untouched.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMeRequest {
    pub password: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UserStatusUpdate {
    pub is_active: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct UserList {
    #[schema(value_type = Vec<User>)]
    pub items: Vec<User>,
}
