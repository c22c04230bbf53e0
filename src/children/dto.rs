use serde::Deserialize;

use crate::models::AgeGroup;

#[derive(Debug, Deserialize)]
pub struct RegisterChildRequest {
    pub guardian_email: String,
    pub full_name: String,
    pub age_group: AgeGroup,
}

#[derive(Debug, Deserialize)]
pub struct GuardianQuery {
    pub guardian_email: String,
}
