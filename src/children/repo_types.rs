use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::AgeGroup;

/// A child registered by a guardian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Child {
    pub id: Uuid,
    pub guardian_email: String,
    pub full_name: String,
    pub age_group: AgeGroup,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct ChildRow {
    pub id: Uuid,
    pub guardian_email: String,
    pub full_name: String,
    pub age_group: String,
    pub created_at: OffsetDateTime,
}

impl TryFrom<ChildRow> for Child {
    type Error = anyhow::Error;

    fn try_from(r: ChildRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            guardian_email: r.guardian_email,
            full_name: r.full_name,
            age_group: r.age_group.parse()?,
            created_at: r.created_at,
        })
    }
}
