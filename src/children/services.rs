use std::sync::Arc;

use axum::extract::FromRef;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::repo::ChildStore;
use super::repo_types::Child;
use crate::error::KitchenError;
use crate::models::AgeGroup;
use crate::state::AppState;
use crate::validation::{normalize_email, require_text};

#[derive(Clone)]
pub struct ChildRegistry {
    children: Arc<dyn ChildStore>,
}

impl FromRef<AppState> for ChildRegistry {
    fn from_ref(state: &AppState) -> Self {
        Self::new(state.children.clone())
    }
}

impl ChildRegistry {
    pub fn new(children: Arc<dyn ChildStore>) -> Self {
        Self { children }
    }

    pub async fn register_child(
        &self,
        guardian_email: &str,
        full_name: &str,
        age_group: AgeGroup,
    ) -> Result<Child, KitchenError> {
        let child = Child {
            id: Uuid::new_v4(),
            guardian_email: normalize_email(guardian_email)?,
            full_name: require_text("child name", full_name)?,
            age_group,
            created_at: OffsetDateTime::now_utc(),
        };
        if !self.children.insert_child(&child).await? {
            warn!(guardian = %child.guardian_email, child = %child.full_name, "child already registered");
            return Err(KitchenError::Validation(format!(
                "{} is already registered",
                child.full_name
            )));
        }
        info!(guardian = %child.guardian_email, child = %child.full_name, age_group = age_group.as_str(), "child registered");
        Ok(child)
    }

    pub async fn list_children(&self, guardian_email: &str) -> Result<Vec<Child>, KitchenError> {
        let email = normalize_email(guardian_email)?;
        Ok(self.children.list_children(&email).await?)
    }

    /// Looks a child up by its guardian; both names are normalized first.
    pub async fn find_child(
        &self,
        guardian_email: &str,
        full_name: &str,
    ) -> Result<Child, KitchenError> {
        let email = normalize_email(guardian_email)?;
        let name = require_text("child name", full_name)?;
        self.children
            .find_child(&email, &name)
            .await?
            .ok_or_else(|| KitchenError::NotFound(format!("child {name:?} of {email}")))
    }
}
