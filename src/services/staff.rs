use std::sync::Arc;

use chrono::Local;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::events::{Event, EventSender};
use crate::models::staff::FOUNDER_STAFF_ID;
use crate::models::{Staff, StaffStatus};
use crate::store::EntityStore;

const FOUNDER_ROLE: &str = "資深倉管";

/// Staff roster management. The bootstrap record is protected from deletion.
#[derive(Clone)]
pub struct StaffService {
    store: Arc<EntityStore>,
    events: EventSender,
}

impl StaffService {
    pub fn new(store: Arc<EntityStore>, events: EventSender) -> Self {
        Self { store, events }
    }

    /// One-time first-run bootstrap: creates the founder record and returns
    /// it as the current operator. Rejected once any staff exists.
    #[instrument(skip(self))]
    pub async fn bootstrap(&self, name: &str) -> Result<Staff, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "operator name cannot be empty".into(),
            ));
        }
        let roster = self.store.staff().await;
        if !roster.is_empty() {
            return Err(ServiceError::InvalidOperation(
                "system is already initialized".into(),
            ));
        }
        let founder = Staff {
            id: FOUNDER_STAFF_ID.to_string(),
            name: name.to_string(),
            role: FOUNDER_ROLE.to_string(),
            status: StaffStatus::Active,
            avatar: Staff::avatar_url(name),
            last_login: Local::now().format("%Y/%m/%d").to_string(),
        };
        self.store.replace_staff(vec![founder.clone()]).await;
        info!(name, "system initialized with founder staff");
        Ok(founder)
    }

    #[instrument(skip(self))]
    pub async fn add(&self, name: &str, role: &str) -> Result<Staff, ServiceError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ServiceError::ValidationError(
                "staff name cannot be empty".into(),
            ));
        }
        let member = Staff {
            id: format!("s-{}", Uuid::new_v4()),
            name: name.to_string(),
            role: role.to_string(),
            status: StaffStatus::Active,
            avatar: Staff::avatar_url(name),
            last_login: String::new(),
        };
        let mut roster = self.store.staff().await;
        roster.push(member.clone());
        self.store.replace_staff(roster).await;
        Ok(member)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let roster = self.store.staff().await;
        let member = roster
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("staff {} not found", id)))?;
        if member.is_protected() {
            return Err(ServiceError::InvalidOperation(
                "the system initializer account cannot be deleted".into(),
            ));
        }
        let next: Vec<Staff> = roster.into_iter().filter(|s| s.id != id).collect();
        self.store.replace_staff(next).await;
        Ok(())
    }

    /// Selects the current operator and refreshes their last-login stamp.
    #[instrument(skip(self))]
    pub async fn login(&self, id: &str) -> Result<Staff, ServiceError> {
        let mut roster = self.store.staff().await;
        let member = roster
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("staff {} not found", id)))?;
        member.last_login = Local::now().format("%Y/%m/%d").to_string();
        let snapshot = member.clone();
        self.store.replace_staff(roster).await;
        self.events
            .send(Event::StaffLoggedIn {
                staff_id: snapshot.id.clone(),
            })
            .await;
        Ok(snapshot)
    }
}
