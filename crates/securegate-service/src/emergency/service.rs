//! Emergency lifecycle: raise, respond, resolve.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use securegate_core::error::AppError;
use securegate_core::types::id::EmergencyId;
use securegate_entity::emergency::{Emergency, EmergencyStatus, EmergencyType};

use crate::context::RequestContext;
use crate::notifier::EventNotifier;
use crate::repository::EmergencyRepository;

/// Changes an administrator may apply to an emergency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmergencyUpdate {
    /// New status.
    #[serde(default)]
    pub status: Option<EmergencyStatus>,
    /// Notes for the resident.
    #[serde(default)]
    pub response_notes: Option<String>,
}

/// Raises and resolves emergencies.
#[derive(Debug, Clone)]
pub struct EmergencyService {
    /// Emergency repository.
    repo: Arc<dyn EmergencyRepository>,
    /// Realtime notifier.
    notifier: Arc<dyn EventNotifier>,
}

impl EmergencyService {
    /// Creates a new emergency service.
    pub fn new(repo: Arc<dyn EmergencyRepository>, notifier: Arc<dyn EventNotifier>) -> Self {
        Self { repo, notifier }
    }

    /// Raises a new emergency and alerts every administrator.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        kind: EmergencyType,
        location: &str,
    ) -> Result<Emergency, AppError> {
        if location.trim().is_empty() {
            return Err(AppError::validation("Location is required"));
        }

        let emergency = Emergency::new(ctx.user_id.clone(), kind, location);
        self.repo.insert(&emergency).await?;

        info!(
            emergency_id = %emergency.id,
            user_id = %ctx.user_id,
            "Emergency raised"
        );

        match serde_json::to_value(&emergency) {
            Ok(payload) => self.notifier.notify_emergency_created(payload),
            Err(e) => error!(error = %e, "Failed to serialize emergency for notification"),
        }

        Ok(emergency)
    }

    /// Applies an administrator's update and tells the reporting resident.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &EmergencyId,
        update: EmergencyUpdate,
    ) -> Result<Emergency, AppError> {
        ctx.require_admin()?;

        let mut emergency = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Emergency not found"))?;

        if let Some(status) = update.status {
            emergency.transition(status, ctx.user_id.clone());
        }
        if let Some(notes) = update.response_notes {
            emergency.response_notes = Some(notes);
        }

        self.repo.save(&emergency).await?;

        info!(
            emergency_id = %emergency.id,
            admin_id = %ctx.user_id,
            status = ?emergency.status,
            "Emergency updated"
        );

        match serde_json::to_value(&emergency) {
            Ok(payload) => self
                .notifier
                .notify_emergency_updated(payload, &emergency.user_id),
            Err(e) => error!(error = %e, "Failed to serialize emergency for notification"),
        }

        Ok(emergency)
    }

    /// Emergencies raised by the caller.
    pub async fn list_own(&self, ctx: &RequestContext) -> Result<Vec<Emergency>, AppError> {
        self.repo.find_by_user(&ctx.user_id).await
    }

    /// Emergencies still awaiting a response. Admin only.
    pub async fn active_emergencies(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<Emergency>, AppError> {
        ctx.require_admin()?;
        self.repo.find_by_status(EmergencyStatus::Active).await
    }
}
