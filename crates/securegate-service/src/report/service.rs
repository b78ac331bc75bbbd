//! Report submission and review.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use securegate_core::error::AppError;
use securegate_core::types::id::ReportId;
use securegate_entity::report::{NewReport, Report, ReportStatus};

use crate::context::RequestContext;
use crate::notifier::EventNotifier;
use crate::repository::ReportRepository;

/// Changes an administrator may apply to a report.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportUpdate {
    /// New review status.
    #[serde(default)]
    pub status: Option<ReportStatus>,
    /// Response for the resident.
    #[serde(default)]
    pub admin_response: Option<String>,
}

/// Submits and reviews incident reports.
#[derive(Debug, Clone)]
pub struct ReportService {
    /// Report repository.
    repo: Arc<dyn ReportRepository>,
    /// Realtime notifier.
    notifier: Arc<dyn EventNotifier>,
}

impl ReportService {
    /// Creates a new report service.
    pub fn new(repo: Arc<dyn ReportRepository>, notifier: Arc<dyn EventNotifier>) -> Self {
        Self { repo, notifier }
    }

    /// Submits a report on behalf of the caller.
    pub async fn create(&self, ctx: &RequestContext, fields: NewReport) -> Result<Report, AppError> {
        if fields.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }

        let report = Report::submit(ctx.user_id.clone(), fields);
        self.repo.insert(&report).await?;

        info!(report_id = %report.id, user_id = %ctx.user_id, "Report submitted");
        Ok(report)
    }

    /// Reads a report. Residents may only read their own.
    pub async fn get(&self, ctx: &RequestContext, id: &ReportId) -> Result<Report, AppError> {
        let report = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))?;

        if !ctx.role.is_admin() && !report.is_owned_by(&ctx.user_id) {
            return Err(AppError::authorization("Access denied"));
        }

        Ok(report)
    }

    /// Reports submitted by the caller.
    pub async fn list_own(&self, ctx: &RequestContext) -> Result<Vec<Report>, AppError> {
        self.repo.find_by_user(&ctx.user_id).await
    }

    /// Applies an administrator's review and tells the report's owner.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &ReportId,
        update: ReportUpdate,
    ) -> Result<Report, AppError> {
        ctx.require_admin()?;

        let mut report = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Report not found"))?;

        if let Some(status) = update.status {
            report.status = status;
        }
        if let Some(response) = update.admin_response {
            report.admin_response = Some(response);
        }
        report.updated_at = Utc::now();

        self.repo.save(&report).await?;

        info!(
            report_id = %report.id,
            admin_id = %ctx.user_id,
            status = ?report.status,
            "Report reviewed"
        );

        match serde_json::to_value(&report) {
            Ok(payload) => self.notifier.notify_report_updated(payload, &report.user_id),
            Err(e) => error!(error = %e, "Failed to serialize report for notification"),
        }

        Ok(report)
    }
}
