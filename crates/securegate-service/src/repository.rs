//! Repository traits for the external document store.

use async_trait::async_trait;

use securegate_core::result::AppResult;
use securegate_core::types::id::{EmergencyId, ReportId, UserId};
use securegate_entity::emergency::{Emergency, EmergencyStatus};
use securegate_entity::report::Report;

/// Persistence for emergency documents.
#[async_trait]
pub trait EmergencyRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new emergency.
    async fn insert(&self, emergency: &Emergency) -> AppResult<()>;

    /// Replace an existing emergency.
    async fn save(&self, emergency: &Emergency) -> AppResult<()>;

    /// Find an emergency by ID.
    async fn find_by_id(&self, id: &EmergencyId) -> AppResult<Option<Emergency>>;

    /// All emergencies raised by a user.
    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Vec<Emergency>>;

    /// All emergencies in the given status.
    async fn find_by_status(&self, status: EmergencyStatus) -> AppResult<Vec<Emergency>>;
}

/// Persistence for report documents.
#[async_trait]
pub trait ReportRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert a new report.
    async fn insert(&self, report: &Report) -> AppResult<()>;

    /// Replace an existing report.
    async fn save(&self, report: &Report) -> AppResult<()>;

    /// Find a report by ID.
    async fn find_by_id(&self, id: &ReportId) -> AppResult<Option<Report>>;

    /// All reports submitted by a user.
    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Vec<Report>>;
}
