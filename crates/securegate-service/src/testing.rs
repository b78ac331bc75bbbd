//! In-memory doubles for service tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use securegate_core::error::AppError;
use securegate_core::result::AppResult;
use securegate_core::types::id::{EmergencyId, ReportId, UserId};
use securegate_entity::emergency::{Emergency, EmergencyStatus};
use securegate_entity::report::Report;

use crate::notifier::EventNotifier;
use crate::repository::{EmergencyRepository, ReportRepository};

#[derive(Debug, Default)]
pub struct MemoryEmergencyRepo {
    docs: Mutex<Vec<Emergency>>,
}

#[async_trait]
impl EmergencyRepository for MemoryEmergencyRepo {
    async fn insert(&self, emergency: &Emergency) -> AppResult<()> {
        self.docs.lock().unwrap().push(emergency.clone());
        Ok(())
    }

    async fn save(&self, emergency: &Emergency) -> AppResult<()> {
        let mut docs = self.docs.lock().unwrap();
        match docs.iter_mut().find(|e| e.id == emergency.id) {
            Some(slot) => {
                *slot = emergency.clone();
                Ok(())
            }
            None => Err(AppError::not_found("Emergency not found")),
        }
    }

    async fn find_by_id(&self, id: &EmergencyId) -> AppResult<Option<Emergency>> {
        Ok(self.docs.lock().unwrap().iter().find(|e| &e.id == id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Vec<Emergency>> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|e| &e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_by_status(&self, status: EmergencyStatus) -> AppResult<Vec<Emergency>> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.status == status)
            .cloned()
            .collect())
    }
}

#[derive(Debug)]
pub struct FailingEmergencyRepo;

#[async_trait]
impl EmergencyRepository for FailingEmergencyRepo {
    async fn insert(&self, _emergency: &Emergency) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn save(&self, _emergency: &Emergency) -> AppResult<()> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_id(&self, _id: &EmergencyId) -> AppResult<Option<Emergency>> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_user(&self, _user_id: &UserId) -> AppResult<Vec<Emergency>> {
        Err(AppError::database("connection refused"))
    }

    async fn find_by_status(&self, _status: EmergencyStatus) -> AppResult<Vec<Emergency>> {
        Err(AppError::database("connection refused"))
    }
}

#[derive(Debug, Default)]
pub struct MemoryReportRepo {
    docs: Mutex<HashMap<ReportId, Report>>,
}

#[async_trait]
impl ReportRepository for MemoryReportRepo {
    async fn insert(&self, report: &Report) -> AppResult<()> {
        self.docs.lock().unwrap().insert(report.id, report.clone());
        Ok(())
    }

    async fn save(&self, report: &Report) -> AppResult<()> {
        self.docs.lock().unwrap().insert(report.id, report.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ReportId) -> AppResult<Option<Report>> {
        Ok(self.docs.lock().unwrap().get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> AppResult<Vec<Report>> {
        Ok(self
            .docs
            .lock()
            .unwrap()
            .values()
            .filter(|r| &r.user_id == user_id)
            .cloned()
            .collect())
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    created: Mutex<Vec<Value>>,
    updated: Mutex<Vec<(Value, UserId)>>,
    emergencies_updated: Mutex<Vec<(Value, UserId)>>,
}

impl RecordingNotifier {
    pub fn emergencies_created(&self) -> Vec<Value> {
        self.created.lock().unwrap().clone()
    }

    pub fn reports_updated(&self) -> Vec<(Value, UserId)> {
        self.updated.lock().unwrap().clone()
    }

    pub fn emergencies_updated(&self) -> Vec<(Value, UserId)> {
        self.emergencies_updated.lock().unwrap().clone()
    }
}

impl EventNotifier for RecordingNotifier {
    fn notify_emergency_created(&self, emergency: Value) {
        self.created.lock().unwrap().push(emergency);
    }

    fn notify_report_updated(&self, report: Value, user_id: &UserId) {
        self.updated.lock().unwrap().push((report, user_id.clone()));
    }

    fn notify_emergency_updated(&self, emergency: Value, user_id: &UserId) {
        self.emergencies_updated
            .lock()
            .unwrap()
            .push((emergency, user_id.clone()));
    }
}
