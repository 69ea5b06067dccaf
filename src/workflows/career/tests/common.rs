use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::career::benchmark::{BenchmarkEngine, BenchmarkReport};
use crate::workflows::career::clock::FixedClock;
use crate::workflows::career::domain::{
    CareerProgressionEntry, Industry, Profile, ProfileId, ProfileSubmission, RecommendationId,
    ReportId, UserId,
};
use crate::workflows::career::plan::{CareerPlan, Recommendation, RecommendationUpdate};
use crate::workflows::career::repository::{CareerRepository, RepositoryError};
use crate::workflows::career::{career_router, BenchmarkConfig, CareerService, RegenerationPolicy};

pub(super) const CURRENT_YEAR: i32 = 2025;

pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn clock() -> Arc<FixedClock> {
    Arc::new(FixedClock(now()))
}

pub(super) fn user() -> UserId {
    UserId("user-001".to_string())
}

fn entry(year: i32, title: &str, company: &str) -> CareerProgressionEntry {
    CareerProgressionEntry {
        date: NaiveDate::from_ymd_opt(year, 3, 1).expect("valid date"),
        title: title.to_string(),
        company: company.to_string(),
    }
}

/// Mid-career engineer: compensation 55, progression 55, technical 68,
/// soft 62, position 70.
pub(super) fn submission() -> ProfileSubmission {
    ProfileSubmission {
        graduation_year: Some(2016),
        field_of_study: "Computer Science".to_string(),
        age: Some(31),
        country: Some("Canada".to_string()),
        current_company: "Northwind Labs".to_string(),
        current_title: "Senior Software Engineer".to_string(),
        industry: Some(Industry::Technology),
        dev_role: Some("Backend".to_string()),
        years_experience: Some(8.0),
        technical_skills: vec!["Java".to_string()],
        languages: vec!["Python".to_string(), "SQL".to_string()],
        frameworks: vec!["Spring".to_string()],
        databases: Vec::new(),
        platforms: Vec::new(),
        soft_skills: vec!["Communication".to_string(), "Teamwork".to_string()],
        career_progression: vec![
            entry(2019, "Software Engineer", "Contoso"),
            entry(2022, "Senior Software Engineer", "Northwind Labs"),
        ],
        salary_package: Some(85_000),
    }
}

pub(super) fn profile(submission: ProfileSubmission) -> Profile {
    Profile::from_submission(ProfileId("profile-001".to_string()), user(), submission)
}

pub(super) fn report_for(profile: &Profile) -> BenchmarkReport {
    BenchmarkEngine::default().report(
        profile,
        ReportId("report-001".to_string()),
        now(),
        CURRENT_YEAR,
    )
}

pub(super) fn build_service() -> (CareerService<MemoryRepository, FixedClock>, Arc<MemoryRepository>) {
    build_service_with_policy(RegenerationPolicy::Replace)
}

pub(super) fn build_service_with_policy(
    policy: RegenerationPolicy,
) -> (CareerService<MemoryRepository, FixedClock>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = CareerService::new(
        repository.clone(),
        clock(),
        BenchmarkConfig::default(),
        policy,
    );
    (service, repository)
}

pub(super) fn career_router_with_service(
    service: CareerService<MemoryRepository, FixedClock>,
) -> axum::Router {
    career_router(Arc::new(service))
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
    reports: Arc<Mutex<HashMap<UserId, Vec<BenchmarkReport>>>>,
    plans: Arc<Mutex<HashMap<UserId, CareerPlan>>>,
}

impl CareerRepository for MemoryRepository {
    fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        let guard = self.profiles.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn put_profile(&self, profile: Profile) -> Result<Profile, RepositoryError> {
        let mut guard = self.profiles.lock().expect("repository mutex poisoned");
        guard.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    fn append_report(&self, report: BenchmarkReport) -> Result<BenchmarkReport, RepositoryError> {
        let mut guard = self.reports.lock().expect("repository mutex poisoned");
        let reports = guard.entry(report.user_id.clone()).or_default();
        for earlier in reports.iter_mut() {
            earlier.is_current = false;
        }
        reports.push(report.clone());
        Ok(report)
    }

    fn current_report(&self, user_id: &UserId) -> Result<Option<BenchmarkReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(user_id)
            .and_then(|reports| reports.iter().find(|report| report.is_current))
            .cloned())
    }

    fn report_history(&self, user_id: &UserId) -> Result<Vec<BenchmarkReport>, RepositoryError> {
        let guard = self.reports.lock().expect("repository mutex poisoned");
        Ok(guard
            .get(user_id)
            .map(|reports| reports.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    fn fetch_plan(&self, user_id: &UserId) -> Result<Option<CareerPlan>, RepositoryError> {
        let guard = self.plans.lock().expect("repository mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }

    fn put_plan(&self, plan: CareerPlan) -> Result<CareerPlan, RepositoryError> {
        let mut guard = self.plans.lock().expect("repository mutex poisoned");
        guard.insert(plan.user_id.clone(), plan.clone());
        Ok(plan)
    }

    fn patch_recommendation(
        &self,
        user_id: &UserId,
        recommendation_id: &RecommendationId,
        update: RecommendationUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        let mut guard = self.plans.lock().expect("repository mutex poisoned");
        match guard.get_mut(user_id) {
            Some(plan) => Ok(Some(plan.apply_update(recommendation_id, update, now)?.clone())),
            None => Ok(None),
        }
    }
}

pub(super) struct UnavailableRepository;

impl CareerRepository for UnavailableRepository {
    fn fetch_profile(&self, _user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn put_profile(&self, _profile: Profile) -> Result<Profile, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn append_report(&self, _report: BenchmarkReport) -> Result<BenchmarkReport, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn current_report(&self, _user_id: &UserId) -> Result<Option<BenchmarkReport>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn report_history(&self, _user_id: &UserId) -> Result<Vec<BenchmarkReport>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch_plan(&self, _user_id: &UserId) -> Result<Option<CareerPlan>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn put_plan(&self, _plan: CareerPlan) -> Result<CareerPlan, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn patch_recommendation(
        &self,
        _user_id: &UserId,
        _recommendation_id: &RecommendationId,
        _update: RecommendationUpdate,
        _now: DateTime<Utc>,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) async fn read_text_body(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    String::from_utf8(body.to_vec()).expect("utf-8 body")
}
