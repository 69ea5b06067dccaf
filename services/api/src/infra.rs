use careeriq::workflows::career::plan::{generate_recommendations, DEFAULT_RULES};
use careeriq::workflows::career::{
    BenchmarkEngine, BenchmarkReport, CareerPlan, CareerRepository, CareerServiceError, Profile,
    ProfileGuard, ProfileId, ProfileSubmission, Recommendation, RecommendationId,
    RecommendationUpdate, ReportId, RepositoryError, UserId,
};
use chrono::{DateTime, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) engine: Arc<BenchmarkEngine>,
}

/// Process-local store backing the HTTP service until a durable repository
/// is wired in.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCareerRepository {
    profiles: Arc<Mutex<HashMap<UserId, Profile>>>,
    reports: Arc<Mutex<HashMap<UserId, Vec<BenchmarkReport>>>>,
    plans: Arc<Mutex<HashMap<UserId, CareerPlan>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

impl CareerRepository for InMemoryCareerRepository {
    fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(lock(&self.profiles)?.get(user_id).cloned())
    }

    fn put_profile(&self, profile: Profile) -> Result<Profile, RepositoryError> {
        lock(&self.profiles)?.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    fn append_report(&self, report: BenchmarkReport) -> Result<BenchmarkReport, RepositoryError> {
        let mut guard = lock(&self.reports)?;
        let reports = guard.entry(report.user_id.clone()).or_default();
        if reports
            .iter()
            .any(|existing| existing.report_id == report.report_id)
        {
            return Err(RepositoryError::Conflict);
        }
        for earlier in reports.iter_mut() {
            earlier.is_current = false;
        }
        reports.push(report.clone());
        Ok(report)
    }

    fn current_report(&self, user_id: &UserId) -> Result<Option<BenchmarkReport>, RepositoryError> {
        Ok(lock(&self.reports)?
            .get(user_id)
            .and_then(|reports| reports.iter().rev().find(|report| report.is_current))
            .cloned())
    }

    fn report_history(&self, user_id: &UserId) -> Result<Vec<BenchmarkReport>, RepositoryError> {
        Ok(lock(&self.reports)?
            .get(user_id)
            .map(|reports| reports.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    fn fetch_plan(&self, user_id: &UserId) -> Result<Option<CareerPlan>, RepositoryError> {
        Ok(lock(&self.plans)?.get(user_id).cloned())
    }

    fn put_plan(&self, plan: CareerPlan) -> Result<CareerPlan, RepositoryError> {
        lock(&self.plans)?.insert(plan.user_id.clone(), plan.clone());
        Ok(plan)
    }

    fn patch_recommendation(
        &self,
        user_id: &UserId,
        recommendation_id: &RecommendationId,
        update: RecommendationUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        let mut guard = lock(&self.plans)?;
        let Some(plan) = guard.get_mut(user_id) else {
            return Ok(None);
        };
        let updated = plan.apply_update(recommendation_id, update, now)?;
        Ok(Some(updated.clone()))
    }
}

/// Unsaved benchmark of an ad-hoc profile, with the recommendations it would produce.
#[derive(Debug, Serialize)]
pub(crate) struct BenchmarkPreview {
    pub(crate) overall_score: u8,
    pub(crate) report: BenchmarkReport,
    pub(crate) recommendations: Vec<Recommendation>,
}

pub(crate) fn benchmark_preview(
    engine: &BenchmarkEngine,
    submission: ProfileSubmission,
    now: DateTime<Utc>,
    current_year: i32,
) -> Result<BenchmarkPreview, CareerServiceError> {
    let profile = ProfileGuard.profile_from_submission(
        ProfileId::generate(),
        UserId("preview".to_string()),
        submission,
        current_year,
    )?;
    let report = engine.report(&profile, ReportId::generate(), now, current_year);
    let recommendations =
        generate_recommendations(DEFAULT_RULES, &profile, &report, &engine.config().skills, now);

    Ok(BenchmarkPreview {
        overall_score: careeriq::workflows::career::overall_score(&report.scores()),
        report,
        recommendations,
    })
}
