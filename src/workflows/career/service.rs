use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{info, warn};

use super::benchmark::{BenchmarkConfig, BenchmarkEngine, BenchmarkReport};
use super::clock::Clock;
use super::dashboard::DashboardSummary;
use super::domain::{Profile, ProfileId, ProfileSubmission, RecommendationId, ReportId, UserId};
use super::export::{plan_to_csv, ExportError};
use super::guard::{ProfileError, ProfileGuard};
use super::plan::{
    generate_recommendations, CareerPlan, LifecycleError, Recommendation, RecommendationRule,
    RecommendationUpdate, RegenerationPolicy, DEFAULT_RULES,
};
use super::repository::{CareerRepository, RepositoryError};

/// Service composing the profile guard, benchmark engine, rule list and
/// repository behind the career workflow.
pub struct CareerService<R, C> {
    guard: ProfileGuard,
    repository: Arc<R>,
    clock: Arc<C>,
    engine: Arc<BenchmarkEngine>,
    rules: &'static [RecommendationRule],
    policy: RegenerationPolicy,
}

impl<R, C> CareerService<R, C>
where
    R: CareerRepository + 'static,
    C: Clock + 'static,
{
    pub fn new(
        repository: Arc<R>,
        clock: Arc<C>,
        config: BenchmarkConfig,
        policy: RegenerationPolicy,
    ) -> Self {
        Self {
            guard: ProfileGuard,
            repository,
            clock,
            engine: Arc::new(BenchmarkEngine::new(config)),
            rules: DEFAULT_RULES,
            policy,
        }
    }

    /// Swap the recommendation rule list.
    pub fn with_rules(mut self, rules: &'static [RecommendationRule]) -> Self {
        self.rules = rules;
        self
    }

    pub fn policy(&self) -> RegenerationPolicy {
        self.policy
    }

    /// Validate and store the user's profile, keeping the existing profile id
    /// when one is already on file.
    pub fn upsert_profile(
        &self,
        user_id: &UserId,
        submission: ProfileSubmission,
    ) -> Result<Profile, CareerServiceError> {
        let profile_id = self
            .repository
            .fetch_profile(user_id)?
            .map(|existing| existing.profile_id)
            .unwrap_or_else(ProfileId::generate);

        let profile = self.guard.profile_from_submission(
            profile_id,
            user_id.clone(),
            submission,
            self.clock.current_year(),
        )?;

        let stored = self.repository.put_profile(profile)?;
        info!(
            user_id = %stored.user_id,
            completion = stored.completion_percentage(),
            "profile saved"
        );
        Ok(stored)
    }

    pub fn profile(&self, user_id: &UserId) -> Result<Profile, CareerServiceError> {
        self.repository
            .fetch_profile(user_id)?
            .ok_or(CareerServiceError::MissingProfile)
    }

    /// Score the stored profile and append the result as the current report.
    pub fn generate_benchmark(
        &self,
        user_id: &UserId,
    ) -> Result<BenchmarkReport, CareerServiceError> {
        let profile = self.profile(user_id)?;
        self.benchmark_profile(&profile)
    }

    fn benchmark_profile(&self, profile: &Profile) -> Result<BenchmarkReport, CareerServiceError> {
        let report = self.engine.report(
            profile,
            ReportId::generate(),
            self.clock.now(),
            self.clock.current_year(),
        );
        let stored = self.repository.append_report(report)?;
        info!(
            user_id = %stored.user_id,
            report_id = %stored.report_id,
            compensation = stored.compensation_quartile,
            progression = stored.career_progression_score,
            skills = stored.skill_relevance_scores.overall,
            position = stored.position_level_score,
            "benchmark generated"
        );
        Ok(stored)
    }

    pub fn current_benchmark(
        &self,
        user_id: &UserId,
    ) -> Result<Option<BenchmarkReport>, CareerServiceError> {
        Ok(self.repository.current_report(user_id)?)
    }

    pub fn benchmark_history(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<BenchmarkReport>, CareerServiceError> {
        Ok(self.repository.report_history(user_id)?)
    }

    /// Build a plan from the current report, generating a report first when
    /// the user has none. The new plan replaces any previous plan.
    pub fn generate_plan(&self, user_id: &UserId) -> Result<CareerPlan, CareerServiceError> {
        let profile = self.profile(user_id)?;
        let report = match self.repository.current_report(user_id)? {
            Some(report) => report,
            None => self.benchmark_profile(&profile)?,
        };

        let now = self.clock.now();
        let recommendations = generate_recommendations(
            self.rules,
            &profile,
            &report,
            &self.engine.config().skills,
            now,
        );
        let previous = self.repository.fetch_plan(user_id)?;
        let plan = CareerPlan::new(
            user_id.clone(),
            &report,
            recommendations,
            previous.as_ref(),
            self.policy,
            now,
        );

        let stored = self.repository.put_plan(plan)?;
        info!(
            user_id = %stored.user_id,
            plan_id = %stored.plan_id,
            recommendations = stored.recommendations.len(),
            "career plan generated"
        );
        Ok(stored)
    }

    pub fn plan(&self, user_id: &UserId) -> Result<CareerPlan, CareerServiceError> {
        self.repository
            .fetch_plan(user_id)?
            .ok_or(CareerServiceError::MissingPlan)
    }

    /// Apply a status and/or notes change to one recommendation of the
    /// user's plan. The repository patches the recommendation in place so
    /// concurrent updates to other recommendations are never overwritten.
    pub fn update_recommendation(
        &self,
        user_id: &UserId,
        recommendation_id: &RecommendationId,
        update: RecommendationUpdate,
    ) -> Result<Recommendation, CareerServiceError> {
        let updated = match self.repository.patch_recommendation(
            user_id,
            recommendation_id,
            update,
            self.clock.now(),
        ) {
            Ok(Some(recommendation)) => recommendation,
            Ok(None) => return Err(CareerServiceError::MissingPlan),
            Err(RepositoryError::Lifecycle(err)) => {
                warn!(user_id = %user_id, error = %err, "recommendation update rejected");
                return Err(err.into());
            }
            Err(other) => return Err(other.into()),
        };

        info!(
            user_id = %user_id,
            recommendation_id = %updated.recommendation_id,
            status = updated.status.label(),
            "recommendation updated"
        );
        Ok(updated)
    }

    pub fn dashboard(&self, user_id: &UserId) -> Result<DashboardSummary, CareerServiceError> {
        let report = self.repository.current_report(user_id)?;
        let plan = self.repository.fetch_plan(user_id)?;
        Ok(DashboardSummary::build(report.as_ref(), plan.as_ref()))
    }

    pub fn export_plan(&self, user_id: &UserId) -> Result<String, CareerServiceError> {
        let plan = self.plan(user_id)?;
        Ok(plan_to_csv(&plan)?)
    }
}

/// Error raised by the career service.
#[derive(Debug, thiserror::Error)]
pub enum CareerServiceError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error("no profile on file for this user")]
    MissingProfile,
    #[error("no career plan has been generated for this user")]
    MissingPlan,
}

impl CareerServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Profile(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::MissingProfile => StatusCode::BAD_REQUEST,
            Self::MissingPlan
            | Self::Lifecycle(LifecycleError::NotFound(_))
            | Self::Repository(RepositoryError::NotFound)
            | Self::Repository(RepositoryError::Lifecycle(LifecycleError::NotFound(_))) => {
                StatusCode::NOT_FOUND
            }
            Self::Lifecycle(LifecycleError::InvalidTransition { .. })
            | Self::Repository(RepositoryError::Conflict)
            | Self::Repository(RepositoryError::Lifecycle(LifecycleError::InvalidTransition {
                ..
            })) => StatusCode::CONFLICT,
            Self::Repository(RepositoryError::Unavailable(_)) | Self::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
