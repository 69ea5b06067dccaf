use chrono::{DateTime, Utc};

use super::benchmark::BenchmarkReport;
use super::domain::{Profile, RecommendationId, UserId};
use super::plan::{CareerPlan, LifecycleError, Recommendation, RecommendationUpdate};

/// Persistence collaborator. Implementations own durability and the
/// one-current-report-per-user rule.
pub trait CareerRepository: Send + Sync {
    fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError>;
    fn put_profile(&self, profile: Profile) -> Result<Profile, RepositoryError>;

    /// Append `report` as the user's current report, demoting any report that
    /// was current before it. Reports are never deleted.
    fn append_report(&self, report: BenchmarkReport) -> Result<BenchmarkReport, RepositoryError>;
    fn current_report(&self, user_id: &UserId) -> Result<Option<BenchmarkReport>, RepositoryError>;
    /// All reports for the user, newest first.
    fn report_history(&self, user_id: &UserId) -> Result<Vec<BenchmarkReport>, RepositoryError>;

    fn fetch_plan(&self, user_id: &UserId) -> Result<Option<CareerPlan>, RepositoryError>;
    /// Store `plan` as the user's only plan, replacing any previous one.
    fn put_plan(&self, plan: CareerPlan) -> Result<CareerPlan, RepositoryError>;

    /// Apply `update` to a single recommendation of the user's stored plan
    /// atomically with respect to other writes on that plan. `Ok(None)` when
    /// the user has no plan; rejected updates surface as
    /// [`RepositoryError::Lifecycle`] and leave the plan untouched.
    fn patch_recommendation(
        &self,
        user_id: &UserId,
        recommendation_id: &RecommendationId,
        update: RecommendationUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Recommendation>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
