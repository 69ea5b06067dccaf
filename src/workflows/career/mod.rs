//! Career benchmarking and development planning.
//!
//! A stored [`Profile`] is scored by the [`BenchmarkEngine`] into a
//! [`BenchmarkReport`]; the report and profile then drive the ordered rule list
//! that produces a [`CareerPlan`] whose recommendations the user tracks through
//! their lifecycle.

pub mod benchmark;
pub mod clock;
pub mod dashboard;
pub mod domain;
pub mod export;
pub mod guard;
pub mod plan;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use benchmark::{
    overall_score, BenchmarkConfig, BenchmarkEngine, BenchmarkInsights, BenchmarkReport,
    BenchmarkScores, MarketComparison, SkillRelevanceScores, SkillWeights,
};
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::DashboardSummary;
pub use domain::{
    CareerProgressionEntry, Industry, PlanId, Profile, ProfileId, ProfileSubmission,
    ProfileView, RecommendationId, ReportId, UserId,
};
pub use export::{plan_to_csv, ExportError};
pub use guard::{ProfileError, ProfileGuard};
pub use plan::{
    CareerPlan, CareerPlanView, LifecycleError, PriorityLevel, Recommendation,
    RecommendationCategory, RecommendationStatus, RecommendationUpdate, RegenerationPolicy,
};
pub use repository::{CareerRepository, RepositoryError};
pub use router::{career_router, USER_ID_HEADER};
pub use service::{CareerService, CareerServiceError};
