mod lifecycle;
mod rules;

pub use lifecycle::{LifecycleError, RecommendationUpdate};
pub use rules::{RecommendationDraft, RecommendationRule, RuleContext, DEFAULT_RULES};

use super::benchmark::{BenchmarkReport, SkillWeights};
use super::domain::{PlanId, Profile, RecommendationId, ReportId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Compensation,
    Skills,
    Strategic,
}

impl RecommendationCategory {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compensation => "Compensation",
            Self::Skills => "Skills",
            Self::Strategic => "Strategic",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityLevel {
    High,
    Medium,
    Low,
}

impl PriorityLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationStatus {
    Active,
    Completed,
    Dismissed,
}

impl RecommendationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Dismissed => "dismissed",
        }
    }
}

/// One trackable suggestion inside a career plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub recommendation_id: RecommendationId,
    /// Key of the rule that produced this recommendation.
    pub rule: String,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub expected_impact: String,
    pub data_source: String,
    pub priority_level: PriorityLevel,
    pub status: RecommendationStatus,
    pub user_notes: String,
    pub created_date: DateTime<Utc>,
    pub completed_date: Option<DateTime<Utc>>,
    pub dismissed_date: Option<DateTime<Utc>>,
}

impl Recommendation {
    fn from_draft(rule: &RecommendationRule, draft: RecommendationDraft, now: DateTime<Utc>) -> Self {
        Self {
            recommendation_id: RecommendationId::generate(),
            rule: rule.key.to_string(),
            category: rule.category,
            title: draft.title,
            description: draft.description,
            expected_impact: draft.expected_impact,
            data_source: draft.data_source,
            priority_level: rule.priority,
            status: RecommendationStatus::Active,
            user_notes: String::new(),
            created_date: now,
            completed_date: None,
            dismissed_date: None,
        }
    }

    /// Carry the user's tracking state over from an earlier copy of the same rule.
    fn inherit_progress(&mut self, previous: &Recommendation) {
        self.recommendation_id = previous.recommendation_id.clone();
        self.status = previous.status;
        self.user_notes = previous.user_notes.clone();
        self.created_date = previous.created_date;
        self.completed_date = previous.completed_date;
        self.dismissed_date = previous.dismissed_date;
    }
}

/// What happens to tracking state when a plan is generated again.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegenerationPolicy {
    /// Discard the previous plan's recommendations entirely.
    #[default]
    Replace,
    /// Keep id, status, notes and dates for recommendations whose rule fires again.
    ///
    /// Matching is by rule key only, so state carries over even when the rule
    /// renders a different title: a completed "Learn Python" makes a
    /// regenerated "Learn TypeScript" from the same rule start out completed.
    PreserveProgress,
}

/// Evaluate every rule in order against the profile and its report.
pub fn generate_recommendations(
    rules: &[RecommendationRule],
    profile: &Profile,
    report: &BenchmarkReport,
    skills: &SkillWeights,
    now: DateTime<Utc>,
) -> Vec<Recommendation> {
    let context = RuleContext {
        profile,
        report,
        skills,
    };

    rules
        .iter()
        .filter(|rule| (rule.applies)(&context))
        .filter_map(|rule| {
            (rule.build)(&context).map(|draft| Recommendation::from_draft(rule, draft, now))
        })
        .collect()
}

/// Per-user container of recommendations tied to one benchmark report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPlan {
    pub plan_id: PlanId,
    pub user_id: UserId,
    pub benchmark_report_id: ReportId,
    pub generation_date: DateTime<Utc>,
    pub recommendations: Vec<Recommendation>,
}

impl CareerPlan {
    pub fn new(
        user_id: UserId,
        report: &BenchmarkReport,
        mut recommendations: Vec<Recommendation>,
        previous: Option<&CareerPlan>,
        policy: RegenerationPolicy,
        now: DateTime<Utc>,
    ) -> Self {
        if let (RegenerationPolicy::PreserveProgress, Some(previous)) = (policy, previous) {
            for recommendation in &mut recommendations {
                if let Some(earlier) = previous
                    .recommendations
                    .iter()
                    .find(|earlier| earlier.rule == recommendation.rule)
                {
                    recommendation.inherit_progress(earlier);
                }
            }
        }

        Self {
            plan_id: PlanId::generate(),
            user_id,
            benchmark_report_id: report.report_id.clone(),
            generation_date: now,
            recommendations,
        }
    }

    pub fn recommendation(&self, id: &RecommendationId) -> Option<&Recommendation> {
        self.recommendations
            .iter()
            .find(|recommendation| &recommendation.recommendation_id == id)
    }

    pub fn count_with_status(&self, status: RecommendationStatus) -> usize {
        self.recommendations
            .iter()
            .filter(|recommendation| recommendation.status == status)
            .count()
    }

    /// Completed share of the non-dismissed recommendations, 0 when every
    /// recommendation has been dismissed.
    pub fn overall_completion_percentage(&self) -> u8 {
        let considered = self.recommendations.len()
            - self.count_with_status(RecommendationStatus::Dismissed);
        if considered == 0 {
            return 0;
        }
        let completed = self.count_with_status(RecommendationStatus::Completed) as f64;
        (100.0 * completed / considered as f64).round() as u8
    }

    /// First active recommendation in generation order.
    pub fn next_milestone(&self) -> Option<&Recommendation> {
        self.recommendations
            .iter()
            .find(|recommendation| recommendation.status == RecommendationStatus::Active)
    }

    pub fn view(&self) -> CareerPlanView<'_> {
        CareerPlanView {
            plan_id: &self.plan_id,
            user_id: &self.user_id,
            benchmark_report_id: &self.benchmark_report_id,
            generation_date: self.generation_date,
            recommendations: &self.recommendations,
            overall_completion_percentage: self.overall_completion_percentage(),
        }
    }
}

/// Response shape for a plan with its completion percentage recomputed.
#[derive(Debug, Clone, Serialize)]
pub struct CareerPlanView<'a> {
    pub plan_id: &'a PlanId,
    pub user_id: &'a UserId,
    pub benchmark_report_id: &'a ReportId,
    pub generation_date: DateTime<Utc>,
    pub recommendations: &'a [Recommendation],
    pub overall_completion_percentage: u8,
}
