use super::benchmark::BenchmarkReport;
use super::plan::{CareerPlan, RecommendationStatus};
use serde::Serialize;

/// Headline numbers for the dashboard landing page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub benchmark_percentile: Option<u8>,
    pub plan_completion_percentage: u8,
    pub completed_recommendations: usize,
    pub total_recommendations: usize,
    pub next_milestone: Option<String>,
}

impl DashboardSummary {
    pub fn build(report: Option<&BenchmarkReport>, plan: Option<&CareerPlan>) -> Self {
        let mut summary = Self {
            benchmark_percentile: report.map(|report| report.compensation_quartile),
            ..Self::default()
        };

        if let Some(plan) = plan {
            summary.plan_completion_percentage = plan.overall_completion_percentage();
            summary.completed_recommendations =
                plan.count_with_status(RecommendationStatus::Completed);
            summary.total_recommendations = plan.recommendations.len()
                - plan.count_with_status(RecommendationStatus::Dismissed);
            summary.next_milestone = plan
                .next_milestone()
                .map(|recommendation| recommendation.title.clone());
        }

        summary
    }
}
