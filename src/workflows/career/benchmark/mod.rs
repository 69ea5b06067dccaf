mod config;
pub(crate) mod insights;
pub(crate) mod scoring;

pub use config::{
    BenchmarkConfig, CompensationTable, PositionTable, ProgressionTable, RatioThreshold,
    SalaryBand, SkillWeights, TitleTier,
};
pub use insights::overall_score;

use super::domain::{Profile, ReportId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MISSING_SKILLS_REPORTED: usize = 5;

/// Stateless calculator applying the scoring tables to a profile.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkEngine {
    config: BenchmarkConfig,
}

impl BenchmarkEngine {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    pub fn score(&self, profile: &Profile, current_year: i32) -> BenchmarkScores {
        BenchmarkScores {
            compensation_quartile: scoring::compensation_percentile(
                profile,
                &self.config.compensation,
                current_year,
            ),
            career_progression_score: scoring::career_progression_score(
                profile,
                &self.config.progression,
                current_year,
            ),
            skill_relevance_scores: scoring::skill_relevance(profile, &self.config.skills),
            position_level_score: scoring::position_level_score(
                profile,
                &self.config.position,
                current_year,
            ),
        }
    }

    /// Build a fresh report marked current. Demoting earlier reports is the
    /// repository's responsibility.
    pub fn report(
        &self,
        profile: &Profile,
        report_id: ReportId,
        generated_at: DateTime<Utc>,
        current_year: i32,
    ) -> BenchmarkReport {
        let scores = self.score(profile, current_year);
        let insights = insights::generate_insights(&scores);
        let technical_skills = profile.all_technical_skills();
        let missing_critical_skills =
            scoring::missing_keywords(&technical_skills, &self.config.skills.modern_skills)
                .into_iter()
                .take(MISSING_SKILLS_REPORTED)
                .map(str::to_string)
                .collect();
        let market_comparison = match profile.salary_package {
            Some(_) => MarketComparison::from_percentile(scores.compensation_quartile),
            None => MarketComparison::Unknown,
        };

        BenchmarkReport {
            report_id,
            user_id: profile.user_id.clone(),
            generation_date: generated_at,
            compensation_quartile: scores.compensation_quartile,
            career_progression_score: scores.career_progression_score,
            skill_relevance_scores: scores.skill_relevance_scores,
            position_level_score: scores.position_level_score,
            insights,
            missing_critical_skills,
            market_comparison,
            data_sources_used: self.config.data_sources.clone(),
            is_current: true,
        }
    }
}

/// The four scores, before they are wrapped in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkScores {
    /// A percentile, despite the name.
    pub compensation_quartile: u8,
    pub career_progression_score: u8,
    pub skill_relevance_scores: SkillRelevanceScores,
    pub position_level_score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRelevanceScores {
    pub technical: u8,
    pub soft: u8,
    pub overall: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkInsights {
    pub compensation: String,
    pub progression: String,
    pub skills: String,
    pub overall: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketComparison {
    BelowMarket,
    Competitive,
    StronglyCompetitive,
    TopOfMarket,
    Unknown,
}

impl MarketComparison {
    pub fn from_percentile(percentile: u8) -> Self {
        match percentile {
            0..=39 => Self::BelowMarket,
            40..=59 => Self::Competitive,
            60..=79 => Self::StronglyCompetitive,
            _ => Self::TopOfMarket,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::BelowMarket => "Below Market",
            Self::Competitive => "Competitive",
            Self::StronglyCompetitive => "Strongly Competitive",
            Self::TopOfMarket => "Top of Market",
            Self::Unknown => "Unknown",
        }
    }
}

/// Immutable, append-only snapshot of a profile's market position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub report_id: ReportId,
    pub user_id: UserId,
    pub generation_date: DateTime<Utc>,
    pub compensation_quartile: u8,
    pub career_progression_score: u8,
    pub skill_relevance_scores: SkillRelevanceScores,
    pub position_level_score: u8,
    pub insights: BenchmarkInsights,
    pub missing_critical_skills: Vec<String>,
    pub market_comparison: MarketComparison,
    pub data_sources_used: Vec<String>,
    pub is_current: bool,
}

impl BenchmarkReport {
    pub fn scores(&self) -> BenchmarkScores {
        BenchmarkScores {
            compensation_quartile: self.compensation_quartile,
            career_progression_score: self.career_progression_score,
            skill_relevance_scores: self.skill_relevance_scores,
            position_level_score: self.position_level_score,
        }
    }
}
