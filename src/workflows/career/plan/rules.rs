use super::super::benchmark::insights::ordinal;
use super::super::benchmark::scoring::{matches_any, missing_keywords};
use super::super::benchmark::{BenchmarkReport, SkillWeights};
use super::super::domain::{Industry, Profile};
use super::{PriorityLevel, RecommendationCategory};

/// Everything a rule may look at.
pub struct RuleContext<'a> {
    pub profile: &'a Profile,
    pub report: &'a BenchmarkReport,
    pub skills: &'a SkillWeights,
}

/// Template output of a rule, before ids and lifecycle fields are attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendationDraft {
    pub title: String,
    pub description: String,
    pub expected_impact: String,
    pub data_source: String,
}

/// A single entry in the recommendation rule list. Rules are independent:
/// each decides on its own whether to contribute a recommendation.
pub struct RecommendationRule {
    pub key: &'static str,
    pub category: RecommendationCategory,
    pub priority: PriorityLevel,
    pub applies: fn(&RuleContext<'_>) -> bool,
    pub build: fn(&RuleContext<'_>) -> Option<RecommendationDraft>,
}

impl std::fmt::Debug for RecommendationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecommendationRule")
            .field("key", &self.key)
            .field("category", &self.category)
            .field("priority", &self.priority)
            .finish()
    }
}

const NEGOTIATION_CEILING: u8 = 85;
const NEGOTIATION_STEP: u8 = 20;
const SKILL_SCORE_TARGET: u8 = 70;
const PROGRESSION_SCORE_TARGET: u8 = 60;
const SKILLS_SUGGESTED: usize = 2;

/// Evaluated top to bottom; the order is the order recommendations appear in a plan.
pub static DEFAULT_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        key: "negotiate_salary",
        category: RecommendationCategory::Compensation,
        priority: PriorityLevel::High,
        applies: below_compensation_median,
        build: negotiate_salary,
    },
    RecommendationRule {
        key: "research_bonus_equity",
        category: RecommendationCategory::Compensation,
        priority: PriorityLevel::Medium,
        applies: mid_compensation_band,
        build: research_bonus_equity,
    },
    RecommendationRule {
        key: "learn_modern_skill",
        category: RecommendationCategory::Skills,
        priority: PriorityLevel::High,
        applies: lacks_modern_skills,
        build: learn_modern_skill,
    },
    RecommendationRule {
        key: "develop_leadership",
        category: RecommendationCategory::Skills,
        priority: PriorityLevel::High,
        applies: lacks_leadership,
        build: develop_leadership,
    },
    RecommendationRule {
        key: "promotion_visibility",
        category: RecommendationCategory::Strategic,
        priority: PriorityLevel::High,
        applies: slow_progression,
        build: promotion_visibility,
    },
    RecommendationRule {
        key: "expand_network",
        category: RecommendationCategory::Strategic,
        priority: PriorityLevel::Medium,
        applies: always,
        build: expand_network,
    },
    RecommendationRule {
        key: "ai_trends",
        category: RecommendationCategory::Strategic,
        priority: PriorityLevel::Medium,
        applies: technology_industry,
        build: ai_trends,
    },
    RecommendationRule {
        key: "executive_education",
        category: RecommendationCategory::Skills,
        priority: PriorityLevel::Low,
        applies: management_title,
        build: executive_education,
    },
];

fn below_compensation_median(ctx: &RuleContext<'_>) -> bool {
    ctx.report.compensation_quartile < 60
}

// Overlaps with `below_compensation_median` for 40..60.
fn mid_compensation_band(ctx: &RuleContext<'_>) -> bool {
    (40..75).contains(&ctx.report.compensation_quartile)
}

fn lacks_modern_skills(ctx: &RuleContext<'_>) -> bool {
    let has_modern = ctx
        .profile
        .all_technical_skills()
        .iter()
        .any(|skill| matches_any(skill, &ctx.skills.modern_skills));
    !has_modern || ctx.report.skill_relevance_scores.technical < SKILL_SCORE_TARGET
}

fn lacks_leadership(ctx: &RuleContext<'_>) -> bool {
    let has_leadership = ctx
        .profile
        .soft_skill_list()
        .iter()
        .any(|skill| matches_any(skill, &ctx.skills.leadership_keywords));
    !has_leadership || ctx.report.skill_relevance_scores.soft < SKILL_SCORE_TARGET
}

fn slow_progression(ctx: &RuleContext<'_>) -> bool {
    ctx.report.career_progression_score < PROGRESSION_SCORE_TARGET
}

fn always(_ctx: &RuleContext<'_>) -> bool {
    true
}

fn technology_industry(ctx: &RuleContext<'_>) -> bool {
    ctx.profile.industry == Some(Industry::Technology)
}

fn management_title(ctx: &RuleContext<'_>) -> bool {
    let title = ctx.profile.current_title.to_lowercase();
    title.contains("manager") || title.contains("director")
}

fn negotiate_salary(ctx: &RuleContext<'_>) -> Option<RecommendationDraft> {
    let current = ctx.report.compensation_quartile;
    let target = current.saturating_add(NEGOTIATION_STEP).min(NEGOTIATION_CEILING);
    Some(RecommendationDraft {
        title: "Negotiate a salary adjustment".to_string(),
        description: format!(
            "Your pay sits at the {} percentile of comparable profiles. Collect market data for \
             your role and location, document recent wins, and request a compensation review.",
            ordinal(current)
        ),
        expected_impact: format!(
            "Moving to the {} percentile (+{} points) is realistic within a review cycle",
            ordinal(target),
            target.saturating_sub(current)
        ),
        data_source: "Industry Compensation Trends".to_string(),
    })
}

fn research_bonus_equity(ctx: &RuleContext<'_>) -> Option<RecommendationDraft> {
    Some(RecommendationDraft {
        title: "Research bonus and equity benchmarks".to_string(),
        description: format!(
            "Base pay at the {} percentile leaves variable compensation as the next lever. \
             Compare bonus targets and equity grants for your level before the next review.",
            ordinal(ctx.report.compensation_quartile)
        ),
        expected_impact: "Total compensation gains of 5-15% through variable pay".to_string(),
        data_source: "Total Rewards Survey".to_string(),
    })
}

fn learn_modern_skill(ctx: &RuleContext<'_>) -> Option<RecommendationDraft> {
    let technical_skills = ctx.profile.all_technical_skills();
    let missing: Vec<&str> = missing_keywords(&technical_skills, &ctx.skills.modern_skills)
        .into_iter()
        .take(SKILLS_SUGGESTED)
        .collect();
    let first = *missing.first()?;

    let description = match missing.get(1) {
        Some(second) => format!(
            "{first} and {second} are among the most requested skills in current postings. \
             Start with {first} through a hands-on project you can show in interviews."
        ),
        None => format!(
            "{first} is among the most requested skills in current postings. Build a hands-on \
             project you can show in interviews."
        ),
    };

    Some(RecommendationDraft {
        title: format!("Learn {first}"),
        description,
        expected_impact: format!(
            "Raises technical relevance from {} toward {SKILL_SCORE_TARGET}+",
            ctx.report.skill_relevance_scores.technical
        ),
        data_source: "Developer Survey skill demand".to_string(),
    })
}

fn develop_leadership(ctx: &RuleContext<'_>) -> Option<RecommendationDraft> {
    Some(RecommendationDraft {
        title: "Develop leadership skills".to_string(),
        description: "Volunteer to lead a project or mentor a colleague, and ask for feedback on \
                      how you communicate decisions."
            .to_string(),
        expected_impact: format!(
            "Lifts soft-skill relevance from {} and prepares you for senior scope",
            ctx.report.skill_relevance_scores.soft
        ),
        data_source: "Leadership Competency Research".to_string(),
    })
}

fn promotion_visibility(ctx: &RuleContext<'_>) -> Option<RecommendationDraft> {
    Some(RecommendationDraft {
        title: "Build visibility for your next promotion".to_string(),
        description: format!(
            "Your progression score of {} trails peers with similar experience. Agree on \
             promotion criteria with your manager and share measurable outcomes each quarter.",
            ctx.report.career_progression_score
        ),
        expected_impact: "Shortens time to next promotion by 6-12 months".to_string(),
        data_source: "Career Progression Benchmarks".to_string(),
    })
}

fn expand_network(_ctx: &RuleContext<'_>) -> Option<RecommendationDraft> {
    Some(RecommendationDraft {
        title: "Expand your professional network".to_string(),
        description: "Attend one industry event per month and reconnect with two former \
                      colleagues; most senior roles are filled through referrals."
            .to_string(),
        expected_impact: "Access to opportunities that are never publicly advertised".to_string(),
        data_source: "Hiring Channel Survey".to_string(),
    })
}

fn ai_trends(_ctx: &RuleContext<'_>) -> Option<RecommendationDraft> {
    Some(RecommendationDraft {
        title: "Stay ahead of AI trends".to_string(),
        description: "Set aside time each week to try AI tooling relevant to your work and \
                      share what you learn with your team."
            .to_string(),
        expected_impact: "Keeps your role aligned with where technology teams are investing"
            .to_string(),
        data_source: "Technology Industry Outlook".to_string(),
    })
}

fn executive_education(ctx: &RuleContext<'_>) -> Option<RecommendationDraft> {
    Some(RecommendationDraft {
        title: "Consider executive education".to_string(),
        description: format!(
            "As a {}, a short executive program in strategy or finance strengthens the case for \
             the next level.",
            ctx.profile.current_title.trim()
        ),
        expected_impact: "Broadens readiness for senior leadership roles".to_string(),
        data_source: "Executive Education Outcomes".to_string(),
    })
}
