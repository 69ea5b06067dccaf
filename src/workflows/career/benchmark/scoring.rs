use super::super::domain::Profile;
use super::config::{CompensationTable, PositionTable, ProgressionTable, SkillWeights};
use super::SkillRelevanceScores;

pub(crate) const SCORE_FLOOR: i32 = 10;
pub(crate) const SCORE_CEILING: i32 = 99;

fn clamp_score(score: i32) -> u8 {
    score.clamp(SCORE_FLOOR, SCORE_CEILING) as u8
}

/// True when `skill` contains any keyword, ignoring case.
pub(crate) fn matches_any(skill: &str, keywords: &[String]) -> bool {
    let skill = skill.to_lowercase();
    keywords
        .iter()
        .any(|keyword| !keyword.is_empty() && skill.contains(&keyword.to_lowercase()))
}

/// Keywords (in catalog order) that none of `skills` contain.
pub(crate) fn missing_keywords<'k>(skills: &[&str], keywords: &'k [String]) -> Vec<&'k str> {
    keywords
        .iter()
        .filter(|keyword| {
            let needle = keyword.to_lowercase();
            !needle.is_empty() && !skills.iter().any(|skill| skill.to_lowercase().contains(&needle))
        })
        .map(String::as_str)
        .collect()
}

pub(crate) fn round_mean(values: &[u8]) -> u8 {
    if values.is_empty() {
        return 0;
    }
    let total: f64 = values.iter().map(|value| f64::from(*value)).sum();
    (total / values.len() as f64).round() as u8
}

/// Salary percentile against the synthetic cohort. A missing salary renders
/// as the configured median, without experience adjustment.
pub fn compensation_percentile(
    profile: &Profile,
    table: &CompensationTable,
    current_year: i32,
) -> u8 {
    let Some(salary) = profile.salary_package else {
        return table.missing_salary_percentile;
    };

    let base = table
        .bands
        .iter()
        .find(|band| salary < band.below)
        .map(|band| band.percentile)
        .unwrap_or(table.top_percentile);

    let mut score = i32::from(base);
    if let Some(years) = profile.effective_years_experience(current_year) {
        if years < table.early_career_years {
            score -= table.early_career_penalty;
        } else if years > table.veteran_years {
            score += table.veteran_bonus;
        }
    }

    clamp_score(score)
}

/// Number of recorded moves relative to what the experience would predict.
pub fn career_progression_score(
    profile: &Profile,
    table: &ProgressionTable,
    current_year: i32,
) -> u8 {
    let years = profile
        .effective_years_experience(current_year)
        .unwrap_or(0.0);
    let per_step = if table.years_per_progression.is_finite() && table.years_per_progression > 0.0
    {
        table.years_per_progression
    } else {
        ProgressionTable::default().years_per_progression
    };

    let expected = (years / per_step).floor().max(1.0);
    let ratio = profile.career_progression.len() as f64 / expected;

    let score = table
        .thresholds
        .iter()
        .find(|threshold| ratio > threshold.above)
        .map(|threshold| threshold.score)
        .unwrap_or(table.floor_score);

    clamp_score(i32::from(score))
}

pub fn skill_relevance(profile: &Profile, weights: &SkillWeights) -> SkillRelevanceScores {
    let technical_skills = profile.all_technical_skills();
    let modern = technical_skills
        .iter()
        .filter(|skill| matches_any(skill, &weights.modern_skills))
        .count() as u32;
    let technical = weights
        .technical_base
        .saturating_add(
            weights
                .per_technical_skill
                .saturating_mul(technical_skills.len() as u32),
        )
        .saturating_add(weights.per_modern_skill.saturating_mul(modern));

    let soft_skills = profile.soft_skill_list();
    let critical = soft_skills
        .iter()
        .filter(|skill| matches_any(skill, &weights.critical_soft_skills))
        .count() as u32;
    let soft = weights
        .soft_base
        .saturating_add(weights.per_soft_skill.saturating_mul(soft_skills.len() as u32))
        .saturating_add(weights.per_critical_soft_skill.saturating_mul(critical));

    let cap = u32::from(weights.cap);
    let technical = technical.min(cap) as u8;
    let soft = soft.min(cap) as u8;

    SkillRelevanceScores {
        technical,
        soft,
        overall: round_mean(&[technical, soft]),
    }
}

/// Seniority implied by the current title, adjusted for experience.
pub fn position_level_score(profile: &Profile, table: &PositionTable, current_year: i32) -> u8 {
    let title = profile.current_title.to_lowercase();
    let years = profile.effective_years_experience(current_year);
    let title_has = |keywords: &[String]| {
        keywords
            .iter()
            .any(|keyword| !keyword.is_empty() && title.contains(&keyword.to_lowercase()))
    };

    let tier_score = table
        .tiers
        .iter()
        .find(|tier| title_has(&tier.keywords))
        .map(|tier| tier.score);

    let base = match tier_score {
        Some(score) => score,
        None if title_has(&table.junior_keywords)
            || years.is_some_and(|years| years < table.junior_years) =>
        {
            table.junior_score
        }
        None => table.default_score,
    };

    let mut score = i32::from(base);
    if let Some(years) = years {
        if years > table.veteran_years && base < table.veteran_ceiling {
            score += table.veteran_bonus;
        }
        if years < table.early_career_years && base > table.early_career_floor {
            score -= table.early_career_penalty;
        }
    }

    clamp_score(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflows::career::benchmark::BenchmarkConfig;
    use crate::workflows::career::domain::{ProfileId, ProfileSubmission, UserId};

    fn profile(submission: ProfileSubmission) -> Profile {
        Profile::from_submission(
            ProfileId("p".to_string()),
            UserId("u".to_string()),
            submission,
        )
    }

    #[test]
    fn salary_bands_are_upper_exclusive() {
        let table = CompensationTable::default();
        let at = |salary: u32| {
            compensation_percentile(
                &profile(ProfileSubmission {
                    salary_package: Some(salary),
                    years_experience: Some(10.0),
                    ..ProfileSubmission::default()
                }),
                &table,
                2025,
            )
        };

        assert_eq!(at(59_999), 25);
        assert_eq!(at(60_000), 40);
        assert_eq!(at(99_999), 55);
        assert_eq!(at(100_000), 68);
        assert_eq!(at(149_999), 78);
        assert_eq!(at(179_999), 85);
        assert_eq!(at(180_000), 92);
        assert_eq!(at(2_000_000), 92);
    }

    #[test]
    fn compensation_applies_experience_adjustments() {
        let table = CompensationTable::default();
        let junior = profile(ProfileSubmission {
            salary_package: Some(50_000),
            years_experience: Some(2.0),
            ..ProfileSubmission::default()
        });
        assert_eq!(compensation_percentile(&junior, &table, 2025), 15);

        let veteran = profile(ProfileSubmission {
            salary_package: Some(250_000),
            years_experience: Some(25.0),
            ..ProfileSubmission::default()
        });
        assert_eq!(compensation_percentile(&veteran, &table, 2025), 97);

        let exactly_twenty = profile(ProfileSubmission {
            salary_package: Some(250_000),
            years_experience: Some(20.0),
            ..ProfileSubmission::default()
        });
        assert_eq!(compensation_percentile(&exactly_twenty, &table, 2025), 92);
    }

    #[test]
    fn compensation_clamps_to_floor() {
        let table = CompensationTable {
            early_career_penalty: 40,
            ..CompensationTable::default()
        };
        let subject = profile(ProfileSubmission {
            salary_package: Some(20_000),
            years_experience: Some(1.0),
            ..ProfileSubmission::default()
        });
        assert_eq!(compensation_percentile(&subject, &table, 2025), 10);
    }

    #[test]
    fn missing_salary_is_median_even_when_junior() {
        let subject = profile(ProfileSubmission {
            years_experience: Some(1.0),
            ..ProfileSubmission::default()
        });
        assert_eq!(
            compensation_percentile(&subject, &CompensationTable::default(), 2025),
            50
        );
    }

    #[test]
    fn unknown_experience_uses_single_expected_step() {
        let table = ProgressionTable::default();
        let subject = profile(ProfileSubmission {
            career_progression: Vec::new(),
            ..ProfileSubmission::default()
        });
        assert_eq!(career_progression_score(&subject, &table, 2025), 30);
    }

    #[test]
    fn progression_thresholds_are_strict() {
        use crate::workflows::career::domain::CareerProgressionEntry;
        use chrono::NaiveDate;

        let entries = |count: usize| {
            (0..count)
                .map(|index| CareerProgressionEntry {
                    date: NaiveDate::from_ymd_opt(2010 + index as i32, 1, 1).expect("valid"),
                    title: format!("Role {index}"),
                    company: "Acme".to_string(),
                })
                .collect::<Vec<_>>()
        };
        let table = ProgressionTable::default();
        let score_for = |years: f64, moves: usize| {
            career_progression_score(
                &profile(ProfileSubmission {
                    years_experience: Some(years),
                    career_progression: entries(moves),
                    ..ProfileSubmission::default()
                }),
                &table,
                2025,
            )
        };

        // 7 years -> 2 expected steps
        assert_eq!(score_for(7.0, 2), 55);
        assert_eq!(score_for(7.0, 3), 75);
        assert_eq!(score_for(7.0, 4), 90);
        assert_eq!(score_for(7.0, 1), 30);
        // 14 years -> 4 expected steps, ratio 0.75
        assert_eq!(score_for(14.0, 3), 40);
        // under 3.5 years the denominator floors at 1
        assert_eq!(score_for(1.0, 2), 90);
    }

    #[test]
    fn skills_count_modern_and_critical_matches() {
        let weights = SkillWeights::default();
        let subject = profile(ProfileSubmission {
            technical_skills: vec!["Excel".to_string()],
            languages: vec!["Python".to_string(), "typescript".to_string()],
            soft_skills: vec!["Communication".to_string(), "Patience".to_string()],
            ..ProfileSubmission::default()
        });
        let scores = skill_relevance(&subject, &weights);
        // 40 + 5*3 + 8*2
        assert_eq!(scores.technical, 71);
        // 40 + 6*2 + 10*1
        assert_eq!(scores.soft, 62);
        assert_eq!(scores.overall, 67);
    }

    #[test]
    fn skills_cap_at_ninety_five() {
        let weights = SkillWeights::default();
        let subject = profile(ProfileSubmission {
            technical_skills: weights.modern_skills.clone(),
            soft_skills: weights.critical_soft_skills.clone(),
            ..ProfileSubmission::default()
        });
        let scores = skill_relevance(&subject, &weights);
        assert_eq!(scores.technical, 95);
        assert_eq!(scores.soft, 95);
        assert_eq!(scores.overall, 95);
    }

    #[test]
    fn oversized_weights_saturate_at_cap() {
        let weights = SkillWeights {
            technical_base: u32::MAX - 1,
            per_technical_skill: u32::MAX,
            per_modern_skill: u32::MAX,
            soft_base: u32::MAX,
            per_soft_skill: u32::MAX / 2,
            per_critical_soft_skill: u32::MAX,
            ..SkillWeights::default()
        };
        let subject = profile(ProfileSubmission {
            technical_skills: vec!["Python".to_string(), "Rust".to_string()],
            soft_skills: vec!["Leadership".to_string(), "Negotiation".to_string()],
            ..ProfileSubmission::default()
        });

        let scores = skill_relevance(&subject, &weights);

        assert_eq!(scores.technical, 95);
        assert_eq!(scores.soft, 95);
    }

    #[test]
    fn overall_skill_rounds_half_up() {
        assert_eq!(round_mean(&[40, 41]), 41);
        assert_eq!(round_mean(&[40, 40]), 40);
        assert_eq!(round_mean(&[]), 0);
    }

    #[test]
    fn position_tiers_follow_priority_order() {
        let table = PositionTable::default();
        let score = |title: &str, years: Option<f64>| {
            position_level_score(
                &profile(ProfileSubmission {
                    current_title: title.to_string(),
                    years_experience: years,
                    ..ProfileSubmission::default()
                }),
                &table,
                2025,
            )
        };

        assert_eq!(score("Head of Platform", Some(10.0)), 85);
        assert_eq!(score("Senior Engineering Manager", Some(10.0)), 70);
        assert_eq!(score("Engineering Manager", Some(10.0)), 65);
        assert_eq!(score("Junior Developer", Some(10.0)), 35);
        assert_eq!(score("Developer", Some(3.0)), 35);
        assert_eq!(score("Developer", Some(10.0)), 50);
        assert_eq!(score("Developer", None), 50);
    }

    #[test]
    fn position_adjusts_for_experience() {
        let table = PositionTable::default();
        let score = |title: &str, years: f64| {
            position_level_score(
                &profile(ProfileSubmission {
                    current_title: title.to_string(),
                    years_experience: Some(years),
                    ..ProfileSubmission::default()
                }),
                &table,
                2025,
            )
        };

        assert_eq!(score("Engineering Manager", 16.0), 75);
        assert_eq!(score("Developer", 16.0), 60);
        assert_eq!(score("Director of Engineering", 3.0), 75);
        assert_eq!(score("Engineering Manager", 2.0), 55);
        assert_eq!(score("Developer", 2.0), 35);
    }

    #[test]
    fn all_scores_stay_in_range_for_extreme_profiles() {
        let config = BenchmarkConfig::default();
        let extremes = [
            ProfileSubmission::default(),
            ProfileSubmission {
                salary_package: Some(u32::MAX),
                years_experience: Some(70.0),
                current_title: "VP Director Head Senior".to_string(),
                ..ProfileSubmission::default()
            },
            ProfileSubmission {
                salary_package: Some(0),
                years_experience: Some(0.0),
                current_title: "junior".to_string(),
                ..ProfileSubmission::default()
            },
            ProfileSubmission {
                graduation_year: Some(1950),
                ..ProfileSubmission::default()
            },
        ];

        for submission in extremes {
            let subject = profile(submission);
            for score in [
                compensation_percentile(&subject, &config.compensation, 2025),
                career_progression_score(&subject, &config.progression, 2025),
                position_level_score(&subject, &config.position, 2025),
            ] {
                assert!((10..=99).contains(&score), "score {score} out of range");
            }
            let skills = skill_relevance(&subject, &config.skills);
            assert!(skills.technical <= 95 && skills.soft <= 95);
        }
    }
}
