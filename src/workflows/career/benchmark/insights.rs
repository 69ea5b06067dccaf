use super::scoring::round_mean;
use super::{BenchmarkInsights, BenchmarkScores};

/// Mean of the compensation, progression and overall skill scores.
pub fn overall_score(scores: &BenchmarkScores) -> u8 {
    round_mean(&[
        scores.compensation_quartile,
        scores.career_progression_score,
        scores.skill_relevance_scores.overall,
    ])
}

pub(crate) fn generate_insights(scores: &BenchmarkScores) -> BenchmarkInsights {
    BenchmarkInsights {
        compensation: compensation_insight(scores.compensation_quartile),
        progression: progression_insight(scores.career_progression_score),
        skills: skills_insight(scores.skill_relevance_scores.overall),
        overall: overall_insight(overall_score(scores)),
    }
}

fn compensation_insight(percentile: u8) -> String {
    let rank = ordinal(percentile);
    if percentile >= 75 {
        format!("Your compensation sits at the {rank} percentile, ahead of most peers with a similar profile.")
    } else if percentile >= 50 {
        format!("At the {rank} percentile your pay is competitive, with room to move toward the top quartile.")
    } else if percentile >= 25 {
        format!("Your compensation is at the {rank} percentile, below the peer median; a market adjustment is worth pursuing.")
    } else {
        format!("Your compensation falls in the bottom quartile ({rank} percentile) for comparable profiles.")
    }
}

fn progression_insight(score: u8) -> String {
    if score >= 70 {
        format!("Strong career trajectory: you have advanced faster than typical for your experience (score {score}).")
    } else if score >= 50 {
        format!("Steady progression in line with peers at your experience level (score {score}).")
    } else {
        format!("Your role changes trail what your experience would predict (score {score}); visibility and scope growth can close the gap.")
    }
}

fn skills_insight(score: u8) -> String {
    if score >= 70 {
        format!("Your skill set is highly relevant to current market demand (relevance {score}).")
    } else if score >= 50 {
        format!("Your skills cover the essentials; adding in-demand technologies would lift your relevance (currently {score}).")
    } else {
        format!("Your listed skills trail market demand (relevance {score}); closing key gaps should be a priority.")
    }
}

fn overall_insight(score: u8) -> String {
    if score >= 75 {
        format!("Overall you are positioned in the top quartile of your peer group ({score}/99).")
    } else if score >= 50 {
        format!("Overall you are above the peer median ({score}/99) with clear levers for further growth.")
    } else if score >= 25 {
        format!("Overall you sit below the peer median ({score}/99); the plan below targets the biggest gaps.")
    } else {
        format!("Overall you are in the lowest quartile of your peer group ({score}/99); focused action can move this quickly.")
    }
}

pub(crate) fn ordinal(value: u8) -> String {
    let suffix = match (value % 10, value % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{value}{suffix}")
}
