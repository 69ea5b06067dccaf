use serde::{Deserialize, Serialize};

/// Scoring tables for the benchmark calculator. Every constant the scores
/// depend on lives here so deployments can tune them without code changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchmarkConfig {
    pub compensation: CompensationTable,
    pub progression: ProgressionTable,
    pub skills: SkillWeights,
    pub position: PositionTable,
    pub data_sources: Vec<String>,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            compensation: CompensationTable::default(),
            progression: ProgressionTable::default(),
            skills: SkillWeights::default(),
            position: PositionTable::default(),
            data_sources: vec![
                "Developer Survey 2025 (synthetic cohort)".to_string(),
                "Industry Compensation Trends".to_string(),
            ],
        }
    }
}

/// Upper-exclusive USD band and the base percentile it maps to.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub below: u32,
    pub percentile: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompensationTable {
    /// Ascending by `below`; salaries past the last band use `top_percentile`.
    pub bands: Vec<SalaryBand>,
    pub top_percentile: u8,
    pub missing_salary_percentile: u8,
    pub early_career_years: f64,
    pub early_career_penalty: i32,
    pub veteran_years: f64,
    pub veteran_bonus: i32,
}

impl Default for CompensationTable {
    fn default() -> Self {
        Self {
            bands: vec![
                SalaryBand { below: 60_000, percentile: 25 },
                SalaryBand { below: 80_000, percentile: 40 },
                SalaryBand { below: 100_000, percentile: 55 },
                SalaryBand { below: 120_000, percentile: 68 },
                SalaryBand { below: 150_000, percentile: 78 },
                SalaryBand { below: 180_000, percentile: 85 },
            ],
            top_percentile: 92,
            missing_salary_percentile: 50,
            early_career_years: 5.0,
            early_career_penalty: 10,
            veteran_years: 20.0,
            veteran_bonus: 5,
        }
    }
}

/// Progression ratio strictly above `above` earns `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioThreshold {
    pub above: f64,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionTable {
    pub years_per_progression: f64,
    /// Descending by `above`; the first match wins.
    pub thresholds: Vec<RatioThreshold>,
    pub floor_score: u8,
}

impl Default for ProgressionTable {
    fn default() -> Self {
        Self {
            years_per_progression: 3.5,
            thresholds: vec![
                RatioThreshold { above: 1.5, score: 90 },
                RatioThreshold { above: 1.2, score: 75 },
                RatioThreshold { above: 1.0, score: 65 },
                RatioThreshold { above: 0.8, score: 55 },
                RatioThreshold { above: 0.5, score: 40 },
            ],
            floor_score: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillWeights {
    pub technical_base: u32,
    pub per_technical_skill: u32,
    pub per_modern_skill: u32,
    pub soft_base: u32,
    pub per_soft_skill: u32,
    pub per_critical_soft_skill: u32,
    pub cap: u8,
    /// Matched case-insensitively as substrings of the user's skills.
    pub modern_skills: Vec<String>,
    pub critical_soft_skills: Vec<String>,
    pub leadership_keywords: Vec<String>,
}

impl Default for SkillWeights {
    fn default() -> Self {
        Self {
            technical_base: 40,
            per_technical_skill: 5,
            per_modern_skill: 8,
            soft_base: 40,
            per_soft_skill: 6,
            per_critical_soft_skill: 10,
            cap: 95,
            modern_skills: to_strings(&[
                "Python",
                "TypeScript",
                "Rust",
                "Kubernetes",
                "Docker",
                "AWS",
                "Cloud",
                "Machine Learning",
                "React",
                "GraphQL",
                "Terraform",
            ]),
            critical_soft_skills: to_strings(&[
                "Leadership",
                "Communication",
                "Problem Solving",
                "Strategic",
                "Negotiation",
                "Emotional Intelligence",
            ]),
            leadership_keywords: to_strings(&["leadership", "mentor", "management", "coaching"]),
        }
    }
}

/// Title keywords that select a base position score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleTier {
    pub keywords: Vec<String>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PositionTable {
    /// Checked in order; the first tier with a matching keyword wins.
    pub tiers: Vec<TitleTier>,
    pub junior_keywords: Vec<String>,
    pub junior_years: f64,
    pub junior_score: u8,
    pub default_score: u8,
    pub veteran_years: f64,
    pub veteran_ceiling: u8,
    pub veteran_bonus: i32,
    pub early_career_years: f64,
    pub early_career_floor: u8,
    pub early_career_penalty: i32,
}

impl Default for PositionTable {
    fn default() -> Self {
        Self {
            tiers: vec![
                TitleTier {
                    keywords: to_strings(&["director", "vp", "head"]),
                    score: 85,
                },
                TitleTier {
                    keywords: to_strings(&["senior", "lead", "principal"]),
                    score: 70,
                },
                TitleTier {
                    keywords: to_strings(&["manager"]),
                    score: 65,
                },
            ],
            junior_keywords: to_strings(&["junior"]),
            junior_years: 5.0,
            junior_score: 35,
            default_score: 50,
            veteran_years: 15.0,
            veteran_ceiling: 70,
            veteran_bonus: 10,
            early_career_years: 5.0,
            early_career_floor: 60,
            early_career_penalty: 10,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
