use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifier issued by the identity provider; profiles are 1:1 with users.
    UserId
);
string_id!(ProfileId);
string_id!(ReportId);
string_id!(PlanId);
string_id!(
    /// Globally unique, assigned when a recommendation is generated.
    RecommendationId
);

/// Fixed industry catalog offered during profile setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "Software Engineering")]
    SoftwareEngineering,
    Marketing,
    Sales,
    #[serde(rename = "Product Management")]
    ProductManagement,
    Technology,
    Finance,
    Healthcare,
    Education,
    Manufacturing,
    Retail,
    Consulting,
    Legal,
    #[serde(rename = "Real Estate")]
    RealEstate,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 14] = [
        Industry::SoftwareEngineering,
        Industry::Marketing,
        Industry::Sales,
        Industry::ProductManagement,
        Industry::Technology,
        Industry::Finance,
        Industry::Healthcare,
        Industry::Education,
        Industry::Manufacturing,
        Industry::Retail,
        Industry::Consulting,
        Industry::Legal,
        Industry::RealEstate,
        Industry::Other,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Industry::SoftwareEngineering => "Software Engineering",
            Industry::Marketing => "Marketing",
            Industry::Sales => "Sales",
            Industry::ProductManagement => "Product Management",
            Industry::Technology => "Technology",
            Industry::Finance => "Finance",
            Industry::Healthcare => "Healthcare",
            Industry::Education => "Education",
            Industry::Manufacturing => "Manufacturing",
            Industry::Retail => "Retail",
            Industry::Consulting => "Consulting",
            Industry::Legal => "Legal",
            Industry::RealEstate => "Real Estate",
            Industry::Other => "Other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|industry| industry.label().eq_ignore_ascii_case(label.trim()))
    }
}

/// One step in the user's employment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareerProgressionEntry {
    pub date: NaiveDate,
    pub title: String,
    pub company: String,
}

/// Self-reported career facts as submitted by the user, before ids are assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSubmission {
    pub graduation_year: Option<i32>,
    pub field_of_study: String,
    pub age: Option<u8>,
    pub country: Option<String>,
    pub current_company: String,
    pub current_title: String,
    pub industry: Option<Industry>,
    pub dev_role: Option<String>,
    pub years_experience: Option<f64>,
    pub technical_skills: Vec<String>,
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub platforms: Vec<String>,
    pub soft_skills: Vec<String>,
    pub career_progression: Vec<CareerProgressionEntry>,
    pub salary_package: Option<u32>,
}

/// The stored profile. Derived values are methods, never fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub profile_id: ProfileId,
    pub user_id: UserId,
    pub graduation_year: Option<i32>,
    pub field_of_study: String,
    pub age: Option<u8>,
    pub country: Option<String>,
    pub current_company: String,
    pub current_title: String,
    pub industry: Option<Industry>,
    pub dev_role: Option<String>,
    pub years_experience: Option<f64>,
    pub technical_skills: Vec<String>,
    pub languages: Vec<String>,
    pub frameworks: Vec<String>,
    pub databases: Vec<String>,
    pub platforms: Vec<String>,
    pub soft_skills: Vec<String>,
    pub career_progression: Vec<CareerProgressionEntry>,
    pub salary_package: Option<u32>,
}

const COMPLETION_CHECKLIST_LEN: u32 = 15;

impl Profile {
    pub fn from_submission(
        profile_id: ProfileId,
        user_id: UserId,
        submission: ProfileSubmission,
    ) -> Self {
        let ProfileSubmission {
            graduation_year,
            field_of_study,
            age,
            country,
            current_company,
            current_title,
            industry,
            dev_role,
            years_experience,
            technical_skills,
            languages,
            frameworks,
            databases,
            platforms,
            soft_skills,
            career_progression,
            salary_package,
        } = submission;

        Self {
            profile_id,
            user_id,
            graduation_year,
            field_of_study,
            age,
            country: country.filter(|value| !value.trim().is_empty()),
            current_company,
            current_title,
            industry,
            dev_role: dev_role.filter(|value| !value.trim().is_empty()),
            years_experience,
            technical_skills,
            languages,
            frameworks,
            databases,
            platforms,
            soft_skills,
            career_progression,
            salary_package,
        }
    }

    /// Union of every technical skill input, de-duplicated case-insensitively
    /// in first-seen order.
    pub fn all_technical_skills(&self) -> Vec<&str> {
        let mut seen: Vec<String> = Vec::new();
        let mut skills = Vec::new();
        let sources = [
            &self.technical_skills,
            &self.languages,
            &self.frameworks,
            &self.databases,
            &self.platforms,
        ];

        for skill in sources.into_iter().flatten() {
            let trimmed = skill.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = trimmed.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                skills.push(trimmed);
            }
        }

        skills
    }

    pub fn soft_skill_list(&self) -> Vec<&str> {
        let mut seen: Vec<String> = Vec::new();
        let mut skills = Vec::new();
        for skill in &self.soft_skills {
            let trimmed = skill.trim();
            let key = trimmed.to_lowercase();
            if !trimmed.is_empty() && !seen.contains(&key) {
                seen.push(key);
                skills.push(trimmed);
            }
        }
        skills
    }

    /// Career history, most recent first.
    pub fn career_progression_sorted(&self) -> Vec<&CareerProgressionEntry> {
        let mut entries: Vec<&CareerProgressionEntry> = self.career_progression.iter().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        entries
    }

    /// Experience in years: the reported value when usable, otherwise derived
    /// from the graduation year. `None` when neither is known.
    pub fn effective_years_experience(&self, current_year: i32) -> Option<f64> {
        match self.years_experience {
            Some(years) if years.is_finite() => Some(years.max(0.0)),
            _ => self
                .graduation_year
                .map(|year| f64::from((current_year - year).max(0))),
        }
    }

    pub fn completion_percentage(&self) -> u8 {
        let checks = [
            self.graduation_year.is_some(),
            !self.field_of_study.trim().is_empty(),
            !self.current_company.trim().is_empty(),
            !self.current_title.trim().is_empty(),
            self.industry.is_some(),
            !self.technical_skills.is_empty(),
            !self.soft_skills.is_empty(),
            !self.career_progression.is_empty(),
            self.salary_package.is_some_and(|salary| salary > 0),
            self.country.is_some(),
            self.years_experience.is_some_and(|years| years > 0.0),
            self.dev_role.is_some(),
            !self.languages.is_empty(),
            self.languages.len() >= 2,
            !self.databases.is_empty() || !self.frameworks.is_empty(),
        ];

        let done = checks.iter().filter(|check| **check).count() as f64;
        let pct = (done / f64::from(COMPLETION_CHECKLIST_LEN) * 100.0).round();
        pct.min(100.0) as u8
    }

    pub fn view(&self) -> ProfileView<'_> {
        ProfileView {
            profile_id: &self.profile_id,
            user_id: &self.user_id,
            graduation_year: self.graduation_year,
            field_of_study: &self.field_of_study,
            age: self.age,
            country: self.country.as_deref(),
            current_company: &self.current_company,
            current_title: &self.current_title,
            industry: self.industry,
            dev_role: self.dev_role.as_deref(),
            years_experience: self.years_experience,
            technical_skills: self.all_technical_skills(),
            soft_skills: self.soft_skill_list(),
            career_progression: self.career_progression_sorted(),
            has_salary_package: self.salary_package.is_some(),
            completion_percentage: self.completion_percentage(),
        }
    }
}

/// Response shape for a profile. The salary itself is never echoed back.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileView<'a> {
    pub profile_id: &'a ProfileId,
    pub user_id: &'a UserId,
    pub graduation_year: Option<i32>,
    pub field_of_study: &'a str,
    pub age: Option<u8>,
    pub country: Option<&'a str>,
    pub current_company: &'a str,
    pub current_title: &'a str,
    pub industry: Option<Industry>,
    pub dev_role: Option<&'a str>,
    pub years_experience: Option<f64>,
    pub technical_skills: Vec<&'a str>,
    pub soft_skills: Vec<&'a str>,
    pub career_progression: Vec<&'a CareerProgressionEntry>,
    pub has_salary_package: bool,
    pub completion_percentage: u8,
}
