use super::domain::{Profile, ProfileId, ProfileSubmission, UserId};

/// Validation errors raised when a profile submission is malformed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProfileError {
    #[error("graduation year {found} outside accepted range {min}..={max}")]
    GraduationYearOutOfRange { found: i32, min: i32, max: i32 },
    #[error("age {0} outside accepted range 14..=100")]
    AgeOutOfRange(u8),
    #[error("years of experience must be a finite value between 0 and {max}, found {found}")]
    InvalidYearsExperience { found: f64, max: f64 },
    #[error("career progression entry {index} is missing a title")]
    UntitledProgressionEntry { index: usize },
}

const EARLIEST_GRADUATION_YEAR: i32 = 1950;
const GRADUATION_LOOKAHEAD_YEARS: i32 = 6;
const MAX_YEARS_EXPERIENCE: f64 = 70.0;

/// Converts submissions into stored profiles, rejecting values no scoring
/// path should ever see.
#[derive(Debug, Clone, Default)]
pub struct ProfileGuard;

impl ProfileGuard {
    pub fn profile_from_submission(
        &self,
        profile_id: ProfileId,
        user_id: UserId,
        submission: ProfileSubmission,
        current_year: i32,
    ) -> Result<Profile, ProfileError> {
        if let Some(year) = submission.graduation_year {
            let max = current_year + GRADUATION_LOOKAHEAD_YEARS;
            if !(EARLIEST_GRADUATION_YEAR..=max).contains(&year) {
                return Err(ProfileError::GraduationYearOutOfRange {
                    found: year,
                    min: EARLIEST_GRADUATION_YEAR,
                    max,
                });
            }
        }

        if let Some(age) = submission.age {
            if !(14..=100).contains(&age) {
                return Err(ProfileError::AgeOutOfRange(age));
            }
        }

        if let Some(years) = submission.years_experience {
            if !years.is_finite() || !(0.0..=MAX_YEARS_EXPERIENCE).contains(&years) {
                return Err(ProfileError::InvalidYearsExperience {
                    found: years,
                    max: MAX_YEARS_EXPERIENCE,
                });
            }
        }

        if let Some(index) = submission
            .career_progression
            .iter()
            .position(|entry| entry.title.trim().is_empty())
        {
            return Err(ProfileError::UntitledProgressionEntry { index });
        }

        Ok(Profile::from_submission(profile_id, user_id, submission))
    }
}
