use super::super::domain::RecommendationId;
use super::{CareerPlan, Recommendation, RecommendationStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Partial update for a single recommendation. Status and notes are
/// independent; either may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationUpdate {
    #[serde(default)]
    pub status: Option<RecommendationStatus>,
    #[serde(default)]
    pub user_notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("recommendation {0} not found in plan")]
    NotFound(RecommendationId),
    #[error("recommendation {id} cannot move from {} to {}", .from.label(), .to.label())]
    InvalidTransition {
        id: RecommendationId,
        from: RecommendationStatus,
        to: RecommendationStatus,
    },
}

impl RecommendationStatus {
    pub fn can_transition_to(self, next: RecommendationStatus) -> bool {
        use RecommendationStatus::*;
        matches!(
            (self, next),
            (Active, _) | (Completed, _) | (Dismissed, Dismissed)
        )
    }
}

impl Recommendation {
    /// Move to `next`, stamping the entry date. Same-state moves leave every
    /// field untouched, and leaving `completed` keeps the last completion date.
    pub fn transition(
        &mut self,
        next: RecommendationStatus,
        now: DateTime<Utc>,
    ) -> Result<(), LifecycleError> {
        if !self.status.can_transition_to(next) {
            return Err(LifecycleError::InvalidTransition {
                id: self.recommendation_id.clone(),
                from: self.status,
                to: next,
            });
        }
        if self.status == next {
            return Ok(());
        }

        match next {
            RecommendationStatus::Completed => self.completed_date = Some(now),
            RecommendationStatus::Dismissed => self.dismissed_date = Some(now),
            RecommendationStatus::Active => {}
        }
        self.status = next;
        Ok(())
    }
}

impl CareerPlan {
    /// Apply `update` to one recommendation. Nothing is changed when the
    /// requested transition is rejected.
    pub fn apply_update(
        &mut self,
        id: &RecommendationId,
        update: RecommendationUpdate,
        now: DateTime<Utc>,
    ) -> Result<&Recommendation, LifecycleError> {
        let recommendation = self
            .recommendations
            .iter_mut()
            .find(|recommendation| &recommendation.recommendation_id == id)
            .ok_or_else(|| LifecycleError::NotFound(id.clone()))?;

        if let Some(status) = update.status {
            recommendation.transition(status, now)?;
        }
        if let Some(notes) = update.user_notes {
            recommendation.user_notes = notes;
        }

        Ok(recommendation)
    }
}
