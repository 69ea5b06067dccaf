use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use careeriq::workflows::career::{
    BenchmarkConfig, BenchmarkReport, CareerPlan, CareerProgressionEntry, CareerRepository,
    CareerService, CareerServiceError, FixedClock, Industry, LifecycleError, Profile,
    ProfileSubmission, Recommendation, RecommendationId, RecommendationStatus,
    RecommendationUpdate, RegenerationPolicy, RepositoryError, UserId,
};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

#[derive(Default)]
struct StoreState {
    profiles: HashMap<UserId, Profile>,
    reports: Vec<BenchmarkReport>,
    plans: HashMap<UserId, CareerPlan>,
}

#[derive(Default, Clone)]
struct SharedStore {
    state: Arc<Mutex<StoreState>>,
}

impl CareerRepository for SharedStore {
    fn fetch_profile(&self, user_id: &UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.state.lock().unwrap().profiles.get(user_id).cloned())
    }

    fn put_profile(&self, profile: Profile) -> Result<Profile, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.profiles.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    fn append_report(&self, report: BenchmarkReport) -> Result<BenchmarkReport, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        for earlier in state
            .reports
            .iter_mut()
            .filter(|earlier| earlier.user_id == report.user_id)
        {
            earlier.is_current = false;
        }
        state.reports.push(report.clone());
        Ok(report)
    }

    fn current_report(&self, user_id: &UserId) -> Result<Option<BenchmarkReport>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reports
            .iter()
            .find(|report| &report.user_id == user_id && report.is_current)
            .cloned())
    }

    fn report_history(&self, user_id: &UserId) -> Result<Vec<BenchmarkReport>, RepositoryError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .reports
            .iter()
            .rev()
            .filter(|report| &report.user_id == user_id)
            .cloned()
            .collect())
    }

    fn fetch_plan(&self, user_id: &UserId) -> Result<Option<CareerPlan>, RepositoryError> {
        Ok(self.state.lock().unwrap().plans.get(user_id).cloned())
    }

    fn put_plan(&self, plan: CareerPlan) -> Result<CareerPlan, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.plans.insert(plan.user_id.clone(), plan.clone());
        Ok(plan)
    }

    fn patch_recommendation(
        &self,
        user_id: &UserId,
        recommendation_id: &RecommendationId,
        update: RecommendationUpdate,
        now: DateTime<Utc>,
    ) -> Result<Option<Recommendation>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        match state.plans.get_mut(user_id) {
            Some(plan) => Ok(Some(plan.apply_update(recommendation_id, update, now)?.clone())),
            None => Ok(None),
        }
    }
}

fn service(store: Arc<SharedStore>) -> CareerService<SharedStore, FixedClock> {
    let now = Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).single().unwrap();
    CareerService::new(
        store,
        Arc::new(FixedClock(now)),
        BenchmarkConfig::default(),
        RegenerationPolicy::Replace,
    )
}

fn junior_analyst() -> ProfileSubmission {
    ProfileSubmission {
        graduation_year: Some(2022),
        field_of_study: "Economics".to_string(),
        current_company: "Fabrikam".to_string(),
        current_title: "Junior Analyst".to_string(),
        industry: Some(Industry::Finance),
        technical_skills: vec!["Excel".to_string()],
        soft_skills: vec!["Teamwork".to_string()],
        career_progression: vec![CareerProgressionEntry {
            date: NaiveDate::from_ymd_opt(2022, 7, 1).unwrap(),
            title: "Junior Analyst".to_string(),
            company: "Fabrikam".to_string(),
        }],
        salary_package: Some(52_000),
        ..ProfileSubmission::default()
    }
}

#[test]
fn junior_profile_flows_from_benchmark_to_tracked_plan() {
    let store = Arc::new(SharedStore::default());
    let service = service(store.clone());
    let user = UserId("analyst-7".to_string());

    service
        .upsert_profile(&user, junior_analyst())
        .expect("profile saved");
    let report = service.generate_benchmark(&user).expect("benchmark");

    // 3 years derived from graduation: early-career penalty and junior title.
    assert_eq!(report.compensation_quartile, 15);
    assert_eq!(report.position_level_score, 35);
    assert_eq!(report.career_progression_score, 55);
    assert_eq!(report.skill_relevance_scores.technical, 45);
    assert_eq!(report.skill_relevance_scores.soft, 46);

    let plan = service.generate_plan(&user).expect("plan");
    assert_eq!(plan.benchmark_report_id, report.report_id);
    let keys: Vec<&str> = plan.recommendations.iter().map(|rec| rec.rule.as_str()).collect();
    assert_eq!(
        keys,
        vec![
            "negotiate_salary",
            "learn_modern_skill",
            "develop_leadership",
            "promotion_visibility",
            "expand_network",
        ]
    );
    assert_eq!(plan.recommendations[1].title, "Learn Python");

    let ids: Vec<_> = plan
        .recommendations
        .iter()
        .map(|rec| rec.recommendation_id.clone())
        .collect();
    for id in &ids[..2] {
        service
            .update_recommendation(
                &user,
                id,
                RecommendationUpdate {
                    status: Some(RecommendationStatus::Completed),
                    user_notes: None,
                },
            )
            .expect("completion recorded");
    }
    service
        .update_recommendation(
            &user,
            &ids[4],
            RecommendationUpdate {
                status: Some(RecommendationStatus::Dismissed),
                user_notes: None,
            },
        )
        .expect("dismissal recorded");

    let summary = service.dashboard(&user).expect("dashboard");
    assert_eq!(summary.plan_completion_percentage, 50);
    assert_eq!(summary.completed_recommendations, 2);
    assert_eq!(summary.total_recommendations, 4);
    assert_eq!(
        summary.next_milestone.as_deref(),
        Some("Develop leadership skills")
    );

    // Reopening a completed item keeps its completion stamp.
    let reopened = service
        .update_recommendation(
            &user,
            &ids[0],
            RecommendationUpdate {
                status: Some(RecommendationStatus::Active),
                user_notes: Some("salary review postponed".to_string()),
            },
        )
        .expect("reopen allowed");
    assert_eq!(reopened.status, RecommendationStatus::Active);
    assert!(reopened.completed_date.is_some());
    assert_eq!(reopened.recommendation_id, ids[0]);
    let stored = service.plan(&user).expect("plan still stored");
    assert_eq!(stored.recommendations.len(), ids.len());
    assert_eq!(
        stored
            .recommendation(&ids[0])
            .map(|rec| rec.user_notes.as_str()),
        Some("salary review postponed")
    );
    assert_eq!(stored.overall_completion_percentage(), 25);
    assert_eq!(
        service
            .dashboard(&user)
            .expect("dashboard")
            .plan_completion_percentage,
        25
    );

    let err = service
        .update_recommendation(
            &user,
            &ids[4],
            RecommendationUpdate {
                status: Some(RecommendationStatus::Completed),
                user_notes: None,
            },
        )
        .expect_err("dismissed is terminal");
    assert!(matches!(
        err,
        CareerServiceError::Lifecycle(LifecycleError::InvalidTransition { .. })
    ));
}

#[test]
fn benchmark_history_is_scoped_per_user() {
    let store = Arc::new(SharedStore::default());
    let service = service(store);
    let first = UserId("first".to_string());
    let second = UserId("second".to_string());

    service.upsert_profile(&first, junior_analyst()).unwrap();
    service.upsert_profile(&second, junior_analyst()).unwrap();
    service.generate_benchmark(&first).unwrap();
    service.generate_benchmark(&second).unwrap();
    let latest = service.generate_benchmark(&first).unwrap();

    let history = service.benchmark_history(&first).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].report_id, latest.report_id);
    assert_eq!(
        history.iter().filter(|report| report.is_current).count(),
        1
    );
    assert!(service
        .current_benchmark(&second)
        .unwrap()
        .is_some_and(|report| report.is_current));
}
