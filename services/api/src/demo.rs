use crate::infra::{benchmark_preview, BenchmarkPreview, InMemoryCareerRepository};
use careeriq::error::AppError;
use careeriq::workflows::career::{
    BenchmarkConfig, BenchmarkEngine, BenchmarkReport, CareerProgressionEntry, CareerService,
    DashboardSummary, Industry, ProfileSubmission, RecommendationStatus, RecommendationUpdate,
    RegenerationPolicy, SystemClock, UserId,
};
use chrono::{Datelike, NaiveDate, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct BenchmarkArgs {
    /// Profile document (JSON) to score
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Year used for experience calculations (defaults to the current year)
    #[arg(long)]
    pub(crate) current_year: Option<i32>,
    /// Print the full preview as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Skip the CSV export at the end of the demo.
    #[arg(long)]
    pub(crate) skip_export: bool,
}

pub(crate) fn run_benchmark(args: BenchmarkArgs) -> Result<(), AppError> {
    let BenchmarkArgs {
        profile,
        current_year,
        json,
    } = args;

    let raw = std::fs::read_to_string(&profile)?;
    let submission: ProfileSubmission = serde_json::from_str(&raw)?;
    let now = Utc::now();
    let current_year = current_year.unwrap_or_else(|| now.year());

    let engine = BenchmarkEngine::new(BenchmarkConfig::default());
    let preview = benchmark_preview(&engine, submission, now, current_year)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&preview)?);
    } else {
        render_preview(&preview, current_year);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("CareerIQ demo");

    let repository = Arc::new(InMemoryCareerRepository::default());
    let service = CareerService::new(
        repository,
        Arc::new(SystemClock),
        BenchmarkConfig::default(),
        RegenerationPolicy::PreserveProgress,
    );
    let user = UserId("demo-user".to_string());

    let profile = service.upsert_profile(&user, demo_profile())?;
    println!(
        "- Saved profile for {} at {} ({}% complete)",
        profile.current_title,
        profile.current_company,
        profile.completion_percentage()
    );

    let report = service.generate_benchmark(&user)?;
    render_report(&report);

    let plan = service.generate_plan(&user)?;
    println!("\nCareer plan ({} recommendations)", plan.recommendations.len());
    for recommendation in &plan.recommendations {
        println!(
            "  - [{}] {} ({})",
            recommendation.priority_level.label(),
            recommendation.title,
            recommendation.category.label()
        );
    }

    if let Some(first) = plan.recommendations.first() {
        let updated = service.update_recommendation(
            &user,
            &first.recommendation_id,
            RecommendationUpdate {
                status: Some(RecommendationStatus::Completed),
                user_notes: Some("Scheduled compensation review".to_string()),
            },
        )?;
        println!("\n- Marked '{}' as {}", updated.title, updated.status.label());
    }
    if let Some(last) = plan.recommendations.last() {
        let updated = service.update_recommendation(
            &user,
            &last.recommendation_id,
            RecommendationUpdate {
                status: Some(RecommendationStatus::Dismissed),
                user_notes: None,
            },
        )?;
        println!("- Marked '{}' as {}", updated.title, updated.status.label());
    }

    render_dashboard(&service.dashboard(&user)?);

    if !args.skip_export {
        println!("\nPlan export (CSV)");
        print!("{}", service.export_plan(&user)?);
    }

    Ok(())
}

fn demo_profile() -> ProfileSubmission {
    let entry = |year: i32, title: &str, company: &str| {
        NaiveDate::from_ymd_opt(year, 4, 1).map(|date| CareerProgressionEntry {
            date,
            title: title.to_string(),
            company: company.to_string(),
        })
    };

    ProfileSubmission {
        graduation_year: Some(2015),
        field_of_study: "Computer Science".to_string(),
        age: Some(32),
        country: Some("United States".to_string()),
        current_company: "Acme Analytics".to_string(),
        current_title: "Senior Data Engineer".to_string(),
        industry: Some(Industry::Technology),
        dev_role: Some("Data".to_string()),
        years_experience: Some(9.0),
        technical_skills: vec!["SQL".to_string(), "Airflow".to_string()],
        languages: vec!["Python".to_string(), "Scala".to_string()],
        frameworks: vec!["Spark".to_string()],
        databases: vec!["PostgreSQL".to_string()],
        platforms: vec!["AWS".to_string()],
        soft_skills: vec!["Communication".to_string()],
        career_progression: [
            entry(2016, "Data Analyst", "Initech"),
            entry(2019, "Data Engineer", "Initech"),
            entry(2023, "Senior Data Engineer", "Acme Analytics"),
        ]
        .into_iter()
        .flatten()
        .collect(),
        salary_package: Some(112_000),
    }
}

fn render_report(report: &BenchmarkReport) {
    println!("\nBenchmark report {}", report.report_id);
    println!(
        "- Compensation: {} percentile ({})",
        report.compensation_quartile,
        report.market_comparison.label()
    );
    println!("  {}", report.insights.compensation);
    println!("- Career progression: {}", report.career_progression_score);
    println!("  {}", report.insights.progression);
    println!(
        "- Skill relevance: technical {} | soft {} | overall {}",
        report.skill_relevance_scores.technical,
        report.skill_relevance_scores.soft,
        report.skill_relevance_scores.overall
    );
    println!("  {}", report.insights.skills);
    println!("- Position level: {}", report.position_level_score);
    println!("- Overall: {}", report.insights.overall);
    if !report.missing_critical_skills.is_empty() {
        println!(
            "- In-demand skills to consider: {}",
            report.missing_critical_skills.join(", ")
        );
    }
    println!("- Data sources: {}", report.data_sources_used.join("; "));
}

fn render_preview(preview: &BenchmarkPreview, current_year: i32) {
    println!("Benchmark preview (experience as of {current_year})");
    render_report(&preview.report);
    println!("- Overall score: {}", preview.overall_score);
    println!("\nRecommendations");
    for recommendation in &preview.recommendations {
        println!(
            "  - [{}] {}: {}",
            recommendation.priority_level.label(),
            recommendation.title,
            recommendation.expected_impact
        );
    }
}

fn render_dashboard(summary: &DashboardSummary) {
    println!("\nDashboard");
    match summary.benchmark_percentile {
        Some(percentile) => println!("- Benchmark percentile: {percentile}"),
        None => println!("- Benchmark percentile: not generated"),
    }
    println!(
        "- Plan progress: {}/{} completed ({}%)",
        summary.completed_recommendations,
        summary.total_recommendations,
        summary.plan_completion_percentage
    );
    if let Some(milestone) = &summary.next_milestone {
        println!("- Next milestone: {milestone}");
    }
}
