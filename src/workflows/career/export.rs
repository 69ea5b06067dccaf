use super::plan::{CareerPlan, PriorityLevel, RecommendationStatus};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write csv row: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer was not valid utf-8")]
    Encoding(#[from] std::string::FromUtf8Error),
    #[error("failed to flush csv writer: {0}")]
    Flush(String),
}

pub const fn timeline_for(priority: PriorityLevel) -> &'static str {
    match priority {
        PriorityLevel::High => "0-3 months",
        PriorityLevel::Medium => "3-6 months",
        PriorityLevel::Low => "6-12 months",
    }
}

/// Render the plan's non-dismissed recommendations as CSV for the document
/// renderer.
pub fn plan_to_csv(plan: &CareerPlan) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "Title",
        "Category",
        "Priority",
        "Timeline",
        "Status",
        "Description",
    ])?;

    for recommendation in plan
        .recommendations
        .iter()
        .filter(|recommendation| recommendation.status != RecommendationStatus::Dismissed)
    {
        writer.write_record([
            recommendation.title.as_str(),
            recommendation.category.label(),
            recommendation.priority_level.label(),
            timeline_for(recommendation.priority_level),
            recommendation.status.label(),
            recommendation.description.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Flush(err.error().to_string()))?;
    Ok(String::from_utf8(bytes)?)
}
