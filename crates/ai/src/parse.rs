use fitclub_core::models::recommendation::RecommendationPlan;

/// Parses the model's text output as a recommendation plan. The payload may
/// be raw JSON, JSON wrapped in markdown code fences, or JSON embedded in
/// surrounding prose; anything else yields None and the pipeline falls back.
pub fn parse_plan(raw: &str) -> Option<RecommendationPlan> {
    let stripped = strip_code_fences(raw);

    if let Ok(plan) = serde_json::from_str(stripped) {
        return Some(plan);
    }

    let braced = braced_slice(stripped)?;
    serde_json::from_str(braced).ok()
}

fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let without_open = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let without_close = without_open.strip_suffix("```").unwrap_or(without_open);
    without_close.trim()
}

// Last resort: the outermost brace-delimited slice
fn braced_slice(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}
