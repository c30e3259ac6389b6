use std::collections::HashMap;

use serde::Serialize;

use crate::models::generation::GenerationRecord;

/// How many recent generations the profile shows.
pub const RECENT_LIMIT: i64 = 3;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub email: String,
    pub name: Option<String>,
    pub generation_count: i32,
    pub total_generations: usize,
    /// Most frequent platform across stored generations, or `"none"`.
    pub favorite_platform: String,
    pub recent: Vec<GenerationRecord>,
}

/// Most frequent platform; ties go to the one seen first.
pub fn favorite_platform(records: &[GenerationRecord]) -> String {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.platform.as_str()).or_default() += 1;
    }

    let mut favorite: Option<(&str, usize)> = None;
    for record in records {
        let count = counts[record.platform.as_str()];
        if favorite.map_or(true, |(_, best)| count > best) {
            favorite = Some((record.platform.as_str(), count));
        }
    }

    favorite
        .map(|(platform, _)| platform.to_string())
        .unwrap_or_else(|| "none".to_string())
}
