//! Search and platform filtering over a user's generations.

use crate::generation::platform::Platform;
use crate::models::generation::GenerationRecord;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationFilter {
    /// Lowercased search text.
    search: Option<String>,
    /// Empty means every platform.
    platforms: Vec<Platform>,
}

impl GenerationFilter {
    /// Builds a filter from raw query parameters. `platforms` is comma-separated.
    pub fn parse(search: Option<&str>, platforms: Option<&str>) -> Result<Self, String> {
        let search = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let platforms = platforms
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::parse::<Platform>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { search, platforms })
    }

    pub fn is_empty(&self) -> bool {
        self.search.is_none() && self.platforms.is_empty()
    }

    /// Search hits prompt, title, content or any tag, case-insensitively.
    pub fn matches(&self, record: &GenerationRecord) -> bool {
        if !self.platforms.is_empty()
            && !self.platforms.iter().any(|p| p.as_str() == record.platform)
        {
            return false;
        }

        let Some(search) = &self.search else {
            return true;
        };

        let contains = |text: &str| text.to_lowercase().contains(search.as_str());
        contains(record.prompt.as_str())
            || record.title.as_deref().is_some_and(contains)
            || contains(record.content.as_str())
            || record.seo_tags.iter().any(|t| contains(t.as_str()))
    }

    pub fn apply(&self, records: Vec<GenerationRecord>) -> Vec<GenerationRecord> {
        if self.is_empty() {
            return records;
        }
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}
