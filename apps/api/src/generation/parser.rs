//! Response normalization — turns the model's text payload into a `GenerationResult`.
//!
//! Models (free-tier ones especially) do not reliably return JSON. A strict parse is
//! tried first; on failure a lossy pattern scan recovers what it can. The scan is a
//! best-effort extractor: quoted values containing escaped quotes or newlines are
//! truncated or missed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use crate::generation::generator::GenerationResult;
use crate::generation::platform::Platform;
use crate::generation::prompts::CONTENT_PLACEHOLDER;
use crate::llm_client::strip_json_fences;

static HASHTAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[a-zA-Z0-9]+").expect("hashtag pattern is valid"));
static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""title":\s*"([^"]+)""#).expect("title pattern is valid"));
static CONTENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""content":\s*"([^"]+)""#).expect("content pattern is valid"));

/// Outcome of normalizing one model response.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// The payload was valid JSON of the requested shape.
    WellFormed(GenerationResult),
    /// The payload was not JSON; fields were scraped heuristically.
    Recovered(GenerationResult),
}

impl Normalized {
    pub fn is_recovered(&self) -> bool {
        matches!(self, Normalized::Recovered(_))
    }

    pub fn result(&self) -> &GenerationResult {
        match self {
            Normalized::WellFormed(r) | Normalized::Recovered(r) => r,
        }
    }

    pub fn into_result(self) -> GenerationResult {
        match self {
            Normalized::WellFormed(r) | Normalized::Recovered(r) => r,
        }
    }
}

/// Shape the model is asked to return. Fields are loose so that wrong types
/// degrade to defaults instead of failing the parse.
#[derive(Debug, Deserialize)]
struct ModelOutput {
    title: Option<Value>,
    content: Option<Value>,
    #[serde(rename = "seoTags")]
    seo_tags: Option<Value>,
}

/// Normalizes a raw model payload for `platform`.
///
/// Always yields non-empty `content` and an array of tags.
pub fn normalize_response(raw: &str, platform: Platform, include_hashtags: bool) -> Normalized {
    let text = strip_json_fences(raw);

    // Only a JSON object counts as well-formed. Arrays would otherwise be
    // mapped onto the fields by position.
    let parsed = match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => {
            serde_json::from_value::<ModelOutput>(value).map_err(|e| e.to_string())
        }
        Ok(other) => Err(format!("expected a JSON object, got {}", json_kind(&other))),
        Err(e) => Err(e.to_string()),
    };

    match parsed {
        Ok(output) => Normalized::WellFormed(from_model_output(output)),
        Err(reason) => {
            warn!("Model output for {platform} is not a JSON object, using fallback extraction: {reason}");
            Normalized::Recovered(recover(text, platform, include_hashtags))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn from_model_output(output: ModelOutput) -> GenerationResult {
    let content = match output.content {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };

    let title = match output.title {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    };

    let seo_tags = match output.seo_tags {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    finalize(GenerationResult {
        content,
        title,
        seo_tags,
    })
}

fn recover(text: &str, platform: Platform, include_hashtags: bool) -> GenerationResult {
    let seo_tags = if include_hashtags {
        HASHTAG_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    } else {
        Vec::new()
    };

    let title = if platform.profile().include_title {
        capture(&TITLE_RE, text)
    } else {
        None
    };

    let content = capture(&CONTENT_RE, text).unwrap_or_else(|| text.to_string());

    finalize(GenerationResult {
        content,
        title,
        seo_tags,
    })
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Enforces the content invariant shared by both parse paths.
fn finalize(mut result: GenerationResult) -> GenerationResult {
    if result.content.trim().is_empty() {
        result.content = CONTENT_PLACEHOLDER.to_string();
    }
    result
}
