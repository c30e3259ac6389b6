//! Content generation — composes the platform instruction, makes one LLM call and
//! normalizes the answer.
//!
//! Flow: validate → platform profile → build_instruction → CompletionProvider →
//!       normalize_response → GenerationResult.
//!
//! Pure request → result: nothing here persists or emits analytics. Callers do that
//! after a successful result.

use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::generation::parser::{normalize_response, Normalized};
use crate::generation::platform::{ContentLength, Platform};
use crate::generation::prompts::HASHTAG_CLAUSE_TEMPLATE;
use crate::llm_client::prompts::{
    CONTENT_CREATOR_SYSTEM, HASHTAGS_DIRECTIVE, JSON_WITHOUT_TITLE, JSON_WITH_TITLE,
    SEO_TAGS_DIRECTIVE,
};
use crate::llm_client::{CompletionProvider, CompletionRequest};

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

fn default_tone() -> String {
    "Professional".to_string()
}

fn default_audience() -> String {
    "General".to_string()
}

/// Style options shared by single- and multi-platform requests.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleOptions {
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_audience")]
    pub audience: String,
    #[serde(default)]
    pub include_hashtags: bool,
    #[serde(default)]
    pub include_emojis: bool,
    #[serde(default)]
    pub content_length: ContentLength,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            tone: default_tone(),
            audience: default_audience(),
            include_hashtags: false,
            include_emojis: false,
            content_length: ContentLength::default(),
        }
    }
}

/// Request body for a single-platform generation.
///
/// `prompt` and `platform` are optional at the wire level so that missing values
/// surface as a validation error rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub prompt: String,
    pub platform: Option<Platform>,
    #[serde(flatten)]
    pub style: StyleOptions,
}

/// Request body for a multi-platform generation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGenerationRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default)]
    pub platforms: Vec<Platform>,
    #[serde(flatten)]
    pub style: StyleOptions,
}

/// Normalized model output for one platform.
///
/// `seo_tags` is always present (possibly empty) and `content` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub seo_tags: Vec<String>,
}

impl GenerationRequest {
    fn validate(&self) -> Result<Platform, AppError> {
        match self.platform {
            Some(platform) if !self.prompt.trim().is_empty() => Ok(platform),
            _ => Err(AppError::Validation("Missing required fields".to_string())),
        }
    }
}

impl BatchGenerationRequest {
    /// Distinct platforms in request order.
    pub fn distinct_platforms(&self) -> Vec<Platform> {
        let mut platforms = Vec::with_capacity(self.platforms.len());
        for platform in &self.platforms {
            if !platforms.contains(platform) {
                platforms.push(*platform);
            }
        }
        platforms
    }

    pub fn for_platform(&self, platform: Platform) -> GenerationRequest {
        GenerationRequest {
            prompt: self.prompt.clone(),
            platform: Some(platform),
            style: self.style.clone(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Instruction composition
// ────────────────────────────────────────────────────────────────────────────

/// Builds the user instruction for `platform` from the profile template.
pub fn build_instruction(prompt: &str, platform: Platform, style: &StyleOptions) -> String {
    let profile = platform.profile();

    let mut clauses = String::new();
    if style.include_emojis {
        clauses.push_str(profile.emoji_phrase);
        clauses.push(' ');
    }
    if style.include_hashtags {
        let (min, max) = profile.hashtag_range;
        clauses.push_str(
            &HASHTAG_CLAUSE_TEMPLATE
                .replace("{min}", &min.to_string())
                .replace("{max}", &max.to_string()),
        );
        clauses.push(' ');
    }

    // User-supplied values go in last so their text is never re-substituted.
    let body = profile
        .template
        .replace(
            "{length}",
            profile.length_phrase(style.content_length).unwrap_or_default(),
        )
        .replace("{style}", &clauses)
        .replace("{audience}", &style.audience)
        .replace("{tone}", &style.tone)
        .replace("{prompt}", prompt.trim());

    let mut parts = vec![body.as_str()];
    if style.include_hashtags {
        parts.push(if platform.is_long_form() {
            SEO_TAGS_DIRECTIVE
        } else {
            HASHTAGS_DIRECTIVE
        });
    }
    parts.push(if profile.include_title {
        JSON_WITH_TITLE
    } else {
        JSON_WITHOUT_TITLE
    });

    parts.join(" ")
}

// ────────────────────────────────────────────────────────────────────────────
// Generation
// ────────────────────────────────────────────────────────────────────────────

/// Generates content for one platform.
///
/// Fails with `AppError::Validation` for a blank prompt or missing platform and
/// with `AppError::Upstream*` when the LLM call fails. Malformed model output is
/// not an error; it comes back as `Normalized::Recovered`.
pub async fn generate_content(
    llm: &dyn CompletionProvider,
    request: &GenerationRequest,
) -> Result<Normalized, AppError> {
    let platform = request.validate()?;
    let profile = platform.profile();
    let instruction = build_instruction(&request.prompt, platform, &request.style);
    let max_tokens = profile.max_tokens(request.style.content_length);

    info!("Generating {platform} content (max_tokens={max_tokens})");

    let text = llm
        .complete(CompletionRequest {
            system: CONTENT_CREATOR_SYSTEM,
            prompt: &instruction,
            max_tokens,
        })
        .await?;

    let normalized = normalize_response(&text, platform, request.style.include_hashtags);
    info!(
        "Generated {platform} content: {} chars, {} tags, recovered={}",
        normalized.result().content.len(),
        normalized.result().seo_tags.len(),
        normalized.is_recovered()
    );

    Ok(normalized)
}

/// Fans out one generation per distinct platform and awaits them concurrently.
///
/// Fails as a whole if any platform fails; results keep request order.
pub async fn generate_for_platforms(
    llm: &dyn CompletionProvider,
    request: &BatchGenerationRequest,
) -> Result<Vec<(Platform, GenerationResult)>, AppError> {
    if request.prompt.trim().is_empty() {
        return Err(AppError::Validation("Please enter a prompt".to_string()));
    }
    let platforms = request.distinct_platforms();
    if platforms.is_empty() {
        return Err(AppError::Validation(
            "Please select at least one platform".to_string(),
        ));
    }

    let requests: Vec<GenerationRequest> =
        platforms.iter().map(|p| request.for_platform(*p)).collect();

    let results = try_join_all(requests.iter().map(|r| generate_content(llm, r))).await?;

    Ok(platforms
        .into_iter()
        .zip(results.into_iter().map(Normalized::into_result))
        .collect())
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::generation::prompts::CONTENT_PLACEHOLDER;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted provider: answers every call with `reply` and records requests.
    pub(crate) struct FakeProvider {
        reply: Result<String, u16>,
        pub(crate) calls: Mutex<Vec<(String, u32)>>,
    }

    impl FakeProvider {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                reply: Ok(text.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(status: u16) -> Self {
            Self {
                reply: Err(status),
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionProvider for FakeProvider {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<String, LlmError> {
            self.calls
                .lock()
                .unwrap()
                .push((request.prompt.to_string(), request.max_tokens));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(LlmError::Api {
                    status: *status,
                    message: "upstream failure".to_string(),
                }),
            }
        }
    }

    fn request(platform: Platform) -> GenerationRequest {
        GenerationRequest {
            prompt: "Launching our new Rust SDK".to_string(),
            platform: Some(platform),
            style: StyleOptions::default(),
        }
    }

    #[test]
    fn test_request_deserialization_applies_defaults() {
        let json = serde_json::json!({"prompt": "Coffee", "platform": "twitter-pro"});
        let request: GenerationRequest = serde_json::from_value(json).unwrap();

        assert_eq!(request.platform, Some(Platform::TwitterPro));
        assert_eq!(request.style.tone, "Professional");
        assert_eq!(request.style.audience, "General");
        assert_eq!(request.style.content_length, ContentLength::Medium);
        assert!(!request.style.include_hashtags);
    }

    #[test]
    fn test_request_deserialization_reads_camel_case() {
        let json = serde_json::json!({
            "prompt": "Coffee",
            "platform": "blog",
            "tone": "Casual",
            "audience": "B2C",
            "includeHashtags": true,
            "includeEmojis": true,
            "contentLength": "long"
        });
        let request: GenerationRequest = serde_json::from_value(json).unwrap();
        assert!(request.style.include_hashtags);
        assert!(request.style.include_emojis);
        assert_eq!(request.style.content_length, ContentLength::Long);
    }

    #[test]
    fn test_result_serializes_seo_tags_and_skips_missing_title() {
        let result = GenerationResult {
            content: "Hi".to_string(),
            title: None,
            seo_tags: vec![],
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json, serde_json::json!({"content": "Hi", "seoTags": []}));
    }

    #[test]
    fn test_instruction_interpolates_style() {
        let style = StyleOptions {
            tone: "Humorous".to_string(),
            audience: "Technical".to_string(),
            content_length: ContentLength::Short,
            ..StyleOptions::default()
        };
        let instruction = build_instruction("  Rust 2024  ", Platform::Facebook, &style);

        assert!(instruction.starts_with("Create a Facebook post about: Rust 2024. 1 paragraph. "));
        assert!(instruction.contains("Tone: Humorous. Audience: Technical."));
        assert!(instruction.ends_with(JSON_WITHOUT_TITLE));
        assert!(!instruction.contains("  "), "no doubled spaces: {instruction}");
    }

    #[test]
    fn test_instruction_without_hashtags_never_mentions_them() {
        for platform in Platform::ALL {
            let instruction = build_instruction("Topic", platform, &StyleOptions::default());
            assert!(
                !instruction.to_lowercase().contains("hashtag"),
                "{platform}: {instruction}"
            );
            assert!(!instruction.contains("SEO tags"));
            for placeholder in ["{prompt}", "{length}", "{style}", "{tone}", "{audience}"] {
                assert!(!instruction.contains(placeholder), "unfilled: {instruction}");
            }
        }
    }

    #[test]
    fn test_instruction_hashtag_ranges() {
        let style = StyleOptions {
            include_hashtags: true,
            ..StyleOptions::default()
        };

        let blog = build_instruction("Topic", Platform::Blog, &style);
        assert!(blog.contains("Include 5-7 relevant hashtags."));
        assert!(blog.contains(SEO_TAGS_DIRECTIVE));

        let tiktok = build_instruction("Topic", Platform::Tiktok, &style);
        assert!(tiktok.contains("Include 3-5 relevant hashtags."));
        assert!(tiktok.contains(HASHTAGS_DIRECTIVE));
    }

    #[test]
    fn test_instruction_emojis() {
        let style = StyleOptions {
            include_emojis: true,
            ..StyleOptions::default()
        };
        let instagram = build_instruction("Topic", Platform::Instagram, &style);
        assert!(instagram.contains("Use lots of emojis"));

        let linkedin = build_instruction("Topic", Platform::Linkedin, &style);
        assert!(linkedin.contains("Use some emojis"));

        let plain = build_instruction("Topic", Platform::Linkedin, &StyleOptions::default());
        assert!(!plain.contains("emojis"));
    }

    #[test]
    fn test_blog_long_requests_title_and_4096_tokens() {
        let profile = Platform::Blog.profile();
        assert_eq!(profile.max_tokens(ContentLength::Long), 4096);

        let style = StyleOptions {
            content_length: ContentLength::Long,
            ..StyleOptions::default()
        };
        let instruction = build_instruction("Topic", Platform::Blog, &style);
        assert!(instruction.contains("5-6 sections"));
        assert!(instruction.ends_with(JSON_WITH_TITLE));
    }

    #[test]
    fn test_tiktok_never_requests_title() {
        for length in [ContentLength::Short, ContentLength::Medium, ContentLength::Long] {
            let style = StyleOptions {
                content_length: length,
                include_hashtags: true,
                ..StyleOptions::default()
            };
            let instruction = build_instruction("Topic", Platform::Tiktok, &style);
            assert!(!instruction.contains("\"title\""));
        }
    }

    #[tokio::test]
    async fn test_generate_content_uses_profile_token_budget() {
        let llm = FakeProvider::replying(r#"{"content": "Post"}"#);
        let mut req = request(Platform::Linkedin);
        req.style.content_length = ContentLength::Long;

        generate_content(&llm, &req).await.unwrap();

        let calls = llm.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 2048);
        assert!(calls[0].0.starts_with("Create a LinkedIn post about"));
    }

    #[tokio::test]
    async fn test_well_formed_reply_satisfies_invariants_for_every_platform() {
        let llm = FakeProvider::replying(r#"{"title": "T", "content": "Body", "seoTags": ["a"]}"#);
        for platform in Platform::ALL {
            let result = generate_content(&llm, &request(platform))
                .await
                .unwrap()
                .into_result();
            assert_eq!(result.content, "Body", "{platform}");
            assert_eq!(result.seo_tags, vec!["a"]);
        }
    }

    #[tokio::test]
    async fn test_repeated_calls_keep_invariants() {
        let replies = ["", "not json at all", r#"{"content": null, "seoTags": 3}"#];
        for reply in replies {
            let llm = FakeProvider::replying(reply);
            for _ in 0..2 {
                let result = generate_content(&llm, &request(Platform::Blog))
                    .await
                    .unwrap()
                    .into_result();
                assert!(!result.content.trim().is_empty());
                assert!(result.seo_tags.is_empty());
            }
        }
        let llm = FakeProvider::replying("");
        let result = generate_content(&llm, &request(Platform::Blog))
            .await
            .unwrap()
            .into_result();
        assert_eq!(result.content, CONTENT_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_malformed_reply_recovers_content() {
        let llm = FakeProvider::replying(r#"Here you go: "content": "Hello world", tags"#);
        let normalized = generate_content(&llm, &request(Platform::Facebook))
            .await
            .unwrap();
        assert!(normalized.is_recovered());
        assert_eq!(normalized.result().content, "Hello world");
    }

    #[tokio::test]
    async fn test_missing_prompt_or_platform_is_validation_error() {
        let llm = FakeProvider::replying("{}");

        let mut blank = request(Platform::Blog);
        blank.prompt = "   ".to_string();
        assert!(matches!(
            generate_content(&llm, &blank).await,
            Err(AppError::Validation(_))
        ));

        let mut no_platform = request(Platform::Blog);
        no_platform.platform = None;
        assert!(matches!(
            generate_content(&llm, &no_platform).await,
            Err(AppError::Validation(_))
        ));

        assert!(llm.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_500_is_upstream_error() {
        let llm = FakeProvider::failing(500);
        let err = generate_content(&llm, &request(Platform::Twitter))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fan_out_dedupes_and_keeps_order() {
        let llm = FakeProvider::replying(r#"{"content": "Post", "seoTags": []}"#);
        let batch = BatchGenerationRequest {
            prompt: "Topic".to_string(),
            platforms: vec![Platform::Blog, Platform::Twitter, Platform::Blog],
            style: StyleOptions::default(),
        };

        let results = generate_for_platforms(&llm, &batch).await.unwrap();
        let platforms: Vec<Platform> = results.iter().map(|(p, _)| *p).collect();
        assert_eq!(platforms, vec![Platform::Blog, Platform::Twitter]);
        assert_eq!(llm.calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_fan_out_requires_platforms() {
        let llm = FakeProvider::replying("{}");
        let batch = BatchGenerationRequest {
            prompt: "Topic".to_string(),
            platforms: vec![],
            style: StyleOptions::default(),
        };
        assert!(matches!(
            generate_for_platforms(&llm, &batch).await,
            Err(AppError::Validation(_))
        ));
    }
}
