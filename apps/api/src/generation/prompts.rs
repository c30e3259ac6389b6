// Per-platform instruction templates for content generation.
// Cross-cutting fragments (system prompt, JSON directives) live in llm_client::prompts.
//
// Placeholders: {prompt}, {length}, {style}, {tone}, {audience}.
// {style} expands to the emoji/hashtag clauses, each followed by a space, or to nothing.

pub const TWITTER_TEMPLATE: &str = "Create a Twitter thread about: {prompt}. \
    Split into multiple tweets, each under 280 characters. \
    Number each tweet (e.g., \"1/3: text\"). \
    {style}Tone: {tone}. Audience: {audience}. Use plain text, no markdown. \
    Return as a single string with newlines separating tweets.";

pub const TWITTER_PRO_TEMPLATE: &str = "Create a Twitter post about: {prompt}. \
    No character limit (Pro version). \
    {style}Tone: {tone}. Audience: {audience}. Use plain text, no markdown.";

pub const FACEBOOK_TEMPLATE: &str = "Create a Facebook post about: {prompt}. {length}. \
    {style}Tone: {tone}. Audience: {audience}. Use plain text with **bold** for emphasis.";

pub const INSTAGRAM_TEMPLATE: &str = "Create an Instagram caption about: {prompt}. {length}. \
    {style}Tone: {tone}. Audience: {audience}. Use plain text, no markdown.";

pub const LINKEDIN_TEMPLATE: &str = "Create a LinkedIn post about: {prompt}. {length}. \
    {style}Tone: {tone}. Audience: {audience}. Use plain text with **bold** for emphasis.";

pub const YOUTUBE_TEMPLATE: &str = "Create a YouTube description about: {prompt}. \
    {length} with a hook, details, and CTA. \
    {style}Tone: {tone}. Audience: {audience}. Use plain text with *bold* for emphasis.";

pub const BLOG_TEMPLATE: &str = "Create a blog post about: {prompt}. \
    Include an intro, {length} with ## subheadings, and a conclusion. \
    {style}Tone: {tone}. Audience: {audience}. \
    Use markdown (# for title, ## for sections, **bold**, _italic_).";

pub const TIKTOK_TEMPLATE: &str = "Create a TikTok caption about: {prompt}. {length}. \
    {style}Tone: {tone}. Audience: {audience}. Use plain text, no markdown.";

pub const PINTEREST_TEMPLATE: &str = "Create a Pinterest description about: {prompt}. {length}. \
    {style}Tone: {tone}. Audience: {audience}. Use plain text, no markdown.";

/// Hashtag clause. Replace `{min}` and `{max}` from the platform profile.
pub const HASHTAG_CLAUSE_TEMPLATE: &str = "Include {min}-{max} relevant hashtags.";

/// Content used when the model returns nothing usable.
pub const CONTENT_PLACEHOLDER: &str = "Generated content unavailable";
