//! Platform profiles — the static table that drives prompt phrasing, token budget
//! and title expectations for each target channel.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::generation::prompts;

/// Target content channel. Wire names are kebab-case (`twitter-pro`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Twitter,
    TwitterPro,
    Facebook,
    Instagram,
    Linkedin,
    Youtube,
    Blog,
    Tiktok,
    Pinterest,
}

impl Platform {
    pub const ALL: [Platform; 9] = [
        Platform::Twitter,
        Platform::TwitterPro,
        Platform::Facebook,
        Platform::Instagram,
        Platform::Linkedin,
        Platform::Youtube,
        Platform::Blog,
        Platform::Tiktok,
        Platform::Pinterest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Twitter => "twitter",
            Platform::TwitterPro => "twitter-pro",
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
            Platform::Linkedin => "linkedin",
            Platform::Youtube => "youtube",
            Platform::Blog => "blog",
            Platform::Tiktok => "tiktok",
            Platform::Pinterest => "pinterest",
        }
    }

    /// Long-form channels get plain SEO keywords instead of `#`-hashtags.
    pub fn is_long_form(&self) -> bool {
        matches!(self, Platform::Blog | Platform::Youtube)
    }

    pub fn profile(&self) -> &'static PlatformProfile {
        match self {
            Platform::Twitter => &TWITTER,
            Platform::TwitterPro => &TWITTER_PRO,
            Platform::Facebook => &FACEBOOK,
            Platform::Instagram => &INSTAGRAM,
            Platform::Linkedin => &LINKEDIN,
            Platform::Youtube => &YOUTUBE,
            Platform::Blog => &BLOG,
            Platform::Tiktok => &TIKTOK,
            Platform::Pinterest => &PINTEREST,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("unknown platform '{s}'"))
    }
}

/// Requested size of the generated piece.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ContentLength {
    fn index(self) -> usize {
        match self {
            ContentLength::Short => 0,
            ContentLength::Medium => 1,
            ContentLength::Long => 2,
        }
    }
}

/// Static configuration for one platform.
#[derive(Debug)]
pub struct PlatformProfile {
    /// Instruction template; see `generation::prompts` for its placeholders.
    pub template: &'static str,
    /// Size phrase per content length. `None` when the platform has a fixed shape.
    pub length_phrases: Option<[&'static str; 3]>,
    pub emoji_phrase: &'static str,
    /// Inclusive hashtag range requested when hashtags are on.
    pub hashtag_range: (u8, u8),
    /// max_tokens per content length (short, medium, long).
    pub token_budgets: [u32; 3],
    pub include_title: bool,
}

impl PlatformProfile {
    pub fn max_tokens(&self, length: ContentLength) -> u32 {
        self.token_budgets[length.index()]
    }

    pub fn length_phrase(&self, length: ContentLength) -> Option<&'static str> {
        self.length_phrases.map(|phrases| phrases[length.index()])
    }
}

static TWITTER: PlatformProfile = PlatformProfile {
    template: prompts::TWITTER_TEMPLATE,
    length_phrases: None,
    emoji_phrase: "Use lots of emojis (e.g., 🎉, 🚀, 😊).",
    hashtag_range: (3, 5),
    token_budgets: [512, 512, 512],
    include_title: false,
};

static TWITTER_PRO: PlatformProfile = PlatformProfile {
    template: prompts::TWITTER_PRO_TEMPLATE,
    length_phrases: None,
    emoji_phrase: "Use lots of emojis (e.g., 🎉, 🚀, 😊).",
    hashtag_range: (3, 5),
    token_budgets: [1024, 1024, 1024],
    include_title: false,
};

static FACEBOOK: PlatformProfile = PlatformProfile {
    template: prompts::FACEBOOK_TEMPLATE,
    length_phrases: Some(["1 paragraph", "1-2 paragraphs", "2-3 paragraphs"]),
    emoji_phrase: "Use lots of emojis (e.g., 🎉, 😍, 👍).",
    hashtag_range: (3, 5),
    token_budgets: [512, 1024, 2048],
    include_title: false,
};

static INSTAGRAM: PlatformProfile = PlatformProfile {
    template: prompts::INSTAGRAM_TEMPLATE,
    length_phrases: Some(["1-2 sentences", "3-4 sentences", "5-6 sentences"]),
    emoji_phrase: "Use lots of emojis (e.g., ✨, 🌟, 💖).",
    hashtag_range: (3, 5),
    token_budgets: [512, 512, 512],
    include_title: false,
};

static LINKEDIN: PlatformProfile = PlatformProfile {
    template: prompts::LINKEDIN_TEMPLATE,
    length_phrases: Some(["1 paragraph", "1-2 paragraphs", "2-3 paragraphs"]),
    emoji_phrase: "Use some emojis (e.g., 🚀, ✅, 💡).",
    hashtag_range: (3, 5),
    token_budgets: [512, 1024, 2048],
    include_title: false,
};

static YOUTUBE: PlatformProfile = PlatformProfile {
    template: prompts::YOUTUBE_TEMPLATE,
    length_phrases: Some(["2-3 sentences", "4-6 sentences", "1-2 paragraphs"]),
    emoji_phrase: "Use some emojis (e.g., 🎥, ▶️, 👍).",
    hashtag_range: (5, 7),
    token_budgets: [512, 1024, 2048],
    include_title: true,
};

static BLOG: PlatformProfile = PlatformProfile {
    template: prompts::BLOG_TEMPLATE,
    length_phrases: Some(["1-2 sections", "3-4 sections", "5-6 sections"]),
    emoji_phrase: "Use some emojis (e.g., 🎉, 💡, ✅).",
    hashtag_range: (5, 7),
    token_budgets: [1024, 2048, 4096],
    include_title: true,
};

static TIKTOK: PlatformProfile = PlatformProfile {
    template: prompts::TIKTOK_TEMPLATE,
    length_phrases: Some(["1-2 sentences", "2-3 sentences", "3-4 sentences"]),
    emoji_phrase: "Use lots of emojis (e.g., 🎵, 🔥, 🤩).",
    hashtag_range: (3, 5),
    token_budgets: [512, 512, 512],
    include_title: false,
};

static PINTEREST: PlatformProfile = PlatformProfile {
    template: prompts::PINTEREST_TEMPLATE,
    length_phrases: Some(["1-2 sentences", "2-3 sentences", "3-4 sentences"]),
    emoji_phrase: "Use some emojis (e.g., 📌, ✨, 💡).",
    hashtag_range: (3, 5),
    token_budgets: [512, 512, 512],
    include_title: true,
};
