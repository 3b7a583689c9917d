use serde::{Deserialize, Serialize};

pub const DEFAULT_QUOTE_ENDPOINT: &str = "https://v1.hitokoto.cn/";
pub const DEFAULT_GALLERY_ENDPOINT: &str = "https://api.lolicon.app/setu/v2";

/// A labelled link shown on the page or in the panel.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    fn new(label: &str, url: &str) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Optional file that log output is appended to.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Initial window size. If absent, a default size is used.
    #[serde(default)]
    pub window_size: Option<(f32, f32)>,
    /// Fixed seed for the star field. `None` picks a fresh field each run.
    #[serde(default)]
    pub star_seed: Option<u64>,
    #[serde(default = "default_quote_endpoint")]
    pub quote_endpoint: String,
    #[serde(default = "default_gallery_endpoint")]
    pub gallery_endpoint: String,
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default = "default_bio")]
    pub bio: String,
    #[serde(default = "default_social_links")]
    pub social_links: Vec<Link>,
    /// Navigation links listed at the top of the menu panel.
    #[serde(default = "default_nav_links")]
    pub nav_links: Vec<Link>,
}

fn default_quote_endpoint() -> String {
    DEFAULT_QUOTE_ENDPOINT.into()
}

fn default_gallery_endpoint() -> String {
    DEFAULT_GALLERY_ENDPOINT.into()
}

fn default_display_name() -> String {
    "Your Name".into()
}

fn default_bio() -> String {
    "Web developer | Designer | Gamer".into()
}

fn default_social_links() -> Vec<Link> {
    vec![
        Link::new("GitHub", "https://github.com"),
        Link::new("LinkedIn", "https://www.linkedin.com"),
        Link::new("Twitter", "https://twitter.com"),
    ]
}

fn default_nav_links() -> Vec<Link> {
    vec![
        Link::new("Home", "https://example.com/"),
        Link::new("3D Game", "https://example.com/game"),
    ]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            window_size: None,
            star_seed: None,
            quote_endpoint: default_quote_endpoint(),
            gallery_endpoint: default_gallery_endpoint(),
            display_name: default_display_name(),
            bio: default_bio(),
            social_links: default_social_links(),
            nav_links: default_nav_links(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn window_size(&self) -> [f32; 2] {
        match self.window_size {
            Some((w, h)) if w > 0.0 && h > 0.0 => [w, h],
            _ => [1280.0, 800.0],
        }
    }
}
