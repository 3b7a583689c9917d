use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

/// Number of images requested per gallery fetch.
pub const GALLERY_COUNT: usize = 8;

pub const QUOTE_ERROR_MESSAGE: &str = "Failed to load content. Please try again later.";
pub const GALLERY_ERROR_MESSAGE: &str = "Failed to load images. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOfDay {
    pub text: String,
    pub source: String,
    pub source_author: Option<String>,
}

impl QuoteOfDay {
    /// Attribution line: the author when known, otherwise the work it came
    /// from.
    pub fn attribution(&self) -> String {
        let who = self
            .source_author
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.source);
        format!("—— {who}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryItem {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub image_url: String,
}

#[derive(Deserialize)]
struct QuoteResponse {
    hitokoto: String,
    #[serde(default)]
    from: String,
    #[serde(default)]
    from_who: Option<String>,
}

impl From<QuoteResponse> for QuoteOfDay {
    fn from(r: QuoteResponse) -> Self {
        Self {
            text: r.hitokoto,
            source: r.from,
            source_author: r.from_who,
        }
    }
}

#[derive(Deserialize)]
struct GalleryResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    data: Vec<GalleryEntry>,
}

#[derive(Deserialize)]
struct GalleryEntry {
    pid: u64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    urls: GalleryUrls,
}

#[derive(Deserialize)]
struct GalleryUrls {
    original: String,
}

impl From<GalleryEntry> for GalleryItem {
    fn from(e: GalleryEntry) -> Self {
        Self {
            id: e.pid,
            title: e.title,
            author: e.author,
            image_url: e.urls.original,
        }
    }
}

/// Interpret a quote endpoint response.
///
/// Any non-2xx status is an error carrying the status code and body text.
pub fn decode_quote(status: StatusCode, body: &str) -> Result<QuoteOfDay> {
    if !status.is_success() {
        anyhow::bail!("Failed to fetch hitokoto: {} {}", status.as_u16(), body);
    }
    let parsed: QuoteResponse = serde_json::from_str(body).context("parse hitokoto response")?;
    Ok(parsed.into())
}

/// Interpret an image service response.
pub fn decode_gallery(status: StatusCode, body: &str) -> Result<Vec<GalleryItem>> {
    if !status.is_success() {
        anyhow::bail!("Failed to fetch images: {}", status.as_u16());
    }
    let parsed: GalleryResponse = serde_json::from_str(body).context("parse image response")?;
    if !parsed.error.is_empty() {
        anyhow::bail!("image service error: {}", parsed.error);
    }
    Ok(parsed.data.into_iter().map(GalleryItem::from).collect())
}

/// Build the image request URL for the given filter flag.
pub fn gallery_url(endpoint: &str, show_restricted: bool, count: usize) -> Result<Url> {
    let r18 = if show_restricted { "1" } else { "0" };
    let num = count.to_string();
    Url::parse_with_params(endpoint, &[("r18", r18), ("num", num.as_str())])
        .with_context(|| format!("invalid image endpoint '{endpoint}'"))
}

/// The two outbound calls the page makes.
pub trait ContentApi: Send + Sync {
    fn fetch_quote(&self) -> Result<QuoteOfDay>;
    fn fetch_gallery(&self, show_restricted: bool, count: usize) -> Result<Vec<GalleryItem>>;
}

pub struct HttpContentApi {
    client: Client,
    quote_endpoint: String,
    gallery_endpoint: String,
}

impl HttpContentApi {
    pub fn new(quote_endpoint: impl Into<String>, gallery_endpoint: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("starry-home/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(client, quote_endpoint, gallery_endpoint))
    }

    pub fn with_client(
        client: Client,
        quote_endpoint: impl Into<String>,
        gallery_endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            quote_endpoint: quote_endpoint.into(),
            gallery_endpoint: gallery_endpoint.into(),
        }
    }
}

impl ContentApi for HttpContentApi {
    fn fetch_quote(&self) -> Result<QuoteOfDay> {
        tracing::debug!(url = %self.quote_endpoint, "fetching quote");
        let resp = self
            .client
            .get(&self.quote_endpoint)
            .send()
            .context("send quote request")?;
        let status = resp.status();
        let body = resp.text().context("read quote body")?;
        decode_quote(status, &body)
    }

    fn fetch_gallery(&self, show_restricted: bool, count: usize) -> Result<Vec<GalleryItem>> {
        let url = gallery_url(&self.gallery_endpoint, show_restricted, count)?;
        tracing::debug!(%url, "fetching gallery");
        let resp = self.client.get(url).send().context("send image request")?;
        let status = resp.status();
        let body = resp.text().context("read image body")?;
        decode_gallery(status, &body)
    }
}
