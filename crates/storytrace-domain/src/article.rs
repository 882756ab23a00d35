//! Article records and the ingestion boundary

use crate::ValidationError;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::{Host, Url};

/// Values the scraper emits when it could not find a publish date
const MISSING_DATE_SENTINELS: &[&str] = &["unknown", "unknown date"];

/// Values the scraper emits when it could not find an author
const MISSING_AUTHOR_SENTINELS: &[&str] = &["unknown", "unknown author"];

/// Canonicalize a URL into the form used as a node id
///
/// The URL must be absolute `http`/`https` with a host. The fragment is
/// dropped and the host is lowercased.
///
/// # Examples
///
/// ```
/// use storytrace_domain::canonical_url;
///
/// let url = canonical_url("https://News.Example.com/story#comments").unwrap();
/// assert_eq!(url, "https://news.example.com/story");
/// ```
pub fn canonical_url(raw: &str) -> Result<String, ValidationError> {
    let invalid = |reason: String| ValidationError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid("URL is empty".to_string()));
    }

    let mut parsed = Url::parse(trimmed).map_err(|e| invalid(e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())));
    }
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid("URL has no host".to_string()));
    }

    parsed.set_fragment(None);
    Ok(parsed.into())
}

/// Extract the registrable domain of a URL
///
/// The host is reduced with the public suffix list, so `news.bbc.co.uk` and
/// `www.bbc.co.uk` both give `bbc.co.uk`. IP hosts are returned as-is; a host
/// with no registrable part only loses a leading `www.`.
///
/// # Examples
///
/// ```
/// use storytrace_domain::extract_domain;
///
/// assert_eq!(extract_domain("https://edition.cnn.com/world").unwrap(), "cnn.com");
/// assert_eq!(extract_domain("http://127.0.0.1:8080/x").unwrap(), "127.0.0.1");
/// ```
pub fn extract_domain(url: &str) -> Result<String, ValidationError> {
    let parsed = Url::parse(url.trim()).map_err(|e| ValidationError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    match parsed.host() {
        Some(Host::Domain(host)) => Ok(registrable_domain(&host.to_lowercase())),
        Some(ip) => Ok(ip.to_string()),
        None => Err(ValidationError::InvalidUrl {
            url: url.to_string(),
            reason: "URL has no host".to_string(),
        }),
    }
}

fn registrable_domain(host: &str) -> String {
    let host = host.trim_end_matches('.');
    match psl::domain_str(host) {
        Some(domain) => domain.to_string(),
        None => host.strip_prefix("www.").unwrap_or(host).to_string(),
    }
}

/// One outbound link as reported by the scraper
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSource {
    /// Link target
    pub url: String,

    /// Domain of the link target, as the scraper saw it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Anchor text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Article fields the scraper may nest under `metadata`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetadata {
    /// Headline
    #[serde(default)]
    pub title: Option<String>,

    /// Byline
    #[serde(default)]
    pub author: Option<String>,

    /// Publication date
    #[serde(default)]
    pub publish_date: Option<String>,

    /// Domain as reported by the scraper (ignored)
    #[serde(default)]
    pub domain: Option<String>,

    /// Outbound links found in the body
    #[serde(default)]
    pub cited_urls: Vec<String>,

    /// Outbound links in the scraper's structured form
    #[serde(default)]
    pub sources: Vec<RawSource>,

    /// Body text used for similarity
    #[serde(default)]
    pub content_excerpt: Option<String>,
}

/// Article metadata exactly as the scraper hands it over
///
/// Two shapes are accepted: flat (`{url, title, ...}`) and nested
/// (`{url, domain, metadata: {title, ...}}`). Nested values win over flat
/// ones; link lists from both are merged. Nothing here is trusted. Convert
/// with `ArticleRecord::try_from`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticle {
    /// Article URL
    pub url: String,

    /// Headline
    #[serde(default)]
    pub title: Option<String>,

    /// Byline
    #[serde(default)]
    pub author: Option<String>,

    /// Publication date (`YYYY-MM-DD` or RFC 3339)
    #[serde(default)]
    pub publish_date: Option<String>,

    /// Domain as reported by the scraper (ignored, re-derived from `url`)
    #[serde(default)]
    pub domain: Option<String>,

    /// Outbound links found in the body
    #[serde(default)]
    pub cited_urls: Vec<String>,

    /// Outbound links in the scraper's structured form
    #[serde(default)]
    pub sources: Vec<RawSource>,

    /// Body text used for similarity
    #[serde(default)]
    pub content_excerpt: Option<String>,

    /// Nested article fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RawMetadata>,
}

impl RawArticle {
    /// Fold `metadata` into the top-level fields
    fn flatten(mut self) -> Self {
        let Some(meta) = self.metadata.take() else {
            return self;
        };
        self.title = meta.title.or(self.title);
        self.author = meta.author.or(self.author);
        self.publish_date = meta.publish_date.or(self.publish_date);
        self.domain = meta.domain.or(self.domain);
        self.content_excerpt = meta.content_excerpt.or(self.content_excerpt);
        self.cited_urls.extend(meta.cited_urls);
        self.sources.extend(meta.sources);
        self
    }
}

/// Normalized metadata for one article
///
/// Created once per distinct URL and immutable afterwards. Deserializing goes
/// through [`RawArticle`] so the same validation applies to JSON input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawArticle")]
pub struct ArticleRecord {
    url: String,
    domain: String,
    title: String,
    author: Option<String>,
    publish_date: Option<NaiveDate>,
    cited_urls: BTreeSet<String>,
    content_excerpt: String,
}

impl ArticleRecord {
    /// Create a record with the required fields
    ///
    /// # Examples
    ///
    /// ```
    /// use storytrace_domain::ArticleRecord;
    /// use chrono::NaiveDate;
    ///
    /// let article = ArticleRecord::new("https://www.example.com/a", "Headline")
    ///     .unwrap()
    ///     .with_author("Jane Doe")
    ///     .with_publish_date(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    ///
    /// assert_eq!(article.domain(), "example.com");
    /// assert_eq!(article.author(), Some("Jane Doe"));
    /// ```
    pub fn new(url: &str, title: &str) -> Result<Self, ValidationError> {
        let url = canonical_url(url)?;
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle { url });
        }
        let domain = extract_domain(&url)?;

        Ok(Self {
            url,
            domain,
            title: title.to_string(),
            author: None,
            publish_date: None,
            cited_urls: BTreeSet::new(),
            content_excerpt: String::new(),
        })
    }

    /// Set the author; blank values and scraper placeholders mean "no author"
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = normalize_author(Some(author.into()));
        self
    }

    /// Set the publication date
    pub fn with_publish_date(mut self, date: NaiveDate) -> Self {
        self.publish_date = Some(date);
        self
    }

    /// Record an outbound link; links that are not valid http(s) URLs are skipped
    pub fn with_cited_url(mut self, url: &str) -> Self {
        if let Ok(canonical) = canonical_url(url) {
            if canonical != self.url {
                self.cited_urls.insert(canonical);
            }
        }
        self
    }

    /// Set the body excerpt used for similarity
    pub fn with_content_excerpt(mut self, text: impl Into<String>) -> Self {
        self.content_excerpt = text.into();
        self
    }

    /// Canonical URL, the unique key of the record
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Domain derived from the URL
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Headline
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Byline, if one was attributed
    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    /// Publication date, if known
    pub fn publish_date(&self) -> Option<NaiveDate> {
        self.publish_date
    }

    /// Canonical outbound links
    pub fn cited_urls(&self) -> &BTreeSet<String> {
        &self.cited_urls
    }

    /// Body excerpt
    pub fn content_excerpt(&self) -> &str {
        &self.content_excerpt
    }

    /// Whether this article links to `url` (compared canonically)
    pub fn cites(&self, url: &str) -> bool {
        self.cited_urls.contains(url)
            || canonical_url(url).is_ok_and(|canonical| self.cited_urls.contains(&canonical))
    }
}

impl TryFrom<RawArticle> for ArticleRecord {
    type Error = ValidationError;

    fn try_from(raw: RawArticle) -> Result<Self, Self::Error> {
        let raw = raw.flatten();
        let url = canonical_url(&raw.url)?;
        let title = raw.title.unwrap_or_default();
        let mut record = ArticleRecord::new(&url, &title)?;

        record.author = normalize_author(raw.author);
        record.publish_date = parse_publish_date(&url, raw.publish_date.as_deref())?;
        record.content_excerpt = raw.content_excerpt.unwrap_or_default();

        let links = raw
            .cited_urls
            .into_iter()
            .chain(raw.sources.into_iter().map(|s| s.url));
        for link in links {
            record = record.with_cited_url(&link);
        }

        Ok(record)
    }
}

fn normalize_author(author: Option<String>) -> Option<String> {
    let author = author?;
    let trimmed = author.trim();
    if trimmed.is_empty() || MISSING_AUTHOR_SENTINELS.contains(&trimmed.to_lowercase().as_str()) {
        return None;
    }
    Some(trimmed.to_string())
}

fn parse_publish_date(url: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, ValidationError> {
    let Some(value) = raw.map(str::trim) else {
        return Ok(None);
    };
    if value.is_empty() || MISSING_DATE_SENTINELS.contains(&value.to_lowercase().as_str()) {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(Some(date));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(timestamp.date_naive()));
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Ok(Some(timestamp.date()));
    }

    Err(ValidationError::InvalidDate {
        url: url.to_string(),
        value: value.to_string(),
    })
}
