//! Article input: a JSON array of scraper records from a file or stdin.

use crate::error::{CliError, Result};
use std::fs;
use std::io::{self, Read};
use storytrace_domain::{ArticleRecord, RawArticle, ValidationError};
use tracing::{info, warn};

/// Read the raw input text; `-` means stdin.
pub fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(source)?)
    }
}

/// Parse and validate articles.
///
/// Malformed records are dropped with a warning. If no record survives, the
/// first rejection is returned.
pub fn parse_articles(json: &str) -> Result<Vec<ArticleRecord>> {
    let raw: Vec<RawArticle> = serde_json::from_str(json)?;
    if raw.is_empty() {
        return Err(ValidationError::EmptyArticleList.into());
    }

    let total = raw.len();
    let mut articles = Vec::with_capacity(total);
    let mut first_error: Option<ValidationError> = None;

    for record in raw {
        match ArticleRecord::try_from(record) {
            Ok(article) => articles.push(article),
            Err(e) => {
                warn!("Skipping article: {}", e);
                first_error.get_or_insert(e);
            }
        }
    }

    if articles.is_empty() {
        return Err(CliError::Validation(
            first_error.unwrap_or(ValidationError::EmptyArticleList),
        ));
    }

    info!("Loaded {} of {} article(s)", articles.len(), total);
    Ok(articles)
}

/// Read and parse articles from a file path or `-`.
pub fn load_articles(source: &str) -> Result<Vec<ArticleRecord>> {
    parse_articles(&read_input(source)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"url": "https://a.com/1", "title": "First", "author": "Jane Doe"}}]"#
        )
        .unwrap();

        let articles = load_articles(file.path().to_str().unwrap()).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].author(), Some("Jane Doe"));
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let articles = parse_articles(
            r#"[
                {"url": "not a url", "title": "Broken"},
                {"url": "https://b.com/2", "title": "Fine"},
                {"url": "https://c.com/3", "title": "Bad date", "publish_date": "someday"}
            ]"#,
        )
        .unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].url(), "https://b.com/2");
    }

    #[test]
    fn test_nested_scraper_records() {
        let articles = parse_articles(
            r#"[
                {"url": "https://bbc.com/article-0", "domain": "bbc.com",
                 "metadata": {"title": "Flood warning - Report from bbc.com",
                              "author": "Reporter 1", "publish_date": "2024-10-15",
                              "domain": "bbc.com", "sources": []}},
                {"url": "https://cnn.com/article-1", "domain": "cnn.com",
                 "metadata": {"title": "Flood warning - Report from cnn.com",
                              "author": "Reporter 2", "publish_date": "2024-11-16",
                              "domain": "cnn.com",
                              "sources": [{"url": "https://bbc.com/article-0"}]}}
            ]"#,
        )
        .unwrap();

        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].title(), "Flood warning - Report from bbc.com");
        assert_eq!(articles[1].author(), Some("Reporter 2"));
        assert!(articles[1].cites("https://bbc.com/article-0"));
    }

    #[test]
    fn test_all_invalid_returns_first_error() {
        let err = parse_articles(r#"[{"url": "https://a.com/1", "title": "  "}]"#).unwrap_err();
        assert!(matches!(
            err,
            CliError::Validation(ValidationError::MissingTitle { .. })
        ));
    }

    #[test]
    fn test_empty_array_rejected() {
        let err = parse_articles("[]").unwrap_err();
        assert!(matches!(
            err,
            CliError::Validation(ValidationError::EmptyArticleList)
        ));
    }

    #[test]
    fn test_not_json() {
        assert!(matches!(
            parse_articles("url,title"),
            Err(CliError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_articles("/nonexistent/articles.json"),
            Err(CliError::Io(_))
        ));
    }
}
