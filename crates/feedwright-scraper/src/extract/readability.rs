//! Generic main-article extraction for detail pages without a known layout.

use dom_smoothie::{Article, Readability};

use crate::error::ScraperError;

/// Returns the main article HTML of `html`, with links resolved against `url`.
///
/// # Errors
///
/// Returns [`ScraperError::Readability`] when no article can be identified or
/// the extracted content is blank.
pub fn extract_article(html: &str, url: &str) -> Result<String, ScraperError> {
    let mut readability = Readability::new(html, Some(url), None)
        .map_err(|e| ScraperError::Readability(e.to_string()))?;
    let article: Article = readability
        .parse()
        .map_err(|e| ScraperError::Readability(e.to_string()))?;

    let content = article.content.to_string();
    if content.trim().is_empty() {
        return Err(ScraperError::Readability(format!(
            "no article content found at {url}"
        )));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_main_article_body() {
        let paragraph = "Researchers released a new open model today, with detailed \
                         benchmarks, training notes, and a long discussion of the results. ";
        let html = format!(
            "<html><head><title>Release</title></head><body>\
             <nav><a href=\"/\">Home</a></nav>\
             <article><h1>Release</h1><p>{}</p><p>{}</p><p>{}</p></article>\
             <footer>Copyright</footer></body></html>",
            paragraph.repeat(4),
            paragraph.repeat(4),
            paragraph.repeat(4)
        );
        let content = extract_article(&html, "https://example.com/post").unwrap();
        assert!(content.contains("Researchers released a new open model"));
        assert!(!content.contains("Copyright"));
    }

    #[test]
    fn empty_document_is_an_error() {
        let result = extract_article("<html><body></body></html>", "https://example.com/");
        assert!(matches!(result, Err(ScraperError::Readability(_))));
    }
}
