//! Plain-text extraction from HTML pages.
//!
//! Extraction runs in two passes. A streaming [`lol_html`] rewriter first drops
//! page chrome (scripts, navigation, sidebars, ads). The cleaned document is
//! then parsed with [`scraper`] to find the title and the main text block.
//!
//! The main text is the longest text found under a list of common content
//! selectors. Pages without such containers fall back to their paragraphs,
//! then to the whole body.
//!
//! # Example
//!
//! ```rust
//! use tersa_core::extract_text;
//!
//! let html = r#"<html><head><title>Notes</title></head><body>
//!   <nav>Home | About</nav>
//!   <article>Rust makes systems programming approachable. Its borrow checker catches bugs early.</article>
//! </body></html>"#;
//!
//! let extracted = extract_text(html).unwrap();
//! assert_eq!(extracted.title, "Notes");
//! assert!(extracted.text.starts_with("Rust makes"));
//! assert!(!extracted.text.contains("About"));
//! ```

use scraper::{ElementRef, Html, Selector};
use serde::Serialize;

use crate::{Result, TersaError};

/// Elements removed before any text is read.
pub const REMOVED_SELECTORS: &[&str] = &[
    "script",
    "style",
    "noscript",
    "nav",
    "header",
    "footer",
    "aside",
    "iframe",
    ".advertisement",
    ".ads",
    ".ad",
    ".sidebar",
];

/// Containers that usually hold the article body, in lookup order.
pub const CONTENT_SELECTORS: &[&str] = &[
    "article",
    ".post-content",
    ".entry-content",
    ".content",
    "main",
    ".post-body",
    ".article-body",
    ".article-content",
    "[role=\"main\"]",
];

/// Content containers shorter than this fall back to paragraph text.
pub const MIN_CONTAINER_CHARS: usize = 100;

/// Extracted text shorter than this is treated as no content.
pub const MIN_CONTENT_CHARS: usize = 50;

const UNTITLED: &str = "Untitled";

/// Title and main text of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    pub title: String,
    pub text: String,
}

/// Extracts the title and main text from an HTML document.
///
/// Returns [`TersaError::NoContent`] when fewer than
/// [`MIN_CONTENT_CHARS`] characters of text remain.
pub fn extract_text(html: &str) -> Result<ExtractedText> {
    let cleaned = strip_chrome(html);
    let doc = Html::parse_document(&cleaned);

    let title = extract_title(&doc);
    let text = extract_body_text(&doc);

    let length = text.chars().count();
    tracing::debug!(title = %title, chars = length, "extracted page text");

    if length < MIN_CONTENT_CHARS {
        return Err(TersaError::NoContent);
    }

    Ok(ExtractedText { title, text })
}

/// Removes [`REMOVED_SELECTORS`] with a streaming rewrite.
///
/// On a rewriter error the input is returned unchanged.
fn strip_chrome(html: &str) -> String {
    let mut output = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings {
            element_content_handlers: REMOVED_SELECTORS
                .iter()
                .map(|selector| {
                    lol_html::element!(*selector, |el| {
                        el.remove();
                        Ok(())
                    })
                })
                .collect(),
            ..Default::default()
        },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if rewriter.write(html.as_bytes()).is_err() || rewriter.end().is_err() {
        tracing::warn!("html rewrite failed, extracting from unmodified markup");
        return html.to_string();
    }

    String::from_utf8_lossy(&output).into_owned()
}

/// `<title>`, then the first `<h1>`, then "Untitled".
fn extract_title(doc: &Html) -> String {
    ["title", "h1"]
        .iter()
        .filter_map(|selector| first_text(doc, selector))
        .next()
        .unwrap_or_else(|| UNTITLED.to_string())
}

fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    let element = doc.select(&selector).next()?;
    let text = collapse_whitespace(&element_text(element));
    if text.is_empty() { None } else { Some(text) }
}

fn extract_body_text(doc: &Html) -> String {
    let mut best = String::new();

    for selector in CONTENT_SELECTORS {
        let text = collapse_whitespace(&select_text(doc, selector));
        if text.chars().count() > best.chars().count() {
            best = text;
        }
    }

    if best.chars().count() >= MIN_CONTAINER_CHARS {
        return best;
    }

    let paragraphs = collapse_whitespace(&select_text_joined(doc, "p", " "));
    if !paragraphs.is_empty() {
        return paragraphs;
    }

    collapse_whitespace(&select_text(doc, "body"))
}

/// Concatenated text of every element matching `selector`.
fn select_text(doc: &Html, selector: &str) -> String {
    select_text_joined(doc, selector, "")
}

fn select_text_joined(doc: &Html, selector: &str, separator: &str) -> String {
    let Ok(selector) = Selector::parse(selector) else {
        return String::new();
    };
    doc.select(&selector).map(element_text).collect::<Vec<_>>().join(separator)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Collapses runs of whitespace to a single space and trims.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
