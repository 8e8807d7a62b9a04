//! Fragment inspection and document wrapping

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use log::warn;
use regex::Regex;

use crate::error::{Error, Result};

/// Open tag with an optional attribute tail, tag name captured
const OPEN_TAG: &str = r"<\s*([^ >]+)[^>]*>";

/// Upper bound on compiled closing patterns retained across calls
const CLOSING_TAG_CACHE_CAP: usize = 64;

static OPEN_TAG_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn open_tag_re() -> Option<&'static Regex> {
    OPEN_TAG_RE
        .get_or_init(|| Regex::new(OPEN_TAG).ok())
        .as_ref()
}

/// Closing pattern for one tag name, answered from a process-wide cache.
///
/// The captured name goes into the pattern unescaped; `None` records a
/// name the regex engine cannot swallow. Names past the cache cap are
/// compiled on the spot and not retained.
fn closing_tag_re(name: &str) -> Option<Regex> {
    static CLOSING_TAG_RES: OnceLock<Mutex<HashMap<String, Option<Regex>>>> = OnceLock::new();

    let cache = CLOSING_TAG_RES.get_or_init(|| Mutex::new(HashMap::new()));
    let mut patterns = cache.lock().unwrap();
    if let Some(compiled) = patterns.get(name) {
        return compiled.clone();
    }

    let compiled = match Regex::new(&format!(r"<\s*/\s*{name}\s*>")) {
        Ok(re) => Some(re),
        Err(err) => {
            warn!("closing tag pattern failed to compile for `{name}`: {err}");
            None
        }
    };
    if patterns.len() < CLOSING_TAG_CACHE_CAP {
        patterns.insert(name.to_string(), compiled.clone());
    }
    compiled
}

/// Fragment input rewritten into a complete document.
///
/// Guaranteed to carry `<html>`, `<head>` and `<body>` layers, either found
/// at the front of the input or injected around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDocument(String);

impl NormalizedDocument {
    /// The document text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the wrapper and return the document text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedDocument {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Decide whether `input` contains at least one matching open/close tag
/// pair. The scan fails open: when a pattern cannot be evaluated, the input
/// counts as HTML and is left for the engine to judge.
fn has_tag_pair(input: &str) -> bool {
    let open = match open_tag_re() {
        Some(re) => re,
        None => {
            warn!("open tag pattern failed to compile, treating input as HTML");
            return true;
        }
    };

    for caps in open.captures_iter(input) {
        if let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) {
            match closing_tag_re(name.as_str()) {
                Some(re) => {
                    if re.is_match(&input[whole.end()..]) {
                        return true;
                    }
                }
                // An unevaluable pattern is a failed scan, not plain text
                None => return true,
            }
        }
    }

    false
}

/// Rewrite free-form fragment input into a complete HTML document.
///
/// Empty input fails with [`Error::EmptyInput`]. Input without a single
/// open/close tag pair is plain text and fails with [`Error::NotHtml`]
/// instead of being rendered as-is. Anything else keeps its content
/// untouched and gains the missing `<body>`, `<head>` and `<html>` layers;
/// a layer already present at the very start of the input is kept.
pub fn normalize_fragment(input: &str) -> Result<NormalizedDocument> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }
    if !has_tag_pair(input) {
        return Err(Error::NotHtml);
    }

    let mut doc = input.to_string();
    if !doc.starts_with("<html>") {
        if !doc.starts_with("<head>") {
            if !doc.starts_with("<body>") {
                doc = format!("<body>{doc}</body>");
            }
            doc = format!("<head></head>{doc}");
        }
        doc = format!("<html>{doc}</html>");
    }

    Ok(NormalizedDocument(doc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_rejected() {
        match normalize_fragment("") {
            Err(Error::EmptyInput) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn plain_text_is_rejected() {
        match normalize_fragment("hello") {
            Err(Error::NotHtml) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn lone_open_tag_is_rejected() {
        match normalize_fragment(r#"<img src="x.png">"#) {
            Err(Error::NotHtml) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn paragraph_gains_all_three_layers() {
        let doc = normalize_fragment("<p>hi</p>").unwrap();
        assert_eq!(doc.as_str(), "<html><head></head><body><p>hi</p></body></html>");
    }

    #[test]
    fn body_at_the_front_is_kept() {
        let doc = normalize_fragment("<body><p>hi</p></body>").unwrap();
        assert_eq!(
            doc.as_str(),
            "<html><head></head><body><p>hi</p></body></html>"
        );
    }

    #[test]
    fn head_at_the_front_skips_body_injection() {
        let doc = normalize_fragment("<head><title>t</title></head><body><p>hi</p></body>").unwrap();
        assert_eq!(
            doc.as_str(),
            "<html><head><title>t</title></head><body><p>hi</p></body></html>"
        );
    }

    #[test]
    fn full_document_is_untouched() {
        let input = "<html><head></head><body><p>hi</p></body></html>";
        let doc = normalize_fragment(input).unwrap();
        assert_eq!(doc.as_str(), input);
    }

    #[test]
    fn pair_spanning_lines_is_html() {
        let doc = normalize_fragment("<p>\nline one\nline two\n</p>").unwrap();
        assert!(doc.as_str().starts_with("<html>"));
    }

    #[test]
    fn spaced_closing_tag_still_pairs() {
        assert!(has_tag_pair("< p >hi< / p >"));
    }

    #[test]
    fn mismatched_tags_do_not_pair() {
        assert!(!has_tag_pair("<p>hi</div>"));
    }

    #[test]
    fn unparseable_tag_name_fails_open() {
        // `(` is captured as the tag name and breaks the closing pattern,
        // so the scan gives up and the input passes as HTML; the cached
        // outcome answers the second scan the same way
        assert!(has_tag_pair("<(>hi</(>"));
        assert!(has_tag_pair("<(>hi</(>"));
        assert!(normalize_fragment("<(>hi</(>").is_ok());
    }

    #[test]
    fn closing_tag_before_the_open_does_not_pair() {
        assert!(!has_tag_pair("</p>hi"));
    }

    #[test]
    fn many_distinct_tag_names_still_find_the_pair() {
        let mut input = String::new();
        for n in 0..200 {
            input.push_str(&format!("<t{n}>"));
        }
        input.push_str("<p>hi</p>");

        // Twice: the pattern cache serves the second scan
        for _ in 0..2 {
            let doc = normalize_fragment(&input).unwrap();
            assert!(doc.as_str().starts_with("<html><head></head><body><t0>"));
        }
    }

    #[test]
    fn repeated_unclosed_tags_are_not_a_pair() {
        let input = "<p>".repeat(300);
        match normalize_fragment(&input) {
            Err(Error::NotHtml) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
