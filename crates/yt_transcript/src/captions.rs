//! Timed-text caption document parsing.
//!
//! YouTube serves captions as a flat XML document:
//!
//! ```xml
//! <transcript>
//!   <text start="0.16" dur="2.4">Hello &amp;amp; welcome</text>
//! </transcript>
//! ```
//!
//! Cue text is escaped twice (once as XML, once as HTML), so both layers are
//! decoded before markup such as `<i>` or `<font>` is stripped.

use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

use crate::TranscriptSnippet;

static TEXT_ELEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<text\b([^>/]*)>(.*?)</text>").unwrap());

static START_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bstart="([^"]*)""#).unwrap());

static DUR_ATTR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"\bdur="([^"]*)""#).unwrap());

static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").unwrap());

static MARKUP_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[^>]+>").unwrap());

/// Parses a timed-text document into snippets, in document order.
///
/// Empty `<text>` elements (and self-closing ones) carry no caption and are skipped.
pub fn parse_caption_document(document: &str) -> Vec<TranscriptSnippet> {
    TEXT_ELEMENT_RE
        .captures_iter(document)
        .filter_map(|cap| {
            let attrs = cap.get(1).map_or("", |m| m.as_str());
            let raw = cap.get(2).map_or("", |m| m.as_str());
            if raw.is_empty() {
                return None;
            }

            let once = decode_entities(raw);
            let text = decode_entities(&once);
            let text = MARKUP_RE.replace_all(&text, "").into_owned();

            Some(TranscriptSnippet {
                text,
                start: parse_seconds(&START_ATTR_RE, attrs),
                duration: parse_seconds(&DUR_ATTR_RE, attrs),
            })
        })
        .collect()
}

fn parse_seconds(re: &Regex, attrs: &str) -> f64 {
    re.captures(attrs)
        .and_then(|cap| cap.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or_default()
}

/// Decodes one layer of named and numeric character references.
/// Unknown references are left as written.
fn decode_entities(input: &str) -> Cow<'_, str> {
    ENTITY_RE.replace_all(input, |cap: &Captures| {
        let entity = &cap[1];
        let decoded = if let Some(hex) = entity
            .strip_prefix("#x")
            .or_else(|| entity.strip_prefix("#X"))
        {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = entity.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            named_entity(entity)
        };

        match decoded {
            Some(c) => c.to_string(),
            None => cap[0].to_string(),
        }
    })
}

fn named_entity(name: &str) -> Option<char> {
    let c = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "lsquo" => '‘',
        "rsquo" => '’',
        "ldquo" => '“',
        "rdquo" => '”',
        _ => return None,
    };
    Some(c)
}
