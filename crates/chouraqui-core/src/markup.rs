//! Verse text formatting: French typography and the Tetragram marker.
//!
//! Chouraqui writes the divine name as `IHVH-Adonaï` in the verse text. It is
//! never shown literally: the HTML page swaps in a stacked inline rendering and
//! the desktop reader draws it as a dedicated styled span.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_TETRAGRAM: Lazy<Regex> = Lazy::new(|| Regex::new(r"IHVH-?Adona(?:ï|i)").unwrap());
static RE_SPACE_BEFORE_PUNCT: Lazy<Regex> = Lazy::new(|| Regex::new(r" ([?!;])").unwrap());
static RE_SPACE_BEFORE_COLON: Lazy<Regex> = Lazy::new(|| Regex::new(r" ?:(\s)").unwrap());

const NBSP: char = '\u{00A0}';

pub const TETRAGRAM_HTML: &str = concat!(
    r#"<span class="tetragram tetragram--inline" aria-label="Tetragram adonaï IHVH">"#,
    r#"<span class="tetragram__letters" aria-hidden="true">"#,
    r#"<span class="tetragram__letter tetragram__letter--tall">I</span>"#,
    r#"<span class="tetragram__middle">"#,
    r#"<span class="tetragram__adonai">adonaï</span>"#,
    r#"<span class="tetragram__middle-line">"#,
    r#"<span class="tetragram__letter tetragram__letter--mid">H</span>"#,
    r#"<span class="tetragram__letter tetragram__letter--mid">V</span>"#,
    r#"</span></span>"#,
    r#"<span class="tetragram__letter tetragram__letter--tall">H</span>"#,
    r#"</span></span>"#
);

/// Piece of a verse after splitting out the Tetragram marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Tetragram,
}

/// Insert non-breaking spaces where French typography requires them:
/// inside guillemets and before `? ! ; :`.
pub fn french_typography(text: &str) -> String {
    let nbsp = NBSP.to_string();
    let out = text
        .replace("« ", &format!("«{nbsp}"))
        .replace(" »", &format!("{nbsp}»"))
        .replace("‹ ", &format!("‹{nbsp}"))
        .replace(" ›", &format!("{nbsp}›"));
    let out = RE_SPACE_BEFORE_PUNCT.replace_all(&out, format!("{nbsp}$1").as_str());
    RE_SPACE_BEFORE_COLON
        .replace_all(&out, format!("{nbsp}:$1").as_str())
        .into_owned()
}

pub fn replace_tetragram_html(text: &str) -> String {
    RE_TETRAGRAM.replace_all(text, TETRAGRAM_HTML).into_owned()
}

/// Split verse text around Tetragram markers, preserving order.
pub fn segments(text: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut cursor = 0;
    for found in RE_TETRAGRAM.find_iter(text) {
        if found.start() > cursor {
            out.push(Segment::Text(&text[cursor..found.start()]));
        }
        out.push(Segment::Tetragram);
        cursor = found.end();
    }
    if cursor < text.len() {
        out.push(Segment::Text(&text[cursor..]));
    }
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Full HTML pass for one verse: escape, typography, then the Tetragram.
pub fn format_verse_html(text: &str) -> String {
    replace_tetragram_html(&french_typography(&escape_html(text)))
}
