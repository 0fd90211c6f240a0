//! Conversion between plain text and the HTML interchange fragment.
//!
//! Every function here is pure and infallible. The tag handling is
//! deliberately line-oriented and whitelist-driven rather than a structural
//! parse: malformed markup degrades to odd-looking but non-crashing output.
//! Callers that need real HTML correctness need a real parser; this module
//! exists to move editable content between surfaces, not to validate it.

use std::sync::LazyLock;

use regex::Regex;

/// Canonical interchange representation of a visually empty document.
pub const EMPTY_SENTINEL: &str = "<p><br></p>";

/// Paragraphs that render as an empty line: `<p></p>`, `<p><br></p>`,
/// `<p>&nbsp;</p>` (and self-closed `<br/>` spellings).
static EMPTY_PARAGRAPH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<p>(?:<br\s*/?>|&nbsp;)?</p>").expect("valid pattern"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("valid pattern"));

/// Closing tags of the block elements that terminate a line of text.
static BLOCK_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</(?:p|div|li|tr|h[1-6])>").expect("valid pattern"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid pattern"));

static MANY_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid pattern"));

/// Open or close occurrences of the block tags the pretty-printer breaks
/// onto their own lines. Longer names sort before their prefixes.
static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)</?(?:div|p|ul|ol|li|table|thead|tbody|tr|td|th|h[1-6]|header|footer|section|article|nav)\b[^>]*>",
    )
    .expect("valid pattern")
});

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid pattern"));

static SCRIPT_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid pattern"));

static STYLE_ELEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid pattern"));

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid pattern"));

/// Convert an interchange fragment to plain text.
///
/// The steps run in a fixed order; reordering them changes the output on
/// adversarial input (entities must be decoded after tag removal, blank
/// paragraphs must collapse before generic block handling).
///
/// # Example
///
/// ```
/// use triptych::convert::html_to_text;
///
/// assert_eq!(html_to_text("<p>Line 1</p><p>Line 2</p>"), "Line 1\nLine 2");
/// ```
pub fn html_to_text(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    let text = markup.replace(['\r', '\t'], "");
    let text = EMPTY_PARAGRAPH.replace_all(&text, "\n").into_owned();
    let text = LINE_BREAK.replace_all(&text, "\n").into_owned();
    let text = BLOCK_CLOSE.replace_all(&text, "\n").into_owned();
    let text = TAG.replace_all(&text, "").into_owned();
    let text = unescape_html(&text);
    let text = MANY_NEWLINES.replace_all(&text, "\n\n").into_owned();
    text.trim().to_string()
}

/// Convert plain text to an interchange fragment.
///
/// Each line becomes a paragraph; blank lines become the empty-paragraph
/// sentinel so they survive a round trip. Empty input yields the sentinel.
pub fn text_to_html(text: &str) -> String {
    if text.is_empty() {
        return EMPTY_SENTINEL.to_string();
    }
    escape_html(text)
        .split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                EMPTY_SENTINEL.to_string()
            } else {
                format!("<p>{line}</p>")
            }
        })
        .collect()
}

/// Escape the five HTML special characters, ampersand first.
pub fn escape_html(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#039;")
}

/// Decode the known entities, ampersand strictly last.
///
/// The ordering makes doubly-escaped input decode one level per pass:
/// `&amp;lt;` becomes `&lt;`, not `<`.
pub fn unescape_html(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    markup
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#039;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// Remove every `<...>` span, keeping all remaining text in order.
///
/// Script and style bodies are kept as literal text, and entities are not
/// decoded; this is tag removal, not text extraction from a parsed tree.
pub fn strip_tags(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    TAG.replace_all(markup, "").into_owned()
}

/// Pretty-print a markup fragment for source-mode editing.
///
/// Whitelisted block tags are broken onto their own lines, runs of blank
/// lines collapse to one, and lines are re-indented with a single counter:
/// a closing tag outdents before printing, any other tag line indents after
/// printing unless it ends in `/>`. A bare void tag on its own line (for
/// example `<br>`) therefore indents everything after it, and irregular
/// nesting produces visually wrong but harmless indentation. Both are
/// long-standing output behavior, kept as-is.
pub fn format_html(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    let spaced = BLOCK_TAG.replace_all(markup, "\n${0}\n").into_owned();
    let spaced = MANY_NEWLINES.replace_all(&spaced, "\n\n").into_owned();

    let mut indent: usize = 0;
    let mut out: Vec<String> = Vec::new();
    for line in spaced.trim().split('\n') {
        let line = line.trim();
        if line.is_empty() {
            out.push(String::new());
            continue;
        }
        if line.starts_with("</") {
            indent = indent.saturating_sub(1);
        }
        out.push(format!("{}{line}", "  ".repeat(indent)));
        if line.starts_with('<') && !line.starts_with("</") && !line.ends_with("/>") {
            indent += 1;
        }
    }
    out.join("\n")
}

/// Strip comments and script/style elements, then collapse whitespace runs.
pub fn clean_html(markup: &str) -> String {
    if markup.is_empty() {
        return String::new();
    }
    let cleaned = COMMENT.replace_all(markup, "").into_owned();
    let cleaned = SCRIPT_ELEMENT.replace_all(&cleaned, "").into_owned();
    let cleaned = STYLE_ELEMENT.replace_all(&cleaned, "").into_owned();
    WHITESPACE_RUN.replace_all(&cleaned, " ").into_owned()
}

/// Whether a fragment renders as visually empty content.
///
/// Checks both the `&nbsp;` entity and U+00A0: tag stripping does not
/// decode entities, and callers hand in both spellings.
pub fn is_empty(markup: &str) -> bool {
    strip_tags(markup)
        .replace("&nbsp;", "")
        .replace('\u{a0}', "")
        .trim()
        .is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_empty_input() {
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_text_to_html_empty_input_yields_sentinel() {
        assert_eq!(text_to_html(""), EMPTY_SENTINEL);
    }

    #[test]
    fn test_simple_round_trip() {
        let html = text_to_html("Hello World");
        assert_eq!(html, "<p>Hello World</p>");
        assert_eq!(html_to_text(&html), "Hello World");
    }

    #[test]
    fn test_multi_line_round_trip() {
        let html = text_to_html("Line 1\nLine 2");
        assert_eq!(html, "<p>Line 1</p><p>Line 2</p>");
        assert_eq!(html_to_text(&html), "Line 1\nLine 2");
    }

    #[test]
    fn test_blank_line_becomes_sentinel_and_survives_round_trip() {
        let html = text_to_html("Line 1\n\nLine 3");
        assert_eq!(html, "<p>Line 1</p><p><br></p><p>Line 3</p>");
        assert_eq!(html_to_text(&html), "Line 1\n\nLine 3");
    }

    #[test]
    fn test_html_to_text_strips_carriage_returns_and_tabs() {
        // Only \r and \t are removed; the source \n survives as text and
        // joins the newline generated by the paragraph closer.
        assert_eq!(html_to_text("<p>a\tb</p>\r\n<p>c</p>"), "ab\n\nc");
    }

    #[test]
    fn test_html_to_text_handles_br_variants() {
        assert_eq!(html_to_text("a<br>b<BR/>c<br />d"), "a\nb\nc\nd");
    }

    #[test]
    fn test_html_to_text_breaks_on_block_closers() {
        let html = "<div>one</div><li>two</li><h2>three</h2><tr><td>four</td></tr>";
        assert_eq!(html_to_text(html), "one\ntwo\nthree\nfour");
    }

    #[test]
    fn test_html_to_text_collapses_newline_runs_to_two() {
        assert_eq!(html_to_text("a<br><br><br><br>b"), "a\n\nb");
    }

    #[test]
    fn test_html_to_text_decodes_entities_after_stripping() {
        assert_eq!(
            html_to_text("<p>&lt;b&gt; &amp; &quot;q&quot; &#039;s&#039;&nbsp;!</p>"),
            "<b> & \"q\" 's' !"
        );
    }

    #[test]
    fn test_escape_unescape_identity() {
        for s in ["<div>Hello & goodbye</div>", "\"quoted\"", "it's"] {
            assert_eq!(unescape_html(&escape_html(s)), s);
        }
    }

    #[test]
    fn test_unescape_decodes_double_escapes_one_level() {
        // Ampersand-last ordering: one level per pass, never two.
        assert_eq!(unescape_html("&amp;lt;"), "&lt;");
        assert_eq!(unescape_html("&amp;amp;"), "&amp;");
    }

    #[test]
    fn test_text_to_html_escapes_markup_characters() {
        assert_eq!(
            text_to_html("<b>bold</b> & \"air\""),
            "<p>&lt;b&gt;bold&lt;/b&gt; &amp; &quot;air&quot;</p>"
        );
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            strip_tags("<p>Hello <strong>World</strong></p>"),
            "Hello World"
        );
        assert_eq!(strip_tags(""), "");
    }

    #[test]
    fn test_strip_tags_keeps_script_bodies_as_text() {
        assert_eq!(strip_tags("<script>alert(1)</script>"), "alert(1)");
    }

    #[test]
    fn test_is_empty() {
        assert!(is_empty(""));
        assert!(is_empty("<p><br></p>"));
        assert!(is_empty("<p>&nbsp;</p>"));
        assert!(is_empty("<p>\u{a0}</p>"));
        assert!(is_empty("  <div>\n</div>  "));
        assert!(!is_empty("<p>x</p>"));
    }

    #[test]
    fn test_clean_html_removes_scripts_and_styles() {
        let cleaned = clean_html("<p>Text</p><script>alert(1)</script>");
        assert!(cleaned.contains("Text"));
        assert!(!cleaned.contains("script"));

        let cleaned = clean_html("<STYLE type=\"text/css\">p { color: red }</STYLE><p>ok</p>");
        assert!(cleaned.contains("ok"));
        assert!(!cleaned.contains("color"));
    }

    #[test]
    fn test_clean_html_removes_comments_and_collapses_whitespace() {
        assert_eq!(
            clean_html("<p>a</p> <!-- note\nspanning lines -->  \n\t <p>b</p>"),
            "<p>a</p> <p>b</p>"
        );
    }

    #[test]
    fn test_format_html_indents_nested_blocks() {
        assert_eq!(
            format_html("<div><p>Hello</p></div>"),
            "<div>\n\n  <p>\n    Hello\n  </p>\n\n</div>"
        );
    }

    #[test]
    fn test_format_html_keeps_inline_tags_inline() {
        assert_eq!(
            format_html("<p>Hello <strong>World</strong></p>"),
            "<p>\n  Hello <strong>World</strong>\n</p>"
        );
    }

    #[test]
    fn test_format_html_list_markup() {
        assert_eq!(
            format_html("<ul><li>a</li><li>b</li></ul>"),
            "<ul>\n\n  <li>\n    a\n  </li>\n\n  <li>\n    b\n  </li>\n\n</ul>"
        );
    }

    #[test]
    fn test_format_html_closing_tag_never_underflows_indent() {
        // Unbalanced input: the counter floors at zero instead of panicking.
        assert_eq!(format_html("</div></div><p>x</p>"), "</div>\n\n</div>\n\n<p>\n  x\n</p>");
    }

    #[test]
    fn test_format_html_empty_input() {
        assert_eq!(format_html(""), "");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        /// A plain-text line that survives paragraph wrapping untouched:
        /// no markup characters, no surrounding whitespace, not blank.
        fn plain_line() -> impl Strategy<Value = String> {
            "[a-zA-Z0-9][a-zA-Z0-9 .,!?-]{0,30}[a-zA-Z0-9]|[a-zA-Z0-9]"
        }

        proptest! {
            #[test]
            fn single_line_round_trips(line in plain_line()) {
                prop_assert_eq!(html_to_text(&text_to_html(&line)), line);
            }

            #[test]
            fn multi_line_round_trips(lines in prop::collection::vec(plain_line(), 1..6)) {
                let text = lines.join("\n");
                prop_assert_eq!(html_to_text(&text_to_html(&text)), text);
            }

            #[test]
            fn escape_unescape_is_identity(s in "[^&]*") {
                prop_assert_eq!(unescape_html(&escape_html(&s)), s);
            }

            #[test]
            fn conversions_never_panic(s in ".*") {
                let _ = html_to_text(&s);
                let _ = text_to_html(&s);
                let _ = format_html(&s);
                let _ = clean_html(&s);
                let _ = is_empty(&s);
            }
        }
    }
}
