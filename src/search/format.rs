//! Turns raw model text into HTML for the results page

use pulldown_cmark::{html, Event, Options, Parser};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([A-Za-z][A-Za-z\s]+):(\s*)").expect("valid regex"));
static SUB_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([A-Za-z][A-Za-z\s]+):").expect("valid regex"));
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[•●○]\s*").expect("valid regex"));

/// Apply the heading/bullet heuristics and render the result as HTML
pub fn format_response(text: &str) -> String {
    markdown_to_html(&to_markdown(text))
}

/// Heuristic markdown for model output that uses "Label:" lines as headings
pub fn to_markdown(text: &str) -> String {
    let text = text.replace("\r\n", "\n");

    // "Word(s):" at the start of a line becomes a section heading
    let text = SECTION.replace_all(&text, "## $1$2");

    // Remaining line-start labels become sub-headings unless a digit follows
    // the colon (times, ratios)
    let text = SUB_SECTION.replace_all(&text, |caps: &Captures| {
        let whole = caps.get(0).map(|m| m.as_str()).unwrap_or_default();
        let end = caps.get(0).map(|m| m.end()).unwrap_or_default();
        let followed_by_digit = text[end..].starts_with(|c: char| c.is_ascii_digit());
        if followed_by_digit {
            whole.to_string()
        } else {
            format!("### {}", &caps[1])
        }
    });

    let text = BULLET.replace_all(&text, "* ");

    text.split("\n\n")
        .filter(|p| !p.is_empty())
        .map(|p| {
            if p.starts_with('#') || p.starts_with('*') || p.starts_with('-') {
                p.to_string()
            } else {
                format!("{}\n", p)
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// GitHub-flavoured markdown to HTML, single newlines rendered as `<br />`
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::SoftBreak => Event::HardBreak,
        other => other,
    });

    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_labels_become_headings() {
        let markdown = to_markdown("Summary: Solana is fast.\r\n\r\nDetails:\nMore text");
        assert!(markdown.starts_with("## Summary Solana is fast."));
        assert!(markdown.contains("## Details\nMore text"));
    }

    #[test]
    fn test_times_are_not_headings() {
        let markdown = to_markdown("The launch is at 10:30 today.");
        assert_eq!(markdown, "The launch is at 10:30 today.\n");
    }

    #[test]
    fn test_bullets_are_normalized() {
        let markdown = to_markdown("• first\n● second\n○ third");
        assert_eq!(markdown, "* first\n* second\n* third");
    }

    #[test]
    fn test_plain_paragraphs_get_trailing_newline() {
        let markdown = to_markdown("one\n\n\n\ntwo");
        assert_eq!(markdown, "one\n\n\ntwo\n");
    }

    #[test]
    fn test_format_response_renders_html() {
        let html = format_response("Overview: fast chain\n\n• low fees\n• high throughput");
        assert!(html.contains("<h2>Overview fast chain</h2>"));
        assert!(html.contains("<li>low fees</li>"));
        assert!(html.contains("<li>high throughput</li>"));
    }

    #[test]
    fn test_soft_breaks_render_as_line_breaks() {
        let html = markdown_to_html("line one\nline two");
        assert!(html.contains("line one<br />"));
    }
}
