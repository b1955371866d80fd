//! Message Body Rendering
//!
//! Message bodies are Markdown. pulldown-cmark renders them with:
//! - Raw HTML shown as text, never injected
//! - `javascript:` links neutralized
//! - Plain-text previews for the inbox list

use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag};

const PREVIEW_ELLIPSIS: char = '…';

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render a message body to HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = parser.map(sanitize_event);
    let mut html_output = String::new();
    push_html(&mut html_output, events);
    html_output
}

fn sanitize_event(event: Event<'_>) -> Event<'_> {
    match event {
        // Escaped by push_html when emitted as text
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link { link_type, dest_url, title, id }) => Event::Start(Tag::Link {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        Event::Start(Tag::Image { link_type, dest_url, title, id }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(dest_url),
            title,
            id,
        }),
        other => other,
    }
}

fn safe_url(url: CowStr<'_>) -> CowStr<'_> {
    let scheme = url.trim_start().to_ascii_lowercase();
    if scheme.starts_with("javascript:") || scheme.starts_with("vbscript:") || scheme.starts_with("data:") {
        CowStr::from("#")
    } else {
        url
    }
}

/// First `max` characters of the body as plain text
pub fn preview(text: &str, max: usize) -> String {
    let mut plain = String::new();
    for event in Parser::new_ext(text, get_options()) {
        match event {
            Event::Text(t) | Event::Code(t) | Event::Html(t) | Event::InlineHtml(t) => plain.push_str(&t),
            Event::SoftBreak | Event::HardBreak | Event::End(_) => plain.push(' '),
            _ => {}
        }
    }

    let collapsed = plain.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max).collect();
    cut = cut.trim_end().to_string();
    cut.push(PREVIEW_ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_basic_markdown() {
        let html = parse_markdown("**Plow** route _updated_");
        assert!(html.contains("<strong>Plow</strong>"));
        assert!(html.contains("<em>updated</em>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = parse_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_javascript_links_are_neutralized() {
        let html = parse_markdown("[click](javascript:alert(1))");
        assert!(html.contains(r##"href="#""##));
        assert!(!html.contains("javascript:"));

        let html = parse_markdown("[site](https://example.com/lot-4)");
        assert!(html.contains(r#"href="https://example.com/lot-4""#));
    }

    #[test]
    fn test_preview_strips_markup_and_truncates() {
        assert_eq!(preview("# Storm\n\nSalt **all** lots", 100), "Storm Salt all lots");
        assert_eq!(preview("abcdefghij", 4), "abcd…");
        assert_eq!(preview("", 10), "");
    }
}
