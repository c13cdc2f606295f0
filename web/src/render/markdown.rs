//! Markdown rendering for pitch bodies
//!
//! Raw HTML is shown as text and links or images with unsafe schemes point
//! nowhere.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag};

fn is_safe_url(url: &str) -> bool {
    let scheme = url
        .split_once(':')
        .map(|(scheme, _)| scheme.trim().to_ascii_lowercase());
    match scheme {
        // Relative URLs and fragments have no scheme, or a colon after a path segment
        None => true,
        Some(scheme) if scheme.contains('/') || scheme.contains('#') || scheme.contains('?') => {
            true
        }
        Some(scheme) => matches!(scheme.as_str(), "http" | "https" | "mailto"),
    }
}

fn sanitize(event: Event<'_>) -> Event<'_> {
    match event {
        // Raw HTML is shown as text, never interpreted
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed("#"),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        other => other,
    }
}

/// Render a pitch body written in markdown to HTML
pub fn render_markdown(source: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    let parser = Parser::new_ext(source, options).map(sanitize);

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
