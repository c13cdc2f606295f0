//! Pitch page, view counter and listing

use super::{escape, layout, render_markdown, Toast};
use crate::domain::entities::Pitch;

/// The view counter badge
pub fn render_view_counter(views: i64) -> String {
    format!(
        "<div class=\"view-container\"><p class=\"view-text\"><span class=\"font-black\">Views: {}</span></p></div>",
        views
    )
}

/// Full pitch page; `views` is the count read for this request
pub fn render_pitch_page(pitch: &Pitch, views: i64, toast: Option<&Toast>) -> String {
    let mut buf = String::new();

    buf.push_str("<section class=\"pink_container\">\n");
    buf.push_str(&format!(
        "<p class=\"tag\">{}</p>\n",
        pitch.created_at.format("%B %-d, %Y")
    ));
    buf.push_str(&format!("<h1 class=\"heading\">{}</h1>\n", escape(&pitch.title)));
    buf.push_str(&format!(
        "<p class=\"sub-heading\">{}</p>\n",
        escape(&pitch.description)
    ));
    buf.push_str("</section>\n");

    buf.push_str("<section class=\"section_container\">\n");
    buf.push_str(&format!(
        "<img src=\"{}\" alt=\"thumbnail\" class=\"startup-image\">\n",
        escape(&pitch.image)
    ));
    buf.push_str(&format!(
        "<p class=\"category-tag\">{}</p>\n",
        escape(&pitch.category)
    ));
    buf.push_str("<h3>Pitch Details</h3>\n");
    if pitch.pitch.trim().is_empty() {
        buf.push_str("<p class=\"no-result\">No details provided</p>\n");
    } else {
        buf.push_str("<article class=\"prose\">\n");
        buf.push_str(&render_markdown(&pitch.pitch));
        buf.push_str("</article>\n");
    }
    buf.push_str(&render_view_counter(views));
    buf.push_str("\n</section>");

    layout(&pitch.title, toast, &buf)
}

fn render_card(pitch: &Pitch) -> String {
    format!(
        "<li class=\"startup-card\">\
<p class=\"startup-card_date\">{date}</p>\
<a href=\"{href}\"><h3 class=\"startup-card_title\">{title}</h3></a>\
<p class=\"startup-card_desc\">{description}</p>\
<img src=\"{image}\" alt=\"placeholder\" class=\"startup-card_img\">\
<p class=\"startup-card_category\">{category}</p>\
<p class=\"startup-card_views\">{views}</p>\
</li>",
        date = pitch.created_at.format("%B %-d, %Y"),
        href = escape(&pitch.path()),
        title = escape(&pitch.title),
        description = escape(&pitch.description),
        image = escape(&pitch.image),
        category = escape(&pitch.category),
        views = pitch.views,
    )
}

/// Home page listing, with the search box
pub fn render_list_page(pitches: &[Pitch], search: Option<&str>) -> String {
    let mut buf = String::new();

    buf.push_str("<section class=\"pink_container\">\n");
    buf.push_str("<h1 class=\"heading\">Pitch your startup</h1>\n");
    buf.push_str(&format!(
        "<form action=\"/\" class=\"search-form\"><input name=\"query\" value=\"{}\" class=\"search-input\" placeholder=\"Search startups\"><button type=\"submit\">Search</button></form>\n",
        escape(search.unwrap_or(""))
    ));
    buf.push_str("</section>\n<section class=\"section_container\">\n");

    match search {
        Some(term) => buf.push_str(&format!(
            "<p class=\"text-30-semibold\">Search results for \"{}\"</p>\n",
            escape(term)
        )),
        None => buf.push_str("<p class=\"text-30-semibold\">All startups</p>\n"),
    }

    if pitches.is_empty() {
        buf.push_str("<p class=\"no-results\">No startups found</p>\n");
    } else {
        buf.push_str("<ul class=\"card_grid\">\n");
        for pitch in pitches {
            buf.push_str(&render_card(pitch));
            buf.push('\n');
        }
        buf.push_str("</ul>\n");
    }
    buf.push_str("</section>");

    layout("Startups", None, &buf)
}

pub fn render_not_found_page() -> String {
    layout(
        "Not found",
        None,
        "<section class=\"section_container\"><h1 class=\"heading\">Startup not found</h1><p><a href=\"/\">Back to all startups</a></p></section>",
    )
}

/// Shown when the content store fails while building a page
pub fn render_error_page() -> String {
    layout(
        "Error",
        Some(&Toast::unexpected()),
        "<section class=\"section_container\"><h1 class=\"heading\">Something went wrong</h1><p><a href=\"/\">Back to all startups</a></p></section>",
    )
}
