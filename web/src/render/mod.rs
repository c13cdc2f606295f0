//! HTML rendering
//!
//! Pages are assembled as strings; every user-supplied value goes through
//! [`escape`] and pitch bodies through the markdown renderer.

pub mod form;
pub mod markdown;
pub mod pitch;

pub use form::render_form_page;
pub use markdown::render_markdown;
pub use pitch::{render_error_page, render_list_page, render_not_found_page, render_pitch_page};

/// Visual weight of a toast
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

/// A notification shown at the top of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub title: &'static str,
    pub description: &'static str,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn created() -> Self {
        Self {
            title: "Success",
            description: "Your startup pitch has been created successfully",
            variant: ToastVariant::Default,
        }
    }

    pub fn invalid_input() -> Self {
        Self {
            title: "Error",
            description: "please check your inputs and try again",
            variant: ToastVariant::Destructive,
        }
    }

    pub fn unexpected() -> Self {
        Self {
            title: "Error",
            description: "an unexpected error has occurred",
            variant: ToastVariant::Destructive,
        }
    }
}

/// Escape text for HTML element content and quoted attribute values
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_toast(toast: &Toast) -> String {
    let variant = match toast.variant {
        ToastVariant::Default => "toast",
        ToastVariant::Destructive => "toast toast_destructive",
    };
    format!(
        "<div class=\"{}\" role=\"status\"><p class=\"toast_title\">{}</p><p class=\"toast_description\">{}</p></div>",
        variant,
        escape(toast.title),
        escape(toast.description)
    )
}

/// Wrap page content in the document shell
pub fn layout(title: &str, toast: Option<&Toast>, content: &str) -> String {
    let mut buf = String::new();
    buf.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    buf.push_str("<meta charset=\"utf-8\">\n");
    buf.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    buf.push_str(&format!("<title>{} | Launchpad</title>\n", escape(title)));
    buf.push_str("</head>\n<body>\n");
    buf.push_str("<header class=\"navbar\"><a href=\"/\">Launchpad</a> <a href=\"/startup/create\">Create</a></header>\n");
    buf.push_str("<div class=\"toaster\">");
    if let Some(toast) = toast {
        buf.push_str(&render_toast(toast));
    }
    buf.push_str("</div>\n<main>\n");
    buf.push_str(content);
    buf.push_str("\n</main>\n</body>\n</html>\n");
    buf
}
