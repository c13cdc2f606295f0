//! Startup submission form

use super::{escape, layout, Toast};
use crate::app::{FieldErrors, PitchForm};

enum Control {
    Input,
    Textarea,
    Markdown,
}

struct Field {
    name: &'static str,
    label: &'static str,
    placeholder: &'static str,
    control: Control,
}

const FIELDS: [Field; 5] = [
    Field {
        name: "title",
        label: "Title",
        placeholder: "Startup title",
        control: Control::Input,
    },
    Field {
        name: "description",
        label: "Description",
        placeholder: "Startup description",
        control: Control::Textarea,
    },
    Field {
        name: "category",
        label: "Category",
        placeholder: "Startup category (Tech, Health, Education, etc...)",
        control: Control::Input,
    },
    Field {
        name: "link",
        label: "Image URL",
        placeholder: "Startup image URL",
        control: Control::Input,
    },
    Field {
        name: "pitch",
        label: "Pitch",
        placeholder: "Briefly describe your idea and what problem it solves",
        control: Control::Markdown,
    },
];

pub const SUBMIT_LABEL: &str = "Submit your pitch";
pub const PENDING_LABEL: &str = "Submitting...";

// Disables the button and swaps its label while the request is in flight
const PENDING_SCRIPT: &str = "const b=this.querySelector('button[type=submit]');b.disabled=true;b.textContent=b.dataset.pendingLabel;";

fn render_field(field: &Field, form: &PitchForm, errors: &FieldErrors) -> String {
    let value = escape(form.value(field.name));
    let control = match field.control {
        Control::Input => format!(
            "<input id=\"{name}\" name=\"{name}\" class=\"startup-form_input\" required placeholder=\"{placeholder}\" value=\"{value}\">",
            name = field.name,
            placeholder = escape(field.placeholder),
            value = value,
        ),
        Control::Textarea => format!(
            "<textarea id=\"{name}\" name=\"{name}\" class=\"startup-form_textarea\" required placeholder=\"{placeholder}\">{value}</textarea>",
            name = field.name,
            placeholder = escape(field.placeholder),
            value = value,
        ),
        Control::Markdown => format!(
            "<textarea id=\"{name}\" name=\"{name}\" class=\"startup-form_editor\" data-editor=\"markdown\" rows=\"12\" required placeholder=\"{placeholder}\">{value}</textarea>",
            name = field.name,
            placeholder = escape(field.placeholder),
            value = value,
        ),
    };

    let mut buf = String::from("<div>\n");
    buf.push_str(&format!(
        "<label for=\"{}\" class=\"startup-form_label\">{}</label>\n",
        field.name, field.label
    ));
    buf.push_str(&control);
    buf.push('\n');
    if let Some(message) = errors.first(field.name) {
        buf.push_str(&format!(
            "<p class=\"startup-form_error\" data-field=\"{}\">{}</p>\n",
            field.name,
            escape(message)
        ));
    }
    buf.push_str("</div>\n");
    buf
}

/// Render the submission form with previous values and per-field errors
pub fn render_form(form: &PitchForm, errors: &FieldErrors) -> String {
    let mut buf = String::new();
    buf.push_str(&format!(
        "<form action=\"/startup/create\" method=\"post\" class=\"startup-form\" onsubmit=\"{}\">\n",
        escape(PENDING_SCRIPT)
    ));
    for field in &FIELDS {
        buf.push_str(&render_field(field, form, errors));
    }
    buf.push_str(&format!(
        "<button type=\"submit\" class=\"startup-form_btn\" data-pending-label=\"{}\">{}</button>\n",
        PENDING_LABEL, SUBMIT_LABEL
    ));
    buf.push_str("</form>");
    buf
}

/// Full page around the form
pub fn render_form_page(form: &PitchForm, errors: &FieldErrors, toast: Option<&Toast>) -> String {
    let content = format!(
        "<section class=\"pink_container\"><h1 class=\"heading\">Submit your startup</h1></section>\n{}",
        render_form(form, errors)
    );
    layout("Create startup", toast, &content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::validation::validate_pitch;
    use crate::test_utils::test_form;

    #[test]
    fn empty_form_has_every_field_and_button() {
        let html = render_form(&PitchForm::default(), &FieldErrors::default());

        for name in ["title", "description", "category", "link", "pitch"] {
            assert!(html.contains(&format!("name=\"{}\"", name)), "{name}");
        }
        assert!(html.contains(SUBMIT_LABEL));
        assert!(html.contains("data-pending-label=\"Submitting...\""));
        assert!(!html.contains("startup-form_error"));
    }

    #[test]
    fn each_field_shows_its_own_error() {
        let form = PitchForm {
            category: None,
            ..test_form()
        };
        let errors = validate_pitch(&form).unwrap_err();

        let html = render_form(&form, &errors);

        assert!(html.contains(
            "<p class=\"startup-form_error\" data-field=\"category\">Category is required</p>"
        ));
        assert!(!html.contains("data-field=\"title\""));
    }

    #[test]
    fn previous_values_are_refilled_and_escaped() {
        let form = PitchForm {
            title: Some("Kites \"&\" <Co>".to_string()),
            pitch: Some("# Big </textarea> idea".to_string()),
            ..test_form()
        };

        let html = render_form(&form, &FieldErrors::default());

        assert!(html.contains("value=\"Kites &quot;&amp;&quot; &lt;Co&gt;\""));
        assert!(html.contains("# Big &lt;/textarea&gt; idea</textarea>"));
    }
}
