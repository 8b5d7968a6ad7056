use regex::Regex;
use std::sync::LazyLock;

/// The only recognized placeholder; every literal occurrence is replaced by
/// the receiver's nickname.
pub const PLACEHOLDER: &str = "{{secretFriend}}";

pub const DEFAULT_SUBJECT: &str = "🎁 Your Secret Santa has been drawn!";

/// Built-in body used when the draw plan carries no template.
const DEFAULT_TEMPLATE: &str = "Hello!\n\nThe **Secret Santa** draw is done.\n\nYou are giving a gift to **{{secretFriend}}**.\n\nNow go pick the perfect present! 🎉";

static BLANK_LINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\n+").unwrap());
static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.+?)\*").unwrap());

/// HTML and plain-text renditions of one notification body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEmail {
    pub html: String,
    pub text: String,
}

/// Expands the placeholder and produces both renditions. Pure; input without
/// any recognized construct passes through unchanged.
pub fn render(template: Option<&str>, receiver_nickname: &str) -> RenderedEmail {
    let template = template.unwrap_or(DEFAULT_TEMPLATE);
    let substituted = template.replace(PLACEHOLDER, receiver_nickname);

    RenderedEmail {
        html: to_html(&substituted),
        text: to_text(&substituted),
    }
}

fn to_text(body: &str) -> String {
    BLANK_LINES.replace_all(body, "\n\n").trim().to_string()
}

/// Escape before any markup expansion so template content cannot inject raw
/// HTML beyond the two supported emphasis forms.
fn to_html(body: &str) -> String {
    let escaped = escape_html(body);

    let paragraphs: Vec<String> = BLANK_LINES
        .split(&escaped)
        .filter(|p| !p.trim().is_empty())
        .map(|paragraph| {
            let lines: Vec<String> = paragraph
                .lines()
                .filter(|l| !l.trim().is_empty())
                .map(apply_inline_markup)
                .collect();
            format!(
                "<p style=\"font-size: 16px; margin-bottom: 20px; line-height: 1.6;\">{}</p>",
                lines.join("<br>")
            )
        })
        .collect();

    wrap_document(&paragraphs.join("\n      "))
}

fn escape_html(body: &str) -> String {
    body.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// `**x**` → strong, `*x*` → emphasis. Bold first, so a doubled marker is
/// never consumed as two singles.
fn apply_inline_markup(line: &str) -> String {
    let bolded = BOLD.replace_all(line, "<strong>$1</strong>");
    ITALIC.replace_all(&bolded, "<em>$1</em>").into_owned()
}

fn wrap_document(content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Secret Santa</title>
</head>
<body style="font-family: Arial, sans-serif; color: #333; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: #b3000c; padding: 28px; text-align: center; border-radius: 8px 8px 0 0;">
    <h1 style="color: white; margin: 0; font-size: 26px;">🎁 Secret Santa</h1>
  </div>
  <div style="background: #f9f9f9; padding: 28px; border: 1px solid #e0e0e0; border-top: none; border-radius: 0 0 8px 8px;">
      {content}
    <p style="font-size: 13px; color: #666; margin-top: 28px; border-top: 1px solid #e0e0e0; padding-top: 16px;">
      <em>This is an automated message from the Secret Santa draw.</em>
    </p>
  </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_is_fully_substituted() {
        let rendered = render(Some("Hi {{secretFriend}}!"), "Alice");
        assert_eq!(rendered.text, "Hi Alice!");
        assert!(rendered.html.contains("Hi Alice!"));
        assert!(!rendered.text.contains(PLACEHOLDER));
        assert!(!rendered.html.contains(PLACEHOLDER));
    }

    #[test]
    fn test_every_occurrence_is_replaced() {
        let rendered = render(
            Some("{{secretFriend}}, you drew {{secretFriend}}? No, {{secretFriend}} drew you."),
            "Bob",
        );
        assert_eq!(rendered.text.matches("Bob").count(), 3);
        assert!(!rendered.text.contains("{{"));
    }

    #[test]
    fn test_default_template_when_none_supplied() {
        let rendered = render(None, "Carol");
        assert!(rendered.text.contains("Carol"));
        assert!(rendered.html.contains("<strong>Carol</strong>"));
        assert!(!rendered.html.contains(PLACEHOLDER));
    }

    #[test]
    fn test_html_escapes_template_content() {
        let rendered = render(
            Some("<script>alert('x')</script> & {{secretFriend}}"),
            "Dave",
        );
        assert!(rendered.html.contains("&lt;script&gt;"));
        assert!(rendered.html.contains("&amp;"));
        assert!(!rendered.html.contains("<script>"));
        // Text rendition stays literal
        assert_eq!(rendered.text, "<script>alert('x')</script> & Dave");
    }

    #[test]
    fn test_receiver_name_is_escaped_too() {
        let rendered = render(Some("For {{secretFriend}}"), "<Eve>");
        assert!(rendered.html.contains("&lt;Eve&gt;"));
        assert!(!rendered.html.contains("<Eve>"));
    }

    #[test]
    fn test_emphasis_applies_only_in_html() {
        let rendered = render(Some("**big** and *small* news for {{secretFriend}}"), "Fay");
        assert!(rendered.html.contains("<strong>big</strong>"));
        assert!(rendered.html.contains("<em>small</em>"));
        assert!(rendered.text.contains("**big**"));
        assert!(rendered.text.contains("*small*"));
    }

    #[test]
    fn test_paragraphs_and_line_breaks() {
        let rendered = render(
            Some("first line\nsecond line\n\n\nnext paragraph for {{secretFriend}}"),
            "Gil",
        );
        assert_eq!(rendered.html.matches("<p style=").count(), 2);
        assert!(rendered.html.contains("first line<br>second line"));
        // 3+ newlines collapse to one blank line in text
        assert_eq!(
            rendered.text,
            "first line\nsecond line\n\nnext paragraph for Gil"
        );
    }

    #[test]
    fn test_plain_input_passes_through() {
        let rendered = render(Some("no constructs here"), "Hal");
        assert_eq!(rendered.text, "no constructs here");
        assert!(rendered.html.contains("no constructs here"));
    }
}
