use pulldown_cmark::{html, Event, Options, Parser};
use pulldown_cmark_escape::escape_html_body_text;

/// Brackets a stand-in token for a `\(...\)` / `\[...\]` span while Markdown runs.
const STASH_MARK: char = '\u{E000}';

/// Renders a problem statement (Markdown with embedded math) into HTML.
///
/// Math spans are kept as text in their original delimiters (`$...$`,
/// `$$...$$`, `\(...\)`, `\[...\]`) so the math auto-renderer can typeset
/// them after the HTML is mounted. Markdown never touches their contents
/// (underscores, backslashes).
pub fn render_statement(md: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_MATH);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    // CommonMark reads `\(` and `\[` as escaped punctuation, so those spans
    // are lifted out before parsing and put back afterwards.
    let (source, stashed) = stash_bracket_math(md);

    let events = Parser::new_ext(&source, options).map(|event| match event {
        Event::InlineMath(src) => Event::InlineHtml(
            format!("<span class=\"math-inline\">${}$</span>", escaped(&src)).into(),
        ),
        Event::DisplayMath(src) => Event::InlineHtml(
            format!("<span class=\"math-display\">$${}$$</span>", escaped(&src)).into(),
        ),
        other => other,
    });

    let mut out = String::with_capacity(md.len() * 3 / 2);
    html::push_html(&mut out, events);

    for (i, span) in stashed.iter().enumerate() {
        let class = if span.starts_with("\\[") {
            "math-display"
        } else {
            "math-inline"
        };
        out = out.replace(
            &stash_token(i),
            &format!("<span class=\"{class}\">{}</span>", escaped(span)),
        );
    }
    out
}

fn stash_token(i: usize) -> String {
    format!("{STASH_MARK}{i}{STASH_MARK}")
}

/// Replace every closed `\(...\)` and `\[...\]` span with a token, returning
/// the rewritten source and the spans in order. Unclosed openers are left alone.
fn stash_bracket_math(md: &str) -> (String, Vec<String>) {
    let mut out = String::with_capacity(md.len());
    let mut stashed = Vec::new();
    let mut rest = md;

    while let Some(at) = rest.find('\\') {
        let close = match rest[at + 1..].chars().next() {
            Some('(') => "\\)",
            Some('[') => "\\]",
            Some('\\') => {
                // `\\` is a literal backslash; never an opener.
                out.push_str(&rest[..at + 2]);
                rest = &rest[at + 2..];
                continue;
            }
            _ => {
                out.push_str(&rest[..at + 1]);
                rest = &rest[at + 1..];
                continue;
            }
        };

        let body = at + 2;
        let Some(len) = rest[body..].find(close) else {
            out.push_str(&rest[..body]);
            rest = &rest[body..];
            continue;
        };
        let end = body + len + close.len();
        out.push_str(&rest[..at]);
        out.push_str(&stash_token(stashed.len()));
        stashed.push(rest[at..end].to_string());
        rest = &rest[end..];
    }
    out.push_str(rest);
    (out, stashed)
}

fn escaped(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    // Writing into a `String` cannot fail.
    let _ = escape_html_body_text(&mut out, s);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_math_keeps_its_delimiters() {
        let html = render_statement("The pressure is $P = \\frac{nRT}{V}$.");
        assert!(html.starts_with("<p>"));
        assert!(html.contains("$P = \\frac{nRT}{V}$"));
    }

    #[test]
    fn paren_math_keeps_its_delimiters() {
        let html = render_statement("Pressure \\(P = nRT/V\\) here.");
        assert_eq!(
            html,
            "<p>Pressure <span class=\"math-inline\">\\(P = nRT/V\\)</span> here.</p>\n"
        );
    }

    #[test]
    fn bracket_math_keeps_its_delimiters() {
        let html = render_statement("Energy:\n\\[E = m c^2\\]\nwhere $c$ is light speed.");
        assert!(html.contains("<span class=\"math-display\">\\[E = m c^2\\]</span>"));
        assert!(html.contains("$c$"));
    }

    #[test]
    fn paren_math_subscripts_are_not_emphasis() {
        let html = render_statement("Charges \\(q_1\\) and \\(q_2\\) attract.");
        assert!(html.contains("\\(q_1\\)"));
        assert!(html.contains("\\(q_2\\)"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn unclosed_paren_is_plain_markdown() {
        assert_eq!(render_statement("a \\(b"), "<p>a (b</p>\n");
    }

    #[test]
    fn subscripts_in_math_are_not_emphasis() {
        let html = render_statement("Charges $q_1$ and $q_2$ are separated by $r$.");
        assert!(html.contains("$q_1$"));
        assert!(html.contains("$q_2$"));
        assert!(!html.contains("<em>"));
    }

    #[test]
    fn display_math_uses_double_dollars() {
        let html = render_statement("$$F = k\\frac{|q_1q_2|}{r^2}$$");
        assert!(html.contains("$$F = k\\frac{|q_1q_2|}{r^2}$$"));
    }

    #[test]
    fn markup_inside_math_is_escaped() {
        let html = render_statement("If $a<b$ then");
        assert!(html.contains("$a&lt;b$"));
    }

    #[test]
    fn plain_text_is_rendered_as_a_paragraph() {
        assert_eq!(render_statement("Find the maximum height."), "<p>Find the maximum height.</p>\n");
    }
}
