//! Plain-text link and markdown-link parsing.
//!
//! Inbound and outbound text is linkified through a small tokenizer rather
//! than regex find-and-replace: the input is scanned once into a stream of
//! text/link/markdown-link tokens, and renderers map tokens to markup or
//! widgets. Because every input region is consumed exactly once, an already
//! linked URL can never be wrapped a second time.
//!
//! Content carrying the trusted-fragment marker attribute bypasses the
//! tokenizer entirely and is passed through verbatim. The trust decision
//! sits with the backend that produced the fragment.

/// Marker attribute identifying backend-rendered fragments that must not
/// be escaped or linkified.
pub const TRUSTED_FRAGMENT_MARKER: &str = "data-exclude-linkify=\"true\"";

/// Whether the given content is a pre-trusted markup fragment.
pub fn is_trusted_fragment(text: &str) -> bool {
    text.contains(TRUSTED_FRAGMENT_MARKER)
}

/// One parsed region of a text body.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Plain text, to be escaped by markup renderers.
    Text(String),
    /// A bare URL; display text and target are identical.
    Link { url: String },
    /// A `[label](url)` markdown link.
    MarkdownLink { label: String, url: String },
}

/// Parse a text body into a token stream.
///
/// Markdown links are recognized first at each position; bare `http://`,
/// `https://` and `ftp://` URLs are recognized at word boundaries, with
/// trailing punctuation left outside the link. A URL directly preceded by
/// `href="` is attribute text inside existing markup and stays plain.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < input.len() {
        let rest = &input[i..];

        if rest.starts_with('[') {
            if let Some((label, url, consumed)) = parse_markdown_link(rest) {
                flush_text(&mut tokens, &mut text);
                tokens.push(Token::MarkdownLink { label, url });
                i += consumed;
                continue;
            }
        }

        if let Some(url_len) = scan_url(rest) {
            if at_word_boundary(input, i) && !input[..i].ends_with("href=\"") {
                flush_text(&mut tokens, &mut text);
                tokens.push(Token::Link {
                    url: rest[..url_len].to_string(),
                });
                i += url_len;
                continue;
            }
        }

        let Some(ch) = rest.chars().next() else { break };
        text.push(ch);
        i += ch.len_utf8();
    }

    flush_text(&mut tokens, &mut text);
    tokens
}

fn flush_text(tokens: &mut Vec<Token>, text: &mut String) {
    if !text.is_empty() {
        tokens.push(Token::Text(std::mem::take(text)));
    }
}

/// Parse `[label](url)` at the start of `s`. Neither part may span a
/// newline; the first `](` closes the label.
fn parse_markdown_link(s: &str) -> Option<(String, String, usize)> {
    let close = s.find("](")?;
    let label = &s[1..close];
    if label.contains('\n') {
        return None;
    }
    let url_start = close + 2;
    let end = s[url_start..].find(')')? + url_start;
    let url = &s[url_start..end];
    if url.contains('\n') {
        return None;
    }
    Some((label.to_string(), url.to_string(), end + 1))
}

fn url_scheme_len(rest: &str) -> Option<usize> {
    for scheme in ["http://", "https://", "ftp://"] {
        if rest
            .get(..scheme.len())
            .is_some_and(|p| p.eq_ignore_ascii_case(scheme))
        {
            return Some(scheme.len());
        }
    }
    None
}

fn is_url_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "-+&@#/%?=~_|!:,.;".contains(ch)
}

/// Characters a URL may end on; trailing punctuation is trimmed off.
fn is_url_end_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || "-+&@#/%=~_|".contains(ch)
}

/// Length of the URL starting at the beginning of `rest`, or None.
fn scan_url(rest: &str) -> Option<usize> {
    let scheme_len = url_scheme_len(rest)?;
    let mut len = scheme_len;
    for ch in rest[scheme_len..].chars() {
        if is_url_char(ch) {
            len += ch.len_utf8();
        } else {
            break;
        }
    }
    while len > scheme_len {
        let last = rest[..len].chars().last()?;
        if is_url_end_char(last) {
            break;
        }
        len -= last.len_utf8();
    }
    if len > scheme_len {
        Some(len)
    } else {
        None
    }
}

fn at_word_boundary(input: &str, i: usize) -> bool {
    match input[..i].chars().last() {
        None => true,
        Some(prev) => !(prev.is_alphanumeric() || prev == '_'),
    }
}

/// Escape text for inclusion in markup (element content or attribute value).
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

/// Escape-then-linkify a text body into anchor markup.
///
/// Trusted fragments are returned byte-for-byte; everything else is
/// escaped, newlines become `<br>`, and link tokens become anchors.
pub fn render_html(input: &str) -> String {
    if is_trusted_fragment(input) {
        return input.to_string();
    }
    let mut out = String::new();
    for token in tokenize(input) {
        match token {
            Token::Text(t) => out.push_str(&escape_html(&t).replace('\n', "<br>")),
            Token::Link { url } => {
                let esc = escape_html(&url);
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\">{}</a>",
                    esc, esc
                ));
            }
            Token::MarkdownLink { label, url } => {
                out.push_str(&format!(
                    "<a href=\"{}\" target=\"_blank\">{}</a>",
                    escape_html(&url),
                    escape_html(&label)
                ));
            }
        }
    }
    out
}

/// Visible text content of a markup fragment: tags dropped, `<br>` and
/// block closers turned into line breaks, common entities decoded.
pub fn fragment_text(html: &str) -> String {
    let mut out = String::new();
    let mut chars = html.chars();
    while let Some(ch) = chars.next() {
        if ch == '<' {
            let mut tag = String::new();
            for t in chars.by_ref() {
                if t == '>' {
                    break;
                }
                tag.push(t);
            }
            let tag = tag.trim().to_ascii_lowercase();
            if tag.starts_with("br") || tag.starts_with("/div") || tag.starts_with("/p") {
                out.push('\n');
            }
        } else {
            out.push(ch);
        }
    }
    let decoded = out
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&nbsp;", " ");
    // collapse indentation noise, keep line structure
    let mut lines: Vec<String> = decoded
        .lines()
        .map(|l| l.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect();
    lines.retain(|l| !l.is_empty());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_link_becomes_anchor() {
        let out = render_html("see [docs](http://example.com/a)");
        assert_eq!(
            out,
            "see <a href=\"http://example.com/a\" target=\"_blank\">docs</a>"
        );
    }

    #[test]
    fn test_bare_url_becomes_anchor_with_same_text() {
        let out = render_html("go to http://x.test now");
        assert_eq!(
            out,
            "go to <a href=\"http://x.test\" target=\"_blank\">http://x.test</a> now"
        );
    }

    #[test]
    fn test_existing_href_is_not_rewrapped() {
        let input = "already <a href=\"http://x.test\">x</a> and http://x.test";
        let out = render_html(input);
        // Only the bare occurrence is linkified; the attribute URL stays text
        assert_eq!(out.matches("<a href=").count(), 1);
        assert!(out.contains("href=&quot;http://x.test&quot;"));
        assert!(out.ends_with("<a href=\"http://x.test\" target=\"_blank\">http://x.test</a>"));
    }

    #[test]
    fn test_trusted_fragment_passes_through_unmodified() {
        let card = "<div data-exclude-linkify=\"true\">Visit http://x.test</div>";
        assert_eq!(render_html(card), card);
    }

    #[test]
    fn test_trailing_punctuation_stays_outside_link() {
        let tokens = tokenize("look: http://x.test/a, ok");
        assert_eq!(
            tokens,
            vec![
                Token::Text("look: ".into()),
                Token::Link {
                    url: "http://x.test/a".into()
                },
                Token::Text(", ok".into()),
            ]
        );
    }

    #[test]
    fn test_url_inside_markdown_is_consumed_once() {
        let tokens = tokenize("[x](http://x.test)");
        assert_eq!(
            tokens,
            vec![Token::MarkdownLink {
                label: "x".into(),
                url: "http://x.test".into()
            }]
        );
    }

    #[test]
    fn test_no_word_boundary_no_link() {
        let tokens = tokenize("nothttp://x.test");
        assert_eq!(tokens, vec![Token::Text("nothttp://x.test".into())]);
    }

    #[test]
    fn test_newlines_become_breaks() {
        assert_eq!(render_html("a\nb"), "a<br>b");
    }

    #[test]
    fn test_escaping_applies_to_text() {
        assert_eq!(render_html("1 < 2 & \"q\""), "1 &lt; 2 &amp; &quot;q&quot;");
    }

    #[test]
    fn test_fragment_text_strips_markup() {
        let html = "<div class=\"card\"><b>Hi</b> there<br>next &amp; more</div>";
        assert_eq!(fragment_text(html), "Hi there\nnext & more");
    }

    #[test]
    fn test_markdown_label_not_spanning_newline() {
        let tokens = tokenize("[a\nb](http://x.test)");
        // not a markdown link; the bare URL inside is still picked up
        assert!(tokens
            .iter()
            .any(|t| matches!(t, Token::Link { url } if url == "http://x.test")));
        assert!(!tokens
            .iter()
            .any(|t| matches!(t, Token::MarkdownLink { .. })));
    }
}
