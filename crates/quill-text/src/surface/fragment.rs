//! Reader for the markup fragments the serializer produces.
//!
//! This is not a general HTML parser. It understands the subset the
//! serializer emits (`div`, `span`, `a`, `br`, `img`, quoted attributes,
//! character references) and turns it into a flat list of inline items with
//! their resolved run styles.

use quill_css::{DEFAULT_FONT_SIZE_PX, LengthValue, TextAlign};

/// Style of one run of inline content, inherited through nested wrappers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct RunStyle {
    /// Font size in pixels.
    pub font_size: f32,
    /// Weight 600 and above.
    pub bold: bool,
    /// Unitless `line-height` multiplier, `None` for `normal`.
    pub line_height: Option<f32>,
}

impl Default for RunStyle {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE_PX as f32,
            bold: false,
            line_height: None,
        }
    }
}

impl RunStyle {
    /// Apply the declarations of an inline `style` attribute on top of the
    /// inherited style. Unknown properties and unreadable values are ignored.
    fn with_declarations(mut self, css_text: &str) -> Self {
        for declaration in css_text.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let value = value.trim();
            match name.trim().to_ascii_lowercase().as_str() {
                // [§ 3.5 font-size](https://www.w3.org/TR/css-fonts-4/#font-size-prop)
                // "Percentages: refer to parent element's font size"
                "font-size" => {
                    if let Ok(length) = value.parse::<LengthValue>() {
                        let px = length.to_px(f64::from(self.font_size)) as f32;
                        if px > 0.0 {
                            self.font_size = px;
                        }
                    }
                }
                "font-weight" => {
                    self.bold = match value {
                        "bold" | "bolder" => true,
                        "normal" | "lighter" => false,
                        numeric => numeric.parse::<f32>().map_or(self.bold, |w| w >= 600.0),
                    };
                }
                "line-height" => {
                    self.line_height = value.parse::<f32>().ok().filter(|m| *m > 0.0);
                }
                _ => {}
            }
        }
        self
    }
}

/// One piece of inline content.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum InlineItem {
    /// A run of text with no white space in it.
    Text {
        text: String,
        style: RunStyle,
        href: Option<String>,
    },
    /// Collapsed white space; a break opportunity.
    Space { style: RunStyle },
    /// A forced line break.
    LineBreak { style: RunStyle },
    /// An image reference.
    Image {
        src: String,
        style: RunStyle,
        href: Option<String>,
    },
}

/// A fragment reduced to its alignment and inline items.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct FlowContent {
    pub align: TextAlign,
    pub items: Vec<InlineItem>,
}

#[derive(Debug, PartialEq)]
enum Token<'a> {
    StartTag {
        name: String,
        attrs: Vec<(String, String)>,
    },
    EndTag {
        name: String,
    },
    Text(&'a str),
}

/// Split markup into tags and text.
fn tokenize(markup: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut rest = markup;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('<') {
            let Some(end) = find_tag_end(after) else {
                // Unterminated tag: treat the remainder as text.
                tokens.push(Token::Text(rest));
                break;
            };
            tokens.push(parse_tag(&after[..end]));
            rest = &after[end + 1..];
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            tokens.push(Token::Text(&rest[..end]));
            rest = &rest[end..];
        }
    }
    tokens
}

/// Byte index of the `>` closing a tag, skipping quoted attribute values.
fn find_tag_end(tag: &str) -> Option<usize> {
    let mut quote = None;
    for (i, c) in tag.char_indices() {
        match (quote, c) {
            (None, '"' | '\'') => quote = Some(c),
            (Some(q), _) if q == c => quote = None,
            (None, '>') => return Some(i),
            _ => {}
        }
    }
    None
}

fn parse_tag(inner: &str) -> Token<'_> {
    let inner = inner.trim();
    if let Some(name) = inner.strip_prefix('/') {
        return Token::EndTag {
            name: name.trim().to_ascii_lowercase(),
        };
    }
    let name_end = inner
        .find(|c: char| c.is_ascii_whitespace() || c == '/')
        .unwrap_or(inner.len());
    let name = inner[..name_end].to_ascii_lowercase();
    Token::StartTag {
        name,
        attrs: parse_attributes(&inner[name_end..]),
    }
}

/// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
/// through [§ 13.2.5.38 Unquoted attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state),
/// collapsed into one loop.
fn parse_attributes(mut rest: &str) -> Vec<(String, String)> {
    let mut attrs = Vec::new();
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '/');
        if rest.is_empty() {
            return attrs;
        }
        let name_end = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=' || c == '/')
            .unwrap_or(rest.len());
        let name = rest[..name_end].to_ascii_lowercase();
        rest = rest[name_end..].trim_start();

        let value = if let Some(after_eq) = rest.strip_prefix('=') {
            let after_eq = after_eq.trim_start();
            match after_eq.chars().next() {
                Some(q @ ('"' | '\'')) => {
                    let body = &after_eq[1..];
                    let end = body.find(q).unwrap_or(body.len());
                    rest = body.get(end + 1..).unwrap_or_default();
                    decode_references(&body[..end])
                }
                _ => {
                    let end = after_eq
                        .find(|c: char| c.is_ascii_whitespace())
                        .unwrap_or(after_eq.len());
                    rest = &after_eq[end..];
                    decode_references(&after_eq[..end])
                }
            }
        } else {
            String::new()
        };
        if !name.is_empty() {
            attrs.push((name, value));
        }
    }
}

/// [§ 13.2.5.72 Character reference state](https://html.spec.whatwg.org/multipage/parsing.html#character-reference-state)
///
/// Decodes the named references the serializer emits plus numeric ones.
/// Anything unrecognized is kept literally.
fn decode_references(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest.find(';').and_then(|semi| {
            let name = &rest[1..semi];
            let c = match name {
                "amp" => Some('&'),
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "nbsp" => Some('\u{a0}'),
                _ => name.strip_prefix('#').and_then(|num| {
                    let code = match num.strip_prefix(['x', 'X']) {
                        Some(hex) => u32::from_str_radix(hex, 16).ok(),
                        None => num.parse::<u32>().ok(),
                    };
                    code.and_then(char::from_u32)
                }),
            };
            c.map(|c| (c, semi))
        });
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

struct Frame {
    name: String,
    style: RunStyle,
    href: Option<String>,
}

fn attr<'a>(attrs: &'a [(String, String)], name: &str) -> Option<&'a str> {
    attrs
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.as_str())
}

/// Read a fragment into flow content.
pub(crate) fn read_fragment(markup: &str) -> FlowContent {
    let mut content = FlowContent::default();
    let mut align = None;
    let mut stack = vec![Frame {
        name: String::new(),
        style: RunStyle::default(),
        href: None,
    }];

    for token in tokenize(markup) {
        let (style, href) = stack
            .last()
            .map(|f| (f.style, f.href.clone()))
            .unwrap_or_default();
        match token {
            Token::StartTag { name, attrs } => match name.as_str() {
                "br" => content.items.push(InlineItem::LineBreak { style }),
                "img" => content.items.push(InlineItem::Image {
                    src: attr(&attrs, "src").unwrap_or_default().to_string(),
                    style,
                    href,
                }),
                _ => {
                    if name == "div" && align.is_none() {
                        align = Some(
                            attr(&attrs, "align")
                                .and_then(|a| a.parse().ok())
                                .unwrap_or_default(),
                        );
                    }
                    let style = attr(&attrs, "style")
                        .map_or(style, |css| style.with_declarations(css));
                    let href = match (name.as_str(), attr(&attrs, "href")) {
                        ("a", Some(target)) => Some(target.to_string()),
                        _ => href,
                    };
                    stack.push(Frame { name, style, href });
                }
            },
            Token::EndTag { name } => {
                // Pop up to and including the matching open wrapper; never
                // pop the synthetic root frame.
                if let Some(depth) = stack.iter().skip(1).rposition(|f| f.name == name) {
                    stack.truncate(depth + 1);
                }
            }
            Token::Text(raw) => push_text(&mut content.items, &decode_references(raw), style, href),
        }
    }

    content.align = align.unwrap_or_default();
    content
}

/// [CSS Text § 4.1.1 Phase I: Collapsing and Transformation](https://www.w3.org/TR/css-text-3/#white-space-phase-1)
///
/// "Any collapsible space immediately following another collapsible space
/// ... is collapsed to have zero advance width."
fn push_text(items: &mut Vec<InlineItem>, text: &str, style: RunStyle, href: Option<String>) {
    let mut word = String::new();
    for c in text.chars() {
        if c.is_ascii_whitespace() {
            if !word.is_empty() {
                items.push(InlineItem::Text {
                    text: std::mem::take(&mut word),
                    style,
                    href: href.clone(),
                });
            }
            if !matches!(items.last(), Some(InlineItem::Space { .. })) {
                items.push(InlineItem::Space { style });
            }
        } else {
            word.push(c);
        }
    }
    if !word.is_empty() {
        items.push(InlineItem::Text {
            text: word,
            style,
            href,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(content: &FlowContent) -> Vec<&str> {
        content
            .items
            .iter()
            .filter_map(|item| match item {
                InlineItem::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn reads_alignment_from_outer_div() {
        let content = read_fragment(r#"<div align="center"><span style="">x</span></div>"#);
        assert_eq!(content.align, TextAlign::Center);
        let content = read_fragment("<div><span>x</span></div>");
        assert_eq!(content.align, TextAlign::Left);
    }

    #[test]
    fn decodes_references_in_text_and_attributes() {
        let content =
            read_fragment(r#"<div><a href="/q?a=1&amp;b=2" style="">&lt;tag&gt; &amp;&#65;&#x42;</a></div>"#);
        assert_eq!(texts(&content), ["<tag>", "&AB"]);
        match &content.items[0] {
            InlineItem::Text { href, .. } => assert_eq!(href.as_deref(), Some("/q?a=1&b=2")),
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn unknown_references_stay_literal() {
        assert_eq!(decode_references("a &bogus; b & c"), "a &bogus; b & c");
    }

    #[test]
    fn collapses_white_space_runs() {
        let content = read_fragment("<div><span>a  \n b</span> <span> c</span></div>");
        let spaces = content
            .items
            .iter()
            .filter(|i| matches!(i, InlineItem::Space { .. }))
            .count();
        assert_eq!(texts(&content), ["a", "b", "c"]);
        assert_eq!(spaces, 2);
    }

    #[test]
    fn nested_styles_inherit_and_override() {
        let content = read_fragment(
            r#"<div><span style="font-size: 20px"><span style="font-weight: 700">a</span>b</span></div>"#,
        );
        match (&content.items[0], &content.items[1]) {
            (InlineItem::Text { style: a, .. }, InlineItem::Text { style: b, .. }) => {
                assert!((a.font_size - 20.0).abs() < f32::EPSILON);
                assert!(a.bold);
                assert!((b.font_size - 20.0).abs() < f32::EPSILON);
                assert!(!b.bold);
            }
            other => panic!("unexpected items {other:?}"),
        }
    }

    #[test]
    fn em_font_size_is_relative_to_parent() {
        let content = read_fragment(
            r#"<div><span style="font-size: 10px"><span style="font-size: 2em">a</span></span></div>"#,
        );
        match &content.items[0] {
            InlineItem::Text { style, .. } => assert!((style.font_size - 20.0).abs() < 1e-4),
            other => panic!("unexpected item {other:?}"),
        }
    }

    #[test]
    fn br_and_img_are_terminal() {
        let content = read_fragment(r#"<div><span>a<br>b<img src="x.png"></span></div>"#);
        assert!(matches!(content.items[1], InlineItem::LineBreak { .. }));
        assert!(
            matches!(&content.items[3], InlineItem::Image { src, .. } if src == "x.png")
        );
    }

    #[test]
    fn quoted_gt_does_not_end_tag() {
        let content = read_fragment(r#"<div><a href="a>b" style="">x</a></div>"#);
        match &content.items[0] {
            InlineItem::Text { href, .. } => assert_eq!(href.as_deref(), Some("a>b")),
            other => panic!("unexpected item {other:?}"),
        }
    }
}
