use std::ops::Range;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::{Markup, Segment};

/// One markup construct. Rules run in precedence order and only ever see text
/// no earlier rule has claimed.
pub trait MarkupRule: Send + Sync {
    fn name(&self) -> &str;

    /// Non-overlapping matches in `text`, left to right, as byte ranges paired
    /// with the segment each one becomes.
    fn claims(&self, text: &str) -> Vec<(Range<usize>, Segment)>;
}

/// A rule backed by a compiled regex and a segment builder.
pub struct RegexRule {
    name: &'static str,
    pattern: Regex,
    build: fn(&Captures<'_>) -> Segment,
}

impl RegexRule {
    pub fn new(name: &'static str, pattern: Regex, build: fn(&Captures<'_>) -> Segment) -> Self {
        Self {
            name,
            pattern,
            build,
        }
    }
}

impl MarkupRule for RegexRule {
    fn name(&self) -> &str {
        self.name
    }

    fn claims(&self, text: &str) -> Vec<(Range<usize>, Segment)> {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                (!whole.range().is_empty()).then(|| (whole.range(), (self.build)(&caps)))
            })
            .collect()
    }
}

enum Piece {
    Open(String),
    Claimed(Segment),
}

pub struct Translator {
    rules: Vec<Box<dyn MarkupRule>>,
}

impl Translator {
    /// Rules are applied in the order given; earlier rules take precedence.
    pub fn new(rules: Vec<Box<dyn MarkupRule>>) -> Self {
        Self { rules }
    }

    /// Fenced code, inline code, bold, italic, line break.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(RegexRule::new("code_block", FENCE.clone(), code_block)),
            Box::new(RegexRule::new("inline_code", INLINE_CODE.clone(), |caps| {
                Segment::InlineCode {
                    code: group(caps, 1),
                }
            })),
            Box::new(RegexRule::new("bold", BOLD.clone(), |caps| Segment::Bold {
                text: group(caps, 1),
            })),
            Box::new(RegexRule::new("italic", ITALIC.clone(), |caps| Segment::Italic {
                text: group(caps, 1),
            })),
            Box::new(RegexRule::new("line_break", LINE_BREAK.clone(), |_| {
                Segment::LineBreak
            })),
        ])
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    pub fn translate(&self, text: &str) -> Markup {
        if text.is_empty() {
            return Markup::default();
        }

        let mut pieces = vec![Piece::Open(text.to_string())];
        for rule in &self.rules {
            let mut next = Vec::with_capacity(pieces.len());
            for piece in pieces {
                match piece {
                    Piece::Open(open) => split_open(rule.as_ref(), &open, &mut next),
                    claimed => next.push(claimed),
                }
            }
            pieces = next;
        }

        Markup::new(
            pieces
                .into_iter()
                .map(|piece| match piece {
                    Piece::Open(text) => Segment::Text { text },
                    Piece::Claimed(segment) => segment,
                })
                .collect(),
        )
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::standard()
    }
}

fn split_open(rule: &dyn MarkupRule, open: &str, out: &mut Vec<Piece>) {
    let mut cursor = 0;
    for (range, segment) in rule.claims(open) {
        if range.start < cursor || range.end > open.len() {
            continue;
        }
        if range.start > cursor {
            out.push(Piece::Open(open[cursor..range.start].to_string()));
        }
        out.push(Piece::Claimed(segment));
        cursor = range.end;
    }
    if cursor < open.len() {
        out.push(Piece::Open(open[cursor..].to_string()));
    }
}

static FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:([A-Za-z0-9_+#.-]+)?[ \t]*\r?\n)?(.*?)```").expect("valid fence regex")
});
static INLINE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([^`\n]+)`").expect("valid inline code regex"));
static BOLD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("valid bold regex"));
/// Delimiters must hug the text, so `2 * 3 * 4` stays arithmetic.
static ITALIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\*([^\s*](?:[^*\n]*[^\s*])?)\*").expect("valid italic regex")
});
static LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").expect("valid line break regex"));

static STANDARD: Lazy<Translator> = Lazy::new(Translator::standard);

/// Translate with the standard rule set.
pub fn translate(text: &str) -> Markup {
    STANDARD.translate(text)
}

fn group(caps: &Captures<'_>, index: usize) -> String {
    caps.get(index).map_or_else(String::new, |m| m.as_str().to_string())
}

fn code_block(caps: &Captures<'_>) -> Segment {
    let lang = caps
        .get(1)
        .map(|m| m.as_str().to_string())
        .filter(|lang| !lang.is_empty());
    let body = group(caps, 2);
    let code = body
        .strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(&body)
        .to_string();
    Segment::CodeBlock { lang, code }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bold(text: &str) -> Segment {
        Segment::Bold {
            text: text.to_string(),
        }
    }

    fn italic(text: &str) -> Segment {
        Segment::Italic {
            text: text.to_string(),
        }
    }

    fn inline(code: &str) -> Segment {
        Segment::InlineCode {
            code: code.to_string(),
        }
    }

    #[test]
    fn empty_input_gives_empty_markup() {
        assert!(translate("").is_empty());
    }

    #[test]
    fn plain_text_is_unchanged() {
        for text in ["hello world", "a - b + c = 42", "émoji 🎉 ok", "under_score #hash"] {
            assert_eq!(translate(text), Markup::plain(text), "input: {text:?}");
        }
    }

    #[test]
    fn bold_inline_code_and_line_break() {
        assert_eq!(translate("**a**").segments, vec![bold("a")]);
        assert_eq!(translate("`a`").segments, vec![inline("a")]);
        assert_eq!(
            translate("line1\nline2").segments,
            vec![Segment::text("line1"), Segment::LineBreak, Segment::text("line2")]
        );
    }

    #[test]
    fn italic_and_bold_side_by_side() {
        assert_eq!(
            translate("*a* and **b**").segments,
            vec![italic("a"), Segment::text(" and "), bold("b")]
        );
    }

    #[test]
    fn fenced_block_with_language() {
        let markup = translate("Try:\n```rust\nfn main() {}\n```\nDone");
        assert_eq!(
            markup.segments,
            vec![
                Segment::text("Try:"),
                Segment::LineBreak,
                Segment::CodeBlock {
                    lang: Some("rust".to_string()),
                    code: "fn main() {}".to_string(),
                },
                Segment::LineBreak,
                Segment::text("Done"),
            ]
        );
    }

    #[test]
    fn fenced_block_without_language_keeps_inner_markup_literal() {
        let markup = translate("```\n**x** and `y`\nz\n```");
        assert_eq!(
            markup.segments,
            vec![Segment::CodeBlock {
                lang: None,
                code: "**x** and `y`\nz".to_string(),
            }]
        );
    }

    #[test]
    fn single_line_fence() {
        assert_eq!(
            translate("```ls -la```").segments,
            vec![Segment::CodeBlock {
                lang: None,
                code: "ls -la".to_string(),
            }]
        );
    }

    #[test]
    fn inline_code_shields_emphasis() {
        assert_eq!(
            translate("run `**not bold**` now").segments,
            vec![Segment::text("run "), inline("**not bold**"), Segment::text(" now")]
        );
    }

    #[test]
    fn spaced_asterisks_are_not_emphasis() {
        assert_eq!(translate("2 * 3 * 4"), Markup::plain("2 * 3 * 4"));
        assert_eq!(
            translate("x * y and *z*").segments,
            vec![Segment::text("x * y and "), italic("z")]
        );
        assert_eq!(translate("*a b*").segments, vec![italic("a b")]);
    }

    #[test]
    fn italic_inside_unmatched_bold_keeps_outer_stars_literal() {
        assert_eq!(
            translate("**bold *nested* text**").segments,
            vec![Segment::text("**bold "), italic("nested"), Segment::text(" text**")]
        );
    }

    #[test]
    fn bold_wins_over_italic() {
        assert_eq!(translate("**strong**").segments, vec![bold("strong")]);
    }

    #[test]
    fn unterminated_delimiters_stay_literal() {
        assert_eq!(translate("**bold"), Markup::plain("**bold"));
        assert_eq!(translate("a `tick"), Markup::plain("a `tick"));
        assert_eq!(
            translate("```rust\nfn main() {}").segments,
            vec![
                Segment::text("```rust"),
                Segment::LineBreak,
                Segment::text("fn main() {}"),
            ]
        );
    }

    #[test]
    fn crlf_is_one_break() {
        assert_eq!(
            translate("a\r\nb").segments,
            vec![Segment::text("a"), Segment::LineBreak, Segment::text("b")]
        );
    }

    #[test]
    fn standard_rule_order() {
        assert_eq!(
            Translator::standard().rule_names(),
            vec!["code_block", "inline_code", "bold", "italic", "line_break"]
        );
    }

    struct Shout;

    impl MarkupRule for Shout {
        fn name(&self) -> &str {
            "shout"
        }

        fn claims(&self, text: &str) -> Vec<(Range<usize>, Segment)> {
            text.match_indices("HEY")
                .map(|(start, m)| (start..start + m.len(), bold(m)))
                .collect()
        }
    }

    #[test]
    fn custom_rules_run_in_given_order() {
        let translator = Translator::new(vec![
            Box::new(Shout),
            Box::new(RegexRule::new("italic", ITALIC.clone(), |caps| Segment::Italic {
                text: group(caps, 1),
            })),
        ]);
        assert_eq!(
            translator.translate("*HEY* you").segments,
            vec![Segment::text("*"), bold("HEY"), Segment::text("* you")]
        );
    }
}
