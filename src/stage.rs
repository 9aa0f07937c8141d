//! The ordered rewrite stages that turn message text into markup.
//!
//! Every stage is a pure `&str -> String` function. Stages run strictly in the
//! order of [`Stage::ALL`]; each one consumes the previous stage's output, so a
//! later stage sees the tags an earlier stage emitted. No emitted tag contains
//! a bullet, a `<digits>.` marker, `*`, `[` or a line-leading `#`, which keeps
//! earlier triggers from firing on generated markup.
//!
//! All patterns run on the `regex` crate's automata, so each stage is linear in
//! the length of its input. The two item stages need "up to the next marker"
//! semantics; they are forward scans with `find_at` instead of lookahead.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::Config;
use crate::markup::Element;

static BULLET_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"•\s?").unwrap());
static BULLET_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n•|\n\n").unwrap());

static NUMBER_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([0-9]+)\.\s?").unwrap());
static NUMBER_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n[0-9]+\.|\n\n").unwrap());

/// Anything that reads like a numbered list in the original message.
static ORDERED_HINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+\.\s").unwrap());
/// A run of list items separated by at most one line break.
static LIST_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<li>.*?</li>(?:[^\S\n]*\n?[^\S\n]*<li>.*?</li>)*").unwrap()
});

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());
static ITALIC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*(.*?)\*").unwrap());
static LINK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").unwrap());

/// Heading patterns, most markers first.
static HEADINGS: LazyLock<[(u8, Regex); 3]> = LazyLock::new(|| {
    [3u8, 2, 1].map(|level| {
        let pattern = format!(r"(?m)^#{{{level}}}[^\S\n]?(.*)$");
        (level, Regex::new(&pattern).unwrap())
    })
});

static PARAGRAPH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([^\n]+)(?:\n\n|\z)").unwrap());

/// One paragraph as emitted by [`paragraphs`]; its content never spans lines.
static WRAPPED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<p(?:\s[^>]*)?>([^\n]*?)</p>").unwrap());
static STARTS_WITH_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"^<(?:{})[\s>]", block_tag_alternation());
    Regex::new(&pattern).unwrap()
});
static ENDS_WITH_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"</(?:{})>$", block_tag_alternation());
    Regex::new(&pattern).unwrap()
});

/// Block tags a paragraph must not wrap.
fn block_tag_alternation() -> String {
    [
        Element::Paragraph,
        Element::Heading(1),
        Element::Heading(2),
        Element::Heading(3),
        Element::UnorderedList,
        Element::OrderedList,
        Element::ListItem,
        Element::Strong,
        Element::Emphasis,
        Element::Anchor,
    ]
    .into_iter()
    .filter(|element| element.is_block() && *element != Element::Paragraph)
    .map(Element::tag)
    .collect::<Vec<_>>()
    .join("|")
}

/// Inputs shared by every stage of one render call.
#[derive(Debug, Clone, Copy)]
pub struct StageContext<'a> {
    /// The message as received, before escaping or any rewrite.
    pub original: &'a str,
    pub config: &'a Config,
}

impl<'a> StageContext<'a> {
    pub fn new(original: &'a str, config: &'a Config) -> Self {
        Self { original, config }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    BulletItems,
    NumberedItems,
    ListGroups,
    Bold,
    Italic,
    Links,
    Headings,
    Paragraphs,
    RepairDoubleWrap,
}

impl Stage {
    /// Every stage, in the order the renderer applies them.
    pub const ALL: [Stage; 9] = [
        Stage::BulletItems,
        Stage::NumberedItems,
        Stage::ListGroups,
        Stage::Bold,
        Stage::Italic,
        Stage::Links,
        Stage::Headings,
        Stage::Paragraphs,
        Stage::RepairDoubleWrap,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::BulletItems => "bullet-items",
            Stage::NumberedItems => "numbered-items",
            Stage::ListGroups => "list-groups",
            Stage::Bold => "bold",
            Stage::Italic => "italic",
            Stage::Links => "links",
            Stage::Headings => "headings",
            Stage::Paragraphs => "paragraphs",
            Stage::RepairDoubleWrap => "repair-double-wrap",
        }
    }

    pub fn apply(self, text: &str, ctx: &StageContext<'_>) -> String {
        match self {
            Stage::BulletItems => bullet_items(text, ctx.config),
            Stage::NumberedItems => numbered_items(text, ctx.config),
            Stage::ListGroups => list_groups(text, ctx),
            Stage::Bold => bold(text),
            Stage::Italic => italic(text),
            Stage::Links => links(text, ctx.config),
            Stage::Headings => headings(text, ctx.config),
            Stage::Paragraphs => paragraphs(text, ctx.config),
            Stage::RepairDoubleWrap => repair_double_wrap(text),
        }
    }
}

/// Wrap every marker-introduced span as a list item.
///
/// A span starts after the marker and runs up to the next `end` match or the
/// end of input. The terminator itself is left in place so the next marker
/// can start another item.
fn wrap_items(
    text: &str,
    marker: &Regex,
    end: &Regex,
    mut emit: impl FnMut(&Captures<'_>, &str, &mut String),
) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut pos = 0;

    while let Some(caps) = marker.captures_at(text, pos) {
        let Some(whole) = caps.get(0) else { break };
        out.push_str(&text[pos..whole.start()]);

        let content_start = whole.end();
        let content_end = end
            .find_at(text, content_start)
            .map_or(text.len(), |m| m.start());

        emit(&caps, &text[content_start..content_end], &mut out);
        pos = content_end;
    }

    out.push_str(&text[pos..]);
    out
}

pub fn bullet_items(text: &str, config: &Config) -> String {
    let open = Element::ListItem.open(config);
    let close = Element::ListItem.close();
    wrap_items(text, &BULLET_MARKER, &BULLET_END, |_, content, out| {
        out.push_str(&open);
        out.push_str(content);
        out.push_str(&close);
    })
}

/// The numeral stays part of the item's visible text.
///
/// Markers match anywhere, not only at line start, so prose such as
/// "costs 3.50" also opens an item.
pub fn numbered_items(text: &str, config: &Config) -> String {
    let open = Element::ListItem.open(config);
    let close = Element::ListItem.close();
    wrap_items(text, &NUMBER_MARKER, &NUMBER_END, |caps, content, out| {
        out.push_str(&open);
        out.push_str(&caps[1]);
        out.push_str(". ");
        out.push_str(content);
        out.push_str(&close);
    })
}

/// Group adjacent items into lists.
///
/// The list kind is decided once for the whole message: if the original text
/// contains a numbered marker anywhere, every run becomes an ordered list.
pub fn list_groups(text: &str, ctx: &StageContext<'_>) -> String {
    if !text.contains("<li>") {
        return text.to_string();
    }

    let element = if ORDERED_HINT.is_match(ctx.original) {
        Element::OrderedList
    } else {
        Element::UnorderedList
    };
    let open = element.open(ctx.config);
    let close = element.close();

    LIST_RUN
        .replace_all(text, |caps: &Captures<'_>| format!("{open}{}{close}", &caps[0]))
        .into_owned()
}

pub fn bold(text: &str) -> String {
    BOLD.replace_all(text, "<strong>${1}</strong>").into_owned()
}

/// Runs after [`bold`] so a `**` pair is never read as two italics.
pub fn italic(text: &str) -> String {
    ITALIC.replace_all(text, "<em>${1}</em>").into_owned()
}

pub fn links(text: &str, config: &Config) -> String {
    LINK.replace_all(text, |caps: &Captures<'_>| {
        format!(
            "{}{}{}",
            Element::open_anchor(&caps[2], config),
            &caps[1],
            Element::Anchor.close()
        )
    })
    .into_owned()
}

pub fn headings(text: &str, config: &Config) -> String {
    let mut out = text.to_string();
    for (level, pattern) in HEADINGS.iter() {
        let element = Element::Heading(*level);
        let open = element.open(config);
        let close = element.close();
        out = pattern
            .replace_all(&out, |caps: &Captures<'_>| format!("{open}{}{close}", &caps[1]))
            .into_owned();
    }
    out
}

/// Wrap each line that ends a block (followed by a blank line or the end of
/// input) in a paragraph. Block elements get wrapped too; see
/// [`repair_double_wrap`].
pub fn paragraphs(text: &str, config: &Config) -> String {
    let open = Element::Paragraph.open(config);
    let close = Element::Paragraph.close();
    PARAGRAPH
        .replace_all(text, |caps: &Captures<'_>| format!("{open}{}{close}", &caps[1]))
        .into_owned()
}

/// Unwrap paragraphs that open with a block tag or close one.
///
/// Both paragraph tags are removed together, so a paragraph is never left
/// half open. A paragraph that ends in a block closing tag is the tail line
/// of a multi-line list item or of a list that started mid-line.
pub fn repair_double_wrap(text: &str) -> String {
    WRAPPED
        .replace_all(text, |caps: &Captures<'_>| {
            let content = &caps[1];
            if STARTS_WITH_BLOCK.is_match(content) || ENDS_WITH_BLOCK.is_match(content) {
                content.to_string()
            } else {
                caps[0].to_string()
            }
        })
        .into_owned()
}
