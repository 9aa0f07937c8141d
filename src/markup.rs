use crate::config::Config;
use crate::escape::escape_attribute;

/// Elements emitted by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Element {
    Paragraph,
    /// Levels 1 to 3; 1 is the largest.
    Heading(u8),
    UnorderedList,
    OrderedList,
    ListItem,
    Strong,
    Emphasis,
    Anchor,
}

impl Element {
    pub fn tag(self) -> &'static str {
        match self {
            Element::Paragraph => "p",
            Element::Heading(1) => "h1",
            Element::Heading(2) => "h2",
            Element::Heading(_) => "h3",
            Element::UnorderedList => "ul",
            Element::OrderedList => "ol",
            Element::ListItem => "li",
            Element::Strong => "strong",
            Element::Emphasis => "em",
            Element::Anchor => "a",
        }
    }

    /// Block elements occupy their own region; a paragraph must never wrap one.
    pub fn is_block(self) -> bool {
        !matches!(self, Element::Strong | Element::Emphasis | Element::Anchor)
    }

    fn class(self, config: &Config) -> &str {
        let classes = &config.classes;
        match self {
            Element::Paragraph => classes.paragraph.as_str(),
            Element::Heading(level) => classes.for_heading(level).unwrap_or(&classes.h3),
            Element::UnorderedList => classes.unordered_list.as_str(),
            Element::OrderedList => classes.ordered_list.as_str(),
            Element::Anchor => config.links.class.as_str(),
            Element::ListItem | Element::Strong | Element::Emphasis => "",
        }
    }

    /// Opening tag with the configured class, if any.
    pub fn open(self, config: &Config) -> String {
        let mut out = String::new();
        out.push('<');
        out.push_str(self.tag());
        push_class(self.class(config), &mut out);
        out.push('>');
        out
    }

    pub fn close(self) -> String {
        format!("</{}>", self.tag())
    }

    /// Opening anchor tag pointing at `href`.
    ///
    /// The href is inserted as captured; it is only escaped when the whole
    /// message was escaped beforehand.
    pub fn open_anchor(href: &str, config: &Config) -> String {
        let mut out = String::from("<a href=\"");
        out.push_str(href);
        out.push('"');
        if config.links.new_tab {
            out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
        }
        push_class(Element::Anchor.class(config), &mut out);
        out.push('>');
        out
    }
}

fn push_class(class: &str, out: &mut String) {
    if class.is_empty() {
        return;
    }
    out.push_str(" class=\"");
    out.push_str(&escape_attribute(class));
    out.push('"');
}
