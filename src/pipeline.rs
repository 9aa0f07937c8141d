use std::borrow::Cow;

use tracing::{debug, trace};

use crate::config::Config;
use crate::escape::escape_html;
use crate::stage::{Stage, StageContext};

/// Renders assistant messages to markup with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    config: Config,
}

impl Renderer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run every stage over `text`. Empty input yields an empty string.
    pub fn render(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let input = if self.config.escape_html {
            escape_html(text)
        } else {
            Cow::Borrowed(text)
        };
        let ctx = StageContext::new(text, &self.config);

        let mut working = input.into_owned();
        for stage in Stage::ALL {
            working = stage.apply(&working, &ctx);
            trace!(stage = stage.name(), len = working.len(), "applied stage");
        }

        debug!(
            input_len = text.len(),
            output_len = working.len(),
            "rendered message"
        );
        working
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render, render_option};
    use pretty_assertions::assert_eq;
    use std::time::{Duration, Instant};

    fn bare(text: &str) -> String {
        Renderer::new(Config::bare()).render(text)
    }

    fn text_content(markup: &str) -> String {
        let mut out = String::new();
        let mut in_tag = false;
        for ch in markup.chars() {
            match ch {
                '<' => in_tag = true,
                '>' => in_tag = false,
                _ if !in_tag => out.push(ch),
                _ => {}
            }
        }
        out
    }

    #[test]
    fn empty_and_missing_input() {
        assert_eq!(render(""), "");
        assert_eq!(render_option(None), "");
        assert_eq!(render_option(Some("")), "");
    }

    #[test]
    fn plain_text_is_one_paragraph() {
        let first = render("hello world");
        assert_eq!(first, "<p class=\"mb-3\">hello world</p>");
        assert_eq!(render(&text_content(&first)), first);
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        assert_eq!(bare("Hello\n\nWorld"), "<p>Hello</p><p>World</p>");
    }

    #[test]
    fn single_line_break_wraps_last_line_only() {
        assert_eq!(bare("hello\nworld"), "hello\n<p>world</p>");
    }

    #[test]
    fn bullet_list() {
        let out = bare("• a\n• b");
        assert_eq!(out, "<ul><li>a</li>\n<li>b</li></ul>");
        assert_eq!(out.matches("<li>").count(), 2);
        assert!(!out.contains("<ol"));
    }

    #[test]
    fn numbered_list_keeps_numerals() {
        assert_eq!(
            bare("1. First\n2. Second"),
            "<ol><li>1. First</li>\n<li>2. Second</li></ol>"
        );
    }

    #[test]
    fn list_between_paragraphs() {
        assert_eq!(
            bare("Intro\n\n• a\n• b\n\nOutro"),
            "<p>Intro</p><ul><li>a</li>\n<li>b</li></ul><p>Outro</p>"
        );
    }

    fn assert_paragraphs_balanced(markup: &str) {
        assert_eq!(
            markup.matches("<p").count(),
            markup.matches("</p>").count(),
            "unbalanced paragraphs in {markup:?}"
        );
    }

    #[test]
    fn multi_line_item_is_not_half_wrapped() {
        let out = bare("• first\ncontinued");
        assert_eq!(out, "<ul><li>first\ncontinued</li></ul>");
        assert_paragraphs_balanced(&out);
    }

    #[test]
    fn list_after_text_on_same_line() {
        let out = bare("Intro: • a");
        assert_eq!(out, "Intro: <ul><li>a</li></ul>");
        assert_paragraphs_balanced(&out);

        let out = render("Here you go: • a\nstill a\n• b\n\nThanks!");
        assert_paragraphs_balanced(&out);
        assert!(out.ends_with("<p class=\"mb-3\">Thanks!</p>"));
    }

    #[test]
    fn numbered_list_started_mid_line() {
        let out = bare("Tips: 1. Drink water\n2. Sleep");
        assert_eq!(
            out,
            "Tips: <ol><li>1. Drink water</li>\n<li>2. Sleep</li></ol>"
        );
        assert_paragraphs_balanced(&out);
    }

    #[test]
    fn mixed_lists_take_one_kind() {
        assert_eq!(
            bare("• a\n\n1. b"),
            "<ol><li>a</li></ol><ol><li>1. b</li></ol>"
        );
    }

    #[test]
    fn bold_wraps_italic() {
        assert_eq!(
            bare("**bold *and italic* text**"),
            "<p><strong>bold <em>and italic</em> text</strong></p>"
        );
    }

    #[test]
    fn link() {
        let out = render("[docs](https://example.com)");
        assert_eq!(out.matches("<a ").count(), 1);
        assert!(out.contains("href=\"https://example.com\""));
        assert!(out.contains("target=\"_blank\""));
        assert!(out.contains(">docs</a>"));
        assert!(out.contains("class=\"underline text-blue-500 hover:text-blue-700\""));
    }

    #[test]
    fn heading_levels() {
        assert_eq!(bare("### Sub"), "<h3>Sub</h3>");
        assert_eq!(
            bare("## Two\n# One\n### Three"),
            "<h2>Two</h2>\n<h1>One</h1>\n<h3>Three</h3>"
        );
    }

    #[test]
    fn heading_is_not_wrapped_in_paragraph() {
        assert_eq!(
            render("# Title"),
            "<h1 class=\"text-2xl font-bold mt-3 mb-2\">Title</h1>"
        );
    }

    #[test]
    fn emphasis_inside_list_items() {
        assert_eq!(
            bare("• **Sets:** 3\n• *Reps:* 12"),
            "<ul><li><strong>Sets:</strong> 3</li>\n<li><em>Reps:</em> 12</li></ul>"
        );
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_eq!(bare("2 * 3 = 6 [x]"), "<p>2 * 3 = 6 [x]</p>");
        assert_eq!(bare("****"), "<p><strong></strong></p>");
    }

    #[test]
    fn raw_markup_passes_through_by_default() {
        assert_eq!(bare("<b>hi</b>"), "<p><b>hi</b></p>");
    }

    #[test]
    fn escaping_is_opt_in() {
        let mut config = Config::bare();
        config.escape_html = true;
        let renderer = Renderer::new(config);
        assert_eq!(
            renderer.render("<script>alert(1)</script> **ok**"),
            "<p>&lt;script&gt;alert(1)&lt;/script&gt; <strong>ok</strong></p>"
        );
        assert_eq!(
            renderer.render("[a](https://x.test/?q=1&r=2)"),
            "<p><a href=\"https://x.test/?q=1&amp;r=2\" target=\"_blank\" rel=\"noopener noreferrer\">a</a></p>"
        );
    }

    #[test]
    fn escaped_numbered_list_still_ordered() {
        let mut config = Config::bare();
        config.escape_html = true;
        assert_eq!(
            Renderer::new(config).render("1. a < b\n2. c"),
            "<ol><li>1. a &lt; b</li>\n<li>2. c</li></ol>"
        );
    }

    #[test]
    fn adversarial_input_finishes() {
        let inputs = [
            "*".repeat(100_000),
            "**a".repeat(33_333),
            "[".repeat(100_000),
            "•\n".repeat(50_000),
            "1.\n".repeat(33_333),
            "#".repeat(100_000),
        ];

        let started = Instant::now();
        for input in &inputs {
            let out = bare(input);
            assert!(!out.is_empty());
        }
        assert!(started.elapsed() < Duration::from_secs(30));
    }

    #[test]
    fn emphasis_run_becomes_empty_strongs() {
        let out = bare(&"*".repeat(100_000));
        assert_eq!(out.matches("<strong></strong>").count(), 25_000);
    }

    #[test]
    fn renderer_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Renderer>();
    }
}
