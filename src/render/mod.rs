//! Presentation formatting for generated content.
//!
//! Summary mode wraps paragraphs in deterministically color-cycled blocks;
//! mind-map mode hands the Markdown to a browser-side markmap renderer
//! unmodified. Everything here is a pure function of its input.

use crate::generation::{GeneratedContent, Mode};
use serde::Serialize;

/// Ordered palette of (background, foreground) pairs for summary blocks.
///
/// Paragraph `i` always gets `PALETTE[i % PALETTE.len()]`, so identical
/// input renders identically.
pub const PALETTE: [(&str, &str); 18] = [
    ("#D32F2F", "#FFFFFF"), // vermelho
    ("#C2185B", "#FFFFFF"), // rosa
    ("#7B1FA2", "#FFFFFF"), // roxo
    ("#512DA8", "#FFFFFF"), // roxo escuro
    ("#303F9F", "#FFFFFF"), // índigo
    ("#1976D2", "#FFFFFF"), // azul
    ("#0288D1", "#FFFFFF"), // azul claro
    ("#0097A7", "#FFFFFF"), // ciano
    ("#00796B", "#FFFFFF"), // verde azulado
    ("#388E3C", "#FFFFFF"), // verde
    ("#689F38", "#FFFFFF"), // verde oliva
    ("#AFB42B", "#FFFFFF"), // lima
    ("#FBC02D", "#FFFFFF"), // amarelo
    ("#FFA000", "#FFFFFF"), // âmbar
    ("#F57C00", "#FFFFFF"), // laranja
    ("#E64A19", "#FFFFFF"), // laranja escuro
    ("#5D4037", "#FFFFFF"), // marrom
    ("#616161", "#FFFFFF"), // cinza
];

/// One styled paragraph of a rendered summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledBlock {
    pub text: String,
    pub background: &'static str,
    pub foreground: &'static str,
}

/// Mode-dependent presentation of generated content.
#[derive(Debug, Clone)]
pub enum RenderedOutput {
    /// Color-cycled paragraph blocks.
    Summary(Vec<StyledBlock>),
    /// Markdown passed through unmodified for hierarchical rendering.
    MindMap(String),
}

/// Color pair for paragraph `index`, cycling through the palette.
pub fn palette_color(index: usize) -> (&'static str, &'static str) {
    PALETTE[index % PALETTE.len()]
}

/// Split text on line breaks into styled, non-empty paragraphs.
///
/// Blank lines are dropped; order is preserved. Empty input yields zero
/// blocks.
pub fn style_paragraphs(text: &str) -> Vec<StyledBlock> {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .enumerate()
        .map(|(i, line)| {
            let (background, foreground) = palette_color(i);
            StyledBlock {
                text: line.to_string(),
                background,
                foreground,
            }
        })
        .collect()
}

/// Render generated content for its mode.
pub fn render(content: &GeneratedContent) -> RenderedOutput {
    match content.mode {
        Mode::Summary => RenderedOutput::Summary(style_paragraphs(&content.text)),
        Mode::MindMap => RenderedOutput::MindMap(content.text.clone()),
    }
}

/// Render generated content as a standalone HTML document.
pub fn to_html(content: &GeneratedContent) -> String {
    match render(content) {
        RenderedOutput::Summary(blocks) => summary_html(&blocks),
        RenderedOutput::MindMap(markdown) => mind_map_html(&markdown),
    }
}

fn summary_html(blocks: &[StyledBlock]) -> String {
    let mut html = String::from(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
.colored-paragraph {
    padding: 15px;
    margin: 10px 0;
    border-radius: 10px;
    font-family: Arial, sans-serif;
}
</style>
</head>
<body>
"#,
    );

    for block in blocks {
        html.push_str(&format!(
            "<div class=\"colored-paragraph\" style=\"background-color: {}; color: {};\">\n<p>{}</p>\n</div>\n",
            block.background,
            block.foreground,
            html_escape(&block.text)
        ));
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn mind_map_html(markdown: &str) -> String {
    // markmap interprets the Markdown structure in the browser; the server
    // only embeds it.
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>svg.markmap {{ width: 100%; height: 80vh; }}</style>
<script src="https://cdn.jsdelivr.net/npm/markmap-autoloader@0.16"></script>
</head>
<body>
<div class="markmap">
<script type="text/template">
{}
</script>
</div>
</body>
</html>
"#,
        markdown.replace("</script>", "<\\/script>")
    )
}

/// Minimal HTML escaping for paragraph text.
fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_into_non_empty_paragraphs() {
        let blocks = style_paragraphs("Para 1\n\nPara 2\nPara 3");
        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].text, "Para 1");
        assert_eq!(blocks[1].text, "Para 2");
        assert_eq!(blocks[2].text, "Para 3");
    }

    #[test]
    fn test_palette_cycling_law() {
        for i in 0..60 {
            assert_eq!(palette_color(i), palette_color(i % 18));
        }
    }

    #[test]
    fn test_block_18_shares_block_0_colors() {
        let text = (0..20)
            .map(|i| format!("Parágrafo {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        let blocks = style_paragraphs(&text);
        assert_eq!(blocks[0].background, blocks[18].background);
        assert_eq!(blocks[0].foreground, blocks[18].foreground);
        assert_ne!(blocks[0].background, blocks[1].background);
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert!(style_paragraphs("").is_empty());
        assert!(style_paragraphs("\n \n\t\n").is_empty());
    }

    #[test]
    fn test_mind_map_passthrough_is_byte_identical() {
        let content = GeneratedContent {
            mode: Mode::MindMap,
            text: "# Tema\n## Tópico\n- Item".to_string(),
        };
        match render(&content) {
            RenderedOutput::MindMap(markdown) => assert_eq!(markdown, content.text),
            other => panic!("expected MindMap, got {other:?}"),
        }
    }

    #[test]
    fn test_summary_html_contains_styled_blocks() {
        let content = GeneratedContent {
            mode: Mode::Summary,
            text: "Primeiro\nSegundo".to_string(),
        };
        let html = to_html(&content);
        assert!(html.contains("background-color: #D32F2F"));
        assert!(html.contains("background-color: #C2185B"));
        assert!(html.contains("<p>Primeiro</p>"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a < b & c > d"), "a &lt; b &amp; c &gt; d");
    }
}
