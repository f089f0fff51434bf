use scraper::{Html, Selector};

use crate::foundation::core::Rgba8;
use crate::story::color::parse_css_color;

/// Distinct colours a text element renders its glyphs in, in document order.
///
/// Unstyled text is black: that covers spans without any `color` declaration as well as
/// non-empty content without spans. Empty content has no colours at all. Declared colours that do
/// not parse (`var(--x)`, `currentColor`) are dropped without falling back to black.
pub fn text_style_colors(content: &str) -> Vec<Rgba8> {
    let fragment = Html::parse_fragment(content);
    let styles = match Selector::parse("span") {
        Ok(selector) => fragment
            .select(&selector)
            .map(|span| span.value().attr("style").map(str::to_owned))
            .collect::<Vec<_>>(),
        Err(_) => Vec::new(),
    };

    let mut declared = false;
    let mut colors = Vec::<Rgba8>::new();
    for style in styles.iter().flatten() {
        let Some(value) = style_property(style, "color") else {
            continue;
        };
        declared = true;
        let Some(color) = parse_css_color(value) else {
            continue;
        };
        if !colors.contains(&color) {
            colors.push(color);
        }
    }

    let unstyled_spans = !declared && !styles.is_empty();
    let bare_text = styles.is_empty() && !content.is_empty();
    if unstyled_spans || bare_text {
        colors.push(Rgba8::BLACK);
    }
    colors
}

/// Value of `property` inside an inline `style` attribute (last declaration wins).
fn style_property<'a>(style: &'a str, property: &str) -> Option<&'a str> {
    style
        .split(';')
        .filter_map(|decl| decl.split_once(':'))
        .filter(|(name, _)| name.trim().eq_ignore_ascii_case(property))
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
        .last()
}

#[cfg(test)]
#[path = "../../tests/unit/story/spans.rs"]
mod tests;
