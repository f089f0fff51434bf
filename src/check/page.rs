use rayon::prelude::*;

use crate::assets::store::MediaLoader;
use crate::check::backgrounds::significant_backgrounds;
use crate::check::opts::CheckOpts;
use crate::check::resolve::BackgroundResolver;
use crate::check::wcag::{contrast_ratio, is_large_text};
use crate::foundation::core::{Rect, Rgba8};
use crate::foundation::error::{ContrastError, ContrastResult};
use crate::layout::boxes::ElementBox;
use crate::layout::units::font_size_pt;
use crate::story::model::{BackgroundTextMode, Element, Page, Story};
use crate::story::spans::text_style_colors;

/// One failing (text colour, background colour) pair.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LowContrastFinding {
    /// Text element whose glyphs are hard to read.
    pub text_element_id: String,
    /// Background element the text was compared against.
    pub background_element_id: String,
    /// Glyph colour.
    pub text_color: Rgba8,
    /// Resolved background colour.
    pub background_color: Rgba8,
    /// Measured contrast ratio.
    pub contrast_ratio: f64,
    /// Ratio required at the configured level for this text size.
    pub required_ratio: f64,
    /// Font size in points, when known.
    pub font_size_pt: Option<f64>,
    /// Whether the relaxed large-text threshold applied.
    pub large_text: bool,
}

/// Result of checking one page.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageContrastReport {
    /// Page identifier.
    pub page_id: String,
    /// Text elements that were evaluated.
    pub texts_checked: usize,
    /// Significant backgrounds that produced a colour.
    pub backgrounds_resolved: usize,
    /// Significant backgrounds that produced no comparable colour.
    pub backgrounds_unresolved: usize,
    /// Failing pairs, in page order.
    pub findings: Vec<LowContrastFinding>,
}

impl PageContrastReport {
    /// `true` when any text on the page fails.
    pub fn has_low_contrast(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Result of checking every page of a story.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryContrastReport {
    /// Per-page reports in story order.
    pub pages: Vec<PageContrastReport>,
}

impl StoryContrastReport {
    /// `true` when any page fails.
    pub fn has_low_contrast(&self) -> bool {
        self.pages.iter().any(PageContrastReport::has_low_contrast)
    }

    /// Identifiers of failing pages.
    pub fn failing_pages(&self) -> impl Iterator<Item = &str> {
        self.pages
            .iter()
            .filter(|p| p.has_low_contrast())
            .map(|p| p.page_id.as_str())
    }
}

/// A text element that takes part in the check.
struct TextSubject<'a> {
    element: &'a Element,
    bounds: Rect,
    colors: Vec<Rgba8>,
    font_size_pt: Option<f64>,
    large_text: bool,
}

/// One pending background colour resolution.
struct Lookup<'a> {
    text: usize,
    background: &'a Element,
    resolver: BackgroundResolver<'a>,
}

/// `true` when any text on `page` fails contrast against its significant backgrounds.
pub fn page_background_text_low_contrast(
    page: &Page,
    loader: &dyn MediaLoader,
    opts: &CheckOpts,
) -> ContrastResult<bool> {
    Ok(check_page(page, loader, opts)?.has_low_contrast())
}

/// Check one page and report every failing pair.
pub fn check_page(
    page: &Page,
    loader: &dyn MediaLoader,
    opts: &CheckOpts,
) -> ContrastResult<PageContrastReport> {
    opts.validate()?;
    with_pool(opts.threads, || check_page_unchecked(page, loader, opts))?
}

/// Check every page of `story`.
#[tracing::instrument(skip_all, fields(pages = story.pages.len()))]
pub fn check_story(
    story: &Story,
    loader: &dyn MediaLoader,
    opts: &CheckOpts,
) -> ContrastResult<StoryContrastReport> {
    opts.validate()?;
    let pages = with_pool(opts.threads, || {
        story
            .pages
            .par_iter()
            .map(|page| check_page_unchecked(page, loader, opts))
            .collect::<ContrastResult<Vec<_>>>()
    })??;
    Ok(StoryContrastReport { pages })
}

#[tracing::instrument(skip_all, fields(page = %page.id))]
fn check_page_unchecked(
    page: &Page,
    loader: &dyn MediaLoader,
    opts: &CheckOpts,
) -> ContrastResult<PageContrastReport> {
    page.validate()?;
    let size = page.size();

    let mut subjects = Vec::<TextSubject<'_>>::new();
    let mut lookups = Vec::<Lookup<'_>>::new();
    for (index, element) in page.elements.iter().enumerate() {
        let Some(text) = element.as_text() else {
            continue;
        };
        if text.background_text_mode != Some(BackgroundTextMode::None) {
            tracing::debug!(
                element = %element.id,
                mode = ?text.background_text_mode,
                "skipping text without NONE background mode"
            );
            continue;
        }
        let colors = text_style_colors(&text.content);
        if colors.is_empty() {
            continue;
        }
        let bounds = ElementBox::of(element, size).bound_rect();
        if bounds.area() <= 0.0 {
            tracing::debug!(element = %element.id, "skipping zero-area text");
            continue;
        }

        let pt = text.font_size.map(|px| font_size_pt(px, opts.px_per_pt));
        let slot = subjects.len();
        for background in
            significant_backgrounds(bounds, &page.elements[..index], size, opts.overlap_ratio)
        {
            lookups.push(Lookup {
                text: slot,
                background,
                resolver: BackgroundResolver::for_element(background, page),
            });
        }
        subjects.push(TextSubject {
            element,
            bounds,
            colors,
            font_size_pt: pt,
            large_text: is_large_text(
                pt,
                text.font_weight.filter(|_| opts.bold_large_text),
            ),
        });
    }

    // Every lookup is independent; all of them settle before any comparison runs.
    let resolved = lookups
        .par_iter()
        .map(|lookup| {
            let bounds = subjects[lookup.text].bounds;
            match lookup.resolver.resolve(bounds, page, loader, opts) {
                Ok(color) => color,
                Err(err) => {
                    tracing::debug!(
                        background = %lookup.background.id,
                        error = %err,
                        "background colour unavailable"
                    );
                    None
                }
            }
        })
        .collect::<Vec<_>>();

    let mut report = PageContrastReport {
        page_id: page.id.clone(),
        texts_checked: subjects.len(),
        ..PageContrastReport::default()
    };
    for (lookup, background_color) in lookups.iter().zip(resolved) {
        let Some(background_color) = background_color else {
            report.backgrounds_unresolved += 1;
            continue;
        };
        report.backgrounds_resolved += 1;

        let subject = &subjects[lookup.text];
        let required = opts.level.required_ratio(subject.large_text);
        for &text_color in &subject.colors {
            let ratio = contrast_ratio(text_color, background_color);
            tracing::trace!(
                text = %subject.element.id,
                background = %lookup.background.id,
                ratio,
                required,
                "contrast pair"
            );
            if ratio < required {
                report.findings.push(LowContrastFinding {
                    text_element_id: subject.element.id.clone(),
                    background_element_id: lookup.background.id.clone(),
                    text_color,
                    background_color,
                    contrast_ratio: ratio,
                    required_ratio: required,
                    font_size_pt: subject.font_size_pt,
                    large_text: subject.large_text,
                });
            }
        }
    }
    Ok(report)
}

/// Run `f` on a dedicated pool of `threads` workers, or inline on the global pool.
fn with_pool<R, F>(threads: Option<usize>, f: F) -> ContrastResult<R>
where
    R: Send,
    F: FnOnce() -> R + Send,
{
    match threads {
        None => Ok(f()),
        Some(n) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build()
                .map_err(|e| {
                    ContrastError::validation(format!("failed to build rayon thread pool: {e}"))
                })?;
            Ok(pool.install(f))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/check/page.rs"]
mod tests;
