//! Low text contrast detection for web story pages.
//!
//! A page is a back-to-front list of elements. For every plain text element the checker finds the
//! elements behind it that cover a significant share of its box, derives one colour per background
//! (flat fills directly, images by rendering the region under the text and taking its dominant
//! colour), and compares each text colour against each background colour using WCAG 2.x contrast
//! ratios.
//!
//! - [`page_background_text_low_contrast`] answers yes/no for one page
//! - [`check_page`] and [`check_story`] return detailed reports
//! - Media comes from a [`MediaLoader`]; [`FsMediaLoader`] reads a local mirror
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod check;
mod foundation;
mod layout;
mod render;
mod story;

pub use crate::foundation::core::{Affine, PageSize, Point, Rect, Rgba8, Vec2};
pub use crate::foundation::error::{ContrastError, ContrastResult};

pub use crate::layout::boxes::{ElementBox, overlapping_area};
pub use crate::layout::units::{
    FULLBLEED_RATIO, PAGE_HEIGHT, PAGE_RATIO, PAGE_WIDTH, data_to_editor_x, data_to_editor_y,
    editor_pixels, font_size_pt, full_bleed_offset,
};

pub use crate::story::color::parse_css_color;
pub use crate::story::model::{
    BackgroundTextMode, Element, ElementKind, Flip, GradientStop, MediaProps, Page, Pattern,
    Resource, ShapeProps, Story, TextProps,
};
pub use crate::story::spans::text_style_colors;

pub use crate::assets::decode::{PreparedImage, decode_image};
pub use crate::assets::store::{
    FsMediaLoader, InMemoryMediaLoader, MediaLoader, NoMediaLoader, media_rel_path,
    normalize_rel_path,
};

pub use crate::render::dominant::dominant_color;
pub use crate::render::offscreen::{CanvasPaint, MAX_WINDOW_PIXELS};
pub use crate::render::placement::{MediaPlacement, media_placement};

pub use crate::check::backgrounds::significant_backgrounds;
pub use crate::check::opts::CheckOpts;
pub use crate::check::page::{
    LowContrastFinding, PageContrastReport, StoryContrastReport, check_page, check_story,
    page_background_text_low_contrast,
};
pub use crate::check::resolve::BackgroundResolver;
pub use crate::check::wcag::{
    WcagLevel, contrast_ratio, contrast_ratio_from_luminances, is_large_text, relative_luminance,
};
