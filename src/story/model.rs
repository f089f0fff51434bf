use crate::foundation::core::{PageSize, Rgba8};
use crate::foundation::error::{ContrastError, ContrastResult};

/// A multi-page story as saved by the editor.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Story {
    /// Pages in reading order.
    pub pages: Vec<Page>,
}

impl Story {
    /// Parse story JSON. A bare page object is accepted as a one-page story.
    pub fn from_json(json: &str) -> ContrastResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let Some(object) = value.as_object() else {
            return Err(ContrastError::serde("story JSON must be an object"));
        };
        if object.contains_key("pages") {
            Ok(serde_json::from_value(value)?)
        } else {
            Ok(Self {
                pages: vec![serde_json::from_value(value)?],
            })
        }
    }
}

/// A single story page.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Stable page identifier.
    #[serde(default)]
    pub id: String,
    /// Elements ordered back-to-front (array order is z-order).
    #[serde(default)]
    pub elements: Vec<Element>,
    /// Page fill, shown through background elements without their own media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Pattern>,
    /// Rendered page size in pixels. Data-space size when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<PageSize>,
}

impl Page {
    /// Pixel size this page is evaluated at.
    pub fn size(&self) -> PageSize {
        self.page_size.unwrap_or(PageSize {
            width: crate::layout::units::PAGE_WIDTH,
            height: crate::layout::units::PAGE_HEIGHT,
        })
    }

    /// Validate page-level geometry.
    pub fn validate(&self) -> ContrastResult<()> {
        self.size().validate()?;
        for el in &self.elements {
            let dims = [el.x, el.y, el.width, el.height, el.rotation_angle];
            if dims.iter().any(|v| !v.is_finite()) {
                return Err(ContrastError::validation(format!(
                    "element '{}' has non-finite geometry",
                    el.id
                )));
            }
            if el.width < 0.0 || el.height < 0.0 {
                return Err(ContrastError::validation(format!(
                    "element '{}' has negative size",
                    el.id
                )));
            }
        }
        Ok(())
    }
}

/// Horizontal/vertical mirroring applied to an element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Flip {
    /// Mirror along the vertical axis.
    #[serde(default)]
    pub horizontal: bool,
    /// Mirror along the horizontal axis.
    #[serde(default)]
    pub vertical: bool,
}

impl Flip {
    /// `true` when either axis is mirrored.
    pub fn any(self) -> bool {
        self.horizontal || self.vertical
    }
}

/// Page element: shared geometry plus a type-specific payload.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Stable element identifier.
    #[serde(default)]
    pub id: String,
    /// Left edge in data units.
    #[serde(default)]
    pub x: f64,
    /// Top edge in data units.
    #[serde(default)]
    pub y: f64,
    /// Width in data units.
    #[serde(default)]
    pub width: f64,
    /// Height in data units.
    #[serde(default)]
    pub height: f64,
    /// Clockwise rotation in degrees about the element centre.
    #[serde(default)]
    pub rotation_angle: f64,
    /// Mirroring.
    #[serde(default)]
    pub flip: Flip,
    /// Element is the page background.
    #[serde(default)]
    pub is_background: bool,
    /// Element is the placeholder background of an empty page.
    #[serde(default)]
    pub is_default_background: bool,
    /// Type-specific properties.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// `true` for elements that span the whole page behind everything else.
    pub fn is_page_background(&self) -> bool {
        self.is_background || self.is_default_background
    }

    /// Text payload, if this is a text element.
    pub fn as_text(&self) -> Option<&TextProps> {
        match &self.kind {
            ElementKind::Text(t) => Some(t),
            _ => None,
        }
    }
}

/// Type-tagged element payload.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// Rich text.
    Text(TextProps),
    /// Raster image.
    Image(MediaProps),
    /// Video; never sampled.
    Video(MediaProps),
    /// Filled shape.
    Shape(ShapeProps),
    /// Any element type the checker does not interpret.
    #[serde(other)]
    Other,
}

/// How the text box itself is painted behind the glyphs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackgroundTextMode {
    /// Glyphs sit directly on whatever is behind the element.
    None,
    /// The whole text box is filled.
    Fill,
    /// Each line is highlighted.
    Highlight,
}

/// Text element properties.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextProps {
    /// HTML content; colours come from `<span style="color: ...">` runs.
    #[serde(default)]
    pub content: String,
    /// Font size in editor pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// CSS font weight (400 regular, 700 bold).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<u16>,
    /// Text box painting mode. Only text with an explicit `NONE` mode is checked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_text_mode: Option<BackgroundTextMode>,
}

/// Media resource reference.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    /// Source location, resolved through a [`crate::MediaLoader`].
    pub src: String,
    /// Intrinsic width in pixels.
    pub width: f64,
    /// Intrinsic height in pixels.
    pub height: f64,
}

/// Image/video element properties.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaProps {
    /// Backing media.
    pub resource: Resource,
    /// Zoom in percent (`>= 100`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    /// Horizontal focal point in percent of the scaled media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_x: Option<f64>,
    /// Vertical focal point in percent of the scaled media.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focal_y: Option<f64>,
}

/// Shape element properties.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeProps {
    /// Fill pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Pattern>,
}

/// Fill pattern: a flat colour or a gradient.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Pattern {
    /// Flat colour.
    Solid {
        /// Fill colour.
        color: Rgba8,
    },
    /// Linear/radial/conic gradient.
    Gradient {
        /// Gradient kind (`linear`, `radial`, ...).
        #[serde(rename = "type")]
        kind: String,
        /// Colour stops.
        #[serde(default)]
        stops: Vec<GradientStop>,
    },
}

impl Pattern {
    /// Build a flat fill.
    pub fn solid(color: Rgba8) -> Self {
        Self::Solid { color }
    }

    /// The fill colour, when the pattern is flat.
    pub fn solid_color(&self) -> Option<Rgba8> {
        match self {
            Self::Solid { color } => Some(*color),
            Self::Gradient { .. } => None,
        }
    }
}

/// Gradient colour stop.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Stop colour.
    pub color: Rgba8,
    /// Position along the gradient, `0..=1`.
    #[serde(default)]
    pub position: f64,
}

#[cfg(test)]
#[path = "../../tests/unit/story/model.rs"]
mod tests;
