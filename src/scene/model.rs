use crate::foundation::core::{Canvas, Fps, FrameIndex, Point, Rgb8, Vec2};

/// Everything visible (and warming up) at one frame of the composition.
///
/// This is the boundary handed to a renderer: layers are listed bottom to top and every value is
/// already evaluated for the frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameScene {
    /// Composition identifier.
    pub composition: String,
    /// Output canvas.
    pub canvas: Canvas,
    /// Composition frame rate.
    pub fps: Fps,
    /// Frame this scene was evaluated for.
    pub frame: FrameIndex,
    /// Visible layers in z-order.
    pub layers: Vec<Layer>,
    /// Layers inside their premount window: not drawn yet, but a renderer may prepare them.
    pub premounted: Vec<String>,
}

/// A group of elements sharing opacity and a scale about the canvas centre.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Layer {
    /// Component name.
    pub name: String,
    /// Group opacity.
    pub opacity: f64,
    /// Uniform scale about the canvas centre.
    pub scale: f64,
    /// Elements in draw order.
    pub elements: Vec<Element>,
}

impl Layer {
    /// Fully opaque, unscaled layer.
    pub fn new(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            opacity: 1.0,
            scale: 1.0,
            elements,
        }
    }

    /// Set the group opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Set the scale about the canvas centre.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }
}

/// Drawable primitive.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Element {
    /// Covers the whole canvas.
    Fill {
        /// Fill paint.
        paint: Paint,
    },
    /// Filled circle.
    Circle {
        /// Centre in scene units.
        center: Point,
        /// Radius in scene units.
        radius: f64,
        /// Fill colour.
        color: Rgb8,
        /// Element opacity.
        opacity: f64,
        /// Optional soft halo.
        glow: Option<Glow>,
    },
    /// Stroked straight line.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Stroke colour.
        color: Rgb8,
        /// Stroke width.
        width: f64,
        /// Element opacity.
        opacity: f64,
        /// Dash pattern used for draw-in animation.
        dash: Option<Dash>,
    },
    /// Single line of styled text.
    Text(TextBlock),
}

/// Full-canvas paint.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    /// Uniform colour.
    Solid {
        /// Colour.
        color: Rgb8,
    },
    /// Elliptical gradient fitted to the canvas.
    Radial(RadialGradient),
}

/// Radial gradient in canvas-relative coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RadialGradient {
    /// Centre as a fraction of width/height.
    pub center: Vec2,
    /// Radius as a fraction of the canvas bounding box.
    pub radius: f64,
    /// Colour stops sorted by offset.
    pub stops: Vec<GradientStop>,
}

/// One gradient stop.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct GradientStop {
    /// Position along the radius in `[0, 1]`.
    pub offset: f64,
    /// Stop colour.
    pub color: Rgb8,
    /// Stop opacity.
    pub opacity: f64,
}

/// Blurred copy drawn underneath an element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Glow {
    /// Blur radius in scene units (roughly two standard deviations).
    pub blur: f64,
    /// Glow colour.
    pub color: Rgb8,
    /// Glow opacity.
    pub opacity: f64,
}

/// Stroke dash pattern.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Dash {
    /// Dash and gap length.
    pub array: f64,
    /// Offset into the pattern.
    pub offset: f64,
}

/// Font selection for a text block.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Font {
    /// Preferred family name.
    pub family: String,
    /// Generic fallback family (`monospace`, `sans-serif`).
    pub fallback: String,
    /// Size in scene units.
    pub size: f64,
    /// CSS weight.
    pub weight: u16,
}

/// Horizontally centred single-line text.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextBlock {
    /// Centre of the line box.
    pub anchor: Point,
    /// Extra vertical offset applied after layout.
    pub offset_y: f64,
    /// Font selection.
    pub font: Font,
    /// Extra spacing between glyphs.
    pub letter_spacing: f64,
    /// Block opacity.
    pub opacity: f64,
    /// Styled runs in reading order.
    pub spans: Vec<TextSpan>,
    /// Glow shadows, drawn bottom to top.
    pub shadows: Vec<Glow>,
}

/// Run of text with uniform colour.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TextSpan {
    /// Run contents; whitespace is preserved.
    pub text: String,
    /// Run colour.
    pub color: Rgb8,
    /// Run opacity.
    pub opacity: f64,
}

impl TextSpan {
    /// Fully opaque span.
    pub fn new(text: impl Into<String>, color: Rgb8) -> Self {
        Self {
            text: text.into(),
            color,
            opacity: 1.0,
        }
    }
}
