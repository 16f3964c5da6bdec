use std::fmt::Write as _;

use crate::foundation::core::{Canvas, Point, Rgb8};
use crate::foundation::error::{IntroError, IntroResult};
use crate::scene::model::{
    Dash, Element, FrameScene, Glow, Layer, Paint, RadialGradient, TextBlock,
};

/// Largest output dimension accepted by [`output_size`].
pub const MAX_DIM: u32 = 16_384;

/// Pixel size of `canvas` rendered at `scale`.
pub fn output_size(canvas: Canvas, scale: f64) -> IntroResult<(u32, u32)> {
    if !scale.is_finite() || scale <= 0.0 {
        return Err(IntroError::validation("render scale must be finite and > 0"));
    }
    let px = |v: u32| (f64::from(v) * scale).round().max(1.0);
    let (w, h) = (px(canvas.width), px(canvas.height));
    if w > f64::from(MAX_DIM) || h > f64::from(MAX_DIM) {
        return Err(IntroError::validation(format!(
            "output size too large: {w}x{h} (max {MAX_DIM}x{MAX_DIM})"
        )));
    }
    Ok((w as u32, h as u32))
}

/// Serialize a frame scene to a standalone SVG document.
///
/// The document keeps the canvas as its `viewBox` and declares a pixel size of the canvas times
/// `scale`, so the rasterizer only has to honour the intrinsic size.
pub fn scene_to_svg(scene: &FrameScene, scale: f64) -> IntroResult<String> {
    let (w, h) = output_size(scene.canvas, scale)?;
    let mut out = SvgWriter {
        buf: String::with_capacity(16 * 1024),
        canvas: scene.canvas,
        next_id: 0,
    };
    out.document(scene, w, h)
        .map_err(|_| IntroError::render("failed to format svg document"))?;
    Ok(out.buf)
}

struct SvgWriter {
    buf: String,
    canvas: Canvas,
    next_id: u32,
}

type FmtResult = std::fmt::Result;

impl SvgWriter {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }

    fn document(&mut self, scene: &FrameScene, w: u32, h: u32) -> FmtResult {
        write!(
            self.buf,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {} {}">"#,
            self.canvas.width, self.canvas.height
        )?;
        for layer in &scene.layers {
            self.layer(layer)?;
        }
        self.buf.push_str("</svg>");
        Ok(())
    }

    fn layer(&mut self, layer: &Layer) -> FmtResult {
        if layer.opacity <= 0.0 || layer.scale <= 0.0 {
            return Ok(());
        }
        write!(self.buf, r#"<g data-layer="{}""#, escape(&layer.name))?;
        if layer.opacity < 1.0 {
            write!(self.buf, r#" opacity="{}""#, num(layer.opacity))?;
        }
        if layer.scale != 1.0 {
            let c = self.canvas.center();
            write!(
                self.buf,
                r#" transform="translate({} {}) scale({}) translate({} {})""#,
                num(c.x),
                num(c.y),
                num(layer.scale),
                num(-c.x),
                num(-c.y)
            )?;
        }
        self.buf.push('>');
        for el in &layer.elements {
            self.element(el)?;
        }
        self.buf.push_str("</g>");
        Ok(())
    }

    fn element(&mut self, el: &Element) -> FmtResult {
        match el {
            Element::Fill { paint } => self.fill(paint),
            Element::Circle {
                center,
                radius,
                color,
                opacity,
                glow,
            } => {
                if *radius <= 0.0 || *opacity <= 0.0 {
                    return Ok(());
                }
                if let Some(glow) = glow {
                    self.circle_glow(*center, *radius, *opacity, glow)?;
                }
                write!(
                    self.buf,
                    r#"<circle cx="{}" cy="{}" r="{}" fill="{}" opacity="{}"/>"#,
                    num(center.x),
                    num(center.y),
                    num(*radius),
                    color.to_hex(),
                    num(*opacity)
                )
            }
            Element::Line {
                from,
                to,
                color,
                width,
                opacity,
                dash,
            } => self.line(*from, *to, *color, *width, *opacity, dash.as_ref()),
            Element::Text(text) => self.text(text),
        }
    }

    fn fill(&mut self, paint: &Paint) -> FmtResult {
        let fill = match paint {
            Paint::Solid { color } => color.to_hex(),
            Paint::Radial(g) => {
                let id = self.id("g");
                self.radial_gradient(&id, g)?;
                format!("url(#{id})")
            }
        };
        write!(
            self.buf,
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{fill}"/>"#,
            self.canvas.width, self.canvas.height
        )
    }

    fn radial_gradient(&mut self, id: &str, g: &RadialGradient) -> FmtResult {
        write!(
            self.buf,
            r#"<defs><radialGradient id="{id}" gradientUnits="objectBoundingBox" cx="{}" cy="{}" r="{}">"#,
            num(g.center.x),
            num(g.center.y),
            num(g.radius)
        )?;
        for stop in &g.stops {
            write!(
                self.buf,
                r#"<stop offset="{}" stop-color="{}" stop-opacity="{}"/>"#,
                num(stop.offset.clamp(0.0, 1.0)),
                stop.color.to_hex(),
                num(stop.opacity.clamp(0.0, 1.0))
            )?;
        }
        self.buf.push_str("</radialGradient></defs>");
        Ok(())
    }

    /// Gaussian blur filter in user space covering `region`; returns the filter id.
    fn blur_filter(&mut self, blur: f64, region: Option<[f64; 4]>) -> Result<String, std::fmt::Error> {
        let id = self.id("f");
        let sigma = blur / 2.0;
        match region {
            Some([x, y, w, h]) => write!(
                self.buf,
                r#"<defs><filter id="{id}" filterUnits="userSpaceOnUse" x="{}" y="{}" width="{}" height="{}">"#,
                num(x),
                num(y),
                num(w),
                num(h)
            )?,
            None => write!(
                self.buf,
                r#"<defs><filter id="{id}" x="-50%" y="-150%" width="200%" height="400%">"#
            )?,
        }
        write!(
            self.buf,
            r#"<feGaussianBlur stdDeviation="{}"/></filter></defs>"#,
            num(sigma)
        )?;
        Ok(id)
    }

    fn circle_glow(&mut self, center: Point, radius: f64, opacity: f64, glow: &Glow) -> FmtResult {
        if glow.blur <= 0.0 || glow.opacity <= 0.0 {
            return Ok(());
        }
        let reach = radius + glow.blur * 1.5;
        let id = self.blur_filter(
            glow.blur,
            Some([center.x - reach, center.y - reach, reach * 2.0, reach * 2.0]),
        )?;
        write!(
            self.buf,
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" opacity="{}" filter="url(#{id})"/>"#,
            num(center.x),
            num(center.y),
            num(radius),
            glow.color.to_hex(),
            num(glow.opacity * opacity)
        )
    }

    fn line(
        &mut self,
        from: Point,
        to: Point,
        color: Rgb8,
        width: f64,
        opacity: f64,
        dash: Option<&Dash>,
    ) -> FmtResult {
        if opacity <= 0.0 || width <= 0.0 {
            return Ok(());
        }
        write!(
            self.buf,
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}" opacity="{}""#,
            num(from.x),
            num(from.y),
            num(to.x),
            num(to.y),
            color.to_hex(),
            num(width),
            num(opacity)
        )?;
        if let Some(dash) = dash
            && dash.array > 0.0
        {
            write!(
                self.buf,
                r#" stroke-dasharray="{}" stroke-dashoffset="{}""#,
                num(dash.array),
                num(dash.offset)
            )?;
        }
        self.buf.push_str("/>");
        Ok(())
    }

    fn text(&mut self, text: &TextBlock) -> FmtResult {
        if text.opacity <= 0.0 || text.spans.iter().all(|s| s.text.is_empty()) {
            return Ok(());
        }
        write!(self.buf, r#"<g opacity="{}">"#, num(text.opacity))?;
        for shadow in &text.shadows {
            if shadow.blur <= 0.0 || shadow.opacity <= 0.0 {
                continue;
            }
            let id = self.blur_filter(shadow.blur, None)?;
            write!(
                self.buf,
                r#"<g opacity="{}" filter="url(#{id})">"#,
                num(shadow.opacity.clamp(0.0, 1.0))
            )?;
            self.text_run(text, Some(shadow.color))?;
            self.buf.push_str("</g>");
        }
        self.text_run(text, None)?;
        self.buf.push_str("</g>");
        Ok(())
    }

    fn text_run(&mut self, text: &TextBlock, tint: Option<Rgb8>) -> FmtResult {
        write!(
            self.buf,
            r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="central" font-family="'{}', {}" font-size="{}" font-weight="{}" letter-spacing="{}" xml:space="preserve">"#,
            num(text.anchor.x),
            num(text.anchor.y + text.offset_y),
            escape(&text.font.family),
            escape(&text.font.fallback),
            num(text.font.size),
            text.font.weight,
            num(text.letter_spacing)
        )?;
        for span in &text.spans {
            if span.text.is_empty() {
                continue;
            }
            write!(
                self.buf,
                r#"<tspan fill="{}" fill-opacity="{}">{}</tspan>"#,
                tint.unwrap_or(span.color).to_hex(),
                num(span.opacity.clamp(0.0, 1.0)),
                escape(&span.text)
            )?;
        }
        self.buf.push_str("</text>");
        Ok(())
    }
}

/// Round to 1e-4 so output stays short and stable.
fn num(v: f64) -> f64 {
    let r = (v * 1e4).round() / 1e4;
    if r == 0.0 { 0.0 } else { r }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
