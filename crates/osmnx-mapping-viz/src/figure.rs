//! In-memory figure: drawn graph plus an optional colorbar.
//!
//! A [`Figure`] is a flat list of shapes in pixel space. It serializes to an
//! SVG document and rasterizes to PNG through `usvg`/`resvg`; nothing is
//! written to disk unless [`Figure::save`] is called.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::color::Color;
use crate::colormap::Colormap;
use crate::error::{VizError, VizResult};
use crate::normalize::Normalize;

/// Width reserved to the right of the canvas for the colorbar.
pub const COLORBAR_PANEL_WIDTH: f64 = 120.0;
const COLORBAR_BAR_WIDTH: f64 = 18.0;
const COLORBAR_GRADIENT_STOPS: usize = 16;
const FONT_SIZE: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Polyline {
        points: Vec<(f64, f64)>,
        stroke: Color,
        width: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Color,
    },
}

/// Legend mapping colors back to attribute values.
#[derive(Debug, Clone, PartialEq)]
pub struct Colorbar {
    norm: Normalize,
    colormap: Colormap,
    label: String,
}

impl Colorbar {
    pub fn range(&self) -> (f64, f64) {
        self.norm.range()
    }

    pub fn norm(&self) -> &Normalize {
        &self.norm
    }

    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Clone)]
pub struct Figure {
    canvas_width: f64,
    canvas_height: f64,
    background: Color,
    shapes: Vec<Shape>,
    colorbar: Option<Colorbar>,
}

impl Figure {
    pub fn new(canvas_width: f64, canvas_height: f64, background: Color) -> Self {
        Self {
            canvas_width,
            canvas_height,
            background,
            shapes: Vec::new(),
            colorbar: None,
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// Attaches a vertical colorbar on the right. Replaces any existing one.
    pub fn add_colorbar(&mut self, norm: Normalize, colormap: Colormap, label: impl Into<String>) {
        self.colorbar = Some(Colorbar {
            norm,
            colormap,
            label: label.into(),
        });
    }

    pub fn colorbar(&self) -> Option<&Colorbar> {
        self.colorbar.as_ref()
    }

    /// Total size in pixels, colorbar panel included.
    pub fn size(&self) -> (f64, f64) {
        let extra = if self.colorbar.is_some() {
            COLORBAR_PANEL_WIDTH
        } else {
            0.0
        };
        (self.canvas_width + extra, self.canvas_height)
    }

    pub fn to_svg(&self) -> String {
        let (width, height) = self.size();
        let mut out = String::new();
        let _ = write!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_num(width),
            h = fmt_num(height),
        );
        let _ = write!(
            out,
            r#"<rect x="0" y="0" width="{}" height="{}" {}/>"#,
            fmt_num(width),
            fmt_num(height),
            paint("fill", self.background)
        );

        out.push_str(r#"<g class="graph">"#);
        for shape in &self.shapes {
            match shape {
                Shape::Polyline {
                    points,
                    stroke,
                    width,
                } => {
                    out.push_str(r#"<polyline points=""#);
                    for (i, (x, y)) in points.iter().enumerate() {
                        if i > 0 {
                            out.push(' ');
                        }
                        let _ = write!(out, "{},{}", fmt_num(*x), fmt_num(*y));
                    }
                    let _ = write!(
                        out,
                        r#"" fill="none" {} stroke-width="{}" stroke-linecap="round"/>"#,
                        paint("stroke", *stroke),
                        fmt_num(*width)
                    );
                }
                Shape::Circle { cx, cy, r, fill } => {
                    let _ = write!(
                        out,
                        r#"<circle cx="{}" cy="{}" r="{}" {}/>"#,
                        fmt_num(*cx),
                        fmt_num(*cy),
                        fmt_num(*r),
                        paint("fill", *fill)
                    );
                }
            }
        }
        out.push_str("</g>");

        if let Some(colorbar) = &self.colorbar {
            self.write_colorbar(&mut out, colorbar);
        }
        out.push_str("</svg>");
        out
    }

    fn write_colorbar(&self, out: &mut String, colorbar: &Colorbar) {
        let text_color = if self.background.luminance() < 0.5 {
            Color::WHITE
        } else {
            Color::BLACK
        };
        let margin = (self.canvas_height * 0.1).max(FONT_SIZE);
        let x = self.canvas_width + 16.0;
        let top = margin;
        let bottom = self.canvas_height - margin;
        let bar_height = (bottom - top).max(1.0);

        out.push_str(r#"<g class="colorbar"><defs><linearGradient id="colorbar-gradient" x1="0" y1="1" x2="0" y2="0">"#);
        for (offset, color) in colorbar.colormap.gradient(COLORBAR_GRADIENT_STOPS) {
            let _ = write!(
                out,
                r#"<stop offset="{}" stop-color="{}"/>"#,
                fmt_num(offset),
                color_hex(color)
            );
        }
        out.push_str("</linearGradient></defs>");
        let _ = write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="url(#colorbar-gradient)" {} stroke-width="0.8"/>"#,
            fmt_num(x),
            fmt_num(top),
            fmt_num(COLORBAR_BAR_WIDTH),
            fmt_num(bar_height),
            paint("stroke", text_color)
        );

        let (vmin, vmax) = colorbar.range();
        for (fraction, value) in [
            (0.0, vmin),
            (0.5, vmin + (vmax - vmin) / 2.0),
            (1.0, vmax),
        ] {
            let y = bottom - fraction * bar_height;
            let tick_x = x + COLORBAR_BAR_WIDTH;
            let _ = write!(
                out,
                r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" {} stroke-width="0.8"/>"#,
                fmt_num(tick_x),
                fmt_num(tick_x + 4.0),
                paint("stroke", text_color),
                y = fmt_num(y)
            );
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-family="sans-serif" font-size="{}" {}>{}</text>"#,
                fmt_num(tick_x + 7.0),
                fmt_num(y + FONT_SIZE / 3.0),
                fmt_num(FONT_SIZE),
                paint("fill", text_color),
                escape_xml(&format_tick(value))
            );
        }

        let label_x = self.canvas_width + COLORBAR_PANEL_WIDTH - FONT_SIZE;
        let label_y = top + bar_height / 2.0;
        let _ = write!(
            out,
            r#"<text transform="translate({},{}) rotate(-90)" text-anchor="middle" font-family="sans-serif" font-size="{}" {}>{}</text>"#,
            fmt_num(label_x),
            fmt_num(label_y),
            fmt_num(FONT_SIZE),
            paint("fill", text_color),
            escape_xml(&colorbar.label)
        );
        out.push_str("</g>");
    }

    /// Rasterizes the SVG form at `scale` pixels per unit.
    pub fn to_png(&self, scale: f32) -> VizResult<Vec<u8>> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(VizError::InvalidOption(format!(
                "scale must be a positive number, got {scale}"
            )));
        }
        let svg = self.to_svg();
        let mut opt = usvg::Options::default();
        opt.fontdb_mut().load_system_fonts();
        let tree =
            usvg::Tree::from_str(&svg, &opt).map_err(|err| VizError::Raster(err.to_string()))?;

        let size = tree.size();
        let width_px = (size.width() * scale).ceil().max(1.0) as u32;
        let height_px = (size.height() * scale).ceil().max(1.0) as u32;
        let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or_else(|| {
            VizError::Raster(format!("failed to allocate {width_px}x{height_px} pixmap"))
        })?;
        pixmap.fill(self.background.to_tiny_skia());
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );
        debug!(width_px, height_px, "rasterized figure");

        pixmap
            .encode_png()
            .map_err(|err| VizError::Raster(err.to_string()))
    }

    /// Writes SVG or PNG depending on the file extension.
    pub fn save(&self, path: impl AsRef<Path>, scale: f32) -> VizResult<()> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "svg" => fs::write(path, self.to_svg())?,
            "png" => fs::write(path, self.to_png(scale)?)?,
            other => return Err(VizError::UnsupportedFormat(other.to_string())),
        }
        debug!(path = %path.display(), "saved figure");
        Ok(())
    }
}

fn color_hex(color: Color) -> String {
    Color::rgb(color.r, color.g, color.b).to_hex()
}

/// `name="#rrggbb"` plus a `name-opacity` attribute for translucent colors.
fn paint(name: &str, color: Color) -> String {
    match color.a {
        0 => format!(r#"{name}="none""#),
        0xff => format!(r#"{name}="{}""#, color_hex(color)),
        _ => format!(
            r#"{name}="{}" {name}-opacity="{}""#,
            color_hex(color),
            fmt_num(color.opacity())
        ),
    }
}

/// Fixed 3-decimal output with trailing zeros trimmed.
fn fmt_num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "" | "-0" => "0".to_string(),
        s => s.to_string(),
    }
}

fn format_tick(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else if v.abs() >= 100.0 {
        format!("{v:.1}")
    } else {
        fmt_num(v)
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
