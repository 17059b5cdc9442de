// SVG output for curve-plane demo scenes.
//
// Provides an SVG render surface and a small catalogue of named demos.

use std::fmt::Write as FmtWrite;

use curve_plane::basics::{is_close, is_line_to, is_move_to, is_stop, PointD, VertexSource};
use curve_plane::{Bounds, CurveModel, GraphResult, Plane, PlaneConfig, RenderSurface, Rgba8};

// ============================================================================
// SVG surface
// ============================================================================

/// Render surface that accumulates SVG `<path>` elements.
pub struct SvgSurface {
    width: f64,
    height: f64,
    body: String,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            body: String::new(),
        }
    }

    /// Number of `<path>` elements written so far.
    pub fn element_count(&self) -> usize {
        self.body.matches("<path").count()
    }

    /// Complete SVG document.
    pub fn finish(&self) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             <rect width=\"{w}\" height=\"{h}\" fill=\"#ffffff\"/>\n{body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// Path data (`d` attribute) for a vertex source.
fn path_data(vs: &mut dyn VertexSource) -> String {
    let mut d = String::new();
    let (mut x, mut y) = (0.0, 0.0);
    vs.rewind(0);
    loop {
        let cmd = vs.vertex(&mut x, &mut y);
        if is_stop(cmd) {
            break;
        }
        if is_move_to(cmd) {
            let _ = write!(d, "M{:.2} {:.2}", x, y);
        } else if is_line_to(cmd) {
            let _ = write!(d, "L{:.2} {:.2}", x, y);
        } else if is_close(cmd) {
            d.push('Z');
        }
    }
    d
}

/// `attr="#rrggbb" attr-opacity="a"`
fn paint(attr: &str, c: Rgba8) -> String {
    format!(
        "{attr}=\"#{:02x}{:02x}{:02x}\" {attr}-opacity=\"{:.3}\"",
        c.r,
        c.g,
        c.b,
        c.opacity(),
        attr = attr
    )
}

impl RenderSurface for SvgSurface {
    fn stroke(&mut self, path: &mut dyn VertexSource, color: Rgba8, width: f64) {
        let d = path_data(path);
        if d.is_empty() {
            return;
        }
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill=\"none\" {} stroke-width=\"{}\"/>",
            d,
            paint("stroke", color),
            width
        );
    }

    fn fill(&mut self, region: &mut dyn VertexSource, color: Rgba8) {
        let d = path_data(region);
        if d.is_empty() {
            return;
        }
        let _ = writeln!(
            self.body,
            "<path d=\"{}\" fill-rule=\"evenodd\" {}/>",
            d,
            paint("fill", color)
        );
    }
}

// ============================================================================
// Arguments
// ============================================================================

/// Parse a `--frames` value, which must be at least 1.
pub fn parse_frame_count(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(0) => Err("frame count must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("invalid frame count: {}", value)),
    }
}

// ============================================================================
// Demos
// ============================================================================

pub mod demos {
    use super::*;

    pub fn available_demos() -> &'static [&'static str] {
        &["parabola", "reciprocal", "tangent", "rose", "spiral", "lissajous", "sweep"]
    }

    /// Build the plane for a named demo, or `Ok(None)` if the name is
    /// unknown.
    pub fn build_demo(name: &str, width: f64, height: f64) -> GraphResult<Option<Plane>> {
        let mut plane = Plane::new(&PlaneConfig::new(width, height))?;
        let shade = Rgba8::with_opacity(&Rgba8::BLUE, 48);
        let model = match name {
            "parabola" => CurveModel::explicit_y(|x| 0.25 * x * x - 4.0)
                .stroke(Rgba8::BLUE)
                .fill_below(shade),
            "reciprocal" => CurveModel::explicit_y(|x| 1.0 / x)
                .stroke(Rgba8::RED)
                .fill_above(Rgba8::with_opacity(&Rgba8::RED, 40)),
            "tangent" => CurveModel::explicit_y(f64::tan).stroke(Rgba8::GREEN),
            "rose" => CurveModel::polar(|theta| 8.0 * (3.0 * theta).cos())
                .stroke(Rgba8::RED)
                .fill_above(Rgba8::with_opacity(&Rgba8::RED, 64)),
            "spiral" => CurveModel::polar(|theta| 0.5 * theta)
                .domain_theta(0.0, 6.0 * std::f64::consts::PI)
                .stroke(Rgba8::BLACK),
            "lissajous" => CurveModel::parametric(|t| {
                PointD::new(10.0 * (3.0 * t).sin(), 8.0 * (2.0 * t).sin())
            })
            .domain_t(0.0, std::f64::consts::TAU)
            .t_step(0.005)
            .stroke(Rgba8::BLUE),
            "sweep" => {
                let mut velocity = Bounds::default();
                velocity.end.x = 0.5;
                CurveModel::explicit_y(f64::sin)
                    .domain_x(-4.0, -4.0)
                    .velocity(velocity)
                    .stroke(Rgba8::BLACK)
                    .fill_below(shade)
            }
            _ => return Ok(None),
        };
        plane.add_curve(model);
        Ok(Some(plane))
    }
}

// ============================================================================
// Tests
// ============================================================================
