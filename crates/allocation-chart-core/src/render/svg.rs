use serde::{Deserialize, Serialize};

use crate::chart::{build_chart, AllocationChart, AllocationInput};
use crate::geometry::path::fmt_coord;
use crate::geometry::{Projector, SliceGeometry};
use crate::gradient::GradientDef;
use crate::ChartResult;

/// Decimal places for gradient vector endpoints.
const GRADIENT_PRECISION: usize = 4;

/// Presentation settings for the SVG document. None of these affect the
/// computed geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Extra room left and right of the viewport for the labels
    pub horizontal_margin: f64,
    /// Vertical offset of the percentage line from the label anchor
    pub percentage_dy: f64,
    /// Vertical offset of the amount line from the label anchor
    pub value_dy: f64,
    pub font_family: String,
    pub percentage_font_size: f64,
    pub value_font_size: f64,
    pub text_color: String,
    pub secondary_text_color: String,
    pub connector_color: String,
    pub connector_width: f64,
    /// Radius of the dot drawn where the leader line meets the rim
    pub dot_radius: f64,
    pub show_labels: bool,
    /// Ring color used when there is nothing to chart
    pub placeholder_color: String,
    pub placeholder_text: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            horizontal_margin: 80.0,
            percentage_dy: -6.0,
            value_dy: 8.0,
            font_family: "Inter, sans-serif".into(),
            percentage_font_size: 12.0,
            value_font_size: 10.0,
            text_color: "#111827".into(),
            secondary_text_color: "#6B7280".into(),
            connector_color: "#9CA3AF".into(),
            connector_width: 1.0,
            dot_radius: 2.5,
            show_labels: true,
            placeholder_color: "#E5E7EB".into(),
            placeholder_text: Some("No allocation data".into()),
        }
    }
}

/// Render a computed chart as a standalone SVG document.
pub fn render_svg(chart: &AllocationChart, options: &RenderOptions) -> String {
    let config = &chart.config;
    let p = config.precision;
    let size = config.svg_size;
    let margin = options.horizontal_margin.max(0.0);

    let mut out = String::with_capacity(1024 + chart.slices.len() * 768);
    line(
        &mut out,
        0,
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="{x} 0 {w} {h}" role="img">"#,
            w = fmt_coord(size + 2.0 * margin, p),
            h = fmt_coord(size, p),
            x = fmt_coord(-margin, p),
        ),
    );

    if chart.is_empty() {
        render_placeholder(&mut out, chart, options);
        line(&mut out, 0, "</svg>");
        return out;
    }

    line(&mut out, 1, "<defs>");
    for def in &chart.gradient_defs {
        render_gradient(&mut out, def);
    }
    line(&mut out, 1, "</defs>");

    line(&mut out, 1, r#"<g class="slices">"#);
    for slice in &chart.slices {
        let d = &slice.path;
        line(
            &mut out,
            2,
            format!(
                r#"<path d="{d}" fill="{}" data-id="{}"/>"#,
                escape(&slice.datum.color),
                escape(&slice.datum.id)
            ),
        );
        if let Some(def) = chart.gradient_for(&slice.datum.id) {
            line(
                &mut out,
                2,
                format!(r#"<path d="{d}" fill="url(#{})"/>"#, escape(&def.id)),
            );
        }
    }
    line(&mut out, 1, "</g>");

    if options.show_labels {
        line(&mut out, 1, r#"<g class="labels">"#);
        for slice in &chart.slices {
            render_label(&mut out, slice, p, options);
        }
        line(&mut out, 1, "</g>");
    }

    line(&mut out, 0, "</svg>");
    out
}

/// A chart input with an optional `render` block, as one JSON document.
#[derive(Debug, Clone, Deserialize)]
pub struct SvgRequest {
    #[serde(flatten)]
    pub input: AllocationInput,
    #[serde(default)]
    pub render: RenderOptions,
}

impl SvgRequest {
    pub fn to_svg(&self) -> ChartResult<String> {
        render_allocation_svg(&self.input, &self.render)
    }
}

/// Compute the chart for `input` and render it.
pub fn render_allocation_svg(input: &AllocationInput, options: &RenderOptions) -> ChartResult<String> {
    let (chart, _warnings) = build_chart(input)?;
    Ok(render_svg(&chart, options))
}

fn render_gradient(out: &mut String, def: &GradientDef) {
    let g = GRADIENT_PRECISION;
    line(
        out,
        2,
        format!(
            r#"<linearGradient id="{}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
            escape(&def.id),
            fmt_coord(def.x1, g),
            fmt_coord(def.y1, g),
            fmt_coord(def.x2, g),
            fmt_coord(def.y2, g),
        ),
    );
    for stop in &def.stops {
        line(
            out,
            3,
            format!(
                r#"<stop offset="{}%" stop-color="{}" stop-opacity="{}"/>"#,
                stop.offset,
                escape(&stop.color),
                stop.opacity
            ),
        );
    }
    line(out, 2, "</linearGradient>");
}

fn render_label(out: &mut String, slice: &SliceGeometry, p: usize, options: &RenderOptions) {
    let c = &slice.connector;
    line(
        out,
        2,
        format!(
            r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            c.polyline_points(p),
            escape(&options.connector_color),
            options.connector_width
        ),
    );
    line(
        out,
        2,
        format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            fmt_coord(c.start_x, p),
            fmt_coord(c.start_y, p),
            options.dot_radius,
            escape(&slice.datum.color)
        ),
    );

    let x = fmt_coord(c.label_x, p);
    let anchor = c.text_anchor.as_str();
    let font = escape(&options.font_family);
    line(
        out,
        2,
        format!(
            r#"<text x="{x}" y="{}" text-anchor="{anchor}" font-family="{font}" font-size="{}" font-weight="600" fill="{}">{}</text>"#,
            fmt_coord(c.label_y + options.percentage_dy, p),
            options.percentage_font_size,
            escape(&options.text_color),
            escape(&slice.datum.percentage)
        ),
    );
    line(
        out,
        2,
        format!(
            r#"<text x="{x}" y="{}" text-anchor="{anchor}" font-family="{font}" font-size="{}" fill="{}">{}</text>"#,
            fmt_coord(c.label_y + options.value_dy, p),
            options.value_font_size,
            escape(&options.secondary_text_color),
            escape(&slice.datum.display_value)
        ),
    );
}

fn render_placeholder(out: &mut String, chart: &AllocationChart, options: &RenderOptions) {
    let config = &chart.config;
    let p = config.precision;
    let center = Projector::new(config.center()).center();
    let thickness = config.outer_radius - config.inner_radius();
    let ring_radius = config.inner_radius() + thickness / 2.0;

    line(
        out,
        1,
        format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="none" stroke="{}" stroke-width="{}"/>"#,
            fmt_coord(center.x, p),
            fmt_coord(center.y, p),
            fmt_coord(ring_radius, p),
            escape(&options.placeholder_color),
            fmt_coord(thickness, p)
        ),
    );
    if let Some(text) = &options.placeholder_text {
        line(
            out,
            1,
            format!(
                r#"<text x="{}" y="{}" text-anchor="middle" dominant-baseline="middle" font-family="{}" font-size="{}" fill="{}">{}</text>"#,
                fmt_coord(center.x, p),
                fmt_coord(center.y, p),
                escape(&options.font_family),
                options.value_font_size,
                escape(&options.secondary_text_color),
                escape(text)
            ),
        );
    }
}

fn line(out: &mut String, depth: usize, content: impl AsRef<str>) {
    for _ in 0..depth {
        out.push_str("  ");
    }
    out.push_str(content.as_ref());
    out.push('\n');
}

/// Escape text for use in XML content and double-quoted attributes.
fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
