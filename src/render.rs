//! PNG rendering of the phase diagram on `plotters`.
//!
//! The figure mirrors a filled-contour plot: the entanglement field is
//! quantised into a fixed number of levels, coloured through a resampled
//! linear colormap, and overlaid with the analytic threshold, a hatched
//! separable region, regime labels, a colour bar and a legend.

use std::path::Path;
use std::process::Command;

use log::{debug, info, warn};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::{PlotStyle, Rgb};
use crate::error::{render_err, Result};
use crate::grid::Field2D;
use crate::phase::PhaseDiagram;

// ─────────────────────────────────────────────────────────────────────────────
// Colour handling
// ─────────────────────────────────────────────────────────────────────────────

/// Piecewise-linear colormap through evenly spaced stops, resampled to a
/// fixed number of discrete colours.
#[derive(Debug, Clone)]
pub struct Colormap {
    stops: Vec<Rgb>,
    size: usize,
}

impl Colormap {
    pub fn new(stops: &[Rgb], size: usize) -> Self {
        debug_assert!(stops.len() >= 2 && size >= 2);
        Self {
            stops: stops.to_vec(),
            size,
        }
    }

    /// Colour for `t` in [0, 1]. Out-of-range values are clamped.
    pub fn sample(&self, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        // Snap to one of `size` discrete entries first
        let idx = ((t * self.size as f64) as usize).min(self.size - 1);
        let t = idx as f64 / (self.size - 1) as f64;

        let segments = self.stops.len() - 1;
        let pos = t * segments as f64;
        let seg = (pos as usize).min(segments - 1);
        let frac = pos - seg as f64;
        lerp_rgb(self.stops[seg], self.stops[seg + 1], frac)
    }
}

fn lerp_rgb(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let ch = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * t).round() as u8;
    (ch(a.0, b.0), ch(a.1, b.1), ch(a.2, b.2))
}

fn rgb(c: Rgb) -> RGBColor {
    RGBColor(c.0, c.1, c.2)
}

/// Evenly spaced contour bands between a low and a high value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourLevels {
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

impl ContourLevels {
    /// Bands covering the full range of `field`.
    pub fn spanning(field: &Field2D, count: usize) -> Self {
        let lo = field.min().min(0.0);
        let mut hi = field.max();
        if hi.is_nan() || hi <= lo {
            hi = lo + 1.0;
        }
        Self { lo, hi, count }
    }

    pub fn width(&self) -> f64 {
        (self.hi - self.lo) / self.count as f64
    }

    /// Band index of `value`, clamped to `0..count`.
    pub fn band(&self, value: f64) -> usize {
        let k = ((value - self.lo) / self.width()).floor();
        if k.is_nan() || k < 0.0 {
            0
        } else {
            (k as usize).min(self.count - 1)
        }
    }

    /// Position of band `k` on the colormap, 0 for the lowest, 1 for the highest.
    pub fn normalized(&self, k: usize) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        k as f64 / (self.count - 1) as f64
    }

    /// Lower edge of band `k`.
    pub fn edge(&self, k: usize) -> f64 {
        self.lo + k as f64 * self.width()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Round step giving at most `max_ticks` ticks over `span`.
pub fn nice_step(span: f64, max_ticks: usize) -> f64 {
    let raw = span / (max_ticks.max(2) - 1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    for mult in [1.0, 2.0, 2.5, 5.0, 10.0] {
        if mult * mag >= raw - 1e-12 {
            return mult * mag;
        }
    }
    10.0 * mag
}

/// Tick positions from `lo` to `hi` inclusive on multiples of `step`.
pub fn ticks(lo: f64, hi: f64, step: f64) -> Vec<f64> {
    let first = (lo / step).ceil() as i64;
    let last = (hi / step + 1e-9).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Split the segment `from → to` into dashes of length `dash` separated by `gap`.
pub fn dash_segments(
    from: (f64, f64),
    to: (f64, f64),
    dash: f64,
    gap: f64,
) -> Vec<[(f64, f64); 2]> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 {
        return Vec::new();
    }
    let (ux, uy) = (dx / len, dy / len);
    let mut out = Vec::new();
    let mut s = 0.0;
    while s < len {
        let e = (s + dash).min(len);
        out.push([
            (from.0 + ux * s, from.1 + uy * s),
            (from.0 + ux * e, from.1 + uy * e),
        ]);
        s += dash + gap;
    }
    out
}

/// Hatch lines (`///`) filling the region `y_lo ≤ y ≤ boundary(x)`.
///
/// `aspect` is data-y per data-x that makes the lines appear at 45° on
/// screen, `spacing` is the horizontal distance between lines in data units.
/// Each returned polyline is one contiguous run inside the region.
pub fn hatch_segments(
    boundary: impl Fn(f64) -> f64,
    x_range: (f64, f64),
    y_range: (f64, f64),
    aspect: f64,
    spacing: f64,
) -> Vec<Vec<(f64, f64)>> {
    const STEPS: usize = 200;
    let (x0, x1) = x_range;
    let (y0, y1) = y_range;
    let dy = (y1 - y0) / STEPS as f64;
    let run_x = (y1 - y0) / aspect;

    let mut lines = Vec::new();
    let mut c = x0 - run_x;
    while c <= x1 {
        let mut current: Vec<(f64, f64)> = Vec::new();
        for i in 0..=STEPS {
            let y = y0 + dy * i as f64;
            let x = c + (y - y0) / aspect;
            let inside = x >= x0 && x <= x1 && y <= boundary(x);
            if inside {
                current.push((x, y));
            } else if current.len() >= 2 {
                lines.push(std::mem::take(&mut current));
            } else {
                current.clear();
            }
        }
        if current.len() >= 2 {
            lines.push(current);
        }
        c += spacing;
    }
    lines
}

// ─────────────────────────────────────────────────────────────────────────────
// Figure
// ─────────────────────────────────────────────────────────────────────────────

/// Draw the diagram and write it to `path` as PNG.
///
/// Failing to create or encode the file is fatal and reported as
/// [`crate::DiagramError::Render`].
pub fn render(diagram: &PhaseDiagram, style: &PlotStyle, path: &Path) -> Result<()> {
    let (width, height) = style.pixel_size();
    info!("rendering {}×{} px to {}", width, height, path.display());

    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let title_px = style.pt_to_px(style.title_pt);
    let label_px = style.pt_to_px(style.label_pt);
    let tick_px = style.pt_to_px(style.label_pt * 0.85);
    let pad = style.pt_to_px(8.0);

    // Title band on top, colour bar strip on the right
    let title_h = (title_px as f64 * 1.3) as u32 * style.title.len() as u32 + pad;
    let (title_area, body) = root.split_vertically(title_h);
    let title_font = FontDesc::new(FontFamily::SansSerif, title_px as f64, FontStyle::Normal)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    for (i, line) in style.title.iter().enumerate() {
        let y = pad as i32 + i as i32 * (title_px as f64 * 1.3) as i32;
        title_area
            .draw_text(line, &title_font, (width as i32 / 2, y))
            .map_err(render_err)?;
    }

    let bar_w = (width as f64 * 0.14) as u32;
    let (plot_area, bar_area) = body.split_horizontally(width - bar_w);

    let (x0, x1) = style.x_range;
    let (y0, y1) = style.y_range;
    let mut chart = ChartBuilder::on(&plot_area)
        .margin(pad)
        .x_label_area_size(label_px * 3)
        .y_label_area_size(label_px * 4)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(render_err)?;
    // Data-y per data-x that looks like 45° on screen
    let (plot_w, plot_h) = chart.plotting_area().dim_in_pixel();
    let x_per_px = (x1 - x0) / plot_w as f64;
    let aspect = ((y1 - y0) / plot_h as f64) / x_per_px;

    let levels = ContourLevels::spanning(&diagram.entanglement, style.levels);
    let cmap = Colormap::new(&style.colormap, style.colormap_size);

    // 1. Heatmap
    let cells = heatmap_cells(
        diagram,
        &levels,
        &cmap,
        style.x_range,
        style.y_range,
    );
    debug!("{} heatmap cells over {} levels", cells.len(), levels.count);
    chart
        .draw_series(
            cells
                .into_iter()
                .map(|(a, b, c)| Rectangle::new([a, b], rgb(c).filled())),
        )
        .map_err(render_err)?;

    // 2. Shaded separable region with hatching
    let visible: Vec<(f64, f64)> = diagram
        .threshold_curve()
        .filter(|&(t, _)| t >= x0 && t <= x1)
        .map(|(t, rc)| (t, rc.clamp(y0, y1)))
        .collect();
    if let (Some(&first), Some(&last)) = (visible.first(), visible.last()) {
        let mut band = Vec::with_capacity(visible.len() + 2);
        band.push((first.0, y0));
        band.extend(visible.iter().copied());
        band.push((last.0, y0));
        let shade = rgb(style.shade_color).mix(style.shade_alpha);
        chart
            .draw_series(std::iter::once(Polygon::new(band, shade.filled())))
            .map_err(render_err)?;

        let spacing = x_per_px * style.pt_to_px(6.0) as f64;
        let hatch_stroke = rgb(style.shade_color)
            .mix(0.35)
            .stroke_width(style.pt_to_px(0.5));
        let hatch = hatch_segments(
            |t| diagram.threshold_at(t),
            (first.0, last.0),
            (y0, y1),
            aspect,
            spacing,
        );
        chart
            .draw_series(
                hatch
                    .into_iter()
                    .map(|line| PathElement::new(line, hatch_stroke)),
            )
            .map_err(render_err)?;
    }

    // 3. Grid, axes, labels
    let x_step = nice_step(x1 - x0, 7);
    let y_step = nice_step(y1 - y0, 9);
    let x_ticks = ticks(x0, x1, x_step);
    let y_ticks = ticks(y0, y1, y_step);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(x_ticks.len())
        .y_labels(y_ticks.len())
        .x_label_formatter(&|x| format!("{:.1}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .x_desc(style.x_label.as_str())
        .y_desc(style.y_label.as_str())
        .axis_desc_style(("sans-serif", label_px))
        .label_style(("sans-serif", tick_px))
        .draw()
        .map_err(render_err)?;

    let grid_color = BLACK.mix(style.grid_alpha);
    let dash = x_step / 12.0;
    let mut grid_lines = Vec::new();
    for &x in &x_ticks {
        let (len, gap) = (dash * aspect, dash * aspect * 0.6);
        grid_lines.extend(dash_segments((x, y0), (x, y1), len, gap));
    }
    for &y in &y_ticks {
        grid_lines.extend(dash_segments((x0, y), (x1, y), dash, dash * 0.6));
    }
    let grid_stroke = grid_color.stroke_width(2);
    chart
        .draw_series(
            grid_lines
                .into_iter()
                .map(|seg| PathElement::new(seg.to_vec(), grid_stroke)),
        )
        .map_err(render_err)?;

    // 4. Analytic threshold
    let line_px = style.pt_to_px(style.threshold_width_pt);
    let line_style = rgb(style.threshold_color).stroke_width(line_px);
    let glyph = legend_glyph_len(label_px);
    chart
        .draw_series(LineSeries::new(visible.iter().copied(), line_style))
        .map_err(render_err)?
        .label(style.threshold_label.as_str())
        .legend(move |(x, y)| {
            PathElement::new(vec![(x, y), (x + glyph, y)], line_style)
        });

    // 5. Regime annotations
    for note in &style.annotations {
        let px = style.pt_to_px(note.font_pt);
        let font = FontDesc::new(FontFamily::SansSerif, px as f64, FontStyle::Bold)
            .color(&rgb(note.color))
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        let line_h = (px as f64 * 1.2) as i32;
        let n = note.lines.len() as i32;
        chart
            .draw_series(note.lines.iter().enumerate().map(|(i, text)| {
                let dy = -(n - 1 - i as i32) * line_h;
                EmptyElement::at((note.x, note.y))
                    + Text::new(text.clone(), (0, dy), font.clone())
            }))
            .map_err(render_err)?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .margin(pad)
        .legend_area_size(legend_area_px(label_px))
        .label_font(("sans-serif", label_px))
        .background_style(WHITE.filled())
        .border_style(BLACK.stroke_width(1))
        .draw()
        .map_err(render_err)?;

    let fonts = (label_px, tick_px);
    draw_colorbar(&bar_area, style, &levels, &cmap, fonts, pad)?;

    root.present().map_err(render_err)?;
    Ok(())
}

/// Length of the legend line sample, two label heights.
fn legend_glyph_len(label_px: u32) -> i32 {
    (label_px * 2) as i32
}

/// Width reserved in the legend box before the label text starts.
fn legend_area_px(label_px: u32) -> u32 {
    legend_glyph_len(label_px) as u32 + label_px / 2
}

/// One filled rectangle per mesh cell inside the view, coloured by the band
/// of the mean of its four corners.
fn heatmap_cells(
    diagram: &PhaseDiagram,
    levels: &ContourLevels,
    cmap: &Colormap,
    x_range: (f64, f64),
    y_range: (f64, f64),
) -> Vec<((f64, f64), (f64, f64), Rgb)> {
    let t = diagram.temperatures();
    let r = diagram.squeezings();
    let e = &diagram.entanglement;
    let mut cells = Vec::new();
    for row in 0..r.len().saturating_sub(1) {
        let (ya, yb) = (r[row].max(y_range.0), r[row + 1].min(y_range.1));
        if ya >= yb {
            continue;
        }
        for col in 0..t.len().saturating_sub(1) {
            let (xa, xb) = (t[col].max(x_range.0), t[col + 1].min(x_range.1));
            if xa >= xb {
                continue;
            }
            let lower = e.get(row, col) + e.get(row, col + 1);
            let upper = e.get(row + 1, col) + e.get(row + 1, col + 1);
            let mean = 0.25 * (lower + upper);
            let color = cmap.sample(levels.normalized(levels.band(mean)));
            cells.push(((xa, ya), (xb, yb), color));
        }
    }
    cells
}

fn draw_colorbar(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    style: &PlotStyle,
    levels: &ContourLevels,
    cmap: &Colormap,
    (label_px, tick_px): (u32, u32),
    pad: u32,
) -> Result<()> {
    let (w, _) = area.dim_in_pixel();
    let mut bar = ChartBuilder::on(area)
        .margin_top(pad)
        .margin_bottom(label_px * 3 + pad)
        .margin_left(pad)
        .margin_right(pad)
        .right_y_label_area_size(w.saturating_sub(pad * 2 + w / 5))
        .build_cartesian_2d(0.0..1.0, levels.lo..levels.hi)
        .map_err(render_err)?;

    bar.draw_series((0..levels.count).map(|k| {
        let c = cmap.sample(levels.normalized(k));
        Rectangle::new(
            [(0.0, levels.edge(k)), (1.0, levels.edge(k + 1))],
            rgb(c).filled(),
        )
    }))
    .map_err(render_err)?;

    bar.configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(8)
        .y_label_formatter(&|v| format!("{:.2}", v))
        .y_desc(style.colorbar_label.as_str())
        .axis_desc_style(("sans-serif", label_px))
        .label_style(("sans-serif", tick_px))
        .draw()
        .map_err(render_err)?;
    Ok(())
}

/// Open a rendered image in the platform viewer. Never fatal.
pub fn show_image(path: &Path) {
    let mut cmd = if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", ""]);
        c
    } else {
        Command::new("xdg-open")
    };
    match cmd.arg(path).spawn() {
        Ok(_) => info!("opened {} in the system viewer", path.display()),
        Err(e) => warn!("could not open {}: {}", path.display(), e),
    }
}
