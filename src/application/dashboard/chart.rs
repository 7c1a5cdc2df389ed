//! Inline SVG charts.
//!
//! Every chart shares one viewBox and a plot area inset by fixed margins.
//! Values are plain `f64`; non-finite inputs are drawn as zero.

use std::fmt::Write as _;

use chrono::NaiveDate;

use super::escape;
use crate::domain::money::group_count;

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 320.0;
const LEFT: f64 = 70.0;
const RIGHT: f64 = 20.0;
const TOP: f64 = 40.0;
const BOTTOM: f64 = 60.0;
const TICKS: usize = 5;

/// Line colors for per-bot series, reused cyclically.
const PALETTE: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#17becf",
];

pub const RESERVE_COLOR: &str = "#add8e6";
pub const IN_PLAY_COLOR: &str = "#ffa500";

fn plot_width() -> f64 {
    WIDTH - LEFT - RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - TOP - BOTTOM
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Continuous color scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    /// Red through yellow to green.
    RdYlGn,
    /// Light to dark blue.
    Blues,
}

impl ColorScale {
    fn stops(self) -> &'static [(u8, u8, u8)] {
        match self {
            Self::RdYlGn => &[(215, 48, 39), (254, 224, 139), (26, 152, 80)],
            Self::Blues => &[(198, 219, 239), (8, 81, 156)],
        }
    }

    /// Hex color at `t` in `[0, 1]`.
    #[must_use]
    pub fn at(self, t: f64) -> String {
        let stops = self.stops();
        let t = finite(t).clamp(0.0, 1.0);
        let segments = (stops.len() - 1) as f64;
        let position = t * segments;
        let index = (position.floor() as usize).min(stops.len() - 2);
        let local = position - index as f64;
        let (a, b) = (stops[index], stops[index + 1]);
        let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * local).round() as u8;
        format!("#{:02x}{:02x}{:02x}", mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
    }

    /// Color for `value` relative to the range of `values`.
    #[must_use]
    pub fn for_value(self, value: f64, values: &[f64]) -> String {
        let (min, max) = bounds(values.iter().copied());
        if (max - min).abs() < f64::EPSILON {
            return self.at(match self {
                Self::RdYlGn => 0.5,
                Self::Blues => 1.0,
            });
        }
        self.at((finite(value) - min) / (max - min))
    }
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.map(finite).fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// A linear axis that always includes zero.
#[derive(Debug, Clone, Copy)]
struct Axis {
    min: f64,
    max: f64,
}

impl Axis {
    fn covering(values: impl Iterator<Item = f64>) -> Self {
        let (lo, hi) = bounds(values);
        let min = lo.min(0.0);
        let mut max = hi.max(0.0);
        if (max - min).abs() < f64::EPSILON {
            max = min + 1.0;
        }
        Self { min, max }
    }

    fn span(self) -> f64 {
        self.max - self.min
    }

    /// Vertical pixel position of `value`.
    fn y(self, value: f64) -> f64 {
        TOP + (self.max - finite(value)) / self.span() * plot_height()
    }

    /// Horizontal pixel position of `value`.
    fn x(self, value: f64) -> f64 {
        LEFT + (finite(value) - self.min) / self.span() * plot_width()
    }

    fn ticks(self) -> impl Iterator<Item = f64> {
        let step = self.span() / TICKS as f64;
        (0..=TICKS).map(move |i| self.min + step * i as f64)
    }
}

fn tick_label(value: f64) -> String {
    group_count(value.round() as i64)
}

fn open(out: &mut String, title: &str) {
    write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {WIDTH} {HEIGHT}" class="chart" role="img" aria-label="{t}"><text x="{cx}" y="22" text-anchor="middle" class="chart-title">{t}</text>"#,
        t = escape(title),
        cx = WIDTH / 2.0,
    ).ok();
}

fn close(out: &mut String) {
    out.push_str("</svg>");
}

/// Horizontal grid lines, tick labels and axis titles for a value axis.
fn y_axis(out: &mut String, axis: Axis, title: &str) {
    for tick in axis.ticks() {
        let y = axis.y(tick);
        write!(
            out,
            r#"<line x1="{LEFT}" y1="{y:.1}" x2="{x2}" y2="{y:.1}" class="grid"/><text x="{lx}" y="{ly:.1}" text-anchor="end" class="tick">{label}</text>"#,
            x2 = WIDTH - RIGHT,
            lx = LEFT - 6.0,
            ly = y + 4.0,
            label = tick_label(tick),
        ).ok();
    }
    let zero = axis.y(0.0);
    write!(
        out,
        r#"<line x1="{LEFT}" y1="{zero:.1}" x2="{x2}" y2="{zero:.1}" class="baseline"/><text x="16" y="{my}" text-anchor="middle" transform="rotate(-90 16 {my})" class="axis-title">{t}</text>"#,
        x2 = WIDTH - RIGHT,
        my = TOP + plot_height() / 2.0,
        t = escape(title),
    ).ok();
}

fn x_title(out: &mut String, title: &str) {
    write!(
        out,
        r#"<text x="{cx}" y="{y}" text-anchor="middle" class="axis-title">{t}</text>"#,
        cx = LEFT + plot_width() / 2.0,
        y = HEIGHT - 12.0,
        t = escape(title),
    ).ok();
}

fn category_label(out: &mut String, x: f64, label: &str) {
    write!(
        out,
        r#"<text x="{x:.1}" y="{y}" text-anchor="middle" class="tick">{l}</text>"#,
        y = HEIGHT - BOTTOM + 16.0,
        l = escape(label),
    ).ok();
}

fn legend(out: &mut String, entries: &[(&str, &str)]) {
    for (i, (name, color)) in entries.iter().enumerate() {
        let x = LEFT + 10.0 + i as f64 * 130.0;
        write!(
            out,
            r#"<rect x="{x:.1}" y="30" width="10" height="10" fill="{color}"/><text x="{tx:.1}" y="39" class="legend">{n}</text>"#,
            tx = x + 14.0,
            n = escape(name),
        ).ok();
    }
}

fn bar(out: &mut String, axis: Axis, x: f64, width: f64, value: f64, color: &str, tip: &str) {
    let top = axis.y(value.max(0.0));
    let height = (axis.y(finite(value).min(0.0)) - top).abs();
    write!(
        out,
        r#"<rect x="{x:.1}" y="{top:.1}" width="{width:.1}" height="{height:.1}" fill="{color}"><title>{t}</title></rect>"#,
        t = escape(tip),
    ).ok();
}

/// One bar per category, colored by value on `scale`.
#[must_use]
pub fn bar_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    bars: &[(String, f64)],
    scale: ColorScale,
) -> String {
    let values: Vec<f64> = bars.iter().map(|(_, v)| *v).collect();
    let axis = Axis::covering(values.iter().copied());
    let mut out = String::new();
    open(&mut out, title);
    y_axis(&mut out, axis, y_label);

    let slot = plot_width() / bars.len().max(1) as f64;
    for (i, (label, value)) in bars.iter().enumerate() {
        let x = LEFT + i as f64 * slot;
        let color = scale.for_value(*value, &values);
        let tip = format!("{label}: {}", tick_label(*value));
        bar(&mut out, axis, x + slot * 0.2, slot * 0.6, *value, &color, &tip);
        category_label(&mut out, x + slot / 2.0, label);
    }

    x_title(&mut out, x_label);
    close(&mut out);
    out
}

/// A named series of values for [`grouped_bar_chart`].
#[derive(Debug, Clone, PartialEq)]
pub struct Series<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub values: Vec<f64>,
}

/// Side-by-side bars, one group per category.
#[must_use]
pub fn grouped_bar_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    categories: &[String],
    series: &[Series<'_>],
) -> String {
    let axis = Axis::covering(series.iter().flat_map(|s| s.values.iter().copied()));
    let mut out = String::new();
    open(&mut out, title);
    y_axis(&mut out, axis, y_label);
    let entries: Vec<(&str, &str)> = series.iter().map(|s| (s.name, s.color)).collect();
    legend(&mut out, &entries);

    let slot = plot_width() / categories.len().max(1) as f64;
    let width = slot * 0.7 / series.len().max(1) as f64;
    for (i, category) in categories.iter().enumerate() {
        let x = LEFT + i as f64 * slot + slot * 0.15;
        for (j, s) in series.iter().enumerate() {
            let value = s.values.get(i).copied().unwrap_or(0.0);
            let tip = format!("{category} {}: {}", s.name, tick_label(value));
            bar(&mut out, axis, x + j as f64 * width, width, value, s.color, &tip);
        }
        category_label(&mut out, LEFT + i as f64 * slot + slot / 2.0, category);
    }

    x_title(&mut out, x_label);
    close(&mut out);
    out
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// Bubble size; only the magnitude is used.
    pub size: f64,
}

/// Bubbles at `(x, y)`, sized by `size` and colored by `y`.
#[must_use]
pub fn scatter_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    points: &[ScatterPoint],
) -> String {
    let x_axis = Axis::covering(points.iter().map(|p| p.x));
    let y_axis_range = Axis::covering(points.iter().map(|p| p.y));
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let largest = points
        .iter()
        .map(|p| finite(p.size).abs())
        .fold(0.0_f64, f64::max);

    let mut out = String::new();
    open(&mut out, title);
    y_axis(&mut out, y_axis_range, y_label);
    for tick in x_axis.ticks() {
        category_label(&mut out, x_axis.x(tick), &tick_label(tick));
    }

    for point in points {
        let radius = if largest > 0.0 {
            6.0 + 18.0 * finite(point.size).abs() / largest
        } else {
            6.0
        };
        let (cx, cy) = (x_axis.x(point.x), y_axis_range.y(point.y));
        write!(
            out,
            r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{radius:.1}" fill="{color}" fill-opacity="0.75"><title>{t}</title></circle><text x="{tx:.1}" y="{ty:.1}" class="point-label">{l}</text>"#,
            color = ColorScale::RdYlGn.for_value(point.y, &ys),
            t = escape(&format!(
                "{}: {} races, {} IGGT",
                point.label,
                tick_label(point.x),
                tick_label(point.y)
            )),
            tx = cx + radius + 3.0,
            ty = cy + 4.0,
            l = escape(&point.label),
        ).ok();
    }

    x_title(&mut out, x_label);
    close(&mut out);
    out
}

/// One line per series over calendar days.
#[must_use]
pub fn line_chart(
    title: &str,
    x_label: &str,
    y_label: &str,
    series: &[(String, Vec<(NaiveDate, f64)>)],
) -> String {
    let days = series.iter().flat_map(|(_, points)| points.iter().map(|(d, _)| *d));
    let first = days.clone().min();
    let last = days.max();
    let axis = Axis::covering(series.iter().flat_map(|(_, p)| p.iter().map(|(_, v)| *v)));

    let mut out = String::new();
    open(&mut out, title);
    y_axis(&mut out, axis, y_label);
    let names: Vec<(&str, &str)> = series
        .iter()
        .enumerate()
        .map(|(i, (name, _))| (name.as_str(), PALETTE[i % PALETTE.len()]))
        .collect();
    legend(&mut out, &names);

    if let (Some(first), Some(last)) = (first, last) {
        let span = (last - first).num_days().max(0) as f64;
        let x = |day: NaiveDate| {
            if span == 0.0 {
                LEFT + plot_width() / 2.0
            } else {
                LEFT + (day - first).num_days() as f64 / span * plot_width()
            }
        };

        category_label(&mut out, x(first), &first.format("%Y-%m-%d").to_string());
        if last != first {
            category_label(&mut out, x(last), &last.format("%Y-%m-%d").to_string());
        }

        for (i, (name, points)) in series.iter().enumerate() {
            let color = PALETTE[i % PALETTE.len()];
            let mut sorted = points.clone();
            sorted.sort_by_key(|(day, _)| *day);
            let path: Vec<String> = sorted
                .iter()
                .map(|(day, value)| format!("{:.1},{:.1}", x(*day), axis.y(*value)))
                .collect();
            write!(
                out,
                r#"<polyline points="{p}" fill="none" stroke="{color}" stroke-width="2"><title>{t}</title></polyline>"#,
                p = path.join(" "),
                t = escape(name),
            ).ok();
            for (day, value) in &sorted {
                write!(
                    out,
                    r#"<circle cx="{:.1}" cy="{:.1}" r="2.5" fill="{color}"/>"#,
                    x(*day),
                    axis.y(*value)
                ).ok();
            }
        }
    }

    x_title(&mut out, x_label);
    close(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_scale_endpoints() {
        assert_eq!(ColorScale::RdYlGn.at(0.0), "#d73027");
        assert_eq!(ColorScale::RdYlGn.at(1.0), "#1a9850");
        assert_eq!(ColorScale::Blues.at(1.0), "#08519c");
        assert_eq!(ColorScale::RdYlGn.at(2.0), ColorScale::RdYlGn.at(1.0));
    }

    #[test]
    fn lowest_value_is_red_highest_green() {
        let values = [-50.0, 10.0, 400.0];
        assert_eq!(ColorScale::RdYlGn.for_value(-50.0, &values), "#d73027");
        assert_eq!(ColorScale::RdYlGn.for_value(400.0, &values), "#1a9850");
    }

    #[test]
    fn axis_always_includes_zero() {
        let axis = Axis::covering([5.0, 10.0].into_iter());
        assert_eq!(axis.min, 0.0);
        assert!((axis.y(0.0) - (TOP + plot_height())).abs() < 1e-9);
        assert!((axis.y(10.0) - TOP).abs() < 1e-9);

        let flat = Axis::covering(std::iter::empty());
        assert_eq!(flat.span(), 1.0);
    }

    #[test]
    fn bar_chart_draws_one_rect_per_bar_and_escapes_labels() {
        let svg = bar_chart(
            "Total P&L by Bot",
            "Bot Name",
            "P&L (IGGT)",
            &[("<Alba>".to_string(), 10.0), ("Eirean".to_string(), -5.0)],
            ColorScale::RdYlGn,
        );
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 2);
        assert!(svg.contains("&lt;Alba&gt;"));
        assert!(svg.contains("Total P&amp;L by Bot"));
    }

    #[test]
    fn line_chart_handles_a_single_day() {
        let day = NaiveDate::from_ymd_opt(2025, 9, 20).unwrap();
        let svg = line_chart(
            "Daily P&L",
            "Date",
            "IGGT",
            &[("Alba".to_string(), vec![(day, 12.0)])],
        );
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("2025-09-20"));
    }
}
