// Line chart rendering: one polyline per series over a shared date axis.
use super::escape_html;
use super::theme::ChartTheme;
use chrono::NaiveDate;
use shared::models::SeriesData;
use shared::utils::format_date;

const MARGIN_LEFT: f64 = 64.0;
const MARGIN_RIGHT: f64 = 110.0; // legend column
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 56.0;
const Y_TICKS: usize = 5;
const MAX_X_TICKS: i64 = 6;

#[derive(Debug, Clone)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub theme: ChartTheme,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            width: 900,
            height: 480,
            title: "Stock Prices".to_string(),
            x_label: "Date".to_string(),
            y_label: "Price".to_string(),
            theme: ChartTheme::default(),
        }
    }
}

/// Data bounds across every point of every series.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    first: NaiveDate,
    last: NaiveDate,
    min: f64,
    max: f64,
}

impl Bounds {
    fn of(series: &[SeriesData]) -> Option<Self> {
        let mut points = series.iter().flat_map(|s| s.points.iter());
        let p = points.next()?;
        let mut bounds = Bounds { first: p.date, last: p.date, min: p.value, max: p.value };
        for p in points {
            bounds.first = bounds.first.min(p.date);
            bounds.last = bounds.last.max(p.date);
            bounds.min = bounds.min.min(p.value);
            bounds.max = bounds.max.max(p.value);
        }

        // Pad the value range so lines don't sit on the plot border.
        let pad = if bounds.max > bounds.min { (bounds.max - bounds.min) * 0.05 } else { 1.0 };
        bounds.min -= pad;
        bounds.max += pad;
        Some(bounds)
    }

    fn day_span(&self) -> i64 {
        (self.last - self.first).num_days()
    }
}

/// Maps data coordinates onto the plot area.
struct Plot {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    bounds: Bounds,
}

impl Plot {
    fn x(&self, date: NaiveDate) -> f64 {
        let span = self.bounds.day_span();
        if span == 0 {
            return self.left + self.width / 2.0;
        }
        let offset = (date - self.bounds.first).num_days() as f64;
        self.left + offset / span as f64 * self.width
    }

    fn y(&self, value: f64) -> f64 {
        let range = self.bounds.max - self.bounds.min;
        self.top + (self.bounds.max - value) / range * self.height
    }
}

/// Renders `series` as an inline SVG fragment. Empty input yields a chart frame with
/// a "No data" note rather than an error.
pub fn render_line_chart(series: &[SeriesData], options: &ChartOptions) -> String {
    let theme = &options.theme;
    let width = f64::from(options.width.max(200));
    let height = f64::from(options.height.max(150));

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" class="line-chart" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif" font-size="12">"#,
        w = width,
        h = height
    ));
    svg.push_str(&format!(
        r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
        width,
        height,
        escape_html(&theme.background)
    ));
    svg.push_str(&format!(
        r#"<text class="chart-title" x="{:.1}" y="24" text-anchor="middle" font-size="16" fill="{}">{}</text>"#,
        width / 2.0,
        escape_html(&theme.foreground),
        escape_html(&options.title)
    ));

    let plot_width = width - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = height - MARGIN_TOP - MARGIN_BOTTOM;

    let bounds = match Bounds::of(series) {
        Some(b) => b,
        None => {
            svg.push_str(&format!(
                r#"<text class="no-data" x="{:.1}" y="{:.1}" text-anchor="middle" fill="{}">No data</text>"#,
                MARGIN_LEFT + plot_width / 2.0,
                MARGIN_TOP + plot_height / 2.0,
                escape_html(&theme.foreground)
            ));
            svg.push_str("</svg>");
            return svg;
        }
    };

    let plot = Plot { left: MARGIN_LEFT, top: MARGIN_TOP, width: plot_width, height: plot_height, bounds };

    render_grid_and_axes(&mut svg, &plot, options);

    for (idx, s) in series.iter().enumerate() {
        if s.points.is_empty() {
            continue;
        }
        let coords: Vec<String> = s
            .points
            .iter()
            .map(|p| format!("{:.1},{:.1}", plot.x(p.date), plot.y(p.value)))
            .collect();
        svg.push_str(&format!(
            r#"<polyline class="series" data-series="{}" fill="none" stroke="{}" stroke-width="2" points="{}"/>"#,
            escape_html(&s.name),
            escape_html(theme.series_color(idx)),
            coords.join(" ")
        ));
    }

    render_legend(&mut svg, series, &plot, theme);
    svg.push_str("</svg>");
    svg
}

fn render_grid_and_axes(svg: &mut String, plot: &Plot, options: &ChartOptions) {
    let theme = &options.theme;
    let bottom = plot.top + plot.height;
    let right = plot.left + plot.width;
    let grid = escape_html(&theme.grid);
    let axis = escape_html(&theme.axis);
    let fg = escape_html(&theme.foreground);

    for i in 0..=Y_TICKS {
        let value = plot.bounds.min + (plot.bounds.max - plot.bounds.min) * i as f64 / Y_TICKS as f64;
        let y = plot.y(value);
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{grid}"/>"#,
            plot.left,
            right,
            y = y,
            grid = grid
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="end" fill="{}">{:.1}</text>"#,
            plot.left - 6.0,
            y + 4.0,
            fg,
            value
        ));
    }

    let span = plot.bounds.day_span();
    let ticks = span.clamp(0, MAX_X_TICKS);
    for i in 0..=ticks {
        let date = if ticks == 0 {
            plot.bounds.first
        } else {
            plot.bounds.first + chrono::Duration::days(span * i / ticks)
        };
        let x = plot.x(date);
        svg.push_str(&format!(
            r#"<line x1="{x:.1}" y1="{:.1}" x2="{x:.1}" y2="{:.1}" stroke="{}"/>"#,
            bottom,
            bottom + 4.0,
            axis,
            x = x
        ));
        svg.push_str(&format!(
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle" fill="{}">{}</text>"#,
            x,
            bottom + 18.0,
            fg,
            format_date(date)
        ));
    }

    svg.push_str(&format!(
        r#"<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="{a}"/><line x1="{l:.1}" y1="{t:.1}" x2="{l:.1}" y2="{b:.1}" stroke="{a}"/>"#,
        l = plot.left,
        r = right,
        t = plot.top,
        b = bottom,
        a = axis
    ));
    svg.push_str(&format!(
        r#"<text class="x-label" x="{:.1}" y="{:.1}" text-anchor="middle" fill="{}">{}</text>"#,
        plot.left + plot.width / 2.0,
        bottom + 40.0,
        fg,
        escape_html(&options.x_label)
    ));
    svg.push_str(&format!(
        r#"<text class="y-label" x="16" y="{y:.1}" text-anchor="middle" fill="{}" transform="rotate(-90 16 {y:.1})">{}</text>"#,
        fg,
        escape_html(&options.y_label),
        y = plot.top + plot.height / 2.0
    ));
}

fn render_legend(svg: &mut String, series: &[SeriesData], plot: &Plot, theme: &ChartTheme) {
    let x = plot.left + plot.width + 16.0;
    for (idx, s) in series.iter().enumerate() {
        let y = plot.top + 8.0 + idx as f64 * 18.0;
        svg.push_str(&format!(
            r#"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="{}" stroke-width="2"/><text class="legend" x="{:.1}" y="{:.1}" fill="{}">{}</text>"#,
            x,
            x + 18.0,
            escape_html(theme.series_color(idx)),
            x + 24.0,
            y + 4.0,
            escape_html(&theme.foreground),
            escape_html(&s.name),
            y = y
        ));
    }
}
