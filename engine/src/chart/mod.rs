// Server-side chart rendering. Charts are emitted as inline `<svg>` fragments
// that pages embed directly.

pub mod line;
pub mod theme;

pub use line::{render_line_chart, ChartOptions};
pub use theme::ChartTheme;

/// Escapes text for use inside HTML/SVG element content and attribute values.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
