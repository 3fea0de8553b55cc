// Colors used by the SVG chart renderer.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartTheme {
    pub background: String,
    pub foreground: String,
    pub grid: String,
    pub axis: String,
    /// Line colors, cycled when there are more series than entries.
    pub series_colors: Vec<String>,
}

impl ChartTheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            foreground: "#2a3f5f".to_string(),
            grid: "#e5ecf6".to_string(),
            axis: "#8c9bb0".to_string(),
            series_colors: [
                "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
                "#ff97ff", "#fecb52",
            ]
            .iter()
            .map(|c| c.to_string())
            .collect(),
        }
    }

    pub fn series_color(&self, index: usize) -> &str {
        if self.series_colors.is_empty() {
            return &self.foreground;
        }
        &self.series_colors[index % self.series_colors.len()]
    }
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self::default_light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_color_cycles() {
        let theme = ChartTheme::default_light();
        let n = theme.series_colors.len();
        assert_eq!(theme.series_color(0), theme.series_color(n));
        assert_ne!(theme.series_color(0), theme.series_color(1));
    }

    #[test]
    fn test_series_color_falls_back_to_foreground() {
        let theme = ChartTheme { series_colors: vec![], ..ChartTheme::default_light() };
        assert_eq!(theme.series_color(3), theme.foreground);
    }
}
