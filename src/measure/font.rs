//! Font descriptors.

use serde::{Deserialize, Serialize};

/// Typeface family. Only the two base faces every PDF reader ships are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontFamily {
    /// Proportional sans-serif
    #[default]
    Helvetica,
    /// Monospace
    Courier,
}

impl FontFamily {
    /// Check if every glyph has the same advance.
    pub fn is_monospace(self) -> bool {
        matches!(self, FontFamily::Courier)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Everything a metrics backend needs to measure a run of text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FontSpec {
    pub family: FontFamily,
    /// Size in points
    pub size: f32,
    pub weight: FontWeight,
    pub style: FontStyle,
}

impl FontSpec {
    /// Regular Helvetica at `size`.
    pub fn helvetica(size: f32) -> Self {
        Self {
            family: FontFamily::Helvetica,
            size,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
        }
    }

    /// Regular Courier at `size`.
    pub fn courier(size: f32) -> Self {
        Self {
            family: FontFamily::Courier,
            ..Self::helvetica(size)
        }
    }

    /// Same font in bold.
    pub fn bold(mut self) -> Self {
        self.weight = FontWeight::Bold;
        self
    }

    /// Same font in italic.
    pub fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_builders() {
        let font = FontSpec::helvetica(24.0).bold();
        assert_eq!(font.family, FontFamily::Helvetica);
        assert_eq!(font.weight, FontWeight::Bold);
        assert_eq!(font.style, FontStyle::Normal);

        let font = FontSpec::courier(11.0);
        assert!(font.family.is_monospace());
        assert_eq!(font.size, 11.0);

        let font = FontSpec::helvetica(12.0).italic();
        assert_eq!(font.style, FontStyle::Italic);
    }
}
