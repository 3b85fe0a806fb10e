//! Display options for the renderer
//!
//! These only affect how a frame is drawn and are never persisted.

/// Quality preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    /// Background stars drawn for this preset
    pub fn star_count(&self) -> usize {
        match self {
            QualityPreset::Low => 0,
            QualityPreset::Medium => 50,
            QualityPreset::High => 120,
        }
    }

    /// Triangles per circle
    pub fn circle_segments(&self) -> u32 {
        match self {
            QualityPreset::Low => 10,
            QualityPreset::Medium => 20,
            QualityPreset::High => 32,
        }
    }

    /// Outline ring around meteors
    pub fn meteor_outline(&self) -> bool {
        !matches!(self, QualityPreset::Low)
    }
}

/// Display settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// Graphics quality preset
    pub quality: QualityPreset,
    /// Background grid lines
    pub show_grid: bool,
    /// Keep the starfield still
    pub reduced_motion: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            quality: QualityPreset::Medium,
            show_grid: true,
            reduced_motion: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.quality, QualityPreset::Medium);
        assert!(settings.show_grid);
        assert!(!settings.reduced_motion);
    }

    #[test]
    fn test_low_preset_is_cheapest() {
        assert_eq!(QualityPreset::Low.star_count(), 0);
        assert!(!QualityPreset::Low.meteor_outline());
        assert!(QualityPreset::Low.circle_segments() < QualityPreset::High.circle_segments());
    }
}
