//! Configuration for the comparison engine.
//!
//! `CompareConfig` centralizes algorithm thresholds and behavioral knobs to
//! avoid hardcoded constants scattered throughout the codebase.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How sheets of the two workbooks are paired before grid diffing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SheetMatching {
    /// Pair sheets whose names are identical (default).
    ByName,
    /// Pair sheets by index, ignoring names.
    ByPosition,
}

/// Strategy used to align line and word sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineAlignment {
    /// O(n·d) shortest-edit-script alignment (default).
    Myers,
    /// Greedy unique first-fit anchoring; produces the legacy script shape.
    FirstFit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub sheet_matching: SheetMatching,
    /// Remap columns by matching header text instead of comparing by position.
    pub match_columns: bool,
    pub numeric_epsilon: f64,
    /// Rows scanned between cooperative yields.
    pub row_batch_size: u32,
    /// Summed per-channel RGB distance above which a pixel counts as
    /// different.
    pub pixel_threshold: u32,
    /// Percentage above which a page pair is reported visually different.
    pub visual_difference_threshold: f64,
    /// Scale hint published to rasterizer collaborators.
    pub raster_scale: f64,
    pub line_alignment: LineAlignment,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            sheet_matching: SheetMatching::ByName,
            match_columns: false,
            numeric_epsilon: 1e-4,
            row_batch_size: 1_000,
            pixel_threshold: 30,
            visual_difference_threshold: 0.1,
            raster_scale: 1.5,
            line_alignment: LineAlignment::Myers,
        }
    }
}

impl CompareConfig {
    pub fn builder() -> CompareConfigBuilder {
        CompareConfigBuilder {
            inner: CompareConfig::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.numeric_epsilon.is_finite() || self.numeric_epsilon < 0.0 {
            return Err(ConfigError::InvalidEpsilon {
                value: self.numeric_epsilon,
            });
        }
        if self.row_batch_size == 0 {
            return Err(ConfigError::NonPositiveLimit {
                field: "row_batch_size",
                value: 0,
            });
        }
        // Three channels of at most 255 each.
        if self.pixel_threshold > 765 {
            return Err(ConfigError::PixelThresholdOutOfRange {
                value: self.pixel_threshold,
            });
        }
        if !self.visual_difference_threshold.is_finite()
            || self.visual_difference_threshold < 0.0
            || self.visual_difference_threshold > 100.0
        {
            return Err(ConfigError::InvalidVisualThreshold {
                value: self.visual_difference_threshold,
            });
        }
        if !self.raster_scale.is_finite() || self.raster_scale <= 0.0 {
            return Err(ConfigError::InvalidRasterScale {
                value: self.raster_scale,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("numeric_epsilon must be finite and non-negative (got {value})")]
    InvalidEpsilon { value: f64 },
    #[error("{field} must be greater than zero (got {value})")]
    NonPositiveLimit { field: &'static str, value: u64 },
    #[error("pixel_threshold must be at most 765 (got {value})")]
    PixelThresholdOutOfRange { value: u32 },
    #[error("visual_difference_threshold must be a percentage in [0.0, 100.0] (got {value})")]
    InvalidVisualThreshold { value: f64 },
    #[error("raster_scale must be finite and positive (got {value})")]
    InvalidRasterScale { value: f64 },
}

#[derive(Debug, Clone)]
pub struct CompareConfigBuilder {
    inner: CompareConfig,
}

impl Default for CompareConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CompareConfigBuilder {
    pub fn new() -> Self {
        CompareConfig::builder()
    }

    pub fn sheet_matching(mut self, value: SheetMatching) -> Self {
        self.inner.sheet_matching = value;
        self
    }

    pub fn match_columns(mut self, value: bool) -> Self {
        self.inner.match_columns = value;
        self
    }

    pub fn numeric_epsilon(mut self, value: f64) -> Self {
        self.inner.numeric_epsilon = value;
        self
    }

    pub fn row_batch_size(mut self, value: u32) -> Self {
        self.inner.row_batch_size = value;
        self
    }

    pub fn pixel_threshold(mut self, value: u32) -> Self {
        self.inner.pixel_threshold = value;
        self
    }

    pub fn visual_difference_threshold(mut self, value: f64) -> Self {
        self.inner.visual_difference_threshold = value;
        self
    }

    pub fn raster_scale(mut self, value: f64) -> Self {
        self.inner.raster_scale = value;
        self
    }

    pub fn line_alignment(mut self, value: LineAlignment) -> Self {
        self.inner.line_alignment = value;
        self
    }

    pub fn build(self) -> Result<CompareConfig, ConfigError> {
        self.inner.validate()?;
        Ok(self.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_comparison_constants() {
        let cfg = CompareConfig::default();
        assert_eq!(cfg.numeric_epsilon, 1e-4);
        assert_eq!(cfg.row_batch_size, 1_000);
        assert_eq!(cfg.pixel_threshold, 30);
        assert_eq!(cfg.visual_difference_threshold, 0.1);
        assert_eq!(cfg.raster_scale, 1.5);
        assert_eq!(cfg.sheet_matching, SheetMatching::ByName);
        assert!(!cfg.match_columns);
    }

    #[test]
    fn serde_roundtrip_preserves_defaults() {
        let cfg = CompareConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize default config");
        let parsed: CompareConfig =
            serde_json::from_str(&json).expect("deserialize default config");
        assert_eq!(cfg, parsed);
    }

    #[test]
    fn partial_json_fills_remaining_defaults() {
        let cfg: CompareConfig = serde_json::from_str(
            r#"{"sheet_matching": "by_position", "match_columns": true}"#,
        )
        .expect("deserialize partial config");
        assert_eq!(cfg.sheet_matching, SheetMatching::ByPosition);
        assert!(cfg.match_columns);
        assert_eq!(cfg.row_batch_size, 1_000);
    }

    #[test]
    fn builder_rejects_zero_batch_size() {
        let err = CompareConfig::builder()
            .row_batch_size(0)
            .build()
            .expect_err("builder should reject a zero batch");
        assert!(matches!(
            err,
            ConfigError::NonPositiveLimit {
                field: "row_batch_size",
                ..
            }
        ));
    }

    #[test]
    fn builder_rejects_negative_epsilon() {
        let err = CompareConfig::builder()
            .numeric_epsilon(-1.0)
            .build()
            .expect_err("builder should reject a negative tolerance");
        assert!(matches!(err, ConfigError::InvalidEpsilon { .. }));
    }
}
