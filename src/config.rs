use std::time::Duration;

use crate::error::{AppError, Result};

/// Raster formats the image pane will pick up from a folder.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp"];

pub const MIN_SLIDE_DELAY_SECS: u64 = 1;
pub const MAX_SLIDE_DELAY_SECS: u64 = 60;
pub const DEFAULT_SLIDE_DELAY_MS: u64 = 5000;

/// Time between automatic slideshow advances.
///
/// Only whole seconds in `[MIN_SLIDE_DELAY_SECS, MAX_SLIDE_DELAY_SECS]` are
/// accepted from the user; the default sits inside that range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideDelay(Duration);

impl SlideDelay {
    pub fn from_secs(secs: u64) -> Result<Self> {
        if !(MIN_SLIDE_DELAY_SECS..=MAX_SLIDE_DELAY_SECS).contains(&secs) {
            return Err(AppError::InvalidDelay {
                value: secs.to_string(),
                min: MIN_SLIDE_DELAY_SECS,
                max: MAX_SLIDE_DELAY_SECS,
            });
        }
        Ok(Self(Duration::from_millis(secs * 1000)))
    }

    /// Parse the text typed into the speed dialog.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let secs = trimmed.parse::<u64>().map_err(|_| AppError::InvalidDelay {
            value: trimmed.to_string(),
            min: MIN_SLIDE_DELAY_SECS,
            max: MAX_SLIDE_DELAY_SECS,
        })?;
        Self::from_secs(secs)
    }

    pub fn duration(self) -> Duration {
        self.0
    }

    pub fn as_millis(self) -> u64 {
        self.0.as_millis() as u64
    }

    pub fn whole_secs(self) -> u64 {
        self.0.as_secs()
    }
}

impl Default for SlideDelay {
    fn default() -> Self {
        Self(Duration::from_millis(DEFAULT_SLIDE_DELAY_MS))
    }
}

/// Room reserved around a rendered image for the pane's margins and controls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImagePadding {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Default for ImagePadding {
    fn default() -> Self {
        Self {
            horizontal: 40.0,
            vertical: 80.0,
        }
    }
}

/// External synthesiser invocation: `program <args..>`, with the text on stdin.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeechConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
            args: vec!["--stdin".to_string()],
        }
    }
}

/// Application tunables. Nothing here is read from or written to disk.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub window_title: String,
    pub slide_delay: SlideDelay,
    pub image_padding: ImagePadding,
    pub speech: SpeechConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Dual Screen Presentation".to_string(),
            slide_delay: SlideDelay::default(),
            image_padding: ImagePadding::default(),
            speech: SpeechConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_bounds_are_inclusive() {
        assert_eq!(SlideDelay::from_secs(1).unwrap().as_millis(), 1000);
        assert_eq!(SlideDelay::from_secs(60).unwrap().as_millis(), 60_000);
        assert!(SlideDelay::from_secs(0).is_err());
        assert!(SlideDelay::from_secs(61).is_err());
    }

    #[test]
    fn parse_rejects_non_numbers() {
        assert!(matches!(
            SlideDelay::parse("fast"),
            Err(AppError::InvalidDelay { .. })
        ));
        assert_eq!(SlideDelay::parse(" 7 ").unwrap().whole_secs(), 7);
    }

    #[test]
    fn default_delay_is_five_seconds() {
        assert_eq!(SlideDelay::default().as_millis(), 5000);
    }
}
