//! Test-drive video source selection with fallbacks.
//!
//! The configured URL (or the bundled clip when none is set) is tried
//! first. A playback error moves to the hosted fallback clip; an error on the
//! fallback leaves the video failed.

use tracing::warn;

use crate::config::SoundConfig;

/// Clip shipped with the site.
pub const BUNDLED_VIDEO: &str = "/ai-test-drive.mp4";

/// Hosted clip used when the primary source cannot be played.
pub const FALLBACK_VIDEO: &str = "https://www.porschedriving.com/wp-content/uploads/2024/05/PCNA24-36483-Porschedriving-Site-Update_ATL_16x9.mp4";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoSource {
    Configured(String),
    Bundled,
    Fallback,
}

impl VideoSource {
    pub fn url(&self) -> &str {
        match self {
            VideoSource::Configured(url) => url,
            VideoSource::Bundled => BUNDLED_VIDEO,
            VideoSource::Fallback => FALLBACK_VIDEO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestDriveVideo {
    initial: VideoSource,
    current: VideoSource,
    failed: bool,
}

impl TestDriveVideo {
    pub fn new(configured: Option<&str>) -> Self {
        let initial = match configured.map(str::trim) {
            Some(url) if !url.is_empty() => VideoSource::Configured(url.to_string()),
            _ => VideoSource::Bundled,
        };
        TestDriveVideo {
            current: initial.clone(),
            initial,
            failed: false,
        }
    }

    pub fn from_config(config: &SoundConfig) -> Self {
        TestDriveVideo::new(config.test_drive_video_url.as_deref())
    }

    pub fn source(&self) -> &VideoSource {
        &self.current
    }

    /// URL to play, or `None` once every source has failed.
    pub fn url(&self) -> Option<&str> {
        (!self.failed).then(|| self.current.url())
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    /// Record a playback error and return the next URL to try, if any.
    pub fn on_error(&mut self) -> Option<&str> {
        if self.current == VideoSource::Fallback {
            warn!("fallback test-drive video failed");
            self.failed = true;
            return None;
        }
        warn!(url = self.current.url(), "test-drive video failed, using fallback");
        self.current = VideoSource::Fallback;
        self.url()
    }

    /// Skip straight to the hosted clip, clearing any failure.
    pub fn play_fallback(&mut self) -> &str {
        self.current = VideoSource::Fallback;
        self.failed = false;
        FALLBACK_VIDEO
    }

    /// Back to the initial source, as when the modal is reopened.
    pub fn reset(&mut self) {
        self.current = self.initial.clone();
        self.failed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_when_unconfigured() {
        let video = TestDriveVideo::new(None);
        assert_eq!(video.source(), &VideoSource::Bundled);
        assert_eq!(video.url(), Some(BUNDLED_VIDEO));

        let blank = TestDriveVideo::new(Some("  "));
        assert_eq!(blank.url(), Some(BUNDLED_VIDEO));
    }

    #[test]
    fn configured_url_is_trimmed() {
        let video = TestDriveVideo::new(Some(" https://cdn.example.com/a.mp4\n"));
        assert_eq!(video.url(), Some("https://cdn.example.com/a.mp4"));
    }

    #[test]
    fn error_chain() {
        let mut video = TestDriveVideo::new(Some("https://cdn.example.com/a.mp4"));
        assert_eq!(video.on_error(), Some(FALLBACK_VIDEO));
        assert!(!video.is_failed());
        assert_eq!(video.on_error(), None);
        assert!(video.is_failed());
        assert_eq!(video.url(), None);
    }

    #[test]
    fn bundled_error_goes_to_fallback() {
        let mut video = TestDriveVideo::new(None);
        assert_eq!(video.on_error(), Some(FALLBACK_VIDEO));
        assert_eq!(video.source(), &VideoSource::Fallback);
    }

    #[test]
    fn play_fallback_and_reset() {
        let mut video = TestDriveVideo::new(None);
        video.on_error();
        video.on_error();
        assert!(video.is_failed());

        assert_eq!(video.play_fallback(), FALLBACK_VIDEO);
        assert!(!video.is_failed());

        video.reset();
        assert_eq!(video.url(), Some(BUNDLED_VIDEO));
    }

    #[test]
    fn from_config_uses_configured_url() {
        let config = SoundConfig {
            test_drive_video_url: Some("/custom.mp4".to_string()),
            ..SoundConfig::default()
        };
        assert_eq!(TestDriveVideo::from_config(&config).url(), Some("/custom.mp4"));
    }
}
