use std::path::{Path, PathBuf};
use std::time::Instant;

use image::imageops::FilterType;
use image::DynamicImage;

use crate::config::{ImagePadding, SlideDelay, IMAGE_EXTENSIONS};
use crate::error::{AppError, Result};
use crate::scheduler::{Scheduler, TimerId};

pub const PLAY_LABEL: &str = "Play Slideshow";
pub const STOP_SLIDESHOW_LABEL: &str = "Stop Slideshow";

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// List the images directly inside `folder`, in directory listing order.
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(folder).map_err(|e| AppError::FolderRead {
        path: folder.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect())
}

/// Largest size with the source's aspect ratio that fits inside `bounds`.
/// Never scales up.
pub fn fit_within(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (width, height) = source;
    let (max_width, max_height) = (bounds.0.max(1), bounds.1.max(1));

    if width <= max_width && height <= max_height {
        return source;
    }

    let ratio = (max_width as f64 / width as f64).min(max_height as f64 / height as f64);
    let fitted_width = ((width as f64 * ratio) as u32).max(1);
    let fitted_height = ((height as f64 * ratio) as u32).max(1);
    (fitted_width, fitted_height)
}

pub fn decode(path: &Path) -> Result<DynamicImage> {
    image::open(path).map_err(|e| AppError::ImageDecode {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// The bitmap currently on screen.
pub struct RenderedImage {
    pub path: PathBuf,
    pub image: DynamicImage,
    pub caption: String,
    /// Bumped on every successful render so the UI knows to re-upload.
    pub generation: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slideshow {
    Stopped,
    /// Running, with the pending advance that keeps it going.
    Running(TimerId),
}

/// Payload of a pending slideshow advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceSlide;

/// Right pane: a folder of images, the one on screen, and the slideshow.
pub struct ImagePane {
    folder: Option<PathBuf>,
    images: Vec<PathBuf>,
    current: usize,
    slideshow: Slideshow,
    delay: SlideDelay,
    timers: Scheduler<AdvanceSlide>,
    pane_size: (f32, f32),
    padding: ImagePadding,
    rendered: Option<RenderedImage>,
    generation: u64,
}

impl ImagePane {
    pub fn new(delay: SlideDelay, padding: ImagePadding) -> Self {
        Self {
            folder: None,
            images: Vec::new(),
            current: 0,
            slideshow: Slideshow::Stopped,
            delay,
            timers: Scheduler::new(),
            pane_size: (800.0, 600.0),
            padding,
            rendered: None,
            generation: 0,
        }
    }

    /// Size of the pane on screen; images are fitted to this minus padding.
    pub fn set_pane_size(&mut self, width: f32, height: f32) {
        self.pane_size = (width, height);
    }

    fn available_area(&self) -> (u32, u32) {
        let width = (self.pane_size.0 - self.padding.horizontal).max(1.0);
        let height = (self.pane_size.1 - self.padding.vertical).max(1.0);
        (width as u32, height as u32)
    }

    /// Load every supported image in `folder`. An unreadable folder leaves
    /// the pane as it was; a folder without images empties it.
    pub fn open_folder(&mut self, folder: &Path) -> Result<()> {
        self.stop();

        let images = scan_folder(folder)?;
        log::info!("Found {} images in {}", images.len(), folder.display());

        self.folder = Some(folder.to_path_buf());
        self.images = images;
        self.current = 0;

        if self.images.is_empty() {
            self.rendered = None;
            return Err(AppError::EmptyFolder {
                path: folder.to_path_buf(),
            });
        }

        self.render_current_image()
    }

    /// Decode, fit and caption the current image. On failure the previous
    /// image stays on screen.
    pub fn render_current_image(&mut self) -> Result<()> {
        let Some(path) = self.images.get(self.current).cloned() else {
            return Ok(());
        };

        let image = decode(&path).map_err(|e| {
            log::error!("{}", e);
            e
        })?;

        let source = (image.width(), image.height());
        let (width, height) = fit_within(source, self.available_area());
        let image = if (width, height) == source {
            image
        } else {
            image.resize_exact(width, height, FilterType::Lanczos3)
        };

        self.generation += 1;
        self.rendered = Some(RenderedImage {
            path,
            image,
            caption: format!("Image {} of {}", self.current + 1, self.images.len()),
            generation: self.generation,
        });
        Ok(())
    }

    /// Step forward; a no-op returning `Ok(false)` on the last image.
    pub fn next(&mut self) -> Result<bool> {
        if self.current + 1 >= self.images.len() {
            return Ok(false);
        }
        self.current += 1;
        self.render_current_image()?;
        Ok(true)
    }

    /// Step back; a no-op returning `Ok(false)` on the first image.
    pub fn previous(&mut self) -> Result<bool> {
        if self.images.is_empty() || self.current == 0 {
            return Ok(false);
        }
        self.current -= 1;
        self.render_current_image()?;
        Ok(true)
    }

    pub fn toggle_slideshow(&mut self, now: Instant) -> Result<()> {
        if self.is_running() {
            self.stop();
            Ok(())
        } else {
            self.start(now)
        }
    }

    /// Start the slideshow and advance immediately.
    pub fn start(&mut self, now: Instant) -> Result<()> {
        if self.images.is_empty() {
            return Err(AppError::NoImages);
        }
        log::info!("Slideshow started ({} ms per slide)", self.delay.as_millis());
        self.step_and_reschedule(now)
    }

    pub fn stop(&mut self) {
        self.cancel_pending();
        if self.slideshow != Slideshow::Stopped {
            log::info!("Slideshow stopped");
        }
        self.slideshow = Slideshow::Stopped;
    }

    fn cancel_pending(&mut self) {
        if let Slideshow::Running(id) = self.slideshow {
            self.timers.cancel(id);
        }
    }

    /// Move to the next image, wrapping from the last to the first, and
    /// schedule the following advance. Does nothing while stopped.
    pub fn advance(&mut self, now: Instant) -> Result<()> {
        if !self.is_running() || self.images.is_empty() {
            return Ok(());
        }
        self.step_and_reschedule(now)
    }

    fn step_and_reschedule(&mut self, now: Instant) -> Result<()> {
        self.current = (self.current + 1) % self.images.len();
        log::debug!("Slideshow advanced to image {}", self.current + 1);
        let rendered = self.render_current_image();

        self.cancel_pending();
        let id = self.timers.schedule(now, self.delay.duration(), AdvanceSlide);
        self.slideshow = Slideshow::Running(id);

        rendered
    }

    /// Run any slideshow advance whose deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Vec<AppError> {
        let mut errors = Vec::new();
        for (id, AdvanceSlide) in self.timers.take_due(now) {
            if self.slideshow != Slideshow::Running(id) {
                continue;
            }
            if let Err(e) = self.advance(now) {
                errors.push(e);
            }
        }
        errors
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn pending_advances(&self) -> usize {
        self.timers.pending()
    }

    /// Takes effect from the next scheduled advance.
    pub fn set_delay(&mut self, delay: SlideDelay) {
        log::info!("Slideshow delay set to {} ms", delay.as_millis());
        self.delay = delay;
    }

    pub fn delay(&self) -> SlideDelay {
        self.delay
    }

    pub fn is_running(&self) -> bool {
        matches!(self.slideshow, Slideshow::Running(_))
    }

    pub fn slideshow(&self) -> Slideshow {
        self.slideshow
    }

    pub fn play_button_label(&self) -> &'static str {
        if self.is_running() {
            STOP_SLIDESHOW_LABEL
        } else {
            PLAY_LABEL
        }
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    /// Last component of the open folder, shown above the image.
    pub fn folder_name(&self) -> Option<String> {
        self.folder
            .as_deref()
            .map(|f| f.file_name().unwrap_or(f.as_os_str()).to_string_lossy().to_string())
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn rendered(&self) -> Option<&RenderedImage> {
        self.rendered.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_ignores_case() {
        assert!(is_supported_image(Path::new("/slides/a.PNG")));
        assert!(is_supported_image(Path::new("/slides/b.Jpeg")));
        assert!(!is_supported_image(Path::new("/slides/notes.txt")));
        assert!(!is_supported_image(Path::new("/slides/tiff.tiff")));
        assert!(!is_supported_image(Path::new("/slides/no_extension")));
    }

    #[test]
    fn fit_only_downscales() {
        assert_eq!(fit_within((200, 100), (400, 400)), (200, 100));
        assert_eq!(fit_within((800, 400), (400, 400)), (400, 200));
        assert_eq!(fit_within((400, 800), (400, 400)), (200, 400));
        assert_eq!(fit_within((10_000, 1), (100, 100)), (100, 1));
    }
}
