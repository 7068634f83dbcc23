//! Output surfaces for rendered pages.

use std::path::{Path, PathBuf};

use embedded_graphics::prelude::Size;
use thiserror::Error;
use tracing::{debug, info};

use super::layout::RenderedPage;

#[derive(Debug, Error)]
pub enum PanelError {
    #[error("Failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Page is {actual:?} but the panel is {expected:?}")]
    SizeMismatch { expected: Size, actual: Size },
}

/// Something that can show a rendered page.
pub trait Panel: Send {
    fn size(&self) -> Size;

    /// Called before the first page of each cycle.
    fn begin_cycle(&mut self) {}

    fn present(&mut self, page: &RenderedPage) -> Result<(), PanelError>;

    /// Called after the last page of each cycle.
    fn end_cycle(&mut self) -> Result<(), PanelError> {
        Ok(())
    }
}

fn check_size(panel: Size, page: &RenderedPage) -> Result<(), PanelError> {
    let actual = Size::new(page.canvas.width(), page.canvas.height());
    if actual == panel {
        Ok(())
    } else {
        Err(PanelError::SizeMismatch {
            expected: panel,
            actual,
        })
    }
}

/// Logs each page's text.
#[derive(Debug, Clone)]
pub struct ConsolePanel {
    size: Size,
}

impl ConsolePanel {
    pub fn new(size: Size) -> Self {
        Self { size }
    }
}

impl Panel for ConsolePanel {
    fn size(&self) -> Size {
        self.size
    }

    fn present(&mut self, page: &RenderedPage) -> Result<(), PanelError> {
        check_size(self.size, page)?;
        info!(lines = ?page.lines, ink = page.canvas.ink(), "Page");
        Ok(())
    }
}

/// Writes each page of a cycle to `page-N.png`, counting from 1. Pages
/// left over from a longer earlier cycle are removed when the cycle ends.
#[derive(Debug, Clone)]
pub struct PngPanel {
    dir: PathBuf,
    size: Size,
    next: usize,
}

impl PngPanel {
    /// Creates `dir` if it does not exist.
    pub fn new(dir: impl Into<PathBuf>, size: Size) -> Result<Self, PanelError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| PanelError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir, size, next: 1 })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Panel for PngPanel {
    fn size(&self) -> Size {
        self.size
    }

    fn begin_cycle(&mut self) {
        self.next = 1;
    }

    fn present(&mut self, page: &RenderedPage) -> Result<(), PanelError> {
        check_size(self.size, page)?;
        let path = self.dir.join(format!("page-{}.png", self.next));
        page.canvas
            .to_gray_image()
            .save_with_format(&path, image::ImageFormat::Png)
            .map_err(|source| PanelError::Image {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), "Wrote page");
        self.next += 1;
        Ok(())
    }

    fn end_cycle(&mut self) -> Result<(), PanelError> {
        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source| PanelError::Io { path, source }
        };

        for entry in std::fs::read_dir(&self.dir).map_err(io_error(self.dir.as_path()))? {
            let path = entry.map_err(io_error(self.dir.as_path()))?.path();
            let stale = path
                .file_name()
                .and_then(|name| name.to_str())
                .and_then(page_number)
                .is_some_and(|n| n >= self.next);
            if stale {
                std::fs::remove_file(&path).map_err(io_error(path.as_path()))?;
                debug!(path = %path.display(), "Removed stale page");
            }
        }
        Ok(())
    }
}

/// `7` for `page-7.png`.
fn page_number(file_name: &str) -> Option<usize> {
    file_name
        .strip_prefix("page-")?
        .strip_suffix(".png")?
        .parse()
        .ok()
}

/// Keeps every presented page in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPanel {
    size: Size,
    pub pages: Vec<RenderedPage>,
    pub cycles: usize,
}

impl MemoryPanel {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pages: Vec::new(),
            cycles: 0,
        }
    }
}

impl Panel for MemoryPanel {
    fn size(&self) -> Size {
        self.size
    }

    fn begin_cycle(&mut self) {
        self.cycles += 1;
    }

    fn present(&mut self, page: &RenderedPage) -> Result<(), PanelError> {
        check_size(self.size, page)?;
        self.pages.push(page.clone());
        Ok(())
    }
}
