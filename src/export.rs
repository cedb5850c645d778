//! Frame export: where swapped-out color buffers go
//!
//! The context hands every retired back buffer to a [`FrameSink`].
//! [`FrameExporter`] writes numbered image files; [`FrameRecorder`] keeps
//! frames in memory.

use std::cell::RefCell;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::codecs::tga::TgaEncoder;
use image::{ExtendedColorType, ImageFormat};
use log::info;
use serde::{Deserialize, Serialize};

use crate::rasterizer::{PixelFormat, RenderTarget};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("IO error writing {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("encoding {} failed: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Receives each frame retired by a buffer swap
pub trait FrameSink {
    fn write_frame(&mut self, frame: &RenderTarget) -> Result<(), ExportError>;
}

/// On-disk image format for exported frames
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameFormat {
    /// Uncompressed 32-bit TGA
    #[default]
    Tga,
    Png,
}

impl FrameFormat {
    pub fn extension(self) -> &'static str {
        match self {
            FrameFormat::Tga => "tga",
            FrameFormat::Png => "png",
        }
    }
}

/// Writes `<dir>/<prefix><n>.<ext>`, with n counting from 1
#[derive(Debug)]
pub struct FrameExporter {
    dir: PathBuf,
    prefix: String,
    format: FrameFormat,
    written: u32,
}

impl FrameExporter {
    pub fn new<P: AsRef<Path>>(dir: P, prefix: &str, format: FrameFormat) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: prefix.to_string(),
            format,
            written: 0,
        }
    }

    /// Number of frames written so far
    pub fn frames_written(&self) -> u32 {
        self.written
    }

    pub fn path_for(&self, number: u32) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", self.prefix, number, self.format.extension()))
    }
}

impl FrameSink for FrameExporter {
    fn write_frame(&mut self, frame: &RenderTarget) -> Result<(), ExportError> {
        debug_assert_eq!(frame.format, PixelFormat::Rgba8);
        let number = self.written + 1;
        let path = self.path_for(number);

        // Row 0 is the bottom of NDC space; both encoders store top row first
        let rgba = frame.to_rgba_bytes_flipped();
        let (width, height) = (frame.width as u32, frame.height as u32);

        match self.format {
            FrameFormat::Tga => {
                let file = File::create(&path).map_err(|source| ExportError::Io {
                    path: path.clone(),
                    source,
                })?;
                TgaEncoder::new(BufWriter::new(file))
                    .disable_rle()
                    .encode(&rgba, width, height, ExtendedColorType::Rgba8)
                    .map_err(|source| ExportError::Encode { path: path.clone(), source })?;
            }
            FrameFormat::Png => {
                image::save_buffer_with_format(
                    &path,
                    &rgba,
                    width,
                    height,
                    ExtendedColorType::Rgba8,
                    ImageFormat::Png,
                )
                .map_err(|source| ExportError::Encode { path: path.clone(), source })?;
            }
        }

        self.written = number;
        info!("wrote frame {} ({}x{}) to {}", number, width, height, path.display());
        Ok(())
    }
}

/// A retired frame captured in memory
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub width: usize,
    pub height: usize,
    /// Packed 0xAARRGGBB, row 0 first
    pub pixels: Vec<u32>,
}

/// In-memory sink. Clones share the same frame list, so one clone can be
/// installed in a context while another is inspected.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    frames: Rc<RefCell<Vec<RecordedFrame>>>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn frame(&self, index: usize) -> Option<RecordedFrame> {
        self.frames.borrow().get(index).cloned()
    }

    pub fn frames(&self) -> Vec<RecordedFrame> {
        self.frames.borrow().clone()
    }
}

impl FrameSink for FrameRecorder {
    fn write_frame(&mut self, frame: &RenderTarget) -> Result<(), ExportError> {
        self.frames.borrow_mut().push(RecordedFrame {
            width: frame.width,
            height: frame.height,
            pixels: frame.pixels.clone(),
        });
        Ok(())
    }
}
