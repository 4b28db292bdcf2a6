//! Externally resolved resources: fonts, still images and live video frames.
//!
//! The renderer never loads or decodes these itself. Handles carry a caller-assigned `id` that
//! identifies the content for caching; two handles with the same id must hold the same bytes.

use crate::foundation::core::FrameRGBA;
use crate::foundation::error::{RenderError, RenderResult};
use std::sync::{Arc, PoisonError, RwLock};

/// Font file bytes (TTF/OTF) supplied by the font manager.
#[derive(Clone)]
pub struct FontHandle {
    id: u64,
    data: Arc<Vec<u8>>,
}

impl FontHandle {
    /// Wrap font bytes under a stable id.
    pub fn new(id: u64, data: Vec<u8>) -> Self {
        Self {
            id,
            data: Arc::new(data),
        }
    }

    /// Content id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Raw font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }
}

impl std::fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontHandle")
            .field("id", &self.id)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Decoded still image in premultiplied RGBA8.
#[derive(Clone, Debug)]
pub struct ImageHandle {
    id: u64,
    frame: Arc<FrameRGBA>,
}

impl ImageHandle {
    /// Wrap an already premultiplied frame.
    pub fn new(id: u64, frame: FrameRGBA) -> RenderResult<Self> {
        if frame.width == 0 || frame.height == 0 {
            return Err(RenderError::validation("image must not be empty"));
        }
        let frame = FrameRGBA::from_premul_bytes(frame.width, frame.height, frame.data)?;
        Ok(Self {
            id,
            frame: Arc::new(frame),
        })
    }

    /// Premultiply straight-alpha RGBA8 bytes (as produced by most decoders).
    pub fn from_straight_rgba(
        id: u64,
        width: u32,
        height: u32,
        rgba: &[u8],
    ) -> RenderResult<Self> {
        let mut data = rgba.to_vec();
        premultiply_rgba8_in_place(&mut data);
        Self::new(id, FrameRGBA::from_premul_bytes(width, height, data)?)
    }

    /// Content id.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Pixels.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }
}

/// Latest decoded frame of a playing video.
///
/// The decoder thread calls [`LiveFrame::publish`]; the renderer calls [`LiveFrame::latest`].
/// Publishing swaps a single pointer, so readers observe either the previous or the new frame,
/// never a partially written one. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct LiveFrame {
    slot: Arc<RwLock<Option<Arc<FrameRGBA>>>>,
}

impl LiveFrame {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current frame.
    pub fn publish(&self, frame: FrameRGBA) {
        let frame = Arc::new(frame);
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Some(frame);
    }

    /// Drop the current frame (e.g. when playback stops).
    pub fn clear(&self) {
        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;
    }

    /// Most recently published frame, if any.
    pub fn latest(&self) -> Option<Arc<FrameRGBA>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether two handles share a slot.
    pub fn same_slot(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slide/resources.rs"]
mod tests;
