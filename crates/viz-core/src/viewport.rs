//! Canvas sizing: layout box in CSS pixels, backing store in device pixels.

use glam::Vec2;
use thiserror::Error;

/// Element box as reported by layout, in CSS pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutBox {
    pub width: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Backing-store size in device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BackingSize {
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportGeometry {
    pub width: f32,
    pub height: f32,
    pub dpr: f32,
}

impl Default for ViewportGeometry {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            dpr: 1.0,
        }
    }
}

impl ViewportGeometry {
    pub fn new(width: f32, height: f32, dpr: f32) -> Self {
        Self { width, height, dpr }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    #[inline]
    pub fn short_side(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn is_drawable(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn backing_size(&self) -> BackingSize {
        backing_for(self.width as f64, self.height as f64, self.dpr as f64)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ResizeError {
    #[error("element has no layout box")]
    Detached,
    #[error("layout box {width}x{height} has no area")]
    ZeroArea { width: f64, height: f64 },
    #[error("invalid device pixel ratio {0}")]
    InvalidRatio(f64),
}

/// Keeps the last good geometry; failed observations leave it untouched.
#[derive(Debug, Default)]
pub struct ResizeAdapter {
    geometry: ViewportGeometry,
}

impl ResizeAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn geometry(&self) -> ViewportGeometry {
        self.geometry
    }

    /// Recompute the backing store for a new layout box. `None` means the
    /// element is detached.
    pub fn resize(&mut self, layout: Option<LayoutBox>, dpr: f64) -> Result<BackingSize, ResizeError> {
        let layout = layout.ok_or(ResizeError::Detached)?;
        if !(dpr.is_finite() && dpr > 0.0) {
            return Err(ResizeError::InvalidRatio(dpr));
        }
        let has_area = layout.width.is_finite()
            && layout.height.is_finite()
            && layout.width > 0.0
            && layout.height > 0.0;
        if !has_area {
            return Err(ResizeError::ZeroArea {
                width: layout.width,
                height: layout.height,
            });
        }
        self.geometry = ViewportGeometry::new(layout.width as f32, layout.height as f32, dpr as f32);
        Ok(backing_for(layout.width, layout.height, dpr))
    }
}

#[inline]
fn backing_for(width: f64, height: f64, dpr: f64) -> BackingSize {
    let w_px = (width * dpr) as u32;
    let h_px = (height * dpr) as u32;
    BackingSize {
        width: w_px.max(1),
        height: h_px.max(1),
    }
}
