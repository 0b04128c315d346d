//! Synthetic per-band intensity signal standing in for audio analysis.

use crate::constants::{BAND_COUNT, LEVEL_DECAY, LEVEL_FLOOR};
use rand::prelude::*;

/// Eight band intensities, each kept in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IntensityVector([f32; BAND_COUNT]);

impl IntensityVector {
    pub const ZERO: Self = Self([0.0; BAND_COUNT]);

    /// Build from any slice: missing bands read as 0, extra bands are dropped.
    pub fn from_slice(values: &[f32]) -> Self {
        let mut bands = [0.0; BAND_COUNT];
        for (dst, src) in bands.iter_mut().zip(values) {
            *dst = sanitize(*src);
        }
        Self(bands)
    }

    #[inline]
    pub fn bands(&self) -> &[f32; BAND_COUNT] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        BAND_COUNT
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Band lookup that wraps around, so any index is valid.
    #[inline]
    pub fn cyclic(&self, index: usize) -> f32 {
        self.0[index % BAND_COUNT]
    }

    pub fn average(&self) -> f32 {
        self.0.iter().sum::<f32>() / BAND_COUNT as f32
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
    }

    fn scaled(&self, factor: f32) -> Self {
        let mut out = self.0;
        for v in &mut out {
            *v = sanitize(*v * factor);
        }
        Self(out)
    }
}

#[inline]
fn sanitize(v: f32) -> f32 {
    if v.is_finite() {
        v.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub struct LevelGenerator {
    rng: StdRng,
    current: IntensityVector,
    floor: f32,
    decay: f32,
}

impl LevelGenerator {
    pub fn new(floor: f32, decay: f32, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            current: IntensityVector::ZERO,
            floor: floor.clamp(0.0, 1.0),
            decay: decay.clamp(0.0, 1.0),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(LEVEL_FLOOR, LEVEL_DECAY, Some(seed))
    }

    #[inline]
    pub fn current(&self) -> IntensityVector {
        self.current
    }

    /// Advance one period. Playing resamples every band in `[floor, 1]`;
    /// paused decays the previous vector.
    pub fn tick(&mut self, active: bool) -> IntensityVector {
        self.current = if active {
            let span = 1.0 - self.floor;
            let mut bands = [0.0; BAND_COUNT];
            for b in &mut bands {
                *b = self.floor + self.rng.gen::<f32>() * span;
            }
            IntensityVector(bands)
        } else {
            self.current.scaled(self.decay)
        };
        self.current
    }
}

impl Default for LevelGenerator {
    fn default() -> Self {
        Self::new(LEVEL_FLOOR, LEVEL_DECAY, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_slice_pads_and_clamps() {
        let v = IntensityVector::from_slice(&[0.5, 2.0, -1.0, f32::NAN]);
        assert_eq!(v.bands(), &[0.5, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(IntensityVector::from_slice(&[]), IntensityVector::ZERO);
    }

    #[test]
    fn cyclic_wraps() {
        let v = IntensityVector::from_slice(&[0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7, 0.8]);
        assert_eq!(v.cyclic(9), 0.2);
        assert_eq!(v.cyclic(15), 0.8);
    }

    #[test]
    fn starts_silent() {
        let gen = LevelGenerator::with_seed(1);
        assert_eq!(gen.current().average(), 0.0);
    }
}
