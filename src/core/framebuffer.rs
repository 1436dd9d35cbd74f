use crate::core::color::Colour;
use atomic_float::AtomicF32;
use rayon::prelude::*;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};

/// Depth score stored in freshly cleared cells. Any visible fragment scores higher.
pub const EMPTY_DEPTH: f32 = 0.0;

/// A width x height grid of packed ARGB colours plus a parallel grid of inverse depths.
///
/// Safe to share across rayon workers: colour cells are atomics, and the depth
/// compare-then-write for a cell is serialised by a striped lock so two triangles
/// covering the same pixel cannot interleave their test and their write.
pub struct FrameBuffer {
    pub width: usize,
    pub height: usize,

    color_buffer: Vec<AtomicU32>,

    /// Inverse camera-space depth (`1 / |z|`), larger is closer.
    depth_buffer: Vec<AtomicF32>,

    /// Striped locks guarding the depth test. Pixel index maps to a lock by modulo.
    locks: Vec<Mutex<()>>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        let background = Colour::BLACK.to_argb();

        // A pool of locks keeps memory flat compared to one lock per pixel.
        let lock_count = 1024;

        Self {
            width,
            height,
            color_buffer: (0..size).map(|_| AtomicU32::new(background)).collect(),
            depth_buffer: (0..size).map(|_| AtomicF32::new(EMPTY_DEPTH)).collect(),
            locks: (0..lock_count).map(|_| Mutex::new(())).collect(),
        }
    }

    /// Resets every colour cell to `background` and every depth cell to the empty sentinel.
    pub fn clear(&self, background: Colour) {
        let packed = background.to_argb();
        self.color_buffer
            .par_iter()
            .for_each(|cell| cell.store(packed, Ordering::Relaxed));
        self.depth_buffer
            .par_iter()
            .for_each(|cell| cell.store(EMPTY_DEPTH, Ordering::Relaxed));
    }

    #[inline(always)]
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    /// Writes `colour` at (x, y) when `depth_score` beats the stored score.
    ///
    /// Returns true if the pixel was written. Out-of-bounds coordinates are dropped.
    #[inline]
    pub fn write_if_closer(&self, x: i64, y: i64, depth_score: f32, colour: Colour) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        if !depth_score.is_finite() {
            return false;
        }

        let lock_idx = idx % self.locks.len();
        // A poisoned stripe only means another worker panicked mid-frame; the cells are still valid.
        let _guard = self.locks[lock_idx]
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let depth = &self.depth_buffer[idx];
        if depth_score <= depth.load(Ordering::Relaxed) {
            return false;
        }
        depth.store(depth_score, Ordering::Relaxed);
        self.color_buffer[idx].store(colour.to_argb(), Ordering::Relaxed);
        true
    }

    /// Unconditional pixel write, used by the ray tracer and the wireframe pass.
    #[inline]
    pub fn set_pixel(&self, x: i64, y: i64, colour: Colour) {
        if let Some(idx) = self.index(x, y) {
            self.color_buffer[idx].store(colour.to_argb(), Ordering::Relaxed);
        }
    }

    pub fn get_pixel(&self, x: usize, y: usize) -> Option<Colour> {
        self.packed_pixel(x, y).map(Colour::from_argb)
    }

    pub fn packed_pixel(&self, x: usize, y: usize) -> Option<u32> {
        self.index(x as i64, y as i64)
            .map(|idx| self.color_buffer[idx].load(Ordering::Relaxed))
    }

    pub fn depth_at(&self, x: usize, y: usize) -> Option<f32> {
        self.index(x as i64, y as i64)
            .map(|idx| self.depth_buffer[idx].load(Ordering::Relaxed))
    }

    /// Copies the colour grid out row-major, ready for a display surface or an image encoder.
    pub fn to_packed(&self) -> Vec<u32> {
        self.color_buffer
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rayon::prelude::*;

    #[test]
    fn nearer_fragment_wins_regardless_of_order() {
        let fb = FrameBuffer::new(4, 4);
        let red = Colour::new(255, 0, 0);
        let blue = Colour::new(0, 0, 255);

        assert!(fb.write_if_closer(1, 1, 0.5, red));
        assert!(!fb.write_if_closer(1, 1, 0.25, blue));
        assert_eq!(fb.get_pixel(1, 1), Some(red));

        assert!(fb.write_if_closer(2, 2, 0.25, blue));
        assert!(fb.write_if_closer(2, 2, 0.5, red));
        assert_eq!(fb.get_pixel(2, 2), Some(red));
    }

    #[test]
    fn equal_depth_does_not_overwrite() {
        let fb = FrameBuffer::new(2, 2);
        assert!(fb.write_if_closer(0, 0, 0.2, Colour::WHITE));
        assert!(!fb.write_if_closer(0, 0, 0.2, Colour::new(1, 2, 3)));
        assert_eq!(fb.get_pixel(0, 0), Some(Colour::WHITE));
    }

    #[test]
    fn out_of_bounds_writes_are_dropped() {
        let fb = FrameBuffer::new(3, 2);
        assert!(!fb.write_if_closer(-1, 0, 1.0, Colour::WHITE));
        assert!(!fb.write_if_closer(3, 0, 1.0, Colour::WHITE));
        assert!(!fb.write_if_closer(0, 2, 1.0, Colour::WHITE));
        fb.set_pixel(100, 100, Colour::WHITE);
        assert!(fb.to_packed().iter().all(|&p| p == Colour::BLACK.to_argb()));
        assert_eq!(fb.get_pixel(3, 0), None);
    }

    #[test]
    fn clear_resets_colour_and_depth() {
        let fb = FrameBuffer::new(2, 2);
        fb.write_if_closer(1, 1, 3.0, Colour::WHITE);
        fb.clear(Colour::new(9, 9, 9));
        assert_eq!(fb.get_pixel(1, 1), Some(Colour::new(9, 9, 9)));
        assert_eq!(fb.depth_at(1, 1), Some(EMPTY_DEPTH));
    }

    #[test]
    fn clear_covers_every_cell_of_a_full_frame() {
        let fb = FrameBuffer::new(640, 480);
        fb.write_if_closer(0, 0, 1.0, Colour::WHITE);
        fb.write_if_closer(639, 479, 1.0, Colour::WHITE);
        let sky = Colour::new(0, 0, 90);
        fb.clear(sky);
        assert!(fb.to_packed().iter().all(|&p| p == sky.to_argb()));
        assert_eq!(fb.depth_at(639, 479), Some(EMPTY_DEPTH));
    }

    #[test]
    fn concurrent_writers_keep_the_nearest() {
        let fb = FrameBuffer::new(8, 8);
        (1..=200u32).into_par_iter().for_each(|i| {
            let depth = i as f32 / 200.0;
            let colour = Colour::new((i % 256) as u8, 0, 0);
            fb.write_if_closer(3, 5, depth, colour);
        });
        assert_eq!(fb.depth_at(3, 5), Some(1.0));
        assert_eq!(fb.get_pixel(3, 5), Some(Colour::new(200, 0, 0)));
    }
}
