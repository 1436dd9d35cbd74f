use crate::core::color::Colour;
use crate::core::framebuffer::FrameBuffer;
use crate::core::geometry::CanvasPoint;
use crate::core::math::interpolation::inverse_lerp;
use crate::scene::texture::Texture;
use rand::Rng;

/// What a filled triangle writes into each covered pixel.
#[derive(Debug, Clone, Copy)]
pub enum Fill<'a> {
    Flat(Colour),
    /// Sample `texture` at the interpolated texture coordinate. Pixels whose points carry
    /// no texture coordinate take `fallback`.
    Textured {
        texture: &'a Texture,
        fallback: Colour,
    },
}

impl Fill<'_> {
    #[inline]
    fn colour_at(&self, point: &CanvasPoint) -> Colour {
        match self {
            Fill::Flat(colour) => *colour,
            Fill::Textured { texture, fallback } => point
                .texcoord
                .map(|uv| texture.sample(uv))
                .unwrap_or(*fallback),
        }
    }
}

/// Scan-converts canvas-space triangles and lines into a [`FrameBuffer`].
///
/// Pixel (x, y) covers `[x, x + 1) x [y, y + 1)` and is sampled at its centre, the same
/// point the ray tracer shoots through. Coverage is half-open on the right and bottom
/// edges, so triangles sharing an edge never both claim a pixel centre lying on it.
#[derive(Debug, Default, Clone, Copy)]
pub struct Rasterizer;

impl Rasterizer {
    pub fn new() -> Self {
        Self
    }

    /// Depth-tested triangle fill.
    ///
    /// Vertices are sorted by y and the triangle is split on its long edge at the middle
    /// vertex's height, giving a flat-bottom upper half and a flat-top lower half. Depth
    /// and texture coordinates interpolate linearly, first along the edges then across
    /// each span. A pixel is written only when `1 / |depth|` beats the buffer.
    pub fn fill_triangle(&self, framebuffer: &FrameBuffer, points: [CanvasPoint; 3], fill: Fill) {
        if points
            .iter()
            .any(|p| !(p.x.is_finite() && p.y.is_finite() && p.depth.is_finite()))
        {
            return;
        }

        let mut sorted = points;
        sorted.sort_by(|a, b| a.y.total_cmp(&b.y));
        let [top, mid, bottom] = sorted;

        // Point on the long edge level with the middle vertex.
        let split = top.lerp(&bottom, inverse_lerp(top.y, bottom.y, mid.y));

        self.fill_half(framebuffer, &top, (&mid, &split), top.y, mid.y, &fill);
        self.fill_half(framebuffer, &bottom, (&mid, &split), mid.y, bottom.y, &fill);
    }

    /// Fills the rows whose centres lie in `[y_from, y_to)`, bounded by the two edges
    /// running from `apex` to the ends of the horizontal `base`.
    fn fill_half(
        &self,
        framebuffer: &FrameBuffer,
        apex: &CanvasPoint,
        base: (&CanvasPoint, &CanvasPoint),
        y_from: f32,
        y_to: f32,
        fill: &Fill,
    ) {
        let base_y = base.0.y;
        let first_row = (y_from - 0.5).ceil().max(0.0) as i64;
        let end_row = ((y_to - 0.5).ceil()).min(framebuffer.height as f32) as i64;

        for y in first_row..end_row {
            let centre_y = y as f32 + 0.5;
            // Zero-height halves produce no rows, so this never divides by zero.
            let t = inverse_lerp(apex.y, base_y, centre_y);
            let a = apex.lerp(base.0, t);
            let b = apex.lerp(base.1, t);
            let (left, right) = if a.x <= b.x { (a, b) } else { (b, a) };
            self.fill_span(framebuffer, y, &left, &right, fill);
        }
    }

    fn fill_span(
        &self,
        framebuffer: &FrameBuffer,
        y: i64,
        left: &CanvasPoint,
        right: &CanvasPoint,
        fill: &Fill,
    ) {
        let first = (left.x - 0.5).ceil().max(0.0) as i64;
        let end = (right.x - 0.5).ceil().min(framebuffer.width as f32) as i64;

        for x in first..end {
            let t = inverse_lerp(left.x, right.x, x as f32 + 0.5);
            let point = left.lerp(right, t);
            let depth = point.depth.abs();
            if depth <= f32::EPSILON {
                continue;
            }
            framebuffer.write_if_closer(x, y, 1.0 / depth, fill.colour_at(&point));
        }
    }

    /// DDA line, no depth test. `steps = max(|dx|, |dy|)`; both end points are drawn.
    ///
    /// The segment is first clipped to the canvas (plus a one-pixel margin), so the step
    /// count is bounded by the canvas size however far off-canvas an end point projects.
    pub fn draw_line(&self, framebuffer: &FrameBuffer, from: &CanvasPoint, to: &CanvasPoint, colour: Colour) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        if !(from.x.is_finite() && from.y.is_finite() && dx.is_finite() && dy.is_finite()) {
            return;
        }
        let max = (framebuffer.width as f32 + 1.0, framebuffer.height as f32 + 1.0);
        let Some((t0, t1)) = clip_segment((from.x, from.y), (dx, dy), (-1.0, -1.0), max) else {
            return;
        };
        let (x0, y0) = if t0 > 0.0 { (from.x + dx * t0, from.y + dy * t0) } else { (from.x, from.y) };
        let (x1, y1) = if t1 < 1.0 { (from.x + dx * t1, from.y + dy * t1) } else { (to.x, to.y) };

        let (dx, dy) = (x1 - x0, y1 - y0);
        let steps = dx.abs().max(dy.abs()).ceil() as usize;
        if steps > 0 {
            let (step_x, step_y) = (dx / steps as f32, dy / steps as f32);
            for i in 0..steps {
                let (x, y) = (x0 + step_x * i as f32, y0 + step_y * i as f32);
                framebuffer.set_pixel(x.floor() as i64, y.floor() as i64, colour);
            }
        }
        framebuffer.set_pixel(x1.floor() as i64, y1.floor() as i64, colour);
    }

    pub fn draw_stroked_triangle(&self, framebuffer: &FrameBuffer, points: &[CanvasPoint; 3], colour: Colour) {
        self.draw_line(framebuffer, &points[0], &points[1], colour);
        self.draw_line(framebuffer, &points[1], &points[2], colour);
        self.draw_line(framebuffer, &points[2], &points[0], colour);
    }
}

/// Liang-Barsky: the parameter range `[t0, t1]` of `origin + t * delta`, `t` in `[0, 1]`,
/// that lies inside the rectangle `min..=max`. `None` when the segment misses it.
fn clip_segment(origin: (f32, f32), delta: (f32, f32), min: (f32, f32), max: (f32, f32)) -> Option<(f32, f32)> {
    let (mut t0, mut t1) = (0.0_f32, 1.0_f32);
    let edges = [
        (-delta.0, origin.0 - min.0),
        (delta.0, max.0 - origin.0),
        (-delta.1, origin.1 - min.1),
        (delta.1, max.1 - origin.1),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }
    Some((t0, t1))
}

//=================================
// Random triangles
//=================================

/// Three random canvas points inside a `width x height` canvas, all at unit depth.
pub fn random_triangle<R: Rng>(rng: &mut R, width: usize, height: usize) -> [CanvasPoint; 3] {
    let w = width.max(1) as f32;
    let h = height.max(1) as f32;
    std::array::from_fn(|_| CanvasPoint::new(rng.random_range(0.0..w), rng.random_range(0.0..h), -1.0))
}

pub fn random_colour<R: Rng>(rng: &mut R) -> Colour {
    Colour::new(rng.random(), rng.random(), rng.random())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector2;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const RED: Colour = Colour::new(255, 0, 0);
    const GREEN: Colour = Colour::new(0, 255, 0);

    fn covered(fb: &FrameBuffer, colour: Colour) -> usize {
        let packed = colour.to_argb();
        fb.to_packed().iter().filter(|&&p| p == packed).count()
    }

    fn square_half(depth: f32) -> [CanvasPoint; 3] {
        [
            CanvasPoint::new(2.0, 2.0, depth),
            CanvasPoint::new(18.0, 2.0, depth),
            CanvasPoint::new(2.0, 18.0, depth),
        ]
    }

    #[test]
    fn fills_interior_and_respects_bounds() {
        let fb = FrameBuffer::new(20, 20);
        Rasterizer::new().fill_triangle(&fb, square_half(-2.0), Fill::Flat(RED));

        assert_eq!(fb.get_pixel(3, 3), Some(RED));
        assert_eq!(fb.get_pixel(16, 16), Some(Colour::BLACK));
        // Half of a 16x16 square, give or take the diagonal.
        let n = covered(&fb, RED);
        assert!((120..=136).contains(&n), "covered {n}");
        assert!((fb.depth_at(3, 3).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn closer_triangle_wins_regardless_of_order() {
        for near_first in [true, false] {
            let fb = FrameBuffer::new(20, 20);
            let r = Rasterizer::new();
            let near = (square_half(-1.0), Fill::Flat(RED));
            let far = (square_half(-5.0), Fill::Flat(GREEN));
            let order = if near_first { [near, far] } else { [far, near] };
            for (points, fill) in order {
                r.fill_triangle(&fb, points, fill);
            }
            assert_eq!(fb.get_pixel(4, 4), Some(RED));
            assert_eq!(covered(&fb, GREEN), 0);
        }
    }

    #[test]
    fn second_identical_pass_changes_nothing() {
        let fb = FrameBuffer::new(20, 20);
        let r = Rasterizer::new();
        r.fill_triangle(&fb, square_half(-3.0), Fill::Flat(RED));
        let first = fb.to_packed();
        r.fill_triangle(&fb, square_half(-3.0), Fill::Flat(GREEN));
        assert_eq!(fb.to_packed(), first);
    }

    #[test]
    fn degenerate_triangles_are_skipped() {
        let fb = FrameBuffer::new(10, 10);
        let r = Rasterizer::new();
        let flat = [
            CanvasPoint::new(1.0, 4.0, -1.0),
            CanvasPoint::new(5.0, 4.0, -1.0),
            CanvasPoint::new(8.0, 4.0, -1.0),
        ];
        let point = [CanvasPoint::new(3.0, 3.0, -1.0); 3];
        let nan = [
            CanvasPoint::new(f32::NAN, 1.0, -1.0),
            CanvasPoint::new(5.0, 4.0, -1.0),
            CanvasPoint::new(8.0, 9.0, -1.0),
        ];
        for tri in [flat, point, nan] {
            r.fill_triangle(&fb, tri, Fill::Flat(RED));
        }
        assert_eq!(covered(&fb, RED), 0);
        assert!((0..10).all(|y| (0..10).all(|x| fb.depth_at(x, y) == Some(0.0))));
    }

    #[test]
    fn off_canvas_pixels_are_dropped() {
        let fb = FrameBuffer::new(8, 8);
        let huge = [
            CanvasPoint::new(-100.0, -100.0, -1.0),
            CanvasPoint::new(500.0, -50.0, -1.0),
            CanvasPoint::new(-20.0, 400.0, -1.0),
        ];
        Rasterizer::new().fill_triangle(&fb, huge, Fill::Flat(RED));
        assert_eq!(covered(&fb, RED), 64);
    }

    #[test]
    fn textured_fill_samples_texture() {
        let blue = Colour::new(0, 0, 255);
        let texture = Texture::new(1, 1, vec![blue.to_argb()]);
        let points = square_half(-1.0).map(|p| p.with_texcoord(Vector2::new(0.5, 0.5)));
        let fb = FrameBuffer::new(20, 20);
        Rasterizer::new().fill_triangle(
            &fb,
            points,
            Fill::Textured {
                texture: &texture,
                fallback: RED,
            },
        );
        assert_eq!(fb.get_pixel(4, 4), Some(blue));
        assert_eq!(covered(&fb, RED), 0);
    }

    #[test]
    fn lines_reach_both_ends() {
        let fb = FrameBuffer::new(10, 10);
        let r = Rasterizer::new();
        r.draw_line(&fb, &CanvasPoint::new(1.0, 1.0, 0.0), &CanvasPoint::new(8.0, 4.0, 0.0), RED);
        assert_eq!(fb.get_pixel(1, 1), Some(RED));
        assert_eq!(fb.get_pixel(8, 4), Some(RED));
        assert_eq!(covered(&fb, RED), 8);

        r.draw_line(&fb, &CanvasPoint::new(-5.0, 20.0, 0.0), &CanvasPoint::new(30.0, -7.0, 0.0), GREEN);
    }

    #[test]
    fn far_off_canvas_end_points_are_clipped() {
        let fb = FrameBuffer::new(16, 12);
        let r = Rasterizer::new();
        // One end projected from just past the near plane.
        r.draw_line(&fb, &CanvasPoint::new(2.0, 5.0, 0.0), &CanvasPoint::new(1.3e8, 5.0, 0.0), RED);
        assert_eq!(covered(&fb, RED), 14);
        assert_eq!(fb.get_pixel(15, 5), Some(RED));

        // Entirely outside: nothing drawn.
        r.draw_line(&fb, &CanvasPoint::new(-1e9, -50.0, 0.0), &CanvasPoint::new(1e9, -40.0, 0.0), GREEN);
        assert_eq!(covered(&fb, GREEN), 0);
    }

    #[test]
    fn clip_keeps_inside_segments_whole() {
        assert_eq!(clip_segment((1.0, 1.0), (3.0, 2.0), (0.0, 0.0), (10.0, 10.0)), Some((0.0, 1.0)));
        let (t0, t1) = clip_segment((-10.0, 5.0), (20.0, 0.0), (0.0, 0.0), (10.0, 10.0)).unwrap();
        assert!((t0 - 0.5).abs() < 1e-6 && (t1 - 1.0).abs() < 1e-6);
        assert_eq!(clip_segment((-5.0, -5.0), (0.0, 3.0), (0.0, 0.0), (10.0, 10.0)), None);
    }

    #[test]
    fn random_triangles_stay_on_canvas() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            for p in random_triangle(&mut rng, 64, 32) {
                assert!((0.0..64.0).contains(&p.x) && (0.0..32.0).contains(&p.y));
            }
        }
        let fb = FrameBuffer::new(64, 32);
        let tri = random_triangle(&mut rng, 64, 32);
        Rasterizer::new().draw_stroked_triangle(&fb, &tri, random_colour(&mut rng));
    }
}
