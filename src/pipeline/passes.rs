use crate::core::color::Colour;
use crate::core::geometry::CanvasPoint;
use crate::core::pipeline::ShadingInput;
use crate::core::rasterizer::Fill;
use crate::pipeline::materials::resolve_colour;
use crate::pipeline::raycaster::{Exclusion, RayTriangleIntersection, closest_intersection};
use crate::pipeline::renderer::Renderer;
use crate::pipeline::shading::{LightingMode, shade};
use crate::scene::context::RenderContext;
use crate::scene::mesh::Triangle;
use crate::scene::model::Scene;
use nalgebra::Vector3;
use rayon::prelude::*;

/// Projects all three vertices, or `None` if any of them is not in front of the camera.
fn project_triangle(
    triangle: &Triangle,
    context: &RenderContext,
    width: usize,
    height: usize,
) -> Option<[CanvasPoint; 3]> {
    let camera = &context.camera;
    if !triangle.vertices.iter().all(|v| camera.is_visible(v)) {
        return None;
    }
    Some(triangle.vertices.map(|v| camera.project_to_canvas(&v, width, height)))
}

/// Outlines every visible triangle in its material colour. No depth test.
pub fn render_wireframe_pass(renderer: &Renderer, scene: &Scene, context: &RenderContext) {
    let fb = &renderer.framebuffer;
    fb.clear(context.background);

    scene.triangles.par_iter().for_each(|triangle| {
        if let Some(points) = project_triangle(triangle, context, fb.width, fb.height) {
            let colour = scene.material(triangle).colour;
            renderer.rasterizer.draw_stroked_triangle(fb, &points, colour);
        }
    });
}

/// Depth-buffered scanline pass.
///
/// Triangles are filled in parallel; the framebuffer serialises each cell's depth test.
/// Untextured triangles are lit once at their centroid unless the lighting mode is flat.
pub fn render_rasterized_pass(renderer: &Renderer, scene: &Scene, context: &RenderContext) {
    let fb = &renderer.framebuffer;
    fb.clear(context.background);

    scene
        .triangles
        .par_iter()
        .enumerate()
        .for_each(|(index, triangle)| {
            let Some(mut points) = project_triangle(triangle, context, fb.width, fb.height) else {
                return;
            };
            let material = scene.material(triangle);

            let fill = match (&material.texture, triangle.texcoords) {
                (Some(texture), Some(texcoords)) if context.textured => {
                    for (point, uv) in points.iter_mut().zip(texcoords) {
                        point.texcoord = Some(uv);
                    }
                    Fill::Textured {
                        texture,
                        fallback: material.colour,
                    }
                }
                _ => Fill::Flat(flat_shaded_colour(scene, context, triangle, index, material.colour)),
            };

            renderer.rasterizer.fill_triangle(fb, points, fill);
        });
}

fn flat_shaded_colour(
    scene: &Scene,
    context: &RenderContext,
    triangle: &Triangle,
    index: usize,
    colour: Colour,
) -> Colour {
    if context.lighting_mode == LightingMode::Flat {
        return colour;
    }
    let third = 1.0 / 3.0;
    let input = ShadingInput {
        scene,
        triangle,
        triangle_index: Some(index),
        point: triangle.centroid(),
        u: third,
        v: third,
        light: context.light.position,
        eye: context.camera.position,
        params: &context.shading,
    };
    colour.scaled(shade(context.lighting_mode, &input, context.ambient))
}

/// One primary ray per pixel, through the pixel centre. Rows are traced in parallel.
///
/// The depth grid is reset first, so later depth-tested overlays see an empty frame.
pub fn render_raytraced_pass(renderer: &Renderer, scene: &Scene, context: &RenderContext) {
    let fb = &renderer.framebuffer;
    fb.clear(context.background);
    let (width, height) = (fb.width, fb.height);

    (0..height).into_par_iter().for_each(|y| {
        for x in 0..width {
            let colour = trace_pixel(scene, context, x, y, width, height);
            fb.set_pixel(x as i64, y as i64, colour);
        }
    });
}

/// Final colour of canvas pixel (x, y) in a `width x height` ray-traced frame.
pub fn trace_pixel(
    scene: &Scene,
    context: &RenderContext,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
) -> Colour {
    let camera = &context.camera;
    let direction = camera.pixel_ray_direction(x as f32 + 0.5, y as f32 + 0.5, width, height);
    let hit = closest_intersection(&camera.position, &direction, scene, Exclusion::NONE);
    shade_hit(scene, context, &hit, &direction)
}

/// Lights a primary hit: resolve the material colour, then scale it by the lighting mode.
/// A miss shows the background.
pub fn shade_hit(
    scene: &Scene,
    context: &RenderContext,
    hit: &RayTriangleIntersection,
    direction: &Vector3<f32>,
) -> Colour {
    if !hit.is_hit() {
        return context.background;
    }
    let base = resolve_colour(hit, direction, scene, &context.shading, context.background);
    let input = ShadingInput {
        scene,
        triangle: &hit.triangle,
        triangle_index: hit.triangle_index,
        point: hit.point,
        u: hit.u,
        v: hit.v,
        light: context.light.position,
        eye: context.camera.position,
        params: &context.shading,
    };
    base.scaled(shade(context.lighting_mode, &input, context.ambient))
}
