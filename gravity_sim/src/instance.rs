//! Renderer-facing views of the world
//!
//! Nothing here mutates a [`World`]; renderers read bodies through these
//! plain data types and the camera projection.

use common::{Camera2D, DVec3};

use crate::body::{Body, Rgb};
use crate::world::World;

/// Pixel radius of a body disc when it is on screen
pub const MARKER_RADIUS: f32 = 10.0;

/// Instance data for GPU rendering
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ParticleInstance {
    pub position: [f32; 3],
    pub radius: f32,
    pub color: [f32; 4],
}

impl ParticleInstance {
    pub fn from_body(body: &Body) -> Self {
        Self {
            position: body.pos.as_vec3().to_array(),
            radius: body.radius() as f32,
            color: rgba(body.color),
        }
    }
}

/// Instances for every body, back to front
pub fn particle_instances(world: &World) -> Vec<ParticleInstance> {
    world.bodies().iter().map(ParticleInstance::from_body).collect()
}

fn rgba([r, g, b]: Rgb) -> [f32; 4] {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// A disc to draw on a raster viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenMarker {
    pub pixel: (i32, i32),
    pub radius: f32,
    pub color: Rgb,
    pub on_screen: bool,
}

impl ScreenMarker {
    /// Off-screen bodies shrink to half size and stick to the nearest edge
    pub fn for_body(body: &Body, camera: &Camera2D) -> Self {
        Self::at(body.pos, body.color, camera)
    }

    pub fn at(pos: DVec3, color: Rgb, camera: &Camera2D) -> Self {
        let pixel = camera.world_to_screen(pos.truncate());
        let on_screen = camera.is_visible(pixel);
        let radius = if on_screen { MARKER_RADIUS } else { MARKER_RADIUS / 2.0 };

        Self {
            pixel: camera.clamp_to_viewport(pixel),
            radius,
            color,
            on_screen,
        }
    }
}

/// Markers for every body, back to front
pub fn screen_markers(world: &World, camera: &Camera2D) -> Vec<ScreenMarker> {
    world
        .bodies()
        .iter()
        .map(|b| ScreenMarker::for_body(b, camera))
        .collect()
}

/// Pixel of a reference cross (origin or center of mass), if it is on screen
pub fn cross_pixel(pos: DVec3, camera: &Camera2D) -> Option<(i32, i32)> {
    let pixel = camera.world_to_screen(pos.truncate());
    camera.is_visible(pixel).then_some(pixel)
}

/// Trail of a body projected to pixels, oldest first
pub fn trail_pixels(body: &Body, camera: &Camera2D) -> Vec<(i32, i32)> {
    body.trajectory()
        .map(|p| camera.world_to_screen(p.truncate()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::WHITE;

    fn world() -> World {
        let mut world = World::new(0.1, 1.0).unwrap();
        world
            .set_bodies(vec![
                Body::new(1000.0, DVec3::new(-10.0, 0.0, 0.0), DVec3::ZERO, [255, 0, 0]).unwrap(),
                Body::new(1000.0, DVec3::new(10.0, 0.0, 0.0), DVec3::ZERO, WHITE).unwrap(),
            ])
            .unwrap();
        world
    }

    #[test]
    fn instances_mirror_bodies() {
        let instances = particle_instances(&world());
        assert_eq!(instances.len(), 2);
        assert_eq!(instances[0].position, [-10.0, 0.0, 0.0]);
        assert_eq!(instances[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert!((instances[0].radius - 0.5).abs() < 1e-6);

        let bytes: &[u8] = bytemuck::cast_slice(&instances);
        assert_eq!(bytes.len(), 2 * std::mem::size_of::<ParticleInstance>());
    }

    #[test]
    fn off_screen_markers_shrink_and_pin() {
        let world = world();
        let mut camera = Camera2D::new(800, 600);
        camera.fit_to_bodies(world.bodies());

        let markers = screen_markers(&world, &camera);
        assert!(markers.iter().all(|m| m.on_screen && m.radius == MARKER_RADIUS));

        let far = ScreenMarker::at(DVec3::new(1e6, 0.0, 0.0), WHITE, &camera);
        assert!(!far.on_screen);
        assert_eq!(far.radius, MARKER_RADIUS / 2.0);
        assert_eq!(far.pixel.0, 800);
    }

    #[test]
    fn cross_hidden_when_off_screen() {
        let mut camera = Camera2D::new(800, 600);
        camera.fit_to_points([common::DVec2::ZERO]);
        assert_eq!(cross_pixel(DVec3::ZERO, &camera), Some((400, 300)));
        assert_eq!(cross_pixel(DVec3::new(-1e4, 0.0, 0.0), &camera), None);
    }

    #[test]
    fn trail_projects_history() {
        let mut world = world();
        let camera = Camera2D::new(800, 600);
        world.step_time();
        world.step_time();
        assert_eq!(trail_pixels(&world.bodies()[0], &camera).len(), 2);
    }
}
