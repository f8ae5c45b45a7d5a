use cgmath::{InnerSpace, Rotation};

use super::camera::ControlledCamera;
use super::math::{Quat, Vec3};
use super::ui::Point2;

const HALF_EXTENT: f64 = 2.0;
const NEAR: f64 = -2.0;
const FAR: f64 = 2000.0;
const DISTANCE: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn at(&self, t: f64) -> Vec3 {
        self.origin + self.direction * t
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoProjection {
    pub half_extent: f64,
    pub near: f64,
    pub far: f64,
    pub position: Vec3,
    pub orientation: Quat,
    pub up: Vec3,
}

impl Default for OrthoProjection {
    fn default() -> Self {
        Self {
            half_extent: HALF_EXTENT,
            near: NEAR,
            far: FAR,
            position: Vec3::new(0.0, 0.0, DISTANCE),
            orientation: Quat::new(1.0, 0.0, 0.0, 0.0),
            up: Vec3::unit_y(),
        }
    }
}

impl OrthoProjection {
    pub fn sync_from<C: ControlledCamera + ?Sized>(&mut self, camera: &C) {
        let orientation = camera.orientation();
        self.orientation = orientation;
        self.position = orientation.rotate_vector(Vec3::unit_z()) * DISTANCE;
        self.up = camera.up();
    }

    pub fn right(&self) -> Vec3 {
        self.orientation.rotate_vector(Vec3::unit_x())
    }

    pub fn screen_up(&self) -> Vec3 {
        self.orientation.rotate_vector(Vec3::unit_y())
    }

    pub fn forward(&self) -> Vec3 {
        self.orientation.rotate_vector(-Vec3::unit_z())
    }

    pub fn ray_from_ndc(&self, ndc: Point2) -> Ray {
        let origin = self.position
            + self.right() * (ndc.x * self.half_extent)
            + self.screen_up() * (ndc.y * self.half_extent);
        Ray {
            origin,
            direction: self.forward().normalize(),
        }
    }

    pub fn project(&self, point: Vec3) -> Point2 {
        let offset = point - self.position;
        Point2::new(
            offset.dot(self.right()) / self.half_extent,
            offset.dot(self.screen_up()) / self.half_extent,
        )
    }
}
