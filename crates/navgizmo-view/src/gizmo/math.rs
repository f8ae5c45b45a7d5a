use cgmath::{InnerSpace, Matrix3, Quaternion, Rad, Rotation, Rotation3, Vector3};

use super::ui::Point2;

pub type Vec3 = Vector3<f64>;
pub type Quat = Quaternion<f64>;

pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

pub fn to_ndc(pixel: Point2, width: f64, height: f64) -> Point2 {
    Point2::new(2.0 * pixel.x / width - 1.0, 1.0 - 2.0 * pixel.y / height)
}

pub fn ndc_to_pixel(ndc: Point2, width: f64, height: f64) -> Point2 {
    Point2::new((ndc.x + 1.0) * 0.5 * width, (1.0 - ndc.y) * 0.5 * height)
}

pub fn to_unit_square(pixel: Point2, width: f64, height: f64) -> Point2 {
    Point2::new(pixel.x / width, 1.0 - pixel.y / height)
}

pub fn normalize_or_zero(v: Vec3) -> Vec3 {
    let len = v.magnitude();
    if len <= f64::EPSILON { ZERO } else { v / len }
}

pub fn angle_between(a: Quat, b: Quat) -> f64 {
    2.0 * a.dot(b).clamp(-1.0, 1.0).abs().acos()
}

pub fn rotate_towards(current: Quat, target: Quat, max_step: f64) -> Quat {
    let angle = angle_between(current, target);
    // Returns `target` itself on the last step so completion can compare exactly.
    if angle == 0.0 || angle <= max_step {
        return target;
    }
    current.slerp(target, max_step / angle).normalize()
}

pub fn rotate_around_axis(point: Vec3, origin: Vec3, axis: Vec3, angle: f64) -> Vec3 {
    let rotation = Quat::from_axis_angle(axis, Rad(angle));
    origin + rotation.rotate_vector(point - origin)
}

pub fn look_at_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Quat {
    let mut z = eye - target;
    if z.magnitude2() == 0.0 {
        z.z = 1.0;
    }
    z = z.normalize();
    let mut x = up.cross(z);
    if x.magnitude2() == 0.0 {
        // up and view direction are parallel; nudge the view direction off the pole.
        if up.z.abs() == 1.0 {
            z.x += 1.0e-4;
        } else {
            z.z += 1.0e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    let x = x.normalize();
    let y = z.cross(x);
    Quat::from(Matrix3::from_cols(x, y, z)).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gizmo::ui::pos2;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn approx_vec(a: Vec3, b: Vec3) -> bool {
        (a - b).magnitude() < 1e-9
    }

    #[test]
    fn ndc_corners() {
        assert_eq!(to_ndc(pos2(0.0, 0.0), 200.0, 200.0), pos2(-1.0, 1.0));
        assert_eq!(to_ndc(pos2(200.0, 200.0), 200.0, 200.0), pos2(1.0, -1.0));
        assert_eq!(to_ndc(pos2(100.0, 100.0), 200.0, 200.0), pos2(0.0, 0.0));
    }

    #[test]
    fn ndc_to_pixel_inverts_to_ndc() {
        let pixel = pos2(37.0, 151.0);
        let back = ndc_to_pixel(to_ndc(pixel, 200.0, 300.0), 200.0, 300.0);
        assert!(approx(back.x, pixel.x));
        assert!(approx(back.y, pixel.y));
    }

    #[test]
    fn unit_square_corners() {
        assert_eq!(to_unit_square(pos2(0.0, 0.0), 200.0, 200.0), pos2(0.0, 1.0));
        assert_eq!(to_unit_square(pos2(200.0, 200.0), 200.0, 200.0), pos2(1.0, 0.0));
    }

    #[test]
    fn conversions_share_axis_convention() {
        for (px, py) in [(13.0, 170.0), (100.0, 5.0), (199.0, 42.0)] {
            let ndc = to_ndc(pos2(px, py), 200.0, 200.0);
            let unit = to_unit_square(pos2(px, py), 200.0, 200.0);
            assert!(approx(ndc.x, unit.x * 2.0 - 1.0));
            assert!(approx(ndc.y, unit.y * 2.0 - 1.0));
        }
    }

    #[test]
    fn ndc_is_monotonic() {
        let a = to_ndc(pos2(10.0, 10.0), 300.0, 150.0);
        let b = to_ndc(pos2(20.0, 20.0), 300.0, 150.0);
        assert!(b.x > a.x);
        assert!(b.y < a.y);
    }

    #[test]
    fn rotate_towards_is_clamped_and_exact_at_the_end() {
        let start = Quat::from_angle_y(Rad(0.0));
        let target = Quat::from_angle_y(Rad(1.0));
        let mid = rotate_towards(start, target, 0.25);
        assert!(approx(angle_between(start, mid), 0.25));
        assert!(approx(angle_between(mid, target), 0.75));
        let end = rotate_towards(mid, target, 10.0);
        assert_eq!(end, target);
    }

    #[test]
    fn rotate_towards_treats_negated_quaternion_as_reached() {
        let target = Quat::from_angle_x(Rad(0.5));
        assert_eq!(rotate_towards(-target, target, 0.1), target);
    }

    #[test]
    fn look_at_from_positive_z_is_identity() {
        let q = look_at_rotation(Vec3::new(0.0, 0.0, 5.0), ZERO, Vec3::unit_y());
        assert!(approx(angle_between(q, Quat::new(1.0, 0.0, 0.0, 0.0)), 0.0));
    }

    #[test]
    fn look_at_points_negative_z_toward_target() {
        let eye = Vec3::new(3.0, 0.0, 0.0);
        let q = look_at_rotation(eye, ZERO, Vec3::unit_y());
        let forward = q.rotate_vector(-Vec3::unit_z());
        assert!(approx_vec(forward, Vec3::new(-1.0, 0.0, 0.0)));
        assert!(approx_vec(q.rotate_vector(Vec3::unit_y()), Vec3::unit_y()));
    }

    #[test]
    fn look_at_survives_parallel_up() {
        let q = look_at_rotation(Vec3::new(0.0, 4.0, 0.0), ZERO, Vec3::unit_y());
        assert!(q.magnitude().is_finite());
        assert!(approx(q.magnitude(), 1.0));
    }

    #[test]
    fn rotate_around_axis_keeps_distance() {
        let origin = Vec3::new(1.0, 2.0, 3.0);
        let point = origin + Vec3::new(0.0, 0.0, 2.0);
        let rotated = rotate_around_axis(point, origin, Vec3::unit_y(), std::f64::consts::FRAC_PI_2);
        assert!(approx_vec(rotated, origin + Vec3::new(2.0, 0.0, 0.0)));
    }

    #[test]
    fn normalize_or_zero_handles_zero() {
        assert_eq!(normalize_or_zero(ZERO), ZERO);
        assert!(approx_vec(normalize_or_zero(Vec3::new(0.0, 3.0, 0.0)), Vec3::unit_y()));
    }
}
