use std::f64::consts::TAU;
use std::time::Duration;

use cgmath::{InnerSpace, Rad, Rotation, Rotation3};
use tracing::{debug, trace};

use super::camera::ControlledCamera;
use super::handle::{Handle, HandleName, HandleRegistry};
use super::math::{Quat, Vec3, ZERO, angle_between, normalize_or_zero, rotate_towards};

pub const SNAP_SPEED: f64 = TAU;

pub const ALIGN_EPSILON: f64 = 1.0e-4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationStatus {
    Running,
    Complete,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SnapAnimation {
    last: Duration,
    up_remaining: f64,
    up_axis: Vec3,
    target_up: Vec3,
    target_orientation: Quat,
    target_point: Vec3,
    radius: f64,
}

impl SnapAnimation {
    pub fn start<C: ControlledCamera + ?Sized>(
        camera: &C,
        target_point: Vec3,
        target_up: Vec3,
        target_orientation: Quat,
        now: Duration,
    ) -> Self {
        let up = camera.up();
        let up_remaining = up.dot(target_up).clamp(-1.0, 1.0).acos();
        let mut up_axis = normalize_or_zero((up * 1000.0).cross(target_up));
        if up_axis == ZERO {
            up_axis = any_perpendicular(up);
        }
        let radius = (camera.position() - target_point).magnitude();
        debug!(
            up_angle = up_remaining,
            view_angle = angle_between(camera.orientation(), target_orientation),
            radius,
            "snap animation started"
        );
        Self {
            last: now,
            up_remaining,
            up_axis,
            target_up,
            target_orientation,
            target_point,
            radius,
        }
    }

    pub fn target_orientation(&self) -> Quat {
        self.target_orientation
    }

    pub fn target_up(&self) -> Vec3 {
        self.target_up
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn up_remaining(&self) -> f64 {
        self.up_remaining
    }

    pub fn retarget(&mut self, target_point: Vec3, camera_position: Vec3) {
        self.target_point = target_point;
        self.radius = (camera_position - target_point).magnitude();
    }

    pub fn advance<C: ControlledCamera + ?Sized>(
        &mut self,
        camera: &mut C,
        now: Duration,
    ) -> AnimationStatus {
        let elapsed_ms = now.saturating_sub(self.last).as_secs_f64() * 1000.0;
        self.last = now;
        let step = elapsed_ms * SNAP_SPEED / 1000.0;

        let up_step = if self.up_remaining - step <= 0.0 {
            self.up_remaining
        } else {
            step
        };
        self.up_remaining -= up_step;

        let orientation = rotate_towards(camera.orientation(), self.target_orientation, step);
        camera.set_orientation(orientation);
        camera.set_position(
            self.target_point + orientation.rotate_vector(Vec3::unit_z()) * self.radius,
        );
        if up_step > 0.0 {
            let turn = Quat::from_axis_angle(self.up_axis, Rad(up_step));
            camera.set_up(turn.rotate_vector(camera.up()).normalize());
        }
        trace!(step, up_step, up_remaining = self.up_remaining, "snap step");

        if orientation == self.target_orientation && self.up_remaining == 0.0 {
            camera.set_up(self.target_up);
            debug!("snap animation complete");
            AnimationStatus::Complete
        } else {
            AnimationStatus::Running
        }
    }
}

pub fn resolve_click_target(
    registry: &HandleRegistry,
    orientation: Quat,
    clicked: HandleName,
) -> &Handle {
    let handle = registry.get(clicked);
    if angle_between(orientation, handle.target_orientation()) > ALIGN_EPSILON {
        return handle;
    }
    match registry.opposite(clicked.as_str()) {
        Some(opposite) => {
            debug!(clicked = %clicked, target = %opposite.name(), "already aligned, snapping to opposite");
            opposite
        }
        None => handle,
    }
}

fn any_perpendicular(v: Vec3) -> Vec3 {
    let candidate = v.cross(Vec3::unit_x());
    if candidate.magnitude2() > 1.0e-12 {
        candidate.normalize()
    } else {
        normalize_or_zero(v.cross(Vec3::unit_y()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gizmo::camera::SceneCamera;
    use navgizmo_base::GizmoOptions;

    const FRAME: Duration = Duration::from_millis(16);

    fn run_to_completion(
        animation: &mut SnapAnimation,
        camera: &mut SceneCamera,
        max_frames: u32,
    ) -> Option<u32> {
        let mut now = Duration::ZERO;
        for frame in 1..=max_frames {
            now += FRAME;
            if animation.advance(camera, now) == AnimationStatus::Complete {
                return Some(frame);
            }
        }
        None
    }

    #[test]
    fn snap_to_back_converges_monotonically_and_exactly() {
        let mut camera = SceneCamera::looking_at(Vec3::new(0.0, 0.0, 4.0), ZERO, Vec3::unit_y());
        let target = HandleName::NegZ;
        let mut animation = SnapAnimation::start(
            &camera,
            ZERO,
            target.target_up(),
            target.target_orientation(),
            Duration::ZERO,
        );
        assert!((animation.radius() - 4.0).abs() < 1e-12);

        let mut previous = angle_between(camera.orientation, target.target_orientation());
        let mut now = Duration::ZERO;
        let mut frames = 0;
        loop {
            now += FRAME;
            frames += 1;
            let status = animation.advance(&mut camera, now);
            let remaining = angle_between(camera.orientation, target.target_orientation());
            assert!(remaining < previous, "frame {frames}: {remaining} >= {previous}");
            previous = remaining;
            assert!((camera.position.magnitude() - 4.0).abs() < 1e-9);
            if status == AnimationStatus::Complete {
                break;
            }
            assert!(frames < 40, "snap did not finish");
        }
        assert!((31..=33).contains(&frames));
        assert_eq!(camera.orientation, target.target_orientation());
        assert_eq!(camera.up, Vec3::unit_y());
        assert!((camera.position - Vec3::new(0.0, 0.0, -4.0)).magnitude() < 1e-9);
    }

    #[test]
    fn up_turns_with_the_view() {
        let mut camera = SceneCamera::looking_at(Vec3::new(0.0, 0.0, 3.0), ZERO, Vec3::unit_y());
        let target = HandleName::PosY;
        let mut animation = SnapAnimation::start(
            &camera,
            ZERO,
            target.target_up(),
            target.target_orientation(),
            Duration::ZERO,
        );
        assert!((animation.up_remaining() - std::f64::consts::FRAC_PI_2).abs() < 1e-12);

        let mut now = Duration::ZERO;
        let mut previous = animation.up_remaining();
        for _ in 0..40 {
            now += FRAME;
            let status = animation.advance(&mut camera, now);
            if previous > 0.0 {
                assert!(animation.up_remaining() < previous);
            }
            previous = animation.up_remaining();
            assert!((camera.up.magnitude() - 1.0).abs() < 1e-12);
            if status == AnimationStatus::Complete {
                break;
            }
        }
        assert_eq!(animation.up_remaining(), 0.0);
        assert_eq!(camera.up, -Vec3::unit_z());
        assert!((camera.position - Vec3::new(0.0, 3.0, 0.0)).magnitude() < 1e-9);
    }

    #[test]
    fn antiparallel_up_still_completes() {
        let mut camera = SceneCamera {
            position: Vec3::new(0.0, 0.0, 2.0),
            orientation: Quat::new(1.0, 0.0, 0.0, 0.0),
            up: -Vec3::unit_y(),
        };
        let target = HandleName::PosX;
        let mut animation = SnapAnimation::start(
            &camera,
            ZERO,
            target.target_up(),
            target.target_orientation(),
            Duration::ZERO,
        );
        assert!(run_to_completion(&mut animation, &mut camera, 100).is_some());
        assert_eq!(camera.up, Vec3::unit_y());
        assert_eq!(camera.orientation, target.target_orientation());
    }

    #[test]
    fn completion_is_idempotent() {
        let mut camera = SceneCamera::looking_at(Vec3::new(2.0, 0.0, 2.0), ZERO, Vec3::unit_y());
        let target = HandleName::PosZ;
        let mut animation = SnapAnimation::start(
            &camera,
            ZERO,
            target.target_up(),
            target.target_orientation(),
            Duration::ZERO,
        );
        assert!(run_to_completion(&mut animation, &mut camera, 100).is_some());
        let settled = camera;
        assert_eq!(
            animation.advance(&mut camera, Duration::from_secs(10)),
            AnimationStatus::Complete
        );
        assert_eq!(camera, settled);
    }

    #[test]
    fn zero_elapsed_time_does_not_move() {
        let mut camera = SceneCamera::looking_at(Vec3::new(0.0, 0.0, 4.0), ZERO, Vec3::unit_y());
        let before = camera;
        let target = HandleName::PosX;
        let mut animation = SnapAnimation::start(
            &camera,
            ZERO,
            target.target_up(),
            target.target_orientation(),
            Duration::from_millis(5),
        );
        assert_eq!(
            animation.advance(&mut camera, Duration::from_millis(5)),
            AnimationStatus::Running
        );
        assert!((camera.position - before.position).magnitude() < 1e-12);
    }

    #[test]
    fn aligned_click_retargets_to_opposite() {
        let registry = crate::gizmo::handle::HandleRegistry::new(&GizmoOptions::default());
        let facing_front = Quat::new(1.0, 0.0, 0.0, 0.0);
        assert_eq!(
            resolve_click_target(&registry, facing_front, HandleName::PosZ).name(),
            HandleName::NegZ
        );
        assert_eq!(
            resolve_click_target(&registry, facing_front, HandleName::PosX).name(),
            HandleName::PosX
        );
        let facing_left = HandleName::NegX.target_orientation();
        assert_eq!(
            resolve_click_target(&registry, facing_left, HandleName::NegX).name(),
            HandleName::PosX
        );
    }

    #[test]
    fn retarget_recomputes_radius() {
        let camera = SceneCamera::looking_at(Vec3::new(0.0, 0.0, 4.0), ZERO, Vec3::unit_y());
        let mut animation = SnapAnimation::start(
            &camera,
            ZERO,
            Vec3::unit_y(),
            HandleName::PosX.target_orientation(),
            Duration::ZERO,
        );
        animation.retarget(Vec3::new(0.0, 0.0, 1.0), camera.position);
        assert!((animation.radius() - 3.0).abs() < 1e-12);
    }
}
