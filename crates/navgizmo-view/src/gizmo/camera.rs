use std::cell::RefCell;
use std::rc::Rc;

use super::math::{Quat, Vec3, look_at_rotation};

pub trait ControlledCamera {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);
    fn orientation(&self) -> Quat;
    fn set_orientation(&mut self, orientation: Quat);
    fn up(&self) -> Vec3;
    fn set_up(&mut self, up: Vec3);

    fn look_at(&mut self, target: Vec3) {
        let orientation = look_at_rotation(self.position(), target, self.up());
        self.set_orientation(orientation);
    }
}

impl<T: ControlledCamera> ControlledCamera for Rc<RefCell<T>> {
    fn position(&self) -> Vec3 {
        self.borrow().position()
    }

    fn set_position(&mut self, position: Vec3) {
        self.borrow_mut().set_position(position);
    }

    fn orientation(&self) -> Quat {
        self.borrow().orientation()
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.borrow_mut().set_orientation(orientation);
    }

    fn up(&self) -> Vec3 {
        self.borrow().up()
    }

    fn set_up(&mut self, up: Vec3) {
        self.borrow_mut().set_up(up);
    }

    fn look_at(&mut self, target: Vec3) {
        self.borrow_mut().look_at(target);
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneCamera {
    pub position: Vec3,
    pub orientation: Quat,
    pub up: Vec3,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            orientation: Quat::new(1.0, 0.0, 0.0, 0.0),
            up: Vec3::unit_y(),
        }
    }
}

impl SceneCamera {
    pub fn looking_at(position: Vec3, target: Vec3, up: Vec3) -> Self {
        Self {
            position,
            orientation: look_at_rotation(position, target, up),
            up,
        }
    }
}

impl ControlledCamera for SceneCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn orientation(&self) -> Quat {
        self.orientation
    }

    fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }

    fn up(&self) -> Vec3 {
        self.up
    }

    fn set_up(&mut self, up: Vec3) {
        self.up = up;
    }
}
