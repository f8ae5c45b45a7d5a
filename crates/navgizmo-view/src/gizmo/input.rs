use super::ui::{Point2, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { client: Point2 },
    Move { client: Point2, movement: Vec2 },
    Up { client: Point2 },
    Leave { client: Point2 },
}

