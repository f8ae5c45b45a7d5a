use cgmath::{InnerSpace, Rotation};
use tracing::trace;

use super::camera::ControlledCamera;
use super::hit_test::ActiveRegion;
use super::input::PointerEvent;
use super::math::{Vec3, ZERO, normalize_or_zero, rotate_around_axis, to_unit_square};
use super::ui::{Point2, Rect, Vec2};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelMapping {
    pub offset_x: f64,
    // Measured from the bottom edge of the surface.
    pub offset_y: f64,
    pub size: f64,
}

impl PixelMapping {
    pub fn to_pixel(&self, client: Point2, surface: Rect) -> Point2 {
        Point2::new(
            client.x - surface.left() - self.offset_x,
            client.y - surface.top() - (surface.height() - self.offset_y - self.size),
        )
    }

    pub fn to_client(&self, pixel: Point2, surface: Rect) -> Point2 {
        Point2::new(
            pixel.x + surface.left() + self.offset_x,
            pixel.y + surface.top() + (surface.height() - self.offset_y - self.size),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerContext {
    pub surface_rect: Rect,
    pub animating: bool,
    pub lock_available: bool,
    pub lock_engaged: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Effect {
    SetDiscVisible(bool),
    UpdateHover(Point2),
    RequestPointerLock,
    ExitPointerLock,
    Rotate { dx: f64, dy: f64 },
    ClearHover,
    Click(Point2),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Idle,
    Armed,
    Dragging,
}

#[derive(Clone, Debug)]
pub struct PointerController {
    mapping: PixelMapping,
    region: ActiveRegion,
    pointer: Point2,
    client: Point2,
    last_coords: Point2,
    armed: bool,
    dragged: bool,
    locked: bool,
}

impl PointerController {
    pub fn new(mapping: PixelMapping, region: ActiveRegion) -> Self {
        Self {
            mapping,
            region,
            pointer: Point2::new(-1.0, -1.0),
            client: Point2::default(),
            last_coords: Point2::default(),
            armed: false,
            dragged: false,
            locked: false,
        }
    }

    pub fn phase(&self) -> PointerPhase {
        match (self.armed, self.dragged) {
            (true, true) => PointerPhase::Dragging,
            (true, false) => PointerPhase::Armed,
            _ => PointerPhase::Idle,
        }
    }

    pub fn mapping(&self) -> PixelMapping {
        self.mapping
    }

    pub fn pointer(&self) -> Point2 {
        self.pointer
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn release_lock(&mut self) {
        self.locked = false;
    }

    pub fn transition(&mut self, event: PointerEvent, ctx: &PointerContext) -> Vec<Effect> {
        match event {
            PointerEvent::Down { client } => self.on_down(client, ctx),
            PointerEvent::Move { client, movement } => {
                self.on_move(client, movement, ctx)
            }
            PointerEvent::Up { client } | PointerEvent::Leave { client } => {
                self.on_up(client, ctx)
            }
        }
    }

    fn on_down(&mut self, client: Point2, ctx: &PointerContext) -> Vec<Effect> {
        let pixel = self.mapping.to_pixel(client, ctx.surface_rect);
        self.pointer = pixel;
        self.client = client;
        if ctx.animating {
            return Vec::new();
        }
        self.dragged = false;
        let mut effects = Vec::new();
        if self.region.contains(pixel) {
            effects.push(Effect::SetDiscVisible(true));
            self.last_coords = to_unit_square(pixel, self.mapping.size, self.mapping.size);
            self.armed = true;
        }
        effects
    }

    fn on_move(&mut self, client: Point2, movement: Vec2, ctx: &PointerContext) -> Vec<Effect> {
        let mut pixel = self.mapping.to_pixel(client, ctx.surface_rect);
        self.pointer = pixel;
        let inside = self.region.contains(pixel);
        let mut effects = vec![Effect::SetDiscVisible(inside)];
        effects.push(if inside {
            Effect::UpdateHover(pixel)
        } else {
            Effect::ClearHover
        });
        if ctx.animating || !self.armed {
            return effects;
        }
        if ctx.lock_available && !ctx.lock_engaged {
            effects.push(Effect::RequestPointerLock);
            self.locked = true;
        }
        if self.locked {
            self.client += movement;
            pixel = self.mapping.to_pixel(self.client, ctx.surface_rect);
        }
        self.dragged = true;
        let coords = to_unit_square(pixel, self.mapping.size, self.mapping.size);
        let (dx, dy) = (coords.x - self.last_coords.x, coords.y - self.last_coords.y);
        trace!(dx, dy, "gizmo drag");
        effects.push(Effect::Rotate { dx, dy });
        self.last_coords = coords;
        effects
    }

    fn on_up(&mut self, client: Point2, ctx: &PointerContext) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.locked {
            effects.push(Effect::ExitPointerLock);
            self.locked = false;
        }
        if ctx.animating {
            return effects;
        }
        self.armed = false;
        if self.dragged {
            self.dragged = false;
            effects.push(Effect::ClearHover);
            return effects;
        }
        effects.push(Effect::Click(self.mapping.to_pixel(client, ctx.surface_rect)));
        effects
    }
}

pub fn drag_rotate<C: ControlledCamera + ?Sized>(
    camera: &mut C,
    target: Vec3,
    dx: f64,
    dy: f64,
    rotate_speed: f64,
) -> bool {
    if dx == 0.0 && dy == 0.0 {
        return false;
    }
    let orientation = camera.orientation();
    let screen_up = orientation.rotate_vector(Vec3::unit_y()).normalize();
    let tangent = orientation.rotate_vector(Vec3::unit_x()).normalize();
    let motion = screen_up * dy + tangent * dx;
    let eye = normalize_or_zero(camera.position() - target);
    let axis = normalize_or_zero(motion.cross(eye));
    if axis == ZERO {
        return false;
    }
    let angle = dx.hypot(dy) * rotate_speed;
    camera.set_position(rotate_around_axis(camera.position(), target, axis, angle));
    camera.set_up(screen_up);
    camera.look_at(target);
    true
}
