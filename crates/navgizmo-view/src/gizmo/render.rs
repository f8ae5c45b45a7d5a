use navgizmo_base::Rgb;

use super::projection::OrthoProjection;
use super::scene::GizmoScene;
use super::ui::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    Shared,
    Standalone(u32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

pub trait GizmoRenderer {
    fn viewport(&self) -> Viewport;
    fn set_viewport(&mut self, viewport: Viewport);
    fn auto_clear(&self) -> bool;
    fn set_auto_clear(&mut self, auto_clear: bool);
    fn clear_depth(&mut self);
    fn render(&mut self, surface: Surface, scene: &GizmoScene, projection: &OrthoProjection);
    fn surface_rect(&self, surface: Surface) -> Rect;
    fn attach_standalone_surface(&mut self, placement: Viewport) -> Surface;
    fn detach_standalone_surface(&mut self, surface: Surface);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelStyle {
    pub fill: Rgb,
    pub stroke: Rgb,
    pub text: String,
    pub text_color: Option<Rgb>,
    pub background_image: Option<String>,
}

pub trait LabelRasterizer {
    fn rasterize(&mut self, style: &LabelStyle) -> Option<MaterialId>;
}

pub trait PointerLock {
    fn supported(&self) -> bool;
    fn request_lock(&mut self, surface: Surface);
    fn exit_lock(&mut self);
    fn lock_target(&self) -> Option<Surface>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoPointerLock;

impl PointerLock for NoPointerLock {
    fn supported(&self) -> bool {
        false
    }

    fn request_lock(&mut self, _surface: Surface) {}

    fn exit_lock(&mut self) {}

    fn lock_target(&self) -> Option<Surface> {
        None
    }
}
