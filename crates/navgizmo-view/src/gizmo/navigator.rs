use cgmath::InnerSpace;
use navgizmo_base::{GizmoOptions, Result};
use tracing::{debug, warn};

use super::animation::{AnimationStatus, SnapAnimation, resolve_click_target};
use super::camera::ControlledCamera;
use super::clock::Clock;
use super::controller::{Effect, PixelMapping, PointerContext, PointerController, drag_rotate};
use super::handle::{HANDLE_NAMES, HandleName, HandleRegistry};
use super::hit_test::HitTester;
use super::input::PointerEvent;
use super::math::{Vec3, ZERO, ndc_to_pixel};
use super::projection::OrthoProjection;
use super::render::{GizmoRenderer, LabelRasterizer, PointerLock, Surface, Viewport};
use super::scene::{GizmoScene, HANDLE_OFFSET};
use super::ui::Point2;

pub struct NavigatorGizmo<C: ControlledCamera, R: GizmoRenderer> {
    camera: C,
    renderer: R,
    rasterizer: Box<dyn LabelRasterizer>,
    pointer_lock: Box<dyn PointerLock>,
    clock: Box<dyn Clock>,
    options: GizmoOptions,
    registry: HandleRegistry,
    scene: GizmoScene,
    hit_tester: HitTester,
    controller: PointerController,
    surface: Surface,
    target: Vec3,
    hovered: Option<HandleName>,
    animation: Option<SnapAnimation>,
    disposed: bool,
}

impl<C: ControlledCamera, R: GizmoRenderer> NavigatorGizmo<C, R> {
    pub fn new(
        camera: C,
        mut renderer: R,
        rasterizer: Box<dyn LabelRasterizer>,
        pointer_lock: Box<dyn PointerLock>,
        clock: Box<dyn Clock>,
        options: GizmoOptions,
    ) -> Result<Self> {
        options.validate()?;
        let mut registry = HandleRegistry::new(&options);
        let scene = GizmoScene::build(&options, &mut registry);

        let (surface, mapping) = if options.standalone {
            let surface = renderer.attach_standalone_surface(gizmo_viewport(&options));
            let mapping = PixelMapping {
                offset_x: 0.0,
                offset_y: 0.0,
                size: options.size,
            };
            (surface, mapping)
        } else {
            let mapping = PixelMapping {
                offset_x: options.padding_x,
                offset_y: options.padding_y,
                size: options.size,
            };
            (Surface::Shared, mapping)
        };

        let mut hit_tester = HitTester::new(&options);
        hit_tester.projection_mut().sync_from(&camera);
        let controller = PointerController::new(mapping, hit_tester.region());

        let mut gizmo = Self {
            camera,
            renderer,
            rasterizer,
            pointer_lock,
            clock,
            options,
            registry,
            scene,
            hit_tester,
            controller,
            surface,
            target: ZERO,
            hovered: None,
            animation: None,
            disposed: false,
        };
        for name in HANDLE_NAMES {
            gizmo.restyle(name, false);
        }
        debug!(
            size = gizmo.options.size,
            standalone = gizmo.options.standalone,
            "navigator gizmo created"
        );
        Ok(gizmo)
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn options(&self) -> &GizmoOptions {
        &self.options
    }

    pub fn scene(&self) -> &GizmoScene {
        &self.scene
    }

    pub fn registry(&self) -> &HandleRegistry {
        &self.registry
    }

    pub fn projection(&self) -> &OrthoProjection {
        self.hit_tester.projection()
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn hovered(&self) -> Option<HandleName> {
        self.hovered
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn handle_client_position(&self, name: HandleName) -> Point2 {
        let center = self.registry.get(name).direction() * HANDLE_OFFSET;
        let ndc = self.hit_tester.projection().project(center);
        self.client_position(ndc_to_pixel(ndc, self.options.size, self.options.size))
    }

    pub fn client_position(&self, pixel: Point2) -> Point2 {
        self.controller
            .mapping()
            .to_client(pixel, self.renderer.surface_rect(self.surface))
    }

    pub fn radius(&self) -> f64 {
        (self.camera.position() - self.target).magnitude()
    }

    pub fn set_target(&mut self, target: Vec3) {
        self.target = target;
        if let Some(animation) = self.animation.as_mut() {
            animation.retarget(target, self.camera.position());
        }
    }

    pub fn handle_event(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        let ctx = PointerContext {
            surface_rect: self.renderer.surface_rect(self.surface),
            animating: self.animation.is_some(),
            lock_available: self.options.pointer_lock_mode && self.pointer_lock.supported(),
            lock_engaged: self.pointer_lock.lock_target() == Some(self.surface),
        };
        for effect in self.controller.transition(event, &ctx) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::SetDiscVisible(visible) => self.scene.set_disc_visible(visible),
            Effect::UpdateHover(pixel) => self.update_hover(pixel),
            Effect::RequestPointerLock => {
                debug!(surface = ?self.surface, "requesting pointer lock");
                self.pointer_lock.request_lock(self.surface);
            }
            Effect::ExitPointerLock => {
                debug!("releasing pointer lock");
                self.pointer_lock.exit_lock();
            }
            Effect::Rotate { dx, dy } => {
                drag_rotate(
                    &mut self.camera,
                    self.target,
                    dx,
                    dy,
                    self.options.rotate_speed,
                );
            }
            Effect::ClearHover => self.set_hovered(None),
            Effect::Click(pixel) => self.click(pixel),
        }
    }

    fn click(&mut self, pixel: Point2) {
        if self.animation.is_some() {
            return;
        }
        let Some(clicked) = self.hit_tester.find_hovered_handle(pixel, &self.scene) else {
            return;
        };
        let handle = resolve_click_target(&self.registry, self.camera.orientation(), clicked);
        self.animation = Some(SnapAnimation::start(
            &self.camera,
            self.target,
            handle.target_up(),
            handle.target_orientation(),
            self.clock.now(),
        ));
    }

    fn update_hover(&mut self, pixel: Point2) {
        let found = self.hit_tester.find_hovered_handle(pixel, &self.scene);
        self.set_hovered(found);
    }

    fn set_hovered(&mut self, next: Option<HandleName>) {
        if next == self.hovered {
            return;
        }
        if let Some(previous) = self.hovered {
            self.restyle(previous, false);
        }
        if let Some(next) = next {
            self.restyle(next, true);
        }
        self.hovered = next;
    }

    fn restyle(&mut self, name: HandleName, hovered: bool) {
        let handle = self.registry.get_mut(name);
        if hovered {
            handle.present_hover(self.options.text_hover_color());
        } else {
            handle.present_default(self.options.text_color());
        }
        let visual = handle.visual;
        match self.rasterizer.rasterize(handle.style()) {
            Some(material) => {
                if let Some(id) = visual {
                    self.scene.set_material(id, material);
                }
            }
            None => warn!(handle = %name, "label rasterizer produced no material"),
        }
    }

    pub fn update(&mut self) {
        if self.disposed {
            return;
        }
        let completed = match self.animation.as_mut() {
            Some(animation) => {
                animation.advance(&mut self.camera, self.clock.now()) == AnimationStatus::Complete
            }
            None => false,
        };
        self.hit_tester.projection_mut().sync_from(&self.camera);
        if completed {
            self.animation = None;
            let pointer = self.controller.pointer();
            if self.hit_tester.is_inside_active_region(pointer) {
                self.update_hover(pointer);
            }
        }
        self.render();
    }

    fn render(&mut self) {
        let projection = self.hit_tester.projection();
        match self.surface {
            Surface::Shared => {
                let saved_viewport = self.renderer.viewport();
                let saved_auto_clear = self.renderer.auto_clear();
                self.renderer.set_viewport(gizmo_viewport(&self.options));
                self.renderer.set_auto_clear(false);
                self.renderer.clear_depth();
                self.renderer.render(self.surface, &self.scene, projection);
                self.renderer.set_viewport(saved_viewport);
                self.renderer.set_auto_clear(saved_auto_clear);
            }
            Surface::Standalone(_) => {
                self.renderer.render(self.surface, &self.scene, projection);
            }
        }
    }

    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.scene.remove_all();
        self.hovered = None;
        self.animation = None;
        if self.controller.is_locked() || self.pointer_lock.lock_target() == Some(self.surface) {
            self.pointer_lock.exit_lock();
            self.controller.release_lock();
        }
        if let Surface::Standalone(_) = self.surface {
            self.renderer.detach_standalone_surface(self.surface);
        }
        self.disposed = true;
        debug!("navigator gizmo disposed");
    }
}

fn gizmo_viewport(options: &GizmoOptions) -> Viewport {
    Viewport::new(options.padding_x, options.padding_y, options.size, options.size)
}
