pub mod gizmo;

pub use gizmo::animation::{ALIGN_EPSILON, AnimationStatus, SNAP_SPEED, SnapAnimation};
pub use gizmo::camera::{ControlledCamera, SceneCamera};
pub use gizmo::clock::{Clock, ManualClock, SystemClock};
pub use gizmo::handle::{HANDLE_NAMES, Handle, HandleName, HandleRegistry};
pub use gizmo::input::PointerEvent;
pub use gizmo::math::{Quat, Vec3};
pub use gizmo::navigator::NavigatorGizmo;
pub use gizmo::projection::OrthoProjection;
pub use gizmo::render::{
    GizmoRenderer, LabelRasterizer, LabelStyle, MaterialId, NoPointerLock, PointerLock, Surface,
    Viewport,
};
pub use gizmo::scene::{GizmoObject, GizmoScene, ObjectId, ObjectKind};
pub use gizmo::ui::{Point2, Rect, Vec2, pos2, vec2};
pub use navgizmo_base::{Error, GizmoOptions, Result, Rgb};
