use navgizmo_base::{GizmoOptions, Rgb};

use super::handle::{HandleName, HandleRegistry};
use super::math::Vec3;
use super::pick::{ray_quad, ray_rod};
use super::projection::{OrthoProjection, Ray};
use super::render::MaterialId;

pub const HANDLE_OFFSET: f64 = 1.2;
const HANDLE_SCALE: f64 = 0.6;
const AXIS_LENGTH: f64 = 0.9;
const AXIS_RADIUS: f64 = 0.02;
const DISC_NAME: &str = "NavigatorDisc";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectKind {
    Billboard {
        handle: HandleName,
        center: Vec3,
        scale: f64,
        material: Option<MaterialId>,
    },
    Rod {
        start: Vec3,
        end: Vec3,
        radius: f64,
        color: Rgb,
    },
    Disc { color: Rgb, opacity: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct GizmoObject {
    pub name: String,
    pub kind: ObjectKind,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub object: ObjectId,
    pub distance: f64,
}

#[derive(Clone, Debug, Default)]
pub struct GizmoScene {
    objects: Vec<GizmoObject>,
}

impl GizmoScene {
    pub(crate) fn build(options: &GizmoOptions, registry: &mut HandleRegistry) -> Self {
        let mut scene = Self::default();
        scene.add_object(GizmoObject {
            name: DISC_NAME.to_string(),
            kind: ObjectKind::Disc {
                color: Rgb::from(options.background_color),
                opacity: options.background_opacity,
            },
            visible: false,
        });
        for (index, (label, axis)) in [("X", Vec3::unit_x()), ("Y", Vec3::unit_y()), ("Z", Vec3::unit_z())]
            .into_iter()
            .enumerate()
        {
            scene.add_object(GizmoObject {
                name: format!("NavigatorAxis{label}"),
                kind: ObjectKind::Rod {
                    start: Vec3::new(0.0, 0.0, 0.0),
                    end: axis * AXIS_LENGTH,
                    radius: AXIS_RADIUS,
                    color: options.axis_color(index),
                },
                visible: true,
            });
        }
        let names: Vec<HandleName> = registry.iter().map(|handle| handle.name()).collect();
        for name in names {
            let handle = registry.get_mut(name);
            let id = scene.add_object(GizmoObject {
                name: format!("NavigatorHandle{name}"),
                kind: ObjectKind::Billboard {
                    handle: name,
                    center: handle.direction() * HANDLE_OFFSET,
                    scale: HANDLE_SCALE,
                    material: None,
                },
                visible: true,
            });
            handle.visual = Some(id);
        }
        scene
    }

    pub fn add_object(&mut self, object: GizmoObject) -> ObjectId {
        self.objects.push(object);
        ObjectId(self.objects.len() - 1)
    }

    pub fn remove_all(&mut self) {
        self.objects.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn object(&self, id: ObjectId) -> Option<&GizmoObject> {
        self.objects.get(id.0)
    }

    pub fn object_by_name(&self, name: &str) -> Option<(ObjectId, &GizmoObject)> {
        self.objects()
            .find(|(_, object)| object.name == name)
    }

    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &GizmoObject)> {
        self.objects
            .iter()
            .enumerate()
            .map(|(index, object)| (ObjectId(index), object))
    }

    pub fn set_material(&mut self, id: ObjectId, new_material: MaterialId) {
        if let Some(GizmoObject {
            kind: ObjectKind::Billboard { material, .. },
            ..
        }) = self.objects.get_mut(id.0)
        {
            *material = Some(new_material);
        }
    }

    pub fn disc_visible(&self) -> bool {
        self.object_by_name(DISC_NAME)
            .is_some_and(|(_, disc)| disc.visible)
    }

    pub fn set_disc_visible(&mut self, visible: bool) {
        if let Some(disc) = self.objects.iter_mut().find(|object| object.name == DISC_NAME) {
            disc.visible = visible;
        }
    }

    pub fn cast_ray(&self, ray: &Ray, projection: &OrthoProjection) -> Vec<Hit> {
        let right = projection.right();
        let up = projection.screen_up();
        let mut hits: Vec<Hit> = self
            .objects()
            .filter_map(|(id, object)| {
                let distance = match &object.kind {
                    ObjectKind::Billboard { center, scale, .. } => {
                        let center = *center;
                        let half = *scale * 0.5;
                        let (rx, uy) = (right * half, up * half);
                        ray_quad(
                            ray,
                            [
                                center - rx - uy,
                                center + rx - uy,
                                center + rx + uy,
                                center - rx + uy,
                            ],
                        )
                    }
                    ObjectKind::Rod {
                        start, end, radius, ..
                    } => ray_rod(ray, *start, *end, *radius),
                    ObjectKind::Disc { .. } => ray_quad(
                        ray,
                        [
                            Vec3::new(-1.0, -1.0, 0.0),
                            Vec3::new(1.0, -1.0, 0.0),
                            Vec3::new(1.0, 1.0, 0.0),
                            Vec3::new(-1.0, 1.0, 0.0),
                        ],
                    ),
                }?;
                Some(Hit {
                    object: id,
                    distance,
                })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }
}
