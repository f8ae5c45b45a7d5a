use std::f64::consts::{FRAC_PI_2, PI};
use std::str::FromStr;

use cgmath::{Rad, Rotation3};
use navgizmo_base::{Error, GizmoOptions, HANDLE_COUNT, Rgb};

use super::math::{Quat, Vec3};
use super::render::LabelStyle;
use super::scene::ObjectId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleName {
    PosX,
    PosY,
    PosZ,
    NegX,
    NegY,
    NegZ,
}

pub const HANDLE_NAMES: [HandleName; HANDLE_COUNT] = [
    HandleName::PosX,
    HandleName::PosY,
    HandleName::PosZ,
    HandleName::NegX,
    HandleName::NegY,
    HandleName::NegZ,
];

impl HandleName {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PosX => "X",
            Self::PosY => "Y",
            Self::PosZ => "Z",
            Self::NegX => "-X",
            Self::NegY => "-Y",
            Self::NegZ => "-Z",
        }
    }

    pub const fn is_negative(self) -> bool {
        matches!(self, Self::NegX | Self::NegY | Self::NegZ)
    }

    pub const fn index(self) -> usize {
        match self {
            Self::PosX => 0,
            Self::PosY => 1,
            Self::PosZ => 2,
            Self::NegX => 3,
            Self::NegY => 4,
            Self::NegZ => 5,
        }
    }

    pub fn direction(self) -> Vec3 {
        match self {
            Self::PosX => Vec3::unit_x(),
            Self::PosY => Vec3::unit_y(),
            Self::PosZ => Vec3::unit_z(),
            Self::NegX => -Vec3::unit_x(),
            Self::NegY => -Vec3::unit_y(),
            Self::NegZ => -Vec3::unit_z(),
        }
    }

    pub fn target_up(self) -> Vec3 {
        match self {
            Self::PosY => -Vec3::unit_z(),
            Self::NegY => Vec3::unit_z(),
            _ => Vec3::unit_y(),
        }
    }

    pub fn target_orientation(self) -> Quat {
        match self {
            Self::PosX => Quat::from_angle_y(Rad(FRAC_PI_2)),
            Self::NegX => Quat::from_angle_y(Rad(-FRAC_PI_2)),
            Self::PosY => Quat::from_angle_x(Rad(-FRAC_PI_2)),
            Self::NegY => Quat::from_angle_x(Rad(FRAC_PI_2)),
            Self::PosZ => Quat::new(1.0, 0.0, 0.0, 0.0),
            Self::NegZ => Quat::from_angle_y(Rad(PI)),
        }
    }
}

impl std::fmt::Display for HandleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandleName {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        HANDLE_NAMES
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(text.trim()))
            .ok_or_else(|| Error::InvalidParameter(format!("unknown handle {text:?}")))
    }
}

#[derive(Clone, Debug)]
pub struct Handle {
    name: HandleName,
    direction: Vec3,
    target_orientation: Quat,
    target_up: Vec3,
    style: LabelStyle,
    pub visual: Option<ObjectId>,
}

impl Handle {
    fn new(name: HandleName, fill: Rgb, stroke: Rgb, text_color: Rgb, background_image: Option<String>) -> Self {
        let mut handle = Self {
            name,
            direction: name.direction(),
            target_orientation: name.target_orientation(),
            target_up: name.target_up(),
            style: LabelStyle {
                fill,
                stroke,
                text: String::new(),
                text_color: None,
                background_image,
            },
            visual: None,
        };
        handle.present_default(text_color);
        handle
    }

    pub fn name(&self) -> HandleName {
        self.name
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn target_orientation(&self) -> Quat {
        self.target_orientation
    }

    pub fn target_up(&self) -> Vec3 {
        self.target_up
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    pub fn present_default(&mut self, text_color: Rgb) {
        if self.name.is_negative() {
            self.style.text.clear();
            self.style.text_color = None;
        } else {
            self.style.text = self.name.as_str().to_string();
            self.style.text_color = Some(text_color);
        }
    }

    pub fn present_hover(&mut self, hover_color: Rgb) {
        if self.name.is_negative() {
            self.style.text = self.name.as_str().to_string();
        }
        self.style.text_color = Some(hover_color);
    }
}

#[derive(Clone, Debug)]
pub struct HandleRegistry {
    handles: Vec<Handle>,
}

impl HandleRegistry {
    pub(crate) fn new(options: &GizmoOptions) -> Self {
        let handles = HANDLE_NAMES
            .into_iter()
            .map(|name| {
                Handle::new(
                    name,
                    options.fill_color(name.index()),
                    options.stroke_color(name.index()),
                    options.text_color(),
                    options.handle_background_image.clone(),
                )
            })
            .collect();
        Self { handles }
    }

    pub fn get(&self, name: HandleName) -> &Handle {
        &self.handles[name.index()]
    }

    pub fn get_mut(&mut self, name: HandleName) -> &mut Handle {
        &mut self.handles[name.index()]
    }

    pub fn find(&self, name: &str) -> Option<&Handle> {
        self.handles.iter().find(|handle| handle.name.as_str() == name)
    }

    pub fn opposite(&self, name: &str) -> Option<&Handle> {
        let opposite = match name.strip_prefix('-') {
            Some(positive) => positive.to_string(),
            None => format!("-{name}"),
        };
        self.find(&opposite)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Handle> {
        self.handles.iter()
    }
}
