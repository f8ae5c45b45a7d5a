use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result, Rgb};

pub const HANDLE_COUNT: usize = 6;
pub const AXIS_COUNT: usize = 3;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GizmoOptions {
    pub size: f64,
    pub handle_background_image: Option<String>,
    pub handle_text_color: u32,
    pub handle_text_hover_color: u32,
    pub padding_x: f64,
    pub padding_y: f64,
    pub background_color: u32,
    pub background_opacity: f32,
    pub pointer_lock_mode: bool,
    pub rotate_speed: f64,
    pub axes_colors: Vec<u32>,
    pub handle_fill_colors: Vec<u32>,
    pub handle_stroke_colors: Vec<u32>,
    pub standalone: bool,
}

impl Default for GizmoOptions {
    fn default() -> Self {
        Self {
            size: 200.0,
            handle_background_image: None,
            handle_text_color: 0x000000,
            handle_text_hover_color: 0xffffff,
            padding_x: 0.0,
            padding_y: 0.0,
            background_color: 0xffffff,
            background_opacity: 0.2,
            pointer_lock_mode: false,
            rotate_speed: 1.0,
            axes_colors: vec![0xff5453, 0x8adb00, 0x2c8fff],
            handle_fill_colors: vec![0xff3653, 0x8adb00, 0x2c8fff, 0x61363c, 0x485b2e, 0x354860],
            handle_stroke_colors: vec![0xffffff, 0xffffff, 0xffffff, 0xff3653, 0x8adb00, 0x2c8fff],
            standalone: false,
        }
    }
}

impl GizmoOptions {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(Error::InvalidParameter("size must be > 0".to_string()));
        }
        if !self.rotate_speed.is_finite() {
            return Err(Error::InvalidParameter(
                "rotate_speed must be finite".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.background_opacity) {
            return Err(Error::InvalidParameter(
                "background_opacity must be within [0, 1]".to_string(),
            ));
        }
        ensure_len("axes_colors", &self.axes_colors, AXIS_COUNT)?;
        ensure_len("handle_fill_colors", &self.handle_fill_colors, HANDLE_COUNT)?;
        ensure_len(
            "handle_stroke_colors",
            &self.handle_stroke_colors,
            HANDLE_COUNT,
        )?;
        Ok(())
    }

    pub fn fill_color(&self, index: usize) -> Rgb {
        Rgb::from(self.handle_fill_colors[index])
    }

    pub fn stroke_color(&self, index: usize) -> Rgb {
        Rgb::from(self.handle_stroke_colors[index])
    }

    pub fn axis_color(&self, index: usize) -> Rgb {
        Rgb::from(self.axes_colors[index])
    }

    pub fn text_color(&self) -> Rgb {
        Rgb::from(self.handle_text_color)
    }

    pub fn text_hover_color(&self) -> Rgb {
        Rgb::from(self.handle_text_hover_color)
    }

    pub fn active_bounds(&self) -> (f64, f64) {
        (0.14 * self.size, 0.86 * self.size)
    }
}

fn ensure_len(name: &str, values: &[u32], required: usize) -> Result<()> {
    if values.len() < required {
        return Err(Error::InvalidParameter(format!(
            "{name} needs {required} entries, got {}",
            values.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() -> Result<()> {
        GizmoOptions::default().validate()
    }

    #[test]
    fn partial_json_keeps_defaults() -> Result<()> {
        let options = GizmoOptions::from_json_str(r#"{ "size": 120, "standalone": true }"#)?;
        assert_eq!(options.size, 120.0);
        assert!(options.standalone);
        assert_eq!(options.rotate_speed, 1.0);
        assert_eq!(options.handle_fill_colors.len(), HANDLE_COUNT);
        Ok(())
    }

    #[test]
    fn short_color_arrays_are_rejected() {
        let options = GizmoOptions {
            handle_stroke_colors: vec![0xffffff; 5],
            ..GizmoOptions::default()
        };
        assert!(matches!(
            options.validate(),
            Err(Error::InvalidParameter(message)) if message.contains("handle_stroke_colors")
        ));
    }

    #[test]
    fn non_positive_size_is_rejected() {
        let options = GizmoOptions {
            size: 0.0,
            ..GizmoOptions::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            GizmoOptions::from_json_str("{ size: }"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn active_bounds_follow_size() {
        let options = GizmoOptions::default();
        let (min, max) = options.active_bounds();
        assert!((min - 28.0).abs() < 1e-9);
        assert!((max - 172.0).abs() < 1e-9);
    }
}
