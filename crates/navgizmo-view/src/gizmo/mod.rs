pub mod animation;
pub mod camera;
pub mod clock;
pub mod controller;
pub mod handle;
pub mod input;
pub mod math;
pub mod navigator;
pub mod pick;
pub mod projection;
pub mod render;
pub mod scene;
pub mod ui;
