pub mod camera;
pub mod draw;
