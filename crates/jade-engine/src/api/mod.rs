pub mod display;
pub mod engine;
pub mod params;
pub mod scene;
