pub mod color;
pub mod object;
pub mod rect;
pub mod rng;
pub mod stage;
pub mod time;
pub mod transform;
