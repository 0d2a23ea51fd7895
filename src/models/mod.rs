pub mod health;
pub mod video;

pub use health::*;
pub use video::*;
