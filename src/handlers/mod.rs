pub mod fallback;
pub mod health;
pub mod upload;
pub mod video;
