pub mod local;
pub mod naming;

pub use local::*;
pub use naming::*;
