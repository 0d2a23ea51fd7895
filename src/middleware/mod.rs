pub mod panic;

pub use panic::panic_response;
