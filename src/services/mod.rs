pub mod stream;
pub mod upload;

pub use stream::StreamService;
pub use upload::UploadService;
