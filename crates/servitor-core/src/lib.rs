mod handler;
pub use handler::*;

mod label;
pub use label::*;

mod status;
pub use status::*;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;
