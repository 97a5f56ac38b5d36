pub mod flash;
pub mod image_store;

pub use flash::*;
pub use image_store::*;
