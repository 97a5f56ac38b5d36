mod errors;
pub mod product;

pub use errors::*;
pub use product::*;
