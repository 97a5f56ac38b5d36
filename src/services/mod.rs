pub mod product_controller;

pub use product_controller::*;
