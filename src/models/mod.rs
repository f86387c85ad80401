pub mod concept;
pub mod image;
pub mod request;

pub use concept::*;
pub use image::*;
pub use request::*;
