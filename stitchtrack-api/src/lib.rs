pub mod domain;
pub mod error;
pub mod normalize;

pub use domain::*;
pub use error::*;
