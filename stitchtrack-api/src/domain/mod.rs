pub mod item_query;
pub mod item_request;
pub mod status;

pub use item_query::*;
pub use item_request::*;
pub use status::*;
