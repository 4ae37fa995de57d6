pub mod item;
pub mod location;
pub mod status_counts;
pub mod status_history;

pub use item::*;
pub use location::*;
pub use status_counts::*;
pub use status_history::*;
