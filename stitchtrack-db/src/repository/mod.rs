pub mod create_batch;
pub mod delete_batch;
pub mod load;
pub mod load_audits;
pub mod load_batch;
pub mod pagination;
pub mod update_batch;

// Re-exports
pub use create_batch::*;
pub use delete_batch::*;
pub use load::*;
pub use load_audits::*;
pub use load_batch::*;
pub use pagination::*;
pub use update_batch::*;
