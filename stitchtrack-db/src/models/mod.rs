pub mod auditable;
pub mod identifiable;
pub mod inventory;

// Re-exports
pub use auditable::*;
pub use identifiable::*;
pub use inventory::*;
