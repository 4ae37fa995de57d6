pub mod repo_impl;
pub mod create_batch;
pub mod list_for;
pub mod load_audits;

pub use repo_impl::StatusHistoryRepositoryImpl;
