pub mod repo_impl;
pub mod create_batch;
pub mod load;
pub mod load_batch;
pub mod update_batch;
pub mod delete_batch;
pub mod query;
pub mod bulk_update;
pub mod status_counts;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::ItemRepositoryImpl;
