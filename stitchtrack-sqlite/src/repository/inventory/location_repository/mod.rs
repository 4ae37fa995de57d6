pub mod repo_impl;
pub mod create_batch;
pub mod load_batch;
pub mod delete_batch;
pub mod find_by_name;
pub mod list_with_usage;
pub mod update_description;
#[cfg(test)]
pub mod test_utils;

pub use repo_impl::LocationRepositoryImpl;
