/// Trait for entities that can be uniquely identified
pub trait Identifiable {
    /// The key type the entity is stored under
    type Id: Clone + Eq + std::hash::Hash + Send + Sync;

    /// Returns the unique identifier of the entity
    fn get_id(&self) -> Self::Id;
}
