use super::identifiable::Identifiable;

/// Trait for entities whose changes are recorded in an append-only ledger
pub trait Auditable: Identifiable {
    /// The ledger record written for each tracked change
    type AuditEntry: Send;
}
