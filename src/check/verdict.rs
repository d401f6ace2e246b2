use crate::model::*;

/// Fold conflicts and stock results into the submission gate.
///
/// Direct overlaps and insufficient stock block outright. Partial overlaps
/// and low-stock warnings allow submission after explicit confirmation.
pub fn assess(conflicts: &[Conflict], stock: &[LineAvailability]) -> Verdict {
    let blocked = conflicts.iter().any(|c| c.kind == ConflictKind::Direct)
        || stock
            .iter()
            .any(|l| matches!(l.status, StockStatus::Insufficient { .. }));
    if blocked {
        return Verdict::Blocked;
    }

    let needs_confirmation = conflicts.iter().any(|c| c.kind == ConflictKind::Partial)
        || stock
            .iter()
            .any(|l| matches!(l.status, StockStatus::LowStock { .. }));
    if needs_confirmation {
        Verdict::NeedsConfirmation
    } else {
        Verdict::Allowed
    }
}
