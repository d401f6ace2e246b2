use crate::limits::{MAX_DAY_ADVANCE, MAX_SUGGESTIONS};
use crate::model::*;

/// Propose conflict-free alternatives of the candidate's duration at the
/// candidate's location: gaps on the same calendar day first, then the same
/// time-of-day on the next free day within `MAX_DAY_ADVANCE` days.
///
/// Empty when there is nothing to route around (`conflicts` empty) or when
/// the day-advance bound is exhausted; the UI then falls back to manual
/// rescheduling.
pub fn suggest_slots(
    candidate: &Candidate,
    conflicts: &[Conflict],
    existing: &[Reservation],
) -> Vec<SuggestedSlot> {
    if conflicts.is_empty() {
        return Vec::new();
    }

    let location = normalize_location(&candidate.location);
    let occupying: Vec<&Reservation> = existing
        .iter()
        .filter(|r| r.status.occupies())
        .filter(|r| normalize_location(&r.location) == location)
        .filter(|r| candidate.exclude != Some(r.id))
        .collect();

    let same_day = same_day_slots(candidate, &occupying);
    if !same_day.is_empty() {
        return same_day;
    }

    // No gap today: advance whole days keeping the time-of-day.
    for days in 1..=MAX_DAY_ADVANCE {
        let Some(shifted) = candidate.span.shift_days(days) else {
            break;
        };
        if occupying.iter().all(|r| !r.span.overlaps(&shifted)) {
            let description = if days == 1 {
                "next day, same time".to_string()
            } else {
                format!("{days} days later, same time")
            };
            return vec![SuggestedSlot {
                span: shifted,
                description,
            }];
        }
    }

    Vec::new()
}

/// Scan the candidate's calendar day for gaps at least as long as the
/// candidate, including before the first and after the last busy interval.
fn same_day_slots(candidate: &Candidate, occupying: &[&Reservation]) -> Vec<SuggestedSlot> {
    let duration = candidate.span.duration();
    let Some(day) = Span::day_window(candidate.span.start.date()) else {
        return Vec::new();
    };

    // Busy intervals clamped to the day window, merged into disjoint spans.
    let mut busy: Vec<Span> = occupying
        .iter()
        .filter(|r| r.span.overlaps(&day))
        .map(|r| Span::new(r.span.start.max(day.start), r.span.end.min(day.end)))
        .collect();
    busy.sort_by_key(|s| s.start);
    let busy = merge_overlapping(&busy);

    let mut slots = Vec::new();
    let mut cursor = day.start;
    for b in &busy {
        if slots.len() == MAX_SUGGESTIONS {
            return slots;
        }
        if b.start - cursor >= duration {
            slots.push(SuggestedSlot {
                span: Span::new(cursor, cursor + duration),
                description: "next available slot same day".to_string(),
            });
        }
        cursor = cursor.max(b.end);
    }
    // Tail gap after the last busy interval (or the whole day when idle).
    if slots.len() < MAX_SUGGESTIONS && day.end - cursor >= duration {
        slots.push(SuggestedSlot {
            span: Span::new(cursor, cursor + duration),
            description: "next available slot same day".to_string(),
        });
    }
    slots
}

/// Merge sorted overlapping/adjacent spans into disjoint spans.
fn merge_overlapping(sorted: &[Span]) -> Vec<Span> {
    let mut merged: Vec<Span> = Vec::new();
    for &span in sorted {
        if let Some(last) = merged.last_mut()
            && span.start <= last.end
        {
            last.end = last.end.max(span.end);
            continue;
        }
        merged.push(span);
    }
    merged
}
