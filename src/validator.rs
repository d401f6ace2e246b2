use std::collections::HashMap;
use std::time::Instant;

use chrono::{Days, NaiveTime};
use serde::Serialize;
use ulid::Ulid;

use crate::check::{assess, check_stock, detect_conflicts, suggest_slots};
use crate::config::ValidatorConfig;
use crate::error::SourceError;
use crate::limits::MAX_DAY_ADVANCE;
use crate::model::*;
use crate::observability;
use crate::snapshot::SnapshotSource;

/// Raw form fields as the UI holds them mid-edit. Datetimes stay strings
/// here: half-typed input is expected and handled by skipping, not erroring.
#[derive(Debug, Clone, Default)]
pub struct RequestForm {
    pub location: String,
    pub start: String,
    pub end: String,
    pub exclude: Option<Ulid>,
    pub items: Vec<ItemRequest>,
}

/// Everything the UI needs to gate submission and render inline feedback.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationReport {
    pub conflicts: Vec<Conflict>,
    pub suggestions: Vec<SuggestedSlot>,
    pub stock: Vec<LineAvailability>,
    pub verdict: Verdict,
    /// False when schedule fields were unusable and conflict detection was
    /// skipped; the empty conflict list then means "not checked".
    pub schedule_checked: bool,
}

/// Composition root over a snapshot source: fetch, run the checkers,
/// assemble the report. Holds no mutable state of its own.
pub struct Validator<S> {
    source: S,
    config: ValidatorConfig,
}

impl<S: SnapshotSource> Validator<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, ValidatorConfig::default())
    }

    pub fn with_config(source: S, config: ValidatorConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Full validation of a well-formed candidate plus its item lines.
    pub async fn validate(
        &self,
        candidate: &Candidate,
        items: &[ItemRequest],
    ) -> Result<ValidationReport, SourceError> {
        let started = Instant::now();

        let (conflicts, suggestions) = self.check_schedule(candidate).await?;
        let stock = self.check_materials(items).await?;
        let verdict = assess(&conflicts, &stock);

        metrics::counter!(
            observability::VALIDATIONS_TOTAL,
            "verdict" => observability::verdict_label(&verdict)
        )
        .increment(1);
        metrics::counter!(observability::CONFLICTS_TOTAL).increment(conflicts.len() as u64);
        metrics::counter!(observability::SUGGESTIONS_TOTAL).increment(suggestions.len() as u64);
        metrics::histogram!(observability::VALIDATION_DURATION_SECONDS)
            .record(started.elapsed().as_secs_f64());
        tracing::debug!(
            location = %candidate.location,
            conflicts = conflicts.len(),
            suggestions = suggestions.len(),
            verdict = observability::verdict_label(&verdict),
            "validated candidate"
        );

        Ok(ValidationReport {
            conflicts,
            suggestions,
            stock,
            verdict,
            schedule_checked: true,
        })
    }

    /// Validate raw form state. Unusable schedule fields skip conflict
    /// detection (fail-open) while materials are still checked.
    pub async fn validate_form(&self, form: &RequestForm) -> Result<ValidationReport, SourceError> {
        match Candidate::parse(&form.location, &form.start, &form.end, form.exclude) {
            Some(candidate) => self.validate(&candidate, &form.items).await,
            None => {
                metrics::counter!(observability::SCHEDULE_SKIPS_TOTAL).increment(1);
                tracing::debug!(
                    location = %form.location,
                    "schedule fields unusable, skipping conflict detection"
                );
                let stock = self.check_materials(&form.items).await?;
                let verdict = assess(&[], &stock);
                Ok(ValidationReport {
                    conflicts: Vec::new(),
                    suggestions: Vec::new(),
                    stock,
                    verdict,
                    schedule_checked: false,
                })
            }
        }
    }

    /// Schedule half only: conflicts plus alternatives when conflicted.
    pub async fn check_schedule(
        &self,
        candidate: &Candidate,
    ) -> Result<(Vec<Conflict>, Vec<SuggestedSlot>), SourceError> {
        let window = fetch_window(&candidate.span);
        let fetch_started = Instant::now();
        let existing = self.source.reservations(&candidate.location, &window).await?;
        metrics::histogram!(observability::SNAPSHOT_FETCH_DURATION_SECONDS)
            .record(fetch_started.elapsed().as_secs_f64());

        let conflicts = detect_conflicts(candidate, &existing);
        let suggestions = suggest_slots(candidate, &conflicts, &existing);
        Ok((conflicts, suggestions))
    }

    /// Materials half only: join requested quantities with the stock
    /// snapshot and classify. Items absent from the snapshot cannot be
    /// fulfilled and classify insufficient for the full quantity.
    pub async fn check_materials(
        &self,
        items: &[ItemRequest],
    ) -> Result<Vec<LineAvailability>, SourceError> {
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Ulid> = items.iter().map(|i| i.item_id).collect();
        let fetch_started = Instant::now();
        let records = self.source.stock(&ids).await?;
        metrics::histogram!(observability::SNAPSHOT_FETCH_DURATION_SECONDS)
            .record(fetch_started.elapsed().as_secs_f64());

        let by_id: HashMap<Ulid, StockRecord> =
            records.into_iter().map(|r| (r.item_id, r)).collect();
        let lines: Vec<InventoryLine> = items
            .iter()
            .map(|req| match by_id.get(&req.item_id) {
                Some(rec) => InventoryLine {
                    item_id: req.item_id,
                    name: rec.name.clone(),
                    category: rec.category.clone(),
                    requested: req.quantity,
                    available: rec.available,
                },
                None => {
                    tracing::warn!(item = %req.item_id, "item missing from stock snapshot");
                    InventoryLine {
                        item_id: req.item_id,
                        name: req.item_id.to_string(),
                        category: ItemCategory::Other(String::new()),
                        requested: req.quantity,
                        available: 0,
                    }
                }
            })
            .collect();

        Ok(check_stock(&lines, &self.config.stock_policy))
    }
}

/// Reservation window worth fetching for one candidate: its whole calendar
/// day plus the suggester's day-advance lookahead, extended to cover
/// candidates that themselves run past the lookahead.
fn fetch_window(span: &Span) -> Span {
    let start = span.start.date().and_time(NaiveTime::MIN);
    let end = span
        .start
        .date()
        .checked_add_days(Days::new(MAX_DAY_ADVANCE + 1))
        .map(|d| d.and_time(NaiveTime::MIN).max(span.end))
        .unwrap_or(span.end);
    Span::new(start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn fetch_window_covers_day_and_lookahead() {
        let day = NaiveDate::from_ymd_opt(2025, 7, 27).unwrap();
        let span = Span::new(
            day.and_hms_opt(19, 0, 0).unwrap(),
            day.and_hms_opt(21, 0, 0).unwrap(),
        );
        let window = fetch_window(&span);
        assert_eq!(window.start, day.and_hms_opt(0, 0, 0).unwrap());
        assert_eq!(
            window.end,
            NaiveDate::from_ymd_opt(2025, 8, 4)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn fetch_window_extends_for_long_candidates() {
        let span = Span::new(
            NaiveDate::from_ymd_opt(2025, 7, 27)
                .unwrap()
                .and_hms_opt(19, 0, 0)
                .unwrap(),
            NaiveDate::from_ymd_opt(2025, 8, 20)
                .unwrap()
                .and_hms_opt(21, 0, 0)
                .unwrap(),
        );
        let window = fetch_window(&span);
        assert_eq!(window.end, span.end);
    }
}
