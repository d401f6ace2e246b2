use chrono::{Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Half-open interval `[start, end)` over naive local datetimes; request
/// forms and stored events carry timezone-less timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Span {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// The full calendar day containing `date`: `[00:00, next day 00:00)`.
    pub fn day_window(date: NaiveDate) -> Option<Span> {
        let start = date.and_time(NaiveTime::MIN);
        let end = date.checked_add_days(Days::new(1))?.and_time(NaiveTime::MIN);
        Some(Span::new(start, end))
    }

    /// Same time-of-day, `days` calendar days later. None on calendar overflow.
    pub fn shift_days(&self, days: u64) -> Option<Span> {
        let start = self.start.checked_add_days(Days::new(days))?;
        let end = self.end.checked_add_days(Days::new(days))?;
        Some(Span::new(start, end))
    }
}

/// Parse the datetime strings the request form and the stored rows carry.
/// Accepts both second-precision and minute-precision ISO-like forms.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .ok()
}

/// Locations are matched case-insensitively, ignoring surrounding whitespace.
pub(crate) fn normalize_location(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Workflow status as stored by the request/event CRUD layer. Everything
/// except cancelled/rejected occupies its location, unknown strings included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ReservationStatus {
    Pending,
    Approved,
    Confirmed,
    AwaitingSeparation,
    Cancelled,
    Rejected,
    Other(String),
}

impl ReservationStatus {
    pub fn occupies(&self) -> bool {
        !matches!(self, ReservationStatus::Cancelled | ReservationStatus::Rejected)
    }

    /// The wire value the persistence layer stores.
    pub fn as_str(&self) -> &str {
        match self {
            ReservationStatus::Pending => "pendente",
            ReservationStatus::Approved => "apto",
            ReservationStatus::Confirmed => "confirmado",
            ReservationStatus::AwaitingSeparation => "aguardando_separacao",
            ReservationStatus::Cancelled => "cancelado",
            ReservationStatus::Rejected => "rejeitado",
            ReservationStatus::Other(s) => s,
        }
    }
}

impl From<String> for ReservationStatus {
    fn from(s: String) -> Self {
        match s.trim().to_lowercase().as_str() {
            "pendente" | "pending" => ReservationStatus::Pending,
            "apto" | "approved" => ReservationStatus::Approved,
            "confirmado" | "confirmed" => ReservationStatus::Confirmed,
            "aguardando_separacao" | "awaiting_separation" => ReservationStatus::AwaitingSeparation,
            "cancelado" | "cancelled" | "canceled" => ReservationStatus::Cancelled,
            "rejeitado" | "recusado" | "rejected" => ReservationStatus::Rejected,
            _ => ReservationStatus::Other(s),
        }
    }
}

impl From<ReservationStatus> for String {
    fn from(s: ReservationStatus) -> String {
        s.as_str().to_string()
    }
}

/// Whether an occupying interval comes from a stored event or a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Origin {
    #[serde(rename = "evento", alias = "event")]
    Event,
    #[serde(rename = "solicitacao", alias = "request")]
    Request,
}

/// A stored event or request holding a location for a time span.
/// Read-only snapshot data; the validators never mutate it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: Ulid,
    pub name: String,
    pub location: String,
    pub span: Span,
    pub origin: Origin,
    pub status: ReservationStatus,
}

/// The interval under validation. `exclude` carries the request's own id
/// when editing, so it does not conflict with itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub location: String,
    pub span: Span,
    pub exclude: Option<Ulid>,
}

impl Candidate {
    pub fn new(location: impl Into<String>, span: Span) -> Self {
        Self {
            location: location.into(),
            span,
            exclude: None,
        }
    }

    /// Build a candidate from raw form fields. Returns None when the location
    /// is blank or the datetimes are missing, unparseable, or inverted: the
    /// caller skips schedule validation in that case (fail-open).
    pub fn parse(
        location: &str,
        start: &str,
        end: &str,
        exclude: Option<Ulid>,
    ) -> Option<Candidate> {
        if location.trim().is_empty() {
            return None;
        }
        let start = parse_datetime(start)?;
        let end = parse_datetime(end)?;
        if start >= end {
            return None;
        }
        Some(Candidate {
            location: location.to_string(),
            span: Span::new(start, end),
            exclude,
        })
    }
}

/// How an overlap is classified. Direct collisions hard-block submission;
/// partial ones require explicit user confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Direct,
    Partial,
}

/// One entry per occupying reservation that overlaps the candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub with: Reservation,
}

/// A conflict-free alternative of the same duration at the same location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedSlot {
    pub span: Span,
    pub description: String,
}

/// Inventory category. Only the instrument class matters to the low-stock
/// policy; everything else keeps its stored category string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ItemCategory {
    Instrument,
    Other(String),
}

impl From<String> for ItemCategory {
    fn from(s: String) -> Self {
        if s.to_lowercase().contains("instrument") {
            ItemCategory::Instrument
        } else {
            ItemCategory::Other(s)
        }
    }
}

impl From<ItemCategory> for String {
    fn from(c: ItemCategory) -> String {
        match c {
            ItemCategory::Instrument => "instrumento_musical".to_string(),
            ItemCategory::Other(s) => s,
        }
    }
}

/// One requested item line on the request form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRequest {
    pub item_id: Ulid,
    pub quantity: u32,
}

/// Current free stock for an item, as reported by the inventory snapshot.
/// Availability is a global counter: quantities committed to other active
/// requests are already subtracted, with no time-windowing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    pub item_id: Ulid,
    pub name: String,
    pub category: ItemCategory,
    pub available: u32,
}

/// A stock record joined with the quantity the form asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryLine {
    pub item_id: Ulid,
    pub name: String,
    pub category: ItemCategory,
    pub requested: u32,
    pub available: u32,
}

/// Per-line availability classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StockStatus {
    Ok,
    /// The request cannot be fulfilled; `shortfall` units are missing.
    Insufficient { shortfall: u32 },
    /// Fulfillable, but only `remaining` units would be left.
    LowStock { remaining: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAvailability {
    pub item_id: Ulid,
    pub name: String,
    pub status: StockStatus,
}

/// Submission gate computed from conflicts and stock results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Allowed,
    NeedsConfirmation,
    Blocked,
}
