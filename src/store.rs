use async_trait::async_trait;
use dashmap::DashMap;
use ulid::Ulid;

use crate::error::SourceError;
use crate::model::*;
use crate::snapshot::SnapshotSource;

/// In-memory snapshot source: reservations bucketed by normalized location,
/// stock keyed by item id. Reference implementation of the port; the
/// integration tests drive the validator through it.
#[derive(Default)]
pub struct MemoryStore {
    reservations: DashMap<String, Vec<Reservation>>,
    stock: DashMap<Ulid, StockRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a reservation, moving it between location buckets
    /// when its location changed.
    pub fn upsert_reservation(&self, reservation: Reservation) {
        self.remove_reservation(reservation.id);
        let key = crate::model::normalize_location(&reservation.location);
        self.reservations.entry(key).or_default().push(reservation);
    }

    pub fn remove_reservation(&self, id: Ulid) -> Option<Reservation> {
        for mut bucket in self.reservations.iter_mut() {
            if let Some(pos) = bucket.iter().position(|r| r.id == id) {
                return Some(bucket.remove(pos));
            }
        }
        None
    }

    /// Flip a stored reservation's workflow status in place.
    pub fn set_status(&self, id: Ulid, status: ReservationStatus) -> bool {
        for mut bucket in self.reservations.iter_mut() {
            if let Some(r) = bucket.iter_mut().find(|r| r.id == id) {
                r.status = status;
                return true;
            }
        }
        false
    }

    pub fn upsert_stock(&self, record: StockRecord) {
        self.stock.insert(record.item_id, record);
    }

    pub fn reservation_count(&self) -> usize {
        self.reservations.iter().map(|b| b.len()).sum()
    }
}

#[async_trait]
impl SnapshotSource for MemoryStore {
    async fn reservations(
        &self,
        location: &str,
        window: &Span,
    ) -> Result<Vec<Reservation>, SourceError> {
        let key = crate::model::normalize_location(location);
        Ok(self
            .reservations
            .get(&key)
            .map(|bucket| {
                bucket
                    .iter()
                    .filter(|r| r.span.overlaps(window))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn stock(&self, item_ids: &[Ulid]) -> Result<Vec<StockRecord>, SourceError> {
        Ok(item_ids
            .iter()
            .filter_map(|id| self.stock.get(id).map(|e| e.value().clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn span(d: u32, h0: u32, h1: u32) -> Span {
        let day = NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
        Span::new(
            day.and_hms_opt(h0, 0, 0).unwrap(),
            day.and_hms_opt(h1, 0, 0).unwrap(),
        )
    }

    fn reservation(location: &str, s: Span) -> Reservation {
        Reservation {
            id: Ulid::new(),
            name: "Reunião".to_string(),
            location: location.to_string(),
            span: s,
            origin: Origin::Request,
            status: ReservationStatus::Pending,
        }
    }

    #[tokio::test]
    async fn lookup_is_scoped_to_location_and_window() {
        let store = MemoryStore::new();
        store.upsert_reservation(reservation("Templo", span(27, 19, 21)));
        store.upsert_reservation(reservation("Templo", span(28, 19, 21)));
        store.upsert_reservation(reservation("Sala 11", span(27, 19, 21)));

        let hits = store
            .reservations("templo", &span(27, 0, 23))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].location, "Templo");
    }

    #[tokio::test]
    async fn upsert_relocates_between_buckets() {
        let store = MemoryStore::new();
        let mut r = reservation("Templo", span(27, 19, 21));
        let id = r.id;
        store.upsert_reservation(r.clone());

        r.location = "Sala 11".to_string();
        store.upsert_reservation(r);
        assert_eq!(store.reservation_count(), 1);

        let old = store.reservations("Templo", &span(27, 0, 23)).await.unwrap();
        assert!(old.is_empty());
        let new = store.reservations("Sala 11", &span(27, 0, 23)).await.unwrap();
        assert_eq!(new[0].id, id);
    }

    #[tokio::test]
    async fn set_status_updates_in_place() {
        let store = MemoryStore::new();
        let r = reservation("Templo", span(27, 19, 21));
        let id = r.id;
        store.upsert_reservation(r);

        assert!(store.set_status(id, ReservationStatus::Cancelled));
        let hits = store.reservations("Templo", &span(27, 0, 23)).await.unwrap();
        assert_eq!(hits[0].status, ReservationStatus::Cancelled);
        assert!(!store.set_status(Ulid::new(), ReservationStatus::Approved));
    }

    #[tokio::test]
    async fn unknown_stock_ids_are_absent() {
        let store = MemoryStore::new();
        let known = Ulid::new();
        store.upsert_stock(StockRecord {
            item_id: known,
            name: "Microfone".to_string(),
            category: ItemCategory::Other("audio".to_string()),
            available: 4,
        });
        let records = store.stock(&[known, Ulid::new()]).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].item_id, known);
    }
}
