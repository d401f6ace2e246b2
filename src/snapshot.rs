//! The read-only data-access boundary: a port the UI's persistence layer
//! implements, plus lenient decoding of the raw rows it stores.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use ulid::Ulid;

use crate::error::SourceError;
use crate::model::*;

/// Point-in-time snapshot supplier. Implementations fetch from whatever the
/// CRUD layer persists; the validators only ever read the result. The
/// snapshot is best-effort against concurrent writers; the persistence
/// layer re-validates at commit time.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Occupying and non-occupying reservations at `location` overlapping
    /// `window`, from both stored events and requests.
    async fn reservations(
        &self,
        location: &str,
        window: &Span,
    ) -> Result<Vec<Reservation>, SourceError>;

    /// Current free stock for the given items. Unknown ids are simply
    /// absent from the result.
    async fn stock(&self, item_ids: &[Ulid]) -> Result<Vec<StockRecord>, SourceError>;
}

#[async_trait]
impl<S: SnapshotSource + ?Sized> SnapshotSource for std::sync::Arc<S> {
    async fn reservations(
        &self,
        location: &str,
        window: &Span,
    ) -> Result<Vec<Reservation>, SourceError> {
        (**self).reservations(location, window).await
    }

    async fn stock(&self, item_ids: &[Ulid]) -> Result<Vec<StockRecord>, SourceError> {
        (**self).stock(item_ids).await
    }
}

#[derive(Deserialize)]
struct ReservationRow {
    id: Ulid,
    #[serde(rename = "nome")]
    name: String,
    #[serde(rename = "local")]
    location: String,
    #[serde(rename = "data_inicio")]
    start: String,
    #[serde(rename = "data_fim")]
    end: String,
    #[serde(rename = "origem")]
    origin: Origin,
    status: ReservationStatus,
}

#[derive(Deserialize)]
struct StockRow {
    id: Ulid,
    #[serde(rename = "nome")]
    name: String,
    #[serde(rename = "categoria")]
    category: ItemCategory,
    #[serde(rename = "quantidade_disponivel")]
    available: u32,
}

/// Decode stored reservation rows. Rows with missing fields, unparseable
/// datetimes, or inverted spans are skipped with a warning: a malformed
/// row must not block validation of the rest (fail-open).
pub fn decode_reservations(rows: &[Value]) -> Vec<Reservation> {
    rows.iter()
        .filter_map(|row| match decode_reservation(row) {
            Ok(r) => Some(r),
            Err(reason) => {
                tracing::warn!(%reason, "skipping undecodable reservation row");
                None
            }
        })
        .collect()
}

fn decode_reservation(row: &Value) -> Result<Reservation, String> {
    let raw: ReservationRow =
        serde_json::from_value(row.clone()).map_err(|e| e.to_string())?;
    let start = parse_datetime(&raw.start)
        .ok_or_else(|| format!("bad data_inicio: {:?}", raw.start))?;
    let end = parse_datetime(&raw.end).ok_or_else(|| format!("bad data_fim: {:?}", raw.end))?;
    if start >= end {
        return Err(format!("inverted span: {start} >= {end}"));
    }
    Ok(Reservation {
        id: raw.id,
        name: raw.name,
        location: raw.location,
        span: Span::new(start, end),
        origin: raw.origin,
        status: raw.status,
    })
}

/// Decode stored inventory rows, skipping undecodable ones with a warning.
pub fn decode_stock(rows: &[Value]) -> Vec<StockRecord> {
    rows.iter()
        .filter_map(|row| match serde_json::from_value::<StockRow>(row.clone()) {
            Ok(raw) => Some(StockRecord {
                item_id: raw.id,
                name: raw.name,
                category: raw.category,
                available: raw.available,
            }),
            Err(e) => {
                tracing::warn!(reason = %e, "skipping undecodable inventory row");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(start: &str, end: &str, status: &str) -> Value {
        json!({
            "id": Ulid::new().to_string(),
            "nome": "Ensaio do coral",
            "local": "Templo",
            "data_inicio": start,
            "data_fim": end,
            "origem": "evento",
            "status": status,
        })
    }

    #[test]
    fn decodes_well_formed_rows() {
        let rows = vec![row("2025-07-27T19:00", "2025-07-27T21:00:00", "apto")];
        let decoded = decode_reservations(&rows);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].location, "Templo");
        assert_eq!(decoded[0].status, ReservationStatus::Approved);
        assert_eq!(decoded[0].origin, Origin::Event);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let rows = vec![
            row("garbage", "2025-07-27T21:00", "apto"),
            row("2025-07-27T21:00", "2025-07-27T19:00", "apto"), // inverted
            json!({"unexpected": true}),
            row("2025-07-27T19:00", "2025-07-27T21:00", "pendente"),
        ];
        let decoded = decode_reservations(&rows);
        assert_eq!(decoded.len(), 1);
        assert_eq!(decoded[0].status, ReservationStatus::Pending);
    }

    #[test]
    fn decodes_stock_rows() {
        let rows = vec![
            json!({
                "id": Ulid::new().to_string(),
                "nome": "Microfone",
                "categoria": "audio",
                "quantidade_disponivel": 4,
            }),
            json!({
                "id": Ulid::new().to_string(),
                "nome": "Violão",
                "categoria": "instrumento_musical",
                "quantidade_disponivel": 2,
            }),
            json!({"nome": "broken"}),
        ];
        let decoded = decode_stock(&rows);
        assert_eq!(decoded.len(), 2);
        assert_eq!(decoded[0].category, ItemCategory::Other("audio".to_string()));
        assert_eq!(decoded[1].category, ItemCategory::Instrument);
        assert_eq!(decoded[1].available, 2);
    }
}
