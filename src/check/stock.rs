use crate::limits::{DEFAULT_LOW_STOCK_THRESHOLD, INSTRUMENT_LOW_STOCK_THRESHOLD};
use crate::model::*;

/// Category-dependent low-stock thresholds. Instruments only warn at zero
/// remaining; everything else warns below two units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StockPolicy {
    pub default_threshold: u32,
    pub instrument_threshold: u32,
}

impl Default for StockPolicy {
    fn default() -> Self {
        Self {
            default_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            instrument_threshold: INSTRUMENT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl StockPolicy {
    pub fn threshold_for(&self, category: &ItemCategory) -> u32 {
        match category {
            ItemCategory::Instrument => self.instrument_threshold,
            ItemCategory::Other(_) => self.default_threshold,
        }
    }
}

/// Classify each requested line against its free stock. Lines are
/// independent; there is no shared pool across different items. An empty
/// request yields an empty result.
pub fn check_stock(lines: &[InventoryLine], policy: &StockPolicy) -> Vec<LineAvailability> {
    lines
        .iter()
        .map(|line| {
            let status = if line.requested > line.available {
                StockStatus::Insufficient {
                    shortfall: line.requested - line.available,
                }
            } else {
                let remaining = line.available - line.requested;
                if remaining < policy.threshold_for(&line.category) {
                    StockStatus::LowStock { remaining }
                } else {
                    StockStatus::Ok
                }
            };
            LineAvailability {
                item_id: line.item_id,
                name: line.name.clone(),
                status,
            }
        })
        .collect()
}
