mod conflict;
mod slots;
mod stock;
mod verdict;

pub use conflict::detect_conflicts;
pub use slots::suggest_slots;
pub use stock::{StockPolicy, check_stock};
pub use verdict::assess;
