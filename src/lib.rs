//! Scheduling-conflict and inventory-availability validation for resource
//! requests: overlap detection against existing events and requests,
//! alternative-slot suggestion, and low-stock classification of requested
//! materials. The checkers are pure functions over a caller-supplied
//! snapshot; `Validator` composes them over a [`snapshot::SnapshotSource`].

pub mod check;
pub mod config;
pub mod debounce;
pub mod error;
pub mod limits;
pub mod model;
pub mod observability;
pub mod snapshot;
pub mod store;
pub mod validator;

pub use check::{StockPolicy, assess, check_stock, detect_conflicts, suggest_slots};
pub use config::ValidatorConfig;
pub use error::SourceError;
pub use validator::{RequestForm, ValidationReport, Validator};
