pub mod client;
pub mod connection;
pub mod mapping;
pub mod validation;

pub use crate::domain::model::{InventoryItem, OrderRequest, ShippedOrder, ValidatedOrder};
pub use crate::domain::ports::{DiagnosticSink, OrdersApi};
pub use crate::utils::error::Result;
