pub mod config;
pub mod core;
pub mod domain;
pub mod soap;
pub mod utils;

pub use config::{ClientConfig, Credentials, CredentialsInput, Environment};
pub use self::core::{client::DotFitClient, connection::ConnectionManager};
pub use domain::model::{
    Address, InventoryItem, OrderLine, OrderLineEntry, OrderRequest, ShippedOrder, ShippingMethod,
};
pub use domain::ports::{DiagnosticSink, OrdersApi};
pub use soap::ServiceDescription;
pub use utils::error::{DotFitError, Result};
