use crate::domain::model::{InventoryItem, OrderRequest, ShippedOrder};
use crate::soap::wsdl::ServiceDescription;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// The five calls exposed over the OrdersService.
#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn describe(&self) -> Result<ServiceDescription>;
    async fn inventory(&self) -> Result<Vec<InventoryItem>>;
    async fn shipments_by_date(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ShippedOrder>>;
    async fn shipments_by_id(&self, order_id: i64) -> Result<Vec<ShippedOrder>>;
    async fn create_order(&self, order: OrderRequest) -> Result<i64>;
}

/// Destination for diagnostic output. Implementations must not panic.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, tags: &[&str], message: &str);
}
