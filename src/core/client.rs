use crate::config::toml_config::TomlConfig;
use crate::config::{ClientConfig, CredentialsInput};
use crate::core::connection::ConnectionManager;
use crate::core::mapping::{
    format_timestamp, inventory_items, order_id, order_params, result_element, shipped_orders,
};
use crate::core::validation::validate_order;
use crate::domain::model::{InventoryItem, OrderRequest, ShippedOrder};
use crate::domain::ports::{DiagnosticSink, OrdersApi};
use crate::soap::{ServiceDescription, SoapClient, XmlElement};
use crate::utils::error::{DotFitError, Result};
use crate::utils::logger::DiagnosticLogger;
use crate::utils::validation::Validate;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;

pub const SERVICE: &str = "OrdersService";
pub const PORT: &str = "OrdersServiceSoap12";

const GET_INVENTORY: &str = "GetInventory";
const GET_SHIPMENTS_BY_DATE: &str = "GetShipmentInfoByDate";
const GET_SHIPMENTS_BY_ID: &str = "GetShipmentInfoByID";
const PLACE_WHOLESALE_ORDER: &str = "PlaceWholesaleOrder";

/// Client for the OrdersService: one lazily established SOAP session per
/// instance, shared by every call.
#[derive(Debug)]
pub struct DotFitClient {
    config: ClientConfig,
    logger: DiagnosticLogger,
    connection: ConnectionManager,
}

impl DotFitClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let logger = DiagnosticLogger::new(config.debug);
        Self::with_logger(config, logger)
    }

    /// 自訂診斷輸出目的地（debug 關閉時不會呼叫 sink）
    pub fn with_sink(config: ClientConfig, sink: Arc<dyn DiagnosticSink>) -> Result<Self> {
        let logger = DiagnosticLogger::with_sink(config.debug, sink);
        Self::with_logger(config, logger)
    }

    fn with_logger(config: ClientConfig, logger: DiagnosticLogger) -> Result<Self> {
        config.validate()?;
        logger.log(&["info"], "Debug logging enabled");

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        let connection = ConnectionManager::new(
            config.endpoint.clone(),
            config.credentials.clone(),
            http,
            logger.clone(),
        );

        Ok(Self {
            config,
            logger,
            connection,
        })
    }

    /// `env` 為 `dev`（預設）或 `prod`
    pub fn from_credentials(credentials: CredentialsInput, env: Option<&str>, debug: bool) -> Result<Self> {
        Self::new(ClientConfig::new(credentials, env, debug)?)
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::new(TomlConfig::from_file(path)?.into_client_config()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The WSDL URL this client connects to.
    pub fn url(&self) -> &str {
        self.connection.wsdl_url().as_str()
    }

    pub fn log(&self, tags: &[&str], message: impl std::fmt::Display) {
        self.logger.log(tags, message);
    }

    pub async fn client(&self) -> Result<Arc<SoapClient>> {
        self.connection.get_client().await
    }

    pub fn reset(&mut self) -> bool {
        self.connection.reset()
    }

    async fn call(&self, operation: &str, params: Vec<XmlElement>) -> Result<XmlElement> {
        let client = self.client().await?;
        client.call(SERVICE, PORT, operation, params).await
    }

    pub async fn describe(&self) -> Result<ServiceDescription> {
        let client = self.client().await?;
        Ok(client.describe().clone())
    }

    /// 回應缺少 GetInventoryResult 時直接回傳錯誤（不做空集合轉換）
    pub async fn inventory(&self) -> Result<Vec<InventoryItem>> {
        let response = self.call(GET_INVENTORY, Vec::new()).await?;
        let result = result_element(&response, "GetInventoryResult").ok_or_else(|| {
            DotFitError::unexpected("GetInventory response has no GetInventoryResult")
        })?;
        inventory_items(result)
    }

    pub async fn shipments_by_date(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ShippedOrder>> {
        let start = format_timestamp(&start);
        let end = format_timestamp(&end);
        self.log(&["info"], format!("Getting shipments by date: {} - {}", start, end));

        let params = vec![
            XmlElement::text_element("startDate", start.as_str()),
            XmlElement::text_element("endDate", end.as_str()),
        ];
        let context = format!("between: {} - {}", start, end);
        self.shipments(GET_SHIPMENTS_BY_DATE, params, &context).await
    }

    pub async fn shipments_by_id(&self, order_id: i64) -> Result<Vec<ShippedOrder>> {
        self.log(&["info"], format!("Getting shipments by order id: {}", order_id));

        let params = vec![XmlElement::text_element("OrderID", order_id.to_string())];
        let context = format!("for order id: {}", order_id);
        self.shipments(GET_SHIPMENTS_BY_ID, params, &context).await
    }

    /// Shared by both shipment lookups: a SOAP fault from the service and an
    /// absent result both become an empty list. Network and HTTP failures
    /// propagate.
    async fn shipments(
        &self,
        operation: &str,
        params: Vec<XmlElement>,
        context: &str,
    ) -> Result<Vec<ShippedOrder>> {
        let response = match self.call(operation, params).await {
            Ok(response) => Some(response),
            Err(DotFitError::SoapFault { code, reason }) => {
                self.log(
                    &["error"],
                    format!("Problem getting shipments {} ({}: {})", context, code, reason),
                );
                tracing::warn!("{} returned a SOAP fault, treating as no shipments: {}", operation, reason);
                None
            }
            Err(e) => return Err(e),
        };

        let result_name = format!("{}Result", operation);
        let result = response
            .as_ref()
            .and_then(|response| result_element(response, &result_name));
        let orders = shipped_orders(result)?;

        if orders.is_empty() {
            self.log(&["info"], format!("No shipments found {}", context));
        }
        Ok(orders)
    }

    /// 先驗證再連線：驗證失敗不會觸發任何網路呼叫
    pub async fn create_order(&self, order: OrderRequest) -> Result<i64> {
        let validated = match validate_order(&order, self.config.credentials.wholesale_id()) {
            Ok(validated) => validated,
            Err(e) => {
                self.log(&["error"], format!("Order validation failed: {}", e.message()));
                return Err(e);
            }
        };

        self.log(
            &["info"],
            format!(
                "Submitting order {} with {} line(s)",
                validated.purchase_order_num,
                validated.order_lines.len()
            ),
        );

        let response = self
            .call(PLACE_WHOLESALE_ORDER, order_params(&validated))
            .await?;
        let id = order_id(&response)?;

        tracing::info!("✅ Order {} placed as {}", validated.purchase_order_num, id);
        Ok(id)
    }
}

#[async_trait]
impl OrdersApi for DotFitClient {
    async fn describe(&self) -> Result<ServiceDescription> {
        DotFitClient::describe(self).await
    }

    async fn inventory(&self) -> Result<Vec<InventoryItem>> {
        DotFitClient::inventory(self).await
    }

    async fn shipments_by_date(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ShippedOrder>> {
        DotFitClient::shipments_by_date(self, start, end).await
    }

    async fn shipments_by_id(&self, order_id: i64) -> Result<Vec<ShippedOrder>> {
        DotFitClient::shipments_by_id(self, order_id).await
    }

    async fn create_order(&self, order: OrderRequest) -> Result<i64> {
        DotFitClient::create_order(self, order).await
    }
}
