use crate::config::Credentials;
use crate::soap::{SoapClient, XmlElement};
use crate::utils::error::Result;
use crate::utils::logger::DiagnosticLogger;
use reqwest::Client;
use std::sync::Arc;
use tokio::sync::OnceCell;
use url::Url;

pub const AUTH_HEADER_NAMESPACE: &str = "http://services.dotfit.com/";

/// Lazily builds and memoizes the one SOAP session of an adapter.
///
/// Concurrent first callers share a single in-flight build. A failed build
/// leaves the slot empty, so the next call starts over.
#[derive(Debug)]
pub struct ConnectionManager {
    wsdl_url: Url,
    credentials: Credentials,
    http: Client,
    logger: DiagnosticLogger,
    session: OnceCell<Arc<SoapClient>>,
}

impl ConnectionManager {
    pub fn new(wsdl_url: Url, credentials: Credentials, http: Client, logger: DiagnosticLogger) -> Self {
        Self {
            wsdl_url,
            credentials,
            http,
            logger,
            session: OnceCell::new(),
        }
    }

    pub fn wsdl_url(&self) -> &Url {
        &self.wsdl_url
    }

    pub fn is_connected(&self) -> bool {
        self.session.initialized()
    }

    pub async fn get_client(&self) -> Result<Arc<SoapClient>> {
        if let Some(session) = self.session.get() {
            return Ok(Arc::clone(session));
        }

        self.logger.log(&["info"], "Client not initialized, initializing...");
        let session = self.session.get_or_try_init(|| self.create_client()).await?;
        Ok(Arc::clone(session))
    }

    /// 丟棄已建立的 session，下一次呼叫會重新連線
    pub fn reset(&mut self) -> bool {
        self.session.take().is_some()
    }

    async fn create_client(&self) -> Result<Arc<SoapClient>> {
        self.logger
            .log(&["info"], format!("Creating client for WSDL: {}", self.wsdl_url));

        let mut client = match SoapClient::connect(self.http.clone(), self.wsdl_url.clone()).await {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("❌ Failed to load WSDL from {}: {}", self.wsdl_url, e);
                return Err(e);
            }
        };
        client.add_soap_header(auth_header(&self.credentials));

        tracing::info!("✅ SOAP session established: {}", self.wsdl_url);
        Ok(Arc::new(client))
    }
}

/// `<ClubAuthHeader xmlns="http://services.dotfit.com/"><ClubID/><ClubPassword/></ClubAuthHeader>`
pub fn auth_header(credentials: &Credentials) -> XmlElement {
    XmlElement::new("ClubAuthHeader")
        .with_attribute("xmlns", AUTH_HEADER_NAMESPACE)
        .with_child(XmlElement::text_element("ClubID", credentials.club_id()))
        .with_child(XmlElement::text_element(
            "ClubPassword",
            credentials.club_password(),
        ))
}
