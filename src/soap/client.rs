use crate::soap::envelope::{build_envelope, parse_response};
use crate::soap::wsdl::{ServiceDescription, SoapVersion};
use crate::soap::xml::XmlElement;
use crate::utils::error::{DotFitError, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

/// An established SOAP session: the parsed WSDL plus the header blocks sent
/// with every request.
#[derive(Debug)]
pub struct SoapClient {
    http: Client,
    wsdl_url: Url,
    description: ServiceDescription,
    headers: Vec<XmlElement>,
}

impl SoapClient {
    /// 下載並解析 WSDL（建立連線時唯一的網路往返）
    pub async fn connect(http: Client, wsdl_url: Url) -> Result<Self> {
        tracing::debug!("Fetching WSDL: {}", wsdl_url);
        let response = http.get(wsdl_url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(DotFitError::HttpStatus {
                status: status.as_u16(),
                body: body.chars().take(512).collect(),
            });
        }

        let mut description = ServiceDescription::parse(&body)?;
        description.resolve_locations(&wsdl_url)?;
        tracing::debug!(
            "WSDL loaded: {} service(s), target namespace {}",
            description.services.len(),
            description.target_namespace
        );

        Ok(Self {
            http,
            wsdl_url,
            description,
            headers: Vec::new(),
        })
    }

    pub fn add_soap_header(&mut self, header: XmlElement) {
        self.headers.push(header);
    }

    pub fn headers(&self) -> &[XmlElement] {
        &self.headers
    }

    pub fn describe(&self) -> &ServiceDescription {
        &self.description
    }

    pub fn wsdl_url(&self) -> &Url {
        &self.wsdl_url
    }

    /// Invokes `operation` on the given service port. `params` become the
    /// children of the request element, which is placed in the WSDL target
    /// namespace. Returns the response element from the SOAP body.
    pub async fn call(
        &self,
        service: &str,
        port: &str,
        operation: &str,
        params: Vec<XmlElement>,
    ) -> Result<XmlElement> {
        let port_info = self.description.port(service, port).ok_or_else(|| {
            DotFitError::unexpected(format!("WSDL has no port {}.{}", service, port))
        })?;
        let operation_info = port_info.operation(operation).ok_or_else(|| {
            DotFitError::unexpected(format!(
                "port {}.{} has no operation {}",
                service, port, operation
            ))
        })?;

        let body = XmlElement::new(operation)
            .with_attribute("xmlns", self.description.target_namespace.as_str())
            .with_children(params);
        let envelope = build_envelope(port_info.soap_version, &self.headers, body)?;

        let action = operation_info.soap_action.as_deref().unwrap_or_default();
        let request = match port_info.soap_version {
            SoapVersion::Soap12 => self.http.post(&port_info.location).header(
                CONTENT_TYPE,
                format!("application/soap+xml; charset=utf-8; action=\"{}\"", action),
            ),
            SoapVersion::Soap11 => self
                .http
                .post(&port_info.location)
                .header(CONTENT_TYPE, "text/xml; charset=utf-8")
                .header("SOAPAction", format!("\"{}\"", action)),
        };

        tracing::debug!("SOAP call {} -> {}", operation, port_info.location);
        let response = request.body(envelope).send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        tracing::debug!("SOAP call {} returned HTTP {}", operation, status);

        parse_response(status, &text)
    }
}
