use crate::soap::xml::XmlElement;
use crate::utils::error::{DotFitError, Result};
use serde::Serialize;
use std::collections::HashMap;
use url::Url;

pub const SOAP11_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
pub const SOAP12_BINDING_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap12/";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SoapVersion {
    Soap11,
    Soap12,
}

impl SoapVersion {
    fn from_binding_namespace(namespace: Option<&str>) -> Option<Self> {
        match namespace {
            Some(SOAP11_BINDING_NS) => Some(Self::Soap11),
            Some(SOAP12_BINDING_NS) => Some(Self::Soap12),
            _ => None,
        }
    }

    pub fn envelope_namespace(self) -> &'static str {
        match self {
            Self::Soap11 => "http://schemas.xmlsoap.org/soap/envelope/",
            Self::Soap12 => "http://www.w3.org/2003/05/soap-envelope",
        }
    }
}

/// Services, ports and operations declared by a WSDL document, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceDescription {
    pub target_namespace: String,
    pub services: Vec<ServiceInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceInfo {
    pub name: String,
    pub ports: Vec<PortInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortInfo {
    pub name: String,
    pub binding: String,
    pub soap_version: SoapVersion,
    pub location: String,
    pub operations: Vec<OperationInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperationInfo {
    pub name: String,
    pub soap_action: Option<String>,
}

impl ServiceDescription {
    /// 解析 WSDL，只讀取 service / port / binding，不處理 XSD 型別
    pub fn parse(wsdl: &str) -> Result<Self> {
        let definitions = XmlElement::parse_document(wsdl)?;
        if definitions.name != "definitions" {
            return Err(DotFitError::unexpected(format!(
                "expected WSDL definitions, found <{}>",
                definitions.name
            )));
        }

        let target_namespace = definitions
            .attribute("targetNamespace")
            .unwrap_or_default()
            .to_string();

        let mut bindings: HashMap<&str, Vec<OperationInfo>> = HashMap::new();
        for binding in definitions.children_named("binding") {
            let Some(name) = binding.attribute("name") else {
                continue;
            };
            let operations = binding
                .children_named("operation")
                .filter_map(|operation| {
                    let name = operation.attribute("name")?;
                    let soap_action = operation
                        .children
                        .iter()
                        .find(|child| {
                            child.name == "operation"
                                && SoapVersion::from_binding_namespace(child.namespace.as_deref())
                                    .is_some()
                        })
                        .and_then(|child| child.attribute("soapAction"))
                        .map(str::to_string);
                    Some(OperationInfo {
                        name: name.to_string(),
                        soap_action,
                    })
                })
                .collect();
            bindings.insert(name, operations);
        }

        let mut services = Vec::new();
        for service in definitions.children_named("service") {
            let mut ports = Vec::new();
            for port in service.children_named("port") {
                // 只保留 SOAP 1.1 / 1.2 的 port（略過 HTTP GET/POST binding）
                let Some((soap_version, location)) = port.children.iter().find_map(|child| {
                    let version = SoapVersion::from_binding_namespace(child.namespace.as_deref())?;
                    (child.name == "address")
                        .then(|| child.attribute("location"))
                        .flatten()
                        .map(|location| (version, location.to_string()))
                }) else {
                    continue;
                };

                let binding = port.attribute("binding").unwrap_or_default();
                let binding_name = binding.rsplit(':').next().unwrap_or(binding);

                ports.push(PortInfo {
                    name: port.attribute("name").unwrap_or_default().to_string(),
                    binding: binding_name.to_string(),
                    soap_version,
                    location,
                    operations: bindings.get(binding_name).cloned().unwrap_or_default(),
                });
            }

            services.push(ServiceInfo {
                name: service.attribute("name").unwrap_or_default().to_string(),
                ports,
            });
        }

        Ok(Self {
            target_namespace,
            services,
        })
    }

    /// Resolves relative port addresses against the URL the WSDL was fetched from.
    pub fn resolve_locations(&mut self, base: &Url) -> Result<()> {
        for port in self.services.iter_mut().flat_map(|service| service.ports.iter_mut()) {
            port.location = base.join(&port.location)?.to_string();
        }
        Ok(())
    }

    pub fn service(&self, name: &str) -> Option<&ServiceInfo> {
        self.services.iter().find(|service| service.name == name)
    }

    pub fn port(&self, service: &str, port: &str) -> Option<&PortInfo> {
        self.service(service)?.ports.iter().find(|p| p.name == port)
    }
}

impl PortInfo {
    pub fn operation(&self, name: &str) -> Option<&OperationInfo> {
        self.operations.iter().find(|operation| operation.name == name)
    }

    pub fn operation_names(&self) -> Vec<&str> {
        self.operations.iter().map(|operation| operation.name.as_str()).collect()
    }
}
