use crate::soap::wsdl::SoapVersion;
use crate::soap::xml::XmlElement;
use crate::utils::error::{DotFitError, Result};

const MAX_ERROR_BODY: usize = 512;

pub fn build_envelope(
    version: SoapVersion,
    headers: &[XmlElement],
    body: XmlElement,
) -> Result<String> {
    let mut envelope = XmlElement::new("soap:Envelope")
        .with_attribute("xmlns:soap", version.envelope_namespace())
        .with_attribute("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance")
        .with_attribute("xmlns:xsd", "http://www.w3.org/2001/XMLSchema");

    if !headers.is_empty() {
        envelope = envelope
            .with_child(XmlElement::new("soap:Header").with_children(headers.iter().cloned()));
    }

    envelope
        .with_child(XmlElement::new("soap:Body").with_child(body))
        .to_document_string()
}

/// 解析回應信封，回傳 Body 內的第一個元素（例如 `GetInventoryResponse`）
pub fn parse_response(status: u16, text: &str) -> Result<XmlElement> {
    let success = (200..300).contains(&status);

    let envelope = match XmlElement::parse_document(text) {
        Ok(envelope) => envelope,
        Err(_) if !success => return Err(http_status_error(status, text)),
        Err(e) => return Err(e),
    };

    if envelope.name != "Envelope" {
        if !success {
            return Err(http_status_error(status, text));
        }
        return Err(DotFitError::unexpected(format!(
            "expected SOAP Envelope, found <{}>",
            envelope.name
        )));
    }

    let body = envelope
        .child("Body")
        .ok_or_else(|| DotFitError::unexpected("SOAP envelope has no Body"))?;

    if let Some(fault) = body.child("Fault") {
        return Err(fault_error(fault));
    }

    if !success {
        return Err(http_status_error(status, text));
    }

    body.first_child()
        .cloned()
        .ok_or_else(|| DotFitError::unexpected("SOAP Body is empty"))
}

fn fault_error(fault: &XmlElement) -> DotFitError {
    // SOAP 1.2: Code/Value + Reason/Text；SOAP 1.1: faultcode + faultstring
    let code = fault
        .child("Code")
        .and_then(|code| code.child_text("Value"))
        .or_else(|| fault.child_text("faultcode"))
        .unwrap_or("Unknown");
    let reason = fault
        .child("Reason")
        .and_then(|reason| reason.child_text("Text"))
        .or_else(|| fault.child_text("faultstring"))
        .unwrap_or("no reason given");

    DotFitError::SoapFault {
        code: code.to_string(),
        reason: reason.to_string(),
    }
}

fn http_status_error(status: u16, text: &str) -> DotFitError {
    DotFitError::HttpStatus {
        status,
        body: text.chars().take(MAX_ERROR_BODY).collect(),
    }
}
