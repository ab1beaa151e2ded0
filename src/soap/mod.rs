// Minimal SOAP transport: WSDL discovery, envelopes, and one session type.

pub mod client;
pub mod envelope;
pub mod wsdl;
pub mod xml;

pub use client::SoapClient;
pub use wsdl::{ServiceDescription, SoapVersion};
pub use xml::XmlElement;
