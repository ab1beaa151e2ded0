#![allow(dead_code)]

use dotfit_orders::{ClientConfig, CredentialsInput, DiagnosticSink, DotFitClient};
use httpmock::prelude::*;
use httpmock::Mock;
use std::sync::{Arc, Mutex};

pub const SERVICE_PATH: &str = "/webservices/OrdersService.asmx";

pub fn credentials() -> CredentialsInput {
    CredentialsInput::new("CLUB1", "secret", "9001")
}

/// 精簡版 OrdersService WSDL，只保留 binding 與 service
pub fn wsdl(location: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<wsdl:definitions xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
                  xmlns:soap12="http://schemas.xmlsoap.org/wsdl/soap12/"
                  xmlns:tns="http://services.dotfit.com/"
                  xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/"
                  targetNamespace="http://services.dotfit.com/">
  <wsdl:binding name="OrdersServiceSoap" type="tns:OrdersServiceSoap">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http" />
    <wsdl:operation name="GetInventory">
      <soap:operation soapAction="http://services.dotfit.com/GetInventory" style="document" />
    </wsdl:operation>
  </wsdl:binding>
  <wsdl:binding name="OrdersServiceSoap12" type="tns:OrdersServiceSoap">
    <soap12:binding transport="http://schemas.xmlsoap.org/soap/http" />
    <wsdl:operation name="PlaceWholesaleOrder">
      <soap12:operation soapAction="http://services.dotfit.com/PlaceWholesaleOrder" style="document" />
    </wsdl:operation>
    <wsdl:operation name="GetShipmentInfoByDate">
      <soap12:operation soapAction="http://services.dotfit.com/GetShipmentInfoByDate" style="document" />
    </wsdl:operation>
    <wsdl:operation name="GetShipmentInfoByID">
      <soap12:operation soapAction="http://services.dotfit.com/GetShipmentInfoByID" style="document" />
    </wsdl:operation>
    <wsdl:operation name="GetInventory">
      <soap12:operation soapAction="http://services.dotfit.com/GetInventory" style="document" />
    </wsdl:operation>
  </wsdl:binding>
  <wsdl:service name="OrdersService">
    <wsdl:port name="OrdersServiceSoap" binding="tns:OrdersServiceSoap">
      <soap:address location="{location}" />
    </wsdl:port>
    <wsdl:port name="OrdersServiceSoap12" binding="tns:OrdersServiceSoap12">
      <soap12:address location="{location}" />
    </wsdl:port>
  </wsdl:service>
</wsdl:definitions>"#
    )
}

pub fn soap_envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://www.w3.org/2003/05/soap-envelope"
               xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance"
               xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <soap:Body>{body}</soap:Body>
</soap:Envelope>"#
    )
}

pub fn soap_fault(reason: &str) -> String {
    soap_envelope(&format!(
        r#"<soap:Fault>
      <soap:Code><soap:Value>soap:Receiver</soap:Value></soap:Code>
      <soap:Reason><soap:Text xml:lang="en">{reason}</soap:Text></soap:Reason>
    </soap:Fault>"#
    ))
}

pub fn shipped_order_xml(order_id: i64, purchase_order_num: &str) -> String {
    format!(
        r#"<ShippedOrder>
          <OrderID>{order_id}</OrderID>
          <PurchaseOrderNum>{purchase_order_num}</PurchaseOrderNum>
          <DatePlaced>2024-03-01T10:00:00</DatePlaced>
          <DateShipped>2024-03-02T09:00:00</DateShipped>
          <TrackingNumbers><string>1Z999AA10123456784</string></TrackingNumbers>
          <TrackingUrls><string>https://www.ups.com/track?tracknum=1Z999AA10123456784</string></TrackingUrls>
        </ShippedOrder>"#
    )
}

pub fn wsdl_url(server: &MockServer) -> String {
    format!("{}?WSDL", server.url(SERVICE_PATH))
}

pub fn mock_wsdl(server: &MockServer) -> Mock<'_> {
    let body = wsdl(&server.url(SERVICE_PATH));
    server.mock(|when, then| {
        when.method(GET).path(SERVICE_PATH);
        then.status(200)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(body);
    })
}

/// Mocks one SOAP 1.2 operation; the request must carry the club auth header.
pub fn mock_operation<'a>(server: &'a MockServer, operation: &str, response: String) -> Mock<'a> {
    mock_operation_with_status(server, operation, 200, response)
}

pub fn mock_operation_with_status<'a>(
    server: &'a MockServer,
    operation: &str,
    status: u16,
    response: String,
) -> Mock<'a> {
    let action = format!(
        "application/soap+xml; charset=utf-8; action=\"http://services.dotfit.com/{}\"",
        operation
    );
    let element = format!("<{} xmlns=\"http://services.dotfit.com/\"", operation);
    server.mock(|when, then| {
        when.method(POST)
            .path(SERVICE_PATH)
            .header("content-type", action)
            .body_contains(element)
            .body_contains("<ClubAuthHeader xmlns=\"http://services.dotfit.com/\"><ClubID>CLUB1</ClubID><ClubPassword>secret</ClubPassword></ClubAuthHeader>");
        then.status(status)
            .header("Content-Type", "application/soap+xml; charset=utf-8")
            .body(response);
    })
}

pub fn config_for(server: &MockServer, debug: bool) -> ClientConfig {
    ClientConfig::new(credentials(), Some("dev"), debug)
        .unwrap()
        .with_endpoint(&wsdl_url(server))
        .unwrap()
}

pub fn client_for(server: &MockServer) -> DotFitClient {
    DotFitClient::new(config_for(server, false)).unwrap()
}

#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<(Vec<String>, String)>>,
}

impl RecordingSink {
    pub fn entries(&self) -> Vec<(Vec<String>, String)> {
        self.entries.lock().unwrap().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries().into_iter().map(|(_, message)| message).collect()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, tags: &[&str], message: &str) {
        self.entries.lock().unwrap().push((
            tags.iter().map(|tag| tag.to_string()).collect(),
            message.to_string(),
        ));
    }
}

pub fn client_with_sink(server: &MockServer, debug: bool) -> (DotFitClient, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let client = DotFitClient::with_sink(config_for(server, debug), sink.clone()).unwrap();
    (client, sink)
}

pub fn order_payload(purchase_order_num: &str) -> serde_json::Value {
    serde_json::json!({
        "shippingInfo": {
            "FirstName": "Diane",
            "LastName": "Lowe",
            "Address1": "4155 College Street",
            "Zipcode": "30342",
            "City": "Atlanta",
            "State": "GA",
            "Country": "USA",
            "Phone": "555-555-5555",
            "Email": "dianelowe@example.com"
        },
        "shippingMethod": "UPSGround",
        "orderLines": [{ "OrderLine": { "ItemNumber": "DF-100", "Quantity": 1 } }],
        "orderComments": "TEST ORDER",
        "purchaseOrderNum": purchase_order_num
    })
}
