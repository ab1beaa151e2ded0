use crate::domain::model::{InventoryItem, ShippedOrder, ValidatedOrder};
use crate::soap::XmlElement;
use crate::utils::error::{DotFitError, Result};
use chrono::{DateTime, SecondsFormat, Utc};

/// ISO-8601 in UTC with millisecond precision, e.g. `2024-03-01T00:00:00.000Z`.
pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The `*Result` wrapper inside a response element, ignoring `xsi:nil` results.
pub fn result_element<'a>(response: &'a XmlElement, name: &str) -> Option<&'a XmlElement> {
    response.child(name).filter(|result| !result.is_nil())
}

pub fn inventory_items(result: &XmlElement) -> Result<Vec<InventoryItem>> {
    result
        .children_named("InventoryItem")
        .map(|item| -> Result<InventoryItem> {
            Ok(InventoryItem {
                part_number: required_text(item, "PartNumber")?.to_string(),
                name: item.child_text("Name").unwrap_or_default().to_string(),
                inventory_count: parse_number(item, "InventoryCount")?,
                upc: item.child_text("UPC").map(str::to_string),
            })
        })
        .collect()
}

/// 缺少結果、空的包裝元素或空集合都視為「沒有出貨」
pub fn shipped_orders(result: Option<&XmlElement>) -> Result<Vec<ShippedOrder>> {
    let Some(result) = result else {
        return Ok(Vec::new());
    };

    result
        .children_named("ShippedOrder")
        .map(|order| -> Result<ShippedOrder> {
            Ok(ShippedOrder {
                order_id: parse_number(order, "OrderID")?,
                purchase_order_num: order
                    .child_text("PurchaseOrderNum")
                    .unwrap_or_default()
                    .to_string(),
                date_placed: order.child_text("DatePlaced").unwrap_or_default().to_string(),
                date_shipped: order
                    .child("DateShipped")
                    .filter(|date| !date.is_nil())
                    .and_then(XmlElement::text)
                    .map(str::to_string),
                tracking_numbers: string_list(order.child("TrackingNumbers")),
                tracking_urls: string_list(order.child("TrackingUrls")),
            })
        })
        .collect()
}

pub fn order_id(response: &XmlElement) -> Result<i64> {
    let result = result_element(response, "PlaceWholesaleOrderResult")
        .ok_or_else(|| DotFitError::unexpected("response has no PlaceWholesaleOrderResult"))?;
    let text = result.text().unwrap_or_default();
    text.parse().map_err(|_| {
        DotFitError::unexpected(format!(
            "PlaceWholesaleOrderResult is not a numeric order id: {:?}",
            text
        ))
    })
}

/// Request parameters for `PlaceWholesaleOrder`, in schema order.
pub fn order_params(order: &ValidatedOrder) -> Vec<XmlElement> {
    let address = &order.shipping_info;
    let shipping_info = XmlElement::new("shippingInfo").with_children([
        XmlElement::text_element("FirstName", address.first_name.as_str()),
        XmlElement::text_element("LastName", address.last_name.as_str()),
        XmlElement::text_element("Address1", address.address1.as_str()),
        XmlElement::text_element("Address2", address.address2.as_str()),
        XmlElement::text_element("Zipcode", address.zipcode.as_str()),
        XmlElement::text_element("City", address.city.as_str()),
        XmlElement::text_element("State", address.state.as_str()),
        XmlElement::text_element("Country", address.country.as_str()),
        XmlElement::text_element("Phone", address.phone.as_str()),
        XmlElement::text_element("Email", address.email.as_str()),
    ]);

    let order_lines = XmlElement::new("orderLines").with_children(order.order_lines.iter().map(|line| {
        XmlElement::new("OrderLine")
            .with_child(XmlElement::text_element("ItemNumber", line.item_number.as_str()))
            .with_child(XmlElement::text_element("Quantity", line.quantity.to_string()))
    }));

    let mut params = vec![
        XmlElement::text_element("wholesaleUserID", order.wholesale_user_id.as_str()),
        shipping_info,
        XmlElement::text_element("shippingMethod", order.shipping_method.as_str()),
        order_lines,
    ];
    if let Some(comments) = &order.order_comments {
        params.push(XmlElement::text_element("orderComments", comments.as_str()));
    }
    params.push(XmlElement::text_element(
        "purchaseOrderNum",
        order.purchase_order_num.as_str(),
    ));
    params
}

fn required_text<'a>(element: &'a XmlElement, name: &str) -> Result<&'a str> {
    element.child_text(name).ok_or_else(|| {
        DotFitError::unexpected(format!("<{}> is missing <{}>", element.name, name))
    })
}

fn parse_number(element: &XmlElement, name: &str) -> Result<i64> {
    let text = required_text(element, name)?;
    text.trim().parse().map_err(|_| {
        DotFitError::unexpected(format!(
            "<{}> in <{}> is not a number: {:?}",
            name, element.name, text
        ))
    })
}

/// `ArrayOfString` 形式（`<string>` 子元素），或單一文字值
fn string_list(element: Option<&XmlElement>) -> Vec<String> {
    let Some(element) = element else {
        return Vec::new();
    };

    if element.children.is_empty() {
        return element.text().map(|text| vec![text.to_string()]).unwrap_or_default();
    }

    element
        .children
        .iter()
        .filter_map(XmlElement::text)
        .map(str::to_string)
        .collect()
}
