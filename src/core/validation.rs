use crate::config::{Credentials, CredentialsInput};
use crate::domain::model::{
    Address, OrderLineItem, OrderRequest, ShippingAddress, ShippingMethod, ValidatedOrder,
};
use crate::utils::error::{DotFitError, Result};
use crate::utils::validation::{
    require_string, validate_numeric_string, validate_positive_number, FieldResult,
};

/// Checks `clubId`, `clubPassword`, `wholesaleId` in that order.
pub fn validate_credentials(input: &CredentialsInput) -> Result<Credentials> {
    let check = || -> FieldResult<Credentials> {
        let club_id = require_string("clubId", &input.club_id)?;
        let club_password = require_string("clubPassword", &input.club_password)?;
        let wholesale_id = require_string("wholesaleId", &input.wholesale_id)?;
        Ok(Credentials::new(
            club_id.to_string(),
            club_password.to_string(),
            wholesale_id.to_string(),
        ))
    };

    check().map_err(|message| {
        tracing::error!("Invalid credentials: {}", message);
        DotFitError::config(message)
    })
}

/// 驗證訂單並套用預設值；遇到第一個錯誤即回傳
pub fn validate_order(order: &OrderRequest, default_wholesale_id: &str) -> Result<ValidatedOrder> {
    check_order(order, default_wholesale_id).map_err(DotFitError::validation)
}

fn check_order(order: &OrderRequest, default_wholesale_id: &str) -> FieldResult<ValidatedOrder> {
    let wholesale_user_id = match order.wholesale_user_id.as_deref() {
        Some(id) => {
            validate_numeric_string("wholesaleUserID", id)?;
            id.trim().to_string()
        }
        None => default_wholesale_id.to_string(),
    };

    let address = order
        .shipping_info
        .as_ref()
        .ok_or_else(|| "\"shippingInfo\" is required".to_string())?;
    let shipping_info = check_address(address)?;

    let shipping_method = ShippingMethod::parse(require_string(
        "shippingMethod",
        &order.shipping_method,
    )?);
    if !shipping_method.is_known() {
        // 僅警告：未列出的運送方式仍交給遠端判斷
        tracing::warn!(
            "Unlisted shipping method {:?}, expected one of {}",
            shipping_method.as_str(),
            ShippingMethod::KNOWN.join(", ")
        );
    }

    let lines = order
        .order_lines
        .as_ref()
        .ok_or_else(|| "\"orderLines\" is required".to_string())?;
    if lines.is_empty() {
        return Err("\"orderLines\" must contain at least 1 item".to_string());
    }

    let mut order_lines = Vec::with_capacity(lines.len());
    for (index, entry) in lines.iter().enumerate() {
        let path = format!("orderLines[{}].OrderLine", index);
        let line = entry
            .order_line
            .as_ref()
            .ok_or_else(|| format!("\"{}\" is required", path))?;

        let item_number = require_string(&format!("{}.ItemNumber", path), &line.item_number)?;

        let quantity_field = format!("{}.Quantity", path);
        let quantity = line
            .quantity
            .ok_or_else(|| format!("\"{}\" is required", quantity_field))?;
        validate_positive_number(&quantity_field, quantity)?;
        let quantity = u32::try_from(quantity)
            .map_err(|_| format!("\"{}\" is too large", quantity_field))?;

        order_lines.push(OrderLineItem {
            item_number: item_number.to_string(),
            quantity,
        });
    }

    let purchase_order_num = require_string("purchaseOrderNum", &order.purchase_order_num)?;

    Ok(ValidatedOrder {
        wholesale_user_id,
        shipping_info,
        shipping_method,
        order_lines,
        order_comments: order.order_comments.clone(),
        purchase_order_num: purchase_order_num.to_string(),
    })
}

fn check_address(address: &Address) -> FieldResult<ShippingAddress> {
    let field = |name: &str, value: &Option<String>| -> FieldResult<String> {
        require_string(&format!("shippingInfo.{}", name), value).map(str::to_string)
    };

    Ok(ShippingAddress {
        first_name: field("FirstName", &address.first_name)?,
        last_name: field("LastName", &address.last_name)?,
        address1: field("Address1", &address.address1)?,
        address2: address.address2.clone().unwrap_or_default(),
        zipcode: field("Zipcode", &address.zipcode)?,
        city: field("City", &address.city)?,
        state: field("State", &address.state)?,
        country: field("Country", &address.country)?,
        phone: field("Phone", &address.phone)?,
        email: field("Email", &address.email)?,
    })
}

impl OrderRequest {
    /// Builds a request from a vendor-shaped JSON payload. Unknown or
    /// misnamed keys are rejected.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| DotFitError::validation(e.to_string()))
    }
}
