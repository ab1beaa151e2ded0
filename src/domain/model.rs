use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InventoryItem {
    pub part_number: String,
    pub name: String,
    pub inventory_count: i64,
    #[serde(rename = "UPC")]
    pub upc: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ShippedOrder {
    #[serde(rename = "OrderID")]
    pub order_id: i64,
    pub purchase_order_num: String,
    pub date_placed: String,
    pub date_shipped: Option<String>,
    pub tracking_numbers: Vec<String>,
    pub tracking_urls: Vec<String>,
}

/// 訂單輸入（未驗證）。欄位名稱與供應商 API 相同，方便直接由 JSON 轉入。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderRequest {
    #[serde(
        rename = "wholesaleUserID",
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub wholesale_user_id: Option<String>,
    #[serde(default)]
    pub shipping_info: Option<Address>,
    #[serde(default)]
    pub shipping_method: Option<String>,
    #[serde(default)]
    pub order_lines: Option<Vec<OrderLineEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_comments: Option<String>,
    #[serde(default)]
    pub purchase_order_num: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct Address {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrderLineEntry {
    #[serde(rename = "OrderLine", default)]
    pub order_line: Option<OrderLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct OrderLine {
    #[serde(default)]
    pub item_number: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
}

impl OrderLineEntry {
    pub fn new(item_number: impl Into<String>, quantity: i64) -> Self {
        Self {
            order_line: Some(OrderLine {
                item_number: Some(item_number.into()),
                quantity: Some(quantity),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShippingMethod {
    UpsGround,
    UpsNextDayAir,
    Ups3DaySelect,
    AtsGround,
    Other(String),
}

impl ShippingMethod {
    pub const KNOWN: [&'static str; 4] = ["UPSGround", "UPSNextDayAir", "UPS3DaySelect", "ATSGround"];

    pub fn parse(code: &str) -> Self {
        match code {
            "UPSGround" => Self::UpsGround,
            "UPSNextDayAir" => Self::UpsNextDayAir,
            "UPS3DaySelect" => Self::Ups3DaySelect,
            "ATSGround" => Self::AtsGround,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::UpsGround => "UPSGround",
            Self::UpsNextDayAir => "UPSNextDayAir",
            Self::Ups3DaySelect => "UPS3DaySelect",
            Self::AtsGround => "ATSGround",
            Self::Other(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ShippingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 通過驗證、已套用預設值的訂單
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedOrder {
    pub wholesale_user_id: String,
    pub shipping_info: ShippingAddress,
    pub shipping_method: ShippingMethod,
    pub order_lines: Vec<OrderLineItem>,
    pub order_comments: Option<String>,
    pub purchase_order_num: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address1: String,
    pub address2: String,
    pub zipcode: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub phone: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLineItem {
    pub item_number: String,
    pub quantity: u32,
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}
