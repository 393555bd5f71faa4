use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAddress {
    pub id: String,
    pub province_code: String,
    pub city_code: String,
    pub county_code: String,
    pub address: String,
    pub is_default: u8,
    pub receiver: String,
    pub contact: String,
    pub full_location: String,
    #[serde(default)]
    pub postal_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderGoods {
    pub id: String,
    pub name: String,
    pub picture: String,
    pub count: u32,
    pub sku_id: String,
    pub attrs_text: String,
    pub price: String,
    pub pay_price: String,
    pub total_price: String,
    pub total_pay_price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub goods_count: u32,
    pub total_price: String,
    pub total_pay_price: String,
    pub post_fee: String,
    pub discount_price: String,
}

/// Checkout preview: addresses, goods, and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPreResult {
    pub user_addresses: Vec<OrderAddress>,
    pub goods: Vec<OrderGoods>,
    pub summary: OrderSummary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub sku_id: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmitParams {
    pub goods: Vec<OrderLine>,
    pub address_id: String,
    pub delivery_time_type: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer_message: Option<String>,
    pub pay_type: u8,
    pub pay_channel: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSubmitResult {
    pub id: String,
}

/// "Buy now" checkout parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderNowParams {
    pub sku_id: String,
    pub count: u32,
    pub address_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailResult {
    pub id: String,
    pub order_no: String,
    pub order_state: u8,
    pub create_time: String,
    pub pay_type: u8,
    pub pay_channel: u8,
    #[serde(default)]
    pub pay_time: Option<String>,
    pub pay_money: String,
    pub total_money: String,
    pub post_fee: String,
    pub discount_money: String,
    #[serde(default)]
    pub buyer_message: Option<String>,
    pub delivery_time_type: u8,
    pub receiver_contact: String,
    pub receiver_mobile: String,
    pub receiver_address: String,
    pub skus: Vec<OrderDetailSku>,
    #[serde(default)]
    pub countdown: Option<i64>,
    #[serde(default)]
    pub company: Option<LogisticsCompany>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailSku {
    pub id: String,
    pub sku_id: String,
    pub name: String,
    pub image: String,
    pub attrs_text: String,
    pub quantity: u32,
    pub cur_price: String,
    pub real_pay: String,
    pub total_money: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogisticsCompany {
    pub name: String,
    pub number: String,
    #[serde(default)]
    pub picture: Option<String>,
}
