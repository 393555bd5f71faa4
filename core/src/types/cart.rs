use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartParams {
    pub sku_id: String,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCartResult {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Result of cart mutations that only report success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartAck {
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemSpec {
    pub name: String,
    pub value_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub picture: String,
    pub price: String,
    pub now_price: String,
    pub now_original_price: String,
    pub count: u32,
    pub sku_id: String,
    pub attrs_text: String,
    pub specs: Vec<CartItemSpec>,
    pub selected: bool,
    pub stock: u32,
    pub is_collect: bool,
    #[serde(default)]
    pub discount: Option<f64>,
    pub is_effective: bool,
    pub post_fee: f64,
}

pub type CartResult = Vec<CartItem>;
