use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodItem {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub price: String,
    pub picture: String,
    #[serde(default)]
    pub discount: Option<serde_json::Value>,
    pub order_num: u32,
}

/// Second-level category with its goods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChild {
    pub id: String,
    pub name: String,
    pub picture: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    pub goods: Vec<GoodItem>,
    #[serde(default)]
    pub categories: Option<serde_json::Value>,
    #[serde(default)]
    pub brands: Option<serde_json::Value>,
    #[serde(default)]
    pub sale_properties: Option<serde_json::Value>,
}

/// Top-level category with banners and children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTopItem {
    pub id: String,
    pub name: String,
    pub picture: String,
    pub image_banners: Vec<String>,
    pub children: Vec<CategoryChild>,
}
