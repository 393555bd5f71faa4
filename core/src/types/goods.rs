use serde::{Deserialize, Serialize};

/// Goods detail page payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsResult {
    pub id: String,
    pub name: String,
    pub spu_code: String,
    pub desc: String,
    pub price: String,
    pub old_price: String,
    pub discount: f64,
    pub inventory: u32,
    pub brand: Brand,
    pub sales_count: u32,
    pub comment_count: u32,
    pub collect_count: u32,
    pub main_videos: Vec<String>,
    pub video_scale: f64,
    pub main_pictures: Vec<String>,
    pub specs: Vec<GoodsSpec>,
    pub skus: Vec<Sku>,
    pub categories: Vec<GoodsCategory>,
    pub details: Details,
    pub is_pre_sale: bool,
    #[serde(default)]
    pub is_collect: Option<bool>,
    #[serde(default)]
    pub similar_products: Vec<GoodsItem>,
    #[serde(default)]
    pub hot_by_day: Vec<GoodsItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: String,
    pub name: String,
    pub name_en: String,
    pub picture: String,
    pub logo: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsSpec {
    pub id: String,
    pub name: String,
    pub values: Vec<SpecValue>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecValue {
    pub name: String,
    pub picture: String,
    pub available: bool,
    pub desc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub id: String,
    pub sku_code: String,
    pub price: String,
    pub old_price: String,
    pub inventory: u32,
    pub picture: String,
    pub specs: Vec<SkuSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkuSpec {
    pub name: String,
    pub value_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsCategory {
    pub id: String,
    pub name: String,
    pub layer: u32,
    #[serde(default)]
    pub parent: Option<Box<GoodsCategory>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Details {
    pub properties: Vec<Property>,
    pub pictures: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: String,
}

/// Compact goods card used in recommendation lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoodsItem {
    pub id: String,
    pub picture: String,
    pub name: String,
    pub price: String,
    pub desc: String,
    pub order_num: u32,
}
