use serde::{Deserialize, Serialize};

use super::PageResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotGoodsItem {
    pub desc: String,
    pub id: String,
    pub name: String,
    pub picture: String,
    pub price: f64,
}

pub type HotGoodsList = PageResult<HotGoodsItem>;

/// One tab of a recommendation page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotSubType {
    pub id: String,
    pub title: String,
    pub goods_items: HotGoodsList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotResult {
    pub title: String,
    pub id: String,
    pub banner_picture: String,
    pub sub_types: Vec<HotSubType>,
}

/// Paging plus the tab to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HotParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub sub_type: Option<String>,
}
