use serde::{Deserialize, Serialize};

use super::PageResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerItem {
    pub href_url: String,
    pub id: String,
    pub img_url: String,
    /// Jump type.
    #[serde(rename = "type")]
    pub kind: u32,
}

/// Front-page category shortcut.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub icon: String,
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotItem {
    pub alt: String,
    pub id: String,
    pub pictures: Vec<String>,
    /// Path of the recommendation list, e.g. `/hot/preference`.
    pub target: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuessItem {
    pub id: String,
    pub name: String,
    pub desc: String,
    pub price: f64,
    pub picture: String,
    #[serde(default)]
    pub discount: Option<f64>,
    pub order_num: u32,
}

pub type GuessResult = PageResult<GuessItem>;
