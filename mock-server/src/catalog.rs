//! Static catalog and the public (no login) endpoints.

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Response,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{fail, ok};

pub struct CatalogSku {
    pub sku_id: &'static str,
    pub goods_id: &'static str,
    pub name: &'static str,
    pub picture: &'static str,
    pub price: f64,
    pub old_price: f64,
    pub spec_name: &'static str,
    pub spec_value: &'static str,
    pub stock: u32,
}

pub const SKUS: &[CatalogSku] = &[
    CatalogSku {
        sku_id: "300001",
        goods_id: "1369155",
        name: "牛皮手提包",
        picture: "https://img.mall.test/goods/1369155-black.jpg",
        price: 399.0,
        old_price: 599.0,
        spec_name: "颜色",
        spec_value: "黑色",
        stock: 12,
    },
    CatalogSku {
        sku_id: "300002",
        goods_id: "1369155",
        name: "牛皮手提包",
        picture: "https://img.mall.test/goods/1369155-brown.jpg",
        price: 399.0,
        old_price: 599.0,
        spec_name: "颜色",
        spec_value: "棕色",
        stock: 0,
    },
    CatalogSku {
        sku_id: "300101",
        goods_id: "1380032",
        name: "纯棉毛巾",
        picture: "https://img.mall.test/goods/1380032.jpg",
        price: 29.9,
        old_price: 39.0,
        spec_name: "规格",
        spec_value: "3条装",
        stock: 200,
    },
    CatalogSku {
        sku_id: "300201",
        goods_id: "1435025",
        name: "不锈钢保温杯",
        picture: "https://img.mall.test/goods/1435025.jpg",
        price: 89.0,
        old_price: 129.0,
        spec_name: "容量",
        spec_value: "500ml",
        stock: 35,
    },
];

const GUESS_TOTAL: u32 = 25;
const HOT_KINDS: &[(&str, &str)] = &[
    ("preference", "特惠推荐"),
    ("inVogue", "爆款推荐"),
    ("oneStop", "一站买全"),
    ("new", "新鲜好物"),
];

pub fn find_sku(sku_id: &str) -> Option<&'static CatalogSku> {
    SKUS.iter().find(|sku| sku.sku_id == sku_id)
}

pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

impl CatalogSku {
    pub fn attrs_text(&self) -> String {
        format!("{}:{}", self.spec_name, self.spec_value)
    }
}

fn goods_card(sku: &CatalogSku) -> Value {
    json!({
        "id": sku.goods_id,
        "name": sku.name,
        "desc": format!("{} 精选好物", sku.name),
        "price": money(sku.price),
        "picture": sku.picture,
        "discount": null,
        "orderNum": 100,
    })
}

/// First SKU of each goods, in catalog order.
fn goods_heads() -> Vec<&'static CatalogSku> {
    let mut heads: Vec<&CatalogSku> = Vec::new();
    for sku in SKUS {
        if !heads.iter().any(|head| head.goods_id == sku.goods_id) {
            heads.push(sku);
        }
    }
    heads
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerQuery {
    distribution_site: Option<u32>,
}

pub async fn home_banner(Query(query): Query<BannerQuery>) -> Response {
    let site = query.distribution_site.unwrap_or(1);
    let banners: Vec<Value> = (1..=3)
        .map(|n| {
            json!({
                "id": format!("{site}{n}"),
                "imgUrl": format!("https://img.mall.test/banner/{site}-{n}.jpg"),
                "hrefUrl": format!("/pages/goods/goods?id={}", SKUS[0].goods_id),
                "type": 1,
            })
        })
        .collect();
    ok(banners)
}

pub async fn home_category() -> Response {
    let names = ["居家", "美食", "服饰", "母婴"];
    let items: Vec<Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| {
            json!({
                "id": (1_005_000 + i).to_string(),
                "name": name,
                "icon": format!("https://img.mall.test/icon/{i}.png"),
            })
        })
        .collect();
    ok(items)
}

pub async fn home_hot() -> Response {
    let items: Vec<Value> = HOT_KINDS
        .iter()
        .enumerate()
        .map(|(i, (kind, title))| {
            json!({
                "id": (i + 1).to_string(),
                "title": title,
                "alt": format!("{title}专区"),
                "pictures": [format!("https://img.mall.test/hot/{kind}.jpg")],
                "target": format!("/hot/{kind}"),
                "type": (i + 1).to_string(),
            })
        })
        .collect();
    ok(items)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery {
    page: Option<u32>,
    page_size: Option<u32>,
}

fn paged(total: u32, page: u32, page_size: u32, item: impl Fn(u32) -> Value) -> Value {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let pages = total.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);
    let end = (start.saturating_add(page_size)).min(total);
    let items: Vec<Value> = (start..end).map(item).collect();
    json!({
        "counts": total,
        "pageSize": page_size,
        "pages": pages,
        "page": page,
        "items": items,
    })
}

pub async fn guess_like(Query(query): Query<PageQuery>) -> Response {
    let page = paged(
        GUESS_TOTAL,
        query.page.unwrap_or(1),
        query.page_size.unwrap_or(10),
        |n| {
            let sku = &SKUS[n as usize % SKUS.len()];
            json!({
                "id": format!("{}-{n}", sku.goods_id),
                "name": sku.name,
                "desc": "猜你喜欢",
                "price": sku.price,
                "picture": sku.picture,
                "discount": 1.0,
                "orderNum": n,
            })
        },
    );
    ok(page)
}

pub async fn category_top() -> Response {
    let cards: Vec<Value> = goods_heads().into_iter().map(goods_card).collect();
    let tops: Vec<Value> = [("1005000", "居家"), ("1010000", "服饰")]
        .iter()
        .map(|(id, name)| {
            json!({
                "id": id,
                "name": name,
                "picture": format!("https://img.mall.test/category/{id}.png"),
                "imageBanners": [format!("https://img.mall.test/category/{id}-banner.jpg")],
                "children": [{
                    "id": format!("{id}01"),
                    "name": format!("{name}精选"),
                    "picture": format!("https://img.mall.test/category/{id}01.png"),
                    "parentId": null,
                    "parentName": null,
                    "goods": cards,
                    "categories": null,
                    "brands": null,
                    "saleProperties": null,
                }],
            })
        })
        .collect();
    ok(tops)
}

#[derive(Deserialize)]
pub struct GoodsQuery {
    id: Option<String>,
}

pub async fn goods_detail(Query(query): Query<GoodsQuery>) -> Response {
    let Some(id) = query.id.filter(|id| !id.is_empty()) else {
        return fail(StatusCode::BAD_REQUEST, "参数错误");
    };
    let skus: Vec<&CatalogSku> = SKUS.iter().filter(|sku| sku.goods_id == id).collect();
    let Some(head) = skus.first() else {
        return fail(StatusCode::BAD_REQUEST, "商品不存在");
    };
    let spec_values: Vec<Value> = skus
        .iter()
        .map(|sku| {
            json!({
                "name": sku.spec_value,
                "picture": sku.picture,
                "available": sku.stock > 0,
                "desc": sku.spec_value,
            })
        })
        .collect();
    let sku_values: Vec<Value> = skus
        .iter()
        .map(|sku| {
            json!({
                "id": sku.sku_id,
                "skuCode": sku.sku_id,
                "price": money(sku.price),
                "oldPrice": money(sku.old_price),
                "inventory": sku.stock,
                "picture": sku.picture,
                "specs": [{ "name": sku.spec_name, "valueName": sku.spec_value }],
            })
        })
        .collect();
    let similar: Vec<Value> = goods_heads()
        .into_iter()
        .filter(|sku| sku.goods_id != id)
        .map(goods_card)
        .collect();
    ok(json!({
        "id": head.goods_id,
        "name": head.name,
        "spuCode": format!("SPU{}", head.goods_id),
        "desc": format!("{} 精选好物", head.name),
        "price": money(head.price),
        "oldPrice": money(head.old_price),
        "discount": (head.price / head.old_price * 100.0).round() / 100.0,
        "inventory": skus.iter().map(|sku| sku.stock).sum::<u32>(),
        "brand": {
            "id": "9001",
            "name": "小兔鲜",
            "nameEn": "xiaotuxian",
            "picture": "https://img.mall.test/brand.png",
            "logo": "https://img.mall.test/brand-logo.png",
            "type": null,
            "desc": null,
            "place": null,
        },
        "salesCount": 1024,
        "commentCount": 64,
        "collectCount": 128,
        "mainVideos": [],
        "videoScale": 1,
        "mainPictures": skus.iter().map(|sku| sku.picture).collect::<Vec<_>>(),
        "specs": [{ "id": "1", "name": head.spec_name, "values": spec_values }],
        "skus": sku_values,
        "categories": [{
            "id": "1005001",
            "name": "居家精选",
            "layer": 2,
            "parent": { "id": "1005000", "name": "居家", "layer": 1, "parent": null },
        }],
        "details": {
            "properties": [{ "name": "产地", "value": "中国" }],
            "pictures": [format!("https://img.mall.test/goods/{}-detail.jpg", head.goods_id)],
        },
        "isPreSale": false,
        "isCollect": null,
        "recommends": null,
        "userAddresses": null,
        "evaluationInfo": null,
        "similarProducts": similar,
        "hotByDay": [],
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotQuery {
    page: Option<u32>,
    page_size: Option<u32>,
    sub_type: Option<String>,
}

pub async fn hot(Path(kind): Path<String>, Query(query): Query<HotQuery>) -> Response {
    let Some((index, (_, title))) = HOT_KINDS.iter().enumerate().find(|(_, (k, _))| *k == kind) else {
        return fail(StatusCode::NOT_FOUND, "资源不存在");
    };
    let page = query.page.unwrap_or(1);
    let page_size = query.page_size.unwrap_or(10);
    let sub_types: Vec<Value> = (1..=2)
        .map(|n| {
            let id = format!("{}{n}", index + 1);
            let selected = query.sub_type.as_deref().is_none_or(|sub| sub == id);
            let goods_page = if selected { page } else { 1 };
            json!({
                "id": id,
                "title": format!("{title}{n}"),
                "goodsItems": paged(12, goods_page, page_size, |i| {
                    let sku = &SKUS[i as usize % SKUS.len()];
                    json!({
                        "id": format!("{}-{i}", sku.goods_id),
                        "name": sku.name,
                        "desc": "热门",
                        "picture": sku.picture,
                        "price": sku.price,
                    })
                }),
            })
        })
        .collect();
    ok(json!({
        "id": (index + 1).to_string(),
        "title": title,
        "bannerPicture": format!("https://img.mall.test/hot/{kind}-banner.jpg"),
        "subTypes": sub_types,
    }))
}
