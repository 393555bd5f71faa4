//! Cart and order endpoints.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::catalog::{find_sku, money, CatalogSku};
use crate::{fail, ok, with_member, Db, MemberData, MemberId};

const POST_FEE: f64 = 0.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub sku_id: String,
    pub count: u32,
    pub selected: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    pub id: String,
    pub lines: Vec<CartLine>,
    pub address_id: String,
    pub delivery_time_type: u8,
    pub buyer_message: Option<String>,
    pub pay_type: u8,
    pub pay_channel: u8,
}

fn cart_item(line: &CartLine, sku: &CatalogSku) -> Value {
    json!({
        "id": sku.goods_id,
        "name": sku.name,
        "picture": sku.picture,
        "price": money(sku.old_price),
        "nowPrice": money(sku.price),
        "nowOriginalPrice": money(sku.old_price),
        "count": line.count,
        "skuId": sku.sku_id,
        "attrsText": sku.attrs_text(),
        "specs": [{ "name": sku.spec_name, "valueName": sku.spec_value }],
        "selected": line.selected,
        "stock": sku.stock,
        "isCollect": false,
        "discount": null,
        "isEffective": true,
        "postFee": POST_FEE,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCart {
    pub sku_id: String,
    pub count: u32,
}

pub async fn add_to_cart(State(db): State<Db>, member: MemberId, Json(input): Json<AddToCart>) -> Response {
    let Some(sku) = find_sku(&input.sku_id) else {
        return fail(StatusCode::BAD_REQUEST, "商品不存在");
    };
    if input.count == 0 {
        return fail(StatusCode::BAD_REQUEST, "数量必须大于0");
    }
    let result = with_member(&db, &member, |data| {
        let in_cart = data
            .cart
            .iter()
            .find(|line| line.sku_id == sku.sku_id)
            .map_or(0, |line| line.count);
        if in_cart + input.count > sku.stock {
            return Err("库存不足");
        }
        match data.cart.iter_mut().find(|line| line.sku_id == sku.sku_id) {
            Some(line) => line.count += input.count,
            None => data.cart.insert(
                0,
                CartLine {
                    sku_id: sku.sku_id.to_string(),
                    count: input.count,
                    selected: true,
                },
            ),
        }
        Ok(())
    })
    .await;
    match result {
        Some(Ok(())) => ok(json!({ "success": true })),
        Some(Err(msg)) => fail(StatusCode::BAD_REQUEST, msg),
        None => fail(StatusCode::UNAUTHORIZED, "登录已失效"),
    }
}

pub async fn list_cart(State(db): State<Db>, member: MemberId) -> Response {
    let lines = with_member(&db, &member, |data| data.cart.clone()).await.unwrap_or_default();
    let items: Vec<Value> = lines
        .iter()
        .filter_map(|line| find_sku(&line.sku_id).map(|sku| cart_item(line, sku)))
        .collect();
    ok(items)
}

#[derive(Deserialize)]
pub struct DeleteCart {
    pub ids: Vec<String>,
}

pub async fn delete_cart(State(db): State<Db>, member: MemberId, Json(input): Json<DeleteCart>) -> Response {
    with_member(&db, &member, |data| {
        data.cart.retain(|line| !input.ids.contains(&line.sku_id));
    })
    .await;
    ok(json!({ "success": true }))
}

#[derive(Deserialize)]
pub struct UpdateCount {
    pub count: u32,
}

pub async fn update_cart_item(
    State(db): State<Db>,
    member: MemberId,
    Path(sku_id): Path<String>,
    Json(input): Json<UpdateCount>,
) -> Response {
    let stock = find_sku(&sku_id).map_or(0, |sku| sku.stock);
    if input.count == 0 || input.count > stock {
        return fail(StatusCode::BAD_REQUEST, "数量超出范围");
    }
    let updated = with_member(&db, &member, |data| {
        data.cart
            .iter_mut()
            .find(|line| line.sku_id == sku_id)
            .map(|line| line.count = input.count)
    })
    .await
    .flatten();
    match updated {
        Some(()) => ok(json!({ "success": true })),
        None => fail(StatusCode::NOT_FOUND, "购物车中没有该商品"),
    }
}

#[derive(Deserialize)]
pub struct Selected {
    pub selected: bool,
}

pub async fn select_all(State(db): State<Db>, member: MemberId, Json(input): Json<Selected>) -> Response {
    with_member(&db, &member, |data| {
        for line in &mut data.cart {
            line.selected = input.selected;
        }
    })
    .await;
    ok(json!({ "success": true }))
}

pub async fn select_item(
    State(db): State<Db>,
    member: MemberId,
    Path(sku_id): Path<String>,
    Json(input): Json<Selected>,
) -> Response {
    let updated = with_member(&db, &member, |data| {
        data.cart
            .iter_mut()
            .find(|line| line.sku_id == sku_id)
            .map(|line| line.selected = input.selected)
    })
    .await
    .flatten();
    match updated {
        Some(()) => ok(json!({ "success": true })),
        None => fail(StatusCode::NOT_FOUND, "购物车中没有该商品"),
    }
}

fn preview(data: &MemberData, lines: &[CartLine], address_id: Option<&str>) -> Value {
    let mut goods = Vec::new();
    let mut count = 0;
    let mut total = 0.0;
    for line in lines {
        let Some(sku) = find_sku(&line.sku_id) else {
            continue;
        };
        let line_total = sku.price * f64::from(line.count);
        count += line.count;
        total += line_total;
        goods.push(json!({
            "id": sku.goods_id,
            "name": sku.name,
            "picture": sku.picture,
            "count": line.count,
            "skuId": sku.sku_id,
            "attrsText": sku.attrs_text(),
            "price": money(sku.price),
            "payPrice": money(sku.price),
            "totalPrice": money(line_total),
            "totalPayPrice": money(line_total),
        }));
    }
    let addresses: Vec<Value> = data
        .addresses
        .iter()
        .map(|a| {
            let is_default = match address_id {
                Some(id) => u8::from(a.id == id),
                None => a.is_default,
            };
            json!({
                "id": a.id,
                "provinceCode": a.province_code,
                "cityCode": a.city_code,
                "countyCode": a.county_code,
                "address": a.address,
                "isDefault": is_default,
                "receiver": a.receiver,
                "contact": a.contact,
                "fullLocation": a.full_location,
                "postalCode": null,
            })
        })
        .collect();
    json!({
        "userAddresses": addresses,
        "goods": goods,
        "summary": {
            "goodsCount": count,
            "totalPrice": money(total),
            "totalPayPrice": money(total + POST_FEE),
            "postFee": money(POST_FEE),
            "discountPrice": money(0.0),
        },
    })
}

pub async fn order_pre(State(db): State<Db>, member: MemberId) -> Response {
    let result = with_member(&db, &member, |data| {
        let selected: Vec<CartLine> = data.cart.iter().filter(|line| line.selected).cloned().collect();
        preview(data, &selected, None)
    })
    .await;
    match result {
        Some(result) => ok(result),
        None => fail(StatusCode::UNAUTHORIZED, "登录已失效"),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NowQuery {
    pub sku_id: String,
    pub count: u32,
    pub address_id: Option<String>,
}

pub async fn order_pre_now(State(db): State<Db>, member: MemberId, Query(query): Query<NowQuery>) -> Response {
    if find_sku(&query.sku_id).is_none() {
        return fail(StatusCode::BAD_REQUEST, "商品不存在");
    }
    let line = CartLine {
        sku_id: query.sku_id,
        count: query.count.max(1),
        selected: true,
    };
    let result = with_member(&db, &member, |data| {
        preview(data, std::slice::from_ref(&line), query.address_id.as_deref())
    })
    .await;
    match result {
        Some(result) => ok(result),
        None => fail(StatusCode::UNAUTHORIZED, "登录已失效"),
    }
}

pub async fn order_repurchase(State(db): State<Db>, member: MemberId, Path(id): Path<String>) -> Response {
    let result = with_member(&db, &member, |data| {
        let order = data.orders.iter().find(|order| order.id == id)?;
        Some(preview(data, &order.lines, Some(&order.address_id)))
    })
    .await
    .flatten();
    match result {
        Some(result) => ok(result),
        None => fail(StatusCode::NOT_FOUND, "订单不存在"),
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineInput {
    pub sku_id: String,
    pub count: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOrder {
    pub goods: Vec<OrderLineInput>,
    pub address_id: String,
    pub delivery_time_type: u8,
    pub buyer_message: Option<String>,
    pub pay_type: u8,
    pub pay_channel: u8,
}

pub async fn submit_order(State(db): State<Db>, member: MemberId, Json(input): Json<SubmitOrder>) -> Response {
    if input.goods.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "商品不能为空");
    }
    if input.goods.iter().any(|line| find_sku(&line.sku_id).is_none() || line.count == 0) {
        return fail(StatusCode::BAD_REQUEST, "商品不存在");
    }
    let id = Uuid::new_v4().simple().to_string();
    let result = with_member(&db, &member, |data| {
        if !data.addresses.iter().any(|a| a.id == input.address_id) {
            return Err("收货地址不存在");
        }
        let lines: Vec<CartLine> = input
            .goods
            .iter()
            .map(|line| CartLine {
                sku_id: line.sku_id.clone(),
                count: line.count,
                selected: true,
            })
            .collect();
        data.cart
            .retain(|cart_line| !lines.iter().any(|line| line.sku_id == cart_line.sku_id));
        data.orders.push(StoredOrder {
            id: id.clone(),
            lines,
            address_id: input.address_id,
            delivery_time_type: input.delivery_time_type,
            buyer_message: input.buyer_message,
            pay_type: input.pay_type,
            pay_channel: input.pay_channel,
        });
        Ok(())
    })
    .await;
    match result {
        Some(Ok(())) => {
            tracing::info!(order = %id, "order submitted");
            ok(json!({ "id": id }))
        }
        Some(Err(msg)) => fail(StatusCode::BAD_REQUEST, msg),
        None => fail(StatusCode::UNAUTHORIZED, "登录已失效"),
    }
}

pub async fn order_detail(State(db): State<Db>, member: MemberId, Path(id): Path<String>) -> Response {
    let result = with_member(&db, &member, |data| {
        let order = data.orders.iter().find(|order| order.id == id)?;
        let address = data.addresses.iter().find(|a| a.id == order.address_id);
        let mut total = 0.0;
        let skus: Vec<Value> = order
            .lines
            .iter()
            .filter_map(|line| {
                let sku = find_sku(&line.sku_id)?;
                let line_total = sku.price * f64::from(line.count);
                total += line_total;
                Some(json!({
                    "id": sku.goods_id,
                    "skuId": sku.sku_id,
                    "name": sku.name,
                    "image": sku.picture,
                    "attrsText": sku.attrs_text(),
                    "quantity": line.count,
                    "curPrice": money(sku.price),
                    "realPay": money(line_total),
                    "totalMoney": money(line_total),
                }))
            })
            .collect();
        Some(json!({
            "id": order.id,
            "orderNo": format!("NO{}", &order.id[..12]),
            "orderState": 1,
            "createTime": "2024-01-01 12:00:00",
            "payType": order.pay_type,
            "payChannel": order.pay_channel,
            "payTime": null,
            "payMoney": money(total + POST_FEE),
            "totalMoney": money(total),
            "postFee": money(POST_FEE),
            "discountMoney": money(0.0),
            "buyerMessage": order.buyer_message,
            "deliveryTimeType": order.delivery_time_type,
            "receiverContact": address.map(|a| a.receiver.clone()).unwrap_or_default(),
            "receiverMobile": address.map(|a| a.contact.clone()).unwrap_or_default(),
            "receiverAddress": address.map(|a| format!("{} {}", a.full_location, a.address)).unwrap_or_default(),
            "skus": skus,
            "countdown": 1800,
        }))
    })
    .await
    .flatten();
    match result {
        Some(detail) => ok(detail),
        None => fail(StatusCode::NOT_FOUND, "订单不存在"),
    }
}
