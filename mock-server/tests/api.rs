use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mall_mock_server::{app, app_with_store, Db, Envelope};
use serde_json::Value;
use tower::ServiceExt;

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn envelope(response: axum::response::Response) -> Envelope<Value> {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<String> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(String::new()).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &str) -> Request<String> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(http::header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(body.to_string()).unwrap()
}

async fn logged_in() -> (Router, Db, String) {
    let db = Db::default();
    let (token, _) = db.write().await.login("13800000000");
    (app_with_store(db.clone()), db, token)
}

async fn call(app: &Router, request: Request<String>) -> (StatusCode, Envelope<Value>) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    (status, envelope(resp).await)
}

// --- public catalog ---

#[tokio::test]
async fn banner_uses_success_envelope() {
    let (status, body) = call(&app(), get("/home/banner?distributionSite=2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.code, "1");
    let banners = body.result.as_array().unwrap();
    assert_eq!(banners.len(), 3);
    assert!(banners[0]["imgUrl"].as_str().unwrap().contains("/banner/2-1"));
}

#[tokio::test]
async fn guess_like_pages() {
    let (_, body) = call(&app(), get("/home/goods/guessLike?page=3&pageSize=10", None)).await;
    assert_eq!(body.result["pages"], 3);
    assert_eq!(body.result["page"], 3);
    assert_eq!(body.result["items"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn unknown_goods_is_400_with_msg() {
    let (status, body) = call(&app(), get("/goods?id=404", None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.msg, "商品不存在");
    assert!(body.result.is_null());
}

#[tokio::test]
async fn goods_detail_lists_skus() {
    let (status, body) = call(&app(), get("/goods?id=1369155", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.result["skus"].as_array().unwrap().len(), 2);
    assert_eq!(body.result["specs"][0]["values"][1]["available"], false);
}

#[tokio::test]
async fn hot_selects_sub_type_page() {
    let (status, body) = call(&app(), get("/hot/preference?page=2&pageSize=5&subType=12", None)).await;
    assert_eq!(status, StatusCode::OK);
    let sub_types = body.result["subTypes"].as_array().unwrap();
    assert_eq!(sub_types[0]["goodsItems"]["page"], 1);
    assert_eq!(sub_types[1]["goodsItems"]["page"], 2);
}

#[tokio::test]
async fn unknown_hot_kind_is_404() {
    let (status, _) = call(&app(), get("/hot/nothing", None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// --- auth ---

#[tokio::test]
async fn member_routes_require_token() {
    let (status, body) = call(&app(), get("/member/profile", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body.code, "401");
}

#[tokio::test]
async fn revoked_token_is_401() {
    let (app, db, token) = logged_in().await;
    db.write().await.revoke(&token);
    let (status, _) = call(&app, get("/member/cart", Some(&token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn simple_login_issues_token() {
    let app = app();
    let (status, body) = call(
        &app,
        json_request("POST", "/login/wxMin/simple", None, r#"{"phoneNumber":"13912345678"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body.result["token"].as_str().unwrap().to_string();
    assert_eq!(body.result["mobile"], "13912345678");

    let (status, profile) = call(&app, get("/member/profile", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile.result["account"], "user13912345678");
}

#[tokio::test]
async fn simple_login_rejects_bad_phone() {
    let (status, body) = call(
        &app(),
        json_request("POST", "/login/wxMin/simple", None, r#"{"phoneNumber":"12"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.msg, "手机号格式错误");
}

#[tokio::test]
async fn profile_update_sets_location() {
    let (app, _, token) = logged_in().await;
    let (status, body) = call(
        &app,
        json_request(
            "PUT",
            "/member/profile",
            Some(&token),
            r#"{"nickname":"兔兔","gender":"女","provinceCode":"110000","cityCode":"110100","countyCode":"110101"}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.result["nickname"], "兔兔");
    assert_eq!(body.result["gender"], "女");
    assert_eq!(body.result["fullLocation"], "110000 110100 110101");
}

// --- cart ---

#[tokio::test]
async fn cart_lifecycle() {
    let (app, _, token) = logged_in().await;
    let token = Some(token.as_str());

    let (status, _) = call(&app, json_request("POST", "/member/cart", token, r#"{"skuId":"300101","count":2}"#)).await;
    assert_eq!(status, StatusCode::OK);
    call(&app, json_request("POST", "/member/cart", token, r#"{"skuId":"300201","count":1}"#)).await;

    let (_, cart) = call(&app, get("/member/cart", token)).await;
    let items = cart.result.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["skuId"], "300201");

    let (status, _) = call(&app, json_request("PUT", "/member/cart/300101", token, r#"{"count":5}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, json_request("PUT", "/member/cart/selected", token, r#"{"selected":false}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) =
        call(&app, json_request("PUT", "/member/cart/300201/selected", token, r#"{"selected":true}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, cart) = call(&app, get("/member/cart", token)).await;
    let items = cart.result.as_array().unwrap();
    assert_eq!(items[0]["selected"], true);
    assert_eq!(items[1]["selected"], false);
    assert_eq!(items[1]["count"], 5);

    let (status, _) = call(&app, json_request("DELETE", "/member/cart", token, r#"{"ids":["300101"]}"#)).await;
    assert_eq!(status, StatusCode::OK);
    let (_, cart) = call(&app, get("/member/cart", token)).await;
    assert_eq!(cart.result.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn add_to_cart_checks_stock() {
    let (app, _, token) = logged_in().await;
    let (status, body) = call(
        &app,
        json_request("POST", "/member/cart", Some(&token), r#"{"skuId":"300002","count":1}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.msg, "库存不足");
}

// --- orders ---

#[tokio::test]
async fn checkout_lifecycle() {
    let (app, _, token) = logged_in().await;
    let token = Some(token.as_str());

    let (_, added) = call(
        &app,
        json_request(
            "POST",
            "/member/address",
            token,
            r#"{"receiver":"张三","contact":"13800000000","provinceCode":"110000","cityCode":"110100","countyCode":"110101","address":"幸福路1号","isDefault":0}"#,
        ),
    )
    .await;
    let address_id = added.result["id"].as_str().unwrap().to_string();

    call(&app, json_request("POST", "/member/cart", token, r#"{"skuId":"300101","count":2}"#)).await;

    let (_, pre) = call(&app, get("/member/order/pre", token)).await;
    assert_eq!(pre.result["summary"]["goodsCount"], 2);
    assert_eq!(pre.result["summary"]["totalPrice"], "59.80");
    assert_eq!(pre.result["userAddresses"][0]["isDefault"], 1);

    let submit = format!(
        r#"{{"goods":[{{"skuId":"300101","count":2}}],"addressId":"{address_id}","deliveryTimeType":1,"payType":1,"payChannel":1}}"#
    );
    let (status, submitted) = call(&app, json_request("POST", "/member/order", token, &submit)).await;
    assert_eq!(status, StatusCode::OK);
    let order_id = submitted.result["id"].as_str().unwrap().to_string();

    let (_, cart) = call(&app, get("/member/cart", token)).await;
    assert!(cart.result.as_array().unwrap().is_empty());

    let (status, detail) = call(&app, get(&format!("/member/order/{order_id}"), token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail.result["payMoney"], "59.80");
    assert_eq!(detail.result["receiverContact"], "张三");

    let (status, again) = call(&app, get(&format!("/member/order/repurchase/{order_id}"), token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(again.result["goods"][0]["skuId"], "300101");
}

#[tokio::test]
async fn order_now_previews_single_sku() {
    let (app, _, token) = logged_in().await;
    let (status, body) = call(&app, get("/member/order/pre/now?skuId=300201&count=3", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.result["summary"]["totalPrice"], "267.00");
}

#[tokio::test]
async fn submit_without_address_fails() {
    let (app, _, token) = logged_in().await;
    let (status, body) = call(
        &app,
        json_request(
            "POST",
            "/member/order",
            Some(&token),
            r#"{"goods":[{"skuId":"300101","count":1}],"addressId":"nope","deliveryTimeType":1,"payType":1,"payChannel":1}"#,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body.msg, "收货地址不存在");
}

#[tokio::test]
async fn missing_order_is_404() {
    let (app, _, token) = logged_in().await;
    let (status, _) = call(&app, get("/member/order/unknown", Some(&token))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
