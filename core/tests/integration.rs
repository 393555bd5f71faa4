//! End-to-end flows against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives [`MallApi`] over real
//! HTTP with [`ReqwestTransport`]. Validates interception, classification,
//! and decoding together with the backend's actual wire shapes.

mod common;

use std::io::Write;
use std::net::SocketAddr;
use std::sync::Arc;

use common::{CountingSession, RecordingUi};
use mall_core::types::address::AddressParams;
use mall_core::types::cart::AddToCartParams;
use mall_core::types::member::{Gender, ProfileParams};
use mall_core::types::order::{OrderLine, OrderNowParams, OrderSubmitParams};
use mall_core::types::PageParams;
use mall_core::{
    Gateway, GatewayConfig, GatewayError, MallApi, Pager, ReqwestTransport, SessionStore, TransportErrorKind,
};

async fn start_server() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mall_mock_server::run(listener));
    addr
}

struct Client {
    api: MallApi<ReqwestTransport>,
    session: Arc<CountingSession>,
    ui: Arc<RecordingUi>,
}

fn client(addr: SocketAddr, session: CountingSession) -> Client {
    let session = Arc::new(session);
    let ui = Arc::new(RecordingUi::default());
    let gateway = Gateway::new(
        GatewayConfig::new(&format!("http://{addr}/")),
        ReqwestTransport::new(),
        session.clone(),
    )
    .with_notifier(ui.clone())
    .with_navigator(ui.clone());
    Client {
        api: MallApi::new(gateway),
        session,
        ui,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn browse_catalog_anonymously() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::default());

    let banners = c.api.home_banner_default().await.unwrap();
    assert!(banners.is_success());
    assert_eq!(banners.result.len(), 3);

    let categories = c.api.home_category().await.unwrap();
    assert_eq!(categories.result.len(), 4);

    let hot = c.api.home_hot().await.unwrap();
    let target = hot.result[0].target.clone();
    let page = c.api.hot(&target, &Default::default()).await.unwrap();
    assert_eq!(page.result.sub_types.len(), 2);

    let tops = c.api.category_top().await.unwrap();
    assert!(!tops.result[0].children[0].goods.is_empty());

    let goods = c.api.goods_by_id("1369155").await.unwrap();
    assert_eq!(goods.result.skus.len(), 2);
    assert_eq!(goods.result.brand.name, "小兔鲜");

    assert!(c.ui.toasts().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn guess_like_pages_until_exhausted() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::default());

    let first = c.api.home_guess_like(PageParams::default()).await.unwrap();
    assert_eq!(first.result.counts, 25);

    let mut pager = Pager::default();
    let mut loads = 0;
    while c.api.load_more_guess(&mut pager).await.unwrap() {
        loads += 1;
    }
    assert_eq!(loads, 3);
    assert!(pager.is_finished());
    assert_eq!(pager.items().len(), 25);
}

#[tokio::test(flavor = "multi_thread")]
async fn unknown_goods_shows_backend_msg() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::default());

    let err = c.api.goods_by_id("404").await.unwrap_err();
    assert!(matches!(err, GatewayError::Status { ref response, .. } if response.status == 400));
    assert_eq!(c.ui.toasts(), vec!["商品不存在".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn member_area_requires_login() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::default());

    let err = c.api.member_profile().await.unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized(_)));
    assert_eq!(c.ui.navigations(), vec!["/pages/login/login".to_string()]);
    assert!(c.ui.toasts().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_token_logs_out() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::logged_in("expired"));

    let err = c.api.cart_list().await.unwrap_err();
    assert!(matches!(err, GatewayError::Unauthorized(_)));
    assert_eq!(c.session.clears(), 1);
    assert_eq!(c.session.token(), None);
    assert_eq!(c.ui.navigations(), vec!["/pages/login/login".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn checkout_lifecycle() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::default());

    // Step 1: log in and keep the profile.
    let login = c.api.login_demo("13800000000").await.unwrap();
    assert!(login.is_success());
    assert_eq!(login.result.mobile, "13800000000");
    c.session.inner.set_profile(login.result);

    // Step 2: profile round trip.
    let update = ProfileParams {
        nickname: Some("兔兔".to_string()),
        gender: Some(Gender::Female),
        ..Default::default()
    };
    let profile = c.api.update_member_profile(&update).await.unwrap();
    assert_eq!(profile.result.nickname, "兔兔");
    assert_eq!(c.api.member_profile().await.unwrap().result.gender, Some(Gender::Female));

    // Step 3: an address, which becomes the default.
    let address = AddressParams {
        receiver: "张三".to_string(),
        contact: "13800000000".to_string(),
        province_code: "110000".to_string(),
        city_code: "110100".to_string(),
        county_code: "110101".to_string(),
        address: "幸福路1号".to_string(),
        is_default: 0,
    };
    let address_id = c.api.add_address(&address).await.unwrap().result.id;
    let stored = c.api.address_by_id(&address_id).await.unwrap().result;
    assert_eq!(stored.is_default, 1);
    assert_eq!(c.api.address_list().await.unwrap().result.len(), 1);

    // Step 4: fill the cart.
    for (sku_id, count) in [("300101", 2), ("300201", 1)] {
        let added = c
            .api
            .add_to_cart(&AddToCartParams {
                sku_id: sku_id.to_string(),
                count,
            })
            .await
            .unwrap();
        assert!(added.result.success);
    }
    c.api.select_cart_item("300201", false).await.unwrap();
    let cart = c.api.cart_list().await.unwrap().result;
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.iter().filter(|item| item.selected).count(), 1);

    // Step 5: preview only the selected line.
    let pre = c.api.order_pre().await.unwrap().result;
    assert_eq!(pre.goods.len(), 1);
    assert_eq!(pre.summary.total_price, "59.80");

    // Step 6: submit and read back.
    let submit = OrderSubmitParams {
        goods: pre
            .goods
            .iter()
            .map(|g| OrderLine {
                sku_id: g.sku_id.clone(),
                count: g.count,
            })
            .collect(),
        address_id: address_id.clone(),
        delivery_time_type: 1,
        buyer_message: None,
        pay_type: 1,
        pay_channel: 1,
    };
    let order_id = c.api.submit_order(&submit).await.unwrap().result.id;
    let detail = c.api.order_detail(&order_id).await.unwrap().result;
    assert_eq!(detail.pay_money, "59.80");
    assert_eq!(detail.skus[0].quantity, 2);

    let cart = c.api.cart_list().await.unwrap().result;
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0].sku_id, "300201");

    let again = c.api.order_repurchase(&order_id).await.unwrap().result;
    assert_eq!(again.goods[0].sku_id, "300101");

    // Step 7: buy now, then clean up.
    let now = c
        .api
        .order_now(&OrderNowParams {
            sku_id: "300201".to_string(),
            count: 3,
            address_id: Some(address_id.clone()),
        })
        .await
        .unwrap()
        .result;
    assert_eq!(now.summary.total_price, "267.00");

    c.api.update_cart_item("300201", 4).await.unwrap();
    c.api.select_all_cart(true).await.unwrap();
    c.api.delete_cart(&["300201".to_string()]).await.unwrap();
    assert!(c.api.cart_list().await.unwrap().result.is_empty());
    c.api.delete_address(&address_id).await.unwrap();

    assert!(c.ui.toasts().is_empty());
    assert_eq!(c.session.clears(), 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn out_of_stock_toasts() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::default());
    let login = c.api.login_demo("13800000001").await.unwrap();
    c.session.inner.set_profile(login.result);

    let err = c
        .api
        .add_to_cart(&AddToCartParams {
            sku_id: "300002".to_string(),
            count: 1,
        })
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Status { ref message, .. } if message == "库存不足"));
    assert_eq!(c.ui.toasts(), vec!["库存不足".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn avatar_upload() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::default());
    let login = c.api.login_demo("13800000002").await.unwrap();
    c.session.inner.set_profile(login.result);

    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(b"\x89PNG fake image").unwrap();

    let avatar = c.api.upload_avatar(file.path()).await.unwrap().result.avatar;
    let file_name = file.path().file_name().unwrap().to_string_lossy().into_owned();
    assert!(avatar.ends_with(&file_name), "{avatar}");
    assert_eq!(c.api.member_profile().await.unwrap().result.avatar, avatar);
}

#[tokio::test(flavor = "multi_thread")]
async fn missing_upload_file_is_a_network_failure() {
    let addr = start_server().await;
    let c = client(addr, CountingSession::logged_in("whatever"));

    let dir = tempfile::tempdir().unwrap();
    let err = c
        .api
        .upload_avatar(&dir.path().join("missing.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Transport(ref e) if e.kind == TransportErrorKind::Io));
    assert_eq!(c.ui.toasts(), vec!["网络错误，换个网络试试".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_toasts_network_error() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let c = client(addr, CountingSession::default());

    let err = c.api.home_banner(1).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
    assert_eq!(c.ui.toasts(), vec!["网络错误，换个网络试试".to_string()]);
    assert!(c.ui.navigations().is_empty());
}
