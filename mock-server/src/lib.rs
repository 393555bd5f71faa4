//! In-memory stand-in for the mall backend.
//!
//! Every response uses the `{code, msg, result}` envelope. Routes under
//! `/member` require `Authorization: Bearer <token>` from one of the login
//! endpoints and answer 401 otherwise.

mod catalog;
mod member;
mod order;

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

pub use member::{Address, Profile};
pub use order::{CartLine, StoredOrder};

pub const SUCCESS_CODE: &str = "1";

/// Everything the server remembers about one member.
#[derive(Clone, Debug)]
pub struct MemberData {
    pub mobile: String,
    pub profile: Profile,
    pub cart: Vec<CartLine>,
    pub addresses: Vec<Address>,
    pub orders: Vec<StoredOrder>,
}

#[derive(Default, Debug)]
pub struct Store {
    /// token -> member id
    pub sessions: HashMap<String, String>,
    /// member id -> data
    pub members: HashMap<String, MemberData>,
    next_member: u64,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with_store(Db::default())
}

/// Router over a caller-supplied store, so tests can seed or inspect state.
pub fn app_with_store(db: Db) -> Router {
    Router::new()
        .route("/home/banner", get(catalog::home_banner))
        .route("/home/category/mutli", get(catalog::home_category))
        .route("/home/hot/mutli", get(catalog::home_hot))
        .route("/home/goods/guessLike", get(catalog::guess_like))
        .route("/category/top", get(catalog::category_top))
        .route("/goods", get(catalog::goods_detail))
        .route("/hot/{kind}", get(catalog::hot))
        .route("/login/wxMin", post(member::login_wx_min))
        .route("/login/wxMin/simple", post(member::login_simple))
        .route("/member/profile", get(member::get_profile).put(member::update_profile))
        .route("/member/profile/avatar", post(member::upload_avatar))
        .route("/member/address", get(member::list_addresses).post(member::add_address))
        .route(
            "/member/address/{id}",
            get(member::get_address)
                .put(member::update_address)
                .delete(member::delete_address),
        )
        .route(
            "/member/cart",
            get(order::list_cart).post(order::add_to_cart).delete(order::delete_cart),
        )
        .route("/member/cart/selected", put(order::select_all))
        .route("/member/cart/{sku_id}", put(order::update_cart_item))
        .route("/member/cart/{sku_id}/selected", put(order::select_item))
        .route("/member/order", post(order::submit_order))
        .route("/member/order/pre", get(order::order_pre))
        .route("/member/order/pre/now", get(order::order_pre_now))
        .route("/member/order/repurchase/{id}", get(order::order_repurchase))
        .route("/member/order/{id}", get(order::order_detail))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Wire shape of every response.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub code: String,
    pub msg: String,
    pub result: T,
}

pub(crate) fn ok<T: Serialize>(result: T) -> Response {
    Json(Envelope {
        code: SUCCESS_CODE.to_string(),
        msg: "操作成功".to_string(),
        result,
    })
    .into_response()
}

pub(crate) fn fail(status: StatusCode, msg: &str) -> Response {
    (
        status,
        Json(json!({ "code": status.as_u16().to_string(), "msg": msg, "result": null })),
    )
        .into_response()
}

/// Id of the member behind the request's bearer token.
#[derive(Debug, Clone)]
pub struct MemberId(pub String);

impl FromRequestParts<Db> for MemberId {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, db: &Db) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::to_string);
        let Some(token) = token else {
            return Err(fail(StatusCode::UNAUTHORIZED, "未登录"));
        };
        match db.read().await.sessions.get(&token) {
            Some(id) => Ok(MemberId(id.clone())),
            None => Err(fail(StatusCode::UNAUTHORIZED, "登录已失效")),
        }
    }
}

impl Store {
    /// Find or create the member for `mobile` and issue a fresh token.
    pub fn login(&mut self, mobile: &str) -> (String, MemberData) {
        let existing = self
            .members
            .iter()
            .find(|(_, data)| data.mobile == mobile)
            .map(|(id, _)| id.clone());
        let id = match existing {
            Some(id) => id,
            None => {
                self.next_member += 1;
                let id = self.next_member.to_string();
                self.members.insert(id.clone(), MemberData::new(&id, mobile));
                id
            }
        };
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), id.clone());
        let data = self.members[&id].clone();
        (token, data)
    }

    /// Forget a token, e.g. to simulate expiry.
    pub fn revoke(&mut self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }
}

impl MemberData {
    fn new(id: &str, mobile: &str) -> Self {
        let account = format!("user{mobile}");
        Self {
            mobile: mobile.to_string(),
            profile: Profile {
                id: id.to_string(),
                avatar: String::new(),
                nickname: account.clone(),
                account,
                gender: None,
                birthday: None,
                full_location: None,
                profession: None,
                province_code: None,
                city_code: None,
                county_code: None,
            },
            cart: Vec::new(),
            addresses: Vec::new(),
            orders: Vec::new(),
        }
    }
}

pub(crate) async fn with_member<R>(db: &Db, id: &MemberId, f: impl FnOnce(&mut MemberData) -> R) -> Option<R> {
    let mut store = db.write().await;
    store.members.get_mut(&id.0).map(f)
}
