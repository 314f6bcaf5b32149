//! Local stand-in for the Codeforces API, served by axum on an ephemeral port.
#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};

use friend_ratings::config::ApiConfig;
use friend_ratings::crypto::hasher::Hasher;
use friend_ratings::crypto::sha512::Sha512Hasher;
use friend_ratings::crypto::signer::signature_string;

pub const KEY: &str = "test-key";
pub const SECRET: &str = "test-secret";

pub enum FriendsReply {
    Ok(Vec<&'static str>),
    Failed(&'static str),
    ServerError,
    Garbage,
}

pub struct MockApi {
    pub friends: FriendsReply,
    pub users: HashMap<String, Option<i64>>,
    pub info_calls: AtomicUsize,
    pub last_info_query: Mutex<Option<HashMap<String, String>>>,
    pub last_friends_query: Mutex<Option<HashMap<String, String>>>,
}

impl MockApi {
    pub fn new(friends: FriendsReply, users: &[(&str, Option<i64>)]) -> Arc<Self> {
        Arc::new(Self {
            friends,
            users: users
                .iter()
                .map(|(h, r)| (h.to_string(), *r))
                .collect(),
            info_calls: AtomicUsize::new(0),
            last_info_query: Mutex::new(None),
            last_friends_query: Mutex::new(None),
        })
    }

    pub fn info_calls(&self) -> usize {
        self.info_calls.load(Ordering::SeqCst)
    }
}

fn failed(status: StatusCode, comment: &str) -> Response {
    (status, Json(json!({ "status": "FAILED", "comment": comment }))).into_response()
}

async fn user_friends(
    State(mock): State<Arc<MockApi>>,
    Query(mut params): Query<HashMap<String, String>>,
) -> Response {
    *mock.last_friends_query.lock().unwrap() = Some(params.clone());

    let Some(sig) = params.remove("apiSig") else {
        return failed(StatusCode::BAD_REQUEST, "apiSig: Field should not be empty");
    };
    if sig.len() <= 128 || params.get("apiKey").map(String::as_str) != Some(KEY) {
        return failed(StatusCode::BAD_REQUEST, "apiKey: Incorrect API key");
    }

    let (rand, _) = sig.split_at(sig.len() - 128);
    let signed: BTreeMap<String, String> = params.into_iter().collect();
    let expected = format!(
        "{rand}{}",
        Sha512Hasher.digest(signature_string(rand, "user.friends", &signed, SECRET).as_bytes())
    );
    if expected != sig {
        return failed(StatusCode::BAD_REQUEST, "apiSig: Incorrect signature");
    }

    match &mock.friends {
        FriendsReply::Ok(handles) => {
            Json(json!({ "status": "OK", "result": handles })).into_response()
        }
        FriendsReply::Failed(comment) => failed(StatusCode::OK, comment),
        FriendsReply::ServerError => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        FriendsReply::Garbage => (StatusCode::OK, "<html>maintenance</html>").into_response(),
    }
}

async fn user_info(
    State(mock): State<Arc<MockApi>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    mock.info_calls.fetch_add(1, Ordering::SeqCst);
    *mock.last_info_query.lock().unwrap() = Some(params.clone());

    let Some(handles) = params.get("handles") else {
        return failed(StatusCode::BAD_REQUEST, "handles: Field should not be empty");
    };

    let mut result = Vec::new();
    for handle in handles.split(';') {
        match mock.users.get(handle) {
            Some(Some(rating)) => {
                result.push(json!({ "handle": handle, "rating": rating, "rank": "expert" }))
            }
            Some(None) => result.push(json!({ "handle": handle })),
            None => {
                return failed(
                    StatusCode::BAD_REQUEST,
                    &format!("handles: User with handle {handle} not found"),
                );
            }
        }
    }
    Json(json!({ "status": "OK", "result": Value::Array(result) })).into_response()
}

/// Starts the mock and returns its API base URL.
pub async fn spawn_mock(mock: Arc<MockApi>) -> String {
    let app = Router::new()
        .route("/api/user.friends", get(user_friends))
        .route("/api/user.info", get(user_info))
        .with_state(mock);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub fn api_config(base_url: &str) -> ApiConfig {
    ApiConfig {
        base_url: base_url.to_string(),
        api_key: KEY.to_string(),
        api_secret: SECRET.to_string(),
    }
}
