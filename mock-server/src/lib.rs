//! Local stand-in for the JSONPlaceholder posts service.
//!
//! Serves a read-only seed and replays the service's observed behavior,
//! quirks included: writes are echoed but never stored, unknown ids are
//! only rejected on GET, and PUT on an unknown id fails with an HTML 500.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};

const SEED: &str = include_str!("../data/seed.json");

const PUT_UNKNOWN_ID_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Error</title>\n</head>\n<body>\n<pre>TypeError: Cannot read properties of undefined (reading &#39;id&#39;)</pre>\n</body>\n</html>\n";
const BAD_BODY_PAGE: &str = "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>Error</title>\n</head>\n<body>\n<pre>SyntaxError: Unexpected token in JSON</pre>\n</body>\n</html>\n";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub post_id: u64,
    pub id: u64,
    pub name: String,
    pub email: String,
    pub body: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Dataset {
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
}

impl Dataset {
    /// The bundled seed.
    pub fn seeded() -> Result<Self, serde_json::Error> {
        serde_json::from_str(SEED)
    }

    /// The id a create would hand out: one past the highest seeded id.
    pub fn next_id(&self) -> u64 {
        self.posts.iter().map(|p| p.id).max().unwrap_or(0) + 1
    }

    fn post(&self, raw_id: &str) -> Option<&Post> {
        let id: u64 = raw_id.parse().ok()?;
        self.posts.iter().find(|p| p.id == id)
    }
}

#[derive(Deserialize)]
pub struct CommentQuery {
    #[serde(rename = "postId")]
    pub post_id: Option<String>,
}

pub type Db = Arc<Dataset>;

pub fn app(dataset: Dataset) -> Router {
    let db: Db = Arc::new(dataset);
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route(
            "/posts/{id}",
            get(get_post).put(replace_post).patch(patch_post).delete(delete_post),
        )
        .route("/posts/{id}/comments", get(post_comments))
        .route("/comments", get(list_comments))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    let dataset = Dataset::seeded().map_err(std::io::Error::other)?;
    info!(
        posts = dataset.posts.len(),
        comments = dataset.comments.len(),
        "serving seeded dataset"
    );
    axum::serve(listener, app(dataset)).await
}

async fn list_posts(State(db): State<Db>) -> Json<Vec<Post>> {
    Json(db.posts.clone())
}

async fn get_post(State(db): State<Db>, Path(id): Path<String>) -> Response {
    match db.post(&id) {
        Some(post) => Json(post.clone()).into_response(),
        None => (StatusCode::NOT_FOUND, Json(json!({}))).into_response(),
    }
}

async fn post_comments(State(db): State<Db>, Path(id): Path<String>) -> Json<Vec<Comment>> {
    Json(comments_for(&db, Some(&id)))
}

async fn list_comments(
    State(db): State<Db>,
    Query(query): Query<CommentQuery>,
) -> Json<Vec<Comment>> {
    Json(comments_for(&db, query.post_id.as_deref()))
}

async fn create_post(State(db): State<Db>, body: String) -> Response {
    let fields = match parse_fields(&body) {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    // Ids are handed out but nothing is stored.
    let id = db.next_id();
    debug!(id, "create not persisted");
    (StatusCode::CREATED, Json(with_id(fields, Value::from(id)))).into_response()
}

async fn replace_post(State(db): State<Db>, Path(id): Path<String>, body: String) -> Response {
    if db.post(&id).is_none() {
        return (StatusCode::INTERNAL_SERVER_ERROR, Html(PUT_UNKNOWN_ID_PAGE)).into_response();
    }
    let fields = match parse_fields(&body) {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    debug!(%id, "replace not persisted");
    Json(with_id(fields, id_value(&id))).into_response()
}

async fn patch_post(State(db): State<Db>, Path(id): Path<String>, body: String) -> Response {
    let fields = match parse_fields(&body) {
        Ok(fields) => fields,
        Err(response) => return response,
    };
    let mut merged = match db.post(&id).map(serde_json::to_value) {
        Some(Ok(Value::Object(existing))) => existing,
        _ => Map::new(),
    };
    merged.extend(fields);
    debug!(%id, "patch not persisted");
    Json(with_id(merged, id_value(&id))).into_response()
}

async fn delete_post(Path(id): Path<String>) -> Json<Value> {
    debug!(%id, "delete not persisted");
    Json(json!({}))
}

fn comments_for(db: &Dataset, post_id: Option<&str>) -> Vec<Comment> {
    db.comments
        .iter()
        .filter(|c| post_id.map_or(true, |id| c.post_id.to_string() == id))
        .cloned()
        .collect()
}

/// Request body as a JSON object. Non-object JSON counts as no fields;
/// unparsable text is a 400 with an HTML page.
fn parse_fields(body: &str) -> Result<Map<String, Value>, Response> {
    if body.trim().is_empty() {
        return Ok(Map::new());
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Ok(Map::new()),
        Err(_) => Err((StatusCode::BAD_REQUEST, Html(BAD_BODY_PAGE)).into_response()),
    }
}

fn with_id(mut fields: Map<String, Value>, id: Value) -> Map<String, Value> {
    fields.insert("id".to_string(), id);
    fields
}

fn id_value(raw: &str) -> Value {
    raw.parse::<u64>().map(Value::from).unwrap_or_else(|_| Value::from(raw))
}
