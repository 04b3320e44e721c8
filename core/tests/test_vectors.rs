//! Verify request building and response decoding against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Request bodies are compared as parsed JSON, not raw strings, so field
//! order does not matter. Raw bodies are compared verbatim.

use posts_core::endpoint;
use posts_core::{
    ApiClient, ApiError, Comment, HttpMethod, HttpRequest, HttpResponse, Post, PostRequest,
    RequestBody,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ApiClient {
    ApiClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "PATCH" => HttpMethod::Patch,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn pairs(value: &serde_json::Value) -> Vec<(String, String)> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let pair = pair.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect()
}

fn body_of(case: &serde_json::Value) -> RequestBody {
    match case.get("raw") {
        Some(raw) => RequestBody::raw(raw.as_str().unwrap()),
        None => {
            let input: PostRequest = serde_json::from_value(case["input"].clone()).unwrap();
            RequestBody::json(&input).unwrap()
        }
    }
}

fn build(c: &ApiClient, case: &serde_json::Value) -> HttpRequest {
    let template = case["template"].as_str().unwrap();
    let path = match case.get("id") {
        Some(id) => endpoint::resolve(template, id.as_str().unwrap()),
        None => template.to_string(),
    };
    match case["operation"].as_str().unwrap() {
        "get" => c.build_get(&path),
        "get_with_params" => {
            let params = pairs(&case["params"]);
            let params: Vec<(&str, &str)> =
                params.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
            c.build_get_with_params(&path, &params)
        }
        "delete" => c.build_delete(&path),
        "post" => c.build_post(&path, body_of(case)),
        "put" => c.build_put(&path, body_of(case)),
        "patch" => c.build_patch(&path, body_of(case)),
        other => panic!("unknown operation: {other}"),
    }
}

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let expected = &case["expected_request"];

        let req = build(&c, case);
        assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
        assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");
        assert_eq!(req.query, pairs(&expected["query"]), "{name}: query");
        assert_eq!(req.headers, pairs(&expected["headers"]), "{name}: headers");

        match (expected.get("body"), expected.get("raw_body")) {
            (Some(body), _) => {
                let actual: serde_json::Value =
                    serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
                assert_eq!(&actual, body, "{name}: body");
            }
            (None, Some(raw)) => {
                assert_eq!(req.body.as_deref(), raw.as_str(), "{name}: raw body");
            }
            (None, None) => assert!(req.body.is_none(), "{name}: body should be None"),
        }
    }
}

#[test]
fn response_test_vectors() {
    let raw = include_str!("../../test-vectors/responses.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };

        if let Some(expected_error) = case.get("expected_error") {
            let err = response.json::<Post>().unwrap_err();
            match expected_error.as_str().unwrap() {
                "Deserialization" => assert!(
                    matches!(err, ApiError::Deserialization { status, .. } if status == response.status),
                    "{name}: expected Deserialization"
                ),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
            continue;
        }

        let expected = &case["expected_result"];
        match case["model"].as_str().unwrap() {
            "post" => {
                let post: Post = response.json().unwrap();
                let want: Post = serde_json::from_value(expected.clone()).unwrap();
                assert_eq!(post, want, "{name}: parsed result");
            }
            "posts" => {
                let posts: Vec<Post> = response.json().unwrap();
                let want: Vec<Post> = serde_json::from_value(expected.clone()).unwrap();
                assert_eq!(posts, want, "{name}: parsed result");
            }
            "comments" => {
                let comments: Vec<Comment> = response.json().unwrap();
                let want: Vec<Comment> = serde_json::from_value(expected.clone()).unwrap();
                assert_eq!(comments, want, "{name}: parsed result");
            }
            "empty" => assert!(response.is_empty_body(), "{name}: expected empty body"),
            other => panic!("{name}: unknown model: {other}"),
        }
    }
}
