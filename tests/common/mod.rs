#![allow(dead_code)]

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;

use ghprofile::config::Config;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_server(router: Router) -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    Ok(format!("http://{addr}"))
}

/// A base URL nobody listens on.
pub async fn dead_base_url() -> Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

pub fn test_config(api_base_url: &str) -> Config {
    Config {
        api_base_url: api_base_url.to_string(),
        ..Config::default()
    }
}

/// A tiny stand-in for the GitHub users API.
pub fn github_stub() -> Router {
    Router::new()
        .route("/users/:username", get(user_handler))
        .route("/users/:username/repos", get(repos_handler))
}

pub async fn spawn_github_stub() -> Result<String> {
    spawn_server(github_stub()).await
}

pub fn profile_json(login: &str) -> Value {
    json!({
        "login": login,
        "id": 583231,
        "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4",
        "html_url": format!("https://github.com/{login}"),
        "name": "The Octocat",
        "company": "@github",
        "blog": "https://github.blog",
        "location": "San Francisco",
        "bio": null,
        "twitter_username": null,
        "public_repos": 8,
        "followers": 17000,
        "following": 9,
        "created_at": "2011-01-25T18:44:36Z",
        "updated_at": "2024-06-22T11:24:08Z"
    })
}

fn repo(name: &str, updated: &str, created: &str, pushed: &str, stars: u64) -> Value {
    let language = if stars % 2 == 0 { Value::Null } else { json!("Rust") };
    json!({
        "name": name,
        "html_url": format!("https://github.com/octocat/{name}"),
        "language": language,
        "stargazers_count": stars,
        "watchers_count": stars,
        "forks_count": 1,
        "updated_at": updated,
        "created_at": created,
        "pushed_at": pushed
    })
}

/// Seven repos in no particular order. By `updated_at` the order is
/// g, e, c, a, f, b, d; by `created_at` it is a through g; by
/// `pushed_at`, d comes first.
pub fn octocat_repos() -> Value {
    json!([
        repo("a", "2022-05-01T00:00:00Z", "2015-01-01T00:00:00Z", "2022-05-01T00:00:00Z", 1),
        repo("b", "2020-01-01T00:00:00Z", "2014-01-01T00:00:00Z", "2020-01-01T00:00:00Z", 2),
        repo("c", "2023-03-03T00:00:00Z", "2013-01-01T00:00:00Z", "2023-03-03T00:00:00Z", 3),
        repo("d", "2019-07-07T00:00:00Z", "2012-01-01T00:00:00Z", "2025-01-01T00:00:00Z", 4),
        repo("e", "2024-01-15T12:00:00Z", "2011-06-01T00:00:00Z", "2024-01-15T12:00:00Z", 5),
        repo("f", "2021-11-11T00:00:00Z", "2011-03-01T00:00:00Z", "2021-11-11T00:00:00Z", 0),
        repo("g", "2024-06-01T00:00:00Z", "2011-02-01T00:00:00Z", "2024-06-01T00:00:00Z", 7)
    ])
}

async fn user_handler(Path(username): Path<String>, headers: HeaderMap) -> Response {
    match username.as_str() {
        "octocat" | "norepos" | "badrepos" | "space cat" => {
            Json(profile_json(&username)).into_response()
        }
        // Reflects request headers back so tests can inspect them.
        "echo" => {
            let header = |name: &str| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            let mut profile = profile_json("echo");
            profile["name"] = json!(header("user-agent"));
            profile["bio"] = json!(header("authorization"));
            profile["company"] = json!(header("accept"));
            Json(profile).into_response()
        }
        "garbled" => (StatusCode::OK, "this is not json").into_response(),
        "ratelimited" => (
            StatusCode::FORBIDDEN,
            Json(json!({"message": "API rate limit exceeded"})),
        )
            .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response(),
    }
}

async fn repos_handler(
    Path(username): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match username.as_str() {
        "octocat" => Json(octocat_repos()).into_response(),
        "norepos" => Json(json!([])).into_response(),
        "badrepos" => Json(json!([
            repo("ok", "2022-05-01T00:00:00Z", "2015-01-01T00:00:00Z", "2022-05-01T00:00:00Z", 1),
            {"name": "broken", "updated_at": null}
        ]))
        .into_response(),
        "echo" => Json(json!([{
            "name": "echo",
            "updated_at": "2024-01-01T00:00:00Z",
            "per_page": params.get("per_page"),
        }]))
        .into_response(),
        _ => (StatusCode::NOT_FOUND, Json(json!({"message": "Not Found"}))).into_response(),
    }
}
