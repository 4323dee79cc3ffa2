//! Schema-level tests against the in-memory store

use std::sync::Arc;

use async_graphql::{Request, Response, Value};
use auth::{AuthConfig, AuthStore, MemoryAuthRepository, resolve_viewer};
use axum::body::Body;
use axum::http::{HeaderMap, HeaderValue, Request as HttpRequest, StatusCode, header};
use blog::{BlogStore, MemoryBlogRepository};
use serde_json::{Value as Json, json};
use tower::ServiceExt;

use crate::AppState;
use crate::schema::build_schema;

const PASSWORD: &str = "correct horse battery";

struct Harness {
    state: AppState,
}

impl Harness {
    fn new() -> Self {
        let users = MemoryAuthRepository::new();
        let auth_store = Arc::new(AuthStore::from(users.clone()));
        let auth_config = Arc::new(AuthConfig::with_secret(b"test-secret".to_vec()));
        let blog_store = Arc::new(BlogStore::from(MemoryBlogRepository::new(users)));

        Self {
            state: AppState {
                schema: build_schema(auth_store.clone(), auth_config.clone(), blog_store),
                auth_store,
                auth_config,
            },
        }
    }

    /// Run a document the way the HTTP handler does
    async fn execute(&self, query: &str, token: Option<&str>) -> Response {
        let mut headers = HeaderMap::new();
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                HeaderValue::from_str(&format!("JWT {token}")).unwrap(),
            );
        }
        let viewer =
            resolve_viewer(&headers, &self.state.auth_store, &self.state.auth_config).await;
        self.state
            .schema
            .execute(Request::new(query).data(viewer))
            .await
    }

    async fn data(&self, query: &str, token: Option<&str>) -> Json {
        let response = self.execute(query, token).await;
        assert!(response.errors.is_empty(), "{:?}", response.errors);
        response.data.into_json().unwrap()
    }

    async fn sign_up(&self, username: &str) -> String {
        let data = self
            .data(
                &format!(
                    r#"mutation {{
                        createUser(input: {{username: "{username}", password: "{PASSWORD}", email: "{username}@example.com"}}) {{
                            user {{ id }}
                        }}
                    }}"#
                ),
                None,
            )
            .await;
        data["createUser"]["user"]["id"].as_str().unwrap().to_string()
    }

    /// Sign up and return a bearer token
    async fn login(&self, username: &str) -> String {
        self.sign_up(username).await;
        let data = self
            .data(
                &format!(
                    r#"mutation {{ tokenAuth(username: "{username}", password: "{PASSWORD}") {{ token }} }}"#
                ),
                None,
            )
            .await;
        data["tokenAuth"]["token"].as_str().unwrap().to_string()
    }

    async fn create_tag(&self, token: &str, name: &str) -> String {
        let data = self
            .data(
                &format!(r#"mutation {{ createTag(input: {{name: "{name}"}}) {{ tag {{ id }} }} }}"#),
                Some(token),
            )
            .await;
        data["createTag"]["tag"]["id"].as_str().unwrap().to_string()
    }

    async fn create_blog(&self, token: &str, title: &str, tags: &[&str]) -> String {
        let data = self
            .data(
                &format!(
                    r#"mutation {{
                        createBlog(input: {{title: "{title}", content: "C", tags: {}}}) {{ blog {{ id }} }}
                    }}"#,
                    json!(tags)
                ),
                Some(token),
            )
            .await;
        data["createBlog"]["blog"]["id"].as_str().unwrap().to_string()
    }
}

fn error_code(response: &Response) -> Option<Value> {
    response
        .errors
        .first()?
        .extensions
        .as_ref()?
        .get("code")
        .cloned()
}

const BLOG_FIELDS: &str = "id title content createdAt user { username } tags { edges { node { name } } }";

// ============================================================================
// Users and tokens
// ============================================================================

#[tokio::test]
async fn test_sign_up_then_token_auth() {
    let harness = Harness::new();
    let token = harness.login("alice").await;

    let data = harness
        .data("{ loginUser { username email } }", Some(&token))
        .await;
    assert_eq!(data["loginUser"]["username"], "alice");
    assert_eq!(data["loginUser"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_token_payload() {
    let harness = Harness::new();
    harness.sign_up("alice").await;

    let data = harness
        .data(
            &format!(
                r#"mutation {{
                    tokenAuth(username: "alice", password: "{PASSWORD}") {{
                        payload {{ username exp origIat }}
                        refreshExpiresIn
                    }}
                }}"#
            ),
            None,
        )
        .await;

    let payload = &data["tokenAuth"]["payload"];
    assert_eq!(payload["username"], "alice");
    let orig_iat = payload["origIat"].as_i64().unwrap();
    assert_eq!(payload["exp"].as_i64().unwrap() - orig_iat, 300);
    assert_eq!(
        data["tokenAuth"]["refreshExpiresIn"].as_i64().unwrap() - orig_iat,
        604_800
    );
}

#[tokio::test]
async fn test_duplicate_username() {
    let harness = Harness::new();
    harness.sign_up("alice").await;

    let response = harness
        .execute(
            r#"mutation {
                createUser(input: {username: "alice", password: "another password", email: "a2@example.com"}) {
                    user { id }
                }
            }"#,
            None,
        )
        .await;
    assert_eq!(error_code(&response), Some(Value::from("ValidationError")));
}

#[tokio::test]
async fn test_wrong_password() {
    let harness = Harness::new();
    harness.sign_up("alice").await;

    let response = harness
        .execute(
            r#"mutation { tokenAuth(username: "alice", password: "nope nope nope") { token } }"#,
            None,
        )
        .await;
    assert_eq!(
        error_code(&response),
        Some(Value::from("AuthenticationError"))
    );
    assert_eq!(response.errors[0].message, "Please enter valid credentials");
}

#[tokio::test]
async fn test_login_user_requires_token() {
    let harness = Harness::new();
    let response = harness.execute("{ loginUser { username } }", None).await;
    assert_eq!(
        error_code(&response),
        Some(Value::from("AuthenticationError"))
    );
}

// ============================================================================
// Authorization gate
// ============================================================================

#[tokio::test]
async fn test_mutations_require_token() {
    let harness = Harness::new();
    let token = harness.login("alice").await;
    let tag = harness.create_tag(&token, "rust").await;
    let blog = harness.create_blog(&token, "T", &[]).await;

    let mutations = [
        r#"mutation { createTag(input: {name: "x"}) { tag { id } } }"#.to_string(),
        format!(r#"mutation {{ deleteTag(input: {{id: "{tag}"}}) {{ tag {{ id }} }} }}"#),
        r#"mutation { createBlog(input: {title: "x", content: "y"}) { blog { id } } }"#.to_string(),
        format!(r#"mutation {{ updateBlog(input: {{id: "{blog}", title: "x"}}) {{ blog {{ id }} }} }}"#),
        format!(r#"mutation {{ deleteBlog(input: {{id: "{blog}"}}) {{ blog {{ id }} }} }}"#),
    ];

    for mutation in &mutations {
        let response = harness.execute(mutation, None).await;
        assert_eq!(
            error_code(&response),
            Some(Value::from("AuthenticationError")),
            "{mutation}"
        );
    }

    // Malformed token is rejected, not treated as anonymous
    let response = harness.execute(&mutations[0], Some("garbage")).await;
    assert_eq!(
        error_code(&response),
        Some(Value::from("AuthenticationError"))
    );
    assert_eq!(response.errors[0].message, "Error decoding signature");

    // Nothing changed
    let data = harness
        .data(
            &format!(r#"{{ allTags {{ edges {{ node {{ id }} }} }} blog(id: "{blog}") {{ title }} }}"#),
            None,
        )
        .await;
    assert_eq!(data["allTags"]["edges"].as_array().unwrap().len(), 1);
    assert_eq!(data["blog"]["title"], "T");
}

// ============================================================================
// Tags
// ============================================================================

#[tokio::test]
async fn test_delete_tag_not_owner() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let bob = harness.login("bob").await;
    let tag = harness.create_tag(&alice, "rust").await;

    let response = harness
        .execute(
            &format!(r#"mutation {{ deleteTag(input: {{id: "{tag}"}}) {{ tag {{ id }} }} }}"#),
            Some(&bob),
        )
        .await;
    assert_eq!(error_code(&response), Some(Value::from("PermissionError")));

    let data = harness
        .data(&format!(r#"{{ tag(id: "{tag}") {{ name user {{ username }} }} }}"#), None)
        .await;
    assert_eq!(data["tag"]["name"], "rust");
    assert_eq!(data["tag"]["user"]["username"], "alice");
}

#[tokio::test]
async fn test_delete_tag_by_owner() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let tag = harness.create_tag(&alice, "rust").await;

    let data = harness
        .data(
            &format!(
                r#"mutation {{
                    deleteTag(input: {{id: "{tag}", clientMutationId: "m1"}}) {{ tag {{ name }} clientMutationId }}
                }}"#
            ),
            Some(&alice),
        )
        .await;
    assert_eq!(data["deleteTag"]["tag"]["name"], "rust");
    assert_eq!(data["deleteTag"]["clientMutationId"], "m1");

    let data = harness
        .data(&format!(r#"{{ tag(id: "{tag}") {{ id }} }}"#), None)
        .await;
    assert!(data["tag"].is_null());

    let response = harness
        .execute(
            &format!(r#"mutation {{ deleteTag(input: {{id: "{tag}"}}) {{ tag {{ id }} }} }}"#),
            Some(&alice),
        )
        .await;
    assert_eq!(error_code(&response), Some(Value::from("NotFoundError")));
}

#[tokio::test]
async fn test_all_tags_filter_and_pagination() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    for name in ["Rust", "trust", "go"] {
        harness.create_tag(&alice, name).await;
    }

    let data = harness
        .data(
            r#"{
                allTags(name_Icontains: "rust", first: 1) {
                    edges { cursor node { name } }
                    pageInfo { hasNextPage hasPreviousPage endCursor }
                }
            }"#,
            None,
        )
        .await;
    let connection = &data["allTags"];
    assert_eq!(connection["edges"][0]["node"]["name"], "Rust");
    assert_eq!(connection["pageInfo"]["hasNextPage"], true);
    assert_eq!(connection["pageInfo"]["hasPreviousPage"], false);

    let end_cursor = connection["pageInfo"]["endCursor"].as_str().unwrap();
    let data = harness
        .data(
            &format!(
                r#"{{ allTags(name_Icontains: "rust", after: "{end_cursor}") {{ edges {{ node {{ name }} }} pageInfo {{ hasNextPage }} }} }}"#
            ),
            None,
        )
        .await;
    let edges = data["allTags"]["edges"].as_array().unwrap();
    assert_eq!(edges.len(), 1);
    assert_eq!(edges[0]["node"]["name"], "trust");
    assert_eq!(data["allTags"]["pageInfo"]["hasNextPage"], false);
}

#[tokio::test]
async fn test_page_size_limit() {
    let harness = Harness::new();
    let response = harness
        .execute("{ allTags(first: 101) { edges { cursor } } }", None)
        .await;
    assert_eq!(error_code(&response), Some(Value::from("ValidationError")));
}

// ============================================================================
// Blogs
// ============================================================================

#[tokio::test]
async fn test_create_blog_then_fetch() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let t1 = harness.create_tag(&alice, "t1").await;
    let t2 = harness.create_tag(&alice, "t2").await;
    let blog = harness.create_blog(&alice, "T", &[&t1, &t2]).await;

    let data = harness
        .data(&format!(r#"{{ blog(id: "{blog}") {{ {BLOG_FIELDS} }} }}"#), None)
        .await;
    let node = &data["blog"];
    assert_eq!(node["id"], blog.as_str());
    assert_eq!(node["title"], "T");
    assert_eq!(node["content"], "C");
    assert_eq!(node["user"]["username"], "alice");
    assert_eq!(
        node["tags"]["edges"],
        json!([{"node": {"name": "t1"}}, {"node": {"name": "t2"}}])
    );

    // YYYY-MM-DD HH:MM:SS
    let created_at = node["createdAt"].as_str().unwrap();
    assert_eq!(created_at.len(), 19);
    assert_eq!(&created_at[10..11], " ");
}

#[tokio::test]
async fn test_create_blog_with_unknown_tag() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let missing = kernel::global_id::encode("TagNode", 999);

    let response = harness
        .execute(
            &format!(
                r#"mutation {{ createBlog(input: {{title: "T", content: "C", tags: ["{missing}"]}}) {{ blog {{ id }} }} }}"#
            ),
            Some(&alice),
        )
        .await;
    assert_eq!(error_code(&response), Some(Value::from("NotFoundError")));

    let data = harness
        .data("{ allBlogs { edges { node { id } } } }", None)
        .await;
    assert!(data["allBlogs"]["edges"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_update_blog() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let t1 = harness.create_tag(&alice, "t1").await;
    let blog = harness.create_blog(&alice, "T", &[&t1]).await;

    let data = harness
        .data(
            &format!(
                r#"mutation {{ updateBlog(input: {{id: "{blog}", content: "new"}}) {{ blog {{ {BLOG_FIELDS} }} }} }}"#
            ),
            Some(&alice),
        )
        .await;
    let node = &data["updateBlog"]["blog"];
    assert_eq!(node["title"], "T");
    assert_eq!(node["content"], "new");
    assert_eq!(node["tags"]["edges"].as_array().unwrap().len(), 1);

    let data = harness
        .data(
            &format!(
                r#"mutation {{ updateBlog(input: {{id: "{blog}", tags: []}}) {{ blog {{ {BLOG_FIELDS} }} }} }}"#
            ),
            Some(&alice),
        )
        .await;
    let node = &data["updateBlog"]["blog"];
    assert!(node["tags"]["edges"].as_array().unwrap().is_empty());
    assert_eq!(node["content"], "new");
}

#[tokio::test]
async fn test_update_and_delete_blog_not_owner() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let bob = harness.login("bob").await;
    let blog = harness.create_blog(&alice, "T", &[]).await;

    let response = harness
        .execute(
            &format!(r#"mutation {{ updateBlog(input: {{id: "{blog}", title: "mine"}}) {{ blog {{ id }} }} }}"#),
            Some(&bob),
        )
        .await;
    assert_eq!(error_code(&response), Some(Value::from("PermissionError")));

    let response = harness
        .execute(
            &format!(r#"mutation {{ deleteBlog(input: {{id: "{blog}"}}) {{ blog {{ id }} }} }}"#),
            Some(&bob),
        )
        .await;
    assert_eq!(error_code(&response), Some(Value::from("PermissionError")));

    let data = harness
        .data(&format!(r#"{{ blog(id: "{blog}") {{ title }} }}"#), None)
        .await;
    assert_eq!(data["blog"]["title"], "T");

    let data = harness
        .data(
            &format!(r#"mutation {{ deleteBlog(input: {{id: "{blog}"}}) {{ blog {{ title }} }} }}"#),
            Some(&alice),
        )
        .await;
    assert_eq!(data["deleteBlog"]["blog"]["title"], "T");
}

#[tokio::test]
async fn test_all_blogs_order_and_filter() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let bob = harness.login("Bobby").await;
    harness.create_blog(&alice, "a1", &[]).await;
    harness.create_blog(&bob, "b1", &[]).await;
    harness.create_blog(&alice, "a2", &[]).await;

    let data = harness
        .data(
            r#"{ allBlogs(orderBy: "-created_at") { edges { node { title createdAt } } } }"#,
            None,
        )
        .await;
    let created: Vec<&str> = data["allBlogs"]["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["createdAt"].as_str().unwrap())
        .collect();
    assert_eq!(created.len(), 3);
    assert!(created.windows(2).all(|w| w[0] >= w[1]));

    let data = harness
        .data(
            r#"{ allBlogs(user_Username_Icontains: "BOB") { edges { node { title } } } }"#,
            None,
        )
        .await;
    assert_eq!(
        data["allBlogs"]["edges"],
        json!([{"node": {"title": "b1"}}])
    );

    let response = harness
        .execute(r#"{ allBlogs(orderBy: "title") { edges { cursor } } }"#, None)
        .await;
    assert_eq!(error_code(&response), Some(Value::from("ValidationError")));
}

fn titles(connection: &Json) -> Vec<&str> {
    connection["edges"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["node"]["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_all_blogs_first_order_key_wins() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    for title in ["a1", "a2", "a3"] {
        harness.create_blog(&alice, title, &[]).await;
    }

    let data = harness
        .data(
            r#"{
                desc: allBlogs(orderBy: "-created_at,created_at") { edges { node { title } } }
                asc: allBlogs(orderBy: "created_at, -created_at") { edges { node { title } } }
            }"#,
            None,
        )
        .await;
    assert_eq!(titles(&data["desc"]), ["a3", "a2", "a1"]);
    assert_eq!(titles(&data["asc"]), ["a1", "a2", "a3"]);

    let response = harness
        .execute(r#"{ allBlogs(orderBy: "-created_at,title") { edges { cursor } } }"#, None)
        .await;
    assert_eq!(error_code(&response), Some(Value::from("ValidationError")));
}

#[tokio::test]
async fn test_all_blogs_resolves_owners_and_tags() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let bob = harness.login("bob").await;
    let rust = harness.create_tag(&alice, "Rust").await;
    let web = harness.create_tag(&alice, "web").await;
    let go = harness.create_tag(&bob, "go").await;
    harness.create_blog(&alice, "a1", &[&rust, &web]).await;
    harness.create_blog(&bob, "b1", &[&go, &rust]).await;
    harness.create_blog(&alice, "a2", &[]).await;

    let data = harness
        .data(
            r#"{ allBlogs {
                edges { node {
                    title
                    user { username }
                    tags { edges { node { name user { username } } } }
                    rustOnly: tags(name_Icontains: "RUST") { edges { node { name } } }
                } }
            } }"#,
            None,
        )
        .await;

    let edges = data["allBlogs"]["edges"].as_array().unwrap();
    let summary: Vec<(String, String, Vec<String>)> = edges
        .iter()
        .map(|e| {
            let node = &e["node"];
            let tags = node["tags"]["edges"]
                .as_array()
                .unwrap()
                .iter()
                .map(|t| {
                    format!(
                        "{}@{}",
                        t["node"]["name"].as_str().unwrap(),
                        t["node"]["user"]["username"].as_str().unwrap()
                    )
                })
                .collect();
            (
                node["title"].as_str().unwrap().to_string(),
                node["user"]["username"].as_str().unwrap().to_string(),
                tags,
            )
        })
        .collect();

    assert_eq!(
        summary,
        vec![
            (
                "a1".to_string(),
                "alice".to_string(),
                vec!["Rust@alice".to_string(), "web@alice".to_string()]
            ),
            (
                "b1".to_string(),
                "bob".to_string(),
                vec!["Rust@alice".to_string(), "go@bob".to_string()]
            ),
            ("a2".to_string(), "alice".to_string(), vec![]),
        ]
    );
    assert_eq!(
        edges[1]["node"]["rustOnly"]["edges"],
        json!([{"node": {"name": "Rust"}}])
    );

    let data = harness
        .data(
            "{ allBlogs(last: 2) { pageInfo { hasPreviousPage } edges { node { title } } } }",
            None,
        )
        .await;
    assert_eq!(titles(&data["allBlogs"]), ["b1", "a2"]);
    assert_eq!(data["allBlogs"]["pageInfo"]["hasPreviousPage"], true);
}

// ============================================================================
// Global ids
// ============================================================================

#[tokio::test]
async fn test_wrong_id_type() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let tag = harness.create_tag(&alice, "rust").await;

    let response = harness
        .execute(&format!(r#"{{ blog(id: "{tag}") {{ id }} }}"#), None)
        .await;
    assert_eq!(error_code(&response), Some(Value::from("ValidationError")));
    assert_eq!(response.errors[0].message, "Must receive a BlogNode id");

    let response = harness
        .execute(r#"{ tag(id: "not-a-global-id") { id } }"#, None)
        .await;
    assert_eq!(error_code(&response), Some(Value::from("ValidationError")));

    let user = harness.sign_up("bob").await;
    let response = harness
        .execute(&format!(r#"{{ tag(id: "{user}") {{ id }} }}"#), None)
        .await;
    assert_eq!(error_code(&response), Some(Value::from("ValidationError")));
    assert_eq!(response.errors[0].message, "Must receive a TagNode id");
}

#[tokio::test]
async fn test_node_lookup() {
    let harness = Harness::new();
    let user_id = harness.sign_up("alice").await;

    let data = harness
        .data(
            &format!(r#"{{ node(id: "{user_id}") {{ __typename id ... on UserNode {{ username }} }} }}"#),
            None,
        )
        .await;
    assert_eq!(data["node"]["__typename"], "UserNode");
    assert_eq!(data["node"]["id"], user_id.as_str());
    assert_eq!(data["node"]["username"], "alice");

    let missing = kernel::global_id::encode("BlogNode", 7);
    let data = harness
        .data(&format!(r#"{{ node(id: "{missing}") {{ id }} }}"#), None)
        .await;
    assert!(data["node"].is_null());
}

#[tokio::test]
async fn test_node_lookup_tag_and_blog() {
    let harness = Harness::new();
    let alice = harness.login("alice").await;
    let tag = harness.create_tag(&alice, "rust").await;
    let blog = harness.create_blog(&alice, "T", &[&tag]).await;

    let data = harness
        .data(
            &format!(
                r#"{{
                    t: node(id: "{tag}") {{ __typename id ... on TagNode {{ name user {{ username }} }} }}
                    b: node(id: "{blog}") {{ __typename id ... on BlogNode {{ title }} }}
                }}"#
            ),
            None,
        )
        .await;
    assert_eq!(data["t"]["__typename"], "TagNode");
    assert_eq!(data["t"]["id"], tag.as_str());
    assert_eq!(data["t"]["user"]["username"], "alice");
    assert_eq!(data["b"]["__typename"], "BlogNode");
    assert_eq!(data["b"]["id"], blog.as_str());
    assert_eq!(data["b"]["title"], "T");
}

// ============================================================================
// HTTP
// ============================================================================

#[tokio::test]
async fn test_health_route() {
    let harness = Harness::new();
    let app = crate::app(harness.state, &[]);

    let response = app
        .oneshot(HttpRequest::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_route() {
    let harness = Harness::new();
    let app = crate::app(harness.state, &[]);

    let response = app
        .oneshot(HttpRequest::get("/missing").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Json = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["status"], 404);
}

#[tokio::test]
async fn test_graphql_route_reads_authorization_header() {
    let harness = Harness::new();
    let token = harness.login("alice").await;
    let app = crate::app(harness.state, &[]);

    let body = json!({ "query": "{ loginUser { username } }" }).to_string();
    let request = HttpRequest::post("/graphql")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Json = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["data"]["loginUser"]["username"], "alice");
}
