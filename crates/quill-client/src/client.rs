use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use quill_core::domain::Category;
use quill_shared::dto::{
    AuthResponse, CreateCategoryRequest, CreateCommentRequest, CreatePostRequest, ListPostsQuery,
    LoginRequest, PostListResponse, PostResponse, RegisterUserRequest, UpdateCategoryRequest,
    UpdatePostRequest,
};
use quill_shared::{DeleteResponse, ErrorResponse};

use crate::error::ClientError;

/// Entry point of the client facade. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured `reqwest` client (timeouts, proxies, ...).
    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi { client: self }
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi { client: self }
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str::<ErrorResponse>(&text).unwrap_or_else(|_| {
        let message = if text.is_empty() {
            status.canonical_reason().unwrap_or("Request failed").to_string()
        } else {
            text
        };
        ErrorResponse::new(message)
    });

    tracing::debug!(status = status.as_u16(), message = %body.message, "API call failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        body,
    })
}

/// `/api/posts` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct PostsApi<'a> {
    client: &'a ApiClient,
}

impl PostsApi<'_> {
    pub async fn list(&self, query: &ListPostsQuery) -> Result<PostListResponse, ClientError> {
        let request = self.client.request(Method::GET, "/api/posts").query(query);
        self.client.send(request).await
    }

    /// Fetch one post. The server counts this as a view.
    pub async fn get_by_id(&self, id: Uuid) -> Result<PostResponse, ClientError> {
        let request = self.client.request(Method::GET, &format!("/api/posts/{id}"));
        self.client.send(request).await
    }

    pub async fn create(&self, payload: &CreatePostRequest) -> Result<PostResponse, ClientError> {
        let request = self.client.request(Method::POST, "/api/posts").json(payload);
        self.client.send(request).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdatePostRequest,
    ) -> Result<PostResponse, ClientError> {
        let request = self
            .client
            .request(Method::PUT, &format!("/api/posts/{id}"))
            .json(payload);
        self.client.send(request).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<DeleteResponse, ClientError> {
        let request = self.client.request(Method::DELETE, &format!("/api/posts/{id}"));
        self.client.send(request).await
    }

    pub async fn add_comment(
        &self,
        id: Uuid,
        payload: &CreateCommentRequest,
    ) -> Result<PostResponse, ClientError> {
        let request = self
            .client
            .request(Method::POST, &format!("/api/posts/{id}/comments"))
            .json(payload);
        self.client.send(request).await
    }

    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
    ) -> Result<PostResponse, ClientError> {
        let path = format!("/api/posts/{post_id}/comments/{comment_id}");
        let request = self.client.request(Method::DELETE, &path);
        self.client.send(request).await
    }

    pub async fn like(&self, id: Uuid) -> Result<PostResponse, ClientError> {
        let request = self
            .client
            .request(Method::POST, &format!("/api/posts/{id}/like"));
        self.client.send(request).await
    }
}

/// `/api/categories` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct CategoriesApi<'a> {
    client: &'a ApiClient,
}

impl CategoriesApi<'_> {
    pub async fn list(&self) -> Result<Vec<Category>, ClientError> {
        let request = self.client.request(Method::GET, "/api/categories");
        self.client.send(request).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Category, ClientError> {
        let request = self
            .client
            .request(Method::GET, &format!("/api/categories/{id}"));
        self.client.send(request).await
    }

    pub async fn create(&self, payload: &CreateCategoryRequest) -> Result<Category, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/api/categories")
            .json(payload);
        self.client.send(request).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        payload: &UpdateCategoryRequest,
    ) -> Result<Category, ClientError> {
        let request = self
            .client
            .request(Method::PUT, &format!("/api/categories/{id}"))
            .json(payload);
        self.client.send(request).await
    }

    pub async fn remove(&self, id: Uuid) -> Result<DeleteResponse, ClientError> {
        let request = self
            .client
            .request(Method::DELETE, &format!("/api/categories/{id}"));
        self.client.send(request).await
    }
}

/// `/api/auth` endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl AuthApi<'_> {
    pub async fn register(&self, payload: &RegisterUserRequest) -> Result<AuthResponse, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/api/auth/register")
            .json(payload);
        self.client.send(request).await
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let request = self
            .client
            .request(Method::POST, "/api/auth/login")
            .json(payload);
        self.client.send(request).await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use quill_core::domain::PostStatus;

    use super::*;

    fn post_json(id: Uuid, likes: u64) -> serde_json::Value {
        let now = Utc::now();
        json!({
            "_id": id,
            "userId": "user_1",
            "userName": "Ada",
            "title": "Hello world",
            "content": "Some long enough content",
            "excerpt": "Some long enough content...",
            "featuredImage": "",
            "categories": [],
            "tags": ["rust"],
            "status": "published",
            "comments": [],
            "likes": likes,
            "views": 0,
            "createdAt": now,
            "updatedAt": now,
        })
    }

    #[tokio::test]
    async fn test_list_sends_filters_as_query() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path("/api/posts"))
            .and(query_param("status", "draft"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "posts": [post_json(id, 0)],
                "pagination": { "page": 2, "limit": 10, "total": 11, "pages": 2 }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = ApiClient::new(format!("{}/", server.uri()));
        let query = ListPostsQuery {
            status: Some(PostStatus::Draft),
            page: Some("2".into()),
            ..Default::default()
        };

        let result = api.posts().list(&query).await.unwrap();
        assert_eq!(result.posts.len(), 1);
        assert_eq!(result.posts[0].id, id);
        assert_eq!(result.pagination.pages, 2);
    }

    #[tokio::test]
    async fn test_create_posts_json_body() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("POST"))
            .and(path("/api/posts"))
            .and(body_json(json!({
                "userId": "user_1",
                "userName": "Ada",
                "title": "Hello world",
                "content": "Some long enough content",
                "categories": [],
                "tags": ["rust"],
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(post_json(id, 0)))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let payload = CreatePostRequest {
            user_id: Some("user_1".into()),
            user_name: Some("Ada".into()),
            title: "Hello world".into(),
            content: "Some long enough content".into(),
            tags: vec!["rust".into()],
            ..Default::default()
        };

        let post = api.posts().create(&payload).await.unwrap();
        assert_eq!(post.id, id);
        assert_eq!(post.tags, vec!["rust".to_string()]);
    }

    #[tokio::test]
    async fn test_like_and_delete_comment_paths() {
        let server = MockServer::start().await;
        let post_id = Uuid::new_v4();
        let comment_id = Uuid::new_v4();

        Mock::given(method("POST"))
            .and(path(format!("/api/posts/{post_id}/like")))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json(post_id, 3)))
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path(format!("/api/posts/{post_id}/comments/{comment_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(post_json(post_id, 3)))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        assert_eq!(api.posts().like(post_id).await.unwrap().likes, 3);
        let post = api.posts().delete_comment(post_id, comment_id).await.unwrap();
        assert!(post.comments.is_empty());
    }

    #[tokio::test]
    async fn test_error_body_is_decoded() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();

        Mock::given(method("GET"))
            .and(path(format!("/api/posts/{id}")))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "message": "Post not found" })),
            )
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let err = api.posts().get_by_id(id).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        match err {
            ClientError::Api { body, .. } => assert_eq!(body.message, "Post not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_validation_errors_carry_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "Validation failed",
                "errors": [{ "field": "name", "location": "body", "message": "Name is required" }]
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let err = api
            .categories()
            .create(&CreateCategoryRequest::default())
            .await
            .unwrap_err();

        let ClientError::Api { status, body } = err else {
            panic!("expected an API error");
        };
        assert_eq!(status, 400);
        assert_eq!(body.errors[0].field, "name");
    }

    #[tokio::test]
    async fn test_non_json_error_falls_back_to_text() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let err = api.auth().login(&LoginRequest::default()).await.unwrap_err();

        let ClientError::Api { status, body } = err else {
            panic!("expected an API error");
        };
        assert_eq!(status, 502);
        assert_eq!(body.message, "upstream down");
    }

    #[tokio::test]
    async fn test_register_returns_token() {
        let server = MockServer::start().await;
        let user_id = Uuid::new_v4();

        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "User registered successfully",
                "token": "header.payload.signature",
                "user": {
                    "id": user_id,
                    "username": "ada",
                    "email": "ada@example.com",
                    "firstName": null,
                    "lastName": null
                }
            })))
            .mount(&server)
            .await;

        let api = ApiClient::new(server.uri());
        let payload = RegisterUserRequest {
            username: "ada".into(),
            email: "ada@example.com".into(),
            password: "secret1".into(),
            ..Default::default()
        };

        let response = api.auth().register(&payload).await.unwrap();
        assert_eq!(response.user.id, user_id);
        assert_eq!(response.token, "header.payload.signature");
    }
}
