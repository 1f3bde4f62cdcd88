// Each integration test target compiles this module separately and uses a
// different slice of it.
#![allow(dead_code)]

pub mod assertions;
pub mod builders;
pub mod shared;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use futures::FutureExt as _;
use gamearchive::{api::create_router, AppState, Config};
use sqlx::Connection as _;
use tower::ServiceExt as _;
use url::Url;
use uuid::Uuid;

// Re-export commonly used items
#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use builders::*;

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    schema: String,
    admin_database_url: String,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let shared = shared::shared().await?;
        let mut config = shared.base_config.clone();
        configure(&mut config);

        // Per-test schema and DB pool.
        let admin_database_url = config.database.url.clone();

        let schema = format!("test_{}", Uuid::new_v4().simple());
        let mut admin_conn = sqlx::PgConnection::connect(&admin_database_url)
            .await
            .context("connect admin db for schema create")?;
        sqlx::query(&format!(r#"CREATE SCHEMA "{}""#, schema))
            .execute(&mut admin_conn)
            .await
            .context("create test schema")?;

        config.database.url = with_search_path(&admin_database_url, &schema)?;
        config.database.pool_min_size = 0;
        // Keep per-test DB pools small to avoid exhausting Postgres connections
        // when tests run in parallel (each test creates its own pool + schema).
        config.database.pool_max_size = 2;
        config.database.run_migrations = true;

        let state = AppState::new(config).await.context("initialize AppState")?;
        let router = create_router(state.clone());

        Ok(Self {
            router,
            state,
            schema,
            admin_database_url,
        })
    }

    pub async fn cleanup(self) -> anyhow::Result<()> {
        self.state.db_pool.close().await;

        let mut admin_conn = sqlx::PgConnection::connect(&self.admin_database_url)
            .await
            .context("connect admin db for schema drop")?;
        sqlx::query(&format!(r#"DROP SCHEMA "{}" CASCADE"#, self.schema))
            .execute(&mut admin_conn)
            .await
            .context("drop test schema")?;

        Ok(())
    }

    /// Insert age groups the filter tests rely on.
    pub async fn seed_age_groups(&self) -> anyhow::Result<()> {
        let rows: [(&str, Option<i32>, Option<i32>); 3] = [
            ("kids", Some(5), Some(9)),
            ("teens", Some(13), Some(17)),
            ("adults", Some(18), None),
        ];
        for (name, min_age, max_age) in rows {
            sqlx::query(
                "INSERT INTO age_groups (name, min_age, max_age) VALUES ($1, $2, $3) ON CONFLICT (name) DO NOTHING",
            )
            .bind(name)
            .bind(min_age)
            .bind(max_age)
            .execute(&self.state.db_pool)
            .await
            .context("seed age groups")?;
        }
        Ok(())
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(method, path_and_query, body, &[])
            .await
    }

    /// Request with the gateway identity header set.
    pub async fn request_as(
        &self,
        username: &str,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        self.request_with_extra_headers(
            method,
            path_and_query,
            body,
            &[("x-archive-user", username)],
        )
        .await
    }

    pub async fn request_with_extra_headers(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
        extra_headers: &[(&str, &str)],
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .context("build request")?;

        let mut request = request;
        for (name, value) in extra_headers {
            request.headers_mut().insert(
                name.parse::<HeaderName>().context("parse header name")?,
                value.parse::<HeaderValue>().context("parse header value")?,
            );
        }

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }
}

pub async fn with_test_app<F>(f: F) -> anyhow::Result<()>
where
    F: for<'a> FnOnce(
        &'a TestApp,
    )
        -> std::pin::Pin<Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>>,
{
    with_configured_app(|_| {}, f).await
}

/// Like [`with_test_app`], but lets the test adjust the configuration before
/// the application starts.
pub async fn with_configured_app<C, F>(configure: C, f: F) -> anyhow::Result<()>
where
    C: FnOnce(&mut Config),
    F: for<'a> FnOnce(
        &'a TestApp,
    )
        -> std::pin::Pin<Box<dyn std::future::Future<Output = anyhow::Result<()>> + 'a>>,
{
    let app = TestApp::new_with_config(configure).await?;

    let result = std::panic::AssertUnwindSafe(f(&app)).catch_unwind().await;
    let cleanup_result = app.cleanup().await;

    if let Err(e) = cleanup_result {
        eprintln!("test schema cleanup failed: {e:?}");
    }

    match result {
        Ok(r) => r,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}

/// Router over a lazily-connecting pool. Nothing touches the database until a
/// query runs, so this works for tests that only exercise request validation.
pub async fn validation_router() -> anyhow::Result<Router> {
    let mut config = Config::load().context("load Config for tests")?;
    config.database.run_migrations = false;
    let state = AppState::new(config)
        .await
        .context("initialize AppState without a database")?;
    Ok(create_router(state))
}

/// Dispatch a request against a standalone router.
pub async fn oneshot(
    router: &Router,
    method: Method,
    path_and_query: &str,
    body: Option<Bytes>,
    extra_headers: &[(&str, &str)],
) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
    let mut request = Request::builder()
        .method(method)
        .uri(path_and_query)
        .header("host", "example.org")
        .header("content-type", "application/json")
        .body(match body {
            Some(bytes) => Body::from(bytes),
            None => Body::empty(),
        })
        .context("build request")?;

    for (name, value) in extra_headers {
        request.headers_mut().insert(
            name.parse::<HeaderName>().context("parse header name")?,
            value.parse::<HeaderValue>().context("parse header value")?,
        );
    }

    let response = router
        .clone()
        .oneshot(request)
        .await
        .context("dispatch request")?;

    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .context("read response body")?;

    Ok((status, headers, body))
}

fn with_search_path(database_url: &str, schema: &str) -> anyhow::Result<String> {
    let mut url = Url::parse(database_url).context("parse database URL")?;
    url.query_pairs_mut()
        .append_pair("options", &format!("-c search_path={}", schema));
    Ok(url.to_string())
}
