mod common;

use axum::{Router, extract::ConnectInfo, routing::get};
use axum::http::StatusCode;
use axum_test::TestServer;
use sqlx::PgPool;
use std::net::SocketAddr;
use tower::Layer;
use link_shortener::api::handlers::redirect_handler;

#[derive(Clone)]
struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

fn make_server(pool: PgPool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/{token}", get(redirect_handler))
        .layer(MockConnectInfoLayer)
        .with_state(state);
    TestServer::new(app).unwrap()
}

async fn last_visit(pool: &PgPool, link_id: i64) -> (Option<String>, Option<String>) {
    sqlx::query_as::<_, (Option<String>, Option<String>)>(
        "SELECT referrer, remote_address FROM visits WHERE link_id = $1 ORDER BY id DESC LIMIT 1",
    )
    .bind(link_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: PgPool) {
    common::create_test_link(&pool, "Target", "https://example.com/target", "redir").await;
    let server = make_server(pool);

    let response = server.get("/redir").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[sqlx::test]
async fn test_redirect_not_found(pool: PgPool) {
    let server = make_server(pool);

    let response = server.get("/notfound").await;

    response.assert_status_not_found();
}

#[sqlx::test]
async fn test_redirect_records_visit(pool: PgPool) {
    let id = common::create_test_link(&pool, "Track", "https://example.com", "track").await;
    let server = make_server(pool.clone());

    for _ in 0..3 {
        server
            .get("/track")
            .await
            .assert_status(StatusCode::MOVED_PERMANENTLY);
    }

    assert_eq!(common::count_visits(&pool, id).await, 3);
    let (referrer, remote_address) = last_visit(&pool, id).await;
    assert_eq!(referrer, None);
    assert_eq!(remote_address.as_deref(), Some("127.0.0.1"));
}

#[sqlx::test]
async fn test_redirect_records_referrer(pool: PgPool) {
    let id = common::create_test_link(&pool, "Track", "https://example.com", "refer").await;
    let server = make_server(pool.clone());

    server
        .get("/refer")
        .add_header("Referer", "https://google.com")
        .await
        .assert_status(StatusCode::MOVED_PERMANENTLY);

    let (referrer, _) = last_visit(&pool, id).await;
    assert_eq!(referrer.as_deref(), Some("https://google.com"));
}

#[sqlx::test]
async fn test_unknown_token_records_nothing(pool: PgPool) {
    let id = common::create_test_link(&pool, "Quiet", "https://example.com", "quiet").await;
    let server = make_server(pool.clone());

    server.get("/quiet2").await.assert_status_not_found();

    assert_eq!(common::count_visits(&pool, id).await, 0);
}

#[sqlx::test]
async fn test_unservable_destination_records_nothing(pool: PgPool) {
    let id = common::create_test_link(&pool, "Broken", "https://example.com/a\nb", "brkn1").await;
    let server = make_server(pool.clone());

    server
        .get("/brkn1")
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(common::count_visits(&pool, id).await, 0);
}

#[sqlx::test]
async fn test_created_link_with_control_characters_redirects(pool: PgPool) {
    let state = common::create_test_state(pool.clone());
    let link = state
        .link_service
        .create_link(
            "Cafe".to_string(),
            "https://example.com/a\nb".to_string(),
            Some("cafe1".to_string()),
        )
        .await
        .unwrap();
    assert_eq!(link.destination, "https://example.com/ab");

    let server = make_server(pool.clone());
    let response = server.get("/cafe1").await;

    response.assert_status(StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.header("location"), "https://example.com/ab");
    assert_eq!(common::count_visits(&pool, link.id).await, 1);
}
