use std::net::SocketAddr;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::state::AppState;
use crate::{children, coupons, foods, menus, orders};

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .nest(
            "/api/v1",
            Router::new()
                .merge(foods::router())
                .merge(menus::router())
                .merge(children::router())
                .merge(coupons::router())
                .merge(orders::router())
                .route("/health", get(|| async { "ok" })),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|req: &axum::http::Request<_>| {
                    let method = req.method().clone();
                    let uri = req.uri().clone();
                    tracing::info_span!("http_request", %method, uri = %uri)
                })
                .on_response(
                    |res: &axum::http::Response<_>,
                     _latency: std::time::Duration,
                     span: &tracing::Span| {
                        let status = res.status();
                        span.record("status", tracing::field::display(status));
                        if status.is_server_error() {
                            tracing::error!(%status, "response");
                        } else {
                            tracing::info!(%status, "response");
                        }
                    },
                ),
        )
}

pub async fn serve(app: Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::FromRef;
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::foods::services::FoodCatalog;
    use crate::menus::services::MenuCatalog;

    async fn seeded_state() -> AppState {
        let state = AppState::fake();
        FoodCatalog::from_ref(&state).seed_catalog().await.unwrap();
        MenuCatalog::from_ref(&state)
            .seed_week(time::macros::date!(2024 - 06 - 12))
            .await
            .unwrap();
        state
    }

    async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let app = build_app(AppState::fake());
        let res = app
            .oneshot(Request::get("/api/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn weekly_menu_endpoint() {
        let app = build_app(seeded_state().await);

        let (status, body) = call(&app, Method::GET, "/api/v1/menus/weekly?date=2024-06-12", None).await;
        assert_eq!(status, StatusCode::OK);
        let menus = body.as_array().unwrap();
        assert_eq!(menus.len(), 10);
        assert_eq!(menus[0]["date"], "2024-06-10");
        assert_eq!(menus[0]["day_of_week"], "Понеделник");

        let (status, body) = call(&app, Method::GET, "/api/v1/menus/weekly?date=2024-06-19", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");

        let (status, body) = call(&app, Method::GET, "/api/v1/menus/by-date/12-06-2024", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");

        let (status, body) = call(&app, Method::GET, "/api/v1/menus/by-date/2024-06-13/young", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["day_of_week"], "Четвъртък");
        assert_eq!(body["age_group_name"], "YOUNG");
    }

    #[tokio::test]
    async fn order_flow_over_http() {
        let app = build_app(seeded_state().await);

        let (status, _) = call(
            &app,
            Method::POST,
            "/api/v1/children",
            Some(json!({ "guardian_email": "mum@example.com", "full_name": "Ivan Petrov", "age_group": "young" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/coupons",
            Some(json!({ "guardian_email": "mum@example.com", "child_name": "Ivan Petrov", "count": 1 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], 1);

        let order = json!({
            "date": "2024-06-12",
            "service_point": "Kindergarten No. 5",
            "guardian_email": "mum@example.com",
            "child_full_name": "Ivan Petrov"
        });
        let (status, body) = call(&app, Method::POST, "/api/v1/admin/orders", Some(order)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["remaining_coupons"], 0);
        assert_eq!(body["menu"]["day_of_week"], "Сряда");

        let next = json!({
            "date": "2024-06-13",
            "service_point": "Kindergarten No. 5",
            "guardian_email": "mum@example.com",
            "child_full_name": "Ivan Petrov"
        });
        let (status, body) = call(&app, Method::POST, "/api/v1/admin/orders", Some(next)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "no_available_coupons");

        let (status, body) = call(&app, Method::GET, "/api/v1/admin/orders?date=2024-06-12", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (status, body) = call(&app, Method::DELETE, "/api/v1/admin/orders", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 0);

        let (status, body) = call(
            &app,
            Method::DELETE,
            "/api/v1/admin/orders",
            Some(json!({ "date": "2024-06-12", "child_name": "Ivan Petrov" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["deleted"], 1);

        let (_, body) = call(
            &app,
            Method::GET,
            "/api/v1/coupons?guardian_email=mum@example.com&child_name=Ivan%20Petrov",
            None,
        )
        .await;
        assert_eq!(body["balance"], 0);
    }

    #[tokio::test]
    async fn purchase_with_non_positive_count_is_bad_request() {
        let app = build_app(AppState::fake());
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/coupons",
            Some(json!({ "guardian_email": "mum@example.com", "child_name": "Ivan Petrov", "count": 0 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }
}
