use actix_web::{get, web, HttpResponse};

use crate::app_state::AppState;

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/health/ready")]
async fn health_check_ready(state: web::Data<AppState>) -> HttpResponse {
    let db_health = state.health.ping().await;

    let status = if db_health.is_ok() {
        "ready"
    } else {
        "not_ready"
    };

    let response = serde_json::json!({
        "status": status,
        "version": env!("CARGO_PKG_VERSION"),
        "dependencies": {
            "mongodb": if db_health.is_ok() { "ok" } else { "error" }
        }
    });

    if let Err(err) = db_health {
        log::warn!("Readiness check failed: {}", err);
        return HttpResponse::ServiceUnavailable().json(response);
    }
    HttpResponse::Ok().json(response)
}

#[get("/health/live")]
async fn health_check_live() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::tests::{test_state, FailingProbe};
    use actix_web::{http::StatusCode, test, App};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().service(health_check)).await;

        let req = test::TestRequest::get().uri("/health").to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
    }

    #[actix_web::test]
    async fn test_ready_when_store_answers() {
        let (state, _) = test_state();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check_ready),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ready");
        assert_eq!(body["dependencies"]["mongodb"], "ok");
    }

    #[actix_web::test]
    async fn test_not_ready_when_store_is_down() {
        let (mut state, _) = test_state();
        state.health = Arc::new(FailingProbe);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(health_check_ready),
        )
        .await;

        let req = test::TestRequest::get().uri("/health/ready").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
