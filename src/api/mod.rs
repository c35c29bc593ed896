// ============================================================================
// API Layer - HTTP transport over OrderService
// ============================================================================
//
// Decodes requests, calls one service operation, and maps the outcome to a
// status code and JSON envelope. No business rules live here.
//
// ============================================================================

mod handlers;
mod response;
mod routes;

pub use handlers::AppState;
pub use response::{ApiError, Envelope};
pub use routes::configure;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderService;
    use crate::metrics::Metrics;
    use crate::persistence::InMemoryOrderRepository;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn state() -> AppState {
        let service = OrderService::new(Arc::new(InMemoryOrderRepository::new()));
        AppState::new(service, Arc::new(Metrics::new().unwrap()))
    }

    #[actix_web::test]
    async fn test_create_then_get() {
        let app = test::init_service(App::new().configure(configure(state()))).await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({"id": "o1", "orderId": "X1", "customerId": "C1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "NEW");

        let req = test::TestRequest::get().uri("/api/orders/o1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["orderId"], "X1");
        assert_eq!(body["data"]["customerId"], "C1");
    }

    #[actix_web::test]
    async fn test_error_kinds_map_to_status_codes() {
        let app = test::init_service(App::new().configure(configure(state()))).await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({"id": "o1"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::get().uri("/api/orders/missing").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "order not found");

        let create = json!({"id": "o1", "orderId": "X1", "customerId": "C1"});
        for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
            let req = test::TestRequest::post()
                .uri("/api/orders")
                .set_json(&create)
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), expected);
        }
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let app = test::init_service(App::new().configure(configure(state()))).await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({"id": "o1", "orderId": "X1", "customerId": "C1", "status": "LOST"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Error parsing request");
    }

    #[actix_web::test]
    async fn test_update_uses_path_id_and_delete_hides_order() {
        let app = test::init_service(App::new().configure(configure(state()))).await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({"id": "o1", "orderId": "X1", "customerId": "C1"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/orders/o1")
            .set_json(json!({"id": "ignored", "status": "SHIPPED"}))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["data"]["id"], "o1");
        assert_eq!(body["data"]["status"], "SHIPPED");
        assert_eq!(body["data"]["orderId"], "X1");

        let req = test::TestRequest::delete().uri("/api/orders/o1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/api/orders").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 0);

        let req = test::TestRequest::delete().uri("/api/orders/o1").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_blank_status_is_treated_as_unset() {
        let app = test::init_service(App::new().configure(configure(state()))).await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({"id": "o1", "orderId": "X1", "customerId": "C1", "status": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "NEW");

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({"id": "o2", "orderId": "X2", "customerId": "C2", "status": "PENDING"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/orders/o2")
            .set_json(json!({"customerId": "C9", "status": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["customerId"], "C9");
        assert_eq!(body["data"]["status"], "PENDING");
    }

    #[actix_web::test]
    async fn test_update_counts_once_in_metrics() {
        let state = state();
        let metrics = state.metrics.clone();
        let app = test::init_service(App::new().configure(configure(state))).await;

        let req = test::TestRequest::post()
            .uri("/api/orders")
            .set_json(json!({"id": "o1", "orderId": "X1", "customerId": "C1"}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::put()
            .uri("/api/orders/o1")
            .set_json(json!({"status": "SHIPPED"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let count = |operation: &str| {
            metrics
                .operations_total
                .with_label_values(&[operation, "ok"])
                .get()
        };
        assert_eq!(count("update_order"), 1);
        assert_eq!(count("get_order_by_id"), 0);
    }

    #[actix_web::test]
    async fn test_status_route_filters() {
        let app = test::init_service(App::new().configure(configure(state()))).await;

        for (id, status) in [("a", "NEW"), ("b", "NEW"), ("c", "SHIPPED")] {
            let req = test::TestRequest::post()
                .uri("/api/orders")
                .set_json(json!({"id": id, "orderId": "X", "customerId": "C", "status": status}))
                .to_request();
            test::call_service(&app, req).await;
        }

        let req = test::TestRequest::get().uri("/api/orders/status/NEW").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 2);

        let req = test::TestRequest::get().uri("/api/orders/status/bogus").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["count"], 0);
    }

    #[actix_web::test]
    async fn test_health_and_metrics() {
        let app = test::init_service(App::new().configure(configure(state()))).await;

        let req = test::TestRequest::get().uri("/api/orders").to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");

        let req = test::TestRequest::get().uri("/metrics").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("order_operations_total"));
    }
}
