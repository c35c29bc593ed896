use actix_web::{web, HttpResponse};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use super::response::{outcome, ApiError, Envelope};
use crate::domain::order::{NewOrder, OrderError, OrderService, OrderUpdate};
use crate::metrics::Metrics;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: OrderService,
    pub metrics: Arc<Metrics>,
}

impl AppState {
    pub fn new(service: OrderService, metrics: Arc<Metrics>) -> Self {
        Self { service, metrics }
    }

    async fn timed<T, F>(&self, operation: &'static str, call: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, OrderError>>,
    {
        let started = Instant::now();
        let result = call.await;

        let label = match &result {
            Ok(_) => "ok",
            Err(err) => outcome(err),
        };
        self.metrics.record(operation, label, started.elapsed());

        result.map_err(ApiError)
    }
}

// GET /api/orders
pub async fn get_all_orders(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let orders = state
        .timed("get_all_orders", state.service.get_all_orders())
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::list("Orders fetched successfully", orders)))
}

// GET /api/orders/{id}
pub async fn get_order(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let order = state
        .timed("get_order_by_id", state.service.get_order_by_id(&id))
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::data("Order fetched successfully", order)))
}

// GET /api/orders/status/{status}
pub async fn get_orders_by_status(
    state: web::Data<AppState>,
    status: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let orders = state
        .timed("get_orders_by_status", state.service.get_orders_by_status(&status))
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::list("Orders fetched successfully", orders)))
}

// POST /api/orders
pub async fn create_order(
    state: web::Data<AppState>,
    body: web::Json<NewOrder>,
) -> Result<HttpResponse, ApiError> {
    let order = state
        .timed("create_order", state.service.create_order(body.into_inner()))
        .await?;
    Ok(HttpResponse::Created().json(Envelope::data("Order created successfully", order)))
}

// PUT /api/orders/{id}
pub async fn update_order(
    state: web::Data<AppState>,
    id: web::Path<String>,
    body: web::Json<OrderUpdate>,
) -> Result<HttpResponse, ApiError> {
    let mut update = body.into_inner();
    update.id = id.into_inner();

    let id = update.id.clone();
    state
        .timed("update_order", state.service.update_order(update))
        .await?;

    // Respond with the stored state, not the merged copy.
    let order = state.service.get_order_by_id(&id).await?;
    Ok(HttpResponse::Ok().json(Envelope::data("Order updated successfully", order)))
}

// DELETE /api/orders/{id}
pub async fn delete_order(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    state
        .timed("delete_order", state.service.delete_order(&id))
        .await?;
    Ok(HttpResponse::Ok().json(Envelope::message("Order deleted successfully")))
}

// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "Server is running"
    }))
}
