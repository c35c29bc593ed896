use actix_web::web;

use super::handlers::{self, AppState};
use super::response::json_config;
use crate::metrics::metrics_handler;

/// Registers every route and the shared state on an `App`.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(web::Data::new(state.metrics.clone()))
            .app_data(web::Data::new(state))
            .app_data(json_config())
            .service(
                web::resource("/api/orders")
                    .route(web::get().to(handlers::get_all_orders))
                    .route(web::post().to(handlers::create_order)),
            )
            .service(
                web::resource("/api/orders/status/{status}")
                    .route(web::get().to(handlers::get_orders_by_status)),
            )
            .service(
                web::resource("/api/orders/{id}")
                    .route(web::get().to(handlers::get_order))
                    .route(web::put().to(handlers::update_order))
                    .route(web::delete().to(handlers::delete_order)),
            )
            .route("/health", web::get().to(handlers::health))
            .route("/metrics", web::get().to(metrics_handler));
    }
}
