use actix_web::{error, web, FromRequest, Handler, Resource, Responder};

use super::error::ApiError;
use super::handlers;
use crate::db::Executor;

/// Register every endpoint for an app carrying `web::Data<AppState<E>>`.
///
/// Unmatched paths, and known paths hit with another method, get a JSON 404.
pub fn configure<E: Executor>(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        error::Error::from(ApiError::validation(err.to_string()))
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        error::Error::from(ApiError::validation(err.to_string()))
    }))
    .service(get("/", handlers::index))
    .service(get("/customers", handlers::list_customers::<E>))
    .service(get("/customers/search", handlers::search_customers::<E>))
    .service(get("/customers/with-orders", handlers::customers_with_orders::<E>))
    .service(get("/orders/details", handlers::all_order_details::<E>))
    .service(get("/orders/recent", handlers::recent_orders::<E>))
    .service(get("/orders/{id}/details", handlers::order_details::<E>))
    .service(get("/products/with-orders", handlers::products_with_orders::<E>))
    .service(get("/products/search", handlers::search_products::<E>))
    .service(get("/sales/by-category", handlers::sales_by_category::<E>))
    .service(get("/unique-customers", handlers::unique_customers::<E>))
    .default_service(web::to(handlers::not_found));
}

fn get<F, Args>(path: &str, handler: F) -> Resource
where
    F: Handler<Args>,
    Args: FromRequest + 'static,
    F::Output: Responder + 'static,
{
    web::resource(path)
        .route(web::get().to(handler))
        .default_service(web::to(handlers::not_found))
}
