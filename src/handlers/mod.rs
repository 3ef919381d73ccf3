pub mod orders;
pub mod users;

use actix_web::web;

use crate::errors::AppError;

/// Register the order routes together with the path extractor configuration
/// they rely on. Bodies are taken as raw bytes and decoded by the service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(path_config()).service(
        web::scope("/orders")
            .service(
                web::resource("")
                    .route(web::get().to(orders::list_orders))
                    .route(web::post().to(orders::create_order)),
            )
            .service(
                web::resource("/update-status/{order_id}")
                    .route(web::put().to(orders::update_order_status)),
            )
            .service(
                web::resource("/user/{user_id}/orders")
                    .route(web::get().to(users::list_user_orders)),
            )
            .service(
                web::resource("/user/{user_id}/order/{order_id}")
                    .route(web::get().to(users::get_user_order)),
            )
            .service(
                web::resource("/{order_id}")
                    .route(web::get().to(orders::get_order))
                    .route(web::put().to(orders::replace_order))
                    .route(web::delete().to(orders::delete_order)),
            ),
    );
}

/// Identifiers that are not UUIDs cannot name a resource.
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|_err, _req| AppError::NotFound("Not found".to_string()).into())
}
