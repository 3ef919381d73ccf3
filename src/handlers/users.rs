use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::auth::Credentials;
use crate::errors::AppError;

use super::orders::{order_list, OrderResponse};

/// GET /orders/user/{user_id}/orders
///
/// Lists a user's orders, newest first. An empty list means the user exists
/// but has no orders.
#[utoipa::path(
    get,
    path = "/orders/user/{user_id}/orders",
    params(
        ("user_id" = Uuid, Path, description = "User UUID"),
    ),
    responses(
        (status = 200, description = "Orders owned by the user", body = [OrderResponse]),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_user_orders(
    service: web::Data<OrderService>,
    credentials: Credentials,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();

    let orders = web::block(move || service.list_user_orders(credentials, user_id)).await??;

    Ok(HttpResponse::Ok().json(order_list(orders)))
}

/// GET /orders/user/{user_id}/order/{order_id}
#[utoipa::path(
    get,
    path = "/orders/user/{user_id}/order/{order_id}",
    params(
        ("user_id" = Uuid, Path, description = "User UUID"),
        ("order_id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "User not found, or no such order for this user"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_user_order(
    service: web::Data<OrderService>,
    credentials: Credentials,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    let (user_id, order_id) = path.into_inner();

    let order =
        web::block(move || service.get_user_order(credentials, user_id, order_id)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
