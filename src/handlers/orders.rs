use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::auth::Credentials;
use crate::domain::order::{Order, OrderSize, OrderStatus};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

// Request bodies reach the service as raw bytes. It decodes them only after
// the permission check and the order lookup, then reports every field error
// at once. These types document the accepted shapes.

#[derive(Debug, ToSchema)]
pub struct CreateOrderRequest {
    pub size: OrderSize,
    /// Must be at least 1.
    pub quantity: i32,
}

#[derive(Debug, ToSchema)]
pub struct ReplaceOrderRequest {
    pub size: OrderSize,
    pub quantity: i32,
    /// Defaults to `PENDING` when omitted.
    pub order_status: Option<OrderStatus>,
}

#[derive(Debug, ToSchema)]
pub struct UpdateStatusRequest {
    pub order_status: OrderStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub size: OrderSize,
    pub order_status: OrderStatus,
    pub quantity: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            customer_id: order.customer_id,
            size: order.size,
            order_status: order.status,
            quantity: order.quantity,
            created_at: order.created_at.to_rfc3339(),
            updated_at: order.updated_at.to_rfc3339(),
        }
    }
}

pub(crate) fn order_list(orders: Vec<Order>) -> Vec<OrderResponse> {
    orders.into_iter().map(OrderResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /orders
///
/// Lists every order, newest first. Open to anonymous callers.
#[utoipa::path(
    get,
    path = "/orders",
    params(
        ("X-User-Id" = Option<Uuid>, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "All orders", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    service: web::Data<OrderService>,
    credentials: Credentials,
) -> Result<HttpResponse, AppError> {
    let orders = web::block(move || service.list_orders(credentials)).await??;

    Ok(HttpResponse::Ok().json(order_list(orders)))
}

/// POST /orders
///
/// Places an order on behalf of the caller. Owner and status in the body are
/// ignored.
#[utoipa::path(
    post,
    path = "/orders",
    params(
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Field-level validation errors"),
        (status = 401, description = "Caller is not authenticated"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    credentials: Credentials,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let order = web::block(move || service.create_order(credentials, &body)).await??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{order_id}
#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Staff user id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Caller is not authenticated"),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<OrderService>,
    credentials: Credentials,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || service.get_order(credentials, order_id)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /orders/{order_id}
///
/// Replaces size, quantity and status. The body is validated as a whole; if
/// any field is invalid nothing is written.
#[utoipa::path(
    put,
    path = "/orders/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Staff user id"),
    ),
    request_body = ReplaceOrderRequest,
    responses(
        (status = 200, description = "Order replaced", body = OrderResponse),
        (status = 400, description = "Field-level validation errors"),
        (status = 401, description = "Caller is not authenticated"),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn replace_order(
    service: web::Data<OrderService>,
    credentials: Credentials,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order =
        web::block(move || service.replace_order(credentials, order_id, &body)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// DELETE /orders/{order_id}
#[utoipa::path(
    delete,
    path = "/orders/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Staff user id"),
    ),
    responses(
        (status = 204, description = "Order deleted"),
        (status = 401, description = "Caller is not authenticated"),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn delete_order(
    service: web::Data<OrderService>,
    credentials: Credentials,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    web::block(move || service.delete_order(credentials, order_id)).await??;

    Ok(HttpResponse::NoContent().finish())
}

/// PUT /orders/update-status/{order_id}
///
/// Changes only the order status. No transition rules apply.
#[utoipa::path(
    put,
    path = "/orders/update-status/{order_id}",
    params(
        ("order_id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Staff user id"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Field-level validation errors"),
        (status = 401, description = "Caller is not authenticated"),
        (status = 403, description = "Caller is not staff"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    service: web::Data<OrderService>,
    credentials: Credentials,
    path: web::Path<Uuid>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order =
        web::block(move || service.update_status(credentials, order_id, &body)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
