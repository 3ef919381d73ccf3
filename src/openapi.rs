use utoipa::OpenApi;

use crate::domain::order::{OrderSize, OrderStatus};
use crate::handlers::orders::{
    CreateOrderRequest, OrderResponse, ReplaceOrderRequest, UpdateStatusRequest,
};
use crate::handlers::{orders, users};

#[derive(OpenApi)]
#[openapi(
    paths(
        orders::list_orders,
        orders::create_order,
        orders::get_order,
        orders::replace_order,
        orders::delete_order,
        orders::update_order_status,
        users::list_user_orders,
        users::get_user_order,
    ),
    components(schemas(
        OrderResponse,
        CreateOrderRequest,
        ReplaceOrderRequest,
        UpdateStatusRequest,
        OrderSize,
        OrderStatus,
    )),
    tags((name = "orders", description = "Orders placed by users"))
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_route_is_documented() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&str> = doc.paths.paths.keys().map(String::as_str).collect();

        for path in [
            "/orders",
            "/orders/{order_id}",
            "/orders/update-status/{order_id}",
            "/orders/user/{user_id}/orders",
            "/orders/user/{user_id}/order/{order_id}",
        ] {
            assert!(paths.contains(&path), "{path} missing from {paths:?}");
        }
    }
}
