use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::application::order_service::OrderService;
use crate::domain::order::{LineItem, Order};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLineItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub account_id: Uuid,
    /// Decimal price as a string to avoid floating-point issues, e.g. "9.99"
    pub total_price: String,
    pub items: Vec<CreateLineItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: Uuid,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LineItemResponse {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: Uuid,
    pub account_id: Uuid,
    pub created_at: String,
    pub total_price: String,
    pub items: Vec<LineItemResponse>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            account_id: order.account_id,
            created_at: order.created_at.to_rfc3339(),
            total_price: order.total_price.to_string(),
            items: order
                .items
                .into_iter()
                .map(|item| LineItemResponse {
                    product_id: item.product_id,
                    quantity: item.quantity,
                })
                .collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Creates a new order together with its line items. The header and all
/// items are written in a single transaction.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created successfully", body = CreateOrderResponse),
        (status = 400, description = "Invalid price or quantity"),
        (status = 409, description = "Order id already taken"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<OrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();

    let total_price = BigDecimal::from_str(&body.total_price).map_err(|e| {
        AppError::BadRequest(format!("Invalid total_price '{}': {}", body.total_price, e))
    })?;
    let items = body
        .items
        .into_iter()
        .map(|l| LineItem {
            product_id: l.product_id,
            quantity: l.quantity,
        })
        .collect();

    let order = web::block(move || service.place_order(body.account_id, total_price, items))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(CreateOrderResponse { id: order.id }))
}

/// GET /accounts/{account_id}/orders
///
/// Returns every order of the account with its line items, sorted by order
/// id. An account without orders yields an empty list.
#[utoipa::path(
    get,
    path = "/accounts/{account_id}/orders",
    params(
        ("account_id" = Uuid, Path, description = "Account UUID"),
    ),
    responses(
        (status = 200, description = "Orders of the account", body = [OrderResponse]),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_account_orders(
    service: web::Data<OrderService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let account_id = path.into_inner();

    let orders = web::block(move || service.orders_for_account(account_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
