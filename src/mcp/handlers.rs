//! MCP (Model Context Protocol) route handlers
//!
//! This module implements the Model Context Protocol handlers for the
//! storefront. `handle_tool_call` is public so tests can drive tools directly.

use super::{helpers::*, models::*};
use crate::cart::handlers::cart_response;
use crate::cart::helpers::format_item_summary;
use crate::catalog::helpers::{format_price, ProductView};
use crate::catalog::models::{Category, FilterQuery, PriceRange, Subcategory};
use crate::session::helpers::get_or_create_session_id;
use crate::session::{AppState, SharedState};
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

/// Creates routes for MCP-related operations
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/mcp", post(handle_mcp).get(handle_mcp_sse))
        .route("/mcp/", post(handle_mcp).get(handle_mcp_sse)) // Trailing slash safety
}

/// Handle SSE (Server-Sent Events) handshake for GET requests
async fn handle_mcp_sse() -> impl IntoResponse {
    (
        [("content-type", "text/event-stream")],
        "event: endpoint\ndata: /mcp\n\n",
    )
}

/// Endpoint: POST /mcp
async fn handle_mcp(
    State(state): State<SharedState>,
    body: Result<Json<JsonRpcRequest>, axum::extract::rejection::JsonRejection>,
) -> impl IntoResponse {
    let req = match body {
        Ok(Json(r)) => r,
        Err(e) => {
            warn!(error = %e.body_text(), "JSON-RPC parse error");
            return (
                StatusCode::BAD_REQUEST,
                Json(rpc_error(Value::Null, PARSE_ERROR, "Parse error")),
            )
                .into_response();
        }
    };

    // Notifications expect no JSON-RPC response
    if req.method.starts_with("notifications/") {
        debug!(method = %req.method, "MCP notification");
        return StatusCode::ACCEPTED.into_response();
    }

    let id = req.id.unwrap_or(Value::Null);
    let method_name = req.method.as_str();
    let params = req.params.unwrap_or(Value::Null);

    debug!(method = method_name, id = %id, "MCP call");

    let response_body = match method_name {
        "initialize" => rpc_success(id, handle_initialize()),
        "tools/list" => rpc_success(id, handle_tools_list()),
        "tools/call" => {
            let tool_name = params.get("name").and_then(|n| n.as_str()).unwrap_or("");
            let args = params.get("arguments").cloned().unwrap_or(json!({}));

            match handle_tool_call(&state, tool_name, args) {
                Ok(result) => rpc_success(id, result),
                Err(msg) => rpc_error(id, INVALID_PARAMS, msg),
            }
        }
        "ping" => rpc_success(id, json!({})),
        _ => {
            warn!(method = method_name, "Unknown MCP method");
            rpc_error(id, METHOD_NOT_FOUND, "Method not found")
        }
    };

    Json(response_body).into_response()
}

// =============================================================================
// MCP Method Handlers
// =============================================================================

/// Handles `initialize` request (Handshake).
fn handle_initialize() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": true }
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": env!("CARGO_PKG_VERSION")
        }
    })
}

/// Handles `tools/list` request.
fn handle_tools_list() -> Value {
    json!({
        "tools": [
            {
                "name": SEARCH_TOOL_NAME,
                "title": "Search products",
                "description": "Searches the catalog by name, price range, category, subcategory and brand.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "query": { "type": "string" },
                        "category": { "type": "string", "enum": ["speakers", "tvs", "fans", "cookers"] },
                        "subcategory": { "type": "string" },
                        "brands": { "type": "array", "items": { "type": "string" } },
                        "minPrice": { "type": "integer", "minimum": 0 },
                        "maxPrice": { "type": "integer", "minimum": 0 },
                        "limit": { "type": "integer", "default": DEFAULT_SEARCH_LIMIT }
                    },
                    "additionalProperties": false
                }
            },
            {
                "name": ADD_TO_CART_TOOL_NAME,
                "title": "Add products to cart",
                "description": "Adds catalog products to the cart and returns its lines and totals.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "items": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "required": ["productId"],
                                "properties": {
                                    "productId": { "type": "string" },
                                    "quantity": { "type": "integer", "minimum": 1, "default": 1 }
                                }
                            }
                        },
                        "cartId": { "type": "string" }
                    },
                    "required": ["items"],
                    "additionalProperties": false
                }
            },
            {
                "name": VIEW_CART_TOOL_NAME,
                "title": "View cart",
                "description": "Returns the cart lines with subtotal, shipping, discount and total.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "cartId": { "type": "string" },
                        "promoCode": { "type": "string" }
                    },
                    "additionalProperties": false
                }
            }
        ]
    })
}

/// Handles `tools/call` request (Business Logic).
pub fn handle_tool_call(state: &AppState, name: &str, args: Value) -> Result<Value, String> {
    match name {
        SEARCH_TOOL_NAME => handle_search_tool(state, args),
        ADD_TO_CART_TOOL_NAME => handle_add_to_cart_tool(state, args),
        VIEW_CART_TOOL_NAME => handle_view_cart_tool(state, args),
        _ => Err(format!("Unknown tool: {}", name)),
    }
}

fn parse_args<T: serde::de::DeserializeOwned>(args: Value) -> Result<T, String> {
    serde_json::from_value(args).map_err(|e| format!("Invalid arguments: {}", e))
}

/// Handles the search_products tool
fn handle_search_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: SearchProductsInput = parse_args(args)?;

    let category = input
        .category
        .as_deref()
        .map(|slug| Category::from_slug(slug).ok_or_else(|| format!("Unknown category: {}", slug)))
        .transpose()?;
    let subcategory = input
        .subcategory
        .as_deref()
        .map(|slug| {
            Subcategory::from_slug(slug).ok_or_else(|| format!("Unknown subcategory: {}", slug))
        })
        .transpose()?;

    let defaults = PriceRange::default();
    let query = FilterQuery {
        search: input.query,
        price_range: PriceRange {
            min: input.min_price.unwrap_or(defaults.min),
            max: input.max_price.unwrap_or(defaults.max),
        },
        category,
        subcategory,
        brands: input.brands,
    };

    let found = state.catalog.filter(&query).map_err(|e| e.to_string())?;
    let total = found.len();
    let products: Vec<ProductView> = found
        .into_iter()
        .take(input.limit.unwrap_or(DEFAULT_SEARCH_LIMIT))
        .map(ProductView::from)
        .collect();

    Ok(tool_result(
        format!("Found {} product(s).", total),
        json!({ "total": total, "products": products }),
    ))
}

/// Handles the add_to_cart tool
///
/// All items are applied to a draft of the ledger; the cart only changes
/// when every item succeeds.
fn handle_add_to_cart_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: AddToCartToolInput = parse_args(args)?;
    let cart_id = get_or_create_session_id(input.cart_id);

    let body = state
        .update_cart(&cart_id, |cart| {
            let mut draft = cart.clone();
            for item in &input.items {
                draft.add_or_increment(&item.product_id, item.quantity)?;
            }
            *cart = draft;
            cart_response(state, &cart_id, cart, None)
        })
        .map_err(|e| e.to_string())?;
    info!(cart = %cart_id, items = %format_item_summary(&body.items), "MCP add to cart");

    let message = format!("Cart {} now has {} item(s).", cart_id, body.items.len());
    let structured = serde_json::to_value(&body).map_err(|e| e.to_string())?;
    Ok(tool_result(message, structured))
}

/// Handles the view_cart tool
fn handle_view_cart_tool(state: &AppState, args: Value) -> Result<Value, String> {
    let input: ViewCartToolInput = parse_args(args)?;
    let cart_id = get_or_create_session_id(input.cart_id);

    let body = state
        .read_cart(&cart_id, |cart| {
            cart_response(state, &cart_id, cart, input.promo_code.as_deref())
        })
        .map_err(|e| e.to_string())?;

    let message = if body.items.is_empty() {
        "Cart is empty.".to_string()
    } else {
        format!(
            "{} - total {}",
            format_item_summary(&body.items),
            format_price(body.totals.total)
        )
    };
    let structured = serde_json::to_value(&body).map_err(|e| e.to_string())?;
    Ok(tool_result(message, structured))
}
