//! MCP Protocol Models and Constants
//!
//! JSON-RPC envelope plus the argument shapes of each storefront tool.

use serde::Deserialize;
use serde_json::Value;

// =============================================================================
// MCP Constants
// =============================================================================

/// Catalog search tool
pub const SEARCH_TOOL_NAME: &str = "search_products";
/// Adds products to a cart
pub const ADD_TO_CART_TOOL_NAME: &str = "add_to_cart";
/// Returns cart lines and totals
pub const VIEW_CART_TOOL_NAME: &str = "view_cart";
/// Server identifier
pub const SERVER_NAME: &str = "storefront";
/// Protocol version for MCP
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Default number of products returned by the search tool
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

// JSON-RPC error codes
pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;

// =============================================================================
// MCP Protocol Models
// =============================================================================

/// Standard JSON-RPC 2.0 Request envelope
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version (should be "2.0")
    #[allow(dead_code)]
    pub jsonrpc: Option<String>,

    pub method: String,
    pub params: Option<Value>,
    pub id: Option<Value>,
}

// =============================================================================
// Tool Arguments
// =============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchProductsInput {
    #[serde(default)]
    pub query: String,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    #[serde(default)]
    pub brands: Vec<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub limit: Option<usize>,
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCartItem {
    pub product_id: String,

    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct AddToCartToolInput {
    pub items: Vec<ToolCartItem>,

    /// Session whose cart is used; a new one is created when absent
    pub cart_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ViewCartToolInput {
    pub cart_id: Option<String>,
    pub promo_code: Option<String>,
}
