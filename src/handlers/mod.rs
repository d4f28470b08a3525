//! Handler functions for the shop directory surface.
//!
//! Each module backs one route file under `routes/`; the registry maps the
//! route file's key to the module's `handler` function. Handlers receive
//! the body-normalized, parameter-merged request and fully own their
//! response, replying over the request's channel.

pub mod categories;
pub mod category_detail;
pub mod featured;
pub mod root;
pub mod search;
pub mod shop_detail;
pub mod shops;
mod types;

pub use types::{
    CategoryListResponse, CategorySummary, CreateShopRequest, SearchResponse, Shop,
    ShopListResponse,
};

use crate::dispatcher::{HandlerRequest, HandlerResponse};
use serde::Serialize;
use serde_json::json;
use tracing::error;

/// Serialize a payload and reply with it. A serialization failure answers
/// with a 500 instead of leaving the request without a response.
pub(crate) fn send_json<T: Serialize>(req: &HandlerRequest, status: u16, payload: &T) {
    match serde_json::to_value(payload) {
        Ok(body) => {
            let _ = req.reply_tx.send(HandlerResponse::json(status, body));
        }
        Err(err) => {
            error!(
                request_id = %req.request_id,
                handler_key = %req.handler_key,
                error = %err,
                "response serialization failed"
            );
            let _ = req.reply_tx.send(HandlerResponse::json(
                500,
                json!({
                    "error": "Internal Server Error",
                    "message": "response serialization failed",
                }),
            ));
        }
    }
}

/// Canned shop data backing the demo handlers.
pub(crate) fn sample_shops() -> Vec<Shop> {
    vec![
        Shop {
            id: 1,
            name: "Corner Deli".to_string(),
            category: "food".to_string(),
            lat: 52.5211,
            lng: 13.4105,
            rating: 4.6,
            featured: true,
        },
        Shop {
            id: 2,
            name: "Beanery".to_string(),
            category: "coffee".to_string(),
            lat: 52.5302,
            lng: 13.3847,
            rating: 4.8,
            featured: true,
        },
        Shop {
            id: 3,
            name: "Page One Books".to_string(),
            category: "books".to_string(),
            lat: 52.4987,
            lng: 13.4194,
            rating: 4.3,
            featured: false,
        },
        Shop {
            id: 4,
            name: "Velo Werkstatt".to_string(),
            category: "bikes".to_string(),
            lat: 52.5123,
            lng: 13.4512,
            rating: 4.1,
            featured: false,
        },
        Shop {
            id: 5,
            name: "Night Owl Coffee".to_string(),
            category: "coffee".to_string(),
            lat: 52.5409,
            lng: 13.4121,
            rating: 3.9,
            featured: false,
        },
    ]
}
