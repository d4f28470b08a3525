use super::{sample_shops, send_json, ShopListResponse};
use crate::dispatcher::HandlerRequest;
use serde_json::json;

/// `GET /categories/:slug` — the shops filed under one category.
pub fn handler(req: HandlerRequest) {
    let Some(slug) = req.get_param("slug") else {
        send_json(
            &req,
            400,
            &json!({ "error": "Bad Request", "message": "missing category slug" }),
        );
        return;
    };

    let items: Vec<_> = sample_shops()
        .into_iter()
        .filter(|shop| shop.category == slug)
        .collect();
    if items.is_empty() {
        send_json(
            &req,
            404,
            &json!({ "error": "Not Found", "message": format!("no category {slug}") }),
        );
        return;
    }
    let total = items.len();
    send_json(&req, 200, &ShopListResponse { items, total });
}
