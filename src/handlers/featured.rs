use super::{sample_shops, send_json, ShopListResponse};
use crate::dispatcher::HandlerRequest;

/// `GET /shops/featured` — the curated set shown on the map's landing view.
pub fn handler(req: HandlerRequest) {
    let items: Vec<_> = sample_shops()
        .into_iter()
        .filter(|shop| shop.featured)
        .collect();
    let total = items.len();
    send_json(&req, 200, &ShopListResponse { items, total });
}
