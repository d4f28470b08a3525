use super::{sample_shops, send_json, CategoryListResponse, CategorySummary};
use crate::dispatcher::HandlerRequest;
use std::collections::BTreeMap;

/// `GET /categories` — every category with its shop count.
pub fn handler(req: HandlerRequest) {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for shop in sample_shops() {
        *counts.entry(shop.category).or_default() += 1;
    }
    let items = counts
        .into_iter()
        .map(|(slug, shop_count)| CategorySummary { slug, shop_count })
        .collect();
    send_json(&req, 200, &CategoryListResponse { items });
}
