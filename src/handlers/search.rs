use super::{sample_shops, send_json, SearchResponse};
use crate::dispatcher::HandlerRequest;
use serde_json::json;

/// `GET /search?q=` — case-insensitive substring search over shop names.
pub fn handler(req: HandlerRequest) {
    let Some(query) = req.get_query_param("q").map(str::to_owned) else {
        send_json(
            &req,
            400,
            &json!({ "error": "Bad Request", "message": "missing query parameter q" }),
        );
        return;
    };

    let needle = query.to_lowercase();
    let items = sample_shops()
        .into_iter()
        .filter(|shop| shop.name.to_lowercase().contains(&needle))
        .collect();
    send_json(&req, 200, &SearchResponse { query, items });
}
