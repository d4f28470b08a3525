use super::{sample_shops, send_json};
use crate::dispatcher::HandlerRequest;
use serde_json::json;

/// `GET /shops/:id` — a single shop by its captured `id` parameter.
pub fn handler(req: HandlerRequest) {
    // The captured param is also merged into the query params; this handler
    // uses the explicit field.
    let Some(id) = req.get_param("id").and_then(|v| v.parse::<u32>().ok()) else {
        send_json(
            &req,
            400,
            &json!({ "error": "Bad Request", "message": "id must be an integer" }),
        );
        return;
    };

    match sample_shops().into_iter().find(|shop| shop.id == id) {
        Some(shop) => send_json(&req, 200, &shop),
        None => send_json(
            &req,
            404,
            &json!({ "error": "Not Found", "message": format!("no shop with id {id}") }),
        ),
    }
}
