use super::send_json;
use crate::dispatcher::HandlerRequest;
use serde_json::json;

/// `GET /` — directory entry point listing the available endpoints.
pub fn handler(req: HandlerRequest) {
    send_json(
        &req,
        200,
        &json!({
            "service": "shopatlas",
            "endpoints": [
                "/shops",
                "/shops/featured",
                "/shops/:id",
                "/categories",
                "/categories/:slug",
                "/search?q=",
            ],
        }),
    );
}
