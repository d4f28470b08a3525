use super::{sample_shops, send_json, CreateShopRequest, Shop, ShopListResponse};
use crate::dispatcher::HandlerRequest;
use http::Method;
use serde_json::json;

/// `/shops` — list shops on GET, create one on POST.
///
/// The router passes the method through untouched; both verbs land on this
/// one route file and the handler branches itself.
pub fn handler(req: HandlerRequest) {
    if req.method == Method::GET {
        list(req);
    } else if req.method == Method::POST {
        create(req);
    } else {
        send_json(
            &req,
            405,
            &json!({ "error": "Method Not Allowed", "method": req.method.to_string() }),
        );
    }
}

fn list(req: HandlerRequest) {
    let mut items = sample_shops();
    if let Some(category) = req.get_query_param("category") {
        items.retain(|shop| shop.category == category);
    }
    let total = items.len();
    send_json(&req, 200, &ShopListResponse { items, total });
}

fn create(req: HandlerRequest) {
    let Some(body) = req.body.clone() else {
        send_json(&req, 400, &json!({ "error": "Bad Request", "message": "missing body" }));
        return;
    };
    let parsed: CreateShopRequest = match serde_json::from_value(body) {
        Ok(parsed) => parsed,
        Err(err) => {
            send_json(
                &req,
                400,
                &json!({ "error": "Bad Request", "message": err.to_string() }),
            );
            return;
        }
    };

    let shop = Shop {
        id: sample_shops().len() as u32 + 1,
        name: parsed.name,
        category: parsed.category,
        lat: parsed.lat,
        lng: parsed.lng,
        rating: 0.0,
        featured: false,
    };
    send_json(&req, 201, &shop);
}
