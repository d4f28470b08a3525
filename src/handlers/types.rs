use serde::{Deserialize, Serialize};

/// A shop in the directory, as rendered on the map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Shop {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
    pub rating: f64,
    pub featured: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShopListResponse {
    pub items: Vec<Shop>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateShopRequest {
    pub name: String,
    pub category: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategorySummary {
    pub slug: String,
    pub shop_count: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub items: Vec<CategorySummary>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    pub items: Vec<Shop>,
}
