use contracts::domain::products::{CreateProductRequest, ProductRef, ProductResponse};
use gloo_net::http::Request;

use crate::shared::api_utils::api_url;

/// Create a product with its options and variants
pub async fn create_product(dto: &CreateProductRequest) -> Result<ProductRef, String> {
    let response = Request::post(&api_url("/products"))
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to create product: {}", response.status()));
    }

    response
        .json::<ProductResponse>()
        .await
        .map(|r| r.product)
        .map_err(|e| format!("Failed to parse response: {}", e))
}
