use contracts::domain::orders::claim::{CreateClaimRequest, ShippingOption};
use contracts::domain::orders::reservation::{
    CreateReservationRequest, Reservation, ReservationResponse, StockLocation,
    StockLocationsResponse, VariantInventory, VariantInventoryResponse,
};
use contracts::domain::orders::returns::{CreateReturnRequest, ReturnReason, ReturnReasonsResponse};
use contracts::domain::orders::Order;
use contracts::shared::uploads::UploadsResponse;
use gloo_net::http::Request;
use serde::Deserialize;

use crate::shared::api_utils::api_base;

#[derive(Deserialize)]
struct OrderResponse {
    order: Order,
}

#[derive(Deserialize)]
struct ShippingOptionsResponse {
    shipping_options: Vec<ShippingOption>,
}

/// Fetch order with its items, swaps and claims
pub async fn fetch_order(id: &str) -> Result<Order, String> {
    let response = Request::get(&format!(
        "{}/orders/{}?expand=items,items.variant,swaps,claims",
        api_base(),
        urlencoding::encode(id)
    ))
    .send()
    .await
    .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch order: {}", response.status()));
    }

    response
        .json::<OrderResponse>()
        .await
        .map(|r| r.order)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Fetch merchant-defined return reasons
pub async fn fetch_return_reasons() -> Result<Vec<ReturnReason>, String> {
    let response = Request::get(&format!("{}/return-reasons", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch return reasons: {}", response.status()));
    }

    response
        .json::<ReturnReasonsResponse>()
        .await
        .map(|r| r.return_reasons)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Upload images attached to a return, returns their public urls
pub async fn upload_images(files: Vec<web_sys::File>) -> Result<Vec<String>, String> {
    let form = web_sys::FormData::new().map_err(|e| format!("Failed to build upload: {:?}", e))?;
    for file in &files {
        form.append_with_blob_and_filename("files", file, &file.name())
            .map_err(|e| format!("Failed to build upload: {:?}", e))?;
    }

    let response = Request::post(&format!("{}/uploads", api_base()))
        .body(form)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to upload images: {}", response.status()));
    }

    response
        .json::<UploadsResponse>()
        .await
        .map(UploadsResponse::into_urls)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Delete a previously uploaded file
pub async fn delete_upload(url: &str) -> Result<(), String> {
    let response = Request::delete(&format!("{}/uploads", api_base()))
        .json(&serde_json::json!({ "file_key": url }))
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to delete upload: {}", response.status()));
    }

    Ok(())
}

/// Request a return for part of an order
pub async fn request_return(order_id: &str, dto: &CreateReturnRequest) -> Result<(), String> {
    let response = Request::post(&format!("{}/orders/{}/return", api_base(), order_id))
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to request return: {}", response.status()));
    }

    Ok(())
}

/// Register a claim for an order
pub async fn create_claim(order_id: &str, dto: &CreateClaimRequest) -> Result<(), String> {
    let response = Request::post(&format!("{}/orders/{}/claims", api_base(), order_id))
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to create claim: {}", response.status()));
    }

    Ok(())
}

/// Shipping options of the order's region; `is_return` selects return options
pub async fn fetch_shipping_options(region_id: &str, is_return: bool) -> Result<Vec<ShippingOption>, String> {
    let response = Request::get(&format!(
        "{}/shipping-options?region_id={}&is_return={}",
        api_base(),
        urlencoding::encode(region_id),
        is_return
    ))
    .send()
    .await
    .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch shipping options: {}", response.status()));
    }

    response
        .json::<ShippingOptionsResponse>()
        .await
        .map(|r| r.shipping_options)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn fetch_stock_locations() -> Result<Vec<StockLocation>, String> {
    let response = Request::get(&format!("{}/stock-locations", api_base()))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch stock locations: {}", response.status()));
    }

    response
        .json::<StockLocationsResponse>()
        .await
        .map(|r| r.stock_locations)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Inventory items and per-location levels of a variant
pub async fn fetch_variant_inventory(variant_id: &str) -> Result<VariantInventory, String> {
    let response = Request::get(&format!("{}/variants/{}/inventory", api_base(), variant_id))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch inventory: {}", response.status()));
    }

    response
        .json::<VariantInventoryResponse>()
        .await
        .map(|r| r.variant)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn create_reservation(dto: &CreateReservationRequest) -> Result<Reservation, String> {
    let response = Request::post(&format!("{}/reservations", api_base()))
        .json(dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!(
            "Failed to reserve {}: {}",
            dto.line_item_id,
            response.status()
        ));
    }

    response
        .json::<ReservationResponse>()
        .await
        .map(|r| r.reservation)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

pub async fn delete_reservation(id: &str) -> Result<(), String> {
    let response = Request::delete(&format!("{}/reservations/{}", api_base(), id))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to delete reservation: {}", response.status()));
    }

    Ok(())
}
