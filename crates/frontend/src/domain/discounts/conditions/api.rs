use contracts::domain::discounts::{
    ConditionResourcesRequest, CustomerGroupsResponse, DiscountCondition, DiscountConditionResponse,
};
use gloo_net::http::Request;

use super::model::CustomerGroupsQuery;
use crate::shared::api_utils::{api_base, api_url};

fn condition_url(discount_id: &str, condition_id: &str) -> String {
    format!(
        "{}/discounts/{}/conditions/{}",
        api_base(),
        discount_id,
        condition_id
    )
}

/// Fetch condition with its customer groups
pub async fn fetch_condition(discount_id: &str, condition_id: &str) -> Result<DiscountCondition, String> {
    let response = Request::get(&format!(
        "{}?expand=customer_groups",
        condition_url(discount_id, condition_id)
    ))
    .send()
    .await
    .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch condition: {}", response.status()));
    }

    response
        .json::<DiscountConditionResponse>()
        .await
        .map(|r| r.discount_condition)
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Fetch one page of customer groups
pub async fn fetch_customer_groups(query: &CustomerGroupsQuery) -> Result<CustomerGroupsResponse, String> {
    let qs = serde_qs::to_string(query).map_err(|e| format!("Failed to build query: {}", e))?;
    let response = Request::get(&api_url(&format!("/customer-groups?{}", qs)))
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to fetch customer groups: {}", response.status()));
    }

    response
        .json::<CustomerGroupsResponse>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Add resources to a condition
pub async fn add_resources(
    discount_id: &str,
    condition_id: &str,
    ids: Vec<String>,
) -> Result<(), String> {
    let dto = ConditionResourcesRequest::from_ids(ids);
    let response = Request::post(&format!("{}/batch", condition_url(discount_id, condition_id)))
        .json(&dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to add resources: {}", response.status()));
    }

    Ok(())
}

/// Remove resources from a condition
pub async fn remove_resources(
    discount_id: &str,
    condition_id: &str,
    ids: Vec<String>,
) -> Result<(), String> {
    let dto = ConditionResourcesRequest::from_ids(ids);
    let response = Request::delete(&format!("{}/batch", condition_url(discount_id, condition_id)))
        .json(&dto)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        return Err(format!("Failed to remove resources: {}", response.status()));
    }

    Ok(())
}
