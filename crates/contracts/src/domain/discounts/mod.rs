use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub customer_count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerGroupsResponse {
    pub customer_groups: Vec<CustomerGroup>,
    pub count: u32,
    pub offset: u32,
    pub limit: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionOperator {
    In,
    NotIn,
}

/// Discount condition limited to customer groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCondition {
    pub id: String,
    pub operator: ConditionOperator,
    #[serde(default)]
    pub customer_groups: Vec<CustomerGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

/// Body for adding or removing resources of a condition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionResourcesRequest {
    pub resources: Vec<ResourceRef>,
}

impl ConditionResourcesRequest {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resources: ids.into_iter().map(|id| ResourceRef { id: id.into() }).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountConditionResponse {
    pub discount_condition: DiscountCondition,
}
