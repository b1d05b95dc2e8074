use serde::{Deserialize, Serialize};

/// Product option as stored by the API, e.g. "Size" with its offered values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductOption {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Variant value for one option; listed in the same order as the product options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOptionRequest {
    pub value: String,
}

/// Variant part of a product create payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateVariantRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    pub inventory_quantity: u32,
    pub options: Vec<VariantOptionRequest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductOptionRequest {
    pub title: String,
}

/// Options and variants sent when creating a product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariantsPayload {
    pub options: Vec<CreateProductOptionRequest>,
    pub variants: Vec<CreateVariantRequest>,
}

/// Body of `POST /admin/products`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub title: String,
    #[serde(flatten)]
    pub variants: ProductVariantsPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRef {
    pub id: String,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: ProductRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_product_is_flat() {
        let request = CreateProductRequest {
            title: "Tee".to_string(),
            variants: ProductVariantsPayload {
                options: vec![CreateProductOptionRequest { title: "Size".to_string() }],
                variants: vec![CreateVariantRequest {
                    title: "S".to_string(),
                    sku: None,
                    inventory_quantity: 4,
                    options: vec![VariantOptionRequest { value: "S".to_string() }],
                }],
            },
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["options"][0]["title"], "Size");
        assert_eq!(json["variants"][0]["options"][0]["value"], "S");
        assert!(json["variants"][0].get("sku").is_none());
    }
}
