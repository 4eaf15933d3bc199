use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
#[sqlx(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: f64,
    pub quantity: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Body of `add-product`, also the insert shape for the product store.
///
/// Zero is not an acceptable price or quantity: both fields are required and
/// must be strictly positive, so free products are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "image is required"))]
    pub image: String,
    #[validate(range(exclusive_min = 0.0, message = "price must be positive"))]
    pub price: f64,
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AddProductResponse {
    pub id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, quantity: i64) -> NewProduct {
        NewProduct {
            name: "Mug".to_string(),
            description: "Ceramic".to_string(),
            image: "mug.png".to_string(),
            price,
            quantity,
        }
    }

    #[test]
    fn test_positive_values_pass() {
        assert!(product(9.99, 3).validate().is_ok());
        assert!(product(0.01, 1).validate().is_ok());
    }

    #[test]
    fn test_zero_price_fails() {
        assert!(product(0.0, 3).validate().is_err());
    }

    #[test]
    fn test_zero_or_negative_quantity_fails() {
        assert!(product(1.0, 0).validate().is_err());
        assert!(product(1.0, -2).validate().is_err());
    }

    #[test]
    fn test_empty_strings_fail() {
        let mut missing_image = product(1.0, 1);
        missing_image.image.clear();
        assert!(missing_image.validate().is_err());
    }
}
