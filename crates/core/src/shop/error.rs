use thiserror::Error;

/// Errors raised while validating a create or update payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{}", .0.join(" and ") + " are required")]
    MissingFields(Vec<&'static str>),
    #[error("Order must contain at least one item")]
    EmptyOrder,
    #[error("Item {index}: {reason}")]
    InvalidItem { index: usize, reason: String },
    #[error("Invalid {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        assert_eq!(
            ValidationError::MissingField("name").to_string(),
            "name is required"
        );
    }

    #[test]
    fn test_missing_fields_display() {
        let err = ValidationError::MissingFields(vec!["name", "price"]);
        assert_eq!(err.to_string(), "name and price are required");
    }

    #[test]
    fn test_empty_order_display() {
        assert_eq!(
            ValidationError::EmptyOrder.to_string(),
            "Order must contain at least one item"
        );
    }

    #[test]
    fn test_invalid_item_display() {
        let err = ValidationError::InvalidItem {
            index: 1,
            reason: "quantity must be at least 1".to_string(),
        };
        assert_eq!(err.to_string(), "Item 1: quantity must be at least 1");
    }
}
