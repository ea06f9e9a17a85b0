use serde::Deserialize;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct OrderLookupRequest {
    #[validate(length(min = 1, max = 64, message = "Please enter an order id (at most 64 characters)"))]
    pub order_id: String,
}

impl OrderLookupRequest {
    /// Trimmed and validated order id.
    pub fn order_id(&self) -> Result<String, validator::ValidationErrors> {
        let trimmed = OrderLookupRequest {
            order_id: self.order_id.trim().to_string(),
        };
        trimmed.validate()?;
        Ok(trimmed.order_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_before_validating() {
        let request = OrderLookupRequest {
            order_id: "  1742964928849 ".to_string(),
        };
        assert_eq!(request.order_id().unwrap(), "1742964928849");
    }

    #[test]
    fn blank_or_long_ids_are_rejected() {
        let blank = OrderLookupRequest {
            order_id: "   ".to_string(),
        };
        let long = OrderLookupRequest {
            order_id: "9".repeat(65),
        };
        assert!(blank.order_id().is_err());
        assert!(long.order_id().is_err());
    }
}
