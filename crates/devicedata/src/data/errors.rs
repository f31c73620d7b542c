//! Dispatch errors. These abort the record they are reported for.

use crate::context::ErrorDetail;

pub fn value_missing() -> ErrorDetail {
    ErrorDetail::new("value-missing", "value is missing", "Value is missing")
}

pub fn type_invalid(value: &str) -> ErrorDetail {
    ErrorDetail::new(
        "type-invalid",
        "type is invalid",
        format!("Type {:?} is invalid", value),
    )
}

pub fn sub_type_invalid(value: &str) -> ErrorDetail {
    ErrorDetail::new(
        "sub-type-invalid",
        "sub type is invalid",
        format!("Sub type {:?} is invalid", value),
    )
}

pub fn delivery_type_invalid(value: &str) -> ErrorDetail {
    ErrorDetail::new(
        "delivery-type-invalid",
        "delivery type is invalid",
        format!("Delivery type {:?} is invalid", value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_details_quote_the_value() {
        assert_eq!(type_invalid("unknown").detail, r#"Type "unknown" is invalid"#);
        assert_eq!(sub_type_invalid("x").detail, r#"Sub type "x" is invalid"#);
        assert_eq!(
            delivery_type_invalid("y").detail,
            r#"Delivery type "y" is invalid"#
        );
        assert_eq!(value_missing().code, "value-missing");
    }
}
