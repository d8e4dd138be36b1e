//! # Field Validation
//!
//! Form input is validated before it reaches a store. The caller hands over an
//! ordered list of `(field name, value)` pairs and gets back the **first**
//! violation, or `Ok(())`.
//!
//! Order matters: when several fields are invalid, the one listed first is the
//! one reported. Callers list fields in the order a form presents them.
//!
//! Rules, applied per field in order:
//!
//! | Condition                                   | Error          |
//! |---------------------------------------------|----------------|
//! | value is null or an empty string            | `MissingField` |
//! | field is `price` and value ≤ 0 or not finite | `InvalidPrice` |
//! | field is `stock_quantity` and value < 0     | `InvalidStock` |

use thiserror::Error;

pub const PRICE_FIELD: &str = "price";
pub const STOCK_FIELD: &str = "stock_quantity";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{} is required.", humanize_field(.0))]
    MissingField(String),

    #[error("Price must be greater than 0.")]
    InvalidPrice,

    #[error("Stock Quantity cannot be negative.")]
    InvalidStock,

    #[error("{0}")]
    InvalidInput(String),
}

/// A single form value as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Null,
    Text(&'a str),
    Decimal(f64),
    Integer(i64),
}

impl FieldValue<'_> {
    fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Null | FieldValue::Text(""))
    }

    fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Decimal(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(value.as_str())
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Decimal(value)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl<'a, T: Into<FieldValue<'a>>> From<Option<T>> for FieldValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Validates fields in the order given and reports the first violation.
pub fn validate_fields(fields: &[(&str, FieldValue<'_>)]) -> Result<(), ValidationError> {
    for (name, value) in fields {
        if value.is_missing() {
            return Err(ValidationError::MissingField((*name).to_string()));
        }

        if let Some(number) = value.as_number() {
            if *name == PRICE_FIELD && !is_valid_price(number) {
                return Err(ValidationError::InvalidPrice);
            }
            if *name == STOCK_FIELD && number < 0.0 {
                return Err(ValidationError::InvalidStock);
            }
        }
    }

    Ok(())
}

/// A finite number above zero. NaN and infinity have no JSON form.
pub fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

/// "stock_quantity" -> "Stock quantity"
fn humanize_field(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_complete_product_form() {
        let fields = [
            ("product_id", FieldValue::from("P1")),
            ("name", FieldValue::from("Widget")),
            ("category", FieldValue::from("Tools")),
            ("price", FieldValue::from(9.99)),
            ("stock_quantity", FieldValue::from(5_i64)),
        ];
        assert_eq!(validate_fields(&fields), Ok(()));
    }

    #[test]
    fn empty_text_is_missing() {
        let fields = [("name", FieldValue::from(""))];
        assert_eq!(
            validate_fields(&fields),
            Err(ValidationError::MissingField("name".into()))
        );
    }

    #[test]
    fn null_is_missing() {
        let fields = [("category", FieldValue::from(None::<&str>))];
        assert_eq!(
            validate_fields(&fields),
            Err(ValidationError::MissingField("category".into()))
        );
    }

    #[test]
    fn first_invalid_field_wins() {
        let fields = [
            ("price", FieldValue::from(0.0)),
            ("name", FieldValue::from("")),
        ];
        assert_eq!(validate_fields(&fields), Err(ValidationError::InvalidPrice));

        let reversed = [
            ("name", FieldValue::from("")),
            ("price", FieldValue::from(0.0)),
        ];
        assert_eq!(
            validate_fields(&reversed),
            Err(ValidationError::MissingField("name".into()))
        );
    }

    #[test]
    fn price_must_be_positive() {
        assert_eq!(
            validate_fields(&[("price", FieldValue::from(-1.5))]),
            Err(ValidationError::InvalidPrice)
        );
        assert_eq!(validate_fields(&[("price", FieldValue::from(0.01))]), Ok(()));
    }

    #[test]
    fn price_must_be_finite() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                validate_fields(&[("price", FieldValue::from(bad))]),
                Err(ValidationError::InvalidPrice),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn stock_may_be_zero_but_not_negative() {
        assert_eq!(
            validate_fields(&[("stock_quantity", FieldValue::from(0_i64))]),
            Ok(())
        );
        assert_eq!(
            validate_fields(&[("stock_quantity", FieldValue::from(-1_i64))]),
            Err(ValidationError::InvalidStock)
        );
    }

    #[test]
    fn numeric_rules_only_apply_to_their_field() {
        let fields = [
            ("quantity", FieldValue::from(-3_i64)),
            ("cost", FieldValue::from(0.0)),
        ];
        assert_eq!(validate_fields(&fields), Ok(()));
    }

    #[test]
    fn messages_match_form_wording() {
        assert_eq!(
            ValidationError::MissingField("stock_quantity".into()).to_string(),
            "Stock quantity is required."
        );
        assert_eq!(
            ValidationError::MissingField("product_id".into()).to_string(),
            "Product id is required."
        );
        assert_eq!(
            ValidationError::InvalidPrice.to_string(),
            "Price must be greater than 0."
        );
        assert_eq!(
            ValidationError::InvalidStock.to_string(),
            "Stock Quantity cannot be negative."
        );
    }
}
