//! Sale and restock form DTOs
//!
//! Form fields arrive as raw strings and are parsed here, before anything
//! touches the database. A malformed or missing field short-circuits the
//! whole operation with a validation notice; the fields are optional at the
//! extractor level so an incomplete form follows the same notice-and-redirect
//! path as a non-numeric one instead of a bare 422.

use std::str::FromStr;

use serde::Deserialize;
use utoipa::ToSchema;

use crate::domain::{DomainError, RestockCommand, SaleCommand};

fn parse_field<T: FromStr>(field: &Option<String>, invalid: impl Fn() -> DomainError) -> Result<T, DomainError> {
    field
        .as_deref()
        .ok_or_else(&invalid)?
        .trim()
        .parse()
        .map_err(|_| invalid())
}

/// POST /process_sale form body.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SaleForm {
    pub pump_id: Option<String>,
    pub employee_id: Option<String>,
    pub liters_sold: Option<String>,
}

impl TryFrom<SaleForm> for SaleCommand {
    type Error = DomainError;

    fn try_from(form: SaleForm) -> Result<Self, Self::Error> {
        let invalid = || {
            DomainError::Validation(
                "Invalid input. Please enter valid numbers for IDs and Liters.".to_string(),
            )
        };
        Ok(SaleCommand {
            pump_id: parse_field(&form.pump_id, invalid)?,
            employee_id: parse_field(&form.employee_id, invalid)?,
            liters_sold: parse_field(&form.liters_sold, invalid)?,
        })
    }
}

/// POST /restock_tank form body.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RestockForm {
    pub tank_id: Option<String>,
    pub liters_added: Option<String>,
}

impl TryFrom<RestockForm> for RestockCommand {
    type Error = DomainError;

    fn try_from(form: RestockForm) -> Result<Self, Self::Error> {
        let invalid = || {
            DomainError::Validation(
                "Invalid input. Please enter valid numbers for Tank ID and Liters Added."
                    .to_string(),
            )
        };
        Ok(RestockCommand {
            tank_id: parse_field(&form.tank_id, invalid)?,
            liters_added: parse_field(&form.liters_added, invalid)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn parses_well_formed_sale() {
        let form = SaleForm {
            pump_id: Some("2".to_string()),
            employee_id: Some("7".to_string()),
            liters_sold: Some("12.5".to_string()),
        };
        let cmd = SaleCommand::try_from(form).unwrap();
        assert_eq!(cmd.pump_id, 2);
        assert_eq!(cmd.employee_id, 7);
        assert_eq!(cmd.liters_sold, Decimal::new(125, 1));
    }

    #[test]
    fn rejects_non_numeric_sale_fields() {
        let form = SaleForm {
            pump_id: Some("two".to_string()),
            employee_id: Some("7".to_string()),
            liters_sold: Some("12.5".to_string()),
        };
        assert!(matches!(
            SaleCommand::try_from(form),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn rejects_missing_sale_field() {
        let form = SaleForm {
            pump_id: Some("2".to_string()),
            employee_id: Some("7".to_string()),
            liters_sold: None,
        };
        assert!(matches!(
            SaleCommand::try_from(form),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn rejects_fractional_restock_liters() {
        // liters_added is an integer in the procedure signature
        let form = RestockForm {
            tank_id: Some("1".to_string()),
            liters_added: Some("400.5".to_string()),
        };
        assert!(matches!(
            RestockCommand::try_from(form),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn rejects_empty_restock_form() {
        assert!(matches!(
            RestockCommand::try_from(RestockForm::default()),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn parses_restock_with_surrounding_whitespace() {
        let form = RestockForm {
            tank_id: Some(" 3 ".to_string()),
            liters_added: Some(" 400 ".to_string()),
        };
        let cmd = RestockCommand::try_from(form).unwrap();
        assert_eq!(cmd.tank_id, 3);
        assert_eq!(cmd.liters_added, 400);
    }
}
