//! Checks applied to [`DeliveryCreate`] before anything is stored.

use chrono::{DateTime, NaiveDateTime, Utc};

use super::DeliveryError;
use crate::model::{Address, CargoInfo, DeliveryCreate};

/// `datetime-local` form inputs carry no offset; they are read as UTC.
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Create input that passed validation, with strings trimmed.
#[derive(Debug, Clone)]
pub(crate) struct ValidDelivery {
    pub origin: Address,
    pub destination: Address,
    pub cargo: CargoInfo,
    pub estimated_delivery: DateTime<Utc>,
    pub assigned_driver: Option<String>,
}

/// Reports the first offending field, in form order.
pub(crate) fn validate(params: DeliveryCreate) -> Result<ValidDelivery, DeliveryError> {
    let origin = validate_address("origin", &params.origin)?;
    let destination = validate_address("destination", &params.destination)?;
    let cargo = validate_cargo(&params.cargo)?;
    let estimated_delivery = parse_timestamp(&params.estimated_delivery)
        .ok_or_else(|| match params.estimated_delivery.trim() {
            "" => DeliveryError::missing("estimatedDelivery"),
            _ => DeliveryError::invalid("estimatedDelivery", "is not a valid timestamp"),
        })?;
    let assigned_driver = params
        .assigned_driver
        .map(|driver| driver.trim().to_string())
        .filter(|driver| !driver.is_empty());

    Ok(ValidDelivery {
        origin,
        destination,
        cargo,
        estimated_delivery,
        assigned_driver,
    })
}

fn validate_address(prefix: &str, address: &Address) -> Result<Address, DeliveryError> {
    if let Some((name, _)) = address.named_fields().into_iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(DeliveryError::missing(format!("{prefix}.{name}")));
    }
    Ok(Address::new(
        address.street.trim(),
        address.city.trim(),
        address.state.trim(),
        address.zip_code.trim(),
        address.country.trim(),
    ))
}

fn validate_cargo(cargo: &CargoInfo) -> Result<CargoInfo, DeliveryError> {
    if cargo.description.trim().is_empty() {
        return Err(DeliveryError::missing("cargo.description"));
    }
    if !cargo.weight.is_finite() || cargo.weight < 0.0 {
        return Err(DeliveryError::invalid("cargo.weight", "must be a non-negative number"));
    }
    if cargo.dimensions.trim().is_empty() {
        return Err(DeliveryError::missing("cargo.dimensions"));
    }
    Ok(CargoInfo::new(cargo.description.trim(), cargo.weight, cargo.dimensions.trim()))
}

/// Accepts RFC 3339 or an offset-less `datetime-local` value.
pub fn parse_timestamp(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(input) {
        return Some(parsed.with_timezone(&Utc));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(input, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn valid_params() -> DeliveryCreate {
        DeliveryCreate {
            origin: Address::new("123 Warehouse St", "Los Angeles", "CA", "90001", "USA"),
            destination: Address::new("456 Customer Ave", "San Francisco", "CA", "94102", "USA"),
            cargo: CargoInfo::new("Electronics shipment", 150.0, "48x40x36"),
            estimated_delivery: "2024-01-15T14:00:00Z".to_string(),
            assigned_driver: Some("  ".to_string()),
        }
    }

    #[test]
    fn test_valid_input_is_trimmed() {
        let mut params = valid_params();
        params.origin.city = "  Los Angeles ".to_string();
        let valid = validate(params).unwrap();
        assert_eq!(valid.origin.city, "Los Angeles");
        assert_eq!(valid.assigned_driver, None);
        assert_eq!(valid.estimated_delivery, Utc.with_ymd_and_hms(2024, 1, 15, 14, 0, 0).unwrap());
    }

    #[test]
    fn test_first_missing_field_is_named() {
        let mut params = valid_params();
        params.destination.zip_code = String::new();
        params.cargo.description = String::new();
        let err = validate(params).unwrap_err();
        assert_eq!(err.field(), Some("destination.zipCode"));
    }

    #[test]
    fn test_weight_must_be_finite_and_non_negative() {
        for weight in [-5.0, f64::NAN, f64::INFINITY] {
            let mut params = valid_params();
            params.cargo.weight = weight;
            assert_eq!(validate(params).unwrap_err().field(), Some("cargo.weight"));
        }

        let mut params = valid_params();
        params.cargo.weight = 0.0;
        assert!(validate(params).is_ok());
    }

    #[test]
    fn test_estimated_delivery_forms() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap();
        assert_eq!(parse_timestamp("2024-03-02T09:30"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-02T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-03-02T10:30:00+01:00"), Some(expected));
        assert_eq!(parse_timestamp("next tuesday"), None);

        let mut params = valid_params();
        params.estimated_delivery = "soon".to_string();
        let err = validate(params).unwrap_err();
        assert_eq!(
            err,
            DeliveryError::invalid("estimatedDelivery", "is not a valid timestamp")
        );
    }
}
