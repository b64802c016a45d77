use serde::{Deserialize, Serialize};

/// A postal address. Compared and copied by value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    #[serde(rename = "zipCode")]
    pub zip_code: String,
    pub country: String,
}

impl Address {
    pub fn new(
        street: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            street: street.into(),
            city: city.into(),
            state: state.into(),
            zip_code: zip_code.into(),
            country: country.into(),
        }
    }

    /// Fields paired with the names used in validation errors.
    pub(crate) fn named_fields(&self) -> [(&'static str, &str); 5] {
        [
            ("street", &self.street),
            ("city", &self.city),
            ("state", &self.state),
            ("zipCode", &self.zip_code),
            ("country", &self.country),
        ]
    }
}

/// What is being shipped. Weight is in pounds by convention.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CargoInfo {
    pub description: String,
    pub weight: f64,
    /// Free text, e.g. `48" x 40" x 36"`.
    pub dimensions: String,
}

impl CargoInfo {
    pub fn new(description: impl Into<String>, weight: f64, dimensions: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            weight,
            dimensions: dimensions.into(),
        }
    }
}
