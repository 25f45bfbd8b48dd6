//! Contact details shown on the contact page.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cms::{WireShape, fields_of, records_of};
use crate::error::{CmsError, CmsResult};

/// The club's contact details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub country: String,
    #[serde(alias = "postalCode")]
    pub postal_code: String,
}

impl Address {
    /// Single-line form, e.g. "Calle de Amaniel 13, Madrid, España 28015"
    pub fn one_line(&self) -> String {
        format!(
            "{}, {}, {} {}",
            self.street, self.city, self.country, self.postal_code
        )
    }
}

/// Parse a contact-info document; the first record wins. `None` when the list is empty.
pub fn parse_contact(json: &str) -> CmsResult<Option<ContactInfo>> {
    let document: Value = serde_json::from_str(json)?;
    let (records, enveloped) = records_of(document)?;

    let record = match records.into_iter().next() {
        None => return Ok(None),
        Some(Value::Object(record)) => record,
        Some(_) => {
            return Err(CmsError::UnknownShape(
                "contact record is not an object".to_string(),
            ));
        }
    };

    let shape = WireShape::detect(&record, enveloped);
    let contact = serde_json::from_value(Value::Object(fields_of(record, shape)))?;
    Ok(Some(contact))
}
