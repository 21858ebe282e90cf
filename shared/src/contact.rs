use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum_macros::{Display as StrumDisplay, EnumIter, EnumString};

pub const CONTACT_CONFIRMATION: &str =
    "Thank you for your message! We'll get back to you within 24-48 hours.";
pub const CONTACT_MISSING_FIELDS: &str = "Please fill in all required fields.";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, StrumDisplay, EnumIter,
    EnumString,
)]
pub enum ContactSubject {
    #[default]
    #[serde(rename = "General Inquiry")]
    #[strum(serialize = "General Inquiry")]
    GeneralInquiry,
    #[serde(rename = "Technical Support")]
    #[strum(serialize = "Technical Support")]
    TechnicalSupport,
    #[serde(rename = "Partnership")]
    #[strum(serialize = "Partnership")]
    Partnership,
    #[serde(rename = "Feedback")]
    #[strum(serialize = "Feedback")]
    Feedback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, StrumDisplay)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: ContactSubject,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "{}", CONTACT_MISSING_FIELDS)]
pub struct ContactValidationError {
    pub missing: Vec<ContactField>,
}

impl std::error::Error for ContactValidationError {}

impl ContactForm {
    /// Presence check only; the email address is not parsed.
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        let missing: Vec<ContactField> = [
            (ContactField::Name, &self.name),
            (ContactField::Email, &self.email),
            (ContactField::Message, &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ContactValidationError { missing })
        }
    }
}
