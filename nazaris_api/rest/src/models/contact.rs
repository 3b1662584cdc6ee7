use nazaris_models::{
    contact::{
        ContactAttachment, ContactBudget, ContactEmail, ContactMessageContent, ContactName,
        ContactSubmission,
    },
    phone::PhoneNumber,
    work_type::WorkType,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The raw fields of a submission, either decoded from a JSON body or
/// collected from a multipart form.
#[derive(Debug, Default, Deserialize)]
pub struct ApiContactSubmission {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "workType")]
    pub work_type: Option<String>,
    #[serde(rename = "work-type")]
    pub work_type_legacy: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
    #[serde(skip)]
    pub attachment: Option<ContactAttachment>,
}

impl ApiContactSubmission {
    /// Sets the text field `name`. Unknown fields are ignored.
    pub fn set_field(&mut self, name: &str, value: String) {
        let slot = match name {
            "name" => &mut self.name,
            "phone" => &mut self.phone,
            "email" => &mut self.email,
            "workType" => &mut self.work_type,
            "work-type" => &mut self.work_type_legacy,
            "budget" => &mut self.budget,
            "message" => &mut self.message,
            _ => return,
        };
        *slot = Some(value);
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Missing or invalid field: {0}")]
pub struct InvalidFieldError(pub &'static str);

impl TryFrom<ApiContactSubmission> for ContactSubmission {
    type Error = InvalidFieldError;

    fn try_from(value: ApiContactSubmission) -> Result<Self, Self::Error> {
        let required = |field: Option<String>, name| field.ok_or(InvalidFieldError(name));

        let name = ContactName::try_from(required(value.name, "name")?)
            .map_err(|_| InvalidFieldError("name"))?;
        let phone = PhoneNumber::parse(&required(value.phone, "phone")?)
            .map_err(|_| InvalidFieldError("phone"))?;
        let email = ContactEmail::try_from(required(value.email, "email")?)
            .map_err(|_| InvalidFieldError("email"))?;
        let work_type = value
            .work_type
            .filter(|w| !w.trim().is_empty())
            .or(value.work_type_legacy);
        let work_type = WorkType::try_from(required(work_type, "workType")?)
            .map_err(|_| InvalidFieldError("workType"))?;

        let budget = optional(value.budget).map(ContactBudget::new);
        let message = optional(value.message).map(ContactMessageContent::new);

        Ok(Self {
            name,
            phone,
            email,
            work_type,
            budget,
            message,
            attachment: value.attachment,
        })
    }
}

/// Blank optional fields are treated as absent.
fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Serialize)]
pub struct ApiSubmitResponse {
    pub ok: bool,
}
