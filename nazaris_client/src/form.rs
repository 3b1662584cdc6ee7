use std::path::Path;

use nazaris_models::{
    phone::{count_digits, format_phone, PHONE_DIGITS},
    site::content_type_for,
};

/// The raw values entered into the contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub work_type: String,
    pub budget: String,
    pub message: String,
    pub file: Option<FormFile>,
}

#[derive(Clone, PartialEq, Eq)]
pub struct FormFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

/// The input elements of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Phone,
    Email,
    WorkType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    /// The field that should receive focus.
    pub field: FormField,
    pub message: &'static str,
}

impl ContactForm {
    /// Updates the phone field as the user types, formatting the input as
    /// `+7 (XXX) XXX-XX-XX`.
    pub fn input_phone(&mut self, raw: &str) {
        self.phone = format_phone(raw);
    }

    /// Checks the required fields in the order they appear in the form and
    /// reports the first invalid one.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |field, message| Err(ValidationError { field, message });

        if self.name.trim().is_empty() {
            return invalid(FormField::Name, "Укажите имя.");
        }
        if count_digits(self.phone.trim()) < PHONE_DIGITS {
            return invalid(FormField::Phone, "Укажите корректный номер телефона.");
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return invalid(FormField::Email, "Укажите корректный email.");
        }
        if self.work_type.is_empty() {
            return invalid(FormField::WorkType, "Выберите тип работы.");
        }

        Ok(())
    }

    /// Clears all fields, including the selected file.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl FormFile {
    /// Reads the file at `path`, deriving the filename and content type from
    /// the path.
    pub async fn from_path(path: &Path) -> std::io::Result<Self> {
        let content = tokio::fs::read(path).await?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            filename,
            content_type: Some(content_type_for(path).into()),
            content,
        })
    }
}

impl std::fmt::Debug for FormFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormFile")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("content", &format_args!("<{} bytes>", self.content.len()))
            .finish()
    }
}
