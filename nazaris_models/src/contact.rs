use nutype::nutype;

use crate::{phone::PhoneNumber, work_type::WorkType};

/// A single submission of the contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: ContactName,
    pub phone: PhoneNumber,
    pub email: ContactEmail,
    pub work_type: WorkType,
    pub budget: Option<ContactBudget>,
    pub message: Option<ContactMessageContent>,
    pub attachment: Option<ContactAttachment>,
}

#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

/// Loosely validated email address of the submitter. Anything containing an
/// `@` is accepted.
#[nutype(
    sanitize(trim),
    validate(predicate = |s: &str| s.contains('@')),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    sanitize(trim),
    derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize)
)]
pub struct ContactBudget(String);

#[nutype(
    sanitize(trim),
    derive(Debug, Clone, PartialEq, Eq, From, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageContent(String);

/// A file uploaded together with the submission, fully buffered in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct ContactAttachment {
    pub filename: String,
    pub content_type: Option<String>,
    pub content: Vec<u8>,
}

impl ContactAttachment {
    /// Used when the client did not send a filename.
    pub const DEFAULT_FILENAME: &'static str = "attachment";

    pub fn new(filename: Option<&str>, content_type: Option<String>, content: Vec<u8>) -> Self {
        let filename = filename
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(Self::DEFAULT_FILENAME)
            .to_owned();
        Self {
            filename,
            content_type,
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

impl std::fmt::Debug for ContactAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactAttachment")
            .field("filename", &self.filename)
            .field("content_type", &self.content_type)
            .field("content", &format_args!("<{} bytes>", self.content.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_and_required() {
        assert_eq!(*ContactName::try_from("  Ivan ").unwrap(), "Ivan");
        assert!(ContactName::try_from(" \t").is_err());
    }

    #[test]
    fn email_requires_at_sign() {
        assert_eq!(*ContactEmail::try_from(" a@b.com ").unwrap(), "a@b.com");
        assert!(ContactEmail::try_from("ivan.example.com").is_err());
        assert!(ContactEmail::try_from("").is_err());
    }

    #[test]
    fn long_fields_are_accepted() {
        let long = "x".repeat(10_000);
        assert_eq!(ContactName::try_from(long.as_str()).unwrap().len(), 10_000);
        assert_eq!(ContactMessageContent::new(long.as_str()).len(), 10_000);
        assert_eq!(*ContactBudget::new(" 100 000 ₽ "), "100 000 ₽");
    }

    #[test]
    fn attachment_default_filename() {
        let attachment = ContactAttachment::new(Some(" "), None, vec![1]);
        assert_eq!(attachment.filename, ContactAttachment::DEFAULT_FILENAME);

        let attachment = ContactAttachment::new(None, None, Vec::new());
        assert_eq!(attachment.filename, ContactAttachment::DEFAULT_FILENAME);
        assert!(attachment.is_empty());
    }

    #[test]
    fn attachment_debug_hides_content() {
        let attachment = ContactAttachment::new(Some("brief.pdf"), None, vec![0; 3]);
        assert!(format!("{attachment:?}").contains("<3 bytes>"));
    }
}
