use nutype::nutype;
use serde::{Deserialize, Serialize};

/// The categories of work offered in the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkTypeKind {
    UxUi,
    WebDev,
    Analytics,
    Backend,
    Frontend,
    Bots,
    Automation,
    Other,
}

impl WorkTypeKind {
    pub const ALL: [Self; 8] = [
        Self::UxUi,
        Self::WebDev,
        Self::Analytics,
        Self::Backend,
        Self::Frontend,
        Self::Bots,
        Self::Automation,
        Self::Other,
    ];

    /// The value submitted by the contact form.
    pub fn code(self) -> &'static str {
        match self {
            Self::UxUi => "ux-ui",
            Self::WebDev => "web-dev",
            Self::Analytics => "analytics",
            Self::Backend => "backend",
            Self::Frontend => "frontend",
            Self::Bots => "bots",
            Self::Automation => "automation",
            Self::Other => "other",
        }
    }

    /// The human readable label used in outgoing emails.
    pub fn label(self) -> &'static str {
        match self {
            Self::UxUi => "UX/UI дизайн",
            Self::WebDev => "Веб-разработка",
            Self::Analytics => "Аналитика",
            Self::Backend => "Backend разработка",
            Self::Frontend => "Frontend разработка",
            Self::Bots => "Разработка ботов",
            Self::Automation => "Автоматизация бизнеса",
            Self::Other => "Другое",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.code() == code)
    }
}

/// The work type code as submitted. Codes outside of [`WorkTypeKind`] are
/// accepted and kept verbatim.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct WorkType(String);

impl WorkType {
    pub fn kind(&self) -> Option<WorkTypeKind> {
        WorkTypeKind::from_code(self.as_str())
    }

    /// The label of a known work type, or the raw code otherwise.
    pub fn label(&self) -> &str {
        match self.kind() {
            Some(kind) => kind.label(),
            None => self.as_str(),
        }
    }
}

impl From<WorkTypeKind> for WorkType {
    fn from(value: WorkTypeKind) -> Self {
        Self::try_new(value.code()).expect("work type codes are valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_code() {
        let work_type = WorkType::try_from("frontend").unwrap();
        assert_eq!(work_type.kind(), Some(WorkTypeKind::Frontend));
        assert_eq!(work_type.label(), "Frontend разработка");
    }

    #[test]
    fn unknown_code_is_its_own_label() {
        let work_type = WorkType::try_from("gamedev").unwrap();
        assert_eq!(work_type.kind(), None);
        assert_eq!(work_type.label(), "gamedev");
    }

    #[test]
    fn code_is_trimmed() {
        let work_type = WorkType::try_from("  ux-ui ").unwrap();
        assert_eq!(work_type.label(), "UX/UI дизайн");
    }

    #[test]
    fn empty_code() {
        assert!(WorkType::try_from("").is_err());
        assert!(WorkType::try_from("   ").is_err());
    }

    #[test]
    fn serde_uses_codes() {
        let json = serde_json::to_string(&WorkTypeKind::WebDev).unwrap();
        assert_eq!(json, "\"web-dev\"");
        let kind = serde_json::from_str::<WorkTypeKind>("\"ux-ui\"").unwrap();
        assert_eq!(kind, WorkTypeKind::UxUi);
    }
}
