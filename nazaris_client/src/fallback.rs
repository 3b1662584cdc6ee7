use crate::form::ContactForm;

pub const SUBJECT: &str = "Заявка с сайта NAZARIS";
pub const SUPPORT_PHONE: &str = "+79811031203";
pub const SUPPORT_PHONE_DISPLAY: &str = "+7 981 103-12-03";

const NOT_SPECIFIED: &str = "Не указан";
const NO_MESSAGE: &str = "Нет дополнительной информации";
const LINK_STYLE: &str = "color: #6366f1; text-decoration: underline;";

/// Direct contact options offered when the form could not be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackContact {
    pub email: String,
    /// A `mailto:` link prefilled with the contents of the form.
    pub mailto: String,
    pub tel: String,
}

impl FallbackContact {
    pub fn new(form: &ContactForm, support_email: &str) -> Self {
        let or = |value: &str, default: &'static str| {
            let value = value.trim();
            if value.is_empty() {
                default.to_owned()
            } else {
                value.to_owned()
            }
        };

        let body = [
            format!("Имя: {}", form.name.trim()),
            format!("Телефон: {}", form.phone.trim()),
            format!("Email: {}", form.email.trim()),
            format!("Тип работы: {}", or(&form.work_type, NOT_SPECIFIED)),
            format!("Бюджет: {}", or(&form.budget, NOT_SPECIFIED)),
            format!("Сообщение: {}", or(&form.message, NO_MESSAGE)),
        ]
        .join("\n");

        let mailto = format!(
            "mailto:{support_email}?subject={}&body={}",
            urlencoding::encode(SUBJECT),
            urlencoding::encode(&body),
        );

        Self {
            email: support_email.into(),
            mailto,
            tel: format!("tel:{SUPPORT_PHONE}"),
        }
    }

    /// Renders the message shown in place of the success message.
    pub fn to_html(&self) -> String {
        format!(
            "Ошибка отправки через форму. Пожалуйста, свяжитесь с нами напрямую:<br>\
             <a href=\"{mailto}\" style=\"{LINK_STYLE}\">{email}</a> или \
             <a href=\"{tel}\" style=\"{LINK_STYLE}\">{SUPPORT_PHONE_DISPLAY}</a>",
            mailto = self.mailto,
            email = self.email,
            tel = self.tel,
        )
    }
}
