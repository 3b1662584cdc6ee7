use nazaris_models::contact::{ContactAttachment, ContactSubmission};

const NOT_SPECIFIED: &str = "не указан";
const EMPTY: &str = "—";

pub(crate) fn subject(submission: &ContactSubmission) -> String {
    format!("Заявка NAZARIS: {} — {}", *submission.name, submission.phone)
}

/// Renders the plain text body. Every line is always present, so that
/// incoming requests share the same shape.
pub(crate) fn body(
    submission: &ContactSubmission,
    attachment: Option<&ContactAttachment>,
) -> String {
    let budget = submission
        .budget
        .as_deref()
        .map(String::as_str)
        .filter(|budget| !budget.is_empty())
        .unwrap_or(NOT_SPECIFIED);
    let message = submission
        .message
        .as_deref()
        .map(String::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(EMPTY);
    let attachment = match attachment {
        Some(attachment) => format!("Прикреплен файл: {}", attachment.filename),
        None => "Файлы не прикреплены".into(),
    };

    [
        "Новая заявка с сайта NAZARIS",
        "",
        &format!("Имя: {}", *submission.name),
        &format!("Телефон: {}", submission.phone),
        &format!("Email: {}", *submission.email),
        &format!("Тип работы: {}", submission.work_type.label()),
        &format!("Бюджет: {budget}"),
        "",
        "Дополнительная информация:",
        message,
        "",
        &attachment,
    ]
    .join("\n")
}
