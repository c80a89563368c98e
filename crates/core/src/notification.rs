//! Client notification text templating.
//!
//! The operator keeps a customizable message template with `${...}`
//! placeholders. Rendering is plain substitution: a placeholder whose value
//! is missing is left in the output untouched.

use crate::error::CoreError;
use crate::slot::format_slot;
use crate::types::{Date, Time};

/// Template used until the operator saves a custom one.
pub const DEFAULT_TEMPLATE: &str = "Olá ${name}. Você possui agendado o serviço \
${serviceDescription} às ${time} do dia ${formattedDate}.";

pub const PLACEHOLDER_NAME: &str = "${name}";
pub const PLACEHOLDER_SERVICE: &str = "${serviceDescription}";
pub const PLACEHOLDER_TIME: &str = "${time}";
pub const PLACEHOLDER_DATE: &str = "${formattedDate}";

/// Date layout used in client-facing messages (pt-BR).
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Values available for substitution.
#[derive(Debug, Clone, Default)]
pub struct NotificationFields {
    pub name: Option<String>,
    pub service_description: Option<String>,
    pub time: Option<Time>,
    pub date: Option<Date>,
}

/// Format a calendar date the way client messages show it (`dd/MM/yyyy`).
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Substitute every known placeholder that has a value.
pub fn render_notification(template: &str, fields: &NotificationFields) -> String {
    let substitutions = [
        (PLACEHOLDER_NAME, fields.name.clone()),
        (PLACEHOLDER_SERVICE, fields.service_description.clone()),
        (PLACEHOLDER_TIME, fields.time.map(format_slot)),
        (PLACEHOLDER_DATE, fields.date.map(format_date)),
    ];

    substitutions
        .into_iter()
        .fold(template.to_string(), |text, (placeholder, value)| match value {
            Some(v) => text.replace(placeholder, &v),
            None => text,
        })
}

/// A template must contain some text once trimmed.
pub fn normalize_template(template: &str) -> Result<String, CoreError> {
    let trimmed = template.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Notification template must not be empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;

    fn full_fields() -> NotificationFields {
        NotificationFields {
            name: Some("Ana".to_string()),
            service_description: Some("Banho, Tosa".to_string()),
            time: NaiveTime::from_hms_opt(9, 30, 0),
            date: NaiveDate::from_ymd_opt(2024, 3, 10),
        }
    }

    #[test]
    fn default_template_renders_fully() {
        let text = render_notification(DEFAULT_TEMPLATE, &full_fields());
        assert_eq!(
            text,
            "Olá Ana. Você possui agendado o serviço Banho, Tosa às 09:30 do dia 10/03/2024."
        );
    }

    #[test]
    fn missing_values_leave_placeholders() {
        let fields = NotificationFields {
            name: Some("Ana".to_string()),
            ..Default::default()
        };
        let text = render_notification("${name} ${time} ${formattedDate}", &fields);
        assert_eq!(text, "Ana ${time} ${formattedDate}");
    }

    #[test]
    fn repeated_and_unknown_placeholders() {
        let text = render_notification("${name}/${name} ${unknown}", &full_fields());
        assert_eq!(text, "Ana/Ana ${unknown}");
    }

    #[test]
    fn template_normalization() {
        assert!(normalize_template("   ").is_err());
        assert_eq!(normalize_template("  Oi ${name} ").unwrap(), "Oi ${name}");
    }
}
