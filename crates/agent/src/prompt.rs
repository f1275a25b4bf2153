//! System prompt rendering.
//!
//! One named placeholder, `{{current_datetime}}`, is substituted with a
//! human-readable date/time pinned to the Europe/Madrid timezone. A
//! template without the placeholder passes through unchanged.

use chrono::{DateTime, Utc};
use chrono_tz::Europe::Madrid;

/// The placeholder substituted at render time.
pub const DATETIME_PLACEHOLDER: &str = "{{current_datetime}}";

/// The template used when configuration does not override it.
pub const DEFAULT_SYSTEM_TEMPLATE: &str = "\
You are Concierge, the assistant for a client-services desk. You help \
clients manage their meetings, review their portfolio, and leave \
feedback about the service.

The current date and time is {{current_datetime}}.

Use the available tools whenever the user asks for calendar or portfolio \
actions; never invent event identifiers or holdings. Confirm scheduled \
times back in plain words. Be concise and courteous.";

/// Render `template` for the instant `now`.
///
/// Deterministic: the same template and `now` always produce the same
/// bytes.
pub fn render(template: &str, now: DateTime<Utc>) -> String {
    if !template.contains(DATETIME_PLACEHOLDER) {
        return template.to_string();
    }

    let local = now.with_timezone(&Madrid);
    let formatted = local.format("%A, %-d %B %Y, %H:%M").to_string();
    template.replace(DATETIME_PLACEHOLDER, &formatted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn substitutes_placeholder_in_local_time() {
        // Madrid is UTC+1 in March (before the DST switch)
        let rendered = render(
            "Now: {{current_datetime}}.",
            at("2026-03-02T10:00:00Z"),
        );
        assert_eq!(rendered, "Now: Monday, 2 March 2026, 11:00.");
    }

    #[test]
    fn summer_time_is_respected() {
        // Madrid is UTC+2 in August
        let rendered = render("{{current_datetime}}", at("2026-08-07T16:30:00Z"));
        assert_eq!(rendered, "Friday, 7 August 2026, 18:30");
    }

    #[test]
    fn absent_placeholder_is_a_noop() {
        let template = "You are a helpful assistant.";
        assert_eq!(render(template, at("2026-03-02T10:00:00Z")), template);
    }

    #[test]
    fn rendering_is_idempotent_for_fixed_now() {
        let now = at("2026-03-02T10:00:00Z");
        let first = render(DEFAULT_SYSTEM_TEMPLATE, now);
        let second = render(DEFAULT_SYSTEM_TEMPLATE, now);
        assert_eq!(first, second);
    }

    #[test]
    fn default_template_carries_the_placeholder() {
        assert!(DEFAULT_SYSTEM_TEMPLATE.contains(DATETIME_PLACEHOLDER));
        let rendered = render(DEFAULT_SYSTEM_TEMPLATE, at("2026-03-02T10:00:00Z"));
        assert!(!rendered.contains(DATETIME_PLACEHOLDER));
        assert!(rendered.contains("Monday, 2 March 2026"));
    }

    #[test]
    fn every_occurrence_is_replaced() {
        let rendered = render(
            "{{current_datetime}} / {{current_datetime}}",
            at("2026-03-02T10:00:00Z"),
        );
        assert!(!rendered.contains(DATETIME_PLACEHOLDER));
    }
}
