//! Relative-time display for notifications.
//!
//! The caller supplies the reference instant (normally stamped by the
//! [`Ticker`](crate::ticker::Ticker)) so periodic UI refresh can force
//! recomputation without reading the wall clock at every call site.

use chrono::{DateTime, Datelike, Utc};

use taskdeck_types::Notification;

/// During this year a batch of backend rows was written with the clock set
/// one year ahead. Future timestamps carrying exactly this year are
/// reinterpreted minus one year; delete this constant and
/// [`skew_corrected_created_at`] to drop the workaround.
const CLOCK_SKEW_YEAR: i32 = 2025;

pub fn format_notification_time(
    notification: &Notification,
    reference: DateTime<Utc>,
) -> String {
    // Server-supplied relative string wins when present and meaningful.
    if let Some(rel) = notification.created_at_relative.as_deref() {
        if rel != "Unknown" {
            return normalize_relative(rel);
        }
    }

    let Some(created_at) = notification.created_at else {
        return "Unknown time".to_string();
    };

    if created_at > reference {
        if let Some(corrected) = skew_corrected_created_at(created_at) {
            if corrected > reference {
                return "Just now".to_string();
            }
            return humanize(reference - corrected);
        }
        return "Just now".to_string();
    }

    humanize(reference - created_at)
}

/// Normalize a backend relative string: `now` reads as "Just now", a value
/// with a known unit suffix (`m`, `h`, `d`, `w`, `mo`, `y`) gains " ago",
/// anything else passes through untouched.
fn normalize_relative(rel: &str) -> String {
    if rel == "now" {
        return "Just now".to_string();
    }
    let suffixed = rel.ends_with("mo")
        || matches!(rel.as_bytes().last(), Some(b'm' | b'h' | b'd' | b'w' | b'y'));
    if suffixed {
        format!("{} ago", rel)
    } else {
        rel.to_string()
    }
}

fn humanize(delta: chrono::Duration) -> String {
    let seconds = delta.num_seconds();
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else if seconds > 30 {
        format!("{}s ago", seconds)
    } else {
        "Just now".to_string()
    }
}

/// Compatibility shim for a known bad-data period, not a general clock-skew
/// corrector: a timestamp in [`CLOCK_SKEW_YEAR`] is shifted back one year.
/// Returns None for any other year (or an impossible shifted date), in which
/// case the future timestamp renders as "Just now".
fn skew_corrected_created_at(created_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    if created_at.year() != CLOCK_SKEW_YEAR {
        return None;
    }
    created_at.with_year(CLOCK_SKEW_YEAR - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskdeck_types::{NotificationPriority, NotificationType};

    fn notification(
        created_at: Option<DateTime<Utc>>,
        created_at_relative: Option<&str>,
    ) -> Notification {
        Notification {
            id: "n1".into(),
            user_id: "u1".into(),
            kind: NotificationType::Reminder,
            title: "t".into(),
            message: "m".into(),
            priority: NotificationPriority::Medium,
            action_url: None,
            metadata: None,
            is_read: false,
            created_at,
            created_at_relative: created_at_relative.map(Into::into),
            updated_at: None,
        }
    }

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn backend_relative_string_is_preferred() {
        let reference = at("2024-06-01T00:00:00Z");
        for (rel, expected) in [
            ("5m", "5m ago"),
            ("2h", "2h ago"),
            ("3d", "3d ago"),
            ("1w", "1w ago"),
            ("2mo", "2mo ago"),
            ("1y", "1y ago"),
            ("now", "Just now"),
            ("a while", "a while"),
        ] {
            let n = notification(Some(at("2024-01-01T00:00:00Z")), Some(rel));
            assert_eq!(format_notification_time(&n, reference), expected, "{rel}");
        }
    }

    #[test]
    fn unknown_relative_falls_back_to_computed() {
        let reference = at("2024-06-01T02:00:00Z");
        let n = notification(Some(at("2024-06-01T00:00:00Z")), Some("Unknown"));
        assert_eq!(format_notification_time(&n, reference), "2h ago");
    }

    #[test]
    fn computed_buckets() {
        let reference = at("2024-06-10T12:00:00Z");
        let cases = [
            ("2024-06-08T11:00:00Z", "2d ago"),
            ("2024-06-10T09:00:00Z", "3h ago"),
            ("2024-06-10T11:55:00Z", "5m ago"),
            ("2024-06-10T11:59:15Z", "45s ago"),
            ("2024-06-10T11:59:45Z", "Just now"),
        ];
        for (created, expected) in cases {
            let n = notification(Some(at(created)), None);
            assert_eq!(format_notification_time(&n, reference), expected, "{created}");
        }
    }

    #[test]
    fn missing_timestamp_is_unknown() {
        let n = notification(None, None);
        assert_eq!(
            format_notification_time(&n, at("2024-06-01T00:00:00Z")),
            "Unknown time"
        );
    }

    #[test]
    fn future_timestamp_is_just_now() {
        let reference = at("2023-06-01T00:00:00Z");
        let n = notification(Some(at("2023-07-01T00:00:00Z")), None);
        assert_eq!(format_notification_time(&n, reference), "Just now");
    }

    #[test]
    fn skew_year_is_corrected_not_clamped() {
        // A timestamp in the flagged year, one year ahead of the reference:
        // the delta is computed from (created_at - 1 year), not "Just now".
        let reference = at("2024-06-02T12:00:00Z");
        let n = notification(Some(at("2025-06-01T12:00:00Z")), None);
        assert_eq!(format_notification_time(&n, reference), "1d ago");
    }

    #[test]
    fn skew_corrected_instant_still_ahead_is_just_now() {
        let reference = at("2024-01-01T00:00:00Z");
        let n = notification(Some(at("2025-06-01T00:00:00Z")), None);
        assert_eq!(format_notification_time(&n, reference), "Just now");
    }
}
