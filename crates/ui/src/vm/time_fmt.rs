use chrono::{DateTime, Local, Utc};

/// Local calendar date shown next to saved quizzes.
#[must_use]
pub fn format_created(value: DateTime<Utc>) -> String {
    value.with_timezone(&Local).format("%b %-d, %Y").to_string()
}
