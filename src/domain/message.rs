use thiserror::Error;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Strict ISO-8601 UTC layout used for message timestamps, `since` bounds and
/// the server-assigned `received_at` field. Fixed width keeps lexicographic
/// ordering equal to chronological ordering.
pub const TS_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

pub const MAX_TEXT_CHARS: usize = 4096;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: &'static str,
}

/// A message that passed format validation and is ready for insertion.
/// Construction is the only way to obtain one, so the repository never sees
/// unvalidated field values.
#[derive(Debug, Clone)]
pub struct NewMessage {
    pub message_id: String,
    pub from_address: String,
    pub to_address: String,
    pub timestamp: String,
    pub text: Option<String>,
}

impl NewMessage {
    /// Validates all field formats and returns the message on success.
    ///
    /// # Errors
    /// Returns `ValidationError` naming the offending field when any format
    /// constraint is violated.
    pub fn new(
        message_id: String,
        from_address: String,
        to_address: String,
        timestamp: String,
        text: Option<String>,
    ) -> Result<Self, ValidationError> {
        if message_id.is_empty() {
            return Err(ValidationError { field: "message_id", reason: "must not be empty" });
        }
        if !is_e164(&from_address) {
            return Err(ValidationError { field: "from", reason: "must be an E.164 phone number" });
        }
        if !is_e164(&to_address) {
            return Err(ValidationError { field: "to", reason: "must be an E.164 phone number" });
        }
        if !is_utc_timestamp(&timestamp) {
            return Err(ValidationError { field: "ts", reason: "must be an ISO-8601 UTC timestamp" });
        }
        if let Some(text) = &text {
            if text.chars().count() > MAX_TEXT_CHARS {
                return Err(ValidationError { field: "text", reason: "must be at most 4096 characters" });
            }
        }

        Ok(Self { message_id, from_address, to_address, timestamp, text })
    }
}

/// Filters applied conjunctively by the query engine.
#[derive(Debug, Clone, Default)]
pub struct MessageFilter {
    /// Exact match on the sender address.
    pub from_address: Option<String>,
    /// Inclusive lower bound on the message timestamp.
    pub since: Option<String>,
    /// Case-insensitive substring match against the text field.
    pub q: Option<String>,
}

/// E.164: `+` followed by 2 to 15 digits, first digit non-zero.
fn is_e164(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('+') else {
        return false;
    };
    (2..=15).contains(&digits.len())
        && digits.starts_with(|c: char| ('1'..='9').contains(&c))
        && digits.chars().all(|c| c.is_ascii_digit())
}

/// Accepts exactly `YYYY-MM-DDTHH:MM:SSZ` with a valid calendar date and time.
fn is_utc_timestamp(value: &str) -> bool {
    PrimitiveDateTime::parse(value, TS_FORMAT).is_ok()
}
