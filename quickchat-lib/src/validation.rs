/// Advisory ceiling on message body length, in characters.
pub const MAX_MESSAGE_LEN: usize = 250;

/// Outcome of the message length check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthCheck {
    Ready,
    /// Body exceeds [`MAX_MESSAGE_LEN`] by this many characters.
    OverLimit(usize),
}

impl LengthCheck {
    pub fn is_ready(&self) -> bool {
        matches!(self, LengthCheck::Ready)
    }

    /// Human-readable feedback, stating the exact overflow count.
    pub fn feedback(&self) -> String {
        match self {
            LengthCheck::Ready => "Message ready to send.".to_string(),
            LengthCheck::OverLimit(over_by) => {
                format!("Message exceeds 250 characters by {over_by}, please reduce size.")
            }
        }
    }
}

/// Non-empty and at most 10 characters.
pub fn check_message_id(id: &str) -> bool {
    !id.is_empty() && id.chars().count() <= 10
}

/// Loose E.164-like check for message recipients: leading `+`, total length
/// in [11, 13]. Does not validate country code digits.
pub fn check_recipient_cell(number: &str) -> bool {
    number.starts_with('+') && (11..=13).contains(&number.chars().count())
}

pub fn validate_message_length(body: &str) -> LengthCheck {
    let length = body.chars().count();
    if length <= MAX_MESSAGE_LEN {
        LengthCheck::Ready
    } else {
        LengthCheck::OverLimit(length - MAX_MESSAGE_LEN)
    }
}

/// Usernames must contain an underscore and be at most 5 characters.
/// Intentionally this restrictive; do not relax.
pub fn check_username(name: &str) -> bool {
    let length = name.chars().count();
    (1..=5).contains(&length) && name.contains('_')
}

/// At least 8 characters with one ASCII uppercase letter, one digit and one
/// non-alphanumeric character, anywhere in the string.
pub fn check_password_complexity(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Exactly `+27` followed by exactly 9 digits. Stricter than
/// [`check_recipient_cell`]; used only for own-account registration.
pub fn check_cellphone(number: &str) -> bool {
    match number.strip_prefix("+27") {
        Some(rest) => rest.len() == 9 && rest.chars().all(|c| c.is_ascii_digit()),
        None => false,
    }
}
