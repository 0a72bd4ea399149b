//! Client-side form checks, run before any request is made.

use thiserror::Error;

pub const ALLOWED_EMAIL_DOMAINS: [&str; 3] = ["@gmail.com", "@hotmail.com", "@outlook.com"];

pub const TITLE_MIN: usize = 5;
pub const TITLE_MAX: usize = 100;
pub const THREAD_CONTENT_MIN: usize = 20;
pub const REPLY_MIN: usize = 10;
pub const ABOUT_ME_MAX: usize = 1000;
pub const REPORT_DESCRIPTION_MAX: usize = 500;
pub const CHAT_MESSAGE_MAX: usize = 500;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Email must be from Gmail, Hotmail, or Outlook")]
    EmailDomain,
    #[error("Title is required")]
    TitleRequired,
    #[error("Title must be at least {TITLE_MIN} characters")]
    TitleTooShort,
    #[error("Title must be at most {TITLE_MAX} characters")]
    TitleTooLong,
    #[error("Content is required")]
    ContentRequired,
    #[error("Content must be at least {THREAD_CONTENT_MIN} characters")]
    ContentTooShort,
    #[error("Reply cannot be empty")]
    ReplyEmpty,
    #[error("Reply must be at least {REPLY_MIN} characters")]
    ReplyTooShort,
    #[error("About me must be at most {ABOUT_ME_MAX} characters")]
    AboutMeTooLong,
    #[error("Please select a reason for reporting")]
    ReportReasonRequired,
    #[error("Description must be at most {REPORT_DESCRIPTION_MAX} characters")]
    ReportDescriptionTooLong,
    #[error("Message cannot be empty")]
    MessageEmpty,
    #[error("Message must be at most {CHAT_MESSAGE_MAX} characters")]
    MessageTooLong,
    #[error("Please enter a ban reason")]
    BanReasonRequired,
    #[error("New passwords do not match")]
    PasswordMismatch,
    #[error("New password must differ from the current one")]
    PasswordUnchanged,
    #[error("Please select a payment method")]
    PaymentMethodRequired,
    #[error("Please select an expiry date")]
    ExpiryRequired,
}

fn chars(s: &str) -> usize {
    s.chars().count()
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

pub fn email_domain(email: &str) -> Result<(), ValidationError> {
    let email = email.trim().to_ascii_lowercase();
    if ALLOWED_EMAIL_DOMAINS.iter().any(|d| email.ends_with(d)) {
        Ok(())
    } else {
        Err(ValidationError::EmailDomain)
    }
}

pub fn login_form(email: &str, password: &str) -> Result<(), ValidationError> {
    if blank(email) || password.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    email_domain(email)
}

pub fn register_form(
    email: &str,
    username: &str,
    password: &str,
    invitation_code: &str,
) -> Result<(), ValidationError> {
    if blank(email) || blank(username) || password.is_empty() || blank(invitation_code) {
        return Err(ValidationError::MissingFields);
    }
    email_domain(email)
}

pub fn thread_form(title: &str, content: &str) -> Result<(), ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    match chars(title) {
        n if n < TITLE_MIN => return Err(ValidationError::TitleTooShort),
        n if n > TITLE_MAX => return Err(ValidationError::TitleTooLong),
        _ => {}
    }
    let content = content.trim();
    if content.is_empty() {
        return Err(ValidationError::ContentRequired);
    }
    if chars(content) < THREAD_CONTENT_MIN {
        return Err(ValidationError::ContentTooShort);
    }
    Ok(())
}

pub fn reply(content: &str) -> Result<(), ValidationError> {
    if blank(content) {
        return Err(ValidationError::ReplyEmpty);
    }
    if chars(content.trim()) < REPLY_MIN {
        return Err(ValidationError::ReplyTooShort);
    }
    Ok(())
}

pub fn about_me(text: &str) -> Result<(), ValidationError> {
    if chars(text) > ABOUT_ME_MAX {
        return Err(ValidationError::AboutMeTooLong);
    }
    Ok(())
}

pub fn report(reason: &str, description: &str) -> Result<(), ValidationError> {
    if blank(reason) {
        return Err(ValidationError::ReportReasonRequired);
    }
    if chars(description) > REPORT_DESCRIPTION_MAX {
        return Err(ValidationError::ReportDescriptionTooLong);
    }
    Ok(())
}

/// Returns the trimmed message to send.
pub fn chat_message(raw: &str) -> Result<&str, ValidationError> {
    let message = raw.trim();
    if message.is_empty() {
        return Err(ValidationError::MessageEmpty);
    }
    if chars(message) > CHAT_MESSAGE_MAX {
        return Err(ValidationError::MessageTooLong);
    }
    Ok(message)
}

pub fn ban_reason(reason: &str) -> Result<&str, ValidationError> {
    let reason = reason.trim();
    if reason.is_empty() {
        Err(ValidationError::BanReasonRequired)
    } else {
        Ok(reason)
    }
}

pub fn password_change(current: &str, new: &str, confirm: &str) -> Result<(), ValidationError> {
    if current.is_empty() || new.is_empty() || confirm.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    if new != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    if new == current {
        return Err(ValidationError::PasswordUnchanged);
    }
    Ok(())
}

pub fn payment_method<T>(selected: Option<T>) -> Result<T, ValidationError> {
    selected.ok_or(ValidationError::PaymentMethodRequired)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_domain_is_case_insensitive() {
        assert!(email_domain("neo@gmail.com").is_ok());
        assert!(email_domain("Neo@HotMail.COM").is_ok());
        assert!(email_domain("neo@outlook.com ").is_ok());
        assert_eq!(email_domain("neo@yahoo.com"), Err(ValidationError::EmailDomain));
        assert_eq!(email_domain("gmail.com"), Err(ValidationError::EmailDomain));
    }

    #[test]
    fn test_auth_forms_require_every_field() {
        assert_eq!(login_form("", "pw"), Err(ValidationError::MissingFields));
        assert_eq!(
            register_form("a@gmail.com", "neo", "pw", " "),
            Err(ValidationError::MissingFields)
        );
        assert!(register_form("a@gmail.com", "neo", "pw", "WAVE").is_ok());
        assert_eq!(login_form("a@proton.me", "pw"), Err(ValidationError::EmailDomain));
    }

    #[test]
    fn test_thread_bounds() {
        let body = "x".repeat(THREAD_CONTENT_MIN);
        assert_eq!(thread_form("", &body), Err(ValidationError::TitleRequired));
        assert_eq!(thread_form("abcd", &body), Err(ValidationError::TitleTooShort));
        assert!(thread_form("abcde", &body).is_ok());
        assert!(thread_form(&"t".repeat(TITLE_MAX), &body).is_ok());
        assert_eq!(
            thread_form(&"t".repeat(TITLE_MAX + 1), &body),
            Err(ValidationError::TitleTooLong)
        );
        assert_eq!(thread_form("Valid title", " "), Err(ValidationError::ContentRequired));
        assert_eq!(
            thread_form("Valid title", &"x".repeat(THREAD_CONTENT_MIN - 1)),
            Err(ValidationError::ContentTooShort)
        );
    }

    #[test]
    fn test_reply_and_report() {
        assert_eq!(reply("   "), Err(ValidationError::ReplyEmpty));
        assert_eq!(reply("too short"), Err(ValidationError::ReplyTooShort));
        assert!(reply("long enough reply").is_ok());

        assert_eq!(report("", ""), Err(ValidationError::ReportReasonRequired));
        assert_eq!(
            report("Spam", &"d".repeat(REPORT_DESCRIPTION_MAX + 1)),
            Err(ValidationError::ReportDescriptionTooLong)
        );
        assert!(report("Spam", &"d".repeat(REPORT_DESCRIPTION_MAX)).is_ok());
    }

    #[test]
    fn test_chat_message_is_trimmed() {
        assert_eq!(chat_message("  gg  "), Ok("gg"));
        assert_eq!(chat_message(" \n "), Err(ValidationError::MessageEmpty));
        assert_eq!(
            chat_message(&"m".repeat(CHAT_MESSAGE_MAX + 1)),
            Err(ValidationError::MessageTooLong)
        );
    }

    #[test]
    fn test_password_change_rules() {
        assert_eq!(password_change("", "b", "b"), Err(ValidationError::MissingFields));
        assert_eq!(password_change("a", "b", "c"), Err(ValidationError::PasswordMismatch));
        assert_eq!(password_change("a", "a", "a"), Err(ValidationError::PasswordUnchanged));
        assert!(password_change("a", "b", "b").is_ok());
    }

    #[test]
    fn test_misc_required_inputs() {
        assert_eq!(ban_reason("  "), Err(ValidationError::BanReasonRequired));
        assert_eq!(ban_reason(" cheating "), Ok("cheating"));
        assert_eq!(payment_method::<u8>(None), Err(ValidationError::PaymentMethodRequired));
        assert!(about_me(&"a".repeat(ABOUT_ME_MAX)).is_ok());
        assert_eq!(
            about_me(&"a".repeat(ABOUT_ME_MAX + 1)),
            Err(ValidationError::AboutMeTooLong)
        );
    }
}
