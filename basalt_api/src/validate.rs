use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

pub const NAME_MIN_LEN: usize = 2;
pub const NAME_MAX_LEN: usize = 15;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z가-힣]+$").expect("name pattern"));
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9A-Za-z]([-_.]?[0-9A-Za-z])*@[0-9A-Za-z]([-_.]?[0-9A-Za-z])*\.[A-Za-z]{2,3}$")
        .expect("email pattern")
});
// the regex crate has no lookahead, so the letter and digit requirements
// are separate patterns
static PASSWORD_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9@$!%*#?&]{8,16}$").expect("password pattern"));
static PASSWORD_LETTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]").expect("password letter pattern"));
static PASSWORD_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]").expect("password digit pattern"));

/// A rejected sign-up field. The display text is what the user is alerted
/// with.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name using letters only.")]
    Name,
    #[error("Your name must be between 2 and 15 characters.")]
    NameLength,
    #[error("Please enter a valid email address.")]
    Email,
    #[error("Passwords must be 8 to 16 characters and contain a letter and a number.")]
    Password,
}

/// Contents of the sign-up form. Also the body of `POST /user`.
#[derive(Clone, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpInput {
    /// Check name, email then password. Stops at the first rule that fails.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        Ok(())
    }
}

pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() || !NAME_PATTERN.is_match(name) {
        return Err(ValidationError::Name);
    }
    let len = name.chars().count();
    if len < NAME_MIN_LEN || len > NAME_MAX_LEN {
        return Err(ValidationError::NameLength);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || !EMAIL_PATTERN.is_match(email) {
        return Err(ValidationError::Email);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty()
        || !PASSWORD_CHARSET.is_match(password)
        || !PASSWORD_LETTER.is_match(password)
        || !PASSWORD_DIGIT.is_match(password)
    {
        return Err(ValidationError::Password);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: &str, email: &str, password: &str) -> SignUpInput {
        SignUpInput {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn accepts_valid_input() {
        assert_eq!(input("Alice", "alice@example.com", "hunter22").validate(), Ok(()));
        assert_eq!(input("김민수", "min.su@mail.co.kr", "abc12345!").validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_names() {
        for name in ["", "Al1ce", "alice smith", "bob!", "😀😀"] {
            assert_eq!(validate_name(name), Err(ValidationError::Name), "{name:?}");
        }
    }

    #[test]
    fn name_length_bounds() {
        assert_eq!(validate_name("A"), Err(ValidationError::NameLength));
        assert_eq!(validate_name("Ab"), Ok(()));
        assert_eq!(validate_name(&"a".repeat(15)), Ok(()));
        assert_eq!(validate_name(&"a".repeat(16)), Err(ValidationError::NameLength));
        // counted in characters, not bytes
        assert_eq!(validate_name("가나다라마바사아자차카타파하가"), Ok(()));
    }

    #[test]
    fn rejects_bad_emails() {
        for email in [
            "",
            "alice",
            "alice@",
            "@example.com",
            "alice@example",
            "alice@example.comm",
            "alice..b@example.com",
            "alice @example.com",
        ] {
            assert_eq!(validate_email(email), Err(ValidationError::Email), "{email:?}");
        }
        assert_eq!(validate_email("a-b_c.d@sub-domain.org"), Ok(()));
    }

    #[test]
    fn rejects_bad_passwords() {
        for password in [
            "",
            "short1",
            "onlyletters",
            "12345678",
            "has space 123",
            "waytoolongpassword123",
            "unicode비밀번호123",
        ] {
            assert_eq!(
                validate_password(password),
                Err(ValidationError::Password),
                "{password:?}"
            );
        }
        assert_eq!(validate_password("abcd1234"), Ok(()));
        assert_eq!(validate_password("Abcdefgh12345!@#"), Ok(()));
    }

    #[test]
    fn first_failing_rule_wins() {
        // everything is wrong, only the name is reported
        assert_eq!(input("", "", "").validate(), Err(ValidationError::Name));
        assert_eq!(input("A", "bad", "bad").validate(), Err(ValidationError::NameLength));
        assert_eq!(input("Alice", "bad", "bad").validate(), Err(ValidationError::Email));
        assert_eq!(
            input("Alice", "alice@example.com", "bad").validate(),
            Err(ValidationError::Password)
        );
    }
}
