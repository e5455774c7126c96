//! Field shape checks shared by the contact and login forms.

use std::sync::LazyLock;

use regex::Regex;

/// `local@label.label.tld`: no whitespace or markup characters, domain labels
/// without leading/trailing hyphens, alphabetic TLD of two or more letters.
static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[A-Za-z0-9._%+-]+@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
    )
    .ok()
});

/// Digits with optional leading `+` and `()-` / space separators.
static PHONE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\+?[0-9()\- ]+$").ok());

pub fn is_valid_email(email: &str) -> bool {
    EMAIL
        .as_ref()
        .is_some_and(|re| re.is_match(email.trim()))
}

/// Brazilian phone: 10 to 13 digits.
pub fn is_valid_phone(phone: &str) -> bool {
    let phone = phone.trim();
    if !PHONE.as_ref().is_some_and(|re| re.is_match(phone)) {
        return false;
    }
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    (10..=13).contains(&digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patterns_compile() {
        assert!(EMAIL.is_some());
        assert!(PHONE.is_some());
    }

    #[test]
    fn emails() {
        for ok in ["ana@escola.br", "  diretoria@colegio.edu.br ", "a.b+c@x.io", "ti@e-escola.com.br"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in [
            "",
            "ana",
            "ana@",
            "@escola.br",
            "ana@escola",
            "a@b@c.d",
            "ana @x.io",
            "a@.x",
            "a@x..io",
            "a,b@c.d",
            "ana<x>@escola.br",
            "ana@-.x",
            "ana@-escola.br",
            "ana@escola.b",
            "ana@esc!ola.br",
            "ana@escola.br1",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn phones() {
        assert!(is_valid_phone("(11) 98888-7777"));
        assert!(is_valid_phone("+55 11 98888-7777"));
        assert!(is_valid_phone("5511988887777"));
        assert!(!is_valid_phone("98888-7777"));
        assert!(!is_valid_phone("11 9888a-7777"));
        assert!(!is_valid_phone("11 98888+7777"));
        assert!(!is_valid_phone("+55 (11) 98888-77770"));
    }
}
