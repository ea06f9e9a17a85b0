// services/response_codes.rs

/// Failure reasons for the gateway's response codes. `00` is success and is
/// deliberately absent.
const RESPONSE_CODE_REASONS: &[(&str, &str)] = &[
    ("01", "Transaction already exists"),
    ("02", "Invalid merchant"),
    ("03", "Request data was malformed"),
    ("04", "Payment could not be initialized because the website is temporarily locked"),
    ("05", "The payment password was entered incorrectly too many times"),
    ("06", "The authentication password was incorrect"),
    ("07", "Transaction suspected of fraud"),
    ("09", "The card or account is locked"),
    ("10", "Card details failed verification more than 3 times"),
    ("11", "The payment window has expired"),
    ("12", "The card or account is locked"),
    ("24", "The customer cancelled the transaction"),
    ("51", "Insufficient account balance"),
    ("65", "The account exceeded its daily transaction limit"),
    ("75", "The paying bank is under maintenance"),
    ("99", "Unknown error"),
];

pub fn reason_for(code: &str) -> Option<&'static str> {
    RESPONSE_CODE_REASONS
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, reason)| *reason)
}

#[cfg(test)]
pub(crate) fn known_codes() -> impl Iterator<Item = &'static str> {
    RESPONSE_CODE_REASONS.iter().map(|(code, _)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_code_has_no_reason() {
        assert_eq!(reason_for("00"), None);
    }

    #[test]
    fn known_codes_resolve() {
        assert_eq!(reason_for("51"), Some("Insufficient account balance"));
        assert_eq!(reason_for("24"), Some("The customer cancelled the transaction"));
        assert_eq!(known_codes().count(), 16);
    }

    #[test]
    fn unknown_codes_do_not_resolve() {
        assert_eq!(reason_for("42"), None);
        assert_eq!(reason_for(""), None);
        assert_eq!(reason_for("5"), None);
    }
}
