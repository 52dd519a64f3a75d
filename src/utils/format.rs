/// Keeps only the ASCII digits of a string. Used everywhere a field is
/// compared or transmitted in digits-only form (national ID, phone, postal code).
pub fn digits_only(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Formats a phone number for display: `(XX) XXXXX-XXXX` for 11 digits,
/// `(XX) XXXX-XXXX` for 10. Anything else is returned unchanged.
pub fn format_phone(phone: &str) -> String {
    let digits = digits_only(phone);
    match digits.len() {
        11 => format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..]),
        10 => format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..]),
        _ => phone.to_string(),
    }
}
