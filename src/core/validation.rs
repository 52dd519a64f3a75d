use crate::domain::model::{AddressData, PersonalData};
use crate::utils::format::digits_only;
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Every user-editable wizard field. Keys of the validation-error map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FullName,
    Email,
    NationalId,
    BirthDate,
    Phone,
    PostalCode,
    Street,
    Number,
    District,
    City,
    State,
    StateCode,
    MobilityLimitation,
    Notes,
}

impl Field {
    /// Wire-style key, matching the payload field names.
    pub fn as_str(self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::NationalId => "nationalId",
            Field::BirthDate => "birthDate",
            Field::Phone => "phone",
            Field::PostalCode => "postalCode",
            Field::Street => "street",
            Field::Number => "number",
            Field::District => "district",
            Field::City => "city",
            Field::State => "state",
            Field::StateCode => "stateCode",
            Field::MobilityLimitation => "hasMobilityLimitation",
            Field::Notes => "notes",
        }
    }

    /// Human label for prompts and error listings.
    pub fn label(self) -> &'static str {
        match self {
            Field::FullName => "Full name",
            Field::Email => "Email",
            Field::NationalId => "National ID",
            Field::BirthDate => "Birth date",
            Field::Phone => "Phone",
            Field::PostalCode => "Postal code",
            Field::Street => "Street",
            Field::Number => "Number",
            Field::District => "District",
            Field::City => "City",
            Field::State => "State",
            Field::StateCode => "State code",
            Field::MobilityLimitation => "Mobility limitation",
            Field::Notes => "Notes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed error messages for the step currently being validated.
/// BTreeMap keeps listings in a stable field order.
pub type ValidationErrors = BTreeMap<Field, String>;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// CPF check-digit validation: two weighted mod-11 passes over the first 9
/// and 10 digits, remainders of 10/11 map to 0, and a run of 11 identical
/// digits is rejected outright.
pub fn valid_national_id(id: &str) -> bool {
    let digits = digits_only(id);
    if digits.len() != 11 {
        return false;
    }
    let d: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
    if d.iter().all(|&x| x == d[0]) {
        return false;
    }
    check_digit(&d[..9]) == d[9] && check_digit(&d[..10]) == d[10]
}

fn check_digit(digits: &[u32]) -> u32 {
    let n = digits.len() as u32;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &x)| x * (n + 1 - i as u32))
        .sum();
    let rest = (sum * 10) % 11;
    if rest == 10 {
        0
    } else {
        rest
    }
}

pub fn valid_phone(phone: &str) -> bool {
    digits_only(phone).len() >= 10
}

/// A birth date must parse as `YYYY-MM-DD`, fall strictly before `today`
/// (same day counts as invalid), and lie at most 120 years in the past.
fn birth_date_error(value: &str, today: NaiveDate) -> Option<String> {
    let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") else {
        return Some("Invalid birth date".to_string());
    };
    if date >= today {
        return Some("Birth date cannot be today or in the future".to_string());
    }
    match today.years_since(date) {
        Some(years) if years > 120 => Some("Invalid birth date".to_string()),
        _ => None,
    }
}

/// Validates step 1. All violations are collected; nothing short-circuits.
pub fn validate_personal(data: &PersonalData, today: NaiveDate) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if data.full_name.trim().is_empty() {
        errors.insert(Field::FullName, "Full name is required".to_string());
    }
    if data.email.trim().is_empty() {
        errors.insert(Field::Email, "Email is required".to_string());
    } else if !valid_email(&data.email) {
        errors.insert(Field::Email, "Invalid email".to_string());
    }
    if data.national_id.trim().is_empty() {
        errors.insert(Field::NationalId, "National ID is required".to_string());
    } else if !valid_national_id(&data.national_id) {
        errors.insert(Field::NationalId, "Invalid national ID".to_string());
    }
    if data.birth_date.trim().is_empty() {
        errors.insert(Field::BirthDate, "Birth date is required".to_string());
    } else if let Some(message) = birth_date_error(&data.birth_date, today) {
        errors.insert(Field::BirthDate, message);
    }
    if data.phone.trim().is_empty() {
        errors.insert(Field::Phone, "Phone is required".to_string());
    } else if !valid_phone(&data.phone) {
        errors.insert(Field::Phone, "Invalid phone (at least 10 digits)".to_string());
    }

    errors
}

/// Validates step 2: an 8-digit postal code plus every address field filled.
pub fn validate_address(data: &AddressData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if data.postal_code.trim().is_empty() {
        errors.insert(Field::PostalCode, "Postal code is required".to_string());
    } else if digits_only(&data.postal_code).len() != 8 {
        errors.insert(
            Field::PostalCode,
            "Invalid postal code (must have 8 digits)".to_string(),
        );
    }
    if data.street.trim().is_empty() {
        errors.insert(Field::Street, "Street is required".to_string());
    }
    if data.number.trim().is_empty() {
        errors.insert(Field::Number, "Number is required".to_string());
    }
    if data.district.trim().is_empty() {
        errors.insert(Field::District, "District is required".to_string());
    }
    if data.city.trim().is_empty() {
        errors.insert(Field::City, "City is required".to_string());
    }
    if data.state.trim().is_empty() {
        errors.insert(Field::State, "State is required".to_string());
    }
    if data.state_code.trim().is_empty() {
        errors.insert(Field::StateCode, "State code is required".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()
    }

    #[test]
    fn test_national_id_known_vectors() {
        assert!(valid_national_id("11144477735"));
        assert!(valid_national_id("111.444.777-35"));
        // repeated digits are rejected even though the checksum holds
        assert!(!valid_national_id("11111111111"));
        // single altered check digit
        assert!(!valid_national_id("11144477736"));
        assert!(!valid_national_id("1114447773"));
        assert!(!valid_national_id(""));
    }

    #[test]
    fn test_email_vectors() {
        assert!(valid_email("a@b.com"));
        assert!(valid_email("maria.souza@studio.com.br"));
        assert!(!valid_email("a@b"));
        assert!(!valid_email("@b.com"));
        assert!(!valid_email("a b@c.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn test_phone_rule() {
        assert!(valid_phone("1133334444"));
        assert!(valid_phone("(11) 98765-4321"));
        assert!(!valid_phone("999-8888"));
    }

    fn valid_personal() -> PersonalData {
        PersonalData {
            full_name: "Maria Souza".to_string(),
            email: "maria@example.com".to_string(),
            national_id: "11144477735".to_string(),
            birth_date: "1990-05-01".to_string(),
            phone: "11987654321".to_string(),
        }
    }

    #[test]
    fn test_valid_personal_has_no_errors() {
        assert!(validate_personal(&valid_personal(), today()).is_empty());
    }

    #[test]
    fn test_each_violation_gets_its_own_entry() {
        let data = PersonalData {
            full_name: "   ".to_string(),
            email: "a@b".to_string(),
            national_id: "11111111111".to_string(),
            birth_date: String::new(),
            phone: "123".to_string(),
        };
        let errors = validate_personal(&data, today());
        assert_eq!(errors.len(), 5);
        assert_eq!(errors[&Field::FullName], "Full name is required");
        assert_eq!(errors[&Field::Email], "Invalid email");
        assert_eq!(errors[&Field::NationalId], "Invalid national ID");
        assert_eq!(errors[&Field::BirthDate], "Birth date is required");
        assert_eq!(errors[&Field::Phone], "Invalid phone (at least 10 digits)");
    }

    #[test]
    fn test_single_violation_blocks_only_that_field() {
        let mut data = valid_personal();
        data.email = "not-an-email".to_string();
        let errors = validate_personal(&data, today());
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key(&Field::Email));
    }

    #[test]
    fn test_birth_date_today_is_invalid() {
        let mut data = valid_personal();
        data.birth_date = "2026-08-29".to_string();
        let errors = validate_personal(&data, today());
        assert_eq!(
            errors[&Field::BirthDate],
            "Birth date cannot be today or in the future"
        );
    }

    #[test]
    fn test_birth_date_future_is_invalid() {
        let mut data = valid_personal();
        data.birth_date = "2030-01-01".to_string();
        assert!(validate_personal(&data, today()).contains_key(&Field::BirthDate));
    }

    #[test]
    fn test_birth_date_over_120_years_is_invalid() {
        let mut data = valid_personal();
        data.birth_date = "1900-01-01".to_string();
        assert!(validate_personal(&data, today()).contains_key(&Field::BirthDate));

        data.birth_date = "1910-01-01".to_string();
        assert!(validate_personal(&data, today()).is_empty());
    }

    #[test]
    fn test_birth_date_garbage_is_invalid() {
        let mut data = valid_personal();
        data.birth_date = "01/05/1990".to_string();
        assert_eq!(validate_personal(&data, today())[&Field::BirthDate], "Invalid birth date");
    }

    fn valid_address() -> AddressData {
        AddressData {
            postal_code: "01001-000".to_string(),
            street: "Praça da Sé".to_string(),
            number: "100".to_string(),
            district: "Sé".to_string(),
            city: "São Paulo".to_string(),
            state: "SP".to_string(),
            state_code: "SP".to_string(),
        }
    }

    #[test]
    fn test_valid_address_has_no_errors() {
        assert!(validate_address(&valid_address()).is_empty());
    }

    #[test]
    fn test_postal_code_must_have_eight_digits() {
        let mut data = valid_address();
        data.postal_code = "0100-000".to_string();
        let errors = validate_address(&data);
        assert_eq!(
            errors[&Field::PostalCode],
            "Invalid postal code (must have 8 digits)"
        );
    }

    #[test]
    fn test_empty_address_reports_every_field() {
        let errors = validate_address(&AddressData::default());
        assert_eq!(errors.len(), 7);
    }
}
