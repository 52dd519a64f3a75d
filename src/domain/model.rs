use crate::utils::format::digits_only;
use serde::{Deserialize, Serialize};

/// Step 1 of the wizard. All fields are required and individually validated
/// before the step can advance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
    pub full_name: String,
    pub email: String,
    /// 11-digit national ID (CPF), accepted with or without punctuation.
    pub national_id: String,
    /// ISO date as entered (`YYYY-MM-DD`).
    pub birth_date: String,
    pub phone: String,
}

/// Step 2 of the wizard. All fields are required before the step can advance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressData {
    /// 8-digit postal code, accepted with or without punctuation.
    pub postal_code: String,
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub state_code: String,
}

/// Step 3 of the wizard. Nothing here is required.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub has_mobility_limitation: bool,
    pub notes: String,
}

/// Address fields returned by a postal-code lookup. The lookup never returns
/// a house number or the postal code itself; those stay user-owned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressInfo {
    pub street: String,
    pub district: String,
    pub city: String,
    pub state_code: String,
}

/// Outcome of a postal-code lookup that reached the service. Transport
/// failures are reported as errors, not as a variant here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(AddressInfo),
    NotFound,
}

/// Wire payload for the registration endpoint. Field names follow the
/// server's camelCase contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationPayload {
    pub name: String,
    pub email: String,
    pub national_id: String,
    pub birth_date: String,
    pub status: bool,
    pub has_mobility_limitation: bool,
    pub notes: String,
    pub contact_info: String,
    pub notifications_enabled: bool,
    pub address: AddressPayload,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    pub street: String,
    pub number: String,
    pub district: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub state_code: String,
}

impl RegistrationPayload {
    /// Assembles the wire payload from the three wizard records. National ID
    /// and postal code are sent digits-only; new students are always created
    /// active and with notifications on.
    pub fn from_records(
        personal: &PersonalData,
        address: &AddressData,
        info: &StudentInfo,
    ) -> Self {
        Self {
            name: personal.full_name.clone(),
            email: personal.email.clone(),
            national_id: digits_only(&personal.national_id),
            birth_date: personal.birth_date.clone(),
            status: true,
            has_mobility_limitation: info.has_mobility_limitation,
            notes: info.notes.clone(),
            contact_info: personal.phone.clone(),
            notifications_enabled: true,
            address: AddressPayload {
                street: address.street.clone(),
                number: address.number.clone(),
                district: address.district.clone(),
                city: address.city.clone(),
                state: address.state.clone(),
                postal_code: digits_only(&address.postal_code),
                state_code: address.state_code.clone(),
            },
        }
    }
}

/// Server acknowledgement after a successful registration. The body is
/// optional in practice, so every field is lenient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredStudent {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: String,
}
