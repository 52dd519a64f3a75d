use crate::core::validation::{self, Field, ValidationErrors};
use crate::domain::model::{AddressData, AddressInfo, PersonalData, RegistrationPayload, StudentInfo};
use crate::utils::format::digits_only;
use chrono::NaiveDate;

/// The four wizard steps, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    PersonalData,
    Address,
    StudentInfo,
    Confirmation,
}

impl Step {
    pub const ALL: [Step; 4] = [
        Step::PersonalData,
        Step::Address,
        Step::StudentInfo,
        Step::Confirmation,
    ];

    pub fn number(self) -> u8 {
        match self {
            Step::PersonalData => 1,
            Step::Address => 2,
            Step::StudentInfo => 3,
            Step::Confirmation => 4,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Step::PersonalData => "Personal data",
            Step::Address => "Address",
            Step::StudentInfo => "Student info",
            Step::Confirmation => "Confirmation",
        }
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::PersonalData => Some(Step::Address),
            Step::Address => Some(Step::StudentInfo),
            Step::StudentInfo => Some(Step::Confirmation),
            Step::Confirmation => None,
        }
    }

    fn previous(self) -> Option<Step> {
        match self {
            Step::PersonalData => None,
            Step::Address => Some(Step::PersonalData),
            Step::StudentInfo => Some(Step::Address),
            Step::Confirmation => Some(Step::StudentInfo),
        }
    }
}

/// Result of an `advance` attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(Step),
    /// Current step failed validation; the error map holds the details.
    Blocked,
}

/// A postal-code lookup the caller should perform. Issued when the postal
/// code's digit count transitions to exactly 8. The generation ties the
/// eventual response back to the edit that triggered it, so a stale response
/// never overwrites newer input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub generation: u64,
    pub digits: String,
}

/// The registration wizard: step position, the three data records, and the
/// per-field validation errors. Pure state machine; all I/O lives in the
/// enrollment session driving it.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step_index: usize,
    personal: PersonalData,
    address: AddressData,
    info: StudentInfo,
    errors: ValidationErrors,
    review: Option<RegistrationPayload>,
    lookup_generation: u64,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the wizard pre-seeded with carried-over data, e.g. when the
    /// operator re-enters a half-finished registration.
    pub fn prefilled(personal: PersonalData, address: AddressData, info: StudentInfo) -> Self {
        Self {
            personal,
            address,
            info,
            ..Self::default()
        }
    }

    pub fn step(&self) -> Step {
        Step::ALL[self.step_index]
    }

    pub fn personal(&self) -> &PersonalData {
        &self.personal
    }

    pub fn address(&self) -> &AddressData {
        &self.address
    }

    pub fn info(&self) -> &StudentInfo {
        &self.info
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Snapshot captured when step 3 advanced into confirmation.
    pub fn review(&self) -> Option<&RegistrationPayload> {
        self.review.as_ref()
    }

    /// The payload as it would be submitted right now.
    pub fn payload(&self) -> RegistrationPayload {
        RegistrationPayload::from_records(&self.personal, &self.address, &self.info)
    }

    fn set(&mut self, field: Field, slot: fn(&mut Self) -> &mut String, value: String) {
        *slot(self) = value;
        // optimistic clearing: an edit removes that field's error, nothing else
        self.errors.remove(&field);
    }

    pub fn set_full_name(&mut self, value: impl Into<String>) {
        self.set(Field::FullName, |w| &mut w.personal.full_name, value.into());
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.set(Field::Email, |w| &mut w.personal.email, value.into());
    }

    pub fn set_national_id(&mut self, value: impl Into<String>) {
        self.set(Field::NationalId, |w| &mut w.personal.national_id, value.into());
    }

    pub fn set_birth_date(&mut self, value: impl Into<String>) {
        self.set(Field::BirthDate, |w| &mut w.personal.birth_date, value.into());
    }

    pub fn set_phone(&mut self, value: impl Into<String>) {
        self.set(Field::Phone, |w| &mut w.personal.phone, value.into());
    }

    /// Updates the postal code and reports whether a lookup should fire.
    /// The trigger is the digit count *transitioning* to exactly 8: seven
    /// digits never fire, nine digits never fire, and retyping an already
    /// complete code does not fire again.
    pub fn set_postal_code(&mut self, value: impl Into<String>) -> Option<LookupRequest> {
        let previous_len = digits_only(&self.address.postal_code).len();
        self.set(Field::PostalCode, |w| &mut w.address.postal_code, value.into());

        let digits = digits_only(&self.address.postal_code);
        if digits.len() == 8 && previous_len != 8 {
            self.lookup_generation += 1;
            Some(LookupRequest {
                generation: self.lookup_generation,
                digits,
            })
        } else {
            None
        }
    }

    pub fn set_street(&mut self, value: impl Into<String>) {
        self.set(Field::Street, |w| &mut w.address.street, value.into());
    }

    pub fn set_number(&mut self, value: impl Into<String>) {
        self.set(Field::Number, |w| &mut w.address.number, value.into());
    }

    pub fn set_district(&mut self, value: impl Into<String>) {
        self.set(Field::District, |w| &mut w.address.district, value.into());
    }

    pub fn set_city(&mut self, value: impl Into<String>) {
        self.set(Field::City, |w| &mut w.address.city, value.into());
    }

    pub fn set_state(&mut self, value: impl Into<String>) {
        self.set(Field::State, |w| &mut w.address.state, value.into());
    }

    pub fn set_state_code(&mut self, value: impl Into<String>) {
        self.set(Field::StateCode, |w| &mut w.address.state_code, value.into());
    }

    pub fn set_mobility_limitation(&mut self, value: bool) {
        self.info.has_mobility_limitation = value;
        self.errors.remove(&Field::MobilityLimitation);
    }

    pub fn set_notes(&mut self, value: impl Into<String>) {
        self.info.notes = value.into();
        self.errors.remove(&Field::Notes);
    }

    /// Applies a lookup response. Only street, district, city and the state
    /// fields are overwritten; the number and the postal code itself stay
    /// untouched. Returns false (and changes nothing) if the response is
    /// stale, i.e. the postal code was edited again after the request fired.
    pub fn apply_lookup(&mut self, generation: u64, info: AddressInfo) -> bool {
        if generation != self.lookup_generation {
            tracing::debug!("dropping stale postal-code lookup response");
            return false;
        }
        self.set_street(info.street);
        self.set_district(info.district);
        self.set_city(info.city);
        self.set_state(info.state_code.clone());
        self.set_state_code(info.state_code);
        true
    }

    /// Attempts to move forward one step. The current step is validated
    /// first; on failure every violated field gets an error entry and the
    /// step does not change. Advancing out of step 3 captures the review
    /// snapshot shown on the confirmation step.
    pub fn advance(&mut self, today: NaiveDate) -> Advance {
        let errors = match self.step() {
            Step::PersonalData => validation::validate_personal(&self.personal, today),
            Step::Address => validation::validate_address(&self.address),
            Step::StudentInfo | Step::Confirmation => ValidationErrors::new(),
        };
        if !errors.is_empty() {
            self.errors = errors;
            return Advance::Blocked;
        }
        self.errors.clear();

        if self.step() == Step::StudentInfo {
            let snapshot = self.payload();
            tracing::debug!(student = %snapshot.name, "captured review snapshot");
            self.review = Some(snapshot);
        }
        if let Some(next) = self.step().next() {
            self.step_index = next.number() as usize - 1;
        }
        Advance::Moved(self.step())
    }

    /// Moves back one step without re-validating. No-op on step 1.
    pub fn retreat(&mut self) -> bool {
        match self.step().previous() {
            Some(previous) => {
                self.step_index = previous.number() as usize - 1;
                true
            }
            None => false,
        }
    }

    /// Jumps directly to an already-reached step. Forward jumps past the
    /// validated progress are a strict no-op.
    pub fn jump_to(&mut self, step: Step) -> bool {
        if step <= self.step() {
            self.step_index = step.number() as usize - 1;
            true
        } else {
            false
        }
    }

    /// Resets all three records to their canonical defaults and clears the
    /// error map. The step position is left alone; callers exit the wizard
    /// after cancelling.
    pub fn cancel(&mut self) {
        self.personal = PersonalData::default();
        self.address = AddressData::default();
        self.info = StudentInfo::default();
        self.errors.clear();
        self.review = None;
    }
}
