use crate::core::wizard::{Advance, Step, Wizard};
use crate::domain::model::{LookupOutcome, RegisteredStudent};
use crate::domain::ports::{AddressLookup, AlertPresenter, RegistrationApi};
use crate::utils::error::EnrollError;
use chrono::NaiveDate;

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server accepted the registration; the session is over.
    Registered(RegisteredStudent),
    /// Rejected or failed; state is intact and the operator may retry.
    Retry,
    /// Submit is only reachable from the confirmation step.
    NotReady,
    /// A submit is already outstanding; this one was ignored.
    InFlight,
}

/// One enrollment session: a wizard plus the three collaborators it talks
/// to. Owns the wizard exclusively for its lifetime; collaborators only ever
/// see payload copies.
pub struct EnrollmentSession<L, R, A>
where
    L: AddressLookup,
    R: RegistrationApi,
    A: AlertPresenter,
{
    wizard: Wizard,
    lookup: L,
    api: R,
    alerts: A,
    submit_in_flight: bool,
}

impl<L, R, A> EnrollmentSession<L, R, A>
where
    L: AddressLookup,
    R: RegistrationApi,
    A: AlertPresenter,
{
    pub fn new(lookup: L, api: R, alerts: A) -> Self {
        Self::with_wizard(Wizard::new(), lookup, api, alerts)
    }

    pub fn with_wizard(wizard: Wizard, lookup: L, api: R, alerts: A) -> Self {
        Self {
            wizard,
            lookup,
            api,
            alerts,
            submit_in_flight: false,
        }
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    /// Plain field edits go straight to the wizard. The postal code is the
    /// exception; it must go through [`set_postal_code`](Self::set_postal_code)
    /// so the auto-fill side effect can run.
    pub fn wizard_mut(&mut self) -> &mut Wizard {
        &mut self.wizard
    }

    /// Updates the postal code and, when the 8-digit trigger fires, resolves
    /// it through the lookup service. Every failure is absorbed here: a
    /// not-found code raises a warning, a transport failure raises an error,
    /// and in both cases the address fields are left as they were.
    pub async fn set_postal_code(&mut self, value: impl Into<String>) {
        let Some(request) = self.wizard.set_postal_code(value) else {
            return;
        };

        tracing::debug!("postal code complete, looking up {}", request.digits);
        match self.lookup.lookup(&request.digits).await {
            Ok(LookupOutcome::Found(info)) => {
                self.wizard.apply_lookup(request.generation, info);
            }
            Ok(LookupOutcome::NotFound) => {
                self.alerts.show_warning(
                    "Postal code not found",
                    "Check the code or fill in the address manually.",
                );
            }
            Err(e) => {
                tracing::error!("postal code lookup failed: {}", e);
                self.alerts
                    .show_error("Postal code lookup failed", "Try again.");
            }
        }
    }

    /// Advances the wizard; a blocked advance surfaces the generic
    /// required-fields notice on top of the per-field errors.
    pub fn advance(&mut self, today: NaiveDate) -> Advance {
        let outcome = self.wizard.advance(today);
        if outcome == Advance::Blocked {
            self.alerts.show_warning(
                "Required fields",
                "Please fill in all required fields correctly.",
            );
        }
        outcome
    }

    pub fn retreat(&mut self) -> bool {
        self.wizard.retreat()
    }

    pub fn jump_to(&mut self, step: Step) -> bool {
        self.wizard.jump_to(step)
    }

    pub fn cancel(&mut self) {
        self.wizard.cancel();
    }

    /// Submits the registration. Only reachable from the confirmation step,
    /// and guarded against overlapping submits. On rejection or transport
    /// failure the wizard state is untouched so the attempt can be repeated.
    pub async fn submit(&mut self) -> SubmitOutcome {
        if self.wizard.step() != Step::Confirmation {
            return SubmitOutcome::NotReady;
        }
        if self.submit_in_flight {
            tracing::warn!("submit ignored: another submit is in flight");
            return SubmitOutcome::InFlight;
        }
        self.submit_in_flight = true;

        let payload = self.wizard.payload();
        tracing::info!("submitting registration for {}", payload.name);

        let outcome = match self.api.register(&payload).await {
            Ok(student) => {
                self.alerts
                    .show_success("Success", "Student registered successfully.");
                SubmitOutcome::Registered(student)
            }
            Err(EnrollError::SubmissionRejected { message }) => {
                tracing::warn!("registration rejected: {}", message);
                self.alerts.show_error("Registration rejected", &message);
                SubmitOutcome::Retry
            }
            Err(e) => {
                tracing::error!("registration failed: {}", e);
                self.alerts
                    .show_error("Error", "Could not register the student.");
                SubmitOutcome::Retry
            }
        };

        self.submit_in_flight = false;
        outcome
    }
}
