use crate::domain::model::{LookupOutcome, RegisteredStudent, RegistrationPayload};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Postal-code to address resolution. Callers only invoke this with exactly
/// 8 digits; anything else is a caller bug, not a service concern.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    async fn lookup(&self, postal_code_digits: &str) -> Result<LookupOutcome>;
}

/// Remote registration endpoint. A server-side rejection is reported as
/// `EnrollError::SubmissionRejected`; transport failures map to `ApiError`.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    async fn register(&self, payload: &RegistrationPayload) -> Result<RegisteredStudent>;
}

/// User-facing notices. Implementations are synchronous from the caller's
/// perspective.
pub trait AlertPresenter: Send + Sync {
    fn show_error(&self, title: &str, message: &str);
    fn show_warning(&self, title: &str, message: &str);
    fn show_success(&self, title: &str, message: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn lookup_base_url(&self) -> &str;
}
