pub mod session;
pub mod validation;
pub mod wizard;

pub use crate::domain::model::{AddressData, PersonalData, StudentInfo};
pub use crate::domain::ports::{AddressLookup, AlertPresenter, ConfigProvider, RegistrationApi};
pub use crate::utils::error::Result;
