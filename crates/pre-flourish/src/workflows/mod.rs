pub mod caregiver;
pub mod import;
