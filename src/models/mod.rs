//! # Domain Models
//!
//! Credentials, storage keys and the local state of each form.
//!
//! ## Security Design
//!
//! The [`SecureString`] type provides memory-safe password handling:
//! - Password data is zeroed on drop
//! - Never exposed in `Debug` or `Display` implementations
//!
//! The remembered credential is serialized as `{"username", "password"}` and
//! handed to the storage facility as-is. Encryption at rest is the facility's
//! job (DPAPI for Windows Credential Manager), not this crate's.

pub mod credentials;
pub mod forms;
pub mod reservation;

pub use credentials::{Credentials, SecureString, StorageKey};
pub use forms::{LoginForm, RegistrationForm};
pub use reservation::{Reservation, ReservationForm};
