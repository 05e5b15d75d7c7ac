//! Pipnet transaction review/edit session.
//!
//! Orchestrates decoding, field editing, debounced re-encoding, commission
//! tracking, and the insufficient-funds hint into a single state machine
//! consumed by the UI layer and the send-flow coordinator.

pub mod debounce;
pub mod estimator;
pub mod session;

pub use debounce::{Debouncer, DEBOUNCE_DELAY};
pub use estimator::{CommissionEstimator, EstimateError};
pub use session::{Mode, SessionError, TransactionEditingSession};
