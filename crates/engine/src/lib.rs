//! Deterministic options risk rules.
//!
//! - Decodes `O:` option symbols into ticker, expiry, right and strike
//! - Looks up the tenor-dependent maximum stop-loss buffer
//! - Computes raw stop-loss levels and enforces the buffer policy on them
//! - Projects weekly theta decay toward expiration
//!
//! Pure functions over immutable inputs; no I/O, no shared state.

pub mod contract;
pub mod decay;
pub mod enforcer;
pub mod engine;
pub mod error;
pub mod policy;
pub mod stop_loss;
pub mod types;

pub use contract::{parse, ContractIdentifier};
pub use decay::{project, project_schedule, DecayIter, DecayProjection};
pub use enforcer::BufferEnforcer;
pub use engine::{AssessmentRequest, RiskAssessment, RiskEngine};
pub use error::{ParseError, Result, RiskError};
pub use policy::{BufferPolicyTable, RiskPolicyTier};
pub use stop_loss::{compute_raw_stop_loss, implied_buffer_pct};
pub use types::{DecaySnapshot, OptionRight, StopLossResult};
