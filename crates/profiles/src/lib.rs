//! Motion profiles for current- and voltage-limited motor drives.
//!
//! - [`exponential`]: minimum-time bang-bang profile over `dv/dt = A·v + B·u`
//! - [`phased`]: closed-form ramp, exponential, coast and stop phases for a
//!   geared linear mechanism
//! - [`simulate`]: step an exponential profile and annotate each step with
//!   the motor's operating point
//!
//! # Features
//!
//! - `serde-derive`: derives `Serialize`/`Deserialize` for states,
//!   constraints, mechanisms and samples.

mod state;

pub mod exponential;
pub mod phased;
pub mod simulate;

pub use exponential::{Constraints, ExponentialProfile, ProfileTiming};
pub use state::State;
