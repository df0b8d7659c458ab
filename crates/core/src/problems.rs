pub mod ode;
pub mod root;

pub use ode::{Rates, VectorField};
pub use root::RootProblem;
