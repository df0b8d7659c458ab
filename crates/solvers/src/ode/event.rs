/// Event emitted by the integrator for each accepted point.
///
/// Step 0 is the initial state before any integration.
/// Steps `1..=resolution` are emitted after each accepted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event<const N: usize> {
    /// The point index.
    pub step: usize,

    /// Time at this point.
    pub t: f64,

    /// State at this point.
    pub y: [f64; N],
}
