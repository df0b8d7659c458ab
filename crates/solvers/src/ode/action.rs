/// Control actions supported by the fixed-step integrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Stop integrating and keep the step that was just accepted.
    StopEarly,
}
