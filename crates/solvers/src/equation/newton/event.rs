/// Event emitted by the Newton solver after each update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Iteration counter, starting at 1.
    pub iter: usize,
    /// The iterate the residual and derivative were evaluated at.
    pub x: f64,
    /// Residual `f(x)`.
    pub residual: f64,
    /// Derivative `f'(x)`.
    pub derivative: f64,
    /// The next iterate `x - f(x) / f'(x)`.
    pub next_x: f64,
}
