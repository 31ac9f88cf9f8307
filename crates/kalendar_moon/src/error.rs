//! Error types for phase computation.

/// Errors from the iterative new-moon search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum MoonError {
    /// No sign change of the elongation inside the search window.
    #[error("no new moon bracketed near JD {jd:.3}")]
    NoBracket {
        /// Centre of the search window.
        jd: f64,
    },

    /// Bisection ran out of iterations.
    #[error("new moon search did not converge near JD {jd:.3}")]
    NoConvergence {
        /// Centre of the search window.
        jd: f64,
    },
}
