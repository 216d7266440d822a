//! Error payloads shared by every HTTP surface of the board.
//!
//! - [`Problem`]: RFC 9457 problem details, serializable without any HTTP framework
//! - [`ErrDef`]: a static catalog entry that renders into a [`Problem`]
//!
//! Enable the `axum` feature to return a [`Problem`] directly from a handler.

pub mod catalog;
pub mod problem;

pub use catalog::ErrDef;
pub use problem::{APPLICATION_PROBLEM_JSON, FieldViolation, Problem};

/// Attach the request path and trace id to an already built [`Problem`].
pub fn finalize(problem: Problem, instance: &str, trace_id: Option<String>) -> Problem {
    let problem = problem.with_instance(instance);
    match trace_id {
        Some(tid) => problem.with_trace_id(tid),
        None => problem,
    }
}
