//! Static error catalog entries.

use crate::problem::Problem;
use http::StatusCode;

/// One entry of a module's error catalog.
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub title: &'static str,
    pub code: &'static str,
    pub type_url: &'static str,
}

impl ErrDef {
    /// Render this entry with an occurrence-specific detail.
    #[inline]
    pub fn as_problem(&self, detail: impl Into<String>) -> Problem {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        Problem::new(status, self.title, detail.into())
            .with_code(self.code)
            .with_type(self.type_url)
    }

    /// Render and attach the request path and trace id in one step.
    pub fn with_context(
        &self,
        detail: impl Into<String>,
        instance: &str,
        trace_id: Option<String>,
    ) -> Problem {
        crate::finalize(self.as_problem(detail), instance, trace_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MISSING: ErrDef = ErrDef {
        status: 404,
        title: "Supply point not found",
        code: "supply_points.not_found",
        type_url: "https://errors.neeru.local/supply_points.not_found",
    };

    #[test]
    fn renders_problem_from_entry() {
        let problem = MISSING.as_problem("no document with id abc");
        assert_eq!(problem.status, StatusCode::NOT_FOUND);
        assert_eq!(problem.title, "Supply point not found");
        assert_eq!(problem.detail, "no document with id abc");
        assert_eq!(problem.code, "supply_points.not_found");
        assert_eq!(
            problem.type_url,
            "https://errors.neeru.local/supply_points.not_found"
        );
    }

    #[test]
    fn with_context_fills_instance_and_trace() {
        let problem = MISSING.with_context("gone", "/supply-points/v1/points/abc", Some("7".into()));
        assert_eq!(problem.instance, "/supply-points/v1/points/abc");
        assert_eq!(problem.trace_id.as_deref(), Some("7"));
    }

    #[test]
    fn invalid_status_falls_back_to_500() {
        let broken = ErrDef {
            status: 1000,
            ..MISSING
        };
        assert_eq!(
            broken.as_problem("x").status,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
