//! Error catalog of the supply-points REST API.

use neeru_errors::ErrDef;

pub struct ErrorCode;

impl ErrorCode {
    #[must_use]
    pub const fn supply_point_not_found_v1() -> ErrDef {
        ErrDef {
            status: 404,
            title: "Supply point not found",
            code: "supply_points.not_found.v1",
            type_url: "https://errors.neeru.local/supply_points.not_found.v1",
        }
    }

    #[must_use]
    pub const fn supply_point_validation_v1() -> ErrDef {
        ErrDef {
            status: 422,
            title: "Invalid supply point",
            code: "supply_points.validation.v1",
            type_url: "https://errors.neeru.local/supply_points.validation.v1",
        }
    }

    #[must_use]
    pub const fn editor_unauthorized_v1() -> ErrDef {
        ErrDef {
            status: 401,
            title: "Sign-in required",
            code: "supply_points.unauthorized.v1",
            type_url: "https://errors.neeru.local/supply_points.unauthorized.v1",
        }
    }

    #[must_use]
    pub const fn store_unavailable_v1() -> ErrDef {
        ErrDef {
            status: 503,
            title: "Document store unavailable",
            code: "supply_points.store_unavailable.v1",
            type_url: "https://errors.neeru.local/supply_points.store_unavailable.v1",
        }
    }

    #[must_use]
    pub const fn internal_v1() -> ErrDef {
        ErrDef {
            status: 500,
            title: "Internal error",
            code: "supply_points.internal.v1",
            type_url: "https://errors.neeru.local/supply_points.internal.v1",
        }
    }
}
