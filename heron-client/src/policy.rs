//! Access Policy - static route permission table
//!
//! Pure mapping from route path to the roles permitted to view it. Unknown
//! paths carry no permissions; the guard treats them as unauthorized unless
//! they are one of the public-by-construction paths (login, unauthorized
//! notice), which deliberately never appear in this table.

use shared::models::Role;

/// Login screen, public by construction
pub const LOGIN_PATH: &str = "/login";
/// Unauthorized-notice screen, public by construction
pub const UNAUTHORIZED_PATH: &str = "/unauthorized";
/// Default landing route for an authenticated user
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Route permission table. Static, process-wide, immutable after startup.
const ROUTE_TABLE: &[(&str, &[Role])] = &[
    (DASHBOARD_PATH, &Role::ALL),
    ("/leave-records", &[Role::Admin, Role::Hr, Role::Manager]),
    ("/leave-requests", &Role::ALL),
    ("/payroll", &[Role::Admin, Role::Hr]),
];

/// Roles permitted to view `path`. Unknown paths yield the empty set.
pub fn permitted_roles(path: &str) -> &'static [Role] {
    ROUTE_TABLE
        .iter()
        .find(|(route, _)| *route == path)
        .map(|(_, roles)| *roles)
        .unwrap_or(&[])
}

/// Whether `path` is a known guarded route
pub fn is_known_route(path: &str) -> bool {
    ROUTE_TABLE.iter().any(|(route, _)| *route == path)
}

/// Whether `path` is public by construction (outside the table)
pub fn is_public(path: &str) -> bool {
    path == LOGIN_PATH || path == UNAUTHORIZED_PATH
}
