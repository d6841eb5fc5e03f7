// handlers/protected/mod.rs - Protected handlers (JWT authentication required)
//
// Route prefix: /api/*. Every route here runs behind `jwt_auth_middleware`;
// the ones registered in the admin router additionally pass `admin_only_middleware`.
pub mod alumni;
pub mod file;
pub mod pekerjaan;
pub mod whoami;

pub use whoami::get as whoami_get;
