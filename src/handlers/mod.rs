// handlers/mod.rs - two-tier handler layout
//
// Public (no auth) → Protected (JWT auth; admin-only routes add a role gate)
pub mod extract;
pub mod protected;
pub mod public;
