// handlers/public/mod.rs - Public handlers (no authentication required)
pub mod login;
pub mod system;

pub use login::post as login_post;
pub use system::{health, root};
