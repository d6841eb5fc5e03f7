pub mod list;
pub mod record;

// Re-export handler functions for use in routing
pub use list::get as alumni_list;
pub use list::paginated as alumni_paginated;

pub use record::get as alumni_get;
pub use record::post as alumni_post;
pub use record::put as alumni_put;
pub use record::delete as alumni_delete;
