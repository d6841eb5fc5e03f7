// handlers/protected/pekerjaan - employment history routes
//
// Unlike the alumni routes these answer with raw bodies (arrays, records and
// `{ message }` objects) rather than the success envelope.
pub mod lifecycle;
pub mod list;
pub mod record;
pub mod stats;

pub use list::get as pekerjaan_list;
pub use list::paginated as pekerjaan_paginated;
pub use list::trash as pekerjaan_trash;
pub use list::by_alumni as pekerjaan_by_alumni;

pub use record::get as pekerjaan_get;
pub use record::post as pekerjaan_post;
pub use record::put as pekerjaan_put;
pub use record::delete as pekerjaan_delete;

pub use lifecycle::soft_delete as pekerjaan_soft_delete;
pub use lifecycle::restore as pekerjaan_restore;
pub use lifecycle::hard_delete as pekerjaan_hard_delete;

pub use stats::by_year as pekerjaan_by_year;
