pub mod record;
pub mod upload;

pub use upload::post as file_upload;

pub use record::list as file_list;
pub use record::get as file_get;
pub use record::delete as file_delete;
