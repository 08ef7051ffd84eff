mod convert;
mod download;
mod health;
mod index;

pub use convert::handle_convert;
pub use download::handle_download;
pub use health::health_check;
pub use index::index_page;
