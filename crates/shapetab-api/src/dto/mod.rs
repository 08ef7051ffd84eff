mod response;

pub use response::{ConvertResponse, HealthResponse, DOWNLOAD_PATH};
