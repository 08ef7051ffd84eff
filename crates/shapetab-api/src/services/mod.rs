mod convert;

pub use convert::ConvertService;
