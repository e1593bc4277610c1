pub mod caching;
pub mod http;

pub use caching::CachingTransactionSource;
pub use http::HttpTransactionSource;
