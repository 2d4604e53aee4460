//! 活动明细缓存
//!
//! 管理端的明细页会被反复打开，这里做带 TTL 的读穿缓存，
//! 并对同一活动的并发请求做在途合并，保证同键同时至多一次远端抓取。

mod detail_cache;
mod prefetch;

pub use detail_cache::{CacheOptions, DetailCache, DetailFetcher};
pub use prefetch::{prefetch_details, select_prefetch_candidates};
