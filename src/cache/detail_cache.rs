use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use futures_util::FutureExt;
use futures_util::future::{BoxFuture, Shared};
use tracing::debug;

use crate::errors::Result;
use crate::models::admin::responses::EventDetail;

/// 明细抓取来源。生产实现包一层管理端 API，测试注入计数用的假实现。
#[async_trait]
pub trait DetailFetcher: Send + Sync {
    async fn fetch_detail(&self, event_id: &str) -> Result<EventDetail>;
}

/// 单次取用的缓存策略
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheOptions {
    /// 跳过新鲜度判断，直接走远端；成功后覆盖旧值
    pub force: bool,
    /// 本次调用的 TTL；None 用缓存默认值
    pub ttl: Option<Duration>,
}

impl CacheOptions {
    pub fn force() -> Self {
        Self {
            force: true,
            ttl: None,
        }
    }
}

struct CacheEntry {
    data: Arc<EventDetail>,
    fetched_at: Instant,
}

type SharedFetch = Shared<BoxFuture<'static, Result<Arc<EventDetail>>>>;

/// 带在途合并的明细缓存
///
/// 不变式：
/// - 同一 event_id 的并发取用共享同一次远端抓取；
/// - 抓取失败不污染既有缓存值，旧值照常可用；
/// - 新鲜判定为严格小于 TTL，到点即视为过期。
pub struct DetailCache {
    fetcher: Arc<dyn DetailFetcher>,
    entries: DashMap<String, CacheEntry>,
    in_flight: Mutex<HashMap<String, SharedFetch>>,
    // clear() 时递增，令尚未落地的在途抓取不再写入
    epoch: AtomicU64,
    default_ttl: Duration,
}

impl DetailCache {
    pub fn new(fetcher: Arc<dyn DetailFetcher>, default_ttl: Duration) -> Self {
        Self {
            fetcher,
            entries: DashMap::new(),
            in_flight: Mutex::new(HashMap::new()),
            epoch: AtomicU64::new(0),
            default_ttl,
        }
    }

    /// 取明细：命中且新鲜直接回，否则加入（或发起）一次远端抓取
    pub async fn get(&self, event_id: &str, options: CacheOptions) -> Result<Arc<EventDetail>> {
        let ttl = options.ttl.unwrap_or(self.default_ttl);

        if !options.force {
            if let Some(entry) = self.entries.get(event_id) {
                if entry.fetched_at.elapsed() < ttl {
                    debug!("Detail cache hit: {}", event_id);
                    return Ok(entry.data.clone());
                }
            }
        }

        let (shared, created, epoch) = {
            let mut in_flight = self
                .in_flight
                .lock()
                .expect("In-flight map lock poisoned");
            if let Some(existing) = in_flight.get(event_id) {
                debug!("Joining in-flight fetch: {}", event_id);
                (existing.clone(), false, 0)
            } else {
                let epoch = self.epoch.load(Ordering::SeqCst);
                let fetcher = self.fetcher.clone();
                let key = event_id.to_string();
                let fut = async move { fetcher.fetch_detail(&key).await.map(Arc::new) }
                    .boxed()
                    .shared();
                in_flight.insert(event_id.to_string(), fut.clone());
                (fut, true, epoch)
            }
        };

        let result = shared.await;

        if created {
            self.in_flight
                .lock()
                .expect("In-flight map lock poisoned")
                .remove(event_id);
            if let Ok(data) = &result {
                // 抓取期间若发生 clear()，结果作废
                if self.epoch.load(Ordering::SeqCst) == epoch {
                    self.entries.insert(
                        event_id.to_string(),
                        CacheEntry {
                            data: data.clone(),
                            fetched_at: Instant::now(),
                        },
                    );
                }
            }
        }

        result
    }

    /// 清空全部缓存与在途记录（登出时调用）
    pub fn clear(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.entries.clear();
        self.in_flight
            .lock()
            .expect("In-flight map lock poisoned")
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn backdate(&self, event_id: &str, age: Duration) {
        if let Some(mut entry) = self.entries.get_mut(event_id) {
            entry.fetched_at = Instant::now() - age;
        }
    }
}
