use std::sync::Arc;

use futures_util::StreamExt;
use futures_util::stream;
use tracing::{debug, warn};

use crate::cache::{CacheOptions, DetailCache};
use crate::models::Event;

/// 挑选预取对象：截止时间可解析的活动按截止时间由新到旧排，取前 count 个。
/// 无截止时间或格式不合法的活动不进入预取名单。
pub fn select_prefetch_candidates(events: &[Event], count: usize) -> Vec<Event> {
    let mut dated: Vec<&Event> = events
        .iter()
        .filter(|e| e.parsed_deadline().is_some())
        .collect();
    // 截止时间相同时按 event_id 定序，结果与输入顺序无关
    dated.sort_by(|a, b| {
        b.parsed_deadline()
            .cmp(&a.parsed_deadline())
            .then_with(|| a.event_id.cmp(&b.event_id))
    });
    dated.into_iter().take(count).cloned().collect()
}

/// 摘要页载入后在背景预热明细缓存。单一活动失败只记日志，不打断其余预取。
pub async fn prefetch_details(
    cache: Arc<DetailCache>,
    events: &[Event],
    count: usize,
    concurrency: usize,
) {
    let candidates = select_prefetch_candidates(events, count);
    debug!("Prefetching {} event details", candidates.len());

    stream::iter(candidates)
        .for_each_concurrent(concurrency.max(1), |event| {
            let cache = cache.clone();
            async move {
                if let Err(e) = cache.get(&event.event_id, CacheOptions::default()).await {
                    warn!("Prefetch failed for {}: {}", event.event_id, e);
                }
            }
        })
        .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::DetailFetcher;
    use crate::errors::{ReplyClientError, Result};
    use crate::models::admin::responses::EventDetail;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    fn event(id: &str, deadline: Option<&str>) -> Event {
        serde_json::from_value(serde_json::json!({
            "eventId": id,
            "deadline": deadline,
        }))
        .unwrap()
    }

    #[test]
    fn test_candidates_newest_deadline_first() {
        let events = vec![
            event("a", Some("2025-03-01")),
            event("b", Some("2025-06-01")),
            event("c", None),
            event("d", Some("2025-04-15 17:00")),
            event("e", Some("不明")),
            event("f", Some("2025-05-20")),
        ];
        let picked = select_prefetch_candidates(&events, 3);
        let ids: Vec<&str> = picked.iter().map(|e| e.event_id.as_str()).collect();
        assert_eq!(ids, vec!["b", "f", "d"]);
    }

    #[test]
    fn test_five_newest_dated_events_selected() {
        let events = vec![
            event("e1", Some("2025-03-01")),
            event("e2", Some("2025-02-01")),
            event("e3", None),
            event("e4", Some("2025-04-01")),
            event("e5", Some("2025-01-01")),
            event("e6", Some("2025-05-01")),
        ];
        let picked = select_prefetch_candidates(&events, 5);
        let deadlines: Vec<&str> = picked
            .iter()
            .map(|e| e.deadline.as_deref().unwrap())
            .collect();
        assert_eq!(
            deadlines,
            vec![
                "2025-05-01",
                "2025-04-01",
                "2025-03-01",
                "2025-02-01",
                "2025-01-01"
            ]
        );
    }

    #[test]
    fn test_candidates_ignore_input_order() {
        let mut events = vec![
            event("a", Some("2025-03-01")),
            event("b", Some("2025-06-01")),
            event("c", Some("2025-06-01")),
        ];
        let forward = select_prefetch_candidates(&events, 5);
        events.reverse();
        let backward = select_prefetch_candidates(&events, 5);
        let ids = |v: &[Event]| v.iter().map(|e| e.event_id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&forward), ids(&backward));
        assert_eq!(ids(&forward), vec!["b", "c", "a"]);
    }

    #[test]
    fn test_fewer_dated_events_than_count() {
        let events = vec![event("a", Some("2025-03-01")), event("b", None)];
        assert_eq!(select_prefetch_candidates(&events, 5).len(), 1);
    }

    /// 记录并发峰值的假抓取端，e-boom 固定失败
    struct GaugeFetcher {
        current: Mutex<usize>,
        peak: Mutex<usize>,
    }

    impl GaugeFetcher {
        fn new() -> Self {
            Self {
                current: Mutex::new(0),
                peak: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl DetailFetcher for GaugeFetcher {
        async fn fetch_detail(&self, event_id: &str) -> Result<EventDetail> {
            {
                let mut current = self.current.lock().unwrap();
                *current += 1;
                let mut peak = self.peak.lock().unwrap();
                *peak = (*peak).max(*current);
            }
            tokio::time::sleep(Duration::from_millis(30)).await;
            *self.current.lock().unwrap() -= 1;

            if event_id == "e-boom" {
                return Err(ReplyClientError::network("boom"));
            }
            Ok(EventDetail {
                event: serde_json::from_value(serde_json::json!({ "eventId": event_id }))
                    .unwrap(),
                replied: vec![],
                not_replied: vec![],
                total_roster: 0,
                replied_count: 0,
                not_replied_count: 0,
                reply_rate: 0.0,
            })
        }
    }

    #[tokio::test]
    async fn test_prefetch_bounds_concurrency_and_swallows_failures() {
        let fetcher = Arc::new(GaugeFetcher::new());
        let cache = Arc::new(DetailCache::new(fetcher.clone(), Duration::from_secs(300)));

        let events = vec![
            event("e1", Some("2025-06-01")),
            event("e-boom", Some("2025-05-01")),
            event("e3", Some("2025-04-01")),
            event("e4", Some("2025-03-01")),
            event("e5", Some("2025-02-01")),
        ];
        prefetch_details(cache.clone(), &events, 5, 3).await;

        assert!(*fetcher.peak.lock().unwrap() <= 3);
        // 失败的那笔不落缓存，其余照常
        assert_eq!(cache.len(), 4);
    }
}
