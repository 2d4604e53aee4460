use tracing::debug;

use crate::cache::prefetch_details;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::Event;
use crate::models::admin::responses::Summary;

use super::AdminService;

/// 拉摘要统计，随后在背景预热最可能被点开的几个活动明细。
/// 预取不阻塞摘要返回，单笔失败也不影响任何用户可见路径。
pub async fn handle_summary(service: &AdminService) -> Result<Summary> {
    let token = service.admin_token().await?;
    let summary = service.api().admin_summary(&token).await?;

    let events: Vec<Event> = summary
        .by_event
        .values()
        .filter_map(|item| item.event.clone())
        .collect();
    if !events.is_empty() {
        let cache = service.cache().clone();
        let config = AppConfig::get();
        let count = config.cache.prefetch_count;
        let concurrency = config.cache.prefetch_concurrency;
        debug!("Kicking background prefetch over {} events", events.len());
        tokio::spawn(async move {
            prefetch_details(cache, &events, count, concurrency).await;
        });
    }

    Ok(summary)
}
