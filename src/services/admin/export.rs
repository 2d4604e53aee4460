use std::path::Path;

use tracing::info;

use crate::errors::Result;
use crate::models::admin::responses::Summary;
use crate::utils::csv::{ensure_bom, to_csv};

use super::AdminService;

/// 后端汇出的活动明细 CSV 落地为文件，补齐 BOM 让 Excel 直接打开不乱码
pub async fn handle_export(service: &AdminService, event_id: &str, path: &Path) -> Result<()> {
    let token = service.admin_token().await?;
    let csv = service.api().admin_export_csv(&token, event_id).await?;
    std::fs::write(path, ensure_bom(&csv))?;
    info!("Exported CSV for {} to {}", event_id, path.display());
    Ok(())
}

/// 客户端本地组装的摘要 CSV：每活动一列统计
pub fn summary_csv(summary: &Summary) -> String {
    let mut rows = vec![vec![
        "eventId".to_string(),
        "title".to_string(),
        "deadline".to_string(),
        "totalRoster".to_string(),
        "replied".to_string(),
        "replyRate".to_string(),
    ]];

    let mut ids: Vec<&String> = summary.by_event.keys().collect();
    ids.sort();
    for id in ids {
        let item = &summary.by_event[id];
        let (title, deadline) = item
            .event
            .as_ref()
            .map(|e| (e.title.clone(), e.deadline.clone().unwrap_or_default()))
            .unwrap_or_default();
        rows.push(vec![
            id.clone(),
            title,
            deadline,
            item.total_roster.to_string(),
            item.replied.to_string(),
            // 后端已是百分比数值，补上百分号即可
            item.reply_rate
                .map(|r| format!("{r}%"))
                .unwrap_or_default(),
        ]);
    }
    to_csv(&rows)
}
