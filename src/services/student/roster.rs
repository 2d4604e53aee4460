use crate::errors::Result;
use crate::models::RosterRow;
use crate::view::compare_class;

use super::StudentService;

/// 取全校名单，按班级序与姓名排好（登入前查班级/姓名的正确写法用）
pub async fn handle_roster(service: &StudentService) -> Result<Vec<RosterRow>> {
    let mut roster = service.api().roster().await?;
    roster.sort_by(|a, b| compare_class(&a.class, &b.class).then_with(|| a.name.cmp(&b.name)));
    Ok(roster)
}
