//! 明细表格的视图状态与投影
//!
//! 过滤、排序、展开面板等全部在内存数据上重算，不触发网络。
//! `project` 是纯函数：同样的明细加同样的视图状态，永远得到同一张表。

mod class_rank;
mod project;
mod state;

pub use class_rank::{class_rank, compare_class};
pub use project::{TableRow, TableView, panel_content, project};
pub use state::{ClassFilter, ExpandState, PanelId, PanelKind, SortMode, ViewGeneration, ViewState};
