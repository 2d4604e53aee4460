use std::sync::atomic::{AtomicU64, Ordering};

/// 班级过滤：All 或指定班级
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClassFilter {
    #[default]
    All,
    Class(String),
}

/// 排序模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    Instrument,
    TimeAsc,
    TimeDesc,
    /// 默认：班级序 + 姓名
    #[default]
    Class,
}

/// 明细表的视图状态。跨活动切换保留，只由过滤/排序控件改写。
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub class_filter: ClassFilter,
    pub sort_mode: SortMode,
}

/// 可展开面板的种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Signature,
    Note,
}

/// 面板定位：哪一列（班级+姓名）的哪种面板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelId {
    pub class: String,
    pub name: String,
    pub kind: PanelKind,
}

impl PanelId {
    pub fn new(class: impl Into<String>, name: impl Into<String>, kind: PanelKind) -> Self {
        Self {
            class: class.into(),
            name: name.into(),
            kind,
        }
    }
}

/// 展开状态：任一时刻至多一个面板打开
#[derive(Debug, Default)]
pub struct ExpandState {
    open: Option<PanelId>,
}

impl ExpandState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 切换面板：点已开的面板则关闭；点别的面板则先关旧的再开新的
    pub fn toggle(&mut self, panel: PanelId) -> Option<&PanelId> {
        if self.open.as_ref() == Some(&panel) {
            self.open = None;
        } else {
            self.open = Some(panel);
        }
        self.open.as_ref()
    }

    pub fn open(&self) -> Option<&PanelId> {
        self.open.as_ref()
    }

    pub fn close(&mut self) {
        self.open = None;
    }
}

/// 「查看结果」的请求世代戳。旧请求的响应晚到时凭戳作废，
/// 不会盖掉较新一次点击已渲染的内容。
#[derive(Debug, Default)]
pub struct ViewGeneration(AtomicU64);

impl ViewGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// 发起新请求，取得本次的世代戳
    pub fn begin(&self) -> u64 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// 响应到达时校验：只有最新世代允许落地
    pub fn is_current(&self, generation: u64) -> bool {
        self.0.load(Ordering::SeqCst) == generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_expansion() {
        let mut expand = ExpandState::new();

        let a_sig = PanelId::new("七甲", "王小明", PanelKind::Signature);
        let b_note = PanelId::new("八乙", "林小華", PanelKind::Note);

        assert_eq!(expand.toggle(a_sig.clone()), Some(&a_sig));
        // 开 B 的备注面板会先关掉 A 的签名面板
        assert_eq!(expand.toggle(b_note.clone()), Some(&b_note));
        assert_eq!(expand.open(), Some(&b_note));

        // 再点一次已开面板即关闭
        assert_eq!(expand.toggle(b_note), None);
        assert!(expand.open().is_none());
    }

    #[test]
    fn test_same_row_different_panel_switches() {
        let mut expand = ExpandState::new();
        let sig = PanelId::new("七甲", "王小明", PanelKind::Signature);
        let note = PanelId::new("七甲", "王小明", PanelKind::Note);

        expand.toggle(sig);
        assert_eq!(expand.toggle(note.clone()), Some(&note));
    }

    #[test]
    fn test_stale_generation_is_rejected() {
        let generation = ViewGeneration::new();
        let first = generation.begin();
        let second = generation.begin();

        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
    }
}
