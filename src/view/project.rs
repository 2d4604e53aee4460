use std::cmp::Ordering;
use std::collections::BTreeSet;

use chrono::NaiveDateTime;

use crate::models::RosterRow;
use crate::models::admin::responses::EventDetail;
use crate::view::class_rank::compare_class;
use crate::view::state::{ClassFilter, PanelId, PanelKind, SortMode, ViewState};

/// 明细表的一列（已回覆学生）
#[derive(Debug, Clone)]
pub struct TableRow {
    pub class: String,
    pub name: String,
    pub instrument: Option<String>,
    /// 主要作答：出席意愿或同意与否
    pub choice: Option<String>,
    pub go_bus: Option<String>,
    pub back_bus: Option<String>,
    pub has_note: bool,
    pub has_signature: bool,
    pub reply_ts: Option<NaiveDateTime>,
    /// 原始时间字符串，解析失败时仍照原样显示
    pub reply_ts_raw: Option<String>,
}

/// 投影结果：可直接渲染的表
#[derive(Debug, Clone)]
pub struct TableView {
    pub rows: Vec<TableRow>,
    /// 过滤后的未回覆名单
    pub not_replied: Vec<RosterRow>,
    /// 目前资料中出现过的班级，按班级序排列（过滤选单用）
    pub classes: Vec<String>,
    /// 实际生效的过滤值（指定班级不存在时退回 All）
    pub effective_filter: ClassFilter,
    pub sort_mode: SortMode,
    /// 整份资料中是否出现过遊覽車栏位，决定去/回程两栏显隐
    pub has_bus_columns: bool,
}

fn cmp_class_name(a: &TableRow, b: &TableRow) -> Ordering {
    compare_class(&a.class, &b.class).then_with(|| a.name.cmp(&b.name))
}

fn cmp_option<T: Ord>(a: &Option<T>, b: &Option<T>, descending: bool) -> Ordering {
    // None（缺失或解析失败）无论方向都排最后
    match (a, b) {
        (Some(x), Some(y)) => {
            if descending {
                y.cmp(x)
            } else {
                x.cmp(y)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// 把缓存的明细与视图状态投影成表格。纯函数，不碰网络与全局状态。
pub fn project(detail: &EventDetail, state: &ViewState) -> TableView {
    let mut class_set: BTreeSet<String> = BTreeSet::new();
    for record in &detail.replied {
        class_set.insert(record.class.clone());
    }
    for row in &detail.not_replied {
        class_set.insert(row.class.clone());
    }
    let mut classes: Vec<String> = class_set.into_iter().collect();
    classes.sort_by(|a, b| compare_class(a, b));

    let effective_filter = match &state.class_filter {
        ClassFilter::Class(class) if !classes.contains(class) => ClassFilter::All,
        other => other.clone(),
    };
    let keep = |class: &str| match &effective_filter {
        ClassFilter::All => true,
        ClassFilter::Class(wanted) => class == wanted,
    };

    // 栏位显隐看整份资料，不随过滤变动
    let has_bus_columns = detail.replied.iter().any(|r| r.has_bus_fields());

    let mut rows: Vec<TableRow> = detail
        .replied
        .iter()
        .filter(|r| keep(&r.class))
        .map(|r| TableRow {
            class: r.class.clone(),
            name: r.name.clone(),
            instrument: r.instrument.clone(),
            choice: r.primary_choice(),
            go_bus: r.go_bus(),
            back_bus: r.back_bus(),
            has_note: r.parent_note().is_some(),
            has_signature: r.signature_data_url().is_some(),
            reply_ts: r.parsed_ts(),
            reply_ts_raw: r.last_reply_ts.clone(),
        })
        .collect();

    match state.sort_mode {
        SortMode::Instrument => rows.sort_by(|a, b| {
            cmp_option(&a.instrument, &b.instrument, false).then_with(|| cmp_class_name(a, b))
        }),
        SortMode::TimeAsc => rows.sort_by(|a, b| {
            cmp_option(&a.reply_ts, &b.reply_ts, false).then_with(|| cmp_class_name(a, b))
        }),
        SortMode::TimeDesc => rows.sort_by(|a, b| {
            cmp_option(&a.reply_ts, &b.reply_ts, true).then_with(|| cmp_class_name(a, b))
        }),
        SortMode::Class => rows.sort_by(cmp_class_name),
    }

    let mut not_replied: Vec<RosterRow> = detail
        .not_replied
        .iter()
        .filter(|r| keep(&r.class))
        .cloned()
        .collect();
    not_replied.sort_by(|a, b| compare_class(&a.class, &b.class).then_with(|| a.name.cmp(&b.name)));

    TableView {
        rows,
        not_replied,
        classes,
        effective_filter,
        sort_mode: state.sort_mode,
        has_bus_columns,
    }
}

/// 面板内容按需取材：签名取 dataURL，备注取文字。
/// 开面板时才调用，不为每一列预先展开。
pub fn panel_content(detail: &EventDetail, panel: &PanelId) -> Option<String> {
    let record = detail
        .replied
        .iter()
        .find(|r| r.class == panel.class && r.name == panel.name)?;
    match panel.kind {
        PanelKind::Signature => record.signature_data_url(),
        PanelKind::Note => record.parent_note(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReplyRecord;
    use crate::models::events::entities::Event;

    fn record(class: &str, name: &str, instrument: Option<&str>, answer: &str, ts: Option<&str>) -> ReplyRecord {
        ReplyRecord {
            event_id: "e1".to_string(),
            class: class.to_string(),
            name: name.to_string(),
            answer: answer.to_string(),
            last_reply_ts: ts.map(str::to_string),
            instrument: instrument.map(str::to_string),
        }
    }

    fn detail(replied: Vec<ReplyRecord>, not_replied: Vec<RosterRow>) -> EventDetail {
        let total = (replied.len() + not_replied.len()) as i64;
        let replied_count = replied.len() as i64;
        EventDetail {
            event: serde_json::from_value::<Event>(serde_json::json!({ "eventId": "e1" }))
                .unwrap(),
            replied,
            not_replied,
            total_roster: total,
            replied_count,
            not_replied_count: total - replied_count,
            reply_rate: 0.0,
        }
    }

    fn roster(class: &str, name: &str) -> RosterRow {
        RosterRow {
            class: class.to_string(),
            name: name.to_string(),
            instrument: None,
        }
    }

    fn names(view: &TableView) -> Vec<&str> {
        view.rows.iter().map(|r| r.name.as_str()).collect()
    }

    #[test]
    fn test_instrument_sort_with_name_tiebreak() {
        let d = detail(
            vec![
                record("七甲", "B", Some("Flute"), "{}", None),
                record("七甲", "A", Some("Flute"), "{}", None),
                record("八乙", "C", Some("Drum"), "{}", None),
            ],
            vec![],
        );
        let view = project(
            &d,
            &ViewState {
                class_filter: ClassFilter::All,
                sort_mode: SortMode::Instrument,
            },
        );
        assert_eq!(names(&view), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_class_sort_and_unknown_class_last() {
        let d = detail(
            vec![
                record("九甲", "丙", None, "{}", None),
                record("特教班", "丁", None, "{}", None),
                record("八乙", "乙", None, "{}", None),
                record("八甲", "甲", None, "{}", None),
            ],
            vec![],
        );
        let view = project(&d, &ViewState::default());
        assert_eq!(names(&view), vec!["甲", "乙", "丙", "丁"]);
    }

    #[test]
    fn test_time_sort_unparseable_last_in_both_directions() {
        let d = detail(
            vec![
                record("七甲", "早", None, "{}", Some("2025-03-01 08:00")),
                record("七甲", "晚", None, "{}", Some("2025-03-02 20:00")),
                record("七甲", "怪", None, "{}", Some("昨天")),
            ],
            vec![],
        );
        let asc = project(
            &d,
            &ViewState {
                class_filter: ClassFilter::All,
                sort_mode: SortMode::TimeAsc,
            },
        );
        assert_eq!(names(&asc), vec!["早", "晚", "怪"]);

        let desc = project(
            &d,
            &ViewState {
                class_filter: ClassFilter::All,
                sort_mode: SortMode::TimeDesc,
            },
        );
        assert_eq!(names(&desc), vec!["晚", "早", "怪"]);
    }

    #[test]
    fn test_filter_keeps_one_class_and_absentees() {
        let d = detail(
            vec![
                record("七甲", "甲", None, "{}", None),
                record("八乙", "乙", None, "{}", None),
            ],
            vec![roster("七甲", "丙"), roster("八乙", "丁")],
        );
        let view = project(
            &d,
            &ViewState {
                class_filter: ClassFilter::Class("七甲".to_string()),
                sort_mode: SortMode::Class,
            },
        );
        assert_eq!(names(&view), vec!["甲"]);
        assert_eq!(view.not_replied.len(), 1);
        assert_eq!(view.not_replied[0].name, "丙");
    }

    #[test]
    fn test_missing_filter_class_resets_to_all() {
        let d = detail(vec![record("七甲", "甲", None, "{}", None)], vec![]);
        let view = project(
            &d,
            &ViewState {
                class_filter: ClassFilter::Class("九丙".to_string()),
                sort_mode: SortMode::Class,
            },
        );
        assert_eq!(view.effective_filter, ClassFilter::All);
        assert_eq!(view.rows.len(), 1);
    }

    #[test]
    fn test_bus_columns_follow_whole_dataset() {
        let no_bus = detail(
            vec![record("七甲", "甲", None, r#"{"consentChoice":"同意"}"#, None)],
            vec![],
        );
        assert!(!project(&no_bus, &ViewState::default()).has_bus_columns);

        let with_bus = detail(
            vec![
                record("七甲", "甲", None, r#"{"consentChoice":"同意","goBus":"是","backBus":"否"}"#, None),
                record("八乙", "乙", None, r#"{"consentChoice":"不同意"}"#, None),
            ],
            vec![],
        );
        // 只要任一笔带遊覽車栏位，两栏就显示
        let view = project(
            &with_bus,
            &ViewState {
                class_filter: ClassFilter::Class("八乙".to_string()),
                sort_mode: SortMode::Class,
            },
        );
        assert!(view.has_bus_columns);
    }

    #[test]
    fn test_panel_content_lazily_resolved() {
        let d = detail(
            vec![record(
                "七甲",
                "甲",
                None,
                r#"{"parentNote":"当天自行接送","parentSignature":"data:image/jpeg;base64,AAAA"}"#,
                None,
            )],
            vec![],
        );
        let note = panel_content(&d, &PanelId::new("七甲", "甲", PanelKind::Note));
        assert_eq!(note.as_deref(), Some("当天自行接送"));
        let sig = panel_content(&d, &PanelId::new("七甲", "甲", PanelKind::Signature));
        assert!(sig.unwrap().starts_with("data:image/jpeg"));
        assert!(panel_content(&d, &PanelId::new("九丙", "无", PanelKind::Note)).is_none());
    }
}
