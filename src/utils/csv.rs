//! CSV 文本组装
//!
//! 输出 UTF-8 并带 BOM 前缀，Excel 双击打开时才不会把中文读成乱码。

/// UTF-8 BOM
pub const BOM: &str = "\u{feff}";

/// 含逗号、引号或换行的栏位加双引号包裹，内部引号加倍
fn escape_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// 组装完整 CSV 文本：BOM + 表头列 + 资料列
pub fn to_csv(rows: &[Vec<String>]) -> String {
    let body = rows
        .iter()
        .map(|row| {
            row.iter()
                .map(|f| escape_field(f))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!("{BOM}{body}")
}

/// 确保既有 CSV 文本带 BOM（后端汇出的原文可能没有）
pub fn ensure_bom(csv: &str) -> String {
    if csv.starts_with(BOM) {
        csv.to_string()
    } else {
        format!("{BOM}{csv}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_fields_pass_through() {
        let rows = vec![
            vec!["eventId".to_string(), "title".to_string()],
            vec!["e1".to_string(), "戶外教學".to_string()],
        ];
        assert_eq!(to_csv(&rows), "\u{feff}eventId,title\ne1,戶外教學");
    }

    #[test]
    fn test_special_fields_are_quoted() {
        let rows = vec![vec![
            "a,b".to_string(),
            "say \"hi\"".to_string(),
            "line1\nline2".to_string(),
        ]];
        assert_eq!(
            to_csv(&rows),
            "\u{feff}\"a,b\",\"say \"\"hi\"\"\",\"line1\nline2\""
        );
    }

    #[test]
    fn test_ensure_bom_is_idempotent() {
        let once = ensure_bom("a,b");
        assert_eq!(ensure_bom(&once), once);
        assert!(once.starts_with(BOM));
    }
}
