use std::cmp::Ordering;

// 年级字按汉字数字定序
const GRADE_ORDER: &[char] = &['一', '二', '三', '四', '五', '六', '七', '八', '九', '十'];
// 班别字按天干定序
const SECTION_ORDER: &[char] = &['甲', '乙', '丙', '丁', '戊', '己', '庚', '辛', '壬', '癸'];

fn position(order: &[char], ch: char) -> u32 {
    order
        .iter()
        .position(|&known| known == ch)
        .map(|i| i as u32)
        .unwrap_or(u32::MAX)
}

/// 班级字符串的排序键：(年级序, 班别序)。
/// 不认识的字排在全部已知字之后。
pub fn class_rank(class: &str) -> (u32, u32) {
    let mut chars = class.chars();
    let grade = chars
        .next()
        .map(|c| position(GRADE_ORDER, c))
        .unwrap_or(u32::MAX);
    let section = chars
        .next()
        .map(|c| position(SECTION_ORDER, c))
        .unwrap_or(u32::MAX);
    (grade, section)
}

/// 排序键相同时退回字符串比较，保证全序
pub fn compare_class(a: &str, b: &str) -> Ordering {
    class_rank(a).cmp(&class_rank(b)).then_with(|| a.cmp(b))
}
