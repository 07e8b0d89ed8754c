// ==========================================
// 热轧材料导入映射引擎 - 试导入错误分桶
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 6. 试导入边界
// 职责: 后端错误消息的子串分桶（仅用于前端聚合展示）
// 说明: 尽力而为的展示辅助, 不是正确性闸门
// ==========================================

use crate::domain::types::ErrorCategory;
use std::collections::BTreeMap;

// 词表命中即归桶, 按桶的先后顺序取首个命中
// 词表对齐后端导入器的消息习惯（中文为主, 英文兜底）
const DATE_HINTS: &[&str] = &["日期", "时间格式", "date"];
const NUMERIC_HINTS: &[&str] = &["浮点数", "整数", "数值", "数字", "numeric", "number"];
const MISSING_HINTS: &[&str] = &["缺失", "为空", "不能为空", "missing", "empty"];
const RULE_HINTS: &[&str] = &["规则", "rule"];
const MAPPING_HINTS: &[&str] = &["映射", "mapping"];

/// 单条错误消息分桶
pub fn classify_error(message: &str) -> ErrorCategory {
    let msg = message.to_lowercase();
    let hit = |hints: &[&str]| hints.iter().any(|h| msg.contains(h));

    if hit(DATE_HINTS) {
        ErrorCategory::DateFormat
    } else if hit(NUMERIC_HINTS) {
        ErrorCategory::NumericFormat
    } else if hit(MISSING_HINTS) {
        ErrorCategory::MissingField
    } else if hit(RULE_HINTS) {
        ErrorCategory::RuleConfig
    } else if hit(MAPPING_HINTS) {
        ErrorCategory::MappingConfig
    } else {
        ErrorCategory::Other
    }
}

/// 按桶聚合错误消息（桶序固定, 消息保持原顺序）
pub fn summarize_errors(errors: &[String]) -> BTreeMap<ErrorCategory, Vec<String>> {
    let mut buckets: BTreeMap<ErrorCategory, Vec<String>> = BTreeMap::new();
    for message in errors {
        buckets
            .entry(classify_error(message))
            .or_default()
            .push(message.clone());
    }
    buckets
}
