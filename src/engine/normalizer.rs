// ==========================================
// 热轧材料导入映射引擎 - 列名归一化器
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 4.1 列名匹配
// 职责: 表头/字段名比较前的大小写/空白/标点折叠
// ==========================================

/// 归一化列名: 小写后剔除 ASCII 空白、下划线、连字符与中英文括号
///
/// 幂等: normalize(normalize(s)) == normalize(s)
/// 非拉丁字符（如中文表头）除剔除集外原样保留
pub fn normalize(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .filter(|c| {
            !c.is_ascii_whitespace()
                && !matches!(c, '_' | '-' | '(' | ')' | '（' | '）')
        })
        .collect()
}

/// 在表头中查找与任一候选名归一化相等的列
///
/// # 参数
/// - headers: 预览表头
/// - candidates: 候选名（内部字段名/显示名等）
///
/// # 返回
/// - Some(&str): 第一个命中的表头（按表头顺序）
/// - None: 无命中
pub fn match_header<'a>(headers: &'a [String], candidates: &[&str]) -> Option<&'a str> {
    let targets: Vec<String> = candidates.iter().map(|c| normalize(c)).collect();
    headers
        .iter()
        .find(|h| targets.iter().any(|t| !t.is_empty() && normalize(h) == *t))
        .map(|h| h.as_str())
}
