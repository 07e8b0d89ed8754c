// ==========================================
// 热轧材料导入映射引擎 - 拼接规则校验器
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 4.5 多列拼接规则
// 职责: 校验 Combine 类型行的模板/CONCAT 表达式
// ==========================================

/// 校验多列拼接规则
///
/// # 两项独立检查（按序触发首个违反者）
/// - 前缀为 CONCAT(（大小写不敏感）时必须以 ) 收尾
/// - 花括号用非负计数器配平: '}' 先于对应 '{' 出现立即失败,
///   收尾时计数不为零也失败
///
/// 空规则视为无操作, 校验通过。
pub fn validate_combine(rule: Option<&str>) -> Result<(), String> {
    let Some(raw) = rule else {
        return Ok(());
    };
    let text = raw.trim();
    if text.is_empty() {
        return Ok(());
    }

    if text.to_lowercase().starts_with("concat(") && !text.ends_with(')') {
        return Err("CONCAT 规则缺少收尾括号 )".to_string());
    }

    let mut depth: i32 = 0;
    for c in text.chars() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth < 0 {
                    return Err("拼接模板花括号不匹配: '}' 先于对应的 '{' 出现".to_string());
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(format!("拼接模板花括号不匹配: {} 个 '{{' 未闭合", depth));
    }

    Ok(())
}
