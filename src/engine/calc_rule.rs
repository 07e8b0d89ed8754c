// ==========================================
// 热轧材料导入映射引擎 - 算术规则校验器
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 4.4 数值计算规则
// 职责: 校验 Calculate 类型行的算术表达式
// 红线: 封闭小文法, 不引入通用表达式引擎
// ==========================================

/// 校验数值计算规则
///
/// # 接受的两种形态（先剔除全部空白）
/// - `<运算符><数字>`: 运算符 ∈ {+ - * /}, 数字为带符号十进制
/// - `<占位符><运算符><数字>`: 占位符 ∈ {x, value, raw}（大小写不敏感）
///
/// 空规则视为无操作, 校验通过。
/// 除法的除数绝对值小于机器精度（含 -0）按除零拒绝。
pub fn validate_calculate(rule: Option<&str>) -> Result<(), String> {
    let Some(raw) = rule else {
        return Ok(());
    };

    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Ok(());
    }

    let lower = compact.to_lowercase();
    // 占位符前缀, 最长优先
    let body = if let Some(rest) = lower.strip_prefix("value") {
        rest
    } else if let Some(rest) = lower.strip_prefix("raw") {
        rest
    } else if let Some(rest) = lower.strip_prefix('x') {
        rest
    } else {
        lower.as_str()
    };

    let mut chars = body.chars();
    let op = chars.next().ok_or_else(|| format_error(&compact))?;
    if !matches!(op, '+' | '-' | '*' | '/') {
        return Err(format_error(&compact));
    }

    let operand = parse_decimal(chars.as_str()).ok_or_else(|| format_error(&compact))?;

    if op == '/' && operand.abs() < f64::EPSILON {
        return Err(format!(
            "计算规则非法: 除数不能为 0（实际为 {}）",
            chars.as_str()
        ));
    }

    Ok(())
}

fn format_error(rule: &str) -> String {
    format!(
        "计算规则格式错误: {}（期望 <运算符><数字> 或 x<运算符><数字>, 例如 *1000 或 x/1000）",
        rule
    )
}

/// 带符号十进制字面量: 可选正负号 + 数字 + 至多一个小数点。
/// 科学计数法与 inf/nan 不属于本文法
fn parse_decimal(s: &str) -> Option<f64> {
    let rest = s.strip_prefix(['+', '-']).unwrap_or(s);
    if rest.is_empty() {
        return None;
    }

    let mut dot_seen = false;
    let mut digit_seen = false;
    for c in rest.chars() {
        match c {
            '0'..='9' => digit_seen = true,
            '.' if !dot_seen => dot_seen = true,
            _ => return None,
        }
    }
    if !digit_seen {
        return None;
    }

    s.parse::<f64>().ok()
}
