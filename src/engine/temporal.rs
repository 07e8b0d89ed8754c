// ==========================================
// 热轧材料导入映射引擎 - 时间解析器
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 4.2 时间解析
// 职责: 任意文本/数字时间戳 → 统一 UTC 时刻
// 解析顺序: 电子表格序列日期 → 弹性文本 → 紧凑数字串, 先中先得
// ==========================================

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

// 序列日期的开区间上下界: 1 < n < 200000
// 下界排除 0/1 等无意义序列值, 上界约为公元 2447 年
const SERIAL_MIN_EXCLUSIVE: f64 = 1.0;
const SERIAL_MAX_EXCLUSIVE: f64 = 200_000.0;

/// 解析任意时间戳文本为 UTC 时刻
///
/// # 解析顺序
/// 1. trim 后为空 → None
/// 2. 可解析为有限数字且落在 (1, 200000) 开区间 → 按电子表格序列日期:
///    整数部分 = 自 1899-12-30 起的天数（序列 1 = 1899-12-31, 兼容
///    遗留电子表格的闰年 bug 纪元）, 小数部分 = 当日秒数（就近取整）
/// 3. 弹性文本解析（分隔符 - / : 空格 T, 可带时区后缀）
/// 4. 剔除 `- / : 空格 T` 后恰 14 位数字按 yyyyMMddHHmmss、
///    恰 8 位数字按 yyyyMMdd, 均按 UTC
/// 5. 以上全部失败 → None
///
/// NaN / ±Infinity 虽可被数字解析接受, 但非有限值不进入序列日期分支,
/// 后续文本解析也无法识别, 最终返回 None
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(n) = trimmed.parse::<f64>() {
        if n.is_finite() && n > SERIAL_MIN_EXCLUSIVE && n < SERIAL_MAX_EXCLUSIVE {
            return serial_to_instant(n);
        }
        // 区间外/非有限的数字继续尝试文本解析
    }

    if let Some(dt) = parse_flexible(trimmed) {
        return Some(dt);
    }

    parse_compact_digits(trimmed)
}

/// 电子表格序列日期 → UTC 时刻
///
/// 基准日 1899-12-30: 序列 1 = 1899-12-31, 序列 45292 = 2024-01-01,
/// 与遗留电子表格文件格式的日期系统逐日对齐（含其有意保留的
/// 1900 年闰年 bug 偏移）
fn serial_to_instant(serial: f64) -> Option<DateTime<Utc>> {
    let days = serial.trunc() as i64;
    let secs = (serial.fract() * 86_400.0).round() as i64;

    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let instant = base
        .checked_add_signed(Duration::days(days))?
        .checked_add_signed(Duration::seconds(secs))?;
    Some(Utc.from_utc_datetime(&instant))
}

/// 弹性文本解析: 常见日期/日期时间写法, 带或不带时区后缀
fn parse_flexible(s: &str) -> Option<DateTime<Utc>> {
    // ISO 8601 / RFC 3339（带时区后缀, 统一折算为 UTC）
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y/%m/%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
    ];
    for fmt in DATETIME_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&ndt));
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];
    for fmt in DATE_FORMATS {
        if let Ok(nd) = NaiveDate::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&nd.and_hms_opt(0, 0, 0)?));
        }
    }

    // 1–4 位裸数字串按"年份 1 月 1 日"接受。"0"/"1" 这类输入会落到这里
    // 并产出公元纪元附近的日期, 与参考系统行为保持一致, 不在此"纠正"
    if s.len() <= 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        let nd = NaiveDate::from_ymd_opt(year, 1, 1)?;
        return Some(Utc.from_utc_datetime(&nd.and_hms_opt(0, 0, 0)?));
    }

    None
}

/// 紧凑数字串解析: 剔除分隔符后按位数识别
fn parse_compact_digits(s: &str) -> Option<DateTime<Utc>> {
    let digits: String = s
        .chars()
        .filter(|c| !matches!(c, '-' | '/' | ':' | ' ' | 'T'))
        .collect();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    match digits.len() {
        14 => NaiveDateTime::parse_from_str(&digits, "%Y%m%d%H%M%S")
            .ok()
            .map(|ndt| Utc.from_utc_datetime(&ndt)),
        8 => NaiveDate::parse_from_str(&digits, "%Y%m%d")
            .ok()
            .and_then(|nd| nd.and_hms_opt(0, 0, 0))
            .map(|ndt| Utc.from_utc_datetime(&ndt)),
        _ => None,
    }
}
