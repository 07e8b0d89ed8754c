// ==========================================
// 热轧材料导入映射引擎 - 值转换规则解析器
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 4.3 值转换规则
// 职责: 自由文本规则 → 值查找表
// 解析顺序: 内置关键字 → JSON 对象 → 键值对列表, 先中先得
// ==========================================

use std::collections::BTreeMap;

/// 解析值转换规则文本
///
/// # 解析顺序
/// 1. 内置关键字（大小写不敏感精确匹配）→ 返回固定词表
/// 2. `{`…`}` 定界文本按扁平 JSON 对象解析: null 值条目剔除,
///    余下键值去引号并 trim; 非对象（如数组）或条目全部被剔除 → None
/// 3. 键值对列表: 按 `; , ； ， 换行` 切分, 每段按首个 `=>`/`:`/`=`
///    （按此优先级）切成键值, 两侧去引号并 trim, 空键跳过
/// 4. 没有任何非空键的键值对 → None
pub fn resolve_value_map(rule: Option<&str>) -> Option<BTreeMap<String, String>> {
    let text = rule?.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(table) = builtin_table(text) {
        return Some(table);
    }

    // 定界符表明作者意图是 JSON, 畸形 JSON 不回退到键值对语法
    if is_json_delimited(text) {
        return parse_json_object(text);
    }

    parse_pair_list(text)
}

// ==========================================
// 内置词表
// ==========================================
// 原型: 现场导入清洗规则的 是/否/Y/N/1/0 与 适温状态词表
fn builtin_table(keyword: &str) -> Option<BTreeMap<String, String>> {
    match keyword.to_lowercase().as_str() {
        // 双向 是/否 词表, 统一为 "true"/"false"
        "bool_yn" => Some(
            [
                ("是", "true"),
                ("否", "false"),
                ("Y", "true"),
                ("N", "false"),
                ("YES", "true"),
                ("NO", "false"),
                ("TRUE", "true"),
                ("FALSE", "false"),
                ("1", "true"),
                ("0", "false"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ),
        // 适温状态词表, 统一为 "ready"/"waiting"
        "temper_status" => Some(
            [
                ("适温", "ready"),
                ("已适温", "ready"),
                ("待适温", "waiting"),
                ("未适温", "waiting"),
                ("READY", "ready"),
                ("WAITING", "waiting"),
            ]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ),
        _ => None,
    }
}

fn is_json_delimited(text: &str) -> bool {
    (text.starts_with('{') && text.ends_with('}'))
        || (text.starts_with('[') && text.ends_with(']'))
}

fn parse_json_object(text: &str) -> Option<BTreeMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    let obj = value.as_object()?;

    let mut map = BTreeMap::new();
    for (k, v) in obj {
        let rendered = match v {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let key = strip_quotes(k);
        if key.is_empty() {
            continue;
        }
        map.insert(key, strip_quotes(&rendered));
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn parse_pair_list(text: &str) -> Option<BTreeMap<String, String>> {
    let mut map = BTreeMap::new();
    for segment in text.split(['；', '，', ';', ',', '\n']) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let Some((key_raw, value_raw)) = split_pair(segment) else {
            continue;
        };
        let key = strip_quotes(key_raw);
        if key.is_empty() {
            continue;
        }
        map.insert(key, strip_quotes(value_raw));
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 按首个分隔符切分键值, 优先级 `=>` > `:` > `=`
fn split_pair(segment: &str) -> Option<(&str, &str)> {
    for sep in ["=>", ":", "="] {
        if let Some(idx) = segment.find(sep) {
            return Some((&segment[..idx], &segment[idx + sep.len()..]));
        }
    }
    None
}

/// 去掉一对包裹整串的 `"…"` 或 `'…'`（串长 ≥ 2）, 再 trim;
/// 不成对的引号原样保留
fn strip_quotes(s: &str) -> String {
    let t = s.trim();
    let bytes = t.as_bytes();
    if t.len() >= 2 {
        let (first, last) = (bytes[0], bytes[t.len() - 1]);
        if (first == b'"' && last == b'"') || (first == b'\'' && last == b'\'') {
            return t[1..t.len() - 1].trim().to_string();
        }
    }
    t.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    // ==========================================
    // 内置关键字
    // ==========================================

    #[test]
    fn test_builtin_bool_yn() {
        let table = resolve_value_map(Some("bool_yn")).unwrap();
        assert_eq!(table.get("是").map(String::as_str), Some("true"));
        assert_eq!(table.get("否").map(String::as_str), Some("false"));
        assert_eq!(table.get("Y").map(String::as_str), Some("true"));

        // 关键字大小写不敏感
        assert!(resolve_value_map(Some("BOOL_YN")).is_some());
        assert!(resolve_value_map(Some(" Bool_Yn ")).is_some());
    }

    #[test]
    fn test_builtin_temper_status() {
        let table = resolve_value_map(Some("temper_status")).unwrap();
        assert_eq!(table.get("适温").map(String::as_str), Some("ready"));
        assert_eq!(table.get("待适温").map(String::as_str), Some("waiting"));
    }

    // ==========================================
    // JSON 对象
    // ==========================================

    #[test]
    fn test_json_object_basic() {
        let table = resolve_value_map(Some(r#"{"A":"1","B":null}"#)).unwrap();
        assert_eq!(table, map_of(&[("A", "1")]));
    }

    #[test]
    fn test_json_object_all_null() {
        assert!(resolve_value_map(Some(r#"{"A":null}"#)).is_none());
    }

    #[test]
    fn test_json_array_rejected() {
        assert!(resolve_value_map(Some(r#"["A","B"]"#)).is_none());
    }

    #[test]
    fn test_json_malformed_rejected() {
        // 畸形 JSON 不回退到键值对语法
        assert!(resolve_value_map(Some("{A=1}")).is_none());
    }

    #[test]
    fn test_json_non_string_values_rendered() {
        let table = resolve_value_map(Some(r#"{"A":1,"B":true}"#)).unwrap();
        assert_eq!(table, map_of(&[("A", "1"), ("B", "true")]));
    }

    // ==========================================
    // 键值对列表
    // ==========================================

    #[test]
    fn test_pair_list_mixed_separators() {
        let table = resolve_value_map(Some("A=>1;B:2;C=3")).unwrap();
        assert_eq!(table, map_of(&[("A", "1"), ("B", "2"), ("C", "3")]));
    }

    #[test]
    fn test_pair_list_fullwidth_separators() {
        let table = resolve_value_map(Some("是=true；否=false")).unwrap();
        assert_eq!(table, map_of(&[("是", "true"), ("否", "false")]));
    }

    #[test]
    fn test_pair_list_newline_separator() {
        let table = resolve_value_map(Some("A=1\nB=2")).unwrap();
        assert_eq!(table, map_of(&[("A", "1"), ("B", "2")]));
    }

    #[test]
    fn test_pair_list_quote_stripping() {
        let table = resolve_value_map(Some(r#""A" => '1'; 'B': "2""#)).unwrap();
        assert_eq!(table, map_of(&[("A", "1"), ("B", "2")]));
    }

    #[test]
    fn test_pair_list_arrow_priority_over_colon() {
        // "=>" 优先于 ":", 键内的冒号不切分
        let table = resolve_value_map(Some("a:b=>c")).unwrap();
        assert_eq!(table, map_of(&[("a:b", "c")]));
    }

    #[test]
    fn test_pair_list_empty_key_skipped() {
        assert!(resolve_value_map(Some("=1")).is_none());
        let table = resolve_value_map(Some("=1;A=2")).unwrap();
        assert_eq!(table, map_of(&[("A", "2")]));
    }

    // ==========================================
    // 空输入
    // ==========================================

    #[test]
    fn test_empty_rule() {
        assert!(resolve_value_map(None).is_none());
        assert!(resolve_value_map(Some("")).is_none());
        assert!(resolve_value_map(Some("   ")).is_none());
    }

    #[test]
    fn test_no_resolvable_pairs() {
        assert!(resolve_value_map(Some("纯文本没有分隔符")).is_none());
    }
}
