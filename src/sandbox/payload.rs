// ==========================================
// 热轧材料导入映射引擎 - 试导入载荷构建
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 6. 试导入边界
// 职责: MappingSet → mappings_json / value_transforms_json
// ==========================================

use crate::domain::mapping::{MappingRow, MappingSet, ValueTransformRule};
use crate::domain::types::MappingType;
use crate::engine::value_transform::resolve_value_map;
use crate::error::EngineResult;
use crate::sandbox::adapter::SandboxImportRequest;

/// 行归一化: 字符串 trim, 类型不适用的字段清为缺省
///
/// transform_rule 仅对 Transform/Calculate/Combine 保留,
/// source_format 仅对 Date 保留, default_value 对所有类型保留
/// （trim 后为空一律清除）
pub fn sanitize_rows(set: &MappingSet) -> Vec<MappingRow> {
    set.rows
        .iter()
        .map(|row| MappingRow {
            source_field: row.source_field.trim().to_string(),
            target_field: row.target_field.trim().to_string(),
            mapping_type: row.mapping_type,
            default_value: trimmed_opt(&row.default_value),
            transform_rule: if row.mapping_type.uses_transform_rule() {
                trimmed_opt(&row.transform_rule)
            } else {
                None
            },
            source_format: if row.mapping_type.uses_source_format() {
                trimmed_opt(&row.source_format)
            } else {
                None
            },
        })
        .collect()
}

/// 序列化映射规范（行已归一化）
pub fn build_mappings_json(set: &MappingSet) -> EngineResult<String> {
    Ok(serde_json::to_string(&sanitize_rows(set))?)
}

/// 从 Transform 类型行构建值转换规则表
///
/// 只收录目标字段非空且规则可解析的行; 不可解析的行
/// 由诊断引擎以 Error 级问题报告, 这里静默跳过
pub fn build_value_transform_rules(set: &MappingSet) -> Vec<ValueTransformRule> {
    set.rows
        .iter()
        .filter(|r| r.mapping_type == MappingType::Transform)
        .filter_map(|r| {
            let target = r.target_field.trim();
            if target.is_empty() {
                return None;
            }
            let value_map = resolve_value_map(r.transform_rule.as_deref())?;
            Some(ValueTransformRule {
                field: target.to_string(),
                value_map,
                data_type: "string".to_string(),
            })
        })
        .collect()
}

/// 序列化值转换规则表
pub fn build_value_transforms_json(set: &MappingSet) -> EngineResult<String> {
    Ok(serde_json::to_string(&build_value_transform_rules(set))?)
}

/// 组装一次试导入请求
///
/// # 参数
/// - file_path: 源文件路径（外部文件选择器提供, 本 crate 不打开）
/// - set: 当前映射规范快照
/// - sample_limit: 干跑行数上限
pub fn build_sandbox_request(
    file_path: &str,
    set: &MappingSet,
    sample_limit: usize,
) -> EngineResult<SandboxImportRequest> {
    Ok(SandboxImportRequest {
        file_path: file_path.to_string(),
        mapping_id: set.template_id.clone(),
        mappings_json: build_mappings_json(set)?,
        value_transforms_json: build_value_transforms_json(set)?,
        sample_limit,
    })
}

fn trimmed_opt(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
