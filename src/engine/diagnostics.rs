// ==========================================
// 热轧材料导入映射引擎 - 映射诊断引擎
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 4.6 映射诊断
// 职责: 必填/重复/源列对账 + 覆盖率计数 + 逐行问题清单
// 红线: 纯函数、全函数: 不抛错、不依赖预览、输出完全由输入决定
// ==========================================

use crate::domain::mapping::{Diagnosis, Issue, MappingRow, MappingSet, PreviewData};
use crate::domain::schema::{field_label, required_field_names};
use crate::domain::types::MappingType;
use crate::engine::calc_rule::validate_calculate;
use crate::engine::combine_rule::validate_combine;
use crate::engine::normalizer::normalize;
use crate::engine::value_transform::resolve_value_map;
use std::collections::{HashMap, HashSet};
use tracing::instrument;

// ==========================================
// MappingDiagnostics - 映射诊断引擎
// ==========================================
// 每次编辑（由上层防抖后）以完整快照调用 diagnose, 全量重算
pub struct MappingDiagnostics {
    required_targets: Vec<String>, // 必填目标字段（内部名）
}

impl MappingDiagnostics {
    /// 按内部材料 schema 的必填字段创建诊断引擎
    pub fn new() -> Self {
        Self {
            required_targets: required_field_names(),
        }
    }

    /// 注入自定义必填字段集合（测试/特殊模板场景）
    pub fn with_required_targets(required_targets: Vec<String>) -> Self {
        Self { required_targets }
    }

    /// 诊断一份映射规范
    ///
    /// # 参数
    /// - rows: 当前映射规范快照
    /// - preview: 预览数据快照（未选文件时为 None）
    ///
    /// # 返回
    /// - Diagnosis: 聚合清单 + 覆盖率计数 + 逐行问题, 全部去重,
    ///   行序/问题序对相同输入保持稳定
    #[instrument(skip_all, fields(row_count = rows.rows.len(), has_preview = preview.is_some()))]
    pub fn diagnose(&self, rows: &MappingSet, preview: Option<&PreviewData>) -> Diagnosis {
        let mut diagnosis = Diagnosis::default();

        // === 扫描 1: 目标字段出现次数 ===
        let mut target_counts: HashMap<String, usize> = HashMap::new();
        for row in &rows.rows {
            let target = row.target_field.trim();
            if !target.is_empty() {
                *target_counts.entry(target.to_string()).or_insert(0) += 1;
            }
        }
        diagnosis.mapped_target_count = target_counts.len();

        // 必填字段缺失（按配置顺序）
        for required in &self.required_targets {
            if !target_counts.contains_key(required.as_str()) {
                push_unique(&mut diagnosis.missing_required, required.clone());
            }
        }

        // 重复目标（按首现顺序, 每个字段只报一次）
        for row in &rows.rows {
            let target = row.target_field.trim();
            if !target.is_empty() && target_counts[target] > 1 {
                push_unique(&mut diagnosis.duplicate_targets, target.to_string());
            }
        }

        // === 扫描 2: 源列与预览表头对账 ===
        let normalized_headers: Option<HashSet<String>> =
            preview.map(|p| p.headers.iter().map(|h| normalize(h)).collect());

        let mut seen_sources: HashSet<String> = HashSet::new();
        for row in &rows.rows {
            let source = row.source_field.trim();
            if source.is_empty() || !seen_sources.insert(source.to_string()) {
                continue;
            }
            diagnosis.source_field_count += 1;
            if let Some(headers) = &normalized_headers {
                if headers.contains(&normalize(source)) {
                    diagnosis.matched_source_count += 1;
                } else {
                    push_unique(&mut diagnosis.source_missing_in_preview, source.to_string());
                }
            }
        }

        // === 扫描 3: 逐行问题 ===
        for (idx, row) in rows.rows.iter().enumerate() {
            let issues = self.diagnose_row(row, idx, &target_counts, &mut diagnosis);
            if !issues.is_empty() {
                diagnosis.row_issues.insert(idx, issues);
            }
        }

        diagnosis
    }

    /// 单行检查, 同时把规则类问题登记进对应聚合清单
    fn diagnose_row(
        &self,
        row: &MappingRow,
        idx: usize,
        target_counts: &HashMap<String, usize>,
        diagnosis: &mut Diagnosis,
    ) -> Vec<Issue> {
        let mut issues: Vec<Issue> = Vec::new();
        let target = row.target_field.trim();
        let source = row.source_field.trim();
        let rule = trimmed_opt(&row.transform_rule);
        let label = row_label(row, idx);

        // 目标字段: 空 → Error; 重复 → Error（每个重复行都要看到）
        if target.is_empty() {
            issues.push(Issue::error("目标字段不能为空"));
        } else if target_counts[target] > 1 {
            issues.push(Issue::error(format!("目标字段重复: {}", field_label(target))));
        }

        // 默认值映射必须有默认值
        if row.mapping_type == MappingType::Default && trimmed_opt(&row.default_value).is_none() {
            issues.push(Issue::error("默认值映射缺少默认值"));
        }

        // 取源列的映射类型缺源列 → Warning
        if matches!(
            row.mapping_type,
            MappingType::Direct | MappingType::Transform | MappingType::Date | MappingType::Calculate
        ) && source.is_empty()
        {
            issues.push(Issue::warning("未指定源列"));
        }

        // 拼接映射源列与模板均空 → Warning
        if row.mapping_type == MappingType::Combine && source.is_empty() && rule.is_none() {
            issues.push(Issue::warning("拼接映射未指定源列, 也未填写拼接模板"));
        }

        // 类型相关规则检查（其余类型下 transform_rule/source_format 惰性, 不触碰）
        match row.mapping_type {
            MappingType::Transform => match rule {
                None => {
                    issues.push(Issue::warning("值转换映射未填写转换规则"));
                    push_unique(&mut diagnosis.invalid_transform_rules, label);
                }
                Some(r) => {
                    if resolve_value_map(Some(r)).is_none() {
                        issues.push(Issue::error(
                            "转换规则无法解析: 需要内置关键字、JSON 对象或键值对列表",
                        ));
                        push_unique(&mut diagnosis.invalid_transform_rules, label);
                    }
                }
            },
            MappingType::Calculate => {
                if let Err(reason) = validate_calculate(rule) {
                    issues.push(Issue::error(reason));
                    push_unique(&mut diagnosis.invalid_calculate_rules, label);
                }
            }
            MappingType::Combine => {
                if let Err(reason) = validate_combine(rule) {
                    issues.push(Issue::warning(reason));
                    push_unique(&mut diagnosis.invalid_combine_rules, label);
                }
            }
            MappingType::Date => {
                if trimmed_opt(&row.source_format).is_none() {
                    issues.push(Issue::warning("未指定日期格式, 导入时将自动识别"));
                }
            }
            MappingType::Direct | MappingType::Default => {}
        }

        dedup_issues(issues)
    }
}

impl Default for MappingDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

fn trimmed_opt(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// 聚合清单中行的展示标识: 目标字段显示名 > 源列名 > 行号
fn row_label(row: &MappingRow, idx: usize) -> String {
    let target = row.target_field.trim();
    if !target.is_empty() {
        return field_label(target).to_string();
    }
    let source = row.source_field.trim();
    if !source.is_empty() {
        return source.to_string();
    }
    format!("第{}行", idx + 1)
}

fn push_unique(list: &mut Vec<String>, value: String) {
    if !list.contains(&value) {
        list.push(value);
    }
}

/// 同一行内相同问题只保留一条（保持首现顺序）
fn dedup_issues(issues: Vec<Issue>) -> Vec<Issue> {
    let mut deduped: Vec<Issue> = Vec::new();
    for issue in issues {
        if !deduped.contains(&issue) {
            deduped.push(issue);
        }
    }
    deduped
}
