// ==========================================
// 热轧材料导入映射引擎 - 映射领域模型
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 3. 数据模型
// 红线: 引擎只读快照,诊断/预报每次全量重算,不做增量维护
// ==========================================

use crate::domain::types::{IssueLevel, MappingType, TempStatus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// MappingRow - 单行映射规则
// ==========================================
// 用途: 操作者在 UI 中编辑的一行"源列 → 目标字段"规则
// 不变式: transform_rule / source_format 仅对使用它们的映射类型有意义,
//         其余类型下这两个字段是惰性的,所有解析器必须无视它们
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingRow {
    // ===== 绑定 =====
    pub source_field: String,               // 源列名（可为空）
    pub target_field: String,               // 目标字段名（可为空）
    pub mapping_type: MappingType,          // 映射类型

    // ===== 类型相关参数 =====
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,      // 默认值（Default 类型必填）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform_rule: Option<String>,     // 值映射规范/算术表达式/拼接模板
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_format: Option<String>,      // 日期格式提示（Date 类型）
}

impl MappingRow {
    /// 便捷构造: 直接映射行
    pub fn direct(source: &str, target: &str) -> Self {
        MappingRow {
            source_field: source.to_string(),
            target_field: target.to_string(),
            mapping_type: MappingType::Direct,
            ..Default::default()
        }
    }
}

// ==========================================
// MappingSet - 映射规范（有序行集合）
// ==========================================
// 行顺序只影响展示,不影响语义
// template_id 由外部持久化层分配,引擎只透传
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MappingSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,        // 模板 ID（已持久化时存在）
    pub rows: Vec<MappingRow>,              // 映射行（有序）
}

impl MappingSet {
    pub fn new(rows: Vec<MappingRow>) -> Self {
        MappingSet {
            template_id: None,
            rows,
        }
    }
}

// ==========================================
// ValueTransformRule - 已解析的值转换规则
// ==========================================
// 派生物: 由 Transform 类型行的 transform_rule 解析而来,
//         每次从当前 MappingSet 全新构建,从不原地修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTransformRule {
    pub field: String,                      // 目标字段名
    pub value_map: BTreeMap<String, String>, // 值查找表（非空）
    pub data_type: String,                  // 固定为 "string"
}

// ==========================================
// PreviewData - 预览数据快照
// ==========================================
// 用途: 外部文件解析器提供的一份文件快照（表头 + 样本行）
// 生命周期: 操作者换文件时整体替换
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreviewData {
    pub headers: Vec<String>,               // 表头（有序）
    pub sample_rows: Vec<Vec<String>>,      // 样本行（与表头对位）
    pub total_rows: usize,                  // 文件总行数
}

// ==========================================
// Issue - 行级诊断问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub level: IssueLevel,                  // 级别（Error/Warning）
    pub text: String,                       // 操作者可读的问题描述
}

impl Issue {
    pub fn error(text: impl Into<String>) -> Self {
        Issue {
            level: IssueLevel::Error,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Issue {
            level: IssueLevel::Warning,
            text: text.into(),
        }
    }
}

// ==========================================
// Diagnosis - 映射诊断结果
// ==========================================
// (MappingSet, Option<PreviewData>) 的纯函数输出,每次全量重算
// 六张聚合清单 + 覆盖率计数 + 逐行问题表,全部去重
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    // ===== 聚合清单 =====
    pub missing_required: Vec<String>,      // 缺失的必填目标字段
    pub duplicate_targets: Vec<String>,     // 被多行映射的目标字段（每个一次）
    pub source_missing_in_preview: Vec<String>, // 预览表头中找不到的源列
    pub invalid_transform_rules: Vec<String>,   // 值转换规则缺失/不可解析的行标识
    pub invalid_calculate_rules: Vec<String>,   // 算术规则非法的行标识
    pub invalid_combine_rules: Vec<String>,     // 拼接规则非法的行标识

    // ===== 覆盖率计数 =====
    pub mapped_target_count: usize,         // 已映射的去重目标字段数
    pub source_field_count: usize,          // 非空源列数（去重）
    pub matched_source_count: usize,        // 其中能在预览表头命中的源列数

    // ===== 逐行问题 =====
    pub row_issues: BTreeMap<usize, Vec<Issue>>, // 行下标 → 问题列表
}

impl Diagnosis {
    /// 是否存在 Error 级问题（调用方据此禁用保存/试导入）
    pub fn has_errors(&self) -> bool {
        self.row_issues
            .values()
            .flatten()
            .any(|i| i.level == IssueLevel::Error)
    }
}

// ==========================================
// TempPreviewRow - 适温预报样本行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempPreviewRow {
    pub row_no: usize,                      // 样本行号（1 起）
    pub raw_value: String,                  // 卷取时间原始取值
    pub status: TempStatus,                 // 预报状态
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wait_days: Option<i64>,             // 已等待天数
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_days: Option<i64>,        // 当月适温阈值
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remain_days: Option<i64>,           // 距适温还需天数（0=已适温）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,               // 附注（空值/格式无法识别/缺列）
}

// ==========================================
// TempPreviewReport - 适温预报结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TempPreviewReport {
    pub header_name: String,                // 实际采用的卷取时间列名
    pub rows: Vec<TempPreviewRow>,          // 逐样本行预报
}
