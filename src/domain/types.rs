// ==========================================
// 热轧材料导入映射引擎 - 领域类型定义
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 1. 映射类型体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 映射类型 (Mapping Type)
// ==========================================
// 每行映射规则的取值语义由类型决定:
// - Direct: 源列原样取值
// - Transform: 按值转换表翻译 (transform_rule = 值映射规范)
// - Calculate: 数值算术 (transform_rule = 算术表达式)
// - Combine: 多列拼接 (transform_rule = 模板/CONCAT 表达式)
// - Date: 时间解析 (source_format = 日期格式提示)
// - Default: 固定默认值 (default_value)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MappingType {
    Direct,    // 直接映射
    Transform, // 值转换
    Calculate, // 数值计算
    Combine,   // 多列拼接
    Date,      // 日期解析
    Default,   // 默认值
}

impl fmt::Display for MappingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MappingType::Direct => write!(f, "DIRECT"),
            MappingType::Transform => write!(f, "TRANSFORM"),
            MappingType::Calculate => write!(f, "CALCULATE"),
            MappingType::Combine => write!(f, "COMBINE"),
            MappingType::Date => write!(f, "DATE"),
            MappingType::Default => write!(f, "DEFAULT"),
        }
    }
}

impl MappingType {
    /// 从字符串解析映射类型（未知值按 DIRECT 处理）
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "TRANSFORM" => MappingType::Transform,
            "CALCULATE" => MappingType::Calculate,
            "COMBINE" => MappingType::Combine,
            "DATE" => MappingType::Date,
            "DEFAULT" => MappingType::Default,
            _ => MappingType::Direct,
        }
    }

    /// 该类型是否使用 transform_rule 字段
    pub fn uses_transform_rule(&self) -> bool {
        matches!(
            self,
            MappingType::Transform | MappingType::Calculate | MappingType::Combine
        )
    }

    /// 该类型是否使用 source_format 字段
    pub fn uses_source_format(&self) -> bool {
        matches!(self, MappingType::Date)
    }
}

impl Default for MappingType {
    fn default() -> Self {
        MappingType::Direct
    }
}

// ==========================================
// 问题级别 (Issue Level)
// ==========================================
// Error 阻断提交, Warning 仅提示
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueLevel {
    Error,   // 错误（阻断保存/试导入）
    Warning, // 警告（允许继续）
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLevel::Error => write!(f, "ERROR"),
            IssueLevel::Warning => write!(f, "WARNING"),
        }
    }
}

// ==========================================
// 适温预报状态 (Temper Forecast Status)
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 5. 适温预报
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TempStatus {
    Ready,          // 已适温
    Waiting,        // 待适温
    Invalid,        // 样本时间无法解析
    MissingMapping, // 未配置/找不到卷取时间列
}

impl fmt::Display for TempStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TempStatus::Ready => write!(f, "READY"),
            TempStatus::Waiting => write!(f, "WAITING"),
            TempStatus::Invalid => write!(f, "INVALID"),
            TempStatus::MissingMapping => write!(f, "MISSING_MAPPING"),
        }
    }
}

// ==========================================
// 试导入错误类别 (Sandbox Error Category)
// ==========================================
// 后端试导入返回的错误消息的粗分类（仅用于前端展示聚合）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    MissingField,  // 必填字段缺失/为空
    NumericFormat, // 数值格式错误
    DateFormat,    // 日期格式错误
    RuleConfig,    // 规则配置问题
    MappingConfig, // 映射配置问题
    Other,         // 其他
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::MissingField => write!(f, "MISSING_FIELD"),
            ErrorCategory::NumericFormat => write!(f, "NUMERIC_FORMAT"),
            ErrorCategory::DateFormat => write!(f, "DATE_FORMAT"),
            ErrorCategory::RuleConfig => write!(f, "RULE_CONFIG"),
            ErrorCategory::MappingConfig => write!(f, "MAPPING_CONFIG"),
            ErrorCategory::Other => write!(f, "OTHER"),
        }
    }
}
