// ==========================================
// 热轧材料导入映射引擎 - 领域层
// ==========================================
// 职责: 映射规则/预览/诊断/预报的数据模型与类型体系
// ==========================================

pub mod mapping;
pub mod schema;
pub mod types;

// 重导出核心类型
pub use mapping::{
    Diagnosis, Issue, MappingRow, MappingSet, PreviewData, TempPreviewReport, TempPreviewRow,
    ValueTransformRule,
};
pub use schema::{TargetFieldDef, COILING_TIME_FIELD, MATERIAL_FIELDS};
pub use types::{ErrorCategory, IssueLevel, MappingType, TempStatus};
