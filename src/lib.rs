// ==========================================
// 热轧材料导入映射引擎 - 核心库
// ==========================================
// 系统定位: 导入前的映射规范编辑/校验支撑库
// 职责: 声明式字段映射规则的解析、诊断与适温预报,
//       以及沙盒试导入的载荷构建与结果分桶
// 红线: 纯库, 不打开文件、不落库、不发网络请求;
//       文件解析/模板持久化/真实导入均为外部协作者
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 数据模型与类型
pub mod domain;

// 引擎层 - 解析/校验/诊断/预报
pub mod engine;

// 沙盒层 - 试导入边界
pub mod sandbox;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ErrorCategory, IssueLevel, MappingType, TempStatus};

// 领域实体
pub use domain::{
    Diagnosis, Issue, MappingRow, MappingSet, PreviewData, TempPreviewReport, TempPreviewRow,
    ValueTransformRule,
};

// 引擎入口
pub use engine::{
    match_header, normalize, parse_timestamp, resolve_value_map, seasonal_threshold_days,
    simulate_temper_preview, validate_calculate, validate_combine, MappingDiagnostics,
};

// 沙盒边界
pub use sandbox::{
    build_mappings_json, build_sandbox_request, build_value_transforms_json, classify_error,
    summarize_errors, SandboxImportReport, SandboxImportRequest, SandboxImporter,
    SandboxRowResult, SandboxRowStatus,
};

// 错误类型
pub use error::{EngineResult, MappingEngineError};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "热轧材料导入映射引擎";
