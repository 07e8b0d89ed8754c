// ==========================================
// 热轧材料导入映射引擎 - 沙盒试导入边界
// ==========================================
// 职责: 试导入接口形状 + 载荷构建 + 错误分桶
// 红线: 真实导入执行在外部, 本层从不打开文件、从不落库
// ==========================================

pub mod adapter;
pub mod classify;
pub mod payload;

// 重导出核心类型
pub use adapter::{
    SandboxImportReport, SandboxImportRequest, SandboxImporter, SandboxRowResult, SandboxRowStatus,
};
pub use classify::{classify_error, summarize_errors};
pub use payload::{
    build_mappings_json, build_sandbox_request, build_value_transform_rules,
    build_value_transforms_json, sanitize_rows,
};
