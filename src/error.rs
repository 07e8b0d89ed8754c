// ==========================================
// 热轧材料导入映射引擎 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 解析失败（时间/规则）以 None/Err(String) 表达, 不走本类型;
//       本类型只覆盖载荷构建与沙盒边界的故障
// ==========================================

use thiserror::Error;

/// 映射引擎错误类型
#[derive(Error, Debug)]
pub enum MappingEngineError {
    // ===== 载荷构建错误 =====
    #[error("映射规范序列化失败: {0}")]
    SerializationError(#[from] serde_json::Error),

    // ===== 沙盒边界错误 =====
    #[error("沙盒试导入失败: {0}")]
    SandboxImportError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, MappingEngineError>;
