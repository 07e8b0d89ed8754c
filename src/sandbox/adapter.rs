// ==========================================
// 热轧材料导入映射引擎 - 沙盒试导入接口
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 6. 试导入边界
// 职责: 定义沙盒试导入外部接口（不包含实现）
// 红线: 试导入只做干跑与分类报告, 从不落库
// ==========================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

// ==========================================
// SandboxImportRequest - 试导入请求
// ==========================================
// mappings_json / value_transforms_json 由本 crate 的载荷构建器产出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxImportRequest {
    pub file_path: String,                    // 源文件路径（由外部文件选择器提供）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping_id: Option<String>,           // 模板 ID（已持久化时携带）
    pub mappings_json: String,                // 序列化后的映射规范
    pub value_transforms_json: String,        // 序列化后的值转换规则表
    pub sample_limit: usize,                  // 干跑行数上限
}

// ==========================================
// SandboxRowStatus - 行级结果状态
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SandboxRowStatus {
    Ok,    // 行通过
    Error, // 行失败
}

impl fmt::Display for SandboxRowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SandboxRowStatus::Ok => write!(f, "ok"),
            SandboxRowStatus::Error => write!(f, "error"),
        }
    }
}

// ==========================================
// SandboxRowResult - 行级试导入结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxRowResult {
    pub line_no: usize,                       // 源文件行号
    pub status: SandboxRowStatus,             // ok / error
    pub message: String,                      // 行级说明
}

// ==========================================
// SandboxImportReport - 试导入汇总报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxImportReport {
    pub total: usize,                         // 干跑总行数
    pub success: usize,                       // 通过行数
    pub failed: usize,                        // 失败行数
    pub errors: Vec<String>,                  // 错误消息（供分桶展示）
    pub rows: Vec<SandboxRowResult>,          // 行级结果
}

// ==========================================
// SandboxImporter Trait
// ==========================================
// 用途: 后端导入器的干跑入口
// 实现者: 外部（Tauri command / HTTP 客户端等）, 本 crate 只消费其报告
// 说明: 周边系统中唯一的异步慢路径, 每次显式"试导入"动作至多调用一次;
//       其失败原样上抛给操作者, 本 crate 不重试、不改写
#[async_trait]
pub trait SandboxImporter: Send + Sync {
    /// 对真实文件干跑当前映射规范
    ///
    /// # 参数
    /// - request: 试导入请求（含序列化载荷）
    ///
    /// # 返回
    /// - Ok(SandboxImportReport): 分类的通过/失败行报告
    /// - Err: 外部导入器的不透明失败
    async fn test_import(
        &self,
        request: SandboxImportRequest,
    ) -> Result<SandboxImportReport, Box<dyn Error>>;
}
