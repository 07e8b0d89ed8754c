// ==========================================
// 热轧材料导入映射引擎 - 引擎层
// ==========================================
// 职责: 映射规范的解析/校验/诊断/预报
// 红线: 全部为同步纯函数, 无 I/O、无共享可变状态
// ==========================================

pub mod calc_rule;
pub mod combine_rule;
pub mod diagnostics;
pub mod normalizer;
pub mod temper_forecast;
pub mod temporal;
pub mod value_transform;

// 重导出核心入口
pub use calc_rule::validate_calculate;
pub use combine_rule::validate_combine;
pub use diagnostics::MappingDiagnostics;
pub use normalizer::{match_header, normalize};
pub use temper_forecast::{seasonal_threshold_days, simulate_temper_preview};
pub use temporal::parse_timestamp;
pub use value_transform::resolve_value_map;
