// ==========================================
// 热轧材料导入映射引擎 - 沙盒试导入集成测试
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 6. 试导入边界
// 场景: 载荷构建 → mock 导入器干跑 → 报告分桶
// ==========================================

use async_trait::async_trait;
use hot_rolling_mapping::{
    build_sandbox_request, summarize_errors, ErrorCategory, MappingRow, MappingSet, MappingType,
    SandboxImportReport, SandboxImportRequest, SandboxImporter, SandboxRowResult,
    SandboxRowStatus, ValueTransformRule,
};
use std::error::Error;

// ==========================================
// MockSandboxImporter - 测试用导入器
// ==========================================
// 回放固定报告, 并把收到的请求载荷暴露给断言
struct MockSandboxImporter;

#[async_trait]
impl SandboxImporter for MockSandboxImporter {
    async fn test_import(
        &self,
        request: SandboxImportRequest,
    ) -> Result<SandboxImportReport, Box<dyn Error>> {
        // 载荷必须是后端可直接反序列化的 JSON
        let rows: Vec<MappingRow> = serde_json::from_str(&request.mappings_json)?;
        let transforms: Vec<ValueTransformRule> =
            serde_json::from_str(&request.value_transforms_json)?;

        Ok(SandboxImportReport {
            total: request.sample_limit.min(3),
            success: 1,
            failed: 2,
            errors: vec![
                "日期格式错误 (行 2, 字段 coiling_time): 期望 YYYYMMDD".to_string(),
                format!("字段映射失败: 共 {} 行映射, {} 条转换规则", rows.len(), transforms.len()),
            ],
            rows: vec![
                SandboxRowResult {
                    line_no: 1,
                    status: SandboxRowStatus::Ok,
                    message: String::new(),
                },
                SandboxRowResult {
                    line_no: 2,
                    status: SandboxRowStatus::Error,
                    message: "日期格式错误".to_string(),
                },
                SandboxRowResult {
                    line_no: 3,
                    status: SandboxRowStatus::Error,
                    message: "字段映射失败".to_string(),
                },
            ],
        })
    }
}

// ==========================================
// 辅助函数: 构造一份带各类型行的映射规范
// ==========================================
fn template() -> MappingSet {
    let mut export = MappingRow::direct("出口标记", "export_flag");
    export.mapping_type = MappingType::Transform;
    export.transform_rule = Some("bool_yn".to_string());

    let mut coiling = MappingRow::direct("卷取时间", "coiling_time");
    coiling.mapping_type = MappingType::Date;
    coiling.source_format = Some("yyyy-MM-dd HH:mm:ss".to_string());

    let mut remark = MappingRow {
        target_field: "remark".to_string(),
        mapping_type: MappingType::Default,
        default_value: Some("批量导入".to_string()),
        ..Default::default()
    };
    // Default 类型残留的规则字段应被载荷归一化清除
    remark.transform_rule = Some("残留".to_string());

    let mut set = MappingSet::new(vec![
        MappingRow::direct("钢卷号", "coil_id"),
        export,
        coiling,
        remark,
    ]);
    set.template_id = Some("tpl-mill-a".to_string());
    set
}

// ==========================================
// 场景 1: 端到端干跑
// ==========================================

#[tokio::test]
async fn test_sandbox_dry_run_end_to_end() {
    let set = template();
    let request = build_sandbox_request("/data/coils_2026.xlsx", &set, 50).unwrap();

    assert_eq!(request.mapping_id.as_deref(), Some("tpl-mill-a"));

    let importer = MockSandboxImporter;
    let report = importer.test_import(request).await.unwrap();

    assert_eq!(report.total, 3);
    assert_eq!(report.success, 1);
    assert_eq!(report.failed, 2);
    assert_eq!(report.rows[0].status, SandboxRowStatus::Ok);
    assert_eq!(report.rows[1].status, SandboxRowStatus::Error);
}

// ==========================================
// 场景 2: 载荷归一化随请求送达
// ==========================================

#[tokio::test]
async fn test_payload_normalization_reaches_backend() {
    let set = template();
    let request = build_sandbox_request("/data/coils_2026.xlsx", &set, 10).unwrap();

    let rows: Vec<MappingRow> = serde_json::from_str(&request.mappings_json).unwrap();
    // Default 行上残留的 transform_rule 已清除
    let remark = rows.iter().find(|r| r.target_field == "remark").unwrap();
    assert!(remark.transform_rule.is_none());
    assert_eq!(remark.default_value.as_deref(), Some("批量导入"));

    // 值转换表只含可解析的 Transform 行
    let transforms: Vec<ValueTransformRule> =
        serde_json::from_str(&request.value_transforms_json).unwrap();
    assert_eq!(transforms.len(), 1);
    assert_eq!(transforms[0].field, "export_flag");
    assert_eq!(transforms[0].data_type, "string");
}

// ==========================================
// 场景 3: 报告错误分桶
// ==========================================

#[tokio::test]
async fn test_report_errors_are_bucketed() {
    let set = template();
    let request = build_sandbox_request("/data/coils_2026.xlsx", &set, 50).unwrap();
    let report = MockSandboxImporter.test_import(request).await.unwrap();

    let buckets = summarize_errors(&report.errors);
    assert!(buckets.contains_key(&ErrorCategory::DateFormat));
    assert!(buckets.contains_key(&ErrorCategory::MappingConfig));
    // 分桶只是展示辅助, 不吞消息
    let bucketed: usize = buckets.values().map(Vec::len).sum();
    assert_eq!(bucketed, report.errors.len());
}
