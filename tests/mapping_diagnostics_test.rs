// ==========================================
// 热轧材料导入映射引擎 - 映射诊断集成测试
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 4.6 映射诊断
// 场景: 真实表头 + 多类型映射行的端到端诊断
// ==========================================

use hot_rolling_mapping::{
    IssueLevel, MappingDiagnostics, MappingRow, MappingSet, MappingType, PreviewData,
};

// ==========================================
// 辅助函数: 构造预览与映射行
// ==========================================

fn mill_preview() -> PreviewData {
    PreviewData {
        headers: ["钢卷号", "钢种", "厚度", "宽度", "重量", "卷取时间"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        sample_rows: vec![
            vec![
                "C2026001".to_string(),
                "Q235B".to_string(),
                "2.75".to_string(),
                "1250".to_string(),
                "21.5".to_string(),
                "2026-02-01 08:30:00".to_string(),
            ],
        ],
        total_rows: 1280,
    }
}

fn row(source: &str, target: &str, mapping_type: MappingType) -> MappingRow {
    MappingRow {
        source_field: source.to_string(),
        target_field: target.to_string(),
        mapping_type,
        ..Default::default()
    }
}

// ==========================================
// 场景 1: 源列对账（归一化匹配）
// ==========================================

#[test]
fn test_source_reconciliation_against_preview() {
    let engine = MappingDiagnostics::new();

    // "卷号" 与任何表头归一化后都不相等 → 进入缺失清单
    let set = MappingSet::new(vec![row("卷号", "coil_id", MappingType::Direct)]);
    let diagnosis = engine.diagnose(&set, Some(&mill_preview()));
    assert!(diagnosis
        .source_missing_in_preview
        .contains(&"卷号".to_string()));

    // "钢卷号" 精确命中 → 不进缺失清单
    let set = MappingSet::new(vec![row("钢卷号", "coil_id", MappingType::Direct)]);
    let diagnosis = engine.diagnose(&set, Some(&mill_preview()));
    assert!(diagnosis.source_missing_in_preview.is_empty());
    assert_eq!(diagnosis.matched_source_count, 1);
}

// ==========================================
// 场景 2: 完整模板无 Error
// ==========================================

#[test]
fn test_complete_template_has_no_errors() {
    let engine = MappingDiagnostics::new();

    let mut export = row("出口", "export_flag", MappingType::Transform);
    export.transform_rule = Some("bool_yn".to_string());

    let mut weight = row("重量", "weight_t", MappingType::Calculate);
    weight.transform_rule = Some("/1000".to_string());

    let mut coiling = row("卷取时间", "coiling_time", MappingType::Date);
    coiling.source_format = Some("yyyy-MM-dd HH:mm:ss".to_string());

    let set = MappingSet::new(vec![
        row("钢卷号", "coil_id", MappingType::Direct),
        row("钢种", "steel_grade", MappingType::Direct),
        coiling,
        export,
        weight,
    ]);

    let diagnosis = engine.diagnose(&set, Some(&mill_preview()));
    assert!(!diagnosis.has_errors(), "问题清单: {:?}", diagnosis.row_issues);
    assert!(diagnosis.missing_required.is_empty());
    assert!(diagnosis.duplicate_targets.is_empty());
    assert_eq!(diagnosis.mapped_target_count, 5);
}

// ==========================================
// 场景 3: 问题模板的聚合视图
// ==========================================

#[test]
fn test_broken_template_aggregates() {
    let engine = MappingDiagnostics::new();

    let mut bad_calc = row("重量", "weight_t", MappingType::Calculate);
    bad_calc.transform_rule = Some("x/0".to_string());

    let mut bad_transform = row("出口", "export_flag", MappingType::Transform);
    bad_transform.transform_rule = Some("乱写的规则".to_string());

    let set = MappingSet::new(vec![
        // coil_id 映射两次
        row("钢卷号", "coil_id", MappingType::Direct),
        row("卷号", "coil_id", MappingType::Direct),
        // 目标为空
        row("钢种", "", MappingType::Direct),
        bad_calc,
        bad_transform,
    ]);

    let diagnosis = engine.diagnose(&set, Some(&mill_preview()));

    // 必填缺失: steel_grade / coiling_time 未映射
    assert_eq!(
        diagnosis.missing_required,
        vec!["steel_grade".to_string(), "coiling_time".to_string()]
    );
    // 重复目标只报一次
    assert_eq!(diagnosis.duplicate_targets, vec!["coil_id".to_string()]);
    // 规则类聚合清单
    assert_eq!(diagnosis.invalid_calculate_rules, vec!["重量".to_string()]);
    assert_eq!(diagnosis.invalid_transform_rules, vec!["出口标记".to_string()]);

    // 有 Error → 上层应禁用保存/试导入
    assert!(diagnosis.has_errors());
}

// ==========================================
// 场景 4: 无预览时诊断仍然可用
// ==========================================

#[test]
fn test_diagnose_without_preview_is_total() {
    let engine = MappingDiagnostics::new();
    let set = MappingSet::new(vec![
        row("钢卷号", "coil_id", MappingType::Direct),
        row("", "", MappingType::Direct),
    ]);

    let diagnosis = engine.diagnose(&set, None);
    assert!(diagnosis.source_missing_in_preview.is_empty());
    // 空行同时缺目标与源: Error + Warning
    let issues = &diagnosis.row_issues[&1];
    assert!(issues.iter().any(|i| i.level == IssueLevel::Error));
    assert!(issues.iter().any(|i| i.level == IssueLevel::Warning));
}

// ==========================================
// 场景 5: 幂等, 重复诊断输出稳定
// ==========================================

#[test]
fn test_rediagnose_keeps_ordering() {
    let engine = MappingDiagnostics::new();
    let mut combine = row("", "remark", MappingType::Combine);
    combine.transform_rule = Some("CONCAT({钢种},{厚度}".to_string());

    let set = MappingSet::new(vec![
        row("钢卷号", "coil_id", MappingType::Direct),
        row("钢卷号", "steel_grade", MappingType::Direct),
        combine,
    ]);

    let first = engine.diagnose(&set, Some(&mill_preview()));
    let second = engine.diagnose(&set, Some(&mill_preview()));

    assert_eq!(first, second);
    // 行内问题顺序稳定
    for (idx, issues) in &first.row_issues {
        assert_eq!(issues, &second.row_issues[idx]);
    }
}
