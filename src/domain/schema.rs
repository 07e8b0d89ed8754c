// ==========================================
// 热轧材料导入映射引擎 - 内部材料 Schema 注册表
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 2. 标准字段表
// 职责: 固定内部材料 schema 的字段名/显示名/必填标记
// 红线: 引擎只认这张表,不接受运行时扩展字段
// ==========================================

// ==========================================
// TargetFieldDef - 目标字段定义
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFieldDef {
    pub name: &'static str,     // 内部字段名（落库列名）
    pub label: &'static str,    // 显示名（与现场表头习惯一致）
    pub required: bool,         // 是否必须出现在映射中
}

/// 卷取时间字段的内部名（适温预报的锚点字段）
pub const COILING_TIME_FIELD: &str = "coiling_time";

// ==========================================
// 标准字段表
// ==========================================
// 顺序即前端下拉展示顺序
pub const MATERIAL_FIELDS: &[TargetFieldDef] = &[
    TargetFieldDef { name: "coil_id", label: "钢卷号", required: true },
    TargetFieldDef { name: "steel_grade", label: "钢种", required: true },
    TargetFieldDef { name: "thickness_mm", label: "厚度", required: false },
    TargetFieldDef { name: "width_mm", label: "宽度", required: false },
    TargetFieldDef { name: "weight_t", label: "重量", required: false },
    TargetFieldDef { name: "coiling_time", label: "卷取时间", required: true },
    TargetFieldDef { name: "next_machine_code", label: "下道机组代码", required: false },
    TargetFieldDef { name: "export_flag", label: "出口标记", required: false },
    TargetFieldDef { name: "due_date", label: "合同交货期", required: false },
    TargetFieldDef { name: "remark", label: "备注", required: false },
];

/// 按内部字段名查找定义
pub fn find_field(name: &str) -> Option<&'static TargetFieldDef> {
    MATERIAL_FIELDS.iter().find(|f| f.name == name)
}

/// 必填字段的内部名列表（按表内顺序）
pub fn required_field_names() -> Vec<String> {
    MATERIAL_FIELDS
        .iter()
        .filter(|f| f.required)
        .map(|f| f.name.to_string())
        .collect()
}

/// 字段显示名（未注册字段回退为内部名本身）
pub fn field_label(name: &str) -> &str {
    find_field(name).map(|f| f.label).unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let required = required_field_names();
        assert_eq!(required, vec!["coil_id", "steel_grade", "coiling_time"]);
    }

    #[test]
    fn test_find_field() {
        let f = find_field(COILING_TIME_FIELD).unwrap();
        assert_eq!(f.label, "卷取时间");
        assert!(f.required);
        assert!(find_field("no_such_field").is_none());
    }

    #[test]
    fn test_field_label_fallback() {
        assert_eq!(field_label("coil_id"), "钢卷号");
        assert_eq!(field_label("custom_x"), "custom_x");
    }
}
