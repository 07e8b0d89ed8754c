// ==========================================
// 热轧材料导入映射引擎 - 适温预报模拟器
// ==========================================
// 依据: Mapping_Template_Spec_v0.2.md - 4.7 适温预报
// 职责: 按当前映射与预览样本, 预演下游导入的适温判定
// 红线: 只读、仅供参考, 真实适温判定由后端导入器计算
// ==========================================

use crate::domain::mapping::{MappingSet, PreviewData, TempPreviewReport, TempPreviewRow};
use crate::domain::schema::{field_label, COILING_TIME_FIELD};
use crate::domain::types::TempStatus;
use crate::engine::normalizer::match_header;
use crate::engine::temporal::parse_timestamp;
use chrono::{DateTime, Datelike, Utc};
use tracing::instrument;

/// 当月适温阈值（天）
///
/// 与产线适温配置逐月对齐:
/// - 3/4/5 月 → 3 天
/// - 6/7/8 月 → 4 天
/// - 9/10/11 月 → 4 天
/// - 12/1/2 月 → 3 天
pub fn seasonal_threshold_days(month: u32) -> i64 {
    match month {
        3..=5 => 3,
        6..=8 => 4,
        9..=11 => 4,
        _ => 3, // 12, 1, 2
    }
}

/// 模拟适温预报
///
/// # 参数
/// - preview: 预览数据快照
/// - rows: 当前映射规范快照
/// - now: 评估时刻（显式传入, 便于测试）
///
/// # 步骤
/// 1. 解析卷取时间源列: 优先取 target 为卷取时间且源列非空的映射行,
///    否则用归一化匹配在表头中找内部名/显示名
/// 2. 无法解析 → 全部 MissingMapping; 解析到的列名不在表头中
///    （手填列名的情况）→ 全部 MissingMapping 并注明缺失列
/// 3. 按 now 的月份取适温阈值
/// 4. 逐样本行解析卷取时间: 空/无法解析 → Invalid（附注区分两种情况）,
///    否则 wait_days = floor((now − 卷取时间)/1天),
///    wait_days ≥ 阈值 → Ready, 否则 Waiting,
///    remain_days = max(0, 阈值 − wait_days)
#[instrument(skip_all, fields(sample_count = preview.sample_rows.len()))]
pub fn simulate_temper_preview(
    preview: &PreviewData,
    rows: &MappingSet,
    now: DateTime<Utc>,
) -> TempPreviewReport {
    let coiling_label = field_label(COILING_TIME_FIELD);

    // === 步骤 1: 解析卷取时间源列 ===
    let mapped_source = rows
        .rows
        .iter()
        .find(|r| {
            r.target_field.trim() == COILING_TIME_FIELD && !r.source_field.trim().is_empty()
        })
        .map(|r| r.source_field.trim().to_string());

    let resolved = mapped_source.or_else(|| {
        match_header(&preview.headers, &[COILING_TIME_FIELD, coiling_label])
            .map(|h| h.to_string())
    });

    let Some(header_name) = resolved else {
        return missing_mapping_report(
            coiling_label.to_string(),
            preview,
            "未配置卷取时间列映射".to_string(),
        );
    };

    // === 步骤 2: 定位列下标 ===
    let Some(col_idx) = preview.headers.iter().position(|h| h == &header_name) else {
        let note = format!("预览表头中找不到列: {}", header_name);
        return missing_mapping_report(header_name, preview, note);
    };

    // === 步骤 3: 当月适温阈值 ===
    let threshold = seasonal_threshold_days(now.month());

    // === 步骤 4: 逐样本行预报 ===
    let forecast_rows = preview
        .sample_rows
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            let raw = sample.get(col_idx).cloned().unwrap_or_default();
            forecast_row(i + 1, raw, threshold, now)
        })
        .collect();

    TempPreviewReport {
        header_name,
        rows: forecast_rows,
    }
}

fn missing_mapping_report(
    header_name: String,
    preview: &PreviewData,
    note: String,
) -> TempPreviewReport {
    let rows = preview
        .sample_rows
        .iter()
        .enumerate()
        .map(|(i, _)| TempPreviewRow {
            row_no: i + 1,
            raw_value: String::new(),
            status: TempStatus::MissingMapping,
            wait_days: None,
            threshold_days: None,
            remain_days: None,
            note: Some(note.clone()),
        })
        .collect();

    TempPreviewReport { header_name, rows }
}

fn forecast_row(row_no: usize, raw: String, threshold: i64, now: DateTime<Utc>) -> TempPreviewRow {
    if raw.trim().is_empty() {
        return TempPreviewRow {
            row_no,
            raw_value: raw,
            status: TempStatus::Invalid,
            wait_days: None,
            threshold_days: Some(threshold),
            remain_days: None,
            note: Some("卷取时间为空".to_string()),
        };
    }

    let Some(parsed) = parse_timestamp(&raw) else {
        return TempPreviewRow {
            row_no,
            raw_value: raw,
            status: TempStatus::Invalid,
            wait_days: None,
            threshold_days: Some(threshold),
            remain_days: None,
            note: Some("无法识别的时间格式".to_string()),
        };
    };

    // 向下取整（未来时刻得到负的等待天数, 不截断为 0）
    let wait_days = (now - parsed).num_seconds().div_euclid(86_400);
    let status = if wait_days >= threshold {
        TempStatus::Ready
    } else {
        TempStatus::Waiting
    };

    TempPreviewRow {
        row_no,
        raw_value: raw,
        status,
        wait_days: Some(wait_days),
        threshold_days: Some(threshold),
        remain_days: Some((threshold - wait_days).max(0)),
        note: None,
    }
}
