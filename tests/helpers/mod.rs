// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的记录构造、固定参考时刻等
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use maintenance_kpi::domain::work_order::WorkOrderRecord;

/// 构造一条工单记录
pub fn record(
    date: Option<&str>,
    equipment: Option<&str>,
    type_code: Option<&str>,
    material_cost: Option<&str>,
    labor_cost: Option<&str>,
) -> WorkOrderRecord {
    WorkOrderRecord {
        date: date.map(|s| s.to_string()),
        equipment_name: equipment.map(|s| s.to_string()),
        maintenance_type_code: type_code.map(|s| s.to_string()),
        material_cost: material_cost.map(|s| s.to_string()),
        labor_cost: labor_cost.map(|s| s.to_string()),
        ..Default::default()
    }
}

/// 固定参考时刻: 2024-06-15 12:00:00
pub fn reference_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}
