// ==========================================
// 设备维护KPI驾驶舱 - 领域类型定义
// ==========================================
// 依据: Indicator_Engine_Specs_v0.2.md - 0.1 维护类别体系
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 维护类别 (Maintenance Category)
// ==========================================
// 红线: 类别由代码表驱动,不在代码里散落 if/else
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceCategory {
    Corrective,   // 纠正性维修
    Preventive,   // 预防性维护
    Predictive,   // 预测性维护
    Improvement,  // 改善
    Inspection,   // 点检
    Modification, // 改造
    Calibration,  // 校准
    Cleaning,     // 清洁
    Other,        // 其他
}

impl MaintenanceCategory {
    /// 全部类别（顺序固定,用于统计输出）
    pub const ALL: [MaintenanceCategory; 9] = [
        MaintenanceCategory::Corrective,
        MaintenanceCategory::Preventive,
        MaintenanceCategory::Predictive,
        MaintenanceCategory::Improvement,
        MaintenanceCategory::Inspection,
        MaintenanceCategory::Modification,
        MaintenanceCategory::Calibration,
        MaintenanceCategory::Cleaning,
        MaintenanceCategory::Other,
    ];
}

impl fmt::Display for MaintenanceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceCategory::Corrective => write!(f, "CORRECTIVE"),
            MaintenanceCategory::Preventive => write!(f, "PREVENTIVE"),
            MaintenanceCategory::Predictive => write!(f, "PREDICTIVE"),
            MaintenanceCategory::Improvement => write!(f, "IMPROVEMENT"),
            MaintenanceCategory::Inspection => write!(f, "INSPECTION"),
            MaintenanceCategory::Modification => write!(f, "MODIFICATION"),
            MaintenanceCategory::Calibration => write!(f, "CALIBRATION"),
            MaintenanceCategory::Cleaning => write!(f, "CLEANING"),
            MaintenanceCategory::Other => write!(f, "OTHER"),
        }
    }
}

// ==========================================
// 工单状态 (Work Order State)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// 数据源词表为葡萄牙语标签,解析时统一归一
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderState {
    NotStarted, // 未开工
    Requested,  // 已申请
    Started,    // 已开工
    Released,   // 已放行
    Suspended,  // 已挂起
}

impl WorkOrderState {
    /// 全部状态（顺序固定,用于逐月状态矩阵）
    pub const ALL: [WorkOrderState; 5] = [
        WorkOrderState::NotStarted,
        WorkOrderState::Requested,
        WorkOrderState::Started,
        WorkOrderState::Released,
        WorkOrderState::Suspended,
    ];

    /// 从数据源标签解析状态
    ///
    /// 兼容葡萄牙语源词表与 SCREAMING_SNAKE_CASE,未知值一律回落 NotStarted
    pub fn from_label(s: &str) -> Self {
        match s.trim() {
            "Não Iniciada" => WorkOrderState::NotStarted,
            "Requisitada" => WorkOrderState::Requested,
            "Iniciada" => WorkOrderState::Started,
            "Liberada" => WorkOrderState::Released,
            "Suspensa" => WorkOrderState::Suspended,
            other => match other.to_uppercase().as_str() {
                "NOT_STARTED" => WorkOrderState::NotStarted,
                "REQUESTED" => WorkOrderState::Requested,
                "STARTED" => WorkOrderState::Started,
                "RELEASED" => WorkOrderState::Released,
                "SUSPENDED" => WorkOrderState::Suspended,
                _ => WorkOrderState::NotStarted, // 默认值
            },
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkOrderState::NotStarted => "NOT_STARTED",
            WorkOrderState::Requested => "REQUESTED",
            WorkOrderState::Started => "STARTED",
            WorkOrderState::Released => "RELEASED",
            WorkOrderState::Suspended => "SUSPENDED",
        }
    }
}

impl Default for WorkOrderState {
    fn default() -> Self {
        WorkOrderState::NotStarted
    }
}

impl fmt::Display for WorkOrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_from_label_portuguese() {
        assert_eq!(
            WorkOrderState::from_label("Não Iniciada"),
            WorkOrderState::NotStarted
        );
        assert_eq!(
            WorkOrderState::from_label("Requisitada"),
            WorkOrderState::Requested
        );
        assert_eq!(WorkOrderState::from_label("Iniciada"), WorkOrderState::Started);
        assert_eq!(WorkOrderState::from_label("Liberada"), WorkOrderState::Released);
        assert_eq!(WorkOrderState::from_label("Suspensa"), WorkOrderState::Suspended);
    }

    #[test]
    fn test_state_from_label_snake_case() {
        assert_eq!(
            WorkOrderState::from_label("RELEASED"),
            WorkOrderState::Released
        );
        assert_eq!(
            WorkOrderState::from_label("suspended"),
            WorkOrderState::Suspended
        );
    }

    #[test]
    fn test_state_from_label_unknown_defaults() {
        assert_eq!(WorkOrderState::from_label(""), WorkOrderState::NotStarted);
        assert_eq!(
            WorkOrderState::from_label("Cancelada"),
            WorkOrderState::NotStarted
        );
    }

    #[test]
    fn test_category_display_matches_wire_format() {
        for cat in MaintenanceCategory::ALL {
            let json = serde_json::to_string(&cat).unwrap();
            assert_eq!(json, format!("\"{}\"", cat));
        }
    }
}
