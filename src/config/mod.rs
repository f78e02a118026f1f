// ==========================================
// 设备维护KPI驾驶舱 - 配置层
// ==========================================
// 职责: 指标口径的可调参数（类别代码表 / 风险权重 / 可靠性常数）
// 红线: 口径差异走配置,不走代码分叉
// ==========================================

use crate::domain::types::MaintenanceCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// CategoryTable - 维护类型代码表
// ==========================================
// 代码 → 类别的全函数: 任何整数输入都有定义的输出,
// 未登记代码归入 Other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable {
    entries: BTreeMap<i64, MaintenanceCategory>,
}

impl Default for CategoryTable {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(7, MaintenanceCategory::Corrective);
        entries.insert(10, MaintenanceCategory::Preventive);
        entries.insert(22, MaintenanceCategory::Predictive);
        entries.insert(12, MaintenanceCategory::Improvement);
        entries.insert(21, MaintenanceCategory::Inspection);
        entries.insert(11, MaintenanceCategory::Modification);
        entries.insert(9, MaintenanceCategory::Calibration);
        entries.insert(5, MaintenanceCategory::Cleaning);
        entries.insert(8, MaintenanceCategory::Other);
        Self { entries }
    }
}

impl CategoryTable {
    /// 查表分类
    ///
    /// # 参数
    /// - code: 维护类型代码（缺失视为未登记）
    ///
    /// # 返回
    /// 对应类别,未登记/缺失一律 Other
    pub fn lookup(&self, code: Option<i64>) -> MaintenanceCategory {
        code.and_then(|c| self.entries.get(&c).copied())
            .unwrap_or(MaintenanceCategory::Other)
    }

    /// 登记/覆盖一个代码映射（数据源口径差异时使用）
    pub fn with_entry(mut self, code: i64, category: MaintenanceCategory) -> Self {
        self.entries.insert(code, category);
        self
    }
}

// ==========================================
// RiskWeights - 风险评分权重
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskWeights {
    /// 纠正比权重
    pub corrective_ratio: f64,
    /// 成本归一化值权重
    pub cost: f64,
    /// 关键度归一化值权重
    pub criticality: f64,
}

impl Default for RiskWeights {
    fn default() -> Self {
        Self {
            corrective_ratio: 0.5,
            cost: 0.3,
            criticality: 0.2,
        }
    }
}

// ==========================================
// ReliabilityParams - 可靠性启发式常数
// ==========================================
// MTTR/MTBF 均为确定性占位公式,不是实测值;
// 契约是公式本身,替换为真实模型前不得"修正"
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityParams {
    /// 纠正性维修合成修复时长（小时）
    pub repair_hours_corrective: f64,
    /// 预防性维护合成修复时长（小时）
    pub repair_hours_preventive: f64,
    /// 预测性维护合成修复时长（小时）
    pub repair_hours_predictive: f64,
    /// 其余类别合成修复时长（小时,也是空季度的默认值）
    pub repair_hours_default: f64,
    /// MTBF 基准值（小时）
    pub mtbf_base: f64,
    /// 每张工单对 MTBF 的折减（小时）
    pub mtbf_per_order: f64,
    /// MTBF 下限（小时）
    pub mtbf_floor: f64,
}

impl Default for ReliabilityParams {
    fn default() -> Self {
        Self {
            repair_hours_corrective: 8.0,
            repair_hours_preventive: 2.0,
            repair_hours_predictive: 6.0,
            repair_hours_default: 4.0,
            mtbf_base: 1000.0,
            mtbf_per_order: 20.0,
            mtbf_floor: 100.0,
        }
    }
}

// ==========================================
// AvailabilityParams - 可用率估算常数
// ==========================================
// 合成占位指标: clamp(base - per_corrective × 纠正性工单数, floor, ceiling)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityParams {
    pub base: f64,
    pub per_corrective: f64,
    pub floor: f64,
    pub ceiling: f64,
}

impl Default for AvailabilityParams {
    fn default() -> Self {
        Self {
            base: 95.0,
            per_corrective: 0.5,
            floor: 85.0,
            ceiling: 99.0,
        }
    }
}

// ==========================================
// DashboardConfig - 汇总配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub categories: CategoryTable,
    pub risk_weights: RiskWeights,
    pub reliability: ReliabilityParams,
    pub availability: AvailabilityParams,
    /// top_equipment 分布的条数上限（消费方口径: 5 或 10）
    pub top_equipment_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            categories: CategoryTable::default(),
            risk_weights: RiskWeights::default(),
            reliability: ReliabilityParams::default(),
            availability: AvailabilityParams::default(),
            top_equipment_limit: 5,
        }
    }
}

impl DashboardConfig {
    pub fn new() -> Self {
        Self::default()
    }
}
