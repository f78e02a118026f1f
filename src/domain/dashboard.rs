// ==========================================
// 设备维护KPI驾驶舱 - 驾驶舱指标实体
// ==========================================
// 依据: Indicator_Engine_Specs_v0.2.md - 2. 指标快照
// 职责: 聚合结果的只读数据结构
// 生命周期: 每次计算整体重建,从不局部修改
// ==========================================

use crate::domain::types::WorkOrderState;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 逐月序列槽位数（1月-12月）
pub const MONTH_SLOTS: usize = 12;

/// MTTR 季度槽位数（Q1-Q3）
pub const MTTR_SLOTS: usize = 3;

// ==========================================
// KpiSnapshot - 标量指标快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    /// 纠正性维修工单数
    pub corrective_count: u32,
    /// 预防性维护工单数
    pub preventive_count: u32,
    /// 逾期预防性维护工单数（相对计算时刻,时钟由调用方注入）
    pub overdue_preventive_count: u32,
    /// 预测性维护工单数
    pub predictive_count: u32,
    /// 改善工单数
    pub improvement_count: u32,
    /// 不重复设备数
    pub equipment_count: u32,
    /// 工单总数
    pub order_count: u32,
    /// 总成本 = Σ材料费 + Σ人工费
    pub total_cost: f64,
    /// 可用率估算（%）
    ///
    /// 合成占位指标: clamp(95 - 0.5 × 纠正性工单数, 85, 99),
    /// 不是实测 SLA,待真实可靠性模型替换
    pub availability_pct: f64,
}

// ==========================================
// MonthlySeriesSet - 逐月序列集
// ==========================================
// 不变量: 每条序列的合计 == 合格记录的合计
// 日期无法解析的记录不进任何逐月桶
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeriesSet {
    /// 逐月成本
    pub costs: [f64; MONTH_SLOTS],
    /// 逐月纠正性工单数
    pub correctives: [u32; MONTH_SLOTS],
    /// 逐月状态矩阵（5个状态全量输出,缺数据补零）
    pub status: BTreeMap<WorkOrderState, [u32; MONTH_SLOTS]>,
}

impl Default for MonthlySeriesSet {
    fn default() -> Self {
        let mut status = BTreeMap::new();
        for state in WorkOrderState::ALL {
            status.insert(state, [0u32; MONTH_SLOTS]);
        }
        Self {
            costs: [0.0; MONTH_SLOTS],
            correctives: [0; MONTH_SLOTS],
            status,
        }
    }
}

// ==========================================
// 分布统计 (Breakdown)
// ==========================================

/// 分布统计条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub label: String,
    pub count: u32,
}

impl BreakdownEntry {
    pub fn new(label: impl Into<String>, count: u32) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// 四类分布统计
///
/// category/criticality/analyst 按首次出现顺序输出;
/// top_equipment 按工单数降序,并列保持原始记录顺序（稳定排序）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BreakdownSet {
    pub category: Vec<BreakdownEntry>,
    pub criticality: Vec<BreakdownEntry>,
    pub analyst: Vec<BreakdownEntry>,
    pub top_equipment: Vec<BreakdownEntry>,
}

// ==========================================
// EquipmentProfile - 设备画像
// ==========================================
// 每次计算从全量（或过滤后）记录集重建
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentProfile {
    /// 设备标识
    pub equipment: String,
    /// 工单总数
    pub order_count: u32,
    /// 纠正性工单数
    pub corrective_count: u32,
    /// 预防性工单数
    pub preventive_count: u32,
    /// 总成本
    pub total_cost: f64,
    /// 平均关键度（仅数值可解析的记录参与,无样本时为 0）
    pub avg_criticality: f64,
    /// 纠正比 = 纠正性工单数 / 工单总数 × 100
    pub corrective_ratio: f64,
    /// 成本归一化值（0-100,按全设备最大值归一）
    pub cost_normalized: f64,
    /// 关键度归一化值（0-100,按全设备最大值归一）
    pub criticality_normalized: f64,
    /// 风险评分 = 0.5×纠正比 + 0.3×成本归一 + 0.2×关键度归一
    pub risk_score: f64,
}

// ==========================================
// DashboardResult - 驾驶舱计算结果
// ==========================================
// 表现层只读消费,管道每轮整体重建
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardResult {
    pub kpis: KpiSnapshot,
    pub monthly: MonthlySeriesSet,
    /// MTTR 季度序列（小时,固定3个值）
    pub mttr_quarterly: [f64; MTTR_SLOTS],
    /// MTBF 逐月序列（小时,固定12个值,下限100）
    pub mtbf_monthly: [f64; MONTH_SLOTS],
    pub breakdowns: BreakdownSet,
}

// ==========================================
// SnapshotFilter - 年/月过滤器
// ==========================================
// 显式参数,在管道每个阶段之前应用于记录集,
// 保证同一轮输出的所有指标口径一致
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotFilter {
    /// 年份过滤（如 2024）
    pub year: Option<i32>,
    /// 月份过滤（1-12）
    pub month: Option<u32>,
}

impl SnapshotFilter {
    /// 无过滤
    pub fn all() -> Self {
        Self::default()
    }

    /// 按年过滤
    pub fn for_year(year: i32) -> Self {
        Self {
            year: Some(year),
            month: None,
        }
    }

    /// 是否未启用任何过滤条件
    pub fn is_unfiltered(&self) -> bool {
        self.year.is_none() && self.month.is_none()
    }

    /// 判定记录日期是否落入过滤范围
    ///
    /// 过滤启用时,日期无法解析的记录无法归属到年/月,一律排除
    pub fn matches(&self, date: Option<NaiveDate>) -> bool {
        if self.is_unfiltered() {
            return true;
        }
        let Some(d) = date else {
            return false;
        };
        if let Some(year) = self.year {
            if d.year() != year {
                return false;
            }
        }
        if let Some(month) = self.month {
            if d.month() != month {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_series_default_covers_all_states() {
        let series = MonthlySeriesSet::default();
        assert_eq!(series.status.len(), WorkOrderState::ALL.len());
        for buckets in series.status.values() {
            assert_eq!(buckets, &[0u32; MONTH_SLOTS]);
        }
    }

    #[test]
    fn test_filter_unfiltered_accepts_undated() {
        let filter = SnapshotFilter::all();
        assert!(filter.matches(None));
        assert!(filter.matches(NaiveDate::from_ymd_opt(2024, 3, 5)));
    }

    #[test]
    fn test_filter_year_month() {
        let filter = SnapshotFilter {
            year: Some(2024),
            month: Some(3),
        };
        assert!(filter.matches(NaiveDate::from_ymd_opt(2024, 3, 5)));
        assert!(!filter.matches(NaiveDate::from_ymd_opt(2024, 4, 5)));
        assert!(!filter.matches(NaiveDate::from_ymd_opt(2023, 3, 5)));
        // 过滤启用时,无日期记录无法归属,排除
        assert!(!filter.matches(None));
    }

    #[test]
    fn test_kpi_snapshot_default_is_all_zero() {
        let kpis = KpiSnapshot::default();
        assert_eq!(kpis.order_count, 0);
        assert_eq!(kpis.total_cost, 0.0);
        assert_eq!(kpis.availability_pct, 0.0);
    }
}
