// ==========================================
// 设备维护KPI驾驶舱 - 聚合引擎
// ==========================================
// 依据: Indicator_Engine_Specs_v0.2.md - 3. Aggregator
// ==========================================
// 职责: 归一化工单集 → KPI快照 + 逐月序列 + 分布统计
// 输入: 归一化工单 + 参考时刻（逾期判定用,由调用方注入）
// 输出: AggregateOutput
// 红线: 聚合过程绝不抛错,行级解析失败只降级该行贡献
// ==========================================

use crate::config::{AvailabilityParams, DashboardConfig};
use crate::domain::dashboard::{
    BreakdownEntry, BreakdownSet, KpiSnapshot, MonthlySeriesSet,
};
use crate::domain::types::MaintenanceCategory;
use crate::domain::work_order::NormalizedWorkOrder;
use chrono::{Datelike, NaiveDateTime};
use std::collections::{HashMap, HashSet};

// ==========================================
// AggregateOutput - 聚合输出
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateOutput {
    pub kpis: KpiSnapshot,
    pub monthly: MonthlySeriesSet,
    pub breakdowns: BreakdownSet,
}

// ==========================================
// Aggregator - 聚合引擎
// ==========================================
pub struct Aggregator {
    availability: AvailabilityParams,
    top_equipment_limit: usize,
}

impl Aggregator {
    /// 构造函数
    ///
    /// # 参数
    /// - availability: 可用率估算常数
    /// - top_equipment_limit: top_equipment 分布条数上限
    pub fn new(availability: AvailabilityParams, top_equipment_limit: usize) -> Self {
        Self {
            availability,
            top_equipment_limit,
        }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.availability, config.top_equipment_limit)
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 聚合
    ///
    /// # 参数
    /// - orders: 归一化工单集（过滤已在上游完成）
    /// - now: 参考时刻（逾期预防性维护判定基准,测试注入固定值）
    ///
    /// # 返回
    /// AggregateOutput。空输入返回全零结果,不报错
    pub fn aggregate(&self, orders: &[NormalizedWorkOrder], now: NaiveDateTime) -> AggregateOutput {
        if orders.is_empty() {
            return AggregateOutput {
                kpis: KpiSnapshot::default(),
                monthly: MonthlySeriesSet::default(),
                breakdowns: BreakdownSet::default(),
            };
        }

        AggregateOutput {
            kpis: self.build_kpis(orders, now),
            monthly: self.build_monthly(orders),
            breakdowns: self.build_breakdowns(orders),
        }
    }

    // ==========================================
    // KPI 快照
    // ==========================================

    /// 构建标量指标快照
    ///
    /// 类别计数不看日期有效性;逾期预防只认有效日期
    fn build_kpis(&self, orders: &[NormalizedWorkOrder], now: NaiveDateTime) -> KpiSnapshot {
        let mut corrective_count = 0u32;
        let mut preventive_count = 0u32;
        let mut overdue_preventive_count = 0u32;
        let mut predictive_count = 0u32;
        let mut improvement_count = 0u32;
        let mut total_cost = 0.0f64;
        let mut equipment: HashSet<&str> = HashSet::new();

        for order in orders {
            match order.category {
                MaintenanceCategory::Corrective => corrective_count += 1,
                MaintenanceCategory::Preventive => {
                    preventive_count += 1;
                    // 逾期: 日期有效且其零点严格早于参考时刻
                    if let Some(date) = order.date {
                        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                            if midnight < now {
                                overdue_preventive_count += 1;
                            }
                        }
                    }
                }
                MaintenanceCategory::Predictive => predictive_count += 1,
                MaintenanceCategory::Improvement => improvement_count += 1,
                _ => {}
            }

            total_cost += order.total_cost();

            if let Some(eq) = order.equipment.as_deref() {
                equipment.insert(eq);
            }
        }

        // 可用率: 合成占位指标,不是实测 SLA
        let availability_pct = (self.availability.base
            - self.availability.per_corrective * corrective_count as f64)
            .clamp(self.availability.floor, self.availability.ceiling);

        KpiSnapshot {
            corrective_count,
            preventive_count,
            overdue_preventive_count,
            predictive_count,
            improvement_count,
            equipment_count: equipment.len() as u32,
            order_count: orders.len() as u32,
            total_cost,
            availability_pct,
        }
    }

    // ==========================================
    // 逐月序列
    // ==========================================

    /// 构建逐月成本/纠正性/状态序列
    ///
    /// 日期无法解析的记录不进任何逐月桶
    fn build_monthly(&self, orders: &[NormalizedWorkOrder]) -> MonthlySeriesSet {
        let mut monthly = MonthlySeriesSet::default();

        for order in orders {
            let Some(date) = order.date else {
                continue;
            };
            let slot = date.month0() as usize;

            monthly.costs[slot] += order.total_cost();

            if order.category == MaintenanceCategory::Corrective {
                monthly.correctives[slot] += 1;
            }

            if let Some(buckets) = monthly.status.get_mut(&order.state) {
                buckets[slot] += 1;
            }
        }

        monthly
    }

    // ==========================================
    // 分布统计
    // ==========================================

    /// 构建类别/关键度/分析员/设备分布
    fn build_breakdowns(&self, orders: &[NormalizedWorkOrder]) -> BreakdownSet {
        let category = Self::tally(orders.iter().map(|o| o.category.to_string()));
        let criticality = Self::tally(
            orders
                .iter()
                .filter_map(|o| o.criticality_label.clone()),
        );
        let analyst = Self::tally(orders.iter().filter_map(|o| o.analyst.clone()));

        // 设备分布: 工单数降序,并列保持首次出现顺序（稳定排序）
        let mut top_equipment = Self::tally(orders.iter().filter_map(|o| o.equipment.clone()));
        top_equipment.sort_by(|a, b| b.count.cmp(&a.count));
        top_equipment.truncate(self.top_equipment_limit);

        BreakdownSet {
            category,
            criticality,
            analyst,
            top_equipment,
        }
    }

    /// 按首次出现顺序计数
    fn tally(labels: impl Iterator<Item = String>) -> Vec<BreakdownEntry> {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut entries: Vec<BreakdownEntry> = Vec::new();
        for label in labels {
            match index.get(&label) {
                Some(&slot) => entries[slot].count += 1,
                None => {
                    index.insert(label.clone(), entries.len());
                    entries.push(BreakdownEntry::new(label, 1));
                }
            }
        }
        entries
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::from_config(&DashboardConfig::default())
    }
}
