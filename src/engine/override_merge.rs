// ==========================================
// 设备维护KPI驾驶舱 - 覆盖合并层
// ==========================================
// 职责: 人工覆盖值叠加到计算结果上,覆盖优先
// ==========================================
// 规则: 整序列替换,不做逐元素修补;
// 合并幂等 —— 同一覆盖合并两次与一次结果相同;
// 覆盖被清除后下轮自动回落计算值
// ==========================================

use crate::domain::dashboard::{DashboardResult, MONTH_SLOTS, MTTR_SLOTS};
use crate::domain::override_set::{OverrideSet, SeriesKey, SeriesValue};
use crate::domain::types::WorkOrderState;
use std::collections::BTreeMap;
use tracing::warn;

pub struct OverrideMerge {
    // 无状态引擎
}

impl OverrideMerge {
    pub fn new() -> Self {
        Self {}
    }

    /// 合并
    ///
    /// # 参数
    /// - result: 管道计算结果
    /// - overrides: 覆盖集
    ///
    /// # 返回
    /// 覆盖后的结果。形状不符的覆盖值（持久层脏数据）只告警并
    /// 保留计算值,不中断
    pub fn merge(&self, mut result: DashboardResult, overrides: &OverrideSet) -> DashboardResult {
        for (key, value) in overrides.iter() {
            match (key, value) {
                (SeriesKey::MonthlyCosts, SeriesValue::MonthlyValues(values)) => {
                    match Self::to_f64_slots::<MONTH_SLOTS>(values) {
                        Some(slots) => result.monthly.costs = slots,
                        None => Self::warn_shape(*key),
                    }
                }
                (SeriesKey::MonthlyCorrectives, SeriesValue::MonthlyCounts(values)) => {
                    match Self::to_u32_slots::<MONTH_SLOTS>(values) {
                        Some(slots) => result.monthly.correctives = slots,
                        None => Self::warn_shape(*key),
                    }
                }
                (SeriesKey::MonthlyStatus, SeriesValue::StatusMatrix(matrix)) => {
                    match Self::to_status_matrix(matrix) {
                        Some(status) => result.monthly.status = status,
                        None => Self::warn_shape(*key),
                    }
                }
                (SeriesKey::Mttr, SeriesValue::QuarterlyValues(values)) => {
                    match Self::to_f64_slots::<MTTR_SLOTS>(values) {
                        Some(slots) => result.mttr_quarterly = slots,
                        None => Self::warn_shape(*key),
                    }
                }
                (SeriesKey::Mtbf, SeriesValue::MonthlyValues(values)) => {
                    match Self::to_f64_slots::<MONTH_SLOTS>(values) {
                        Some(slots) => result.mtbf_monthly = slots,
                        None => Self::warn_shape(*key),
                    }
                }
                (SeriesKey::CategoryCounts, SeriesValue::Counts(entries)) => {
                    result.breakdowns.category = entries.clone();
                }
                (SeriesKey::CriticalityCounts, SeriesValue::Counts(entries)) => {
                    result.breakdowns.criticality = entries.clone();
                }
                (SeriesKey::AnalystCounts, SeriesValue::Counts(entries)) => {
                    result.breakdowns.analyst = entries.clone();
                }
                (SeriesKey::TopEquipment, SeriesValue::Counts(entries)) => {
                    result.breakdowns.top_equipment = entries.clone();
                }
                (key, _) => Self::warn_shape(*key),
            }
        }
        result
    }

    // ==========================================
    // 形状转换
    // ==========================================

    fn to_f64_slots<const N: usize>(values: &[f64]) -> Option<[f64; N]> {
        values.try_into().ok()
    }

    fn to_u32_slots<const N: usize>(values: &[u32]) -> Option<[u32; N]> {
        values.try_into().ok()
    }

    /// 状态矩阵整体替换;覆盖未提供的状态补零,保持5状态全量输出
    fn to_status_matrix(
        matrix: &BTreeMap<WorkOrderState, Vec<u32>>,
    ) -> Option<BTreeMap<WorkOrderState, [u32; MONTH_SLOTS]>> {
        let mut status: BTreeMap<WorkOrderState, [u32; MONTH_SLOTS]> = BTreeMap::new();
        for state in WorkOrderState::ALL {
            status.insert(state, [0; MONTH_SLOTS]);
        }
        for (state, series) in matrix {
            let slots = Self::to_u32_slots::<MONTH_SLOTS>(series)?;
            status.insert(*state, slots);
        }
        Some(status)
    }

    fn warn_shape(key: SeriesKey) {
        warn!(series_key = %key, "覆盖值形状不符,保留计算值");
    }
}

impl Default for OverrideMerge {
    fn default() -> Self {
        Self::new()
    }
}
