// ==========================================
// 设备维护KPI驾驶舱 - 可靠性估算引擎
// ==========================================
// 职责: MTTR 季度序列 + MTBF 逐月序列
// ==========================================
// 两条序列都是确定性启发式占位公式,不是物理实测:
// - MTTR: 按类别的合成修复时长,按日历季度取算术平均
// - MTBF: 月度工单量的反比函数,下限封底
// 契约是公式本身;接入真实可靠性模型前不得"修正"
// ==========================================

use crate::config::{DashboardConfig, ReliabilityParams};
use crate::domain::dashboard::{MONTH_SLOTS, MTTR_SLOTS};
use crate::domain::types::MaintenanceCategory;
use crate::domain::work_order::NormalizedWorkOrder;
use chrono::Datelike;

// ==========================================
// ReliabilitySeries - 估算输出
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct ReliabilitySeries {
    /// MTTR 季度序列（小时,固定3个值,空季度报默认值而非空）
    pub mttr_quarterly: [f64; MTTR_SLOTS],
    /// MTBF 逐月序列（小时,固定12个值,每个值 ≥ 下限）
    pub mtbf_monthly: [f64; MONTH_SLOTS],
}

// ==========================================
// ReliabilityEngine - 可靠性估算引擎
// ==========================================
pub struct ReliabilityEngine {
    params: ReliabilityParams,
}

impl ReliabilityEngine {
    pub fn new(params: ReliabilityParams) -> Self {
        Self { params }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.reliability)
    }

    /// 估算 MTTR/MTBF
    ///
    /// # 参数
    /// - orders: 归一化工单集（过滤已在上游完成）
    ///
    /// # 返回
    /// ReliabilitySeries。只有日期有效的记录参与
    pub fn estimate(&self, orders: &[NormalizedWorkOrder]) -> ReliabilitySeries {
        ReliabilitySeries {
            mttr_quarterly: self.estimate_mttr(orders),
            mtbf_monthly: self.estimate_mtbf(orders),
        }
    }

    /// MTTR: 类别合成修复时长按季度取均值
    ///
    /// 季度 = 月份/3 向下取整;Q4 数据照常收集但不输出
    /// （消费序列固定3槽）;空季度报默认时长
    fn estimate_mttr(&self, orders: &[NormalizedWorkOrder]) -> [f64; MTTR_SLOTS] {
        // 4个季度累加,只输出前3个
        let mut sums = [0.0f64; 4];
        let mut counts = [0u32; 4];

        for order in orders {
            let Some(date) = order.date else {
                continue;
            };
            let quarter = (date.month0() / 3) as usize;
            sums[quarter] += self.repair_hours(order.category);
            counts[quarter] += 1;
        }

        let mut mttr = [self.params.repair_hours_default; MTTR_SLOTS];
        for (slot, value) in mttr.iter_mut().enumerate() {
            if counts[slot] > 0 {
                *value = sums[slot] / counts[slot] as f64;
            }
        }
        mttr
    }

    /// MTBF: max(下限, 基准 - 折减 × 当月工单数)
    fn estimate_mtbf(&self, orders: &[NormalizedWorkOrder]) -> [f64; MONTH_SLOTS] {
        let mut counts = [0u32; MONTH_SLOTS];
        for order in orders {
            if let Some(date) = order.date {
                counts[date.month0() as usize] += 1;
            }
        }

        let mut mtbf = [0.0f64; MONTH_SLOTS];
        for (slot, value) in mtbf.iter_mut().enumerate() {
            *value = (self.params.mtbf_base - self.params.mtbf_per_order * counts[slot] as f64)
                .max(self.params.mtbf_floor);
        }
        mtbf
    }

    /// 类别 → 合成修复时长（小时）
    fn repair_hours(&self, category: MaintenanceCategory) -> f64 {
        match category {
            MaintenanceCategory::Corrective => self.params.repair_hours_corrective,
            MaintenanceCategory::Preventive => self.params.repair_hours_preventive,
            MaintenanceCategory::Predictive => self.params.repair_hours_predictive,
            _ => self.params.repair_hours_default,
        }
    }
}

impl Default for ReliabilityEngine {
    fn default() -> Self {
        Self::new(ReliabilityParams::default())
    }
}
