// ==========================================
// 设备维护KPI驾驶舱 - 设备风险排名引擎
// ==========================================
// 依据: Indicator_Engine_Specs_v0.2.md - 5. Risk Ranker
// ==========================================
// 职责: 设备画像生成 + 加权风险评分排名
// 输入: 归一化工单集
// 输出: EquipmentProfile 列表（按风险评分非增排序）
// ==========================================
// 评分是固定加权公式,不是学习模型:
//   score = 0.5×纠正比 + 0.3×成本归一 + 0.2×关键度归一
// ==========================================

use crate::config::{DashboardConfig, RiskWeights};
use crate::domain::dashboard::EquipmentProfile;
use crate::domain::types::MaintenanceCategory;
use crate::domain::work_order::NormalizedWorkOrder;
use std::cmp::Ordering;
use std::collections::HashMap;

// ==========================================
// 设备累加器
// ==========================================
#[derive(Default)]
struct EquipmentAccumulator {
    order_count: u32,
    corrective_count: u32,
    preventive_count: u32,
    total_cost: f64,
    criticality_sum: f64,
    criticality_samples: u32,
}

// ==========================================
// RiskRanker - 风险排名引擎
// ==========================================
pub struct RiskRanker {
    weights: RiskWeights,
}

impl RiskRanker {
    pub fn new(weights: RiskWeights) -> Self {
        Self { weights }
    }

    pub fn from_config(config: &DashboardConfig) -> Self {
        Self::new(config.risk_weights)
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 生成设备画像并按风险评分排名
    ///
    /// # 参数
    /// - orders: 归一化工单集（过滤已在上游完成）
    ///
    /// # 返回
    /// 按风险评分非增排序的设备画像,并列保持首次出现顺序。
    /// 无设备标识的记录不参与;Top-N 截取是表现层口径,不在此做
    pub fn rank(&self, orders: &[NormalizedWorkOrder]) -> Vec<EquipmentProfile> {
        // 1. 按设备分组累加（保持首次出现顺序）
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut groups: Vec<(String, EquipmentAccumulator)> = Vec::new();

        for order in orders {
            let Some(equipment) = order.equipment.as_deref() else {
                continue;
            };

            let slot = match index.get(equipment) {
                Some(&slot) => slot,
                None => {
                    index.insert(equipment.to_string(), groups.len());
                    groups.push((equipment.to_string(), EquipmentAccumulator::default()));
                    groups.len() - 1
                }
            };

            let acc = &mut groups[slot].1;
            acc.order_count += 1;
            acc.total_cost += order.total_cost();
            match order.category {
                MaintenanceCategory::Corrective => acc.corrective_count += 1,
                MaintenanceCategory::Preventive => acc.preventive_count += 1,
                _ => {}
            }
            if let Some(value) = order.criticality_value {
                acc.criticality_sum += value;
                acc.criticality_samples += 1;
            }
        }

        // 2. 归一化基准: 全设备最大成本 / 最大平均关键度
        let max_cost = groups
            .iter()
            .map(|(_, acc)| acc.total_cost)
            .fold(0.0f64, f64::max);
        let max_criticality = groups
            .iter()
            .map(|(_, acc)| Self::avg_criticality(acc))
            .fold(0.0f64, f64::max);

        // 3. 构建画像并评分
        let mut profiles: Vec<EquipmentProfile> = groups
            .into_iter()
            .map(|(equipment, acc)| self.build_profile(equipment, &acc, max_cost, max_criticality))
            .collect();

        // 4. 风险评分非增排序（稳定排序,并列保持原顺序）
        profiles.sort_by(|a, b| {
            b.risk_score
                .partial_cmp(&a.risk_score)
                .unwrap_or(Ordering::Equal)
        });

        profiles
    }

    // ==========================================
    // 指标计算
    // ==========================================

    /// 构建单台设备画像
    fn build_profile(
        &self,
        equipment: String,
        acc: &EquipmentAccumulator,
        max_cost: f64,
        max_criticality: f64,
    ) -> EquipmentProfile {
        let corrective_ratio = if acc.order_count > 0 {
            acc.corrective_count as f64 / acc.order_count as f64 * 100.0
        } else {
            0.0
        };
        let avg_criticality = Self::avg_criticality(acc);
        let cost_normalized = Self::normalize(acc.total_cost, max_cost);
        let criticality_normalized = Self::normalize(avg_criticality, max_criticality);

        let risk_score = self.weights.corrective_ratio * corrective_ratio
            + self.weights.cost * cost_normalized
            + self.weights.criticality * criticality_normalized;

        EquipmentProfile {
            equipment,
            order_count: acc.order_count,
            corrective_count: acc.corrective_count,
            preventive_count: acc.preventive_count,
            total_cost: acc.total_cost,
            avg_criticality,
            corrective_ratio,
            cost_normalized,
            criticality_normalized,
            risk_score,
        }
    }

    /// 平均关键度（仅数值可解析的记录参与,无样本为 0）
    fn avg_criticality(acc: &EquipmentAccumulator) -> f64 {
        if acc.criticality_samples > 0 {
            acc.criticality_sum / acc.criticality_samples as f64
        } else {
            0.0
        }
    }

    /// 0-100 归一化（基准为 0 时输出 0）
    fn normalize(value: f64, max: f64) -> f64 {
        if max > 0.0 {
            value / max * 100.0
        } else {
            0.0
        }
    }
}

impl Default for RiskRanker {
    fn default() -> Self {
        Self::new(RiskWeights::default())
    }
}
