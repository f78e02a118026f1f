// ==========================================
// 设备维护KPI驾驶舱 - 指标管道编排器
// ==========================================
// 依据: Indicator_Engine_Specs_v0.2.md - 1. 管道总览
// ==========================================
// 职责: 串联 归一化 → 分类 → {聚合, 可靠性, 风险} → 覆盖合并
// 红线: 纯函数 —— (记录集, 覆盖集, 过滤器, 参考时刻) → 结果,
//       不持有跨轮可变状态,可重复/并发调用
// ==========================================
// 年/月过滤在所有指标阶段之前应用于记录集,
// 保证同一轮输出的全部指标口径一致
// ==========================================

use crate::config::DashboardConfig;
use crate::domain::dashboard::{DashboardResult, EquipmentProfile, SnapshotFilter};
use crate::domain::override_set::OverrideSet;
use crate::domain::work_order::{NormalizedWorkOrder, WorkOrderRecord};
use crate::engine::aggregator::Aggregator;
use crate::engine::classifier::RecordClassifier;
use crate::engine::normalizer::FieldNormalizer;
use crate::engine::override_merge::OverrideMerge;
use crate::engine::reliability::ReliabilityEngine;
use crate::engine::risk::RiskRanker;
use chrono::NaiveDateTime;

// ==========================================
// DashboardPipeline - 管道编排器
// ==========================================
pub struct DashboardPipeline {
    normalizer: FieldNormalizer,
    classifier: RecordClassifier,
    aggregator: Aggregator,
    reliability: ReliabilityEngine,
    ranker: RiskRanker,
    merge: OverrideMerge,
}

impl DashboardPipeline {
    /// 按配置构建管道
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            normalizer: FieldNormalizer::new(),
            classifier: RecordClassifier::new(config.categories.clone()),
            aggregator: Aggregator::from_config(config),
            reliability: ReliabilityEngine::from_config(config),
            ranker: RiskRanker::from_config(config),
            merge: OverrideMerge::new(),
        }
    }

    // ==========================================
    // 核心入口
    // ==========================================

    /// 计算驾驶舱结果
    ///
    /// # 参数
    /// - records: 原始工单记录集（内存快照）
    /// - overrides: 人工覆盖集（读取时合并,整序列替换）
    /// - filter: 年/月过滤器
    /// - now: 参考时刻（逾期判定基准,测试注入固定值）
    ///
    /// # 返回
    /// DashboardResult。空输入返回全零结果,整个过程不抛错
    pub fn compute_dashboard(
        &self,
        records: &[WorkOrderRecord],
        overrides: &OverrideSet,
        filter: &SnapshotFilter,
        now: NaiveDateTime,
    ) -> DashboardResult {
        let orders = self.prepare(records, filter);

        let aggregate = self.aggregator.aggregate(&orders, now);
        let reliability = self.reliability.estimate(&orders);

        let computed = DashboardResult {
            kpis: aggregate.kpis,
            monthly: aggregate.monthly,
            mttr_quarterly: reliability.mttr_quarterly,
            mtbf_monthly: reliability.mtbf_monthly,
            breakdowns: aggregate.breakdowns,
        };

        self.merge.merge(computed, overrides)
    }

    /// 计算设备风险画像（与 compute_dashboard 同口径过滤）
    ///
    /// # 返回
    /// 按风险评分非增排序的全量画像,Top-N 截取由调用方决定
    pub fn equipment_profiles(
        &self,
        records: &[WorkOrderRecord],
        filter: &SnapshotFilter,
    ) -> Vec<EquipmentProfile> {
        let orders = self.prepare(records, filter);
        self.ranker.rank(&orders)
    }

    // ==========================================
    // 记录准备
    // ==========================================

    /// 归一化 + 分类 + 过滤
    ///
    /// 过滤在任何指标阶段之前完成;过滤启用时,
    /// 日期无法解析的记录无法归属年/月,一并排除
    fn prepare(
        &self,
        records: &[WorkOrderRecord],
        filter: &SnapshotFilter,
    ) -> Vec<NormalizedWorkOrder> {
        records
            .iter()
            .map(|record| self.normalizer.normalize(record, &self.classifier))
            .filter(|order| filter.matches(order.date))
            .collect()
    }
}

impl Default for DashboardPipeline {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}
