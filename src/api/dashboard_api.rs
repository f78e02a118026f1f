// ==========================================
// 设备维护KPI驾驶舱 - 驾驶舱 API
// ==========================================
// 职责: 封装管道与存储,持有内存快照,提供
//       加载 / 导入 / 计算 / 覆盖编辑 接口
// 架构: API 层 → 引擎层 (DashboardPipeline) → 领域层
// ==========================================
// 并发约定:
// - 记录与覆盖两条加载并发执行,互相无顺序依赖
// - 计算是纯函数,可重复/并发调用
// - 覆盖集单写者、后写覆盖;写内存后写穿存储,
//   存储失败作为可恢复错误返回,内存快照继续可用
// ==========================================

use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::error::ApiResult;
use crate::config::DashboardConfig;
use crate::domain::dashboard::{DashboardResult, EquipmentProfile, SnapshotFilter};
use crate::domain::override_set::{OverrideSet, SeriesKey, SeriesValue};
use crate::domain::work_order::WorkOrderRecord;
use crate::engine::pipeline::DashboardPipeline;
use crate::importer::work_order_importer::WorkOrderImporter;
use crate::repository::snapshot_store::SnapshotStore;

// ==========================================
// DTO 类型定义
// ==========================================

/// 加载结果摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    pub record_count: usize,
    pub override_count: usize,
}

/// 导入结果摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub batch_id: String,
    pub source_file: String,
    pub record_count: usize,
}

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================
pub struct DashboardApi {
    store: Arc<dyn SnapshotStore>,
    pipeline: DashboardPipeline,
    importer: WorkOrderImporter,
    records: RwLock<Vec<WorkOrderRecord>>,
    overrides: RwLock<OverrideSet>,
}

impl DashboardApi {
    /// 创建新的 DashboardApi 实例（默认配置）
    pub fn new(store: Arc<dyn SnapshotStore>) -> Self {
        Self::with_config(store, DashboardConfig::default())
    }

    /// 创建新的 DashboardApi 实例
    ///
    /// # 参数
    /// - store: 快照存储实现
    /// - config: 指标口径配置
    pub fn with_config(store: Arc<dyn SnapshotStore>, config: DashboardConfig) -> Self {
        Self {
            store,
            pipeline: DashboardPipeline::new(&config),
            importer: WorkOrderImporter::new(),
            records: RwLock::new(Vec::new()),
            overrides: RwLock::new(OverrideSet::new()),
        }
    }

    // ==========================================
    // 加载
    // ==========================================

    /// 从存储加载记录快照与覆盖集（两条加载并发）
    ///
    /// # 返回
    /// - Ok(LoadSummary): 加载成功（覆盖集失败时回落空集,不算硬错误）
    /// - Err(ApiError::StoreUnavailable): 记录加载失败;内存快照保持原样,
    ///   调用方可继续用已有数据计算
    pub async fn load(&self) -> ApiResult<LoadSummary> {
        let (records_result, overrides_result) =
            futures::join!(self.store.load_records(), self.store.load_overrides());

        match (records_result, overrides_result) {
            (Ok(records), Ok(overrides)) => {
                let summary = LoadSummary {
                    record_count: records.len(),
                    override_count: overrides.len(),
                };
                *self.write_records() = records;
                *self.write_overrides() = overrides;
                info!(
                    record_count = summary.record_count,
                    override_count = summary.override_count,
                    "快照加载完成"
                );
                Ok(summary)
            }
            (Ok(records), Err(e)) => {
                // 覆盖集加载失败: 回落空集,不作为硬错误
                warn!(error = %e, "覆盖集加载失败,回落空覆盖集");
                let summary = LoadSummary {
                    record_count: records.len(),
                    override_count: 0,
                };
                *self.write_records() = records;
                *self.write_overrides() = OverrideSet::new();
                Ok(summary)
            }
            (Err(e), Ok(overrides)) => {
                *self.write_overrides() = overrides;
                Err(e.into())
            }
            (Err(e), Err(overrides_err)) => {
                // 存储整体不可用: 内存快照保持原样,降级继续
                warn!(error = %overrides_err, "覆盖集加载失败");
                Err(e.into())
            }
        }
    }

    // ==========================================
    // 导入 / 记录快照替换
    // ==========================================

    /// 从文件导入工单记录并写穿存储
    ///
    /// # 返回
    /// - Ok(ImportSummary): 导入成功
    /// - Err(ApiError::ImportFailed): 文件解析失败,内存/存储均不变
    /// - Err(ApiError::StoreUnavailable): 解析成功但落库失败;
    ///   内存快照已更新,计算可继续
    pub async fn import_file<P: AsRef<Path>>(&self, path: P) -> ApiResult<ImportSummary> {
        let outcome = self.importer.import_file(path)?;
        let summary = ImportSummary {
            batch_id: outcome.batch_id.clone(),
            source_file: outcome.source_file.clone(),
            record_count: outcome.record_count(),
        };

        *self.write_records() = outcome.records.clone();
        self.store.save_records(&outcome.records).await?;
        Ok(summary)
    }

    /// 整体替换记录快照（外部记录源直接供数时使用）并写穿存储
    pub async fn replace_records(&self, records: Vec<WorkOrderRecord>) -> ApiResult<usize> {
        let count = records.len();
        *self.write_records() = records.clone();
        self.store.save_records(&records).await?;
        Ok(count)
    }

    // ==========================================
    // 计算
    // ==========================================

    /// 计算驾驶舱结果（参考时刻取当前本地时间）
    pub fn compute_dashboard(&self, filter: &SnapshotFilter) -> DashboardResult {
        self.compute_dashboard_at(filter, Local::now().naive_local())
    }

    /// 计算驾驶舱结果（显式参考时刻,测试注入固定值）
    pub fn compute_dashboard_at(
        &self,
        filter: &SnapshotFilter,
        now: NaiveDateTime,
    ) -> DashboardResult {
        let records = self.read_records();
        let overrides = self.read_overrides();
        self.pipeline
            .compute_dashboard(&records, &overrides, filter, now)
    }

    /// 设备风险画像（与驾驶舱同口径过滤）
    ///
    /// # 参数
    /// - filter: 年/月过滤器
    /// - limit: Top-N 截取（表现层口径: 5 或 10;None 为全量）
    pub fn equipment_risk(
        &self,
        filter: &SnapshotFilter,
        limit: Option<usize>,
    ) -> Vec<EquipmentProfile> {
        let records = self.read_records();
        let profiles = self.pipeline.equipment_profiles(&records, filter);
        match limit {
            Some(n) => profiles.into_iter().take(n).collect(),
            None => profiles,
        }
    }

    // ==========================================
    // 覆盖编辑（对外唯一的变更接口）
    // ==========================================

    /// 写入覆盖值并写穿存储
    ///
    /// 下一次 compute_dashboard 即可见
    ///
    /// # 返回
    /// - Err(ApiError::OverrideValidation): 形状校验失败,内存/存储均不变
    /// - Err(ApiError::StoreUnavailable): 校验通过但落库失败;
    ///   内存已更新（后写覆盖）,下次保存时一并持久化
    pub async fn set_override(&self, key: SeriesKey, value: SeriesValue) -> ApiResult<()> {
        let snapshot = {
            let mut overrides = self.write_overrides();
            overrides.set(key, value)?;
            overrides.clone()
        };
        info!(series_key = %key, "写入覆盖值");
        self.store.save_overrides(&snapshot).await?;
        Ok(())
    }

    /// 清除覆盖值并写穿存储
    ///
    /// # 返回
    /// - Ok(true): 覆盖存在并已清除,下轮计算回落计算值
    /// - Ok(false): 该序列原本无覆盖
    pub async fn clear_override(&self, key: SeriesKey) -> ApiResult<bool> {
        let (removed, snapshot) = {
            let mut overrides = self.write_overrides();
            let removed = overrides.clear(key);
            (removed, overrides.clone())
        };
        if removed {
            info!(series_key = %key, "清除覆盖值");
            self.store.save_overrides(&snapshot).await?;
        }
        Ok(removed)
    }

    // ==========================================
    // 快照访问
    // ==========================================

    /// 当前内存快照中的记录数
    pub fn record_count(&self) -> usize {
        self.read_records().len()
    }

    /// 当前内存快照中的覆盖条数
    pub fn override_count(&self) -> usize {
        self.read_overrides().len()
    }

    // ==========================================
    // 锁辅助（毒化锁按内部值恢复,计算路径不 panic）
    // ==========================================

    fn read_records(&self) -> RwLockReadGuard<'_, Vec<WorkOrderRecord>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_records(&self) -> RwLockWriteGuard<'_, Vec<WorkOrderRecord>> {
        self.records.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_overrides(&self) -> RwLockReadGuard<'_, OverrideSet> {
        self.overrides.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_overrides(&self) -> RwLockWriteGuard<'_, OverrideSet> {
        self.overrides.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::ApiError;
    use crate::repository::snapshot_store::MemorySnapshotStore;

    fn record(date: &str, equipment: &str, type_code: &str) -> WorkOrderRecord {
        WorkOrderRecord {
            date: Some(date.to_string()),
            equipment_name: Some(equipment.to_string()),
            maintenance_type_code: Some(type_code.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_replace_records_and_compute() {
        let api = DashboardApi::new(Arc::new(MemorySnapshotStore::new()));
        api.replace_records(vec![
            record("05/03/2024", "Bomba 01", "7"),
            record("06/03/2024", "Bomba 01", "10"),
        ])
        .await
        .unwrap();

        let result = api.compute_dashboard(&SnapshotFilter::all());
        assert_eq!(result.kpis.order_count, 2);
        assert_eq!(result.kpis.corrective_count, 1);
        assert_eq!(result.kpis.preventive_count, 1);
    }

    #[tokio::test]
    async fn test_set_override_visible_in_next_compute() {
        let api = DashboardApi::new(Arc::new(MemorySnapshotStore::new()));
        api.replace_records(vec![record("05/03/2024", "Bomba 01", "7")])
            .await
            .unwrap();

        api.set_override(SeriesKey::Mttr, SeriesValue::QuarterlyValues(vec![9.0; 3]))
            .await
            .unwrap();
        let result = api.compute_dashboard(&SnapshotFilter::all());
        assert_eq!(result.mttr_quarterly, [9.0; 3]);

        api.clear_override(SeriesKey::Mttr).await.unwrap();
        let result = api.compute_dashboard(&SnapshotFilter::all());
        // Q1 只有1条纠正性(8h),回落计算值
        assert_eq!(result.mttr_quarterly, [8.0, 4.0, 4.0]);
    }

    #[tokio::test]
    async fn test_set_override_rejects_bad_shape() {
        let api = DashboardApi::new(Arc::new(MemorySnapshotStore::new()));
        let err = api
            .set_override(SeriesKey::Mttr, SeriesValue::QuarterlyValues(vec![9.0; 4]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::OverrideValidation(_)));
        assert_eq!(api.override_count(), 0);
    }

    #[tokio::test]
    async fn test_load_roundtrips_through_store() {
        let store = Arc::new(MemorySnapshotStore::new());
        let writer = DashboardApi::new(store.clone());
        writer
            .replace_records(vec![record("05/03/2024", "Bomba 01", "7")])
            .await
            .unwrap();
        writer
            .set_override(SeriesKey::Mtbf, SeriesValue::MonthlyValues(vec![700.0; 12]))
            .await
            .unwrap();

        // 新实例从同一存储加载,覆盖在计算中生效
        let reader = DashboardApi::new(store);
        let summary = reader.load().await.unwrap();
        assert_eq!(summary.record_count, 1);
        assert_eq!(summary.override_count, 1);
        let result = reader.compute_dashboard(&SnapshotFilter::all());
        assert_eq!(result.mtbf_monthly, [700.0; 12]);
    }
}
