// ==========================================
// 设备维护KPI驾驶舱 - 快照存储接口
// ==========================================
// 职责: 原始记录快照与覆盖集的持久化边界
// ==========================================
// 管道对存储介质不可知（远端文档库 / 本地库均可）;
// 记录与覆盖两条加载可并发,互相无顺序依赖;
// 覆盖集写入遵循单写者、后写覆盖
// ==========================================

use crate::domain::override_set::OverrideSet;
use crate::domain::work_order::WorkOrderRecord;
use crate::repository::error::{StoreError, StoreResult};
use async_trait::async_trait;
use std::sync::Mutex;

// ==========================================
// SnapshotStore Trait
// ==========================================
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// 加载原始记录快照
    async fn load_records(&self) -> StoreResult<Vec<WorkOrderRecord>>;

    /// 加载覆盖集
    ///
    /// 调用方约定: 加载失败回落空覆盖集,不作为硬错误处理
    async fn load_overrides(&self) -> StoreResult<OverrideSet>;

    /// 保存原始记录快照（整体替换）
    ///
    /// 重新摄取原始数据不得悄悄丢弃覆盖集 ——
    /// 两者独立持久化,互不触碰
    async fn save_records(&self, records: &[WorkOrderRecord]) -> StoreResult<()>;

    /// 保存覆盖集（整体替换,后写覆盖）
    async fn save_overrides(&self, overrides: &OverrideSet) -> StoreResult<()>;
}

// ==========================================
// MemorySnapshotStore - 内存存储
// ==========================================
// 用途: 测试 / 无持久化介质时的降级运行
pub struct MemorySnapshotStore {
    records: Mutex<Vec<WorkOrderRecord>>,
    overrides: Mutex<OverrideSet>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            overrides: Mutex::new(OverrideSet::new()),
        }
    }
}

impl Default for MemorySnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn load_records(&self) -> StoreResult<Vec<WorkOrderRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        Ok(records.clone())
    }

    async fn load_overrides(&self) -> StoreResult<OverrideSet> {
        let overrides = self
            .overrides
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        Ok(overrides.clone())
    }

    async fn save_records(&self, records: &[WorkOrderRecord]) -> StoreResult<()> {
        let mut slot = self
            .records
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        *slot = records.to_vec();
        Ok(())
    }

    async fn save_overrides(&self, overrides: &OverrideSet) -> StoreResult<()> {
        let mut slot = self
            .overrides
            .lock()
            .map_err(|e| StoreError::LockError(e.to_string()))?;
        *slot = overrides.clone();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::override_set::{SeriesKey, SeriesValue};

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemorySnapshotStore::new();
        assert!(store.load_records().await.unwrap().is_empty());

        let records = vec![WorkOrderRecord {
            equipment_id: Some("EQ-01".to_string()),
            ..Default::default()
        }];
        store.save_records(&records).await.unwrap();
        assert_eq!(store.load_records().await.unwrap(), records);

        let mut overrides = OverrideSet::new();
        overrides
            .set(SeriesKey::Mttr, SeriesValue::QuarterlyValues(vec![5.0; 3]))
            .unwrap();
        store.save_overrides(&overrides).await.unwrap();
        assert_eq!(store.load_overrides().await.unwrap(), overrides);
    }

    #[tokio::test]
    async fn test_memory_store_records_do_not_touch_overrides() {
        let store = MemorySnapshotStore::new();
        let mut overrides = OverrideSet::new();
        overrides
            .set(SeriesKey::Mttr, SeriesValue::QuarterlyValues(vec![5.0; 3]))
            .unwrap();
        store.save_overrides(&overrides).await.unwrap();

        // 重新摄取记录不得丢弃覆盖集
        store.save_records(&[]).await.unwrap();
        assert_eq!(store.load_overrides().await.unwrap().len(), 1);
    }
}
