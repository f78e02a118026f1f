// ==========================================
// 设备维护KPI驾驶舱 - 存储层
// ==========================================
// 职责: 记录快照与覆盖集的持久化
// 红线: 存储层不含指标逻辑
// ==========================================

pub mod error;
pub mod snapshot_store;
pub mod sqlite_store;

// 重导出
pub use error::{StoreError, StoreResult};
pub use snapshot_store::{MemorySnapshotStore, SnapshotStore};
pub use sqlite_store::SqliteSnapshotStore;
