// ==========================================
// 设备维护KPI驾驶舱 - 核心库
// ==========================================
// 依据: KPI_Master_Spec.md - 系统宪法
// 系统定位: 维护工单指标推导管道 (表现层外置)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 指标口径参数
pub mod config;

// 引擎层 - 指标推导
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 存储层 - 快照持久化
pub mod repository;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    BreakdownEntry, BreakdownSet, DashboardResult, EquipmentProfile, KpiSnapshot,
    MaintenanceCategory, MonthlySeriesSet, NormalizedWorkOrder, OverrideSet, SeriesKey,
    SeriesValue, SnapshotFilter, WorkOrderRecord, WorkOrderState,
};

// 配置
pub use config::{CategoryTable, DashboardConfig};

// 引擎
pub use engine::{
    Aggregator, DashboardPipeline, FieldNormalizer, OverrideMerge, RecordClassifier,
    ReliabilityEngine, RiskRanker,
};

// 导入
pub use importer::{ImportOutcome, WorkOrderImporter};

// 存储
pub use repository::{MemorySnapshotStore, SnapshotStore, SqliteSnapshotStore, StoreError};

// API
pub use api::{ApiError, DashboardApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "设备维护KPI驾驶舱";

// ==========================================
// 预编译检查
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
