// ==========================================
// 设备维护KPI驾驶舱 - 领域模型层
// ==========================================
// 依据: KPI_Master_Spec.md - PART C 数据模型
// ==========================================
// 职责: 定义领域实体、类型、覆盖集
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod dashboard;
pub mod override_set;
pub mod types;
pub mod work_order;

// 重导出核心类型
pub use dashboard::{
    BreakdownEntry, BreakdownSet, DashboardResult, EquipmentProfile, KpiSnapshot,
    MonthlySeriesSet, SnapshotFilter, MONTH_SLOTS, MTTR_SLOTS,
};
pub use override_set::{OverrideError, OverrideSet, SeriesKey, SeriesValue};
pub use types::{MaintenanceCategory, WorkOrderState};
pub use work_order::{NormalizedWorkOrder, WorkOrderRecord};
