// ==========================================
// 设备维护KPI驾驶舱 - 工单实体
// ==========================================
// 依据: Field_Mapping_Spec_v0.1.md - 标准字段映射表
// 职责: 原始工单记录 + 归一化后的工单视图
// ==========================================

use crate::domain::types::{MaintenanceCategory, WorkOrderState};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// WorkOrderRecord - 原始工单记录
// ==========================================
// 一行一个维修事件。字段全部可缺失：脏数据是常态,
// 缺失/无法解析在归一化阶段降级,不在这里报错。
// 列名兼容: 规范英文名 + 源系统葡萄牙语列名(serde 别名)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkOrderRecord {
    /// 维修日期（原始文本,多种本地化格式混存）
    #[serde(alias = "Data Manutenção", alias = "Data")]
    pub date: Option<String>,

    /// 设备编号
    #[serde(alias = "equipmentId", alias = "Equipamento")]
    pub equipment_id: Option<String>,

    /// 设备名称
    #[serde(alias = "equipmentName", alias = "Nome Equipamento")]
    pub equipment_name: Option<String>,

    /// 维护类型代码（原始文本,如 "7"）
    #[serde(alias = "maintenanceTypeCode", alias = "Tipo de Manutenção")]
    pub maintenance_type_code: Option<String>,

    /// 关键度（序数或自由标签）
    #[serde(alias = "Criticidade")]
    pub criticality: Option<String>,

    /// 分析员
    #[serde(alias = "Nome do Analista", alias = "Analista")]
    pub analyst: Option<String>,

    /// 工单状态（原始标签）
    #[serde(alias = "Estado")]
    pub state: Option<String>,

    /// 材料费（本地化格式小数,原始文本）
    #[serde(alias = "materialCost", alias = "Valor Material")]
    pub material_cost: Option<String>,

    /// 人工费（本地化格式小数,原始文本）
    #[serde(alias = "laborCost", alias = "Valor Mão de Obra")]
    pub labor_cost: Option<String>,
}

// ==========================================
// NormalizedWorkOrder - 归一化工单
// ==========================================
// 字段归一化器的输出,所有引擎的统一输入。
// 不变量: date=None 的记录不进任何逐月桶,但保留在类别/类型合计里
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWorkOrder {
    /// 规范化日期（无法解析时为 None）
    pub date: Option<NaiveDate>,
    /// 设备标识（优先设备名称,回落设备编号,均空则 None）
    pub equipment: Option<String>,
    /// 维护类型代码（解析后整数）
    pub type_code: Option<i64>,
    /// 维护类别（分类器输出）
    pub category: MaintenanceCategory,
    /// 关键度原始标签（用于分布统计）
    pub criticality_label: Option<String>,
    /// 关键度数值（仅数值可解析时参与均值）
    pub criticality_value: Option<f64>,
    /// 分析员
    pub analyst: Option<String>,
    /// 工单状态（未知回落 NotStarted）
    pub state: WorkOrderState,
    /// 材料费（解析失败按 0 计）
    pub material_cost: f64,
    /// 人工费（解析失败按 0 计）
    pub labor_cost: f64,
}

impl NormalizedWorkOrder {
    /// 工单总成本 = 材料费 + 人工费
    ///
    /// 所有消费方必须经由此方法取成本,保证成本合计口径一致
    pub fn total_cost(&self) -> f64 {
        self.material_cost + self.labor_cost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_portuguese_headers() {
        let json = r#"{
            "Data Manutenção": "05/03/2024",
            "Nome Equipamento": "Bomba 01",
            "Tipo de Manutenção": "7",
            "Valor Material": "1.234,50",
            "Valor Mão de Obra": "200,00",
            "Estado": "Iniciada"
        }"#;
        let record: WorkOrderRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.date.as_deref(), Some("05/03/2024"));
        assert_eq!(record.equipment_name.as_deref(), Some("Bomba 01"));
        assert_eq!(record.maintenance_type_code.as_deref(), Some("7"));
        assert_eq!(record.material_cost.as_deref(), Some("1.234,50"));
        assert_eq!(record.state.as_deref(), Some("Iniciada"));
    }

    #[test]
    fn test_record_tolerates_missing_fields() {
        let record: WorkOrderRecord = serde_json::from_str("{}").unwrap();
        assert!(record.date.is_none());
        assert!(record.equipment_id.is_none());
        assert!(record.material_cost.is_none());
    }

    #[test]
    fn test_total_cost() {
        let order = NormalizedWorkOrder {
            date: None,
            equipment: None,
            type_code: None,
            category: MaintenanceCategory::Other,
            criticality_label: None,
            criticality_value: None,
            analyst: None,
            state: WorkOrderState::NotStarted,
            material_cost: 120.5,
            labor_cost: 80.0,
        };
        assert!((order.total_cost() - 200.5).abs() < f64::EPSILON);
    }
}
