// ==========================================
// 设备维护KPI驾驶舱 - 字段映射器实现
// ==========================================
// 依据: Field_Mapping_Spec_v0.1.md - 标准字段映射表
// 职责: 源列名 → 标准字段映射
// ==========================================
// 源数据跨系统导出,同一字段存在多套列名
// （规范英文名 / 驼峰名 / 葡萄牙语列名）;
// 未知/多余列一律忽略,任意字段缺失均可容忍
// ==========================================

use crate::domain::work_order::WorkOrderRecord;
use std::collections::HashMap;

pub struct WorkOrderFieldMapper;

impl WorkOrderFieldMapper {
    pub fn new() -> Self {
        Self {}
    }

    /// 将原始行记录映射为 WorkOrderRecord
    ///
    /// 不做类型转换与校验 —— 那是归一化器的职责;
    /// 这里只解决"同一字段多个列名"的歧义
    pub fn map_row(&self, row: &HashMap<String, String>) -> WorkOrderRecord {
        WorkOrderRecord {
            date: self.get_string(row, "date"),
            equipment_id: self.get_string(row, "equipment_id"),
            equipment_name: self.get_string(row, "equipment_name"),
            maintenance_type_code: self.get_string(row, "maintenance_type_code"),
            criticality: self.get_string(row, "criticality"),
            analyst: self.get_string(row, "analyst"),
            state: self.get_string(row, "state"),
            material_cost: self.get_string(row, "material_cost"),
            labor_cost: self.get_string(row, "labor_cost"),
        }
    }

    /// 提取字符串字段（返回 Option）,支持多个可能的列名（别名）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        // 定义列名别名映射
        let aliases: Vec<&str> = match key {
            "date" => vec!["date", "Data Manutenção", "Data"],
            "equipment_id" => vec!["equipment_id", "equipmentId", "Equipamento"],
            "equipment_name" => vec!["equipment_name", "equipmentName", "Nome Equipamento"],
            "maintenance_type_code" => vec![
                "maintenance_type_code",
                "maintenanceTypeCode",
                "Tipo de Manutenção",
            ],
            "criticality" => vec!["criticality", "Criticidade"],
            "analyst" => vec!["analyst", "Nome do Analista", "Analista"],
            "state" => vec!["state", "Estado"],
            "material_cost" => vec!["material_cost", "materialCost", "Valor Material"],
            "labor_cost" => vec!["labor_cost", "laborCost", "Valor Mão de Obra"],
            _ => vec![key],
        };

        // 尝试所有可能的列名
        for alias in aliases {
            if let Some(v) = row.get(alias) {
                let trimmed = v.trim();
                if !trimmed.is_empty() {
                    return Some(trimmed.to_string());
                }
            }
        }
        None
    }
}

impl Default for WorkOrderFieldMapper {
    fn default() -> Self {
        Self::new()
    }
}
