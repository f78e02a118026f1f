// ==========================================
// 设备维护KPI驾驶舱 - 字段归一化器
// ==========================================
// 依据: Field_Mapping_Spec_v0.1.md - 6. 数据质量规则
// 职责: 本地化日期/数值的歧义消解 + 原始记录 → 归一化工单
// ==========================================
// 红线: 逐行降级,绝不因单行脏数据中断整轮计算
// ==========================================

use crate::domain::types::WorkOrderState;
use crate::domain::work_order::{NormalizedWorkOrder, WorkOrderRecord};
use crate::engine::classifier::RecordClassifier;
use chrono::NaiveDate;

// ==========================================
// FieldNormalizer - 字段归一化器
// ==========================================
pub struct FieldNormalizer {
    // 无状态引擎
}

impl FieldNormalizer {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 日期归一化
    // ==========================================

    /// 解析本地化日期文本
    ///
    /// 规则（按序,首个命中生效）:
    /// 1. 含 '/': 三段视为 日/月/年（源数据全程日先约定,不按月/日/年解释）
    /// 2. 含 '-': 三段,首段4位视为 年-月-日,否则 日-月-年
    /// 3. 其余: 按紧凑格式 YYYYMMDD 做一次通用解析
    ///
    /// # 返回
    /// - Some(NaiveDate): 解析成功
    /// - None: 段数不符 / 非数字 / 日历非法 —— 调用方按
    ///   "剔除逐月桶、保留类别合计"处理
    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }

        if s.contains('/') {
            let parts: Vec<&str> = s.split('/').collect();
            if parts.len() != 3 {
                return None;
            }
            // 日/月/年
            return Self::assemble_date(parts[2], parts[1], parts[0]);
        }

        if s.contains('-') {
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() != 3 {
                return None;
            }
            return if parts[0].trim().len() == 4 {
                // 年-月-日
                Self::assemble_date(parts[0], parts[1], parts[2])
            } else {
                // 日-月-年
                Self::assemble_date(parts[2], parts[1], parts[0])
            };
        }

        NaiveDate::parse_from_str(s, "%Y%m%d").ok()
    }

    /// 从三段文本组装日期（非数字 / 日历非法 → None）
    fn assemble_date(year: &str, month: &str, day: &str) -> Option<NaiveDate> {
        let year: i32 = year.trim().parse().ok()?;
        let month: u32 = month.trim().parse().ok()?;
        let day: u32 = day.trim().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    // ==========================================
    // 数值归一化
    // ==========================================

    /// 解析本地化小数文本
    ///
    /// 清洗规则: 去引号与非数值符号（保留正负号与分隔符）;
    /// 出现逗号时按"逗号为小数点、点为千位分隔"口径归一
    ///
    /// # 返回
    /// - Some(f64): 解析成功
    /// - None: 清洗后为空或仍无法解析
    pub fn parse_decimal_opt(&self, raw: &str) -> Option<f64> {
        let mut s: String = raw
            .trim()
            .trim_matches('"')
            .trim_matches('\'')
            .to_string();
        s.retain(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == ',' || c == '.');
        if s.is_empty() {
            return None;
        }
        if s.contains(',') {
            s = s.replace('.', "");
            s = s.replace(',', ".");
        }
        s.parse::<f64>().ok()
    }

    /// 解析成本字段（解析失败按 0 计）
    ///
    /// 材料费与人工费共用此口径,保证成本合计恒等于
    /// Σ材料费 + Σ人工费,不出现分项间的隐性偏差
    pub fn parse_cost(&self, raw: Option<&str>) -> f64 {
        raw.and_then(|s| self.parse_decimal_opt(s)).unwrap_or(0.0)
    }

    /// 解析维护类型代码
    pub fn parse_type_code(&self, raw: &str) -> Option<i64> {
        let s = raw.trim();
        if s.is_empty() {
            return None;
        }
        if let Ok(v) = s.parse::<i64>() {
            return Some(v);
        }
        // 兼容 "7.0" 一类的浮点写法
        s.parse::<f64>().ok().map(|v| v as i64)
    }

    // ==========================================
    // 记录归一化
    // ==========================================

    /// 原始记录 → 归一化工单
    ///
    /// 任何字段解析失败都只降级该字段的贡献
    /// （日期→None / 成本→0 / 状态→NotStarted / 类别→Other）
    pub fn normalize(
        &self,
        record: &WorkOrderRecord,
        classifier: &RecordClassifier,
    ) -> NormalizedWorkOrder {
        let date = record.date.as_deref().and_then(|s| self.parse_date(s));

        // 设备标识: 优先名称,回落编号
        let equipment = Self::non_empty(record.equipment_name.as_deref())
            .or_else(|| Self::non_empty(record.equipment_id.as_deref()));

        let type_code = record
            .maintenance_type_code
            .as_deref()
            .and_then(|s| self.parse_type_code(s));

        let criticality_label = Self::non_empty(record.criticality.as_deref());
        let criticality_value = record
            .criticality
            .as_deref()
            .and_then(|s| self.parse_decimal_opt(s));

        let state = record
            .state
            .as_deref()
            .map(WorkOrderState::from_label)
            .unwrap_or_default();

        NormalizedWorkOrder {
            date,
            equipment,
            type_code,
            category: classifier.classify(type_code),
            criticality_label,
            criticality_value,
            analyst: Self::non_empty(record.analyst.as_deref()),
            state,
            material_cost: self.parse_cost(record.material_cost.as_deref()),
            labor_cost: self.parse_cost(record.labor_cost.as_deref()),
        }
    }

    /// 空白标准化（空字符串/纯空白 → None）
    fn non_empty(value: Option<&str>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }
}

impl Default for FieldNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MaintenanceCategory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_slash_is_day_first() {
        let n = FieldNormalizer::new();
        // 日先约定: 05/03/2024 是 3月5日,不是 5月3日
        assert_eq!(n.parse_date("05/03/2024"), Some(date(2024, 3, 5)));
        assert_eq!(n.parse_date("31/12/2023"), Some(date(2023, 12, 31)));
    }

    #[test]
    fn test_parse_date_dash_iso() {
        let n = FieldNormalizer::new();
        assert_eq!(n.parse_date("2024-03-05"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_parse_date_dash_day_first() {
        let n = FieldNormalizer::new();
        // 首段非4位: 日-月-年
        assert_eq!(n.parse_date("03-05-2024"), Some(date(2024, 5, 3)));
    }

    #[test]
    fn test_parse_date_compact() {
        let n = FieldNormalizer::new();
        assert_eq!(n.parse_date("20240305"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_parse_date_unparseable() {
        let n = FieldNormalizer::new();
        assert_eq!(n.parse_date("not-a-date"), None);
        assert_eq!(n.parse_date(""), None);
        assert_eq!(n.parse_date("05/03"), None); // 段数不符
        assert_eq!(n.parse_date("32/13/2024"), None); // 日历非法
        assert_eq!(n.parse_date("ab/cd/2024"), None); // 非数字
    }

    #[test]
    fn test_parse_decimal_comma_separator() {
        let n = FieldNormalizer::new();
        assert_eq!(n.parse_decimal_opt("1.234,50"), Some(1234.50));
        assert_eq!(n.parse_decimal_opt("200,00"), Some(200.0));
        assert_eq!(n.parse_decimal_opt("R$ 1.234,50"), Some(1234.50));
    }

    #[test]
    fn test_parse_decimal_plain() {
        let n = FieldNormalizer::new();
        assert_eq!(n.parse_decimal_opt("1234.5"), Some(1234.5));
        assert_eq!(n.parse_decimal_opt("\"150.75\""), Some(150.75));
        assert_eq!(n.parse_decimal_opt("-42"), Some(-42.0));
    }

    #[test]
    fn test_parse_cost_defaults_zero() {
        let n = FieldNormalizer::new();
        assert_eq!(n.parse_cost(None), 0.0);
        assert_eq!(n.parse_cost(Some("")), 0.0);
        assert_eq!(n.parse_cost(Some("n/a")), 0.0);
    }

    #[test]
    fn test_normalize_degrades_per_field() {
        let n = FieldNormalizer::new();
        let classifier = RecordClassifier::default();
        let record = WorkOrderRecord {
            date: Some("not-a-date".to_string()),
            equipment_id: Some("EQ-01".to_string()),
            equipment_name: Some("  ".to_string()),
            maintenance_type_code: Some("junk".to_string()),
            criticality: Some("Alta".to_string()),
            analyst: None,
            state: Some("Cancelada".to_string()),
            material_cost: Some("abc".to_string()),
            labor_cost: Some("100,5".to_string()),
        };
        let order = n.normalize(&record, &classifier);
        assert_eq!(order.date, None);
        // 名称为空白,回落编号
        assert_eq!(order.equipment.as_deref(), Some("EQ-01"));
        assert_eq!(order.type_code, None);
        assert_eq!(order.category, MaintenanceCategory::Other);
        assert_eq!(order.criticality_label.as_deref(), Some("Alta"));
        assert_eq!(order.criticality_value, None);
        assert_eq!(order.state, WorkOrderState::NotStarted);
        assert_eq!(order.material_cost, 0.0);
        assert_eq!(order.labor_cost, 100.5);
    }

    #[test]
    fn test_normalize_prefers_equipment_name() {
        let n = FieldNormalizer::new();
        let classifier = RecordClassifier::default();
        let record = WorkOrderRecord {
            equipment_id: Some("EQ-01".to_string()),
            equipment_name: Some("Bomba 01".to_string()),
            ..Default::default()
        };
        let order = n.normalize(&record, &classifier);
        assert_eq!(order.equipment.as_deref(), Some("Bomba 01"));
    }
}
