// ==========================================
// 设备维护KPI驾驶舱 - 人工覆盖集
// ==========================================
// 职责: 人工录入的序列级替换值
// 生命周期: 只通过显式编辑写入,独立于原始记录持久化,
//           管道从不重算覆盖值 —— 读取时合并,整序列替换
// ==========================================

use crate::domain::dashboard::{BreakdownEntry, MONTH_SLOTS, MTTR_SLOTS};
use crate::domain::types::WorkOrderState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

// ==========================================
// SeriesKey - 可覆盖序列键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKey {
    MonthlyCosts,
    MonthlyCorrectives,
    MonthlyStatus,
    Mttr,
    Mtbf,
    CategoryCounts,
    CriticalityCounts,
    AnalystCounts,
    TopEquipment,
}

impl SeriesKey {
    /// 全部序列键
    pub const ALL: [SeriesKey; 9] = [
        SeriesKey::MonthlyCosts,
        SeriesKey::MonthlyCorrectives,
        SeriesKey::MonthlyStatus,
        SeriesKey::Mttr,
        SeriesKey::Mtbf,
        SeriesKey::CategoryCounts,
        SeriesKey::CriticalityCounts,
        SeriesKey::AnalystCounts,
        SeriesKey::TopEquipment,
    ];

    /// 从存储字符串解析序列键
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "monthly_costs" => Some(SeriesKey::MonthlyCosts),
            "monthly_correctives" => Some(SeriesKey::MonthlyCorrectives),
            "monthly_status" => Some(SeriesKey::MonthlyStatus),
            "mttr" => Some(SeriesKey::Mttr),
            "mtbf" => Some(SeriesKey::Mtbf),
            "category_counts" => Some(SeriesKey::CategoryCounts),
            "criticality_counts" => Some(SeriesKey::CriticalityCounts),
            "analyst_counts" => Some(SeriesKey::AnalystCounts),
            "top_equipment" => Some(SeriesKey::TopEquipment),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            SeriesKey::MonthlyCosts => "monthly_costs",
            SeriesKey::MonthlyCorrectives => "monthly_correctives",
            SeriesKey::MonthlyStatus => "monthly_status",
            SeriesKey::Mttr => "mttr",
            SeriesKey::Mtbf => "mtbf",
            SeriesKey::CategoryCounts => "category_counts",
            SeriesKey::CriticalityCounts => "criticality_counts",
            SeriesKey::AnalystCounts => "analyst_counts",
            SeriesKey::TopEquipment => "top_equipment",
        }
    }
}

impl fmt::Display for SeriesKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// SeriesValue - 覆盖值
// ==========================================
// 形状在写入时校验（见 OverrideSet::set）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum SeriesValue {
    /// 逐月数值序列（成本 / MTBF,长度12）
    MonthlyValues(Vec<f64>),
    /// 逐月计数序列（纠正性工单数,长度12）
    MonthlyCounts(Vec<u32>),
    /// 季度数值序列（MTTR,长度3）
    QuarterlyValues(Vec<f64>),
    /// 逐月状态矩阵（每条长度12）
    StatusMatrix(BTreeMap<WorkOrderState, Vec<u32>>),
    /// 分布统计（类别/关键度/分析员/设备）
    Counts(Vec<BreakdownEntry>),
}

// ==========================================
// OverrideError - 覆盖值校验错误
// ==========================================
#[derive(Error, Debug)]
pub enum OverrideError {
    #[error("覆盖值形状不匹配: key={key}, 期望 {expected}")]
    ShapeMismatch { key: SeriesKey, expected: &'static str },

    #[error("覆盖值长度不匹配: key={key}, 期望 {expected}, 实际 {actual}")]
    LengthMismatch {
        key: SeriesKey,
        expected: usize,
        actual: usize,
    },
}

// ==========================================
// OverrideSet - 覆盖集
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideSet {
    entries: BTreeMap<SeriesKey, SeriesValue>,
}

impl OverrideSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, key: SeriesKey) -> Option<&SeriesValue> {
        self.entries.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SeriesKey, &SeriesValue)> {
        self.entries.iter()
    }

    /// 写入覆盖值（先校验形状,整序列替换）
    ///
    /// # 参数
    /// - key: 序列键
    /// - value: 覆盖值
    ///
    /// # 返回
    /// - Ok(()): 校验通过并写入
    /// - Err(OverrideError): 形状/长度不符,集合不变
    pub fn set(&mut self, key: SeriesKey, value: SeriesValue) -> Result<(), OverrideError> {
        Self::validate(key, &value)?;
        self.entries.insert(key, value);
        Ok(())
    }

    /// 清除覆盖值
    ///
    /// # 返回
    /// - true: 该键存在并已移除（下轮计算回落到计算值）
    /// - false: 该键原本无覆盖
    pub fn clear(&mut self, key: SeriesKey) -> bool {
        self.entries.remove(&key).is_some()
    }

    /// 校验键与值的形状匹配
    fn validate(key: SeriesKey, value: &SeriesValue) -> Result<(), OverrideError> {
        let check_len = |expected: usize, actual: usize| {
            if expected == actual {
                Ok(())
            } else {
                Err(OverrideError::LengthMismatch {
                    key,
                    expected,
                    actual,
                })
            }
        };

        match (key, value) {
            (SeriesKey::MonthlyCosts, SeriesValue::MonthlyValues(v)) => {
                check_len(MONTH_SLOTS, v.len())
            }
            (SeriesKey::Mtbf, SeriesValue::MonthlyValues(v)) => check_len(MONTH_SLOTS, v.len()),
            (SeriesKey::MonthlyCorrectives, SeriesValue::MonthlyCounts(v)) => {
                check_len(MONTH_SLOTS, v.len())
            }
            (SeriesKey::Mttr, SeriesValue::QuarterlyValues(v)) => check_len(MTTR_SLOTS, v.len()),
            (SeriesKey::MonthlyStatus, SeriesValue::StatusMatrix(matrix)) => {
                for series in matrix.values() {
                    check_len(MONTH_SLOTS, series.len())?;
                }
                Ok(())
            }
            (
                SeriesKey::CategoryCounts
                | SeriesKey::CriticalityCounts
                | SeriesKey::AnalystCounts
                | SeriesKey::TopEquipment,
                SeriesValue::Counts(_),
            ) => Ok(()),
            (key, _) => Err(OverrideError::ShapeMismatch {
                key,
                expected: Self::expected_shape(key),
            }),
        }
    }

    fn expected_shape(key: SeriesKey) -> &'static str {
        match key {
            SeriesKey::MonthlyCosts | SeriesKey::Mtbf => "monthly_values[12]",
            SeriesKey::MonthlyCorrectives => "monthly_counts[12]",
            SeriesKey::Mttr => "quarterly_values[3]",
            SeriesKey::MonthlyStatus => "status_matrix{state -> [12]}",
            SeriesKey::CategoryCounts
            | SeriesKey::CriticalityCounts
            | SeriesKey::AnalystCounts
            | SeriesKey::TopEquipment => "counts",
        }
    }
}
