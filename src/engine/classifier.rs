// ==========================================
// 设备维护KPI驾驶舱 - 记录分类器
// ==========================================
// 职责: 维护类型代码 → 语义类别（纯全函数）
// 红线: 代码表驱动（见 config::CategoryTable）,未登记一律 Other
// ==========================================

use crate::config::CategoryTable;
use crate::domain::types::MaintenanceCategory;

pub struct RecordClassifier {
    table: CategoryTable,
}

impl RecordClassifier {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    /// 分类
    ///
    /// 全函数: 任意整数（含缺失）都有定义的输出
    pub fn classify(&self, code: Option<i64>) -> MaintenanceCategory {
        self.table.lookup(code)
    }
}

impl Default for RecordClassifier {
    fn default() -> Self {
        Self::new(CategoryTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_codes() {
        let classifier = RecordClassifier::default();
        assert_eq!(classifier.classify(Some(7)), MaintenanceCategory::Corrective);
        assert_eq!(classifier.classify(Some(10)), MaintenanceCategory::Preventive);
        assert_eq!(classifier.classify(Some(22)), MaintenanceCategory::Predictive);
        assert_eq!(classifier.classify(Some(12)), MaintenanceCategory::Improvement);
    }

    #[test]
    fn test_classify_unknown_falls_back_other() {
        let classifier = RecordClassifier::default();
        assert_eq!(classifier.classify(Some(0)), MaintenanceCategory::Other);
        assert_eq!(classifier.classify(Some(i64::MAX)), MaintenanceCategory::Other);
        assert_eq!(classifier.classify(None), MaintenanceCategory::Other);
    }
}
