// ==========================================
// 设备维护KPI驾驶舱 - 工单导入器
// ==========================================
// 职责: 文件读取 → 行记录 → 字段映射,产出内存快照
// ==========================================
// 导入流程（2个阶段）:
// 1. 文件读取与解析（CSV/Excel）
// 2. 字段映射（列名别名消解）
// 类型转换/归一化不在导入期做 —— 原始文本进入快照,
// 由管道的归一化器在每轮计算时消解
// ==========================================

use crate::domain::work_order::WorkOrderRecord;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::WorkOrderFieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use std::path::Path;
use tracing::{info, instrument};
use uuid::Uuid;

// ==========================================
// ImportOutcome - 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    /// 批次ID
    pub batch_id: String,
    /// 源文件
    pub source_file: String,
    /// 导入的记录
    pub records: Vec<WorkOrderRecord>,
}

impl ImportOutcome {
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

// ==========================================
// WorkOrderImporter - 工单导入器
// ==========================================
pub struct WorkOrderImporter {
    parser: UniversalFileParser,
    mapper: WorkOrderFieldMapper,
}

impl WorkOrderImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: WorkOrderFieldMapper::new(),
        }
    }

    /// 从文件导入工单记录
    ///
    /// # 参数
    /// - file_path: 工单文件路径（.csv/.xlsx/.xls）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 批次信息 + 记录集
    /// - Err(ImportError): 文件不存在 / 格式不支持 / 解析失败
    ///
    /// 行级脏数据不在这里报错 —— 任何字段缺失的行照常进入快照
    #[instrument(skip(self, file_path), fields(batch_id))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportOutcome> {
        let path = file_path.as_ref();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        info!(file = %path.display(), "开始导入工单数据");

        // 阶段 1: 文件解析
        let rows = self.parser.parse(path)?;

        // 阶段 2: 字段映射
        let records: Vec<WorkOrderRecord> =
            rows.iter().map(|row| self.mapper.map_row(row)).collect();

        info!(
            batch_id = %batch_id,
            record_count = records.len(),
            "工单导入完成"
        );

        Ok(ImportOutcome {
            batch_id,
            source_file: path.display().to_string(),
            records,
        })
    }
}

impl Default for WorkOrderImporter {
    fn default() -> Self {
        Self::new()
    }
}
