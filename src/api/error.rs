// ==========================================
// 设备维护KPI驾驶舱 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型,转换下层技术错误为业务错误
// ==========================================

use crate::domain::override_set::OverrideError;
use crate::importer::error::ImportError;
use crate::repository::error::StoreError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须包含显式原因
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    /// 存储不可用（可恢复: 内存快照继续可用）
    #[error("存储不可用: {0}")]
    StoreUnavailable(String),

    #[error("文件导入失败: {0}")]
    ImportFailed(String),

    #[error("覆盖值校验失败: {0}")]
    OverrideValidation(String),

    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 下层错误转换
// ==========================================

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::StoreUnavailable(err.to_string())
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportFailed(err.to_string())
    }
}

impl From<OverrideError> for ApiError {
    fn from(err: OverrideError) -> Self {
        ApiError::OverrideValidation(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
