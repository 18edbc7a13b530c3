//! 宿主层错误类型

use std::path::PathBuf;

use face_runtime::FaceError;
use thiserror::Error;

use crate::config::ConfigError;

/// 宿主层错误
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Face(#[from] FaceError),

    /// 帧导出失败
    #[error("帧导出失败: {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

/// Result 类型别名
pub type HostResult<T> = Result<T, HostError>;
