//! # Error 模块
//!
//! 定义 face-runtime 中使用的错误类型。
//!
//! 注意：`update()` 与 `current_frame()` 永不返回错误。
//! 这里的错误只出现在构建期（目录配置、自主行为配置）以及表情名解析中。

use thiserror::Error;

/// face-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FaceError {
    /// 未知的表情标识符
    #[error("未知表情 '{name}'")]
    UnknownExpression { name: String },

    /// 无效的保持时长
    #[error("表情 '{expression}' 的保持时长无效: {seconds}")]
    InvalidHoldDuration { expression: String, seconds: f64 },

    /// 空闲表情不允许配置保持时长
    #[error("idle 表情不会自动结束，不能配置保持时长")]
    IdleHoldDuration,

    /// 无效的随机间隔区间
    #[error("间隔 '{name}' 无效：需要 0 < {min} < {max}")]
    InvalidInterval { name: String, min: f64, max: f64 },

    /// 微动偏移超出范围
    #[error("微动偏移 ({x}, {y}) 无效：需要在 0 - {max} 像素之间")]
    InvalidMicroOffset { x: i32, y: i32, max: i32 },

    /// 表情目录解析失败
    #[error("表情目录解析失败: {message}")]
    CatalogParse { message: String },
}

/// Result 类型别名
pub type FaceResult<T> = Result<T, FaceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FaceError::UnknownExpression {
            name: "not_a_real_state".to_string(),
        };
        assert_eq!(err.to_string(), "未知表情 'not_a_real_state'");

        let err = FaceError::InvalidInterval {
            name: "blink_interval".to_string(),
            min: 8.0,
            max: 3.0,
        };
        assert!(err.to_string().contains("blink_interval"));
    }
}
