//! # State 模块
//!
//! 状态机的只读快照，用于日志与调试。
//!
//! 这些类型只是观察结果，状态机内部不会读取它们。

use std::fmt;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::expression::ExpressionId;

/// 状态信息（调试输出）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateInfo {
    /// 当前表情
    pub current_state: ExpressionId,
    /// 上一个表情
    pub previous_state: ExpressionId,
    /// 进入当前表情后经过的秒数
    pub elapsed_secs: f64,
    /// 当前帧（从 0 开始）
    pub frame_index: usize,
    /// 当前动画帧数
    pub frame_count: usize,
    /// 距离下一次自动眨眼的秒数（不小于 0）
    pub next_auto_blink_secs: f64,
}

impl StateInfo {
    /// `"X/N"` 形式的帧标签，X 从 1 开始
    pub fn frame_label(&self) -> String {
        format!("{}/{}", self.frame_index + 1, self.frame_count)
    }
}

impl fmt::Display for StateInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (上一个: {}) 已持续 {:.2}s, 帧 {}, 下次眨眼 {:.2}s",
            self.current_state,
            self.previous_state,
            self.elapsed_secs,
            self.frame_label(),
            self.next_auto_blink_secs
        )
    }
}

/// 状态机计时状态的快照
///
/// 只用于比较前后两次调用之间是否发生了变化。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineSnapshot {
    pub current_state: ExpressionId,
    pub previous_state: ExpressionId,
    pub frame_index: usize,
    pub frame_count: usize,
    pub state_started: Instant,
    pub animation_started: Instant,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> StateInfo {
        StateInfo {
            current_state: ExpressionId::Happy,
            previous_state: ExpressionId::Idle,
            elapsed_secs: 0.5,
            frame_index: 7,
            frame_count: 20,
            next_auto_blink_secs: 0.0,
        }
    }

    #[test]
    fn test_frame_label_is_one_based() {
        assert_eq!(info().frame_label(), "8/20");
    }

    #[test]
    fn test_serialize_uses_expression_names() {
        let json = serde_json::to_value(info()).unwrap();
        assert_eq!(json["current_state"], "happy");
        assert_eq!(json["previous_state"], "idle");
        assert_eq!(json["frame_count"], 20);
    }

    #[test]
    fn test_display() {
        let text = info().to_string();
        assert!(text.starts_with("happy"));
        assert!(text.contains("8/20"));
    }
}
