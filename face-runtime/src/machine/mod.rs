//! # Machine 模块
//!
//! 表情状态机，负责状态切换、帧推进与空闲自主行为。
//!
//! ## 模块结构
//!
//! - [`engine`]：核心状态机

pub mod engine;

pub use engine::{FaceStateMachine, StateChange, TickOutcome};

use std::time::Duration;

/// 动画播放帧率（与宿主刷新率无关）
pub const PLAYBACK_FPS: u32 = 15;

/// 单帧播放时长
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / PLAYBACK_FPS as u64);

/// 经过 `elapsed` 后应该显示的帧号
pub fn target_frame(elapsed: Duration) -> usize {
    (elapsed.as_nanos() * PLAYBACK_FPS as u128 / 1_000_000_000) as usize
}
