//! # Host 层
//!
//! 机器人表情的宿主层实现：把 `face-runtime` 的状态机接到实际的输入与输出上。
//!
//! ## 架构说明
//!
//! Host 层负责：
//! - 配置加载与验证
//! - 光栅渲染（`FaceParams` → 灰度帧）
//! - 输入采集（按键 / 文本行 → 动作）
//! - 固定频率主循环与幻灯片演示
//! - 帧输出（无头 / PNG 序列）
//!
//! Host 层不包含表情逻辑，切换、计时与空闲行为都由状态机决定。

pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod renderer;
pub mod slideshow;

pub use app::{App, AppMode, RunSummary, build_machine, seeded_rngs, ticks_for};
pub use config::{
    AppConfig, ConfigError, DebugConfig, DisplayConfig, LoadOutcome, OutputConfig,
    SlideshowConfig,
};
pub use display::{Display, FrameInfo, Headless, PngSequence};
pub use error::{HostError, HostResult};
pub use input::{InputManager, KeyAction, KeyMap};
pub use renderer::{Canvas, RasterRenderer};
pub use slideshow::{SLIDES, SlideEntry, Slideshow};
