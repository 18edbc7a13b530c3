//! # App 模块
//!
//! 应用状态与主循环逻辑。
//!
//! ## 每个 tick 的顺序
//!
//! 1. 取出所有待处理输入并执行
//! 2. 幻灯片模式下按间隔切换表情
//! 3. 推进状态机
//! 4. 把当前帧交给 [`Display`]

mod bootstrap;
mod update;

pub use bootstrap::*;
pub use update::*;

use std::time::Duration;

use clap::ValueEnum;
use face_runtime::{Clock, FaceStateMachine, MonotonicClock};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::display::Display;
use crate::error::HostResult;
use crate::input::InputManager;
use crate::renderer::RasterRenderer;
use crate::slideshow::Slideshow;

/// 运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppMode {
    /// 按键切换表情
    #[default]
    Interactive,
    /// 按固定间隔轮播全部表情
    Slideshow,
}

/// 应用状态
pub struct App<D: Display, C: Clock + Clone = MonotonicClock> {
    /// 表情状态机
    machine: FaceStateMachine<RasterRenderer, C>,
    /// 幻灯片（仅幻灯片模式）
    slideshow: Option<Slideshow>,
    /// 输入
    input: InputManager,
    /// 帧输出
    display: D,
    /// 与状态机共享的时间源
    clock: C,
    /// 单个 tick 的目标时长，`None` 表示不限速
    pacing: Option<Duration>,
    /// 已执行的 tick 数
    tick: u64,
    /// 是否继续运行
    running: bool,
}

impl<D: Display, C: Clock + Clone> App<D, C> {
    /// 从配置构建应用
    pub fn new(
        config: &AppConfig,
        mode: AppMode,
        input: InputManager,
        display: D,
        clock: C,
    ) -> HostResult<Self> {
        let machine = build_machine(config, clock.clone())?;
        let slideshow = match mode {
            AppMode::Interactive => None,
            AppMode::Slideshow => Some(Slideshow::new(
                config.slide_interval(),
                config.slideshow.start_paused,
                clock.now(),
            )),
        };

        Ok(Self {
            machine,
            slideshow,
            input,
            display,
            clock,
            pacing: Some(config.tick_duration()),
            tick: 0,
            running: true,
        })
    }

    /// 设置 tick 限速，`None` 表示尽快运行
    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }

    /// 状态机
    pub fn machine(&self) -> &FaceStateMachine<RasterRenderer, C> {
        &self.machine
    }

    /// 幻灯片（仅幻灯片模式）
    pub fn slideshow(&self) -> Option<&Slideshow> {
        self.slideshow.as_ref()
    }

    /// 帧输出
    pub fn display(&self) -> &D {
        &self.display
    }

    /// 已执行的 tick 数
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    /// 是否仍在运行
    pub fn is_running(&self) -> bool {
        self.running
    }
}
