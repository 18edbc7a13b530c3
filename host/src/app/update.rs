//! 主循环：单个 tick 的推进与固定频率运行

use std::thread;
use std::time::Instant;

use face_runtime::{Clock, ExpressionId, TickOutcome};
use tracing::{debug, info};

use super::App;
use crate::display::{Display, FrameInfo};
use crate::error::HostResult;
use crate::input::KeyAction;

/// 一次运行的汇总
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// 执行的 tick 数
    pub ticks: u64,
    /// 表情切换次数
    pub transitions: u64,
    /// 结束时的表情
    pub final_state: ExpressionId,
}

impl<D: Display, C: Clock + Clone> App<D, C> {
    /// 执行一个 tick
    pub fn step(&mut self) -> HostResult<TickOutcome> {
        for action in self.input.poll() {
            self.handle_action(action);
        }

        let now = self.clock.now();
        if let Some(show) = self.slideshow.as_mut()
            && let Some(entry) = show.update(now)
        {
            info!(slide = %show.label(), "幻灯片切换");
            self.machine.change_to(entry.expression);
        }

        let outcome = self.machine.update();
        if !matches!(outcome, TickOutcome::Advanced { .. } | TickOutcome::Looped) {
            debug!(tick = self.tick, ?outcome, "状态机事件");
        }

        let info = FrameInfo {
            tick: self.tick,
            expression: self.machine.current_state(),
            frame_index: self.machine.frame_index(),
        };
        self.display.present(info, self.machine.current_frame())?;
        self.tick += 1;
        Ok(outcome)
    }

    /// 执行一个输入动作
    pub fn handle_action(&mut self, action: KeyAction) {
        let now = self.clock.now();
        match action {
            KeyAction::Expression(name) => {
                self.machine.change_state(&name);
            }
            KeyAction::TogglePause => match self.slideshow.as_mut() {
                Some(show) => {
                    let paused = show.toggle_pause(now);
                    info!(paused, "幻灯片暂停切换");
                }
                None => debug!("非幻灯片模式，忽略暂停"),
            },
            KeyAction::Next | KeyAction::Previous => {
                let Some(show) = self.slideshow.as_mut() else {
                    debug!(?action, "非幻灯片模式，忽略翻页");
                    return;
                };
                let entry = if action == KeyAction::Next {
                    show.next(now)
                } else {
                    show.previous(now)
                };
                info!(slide = %show.label(), "幻灯片翻页");
                self.machine.change_to(entry.expression);
            }
            KeyAction::Quit => {
                info!("收到退出请求");
                self.running = false;
            }
        }
    }

    /// 以固定频率运行，直到退出或达到 `max_ticks`
    pub fn run(&mut self, max_ticks: Option<u64>) -> HostResult<RunSummary> {
        let started = self.tick;
        let mut transitions = 0;
        let mut next_deadline = Instant::now();

        while self.running && max_ticks.is_none_or(|max| self.tick - started < max) {
            let before = self.machine.current_state();
            self.step()?;
            if self.machine.current_state() != before {
                transitions += 1;
            }

            if let Some(pacing) = self.pacing {
                next_deadline += pacing;
                let now = Instant::now();
                match next_deadline.checked_duration_since(now) {
                    Some(wait) => thread::sleep(wait),
                    // 落后太多时不追帧，从当前时刻重新对齐
                    None if now - next_deadline > pacing * 4 => next_deadline = now,
                    None => {}
                }
            }
        }

        let summary = RunSummary {
            ticks: self.tick - started,
            transitions,
            final_state: self.machine.current_state(),
        };
        info!(
            ticks = summary.ticks,
            transitions = summary.transitions,
            final_state = %summary.final_state,
            "主循环结束"
        );
        Ok(summary)
    }
}

/// 固定频率下 `seconds` 秒对应的 tick 数
pub fn ticks_for(seconds: f64, tick_rate: u32) -> u64 {
    (seconds * tick_rate as f64).round().max(0.0) as u64
}
