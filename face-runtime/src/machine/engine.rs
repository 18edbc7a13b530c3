//! # Engine 模块
//!
//! 表情状态机核心。
//!
//! ## 执行模型
//!
//! ```text
//! update() -> TickOutcome
//! ```
//!
//! 每次调用按顺序检查，命中即停：
//!
//! 1. 非空闲表情的保持时长到期 → 回到 `idle`
//! 2. 空闲时轮询自主行为：眨眼 → 切换到 `blink` 并返回；微动 → 替换当前帧后继续
//! 3. 按 15fps 推进帧；动画播完时空闲循环播放，其他表情回到 `idle`
//!
//! ## 线程模型
//!
//! 状态机不是线程安全的：帧通过 `Rc` 共享，类型本身是 `!Send`。
//! 请把它限制在宿主主循环所在的线程里，`change_state` 也只能在两次
//! `update` 之间从同一线程调用。

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::autonomy::{AutonomyConfig, IdleAction, IdleAutonomy};
use crate::catalog::ExpressionCatalog;
use crate::clock::{Clock, MonotonicClock};
use crate::error::FaceResult;
use crate::expression::ExpressionId;
use crate::library::{Animation, AnimationLibrary, FaceRenderer};
use crate::machine::target_frame;
use crate::state::{MachineSnapshot, StateInfo};

/// `change_state` 的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
    /// 进入了新表情
    Entered {
        from: ExpressionId,
        to: ExpressionId,
    },
    /// 请求的就是当前表情，什么也没做
    Unchanged,
    /// 未知表情名，状态保持不变
    Rejected { name: String },
}

/// `update` 的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// 保持时长到期，回到空闲
    HoldExpired { from: ExpressionId },
    /// 动画播放完毕，回到空闲
    AnimationCompleted { from: ExpressionId },
    /// 空闲时自动眨眼
    AutoBlink,
    /// 空闲时替换为微动帧
    MicroMovement,
    /// 空闲动画从头循环
    Looped,
    /// 正常推进到指定帧
    Advanced { frame: usize },
    /// 当前动画没有帧，跳过推进
    NoAnimation,
}

/// 表情状态机
///
/// # 使用示例
///
/// ```ignore
/// let library = AnimationLibrary::build(renderer, FaceLayout::default());
/// let mut machine = FaceStateMachine::new(library, ExpressionCatalog::default(), MonotonicClock);
///
/// loop {
///     for name in input.drain() {
///         machine.change_state(&name);
///     }
///     machine.update();
///     display.present(machine.current_frame());
/// }
/// ```
pub struct FaceStateMachine<R: FaceRenderer, C: Clock = MonotonicClock> {
    /// 动画库
    library: AnimationLibrary<R>,
    /// 表情目录（保持时长）
    catalog: ExpressionCatalog,
    /// 时间源
    clock: C,
    /// 空闲自主行为
    autonomy: IdleAutonomy,
    /// 当前表情
    current: ExpressionId,
    /// 上一个表情
    previous: ExpressionId,
    /// 当前播放的动画
    animation: Animation<R::Frame>,
    /// 当前帧
    frame_index: usize,
    /// 进入当前表情的时刻
    state_started: Instant,
    /// 当前动画开始播放的时刻
    animation_started: Instant,
}

impl<R: FaceRenderer, C: Clock> FaceStateMachine<R, C> {
    /// 创建状态机，初始状态为 `idle`
    ///
    /// 自主行为使用默认配置，随机源取自系统熵。
    pub fn new(library: AnimationLibrary<R>, catalog: ExpressionCatalog, clock: C) -> Self {
        let now = clock.now();
        let autonomy = IdleAutonomy::with_defaults(StdRng::from_entropy(), now);
        let animation = library.idle();
        Self {
            library,
            catalog,
            clock,
            autonomy,
            current: ExpressionId::Idle,
            previous: ExpressionId::Idle,
            animation,
            frame_index: 0,
            state_started: now,
            animation_started: now,
        }
    }

    /// 替换自主行为配置与随机源
    ///
    /// 计时器从调用时刻重新开始。
    pub fn with_autonomy(mut self, config: AutonomyConfig, rng: StdRng) -> FaceResult<Self> {
        let (max_x, max_y) = config.micro_offset;
        self.autonomy = IdleAutonomy::new(config, rng, self.clock.now())?;
        self.library.set_micro_range(max_x, max_y);
        Ok(self)
    }

    /// 按外部名称切换表情
    ///
    /// 未知名称不会报错：记录警告并保持当前状态。
    pub fn change_state(&mut self, name: &str) -> StateChange {
        match ExpressionId::parse(name) {
            Ok(id) => self.change_to(id),
            Err(e) => {
                warn!(error = %e, current = %self.current, "未知表情，保持当前状态");
                StateChange::Rejected {
                    name: name.to_string(),
                }
            }
        }
    }

    /// 切换到指定表情
    ///
    /// 切换到当前表情是空操作，不会重置任何计时。
    pub fn change_to(&mut self, id: ExpressionId) -> StateChange {
        if id == self.current {
            return StateChange::Unchanged;
        }

        let from = self.current;
        info!(from = %from, to = %id, "表情切换");

        let now = self.clock.now();
        self.previous = from;
        self.current = id;
        self.state_started = now;
        self.animation = self.library.get(id);
        self.frame_index = 0;
        self.animation_started = now;

        StateChange::Entered { from, to: id }
    }

    /// 每帧调用一次
    ///
    /// 从不失败，也不会 panic。
    pub fn update(&mut self) -> TickOutcome {
        let now = self.clock.now();

        if !self.current.is_idle()
            && let Some(hold) = self.catalog.hold_duration(self.current)
            && now.saturating_duration_since(self.state_started) >= hold
        {
            let from = self.current;
            self.change_to(ExpressionId::Idle);
            return TickOutcome::HoldExpired { from };
        }

        let mut micro_moved = false;
        if self.current.is_idle() {
            match self.autonomy.poll(now) {
                Some(IdleAction::Blink) => {
                    debug!("自动眨眼");
                    self.change_to(ExpressionId::Blink);
                    return TickOutcome::AutoBlink;
                }
                Some(IdleAction::MicroMovement) => {
                    // 不重置 animation_started：微动帧沿用原有的播放进度
                    let frame = self.library.idle_frame_with_micro_movement();
                    self.animation = Animation::single(frame);
                    self.frame_index = 0;
                    micro_moved = true;
                }
                None => {}
            }
        }

        let outcome = self.advance(now);
        if micro_moved {
            TickOutcome::MicroMovement
        } else {
            outcome
        }
    }

    fn advance(&mut self, now: Instant) -> TickOutcome {
        let len = self.animation.len();
        if len == 0 {
            return TickOutcome::NoAnimation;
        }

        let target = target_frame(now.saturating_duration_since(self.animation_started));
        if target < len {
            self.frame_index = target.min(len - 1);
            return TickOutcome::Advanced {
                frame: self.frame_index,
            };
        }

        if self.current.is_idle() {
            self.frame_index = 0;
            self.animation_started = now;
            TickOutcome::Looped
        } else {
            let from = self.current;
            self.change_to(ExpressionId::Idle);
            TickOutcome::AnimationCompleted { from }
        }
    }

    /// 当前应显示的帧
    ///
    /// 帧号无效（例如动画为空）时回退为空闲动画的第一帧。
    pub fn current_frame(&self) -> &R::Frame {
        match self.animation.get(self.frame_index) {
            Some(frame) => frame,
            None => self.library.idle_frame(),
        }
    }

    /// 当前表情
    pub fn current_state(&self) -> ExpressionId {
        self.current
    }

    /// 上一个表情
    pub fn previous_state(&self) -> ExpressionId {
        self.previous
    }

    /// 当前帧号
    pub fn frame_index(&self) -> usize {
        self.frame_index
    }

    /// 表情目录
    pub fn catalog(&self) -> &ExpressionCatalog {
        &self.catalog
    }

    /// 动画库
    pub fn library(&self) -> &AnimationLibrary<R> {
        &self.library
    }

    /// 调试用状态信息
    pub fn state_info(&self) -> StateInfo {
        let now = self.clock.now();
        StateInfo {
            current_state: self.current,
            previous_state: self.previous,
            elapsed_secs: now.saturating_duration_since(self.state_started).as_secs_f64(),
            frame_index: self.frame_index,
            frame_count: self.animation.len(),
            next_auto_blink_secs: self.autonomy.next_blink_in(now).as_secs_f64(),
        }
    }

    /// 计时状态快照
    pub fn snapshot(&self) -> MachineSnapshot {
        MachineSnapshot {
            current_state: self.current,
            previous_state: self.previous,
            frame_index: self.frame_index,
            frame_count: self.animation.len(),
            state_started: self.state_started,
            animation_started: self.animation_started,
        }
    }
}
