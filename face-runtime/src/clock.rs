//! # Clock 模块
//!
//! 时间源抽象。状态机的所有计时（保持时长、播放进度、空闲行为间隔）
//! 都通过 [`Clock`] 读取当前时刻，测试中用 [`ManualClock`] 模拟时间流逝。
//!
//! 时间源必须单调不减：生产环境使用 [`MonotonicClock`]，不要使用墙上时钟。

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// 时间源
pub trait Clock {
    /// 当前时刻
    fn now(&self) -> Instant;

    /// 自 `since` 以来经过的时间（时钟回退时为零）
    fn elapsed_since(&self, since: Instant) -> Duration {
        self.now().saturating_duration_since(since)
    }
}

/// 系统单调时钟
#[derive(Debug, Clone, Copy, Default)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// 手动推进的时钟
///
/// 以创建时刻为基准，只在调用 [`advance`](Self::advance) 或
/// [`set_elapsed`](Self::set_elapsed) 时前进。
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Cell<Duration>,
}

impl ManualClock {
    /// 创建新的手动时钟
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Cell::new(Duration::ZERO),
        }
    }

    /// 前进指定时长
    pub fn advance(&self, by: Duration) {
        self.offset.set(self.offset.get() + by);
    }

    /// 前进指定秒数
    pub fn advance_secs(&self, secs: f64) {
        self.advance(Duration::from_secs_f64(secs));
    }

    /// 设置相对基准的总偏移
    pub fn set_elapsed(&self, elapsed: Duration) {
        self.offset.set(elapsed);
    }

    /// 相对基准的总偏移
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + self.offset.get()
    }
}

impl<C: Clock + ?Sized> Clock for Rc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Instant {
        (**self).now()
    }
}
