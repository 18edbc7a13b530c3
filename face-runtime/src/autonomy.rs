//! # Autonomy 模块
//!
//! 空闲自主行为：只在 `idle` 状态下由状态机每帧轮询一次。
//!
//! - 自动眨眼：间隔在 `blink_interval` 区间内均匀抽样
//! - 微动：间隔在 `micro_interval` 区间内均匀抽样，替换当前帧为轻微偏移的空闲脸
//!
//! 两个计时器互相独立，离开 `idle` 期间也不会重置，
//! 所以回到 `idle` 时一次"欠下的"眨眼会立即触发。

use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{FaceError, FaceResult};

/// 自主行为配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AutonomyConfig {
    /// 自动眨眼间隔区间（秒）
    pub blink_interval: (f64, f64),
    /// 微动间隔区间（秒）
    pub micro_interval: (f64, f64),
    /// 微动最大偏移（像素，x / y），取值 `0..=MAX_MICRO_OFFSET`
    pub micro_offset: (i32, i32),
}

impl Default for AutonomyConfig {
    fn default() -> Self {
        Self {
            blink_interval: (3.0, 8.0),
            micro_interval: (0.5, 2.0),
            micro_offset: (2, 1),
        }
    }
}

/// 微动偏移上限（像素）
pub const MAX_MICRO_OFFSET: i32 = 16;

impl AutonomyConfig {
    /// 验证配置
    pub fn validate(&self) -> FaceResult<()> {
        check_interval("blink_interval", self.blink_interval)?;
        check_interval("micro_interval", self.micro_interval)?;

        let (x, y) = self.micro_offset;
        let range = 0..=MAX_MICRO_OFFSET;
        if !range.contains(&x) || !range.contains(&y) {
            return Err(FaceError::InvalidMicroOffset {
                x,
                y,
                max: MAX_MICRO_OFFSET,
            });
        }
        Ok(())
    }
}

fn check_interval(name: &str, (min, max): (f64, f64)) -> FaceResult<()> {
    // 上界必须能表示为 Duration，之后的抽样才不会溢出
    if 0.0 < min && min < max && Duration::try_from_secs_f64(max).is_ok() {
        Ok(())
    } else {
        Err(FaceError::InvalidInterval {
            name: name.to_string(),
            min,
            max,
        })
    }
}

/// 本帧触发的自主行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdleAction {
    /// 切换到眨眼表情
    Blink,
    /// 替换为一帧微动空闲脸
    MicroMovement,
}

/// 空闲自主行为控制器
#[derive(Debug)]
pub struct IdleAutonomy {
    config: AutonomyConfig,
    rng: StdRng,
    last_blink: Instant,
    blink_interval: Duration,
    last_micro: Instant,
    micro_interval: Duration,
}

impl IdleAutonomy {
    /// 创建控制器，两个计时器都从 `now` 开始
    pub fn new(config: AutonomyConfig, rng: StdRng, now: Instant) -> FaceResult<Self> {
        config.validate()?;
        Ok(Self::start(config, rng, now))
    }

    /// 使用默认配置创建控制器
    pub fn with_defaults(rng: StdRng, now: Instant) -> Self {
        let config = AutonomyConfig::default();
        Self::start(config, rng, now)
    }

    fn start(config: AutonomyConfig, mut rng: StdRng, now: Instant) -> Self {
        let blink_interval = sample(&mut rng, config.blink_interval);
        let micro_interval = sample(&mut rng, config.micro_interval);
        Self {
            config,
            rng,
            last_blink: now,
            blink_interval,
            last_micro: now,
            micro_interval,
        }
    }

    /// 轮询：眨眼优先，触发眨眼的这一帧不再检查微动
    pub fn poll(&mut self, now: Instant) -> Option<IdleAction> {
        if now.saturating_duration_since(self.last_blink) >= self.blink_interval {
            self.last_blink = now;
            self.blink_interval = sample(&mut self.rng, self.config.blink_interval);
            return Some(IdleAction::Blink);
        }

        if now.saturating_duration_since(self.last_micro) >= self.micro_interval {
            self.last_micro = now;
            self.micro_interval = sample(&mut self.rng, self.config.micro_interval);
            return Some(IdleAction::MicroMovement);
        }

        None
    }

    /// 距离下一次自动眨眼的时间（已到期时为零）
    pub fn next_blink_in(&self, now: Instant) -> Duration {
        self.blink_interval
            .saturating_sub(now.saturating_duration_since(self.last_blink))
    }

    /// 距离下一次微动的时间（已到期时为零）
    pub fn next_micro_in(&self, now: Instant) -> Duration {
        self.micro_interval
            .saturating_sub(now.saturating_duration_since(self.last_micro))
    }

    /// 当前配置
    pub fn config(&self) -> &AutonomyConfig {
        &self.config
    }
}

/// 区间已由 `check_interval` 验证
fn sample(rng: &mut StdRng, (min, max): (f64, f64)) -> Duration {
    Duration::try_from_secs_f64(rng.gen_range(min..max)).unwrap_or(Duration::MAX)
}
