//! # Slideshow 模块
//!
//! 表情幻灯片：按固定间隔依次展示全部表情。
//!
//! 只负责"该展示哪一个"，切换表情由调用方交给状态机完成。

use std::time::{Duration, Instant};

use face_runtime::ExpressionId;

/// 幻灯片条目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlideEntry {
    /// 表情
    pub expression: ExpressionId,
    /// 展示名
    pub name: &'static str,
    /// 说明
    pub description: &'static str,
}

const fn slide(
    expression: ExpressionId,
    name: &'static str,
    description: &'static str,
) -> SlideEntry {
    SlideEntry {
        expression,
        name,
        description,
    }
}

/// 展示顺序（按逻辑分组）
pub const SLIDES: [SlideEntry; 25] = [
    // 基础
    slide(ExpressionId::Idle, "Idle", "空闲状态"),
    slide(ExpressionId::Blink, "Blink", "自然眨眼"),
    // 基本情感
    slide(ExpressionId::Happy, "Happy", "弯月眼睛"),
    slide(ExpressionId::Surprised, "Surprised", "眼睛放大"),
    slide(ExpressionId::Confused, "Confused", "左右扫视"),
    slide(ExpressionId::Wink, "Wink", "单眼眨眼"),
    // 方向
    slide(ExpressionId::LookLeft, "Look Left", "向左看"),
    slide(ExpressionId::LookRight, "Look Right", "向右看"),
    slide(ExpressionId::LookUp, "Look Up", "向上看"),
    slide(ExpressionId::LookDown, "Look Down", "向下看"),
    // 创意表情
    slide(ExpressionId::Joy, "Joy", "大笑 + 闪光"),
    slide(ExpressionId::Thinking, "Thinking", "扫视 + 问号"),
    slide(ExpressionId::Angry, "Angry", "眉毛 + 震动"),
    slide(ExpressionId::Sleepy, "Sleepy", "半闭眼 + Z"),
    slide(ExpressionId::SurprisedMouth, "Surprised+", "大眼 + O 嘴"),
    // 高级情感
    slide(ExpressionId::Sadness, "Sadness", "下垂眼 + 泪珠"),
    slide(ExpressionId::Furious, "Furious", "三角眼 + 闪电"),
    slide(ExpressionId::Shy, "Shy", "手遮眼 + 偷看"),
    slide(ExpressionId::Mischievous, "Mischievous", "眨眼 + 挑眉"),
    slide(ExpressionId::Bored, "Bored", "眼皮下垂 + 哈欠"),
    slide(ExpressionId::Excited, "Excited", "跳动 + 心形"),
    slide(ExpressionId::Fear, "Fear", "椭圆眼 + 颤抖"),
    slide(ExpressionId::Focused, "Focused", "八字眉 + 聚焦框"),
    slide(ExpressionId::Puzzled, "Puzzled", "眼球乱动 + 问号"),
    slide(ExpressionId::Triumphant, "Triumphant", "点头 + 皇冠"),
];

/// 幻灯片播放器
#[derive(Debug, Clone)]
pub struct Slideshow {
    index: usize,
    interval: Duration,
    paused: bool,
    last_switch: Instant,
}

impl Slideshow {
    /// 从第一个条目开始
    pub fn new(interval: Duration, start_paused: bool, now: Instant) -> Self {
        Self {
            index: 0,
            interval,
            paused: start_paused,
            last_switch: now,
        }
    }

    /// 当前条目
    pub fn current(&self) -> &'static SlideEntry {
        &SLIDES[self.index]
    }

    /// 当前序号（从 0 开始）
    pub fn index(&self) -> usize {
        self.index
    }

    /// 条目总数
    pub fn len(&self) -> usize {
        SLIDES.len()
    }

    /// 是否没有条目
    pub fn is_empty(&self) -> bool {
        SLIDES.is_empty()
    }

    /// 是否暂停
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// 到时间就切换到下一个，返回新条目
    pub fn update(&mut self, now: Instant) -> Option<&'static SlideEntry> {
        if self.paused || now.saturating_duration_since(self.last_switch) < self.interval {
            return None;
        }
        Some(self.next(now))
    }

    /// 下一个（循环）
    pub fn next(&mut self, now: Instant) -> &'static SlideEntry {
        self.jump((self.index + 1) % SLIDES.len(), now)
    }

    /// 上一个（循环）
    pub fn previous(&mut self, now: Instant) -> &'static SlideEntry {
        self.jump((self.index + SLIDES.len() - 1) % SLIDES.len(), now)
    }

    fn jump(&mut self, index: usize, now: Instant) -> &'static SlideEntry {
        self.index = index;
        self.last_switch = now;
        self.current()
    }

    /// 暂停 / 继续，返回切换后是否暂停
    ///
    /// 继续时重新计时。
    pub fn toggle_pause(&mut self, now: Instant) -> bool {
        self.paused = !self.paused;
        if !self.paused {
            self.last_switch = now;
        }
        self.paused
    }

    /// 当前条目的展示进度，范围 [0, 1]
    pub fn progress(&self, now: Instant) -> f32 {
        if self.interval.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.last_switch);
        (elapsed.as_secs_f32() / self.interval.as_secs_f32()).min(1.0)
    }

    /// `"[ 3/25] Happy - 弯月眼睛"` 形式的标签
    pub fn label(&self) -> String {
        let entry = self.current();
        format!(
            "[{:2}/{:2}] {} - {}",
            self.index + 1,
            SLIDES.len(),
            entry.name,
            entry.description
        )
    }
}
