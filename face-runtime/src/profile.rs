//! # Profile 模块
//!
//! 表情动画的数据表。
//!
//! 每个表情由一条 [`ExpressionProfile`] 描述：帧数、强度包络、眼睛样式、
//! 运动列表、嘴巴与装饰规则。[`crate::synth::synthesize`] 逐帧求值这些数据，
//! 不存在按表情分派的绘制函数。新增表情只需要在 [`PROFILES`] 里加一行。
//!
//! ## 坐标约定
//!
//! 偏移量单位为像素，x 向右、y 向下；帧号从 0 开始。

use crate::easing::Easing;
use crate::expression::ExpressionId;
use crate::face::{Glyph, MouthKind, Side, Vec2};

/// 表情动画配置
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpressionProfile {
    /// 对应的表情
    pub id: ExpressionId,
    /// 帧数（15fps 播放）
    pub frame_count: usize,
    /// 强度包络
    pub envelope: Envelope,
    /// 眼睛样式
    pub eyes: EyeStyle,
    /// 运动
    pub motions: &'static [MotionSpec],
    /// 嘴巴
    pub mouth: Option<MouthSpec>,
    /// 装饰
    pub decorations: &'static [DecorationRule],
}

impl ExpressionProfile {
    /// 按 15fps 播放完所有帧所需的秒数
    pub fn playback_secs(&self) -> f64 {
        self.frame_count as f64 / crate::machine::PLAYBACK_FPS as f64
    }
}

/// 强度包络：把帧号映射为 0.0 - 1.0 的强度 `level`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Envelope {
    /// 恒为 1
    Constant,
    /// 在前 `frames` 帧内从 0 升到 1，之后保持
    Ramp { frames: usize, easing: Easing },
    /// 前半段线性升到 1，后半段线性回落
    Triangle,
    /// 进入 → 保持 → 退出
    ///
    /// 第 `rise_end` 帧到达 1（`rise_end` 为 0 表示瞬间到达），
    /// 从 `fall_start` 帧开始回落，最后一帧回到 0。
    Phased {
        rise_end: usize,
        rise: Easing,
        fall_start: usize,
        fall: Easing,
    },
    /// 线性升到 1 后缓慢回落到 `rest`
    Settle { rise_end: usize, rest: f32 },
}

impl Envelope {
    /// 计算第 `frame` 帧的强度
    pub fn level(&self, frame: usize, frame_count: usize) -> f32 {
        let last = frame_count.saturating_sub(1);
        match *self {
            Envelope::Constant => 1.0,
            Envelope::Ramp { frames, easing } => easing.apply(ratio(frame, frames)),
            Envelope::Triangle => {
                let half = (frame_count / 2).max(1);
                if frame <= half {
                    ratio(frame, half)
                } else {
                    ratio(frame_count - frame, half)
                }
            }
            Envelope::Phased {
                rise_end,
                rise,
                fall_start,
                fall,
            } => {
                if frame >= fall_start {
                    let t = ratio(frame - fall_start, last.saturating_sub(fall_start));
                    1.0 - fall.apply(t)
                } else if frame <= rise_end {
                    rise.apply(ratio(frame, rise_end))
                } else {
                    1.0
                }
            }
            Envelope::Settle { rise_end, rest } => {
                if frame <= rise_end {
                    ratio(frame, rise_end)
                } else {
                    let t = ratio(frame - rise_end, last.saturating_sub(rise_end));
                    Easing::Linear.interpolate(t, 1.0, rest)
                }
            }
        }
    }
}

/// `num / den`，分母为 0 时视为已完成
fn ratio(num: usize, den: usize) -> f32 {
    if den == 0 {
        1.0
    } else {
        (num as f32 / den as f32).clamp(0.0, 1.0)
    }
}

/// 眼睑作用的眼睛
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidSide {
    Both,
    Only(Side),
}

/// 眼睑闭合曲线
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LidCurve {
    /// 闭合程度等于包络强度
    Envelope,
    /// 每 `period` 帧的前 `closing` 帧内逐渐闭合，之后立即睁开
    Cycle { period: usize, closing: usize },
}

/// 眼睛样式
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EyeStyle {
    /// 普通睁眼，按比例缩放
    Open { scale: f32 },
    /// 眼睑闭合（眨眼）
    Lid { side: LidSide, curve: LidCurve },
    /// 弯月眼：强度未满时压扁睁眼，满强度时变为弧线
    Crescent { arc_height: f32, drop: f32 },
    /// 放大的空心眼，强度决定放大程度
    Wide { scale: f32 },
    /// 带倾斜眉毛的眼睛，强度低于一半时恢复普通
    Browed { slant: f32 },
    /// 周期性下垂的半闭眼
    ///
    /// 周期内进度 `c < split` 时开合度为 `from - droop * c`，
    /// 否则为 `reopen_base + reopen_rate * (c - split)`。
    Drowsy {
        period: usize,
        split: f32,
        from: f32,
        droop: f32,
        reopen_base: f32,
        reopen_rate: f32,
    },
    /// 下垂弧线
    Droop,
    /// 倒三角
    Triangle,
    /// 横向拉长的空心眼 + 向内聚拢的小瞳孔
    Fearful,
    /// 手掌遮眼并偷看
    Covered(CoverSpec),
}

/// 手掌遮眼的阶段参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverSpec {
    /// 被遮挡的眼睛
    pub side: Side,
    /// 手掌大小
    pub size: f32,
    /// 手掌出现的帧
    pub raise_from: usize,
    /// 完全遮挡阶段 `[cover_from, cover_to]`
    pub cover_from: usize,
    pub cover_to: usize,
    /// 偷看节奏：每 `peek_period` 帧为一拍，每 `peek_every` 拍偷看一次
    pub peek_period: usize,
    pub peek_every: usize,
    /// 移开手掌时的水平位移
    pub withdraw: f32,
}

/// 运动作用对象
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// 两只眼睛
    Eyes,
    /// 单只眼睛
    Eye(Side),
    /// 嘴巴
    Mouth,
    /// 眼睛与嘴巴
    Face,
}

/// 正弦波形
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    /// 完整正弦周期
    Full,
    /// 每个周期只取正半波
    Half,
}

/// 运动
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Motion {
    /// 朝固定方向偏移，幅度随包络强度变化
    Toward { dx: f32, dy: f32 },
    /// 两眼向中线聚拢
    Converge { px: f32 },
    /// 水平摆动
    Sway {
        amplitude: f32,
        period: usize,
        wave: Wave,
    },
    /// 随机抖动（构建期抽样）
    ///
    /// 在 `[from, to]` 帧内以 `chance` 概率产生 `±magnitude` 的整数偏移。
    Jitter {
        magnitude: i32,
        chance: f32,
        from: usize,
        to: usize,
    },
    /// 竖直跳动：`sin(frame * rate) * amplitude`
    Bounce { rate: f32, amplitude: f32 },
    /// 周期点头
    Nod { period: usize, amplitude: f32 },
    /// 李萨如式游走
    Wander {
        rate: f32,
        phase: f32,
        x_amp: f32,
        y_rate: f32,
        y_amp: f32,
    },
}

/// 运动 + 作用对象
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSpec {
    pub motion: Motion,
    pub target: Target,
}

/// 嘴巴强度来源
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MouthIntensity {
    /// 固定值
    Fixed(f32),
    /// 包络强度乘以系数
    Level(f32),
    /// 从 `start` 帧起用 `frames` 帧线性升到 1
    Ramp { start: usize, frames: usize },
}

/// 嘴巴规则
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouthSpec {
    pub kind: MouthKind,
    pub intensity: MouthIntensity,
}

/// 装饰锚点
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// 眼睛中心
    Eye(Side),
    /// 画面中线、眼睛所在行
    Brow,
}

/// 装饰触发条件
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Trigger {
    /// 每一帧
    Always,
    /// 仅指定帧
    Frame(usize),
    /// 从指定帧开始
    From(usize),
    /// `frame % period` 落在 `[from, to)` 内
    Cycle { period: usize, from: usize, to: usize },
    /// 超过 `after` 帧后每 `period` 帧一次
    Every { period: usize, after: usize },
    /// 在 `[from, to]` 帧内以概率 `p` 出现（构建期抽样）
    Chance { p: f32, from: usize, to: usize },
    /// 当帧发生抖动时
    OnJitter,
}

/// 装饰漂移：位置随帧数线性移动
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Drift {
    None,
    /// 从触发起始帧开始每帧移动 `step`
    SinceStart { step: Vec2 },
    /// 每帧移动 `step`，每 `wrap` 帧回到起点
    Wrapping { step: Vec2, wrap: usize },
}

/// 装饰规则
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecorationRule {
    pub glyph: Glyph,
    pub anchor: Anchor,
    pub offset: Vec2,
    pub size: f32,
    pub trigger: Trigger,
    pub drift: Drift,
    /// 是否跟随眼睛的运动偏移
    pub follows_motion: bool,
}

impl DecorationRule {
    const fn new(glyph: Glyph, anchor: Anchor, offset: Vec2, size: f32, trigger: Trigger) -> Self {
        Self {
            glyph,
            anchor,
            offset,
            size,
            trigger,
            drift: Drift::None,
            follows_motion: false,
        }
    }

    const fn drifting(mut self, drift: Drift) -> Self {
        self.drift = drift;
        self
    }

    const fn following(mut self) -> Self {
        self.follows_motion = true;
        self
    }
}

const L: Anchor = Anchor::Eye(Side::Left);
const R: Anchor = Anchor::Eye(Side::Right);
const BROW: Anchor = Anchor::Brow;

const fn at(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

const fn motion(motion: Motion, target: Target) -> MotionSpec {
    MotionSpec { motion, target }
}

const fn mouth(kind: MouthKind, intensity: MouthIntensity) -> Option<MouthSpec> {
    Some(MouthSpec { kind, intensity })
}

const fn plain(
    id: ExpressionId,
    frame_count: usize,
    envelope: Envelope,
    eyes: EyeStyle,
) -> ExpressionProfile {
    ExpressionProfile {
        id,
        frame_count,
        envelope,
        eyes,
        motions: &[],
        mouth: None,
        decorations: &[],
    }
}

const OPEN: EyeStyle = EyeStyle::Open { scale: 1.0 };

const fn look(id: ExpressionId, motions: &'static [MotionSpec]) -> ExpressionProfile {
    ExpressionProfile {
        motions,
        ..plain(id, 30, Envelope::Triangle, OPEN)
    }
}

const fn toward(dx: f32, dy: f32) -> MotionSpec {
    motion(Motion::Toward { dx, dy }, Target::Eyes)
}

/// 所有表情的动画配置，顺序与 [`ExpressionId::ALL`] 一致
pub static PROFILES: [ExpressionProfile; 25] = [
    plain(ExpressionId::Idle, 1, Envelope::Constant, OPEN),
    plain(
        ExpressionId::Happy,
        20,
        Envelope::Ramp {
            frames: 10,
            easing: Easing::Linear,
        },
        EyeStyle::Crescent {
            arc_height: 24.0,
            drop: 0.0,
        },
    ),
    ExpressionProfile {
        mouth: mouth(MouthKind::Round, MouthIntensity::Level(1.0)),
        decorations: &[
            DecorationRule::new(Glyph::RadialLines, L, at(0.0, 0.0), 80.0, Trigger::Frame(0)),
            DecorationRule::new(Glyph::RadialLines, R, at(0.0, 0.0), 80.0, Trigger::Frame(0)),
        ],
        ..plain(
            ExpressionId::Surprised,
            11,
            Envelope::Phased {
                rise_end: 0,
                rise: Easing::Linear,
                fall_start: 6,
                fall: Easing::Linear,
            },
            EyeStyle::Wide { scale: 1.5 },
        )
    },
    ExpressionProfile {
        motions: &[motion(
            Motion::Sway {
                amplitude: 15.0,
                period: 20,
                wave: Wave::Full,
            },
            Target::Eyes,
        )],
        ..plain(ExpressionId::Confused, 40, Envelope::Constant, OPEN)
    },
    plain(
        ExpressionId::Wink,
        15,
        Envelope::Triangle,
        EyeStyle::Lid {
            side: LidSide::Only(Side::Left),
            curve: LidCurve::Envelope,
        },
    ),
    look(ExpressionId::LookLeft, &[toward(-30.0, 0.0)]),
    look(ExpressionId::LookRight, &[toward(30.0, 0.0)]),
    look(ExpressionId::LookUp, &[toward(0.0, -20.0)]),
    look(ExpressionId::LookDown, &[toward(0.0, 20.0)]),
    plain(
        ExpressionId::Blink,
        12,
        Envelope::Triangle,
        EyeStyle::Lid {
            side: LidSide::Both,
            curve: LidCurve::Envelope,
        },
    ),
    ExpressionProfile {
        mouth: mouth(MouthKind::BigSmile, MouthIntensity::Level(1.0)),
        decorations: &[
            DecorationRule::new(Glyph::Sparkle, L, at(-50.0, -15.0), 16.0, Trigger::Frame(10)),
            DecorationRule::new(Glyph::Sparkle, R, at(50.0, -20.0), 12.0, Trigger::Frame(10)),
        ],
        ..plain(
            ExpressionId::Joy,
            21,
            Envelope::Phased {
                rise_end: 5,
                rise: Easing::EaseOut,
                fall_start: 16,
                fall: Easing::EaseIn,
            },
            EyeStyle::Crescent {
                arc_height: 50.0,
                drop: 20.0,
            },
        )
    },
    ExpressionProfile {
        motions: &[
            toward(15.0, 0.0),
            motion(Motion::Converge { px: 3.0 }, Target::Eyes),
        ],
        mouth: mouth(MouthKind::Wavy, MouthIntensity::Level(0.8)),
        decorations: &[DecorationRule::new(
            Glyph::Question,
            BROW,
            at(80.0, -50.0),
            25.0,
            Trigger::Chance {
                p: 0.1,
                from: 4,
                to: 15,
            },
        )],
        ..plain(
            ExpressionId::Thinking,
            21,
            Envelope::Phased {
                rise_end: 3,
                rise: Easing::EaseIn,
                fall_start: 16,
                fall: Easing::EaseIn,
            },
            OPEN,
        )
    },
    ExpressionProfile {
        motions: &[motion(
            Motion::Jitter {
                magnitude: 5,
                chance: 0.2,
                from: 4,
                to: 15,
            },
            Target::Eyes,
        )],
        mouth: mouth(MouthKind::Frown, MouthIntensity::Level(1.0)),
        decorations: &[
            DecorationRule::new(Glyph::Lightning, L, at(-20.0, -60.0), 25.0, Trigger::OnJitter),
            DecorationRule::new(Glyph::Lightning, R, at(20.0, -55.0), 28.0, Trigger::OnJitter),
        ],
        ..plain(
            ExpressionId::Angry,
            21,
            Envelope::Phased {
                rise_end: 3,
                rise: Easing::EaseIn,
                fall_start: 16,
                fall: Easing::Linear,
            },
            EyeStyle::Browed { slant: 10.0 },
        )
    },
    ExpressionProfile {
        mouth: mouth(MouthKind::Straight, MouthIntensity::Fixed(0.6)),
        decorations: &[
            DecorationRule::new(
                Glyph::Z,
                BROW,
                at(80.0, -60.0),
                20.0,
                Trigger::Cycle {
                    period: 16,
                    from: 0,
                    to: 8,
                },
            )
            .drifting(Drift::Wrapping {
                step: at(0.0, 3.0),
                wrap: 8,
            }),
            DecorationRule::new(
                Glyph::Zz,
                BROW,
                at(90.0, -50.0),
                18.0,
                Trigger::Cycle {
                    period: 16,
                    from: 8,
                    to: 16,
                },
            )
            .drifting(Drift::Wrapping {
                step: at(0.0, 2.0),
                wrap: 8,
            }),
        ],
        ..plain(
            ExpressionId::Sleepy,
            40,
            Envelope::Constant,
            EyeStyle::Drowsy {
                period: 20,
                split: 0.7,
                from: 0.4,
                droop: 0.1,
                reopen_base: 0.2,
                reopen_rate: 0.4,
            },
        )
    },
    ExpressionProfile {
        mouth: mouth(
            MouthKind::Round,
            MouthIntensity::Ramp {
                start: 0,
                frames: 8,
            },
        ),
        ..plain(
            ExpressionId::SurprisedMouth,
            20,
            Envelope::Settle {
                rise_end: 5,
                rest: 0.625,
            },
            EyeStyle::Wide { scale: 1.8 },
        )
    },
    ExpressionProfile {
        mouth: mouth(MouthKind::Frown, MouthIntensity::Fixed(0.8)),
        decorations: &[
            DecorationRule::new(Glyph::Teardrop, L, at(-15.0, 25.0), 6.0, Trigger::From(10))
                .drifting(Drift::SinceStart {
                    step: at(0.0, 100.0 / 35.0),
                }),
            DecorationRule::new(Glyph::Teardrop, R, at(15.0, 25.0), 6.0, Trigger::From(15))
                .drifting(Drift::SinceStart {
                    step: at(0.0, 100.0 / 30.0),
                }),
        ],
        ..plain(ExpressionId::Sadness, 45, Envelope::Constant, EyeStyle::Droop)
    },
    ExpressionProfile {
        motions: &[motion(
            Motion::Jitter {
                magnitude: 8,
                chance: 1.0,
                from: 6,
                to: 34,
            },
            Target::Eyes,
        )],
        mouth: mouth(
            MouthKind::Roar,
            MouthIntensity::Ramp {
                start: 3,
                frames: 8,
            },
        ),
        decorations: &[
            DecorationRule::new(
                Glyph::Lightning,
                L,
                at(-20.0, -60.0),
                25.0,
                Trigger::Every {
                    period: 3,
                    after: 8,
                },
            ),
            DecorationRule::new(
                Glyph::Lightning,
                R,
                at(20.0, -55.0),
                28.0,
                Trigger::Every {
                    period: 3,
                    after: 8,
                },
            ),
        ],
        ..plain(ExpressionId::Furious, 35, Envelope::Constant, EyeStyle::Triangle)
    },
    ExpressionProfile {
        mouth: mouth(MouthKind::Smile, MouthIntensity::Fixed(0.6)),
        ..plain(
            ExpressionId::Shy,
            50,
            Envelope::Constant,
            EyeStyle::Covered(CoverSpec {
                side: Side::Left,
                size: 45.0,
                raise_from: 4,
                cover_from: 11,
                cover_to: 35,
                peek_period: 8,
                peek_every: 3,
                withdraw: 30.0,
            }),
        )
    },
    ExpressionProfile {
        mouth: mouth(MouthKind::Smile, MouthIntensity::Fixed(0.7)),
        decorations: &[
            DecorationRule::new(
                Glyph::Brow { tilt: -13.0 },
                R,
                at(0.0, -58.5),
                90.0,
                Trigger::Always,
            ),
            DecorationRule::new(
                Glyph::Star,
                L,
                at(-30.0, -30.0),
                10.0,
                Trigger::Cycle {
                    period: 12,
                    from: 3,
                    to: 4,
                },
            ),
        ],
        ..plain(
            ExpressionId::Mischievous,
            30,
            Envelope::Constant,
            EyeStyle::Lid {
                side: LidSide::Only(Side::Left),
                curve: LidCurve::Cycle {
                    period: 12,
                    closing: 3,
                },
            },
        )
    },
    ExpressionProfile {
        motions: &[motion(
            Motion::Sway {
                amplitude: 15.0,
                period: 30,
                wave: Wave::Half,
            },
            Target::Mouth,
        )],
        mouth: mouth(MouthKind::Straight, MouthIntensity::Fixed(0.5)),
        ..plain(
            ExpressionId::Bored,
            60,
            Envelope::Constant,
            EyeStyle::Drowsy {
                period: 20,
                split: 0.8,
                from: 0.7,
                droop: 0.4,
                reopen_base: 0.3,
                reopen_rate: 2.0,
            },
        )
    },
    ExpressionProfile {
        motions: &[motion(
            Motion::Bounce {
                rate: 0.8,
                amplitude: 8.0,
            },
            Target::Face,
        )],
        mouth: mouth(MouthKind::BigSmile, MouthIntensity::Fixed(1.0)),
        decorations: &[
            DecorationRule::new(
                Glyph::Heart,
                L,
                at(-60.0, -50.0),
                16.0,
                Trigger::Cycle {
                    period: 8,
                    from: 0,
                    to: 3,
                },
            )
            .following(),
            DecorationRule::new(
                Glyph::Heart,
                R,
                at(60.0, -45.0),
                12.0,
                Trigger::Cycle {
                    period: 8,
                    from: 0,
                    to: 3,
                },
            )
            .following(),
        ],
        ..plain(
            ExpressionId::Excited,
            40,
            Envelope::Constant,
            EyeStyle::Open { scale: 1.1 },
        )
    },
    ExpressionProfile {
        motions: &[motion(
            Motion::Jitter {
                magnitude: 6,
                chance: 1.0,
                from: 0,
                to: 44,
            },
            Target::Face,
        )],
        mouth: mouth(MouthKind::Round, MouthIntensity::Fixed(0.6)),
        decorations: &[
            DecorationRule::new(
                Glyph::FearLines,
                L,
                at(0.0, 0.0),
                55.0,
                Trigger::Cycle {
                    period: 4,
                    from: 0,
                    to: 2,
                },
            )
            .following(),
            DecorationRule::new(
                Glyph::FearLines,
                R,
                at(0.0, 0.0),
                55.0,
                Trigger::Cycle {
                    period: 4,
                    from: 0,
                    to: 2,
                },
            )
            .following(),
        ],
        ..plain(ExpressionId::Fear, 45, Envelope::Constant, EyeStyle::Fearful)
    },
    ExpressionProfile {
        mouth: mouth(MouthKind::Straight, MouthIntensity::Fixed(0.8)),
        decorations: &[
            DecorationRule::new(
                Glyph::Brow { tilt: 10.0 },
                L,
                at(-5.0, -40.0),
                40.0,
                Trigger::Always,
            ),
            DecorationRule::new(
                Glyph::Brow { tilt: -10.0 },
                R,
                at(5.0, -40.0),
                40.0,
                Trigger::Always,
            ),
            DecorationRule::new(
                Glyph::FocusFrame,
                BROW,
                at(0.0, 20.0),
                200.0,
                Trigger::From(10),
            ),
        ],
        ..plain(ExpressionId::Focused, 50, Envelope::Constant, OPEN)
    },
    ExpressionProfile {
        motions: &[
            motion(
                Motion::Wander {
                    rate: 0.3,
                    phase: 0.0,
                    x_amp: 20.0,
                    y_rate: 1.3,
                    y_amp: 12.0,
                },
                Target::Eye(Side::Left),
            ),
            motion(
                Motion::Wander {
                    rate: 0.7,
                    phase: std::f32::consts::FRAC_PI_3,
                    x_amp: 18.0,
                    y_rate: 0.8,
                    y_amp: 15.0,
                },
                Target::Eye(Side::Right),
            ),
        ],
        mouth: mouth(MouthKind::Wavy, MouthIntensity::Fixed(1.2)),
        decorations: &[
            DecorationRule::new(
                Glyph::Question,
                BROW,
                at(70.0, -60.0),
                20.0,
                Trigger::Cycle {
                    period: 10,
                    from: 0,
                    to: 4,
                },
            ),
            DecorationRule::new(
                Glyph::Question,
                BROW,
                at(-70.0, -55.0),
                18.0,
                Trigger::Cycle {
                    period: 12,
                    from: 0,
                    to: 3,
                },
            ),
            DecorationRule::new(
                Glyph::Ellipsis,
                BROW,
                at(0.0, -80.0),
                16.0,
                Trigger::Cycle {
                    period: 15,
                    from: 0,
                    to: 2,
                },
            ),
        ],
        ..plain(ExpressionId::Puzzled, 55, Envelope::Constant, OPEN)
    },
    ExpressionProfile {
        motions: &[
            motion(
                Motion::Nod {
                    period: 16,
                    amplitude: 6.0,
                },
                Target::Face,
            ),
            toward(0.0, -3.0),
        ],
        mouth: mouth(MouthKind::BigSmile, MouthIntensity::Fixed(1.0)),
        decorations: &[
            DecorationRule::new(
                Glyph::Crown,
                BROW,
                at(0.0, -80.0),
                25.0,
                Trigger::Cycle {
                    period: 20,
                    from: 0,
                    to: 8,
                },
            )
            .following(),
            DecorationRule::new(
                Glyph::Trophy,
                BROW,
                at(-40.0, -75.0),
                20.0,
                Trigger::Cycle {
                    period: 20,
                    from: 8,
                    to: 16,
                },
            )
            .following(),
            DecorationRule::new(
                Glyph::Trophy,
                BROW,
                at(40.0, -70.0),
                18.0,
                Trigger::Cycle {
                    period: 20,
                    from: 8,
                    to: 16,
                },
            )
            .following(),
            DecorationRule::new(
                Glyph::Star,
                L,
                at(-80.0, -40.0),
                8.0,
                Trigger::Cycle {
                    period: 6,
                    from: 0,
                    to: 2,
                },
            ),
            DecorationRule::new(
                Glyph::Star,
                R,
                at(80.0, -35.0),
                10.0,
                Trigger::Cycle {
                    period: 6,
                    from: 0,
                    to: 2,
                },
            ),
        ],
        ..plain(ExpressionId::Triumphant, 45, Envelope::Constant, OPEN)
    },
];

/// 查询表情的动画配置
pub fn profile(id: ExpressionId) -> &'static ExpressionProfile {
    &PROFILES[id as usize]
}
