//! # Synth 模块
//!
//! 通用动画合成：逐帧求值 [`ExpressionProfile`]，产出 [`FaceParams`] 序列。
//!
//! 随机决策（抖动、概率装饰）只在这里、只在构建期抽样；
//! 同一个种子总是得到同一组帧。

use std::f32::consts::{PI, TAU};

use rand::Rng;

use crate::easing::Easing;
use crate::face::{Decoration, Eye, EyeShape, FaceLayout, FaceParams, Glyph, Mouth, Side, Vec2};
use crate::profile::{
    Anchor, CoverSpec, DecorationRule, Drift, ExpressionProfile, EyeStyle, LidCurve, LidSide,
    Motion, MotionSpec, MouthIntensity, MouthSpec, Target, Trigger, Wave,
};

/// 眼高低于该值时视为闭眼
const MIN_VISIBLE_EYE_HEIGHT: f32 = 2.0;

/// 合成一个表情的全部帧
pub fn synthesize<R: Rng + ?Sized>(
    profile: &ExpressionProfile,
    layout: &FaceLayout,
    rng: &mut R,
) -> Vec<FaceParams> {
    (0..profile.frame_count)
        .map(|frame| synthesize_frame(profile, layout, frame, rng))
        .collect()
}

/// 空闲脸（整体偏移 `offset`，用于空闲微动）
pub fn idle_params(layout: &FaceLayout, offset: Vec2) -> FaceParams {
    let mut face = FaceParams::neutral(layout);
    face.left_eye.center = face.left_eye.center + offset;
    face.right_eye.center = face.right_eye.center + offset;
    face
}

/// 单帧内累积的运动偏移
#[derive(Debug, Default, Clone, Copy)]
struct MotionState {
    left: Vec2,
    right: Vec2,
    mouth: Vec2,
    jittered: bool,
}

impl MotionState {
    fn add(&mut self, target: Target, delta: Vec2) {
        match target {
            Target::Eyes => {
                self.left = self.left + delta;
                self.right = self.right + delta;
            }
            Target::Eye(Side::Left) => self.left = self.left + delta,
            Target::Eye(Side::Right) => self.right = self.right + delta,
            Target::Mouth => self.mouth = self.mouth + delta,
            Target::Face => {
                self.left = self.left + delta;
                self.right = self.right + delta;
                self.mouth = self.mouth + delta;
            }
        }
    }

    fn eye(&self, side: Side) -> Vec2 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

fn synthesize_frame<R: Rng + ?Sized>(
    profile: &ExpressionProfile,
    layout: &FaceLayout,
    frame: usize,
    rng: &mut R,
) -> FaceParams {
    let level = profile.envelope.level(frame, profile.frame_count);

    let mut motion = MotionState::default();
    for spec in profile.motions {
        apply_motion(spec, frame, level, rng, &mut motion);
    }

    let mut face = FaceParams::neutral(layout);
    shape_eyes(&profile.eyes, frame, profile.frame_count, level, layout, &mut face);
    face.left_eye.center = face.left_eye.center + motion.left;
    face.right_eye.center = face.right_eye.center + motion.right;

    face.mouth = profile
        .mouth
        .and_then(|spec| shape_mouth(&spec, frame, level, layout, motion.mouth));

    for rule in profile.decorations {
        if !fires(&rule.trigger, frame, motion.jittered, rng) {
            continue;
        }
        let decoration = place(rule, frame, layout, &motion);
        // 漂出画面底部的装饰不再绘制
        if decoration.position.y < layout.height as f32 {
            face.decorations.push(decoration);
        }
    }

    face
}

fn apply_motion<R: Rng + ?Sized>(
    spec: &MotionSpec,
    frame: usize,
    level: f32,
    rng: &mut R,
    state: &mut MotionState,
) {
    let f = frame as f32;
    match spec.motion {
        Motion::Toward { dx, dy } => state.add(spec.target, Vec2::new(dx, dy) * level),
        Motion::Converge { px } => {
            state.left.x += px;
            state.right.x -= px;
        }
        Motion::Sway {
            amplitude,
            period,
            wave,
        } => {
            let period = period.max(1) as f32;
            let x = match wave {
                Wave::Full => (TAU * f / period).sin(),
                Wave::Half => (PI * (f % period) / period).sin(),
            };
            state.add(spec.target, Vec2::new(x * amplitude, 0.0));
        }
        Motion::Jitter {
            magnitude,
            chance,
            from,
            to,
        } => {
            if (from..=to).contains(&frame) && rng.r#gen::<f32>() < chance {
                let x = rng.gen_range(-magnitude..=magnitude);
                let y = rng.gen_range(-magnitude..=magnitude);
                state.add(spec.target, Vec2::new(x as f32, y as f32));
                state.jittered = true;
            }
        }
        Motion::Bounce { rate, amplitude } => {
            state.add(spec.target, Vec2::new(0.0, (f * rate).sin() * amplitude));
        }
        Motion::Nod { period, amplitude } => {
            let period = period.max(1);
            let phase = (frame % period) as f32 / period as f32;
            state.add(spec.target, Vec2::new(0.0, (phase * TAU).sin() * amplitude));
        }
        Motion::Wander {
            rate,
            phase,
            x_amp,
            y_rate,
            y_amp,
        } => {
            let p = f * rate + phase;
            state.add(
                spec.target,
                Vec2::new(p.cos() * x_amp, (p * y_rate).sin() * y_amp),
            );
        }
    }
}

fn shape_eyes(
    style: &EyeStyle,
    frame: usize,
    frame_count: usize,
    level: f32,
    layout: &FaceLayout,
    face: &mut FaceParams,
) {
    let (w, h) = (layout.eye_width, layout.eye_height);

    for side in [Side::Left, Side::Right] {
        let center = layout.eye(side);
        let eye = match *style {
            EyeStyle::Open { scale } => Eye::open(center, w * scale, h * scale),
            EyeStyle::Lid { side: lid, curve } => {
                let applies = match lid {
                    LidSide::Both => true,
                    LidSide::Only(only) => only == side,
                };
                let closed = if applies {
                    match curve {
                        LidCurve::Envelope => level,
                        LidCurve::Cycle { period, closing } => {
                            let c = frame % period.max(1);
                            if c < closing {
                                c as f32 / closing as f32
                            } else {
                                0.0
                            }
                        }
                    }
                } else {
                    0.0
                };
                lidded(center, w, h * (1.0 - closed))
            }
            EyeStyle::Crescent { arc_height, drop } => {
                if level >= 1.0 {
                    Eye {
                        center: center + Vec2::new(0.0, drop),
                        width: w,
                        height: arc_height,
                        shape: EyeShape::Arc,
                    }
                } else {
                    let height = Easing::Linear.interpolate(level, h, arc_height);
                    Eye::open(center + Vec2::new(0.0, drop * level), w, height)
                }
            }
            EyeStyle::Wide { scale } => {
                if level <= 0.0 {
                    Eye::open(center, w, h)
                } else {
                    let s = Easing::Linear.interpolate(level, 1.0, scale);
                    let (sw, sh) = (w * s, h * s);
                    Eye {
                        center,
                        width: sw,
                        height: sh,
                        shape: EyeShape::Ring {
                            pupil: sw.min(sh) * 0.3,
                            pupil_shift: 0.0,
                        },
                    }
                }
            }
            EyeStyle::Browed { slant } => {
                let eye = Eye::open(center, w, h);
                if level >= 0.5 {
                    eye.with_shape(EyeShape::Browed {
                        slant: slant * side.inward(),
                    })
                } else {
                    eye
                }
            }
            EyeStyle::Drowsy {
                period,
                split,
                from,
                droop,
                reopen_base,
                reopen_rate,
            } => {
                let period = period.max(1);
                let c = (frame % period) as f32 / period as f32;
                let openness = if c < split {
                    from - droop * c
                } else {
                    reopen_base + reopen_rate * (c - split)
                };
                Eye::open(center, w, h * openness)
            }
            EyeStyle::Droop => Eye::open(center, w, h).with_shape(EyeShape::Droop),
            EyeStyle::Triangle => Eye::open(center, w, h).with_shape(EyeShape::Triangle),
            EyeStyle::Fearful => {
                let (fw, fh) = (w * 1.3, h * 0.8);
                Eye {
                    center,
                    width: fw,
                    height: fh,
                    shape: EyeShape::Ring {
                        pupil: (fw.min(fh) * 0.2).max(8.0),
                        pupil_shift: 8.0 * side.inward(),
                    },
                }
            }
            EyeStyle::Covered(spec) => {
                let eye = Eye::open(center, w, h);
                if side == spec.side {
                    cover(&spec, frame, frame_count, eye, face)
                } else {
                    eye
                }
            }
        };
        *face.eye_mut(side) = eye;
    }
}

fn lidded(center: Vec2, width: f32, height: f32) -> Eye {
    let eye = Eye::open(center, width, height);
    if height > MIN_VISIBLE_EYE_HEIGHT {
        eye
    } else {
        eye.with_shape(EyeShape::Hidden)
    }
}

/// 手掌遮眼：返回被遮挡那只眼睛，并把手掌装饰写入 `face`
fn cover(
    spec: &CoverSpec,
    frame: usize,
    frame_count: usize,
    eye: Eye,
    face: &mut FaceParams,
) -> Eye {
    let hand = |openness: f32, position: Vec2| Decoration {
        glyph: Glyph::Hand { openness },
        position,
        size: spec.size,
    };

    if frame < spec.cover_from {
        if frame >= spec.raise_from {
            face.decorations.push(hand(0.0, eye.center));
        }
        eye
    } else if frame <= spec.cover_to {
        let k = frame - spec.cover_from;
        let period = spec.peek_period.max(1);
        let beat = k / period;
        let peeking = beat % spec.peek_every.max(1) == 1 && k % period < period / 2;
        if peeking {
            face.decorations.push(hand(0.6, eye.center));
            eye
        } else {
            face.decorations.push(hand(0.0, eye.center));
            eye.with_shape(EyeShape::Hidden)
        }
    } else {
        let span = frame_count.saturating_sub(spec.cover_to).max(1);
        let u = (frame - spec.cover_to) as f32 / span as f32;
        let openness = (u * 2.0).min(1.0);
        if openness < 0.9 {
            face.decorations
                .push(hand(openness, eye.center + Vec2::new(spec.withdraw * u, 0.0)));
        }
        eye
    }
}

fn shape_mouth(
    spec: &MouthSpec,
    frame: usize,
    level: f32,
    layout: &FaceLayout,
    offset: Vec2,
) -> Option<Mouth> {
    let intensity = match spec.intensity {
        MouthIntensity::Fixed(v) => v,
        MouthIntensity::Level(k) => level * k,
        MouthIntensity::Ramp { start, frames } => {
            (frame.saturating_sub(start) as f32 / frames.max(1) as f32).min(1.0)
        }
    };
    (intensity > 0.0).then(|| Mouth {
        kind: spec.kind,
        center: layout.mouth() + offset,
        width: layout.mouth_width,
        height: layout.mouth_height,
        intensity,
    })
}

fn fires<R: Rng + ?Sized>(trigger: &Trigger, frame: usize, jittered: bool, rng: &mut R) -> bool {
    match *trigger {
        Trigger::Always => true,
        Trigger::Frame(n) => frame == n,
        Trigger::From(n) => frame >= n,
        Trigger::Cycle { period, from, to } => (from..to).contains(&(frame % period.max(1))),
        Trigger::Every { period, after } => frame > after && frame % period.max(1) == 0,
        Trigger::Chance { p, from, to } => (from..=to).contains(&frame) && rng.r#gen::<f32>() < p,
        Trigger::OnJitter => jittered,
    }
}

/// 触发条件开始生效的帧（漂移的起点）
fn trigger_start(trigger: &Trigger) -> usize {
    match *trigger {
        Trigger::Frame(n) | Trigger::From(n) => n,
        Trigger::Chance { from, .. } => from,
        _ => 0,
    }
}

fn place(
    rule: &DecorationRule,
    frame: usize,
    layout: &FaceLayout,
    motion: &MotionState,
) -> Decoration {
    let (anchor, side) = match rule.anchor {
        Anchor::Eye(side) => (layout.eye(side), side),
        Anchor::Brow => (Vec2::new(layout.center_x(), layout.eye_row()), Side::Left),
    };
    let drift = match rule.drift {
        Drift::None => Vec2::zero(),
        Drift::SinceStart { step } => {
            step * frame.saturating_sub(trigger_start(&rule.trigger)) as f32
        }
        Drift::Wrapping { step, wrap } => step * (frame % wrap.max(1)) as f32,
    };
    let follow = if rule.follows_motion {
        motion.eye(side)
    } else {
        Vec2::zero()
    };
    Decoration {
        glyph: rule.glyph,
        position: anchor + rule.offset + drift + follow,
        size: rule.size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::ExpressionId;
    use crate::profile::{PROFILES, profile};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn frames(id: ExpressionId, seed: u64) -> Vec<FaceParams> {
        let mut rng = StdRng::seed_from_u64(seed);
        synthesize(profile(id), &FaceLayout::default(), &mut rng)
    }

    #[test]
    fn test_every_profile_produces_its_frame_count() {
        let layout = FaceLayout::default();
        let mut rng = StdRng::seed_from_u64(7);
        for profile in PROFILES.iter() {
            let frames = synthesize(profile, &layout, &mut rng);
            assert_eq!(frames.len(), profile.frame_count, "{}", profile.id);
        }
    }

    #[test]
    fn test_same_seed_same_frames() {
        for id in [ExpressionId::Angry, ExpressionId::Thinking, ExpressionId::Fear] {
            assert_eq!(frames(id, 42), frames(id, 42));
        }
    }

    #[test]
    fn test_blink_closes_midway() {
        let blink = frames(ExpressionId::Blink, 0);
        assert!(blink[0].left_eye.is_visible());
        assert_eq!(blink[0].left_eye.height, 80.0);
        assert!(!blink[6].left_eye.is_visible());
        assert!(!blink[6].right_eye.is_visible());
        assert!(blink[11].left_eye.is_visible());
    }

    #[test]
    fn test_wink_only_moves_left_lid() {
        let wink = frames(ExpressionId::Wink, 0);
        for face in &wink {
            assert_eq!(face.right_eye.height, 80.0);
        }
        assert!(!wink[7].left_eye.is_visible());
    }

    #[test]
    fn test_look_left_peaks_at_half() {
        let look = frames(ExpressionId::LookLeft, 0);
        let layout = FaceLayout::default();
        assert_eq!(look[0].left_eye.center, layout.left_eye());
        assert_eq!(look[15].left_eye.center.x, layout.left_eye().x - 30.0);
        assert_eq!(look[15].right_eye.center.x, layout.right_eye().x - 30.0);
    }

    #[test]
    fn test_surprised_recovers_to_open_eyes() {
        let surprised = frames(ExpressionId::Surprised, 0);
        assert!(matches!(surprised[0].left_eye.shape, EyeShape::Ring { .. }));
        assert_eq!(surprised[0].left_eye.width, 120.0);
        assert!(surprised[0].has_glyph(|g| matches!(g, Glyph::RadialLines)));
        assert!(!surprised[1].has_glyph(|g| matches!(g, Glyph::RadialLines)));
        let last = &surprised[10];
        assert_eq!(last.left_eye.shape, EyeShape::Open);
        assert!(last.mouth.is_none());
    }

    #[test]
    fn test_joy_holds_crescent_and_sparkles_once() {
        let joy = frames(ExpressionId::Joy, 0);
        assert_eq!(joy[8].left_eye.shape, EyeShape::Arc);
        let sparkle_frames: Vec<_> = joy
            .iter()
            .enumerate()
            .filter(|(_, f)| f.has_glyph(|g| matches!(g, Glyph::Sparkle)))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(sparkle_frames, vec![10]);
        assert!(joy[20].mouth.is_none());
    }

    #[test]
    fn test_angry_lightning_only_when_jittering() {
        let layout = FaceLayout::default();
        let angry = frames(ExpressionId::Angry, 3);
        for face in &angry {
            let shaken = face.left_eye.center != layout.left_eye();
            let bolt = face.has_glyph(|g| matches!(g, Glyph::Lightning));
            // 抽到零偏移时可能有闪电但位置未变
            if shaken {
                assert!(bolt);
            }
        }
        for face in &angry[..4] {
            assert!(!face.has_glyph(|g| matches!(g, Glyph::Lightning)));
        }
    }

    #[test]
    fn test_furious_lightning_schedule() {
        let furious = frames(ExpressionId::Furious, 0);
        for (i, face) in furious.iter().enumerate() {
            let expected = i > 8 && i % 3 == 0;
            assert_eq!(face.has_glyph(|g| matches!(g, Glyph::Lightning)), expected, "frame {i}");
        }
        assert!(furious[3].mouth.is_none());
        assert!(furious[4].mouth.is_some());
    }

    #[test]
    fn test_sadness_tears_fall() {
        let sadness = frames(ExpressionId::Sadness, 0);
        assert!(!sadness[9].has_glyph(|g| matches!(g, Glyph::Teardrop)));
        let tears = |face: &FaceParams| {
            face.decorations
                .iter()
                .filter(|d| matches!(d.glyph, Glyph::Teardrop))
                .count()
        };
        assert_eq!(tears(&sadness[10]), 1);
        assert_eq!(tears(&sadness[20]), 2);
        let y = |face: &FaceParams| face.decorations[0].position.y;
        assert!(y(&sadness[30]) > y(&sadness[20]));
    }

    #[test]
    fn test_shy_hides_left_eye_while_covered() {
        let shy = frames(ExpressionId::Shy, 0);
        assert!(shy[0].left_eye.is_visible());
        assert!(shy[5].has_glyph(|g| matches!(g, Glyph::Hand { .. })));
        assert!(!shy[12].left_eye.is_visible());
        // 第二拍前半段偷看
        assert!(shy[19].left_eye.is_visible());
        assert!(shy.iter().all(|f| f.right_eye.is_visible()));
        assert!(!shy[49].has_glyph(|g| matches!(g, Glyph::Hand { .. })));
    }

    #[test]
    fn test_mouth_ramp() {
        let gasp = frames(ExpressionId::SurprisedMouth, 0);
        assert!(gasp[0].mouth.is_none());
        assert_eq!(gasp[4].mouth.map(|m| m.intensity), Some(0.5));
        assert_eq!(gasp[12].mouth.map(|m| m.intensity), Some(1.0));
    }

    #[test]
    fn test_idle_params_offset() {
        let layout = FaceLayout::default();
        let face = idle_params(&layout, Vec2::new(2.0, -1.0));
        assert_eq!(face.left_eye.center, Vec2::new(322.0, 199.0));
        assert_eq!(face.right_eye.center, Vec2::new(482.0, 199.0));
        assert_eq!(idle_params(&layout, Vec2::zero()), FaceParams::neutral(&layout));
    }
}
