//! # Face 模块
//!
//! 单帧脸部的参数化描述，与像素格式无关。
//!
//! 动画合成产出 [`FaceParams`]，渲染协作者（见 [`crate::library::FaceRenderer`]）
//! 把它光栅化为不透明的帧。坐标单位为像素，原点在左上角。

use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// 二维向量
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    /// 创建新的向量
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// 零向量
    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl From<(f32, f32)> for Vec2 {
    fn from((x, y): (f32, f32)) -> Self {
        Self { x, y }
    }
}

/// 脸部布局（基础几何参数）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceLayout {
    /// 画面宽度
    pub width: u32,
    /// 画面高度
    pub height: u32,
    /// 眼睛基础宽度
    pub eye_width: f32,
    /// 眼睛基础高度
    pub eye_height: f32,
    /// 两眼中心间距
    pub eye_spacing: f32,
    /// 嘴巴宽度
    pub mouth_width: f32,
    /// 嘴巴高度
    pub mouth_height: f32,
}

impl Default for FaceLayout {
    fn default() -> Self {
        Self::new(800, 480)
    }
}

impl FaceLayout {
    /// 以默认五官尺寸创建指定画面大小的布局
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            eye_width: 80.0,
            eye_height: 80.0,
            eye_spacing: 160.0,
            mouth_width: 120.0,
            mouth_height: 40.0,
        }
    }

    /// 画面中心 X
    pub fn center_x(&self) -> f32 {
        (self.width / 2) as f32
    }

    /// 眼睛所在行（画面中心上移，为嘴巴留出空间）
    pub fn eye_row(&self) -> f32 {
        (self.height / 2) as f32 - 40.0
    }

    /// 左眼中心
    pub fn left_eye(&self) -> Vec2 {
        Vec2::new(self.center_x() - self.eye_spacing / 2.0, self.eye_row())
    }

    /// 右眼中心
    pub fn right_eye(&self) -> Vec2 {
        Vec2::new(self.center_x() + self.eye_spacing / 2.0, self.eye_row())
    }

    /// 指定侧的眼睛中心
    pub fn eye(&self, side: Side) -> Vec2 {
        match side {
            Side::Left => self.left_eye(),
            Side::Right => self.right_eye(),
        }
    }

    /// 嘴巴中心
    pub fn mouth(&self) -> Vec2 {
        Vec2::new(self.center_x(), (self.height / 2) as f32 + 60.0)
    }
}

/// 左右侧
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// 朝向脸部中线的方向（左眼为 +1，右眼为 -1）
    pub fn inward(&self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// 眼睛形状
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EyeShape {
    /// 实心椭圆
    Open,
    /// 上弯弧线（弯月眼）
    Arc,
    /// 空心椭圆 + 实心瞳孔
    Ring {
        /// 瞳孔直径
        pupil: f32,
        /// 瞳孔水平偏移
        pupil_shift: f32,
    },
    /// 实心椭圆 + 倾斜眉毛，`slant` 为眉毛两端的高度差
    Browed { slant: f32 },
    /// 下垂弧线
    Droop,
    /// 倒三角
    Triangle,
    /// 不绘制（闭眼或被遮挡）
    Hidden,
}

/// 单只眼睛
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Eye {
    /// 中心位置
    pub center: Vec2,
    /// 宽度
    pub width: f32,
    /// 高度
    pub height: f32,
    /// 形状
    pub shape: EyeShape,
}

impl Eye {
    /// 创建实心椭圆眼
    pub fn open(center: Vec2, width: f32, height: f32) -> Self {
        Self {
            center,
            width,
            height,
            shape: EyeShape::Open,
        }
    }

    /// 设置形状
    pub fn with_shape(mut self, shape: EyeShape) -> Self {
        self.shape = shape;
        self
    }

    /// 是否可见
    pub fn is_visible(&self) -> bool {
        !matches!(self.shape, EyeShape::Hidden)
    }
}

/// 嘴巴类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MouthKind {
    /// 微笑
    Smile,
    /// 大笑
    BigSmile,
    /// 撇嘴
    Frown,
    /// O 形
    Round,
    /// 波浪
    Wavy,
    /// 直线
    Straight,
    /// 锯齿咆哮
    Roar,
}

/// 嘴巴
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Mouth {
    pub kind: MouthKind,
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// 形变强度（通常 0.0 - 1.0，波浪嘴可以超过 1）
    pub intensity: f32,
}

/// 装饰图形
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Glyph {
    /// 十字闪光
    Sparkle,
    /// 眼睛周围的放射线
    RadialLines,
    /// 闪电
    Lightning,
    /// 泪滴
    Teardrop,
    /// 心形
    Heart,
    /// 皇冠
    Crown,
    /// 奖杯
    Trophy,
    /// 四角星
    Star,
    /// 问号
    Question,
    /// 省略号
    Ellipsis,
    /// 单个 Z
    Z,
    /// 双 Z
    Zz,
    /// 聚焦框
    FocusFrame,
    /// 以 `position` 为中点、宽 `size` 的眉毛线段，`tilt` 为右端相对左端的高度差
    Brow { tilt: f32 },
    /// 遮挡眼睛的手掌
    Hand { openness: f32 },
    /// 眼睛周围的收缩线
    FearLines,
}

/// 装饰
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoration {
    pub glyph: Glyph,
    pub position: Vec2,
    pub size: f32,
}

/// 单帧脸部参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceParams {
    pub left_eye: Eye,
    pub right_eye: Eye,
    pub mouth: Option<Mouth>,
    pub decorations: Vec<Decoration>,
}

impl FaceParams {
    /// 默认睁眼、无嘴巴的脸
    pub fn neutral(layout: &FaceLayout) -> Self {
        Self {
            left_eye: Eye::open(layout.left_eye(), layout.eye_width, layout.eye_height),
            right_eye: Eye::open(layout.right_eye(), layout.eye_width, layout.eye_height),
            mouth: None,
            decorations: Vec::new(),
        }
    }

    /// 指定侧的眼睛
    pub fn eye_mut(&mut self, side: Side) -> &mut Eye {
        match side {
            Side::Left => &mut self.left_eye,
            Side::Right => &mut self.right_eye,
        }
    }

    /// 是否带有某类装饰
    pub fn has_glyph(&self, matches: impl Fn(&Glyph) -> bool) -> bool {
        self.decorations.iter().any(|d| matches(&d.glyph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_geometry() {
        let layout = FaceLayout::default();
        assert_eq!(layout.left_eye(), Vec2::new(320.0, 200.0));
        assert_eq!(layout.right_eye(), Vec2::new(480.0, 200.0));
        assert_eq!(layout.mouth(), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn test_neutral_face() {
        let layout = FaceLayout::default();
        let face = FaceParams::neutral(&layout);
        assert!(face.left_eye.is_visible());
        assert_eq!(face.left_eye.width, 80.0);
        assert!(face.mouth.is_none());
        assert!(face.decorations.is_empty());
    }

    #[test]
    fn test_vec2_ops() {
        let v = Vec2::new(1.0, 2.0) + Vec2::new(3.0, 4.0);
        assert_eq!(v, Vec2::new(4.0, 6.0));
        assert_eq!(v * 0.5, Vec2::new(2.0, 3.0));
    }
}
