//! # Renderer 模块
//!
//! 光栅渲染器：把 [`FaceParams`] 画成黑底白线的 `GrayImage`。
//!
//! ## 设计说明
//!
//! - 实现 [`FaceRenderer`]，只在动画库构建期和空闲微动时被调用
//! - 图形全部是 embedded-graphics 图元，经 [`Canvas`] 落到 `GrayImage` 上，不依赖字体
//! - 线宽为固定像素值，不随屏幕尺寸缩放

mod canvas;

pub use canvas::{BLACK, Canvas, WHITE};

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use embedded_graphics::prelude::DrawTarget;
use face_runtime::{
    Decoration, Eye, EyeShape, FaceLayout, FaceParams, FaceRenderer, Glyph, Mouth, MouthKind,
    Vec2,
};
use image::GrayImage;

/// 光栅渲染器
#[derive(Debug, Clone)]
pub struct RasterRenderer {
    layout: FaceLayout,
}

impl RasterRenderer {
    pub fn new(layout: FaceLayout) -> Self {
        Self { layout }
    }

    /// 画布尺寸
    pub fn size(&self) -> (u32, u32) {
        (self.layout.width, self.layout.height)
    }

    /// 在已有画布上绘制一张脸
    pub fn draw(&self, canvas: &mut Canvas<'_>, face: &FaceParams) {
        let Ok(()) = canvas.clear(BLACK);
        draw_eye(canvas, &face.left_eye);
        draw_eye(canvas, &face.right_eye);
        if let Some(mouth) = &face.mouth {
            draw_mouth(canvas, mouth);
        }
        for decoration in &face.decorations {
            self.draw_decoration(canvas, decoration);
        }
    }

    fn draw_decoration(&self, canvas: &mut Canvas<'_>, decoration: &Decoration) {
        let p = decoration.position;
        let s = decoration.size;
        match decoration.glyph {
            Glyph::Sparkle => {
                let h = s / 2.0;
                canvas.line(p + Vec2::new(-h, 0.0), p + Vec2::new(h, 0.0), 2.0, WHITE);
                canvas.line(p + Vec2::new(0.0, -h), p + Vec2::new(0.0, h), 2.0, WHITE);
            }
            Glyph::RadialLines => radial(canvas, p, s * 0.75, s, 8, TAU, 2.0),
            Glyph::FearLines => radial(canvas, p, s, s * 45.0 / 55.0, 4, PI, 1.0),
            Glyph::Lightning => {
                // 右半屏的闪电水平镜像
                let mirror = if p.x > self.layout.center_x() { -1.0 } else { 1.0 };
                let k = s / 25.0;
                let bolt: Vec<Vec2> = [(0.0, 0.0), (8.0, 12.0), (3.0, 12.0), (10.0, 25.0)]
                    .iter()
                    .map(|&(x, y)| p + Vec2::new(x * k * mirror, y * k))
                    .collect();
                canvas.polyline(&bolt, 3.0, WHITE);
            }
            Glyph::Teardrop => {
                canvas.fill_ellipse(p + Vec2::new(0.0, s / 2.0), s, s, WHITE);
                canvas.fill_triangle(
                    p,
                    p + Vec2::new(-s / 3.0, s / 2.0),
                    p + Vec2::new(s / 3.0, s / 2.0),
                    WHITE,
                );
            }
            Glyph::Heart => {
                let r = s / 4.0;
                canvas.fill_ellipse(p + Vec2::new(-r / 2.0, 0.0), 2.0 * r, 2.0 * r, WHITE);
                canvas.fill_ellipse(p + Vec2::new(r / 2.0, 0.0), 2.0 * r, 2.0 * r, WHITE);
                canvas.fill_triangle(
                    p + Vec2::new(-r, r / 2.0),
                    p + Vec2::new(r, r / 2.0),
                    p + Vec2::new(0.0, s),
                    WHITE,
                );
            }
            Glyph::Crown => {
                let half = s / 2.0;
                canvas.fill_rect(p + Vec2::new(-half, half), s, s / 4.0, WHITE);
                // 王冠轮廓从底边中点扇形铺开
                canvas.fill_fan(
                    p + Vec2::new(0.0, half),
                    &[
                        p + Vec2::new(-half, half),
                        p + Vec2::new(-s / 4.0, 0.0),
                        p + Vec2::new(0.0, s / 4.0),
                        p + Vec2::new(s / 4.0, 0.0),
                        p + Vec2::new(half, half),
                    ],
                    WHITE,
                );
            }
            Glyph::Trophy => {
                let cup = s / 2.0;
                canvas.fill_ellipse(p + Vec2::new(0.0, cup / 2.0), cup, cup, WHITE);
                let handle = s / 3.0;
                let y = s / 4.0 + handle / 2.0;
                let (left, right) = (p + Vec2::new(-s / 3.0, y), p + Vec2::new(s / 3.0, y));
                canvas.arc(left, handle, handle, FRAC_PI_2, 1.5 * PI, 2.0, WHITE);
                canvas.arc(right, handle, handle, -FRAC_PI_2, FRAC_PI_2, 2.0, WHITE);
                canvas.fill_rect(p + Vec2::new(-s / 3.0, cup), s * 2.0 / 3.0, s / 4.0, WHITE);
            }
            Glyph::Star => {
                let h = s / 2.0;
                let q = h / 2.0;
                canvas.line(p + Vec2::new(0.0, -h), p + Vec2::new(0.0, h), 2.0, WHITE);
                canvas.line(p + Vec2::new(-h, 0.0), p + Vec2::new(h, 0.0), 2.0, WHITE);
                canvas.line(p + Vec2::new(-q, -q), p + Vec2::new(q, q), 1.0, WHITE);
                canvas.line(p + Vec2::new(-q, q), p + Vec2::new(q, -q), 1.0, WHITE);
            }
            Glyph::Question => {
                let a = s * 0.3;
                // 上半圆钩 + 竖笔 + 点
                let hook = p + Vec2::new(0.0, -a * 0.6);
                canvas.arc(hook, a * 1.4, a * 1.2, -FRAC_PI_2, PI, 2.0, WHITE);
                canvas.line(p + Vec2::new(0.0, 0.0), p + Vec2::new(0.0, a * 0.5), 2.0, WHITE);
                canvas.dot(p + Vec2::new(0.0, a * 1.1), 3.0, WHITE);
            }
            Glyph::Ellipsis => {
                let gap = s * 0.2;
                for i in -1..=1 {
                    canvas.dot(p + Vec2::new(gap * i as f32, s * 0.2), 3.0, WHITE);
                }
            }
            Glyph::Z => zigzag(canvas, p, s * 0.3),
            Glyph::Zz => {
                let a = s * 0.22;
                zigzag(canvas, p + Vec2::new(-a * 1.2, 0.0), a);
                zigzag(canvas, p + Vec2::new(a * 1.2, 0.0), a);
            }
            Glyph::FocusFrame => {
                let (w, h) = (s, s / 2.0);
                let origin = p + Vec2::new(-w / 2.0, -h / 2.0);
                canvas.stroke_rect(origin, w, h, 2.0, WHITE);
                let corner = 15.0;
                for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (-1.0, 1.0), (1.0, 1.0)] {
                    let c = p + Vec2::new(sx * w / 2.0, sy * h / 2.0);
                    canvas.polyline(
                        &[c + Vec2::new(-corner, 0.0), c, c + Vec2::new(0.0, -corner)],
                        3.0,
                        WHITE,
                    );
                }
            }
            Glyph::Brow { tilt } => {
                let h = s / 2.0;
                canvas.line(
                    p + Vec2::new(-h, -tilt / 2.0),
                    p + Vec2::new(h, tilt / 2.0),
                    4.0,
                    WHITE,
                );
            }
            Glyph::Hand { openness } => {
                let width = s * (1.0 - openness * 0.3);
                canvas.fill_ellipse(p, width, s * 1.2, WHITE);
                if openness > 0.3 {
                    canvas.fill_ellipse(p, s * openness * 0.4, s * 0.8, BLACK);
                }
            }
        }
    }
}

impl FaceRenderer for RasterRenderer {
    type Frame = GrayImage;

    fn render(&mut self, params: &FaceParams) -> GrayImage {
        let (width, height) = self.size();
        let mut image = GrayImage::new(width, height);
        self.draw(&mut Canvas::new(&mut image), params);
        image
    }
}

fn draw_eye(canvas: &mut Canvas<'_>, eye: &Eye) {
    let Eye {
        center: c,
        width: w,
        height: h,
        shape,
    } = *eye;

    match shape {
        EyeShape::Open => canvas.fill_ellipse(c, w, h, WHITE),
        EyeShape::Arc => canvas.arc(c, w, h, 0.0, PI, 3.0, WHITE),
        EyeShape::Ring { pupil, pupil_shift } => {
            canvas.stroke_ellipse(c, w, h, 2.0, WHITE);
            canvas.fill_ellipse(c + Vec2::new(pupil_shift, 0.0), pupil, pupil, WHITE);
        }
        EyeShape::Browed { slant } => {
            canvas.fill_ellipse(c, w, h, WHITE);
            let y = c.y - h / 2.0 - 15.0;
            let half = (w + 10.0) / 2.0;
            canvas.line(
                Vec2::new(c.x - half, y - slant / 2.0),
                Vec2::new(c.x + half, y + slant / 2.0),
                4.0,
                WHITE,
            );
        }
        EyeShape::Droop => {
            canvas.arc(c + Vec2::new(0.0, h / 2.0), w, h / 2.0, 0.0, PI, 3.0, WHITE);
        }
        EyeShape::Triangle => canvas.fill_triangle(
            c + Vec2::new(0.0, h / 2.0),
            c + Vec2::new(-w / 2.0, -h / 2.0),
            c + Vec2::new(w / 2.0, -h / 2.0),
            WHITE,
        ),
        EyeShape::Hidden => {}
    }
}

fn draw_mouth(canvas: &mut Canvas<'_>, mouth: &Mouth) {
    let Mouth {
        kind,
        center: c,
        width: w,
        height: h,
        intensity: i,
    } = *mouth;

    match kind {
        // 嘴角上扬：画椭圆下半弧
        MouthKind::Smile => canvas.arc(c, w, h * i * 0.8, PI, TAU, 3.0, WHITE),
        MouthKind::BigSmile => canvas.arc(c, w, h * i, PI, TAU, 5.0, WHITE),
        MouthKind::Frown => {
            let arc = h * i * 0.6;
            canvas.arc(c + Vec2::new(0.0, arc), w, arc, 0.0, PI, 3.0, WHITE);
        }
        MouthKind::Round => {
            let d = w * 0.3 * i;
            canvas.stroke_ellipse(c, d, d, 2.0, WHITE);
        }
        MouthKind::Wavy => {
            let n = 24;
            let points: Vec<Vec2> = (0..n)
                .map(|k| {
                    Vec2::new(
                        c.x - w / 2.0 + k as f32 * w / n as f32,
                        c.y + (k as f32 * FRAC_PI_4).sin() * 8.0 * i,
                    )
                })
                .collect();
            canvas.polyline(&points, 2.0, WHITE);
        }
        MouthKind::Straight => {
            let half = w * 0.3;
            canvas.line(c + Vec2::new(-half, 0.0), c + Vec2::new(half, 0.0), 3.0, WHITE);
        }
        MouthKind::Roar => {
            let rw = w * 0.8;
            let rh = h * i * 0.6;
            let teeth = 8;
            let tooth = rw / teeth as f32;
            let points: Vec<Vec2> = (0..=teeth)
                .map(|k| {
                    let y = if k % 2 == 0 { -rh / 2.0 } else { rh / 2.0 };
                    c + Vec2::new(-rw / 2.0 + k as f32 * tooth, y)
                })
                .collect();
            canvas.polyline(&points, 4.0, WHITE);

            if i > 0.8 {
                for k in 0..3 {
                    let x = c.x - 20.0 + k as f32 * 20.0;
                    canvas.line(
                        Vec2::new(x, c.y - rh / 4.0),
                        Vec2::new(x, c.y + rh / 4.0),
                        2.0,
                        WHITE,
                    );
                }
            }
        }
    }
}

/// 以 `center` 为中心、在 `[0, span)` 内均匀分布的 `count` 条径向线段
fn radial(
    canvas: &mut Canvas<'_>,
    center: Vec2,
    from: f32,
    to: f32,
    count: usize,
    span: f32,
    thickness: f32,
) {
    for k in 0..count {
        let angle = span * k as f32 / count as f32;
        let dir = Vec2::new(angle.cos(), angle.sin());
        canvas.line(center + dir * from, center + dir * to, thickness, WHITE);
    }
}

/// Z 字形，`a` 为半宽
fn zigzag(canvas: &mut Canvas<'_>, center: Vec2, a: f32) {
    canvas.polyline(
        &[
            center + Vec2::new(-a, -a),
            center + Vec2::new(a, -a),
            center + Vec2::new(-a, a),
            center + Vec2::new(a, a),
        ],
        2.0,
        WHITE,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::GrayColor;

    fn renderer() -> RasterRenderer {
        RasterRenderer::new(FaceLayout::default())
    }

    fn lit(image: &GrayImage) -> usize {
        image.pixels().filter(|p| p.0[0] == WHITE.luma()).count()
    }

    fn luma(image: &GrayImage, x: u32, y: u32) -> u8 {
        image.get_pixel(x, y).0[0]
    }

    #[test]
    fn test_neutral_face() {
        let layout = FaceLayout::default();
        let image = renderer().render(&FaceParams::neutral(&layout));
        assert_eq!(image.dimensions(), (800, 480));
        assert_eq!(luma(&image, 320, 200), WHITE.luma());
        assert_eq!(luma(&image, 480, 200), WHITE.luma());
        assert_eq!(luma(&image, 400, 200), BLACK.luma());
        assert_eq!(luma(&image, 0, 0), BLACK.luma());
    }

    #[test]
    fn test_hidden_eye_not_drawn() {
        let layout = FaceLayout::default();
        let mut face = FaceParams::neutral(&layout);
        face.left_eye.shape = EyeShape::Hidden;
        let image = renderer().render(&face);
        assert_eq!(luma(&image, 320, 200), BLACK.luma());
        assert_eq!(luma(&image, 480, 200), WHITE.luma());
    }

    #[test]
    fn test_every_glyph_and_mouth_draws_something() {
        let layout = FaceLayout::default();
        let mut renderer = renderer();
        let glyphs = [
            Glyph::Sparkle,
            Glyph::RadialLines,
            Glyph::Lightning,
            Glyph::Teardrop,
            Glyph::Heart,
            Glyph::Crown,
            Glyph::Trophy,
            Glyph::Star,
            Glyph::Question,
            Glyph::Ellipsis,
            Glyph::Z,
            Glyph::Zz,
            Glyph::FocusFrame,
            Glyph::Brow { tilt: -13.0 },
            Glyph::Hand { openness: 0.6 },
            Glyph::FearLines,
        ];
        for glyph in glyphs {
            let mut face = FaceParams::neutral(&layout);
            face.left_eye.shape = EyeShape::Hidden;
            face.right_eye.shape = EyeShape::Hidden;
            face.decorations.push(Decoration {
                glyph,
                position: Vec2::new(400.0, 100.0),
                size: 40.0,
            });
            assert!(lit(&renderer.render(&face)) > 0, "{glyph:?}");
        }

        let kinds = [
            MouthKind::Smile,
            MouthKind::BigSmile,
            MouthKind::Frown,
            MouthKind::Round,
            MouthKind::Wavy,
            MouthKind::Straight,
            MouthKind::Roar,
        ];
        for kind in kinds {
            let mut face = FaceParams::neutral(&layout);
            face.left_eye.shape = EyeShape::Hidden;
            face.right_eye.shape = EyeShape::Hidden;
            face.mouth = Some(Mouth {
                kind,
                center: layout.mouth(),
                width: layout.mouth_width,
                height: layout.mouth_height,
                intensity: 1.0,
            });
            assert!(lit(&renderer.render(&face)) > 0, "{kind:?}");
        }
    }

    #[test]
    fn test_open_hand_has_gap() {
        let layout = FaceLayout::default();
        let mut face = FaceParams::neutral(&layout);
        face.left_eye.shape = EyeShape::Hidden;
        face.right_eye.shape = EyeShape::Hidden;
        face.decorations.push(Decoration {
            glyph: Glyph::Hand { openness: 0.0 },
            position: Vec2::new(200.0, 200.0),
            size: 45.0,
        });
        face.decorations.push(Decoration {
            glyph: Glyph::Hand { openness: 0.6 },
            position: Vec2::new(600.0, 200.0),
            size: 45.0,
        });
        let image = renderer().render(&face);
        assert_eq!(luma(&image, 200, 200), WHITE.luma());
        assert_eq!(luma(&image, 600, 200), BLACK.luma());
    }
}
