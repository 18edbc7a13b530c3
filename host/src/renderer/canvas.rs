//! # Canvas 模块
//!
//! 把 `GrayImage` 包装成 embedded-graphics 的 [`DrawTarget`]，
//! 再提供几个以 [`Vec2`] 为参数的便捷画法。
//!
//! 越界像素在 `draw_iter` 中丢弃。
//! 角度沿用屏幕习惯：0 指向右侧，逆时针为正（y 轴向上看）。

use std::convert::Infallible;

use embedded_graphics::pixelcolor::Gray8;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Ellipse, Line, Polyline, PrimitiveStyle, Rectangle, Triangle,
};
use face_runtime::Vec2;
use image::{GrayImage, Luma};

/// 白色
pub const WHITE: Gray8 = Gray8::WHITE;
/// 黑色
pub const BLACK: Gray8 = Gray8::BLACK;

/// 画布
pub struct Canvas<'a> {
    image: &'a mut GrayImage,
}

fn point(v: Vec2) -> Point {
    Point::new(v.x.round() as i32, v.y.round() as i32)
}

fn size(width: f32, height: f32) -> Size {
    Size::new(width.round().max(0.0) as u32, height.round().max(0.0) as u32)
}

fn stroke(color: Gray8, thickness: f32) -> PrimitiveStyle<Gray8> {
    PrimitiveStyle::with_stroke(color, thickness.round().max(1.0) as u32)
}

impl<'a> Canvas<'a> {
    pub fn new(image: &'a mut GrayImage) -> Self {
        Self { image }
    }

    /// 画一个图元；目标不会失败
    fn paint(&mut self, item: &impl Drawable<Color = Gray8, Output = ()>) {
        let Ok(()) = item.draw(self);
    }

    /// 实心椭圆
    pub fn fill_ellipse(&mut self, center: Vec2, width: f32, height: f32, color: Gray8) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.paint(
            &Ellipse::with_center(point(center), size(width, height))
                .into_styled(PrimitiveStyle::with_fill(color)),
        );
    }

    /// 空心椭圆
    pub fn stroke_ellipse(
        &mut self,
        center: Vec2,
        width: f32,
        height: f32,
        thickness: f32,
        color: Gray8,
    ) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }
        self.paint(
            &Ellipse::with_center(point(center), size(width, height))
                .into_styled(stroke(color, thickness)),
        );
    }

    /// 椭圆弧，`start`/`end` 为弧度
    ///
    /// embedded-graphics 的 `Arc` 只支持正圆，这里按周长取样成折线。
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        center: Vec2,
        width: f32,
        height: f32,
        start: f32,
        end: f32,
        thickness: f32,
        color: Gray8,
    ) {
        let (rx, ry) = (width / 2.0, height / 2.0);
        if rx <= 0.0 || ry <= 0.0 || end <= start {
            return;
        }

        // 相邻取样点间距不超过 2 像素
        let sweep = end - start;
        let steps = ((rx.max(ry) * sweep) / 2.0).ceil().max(8.0) as usize;
        let points: Vec<Vec2> = (0..=steps)
            .map(|i| {
                let angle = start + sweep * i as f32 / steps as f32;
                Vec2::new(center.x + rx * angle.cos(), center.y - ry * angle.sin())
            })
            .collect();
        self.polyline(&points, thickness, color);
    }

    /// 粗线段
    pub fn line(&mut self, from: Vec2, to: Vec2, thickness: f32, color: Gray8) {
        self.paint(&Line::new(point(from), point(to)).into_styled(stroke(color, thickness)));
    }

    /// 折线
    pub fn polyline(&mut self, points: &[Vec2], thickness: f32, color: Gray8) {
        let points: Vec<Point> = points.iter().copied().map(point).collect();
        self.paint(&Polyline::new(&points).into_styled(stroke(color, thickness)));
    }

    /// 直径为 `diameter` 的实心圆点
    pub fn dot(&mut self, center: Vec2, diameter: f32, color: Gray8) {
        let diameter = diameter.round().max(1.0) as u32;
        self.paint(
            &Circle::with_center(point(center), diameter)
                .into_styled(PrimitiveStyle::with_fill(color)),
        );
    }

    /// 实心三角形
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Gray8) {
        self.paint(
            &Triangle::new(point(a), point(b), point(c))
                .into_styled(PrimitiveStyle::with_fill(color)),
        );
    }

    /// 以 `pivot` 为扇心的实心多边形
    ///
    /// 多边形须对 `pivot` 星形可见（每条边都能从 `pivot` 直接看到）。
    pub fn fill_fan(&mut self, pivot: Vec2, points: &[Vec2], color: Gray8) {
        for pair in points.windows(2) {
            self.fill_triangle(pivot, pair[0], pair[1], color);
        }
    }

    /// 实心矩形，`origin` 为左上角
    pub fn fill_rect(&mut self, origin: Vec2, width: f32, height: f32, color: Gray8) {
        self.paint(
            &Rectangle::new(point(origin), size(width, height))
                .into_styled(PrimitiveStyle::with_fill(color)),
        );
    }

    /// 空心矩形，`origin` 为左上角
    pub fn stroke_rect(
        &mut self,
        origin: Vec2,
        width: f32,
        height: f32,
        thickness: f32,
        color: Gray8,
    ) {
        self.paint(
            &Rectangle::new(point(origin), size(width, height))
                .into_styled(stroke(color, thickness)),
        );
    }
}

impl DrawTarget for Canvas<'_> {
    type Color = Gray8;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.image.dimensions();
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
                self.image
                    .put_pixel(p.x as u32, p.y as u32, Luma([color.luma()]));
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        for pixel in self.image.pixels_mut() {
            *pixel = Luma([color.luma()]);
        }
        Ok(())
    }
}

impl OriginDimensions for Canvas<'_> {
    fn size(&self) -> Size {
        let (width, height) = self.image.dimensions();
        Size::new(width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> GrayImage {
        GrayImage::from_pixel(100, 100, Luma([0]))
    }

    fn is_white(image: &GrayImage, x: u32, y: u32) -> bool {
        image.get_pixel(x, y).0[0] == 255
    }

    #[test]
    fn test_draw_target() {
        let mut image = blank();
        let mut canvas = Canvas::new(&mut image);
        assert_eq!(canvas.size(), Size::new(100, 100));

        Rectangle::new(Point::new(10, 10), Size::new(20, 20))
            .into_styled(PrimitiveStyle::with_fill(WHITE))
            .draw(&mut canvas)
            .unwrap();
        assert!(is_white(&image, 15, 15));
        assert!(!is_white(&image, 0, 0));
    }

    #[test]
    fn test_fill_ellipse() {
        let mut image = blank();
        Canvas::new(&mut image).fill_ellipse(Vec2::new(50.0, 50.0), 40.0, 20.0, WHITE);
        assert!(is_white(&image, 50, 50));
        assert!(is_white(&image, 35, 50));
        assert!(!is_white(&image, 50, 65));
        assert!(!is_white(&image, 75, 50));
    }

    #[test]
    fn test_line_and_clipping() {
        let mut image = blank();
        let mut canvas = Canvas::new(&mut image);
        canvas.line(Vec2::new(-50.0, 10.0), Vec2::new(150.0, 10.0), 1.0, WHITE);
        canvas.fill_ellipse(Vec2::new(-500.0, -500.0), 10.0, 10.0, WHITE);
        assert!(is_white(&image, 0, 10));
        assert!(is_white(&image, 99, 10));
        assert!(!is_white(&image, 50, 20));
    }

    #[test]
    fn test_thick_line_uses_stroke_width() {
        let mut image = blank();
        Canvas::new(&mut image).line(Vec2::new(10.0, 50.0), Vec2::new(90.0, 50.0), 5.0, WHITE);
        assert!(is_white(&image, 50, 48));
        assert!(is_white(&image, 50, 52));
        assert!(!is_white(&image, 50, 56));
    }

    #[test]
    fn test_fill_triangle_and_fan() {
        let mut image = blank();
        let mut canvas = Canvas::new(&mut image);
        canvas.fill_triangle(
            Vec2::new(10.0, 10.0),
            Vec2::new(90.0, 10.0),
            Vec2::new(50.0, 50.0),
            WHITE,
        );
        canvas.fill_fan(
            Vec2::new(50.0, 95.0),
            &[
                Vec2::new(10.0, 95.0),
                Vec2::new(30.0, 70.0),
                Vec2::new(50.0, 85.0),
                Vec2::new(70.0, 70.0),
                Vec2::new(90.0, 95.0),
            ],
            WHITE,
        );
        assert!(is_white(&image, 50, 20));
        assert!(!is_white(&image, 15, 45));
        assert!(is_white(&image, 30, 90));
        assert!(is_white(&image, 70, 90));
        assert!(!is_white(&image, 50, 75));
    }

    #[test]
    fn test_stroke_ellipse_is_hollow() {
        let mut image = blank();
        Canvas::new(&mut image).stroke_ellipse(Vec2::new(50.0, 50.0), 60.0, 60.0, 2.0, WHITE);
        assert!(!is_white(&image, 50, 50));
        assert!((78..=81).any(|x| is_white(&image, x, 50)));
    }

    #[test]
    fn test_arc_covers_only_its_sweep() {
        let mut image = blank();
        // 下半弧
        Canvas::new(&mut image).arc(
            Vec2::new(50.0, 50.0),
            60.0,
            40.0,
            std::f32::consts::PI,
            std::f32::consts::TAU,
            3.0,
            WHITE,
        );
        assert!((68..=72).any(|y| is_white(&image, 50, y)));
        assert!(!(28..=32).any(|y| is_white(&image, 50, y)));
    }

    #[test]
    fn test_rects_and_clear() {
        let mut image = blank();
        let mut canvas = Canvas::new(&mut image);
        canvas.fill_rect(Vec2::new(10.0, 10.0), 5.0, 5.0, WHITE);
        canvas.stroke_rect(Vec2::new(40.0, 40.0), 20.0, 10.0, 1.0, WHITE);
        canvas.dot(Vec2::new(80.0, 80.0), 5.0, WHITE);
        assert!(is_white(&image, 12, 12));
        assert!(!is_white(&image, 15, 15));
        assert!(is_white(&image, 50, 40));
        assert!(!is_white(&image, 50, 45));
        assert!(is_white(&image, 80, 80));

        Canvas::new(&mut image).clear(BLACK).unwrap();
        assert!(image.pixels().all(|p| p.0[0] == 0));
    }
}
