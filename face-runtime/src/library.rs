//! # Library 模块
//!
//! 动画库：启动时一次性合成并缓存所有表情的帧序列。
//!
//! ## 设计说明
//!
//! 帧的具体格式由渲染协作者 [`FaceRenderer`] 决定，核心只把它当作
//! 不透明的值，用 `Rc` 共享。构建完成后缓存不再变化；空闲微动帧
//! 每次按需新渲染，不会写回缓存。

use std::collections::BTreeMap;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use crate::expression::ExpressionId;
use crate::face::{FaceLayout, FaceParams, Vec2};
use crate::profile::PROFILES;
use crate::synth::{idle_params, synthesize};

/// 渲染协作者：把一组脸部参数变成一帧
///
/// 只在构建期和空闲微动时被调用。
pub trait FaceRenderer {
    /// 帧类型
    type Frame;

    /// 渲染一帧
    fn render(&mut self, params: &FaceParams) -> Self::Frame;
}

/// 以参数本身作为帧的渲染器（测试与无头运行）
#[derive(Debug, Clone, Copy, Default)]
pub struct ParamRenderer;

impl FaceRenderer for ParamRenderer {
    type Frame = FaceParams;

    fn render(&mut self, params: &FaceParams) -> FaceParams {
        params.clone()
    }
}

/// 不可变的帧序列，克隆只增加引用计数
#[derive(Debug)]
pub struct Animation<F> {
    frames: Rc<[Rc<F>]>,
}

impl<F> Clone for Animation<F> {
    fn clone(&self) -> Self {
        Self {
            frames: Rc::clone(&self.frames),
        }
    }
}

impl<F> Animation<F> {
    /// 由帧列表创建
    pub fn new(frames: Vec<Rc<F>>) -> Self {
        Self {
            frames: frames.into(),
        }
    }

    /// 单帧动画
    pub fn single(frame: Rc<F>) -> Self {
        Self::new(vec![frame])
    }

    /// 空动画
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// 帧数
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// 是否没有帧
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// 获取指定帧
    pub fn get(&self, index: usize) -> Option<&Rc<F>> {
        self.frames.get(index)
    }

    /// 第一帧
    pub fn first(&self) -> Option<&Rc<F>> {
        self.frames.first()
    }

    /// 是否与另一个动画共享同一份帧数据
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.frames, &other.frames)
    }

    /// 遍历所有帧
    pub fn iter(&self) -> impl Iterator<Item = &Rc<F>> {
        self.frames.iter()
    }
}

/// 微动偏移的默认范围（像素）：x ∈ [-2, 2]，y ∈ [-1, 1]
pub const DEFAULT_MICRO_RANGE: (i32, i32) = (2, 1);

/// 动画库
pub struct AnimationLibrary<R: FaceRenderer> {
    renderer: R,
    layout: FaceLayout,
    rng: StdRng,
    animations: BTreeMap<ExpressionId, Animation<R::Frame>>,
    idle: Animation<R::Frame>,
    idle_frame: Rc<R::Frame>,
    micro_range: (i32, i32),
}

impl<R: FaceRenderer> AnimationLibrary<R> {
    /// 构建动画库（随机源取自系统熵）
    pub fn build(renderer: R, layout: FaceLayout) -> Self {
        Self::build_with_rng(renderer, layout, StdRng::from_entropy())
    }

    /// 用指定随机源构建动画库
    ///
    /// 相同种子得到逐帧相同的动画，测试依赖这一点。
    pub fn build_with_rng(mut renderer: R, layout: FaceLayout, mut rng: StdRng) -> Self {
        let idle_frame = Rc::new(renderer.render(&idle_params(&layout, Vec2::zero())));
        let idle = Animation::single(Rc::clone(&idle_frame));

        let mut animations = BTreeMap::new();
        animations.insert(ExpressionId::Idle, idle.clone());

        let mut total_frames = idle.len();
        for profile in PROFILES.iter().filter(|p| !p.id.is_idle()) {
            let frames: Vec<_> = synthesize(profile, &layout, &mut rng)
                .iter()
                .map(|params| Rc::new(renderer.render(params)))
                .collect();
            debug!(expression = %profile.id, frames = frames.len(), "动画合成完成");
            total_frames += frames.len();
            animations.insert(profile.id, Animation::new(frames));
        }

        info!(
            animations = animations.len(),
            frames = total_frames,
            "动画库构建完成"
        );

        Self {
            renderer,
            layout,
            rng,
            animations,
            idle,
            idle_frame,
            micro_range: DEFAULT_MICRO_RANGE,
        }
    }

    /// 设置微动偏移范围
    pub fn with_micro_range(mut self, max_x: i32, max_y: i32) -> Self {
        self.set_micro_range(max_x, max_y);
        self
    }

    /// 设置微动偏移范围
    ///
    /// 负值按绝对值处理。
    pub fn set_micro_range(&mut self, max_x: i32, max_y: i32) {
        let clamp = |v: i32| v.unsigned_abs().min(i32::MAX as u32) as i32;
        self.micro_range = (clamp(max_x), clamp(max_y));
    }

    /// 获取表情动画
    pub fn get(&self, id: ExpressionId) -> Animation<R::Frame> {
        self.animations
            .get(&id)
            .cloned()
            .unwrap_or_else(|| self.idle.clone())
    }

    /// 按名称获取表情动画，未知名称回退为空闲动画
    pub fn get_named(&self, name: &str) -> Animation<R::Frame> {
        match ExpressionId::parse(name) {
            Ok(id) => self.get(id),
            Err(_) => self.idle.clone(),
        }
    }

    /// 空闲动画
    pub fn idle(&self) -> Animation<R::Frame> {
        self.idle.clone()
    }

    /// 空闲动画的第一帧
    pub fn idle_frame(&self) -> &Rc<R::Frame> {
        &self.idle_frame
    }

    /// 渲染一帧带随机微小偏移的空闲脸
    pub fn idle_frame_with_micro_movement(&mut self) -> Rc<R::Frame> {
        let (max_x, max_y) = self.micro_range;
        let x = self.rng.gen_range(-max_x..=max_x);
        let y = self.rng.gen_range(-max_y..=max_y);
        let params = idle_params(&self.layout, Vec2::new(x as f32, y as f32));
        Rc::new(self.renderer.render(&params))
    }

    /// 表情动画的帧数
    pub fn frame_count(&self, id: ExpressionId) -> usize {
        self.animations.get(&id).map_or(0, Animation::len)
    }

    /// 已缓存的动画数量
    pub fn len(&self) -> usize {
        self.animations.len()
    }

    /// 是否没有缓存任何动画
    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    /// 脸部布局
    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile;

    fn library() -> AnimationLibrary<ParamRenderer> {
        AnimationLibrary::build_with_rng(
            ParamRenderer,
            FaceLayout::default(),
            StdRng::seed_from_u64(1),
        )
    }

    /// 统计调用次数的渲染器
    struct CountingRenderer {
        calls: usize,
    }

    impl FaceRenderer for CountingRenderer {
        type Frame = usize;

        fn render(&mut self, _params: &FaceParams) -> usize {
            self.calls += 1;
            self.calls
        }
    }

    #[test]
    fn test_every_expression_is_cached() {
        let library = library();
        assert_eq!(library.len(), ExpressionId::ALL.len());
        for id in ExpressionId::ALL {
            assert_eq!(library.frame_count(id), profile(id).frame_count, "{id}");
            assert!(!library.get(id).is_empty());
        }
    }

    #[test]
    fn test_unknown_name_falls_back_to_idle() {
        let library = library();
        assert!(library.get_named("not_a_real_state").ptr_eq(&library.idle()));
        assert!(library.get_named("HAPPY").ptr_eq(&library.get(ExpressionId::Happy)));
        assert!(library.get(ExpressionId::Idle).ptr_eq(&library.idle()));
    }

    #[test]
    fn test_get_shares_frames() {
        let library = library();
        let a = library.get(ExpressionId::Joy);
        let b = library.get(ExpressionId::Joy);
        assert!(a.ptr_eq(&b));
        assert!(Rc::ptr_eq(a.get(3).unwrap(), b.get(3).unwrap()));
    }

    #[test]
    fn test_micro_movement_stays_in_range() {
        let mut library = library();
        let layout = *library.layout();
        for _ in 0..200 {
            let frame = library.idle_frame_with_micro_movement();
            let dx = frame.left_eye.center.x - layout.left_eye().x;
            let dy = frame.left_eye.center.y - layout.left_eye().y;
            assert!((-2.0..=2.0).contains(&dx), "dx = {dx}");
            assert!((-1.0..=1.0).contains(&dy), "dy = {dy}");
            assert_eq!(dx.fract(), 0.0);
        }
        // 缓存的空闲帧不受影响
        assert_eq!(
            library.idle_frame().left_eye.center,
            FaceLayout::default().left_eye()
        );
        assert_eq!(library.idle().len(), 1);
    }

    #[test]
    fn test_micro_range_override() {
        let mut library = library().with_micro_range(0, 0);
        let frame = library.idle_frame_with_micro_movement();
        assert_eq!(**library.idle_frame(), *frame);
    }

    #[test]
    fn test_micro_range_takes_magnitude() {
        let mut library = library().with_micro_range(i32::MIN, -1);
        assert_eq!(library.micro_range, (i32::MAX, 1));

        let frame = library.idle_frame_with_micro_movement();
        let dy = frame.left_eye.center.y - library.layout().left_eye().y;
        assert!((-1.0..=1.0).contains(&dy), "dy = {dy}");
    }

    #[test]
    fn test_renderer_called_once_per_frame() {
        let library = AnimationLibrary::build_with_rng(
            CountingRenderer { calls: 0 },
            FaceLayout::default(),
            StdRng::seed_from_u64(0),
        );
        let expected: usize = PROFILES.iter().map(|p| p.frame_count).sum();
        assert_eq!(library.renderer.calls, expected);
        assert_eq!(**library.idle_frame(), 1);
    }

    #[test]
    fn test_same_seed_same_library() {
        let a = library();
        let b = library();
        for id in ExpressionId::ALL {
            let (fa, fb) = (a.get(id), b.get(id));
            assert!(fa.iter().zip(fb.iter()).all(|(x, y)| x == y));
        }
    }
}
