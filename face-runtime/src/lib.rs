//! # Face Runtime
//!
//! 机器人动画表情的核心运行时库。
//!
//! ## 架构概述
//!
//! `face-runtime` 是纯逻辑核心，不依赖任何显示设备或 IO。
//! 像素格式由宿主提供的 [`FaceRenderer`] 决定，核心只负责
//! "什么时候显示哪一帧"：
//!
//! ```text
//! Host                               Runtime
//!   │                                   │
//!   │──── change_state("happy") ──────►│
//!   │                                   │ update()
//!   │◄─── TickOutcome ─────────────────│
//!   │◄─── current_frame() ─────────────│
//!   │                                   │
//! ```
//!
//! ## 核心类型
//!
//! - [`ExpressionId`]：25 个表情的封闭集合
//! - [`ExpressionCatalog`]：表情保持时长
//! - [`AnimationLibrary`]：启动时合成并缓存的帧序列
//! - [`FaceStateMachine`]：状态切换、帧推进与空闲自主行为
//! - [`StateInfo`]：调试用状态快照
//!
//! ## 使用示例
//!
//! ```ignore
//! use face_runtime::{AnimationLibrary, ExpressionCatalog, FaceLayout, FaceStateMachine, MonotonicClock};
//!
//! let library = AnimationLibrary::build(renderer, FaceLayout::default());
//! let mut machine = FaceStateMachine::new(library, ExpressionCatalog::default(), MonotonicClock);
//!
//! loop {
//!     if let Some(name) = input.try_recv() {
//!         machine.change_state(&name);
//!     }
//!     machine.update();
//!     display.present(machine.current_frame());
//!     sleep(Duration::from_millis(33));
//! }
//! ```
//!
//! ## 模块结构
//!
//! - [`expression`]：表情标识
//! - [`catalog`]：表情目录
//! - [`face`]：脸部几何参数
//! - [`profile`]：每个表情的动画描述表
//! - [`synth`]：按描述表逐帧合成脸部参数
//! - [`library`]：动画库与渲染协作者
//! - [`autonomy`]：空闲自主行为（眨眼、微动）
//! - [`machine`]：状态机
//! - [`diagnostic`]：配置静态检查

pub mod autonomy;
pub mod catalog;
pub mod clock;
pub mod diagnostic;
pub mod easing;
pub mod error;
pub mod expression;
pub mod face;
pub mod library;
pub mod machine;
pub mod profile;
pub mod state;
pub mod synth;

// 重导出核心类型
pub use autonomy::{AutonomyConfig, IdleAction, IdleAutonomy, MAX_MICRO_OFFSET};
pub use catalog::ExpressionCatalog;
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use diagnostic::{
    Diagnostic, DiagnosticLevel, DiagnosticResult, analyze_autonomy, analyze_catalog,
};
pub use easing::Easing;
pub use error::{FaceError, FaceResult};
pub use expression::ExpressionId;
pub use face::{
    Decoration, Eye, EyeShape, FaceLayout, FaceParams, Glyph, Mouth, MouthKind, Side, Vec2,
};
pub use library::{Animation, AnimationLibrary, FaceRenderer, ParamRenderer};
pub use machine::{FaceStateMachine, PLAYBACK_FPS, StateChange, TickOutcome};
pub use state::{MachineSnapshot, StateInfo};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        let library = AnimationLibrary::build(ParamRenderer, FaceLayout::default());
        let mut machine =
            FaceStateMachine::new(library, ExpressionCatalog::default(), MonotonicClock);

        assert!(matches!(
            machine.change_state("Happy"),
            StateChange::Entered { .. }
        ));
        machine.update();
        assert_eq!(machine.current_state(), ExpressionId::Happy);
        assert_eq!(machine.previous_state(), ExpressionId::Idle);
    }
}
