//! 启动引导（bootstrap）
//!
//! 从配置构建动画库与状态机，让 `main.rs` 只保留参数解析与主循环胶水。

use face_runtime::{
    AnimationLibrary, Clock, DiagnosticLevel, FaceStateMachine, analyze_autonomy, analyze_catalog,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::error::HostResult;
use crate::renderer::RasterRenderer;

/// 动画库与自主行为各自的随机源
///
/// 配置了种子时两者都可复现；自主行为使用相邻种子，避免两条序列相同。
pub fn seeded_rngs(seed: Option<u64>) -> (StdRng, StdRng) {
    match seed {
        Some(seed) => (
            StdRng::seed_from_u64(seed),
            StdRng::seed_from_u64(seed.wrapping_add(1)),
        ),
        None => (StdRng::from_entropy(), StdRng::from_entropy()),
    }
}

/// 构建状态机
///
/// 启动时一次性合成全部动画，运行期不再渲染新帧（微动帧除外）。
pub fn build_machine<C: Clock>(
    config: &AppConfig,
    clock: C,
) -> HostResult<FaceStateMachine<RasterRenderer, C>> {
    config.validate()?;

    let layout = config.layout();
    let catalog = config.catalog()?;
    if config.debug.catalog_check {
        report_diagnostics(config);
    }

    let (library_rng, autonomy_rng) = seeded_rngs(config.seed);
    let renderer = RasterRenderer::new(layout);
    let library = AnimationLibrary::build_with_rng(renderer, layout, library_rng);
    let machine = FaceStateMachine::new(library, catalog, clock)
        .with_autonomy(config.autonomy.clone(), autonomy_rng)?;

    info!(
        width = layout.width,
        height = layout.height,
        seed = ?config.seed,
        "状态机就绪"
    );
    Ok(machine)
}

/// 输出目录与自主行为的诊断（只记录，不阻塞启动）
fn report_diagnostics(config: &AppConfig) {
    let Ok(catalog) = config.catalog() else {
        return;
    };

    let mut result = analyze_catalog(&catalog);
    result.merge(analyze_autonomy(&config.autonomy));

    for diagnostic in result.filter_by_level(DiagnosticLevel::Warn) {
        match diagnostic.level {
            DiagnosticLevel::Error => error!(%diagnostic, "配置诊断"),
            _ => warn!(%diagnostic, "配置诊断"),
        }
    }
    info!(
        errors = result.error_count(),
        warnings = result.warn_count(),
        "配置诊断完成"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use face_runtime::{ExpressionId, ManualClock};
    use rand::Rng;
    use std::rc::Rc;

    #[test]
    fn test_seeded_rngs_are_reproducible() {
        let (mut a1, mut b1) = seeded_rngs(Some(7));
        let (mut a2, mut b2) = seeded_rngs(Some(7));
        assert_eq!(a1.r#gen::<u64>(), a2.r#gen::<u64>());
        assert_eq!(b1.r#gen::<u64>(), b2.r#gen::<u64>());

        let (mut a, mut b) = seeded_rngs(Some(7));
        assert_ne!(a.r#gen::<u64>(), b.r#gen::<u64>());
    }

    fn small_config() -> AppConfig {
        AppConfig {
            display: DisplayConfig {
                width: 320,
                height: 240,
            },
            seed: Some(1),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_build_machine_from_config() {
        let machine = build_machine(&small_config(), Rc::new(ManualClock::new())).unwrap();
        assert_eq!(machine.current_state(), ExpressionId::Idle);
        assert_eq!(machine.current_frame().dimensions(), (320, 240));
        assert_eq!(machine.library().frame_count(ExpressionId::Blink), 12);
    }

    #[test]
    fn test_build_machine_rejects_invalid_config() {
        let mut config = small_config();
        config.hold_durations.insert("nope".to_string(), 1.0);
        assert!(build_machine(&config, ManualClock::new()).is_err());
    }

    #[test]
    fn test_build_machine_rejects_out_of_range_values() {
        let mut config = small_config();
        config.hold_durations.insert("happy".to_string(), 1e20);
        assert!(build_machine(&config, ManualClock::new()).is_err());

        let mut config = small_config();
        config.autonomy.blink_interval = (1e20, 2e20);
        assert!(build_machine(&config, ManualClock::new()).is_err());

        let mut config = small_config();
        config.autonomy.micro_offset = (i32::MIN, 1);
        assert!(build_machine(&config, ManualClock::new()).is_err());
    }
}
