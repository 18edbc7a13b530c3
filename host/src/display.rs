//! # Display 模块
//!
//! 帧的去处。主循环每个 tick 把当前帧交给一个 [`Display`]。
//!
//! - [`Headless`]：不输出像素，只在表情变化时记录日志
//! - [`PngSequence`]：每隔 N 个 tick 把当前帧写成 PNG

use std::fs;
use std::path::{Path, PathBuf};

use face_runtime::ExpressionId;
use image::GrayImage;
use tracing::{debug, info};

use crate::error::{HostError, HostResult};

/// 一次呈现的上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameInfo {
    /// 主循环 tick 序号（从 0 开始）
    pub tick: u64,
    /// 当前表情
    pub expression: ExpressionId,
    /// 当前帧号
    pub frame_index: usize,
}

/// 帧输出
pub trait Display {
    /// 呈现一帧
    fn present(&mut self, info: FrameInfo, frame: &GrayImage) -> HostResult<()>;
}

/// 无头输出
#[derive(Debug, Default)]
pub struct Headless {
    last: Option<ExpressionId>,
    presented: u64,
}

impl Headless {
    pub fn new() -> Self {
        Self::default()
    }

    /// 已呈现的帧数
    pub fn presented(&self) -> u64 {
        self.presented
    }
}

impl Display for Headless {
    fn present(&mut self, info: FrameInfo, _frame: &GrayImage) -> HostResult<()> {
        if self.last != Some(info.expression) {
            debug!(tick = info.tick, expression = %info.expression, "显示表情");
            self.last = Some(info.expression);
        }
        self.presented += 1;
        Ok(())
    }
}

/// PNG 序列输出
#[derive(Debug)]
pub struct PngSequence {
    dir: PathBuf,
    every: u64,
    written: usize,
}

impl PngSequence {
    /// 创建输出目录（不存在时）
    pub fn new(dir: impl Into<PathBuf>, every: u32) -> HostResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        info!(dir = %dir.display(), every, "导出 PNG 帧");
        Ok(Self {
            dir,
            every: every.max(1) as u64,
            written: 0,
        })
    }

    /// 输出目录
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 已写出的文件数
    pub fn written(&self) -> usize {
        self.written
    }

    fn file_name(info: &FrameInfo) -> String {
        format!(
            "frame_{:06}_{}_{:02}.png",
            info.tick, info.expression, info.frame_index
        )
    }
}

impl Display for PngSequence {
    fn present(&mut self, info: FrameInfo, frame: &GrayImage) -> HostResult<()> {
        if info.tick % self.every != 0 {
            return Ok(());
        }

        let path = self.dir.join(Self::file_name(&info));
        frame
            .save(&path)
            .map_err(|source| HostError::Export { path, source })?;
        self.written += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(tick: u64) -> FrameInfo {
        FrameInfo {
            tick,
            expression: ExpressionId::LookLeft,
            frame_index: 3,
        }
    }

    #[test]
    fn test_headless_counts_frames() {
        let mut display = Headless::new();
        let frame = GrayImage::new(4, 4);
        for tick in 0..5 {
            display.present(info(tick), &frame).unwrap();
        }
        assert_eq!(display.presented(), 5);
    }

    #[test]
    fn test_png_sequence_writes_every_nth() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("frames");
        let mut display = PngSequence::new(&out, 2).unwrap();
        let frame = GrayImage::new(8, 8);
        for tick in 0..5 {
            display.present(info(tick), &frame).unwrap();
        }
        assert_eq!(display.written(), 3);
        assert!(out.join("frame_000000_look_left_03.png").exists());
        assert!(out.join("frame_000004_look_left_03.png").exists());
        assert!(!out.join("frame_000001_look_left_03.png").exists());
    }

    #[test]
    fn test_png_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut display = PngSequence::new(dir.path(), 1).unwrap();
        let mut frame = GrayImage::new(8, 8);
        frame.put_pixel(2, 3, image::Luma([255]));
        display.present(info(0), &frame).unwrap();

        let loaded = image::open(dir.path().join("frame_000000_look_left_03.png"))
            .unwrap()
            .to_luma8();
        assert_eq!(loaded, frame);
    }
}
