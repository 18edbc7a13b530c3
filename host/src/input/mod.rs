//! # Input 模块
//!
//! 输入采集，把文本行转换为 [`KeyAction`]。
//!
//! ## 设计说明
//!
//! - 读取在后台线程进行，主循环每个 tick 非阻塞地取出所有待处理输入
//! - 行到动作的映射由 [`KeyMap`] 完成
//! - 输入源关闭后不再产生动作，主循环继续运行

mod keymap;

pub use keymap::{KeyAction, KeyMap};

use std::io::{BufRead, BufReader};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;

use tracing::{debug, warn};

/// 输入管理器
#[derive(Debug)]
pub struct InputManager {
    /// 文本行通道
    lines: Receiver<String>,
    /// 键位映射
    keymap: KeyMap,
    /// 输入源是否已关闭
    closed: bool,
}

impl InputManager {
    /// 从任意行读取器采集输入（后台线程）
    pub fn from_reader<R>(reader: R, keymap: KeyMap) -> Self
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for line in reader.lines() {
                match line {
                    Ok(line) => {
                        if tx.send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "读取输入失败");
                        break;
                    }
                }
            }
        });
        Self::with_receiver(rx, keymap)
    }

    /// 从标准输入采集
    pub fn stdin(keymap: KeyMap) -> Self {
        Self::from_reader(BufReader::new(std::io::stdin()), keymap)
    }

    /// 由调用方直接推送文本行
    pub fn channel(keymap: KeyMap) -> (Sender<String>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, Self::with_receiver(rx, keymap))
    }

    /// 不接收任何输入
    pub fn detached(keymap: KeyMap) -> Self {
        let (_, rx) = mpsc::channel();
        Self::with_receiver(rx, keymap)
    }

    fn with_receiver(lines: Receiver<String>, keymap: KeyMap) -> Self {
        Self {
            lines,
            keymap,
            closed: false,
        }
    }

    /// 取出本 tick 的所有动作（不阻塞）
    pub fn poll(&mut self) -> Vec<KeyAction> {
        let mut actions = Vec::new();
        if self.closed {
            return actions;
        }

        loop {
            match self.lines.try_recv() {
                Ok(line) => {
                    if let Some(action) = self.keymap.parse_line(&line) {
                        debug!(?action, "输入");
                        actions.push(action);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!("输入源已关闭");
                    self.closed = true;
                    break;
                }
            }
        }
        actions
    }

    /// 输入源是否已关闭
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// 键位映射
    pub fn keymap(&self) -> &KeyMap {
        &self.keymap
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    #[test]
    fn test_channel_input() {
        let (tx, mut input) = InputManager::channel(KeyMap::default());
        assert!(input.poll().is_empty());

        tx.send("h".to_string()).unwrap();
        tx.send("".to_string()).unwrap();
        tx.send("next".to_string()).unwrap();
        assert_eq!(
            input.poll(),
            vec![
                KeyAction::Expression("happy".to_string()),
                KeyAction::Next
            ]
        );

        drop(tx);
        assert!(input.poll().is_empty());
        assert!(input.is_closed());
    }

    #[test]
    fn test_detached_is_closed_after_poll() {
        let mut input = InputManager::detached(KeyMap::default());
        assert!(input.poll().is_empty());
        assert!(input.is_closed());
    }

    #[test]
    fn test_reader_input() {
        let reader = Cursor::new("joy\nquit\n");
        let mut input = InputManager::from_reader(reader, KeyMap::default());

        let mut actions = Vec::new();
        let deadline = Instant::now() + Duration::from_secs(5);
        while !input.is_closed() && Instant::now() < deadline {
            actions.extend(input.poll());
            std::thread::sleep(Duration::from_millis(1));
        }
        assert_eq!(
            actions,
            vec![KeyAction::Expression("joy".to_string()), KeyAction::Quit]
        );
    }
}
