//! 键位映射
//!
//! 单个字符对应一个表情，另有一组控制命令。
//! 无头运行时每行输入可以是按键字符、表情名或命令词。

use std::collections::BTreeMap;

/// 输入产生的动作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// 切换表情（名称交给状态机解析，未知名称由状态机拒绝）
    Expression(String),
    /// 幻灯片暂停 / 继续
    TogglePause,
    /// 幻灯片下一个
    Next,
    /// 幻灯片上一个
    Previous,
    /// 退出
    Quit,
}

/// 默认键位表
const DEFAULT_BINDINGS: [(char, &str); 24] = [
    ('h', "happy"),
    ('s', "surprised"),
    ('c', "confused"),
    ('w', "wink"),
    ('l', "look_left"),
    ('r', "look_right"),
    ('u', "look_up"),
    ('d', "look_down"),
    ('i', "idle"),
    ('j', "joy"),
    ('t', "thinking"),
    ('a', "angry"),
    ('z', "sleepy"),
    ('x', "surprised_mouth"),
    ('q', "sadness"),
    ('f', "furious"),
    ('y', "shy"),
    ('m', "mischievous"),
    ('b', "bored"),
    ('e', "excited"),
    ('n', "fear"),
    ('o', "focused"),
    ('p', "puzzled"),
    ('v', "triumphant"),
];

/// 键位映射表
#[derive(Debug, Clone)]
pub struct KeyMap {
    keys: BTreeMap<char, String>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            keys: DEFAULT_BINDINGS
                .iter()
                .map(|(key, name)| (*key, name.to_string()))
                .collect(),
        }
    }
}

impl KeyMap {
    /// 绑定按键，返回被替换的旧表情名
    pub fn bind(&mut self, key: char, expression: impl Into<String>) -> Option<String> {
        self.keys.insert(key.to_ascii_lowercase(), expression.into())
    }

    /// 单个按键对应的动作
    pub fn action_for_key(&self, key: char) -> Option<KeyAction> {
        match key {
            '\u{1b}' => Some(KeyAction::Quit),
            ' ' => Some(KeyAction::TogglePause),
            _ => self
                .keys
                .get(&key.to_ascii_lowercase())
                .map(|name| KeyAction::Expression(name.clone())),
        }
    }

    /// 解析一行文本输入
    ///
    /// 空行返回 `None`；无法识别的文本按表情名处理。
    pub fn parse_line(&self, line: &str) -> Option<KeyAction> {
        if line.contains(' ') && line.trim().is_empty() {
            return Some(KeyAction::TogglePause);
        }

        let text = line.trim();
        if text.is_empty() {
            return None;
        }

        let lower = text.to_ascii_lowercase();
        match lower.as_str() {
            "quit" | "exit" | "esc" => return Some(KeyAction::Quit),
            "pause" | "space" => return Some(KeyAction::TogglePause),
            "next" | "right" => return Some(KeyAction::Next),
            "prev" | "previous" | "left" => return Some(KeyAction::Previous),
            _ => {}
        }

        let mut chars = lower.chars();
        if let (Some(key), None) = (chars.next(), chars.next())
            && let Some(action) = self.action_for_key(key)
        {
            return Some(action);
        }

        Some(KeyAction::Expression(lower))
    }

    /// 所有绑定（按键有序）
    pub fn bindings(&self) -> impl Iterator<Item = (char, &str)> {
        self.keys.iter().map(|(key, name)| (*key, name.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expr(name: &str) -> Option<KeyAction> {
        Some(KeyAction::Expression(name.to_string()))
    }

    #[test]
    fn test_default_bindings() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.bindings().count(), 24);
        assert_eq!(keymap.action_for_key('h'), expr("happy"));
        assert_eq!(keymap.action_for_key('X'), expr("surprised_mouth"));
        assert_eq!(keymap.action_for_key('\u{1b}'), Some(KeyAction::Quit));
        assert_eq!(keymap.action_for_key('g'), None);
    }

    #[test]
    fn test_parse_line() {
        let keymap = KeyMap::default();
        assert_eq!(keymap.parse_line("v\n"), expr("triumphant"));
        assert_eq!(keymap.parse_line("  Joy "), expr("joy"));
        assert_eq!(keymap.parse_line("left"), Some(KeyAction::Previous));
        assert_eq!(keymap.parse_line("l"), expr("look_left"));
        assert_eq!(keymap.parse_line("quit"), Some(KeyAction::Quit));
        assert_eq!(keymap.parse_line("esc"), Some(KeyAction::Quit));
        // q 是表情键，不是退出
        assert_eq!(keymap.parse_line("q"), expr("sadness"));
        assert_eq!(keymap.parse_line(" "), Some(KeyAction::TogglePause));
        assert_eq!(keymap.parse_line(""), None);
        assert_eq!(keymap.parse_line("\n"), None);
        // 未知文本交给状态机拒绝
        assert_eq!(keymap.parse_line("g"), expr("g"));
        assert_eq!(keymap.parse_line("dance"), expr("dance"));
    }

    #[test]
    fn test_rebind() {
        let mut keymap = KeyMap::default();
        assert_eq!(keymap.bind('H', "joy"), Some("happy".to_string()));
        assert_eq!(keymap.action_for_key('h'), expr("joy"));
    }
}
