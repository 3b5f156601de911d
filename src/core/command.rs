//! 命令系统：语义命令定义
//!
//! - Command: 阅读器命令枚举（不关心具体按键）
//! - 每个命令有稳定的名字，供设置文件中的快捷键规则引用

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Command {
    // ==================== 阅读控制 ====================
    Start,
    PauseResume,
    Stop,
    Reload,
    OpenPrompt,

    // ==================== 速度与起点 ====================
    WpmUp,
    WpmDown,
    StartPositionUp,
    StartPositionDown,

    // ==================== 显示开关 ====================
    ToggleFocusHighlight,
    ToggleOrpAlignment,
    ToggleSentenceAware,

    // ==================== 主题 ====================
    DarkMode,
    LightMode,
    CycleTextColor,
    CycleFocusColor,

    // ==================== 路径输入框 ====================
    PromptConfirm,
    PromptCancel,
    PromptBackspace,

    // ==================== 系统操作 ====================
    Quit,

    // ==================== 扩展点 ====================
    Custom(String),
}

const NAMED: [Command; 20] = [
    Command::Start,
    Command::PauseResume,
    Command::Stop,
    Command::Reload,
    Command::OpenPrompt,
    Command::WpmUp,
    Command::WpmDown,
    Command::StartPositionUp,
    Command::StartPositionDown,
    Command::ToggleFocusHighlight,
    Command::ToggleOrpAlignment,
    Command::ToggleSentenceAware,
    Command::DarkMode,
    Command::LightMode,
    Command::CycleTextColor,
    Command::CycleFocusColor,
    Command::PromptConfirm,
    Command::PromptCancel,
    Command::PromptBackspace,
    Command::Quit,
];

impl Command {
    pub fn name(&self) -> &str {
        match self {
            Command::Start => "reader.start",
            Command::PauseResume => "reader.pauseResume",
            Command::Stop => "reader.stop",
            Command::Reload => "reader.reload",
            Command::OpenPrompt => "reader.openFile",
            Command::WpmUp => "reader.wpmUp",
            Command::WpmDown => "reader.wpmDown",
            Command::StartPositionUp => "reader.startPositionUp",
            Command::StartPositionDown => "reader.startPositionDown",
            Command::ToggleFocusHighlight => "reader.toggleFocusHighlight",
            Command::ToggleOrpAlignment => "reader.toggleOrpAlignment",
            Command::ToggleSentenceAware => "reader.toggleSentenceAware",
            Command::DarkMode => "theme.dark",
            Command::LightMode => "theme.light",
            Command::CycleTextColor => "theme.cycleTextColor",
            Command::CycleFocusColor => "theme.cycleFocusColor",
            Command::PromptConfirm => "prompt.confirm",
            Command::PromptCancel => "prompt.cancel",
            Command::PromptBackspace => "prompt.backspace",
            Command::Quit => "quit",
            Command::Custom(name) => name,
        }
    }

    /// Inverse of [`Command::name`]; unknown names become `Custom`.
    pub fn from_name(name: &str) -> Command {
        let name = name.trim();
        NAMED
            .iter()
            .find(|cmd| cmd.name() == name)
            .cloned()
            .unwrap_or_else(|| Command::Custom(name.to_string()))
    }

    /// Commands that change what is persisted in the settings file.
    pub fn is_setting_command(&self) -> bool {
        matches!(
            self,
            Command::WpmUp
                | Command::WpmDown
                | Command::StartPositionUp
                | Command::StartPositionDown
                | Command::ToggleFocusHighlight
                | Command::ToggleOrpAlignment
                | Command::ToggleSentenceAware
                | Command::DarkMode
                | Command::LightMode
                | Command::CycleTextColor
                | Command::CycleFocusColor
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/core/command.rs"]
mod tests;
