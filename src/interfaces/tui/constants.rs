//! TUI 常量定义

use std::time::Duration;

/// 事件轮询间隔，同时驱动剩余时间的刷新
pub const TICK_RATE: Duration = Duration::from_millis(250);

/// URL 显示截断长度
pub const URL_TRUNCATE_LENGTH: usize = 50;

/// 翻页滚动步长
pub const PAGE_SCROLL_STEP: usize = 10;

/// 弹窗尺寸配置
#[derive(Debug, Clone, Copy)]
pub struct PopupSize {
    /// 宽度百分比 (0-100)
    pub width: u16,
    /// 高度百分比 (0-100)
    pub height: u16,
}

impl PopupSize {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

pub mod popup {
    use super::PopupSize;

    pub const HELP: PopupSize = PopupSize::new(70, 85);
    pub const DELETE_CONFIRM: PopupSize = PopupSize::new(65, 45);
    pub const EXITING: PopupSize = PopupSize::new(50, 25);
}
