//! App state definition and basic state management

mod form_state;
mod link_operations;
mod navigation;

pub use form_state::{Focus, FormState};

use std::sync::Arc;
use std::time::Instant;

use ratatui::widgets::TableState;
use tokio::task::JoinHandle;

use tracing::warn;

use crate::errors::Result;
use crate::services::{LinkService, SYNC_INTERVAL};
use crate::storage::{LinkId, LinkRecord};

/// 当前屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurrentScreen {
    Main,
    DeleteConfirm,
    Help,
    Exiting,
}

pub struct App {
    pub service: Arc<LinkService>,
    /// 最近一次从 service 读取的快照
    pub links: Vec<LinkRecord>,
    pub current_screen: CurrentScreen,
    pub focus: Focus,

    pub form: FormState,
    /// 进行中的提交
    pub pending_submit: Option<JoinHandle<Result<LinkRecord>>>,
    /// 删除确认框针对的链接，进入确认框时固定
    pub pending_delete: Option<LinkId>,
    last_sync: Instant,

    // UI state
    pub selected_index: usize,
    pub table_state: TableState,
    pub status_message: String,
    pub error_message: String,
}

impl App {
    pub fn new(service: Arc<LinkService>) -> Self {
        let mut table_state = TableState::default();
        table_state.select(Some(0));

        let mut app = Self {
            links: service.list(),
            service,
            current_screen: CurrentScreen::Main,
            focus: Focus::default(),
            form: FormState::new(),
            pending_submit: None,
            pending_delete: None,
            last_sync: Instant::now(),
            selected_index: 0,
            table_state,
            status_message: String::new(),
            error_message: String::new(),
        };
        app.clamp_selection();
        app
    }

    /// 重新读取链接列表（过期移除会在后台发生）
    pub fn refresh_links(&mut self) {
        self.links = self.service.list();
        self.clamp_selection();

        if self.current_screen == CurrentScreen::DeleteConfirm
            && self.pending_delete_link().is_none()
        {
            self.pending_delete = None;
            self.current_screen = CurrentScreen::Main;
            self.set_status("Link expired before it was deleted".to_string());
        }
    }

    /// Pick up links other processes stored, at most once per sync interval
    pub fn sync_storage(&mut self) {
        if self.last_sync.elapsed() < SYNC_INTERVAL {
            return;
        }
        self.last_sync = Instant::now();
        if let Err(e) = self.service.sync() {
            warn!("Failed to re-read stored links: {}", e);
        }
    }

    pub fn pending_delete_link(&self) -> Option<&LinkRecord> {
        let id = self.pending_delete?;
        self.links.iter().find(|r| r.id == id)
    }

    pub fn get_selected_link(&self) -> Option<&LinkRecord> {
        self.links.get(self.selected_index)
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = message;
        self.error_message.clear();
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = message;
        self.status_message.clear();
    }

    pub fn clear_messages(&mut self) {
        self.status_message.clear();
        self.error_message.clear();
    }
}
