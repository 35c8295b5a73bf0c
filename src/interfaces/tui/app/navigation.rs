//! Navigation and selection logic

use super::App;
use crate::interfaces::tui::constants::PAGE_SCROLL_STEP;

impl App {
    pub fn move_selection_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
        self.table_state.select(Some(self.selected_index));
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index < self.links.len().saturating_sub(1) {
            self.selected_index += 1;
        }
        self.table_state.select(Some(self.selected_index));
    }

    pub fn jump_to_top(&mut self) {
        self.selected_index = 0;
        self.table_state.select(Some(self.selected_index));
    }

    pub fn jump_to_bottom(&mut self) {
        self.selected_index = self.links.len().saturating_sub(1);
        self.table_state.select(Some(self.selected_index));
    }

    pub fn page_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(PAGE_SCROLL_STEP);
        self.table_state.select(Some(self.selected_index));
    }

    pub fn page_down(&mut self) {
        let max_index = self.links.len().saturating_sub(1);
        self.selected_index = (self.selected_index + PAGE_SCROLL_STEP).min(max_index);
        self.table_state.select(Some(self.selected_index));
    }

    /// 列表变短后把选中项拉回范围内
    pub fn clamp_selection(&mut self) {
        if self.links.is_empty() {
            self.selected_index = 0;
            self.table_state.select(None);
        } else {
            self.selected_index = self.selected_index.min(self.links.len() - 1);
            self.table_state.select(Some(self.selected_index));
        }
    }

    pub fn select_id(&mut self, id: crate::storage::LinkId) {
        if let Some(idx) = self.links.iter().position(|r| r.id == id) {
            self.selected_index = idx;
            self.table_state.select(Some(idx));
        }
    }
}
