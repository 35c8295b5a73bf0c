//! Link operations: submit, delete, copy

use tracing::{error, warn};

use super::{App, CurrentScreen};
use crate::errors::ShortkeepError;
use crate::services::{LinkService, SubmissionState};

impl App {
    /// 校验表单并在后台发起缩短请求
    ///
    /// 校验失败只显示提示，不发请求；请求进行中再次提交会被忽略。
    pub fn submit_form(&mut self) {
        if self.form.is_loading() {
            return;
        }

        self.form.state = SubmissionState::Validating;
        if let Err(e) = LinkService::validate(&self.form.url, self.form.expiration) {
            self.form.state = SubmissionState::Rejected(e.message().to_string());
            return;
        }

        self.form.state = SubmissionState::Requesting;
        let service = self.service.clone();
        let url = self.form.url.clone();
        let expiration = self.form.expiration;
        self.pending_submit = Some(tokio::spawn(async move {
            service.submit(&url, expiration).await
        }));
    }

    /// 收取已完成的提交结果；未完成时不做任何事
    pub async fn poll_submission(&mut self) {
        let finished = self
            .pending_submit
            .as_ref()
            .is_some_and(|handle| handle.is_finished());
        if !finished {
            return;
        }
        let Some(handle) = self.pending_submit.take() else {
            return;
        };

        match handle.await {
            Ok(Ok(record)) => {
                self.form.clear();
                self.form.state = SubmissionState::Succeeded(record.id);
                self.set_status(format!("Shortened: {}", record.link));
                self.refresh_links();
                self.select_id(record.id);
            }
            Ok(Err(ShortkeepError::Validation(msg))) => {
                self.form.state = SubmissionState::Rejected(msg);
            }
            // 服务错误已在 service 中记录日志，界面保持原状
            Ok(Err(_)) => self.form.state = SubmissionState::Failed,
            Err(e) => {
                error!("Submission task failed: {}", e);
                self.form.state = SubmissionState::Failed;
            }
        }
    }

    /// 打开删除确认框，并记下当前选中的链接
    pub fn begin_delete(&mut self) {
        let Some(id) = self.get_selected_link().map(|r| r.id) else {
            return;
        };
        self.pending_delete = Some(id);
        self.current_screen = CurrentScreen::DeleteConfirm;
    }

    /// 删除确认框打开时记下的链接，与之后的选中位置无关
    pub fn confirm_delete(&mut self) {
        self.current_screen = CurrentScreen::Main;
        let Some(id) = self.pending_delete.take() else {
            return;
        };
        let link = self
            .links
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.link.clone())
            .unwrap_or_else(|| id.to_string());

        match self.service.remove(id) {
            Ok(true) => self.set_status(format!("Deleted: {}", link)),
            Ok(false) => self.set_status(format!("Already gone: {}", link)),
            Err(e) => self.set_error(format!("Failed to delete link: {}", e.message())),
        }
        self.refresh_links();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.current_screen = CurrentScreen::Main;
    }

    pub fn copy_selected_link(&mut self) {
        let Some(link) = self.get_selected_link().map(|r| r.link.clone()) else {
            return;
        };

        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(link.clone())) {
            Ok(()) => self.set_status(format!("Copied: {}", link)),
            Err(e) => {
                warn!("Clipboard unavailable: {}", e);
                self.set_error("Clipboard unavailable".to_string());
            }
        }
    }
}
