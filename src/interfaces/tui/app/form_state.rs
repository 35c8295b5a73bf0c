//! 表单状态管理
//!
//! URL 输入、过期时间选择以及提交流程的状态

use crate::services::SubmissionState;
use crate::storage::ExpirationChoice;

/// 主界面上当前获得焦点的区域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Url,
    Expiration,
    List,
}

impl Focus {
    const ALL: [Self; 3] = [Self::Url, Self::Expiration, Self::List];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|x| *x == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|x| *x == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn is_form(self) -> bool {
        !matches!(self, Self::List)
    }
}

#[derive(Debug, Default)]
pub struct FormState {
    pub url: String,
    /// 未选择时为 None
    pub expiration: Option<ExpirationChoice>,
    pub state: SubmissionState,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 清空输入，回到 Idle
    pub fn clear(&mut self) {
        self.url.clear();
        self.expiration = None;
        self.state = SubmissionState::Idle;
    }

    pub fn push_char(&mut self, c: char) {
        self.url.push(c);
        self.settle();
    }

    pub fn pop_char(&mut self) {
        self.url.pop();
        self.settle();
    }

    /// 上一次提交结束后，再次编辑回到 Idle
    fn settle(&mut self) {
        if matches!(
            self.state,
            SubmissionState::Succeeded(_) | SubmissionState::Failed
        ) {
            self.state = SubmissionState::Idle;
        }
    }

    /// 切换过期时间；任何选择都会清除校验错误
    pub fn cycle_expiration(&mut self, forward: bool) {
        self.expiration = Some(if forward {
            ExpirationChoice::cycle(self.expiration)
        } else {
            ExpirationChoice::cycle_back(self.expiration)
        });
        if matches!(self.state, SubmissionState::Rejected(_)) {
            self.state = SubmissionState::Idle;
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Rejected(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }
}
