use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortkeepError {
    Validation(String),
    FileOperation(String),
    Serialization(String),
    Shortener(String),
    Config(String),
}

impl ShortkeepError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ShortkeepError::Validation(_) => "E001",
            ShortkeepError::FileOperation(_) => "E002",
            ShortkeepError::Serialization(_) => "E003",
            ShortkeepError::Shortener(_) => "E004",
            ShortkeepError::Config(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ShortkeepError::Validation(_) => "Validation Error",
            ShortkeepError::FileOperation(_) => "File Operation Error",
            ShortkeepError::Serialization(_) => "Serialization Error",
            ShortkeepError::Shortener(_) => "Shortening Service Error",
            ShortkeepError::Config(_) => "Configuration Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> &str {
        match self {
            ShortkeepError::Validation(msg)
            | ShortkeepError::FileOperation(msg)
            | ShortkeepError::Serialization(msg)
            | ShortkeepError::Shortener(msg)
            | ShortkeepError::Config(msg) => msg,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ShortkeepError::Validation(_))
    }

    /// 格式化为彩色输出（用于 CLI 模式）
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出（用于 TUI 状态栏）
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ShortkeepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ShortkeepError {}

impl ShortkeepError {
    pub fn validation<T: Into<String>>(msg: T) -> Self {
        ShortkeepError::Validation(msg.into())
    }

    pub fn file_operation<T: Into<String>>(msg: T) -> Self {
        ShortkeepError::FileOperation(msg.into())
    }

    pub fn serialization<T: Into<String>>(msg: T) -> Self {
        ShortkeepError::Serialization(msg.into())
    }

    pub fn shortener<T: Into<String>>(msg: T) -> Self {
        ShortkeepError::Shortener(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ShortkeepError::Config(msg.into())
    }
}

impl From<std::io::Error> for ShortkeepError {
    fn from(err: std::io::Error) -> Self {
        ShortkeepError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for ShortkeepError {
    fn from(err: serde_json::Error) -> Self {
        ShortkeepError::Serialization(err.to_string())
    }
}

impl From<ureq::Error> for ShortkeepError {
    fn from(err: ureq::Error) -> Self {
        ShortkeepError::Shortener(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShortkeepError>;
