mod structs;

pub use structs::*;

use std::sync::OnceLock;

static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Initialize the global configuration; later calls keep the first value
pub fn init_config(path: Option<&str>) -> &'static AppConfig {
    CONFIG.get_or_init(|| {
        // .env 不存在时忽略
        dotenvy::dotenv().ok();
        AppConfig::load(path)
    })
}
