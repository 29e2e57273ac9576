use anyhow::Result;
use park_map_builder::{App, Config};

fn main() -> Result<()> {
    // 初始化日誌
    park_map_builder::logger::init();

    // 載入配置
    let config = Config::from_env();

    // 執行完整流程
    App::initialize(config).run()?;

    Ok(())
}
