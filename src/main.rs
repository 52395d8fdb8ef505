use anyhow::Result;
use quiz_client::app::{App, Command};
use quiz_client::utils::logging;
use quiz_client::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = Command::parse(&args)?;

    // 初始化并运行应用
    let output = App::initialize(config)?.run(command).await?;
    print!("{}", output);

    Ok(())
}
