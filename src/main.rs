use std::process::ExitCode;

use clap::Parser;
use dotenv::dotenv;
use human_panic::setup_panic;
use tracing::{debug, warn};

// 从 lib.rs 导入模块
use rust_labreview::cli::{self, Cli};
use rust_labreview::config::AppConfig;
use rust_labreview::runtime::lifetime;

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // 记录程序启动时间
    let start_time = chrono::Utc::now();

    setup_panic!();
    let cli = Cli::parse();

    // 初始化配置
    if let Err(e) = AppConfig::init() {
        eprintln!("Failed to initialize configuration: {e}");
        return ExitCode::FAILURE;
    }
    let config = AppConfig::get();

    // 初始化日志，标准输出留给命令结果
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stderr());
    let filter = tracing_subscriber::EnvFilter::new(&config.app.log_level);
    let tracing_format = tracing_subscriber::fmt::format()
        .with_level(true)
        .with_ansi(true);

    let tracing_builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking_writer)
        .event_format(tracing_format);

    if config.is_development() {
        tracing_builder
            .with_file(true)
            .with_line_number(true)
            .init();
    } else {
        tracing_builder.json().init();
    }

    warn!(
        "Starting {} v{} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        config.app.system_name
    );

    let actor = cli.actor();
    let result = match lifetime::startup::prepare_startup(config).await {
        Ok(context) => {
            debug!(
                "Startup completed in {} ms",
                chrono::Utc::now()
                    .signed_duration_since(start_time)
                    .num_milliseconds()
            );
            cli::execute(cli.command, &actor, &context).await
        }
        Err(e) => Err(e),
    };

    match result {
        Ok(output) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&output).unwrap_or_else(|_| output.to_string())
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            #[cfg(debug_assertions)]
            eprintln!("{}", e.format_colored());
            println!("{}", cli::error_json(&e));
            ExitCode::FAILURE
        }
    }
}
