mod config;
#[macro_use]
mod ui;

mod app;

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // 备用屏幕下不能写 stderr，trace 输出到缓存目录
    let trace = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::paths::trace_file()?)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("userdeck=info".parse()?)
                .add_directive("userdeck_core=info".parse()?),
        )
        .with_writer(Mutex::new(trace))
        .with_ansi(false)
        .init();

    let mut app = app::App::new()?;
    app.run().await
}
