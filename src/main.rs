use anyhow::Context;
use catalog::config::{find_config_file, load_config};
use catalog::infrastructure::logger::Logger;
use catalog::{router, AppState};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config().context("加载配置失败")?;
    Logger::init(&config.logging.level);

    match find_config_file() {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }
    info!("商品数据文件: {}", config.storage.data_path.display());

    let state = AppState::from_config(&config);
    let app = router(state, config.http.request_timeout());

    let addr = config.http.socket_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("无法绑定到 {}", addr))?;

    info!("🚀 商品目录服务运行在 http://{}", addr);
    info!("   GET    /products      - 商品列表 (name, sort_by_price, order, limit, offset)");
    info!("   POST   /products      - 创建商品");
    info!("   GET    /products/:id  - 获取商品");
    info!("   PUT    /products/:id  - 部分更新商品");
    info!("   DELETE /products/:id  - 删除商品");

    axum::serve(listener, app).await.context("服务器运行失败")?;
    Ok(())
}
