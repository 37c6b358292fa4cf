//! voxserve - 语音合成服务
//!
//! 启动流程：配置 → 日志 → 音色注册表 → 模型初始化 → HTTP 服务

use std::sync::Arc;

use voxserve::application::{
    AudioEncoderPort, ModelLoaderPort, ModelState, SynthesisEngine, VoiceRegistryPort,
};
use voxserve::config::{load_config, print_config, AppConfig, ModelBackend};
use voxserve::infrastructure::adapters::{
    select_device, FakeModelConfig, FakeModelLoader, HttpModelLoader, WavEncoder,
};
use voxserve::infrastructure::http::{AppState, HttpServer};
use voxserve::infrastructure::voices::VoiceRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "voxserve starting");
    print_config(&config);

    // 音色注册表（单个音色出错不影响启动）
    let registry = VoiceRegistry::load(&config.voices.dir).await?;
    let voices: Arc<dyn VoiceRegistryPort> = Arc::new(registry);
    tracing::info!(voices = ?voices.list(), "Available voices");

    let loader = create_loader(&config)?;
    let encoder: Arc<dyn AudioEncoderPort> = Arc::new(WavEncoder::new(config.audio.sample_format));

    let engine = SynthesisEngine::initialize(
        loader.as_ref(),
        &config.model.engine_options(),
        voices.clone(),
        encoder,
    )
    .await;

    // 模型不可用时仍然启动，就绪检查返回 503
    if engine.state() == ModelState::Unavailable {
        tracing::error!("Synthesis model unavailable; all synthesis requests will fail");
    } else {
        tracing::info!(
            state = %engine.state(),
            device = %engine.device(),
            "Synthesis engine ready"
        );
    }

    let state = AppState::new(Arc::new(engine), voices);
    let server = HttpServer::new((&config.server).into(), state);

    // 启动服务器（带优雅关闭）
    server
        .run_with_shutdown(async {
            tokio::signal::ctrl_c()
                .await
                .expect("Failed to listen for ctrl-c");
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

/// 初始化日志（RUST_LOG 优先）
fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},voxserve={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.log.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// 按配置选择模型后端
fn create_loader(config: &AppConfig) -> anyhow::Result<Box<dyn ModelLoaderPort>> {
    match config.model.backend {
        ModelBackend::Http => {
            let loader = HttpModelLoader::new(config.model.http_model_config())?;
            Ok(Box::new(loader))
        }
        ModelBackend::Fake => {
            tracing::warn!("Using fake synthesis model, output is a test tone");
            Ok(Box::new(FakeModelLoader::new(FakeModelConfig {
                device: select_device(config.model.device),
                ..Default::default()
            })))
        }
    }
}
