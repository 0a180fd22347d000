use anyhow::Context;
use cro_config::CroConfig;
use cro_store::FieldService;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: FieldService,
    pub config: CroConfig,
}

impl AppContext {
    /// Open the field store, replaying the trail under the configured
    /// (or `--data-dir`) data directory.
    pub fn init(mut config: CroConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        if let Some(data_dir) = &flags.data_dir {
            config.storage.data_dir.clone_from(data_dir);
        }
        let service = FieldService::open(&config).with_context(|| {
            format!(
                "failed to open field store in '{}'",
                config.storage.data_dir
            )
        })?;
        tracing::debug!(
            data_dir = %config.storage.data_dir,
            tasks = service.store().len(),
            "application context ready"
        );
        Ok(Self { service, config })
    }
}
