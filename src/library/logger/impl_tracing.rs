use crate::library::error::{Error, Result};
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Forwards log lines to `tracing`, keeping the namespace as a field.
#[derive(Debug, Clone, Default)]
pub struct LoggerTracing {
    namespace: Option<String>,
}

impl LoggerTracing {
    pub fn new() -> Self {
        Self { namespace: None }
    }

    /// Installs a global fmt subscriber filtered by `RUST_LOG`, defaulting to `default_filter`.
    pub fn install_subscriber(default_filter: &str) -> Result<()> {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(default_filter))
            .map_err(|e| Error::Config(e.to_string()))?;

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .map_err(|e| Error::Config(e.to_string()))
    }

    fn namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or("")
    }
}

impl Logger for LoggerTracing {
    fn info(&self, message: &str) -> Result<()> {
        tracing::info!(namespace = self.namespace(), "{}", message);
        Ok(())
    }

    fn warn(&self, message: &str) -> Result<()> {
        tracing::warn!(namespace = self.namespace(), "{}", message);
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        let new_namespace = match &self.namespace {
            Some(current) => format!("{}:{}", current, namespace),
            None => namespace.to_string(),
        };

        Arc::new(LoggerTracing {
            namespace: Some(new_namespace),
        })
    }
}
