//! Runtime context resolution for planloop.
//!
//! Every command resolves its configuration and event journal here, so the
//! lookup rules live in one place:
//!
//! - Config: `--config`, then `$PLANLOOP_CONFIG`, then `./planloop.yaml`,
//!   then built-in defaults
//! - Journal: `--event-log`, then `events_path` from config, else disabled

use crate::cli::GlobalArgs;
use crate::config::Config;
use crate::error::Result;
use crate::events::EventLog;
use crate::session::Session;

/// Resolved configuration and journal for one invocation.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: Config,
    pub events: EventLog,
}

impl AppContext {
    /// Resolve the context from global CLI options.
    pub fn resolve(global: &GlobalArgs) -> Result<Self> {
        let config = Config::resolve(global.config.as_deref())?;
        Ok(Self::with_config(config, global))
    }

    /// Build a context from an already-loaded config.
    pub fn with_config(config: Config, global: &GlobalArgs) -> Self {
        let journal = global
            .event_log
            .clone()
            .or_else(|| config.events_path.clone());
        Self {
            config,
            events: EventLog::new(journal),
        }
    }

    /// Start a new session backed by the configured generator.
    pub fn session(&self) -> Session {
        Session::from_config(&self.config, self.events.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    #[test]
    fn test_event_log_flag_overrides_config() {
        let config = Config {
            events_path: Some(PathBuf::from("from-config.ndjson")),
            ..Default::default()
        };
        let global = GlobalArgs {
            config: None,
            event_log: Some(PathBuf::from("from-flag.ndjson")),
        };

        let ctx = AppContext::with_config(config, &global);

        assert_eq!(ctx.events.path(), Some(Path::new("from-flag.ndjson")));
    }

    #[test]
    fn test_event_log_falls_back_to_config() {
        let config = Config {
            events_path: Some(PathBuf::from("from-config.ndjson")),
            ..Default::default()
        };

        let ctx = AppContext::with_config(config, &GlobalArgs::default());

        assert_eq!(ctx.events.path(), Some(Path::new("from-config.ndjson")));
    }

    #[test]
    fn test_journal_disabled_by_default() {
        let ctx = AppContext::with_config(Config::default(), &GlobalArgs::default());
        assert!(ctx.events.path().is_none());
    }

    #[test]
    fn test_resolve_with_explicit_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("planloop.yaml");
        std::fs::write(&path, "solve:\n  max_tokens: 12\n").unwrap();

        let global = GlobalArgs {
            config: Some(path),
            event_log: None,
        };
        let ctx = AppContext::resolve(&global).unwrap();

        assert_eq!(ctx.config.solve.max_tokens, 12);
    }

    #[test]
    fn test_resolve_reports_bad_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("planloop.yaml");
        std::fs::write(&path, "solve:\n  max_tokens: 500\n").unwrap();

        let global = GlobalArgs {
            config: Some(path),
            event_log: None,
        };

        assert!(AppContext::resolve(&global).is_err());
    }
}
