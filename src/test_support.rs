use crate::agent::TextGenerator;
use crate::error::GenerationError;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, MutexGuard};

static CWD_LOCK: LazyLock<Mutex<()>> = LazyLock::new(|| Mutex::new(()));

pub(crate) struct DirGuard {
    original: PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl DirGuard {
    pub(crate) fn new(new_dir: &Path) -> Self {
        // Changing the process current working directory is global and not thread-safe.
        // Lock it so tests don't race even if a #[serial] annotation is missed.
        let lock = CWD_LOCK.lock().unwrap_or_else(|poison| poison.into_inner());
        let original = std::env::current_dir().unwrap();
        std::env::set_current_dir(new_dir).unwrap();
        Self {
            original,
            _lock: lock,
        }
    }
}

impl Drop for DirGuard {
    fn drop(&mut self) {
        let _ = std::env::set_current_dir(&self.original);
    }
}

/// One generator call as seen by [`ScriptedGenerator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedCall {
    pub prompt: String,
    pub max_tokens: usize,
}

/// Generator that replays queued replies in order and records every call.
///
/// Once the queue is empty every further call fails.
#[derive(Default)]
pub(crate) struct ScriptedGenerator {
    replies: Mutex<VecDeque<Result<String, GenerationError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGenerator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(self, text: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        self
    }

    pub(crate) fn fail(self, message: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(GenerationError::Other(message.to_string())));
        self
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TextGenerator for ScriptedGenerator {
    fn generate(&self, prompt: &str, max_tokens: usize) -> Result<String, GenerationError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            max_tokens,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GenerationError::Other("script exhausted".to_string())))
    }
}
