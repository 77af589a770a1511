//! Auto-correction attached to an editable surface.
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, MutexGuard};

use crate::config::CorrectorConfig;
use crate::debounce::Debouncer;
use crate::error::ThesaurusError;
use crate::pipeline::{Correction, CorrectionPipeline};
use crate::surface::{render, TextSurface};

struct Inner<S> {
    pipeline: CorrectionPipeline,
    surface: Mutex<S>,
    enabled: AtomicBool,
}

impl<S: TextSurface> Inner<S> {
    fn process(&self) -> Correction {
        let mut surface = self.surface.lock();
        let text = surface.text();
        let correction = self.pipeline.run(&text);
        render(&mut *surface, &correction);
        correction
    }
}

/// Watches a [`TextSurface`] and corrects it once typing pauses.
///
/// Call [`on_text_changed`](Self::on_text_changed) on every edit. The pass
/// runs on a background worker after the configured delay, and later edits
/// push that moment back. Custom dictionary changes re-run the pass
/// immediately on the calling thread.
pub struct AutoCorrector<S> {
    inner: Arc<Inner<S>>,
    debouncer: Debouncer,
}

impl<S: TextSurface + Send + 'static> AutoCorrector<S> {
    /// Attaches to `surface`, enabled, correcting `delay` after the last edit.
    pub fn new(pipeline: CorrectionPipeline, surface: S, delay: Duration) -> AutoCorrector<S> {
        let inner = Arc::new(Inner {
            pipeline,
            surface: Mutex::new(surface),
            enabled: AtomicBool::new(true),
        });

        let debouncer = {
            let inner = Arc::clone(&inner);
            Debouncer::new(delay, move || {
                if inner.enabled.load(Ordering::SeqCst) {
                    inner.process();
                }
            })
        };

        AutoCorrector { inner, debouncer }
    }

    /// Delay and enabled state taken from the configuration.
    pub fn from_config(
        pipeline: CorrectionPipeline,
        surface: S,
        config: &CorrectorConfig,
    ) -> AutoCorrector<S> {
        let corrector = AutoCorrector::new(
            pipeline,
            surface,
            Duration::from_millis(config.typing_delay_ms),
        );
        corrector.set_enabled(config.enabled);
        corrector
    }

    /// Re-arms the typing timer. Does nothing while disabled.
    pub fn on_text_changed(&self) {
        if self.is_enabled() {
            self.debouncer.trigger();
        }
    }

    /// Runs a correction pass now, regardless of the timer.
    pub fn process(&self) -> Correction {
        self.inner.process()
    }

    /// Whether a pass is waiting for typing to pause.
    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Whether edits trigger correction.
    pub fn is_enabled(&self) -> bool {
        self.inner.enabled.load(Ordering::SeqCst)
    }

    /// Disabling also drops a pending pass.
    pub fn set_enabled(&self, enabled: bool) {
        self.inner.enabled.store(enabled, Ordering::SeqCst);

        if !enabled {
            self.debouncer.cancel();
        }
    }

    /// Accepts `word` as correctly spelled and re-runs the pass.
    pub fn add_to_custom_dictionary(&self, word: &str) -> Result<Correction, ThesaurusError> {
        self.inner.pipeline.thesaurus().lock().add_custom_word(word)?;
        Ok(self.process())
    }

    /// Withdraws a custom word and re-runs the pass.
    pub fn remove_from_custom_dictionary(&self, word: &str) -> Result<Correction, ThesaurusError> {
        self.inner
            .pipeline
            .thesaurus()
            .lock()
            .remove_custom_word(word)?;
        Ok(self.process())
    }

    /// The pipeline run on each pass.
    pub fn pipeline(&self) -> &CorrectionPipeline {
        &self.inner.pipeline
    }

    /// Locks the surface. Hold the guard only briefly; a pending pass waits
    /// on it.
    pub fn surface(&self) -> MutexGuard<'_, S> {
        self.inner.surface.lock()
    }
}
