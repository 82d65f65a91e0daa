//! The correction pipeline.
//!
//! Every element is corrected from the color it had the first time the
//! pipeline saw it, never from a color the pipeline wrote. Re-running the
//! pipeline (for example on each "content ready" event) therefore writes
//! the same result instead of compounding the correction.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

use crate::color::Color;
use crate::config::CorrectionConfig;
use crate::correction::strategy::{CorrectionStrategy, OutputFormat};
use crate::error::CorrectionError;
use crate::pipeline::element::{ElementAccessError, VisualElement};

/// Host signal that the element set is ready to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyEvent {
    /// Document structure is available.
    DomContentLoaded,
    /// Document and all sub-resources have loaded.
    Load,
}

impl fmt::Display for ReadyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DomContentLoaded => write!(f, "DOMContentLoaded"),
            Self::Load => write!(f, "load"),
        }
    }
}

/// An element that was skipped during a traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementFailure<K> {
    /// Index in the supplied sequence.
    pub position: usize,
    pub id: K,
    pub error: ElementAccessError,
}

/// Outcome of one traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport<K> {
    /// Elements whose color was written: corrected by
    /// [`CorrectionPipeline::run`], or put back by
    /// [`CorrectionPipeline::restore`].
    pub written: usize,
    /// Repeated ids in the sequence, ignored after their first occurrence.
    pub duplicates: usize,
    pub failures: Vec<ElementFailure<K>>,
}

impl<K> RunReport<K> {
    fn new() -> Self {
        Self {
            written: 0,
            duplicates: 0,
            failures: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Applies one [`CorrectionStrategy`] to sequences of elements.
///
/// Owns the cache of original colors keyed by element id. The cache lives
/// as long as the pipeline and is only touched through `&mut self`.
#[derive(Debug, Clone)]
pub struct CorrectionPipeline<K> {
    strategy: CorrectionStrategy,
    output: OutputFormat,
    originals: HashMap<K, Color>,
}

impl<K> CorrectionPipeline<K>
where
    K: Clone + Eq + Hash + fmt::Debug,
{
    /// Build a pipeline; the strategy is validated here, once.
    pub fn new(
        strategy: CorrectionStrategy,
        output: OutputFormat,
    ) -> Result<Self, CorrectionError> {
        strategy.validate()?;
        Ok(Self {
            strategy,
            output,
            originals: HashMap::new(),
        })
    }

    pub fn from_config(config: &CorrectionConfig) -> Result<Self, CorrectionError> {
        Self::new(config.strategy, config.output)
    }

    pub fn strategy(&self) -> &CorrectionStrategy {
        &self.strategy
    }

    pub fn output(&self) -> OutputFormat {
        self.output
    }

    /// Original color recorded for `id`, if the element has been visited.
    pub fn original(&self, id: &K) -> Option<Color> {
        self.originals.get(id).copied()
    }

    /// Number of elements with a recorded original.
    pub fn tracked(&self) -> usize {
        self.originals.len()
    }

    /// Correct every element, in the order supplied.
    ///
    /// Elements that cannot be read or written are skipped and listed in the
    /// report. Errors from the strategy itself propagate.
    pub fn run<'a, E, I>(&mut self, elements: I) -> Result<RunReport<K>, CorrectionError>
    where
        E: VisualElement<Id = K> + 'a,
        I: IntoIterator<Item = &'a mut E>,
    {
        let mut report = RunReport::new();
        let mut visited = HashSet::new();

        for (position, element) in elements.into_iter().enumerate() {
            let id = element.id();
            if !visited.insert(id.clone()) {
                report.duplicates += 1;
                continue;
            }

            let original = match self.original_color(element) {
                Ok(color) => color,
                Err(error) => {
                    record_failure(&mut report, position, id, error);
                    continue;
                }
            };

            let corrected = self.strategy.apply(original)?;
            let text = self.output.render(&corrected);
            if let Err(error) = element.set_foreground_color(&text) {
                record_failure(&mut report, position, id, error);
                continue;
            }

            tracing::debug!(?id, %original, %corrected, "element corrected");
            report.written += 1;
        }

        tracing::info!(
            corrected = report.written,
            skipped = report.failures.len(),
            duplicates = report.duplicates,
            "correction run finished"
        );
        Ok(report)
    }

    /// Run in response to a host ready event.
    pub fn on_ready<'a, E, I>(
        &mut self,
        event: ReadyEvent,
        elements: I,
    ) -> Result<RunReport<K>, CorrectionError>
    where
        E: VisualElement<Id = K> + 'a,
        I: IntoIterator<Item = &'a mut E>,
    {
        tracing::info!(%event, strategy = ?self.strategy, "content ready, correcting");
        self.run(elements)
    }

    /// Write each element's recorded original color back.
    ///
    /// Elements the pipeline never read are left alone. The cache is kept,
    /// so a later [`run`](Self::run) still starts from the originals.
    pub fn restore<'a, E, I>(&self, elements: I) -> RunReport<K>
    where
        E: VisualElement<Id = K> + 'a,
        I: IntoIterator<Item = &'a mut E>,
    {
        let mut report = RunReport::new();
        let mut visited = HashSet::new();

        for (position, element) in elements.into_iter().enumerate() {
            let id = element.id();
            if !visited.insert(id.clone()) {
                report.duplicates += 1;
                continue;
            }
            let Some(original) = self.originals.get(&id) else {
                continue;
            };
            match element.set_foreground_color(&self.output.render(original)) {
                Ok(()) => report.written += 1,
                Err(error) => record_failure(&mut report, position, id, error),
            }
        }

        tracing::info!(
            restored = report.written,
            skipped = report.failures.len(),
            "original colors restored"
        );
        report
    }

    fn original_color<E>(&mut self, element: &E) -> Result<Color, ElementAccessError>
    where
        E: VisualElement<Id = K>,
    {
        let id = element.id();
        if let Some(color) = self.originals.get(&id) {
            return Ok(*color);
        }
        let color = element.foreground_color()?;
        self.originals.insert(id, color);
        Ok(color)
    }
}

fn record_failure<K: fmt::Debug>(
    report: &mut RunReport<K>,
    position: usize,
    id: K,
    error: ElementAccessError,
) {
    tracing::warn!(position, ?id, %error, "skipping element");
    report.failures.push(ElementFailure {
        position,
        id,
        error,
    });
}
