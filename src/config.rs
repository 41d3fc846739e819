//! Configuration types for figure-to-slide assignment.
//!
//! All scoring constants and pipeline switches live in [`AssignmentConfig`],
//! built via its [`AssignmentConfigBuilder`]. The defaults reproduce the tuned
//! behaviour exactly: weights 0.5/0.3/0.2, threshold 0.4, an 800×600
//! reference figure, ~4000 characters per page and a ×1.2 boost when the
//! slide mentions a figure or diagram.
//!
//! The constants were chosen empirically. They are exposed for tests and
//! experiments, not as an invitation to re-tune them per deck.

use crate::error::FigslideError;
use crate::progress::ProgressCallback;
use std::fmt;

/// Terms whose presence makes a slide read as "figure-worthy".
pub const DEFAULT_VOCABULARY: [&str; 17] = [
    "architecture",
    "diagram",
    "system",
    "model",
    "framework",
    "algorithm",
    "process",
    "flow",
    "network",
    "structure",
    "data",
    "result",
    "analysis",
    "comparison",
    "chart",
    "figure",
    "graph",
];

/// Words that explicitly point at a visual and trigger the relevance boost.
pub const DEFAULT_BOOST_TERMS: [&str; 2] = ["figure", "diagram"];

/// Relative weights of the three relevance terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub keyword: f64,
    pub size: f64,
    pub context: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword: 0.5,
            size: 0.3,
            context: 0.2,
        }
    }
}

/// Configuration for scoring, matching and deck assembly.
///
/// Built via [`AssignmentConfig::builder()`] or using
/// [`AssignmentConfig::default()`].
///
/// # Example
/// ```rust
/// use figslide::AssignmentConfig;
///
/// let config = AssignmentConfig::builder()
///     .threshold(0.5)
///     .min_figure_size(200)
///     .build()
///     .unwrap();
/// assert_eq!(config.threshold, 0.5);
/// ```
#[derive(Clone)]
pub struct AssignmentConfig {
    /// Minimum relevance a figure must strictly exceed to be assigned. Default: 0.4.
    ///
    /// A score exactly equal to the threshold does not qualify.
    pub threshold: f64,

    /// Keyword vocabulary, lowercase and deduplicated. Default: [`DEFAULT_VOCABULARY`].
    pub vocabulary: Vec<String>,

    /// Terms that trigger `boost_factor`. Default: [`DEFAULT_BOOST_TERMS`].
    pub boost_terms: Vec<String>,

    /// Multiplier applied when the slide mentions a boost term. Default: 1.2.
    pub boost_factor: f64,

    pub weights: ScoreWeights,

    /// Width and height of a figure that earns the full size score. Default: 800×600.
    pub reference_dimensions: (u32, u32),

    /// Characters per page used to estimate document length. Default: 4000.
    pub chars_per_page: usize,

    /// Figures narrower or shorter than this are dropped before matching. Default: 150.
    ///
    /// Set to 0 to keep every figure.
    pub min_figure_size: u32,

    /// Normalise slide bullets before scoring. Default: true.
    pub format_bullets: bool,

    /// Attach a diagram suggestion to technical text-only slides. Default: true.
    pub suggest_visuals: bool,

    /// Include each figure as a `data:` URI in the output. Default: false.
    pub embed_figures: bool,

    /// Optional per-slide progress events.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            threshold: 0.4,
            vocabulary: DEFAULT_VOCABULARY.iter().map(|s| s.to_string()).collect(),
            boost_terms: DEFAULT_BOOST_TERMS.iter().map(|s| s.to_string()).collect(),
            boost_factor: 1.2,
            weights: ScoreWeights::default(),
            reference_dimensions: (800, 600),
            chars_per_page: 4000,
            min_figure_size: 150,
            format_bullets: true,
            suggest_visuals: true,
            embed_figures: false,
            progress_callback: None,
        }
    }
}

impl fmt::Debug for AssignmentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssignmentConfig")
            .field("threshold", &self.threshold)
            .field("vocabulary", &self.vocabulary.len())
            .field("boost_terms", &self.boost_terms)
            .field("boost_factor", &self.boost_factor)
            .field("weights", &self.weights)
            .field("reference_dimensions", &self.reference_dimensions)
            .field("chars_per_page", &self.chars_per_page)
            .field("min_figure_size", &self.min_figure_size)
            .field("format_bullets", &self.format_bullets)
            .field("suggest_visuals", &self.suggest_visuals)
            .field("embed_figures", &self.embed_figures)
            .field(
                "progress_callback",
                &self
                    .progress_callback
                    .as_ref()
                    .map(|_| "<dyn AssignmentProgressCallback>"),
            )
            .finish()
    }
}

impl AssignmentConfig {
    /// Create a new builder for `AssignmentConfig`.
    pub fn builder() -> AssignmentConfigBuilder {
        AssignmentConfigBuilder {
            config: Self::default(),
        }
    }

    /// Area of the reference figure in pixels.
    pub fn reference_area(&self) -> f64 {
        let (w, h) = self.reference_dimensions;
        w as f64 * h as f64
    }
}

/// Builder for [`AssignmentConfig`].
#[derive(Debug)]
pub struct AssignmentConfigBuilder {
    config: AssignmentConfig,
}

impl AssignmentConfigBuilder {
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    pub fn vocabulary<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.vocabulary = normalise_terms(terms);
        self
    }

    pub fn boost_terms<I, S>(mut self, terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.boost_terms = normalise_terms(terms);
        self
    }

    pub fn boost_factor(mut self, factor: f64) -> Self {
        self.config.boost_factor = factor;
        self
    }

    pub fn weights(mut self, keyword: f64, size: f64, context: f64) -> Self {
        self.config.weights = ScoreWeights {
            keyword,
            size,
            context,
        };
        self
    }

    pub fn reference_dimensions(mut self, width: u32, height: u32) -> Self {
        self.config.reference_dimensions = (width, height);
        self
    }

    pub fn chars_per_page(mut self, n: usize) -> Self {
        self.config.chars_per_page = n;
        self
    }

    pub fn min_figure_size(mut self, px: u32) -> Self {
        self.config.min_figure_size = px;
        self
    }

    pub fn format_bullets(mut self, v: bool) -> Self {
        self.config.format_bullets = v;
        self
    }

    pub fn suggest_visuals(mut self, v: bool) -> Self {
        self.config.suggest_visuals = v;
        self
    }

    pub fn embed_figures(mut self, v: bool) -> Self {
        self.config.embed_figures = v;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AssignmentConfig, FigslideError> {
        let c = &self.config;
        if !(0.0..=1.0).contains(&c.threshold) {
            return Err(FigslideError::InvalidConfig(format!(
                "threshold must be within 0.0–1.0, got {}",
                c.threshold
            )));
        }
        if c.vocabulary.is_empty() {
            return Err(FigslideError::InvalidConfig(
                "keyword vocabulary must not be empty".into(),
            ));
        }
        let w = c.weights;
        for (name, value) in [("keyword", w.keyword), ("size", w.size), ("context", w.context)] {
            if !value.is_finite() || value < 0.0 {
                return Err(FigslideError::InvalidConfig(format!(
                    "{name} weight must be a non-negative number, got {value}"
                )));
            }
        }
        if !c.boost_factor.is_finite() || c.boost_factor < 0.0 {
            return Err(FigslideError::InvalidConfig(format!(
                "boost factor must be a non-negative number, got {}",
                c.boost_factor
            )));
        }
        if c.reference_dimensions.0 == 0 || c.reference_dimensions.1 == 0 {
            return Err(FigslideError::InvalidConfig(
                "reference dimensions must be non-zero".into(),
            ));
        }
        if c.chars_per_page == 0 {
            return Err(FigslideError::InvalidConfig(
                "chars per page must be ≥ 1".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Lowercase, trim, drop empties and duplicates while keeping first-seen order.
fn normalise_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut out: Vec<String> = Vec::new();
    for term in terms {
        let t = term.into().trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
