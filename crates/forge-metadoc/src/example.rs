//! Worked examples attached to symbols
//!
//! Examples are built once, when a symbol is defined, from printed source
//! text. Nothing here runs example code: regular thunks are invoked by the
//! markdown renderer and image thunks by whatever drawing backend consumes
//! [`GeneratedImage`].

use crate::diagnostics::EvalError;
use crate::form::Form;
use crate::hash::content_hash;
use crate::printer::format_forms;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Relative directory image links point into
pub const IMAGE_DIR: &str = "../images/";

/// Deferred evaluation of a regular example
pub type Thunk = Arc<dyn Fn() -> Result<Form, EvalError> + Send + Sync>;

/// Drawing callback of a generated image example
pub type DrawThunk = Arc<dyn Fn(&mut dyn Canvas) -> Result<Form, EvalError> + Send + Sync>;

/// Drawing surface handed to image thunks by the drawing backend
pub trait Canvas {
    /// Surface width in pixels
    fn width(&self) -> u32;
    /// Surface height in pixels
    fn height(&self) -> u32;
}

/// What a generated image depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawKind {
    /// Free drawing on a canvas
    #[default]
    Canvas,
    /// Plot of a function
    Function,
    /// Swatches of a color palette
    Palette,
    /// Color gradient strip
    Gradient,
}

fn default_size() -> u32 {
    160
}

fn default_quality() -> String {
    "high".to_string()
}

fn default_background() -> String {
    "#30426a".to_string()
}

/// Drawing parameters for a generated image.
///
/// Only the drawing backend interprets these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ImageConfig {
    /// Image width
    #[serde(default = "default_size")]
    pub width: u32,
    /// Image height
    #[serde(default = "default_size")]
    pub height: u32,
    /// Rendering quality hint
    #[serde(default = "default_quality")]
    pub render_quality: String,
    /// Background color
    #[serde(default = "default_background")]
    pub background: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: default_size(),
            height: default_size(),
            render_quality: default_quality(),
            background: default_background(),
        }
    }
}

impl ImageConfig {
    /// Set the image size
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }
}

/// Example with source and an optional evaluated result
#[derive(Clone)]
pub struct Regular {
    pub doc: String,
    pub source_text: String,
    pub thunk: Option<Thunk>,
}

/// Example whose image is drawn by an external backend
#[derive(Clone)]
pub struct GeneratedImage {
    pub doc: String,
    pub source_text: String,
    pub draw_kind: DrawKind,
    pub config: ImageConfig,
    pub thunk: DrawThunk,
    /// `hash(source_text + doc) + ".png"`
    pub filename: String,
    pub markdown_value: String,
}

/// Example pointing at an existing image file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticImage {
    pub doc: String,
    pub markdown_value: String,
}

/// One step of a [`Session`]
#[derive(Clone)]
pub struct SessionStep {
    pub source_text: String,
    pub thunk: Option<Thunk>,
}

/// Several forms shown together, each with its own result
#[derive(Clone)]
pub struct Session {
    pub doc: String,
    pub steps: Vec<SessionStep>,
}

/// A unit of documentation content attached to a symbol
#[derive(Clone)]
pub enum Example {
    Regular(Regular),
    GeneratedImage(GeneratedImage),
    StaticImage(StaticImage),
    Session(Session),
}

impl Example {
    /// Description shown above the example
    pub fn doc(&self) -> &str {
        match self {
            Example::Regular(e) => &e.doc,
            Example::GeneratedImage(e) => &e.doc,
            Example::StaticImage(e) => &e.doc,
            Example::Session(e) => &e.doc,
        }
    }

    /// Printed source text, if the example has code
    pub fn source_text(&self) -> Option<String> {
        match self {
            Example::Regular(e) => Some(e.source_text.clone()),
            Example::GeneratedImage(e) => Some(e.source_text.clone()),
            Example::StaticImage(_) => None,
            Example::Session(e) => Some(
                e.steps
                    .iter()
                    .map(|s| s.source_text.as_str())
                    .collect::<String>(),
            ),
        }
    }

    /// Short variant name, used in logs and snapshots
    pub fn kind_name(&self) -> &'static str {
        match self {
            Example::Regular(_) => "regular",
            Example::GeneratedImage(_) => "image",
            Example::StaticImage(_) => "static-image",
            Example::Session(_) => "session",
        }
    }
}

impl fmt::Debug for Example {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Example::Regular(e) => f
                .debug_struct("Regular")
                .field("doc", &e.doc)
                .field("source_text", &e.source_text)
                .field("evaluated", &e.thunk.is_some())
                .finish(),
            Example::GeneratedImage(e) => f
                .debug_struct("GeneratedImage")
                .field("doc", &e.doc)
                .field("source_text", &e.source_text)
                .field("draw_kind", &e.draw_kind)
                .field("filename", &e.filename)
                .finish(),
            Example::StaticImage(e) => fmt::Debug::fmt(e, f),
            Example::Session(e) => f
                .debug_struct("Session")
                .field("doc", &e.doc)
                .field("steps", &e.steps.len())
                .finish(),
        }
    }
}

/// Build the markdown image link for `filename`.
///
/// The source text doubles as alt text and the description as title.
pub fn image_markdown(alt: &str, doc: &str, image_dir: &str, filename: &str) -> String {
    format!(
        "![{}]({}{} \"{}\")",
        alt.trim_end(),
        image_dir,
        filename,
        html_escape::encode_double_quoted_attribute(doc)
    )
}

/// Create a regular example.
///
/// The thunk is kept only when `evaluate` is true; nothing is run here.
pub fn make_regular<F>(doc: impl Into<String>, evaluate: bool, body: &[Form], thunk: F) -> Example
where
    F: Fn() -> Result<Form, EvalError> + Send + Sync + 'static,
{
    Example::Regular(Regular {
        doc: doc.into(),
        source_text: format_forms(body),
        thunk: evaluate.then(|| Arc::new(thunk) as Thunk),
    })
}

/// Create a regular example that is never evaluated
pub fn make_unevaluated(doc: impl Into<String>, body: &[Form]) -> Example {
    Example::Regular(Regular {
        doc: doc.into(),
        source_text: format_forms(body),
        thunk: None,
    })
}

/// Create a generated image example.
///
/// The file name is derived from the printed body and the description, so
/// identical code and text always map to the same image.
pub fn make_generated_image<F>(
    draw_kind: DrawKind,
    doc: impl Into<String>,
    config: Option<ImageConfig>,
    body: &[Form],
    thunk: F,
) -> Example
where
    F: Fn(&mut dyn Canvas) -> Result<Form, EvalError> + Send + Sync + 'static,
{
    let doc = doc.into();
    let source_text = format_forms(body);
    let filename = format!("{}.png", content_hash(&format!("{}{}", source_text, doc)));
    let markdown_value = image_markdown(&source_text, &doc, IMAGE_DIR, &filename);

    Example::GeneratedImage(GeneratedImage {
        doc,
        source_text,
        draw_kind,
        config: config.unwrap_or_default(),
        thunk: Arc::new(thunk),
        filename,
        markdown_value,
    })
}

/// Create an example for an image that already exists
pub fn make_static_image(doc: impl Into<String>, filename: &str) -> Example {
    let doc = doc.into();
    let markdown_value = image_markdown(filename, &doc, IMAGE_DIR, filename);
    Example::StaticImage(StaticImage { doc, markdown_value })
}

/// Create a session from `(form, thunk)` pairs.
///
/// Thunks are dropped when `evaluate` is false.
pub fn make_session(
    doc: impl Into<String>,
    evaluate: bool,
    steps: Vec<(Form, Option<Thunk>)>,
) -> Example {
    let steps = steps
        .into_iter()
        .map(|(form, thunk)| SessionStep {
            source_text: format_forms(std::slice::from_ref(&form)),
            thunk: if evaluate { thunk } else { None },
        })
        .collect();
    Example::Session(Session {
        doc: doc.into(),
        steps,
    })
}

/// Wrap a precomputed value as a thunk
pub fn constant_thunk(value: Form) -> Thunk {
    Arc::new(move || Ok(value.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn body() -> Vec<Form> {
        vec![Form::call("+", [Form::Int(1), Form::Int(2)])]
    }

    fn noop(_: &mut dyn Canvas) -> Result<Form, EvalError> {
        Ok(Form::Nil)
    }

    #[test]
    fn test_make_regular_keeps_thunk_only_when_evaluating() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let evaluated = make_regular("sum", true, &body(), move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(Form::Int(3))
        });
        let skipped = make_regular("sum", false, &body(), || Ok(Form::Int(3)));

        match (&evaluated, &skipped) {
            (Example::Regular(a), Example::Regular(b)) => {
                assert_eq!(a.source_text, "(+ 1 2)\n");
                assert!(a.thunk.is_some());
                assert!(b.thunk.is_none());
            }
            _ => panic!("expected regular examples"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_generated_image_filename_is_content_addressed() {
        let a = make_generated_image(DrawKind::Canvas, "circle", None, &body(), noop);
        let b = make_generated_image(DrawKind::Function, "circle", None, &body(), noop);
        let c = make_generated_image(DrawKind::Canvas, "square", None, &body(), noop);

        let name = |e: &Example| match e {
            Example::GeneratedImage(img) => img.filename.clone(),
            _ => panic!("expected image"),
        };

        assert_eq!(name(&a), name(&b));
        assert_ne!(name(&a), name(&c));
        assert_eq!(name(&a), format!("{}.png", content_hash("(+ 1 2)\ncircle")));
        assert_eq!(name(&a).len(), 36);
    }

    #[test]
    fn test_generated_image_markdown_and_defaults() {
        let example = make_generated_image(DrawKind::Canvas, "circle", None, &body(), noop);
        let Example::GeneratedImage(img) = example else {
            panic!("expected image");
        };
        assert_eq!(
            img.markdown_value,
            format!("![(+ 1 2)](../images/{} \"circle\")", img.filename)
        );
        assert_eq!(img.config, ImageConfig::default());
        assert_eq!(img.config.width, 160);
        assert_eq!(img.config.render_quality, "high");
    }

    #[test]
    fn test_static_image_uses_given_filename() {
        let example = make_static_image("logo", "logo.png");
        let Example::StaticImage(img) = example else {
            panic!("expected static image");
        };
        assert_eq!(img.markdown_value, "![logo.png](../images/logo.png \"logo\")");
    }

    #[test]
    fn test_image_title_quotes_are_escaped() {
        let md = image_markdown("x", "say \"hi\"", IMAGE_DIR, "a.png");
        assert_eq!(md, "![x](../images/a.png \"say &quot;hi&quot;\")");
    }

    #[test]
    fn test_session_drops_thunks_without_evaluate() {
        let steps = vec![
            (Form::sym("a"), Some(constant_thunk(Form::Int(1)))),
            (Form::sym("b"), None),
        ];
        let Example::Session(session) = make_session("steps", false, steps) else {
            panic!("expected session");
        };
        assert_eq!(session.steps.len(), 2);
        assert!(session.steps.iter().all(|s| s.thunk.is_none()));
        assert_eq!(session.steps[0].source_text, "a\n");
    }

    #[test]
    fn test_image_config_deserialize_defaults() {
        let cfg: ImageConfig = serde_json::from_str(r#"{"width": 320}"#).unwrap();
        assert_eq!(cfg.width, 320);
        assert_eq!(cfg.height, 160);
        assert_eq!(cfg.background, "#30426a");
    }
}
