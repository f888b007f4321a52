//! Standalone print documents and the print surface
//!
//! [`build_print_document`] wraps a [`RenderedDocument`] into a complete
//! HTML file with A4 page rules, inline CSS and a page-number footer. The
//! result is handed to a [`PrintSurface`] and forgotten: nothing waits for
//! the print dialog or reports back from it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::logo::EmbeddedImage;
use super::render::{escape_html, RenderedDocument};

/// File the browser surface stages its documents in, replaced on every export
pub const STAGED_FILE_NAME: &str = "trabalho-print.html";

/// Script appended by [`BrowserPrintSurface`] so the page prints itself
pub const AUTO_PRINT_HOOK: &str =
    "<script>window.addEventListener(\"load\", function () { window.focus(); window.print(); });</script>\n";

/// Errors raised while handing a document to a print surface
#[derive(Error, Debug)]
pub enum PrintError {
    #[error("IO error on {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not open print surface for {path}: {source}", path = .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Page layout and assets of the print document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintSettings {
    /// Page margin in millimetres
    pub margin_mm: u32,
    pub logo: Option<EmbeddedImage>,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            margin_mm: 16,
            logo: None,
        }
    }
}

const PRINT_CSS: &str = r#"body { font-family: ui-sans-serif, system-ui, -apple-system, "Segoe UI", Roboto, Arial, sans-serif; color: #111827; background: #ffffff; margin: 0; }
.doc { padding: 0; }
.doc-header { text-align: center; margin-bottom: 12px; }
.logo { width: 60px; height: 60px; display: inline-block; }
.doc-title { margin: 8px 0; font-size: 22px; }
.byline, .doc-date { color: #6b7280; }
.doc-date { margin-top: 6px; }
hr { border: 0; border-top: 1px solid #e5e7eb; }
h1 { font-size: 24px; margin: 0 0 6px 0; }
h2 { font-size: 16px; margin-top: 14px; }
h3 { margin-top: 10px; }
p, li, .pre-line { font-size: 13pt; line-height: 1.5; }
.pre-line { white-space: pre-line; }
.page-footer { margin-top: 18px; }
.page-footer::after { content: "Página " counter(page); display: block; text-align: right; font-size: 11px; color: #6b7280; margin-top: 10px; }
@media print { body { counter-reset: page; } }
"#;

/// Wrap `rendered` into a complete, self-contained HTML document
pub fn build_print_document(rendered: &RenderedDocument, settings: &PrintSettings) -> String {
    let mut output = String::new();

    output.push_str("<!DOCTYPE html>\n");
    output.push_str("<html lang=\"pt\">\n");
    output.push_str("<head>\n");
    output.push_str("<meta charset=\"utf-8\">\n");
    output.push_str(&format!(
        "<title>{}</title>\n",
        escape_html(&rendered.header.title)
    ));
    output.push_str("<style>\n");
    output.push_str(&format!(
        "@page {{ size: A4; margin: {}mm; @bottom-right {{ content: \"Página \" counter(page); font-size: 11px; color: #6b7280; }} }}\n",
        settings.margin_mm
    ));
    output.push_str(PRINT_CSS);
    output.push_str("</style>\n");
    output.push_str("</head>\n");

    output.push_str("<body>\n");
    output.push_str("<div class=\"doc\">\n");
    output.push_str(&rendered.to_markup(settings.logo.as_ref()));
    output.push_str("</div>\n");
    output.push_str("</body>\n");
    output.push_str("</html>\n");

    output
}

/// Something that can show a standalone document and print it
pub trait PrintSurface {
    fn open(&self, document: &str) -> Result<(), PrintError>;
}

/// Hand `document` to `surface`, dropping any failure
///
/// A blocked or broken surface leaves the session untouched; the user can
/// simply try again.
pub fn trigger_print(surface: &dyn PrintSurface, document: &str) {
    match surface.open(document) {
        Ok(()) => tracing::info!("Sent document to print surface"),
        Err(e) => tracing::warn!("Export aborted: {}", e),
    }
}

/// Write a standalone document to `path`
pub fn write_document(path: &Path, document: &str) -> Result<(), PrintError> {
    let io_err = |source| PrintError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, document).map_err(io_err)
}

/// Insert [`AUTO_PRINT_HOOK`] right before the closing body tag
pub fn with_auto_print(document: &str) -> String {
    match document.rfind("</body>") {
        Some(pos) => {
            let mut out = String::with_capacity(document.len() + AUTO_PRINT_HOOK.len());
            out.push_str(&document[..pos]);
            out.push_str(AUTO_PRINT_HOOK);
            out.push_str(&document[pos..]);
            out
        }
        None => format!("{document}{AUTO_PRINT_HOOK}"),
    }
}

/// Opens documents in the system browser, which then prints them
#[derive(Debug, Clone)]
pub struct BrowserPrintSurface {
    output_dir: PathBuf,
}

impl BrowserPrintSurface {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Write the self-printing copy of `document` and return its path
    pub fn stage(&self, document: &str) -> Result<PathBuf, PrintError> {
        let path = self.output_dir.join(STAGED_FILE_NAME);
        write_document(&path, &with_auto_print(document))?;
        Ok(path)
    }
}

impl PrintSurface for BrowserPrintSurface {
    fn open(&self, document: &str) -> Result<(), PrintError> {
        let path = self.stage(document)?;
        tracing::debug!("Opening print document: {}", path.display());
        open::that_detached(&path).map_err(|source| PrintError::Open { path, source })
    }
}
