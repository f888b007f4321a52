//! Model to printable markup
//!
//! [`render_preview`] turns a [`DocumentModel`] into a [`RenderedDocument`]:
//! the header block, the outline and the four labelled sections, in print
//! order. The same structure feeds the live preview panel and the HTML
//! fragment embedded in the standalone print document.

use crate::core::document::DocumentModel;

use super::logo::EmbeddedImage;

/// Separator between author and class in the header
pub const BYLINE_SEPARATOR: &str = " • ";

pub const INDEX_HEADING: &str = "Índice";

/// Header block of the paper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    /// Author and class, joined only when both are present
    pub byline: String,
    pub date: String,
}

/// A labelled text section whose line breaks are kept as-is
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: &'static str,
    pub text: String,
}

impl Section {
    /// Lines as they should appear visually
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }
}

/// Structured rendering of a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub header: Header,
    pub index: Vec<String>,
    pub sections: Vec<Section>,
}

/// Join author and class the way the header shows them
pub fn byline(author: &str, class_name: &str) -> String {
    match (author.is_empty(), class_name.is_empty()) {
        (false, false) => format!("{author}{BYLINE_SEPARATOR}{class_name}"),
        _ => format!("{author}{class_name}"),
    }
}

/// Render `model` into its printable structure
pub fn render_preview(model: &DocumentModel) -> RenderedDocument {
    RenderedDocument {
        header: Header {
            title: model.title.clone(),
            byline: byline(&model.author, &model.class_name),
            date: model.doc_date.clone(),
        },
        index: model.index_items().into_iter().map(str::to_string).collect(),
        sections: vec![
            Section {
                heading: "Introdução",
                text: model.introduction.clone(),
            },
            Section {
                heading: "Desenvolvimento",
                text: model.body.clone(),
            },
            Section {
                heading: "Conclusão",
                text: model.conclusion.clone(),
            },
            Section {
                heading: "Referências",
                text: model.references.clone(),
            },
        ],
    }
}

impl RenderedDocument {
    /// HTML fragment for the document body
    ///
    /// Text is escaped so it shows literally. The logo slot holds `logo`
    /// when given and an empty placeholder otherwise.
    pub fn to_markup(&self, logo: Option<&EmbeddedImage>) -> String {
        let mut out = String::new();

        out.push_str("<header class=\"doc-header\">\n");
        match logo {
            Some(image) => out.push_str(&format!(
                "<img class=\"logo\" src=\"{}\" alt=\"logo\">\n",
                image.data_uri()
            )),
            None => out.push_str("<div class=\"logo logo-placeholder\"></div>\n"),
        }
        out.push_str(&format!(
            "<h2 class=\"doc-title\">{}</h2>\n",
            escape_html(&self.header.title)
        ));
        out.push_str(&format!(
            "<div class=\"byline\">{}</div>\n",
            escape_html(&self.header.byline)
        ));
        out.push_str(&format!(
            "<div class=\"doc-date\">{}</div>\n",
            escape_html(&self.header.date)
        ));
        out.push_str("</header>\n<hr>\n");

        out.push_str(&format!("<h3 class=\"index-heading\">{INDEX_HEADING}</h3>\n"));
        out.push_str("<ol class=\"index\">\n");
        for item in &self.index {
            out.push_str(&format!("<li>{}</li>\n", escape_html(item)));
        }
        out.push_str("</ol>\n");

        for section in &self.sections {
            out.push_str(&format!("<h2>{}</h2>\n", escape_html(section.heading)));
            out.push_str(&format!(
                "<div class=\"pre-line\">{}</div>\n",
                escape_html(&section.text)
            ));
        }

        out.push_str("<div class=\"page-footer\"></div>\n");
        out
    }
}

/// Escape text for HTML element content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::{TemplateSeed, Theme};
    use chrono::NaiveDate;

    fn model() -> DocumentModel {
        let date = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        DocumentModel::from_seed(&TemplateSeed::default(), date)
    }

    #[test]
    fn test_byline_separator() {
        assert_eq!(byline("Ana", "11.º A"), "Ana • 11.º A");
        assert_eq!(byline("Ana", ""), "Ana");
        assert_eq!(byline("", "11.º A"), "11.º A");
        assert_eq!(byline("", ""), "");
    }

    #[test]
    fn test_header_shows_author_alone() {
        let mut doc = model();
        doc.author = "Ana".to_string();
        let rendered = render_preview(&doc);
        assert_eq!(rendered.header.byline, "Ana");
        assert!(rendered
            .to_markup(None)
            .contains("<div class=\"byline\">Ana</div>"));
    }

    #[test]
    fn test_section_order() {
        let rendered = render_preview(&model());
        let headings: Vec<_> = rendered.sections.iter().map(|s| s.heading).collect();
        assert_eq!(
            headings,
            ["Introdução", "Desenvolvimento", "Conclusão", "Referências"]
        );

        let markup = rendered.to_markup(None);
        let positions: Vec<_> = [
            "class=\"doc-title\"",
            "class=\"index-heading\"",
            "<h2>Introdução</h2>",
            "<h2>Desenvolvimento</h2>",
            "<h2>Conclusão</h2>",
            "<h2>Referências</h2>",
            "class=\"page-footer\"",
        ]
        .iter()
        .map(|needle| markup.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_index_keeps_section() {
        let mut doc = model();
        doc.index_text = String::new();
        let rendered = render_preview(&doc);
        assert!(rendered.index.is_empty());

        let markup = rendered.to_markup(None);
        assert!(markup.contains("<ol class=\"index\">\n</ol>"));
        assert!(markup.contains(INDEX_HEADING));
    }

    #[test]
    fn test_index_items_rendered_in_order() {
        let mut doc = model();
        doc.index_text = "A\n\nB\nC".to_string();
        let rendered = render_preview(&doc);
        assert_eq!(rendered.index, ["A", "B", "C"]);
        assert!(rendered
            .to_markup(None)
            .contains("<li>A</li>\n<li>B</li>\n<li>C</li>"));
    }

    #[test]
    fn test_text_is_shown_literally() {
        let mut doc = model();
        doc.title = "<script>alert('x')</script>".to_string();
        doc.conclusion = "a & b\nc".to_string();
        let markup = render_preview(&doc).to_markup(None);
        assert!(!markup.contains("<script>"));
        assert!(markup.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"));
        assert!(markup.contains("<div class=\"pre-line\">a &amp; b\nc</div>"));
    }

    #[test]
    fn test_line_breaks_preserved() {
        let mut doc = model();
        doc.references = "um\n\ndois".to_string();
        let rendered = render_preview(&doc);
        let lines: Vec<_> = rendered.sections[3].lines().collect();
        assert_eq!(lines, ["um", "", "dois"]);
    }

    #[test]
    fn test_render_is_deterministic_and_theme_free() {
        let doc = model();
        assert_eq!(render_preview(&doc), render_preview(&doc));

        let mut dark = doc.clone();
        dark.theme = Theme::Dark;
        assert_eq!(
            render_preview(&doc).to_markup(None),
            render_preview(&dark).to_markup(None)
        );
    }

    #[test]
    fn test_logo_slot() {
        let rendered = render_preview(&model());
        assert!(rendered.to_markup(None).contains("logo-placeholder"));

        let logo = EmbeddedImage::from_bytes("image/png", b"png");
        let markup = rendered.to_markup(Some(&logo));
        assert!(markup.contains("<img class=\"logo\" src=\"data:image/png;base64,cG5n\""));
        assert!(!markup.contains("logo-placeholder"));
    }
}
