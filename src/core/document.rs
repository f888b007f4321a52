//! The academic paper document model
//!
//! A single [`DocumentModel`] holds every editable field of the paper
//! template. Defaults come from a [`TemplateSeed`], which is configuration
//! data rather than behaviour.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Date format used when the configured one cannot be rendered
pub const FALLBACK_DATE_FORMAT: &str = "%d/%m/%Y";

/// Presentation theme of the editing window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Label shown in the theme selector
    pub fn label(self) -> &'static str {
        match self {
            Theme::Light => "Claro",
            Theme::Dark => "Escuro",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = UnknownTheme;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(UnknownTheme(other.to_string())),
        }
    }
}

/// A theme string that is neither `light` nor `dark`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme: {0:?}")]
pub struct UnknownTheme(pub String);

/// Seed content used to build a fresh document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSeed {
    pub title: String,
    pub index_text: String,
    pub introduction: String,
    /// Body text; `None` uses the generated long-form template
    pub body: Option<String>,
    pub conclusion: String,
    pub references: String,
    /// `chrono` strftime pattern for the document date
    pub date_format: String,
}

impl Default for TemplateSeed {
    fn default() -> Self {
        Self {
            title: "Perspetiva Sociológica do Conhecimento".to_string(),
            index_text: [
                "Capa",
                "Introdução",
                "1. Conceitos-chave",
                "2. Abordagens Filosóficas",
                "3. Perspectiva Fenomenológica",
                "4. Exemplos e Implicações",
                "Conclusão",
                "Referências",
            ]
            .join("\n"),
            introduction: "Este trabalho apresenta uma visão geral da sociologia do conhecimento, \
                explorando conceitos, tradições filosóficas e a fenomenologia."
                .to_string(),
            body: None,
            conclusion: "Conclui-se que o conhecimento é socialmente situado e estabilizado por \
                práticas, instituições e linguagens."
                .to_string(),
            references: "Berger & Luckmann (1966). A construção social da realidade.\n\
                Husserl (1913). Ideias para uma fenomenologia pura."
                .to_string(),
            date_format: FALLBACK_DATE_FORMAT.to_string(),
        }
    }
}

impl TemplateSeed {
    /// Body text for a fresh or reset document
    pub fn body(&self) -> String {
        self.body.clone().unwrap_or_else(generate_long_body)
    }

    /// Format `date` with the seed's date pattern
    ///
    /// An invalid pattern falls back to [`FALLBACK_DATE_FORMAT`] instead of
    /// panicking inside `chrono`'s formatter.
    pub fn format_date(&self, date: NaiveDate) -> String {
        let mut out = String::new();
        if write!(out, "{}", date.format(&self.date_format)).is_ok() {
            return out;
        }
        tracing::warn!("Invalid date format {:?}, using default", self.date_format);
        date.format(FALLBACK_DATE_FORMAT).to_string()
    }
}

const BODY_OUTLINE: &str = "**1. Conceitos-chave**\n\n\
- Conhecimento: crenças justificadas e socialmente situadas.\n\
- Realidade, Objeto, Conceito: categorias de referência.\n\n\
**2. Abordagens Filosóficas**\n\n\
- Empirismo vs Racionalismo. Exemplos e comparação.\n\n\
**3. Perspectiva Fenomenológica**\n\n\
- Experiência vivida e intencionalidade.\n\n\
**4. Exemplos e Implicações**\n\n\
- Educação, ciência e linguagem.";

const FILLER_PARAGRAPHS: usize = 60;

fn generate_long_body() -> String {
    let filler = (1..=FILLER_PARAGRAPHS)
        .map(|i| {
            format!(
                "Parágrafo {i}. A sociologia do conhecimento analisa como práticas, instituições e \
                 linguagens configuram o que é aceitado como conhecimento. A fenomenologia, por seu \
                 turno, descreve a experiência e a constituição de sentido no vivido."
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{BODY_OUTLINE}\n\n**Análise extendida**\n\n{filler}")
}

/// The editable paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentModel {
    pub title: String,
    pub author: String,
    pub class_name: String,
    pub doc_date: String,
    /// Outline, one item per line
    pub index_text: String,
    pub introduction: String,
    pub body: String,
    pub conclusion: String,
    pub references: String,
    pub theme: Theme,
}

/// A persisted snapshot, every field optional
///
/// Keys missing from the stored JSON, set to `null` or holding anything but
/// a string stay `None` and are filled from the defaults one field at a
/// time. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersistedRecord {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub author: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub class_name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub doc_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub index_text: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub introduction: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub body: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub conclusion: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub references: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub theme: Option<String>,
}

/// Accept only JSON strings; other values are logged and treated as absent
fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        Value::Null => Ok(None),
        other => {
            tracing::warn!("Ignoring non-string stored value: {}", other);
            Ok(None)
        }
    }
}

impl DocumentModel {
    /// Build the default document for `today`
    pub fn from_seed(seed: &TemplateSeed, today: NaiveDate) -> Self {
        Self {
            title: seed.title.clone(),
            author: String::new(),
            class_name: String::new(),
            doc_date: seed.format_date(today),
            index_text: seed.index_text.clone(),
            introduction: seed.introduction.clone(),
            body: seed.body(),
            conclusion: seed.conclusion.clone(),
            references: seed.references.clone(),
            theme: Theme::default(),
        }
    }

    /// Default document dated with the local clock
    pub fn from_seed_today(seed: &TemplateSeed) -> Self {
        Self::from_seed(seed, chrono::Local::now().date_naive())
    }

    /// Overlay a persisted record on top of these defaults, field by field
    pub fn overlay(mut self, record: PersistedRecord) -> Self {
        let PersistedRecord {
            title,
            author,
            class_name,
            doc_date,
            index_text,
            introduction,
            body,
            conclusion,
            references,
            theme,
        } = record;

        for (slot, value) in [
            (&mut self.title, title),
            (&mut self.author, author),
            (&mut self.class_name, class_name),
            (&mut self.doc_date, doc_date),
            (&mut self.index_text, index_text),
            (&mut self.introduction, introduction),
            (&mut self.body, body),
            (&mut self.conclusion, conclusion),
            (&mut self.references, references),
        ] {
            if let Some(value) = value {
                *slot = value;
            }
        }

        if let Some(theme) = theme {
            match theme.parse() {
                Ok(theme) => self.theme = theme,
                Err(e) => tracing::warn!("Ignoring stored theme: {}", e),
            }
        }

        self
    }

    /// Restore the title and body from the template, leaving the rest alone
    pub fn reset_to_template(&mut self, seed: &TemplateSeed) {
        self.title = seed.title.clone();
        self.body = seed.body();
    }

    /// Outline items derived from `index_text`
    pub fn index_items(&self) -> Vec<&str> {
        parse_index(&self.index_text)
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Author => &self.author,
            Field::ClassName => &self.class_name,
            Field::DocDate => &self.doc_date,
            Field::IndexText => &self.index_text,
            Field::Introduction => &self.introduction,
            Field::Body => &self.body,
            Field::Conclusion => &self.conclusion,
            Field::References => &self.references,
        }
    }

    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Author => &mut self.author,
            Field::ClassName => &mut self.class_name,
            Field::DocDate => &mut self.doc_date,
            Field::IndexText => &mut self.index_text,
            Field::Introduction => &mut self.introduction,
            Field::Body => &mut self.body,
            Field::Conclusion => &mut self.conclusion,
            Field::References => &mut self.references,
        }
    }
}

/// Split outline text on runs of newlines, dropping empty entries
pub fn parse_index(text: &str) -> Vec<&str> {
    text.split('\n').filter(|item| !item.is_empty()).collect()
}

/// The text fields of a [`DocumentModel`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    ClassName,
    DocDate,
    IndexText,
    Introduction,
    Body,
    Conclusion,
    References,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Title,
        Field::Author,
        Field::ClassName,
        Field::DocDate,
        Field::IndexText,
        Field::Introduction,
        Field::Body,
        Field::Conclusion,
        Field::References,
    ];

    /// Form label
    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Título",
            Field::Author => "Autor",
            Field::ClassName => "Turma",
            Field::DocDate => "Data",
            Field::IndexText => "Índice (uma linha por item)",
            Field::Introduction => "Introdução",
            Field::Body => "Desenvolvimento",
            Field::Conclusion => "Conclusão",
            Field::References => "Referências",
        }
    }

    /// Whether the field is edited as multi-line text
    pub fn is_multiline(self) -> bool {
        matches!(
            self,
            Field::IndexText
                | Field::Introduction
                | Field::Body
                | Field::Conclusion
                | Field::References
        )
    }
}
