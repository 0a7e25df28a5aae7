//! Query model: a tagged union over the accepted modalities.

use super::error::SearchError;

/// One search request's input. Exactly one of text/image may be absent,
/// never both.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchQuery {
    Text(String),
    Image(Vec<u8>),
    TextImage { text: String, image: Vec<u8> },
}

impl SearchQuery {
    /// Builds a query from optional parts. Blank text and empty image
    /// buffers count as absent; a query with neither is invalid.
    pub fn from_parts(
        text: Option<String>,
        image: Option<Vec<u8>>,
    ) -> Result<Self, SearchError> {
        let text = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let image = image.filter(|i| !i.is_empty());

        match (text, image) {
            (Some(text), Some(image)) => Ok(SearchQuery::TextImage { text, image }),
            (Some(text), None) => Ok(SearchQuery::Text(text)),
            (None, Some(image)) => Ok(SearchQuery::Image(image)),
            (None, None) => Err(SearchError::InvalidQuery {
                reason: "a query needs text, an image, or both".to_string(),
            }),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            SearchQuery::Text(text) | SearchQuery::TextImage { text, .. } => Some(text),
            SearchQuery::Image(_) => None,
        }
    }

    pub fn image(&self) -> Option<&[u8]> {
        match self {
            SearchQuery::Image(image) | SearchQuery::TextImage { image, .. } => Some(image),
            SearchQuery::Text(_) => None,
        }
    }

    pub fn is_hybrid(&self) -> bool {
        matches!(self, SearchQuery::TextImage { .. })
    }

    /// Short label for logs.
    pub fn modality_label(&self) -> &'static str {
        match self {
            SearchQuery::Text(_) => "text",
            SearchQuery::Image(_) => "image",
            SearchQuery::TextImage { .. } => "hybrid",
        }
    }
}
