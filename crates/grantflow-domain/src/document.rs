//! Document kind module - extraction strategy hints

/// Kind of uploaded document, selecting the text-extraction strategy
///
/// Grant applications are flowing prose and extract well page by page;
/// slide decks need layout-preserving extraction so text blocks stay
/// legible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DocumentKind {
    /// A written grant application (generic extraction)
    #[default]
    Application,

    /// A slide deck (layout-preserving extraction)
    Presentation,
}

impl DocumentKind {
    /// Get the kind as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Application => "application",
            DocumentKind::Presentation => "presentation",
        }
    }

    /// Parse a document kind from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "application" => Some(DocumentKind::Application),
            "presentation" => Some(DocumentKind::Presentation),
            _ => None,
        }
    }
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid document kind: {}", s))
    }
}
