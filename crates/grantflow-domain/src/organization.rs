//! Organization module - guideline selection tags

/// Organization whose submission guidelines are injected into the prompt
///
/// Each organization has its own guideline file on disk; the tag selects
/// which one the prompt builder loads. `Fpi` is the designed default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Organization {
    /// Foundation for Advanced Research Projects
    #[default]
    Fpi,

    /// Central University
    Cu,
}

impl Organization {
    /// Get the organization tag as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Organization::Fpi => "fpi",
            Organization::Cu => "cu",
        }
    }

    /// Parse an organization tag from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fpi" => Some(Organization::Fpi),
            "cu" => Some(Organization::Cu),
            _ => None,
        }
    }

    /// File name of this organization's guideline text
    pub fn guideline_filename(&self) -> String {
        format!("{}.txt", self.as_str())
    }

    /// All known organizations
    pub fn all() -> [Organization; 2] {
        [Organization::Fpi, Organization::Cu]
    }
}

impl std::fmt::Display for Organization {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Organization {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid organization: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_tags() {
        assert_eq!(Organization::parse("fpi"), Some(Organization::Fpi));
        assert_eq!(Organization::parse("CU"), Some(Organization::Cu));
        assert_eq!(Organization::parse("acme"), None);
    }

    #[test]
    fn test_default_is_fpi() {
        assert_eq!(Organization::default(), Organization::Fpi);
    }

    #[test]
    fn test_guideline_filename() {
        assert_eq!(Organization::Fpi.guideline_filename(), "fpi.txt");
        assert_eq!(Organization::Cu.guideline_filename(), "cu.txt");
    }
}
