use std::fmt;

/// Coarse category of the code change a prompt asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Bugfix,
    Feature,
    Refactor,
    Update,
    General,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Bugfix => "bugfix",
            Intent::Feature => "feature",
            Intent::Refactor => "refactor",
            Intent::Update => "update",
            Intent::General => "general",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Intent::Bugfix => "Bug Fix",
            Intent::Feature => "New Feature",
            Intent::Refactor => "Refactor",
            Intent::Update => "Update/Modify",
            Intent::General => "General",
        }
    }
}

/// How much codebase exploration a prompt is likely to need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vagueness {
    Low,
    Medium,
    High,
}

impl Vagueness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vagueness::Low => "low",
            Vagueness::Medium => "medium",
            Vagueness::High => "high",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Vagueness::Low => "Low (specific file/function mentioned)",
            Vagueness::Medium => "Medium (feature/bug described but no exact location)",
            Vagueness::High => "High (very generic — needs deep codebase exploration)",
        }
    }
}

/// Architectural layer a file belongs to, used for grouping and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileCategory {
    DatabaseMigration,
    ApiRoute,
    ServiceLayer,
    Composable,
    Page,
    Component,
    TypeDefinition,
    Middleware,
    Utility,
    Test,
    Sql,
    Documentation,
    Config,
    Source,
}

impl FileCategory {
    /// Order in which layers are walked when building implementation steps.
    pub const LAYER_ORDER: [FileCategory; 9] = [
        FileCategory::DatabaseMigration,
        FileCategory::Sql,
        FileCategory::TypeDefinition,
        FileCategory::ApiRoute,
        FileCategory::Middleware,
        FileCategory::ServiceLayer,
        FileCategory::Composable,
        FileCategory::Component,
        FileCategory::Page,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileCategory::DatabaseMigration => "Database Migration",
            FileCategory::ApiRoute => "API Route",
            FileCategory::ServiceLayer => "Service Layer",
            FileCategory::Composable => "Composable",
            FileCategory::Page => "Page",
            FileCategory::Component => "Component",
            FileCategory::TypeDefinition => "Type Definition",
            FileCategory::Middleware => "Middleware",
            FileCategory::Utility => "Utility",
            FileCategory::Test => "Test",
            FileCategory::Sql => "SQL",
            FileCategory::Documentation => "Documentation",
            FileCategory::Config => "Config",
            FileCategory::Source => "Source",
        }
    }
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredFile {
    /// Path relative to the project root, always '/'-separated.
    pub path: String,
    pub score: u32,
}
