// Extraction result types
//
// Everything here is produced fresh per extraction call and never mutated once handed
// back. All types serialize with serde so results can cross the Python boundary as JSON.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::extractors::lexical::split_top_level_commas;

/// Opaque identifier of a source unit, supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub String);

impl FileId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FileId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 0-based line/column position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

/// Start/end pair of positions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Closed vocabulary of recognized Spring and Lombok annotations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SemanticAnnotationKind {
    Component,
    Service,
    Repository,
    Controller,
    RestController,
    Configuration,
    Bean,
    Autowired,
    Qualifier,
    Value,
    RequiredArgsCtor,
    AllArgsCtor,
    NoArgsCtor,
    Data,
    LombokValue,
    Slf4j,
    NonNull,
}

impl SemanticAnnotationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticAnnotationKind::Component => "COMPONENT",
            SemanticAnnotationKind::Service => "SERVICE",
            SemanticAnnotationKind::Repository => "REPOSITORY",
            SemanticAnnotationKind::Controller => "CONTROLLER",
            SemanticAnnotationKind::RestController => "REST_CONTROLLER",
            SemanticAnnotationKind::Configuration => "CONFIGURATION",
            SemanticAnnotationKind::Bean => "BEAN",
            SemanticAnnotationKind::Autowired => "AUTOWIRED",
            SemanticAnnotationKind::Qualifier => "QUALIFIER",
            SemanticAnnotationKind::Value => "VALUE",
            SemanticAnnotationKind::RequiredArgsCtor => "REQUIRED_ARGS_CTOR",
            SemanticAnnotationKind::AllArgsCtor => "ALL_ARGS_CTOR",
            SemanticAnnotationKind::NoArgsCtor => "NO_ARGS_CTOR",
            SemanticAnnotationKind::Data => "DATA",
            SemanticAnnotationKind::LombokValue => "LOMBOK_VALUE",
            SemanticAnnotationKind::Slf4j => "SLF4J",
            SemanticAnnotationKind::NonNull => "NON_NULL",
        }
    }
}

impl fmt::Display for SemanticAnnotationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field visibility; absence means package-private
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

/// A recognized annotation occurrence
///
/// Identity is `(name, line, column)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: SemanticAnnotationKind,
    pub line: u32,
    pub column: u32,
    pub parameters: IndexMap<String, String>,
}

impl AnnotationInfo {
    pub fn identity(&self) -> (&str, u32, u32) {
        (&self.name, self.line, self.column)
    }

    /// The `value` parameter, if decoded
    pub fn value(&self) -> Option<&str> {
        self.parameters.get("value").map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub position: Position,
    pub range: Range,
    pub annotations: Vec<AnnotationInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
    pub is_final: bool,
    pub is_static: bool,
}

impl FieldInfo {
    pub fn has_annotation(&self, kind: SemanticAnnotationKind) -> bool {
        self.annotations.iter().any(|a| a.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    pub fully_qualified_name: String,
    pub file_id: FileId,
    pub position: Position,
    pub range: Range,
    pub annotations: Vec<AnnotationInfo>,
    pub fields: Vec<FieldInfo>,
    pub imports: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interfaces: Option<Vec<String>>,
}

impl ClassInfo {
    /// `package.Name`, or just `Name` outside a package
    pub fn qualify(package_name: Option<&str>, name: &str) -> String {
        match package_name {
            Some(package) if !package.is_empty() => format!("{}.{}", package, name),
            _ => name.to_string(),
        }
    }

    pub fn has_annotation(&self, kind: SemanticAnnotationKind) -> bool {
        self.annotations.iter().any(|a| a.kind == kind)
    }
}

/// A parameter of a constructor or method
///
/// `param_type` keeps generic arguments literally (`List<String>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterInfo {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
}

impl ParameterInfo {
    pub fn new(param_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
        }
    }

    /// Type without generic arguments: `Map<K, V>` -> `Map`
    pub fn base_type(&self) -> &str {
        match self.param_type.find('<') {
            Some(idx) => self.param_type[..idx].trim_end(),
            None => &self.param_type,
        }
    }

    /// Top-level generic arguments: `Map<String, List<Long>>` -> `["String", "List<Long>"]`
    pub fn generic_arguments(&self) -> Vec<String> {
        let (Some(open), Some(close)) = (self.param_type.find('<'), self.param_type.rfind('>'))
        else {
            return Vec::new();
        };
        if close <= open {
            return Vec::new();
        }
        split_top_level_commas(&self.param_type[open + 1..close])
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorInfo {
    pub parameters: Vec<ParameterInfo>,
    pub has_autowired_annotation: bool,
    pub position: Position,
    pub range: Range,
}

/// An `@Autowired` setter method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetterInfo {
    pub name: String,
    pub parameters: Vec<ParameterInfo>,
    pub has_autowired_annotation: bool,
    pub annotations: Vec<AnnotationInfo>,
    pub position: Position,
    pub range: Range,
}

/// A `@Bean` factory method; its parameters are injection points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeanMethodInfo {
    pub name: String,
    pub return_type: String,
    pub parameters: Vec<ParameterInfo>,
    pub annotations: Vec<AnnotationInfo>,
    pub position: Position,
    pub range: Range,
}

/// Everything extracted from one source unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceUnitResults {
    pub file_id: FileId,
    pub classes: Vec<ClassInfo>,
    pub constructors: Vec<ConstructorInfo>,
    pub setters: Vec<SetterInfo>,
    pub bean_methods: Vec<BeanMethodInfo>,
}

impl SourceUnitResults {
    pub fn empty(file_id: FileId) -> Self {
        Self {
            file_id,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.constructors.is_empty()
            && self.setters.is_empty()
            && self.bean_methods.is_empty()
    }
}
