// Shared extractor infrastructure
//
// - types.rs: result data structures (ClassInfo, FieldInfo, AnnotationInfo, ...)
// - extractor.rs: BaseExtractor holding configuration and collaborators
// - positions.rs: PositionCalculator seam and the token-based default

pub mod extractor;
pub mod positions;
pub mod types;

pub use extractor::BaseExtractor;
pub use positions::{PositionCalculator, TokenPositionCalculator};
pub use types::{
    AnnotationInfo, BeanMethodInfo, ClassInfo, ConstructorInfo, FieldInfo, FileId,
    ParameterInfo, Position, Range, SemanticAnnotationKind, SetterInfo, SourceUnitResults,
    Visibility,
};
