//! Fixed names the analyzers and rewrite passes match against

/// Method names counted as deprecated API usage
pub const DEPRECATED_METHODS: [&str; 4] = ["list", "toURL", "getBytes", "newInstance"];

/// Constructed type names counted as deprecated API usage
pub const DEPRECATED_TYPES: [&str; 2] = ["Date", "SecureRandom"];

/// Calls flagged as potentially performance-sensitive
pub const PERFORMANCE_SENSITIVE_METHODS: [&str; 2] = ["equals", "hashCode"];

/// Annotation (simple name) marking a deprecated method declaration
pub const DEPRECATED_ANNOTATION: &str = "Deprecated";

/// Separates the short parse diagnostic from the verbose tree dump
pub const DIAGNOSTIC_DUMP_MARKER: &str = "Problem stacktrace :";

/// Canonical source file extension
pub const JAVA_EXTENSION: &str = ".java";

/// Type names a `list`/`toURL` receiver must resolve to
pub const FILE_TYPES: [&str; 2] = ["File", "java.io.File"];

/// Substring a `newInstance` receiver type must contain
pub const CLASS_TYPE_MARKER: &str = "Class";

/// Receiver of the numeric range factory used by index-loop rewrites
pub const RANGE_FACTORY: &str = "IntStream";

/// Charset constant substituted into `getBytes` calls
pub const CHARSET_CONSTANT: &str = "StandardCharsets.UTF_8";

/// Deepest syntax tree accepted by [`crate::parse`]. Every traversal after
/// ingestion recurses, so this bounds their stack use.
pub const DEFAULT_MAX_DEPTH: usize = 200;

/// Check whether a method name is in the deprecated set
pub fn is_deprecated_method(name: &str) -> bool {
    DEPRECATED_METHODS.contains(&name)
}

/// Check whether a constructed type name is in the deprecated set
pub fn is_deprecated_type(type_name: &str) -> bool {
    DEPRECATED_TYPES.contains(&type_name)
}

pub fn is_file_type(type_name: &str) -> bool {
    FILE_TYPES.contains(&type_name)
}

pub fn is_class_type(type_name: &str) -> bool {
    type_name.contains(CLASS_TYPE_MARKER)
}
