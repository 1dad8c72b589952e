//! End-to-end tests of the validate/enhance pipeline

use javalift_analysis::{EnhancementResult, Enhancer, EnhancerConfig, ValidationResult};
use javalift_core::CodeMetrics;
use javalift_utils::read_source_bytes;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::fs;
use tempfile::tempdir;

const SAMPLE: [&str; 17] = [
    "import java.io.File;",
    "",
    "public class Sample {",
    "    @Deprecated",
    "    public void old(File dir, int k) {",
    "        dir.list();",
    "        switch (k) {",
    "            case 1:",
    "                go();",
    "                break;",
    "            default:",
    "                stop();",
    "        }",
    "        if (dir.equals(null)) { }",
    "        Object stamp = new Date();",
    "    }",
    "}",
];

fn sample() -> String {
    SAMPLE.join("\n")
}

#[test]
fn test_valid_code_validates() {
    assert_eq!(
        Enhancer::default().validate_text(&sample()),
        ValidationResult::valid("Valid code")
    );
}

#[test]
fn test_enhance_sample() {
    let code = sample();
    let result = Enhancer::default().enhance_text(&code);

    assert_eq!(result.original_code.as_deref(), Some(code.as_str()));
    assert_eq!(
        result.metrics,
        Some(CodeMetrics {
            total_lines_of_code: SAMPLE.len(),
            cyclomatic_complexity: 3,
            deprecated_api_count: 2,
            modernization_opportunities: 1,
        })
    );
    assert_eq!(
        result.warnings,
        vec![
            "Deprecated method found: old",
            "Potential performance-sensitive method: equals",
        ]
    );

    let enhanced = result.enhanced_code.unwrap();
    assert!(enhanced.contains("dir.listFiles();"));
    assert!(enhanced.contains("default -> stop();"));
    assert!(enhanced.contains("new Instant(now())"));
    assert!(!enhanced.contains("dir.list();"));
}

#[test]
fn test_unparsable_input_aborts() {
    let result = Enhancer::default().enhance_text("public class Broken { void f( }");
    assert_eq!(result.original_code.as_deref(), Some("public class Broken { void f( }"));
    assert_eq!(result.enhanced_code, None);
    assert_eq!(result.metrics, None);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("Error during enhancement: "));
    assert!(!result.warnings[0].contains("Problem stacktrace"));
}

#[test]
fn test_rewrite_failure_keeps_original_and_analysis() {
    let code = "class A { void f(int k) { switch (k) { case 1: go(); } lookup().list(); } }";
    let result = Enhancer::default().enhance_text(code);

    assert_eq!(result.enhanced_code.as_deref(), Some(code));
    let metrics = result.metrics.unwrap();
    assert_eq!(metrics.deprecated_api_count, 1);
    assert_eq!(metrics.cyclomatic_complexity, 2);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_overlapping_loop_shapes_end_as_range_call() {
    let code = "class A { void f(int n) { for (int i = 0; i < n; i++) { tick(); } } }";
    let result = Enhancer::default().enhance_text(code);

    assert_eq!(result.metrics.unwrap().modernization_opportunities, 1);
    assert_eq!(
        result.enhanced_code.as_deref(),
        Some("class A { void f(int n) { IntStream.range().forEach(() -> {\n    for (int i = 0 : n) { tick(); }\n}); } }")
    );
}

#[test]
fn test_enhancing_twice_is_not_stable() {
    let enhancer = Enhancer::default();
    let once = enhancer
        .enhance_text("class A { void f(int[] a) { for (int i = 0; i < a.length; i += 2) { use(a[i]); } } }")
        .enhanced_code
        .unwrap();
    let twice = enhancer.enhance_text(&once);

    // The spliced for-each keeps its initializer, which no longer parses.
    assert_eq!(twice.enhanced_code, None);
    assert_eq!(twice.metrics, None);
}

#[test]
fn test_validate_file() {
    let enhancer = Enhancer::default();

    assert_eq!(
        enhancer.validate_file(Some("Main.java"), b""),
        ValidationResult::invalid("File is empty")
    );
    assert_eq!(
        enhancer.validate_file(None, b"class Main {}"),
        ValidationResult::invalid("Invalid file type. Only .java files are allowed")
    );
    assert_eq!(
        enhancer.validate_file(Some("Main.JAVA"), b"class Main {}"),
        ValidationResult::valid("Valid code").with_file_name(Some("Main.JAVA"))
    );

    let result = enhancer.validate_file(Some("Main.java"), b"class Main {");
    assert!(!result.valid);
    assert!(result.message.starts_with("Invalid Java syntax: "));
    assert_eq!(result.file_name.as_deref(), Some("Main.java"));
}

#[test]
fn test_enhance_file_from_disk() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let path = dir.path().join("Sample.java");
    fs::write(&path, sample())?;

    let bytes = read_source_bytes(&path)?;
    let from_file = Enhancer::default().enhance_file(&bytes);
    assert_eq!(from_file, Enhancer::default().enhance_text(&sample()));
    Ok(())
}

#[test]
fn test_enhance_file_decode_failure() {
    let result = Enhancer::default().enhance_file(&[b'c', 0xc3, 0x28]);
    assert_eq!(result.original_code, None);
    assert_eq!(result.enhanced_code, None);
    assert_eq!(result.metrics, None);
    assert_eq!(result.warnings.len(), 1);
    assert!(result.warnings[0].starts_with("Error reading file: "));
}

#[test]
fn test_disabled_passes_leave_text_untouched() {
    let mut config = EnhancerConfig::default();
    config.engine.loops = false;
    config.engine.switches = false;
    config.engine.deprecated_apis = false;

    let code = "class A { void f(File d) { d.list(); Object o = new Date(); for (int i = 0; i < 3; i++) { } } }";
    let result = Enhancer::new(config).enhance_text(code);
    assert_eq!(result.enhanced_code.as_deref(), Some(code));
    assert_eq!(result.metrics.unwrap().deprecated_api_count, 2);
}

#[test]
fn test_result_json_field_names() {
    let result: EnhancementResult = Enhancer::default().enhance_text("class A { }");
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["originalCode"], "class A { }");
    assert_eq!(value["enhancedCode"], "class A { }");
    assert_eq!(value["metrics"]["cyclomaticComplexity"], 1);
    assert_eq!(value["warnings"], serde_json::json!([]));
}

proptest! {
    #[test]
    fn prop_empty_file_rejected_for_any_name(name in "[A-Za-z]{1,10}\\.(java|kt|txt)") {
        let result = Enhancer::default().validate_file(Some(name.as_str()), b"");
        prop_assert_eq!(result, ValidationResult::invalid("File is empty"));
    }

    #[test]
    fn prop_wrong_extension_rejected_even_if_valid(name in "[A-Za-z]{1,10}\\.(kt|py|txt|jav)") {
        let result = Enhancer::default().validate_file(Some(name.as_str()), b"class A { }");
        prop_assert!(!result.valid);
        prop_assert!(result.message.contains("Invalid file type"));
        prop_assert_eq!(result.file_name, Some(name));
    }

    #[test]
    fn prop_loops_and_ifs_do_not_add_complexity(depth in 0usize..6) {
        let body = "if (x) { while (y) { } } ".repeat(depth);
        let code = format!("class A {{ void f() {{ {body}}} }}");
        let metrics = Enhancer::default().metrics(&code).unwrap();
        prop_assert_eq!(metrics.cyclomatic_complexity, 1);
    }
}
