//! Integration tests for the validation engine and the standard validators.

use mapscope::prelude::*;

fn messy_tree() -> MappingTree {
    let mut tree = MappingTree::new();
    {
        let class = tree.class_entry("a/Messy");
        class.docs = vec!["Fine first line.".into(), "\ttab indented".into()];
        class.field_entry("count").docs = vec!["Trailing space. ".into()];
        let method = class.method_entry("run", "(I)V");
        method.docs = vec!["Runs.".into()];
        method.param_entry(1).name = Some("class".into());
    }
    {
        let clean = tree.class_entry("a/Clean");
        clean.docs = vec!["Nothing wrong here.".into()];
        clean.method_entry("go", "()V").docs = vec!["Goes.".into()];
    }
    tree
}

#[test]
fn standard_validators_cover_docs_naming_and_slots() {
    let structure = JarStructure::new().with_class(
        ClassStructure::new("a/Messy")
            .with_field(FieldStructure::new("count", "I"))
            .with_method(
                MethodStructure::new("run", "(I)V").with_access(MethodAccessFlags::STATIC),
            ),
    );

    let tree = messy_tree();
    let report = ValidationEngine::standard()
        .run(&tree, Some(&structure))
        .unwrap();

    assert!(report.has_errors());
    assert!(report.has_warnings());

    let paths: Vec<String> = report
        .entries()
        .iter()
        .map(|e| format!("{}: {}", e.path, e.issue.message))
        .collect();
    // Tab in class docs is an error.
    assert!(paths.iter().any(|p| p.starts_with("a/Messy:") && p.contains("tab")));
    // Trailing whitespace on the field doc is a warning.
    assert!(paths.iter().any(|p| p.starts_with("a/Messy.count:")));
    // Reserved word as a parameter name is an error.
    assert!(paths.iter().any(|p| p.starts_with("a/Messy.run(I)V[1]:")));
    // Static (I)V only has slot 0, so slot 1 is also structurally impossible.
    assert!(paths
        .iter()
        .any(|p| p.starts_with("a/Messy.run(I)V[1]:") && p.contains("slot")));
}

#[test]
fn clean_branches_are_not_materialized() {
    let tree = messy_tree();
    let report = ValidationEngine::standard().run(&tree, None).unwrap();

    assert!(report
        .entries()
        .iter()
        .all(|e| !e.path.starts_with("a/Clean")));
}

#[test]
fn validation_never_mutates_the_tree() {
    let tree = messy_tree();
    let before = tree.clone();
    ValidationEngine::standard().run(&tree, None).unwrap();
    assert_eq!(tree, before);
}

#[test]
fn runs_are_deterministic() {
    let tree = messy_tree();
    let first = ValidationEngine::standard().run(&tree, None).unwrap();
    let second = ValidationEngine::standard().run(&tree, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn empty_tree_yields_an_empty_report() {
    let tree = MappingTree::new();
    let report = ValidationEngine::standard().run(&tree, None).unwrap();
    assert!(report.is_empty());
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 0);
}

#[test]
fn missing_structure_degrades_slot_checking() {
    let mut tree = MappingTree::new();
    // Slot 1 is valid under the instance reading of (I)V, so without an oracle
    // the unknown-staticness union must accept it.
    tree.class_entry("a/B")
        .method_entry("run", "(I)V")
        .param_entry(1)
        .name = Some("amount".into());

    let report = ValidationEngine::standard().run(&tree, None).unwrap();
    assert!(!report.has_errors());
}

#[test]
fn custom_validators_merge_with_the_standard_set() {
    struct DocLengthValidator;
    impl Validator for DocLengthValidator {
        fn name(&self) -> &'static str {
            "doc-length"
        }
        fn kinds(&self) -> VisitKinds {
            VisitKinds::CLASSES
        }
        fn check_class(
            &mut self,
            class: &ClassMapping,
            _structure: Option<&ClassStructure>,
            issues: &mut IssueSink<'_>,
        ) -> Result<VisitFlow> {
            if class.docs.len() > 1 {
                issues.warning("documentation longer than one line");
            }
            Ok(VisitFlow::Descend)
        }
    }

    let tree = messy_tree();
    let mut engine = ValidationEngine::standard();
    engine.register(Box::new(DocLengthValidator));
    let report = engine.run(&tree, None).unwrap();

    assert!(report
        .entries()
        .iter()
        .any(|e| e.issue.validator == "doc-length"));
}

#[test]
fn report_summary_counts_by_severity() {
    let mut tree = MappingTree::new();
    tree.class_entry("a/B").docs = vec!["Ends with a blank.".into(), String::new()];

    let report = ValidationEngine::standard().run(&tree, None).unwrap();
    assert_eq!(report.error_count(), 0);
    assert_eq!(report.warning_count(), 1);
    assert!(report.summary().contains("1 warning"));
}
