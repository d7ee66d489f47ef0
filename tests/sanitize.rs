//! Integration tests for the sanitization engine and its standard pass library.
//!
//! Scenarios build a small mapping tree plus the structural metadata the passes
//! rely on, run the standard engine, and check the exact shape of the surviving
//! tree.

use mapscope::prelude::*;

/// A class with one real method and one synthetic bouncer forwarding to it.
fn bouncer_structure() -> JarStructure {
    JarStructure::new().with_class(
        ClassStructure::new("a/C")
            .with_method(
                MethodStructure::new("bounce", "(I)V")
                    .with_access(MethodAccessFlags::SYNTHETIC)
                    .with_bouncer_target(MemberRef::new("a/C", "run", "(I)V")),
            )
            .with_method(MethodStructure::new("run", "(I)V")),
    )
}

#[test]
fn bouncer_annotations_move_to_an_existing_target() {
    let structure = bouncer_structure();
    let mut tree = MappingTree::new();
    {
        let class = tree.class_entry("a/C");
        // The annotator documented the bouncer, including a parameter name.
        let bouncer = class.method_entry("bounce", "(I)V");
        bouncer.docs = vec!["From the bouncer.".into()];
        bouncer.param_entry(1).name = Some("count".into());
        // The real method already has docs of its own but no parameters.
        class.method_entry("run", "(I)V").docs = vec!["The real one.".into()];
    }

    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();

    let class = tree.class("a/C").unwrap();
    assert!(class.method("bounce", "(I)V").is_none());
    let run = class.method("run", "(I)V").unwrap();
    // Existing docs win; missing parameters are adopted.
    assert_eq!(run.docs, ["The real one."]);
    assert_eq!(run.param(1).unwrap().name.as_deref(), Some("count"));
}

#[test]
fn bouncer_is_rekeyed_when_the_target_has_no_mapping() {
    let structure = bouncer_structure();
    let mut tree = MappingTree::new();
    tree.class_entry("a/C")
        .method_entry("bounce", "(I)V")
        .docs = vec!["Hi".into()];

    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();

    let class = tree.class("a/C").unwrap();
    assert!(class.method("bounce", "(I)V").is_none());
    assert_eq!(class.method("run", "(I)V").unwrap().docs, ["Hi"]);
}

#[test]
fn mover_resets_between_runs() {
    let structure = bouncer_structure();
    let annotated = {
        let mut tree = MappingTree::new();
        tree.class_entry("a/C")
            .method_entry("bounce", "(I)V")
            .docs = vec!["Hi".into()];
        tree
    };

    let mut engine = SanitizeEngine::new();
    engine.register(Box::new(BouncerMover::new()));

    let mut first = annotated.clone();
    engine.run(&mut first, Some(&structure)).unwrap();
    // Scratch state from the completed cycle must not bleed into a reuse.
    let mut second = annotated.clone();
    engine.run(&mut second, Some(&structure)).unwrap();

    assert_eq!(first, second);
    assert_eq!(
        second.class("a/C").unwrap().method("run", "(I)V").unwrap().docs,
        ["Hi"]
    );
}

#[test]
fn synthetic_members_are_stripped_but_lambdas_survive() {
    let structure = JarStructure::new().with_class(
        ClassStructure::new("a/C")
            .with_field(
                FieldStructure::new("this$0", "La/B;")
                    .with_access(FieldAccessFlags::SYNTHETIC),
            )
            .with_field(FieldStructure::new("count", "I"))
            .with_method(
                MethodStructure::new("access$000", "()I")
                    .with_access(MethodAccessFlags::SYNTHETIC),
            )
            .with_method(
                MethodStructure::new("lambda$go$0", "(I)V")
                    .with_access(MethodAccessFlags::SYNTHETIC)
                    .with_lambda(),
            ),
    );

    let mut tree = MappingTree::new();
    {
        let class = tree.class_entry("a/C");
        class.field_entry("this$0").docs = vec!["Outer ref.".into()];
        class.field_entry("count").docs = vec!["A counter.".into()];
        class.method_entry("access$000", "()I").docs = vec!["Accessor.".into()];
        let lambda = class.method_entry("lambda$go$0", "(I)V");
        lambda.param_entry(1).name = Some("delta".into());
    }

    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();

    let class = tree.class("a/C").unwrap();
    assert!(class.field("this$0").is_none());
    assert!(class.field("count").is_some());
    assert!(class.method("access$000", "()I").is_none());
    // Lambda bodies keep human-meaningful parameter names.
    let lambda = class.method("lambda$go$0", "(I)V").unwrap();
    assert_eq!(lambda.param(1).unwrap().name.as_deref(), Some("delta"));
}

#[test]
fn enum_machinery_is_removed_only_inside_enums() {
    let enum_structure = ClassStructure::new("a/Color")
        .with_access(ClassAccessFlags::ENUM)
        .with_method(MethodStructure::new(
            "<init>",
            "(Ljava/lang/String;ILjava/lang/String;)V",
        ));
    let plain_structure = ClassStructure::new("a/Plain");
    let structure = JarStructure::new()
        .with_class(enum_structure)
        .with_class(plain_structure);

    let mut tree = MappingTree::new();
    {
        let color = tree.class_entry("a/Color");
        color.docs = vec!["Colors.".into()];
        color.method_entry("values", "()[La/Color;").docs = vec!["gen".into()];
        color
            .method_entry("valueOf", "(Ljava/lang/String;)La/Color;")
            .docs = vec!["gen".into()];
        color.field_entry("$VALUES").docs = vec!["gen".into()];
        let ctor = color.method_entry("<init>", "(Ljava/lang/String;ILjava/lang/String;)V");
        ctor.param_entry(1).name = Some("name".into());
        ctor.param_entry(2).name = Some("ordinal".into());
        ctor.param_entry(3).name = Some("hex".into());
    }
    {
        // Same member names outside an enum are left alone.
        let plain = tree.class_entry("a/Plain");
        plain.method_entry("values", "()[I").docs = vec!["Mine.".into()];
        plain.field_entry("$VALUES").docs = vec!["Mine.".into()];
    }

    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();

    let color = tree.class("a/Color").unwrap();
    assert!(color.method("values", "()[La/Color;").is_none());
    assert!(color
        .method("valueOf", "(Ljava/lang/String;)La/Color;")
        .is_none());
    assert!(color.field("$VALUES").is_none());
    let ctor = color
        .method("<init>", "(Ljava/lang/String;ILjava/lang/String;)V")
        .unwrap();
    assert!(ctor.param(1).is_none());
    assert!(ctor.param(2).is_none());
    assert_eq!(ctor.param(3).unwrap().name.as_deref(), Some("hex"));

    let plain = tree.class("a/Plain").unwrap();
    assert!(plain.method("values", "()[I").is_some());
    assert!(plain.field("$VALUES").is_some());
}

#[test]
fn impossible_parameter_slots_are_dropped() {
    let structure = JarStructure::new().with_class(
        ClassStructure::new("a/C").with_method(
            MethodStructure::new("add", "(DJ)V").with_access(MethodAccessFlags::STATIC),
        ),
    );

    let mut tree = MappingTree::new();
    {
        let method = tree.class_entry("a/C").method_entry("add", "(DJ)V");
        method.docs = vec!["Adds.".into()];
        // Static (DJ)V has slots 0 and 2; slot 1 is the high half of the double.
        method.param_entry(0).name = Some("a".into());
        method.param_entry(1).name = Some("ghost".into());
        method.param_entry(2).name = Some("b".into());
    }

    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();

    let method = tree.class("a/C").unwrap().method("add", "(DJ)V").unwrap();
    assert!(method.param(0).is_some());
    assert!(method.param(1).is_none());
    assert!(method.param(2).is_some());
}

#[test]
fn unknown_staticness_keeps_both_interpretations() {
    // No structural entry for the method: slot 0 (static reading) and slot 1
    // (instance reading) must both survive.
    let structure = JarStructure::new().with_class(ClassStructure::new("a/C"));

    let mut tree = MappingTree::new();
    {
        let method = tree.class_entry("a/C").method_entry("run", "(I)V");
        method.param_entry(0).name = Some("maybe_static".into());
        method.param_entry(1).name = Some("maybe_instance".into());
        method.param_entry(2).name = Some("never".into());
    }

    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();

    let method = tree.class("a/C").unwrap().method("run", "(I)V").unwrap();
    assert!(method.param(0).is_some());
    assert!(method.param(1).is_some());
    assert!(method.param(2).is_none());
}

#[test]
fn standard_library_is_idempotent() {
    let structure = bouncer_structure();
    let mut tree = MappingTree::new();
    {
        let class = tree.class_entry("a/C");
        let bouncer = class.method_entry("bounce", "(I)V");
        bouncer.docs = vec!["From the bouncer.".into()];
        bouncer.param_entry(1).name = Some("count".into());
    }

    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();
    let once = tree.clone();
    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();
    assert_eq!(tree, once);
}

#[test]
fn empty_engine_is_the_identity() {
    let mut tree = MappingTree::new();
    tree.package_entry("a").docs = vec!["Package a.".into()];
    tree.class_entry("a/C").docs = vec!["C.".into()];
    let before = tree.clone();

    SanitizeEngine::new().run(&mut tree, None).unwrap();
    assert_eq!(tree, before);
}

#[test]
fn missing_structure_disables_structure_driven_passes() {
    let mut tree = MappingTree::new();
    {
        let class = tree.class_entry("a/Color");
        class.method_entry("values", "()[La/Color;").docs = vec!["gen".into()];
        class.field_entry("$VALUES").docs = vec!["gen".into()];
    }
    let before = tree.clone();

    SanitizeEngine::standard().run(&mut tree, None).unwrap();
    // Without an oracle nothing can be recognized as enum machinery.
    assert_eq!(tree, before);
}

#[test]
fn stripper_declines_without_an_oracle() {
    let mut tree = MappingTree::new();
    tree.class_entry("a/Dead").method_entry("run", "()V");
    let before = tree.clone();

    let mut engine = SanitizeEngine::new();
    engine.register(Box::new(SyntheticStripper));
    engine.run(&mut tree, None).unwrap();
    // A declined pass must not even reach the empty-leaf prune.
    assert_eq!(tree, before);
}

#[test]
fn annotation_free_branches_are_pruned() {
    let mut tree = MappingTree::new();
    {
        let class = tree.class_entry("a/Dead");
        class.method_entry("run", "()V").param_entry(0);
    }
    tree.class_entry("a/Alive").docs = vec!["Alive.".into()];

    let structure = JarStructure::new()
        .with_class(ClassStructure::new("a/Dead").with_method(MethodStructure::new("run", "()V")))
        .with_class(ClassStructure::new("a/Alive"));
    SanitizeEngine::standard()
        .run(&mut tree, Some(&structure))
        .unwrap();

    assert!(tree.class("a/Dead").is_none());
    assert!(tree.class("a/Alive").is_some());
}

#[test]
fn mover_alone_preserves_rescued_parameters_verbatim() {
    let structure = JarStructure::new().with_class(
        ClassStructure::new("a/C")
            .with_method(
                MethodStructure::new("bouncer", "()V")
                    .with_access(MethodAccessFlags::SYNTHETIC | MethodAccessFlags::STATIC)
                    .with_bouncer_target(MemberRef::new("a/C", "target", "()V")),
            )
            .with_method(
                MethodStructure::new("target", "()V").with_access(MethodAccessFlags::STATIC),
            ),
    );

    let mut tree = MappingTree::new();
    {
        let class = tree.class_entry("a/C");
        let bouncer = class.method_entry("bouncer", "()V");
        bouncer.docs = vec!["Hi".into()];
        bouncer.param_entry(0).name = Some("x".into());
        class.method_entry("target", "()V").docs = vec!["Mine.".into()];
    }

    let mut engine = SanitizeEngine::new();
    engine.register(Box::new(BouncerMover::new()));
    engine.run(&mut tree, Some(&structure)).unwrap();

    let class = tree.class("a/C").unwrap();
    assert!(class.method("bouncer", "()V").is_none());
    let target = class.method("target", "()V").unwrap();
    assert_eq!(target.docs, ["Mine."]);
    // The mover copies parameters verbatim; judging their slots is another
    // pass's job.
    assert_eq!(target.param(0).unwrap().name.as_deref(), Some("x"));
}

#[test]
fn mover_alone_fills_an_empty_target() {
    let structure = JarStructure::new().with_class(
        ClassStructure::new("a/C")
            .with_method(
                MethodStructure::new("bouncer", "()V")
                    .with_access(MethodAccessFlags::SYNTHETIC | MethodAccessFlags::STATIC)
                    .with_bouncer_target(MemberRef::new("a/C", "target", "()V")),
            )
            .with_method(
                MethodStructure::new("target", "()V").with_access(MethodAccessFlags::STATIC),
            ),
    );

    let mut tree = MappingTree::new();
    {
        let class = tree.class_entry("a/C");
        let bouncer = class.method_entry("bouncer", "()V");
        bouncer.docs = vec!["Hi".into()];
        bouncer.param_entry(0).name = Some("x".into());
        class.method_entry("target", "()V");
    }

    let mut engine = SanitizeEngine::new();
    engine.register(Box::new(BouncerMover::new()));
    engine.run(&mut tree, Some(&structure)).unwrap();

    let class = tree.class("a/C").unwrap();
    assert!(class.method("bouncer", "()V").is_none());
    let target = class.method("target", "()V").unwrap();
    assert_eq!(target.docs, ["Hi"]);
    assert_eq!(target.param(0).unwrap().name.as_deref(), Some("x"));
}
