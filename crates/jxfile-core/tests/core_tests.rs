use jxfile_core::{
    ClassFileHints, FileObject, FileObjectError, JavaFileObject, Kind, LocateConfig, Modifier,
    NameError, NestingKind, SimpleJavaFileObject, SupportedAnnotationTypes,
};
use std::time::SystemTime;

#[test]
fn test_kind_extension_table() {
    let table: Vec<_> = Kind::ALL.iter().map(|k| (k.to_string(), k.extension())).collect();
    assert_eq!(
        table,
        vec![
            ("SOURCE".to_string(), ".java"),
            ("CLASS".to_string(), ".class"),
            ("HTML".to_string(), ".html"),
            ("OTHER".to_string(), ""),
        ]
    );
}

#[test]
fn test_kind_serializes_as_constant_name() {
    assert_eq!(serde_json::to_string(&Kind::Source).unwrap(), "\"SOURCE\"");
    assert_eq!(
        serde_json::to_string(&NestingKind::TopLevel).unwrap(),
        "\"TOP_LEVEL\""
    );
    assert_eq!(
        serde_json::to_string(&Modifier::NonSealed).unwrap(),
        "\"NON_SEALED\""
    );
    let kind: Kind = serde_json::from_str("\"CLASS\"").unwrap();
    assert_eq!(kind, Kind::Class);
}

#[test]
fn test_get_kind_is_idempotent() {
    let file = SimpleJavaFileObject::from_path("com/example/Foo.java");
    let first = file.kind();
    for _ in 0..3 {
        assert_eq!(file.kind(), first);
    }
}

#[test]
fn test_source_file_scenario() {
    let file = SimpleJavaFileObject::from_path("com/example/Foo.java");

    assert_eq!(file.kind(), Kind::Source);
    assert_eq!(file.kind().extension(), ".java");
    assert!(file.is_name_compatible("Foo", Kind::Source).unwrap());
    assert!(!file.is_name_compatible("Bar", Kind::Source).unwrap());
}

#[test]
fn test_class_file_scenario() {
    let file = SimpleJavaFileObject::from_path("Foo.class");

    assert_eq!(file.kind(), Kind::Class);
    assert!(file.is_name_compatible("Foo", Kind::Class).unwrap());
    assert!(!file.is_name_compatible("Foo", Kind::Source).unwrap());
}

#[test]
fn test_synthetic_file_scenario() {
    let file = SimpleJavaFileObject::from_path("generated/Manifest");

    assert_eq!(file.kind(), Kind::Other);
    assert_eq!(file.kind().extension(), "");
    assert_eq!(file.nesting_kind(), None);
    assert_eq!(file.access_level(), None);
}

#[test]
fn test_absent_arguments_fault() {
    let file = SimpleJavaFileObject::from_path("com/example/Foo.java");

    let err = file.check_name_compatible(None, Some(Kind::Source)).unwrap_err();
    assert!(matches!(
        err,
        FileObjectError::MissingArgument { argument: "simple_name" }
    ));

    let err = file.check_name_compatible(Some("Foo"), None).unwrap_err();
    assert!(matches!(err, FileObjectError::MissingArgument { argument: "kind" }));

    assert!(file.check_name_compatible(Some("Foo"), Some(Kind::Source)).unwrap());
}

#[test]
fn test_qualified_name_is_rejected() {
    let file = SimpleJavaFileObject::from_path("com/example/Foo.java");
    let err = file
        .is_name_compatible("com.example.Foo", Kind::Source)
        .unwrap_err();
    assert!(matches!(
        err,
        FileObjectError::InvalidSimpleName(NameError::Qualified { .. })
    ));
}

#[test]
fn test_hints_are_explicit_and_stable() {
    let file = SimpleJavaFileObject::new("/out/Outer$Inner.class", Kind::Class)
        .with_nesting_kind(NestingKind::Member)
        .with_access_level(Modifier::Protected)
        .with_last_modified(SystemTime::UNIX_EPOCH);

    assert_eq!(file.nesting_kind(), Some(NestingKind::Member));
    assert_eq!(file.nesting_kind(), file.nesting_kind());
    assert_eq!(file.access_level(), Some(Modifier::Protected));
    assert_eq!(file.last_modified(), Some(SystemTime::UNIX_EPOCH));
    assert!(file.is_name_compatible("Outer$Inner", Kind::Class).unwrap());
}

#[test]
fn test_file_objects_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SimpleJavaFileObject>();

    let file: Box<dyn JavaFileObject> =
        Box::new(SimpleJavaFileObject::for_source("Main", "class Main {}"));
    let handle = std::thread::spawn(move || file.is_name_compatible("Main", Kind::Source));
    assert!(handle.join().unwrap().unwrap());
}

#[test]
fn test_class_file_hints_reject_garbage() {
    assert!(ClassFileHints::read(b"not a class file").is_err());
    assert!(ClassFileHints::read(&[]).is_err());
}

#[test]
fn test_supported_annotation_types_matching() {
    let supported = SupportedAnnotationTypes::new([
        "com.example.Generated",
        "org.acme.*",
        "m.api/net.Tag",
    ]);
    let matcher = supported.matcher().unwrap();

    assert!(matcher.matches(None, "com.example.Generated"));
    assert!(matcher.matches(Some("any.module"), "org.acme.inject.Inject"));
    assert!(!matcher.matches(None, "org.acmeinc.Thing"));
    assert!(matcher.matches(Some("m.api"), "net.Tag"));
    assert!(!matcher.matches(Some("m.other"), "net.Tag"));
    assert!(!matcher.matches(None, "net.Tag"));
    assert!(!matcher.matches_all());

    let everything = SupportedAnnotationTypes::new(["*"]).matcher().unwrap();
    assert!(everything.matches_all());
    assert!(everything.matches(None, "anything.At.All"));
}

#[test]
fn test_supported_annotation_types_invalid_pattern() {
    let supported = SupportedAnnotationTypes::new(["com.*.Foo"]);
    assert!(matches!(
        supported.matcher(),
        Err(FileObjectError::InvalidAnnotationPattern { .. })
    ));
}

#[test]
fn test_locate_config_roundtrips_through_json() {
    let config: LocateConfig =
        serde_json::from_str(r#"{"root": "/src", "kinds": ["SOURCE"]}"#).unwrap();
    assert!(config.recurse);
    assert!(config.includes_kind(Kind::Source));
    assert!(!config.includes_kind(Kind::Html));
}
