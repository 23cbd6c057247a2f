use inidoc::{ini, parse_str, Document, Entry, Quote, Value, ValueKind};

#[test]
fn test_ini_macro_empty() {
    let doc = ini!();
    assert_eq!(doc, Document::new());
    assert_eq!(doc.section_count(), 1);

    let doc = ini! {};
    assert!(doc.is_empty());
}

#[test]
fn test_ini_macro_global_keys() {
    let doc = ini! {
        "name" => "demo",
        "retries" => 3,
        "verbose" => "yes"
    };

    assert_eq!(doc.section_count(), 1);
    assert_eq!(doc.get(None, "name").map(Entry::raw), Some("demo"));
    assert_eq!(doc.get_entry(None, "retries").unwrap().1, Value::Integer(3));
    assert_eq!(doc.get_entry(None, "verbose").unwrap().1, Value::Boolean(true));
}

#[test]
fn test_ini_macro_sections_keep_order() {
    let doc = ini! {
        ["zeta"] { "z" => 1 }
        ["alpha"] {
            "b" => 2,
            "a" => 1,
        }
    };

    let names: Vec<_> = doc.sections().map(|s| s.name()).collect();
    assert_eq!(names, vec![None, Some("zeta"), Some("alpha")]);

    let keys: Vec<_> = doc.section(Some("alpha")).unwrap().keys().map(|k| k.name()).collect();
    assert_eq!(keys, vec!["b", "a"]);
}

#[test]
fn test_ini_macro_expressions() {
    let port: u16 = 8080;
    let host = String::from("example.org");
    let section = "server";

    let doc = ini! {
        [section] {
            "host" => host,
            "port" => port,
            "ratio" => 0.75,
            "label" => format!("'{}:{}'", host, port),
        }
    };

    assert_eq!(
        doc.lookup(Some("server"), "port", ValueKind::Integer),
        Some(Value::Integer(8080))
    );
    assert_eq!(doc.get_entry(Some("server"), "ratio").unwrap().1, Value::Float(0.75));

    let label = doc.get(Some("server"), "label").unwrap();
    assert_eq!(label.quote(), Some(Quote::Single));
    assert_eq!(label.as_string().as_deref(), Some("example.org:8080"));
}

#[test]
fn test_ini_macro_repeated_key_overwrites() {
    let doc = ini! {
        ["s"] {
            "k" => 1,
            "other" => 2,
            "k" => 3,
        }
    };

    let section = doc.section(Some("s")).unwrap();
    assert_eq!(section.len(), 2);
    assert_eq!(section.get("k").map(Entry::raw), Some("3"));
    assert_eq!(section.entries().get_index(0).map(|(k, _)| k.as_str()), Some("k"));
}

#[test]
fn test_ini_macro_equals_parsed_text() {
    let built = ini! {
        "top" => "level",
        ["db"] {
            "host" => "localhost",
            "port" => 5432,
            "password" => "\"s3cret\"",
        },
        ["cache"] {},
    };

    let parsed = parse_str(
        "top = level\n\
         [db]\n\
         host = localhost\n\
         port = 5432\n\
         password = \"s3cret\"\n\
         [cache]\n",
    )
    .unwrap();

    println!("Built: {:?}", built);
    assert_eq!(built, parsed);
}
