//! Grammar conformance tests
//!
//! Each test feeds a small INI fragment through the public entry points and
//! checks the resulting document or the exact error location. See the
//! `inidoc::format` module for the grammar these cases exercise.

use inidoc::lexer::{Lexer, Position, Token};
use inidoc::{parse_str, parse_str_with_options, Error, ParseOptions, Quote, Value, ValueKind};

fn syntax_error(input: &str) -> (usize, usize, String) {
    match parse_str(input) {
        Err(Error::Syntax {
            line, column, msg, ..
        }) => (line, column, msg),
        other => panic!("Expected syntax error for {:?}, got {:?}", input, other),
    }
}

fn raw<'a>(doc: &'a inidoc::Document, section: Option<&str>, key: &str) -> &'a str {
    doc.get(section, key)
        .map(|entry| entry.raw())
        .unwrap_or_else(|| panic!("missing key {:?} in {:?}", key, section))
}

// Lines and comments

#[test]
fn test_comment_lines() {
    let doc = parse_str("; semicolon\n# hash\n   ; indented\nkey = value\n").unwrap();
    assert_eq!(doc.len(), 1);
    assert_eq!(raw(&doc, None, "key"), "value");
}

#[test]
fn test_inline_comments() {
    let doc = parse_str("a = 1 ; trailing\nb = two words;tight\nc = x # kept\n").unwrap();
    assert_eq!(raw(&doc, None, "a"), "1");
    assert_eq!(raw(&doc, None, "b"), "two words");
    assert_eq!(raw(&doc, None, "c"), "x # kept");
}

#[test]
fn test_custom_comment_markers() {
    let options = ParseOptions::new()
        .with_comment_markers(&['!'])
        .with_inline_comment_markers(&['#']);
    let doc = parse_str_with_options("! note\nk = v # note\n; not a comment = here\n", &options).unwrap();

    assert_eq!(raw(&doc, None, "k"), "v");
    assert_eq!(raw(&doc, None, "; not a comment"), "here");
}

#[test]
fn test_crlf_and_missing_final_newline() {
    let doc = parse_str("[s]\r\na = 1\r\nb = 2").unwrap();
    assert_eq!(raw(&doc, Some("s"), "a"), "1");
    assert_eq!(raw(&doc, Some("s"), "b"), "2");
}

#[test]
fn test_byte_order_mark() {
    let doc = parse_str("\u{feff}[s]\nk = v\n").unwrap();
    assert!(doc.section(Some("s")).is_some());
}

// Sections

#[test]
fn test_section_name_trimmed() {
    let doc = parse_str("[  web server  ]\nport = 80\n").unwrap();
    assert_eq!(raw(&doc, Some("web server"), "port"), "80");
}

#[test]
fn test_section_header_with_comment() {
    let doc = parse_str("[db] ; primary\n[cache]# secondary\n").unwrap();
    let names: Vec<_> = doc.sections().map(|s| s.name()).collect();
    assert_eq!(names, vec![None, Some("db"), Some("cache")]);
}

#[test]
fn test_empty_section_is_kept() {
    let doc = parse_str("[empty]\n[full]\nk = v\n").unwrap();
    assert!(doc.section(Some("empty")).unwrap().is_empty());
    assert_eq!(doc.section_count(), 3);
}

#[test]
fn test_unclosed_section() {
    let (line, column, msg) = syntax_error("[section");
    assert_eq!((line, column), (1, 9));
    assert_eq!(msg, "expected ']' to close the section header");
}

#[test]
fn test_empty_section_name() {
    let (line, _, msg) = syntax_error("a = 1\n[   ]\n");
    assert_eq!(line, 2);
    assert_eq!(msg, "empty section name");
}

#[test]
fn test_nested_bracket_in_section() {
    let (_, column, msg) = syntax_error("[a[b]]");
    assert_eq!(column, 3);
    assert_eq!(msg, "'[' is not allowed in a section name");
}

#[test]
fn test_text_after_section_header() {
    let (_, column, msg) = syntax_error("[a] extra");
    assert_eq!(column, 5);
    assert_eq!(msg, "unexpected text after section header");
}

// Assignments

#[test]
fn test_key_and_value_trimmed() {
    let doc = parse_str("   spaced key   =    spaced value   \n").unwrap();
    assert_eq!(raw(&doc, None, "spaced key"), "spaced value");
}

#[test]
fn test_empty_value() {
    let doc = parse_str("empty =\nalso_empty =   ; comment\n").unwrap();
    assert_eq!(raw(&doc, None, "empty"), "");
    assert_eq!(raw(&doc, None, "also_empty"), "");
    assert_eq!(
        doc.get_entry(None, "empty").unwrap().1,
        Value::Raw(String::new())
    );
}

#[test]
fn test_first_equals_splits() {
    let doc = parse_str("query = a=1&b=2\n").unwrap();
    assert_eq!(raw(&doc, None, "query"), "a=1&b=2");
}

#[test]
fn test_missing_equals() {
    let (line, column, msg) = syntax_error("[s]\njust a key\n");
    assert_eq!((line, column), (2, 11));
    assert_eq!(msg, "expected '=' after key");
}

#[test]
fn test_empty_key() {
    let (_, column, msg) = syntax_error("  = value");
    assert_eq!(column, 3);
    assert_eq!(msg, "empty key");
}

#[test]
fn test_invalid_key_characters() {
    for input in ["a]b = 1", "\"k\" = 1", "k'ey = 1"] {
        let (_, _, msg) = syntax_error(input);
        assert_eq!(msg, "invalid character in key", "input {:?}", input);
    }
}

// Quoted values

#[test]
fn test_quoted_values_keep_their_quotes() {
    let doc = parse_str("a = \"double\"\nb = 'single'\nc = \"  padded  \"\n").unwrap();

    let a = doc.get(None, "a").unwrap();
    assert_eq!(a.raw(), "\"double\"");
    assert_eq!(a.quote(), Some(Quote::Double));

    let b = doc.get(None, "b").unwrap();
    assert_eq!(b.quote(), Some(Quote::Single));

    assert_eq!(
        doc.lookup(None, "c", ValueKind::String),
        Some(Value::String("  padded  ".to_string()))
    );
}

#[test]
fn test_comment_marker_inside_quotes() {
    let doc = parse_str("a = \"x ; y\" ; real comment\n").unwrap();
    assert_eq!(raw(&doc, None, "a"), "\"x ; y\"");
    assert_eq!(
        doc.lookup(None, "a", ValueKind::String),
        Some(Value::String("x ; y".to_string()))
    );
}

#[test]
fn test_escapes() {
    let doc = parse_str(r#"a = "tab\there\nnext \"quoted\" \\ \x0000e9""#).unwrap();
    assert_eq!(
        doc.lookup(None, "a", ValueKind::String),
        Some(Value::String("tab\there\nnext \"quoted\" \\ \u{e9}".to_string()))
    );
}

#[test]
fn test_unterminated_quote() {
    let (_, column, msg) = syntax_error("key = \"never closed");
    assert_eq!(column, 7);
    assert_eq!(msg, "unterminated quoted value");
}

#[test]
fn test_invalid_escape() {
    let (_, column, msg) = syntax_error(r#"key = "bad \q""#);
    assert_eq!(column, 12);
    assert_eq!(msg, "invalid escape sequence");
}

#[test]
fn test_text_after_quoted_value() {
    let (_, column, msg) = syntax_error("key = 'a' b");
    assert_eq!(column, 11);
    assert_eq!(msg, "unexpected text after quoted value");
}

#[test]
fn test_apostrophe_inside_unquoted_value() {
    let doc = parse_str("title = it's fine\n").unwrap();
    let entry = doc.get(None, "title").unwrap();
    assert!(!entry.is_quoted());
    assert_eq!(entry.raw(), "it's fine");
}

// Error rendering

#[test]
fn test_error_context_has_caret() {
    let err = parse_str("[ok]\nname = 'x' y\n").unwrap_err();
    let rendered = err.to_string();
    println!("{}", rendered);

    assert!(rendered.starts_with("Syntax error at line 2, column 12"));
    assert!(rendered.ends_with("name = 'x' y\n           ^"));
}

// Tokens

#[test]
fn test_token_stream() {
    let options = ParseOptions::default();
    let tokens: Vec<_> = Lexer::new("top = 1\n\n[s]\n  k = 'v'\n", &options)
        .collect::<Result<_, _>>()
        .unwrap();

    assert_eq!(tokens.len(), 4);
    match tokens[0] {
        Token::Assignment { key, value, position } => {
            assert_eq!(key, "top");
            assert_eq!(value.text, "1");
            assert_eq!(position, Position { line: 1, column: 1 });
        }
        ref other => panic!("unexpected {:?}", other),
    }
    match tokens[1] {
        Token::SectionHeader { name, position } => {
            assert_eq!(name, "s");
            assert_eq!(position, Position { line: 3, column: 1 });
        }
        ref other => panic!("unexpected {:?}", other),
    }
    match tokens[2] {
        Token::Assignment { value, position, .. } => {
            assert_eq!(value.quote, Some(Quote::Single));
            assert_eq!(value.to_entry().as_string().as_deref(), Some("v"));
            assert_eq!(position.column, 3);
        }
        ref other => panic!("unexpected {:?}", other),
    }
    assert_eq!(tokens[3], Token::Eof);
}
