/// Builds a [`Document`](crate::Document) from a literal layout.
///
/// Keys outside a `[name] { ... }` block go to the global section. Values may
/// be any `Display` expression; they are stored as raw text, so quoting and
/// typing work exactly as if the text had been parsed.
///
/// ```rust
/// use inidoc::{ini, Value};
///
/// let doc = ini! {
///     "name" => "demo",
///     ["server"] {
///         "port" => 8080,
///         "greeting" => "'hello'",
///     }
///     ["empty"] {}
/// };
///
/// assert_eq!(doc.section_count(), 3);
/// assert_eq!(doc.get_entry(Some("server"), "port").map(|(_, v)| v), Some(Value::Integer(8080)));
/// ```
#[macro_export]
macro_rules! ini {
    // Nothing left
    (@entries $doc:ident, $section:expr;) => {};

    // Section block followed by a comma
    (@entries $doc:ident, $section:expr; [$name:expr] { $($body:tt)* } , $($rest:tt)*) => {
        $crate::ini!(@entries $doc, $section; [$name] { $($body)* } $($rest)*);
    };

    // Section block
    (@entries $doc:ident, $section:expr; [$name:expr] { $($body:tt)* } $($rest:tt)*) => {
        $doc.section_or_insert(::std::option::Option::Some($name));
        $crate::ini!(@entries $doc, ::std::option::Option::Some($name); $($body)*);
        $crate::ini!(@entries $doc, $section; $($rest)*);
    };

    // Key assignment
    (@entries $doc:ident, $section:expr; $key:literal => $value:expr $(, $($rest:tt)*)?) => {
        $doc.insert(
            $section,
            $key,
            $crate::Entry::new(::std::string::ToString::to_string(&$value)),
        );
        $crate::ini!(@entries $doc, $section; $($($rest)*)?);
    };

    // Empty document
    () => {
        $crate::Document::new()
    };

    ($($body:tt)+) => {{
        let mut document = $crate::Document::new();
        $crate::ini!(@entries document, ::std::option::Option::None; $($body)+);
        document
    }};
}

#[cfg(test)]
mod tests {
    use crate::{Document, Entry, Value};

    #[test]
    fn test_ini_macro_empty() {
        assert_eq!(ini!(), Document::new());
    }

    #[test]
    fn test_ini_macro_global_only() {
        let doc = ini! { "a" => "1", "b" => true };
        assert_eq!(doc.section_count(), 1);
        assert_eq!(doc.get(None, "b").map(Entry::raw), Some("true"));
        assert_eq!(doc.get_entry(None, "a").map(|(_, v)| v), Some(Value::Integer(1)));
    }

    #[test]
    fn test_ini_macro_matches_parsed_text() {
        let built = ini! {
            "top" => "x",
            ["s"] {
                "k" => "\"v\"",
            },
            ["t"] {}
        };
        let parsed = crate::parse_str("top = x\n[s]\nk = \"v\"\n[t]\n").unwrap();
        assert_eq!(built, parsed);
    }
}
