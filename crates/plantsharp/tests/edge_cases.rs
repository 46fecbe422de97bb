//! Edge case tests for C# parsing and diagram emission
//!
//! Tests for boundary conditions, unusual inputs, and error handling.

// =============================================================================
// Empty Input Tests
// =============================================================================

mod empty_inputs {
    use plantsharp::{generate_to_string, parse};

    #[test]
    fn test_empty_source() {
        assert!(parse("").unwrap().members.is_empty());
    }

    #[test]
    fn test_whitespace_and_comments_only() {
        let tree = parse("   \n\n  // nothing here\n /* or here */ \t\n").unwrap();
        assert!(tree.members.is_empty());
    }

    #[test]
    fn test_empty_namespace_still_opens_package() {
        let uml = generate_to_string(&["namespace A.Empty { }"], "A").unwrap();
        assert!(uml.contains("A --> Empty\npackage Empty {\n}\n"));
    }

    #[test]
    fn test_usings_only() {
        let uml = generate_to_string(&["using System;\nusing static System.Math;\nglobal using X = Y.Z;"], "")
            .unwrap();
        assert_eq!(uml, "@startuml\nallow_mixing\n@enduml\n");
    }
}

// =============================================================================
// Source Text That Must Not Disturb Structure
// =============================================================================

mod lexical_noise {
    use plantsharp::generate_to_string;

    #[test]
    fn test_braces_in_strings_and_comments() {
        let source = r#"
            namespace A.B
            {
                // class Fake { }
                /* } */
                public class Real
                {
                    public string Render() { return "}{ class Nope {"; }
                    public char Brace() => '}';
                    public string Path() => @"C:\{tmp}\""quoted""";
                }
            }
        "#;
        let uml = generate_to_string(&[source], "A").unwrap();

        assert!(!uml.contains("Fake"));
        assert!(!uml.contains("Nope"));
        assert!(uml.contains(
            "class Real {\n+Render() : string\n+Brace() : char\n+Path() : string\n}\n"
        ));
    }

    #[test]
    fn test_preprocessor_and_doc_comments() {
        let source = r#"
            #nullable enable
            namespace A.B
            {
                #region Types
                /// <summary>Documented.</summary>
                [Serializable]
                public partial class Doc
                {
                    #if DEBUG
                    [Conditional("DEBUG")]
                    protected virtual void Trace(string message) { }
                    #endif
                }
                #endregion
            }
        "#;
        let uml = generate_to_string(&[source], "A").unwrap();
        assert!(uml.contains("class Doc <<partial>> {\n# <<virtual>>Trace(message:string) : void\n}\n"));
    }

    #[test]
    fn test_interpolated_and_raw_strings() {
        let source = "namespace A.B { class S { string F() => $\"{{x}} {y}\"; string G() => \"\"\"\n  { raw }\n  \"\"\"; } }";
        let uml = generate_to_string(&[source], "A").unwrap();
        assert!(uml.contains("class S {\nF() : string\nG() : string\n}\n"));
    }

    #[test]
    fn test_quotes_and_braces_inside_interpolation_holes() {
        let source = r#"
            namespace A.B
            {
                public class Text
                {
                    public string Wrap(string[] xs) { return $"{string.Join("{", xs)}"; }
                    public string Or(string n) => $"{n ?? "}"}";
                    public string Path(string p) => $@"{p}\{{cache}}";
                }
            }
        "#;
        let uml = generate_to_string(&[source], "A").unwrap();
        assert!(uml.contains(
            "class Text {\n+Wrap(xs:string[]) : string\n+Or(n:string) : string\n+Path(p:string) : string\n}\n"
        ));
    }

    #[test]
    fn test_alternative_type_headers_under_conditionals() {
        let source = "namespace A.B\n{\n#if DEBUG\n    public class X : Base {\n#else\n    public class X {\n#endif\n        public void Run() { }\n    }\n}\n";
        let uml = generate_to_string(&[source], "A").unwrap();
        assert_eq!(uml.matches("class X {").count(), 1);
        assert!(uml.contains("package B {\nclass X {\n+Run() : void\n}\n}\n"));
    }

    #[test]
    fn test_parse_errors_after_masked_branch_keep_line_numbers() {
        let source = "#if NET8\nclass A { }\n#else\nclass A {\n#endif\nclass B {";
        match plantsharp::parse(source).unwrap_err() {
            plantsharp::DiagramError::ParseError { line, .. } => assert_eq!(line, 6),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }
}

// =============================================================================
// Declaration Shapes
// =============================================================================

mod declarations {
    use plantsharp::generate_to_string;

    #[test]
    fn test_file_scoped_namespace() {
        let source = "using System;\n\nnamespace Shop.Orders;\n\npublic class Order\n{\n    public decimal Total() => 0m;\n}\n";
        let uml = generate_to_string(&[source], "Shop").unwrap();
        assert!(uml.contains("Shop --> Orders\npackage Orders {\nclass Order {\n+Total() : decimal\n}\n}\n"));
    }

    #[test]
    fn test_nested_namespace_is_qualified() {
        let source = "namespace Shop.Core { namespace Orders { class Order { } } }";
        let uml = generate_to_string(&[source], "Shop").unwrap();
        assert!(uml.contains("Shop --> Core\npackage Core {\n}\n"));
        assert!(uml.contains("Shop --> Core.Orders\npackage Core.Orders {\nclass Order {\n}\n}\n"));
    }

    #[test]
    fn test_interface_struct_record_enum() {
        let source = r#"
            namespace A.Model
            {
                public interface IShape { double Area(); }
                public readonly struct Point { public double Length() => 0; }
                public sealed record Person(string Name);
                internal enum Color { Red, Green = 2, Blue }
            }
        "#;
        let uml = generate_to_string(&[source], "A").unwrap();
        assert!(uml.contains("interface IShape {\nArea() : double\n}\n"));
        assert!(uml.contains("struct Point <<readonly>> {\n+Length() : double\n}\n"));
        assert!(uml.contains("record Person <<sealed>> {\n}\n"));
        assert!(uml.contains("enum Color {\nRed\nGreen\nBlue\n}\n"));
    }

    #[test]
    fn test_static_class_with_extension_methods() {
        let source = "namespace A.Ext { public static class StringExt { public static bool IsBlank(this string value) => string.IsNullOrWhiteSpace(value); } }";
        let uml = generate_to_string(&[source], "A").unwrap();
        assert!(uml.contains("class StringExt <<static>> {\n+ {static}IsBlank(value:string) : bool\n}\n"));
    }

    #[test]
    fn test_generic_method_and_complex_types() {
        let source = "namespace A.B { class Repo { public async Task<IReadOnlyList<T>> Find<T>(Expression<Func<T, bool>> where, int? limit = null) where T : class { return null; } } }";
        let uml = generate_to_string(&[source], "A").unwrap();
        assert!(uml.contains(
            "+ <<async>>Find(where:Expression<Func<T, bool>>, limit:int?) : Task<IReadOnlyList<T>>\n"
        ));
    }

    #[test]
    fn test_members_that_are_not_methods_are_skipped() {
        let source = r#"
            namespace A.B
            {
                public class Account
                {
                    private decimal _balance;
                    public string Owner { get; init; } = "";
                    public event EventHandler? Changed;
                    public Account() { }
                    public static Account operator +(Account a, Account b) => a;
                    public decimal this[int i] => 0;
                    public delegate void Handler(int x);
                    public void Deposit(decimal amount) { }
                }
            }
        "#;
        let uml = generate_to_string(&[source], "A").unwrap();
        assert!(uml.contains("class Account {\n+Deposit(amount:decimal) : void\n}\n"));
    }

    #[test]
    fn test_types_outside_namespace_are_loose() {
        let uml = generate_to_string(&["public class Program { static void Main(string[] args) { } }"], "")
            .unwrap();
        assert_eq!(
            uml,
            "@startuml\nallow_mixing\nclass Program {\n{static}Main(args:string[]) : void\n}\n@enduml\n"
        );
    }
}

// =============================================================================
// Errors
// =============================================================================

mod errors {
    use plantsharp::{generate_to_string, parse, DiagramError};

    #[test]
    fn test_unterminated_block() {
        let err = parse("namespace A {\n  class B {\n").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_unterminated_string() {
        let err = parse("class A { string S() => \"oops; }").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_parse_error_position() {
        match parse("class A\n{\n    void B( { }\n}").unwrap_err() {
            DiagramError::ParseError { line, .. } => assert_eq!(line, 3),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_namespace_equal_to_root() {
        let err = generate_to_string(&["namespace A { class B { } }"], "A").unwrap_err();
        assert!(matches!(err, DiagramError::EmptyModuleName { .. }));
    }

    #[test]
    fn test_namespace_sharing_characters_but_not_segment() {
        let err = generate_to_string(&["namespace AB.C { }"], "A").unwrap_err();
        assert!(matches!(err, DiagramError::RootNamespaceMismatch { .. }));
    }

    #[test]
    fn test_malformed_root() {
        let err = generate_to_string(&["class A { }"], "A..B").unwrap_err();
        assert!(matches!(err, DiagramError::ConfigError { .. }));
    }
}
