//! Per-grammar tables mapping syntax node kinds to structural categories
//!
//! Tables are plain data. Supporting a new grammar means adding a table and
//! pointing [`table_for`] at it; nothing else branches on the language.
//!
//! When a node kind could reasonably belong to two categories, it is filed
//! under [`StructureCategory::TypeOrClass`], the broader one. Each table
//! notes the kinds this applies to.

use super::language::GrammarId;
use crate::types::StructureCategory;

use StructureCategory::{Comment, Enum, Function, Import, Interface, Module, TypeOrClass};

/// Node-kind lookup table for one grammar
#[derive(Debug)]
pub struct ClassificationTable {
    pub name: &'static str,
    entries: &'static [(&'static str, StructureCategory)],
}

impl ClassificationTable {
    /// Category for `kind`, or [`StructureCategory::None`] when unmapped
    pub fn classify(&self, kind: &str) -> StructureCategory {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map_or(StructureCategory::None, |&(_, category)| category)
    }

    pub fn entries(&self) -> &'static [(&'static str, StructureCategory)] {
        self.entries
    }
}

static PYTHON: ClassificationTable = ClassificationTable {
    name: "python",
    entries: &[
        ("function_definition", Function),
        ("async_function_definition", Function),
        ("class_definition", TypeOrClass),
        ("import_statement", Import),
        ("import_from_statement", Import),
        ("future_import_statement", Import),
        ("comment", Comment),
        ("module", Module),
    ],
};

// Shared by JavaScript, TypeScript and TSX. Exports are filed with imports:
// both describe the module boundary.
static ECMASCRIPT: ClassificationTable = ClassificationTable {
    name: "ecmascript",
    entries: &[
        ("function_declaration", Function),
        ("generator_function_declaration", Function),
        ("function_expression", Function),
        ("arrow_function", Function),
        ("method_definition", Function),
        ("class_declaration", TypeOrClass),
        ("abstract_class_declaration", TypeOrClass),
        ("class_expression", TypeOrClass),
        ("class", TypeOrClass),
        ("interface_declaration", Interface),
        ("enum_declaration", Enum),
        ("internal_module", Module),
        ("import_statement", Import),
        ("export_statement", Import),
        ("comment", Comment),
        ("program", Module),
    ],
};

// Tie-break: interfaces, enums and records are TypeOrClass.
static JAVA: ClassificationTable = ClassificationTable {
    name: "java",
    entries: &[
        ("method_declaration", Function),
        ("constructor_declaration", Function),
        ("class_declaration", TypeOrClass),
        ("interface_declaration", TypeOrClass),
        ("enum_declaration", TypeOrClass),
        ("record_declaration", TypeOrClass),
        ("import_declaration", Import),
        ("comment", Comment),
        ("line_comment", Comment),
        ("block_comment", Comment),
        ("program", Module),
    ],
};

// Tie-break: struct and interface type literals are TypeOrClass.
static GO: ClassificationTable = ClassificationTable {
    name: "go",
    entries: &[
        ("function_declaration", Function),
        ("method_declaration", Function),
        ("type_declaration", TypeOrClass),
        ("struct_type", TypeOrClass),
        ("interface_type", TypeOrClass),
        ("import_declaration", Import),
        ("comment", Comment),
        ("source_file", Module),
    ],
};

// Shared by C and C++.
static C_FAMILY: ClassificationTable = ClassificationTable {
    name: "c_family",
    entries: &[
        ("function_definition", Function),
        ("method_definition", Function),
        ("class_specifier", TypeOrClass),
        ("struct_specifier", TypeOrClass),
        ("union_specifier", TypeOrClass),
        ("enum_specifier", Enum),
        ("namespace_definition", Module),
        ("preproc_include", Import),
        ("preproc_import", Import),
        ("comment", Comment),
        ("translation_unit", Module),
    ],
};

// Tie-break: `impl` blocks hold functions but describe a type, so they are
// TypeOrClass. Traits and enums are TypeOrClass as well.
static RUST: ClassificationTable = ClassificationTable {
    name: "rust",
    entries: &[
        ("function_item", Function),
        ("function_signature_item", Function),
        ("impl_item", TypeOrClass),
        ("struct_item", TypeOrClass),
        ("enum_item", TypeOrClass),
        ("union_item", TypeOrClass),
        ("trait_item", TypeOrClass),
        ("mod_item", Module),
        ("use_declaration", Import),
        ("extern_crate_declaration", Import),
        ("line_comment", Comment),
        ("block_comment", Comment),
        ("comment", Comment),
        ("source_file", Module),
    ],
};

// Tie-break: `module` is a namespace and a mixin, so TypeOrClass.
static RUBY: ClassificationTable = ClassificationTable {
    name: "ruby",
    entries: &[
        ("method", Function),
        ("singleton_method", Function),
        ("class", TypeOrClass),
        ("singleton_class", TypeOrClass),
        ("module", TypeOrClass),
        ("comment", Comment),
        ("program", Module),
    ],
};

// Tie-break: interfaces and traits are TypeOrClass.
static PHP: ClassificationTable = ClassificationTable {
    name: "php",
    entries: &[
        ("function_definition", Function),
        ("method_declaration", Function),
        ("class_declaration", TypeOrClass),
        ("interface_declaration", TypeOrClass),
        ("trait_declaration", TypeOrClass),
        ("enum_declaration", Enum),
        ("namespace_definition", Module),
        ("namespace_use_declaration", Import),
        ("use_declaration", Import),
        ("comment", Comment),
        ("program", Module),
    ],
};

// Tie-break: protocols and enums are TypeOrClass.
static SWIFT: ClassificationTable = ClassificationTable {
    name: "swift",
    entries: &[
        ("function_declaration", Function),
        ("init_declaration", Function),
        ("initializer_declaration", Function),
        ("deinit_declaration", Function),
        ("class_declaration", TypeOrClass),
        ("struct_declaration", TypeOrClass),
        ("protocol_declaration", TypeOrClass),
        ("enum_declaration", TypeOrClass),
        ("import_declaration", Import),
        ("comment", Comment),
        ("multiline_comment", Comment),
        ("source_file", Module),
    ],
};

// Tie-break: records are TypeOrClass.
static C_SHARP: ClassificationTable = ClassificationTable {
    name: "c_sharp",
    entries: &[
        ("method_declaration", Function),
        ("constructor_declaration", Function),
        ("local_function_statement", Function),
        ("class_declaration", TypeOrClass),
        ("struct_declaration", TypeOrClass),
        ("record_declaration", TypeOrClass),
        ("interface_declaration", Interface),
        ("enum_declaration", Enum),
        ("namespace_declaration", Module),
        ("file_scoped_namespace_declaration", Module),
        ("using_directive", Import),
        ("comment", Comment),
        ("compilation_unit", Module),
    ],
};

/// Classification table for a grammar
pub fn table_for(grammar: GrammarId) -> &'static ClassificationTable {
    match grammar {
        GrammarId::Python => &PYTHON,
        GrammarId::JavaScript | GrammarId::TypeScript | GrammarId::Tsx => &ECMASCRIPT,
        GrammarId::Java => &JAVA,
        GrammarId::Go => &GO,
        GrammarId::C | GrammarId::Cpp => &C_FAMILY,
        GrammarId::Rust => &RUST,
        GrammarId::Ruby => &RUBY,
        GrammarId::Php => &PHP,
        GrammarId::Swift => &SWIFT,
        GrammarId::CSharp => &C_SHARP,
    }
}

/// Classify a node kind under a grammar
pub fn classify(kind: &str, grammar: GrammarId) -> StructureCategory {
    table_for(grammar).classify(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indexer::grammar::load_builtin;

    #[test]
    fn test_unmapped_kinds_are_none() {
        for grammar in GrammarId::ALL {
            assert_eq!(
                classify("expression_statement", grammar),
                StructureCategory::None
            );
            assert_eq!(classify("", grammar), StructureCategory::None);
        }
    }

    #[test]
    fn test_tables_have_no_duplicate_kinds() {
        for grammar in GrammarId::ALL {
            let entries = table_for(grammar).entries();
            for (i, (kind, _)) in entries.iter().enumerate() {
                assert!(
                    !entries[i + 1..].iter().any(|(other, _)| other == kind),
                    "{} maps '{}' twice",
                    table_for(grammar).name,
                    kind
                );
            }
        }
    }

    #[test]
    fn test_every_table_maps_functions_comments_and_a_root() {
        for grammar in GrammarId::ALL {
            let entries = table_for(grammar).entries();
            for category in [Function, Comment, Module] {
                assert!(
                    entries.iter().any(|&(_, c)| c == category),
                    "{} has no {:?} kind",
                    grammar,
                    category
                );
            }
        }
    }

    #[test]
    fn test_python_table() {
        let g = GrammarId::Python;
        assert_eq!(classify("function_definition", g), Function);
        assert_eq!(classify("class_definition", g), TypeOrClass);
        assert_eq!(classify("import_from_statement", g), Import);
        assert_eq!(classify("comment", g), Comment);
        assert_eq!(classify("module", g), Module);
    }

    #[test]
    fn test_typescript_shares_ecmascript_table() {
        for g in [GrammarId::JavaScript, GrammarId::TypeScript, GrammarId::Tsx] {
            assert_eq!(classify("arrow_function", g), Function);
            assert_eq!(classify("interface_declaration", g), Interface);
            assert_eq!(classify("enum_declaration", g), Enum);
            assert_eq!(classify("export_statement", g), Import);
        }
    }

    #[test]
    fn test_broader_category_wins() {
        assert_eq!(classify("impl_item", GrammarId::Rust), TypeOrClass);
        assert_eq!(classify("trait_item", GrammarId::Rust), TypeOrClass);
        assert_eq!(classify("interface_declaration", GrammarId::Java), TypeOrClass);
        assert_eq!(classify("module", GrammarId::Ruby), TypeOrClass);
        assert_eq!(classify("trait_declaration", GrammarId::Php), TypeOrClass);
    }

    #[test]
    fn test_c_and_cpp_share_table() {
        assert_eq!(classify("preproc_include", GrammarId::C), Import);
        assert_eq!(classify("preproc_include", GrammarId::Cpp), Import);
        assert_eq!(classify("class_specifier", GrammarId::Cpp), TypeOrClass);
    }

    #[test]
    fn test_core_kinds_exist_in_grammars() {
        let expectations = [
            (GrammarId::Python, "function_definition"),
            (GrammarId::Python, "import_statement"),
            (GrammarId::JavaScript, "function_declaration"),
            (GrammarId::TypeScript, "interface_declaration"),
            (GrammarId::Java, "method_declaration"),
            (GrammarId::Go, "function_declaration"),
            (GrammarId::C, "function_definition"),
            (GrammarId::Cpp, "class_specifier"),
            (GrammarId::Rust, "function_item"),
            (GrammarId::Rust, "use_declaration"),
            (GrammarId::Ruby, "method"),
            (GrammarId::Php, "function_definition"),
            (GrammarId::CSharp, "method_declaration"),
        ];

        for (grammar, kind) in expectations {
            let language = load_builtin(grammar).unwrap();
            assert_ne!(
                language.id_for_node_kind(kind, true),
                0,
                "{} has no node kind '{}'",
                grammar,
                kind
            );
        }
    }
}
