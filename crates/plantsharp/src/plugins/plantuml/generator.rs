//! PlantUML class-diagram generator
//!
//! Walks syntax trees depth first and writes one diagram document:
//! namespaces become packages, class-like types become type blocks and
//! methods become member lines.

use std::io::Write;

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, span, trace, Level};

use super::config::{derive_module_name, GeneratorConfig};
use super::document::{package_decoration, write_document_header, DocumentWriter, END_MARKER};
use super::modifiers::{member_modifier_flags, type_keyword, type_modifier_flags};
use crate::core::{
    DiagramError, DiagramResult, EnumDecl, MethodDecl, NamespaceDecl, SyntaxNode, SyntaxParser,
    SyntaxTree, TypeDecl,
};
use crate::plugins::csharp::CSharpParser;

/// Generator turning source texts into a PlantUML class diagram
///
/// The generator holds configuration, a parser and the timestamp used by
/// the styled header. Emission state lives only for the duration of one
/// call, so an instance can be reused.
pub struct PlantUmlGenerator<P: SyntaxParser = CSharpParser> {
    config: GeneratorConfig,
    parser: P,
    timestamp: NaiveDateTime,
}

impl PlantUmlGenerator<CSharpParser> {
    /// Create a generator using the C# front end
    pub fn new(config: GeneratorConfig) -> Self {
        Self::with_parser(config, CSharpParser::new())
    }
}

impl<P: SyntaxParser> PlantUmlGenerator<P> {
    /// Create a generator with a custom front end
    pub fn with_parser(config: GeneratorConfig, parser: P) -> Self {
        Self {
            config,
            parser,
            timestamp: Local::now().naive_local(),
        }
    }

    /// Replace the timestamp captured at construction
    pub fn with_timestamp(mut self, timestamp: NaiveDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    /// Parse every source and write the complete document to `output`.
    ///
    /// Nothing is written unless every source parses and maps to a module.
    pub fn generate<S, W>(&self, sources: &[S], output: &mut W) -> DiagramResult<()>
    where
        S: AsRef<str>,
        W: Write,
    {
        let document = self.render_document(sources)?;
        output.write_all(document.as_bytes())?;
        output.flush()?;
        Ok(())
    }

    /// Parse every source and return the document
    pub fn render_document<S: AsRef<str>>(&self, sources: &[S]) -> DiagramResult<String> {
        let generate_span = span!(Level::INFO, "generate", sources = sources.len());
        let _enter = generate_span.enter();

        info!(parser = self.parser.name(), "Starting diagram generation");
        self.config.validate()?;

        let trees = sources
            .iter()
            .enumerate()
            .map(|(index, source)| -> DiagramResult<SyntaxTree> {
                let tree = self.parser.parse(source.as_ref())?;
                debug!(index, nodes = tree.node_count(), "Parsed source");
                Ok(tree)
            })
            .collect::<DiagramResult<Vec<_>>>()?;

        self.render_trees(&trees)
    }

    /// Emit the document for already-parsed trees
    pub fn render_trees(&self, trees: &[SyntaxTree]) -> DiagramResult<String> {
        self.config.validate()?;

        let mut state = EmissionState::default();
        for tree in trees {
            for node in &tree.members {
                self.visit_node(node, None, &mut state)?;
            }
        }

        let document = self.assemble(state);
        info!(bytes = document.len(), "Diagram generation completed");
        Ok(document)
    }

    fn assemble(&self, state: EmissionState) -> String {
        let mut writer = DocumentWriter::new();
        write_document_header(&mut writer, &self.config, self.timestamp);

        for section in state.sections {
            match section.package {
                Some(module) => {
                    if let Some(decoration) =
                        package_decoration(&self.config, &module, self.timestamp)
                    {
                        writer.line(decoration);
                    }
                    writer.line(format!("package {} {{", module));
                    for line in &section.lines {
                        writer.line(line);
                    }
                    writer.line("}");
                }
                None => {
                    for line in &section.lines {
                        writer.line(line);
                    }
                }
            }
        }

        writer.line(END_MARKER);
        writer.finish()
    }

    fn visit_node(
        &self,
        node: &SyntaxNode,
        enclosing: Option<&str>,
        state: &mut EmissionState,
    ) -> DiagramResult<()> {
        match node {
            SyntaxNode::Namespace(ns) => self.visit_namespace(ns, enclosing, state),
            SyntaxNode::Type(ty) => self.visit_type(ty, enclosing, state),
            SyntaxNode::Enum(en) => self.visit_enum(en, state),
            SyntaxNode::Method(method) => self.visit_method(method, state),
        }
    }

    fn visit_namespace(
        &self,
        ns: &NamespaceDecl,
        enclosing: Option<&str>,
        state: &mut EmissionState,
    ) -> DiagramResult<()> {
        if state.type_depth > 0 {
            return Err(DiagramError::tree_error(format!(
                "namespace '{}' declared inside a type",
                ns.name
            )));
        }

        let qualified = match enclosing {
            Some(outer) => format!("{}.{}", outer, ns.name),
            None => ns.name.clone(),
        };
        let module = derive_module_name(&qualified, &self.config.root_namespace)?;

        let previous = state.current;
        let index = state.enter_package(module);
        trace!(namespace = qualified.as_str(), module, index, "Visiting namespace");

        for member in &ns.members {
            self.visit_node(member, Some(qualified.as_str()), state)?;
        }

        state.current = previous;
        Ok(())
    }

    fn visit_type(
        &self,
        ty: &TypeDecl,
        enclosing: Option<&str>,
        state: &mut EmissionState,
    ) -> DiagramResult<()> {
        trace!(name = ty.name.as_str(), kind = %ty.kind, "Visiting type");

        state.push_line(format!(
            "{} {}{} {}{{",
            type_keyword(ty.kind, &ty.modifiers),
            ty.name,
            ty.type_parameters.as_deref().unwrap_or(""),
            type_modifier_flags(&ty.modifiers)
        ));

        state.type_depth += 1;
        for member in &ty.members {
            self.visit_node(member, enclosing, state)?;
        }
        state.type_depth -= 1;

        state.push_line("}");
        Ok(())
    }

    fn visit_enum(&self, en: &EnumDecl, state: &mut EmissionState) -> DiagramResult<()> {
        trace!(name = en.name.as_str(), variants = en.variants.len(), "Visiting enum");

        state.push_line(format!(
            "enum {} {}{{",
            en.name,
            type_modifier_flags(&en.modifiers)
        ));
        for variant in &en.variants {
            state.push_line(variant);
        }
        state.push_line("}");
        Ok(())
    }

    fn visit_method(&self, method: &MethodDecl, state: &mut EmissionState) -> DiagramResult<()> {
        if state.type_depth == 0 {
            return Err(DiagramError::tree_error(format!(
                "method '{}' declared outside of a type",
                method.name
            )));
        }

        let parameters = method
            .parameters
            .iter()
            .map(|p| format!("{}:{}", p.name, p.type_name))
            .collect::<Vec<_>>()
            .join(", ");

        state.push_line(format!(
            "{}{}({}) : {}",
            member_modifier_flags(&method.modifiers),
            method.name,
            parameters,
            method.return_type
        ));
        Ok(())
    }
}

/// Output collected for one package, or for declarations outside any
/// namespace when `package` is `None`
#[derive(Debug)]
struct Section {
    package: Option<String>,
    lines: Vec<String>,
}

/// Mutable state threaded through one traversal
#[derive(Debug, Default)]
struct EmissionState {
    /// Sections in first-seen order; package names are unique
    sections: Vec<Section>,
    /// Section receiving lines, `None` outside any namespace
    current: Option<usize>,
    type_depth: usize,
}

impl EmissionState {
    /// Make `module`'s section current, opening it on first sight
    fn enter_package(&mut self, module: &str) -> usize {
        let existing = self
            .sections
            .iter()
            .position(|s| s.package.as_deref() == Some(module));

        let index = match existing {
            Some(index) => index,
            None => {
                debug!(module, "Opening package");
                self.sections.push(Section {
                    package: Some(module.to_string()),
                    lines: Vec::new(),
                });
                self.sections.len() - 1
            }
        };
        self.current = Some(index);
        index
    }

    fn push_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        match self.current {
            Some(index) => self.sections[index].lines.push(line),
            None => match self.sections.last_mut() {
                Some(section) if section.package.is_none() => section.lines.push(line),
                _ => self.sections.push(Section {
                    package: None,
                    lines: vec![line],
                }),
            },
        }
    }
}
