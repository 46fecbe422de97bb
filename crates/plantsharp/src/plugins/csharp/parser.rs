//! C# declaration parser
//!
//! Recursive descent over the lexer's token stream. Only the declaration
//! skeleton is kept: namespaces, class-like types, enums and methods.
//! Everything else (bodies, fields, properties, events, constructors,
//! attributes, using directives) is skipped with balanced-delimiter
//! scanning.

use tracing::{debug, span, trace, Level};

use super::lexer::{mask_inactive_branches, tokenize, Spanned, Token};
use crate::core::{
    line_column, DiagramError, DiagramResult, EnumDecl, MethodDecl, Modifier, NamespaceDecl,
    Parameter, SyntaxNode, SyntaxParser, SyntaxTree, TypeDecl, TypeKind,
};

/// Keywords that may prefix a parameter and are not part of its type
const PARAMETER_MODIFIERS: [&str; 7] = ["this", "ref", "out", "in", "params", "scoped", "readonly"];

/// Identifiers that can never start a member's type
const NON_TYPE_KEYWORDS: [&str; 8] = [
    "this", "operator", "implicit", "explicit", "event", "namespace", "using", "delegate",
];

/// C# parser implementing [`SyntaxParser`]
pub struct CSharpParser;

impl CSharpParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CSharpParser {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxParser for CSharpParser {
    fn parse(&self, input: &str) -> DiagramResult<SyntaxTree> {
        let parse_span = span!(Level::DEBUG, "parse_csharp", input_len = input.len());
        let _enter = parse_span.enter();

        let source = mask_inactive_branches(input);
        let tokens = tokenize(&source)?;
        trace!(token_count = tokens.len(), "Tokenized source");

        let mut parser = DeclarationParser::new(&source, &tokens);
        let members = parser.parse_declarations(Scope::CompilationUnit)?;
        let tree = SyntaxTree::new(members);

        debug!(
            declarations = tree.members.len(),
            nodes = tree.node_count(),
            "Parsed compilation unit"
        );
        Ok(tree)
    }

    fn name(&self) -> &'static str {
        "csharp"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        match tokenize(&mask_inactive_branches(input)) {
            Ok(tokens) => tokens.iter().any(|(token, _)| {
                matches!(
                    token,
                    Token::Ident("namespace" | "class" | "interface" | "struct" | "record" | "enum")
                )
            }),
            Err(_) => false,
        }
    }
}

/// Where a declaration list lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope<'a> {
    CompilationUnit,
    /// Body of `namespace X { ... }`
    Namespace,
    /// Body of a type, with the type's name for constructor detection
    Type(&'a str),
}

struct DeclarationParser<'a> {
    source: &'a str,
    tokens: &'a [Spanned<Token<'a>>],
    pos: usize,
}

impl<'a> DeclarationParser<'a> {
    fn new(source: &'a str, tokens: &'a [Spanned<Token<'a>>]) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
        }
    }

    // ---------------------------------------------------------------------
    // Token cursor
    // ---------------------------------------------------------------------

    fn peek(&self) -> Option<Token<'a>> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<Token<'a>> {
        self.tokens.get(self.pos + n).map(|(token, _)| *token)
    }

    fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.peek();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn at_punct(&self, c: char) -> bool {
        self.peek() == Some(Token::Punct(c))
    }

    fn at_ident(&self, word: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(w)) if w == word)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.at_punct(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_ident(&mut self, word: &str) -> bool {
        if self.at_ident(word) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> DiagramResult<()> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", c)))
        }
    }

    fn expect_ident(&mut self, what: &str) -> DiagramResult<&'a str> {
        match self.peek() {
            Some(Token::Ident(word)) => {
                self.pos += 1;
                Ok(word)
            }
            _ => Err(self.error(format!("expected {}", what))),
        }
    }

    /// Source text covered by the tokens in `start..end`
    fn text_between(&self, start: usize, end: usize) -> &'a str {
        if start >= end {
            return "";
        }
        let from = self.tokens[start].1.start;
        let to = self.tokens[end - 1].1.end;
        &self.source[from..to]
    }

    fn error(&self, message: impl Into<String>) -> DiagramError {
        self.error_at(self.pos, message)
    }

    fn error_at(&self, index: usize, message: impl Into<String>) -> DiagramError {
        let (offset, found) = match self.tokens.get(index) {
            Some((token, span)) => (span.start, token.to_string()),
            None => (self.source.len(), "end of input".to_string()),
        };
        let (line, column) = line_column(self.source, offset);
        DiagramError::parse_error(
            format!("{}, found {}", message.into(), found),
            line,
            column,
        )
    }

    // ---------------------------------------------------------------------
    // Declarations
    // ---------------------------------------------------------------------

    /// Parse declarations until the end of the enclosing scope.
    ///
    /// Namespace and type bodies stop before their closing `}`; the
    /// compilation unit (and a file-scoped namespace) runs to end of input.
    fn parse_declarations(&mut self, scope: Scope<'a>) -> DiagramResult<Vec<SyntaxNode>> {
        let mut nodes = Vec::new();
        loop {
            match self.peek() {
                None => {
                    return match scope {
                        Scope::CompilationUnit => Ok(nodes),
                        Scope::Namespace => Err(self.error("expected '}' to close namespace")),
                        Scope::Type(name) => {
                            Err(self.error(format!("expected '}}' to close type '{}'", name)))
                        }
                    };
                }
                Some(Token::Punct('}')) => {
                    return match scope {
                        Scope::CompilationUnit => Err(self.error("unexpected '}'")),
                        Scope::Namespace | Scope::Type(_) => Ok(nodes),
                    };
                }
                Some(Token::Punct(';')) => {
                    self.bump();
                }
                Some(Token::Ident("namespace")) if !matches!(scope, Scope::Type(_)) => {
                    nodes.push(self.parse_namespace()?);
                }
                Some(_) => {
                    if let Some(node) = self.parse_member(scope)? {
                        nodes.push(node);
                    }
                }
            }
        }
    }

    fn parse_namespace(&mut self) -> DiagramResult<SyntaxNode> {
        self.bump();
        let name = self.parse_qualified_name()?;
        trace!(namespace = name.as_str(), "Parsing namespace");

        if self.eat_punct(';') {
            // File-scoped: the rest of the unit belongs to it
            let members = self.parse_declarations(Scope::CompilationUnit)?;
            return Ok(SyntaxNode::Namespace(NamespaceDecl { name, members }));
        }

        self.expect_punct('{')?;
        let members = self.parse_declarations(Scope::Namespace)?;
        self.expect_punct('}')?;
        self.eat_punct(';');
        Ok(SyntaxNode::Namespace(NamespaceDecl { name, members }))
    }

    fn parse_qualified_name(&mut self) -> DiagramResult<String> {
        let mut name = self.expect_ident("namespace name")?.to_string();
        while self.at_punct('.') {
            self.bump();
            name.push('.');
            name.push_str(self.expect_ident("identifier after '.'")?);
        }
        Ok(name)
    }

    /// Parse one member of a namespace or type body.
    ///
    /// Returns `None` for declarations the diagram does not show.
    fn parse_member(&mut self, scope: Scope<'a>) -> DiagramResult<Option<SyntaxNode>> {
        let start = self.pos;
        self.skip_attributes()?;
        let modifiers = self.parse_modifiers();

        let result = match self.peek() {
            Some(Token::Ident(word)) if self.starts_type_declaration(word) => {
                self.parse_type_declaration(modifiers).map(Some)
            }
            Some(Token::Ident("enum")) => self.parse_enum(modifiers).map(Some),
            Some(Token::Punct('}')) | None => Ok(None),
            _ => self.parse_method_or_skip(scope, modifiers),
        };

        if result.is_ok() && self.pos == start {
            // Unrecognised token at member position
            self.bump();
        }
        result
    }

    fn starts_type_declaration(&self, word: &str) -> bool {
        match TypeKind::from_keyword(word) {
            Some(TypeKind::Record) => matches!(self.peek_nth(1), Some(Token::Ident(_))),
            Some(_) => true,
            None => false,
        }
    }

    fn skip_attributes(&mut self) -> DiagramResult<()> {
        while self.at_punct('[') {
            self.skip_balanced()?;
        }
        Ok(())
    }

    fn parse_modifiers(&mut self) -> Vec<Modifier> {
        let mut modifiers = Vec::new();
        while let Some(Token::Ident(word)) = self.peek() {
            let Some(modifier) = Modifier::from_keyword(word) else {
                break;
            };
            let next = self.peek_nth(1);
            let accepted = match modifier {
                Modifier::Ref => matches!(next, Some(Token::Ident("struct" | "partial"))),
                m if m.is_contextual() => matches!(next, Some(Token::Ident(_))),
                _ => true,
            };
            if !accepted {
                break;
            }
            modifiers.push(modifier);
            self.bump();
        }
        modifiers
    }

    fn parse_type_declaration(&mut self, modifiers: Vec<Modifier>) -> DiagramResult<SyntaxNode> {
        let keyword = self.expect_ident("type keyword")?;
        let kind = TypeKind::from_keyword(keyword)
            .ok_or_else(|| self.error_at(self.pos - 1, "expected type keyword"))?;
        if kind == TypeKind::Record && !self.eat_ident("class") {
            self.eat_ident("struct");
        }

        let name = self.expect_ident("type name")?;
        trace!(kind = keyword, name, "Parsing type declaration");

        let type_parameters = if self.at_punct('<') {
            let start = self.pos;
            self.skip_angle_brackets()?;
            Some(self.text_between(start, self.pos).to_string())
        } else {
            None
        };

        // Primary constructor, base list and constraints
        loop {
            match self.peek() {
                Some(Token::Punct('{')) | Some(Token::Punct(';')) => break,
                Some(Token::Punct('(')) | Some(Token::Punct('[')) => self.skip_balanced()?,
                Some(Token::Punct('}')) | None => {
                    return Err(self.error(format!("expected '{{' to open type '{}'", name)));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }

        let members = if self.eat_punct(';') {
            Vec::new()
        } else {
            self.expect_punct('{')?;
            let members = self.parse_declarations(Scope::Type(name))?;
            self.expect_punct('}')?;
            self.eat_punct(';');
            members
        };

        Ok(SyntaxNode::Type(TypeDecl {
            kind,
            name: name.to_string(),
            type_parameters,
            modifiers,
            members,
        }))
    }

    fn parse_enum(&mut self, modifiers: Vec<Modifier>) -> DiagramResult<SyntaxNode> {
        self.bump();
        let name = self.expect_ident("enum name")?;

        // Underlying type
        while !self.at_punct('{') {
            if self.bump().is_none() {
                return Err(self.error(format!("expected '{{' to open enum '{}'", name)));
            }
        }
        self.expect_punct('{')?;

        let mut variants = Vec::new();
        loop {
            self.skip_attributes()?;
            if self.at_punct('}') {
                break;
            }
            variants.push(self.expect_ident("enum member")?.to_string());
            if self.eat_punct('=') {
                self.skip_until_separator(&[',', '}'])?;
            }
            if !self.eat_punct(',') {
                break;
            }
        }
        self.expect_punct('}')?;
        self.eat_punct(';');

        Ok(SyntaxNode::Enum(EnumDecl {
            name: name.to_string(),
            modifiers,
            variants,
        }))
    }

    /// Parse a method, or skip whatever other member starts here
    fn parse_method_or_skip(
        &mut self,
        scope: Scope<'a>,
        modifiers: Vec<Modifier>,
    ) -> DiagramResult<Option<SyntaxNode>> {
        // Constructors, destructors and conversion operators
        let is_constructor = match (scope, self.peek(), self.peek_nth(1)) {
            (Scope::Type(type_name), Some(Token::Ident(word)), Some(Token::Punct('('))) => {
                word == type_name
            }
            _ => false,
        };
        if is_constructor || self.at_punct('~') {
            self.skip_member()?;
            return Ok(None);
        }

        let type_start = self.pos;
        if !self.parse_type()? {
            self.skip_member()?;
            return Ok(None);
        }
        let return_type = self.text_between(type_start, self.pos);

        let mut name = match self.peek() {
            Some(Token::Ident(word)) if !NON_TYPE_KEYWORDS.contains(&word) => {
                self.bump();
                word
            }
            _ => {
                // Indexers, operators, statements
                self.skip_member()?;
                return Ok(None);
            }
        };

        // Explicit interface implementations: `IFoo.Bar`, `IFoo<T>.Bar`
        loop {
            if self.at_punct('<') {
                let checkpoint = self.pos;
                if !self.try_skip_angle_brackets() || !self.at_punct('.') {
                    self.pos = checkpoint;
                    break;
                }
            }
            if self.at_punct('.') && matches!(self.peek_nth(1), Some(Token::Ident(_))) {
                self.bump();
                name = self.expect_ident("member name")?;
            } else {
                break;
            }
        }

        if self.at_punct('<') {
            self.try_skip_angle_brackets();
        }

        if !self.at_punct('(') {
            // Field, property or event
            self.skip_member()?;
            return Ok(None);
        }

        let parameters = self.parse_parameter_list()?;
        self.skip_method_body(name)?;

        match scope {
            Scope::Type(_) => {
                trace!(name, return_type, "Parsed method");
                Ok(Some(SyntaxNode::Method(MethodDecl {
                    name: name.to_string(),
                    return_type: return_type.to_string(),
                    parameters,
                    modifiers,
                })))
            }
            // Local functions in top-level statements
            Scope::CompilationUnit | Scope::Namespace => Ok(None),
        }
    }

    /// Consume a type reference. Returns false without consuming anything
    /// when no type starts here.
    fn parse_type(&mut self) -> DiagramResult<bool> {
        let start = self.pos;
        if self.eat_ident("ref") {
            self.eat_ident("readonly");
        }

        match self.peek() {
            Some(Token::Punct('(')) => self.skip_balanced()?,
            Some(Token::Ident(word)) if !NON_TYPE_KEYWORDS.contains(&word) => {
                self.bump();
                loop {
                    if self.at_punct('<') && !self.try_skip_angle_brackets() {
                        // `a < b` in a statement
                        break;
                    }
                    let qualified = match (self.peek(), self.peek_nth(1), self.peek_nth(2)) {
                        (Some(Token::Punct('.')), Some(Token::Ident(_)), _) => 2,
                        (Some(Token::Punct(':')), Some(Token::Punct(':')), Some(Token::Ident(_))) => 3,
                        _ => 0,
                    };
                    if qualified == 0 {
                        break;
                    }
                    // `Outer.Inner` is part of the type only when another
                    // identifier follows; `IFoo.Bar(` is a member name
                    if qualified == 2 && !self.continues_type_after_dot() {
                        break;
                    }
                    self.pos += qualified;
                }
            }
            _ => {
                self.pos = start;
                return Ok(false);
            }
        }

        // Nullable, array and pointer suffixes
        loop {
            if self.eat_punct('?') || self.eat_punct('*') {
                continue;
            }
            if self.at_punct('[')
                && matches!(
                    self.peek_nth(1),
                    Some(Token::Punct(']')) | Some(Token::Punct(','))
                )
            {
                self.skip_balanced()?;
                continue;
            }
            break;
        }
        Ok(true)
    }

    /// At `.Ident`: does the qualified name continue the type, or is the
    /// identifier the member name?
    fn continues_type_after_dot(&self) -> bool {
        // `A.B name` / `A.B<T> name` / `A.B.C`: the dotted part is the type.
        // `A.B(` / `A.B<T>(` / `A.B =` / `A.B {`: the type ended at `A`.
        let mut index = self.pos + 2;
        if matches!(self.tokens.get(index), Some((Token::Punct('<'), _))) {
            index = match self.matching_angle(index) {
                Some(close) => close + 1,
                None => return false,
            };
        }
        matches!(
            self.tokens.get(index).map(|(t, _)| *t),
            Some(Token::Ident(_))
                | Some(Token::Punct('.'))
                | Some(Token::Punct('?'))
                | Some(Token::Punct('['))
                | Some(Token::Punct('*'))
        )
    }

    /// Index of the `>` closing the `<` at `open`, if it is a plausible
    /// type argument list
    fn matching_angle(&self, open: usize) -> Option<usize> {
        let mut depth = 0usize;
        for (index, (token, _)) in self.tokens.iter().enumerate().skip(open) {
            match token {
                Token::Punct('<') => depth += 1,
                Token::Punct('>') => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(index);
                    }
                }
                Token::Punct(';') | Token::Punct('{') | Token::Punct('}') | Token::FatArrow => {
                    return None
                }
                _ => {}
            }
        }
        None
    }

    fn parse_parameter_list(&mut self) -> DiagramResult<Vec<Parameter>> {
        self.expect_punct('(')?;
        let mut parameters = Vec::new();
        if self.eat_punct(')') {
            return Ok(parameters);
        }

        loop {
            self.skip_attributes()?;
            while let Some(Token::Ident(word)) = self.peek() {
                let is_modifier = PARAMETER_MODIFIERS.contains(&word)
                    && matches!(self.peek_nth(1), Some(Token::Ident(_)) | Some(Token::Punct('(')));
                if !is_modifier {
                    break;
                }
                self.bump();
            }

            if self.eat_ident("__arglist") {
                parameters.push(Parameter {
                    name: "__arglist".to_string(),
                    type_name: String::new(),
                });
            } else {
                let type_start = self.pos;
                if !self.parse_type()? {
                    return Err(self.error("expected parameter type"));
                }
                let type_name = self.text_between(type_start, self.pos).to_string();
                let name = self.expect_ident("parameter name")?.to_string();
                if self.eat_punct('=') {
                    self.skip_until_separator(&[',', ')'])?;
                }
                parameters.push(Parameter { name, type_name });
            }

            if self.eat_punct(',') {
                continue;
            }
            self.expect_punct(')')?;
            return Ok(parameters);
        }
    }

    // ---------------------------------------------------------------------
    // Skipping
    // ---------------------------------------------------------------------

    /// Skip from the current opening delimiter to its matching closer
    fn skip_balanced(&mut self) -> DiagramResult<()> {
        let mut expected = Vec::new();
        loop {
            let index = self.pos;
            match self.bump() {
                Some(Token::Punct('(')) => expected.push(')'),
                Some(Token::Punct('[')) => expected.push(']'),
                Some(Token::Punct('{')) => expected.push('}'),
                Some(Token::Punct(close @ (')' | ']' | '}'))) => match expected.pop() {
                    Some(want) if want == close => {
                        if expected.is_empty() {
                            return Ok(());
                        }
                    }
                    Some(want) => {
                        return Err(self.error_at(index, format!("expected '{}'", want)));
                    }
                    None => return Err(self.error_at(index, "unbalanced delimiter")),
                },
                Some(_) => {}
                None => {
                    let want = expected.last().copied().unwrap_or(')');
                    return Err(self.error(format!("expected '{}'", want)));
                }
            }
            if expected.is_empty() {
                // Called on a token that does not open anything
                return Ok(());
            }
        }
    }

    /// Skip a `<...>` type argument or parameter list
    fn skip_angle_brackets(&mut self) -> DiagramResult<()> {
        match self.matching_angle(self.pos) {
            Some(close) => {
                self.pos = close + 1;
                Ok(())
            }
            None => Err(self.error("unterminated type argument list")),
        }
    }

    /// Skip a `<...>` list if it closes before the end of the statement
    fn try_skip_angle_brackets(&mut self) -> bool {
        match self.matching_angle(self.pos) {
            Some(close) => {
                self.pos = close + 1;
                true
            }
            None => false,
        }
    }

    /// Skip an initializer up to (not including) one of `separators` at depth 0
    fn skip_until_separator(&mut self, separators: &[char]) -> DiagramResult<()> {
        loop {
            match self.peek() {
                Some(Token::Punct(c)) if separators.contains(&c) => return Ok(()),
                Some(Token::Punct('(')) | Some(Token::Punct('[')) | Some(Token::Punct('{')) => {
                    self.skip_balanced()?
                }
                Some(Token::Punct(')')) | Some(Token::Punct(']')) | Some(Token::Punct('}')) => {
                    return Err(self.error("unbalanced delimiter"));
                }
                Some(_) => {
                    self.bump();
                }
                None => return Err(self.error("unexpected end of input")),
            }
        }
    }

    /// Skip through the `;` ending a statement or expression body
    fn skip_statement(&mut self) -> DiagramResult<()> {
        self.skip_until_separator(&[';'])?;
        self.bump();
        Ok(())
    }

    /// Skip constraints and the body that follow a parameter list
    fn skip_method_body(&mut self, name: &str) -> DiagramResult<()> {
        loop {
            match self.peek() {
                Some(Token::Punct('{')) => return self.skip_balanced(),
                Some(Token::FatArrow) => {
                    self.bump();
                    return self.skip_statement();
                }
                Some(Token::Punct(';')) => {
                    self.bump();
                    return Ok(());
                }
                Some(Token::Punct('(')) | Some(Token::Punct('[')) => self.skip_balanced()?,
                Some(Token::Punct('}')) | None => {
                    return Err(self.error(format!("expected body of method '{}'", name)));
                }
                Some(_) => {
                    self.bump();
                }
            }
        }
    }

    /// Skip a member the diagram does not show (field, property, event,
    /// constructor, operator, statement).
    ///
    /// Stops after a `;` at depth 0, or after a `{...}` block that is not
    /// followed by an initializer. Never consumes the `}` closing the
    /// enclosing body.
    fn skip_member(&mut self) -> DiagramResult<()> {
        loop {
            match self.peek() {
                None | Some(Token::Punct('}')) => return Ok(()),
                Some(Token::Punct(';')) => {
                    self.bump();
                    return Ok(());
                }
                Some(Token::Punct('{')) => {
                    self.skip_balanced()?;
                    if !self.at_punct('=') {
                        return Ok(());
                    }
                }
                Some(Token::Punct('(')) | Some(Token::Punct('[')) => self.skip_balanced()?,
                Some(_) => {
                    self.bump();
                }
            }
        }
    }
}
