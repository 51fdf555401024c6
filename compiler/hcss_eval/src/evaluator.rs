//! The statement evaluator.
//!
//! One pass over the grouped statement list. Fatal error model: the
//! first failing statement aborts the whole compilation, and every
//! diagnostic leaving this module carries the statement index it arose
//! at (innermost wins for errors crossing an import boundary).

use std::path::{Path, PathBuf};

use hcss_diagnostic::{Diagnostic, ErrorCode, Result};
use hcss_ir::{CssRule, Token, TokenKind};
use hcss_lexer::Statement;
use hcss_parse::{expand_selector, parse_expr};
use tracing::{debug, trace};

use crate::loader::SourceLoader;
use crate::scope::{AssignError, DefineError, Mutability, Scope};

/// The result of evaluating one file: its final scope (for import
/// merging) and the CSS rules it emitted.
#[derive(Debug)]
pub struct Compilation {
    pub scope: Scope,
    pub rules: Vec<CssRule>,
}

impl Compilation {
    /// Render all emitted rules, one per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&rule.render());
            out.push('\n');
        }
        out
    }
}

/// Evaluate HCSS source. `file` is the path the source came from; it
/// anchors relative import targets.
pub fn evaluate(source: &str, file: &Path, loader: &dyn SourceLoader) -> Result<Compilation> {
    let statements = hcss_lexer::lex(source)?;
    debug!(file = %file.display(), statements = statements.len(), "evaluating");

    let mut scope = Scope::new();
    let mut rules = Vec::new();

    for stmt in &statements {
        eval_statement(stmt, file, loader, &mut scope, &mut rules)
            .map_err(|d| d.or_line(stmt.index))?;
    }
    Ok(Compilation { scope, rules })
}

fn eval_statement(
    stmt: &Statement,
    file: &Path,
    loader: &dyn SourceLoader,
    scope: &mut Scope,
    rules: &mut Vec<CssRule>,
) -> Result<()> {
    let tokens = &stmt.tokens;
    let Some(first) = tokens.first() else {
        return Ok(());
    };
    match &first.kind {
        TokenKind::Package => eval_package(stmt, scope),
        TokenKind::Import => eval_import(stmt, file, loader, scope),
        TokenKind::Let => eval_declaration(&tokens[1..], Mutability::Let, scope),
        TokenKind::Const => eval_declaration(&tokens[1..], Mutability::Const, scope),
        TokenKind::Ident(name) if matches!(tokens.get(1).map(|t| &t.kind), Some(TokenKind::Equals)) => {
            eval_reassignment(name, &tokens[2..], scope)
        }
        TokenKind::Dollar => eval_selector_block(tokens, scope, rules),
        _ => Err(Diagnostic::error(ErrorCode::Syntax)
            .with_message(format!("unexpected '{}' at the start of a statement", first.text))),
    }
}

/// Leading letter or underscore, then word characters.
fn is_valid_package_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn eval_package(stmt: &Statement, scope: &mut Scope) -> Result<()> {
    let err = |message: String| Diagnostic::error(ErrorCode::PackageRegistration).with_message(message);
    if stmt.index != 0 {
        return Err(err("package must be the first statement of the file".to_string()));
    }
    let name = match stmt.tokens.as_slice() {
        [_, name] => match &name.kind {
            TokenKind::Str(name) => name.clone(),
            _ => return Err(err(format!("package name must be a string: '{}'", name.text))),
        },
        _ => return Err(err("expected exactly one package name".to_string())),
    };
    if !is_valid_package_name(&name) {
        return Err(err(format!("invalid package name: '{name}'")));
    }
    if !scope.set_package(&name) {
        return Err(err("package is already registered".to_string()));
    }
    trace!(package = %name, "registered package");
    Ok(())
}

fn eval_import(
    stmt: &Statement,
    file: &Path,
    loader: &dyn SourceLoader,
    scope: &mut Scope,
) -> Result<()> {
    let err = |message: String| Diagnostic::error(ErrorCode::Import).with_message(message);
    if scope.package().is_none() {
        return Err(err("cannot import before a package is registered".to_string()));
    }
    let target = match stmt.tokens.as_slice() {
        [_, target] => match &target.kind {
            TokenKind::Str(path) => path.clone(),
            _ => return Err(err(format!("import target must be a string: '{}'", target.text))),
        },
        _ => return Err(err("expected exactly one import target".to_string())),
    };

    let path = resolve_import(file, &target)?;
    let source = loader
        .load(&path)
        .map_err(|e| err(format!("cannot read '{}': {e}", path.display())))?;

    // Reject a same-package import before evaluating the target, so a
    // file importing itself (directly or through a copy) cannot
    // recurse.
    match (scope.package(), peek_package(&source).map_err(|d| in_file(&path, d))?) {
        (Some(own), Some(theirs)) if own == theirs.as_str() => {
            return Err(err(format!("package '{own}' cannot import itself")));
        }
        _ => {}
    }

    // Failures inside the imported file keep their own kind and
    // statement index; only the message gains the file context.
    let imported = evaluate(&source, &path, loader).map_err(|d| in_file(&path, d))?;

    scope
        .merge(&imported.scope)
        .map_err(|name| err(format!("import would overwrite constant binding '{name}'")))?;
    if let Some(package) = imported.scope.package() {
        scope.add_external(package);
    }
    trace!(path = %path.display(), "merged import");
    Ok(())
}

/// Lex `source` just far enough to read its registered package name.
fn peek_package(source: &str) -> Result<Option<String>> {
    let statements = hcss_lexer::lex(source)?;
    let Some(first) = statements.first() else {
        return Ok(None);
    };
    match first.tokens.as_slice() {
        [package, name] if package.kind == TokenKind::Package => match &name.kind {
            TokenKind::Str(name) => Ok(Some(name.clone())),
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}

/// Prefix a propagated diagnostic's message with the file it came from.
fn in_file(path: &Path, diagnostic: Diagnostic) -> Diagnostic {
    let message = format!("in '{}': {}", path.display(), diagnostic.message);
    diagnostic.with_message(message)
}

/// Resolve an import target against the importing file's directory.
/// A bare target gets the `.hcss` extension; any other extension is
/// rejected.
fn resolve_import(file: &Path, target: &str) -> Result<PathBuf> {
    let mut resolved = PathBuf::from(target);
    match resolved.extension() {
        None => {
            resolved.set_extension("hcss");
        }
        Some(ext) if ext == "hcss" => {}
        Some(ext) => {
            return Err(Diagnostic::error(ErrorCode::Import).with_message(format!(
                "import target must be an hcss file, found '.{}'",
                ext.to_string_lossy()
            )));
        }
    }
    if resolved.is_relative() {
        if let Some(parent) = file.parent() {
            resolved = parent.join(resolved);
        }
    }
    Ok(resolved)
}

fn eval_declaration(rest: &[Token], mutability: Mutability, scope: &mut Scope) -> Result<()> {
    let err =
        |message: String| Diagnostic::error(ErrorCode::VariableDeclaration).with_message(message);
    let Some((name_token, rest)) = rest.split_first() else {
        return Err(err("expected a variable name".to_string()));
    };
    let TokenKind::Ident(name) = &name_token.kind else {
        return Err(err(format!("invalid variable name: '{}'", name_token.text)));
    };
    if name == "throw" {
        return Err(Diagnostic::error(ErrorCode::ReservedKeyword)
            .with_message("'throw' is reserved and cannot be bound"));
    }
    let Some((eq, rhs)) = rest.split_first() else {
        return Err(err(format!("expected '=' after '{name}'")));
    };
    if eq.kind != TokenKind::Equals {
        return Err(err(format!("expected '=' after '{name}', found '{}'", eq.text)));
    }

    let value = parse_expr(rhs, scope)?;
    match scope.define(name.clone(), value, mutability) {
        Ok(()) => Ok(()),
        Err(DefineError::Redeclared) => {
            Err(err(format!("variable '{name}' is already declared")))
        }
    }
}

fn eval_reassignment(name: &str, rhs: &[Token], scope: &mut Scope) -> Result<()> {
    let value = parse_expr(rhs, scope)?;
    match scope.assign(name, value) {
        Ok(()) => Ok(()),
        Err(AssignError::Undefined) => Err(Diagnostic::error(ErrorCode::VariableIdentification)
            .with_message(format!("variable does not exist: '{name}'"))),
        Err(AssignError::Const) => Err(Diagnostic::error(ErrorCode::ConstReassignment)
            .with_message(format!("cannot reassign constant '{name}'"))),
    }
}

fn eval_selector_block(tokens: &[Token], scope: &Scope, rules: &mut Vec<CssRule>) -> Result<()> {
    let Some(brace) = tokens.iter().position(|t| t.kind == TokenKind::LBrace) else {
        return Err(Diagnostic::error(ErrorCode::Syntax)
            .with_message("selector statement is missing its '{' block"));
    };
    let header = &tokens[1..brace];
    let selectors = expand_selector(header)?;

    // The grouper guarantees the closing brace is the statement's last
    // token.
    let body = &tokens[brace + 1..tokens.len() - 1];
    let mut block_scope = scope.child();
    let mut declarations: Vec<(String, String)> = Vec::new();

    for line in body.split(|t| t.kind == TokenKind::Semi) {
        eval_block_line(line, &mut block_scope, &mut declarations)?;
    }

    for selector in selectors {
        let mut rule = CssRule::new(selector);
        rule.declarations = declarations.clone();
        rules.push(rule);
    }
    Ok(())
}

fn eval_block_line(
    line: &[Token],
    scope: &mut Scope,
    declarations: &mut Vec<(String, String)>,
) -> Result<()> {
    let Some(first) = line.first() else {
        return Ok(());
    };
    match &first.kind {
        TokenKind::Let => eval_declaration(&line[1..], Mutability::Let, scope),
        TokenKind::Const => eval_declaration(&line[1..], Mutability::Const, scope),
        TokenKind::Ident(name) => match line.get(1).map(|t| &t.kind) {
            Some(TokenKind::Equals) => eval_reassignment(name, &line[2..], scope),
            Some(TokenKind::Colon) => {
                let value = parse_expr(&line[2..], scope)?;
                declarations.push((name.clone(), value.render()));
                Ok(())
            }
            _ => Err(Diagnostic::error(ErrorCode::Syntax)
                .with_message(format!("expected ':' or '=' after '{name}' in block"))),
        },
        _ => Err(Diagnostic::error(ErrorCode::Syntax)
            .with_message(format!("unexpected '{}' in selector block", first.text))),
    }
}
