use std::fmt;

/// Error kinds for all compiler diagnostics.
///
/// `as_str()` yields the legacy spelled-out names (`LexicalError`,
/// `ConstReassignmentError`, ...) that the emitter prints. Every kind is
/// fatal: there is no warning severity in this compiler.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Unterminated quote; unbalanced brace/bracket/paren nesting.
    Lexical,
    /// No token-classification match; malformed statement shape;
    /// unparseable literal.
    Syntax,
    /// Package not the first statement, wrong arity, or invalid name.
    PackageRegistration,
    /// Missing or non-`.hcss` file, self-import, const conflict on merge.
    Import,
    /// Redeclaration of an existing name in the same scope.
    VariableDeclaration,
    /// Use of the reserved word `throw` as a binding name.
    ReservedKeyword,
    /// Reference to a name with no binding in scope.
    VariableIdentification,
    /// Assignment to a `const` binding.
    ConstReassignment,
    /// Selector block with an empty header.
    BlankSelector,
    /// Selector group containing a nested group.
    NestedGroup,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Lexical => "LexicalError",
            ErrorCode::Syntax => "SyntaxError",
            ErrorCode::PackageRegistration => "PackageRegistrationError",
            ErrorCode::Import => "ImportError",
            ErrorCode::VariableDeclaration => "VariableDeclarationError",
            ErrorCode::ReservedKeyword => "ReservedKeywordError",
            ErrorCode::VariableIdentification => "VariableIdentificationError",
            ErrorCode::ConstReassignment => "ConstReassignmentError",
            ErrorCode::BlankSelector => "BlankSelectorError",
            ErrorCode::NestedGroup => "NestedGroupError",
        }
    }

    /// Check if this kind comes from the lexing/grouping layer.
    pub fn is_lexical(self) -> bool {
        matches!(self, ErrorCode::Lexical)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
