//! C function signature parsing.
//!
//! Covers the signature grammar a libc surface needs: the void/char/int
//! family with sign qualifiers, `long long`, float/double/`long double`,
//! `_Bool`, `size_t` and the fixed-width stdint types, opaque `struct`
//! references, `const`, pointers, unnamed parameters, `(void)` parameter
//! lists, and trailing variadics. Function pointers, arrays, and attribute
//! syntax are out of scope.

use crate::error::{LinkageError, Result};

/// Base type spellings, longest first so that multiword spellings win.
const BASE_SPELLINGS: &[&[&str]] = &[
    &["unsigned", "long", "long"],
    &["signed", "long", "long"],
    &["unsigned", "long"],
    &["signed", "long"],
    &["long", "long"],
    &["long", "double"],
    &["unsigned", "short"],
    &["signed", "short"],
    &["unsigned", "char"],
    &["signed", "char"],
    &["unsigned", "int"],
    &["signed", "int"],
    &["unsigned"],
    &["signed"],
    &["long"],
    &["short"],
    &["char"],
    &["int"],
    &["float"],
    &["double"],
    &["void"],
    &["_Bool"],
    &["bool"],
    &["size_t"],
    &["ssize_t"],
    &["ptrdiff_t"],
    &["intmax_t"],
    &["uintmax_t"],
    &["int8_t"],
    &["int16_t"],
    &["int32_t"],
    &["int64_t"],
    &["uint8_t"],
    &["uint16_t"],
    &["uint32_t"],
    &["uint64_t"],
];

/// A C type in flattened form: a canonical base spelling, an optional
/// const qualifier on the base, and a pointer depth.
///
/// Qualifiers between pointer levels are accepted by the parser but folded
/// away; the scaffold only needs to render the type back, not reason about
/// deep constness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CType {
    /// Canonical base spelling (e.g., "unsigned long long", "size_t",
    /// "struct timespec").
    pub base: String,
    /// Whether the base is const-qualified.
    pub is_const: bool,
    /// Number of pointer levels applied to the base.
    pub pointer_depth: u8,
}

impl CType {
    /// A non-pointer type from a base spelling.
    pub fn scalar(base: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            is_const: false,
            pointer_depth: 0,
        }
    }

    /// A pointer to this type.
    pub fn pointer_to(mut self) -> Self {
        self.pointer_depth += 1;
        self
    }

    /// Whether this is plain `void` (not `void*`).
    pub fn is_void(&self) -> bool {
        self.base == "void" && self.pointer_depth == 0
    }
}

impl std::fmt::Display for CType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_const {
            write!(f, "const ")?;
        }
        write!(f, "{}", self.base)?;
        for _ in 0..self.pointer_depth {
            write!(f, "*")?;
        }
        Ok(())
    }
}

/// A parsed C function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CParam {
    /// Parameter type.
    pub ty: CType,
    /// Parameter name, if the declaration carried one.
    pub name: Option<String>,
}

/// A parsed C function signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CSignature {
    /// Return type.
    pub return_type: CType,
    /// Function name.
    pub name: String,
    /// Parameters, excluding a trailing `...`.
    pub parameters: Vec<CParam>,
    /// Whether the function is variadic.
    pub is_variadic: bool,
}

impl CSignature {
    /// Parse a C function signature string.
    ///
    /// Examples:
    /// - `"double sin(double x)"`
    /// - `"void* memcpy(void* dst, const void* src, size_t n)"`
    /// - `"int printf(const char* fmt, ...)"`
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let open = input.find('(').ok_or_else(|| invalid("missing '('"))?;
        if !input.ends_with(')') {
            return Err(invalid("missing ')'"));
        }

        let (return_type, name) = parse_declarator(&input[..open])?;
        let name = name.ok_or_else(|| invalid("missing function name"))?;

        let (parameters, is_variadic) = parse_parameter_list(&input[open + 1..input.len() - 1])?;

        Ok(CSignature {
            return_type,
            name,
            parameters,
            is_variadic,
        })
    }

    /// Render the parameter list as C expects: `(void)` when empty,
    /// trailing `, ...` when variadic.
    pub fn parameter_list(&self) -> String {
        if self.parameters.is_empty() && !self.is_variadic {
            return "(void)".to_string();
        }
        let mut parts: Vec<String> = self
            .parameters
            .iter()
            .map(|p| match &p.name {
                Some(name) => format!("{} {}", p.ty, name),
                None => p.ty.to_string(),
            })
            .collect();
        if self.is_variadic {
            parts.push("...".to_string());
        }
        format!("({})", parts.join(", "))
    }
}

impl std::fmt::Display for CSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {}{}",
            self.return_type,
            self.name,
            self.parameter_list()
        )
    }
}

/// Whether a string is a valid C identifier.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn invalid(detail: impl Into<String>) -> LinkageError {
    LinkageError::InvalidSignature {
        detail: detail.into(),
    }
}

/// Split a declaration fragment into tokens, keeping `*` separate.
fn tokenize(s: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for chunk in s.split_whitespace() {
        let mut rest = chunk;
        while let Some(star) = rest.find('*') {
            if star > 0 {
                tokens.push(&rest[..star]);
            }
            tokens.push("*");
            rest = &rest[star + 1..];
        }
        if !rest.is_empty() {
            tokens.push(rest);
        }
    }
    tokens
}

/// Consume a base type from the front of the token stream.
///
/// Returns the canonical spelling and the number of tokens consumed.
fn take_base(tokens: &[&str]) -> Result<(String, usize)> {
    if tokens.is_empty() {
        return Err(invalid("expected a type"));
    }

    if tokens[0] == "struct" {
        let name = tokens
            .get(1)
            .filter(|n| is_identifier(n))
            .ok_or_else(|| invalid("expected struct name"))?;
        return Ok((format!("struct {name}"), 2));
    }

    for spelling in BASE_SPELLINGS {
        if tokens.len() >= spelling.len() && &tokens[..spelling.len()] == *spelling {
            let canonical = match spelling.join(" ").as_str() {
                // Bare sign qualifiers mean int
                "unsigned" => "unsigned int".to_string(),
                "signed" => "int".to_string(),
                "signed int" => "int".to_string(),
                "bool" => "_Bool".to_string(),
                other => other.to_string(),
            };
            return Ok((canonical, spelling.len()));
        }
    }

    Err(invalid(format!("unknown type '{}'", tokens[0])))
}

/// Parse a declaration fragment: `[const] base [*...] [name]`.
///
/// Used for both the part before `(` (name required by the caller) and for
/// individual parameters (name optional).
fn parse_declarator(s: &str) -> Result<(CType, Option<String>)> {
    let tokens = tokenize(s);
    if tokens.is_empty() {
        return Err(invalid("empty declaration"));
    }

    let mut pos = 0;
    let is_const = tokens[0] == "const";
    if is_const {
        pos += 1;
    }

    let (base, consumed) = take_base(&tokens[pos..])?;
    pos += consumed;

    let mut pointer_depth: u8 = 0;
    let mut name = None;
    for token in &tokens[pos..] {
        match *token {
            "*" => pointer_depth += 1,
            // Qualifiers between pointer levels are folded away
            "const" | "restrict" | "volatile" => {}
            t if is_identifier(t) && name.is_none() => name = Some(t.to_string()),
            t => return Err(invalid(format!("unexpected token '{t}'"))),
        }
    }

    Ok((
        CType {
            base,
            is_const,
            pointer_depth,
        },
        name,
    ))
}

/// Parse the parameter list between `(` and `)`.
fn parse_parameter_list(s: &str) -> Result<(Vec<CParam>, bool)> {
    let s = s.trim();
    if s.is_empty() || s == "void" {
        return Ok((Vec::new(), false));
    }

    let parts: Vec<&str> = s.split(',').collect();
    let mut parameters = Vec::new();
    let mut is_variadic = false;

    for (i, part) in parts.iter().enumerate() {
        let part = part.trim();
        if part == "..." {
            if i != parts.len() - 1 {
                return Err(invalid("'...' must be the last parameter"));
            }
            is_variadic = true;
            continue;
        }
        let (ty, name) = parse_declarator(part)?;
        if ty.is_void() {
            return Err(invalid("'void' must be the only parameter"));
        }
        parameters.push(CParam { ty, name });
    }

    Ok((parameters, is_variadic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_function() {
        let sig = CSignature::parse("double sin(double x)").unwrap();
        assert_eq!(sig.name, "sin");
        assert_eq!(sig.return_type, CType::scalar("double"));
        assert_eq!(sig.parameters.len(), 1);
        assert_eq!(sig.parameters[0].ty, CType::scalar("double"));
        assert_eq!(sig.parameters[0].name.as_deref(), Some("x"));
        assert!(!sig.is_variadic);
    }

    #[test]
    fn parse_pointer_return() {
        let sig = CSignature::parse("void* malloc(size_t size)").unwrap();
        assert_eq!(sig.name, "malloc");
        assert_eq!(sig.return_type, CType::scalar("void").pointer_to());
        assert_eq!(sig.parameters[0].ty, CType::scalar("size_t"));
    }

    #[test]
    fn parse_const_char_pointer() {
        let sig = CSignature::parse("int puts(const char* s)").unwrap();
        assert_eq!(
            sig.parameters[0].ty,
            CType {
                base: "char".to_string(),
                is_const: true,
                pointer_depth: 1,
            }
        );
    }

    #[test]
    fn parse_variadic() {
        let sig = CSignature::parse("int printf(const char* fmt, ...)").unwrap();
        assert!(sig.is_variadic);
        assert_eq!(sig.parameters.len(), 1);
    }

    #[test]
    fn parse_variadic_not_last_is_error() {
        assert!(CSignature::parse("int bad(..., int x)").is_err());
    }

    #[test]
    fn parse_multiword_types() {
        let sig =
            CSignature::parse("unsigned long long strtoull(const char* s, char** end, int base)")
                .unwrap();
        assert_eq!(sig.return_type, CType::scalar("unsigned long long"));
        assert_eq!(sig.parameters[1].ty.pointer_depth, 2);

        let sig = CSignature::parse("long double fabsl(long double x)").unwrap();
        assert_eq!(sig.return_type, CType::scalar("long double"));
    }

    #[test]
    fn parse_bare_sign_qualifiers() {
        let sig = CSignature::parse("unsigned foo(signed x)").unwrap();
        assert_eq!(sig.return_type.base, "unsigned int");
        assert_eq!(sig.parameters[0].ty.base, "int");
    }

    #[test]
    fn parse_struct_reference() {
        let sig = CSignature::parse("int nanosleep(const struct timespec* req, struct timespec* rem)")
            .unwrap();
        assert_eq!(sig.parameters[0].ty.base, "struct timespec");
        assert!(sig.parameters[0].ty.is_const);
        assert_eq!(sig.parameters[0].ty.pointer_depth, 1);
        assert_eq!(sig.parameters[0].name.as_deref(), Some("req"));
    }

    #[test]
    fn parse_stdint_types() {
        let sig = CSignature::parse("int32_t foo(uint8_t a, int64_t b)").unwrap();
        assert_eq!(sig.return_type.base, "int32_t");
        assert_eq!(sig.parameters[0].ty.base, "uint8_t");
        assert_eq!(sig.parameters[1].ty.base, "int64_t");
    }

    #[test]
    fn parse_unnamed_parameter() {
        let sig = CSignature::parse("float sqrtf(float)").unwrap();
        assert_eq!(sig.parameters[0].ty, CType::scalar("float"));
        assert!(sig.parameters[0].name.is_none());
    }

    #[test]
    fn parse_void_parameter_list() {
        let sig = CSignature::parse("int getpid(void)").unwrap();
        assert!(sig.parameters.is_empty());
        assert_eq!(sig.parameter_list(), "(void)");
    }

    #[test]
    fn parse_void_param_among_others_is_error() {
        assert!(CSignature::parse("int bad(void, int x)").is_err());
    }

    #[test]
    fn parse_errors() {
        assert!(CSignature::parse("").is_err());
        assert!(CSignature::parse("double sin double x").is_err());
        assert!(CSignature::parse("double sin(double x").is_err());
        assert!(CSignature::parse("sin(double x)").is_err());
        assert!(CSignature::parse("mystery_t foo(int x)").is_err());
    }

    #[test]
    fn display_round_trip() {
        for input in [
            "double sin(double x)",
            "void* memcpy(void* dst, const void* src, size_t n)",
            "int printf(const char* fmt, ...)",
            "int getpid(void)",
        ] {
            let sig = CSignature::parse(input).unwrap();
            assert_eq!(sig.to_string(), input);
        }
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("sin"));
        assert!(is_identifier("_impl"));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
    }
}
