//! C definition scaffold generation.
//!
//! Produces the declaration lines and definition header an implementation
//! file wraps around a function body. The three shapes correspond to
//! [`ExportMode`]: forced-asm binding only (GPU), binding plus alias
//! (ordinary public), or a plain definition (private).

use crate::error::{LinkageError, Result};
use crate::export::ExportMode;
use crate::sig::{is_identifier, CSignature};

/// Options shared by every scaffold in a build.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    /// Internal C++ namespace the implementations live in.
    pub namespace: String,
    /// Extra attribute prepended to the bound declaration, if the build
    /// configures one.
    pub extra_attribute: Option<String>,
}

impl Default for ScaffoldOptions {
    fn default() -> Self {
        Self {
            namespace: "__lithic".to_string(),
            extra_attribute: None,
        }
    }
}

/// A generated definition scaffold for one function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    /// The mode the scaffold was generated for.
    pub mode: ExportMode,
    /// The public C symbol name.
    pub public_symbol: String,
    /// The symbol the definition header uses. Equal to `public_symbol` in
    /// private mode, `__<name>_impl__` otherwise.
    pub impl_symbol: String,
    /// Declaration lines preceding the definition: none (private), the
    /// asm-bound declaration (GPU), or the asm-bound declaration plus the
    /// alias declaration (ordinary public).
    pub declarations: Vec<String>,
    /// The definition header the implementation body attaches to.
    pub definition: String,
}

impl Scaffold {
    /// Generate the scaffold for a signature under a mode.
    pub fn generate(sig: &CSignature, mode: ExportMode, opts: &ScaffoldOptions) -> Result<Scaffold> {
        if !is_identifier(&sig.name) {
            return Err(LinkageError::InvalidIdentifier {
                name: sig.name.clone(),
            });
        }
        if !is_identifier(&opts.namespace) {
            return Err(LinkageError::InvalidIdentifier {
                name: opts.namespace.clone(),
            });
        }

        let name = &sig.name;
        let ns = &opts.namespace;
        let attr = match &opts.extra_attribute {
            Some(attr) => format!("{attr} "),
            None => String::new(),
        };

        let impl_symbol = match mode {
            ExportMode::Private => name.clone(),
            _ => format!("__{name}_impl__"),
        };

        let mut declarations = Vec::new();
        if mode.uses_asm_binding() {
            declarations.push(format!(
                "{attr}decltype({ns}::{name}) {impl_symbol} __asm__(\"{name}\");"
            ));
        }
        if mode.uses_alias() {
            declarations.push(format!(
                "decltype({ns}::{name}) {name} [[gnu::alias(\"{name}\")]];"
            ));
        }

        let definition = format!(
            "{} {}{}",
            sig.return_type,
            impl_symbol,
            sig.parameter_list()
        );

        Ok(Scaffold {
            mode,
            public_symbol: name.clone(),
            impl_symbol,
            declarations,
            definition,
        })
    }

    /// The alias symbol, if this scaffold declares one.
    pub fn alias_symbol(&self) -> Option<&str> {
        if self.mode.uses_alias() {
            Some(&self.public_symbol)
        } else {
            None
        }
    }

    /// Render the scaffold as the C text block an implementation file
    /// wraps around the function body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for decl in &self.declarations {
            out.push_str(decl);
            out.push('\n');
        }
        out.push_str(&self.definition);
        out
    }
}
