//! Generated-header rendering.
//!
//! Turns a define table into the include-guarded C header the library
//! build writes to its generated-sources directory.

use crate::map::DefineMap;

/// Render a define table as an include-guarded C header.
///
/// Entries appear one per line in sorted name order; valueless defines
/// render without a trailing value. The output is deterministic for a
/// given table.
pub fn render_header(guard: &str, map: &DefineMap) -> String {
    let mut out = String::new();
    out.push_str(&format!("#ifndef {guard}\n"));
    out.push_str(&format!("#define {guard}\n"));
    out.push('\n');

    for (name, value) in map.iter() {
        match value {
            Some(value) => out.push_str(&format!("#define {name} {value}\n")),
            None => out.push_str(&format!("#define {name}\n")),
        }
    }
    if !map.is_empty() {
        out.push('\n');
    }

    out.push_str(&format!("#endif // {guard}\n"));
    out
}
