//! The route handler transformation.
//!
//! Everything here is textual: the outdated declaration is matched as an
//! exact literal, handler bodies are located with a balanced-brace scanner,
//! and rewrites are applied by byte span. No TypeScript parsing takes place.
//!
//! ## Coordinate conventions
//!
//! Spans are half-open byte intervals `[start, end)` into the file content,
//! recomputed per run and never persisted.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

/// The outdated synchronous `params` declaration (applicability marker).
pub const OLD_PARAMS_DECL: &str = "{ params }: { params: { id: string } }";

/// The Next.js 15+ asynchronous `params` declaration.
pub const NEW_PARAMS_DECL: &str = "{ params }: { params: Promise<{ id: string }> }";

/// The binding inserted at the top of a handler's `try` block.
pub const AWAIT_BINDING: &str = "const { id } = await params;";

/// Entry-block marker gating the body rewrite.
const TRY_MARKER: &str = "try {";

/// Byte span into file content, half-open `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "Span start ({start}) must be <= end ({end})");
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Matches an `export async function` signature whose parameter list carries
/// the updated declaration, up to and including the body's opening brace.
fn handler_signature() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let pattern = format!(
            r"export async function \w+\([^)]*{}[^)]*\)\s*\{{",
            regex::escape(NEW_PARAMS_DECL)
        );
        Regex::new(&pattern).expect("handler signature pattern is valid")
    })
}

/// Locate the body span of every matching handler in `content`.
///
/// Each returned span covers the body interior, excluding the delimiting
/// braces. Bodies are found with a balanced-brace scan from the opening
/// brace, so nested blocks (conditionals, inner closures) do not truncate
/// the span. A handler whose braces never balance (truncated file) is
/// skipped.
pub fn find_handler_bodies(content: &str) -> Vec<Span> {
    let mut bodies = Vec::new();

    for m in handler_signature().find_iter(content) {
        // m ends just past the opening brace; scan for its match.
        if let Some(close) = matching_close_brace(content.as_bytes(), m.end()) {
            bodies.push(Span::new(m.end(), close));
        } else {
            debug!(offset = m.start(), "unbalanced handler body, skipping");
        }
    }

    bodies
}

/// Find the offset of the `}` closing the brace that ends at `body_start`.
///
/// Returns `None` if the braces never balance. The scan counts raw brace
/// bytes; braces inside string literals are not recognized, which is the
/// accepted limit of a textual tool.
fn matching_close_brace(content: &[u8], body_start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (i, &byte) in content.iter().enumerate().skip(body_start) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Rewrite one handler body that accesses `params.id` directly.
///
/// Returns `None` when the body needs no rewrite: it never touches
/// `params.id`, or it has no `try` block to anchor the binding (matching the
/// original migration, which only rewrote `try`-wrapped handlers).
fn rewrite_body(body: &str) -> Option<String> {
    if !body.contains("params.id") || !body.contains(TRY_MARKER) {
        return None;
    }

    let mut new_body = if body.contains(AWAIT_BINDING) {
        body.to_string()
    } else {
        body.replacen(TRY_MARKER, &format!("{TRY_MARKER}\n    {AWAIT_BINDING}"), 1)
    };

    new_body = new_body.replace("params.id", "id");
    new_body = new_body.replace("parseInt(params.", "parseInt(");

    Some(new_body)
}

/// Apply the full substitution chain to one file's content.
///
/// Returns `None` when the file is not applicable (the outdated declaration
/// is absent), leaving it byte-for-byte untouched. Otherwise returns the
/// rewritten content:
///
/// 1. every outdated declaration becomes the `Promise`-wrapped one,
/// 2. each matching handler body that reads `params.id` inside a `try`
///    block gains the await binding and loses its direct field accesses.
///
/// Body rewrites are applied by span, back to front, so offsets stay valid
/// and two handlers with identical body text are transformed independently.
pub fn fix_content(content: &str) -> Option<String> {
    if !content.contains(OLD_PARAMS_DECL) {
        return None;
    }

    let mut fixed = content.replace(OLD_PARAMS_DECL, NEW_PARAMS_DECL);

    let mut rewrites: Vec<(Span, String)> = Vec::new();
    for span in find_handler_bodies(&fixed) {
        if let Some(new_body) = rewrite_body(&fixed[span.start..span.end]) {
            rewrites.push((span, new_body));
        }
    }

    for (span, new_body) in rewrites.into_iter().rev() {
        fixed.replace_range(span.start..span.end, &new_body);
    }

    Some(fixed)
}

// ============================================================================
// Tests
// ============================================================================
