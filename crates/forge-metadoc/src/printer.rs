//! Form printer
//!
//! Turns a sequence of [`Form`]s into indented source text. The output is
//! shown in rendered code blocks and is also the hash input for generated
//! image names, so it must stay byte-for-byte deterministic.
//!
//! Only a small set of block-shaped heads get broken over several lines:
//!
//! ```text
//! (let [a 1]
//!      (println a)
//!      a)
//! ```
//!
//! Continuation lines align just past the opening paren and the head
//! symbol. Everything else prints flat.
//!
//! # Example
//!
//! ```
//! use forge_metadoc::form::Form;
//! use forge_metadoc::printer::format_forms;
//!
//! let body = [Form::call("do", [Form::sym("a"), Form::sym("b"), Form::sym("c")])];
//! assert_eq!(format_forms(&body), "(do a\n    b\n    c)\n");
//! ```

use crate::form::Form;
use lazy_static::lazy_static;
use std::collections::HashSet;

lazy_static! {
    /// Heads that are printed as indented blocks
    static ref BLOCK_FORMS: HashSet<&'static str> = [
        "->",
        "->>",
        "some->",
        "some->>",
        "cond->",
        "as->",
        "do",
        "let",
        "binding",
        "with-canvas",
        "with-canvas->",
        "doseq",
        "dotimes",
        "loop",
        "when",
        "when-let",
        "if-let",
        "fn",
        "example",
        "example-session",
        "example-image",
    ]
    .into_iter()
    .collect();
}

/// Pretty-printer for forms
#[derive(Debug, Clone, Default)]
pub struct FormPrinter {
    /// Block heads recognised on top of the built-in set
    extra_blocks: HashSet<String>,
}

impl FormPrinter {
    /// Create a printer with the built-in block-form set
    pub fn new() -> Self {
        Self::default()
    }

    /// Treat `head` as a block form as well
    pub fn with_block_form(mut self, head: impl Into<String>) -> Self {
        self.extra_blocks.insert(head.into());
        self
    }

    /// Whether `head` names a block form
    pub fn is_block_head(&self, head: &str) -> bool {
        BLOCK_FORMS.contains(head) || self.extra_blocks.contains(head)
    }

    /// Whether `form` is printed as an indented block.
    ///
    /// Requires a list of more than two elements headed by a block symbol;
    /// `(do x)` stays flat.
    pub fn is_block(&self, form: &Form) -> bool {
        form.len() > 2 && form.head_name().is_some_and(|h| self.is_block_head(h))
    }

    /// Print `forms`, one per line, each prefixed with `indent`.
    ///
    /// No trailing newline is added.
    pub fn print(&self, forms: &[Form], indent: &str) -> String {
        forms
            .iter()
            .map(|form| format!("{}{}", indent, self.render(form, indent)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Top-level entry point: [`print`](Self::print) with no indent, plus a
    /// trailing newline
    pub fn format(&self, forms: &[Form]) -> String {
        let mut out = self.print(forms, "");
        out.push('\n');
        out
    }

    /// Render a single form that starts at column `indent.len()`
    pub fn render(&self, form: &Form, indent: &str) -> String {
        match form {
            Form::Str(s) => format!("\"{}\"", s),
            Form::List(items) if self.is_block(form) => {
                // is_block guarantees a symbol head and at least three items
                let head = form.head_name().unwrap_or_default();
                let child_indent = format!("{}{}", indent, " ".repeat(head.len() + 2));
                format!(
                    "({} {}\n{})",
                    head,
                    self.render(&items[1], &child_indent),
                    self.print(&items[2..], &child_indent)
                )
            }
            other => other.to_string(),
        }
    }
}

/// Print `forms` with the default printer, without a trailing newline
pub fn print_forms(forms: &[Form], indent: &str) -> String {
    FormPrinter::new().print(forms, indent)
}

/// Format `forms` with the default printer as a complete source text
pub fn format_forms(forms: &[Form]) -> String {
    FormPrinter::new().format(forms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sym(s: &str) -> Form {
        Form::sym(s)
    }

    #[test]
    fn test_string_atom_is_quoted() {
        assert_eq!(print_forms(&[Form::str("abc")], ""), "\"abc\"");
    }

    #[test]
    fn test_let_block_indents_five_spaces() {
        let binding = Form::vector([sym("a"), Form::Int(1)]);
        let body1 = Form::call("println", [sym("a")]);
        let body2 = sym("a");
        let form = Form::call("let", [binding.clone(), body1.clone(), body2.clone()]);

        let expected = format!(
            "(let {}\n{})",
            print_forms(&[binding], ""),
            print_forms(&[body1, body2], "     ")
        );
        assert_eq!(print_forms(&[form], ""), expected);
        assert_eq!(expected, "(let [a 1]\n     (println a)\n     a)");
    }

    #[test]
    fn test_two_element_block_head_is_flat() {
        let form = Form::call("do", [sym("x")]);
        assert_eq!(print_forms(&[form], ""), "(do x)");
    }

    #[test]
    fn test_non_block_head_is_flat() {
        let form = Form::call("+", [Form::Int(1), Form::Int(2), Form::Int(3)]);
        assert_eq!(print_forms(&[form], ""), "(+ 1 2 3)");
    }

    #[test]
    fn test_vector_is_never_block() {
        let form = Form::vector([sym("do"), sym("a"), sym("b")]);
        assert_eq!(print_forms(&[form], ""), "[do a b]");
    }

    #[test]
    fn test_nested_blocks_accumulate_indent() {
        let inner = Form::call("do", [sym("a"), sym("b"), Form::str("c")]);
        let outer = Form::call("->", [Form::Int(1), inner, sym("inc")]);
        assert_eq!(
            print_forms(&[outer], ""),
            "(-> 1\n    (do a\n        b\n        \"c\")\n    inc)"
        );
    }

    #[test]
    fn test_block_in_second_position_aligns_with_its_column() {
        let inner = Form::call("do", [sym("a"), sym("b"), sym("c")]);
        let outer = Form::call("when", [inner, sym("d"), sym("e")]);
        assert_eq!(
            print_forms(&[outer], ""),
            "(when (do a\n          b\n          c)\n      d\n      e)"
        );
    }

    #[test]
    fn test_multiple_forms_with_indent() {
        let forms = [sym("a"), Form::Int(2)];
        assert_eq!(print_forms(&forms, "  "), "  a\n  2");
    }

    #[test]
    fn test_format_adds_single_trailing_newline() {
        assert_eq!(format_forms(&[sym("a"), sym("b")]), "a\nb\n");
        assert_eq!(format_forms(&[]), "\n");
    }

    #[test]
    fn test_custom_block_form() {
        let printer = FormPrinter::new().with_block_form("with-open");
        let form = Form::call("with-open", [sym("r"), sym("a"), sym("b")]);
        assert_eq!(printer.print(&[form.clone()], ""), "(with-open r\n           a\n           b)");
        assert_eq!(print_forms(&[form], ""), "(with-open r a b)");
    }
}
