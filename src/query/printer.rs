//! Indented tree printing for query nodes

use std::fmt::{self, Write};

/// Number of spaces emitted per indentation level by [`TreePrinter::tab`].
pub const INDENT_WIDTH: usize = 2;

/// Writer with an explicit indentation depth.
///
/// Nodes print themselves into a `TreePrinter` instead of stdout, so the
/// same tree can be rendered into a log line, a test buffer or a terminal.
///
/// # Examples
///
/// ```
/// use std::fmt::Write;
///
/// use symquery::query::TreePrinter;
///
/// let mut out = String::new();
/// let mut printer = TreePrinter::new(&mut out);
/// printer.write_str("<Root")?;
/// printer.indent();
/// printer.newline()?;
/// printer.tab()?;
/// printer.write_str("child")?;
/// printer.unindent();
/// printer.write_str(" Root>")?;
/// assert_eq!(out, "<Root\n  child Root>");
/// # Ok::<(), std::fmt::Error>(())
/// ```
pub struct TreePrinter<'a> {
    out: &'a mut dyn Write,
    depth: usize,
}

impl<'a> TreePrinter<'a> {
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self { out, depth: 0 }
    }

    /// Current indentation depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn indent(&mut self) {
        self.depth += 1;
    }

    pub fn unindent(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Write the leading whitespace for the current depth.
    pub fn tab(&mut self) -> fmt::Result {
        write!(self.out, "{:width$}", "", width = self.depth * INDENT_WIDTH)
    }

    pub fn newline(&mut self) -> fmt::Result {
        self.out.write_char('\n')
    }
}

impl Write for TreePrinter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.out.write_str(s)
    }
}
