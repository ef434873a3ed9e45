//! Operator-facing views of a decoded record.

use tapeprobe_wire::StateRecord;

/// Which textual view of the record to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderPolicy {
    /// Decimal cell values, concatenated in tape order.
    Numeric,
    /// One glyph per cell, a caret line under the head, a state line.
    Symbolic,
}

/// Maps cell values to single-character glyphs for the symbolic view.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    entries: Vec<(u8, char)>,
    unknown: char,
}

impl SymbolTable {
    pub fn new(entries: Vec<(u8, char)>, unknown: char) -> Self {
        Self { entries, unknown }
    }

    /// Glyph for a cell value; unmapped values get the unknown marker.
    pub fn glyph(&self, value: u8) -> char {
        self.entries
            .iter()
            .find(|(v, _)| *v == value)
            .map(|(_, glyph)| *glyph)
            .unwrap_or(self.unknown)
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            entries: vec![(0, '0'), (1, '1'), (2, 'x'), (3, 's'), (255, '_')],
            unknown: '?',
        }
    }
}

/// A configured renderer: policy plus symbol table.
#[derive(Debug, Clone)]
pub struct TapeRenderer {
    pub policy: RenderPolicy,
    pub symbols: SymbolTable,
}

impl TapeRenderer {
    pub fn new(policy: RenderPolicy) -> Self {
        Self {
            policy,
            symbols: SymbolTable::default(),
        }
    }

    /// Render one record to display text, without a trailing newline.
    pub fn render(&self, record: &StateRecord) -> String {
        match self.policy {
            RenderPolicy::Numeric => render_numeric(record),
            RenderPolicy::Symbolic => render_symbolic(record, &self.symbols),
        }
    }
}

/// Decimal dump of the cells with no separators.
///
/// Lossless per cell value; cell boundaries are not recoverable from the
/// text once any value needs more than one digit.
pub fn render_numeric(record: &StateRecord) -> String {
    let mut out = String::with_capacity(record.cells.len() * 3);
    for cell in &record.cells {
        out.push_str(&cell.to_string());
    }
    out
}

/// Symbolic tape view: glyph line, caret line, state line.
///
/// The caret column is clamped to the last cell so an out-of-range head
/// location, which the wire does not validate, cannot push the marker off
/// the tape.
pub fn render_symbolic(record: &StateRecord, symbols: &SymbolTable) -> String {
    let mut out = String::with_capacity(record.cells.len() * 2 + 16);
    for cell in &record.cells {
        out.push(symbols.glyph(*cell));
    }
    out.push('\n');

    let caret_col = (record.head_location as usize).min(record.cells.len().saturating_sub(1));
    for _ in 0..caret_col {
        out.push(' ');
    }
    out.push('^');
    out.push('\n');

    out.push_str("State: ");
    out.push_str(&record.state.to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(state: u8, head: u8, cells: &[u8]) -> StateRecord {
        StateRecord {
            state,
            head_location: head,
            cells: cells.to_vec(),
            padding: 0,
        }
    }

    #[test]
    fn numeric_concatenates_decimals() {
        assert_eq!(render_numeric(&record(0, 0, &[3; 10])), "3333333333");
        assert_eq!(render_numeric(&record(0, 0, &[255, 0, 17])), "255017");
    }

    #[test]
    fn symbolic_maps_known_values() {
        let out = render_symbolic(&record(2, 0, &[0, 1, 2, 3, 255]), &SymbolTable::default());
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[0], "01xs_");
        assert_eq!(lines[2], "State: 2");
    }

    #[test]
    fn symbolic_marks_unknown_values() {
        let out = render_symbolic(&record(0, 0, &[42, 1]), &SymbolTable::default());
        assert!(out.starts_with("?1\n"));
    }

    #[test]
    fn caret_sits_under_the_head() {
        let out = render_symbolic(&record(1, 3, &[255; 8]), &SymbolTable::default());
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[0], "________");
        assert_eq!(lines[1], "   ^");
        assert_eq!(lines[2], "State: 1");
    }

    #[test]
    fn caret_clamps_to_last_cell() {
        let out = render_symbolic(&record(0, 200, &[0; 4]), &SymbolTable::default());
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines[1], "   ^");
    }

    #[test]
    fn caret_survives_empty_tape() {
        let out = render_symbolic(&record(0, 5, &[]), &SymbolTable::default());
        assert_eq!(out, "\n^\nState: 0");
    }

    #[test]
    fn renderer_selects_policy() {
        let rec = record(7, 1, &[1, 1, 1]);
        assert_eq!(TapeRenderer::new(RenderPolicy::Numeric).render(&rec), "111");
        assert_eq!(
            TapeRenderer::new(RenderPolicy::Symbolic).render(&rec),
            "111\n ^\nState: 7"
        );
    }

    #[test]
    fn custom_symbol_table() {
        let symbols = SymbolTable::new(vec![(9, '#')], '.');
        assert_eq!(symbols.glyph(9), '#');
        assert_eq!(symbols.glyph(1), '.');
    }
}
