//! Block scanner
//!
//! Finds every complete top-level tuple in the insert blocks of a document.
//! Each block starts right after a marker and ends at the first `;` that is
//! outside quotes and outside parentheses. Inside a block the scanner is a
//! two-state machine (outside/inside a quoted run) with a paren depth
//! counter, so parentheses, commas and semicolons inside quoted values never
//! split a tuple.
//!
//! Between blocks the marker search is quote-aware as well: marker text that
//! sits inside a quoted value of any insert is never taken for a new block.
//!
//! The scan is a single forward pass with one byte of lookahead. All the
//! structural characters are ASCII, so byte offsets always fall on UTF-8
//! boundaries and spans can be sliced straight out of the source text.

use regex::{Match, Regex};

use super::literal::QUOTE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    OutsideString,
    InsideString,
}

/// Scanner over a single insert block
///
/// Yields the inner text (without the surrounding parentheses) of each
/// completed top-level tuple, in order.
#[derive(Debug, Clone)]
pub struct BlockScan<'t> {
    text: &'t str,
    pos: usize,
    state: ScanState,
    depth: usize,
    tuple_start: Option<usize>,
    finished: bool,
    terminated: bool,
}

impl<'t> BlockScan<'t> {
    /// Start scanning `text` at byte offset `start`
    pub fn new(text: &'t str, start: usize) -> Self {
        Self {
            text,
            pos: start.min(text.len()),
            state: ScanState::OutsideString,
            depth: 0,
            tuple_start: None,
            finished: false,
            terminated: false,
        }
    }

    /// Byte offset where scanning currently stands
    ///
    /// Once the block is exhausted this is just past its terminator, or the
    /// end of the text for an unterminated block.
    pub fn offset(&self) -> usize {
        self.pos
    }

    /// Whether the block ended at a statement terminator
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<'t> Iterator for BlockScan<'t> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        if self.finished {
            return None;
        }

        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() {
            let i = self.pos;
            let b = bytes[i];

            match self.state {
                ScanState::InsideString => {
                    if b == QUOTE {
                        if bytes.get(i + 1) == Some(&QUOTE) {
                            self.pos += 2;
                            continue;
                        }
                        self.state = ScanState::OutsideString;
                    }
                    self.pos += 1;
                }
                ScanState::OutsideString => {
                    self.pos += 1;
                    match b {
                        QUOTE => self.state = ScanState::InsideString,
                        b'(' => {
                            if self.depth == 0 {
                                self.tuple_start = Some(i);
                            }
                            self.depth += 1;
                        }
                        b')' => {
                            // Stray close paren at top level
                            if self.depth == 0 {
                                continue;
                            }
                            self.depth -= 1;
                            if self.depth == 0 {
                                if let Some(start) = self.tuple_start.take() {
                                    return Some(&self.text[start + 1..i]);
                                }
                            }
                        }
                        b';' if self.depth == 0 => {
                            self.finished = true;
                            self.terminated = true;
                            return None;
                        }
                        _ => {}
                    }
                }
            }
        }

        // Ran off the end: a half-open tuple is discarded
        self.finished = true;
        None
    }
}

/// Scanner over every block introduced by `marker`
///
/// Blocks are visited in document order and their tuples concatenated. The
/// marker search resumes where the previous block ended, so marker text
/// quoted inside an earlier block is never mistaken for a new block.
#[derive(Debug)]
pub struct TupleScanner<'t, 'm> {
    text: &'t str,
    marker: &'m Regex,
    search_from: usize,
    block: Option<BlockScan<'t>>,
    blocks_seen: usize,
}

impl<'t, 'm> TupleScanner<'t, 'm> {
    /// Scan the whole of `text` for blocks introduced by `marker`
    pub fn new(text: &'t str, marker: &'m Regex) -> Self {
        Self {
            text,
            marker,
            search_from: 0,
            block: None,
            blocks_seen: 0,
        }
    }

    /// Number of marker occurrences visited so far
    pub fn blocks_seen(&self) -> usize {
        self.blocks_seen
    }
}

impl<'t, 'm> Iterator for TupleScanner<'t, 'm> {
    type Item = &'t str;

    fn next(&mut self) -> Option<&'t str> {
        loop {
            if let Some(block) = self.block.as_mut() {
                if let Some(tuple) = block.next() {
                    return Some(tuple);
                }
                self.search_from = block.offset();
                self.block = None;
            }

            let found = find_marker(self.text, self.marker, self.search_from)?;
            self.blocks_seen += 1;
            self.block = Some(BlockScan::new(self.text, found.end()));
        }
    }
}

/// Find the first `marker` match at or after `from` that is not inside a
/// quoted run
///
/// `from` must be outside any quoted run. Quote state is tracked forward from
/// there, with a doubled quote read as an escaped quote.
pub fn find_marker<'t>(text: &'t str, marker: &Regex, from: usize) -> Option<Match<'t>> {
    let bytes = text.as_bytes();
    let mut cursor = from;
    let mut inside = false;
    let mut search = from;

    loop {
        if search > text.len() {
            return None;
        }
        let found = marker.find_at(text, search)?;

        while cursor < found.start() {
            if bytes[cursor] == QUOTE {
                if inside && bytes.get(cursor + 1) == Some(&QUOTE) {
                    cursor += 2;
                    continue;
                }
                inside = !inside;
            }
            cursor += 1;
        }

        if !inside {
            return Some(found);
        }

        // Skip past the first character of the quoted match
        search = found.start()
            + text[found.start()..]
                .chars()
                .next()
                .map_or(1, char::len_utf8);
    }
}

/// Collect every tuple introduced by `marker`, in document order
pub fn scan_tuples<'t>(text: &'t str, marker: &Regex) -> Vec<&'t str> {
    TupleScanner::new(text, marker).collect()
}
