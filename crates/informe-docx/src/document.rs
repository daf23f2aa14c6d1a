//! Paragraph and table views over the document body.
//!
//! A paragraph's text is the concatenation of its `w:t` run texts. Text of
//! paragraphs nested inside the paragraph (text boxes) belongs to those inner
//! paragraphs and is not included. Line breaks and tabs inside runs read as
//! `\n` and `\t`.

use std::fmt;

use crate::package::TemplateDocument;
use crate::xml::{Element, W_BR, W_P, W_P_PR, W_R_PR, W_T, W_TAB, W_TBL, W_TC, W_TR};

/// A mutable view of one `w:p` element.
#[derive(Debug)]
pub struct Paragraph<'a> {
    element: &'a mut Element,
}

impl<'a> Paragraph<'a> {
    fn new(element: &'a mut Element) -> Self {
        Self { element }
    }

    /// The paragraph's block text.
    pub fn text(&self) -> String {
        paragraph_text(self.element)
    }

    /// Number of `w:t` runs carrying the paragraph's text.
    pub fn run_count(&self) -> usize {
        let mut count = 0;
        count_text_runs(self.element, &mut count);
        count
    }

    /// Rewrites the block text with `rewrite`, keeping run formatting.
    ///
    /// When rewriting every run on its own produces the same text as rewriting
    /// the whole block, each run is updated in place. Otherwise a match spans
    /// run boundaries: the full result goes into the first non-empty run and the
    /// other runs are cleared.
    ///
    /// Line breaks and tabs in the result become `w:br` and `w:tab` elements in
    /// the run that carries them.
    ///
    /// Returns `false` and leaves the XML untouched when the text is unchanged.
    pub fn rewrite_with<F>(&mut self, rewrite: F) -> bool
    where
        F: Fn(&str) -> String,
    {
        let mut runs = Vec::new();
        collect_text_runs(&mut *self.element, &mut runs);
        if runs.is_empty() {
            return false;
        }

        let texts: Vec<String> = runs.iter().map(|run| run.own_text()).collect();
        let original = texts.concat();
        let replaced = rewrite(&original);
        if replaced == original {
            return false;
        }

        let per_run: Vec<String> = texts.iter().map(|text| rewrite(text)).collect();
        if per_run.concat() == replaced {
            for ((run, before), after) in runs.iter_mut().zip(&texts).zip(&per_run) {
                if before != after {
                    run.set_own_text(after);
                }
            }
        } else {
            let target = texts.iter().position(|text| !text.is_empty()).unwrap_or(0);
            for (index, run) in runs.iter_mut().enumerate() {
                if index == target {
                    run.set_own_text(&replaced);
                } else if !texts[index].is_empty() {
                    run.set_own_text("");
                }
            }
        }
        drop(runs);
        if replaced.contains(['\n', '\r', '\t']) {
            self.element.expand_breaks();
        }
        true
    }
}

/// A mutable view of one `w:tbl` element.
#[derive(Debug)]
pub struct Table<'a> {
    pub rows: Vec<Row<'a>>,
}

impl<'a> Table<'a> {
    fn new(element: &'a mut Element) -> Self {
        let rows = element
            .child_elements_mut()
            .filter(|child| child.is(W_TR))
            .map(Row::new)
            .collect();
        Self { rows }
    }
}

#[derive(Debug)]
pub struct Row<'a> {
    pub cells: Vec<Cell<'a>>,
}

impl<'a> Row<'a> {
    fn new(element: &'a mut Element) -> Self {
        let cells = element
            .child_elements_mut()
            .filter(|child| child.is(W_TC))
            .map(Cell::new)
            .collect();
        Self { cells }
    }
}

/// A table cell: its own paragraphs plus any tables nested inside it.
#[derive(Debug)]
pub struct Cell<'a> {
    pub paragraphs: Vec<Paragraph<'a>>,
    pub tables: Vec<Table<'a>>,
}

impl<'a> Cell<'a> {
    fn new(element: &'a mut Element) -> Self {
        let (paragraphs, tables) = split_blocks(element);
        Self { paragraphs, tables }
    }
}

/// Top-level body content: paragraphs and tables in document order.
#[derive(Debug, Default)]
pub struct Body<'a> {
    pub paragraphs: Vec<Paragraph<'a>>,
    pub tables: Vec<Table<'a>>,
}

fn split_blocks(element: &mut Element) -> (Vec<Paragraph<'_>>, Vec<Table<'_>>) {
    let mut paragraphs = Vec::new();
    let mut tables = Vec::new();
    for child in element.child_elements_mut() {
        if child.is(W_P) {
            paragraphs.push(Paragraph::new(child));
        } else if child.is(W_TBL) {
            tables.push(Table::new(child));
        }
    }
    (paragraphs, tables)
}

/// Where a text block sits in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockLocation {
    /// Top-level body paragraph.
    Paragraph { index: usize },
    /// Paragraph inside a table cell. Tables are numbered in document order,
    /// nested tables included.
    Cell {
        table: usize,
        row: usize,
        cell: usize,
        paragraph: usize,
    },
}

impl fmt::Display for BlockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paragraph { index } => write!(f, "paragraph {index}"),
            Self::Cell {
                table,
                row,
                cell,
                paragraph,
            } => write!(f, "table {table} row {row} cell {cell} paragraph {paragraph}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockText {
    pub location: BlockLocation,
    pub text: String,
}

impl TemplateDocument {
    /// Mutable views of the top-level paragraphs and tables.
    pub fn body_blocks_mut(&mut self) -> Body<'_> {
        match self.body_mut() {
            Some(body) => {
                let (paragraphs, tables) = split_blocks(body);
                Body { paragraphs, tables }
            }
            None => Body::default(),
        }
    }

    pub fn paragraphs_mut(&mut self) -> Vec<Paragraph<'_>> {
        self.body_blocks_mut().paragraphs
    }

    pub fn tables_mut(&mut self) -> Vec<Table<'_>> {
        self.body_blocks_mut().tables
    }

    /// Every paragraph and cell paragraph with its block text, in document order.
    pub fn block_texts(&self) -> Vec<BlockText> {
        let mut blocks = Vec::new();
        let Some(body) = self.body() else {
            return blocks;
        };
        let mut paragraph_index = 0;
        let mut table_counter = 0;
        for child in body.child_elements() {
            if child.is(W_P) {
                blocks.push(BlockText {
                    location: BlockLocation::Paragraph {
                        index: paragraph_index,
                    },
                    text: paragraph_text(child),
                });
                paragraph_index += 1;
            } else if child.is(W_TBL) {
                collect_table_texts(child, &mut table_counter, &mut blocks);
            }
        }
        blocks
    }
}

fn collect_table_texts(table: &Element, counter: &mut usize, blocks: &mut Vec<BlockText>) {
    let table_index = *counter;
    *counter += 1;
    for (row_index, row) in table.child_elements().filter(|e| e.is(W_TR)).enumerate() {
        for (cell_index, cell) in row.child_elements().filter(|e| e.is(W_TC)).enumerate() {
            let mut paragraph_index = 0;
            for child in cell.child_elements() {
                if child.is(W_P) {
                    blocks.push(BlockText {
                        location: BlockLocation::Cell {
                            table: table_index,
                            row: row_index,
                            cell: cell_index,
                            paragraph: paragraph_index,
                        },
                        text: paragraph_text(child),
                    });
                    paragraph_index += 1;
                } else if child.is(W_TBL) {
                    collect_table_texts(child, counter, blocks);
                }
            }
        }
    }
}

fn paragraph_text(paragraph: &Element) -> String {
    let mut text = String::new();
    push_run_text(paragraph, &mut text);
    text
}

fn push_run_text(element: &Element, out: &mut String) {
    for child in element.child_elements() {
        if child.is(W_T) {
            out.push_str(&child.own_text());
        } else if child.is(W_BR) {
            out.push('\n');
        } else if child.is(W_TAB) {
            out.push('\t');
        } else if !(child.is(W_P) || child.is(W_P_PR) || child.is(W_R_PR)) {
            push_run_text(child, out);
        }
    }
}

fn count_text_runs(element: &Element, count: &mut usize) {
    for child in element.child_elements() {
        if child.is(W_T) {
            *count += 1;
        } else if !child.is(W_P) {
            count_text_runs(child, count);
        }
    }
}

fn collect_text_runs<'e>(element: &'e mut Element, out: &mut Vec<&'e mut Element>) {
    for child in element.child_elements_mut() {
        if child.is(W_T) {
            out.push(child);
        } else if !child.is(W_P) {
            collect_text_runs(child, out);
        }
    }
}
