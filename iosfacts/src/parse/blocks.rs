//! Line-scanning state machine that groups report lines into blocks.
//!
//! Reports such as `show interfaces` and `show ip vrf` are a sequence of
//! blocks: a start line followed by continuation lines. The segmenter is
//! driven one line at a time and moves between two states:
//!
//! ```text
//!                 Start                      Start (emit block)
//! ┌──────────────┐─────────►┌─────────┐◄───────────┐
//! │ OutsideBlock │          │ InBlock ├────────────┘
//! └──────┬───────┘          └────┬────┘
//!        │ Continuation          │ Continuation: extend
//!        ▼                       │ end of report: emit block
//!   orphan line error            ▼
//! ```

use std::mem;

use super::{Line, ReportKind};
use crate::error::ParseError;

/// Classification of a line by a report's position predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opens a new block.
    Start,
    /// Belongs to the currently open block.
    Continuation,
    /// Carries nothing (blank line).
    Skip,
}

/// A contiguous group of lines: one start line plus its continuations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block<'a> {
    lines: Vec<Line<'a>>,
}

impl<'a> Block<'a> {
    fn open(first: Line<'a>) -> Self {
        Self { lines: vec![first] }
    }

    /// The start line of the block.
    pub fn first(&self) -> &Line<'a> {
        &self.lines[0]
    }

    /// All lines of the block, start line included.
    pub fn lines(&self) -> &[Line<'a>] {
        &self.lines
    }
}

enum State<'a> {
    OutsideBlock,
    InBlock(Block<'a>),
}

/// Incremental block segmenter.
pub struct BlockSegmenter<'a, F> {
    report: ReportKind,
    classify: F,
    state: State<'a>,
}

impl<'a, F> BlockSegmenter<'a, F>
where
    F: Fn(&Line<'a>) -> LineKind,
{
    /// Create a segmenter using `classify` as the position predicate.
    pub fn new(report: ReportKind, classify: F) -> Self {
        Self {
            report,
            classify,
            state: State::OutsideBlock,
        }
    }

    /// Feed the next line, returning a block when this line completes one.
    pub fn feed(&mut self, line: Line<'a>) -> Result<Option<Block<'a>>, ParseError> {
        match (self.classify)(&line) {
            LineKind::Skip => Ok(None),
            LineKind::Start => {
                let previous = mem::replace(&mut self.state, State::InBlock(Block::open(line)));
                Ok(match previous {
                    State::InBlock(block) => Some(block),
                    State::OutsideBlock => None,
                })
            }
            LineKind::Continuation => match &mut self.state {
                State::InBlock(block) => {
                    block.lines.push(line);
                    Ok(None)
                }
                State::OutsideBlock => Err(ParseError::MalformedBlock {
                    report: self.report,
                    line: line.number,
                    reason: "continuation line outside of any block".to_string(),
                }),
            },
        }
    }

    /// End of report: emit the open block, if any.
    pub fn finish(self) -> Option<Block<'a>> {
        match self.state {
            State::InBlock(block) => Some(block),
            State::OutsideBlock => None,
        }
    }

    /// Segment a whole sequence of lines.
    pub fn segment<I>(mut self, lines: I) -> Result<Vec<Block<'a>>, ParseError>
    where
        I: IntoIterator<Item = Line<'a>>,
    {
        let mut blocks = Vec::new();
        for line in lines {
            if let Some(block) = self.feed(line)? {
                blocks.push(block);
            }
        }
        blocks.extend(self.finish());
        Ok(blocks)
    }
}
