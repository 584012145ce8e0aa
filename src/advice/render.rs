// ABOUTME: Advice text renderer classifying each response line as heading, bullet or paragraph
// ABOUTME: Pure single-pass parser; text without markers degrades to plain paragraphs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

const HEADING_MARKER: &str = "### ";
const BULLET_MARKER: &str = "- ";

/// One display unit of rendered advice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Block {
    /// Section heading, marker removed
    Heading(String),
    /// List item, marker removed
    BulletItem(String),
    /// Any other line verbatim; may be empty
    Paragraph(String),
}

impl Block {
    /// Classify a single line
    #[must_use]
    pub fn classify(line: &str) -> Self {
        if let Some(text) = line.strip_prefix(HEADING_MARKER) {
            Self::Heading(text.to_owned())
        } else if let Some(text) = line.strip_prefix(BULLET_MARKER) {
            Self::BulletItem(text.to_owned())
        } else {
            Self::Paragraph(line.to_owned())
        }
    }

    /// Text content without the marker
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Heading(text) | Self::BulletItem(text) | Self::Paragraph(text) => text,
        }
    }
}

/// Split `text` into lines and classify each independently
///
/// Line terminators are `\n` or `\r\n`; a single trailing terminator ends the
/// last line rather than starting an empty one. Every other line, blank ones
/// included, yields exactly one block in input order.
#[must_use]
pub fn render_blocks(text: &str) -> Vec<Block> {
    text.lines().map(Block::classify).collect()
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Heading(text) => write!(f, "\n== {text} =="),
            Self::BulletItem(text) => write!(f, "  • {text}"),
            Self::Paragraph(text) => f.write_str(text),
        }
    }
}
