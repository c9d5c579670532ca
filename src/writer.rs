//! The presentation writer contract and a recording implementation.
//!
//! The layout engine only ever talks to a [`PresentationWriter`]; turning draw commands
//! into an actual file (and naming or saving it) is the writer's business.

use serde::{Deserialize, Serialize};

use crate::errors::{DeckError, Result};
use crate::models::draw::{CellStyled, Frame, MappedStyle, PageHandle};

/// Sink for the draw commands emitted by the layout engine, in order.
pub trait PresentationWriter {
    /// Starts a new physical page with the given background (6-hex, no `#`).
    fn create_page(&mut self, background_color: &str) -> PageHandle;

    /// Places a text box.
    fn place_text(&mut self, page: PageHandle, text: &str, frame: Frame, style: &MappedStyle);

    /// Places a table whose first row is the header row.
    fn place_table(&mut self, page: PageHandle, rows: &[Vec<CellStyled>], x: f64, y: f64, width: f64);
}

/// One recorded writer call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DrawCommand {
    #[serde(rename_all = "camelCase")]
    CreatePage {
        page: PageHandle,
        background_color: String,
    },
    PlaceText {
        page: PageHandle,
        text: String,
        #[serde(flatten)]
        frame: Frame,
        style: MappedStyle,
    },
    PlaceTable {
        page: PageHandle,
        rows: Vec<Vec<CellStyled>>,
        x: f64,
        y: f64,
        width: f64,
    },
}

/// A writer that keeps every command in memory, in call order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingWriter {
    commands: Vec<DrawCommand>,
    page_count: usize,
}

impl RecordingWriter {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    /// Serializes the recorded commands as a pretty-printed JSON array.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.commands).map_err(DeckError::Serialization)
    }
}

impl PresentationWriter for RecordingWriter {
    fn create_page(&mut self, background_color: &str) -> PageHandle {
        let page = PageHandle(self.page_count);
        self.page_count += 1;
        self.commands.push(DrawCommand::CreatePage {
            page,
            background_color: background_color.to_string(),
        });
        page
    }

    fn place_text(&mut self, page: PageHandle, text: &str, frame: Frame, style: &MappedStyle) {
        self.commands.push(DrawCommand::PlaceText {
            page,
            text: text.to_string(),
            frame,
            style: style.clone(),
        });
    }

    fn place_table(&mut self, page: PageHandle, rows: &[Vec<CellStyled>], x: f64, y: f64, width: f64) {
        self.commands.push(DrawCommand::PlaceTable {
            page,
            rows: rows.to_vec(),
            x,
            y,
            width,
        });
    }
}
