#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system responsible for emitting tile paint and clear commands.

use park_core::{CellCoord, Command, Tool};

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuilderInput {
    /// Tool chosen by the player on this frame, if any.
    pub selected_tool: Option<Tool>,
    /// Indicates whether the player requested that every tile be cleared.
    pub clear_all: bool,
    /// Grid cell clicked by the player on this frame.
    pub clicked_cell: Option<CellCoord>,
}

impl BuilderInput {
    /// Creates a new input descriptor with explicit field values.
    #[must_use]
    pub const fn new(
        selected_tool: Option<Tool>,
        clear_all: bool,
        clicked_cell: Option<CellCoord>,
    ) -> Self {
        Self {
            selected_tool,
            clear_all,
            clicked_cell,
        }
    }
}

/// Builder system that tracks the active tool and translates clicks into commands.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    tool: Tool,
}

impl Builder {
    /// Creates a new builder with the path tool selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { tool: Tool::Path }
    }

    /// Creates a builder starting with the provided tool.
    #[must_use]
    pub const fn with_tool(tool: Tool) -> Self {
        Self { tool }
    }

    /// Tool applied by the next click.
    #[must_use]
    pub const fn tool(&self) -> Tool {
        self.tool
    }

    /// Replaces the active tool.
    pub fn select_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    /// Consumes adapter-derived input to emit grid commands.
    ///
    /// A tool selection takes effect before a click on the same frame, and a
    /// clear-all request is emitted before the click's paint command.
    pub fn handle(&mut self, input: BuilderInput, out: &mut Vec<Command>) {
        if let Some(tool) = input.selected_tool {
            self.select_tool(tool);
        }

        if input.clear_all {
            out.push(Command::ClearAll);
        }

        if let Some(cell) = input.clicked_cell {
            out.push(Command::PaintTile {
                cell,
                tile: self.tool.tile(),
            });
        }
    }
}
