//! Destination for generated statements.

use crate::statement::Statement;

/// Append-only receiver of script statements.
///
/// Emission is infallible from the engine's point of view; sinks that do
/// I/O buffer statements and surface errors to their own caller.
pub trait ScriptSink {
    fn emit(&mut self, statement: Statement);
}

impl ScriptSink for Vec<Statement> {
    fn emit(&mut self, statement: Statement) {
        self.push(statement);
    }
}
