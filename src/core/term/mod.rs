//! Terminal emulation for DOS-era ANSI art and text.

pub mod parser;
pub mod state;
pub mod tokenizer;

pub use parser::{parse, Command, EraseMode, SgrOp};
pub use state::{Cursor, TerminalState};
pub use tokenizer::{decode, tokenize, Token};
