//! Core decoding and terminal emulation.
//!
//! - **codepage**: CP862 byte -> char table
//! - **term**: tokenizer, escape parser and virtual terminal state
//!
//! # Data Flow
//!
//! ```text
//! bytes ──tokenizer──> Token::Char ───────────────┐
//!                  └─> Token::Escape ──parser──> Command
//!                                                 │
//!                                     TerminalState (rows of pixels)
//!                                                 │
//!                                            finalize()
//!                                                 ▼
//!                                             RgbImage
//! ```

pub mod codepage;
pub mod term;
