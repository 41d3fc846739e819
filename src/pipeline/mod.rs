//! Pipeline stages around the assignment engine.
//!
//! Each submodule implements exactly one transformation step and is
//! independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ figures ──▶ format ──▶ [assign] ──▶ technical ──▶ encode
//! (JSON)    (probe/filter) (bullets)  (engine)    (suggest)    (data URIs)
//! ```
//!
//! 1. [`input`]     — load and validate the per-request [`input::DeckRequest`]
//! 2. [`figures`]   — decode payloads, settle dimensions, drop decorative images
//! 3. [`format`]    — one `• point` per line in slide bodies
//! 4. [`parse`]     — alternative slide source: the generator's `SLIDE_n:` text
//! 5. [`technical`] — diagram suggestions for slides left without a figure
//! 6. [`encode`]    — mime sniffing and `data:` URIs for the renderer

pub mod encode;
pub mod figures;
pub mod format;
pub mod input;
pub mod parse;
pub mod technical;
