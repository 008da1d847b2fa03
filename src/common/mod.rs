//! Cross-cutting types shared by every stage of the pipeline: where source
//! text lives (`source`) and how a slice of it is referred to for
//! diagnostics (`span`).

pub mod source;
pub mod span;
