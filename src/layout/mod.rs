//! Layout Module
//!
//! Natural-height measurement for slides using [Taffy](https://github.com/DioxusLabs/taffy).
//! The transition engine only ever asks for one number per slide (its
//! `client_height`), so the bridge lays out a flat container of measured
//! leaves and reads their heights back.

mod taffy_bridge;
mod text_measure;

pub use taffy_bridge::{measure_slide_heights, MeasureItem};
pub use text_measure::{measure_text_height, string_width};
