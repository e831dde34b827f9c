//! Row projection and highlight computation consumed by the UI layer.

pub mod highlight;
pub mod view_model;
