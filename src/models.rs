pub mod champion;
pub mod draft_format;
pub mod profile;
pub mod recommendation;
