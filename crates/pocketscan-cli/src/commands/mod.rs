pub mod detect;
pub mod summarize;
