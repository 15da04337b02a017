pub mod context;
pub mod document;
pub mod processed;
pub mod report;
pub mod template;
pub mod variable;
