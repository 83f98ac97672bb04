pub mod replay;
pub mod stdout;
pub mod validate;
