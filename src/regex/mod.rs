pub mod compiled;
pub mod error;
pub mod matcher;
pub mod parser;
pub mod token;

pub use compiled::CompiledPattern;
pub use error::CompileError;
pub use token::Token;
