pub mod charset;
pub mod compile;
pub mod mapping;
pub mod names;
pub mod scanner;
pub mod settings;
pub mod translit;
pub mod unicode;

pub use compile::{
    compile, CompileError, CompileOptions, CompileOutput, CompileWarning, MissingMapPolicy,
};
pub use mapping::{Direction, Mapping};
