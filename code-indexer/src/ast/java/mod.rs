mod extract;
mod lang;
mod provider;

pub use provider::JavaAst;
