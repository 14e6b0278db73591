pub mod conversation;
pub mod diagram;
pub mod errors;
pub mod prompt;
pub mod providers;
pub mod repl;
pub mod session;
pub mod system_prompt;
pub mod turn;
