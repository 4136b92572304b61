pub mod elimination;
pub mod prompt;
pub mod win;
