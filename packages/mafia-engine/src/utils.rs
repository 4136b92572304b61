pub mod test_setup;
pub mod text;
