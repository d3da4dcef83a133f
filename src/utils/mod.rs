//! Small helpers shared by the console output code

pub mod string;
