pub mod designer;
pub mod generator;
pub mod tools;
pub mod training;
