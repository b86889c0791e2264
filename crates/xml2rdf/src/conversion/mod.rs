pub mod engine;
pub mod options;
pub mod policy;
pub mod xml_reader;
