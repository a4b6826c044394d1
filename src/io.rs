pub mod dictionary_file;
pub mod write_to_csv;
