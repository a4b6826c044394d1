use std::fs;
use std::path::Path;

use crate::dictionary::Dictionary;
use crate::error::Result;

pub fn read_dictionary<P: AsRef<Path>>(file_path: P) -> Result<Dictionary> {
    let file_content = fs::read_to_string(file_path)?;
    Dictionary::from_json_str(&file_content)
}

pub fn write_dictionary<P: AsRef<Path>>(file_path: P, dict: &Dictionary) -> Result<()> {
    fs::write(file_path, dict.to_json_string()?)?;
    Ok(())
}
