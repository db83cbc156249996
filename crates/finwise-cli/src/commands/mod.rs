pub mod budget;
pub mod mortgage;
pub mod plan;
pub mod retirement;
pub mod savings;
pub mod tax;

use serde::de::DeserializeOwned;

use crate::input;

/// Input from `--input <file.json>` when given, otherwise from piped stdin.
pub fn read_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Some(input::file::read_json(path)?)),
        None => input::stdin::read_stdin(),
    }
}
