pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// JSON input for a command: `--input <file>` wins over piped stdin.
/// None means the command should fall back to its flags.
pub fn json_input<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => file::read_json(path).map(Some),
        None => stdin::read_stdin(),
    }
}
