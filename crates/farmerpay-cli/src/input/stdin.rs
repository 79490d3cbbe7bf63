use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Typed input piped on stdin, as JSON or YAML.
///
/// `None` when stdin is a terminal or carries only whitespace, so commands
/// fall back to their flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(raw: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    log::debug!("read {} bytes of input from stdin", trimmed.len());

    // JSON documents start with a brace; anything else is tried as YAML.
    if trimmed.starts_with('{') {
        Ok(Some(serde_json::from_str(trimmed)?))
    } else {
        Ok(Some(serde_yaml::from_str(trimmed)?))
    }
}
