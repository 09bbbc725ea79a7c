use crate::domain::ports::CodeScanner;
use crate::utils::error::{ClientError, Result};
use std::io::Read;

/// Stand-in for the camera: takes code content from the command line, or
/// from stdin when none was given (e.g. piped from a decoder tool).
pub struct TextScanner {
    provided: Option<String>,
}

impl TextScanner {
    pub fn new(provided: Option<String>) -> Self {
        Self { provided }
    }
}

impl CodeScanner for TextScanner {
    fn scan(&self) -> Result<String> {
        if let Some(text) = &self.provided {
            return Ok(text.clone());
        }

        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        let trimmed = buffer.trim();
        if trimmed.is_empty() {
            return Err(ClientError::Validation {
                message: "no scan content provided".to_string(),
            });
        }
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provided_text_wins() {
        let scanner = TextScanner::new(Some(r#"{"doctor_id": 1}"#.to_string()));
        assert_eq!(scanner.scan().unwrap(), r#"{"doctor_id": 1}"#);
    }
}
