//! Presentation of risk assessments. The engine returns structured data only.

pub mod markdown;
pub mod json;
pub mod html;

pub use markdown::MarkdownFormatter;
pub use json::JsonFormatter;
pub use html::HtmlFormatter;

/// Output format selected by `?format=` or the CLI `--format` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Html,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            other => Err(format!("Unknown format '{}' (expected json, markdown or html)", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!("HTML".parse::<OutputFormat>(), Ok(OutputFormat::Html));
        assert_eq!("md".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
