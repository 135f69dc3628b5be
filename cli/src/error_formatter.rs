use ariadne::{Color, Label, Report, ReportKind, Source};
use friends::FriendsError;

/// Format a FriendsError with fancy terminal output using Ariadne
pub fn format_error(error: &FriendsError) -> String {
    match error {
        FriendsError::Parse(details) => {
            let mut output = Vec::new();

            // Ariadne counts characters, spans count bytes
            let text = details.source_text.as_ref();
            let start = char_offset(text, details.span.start);
            let end = char_offset(text, details.span.end)
                .max(start + 1)
                .min(text.chars().count())
                .max(start);

            let headline = details.message.lines().next().unwrap_or_default();
            let enhanced_message = format!(
                "Parse error: {} (at {}, line {}, column {})",
                headline, details.source_id, details.span.line, details.span.col
            );

            let mut report = Report::build(ReportKind::Error, &details.source_id, start)
                .with_message(enhanced_message)
                .with_label(
                    Label::new((&details.source_id, start..end))
                        .with_message("")
                        .with_color(Color::Red),
                );

            let expected: Vec<&str> = details.message.lines().skip(1).collect();
            if !expected.is_empty() {
                report = report.with_note(expected.join("\n"));
            }
            if let Some(suggestion) = &details.suggestion {
                report = report.with_help(suggestion);
            }

            match report
                .finish()
                .write((&details.source_id, Source::from(text)), &mut output)
            {
                Ok(_) => String::from_utf8_lossy(&output).to_string(),
                Err(_) => {
                    // Fallback to simple format
                    format!("{}", error)
                }
            }
        }
        FriendsError::Engine(msg) => format!("Engine error: {}", msg),
        FriendsError::ResourceLimitExceeded {
            limit_name,
            limit_value,
            actual_value,
            suggestion,
        } => {
            format!(
                "Resource limit exceeded: {}\n  Limit: {}\n  Actual: {}\n  {}",
                limit_name, limit_value, actual_value, suggestion
            )
        }
    }
}

fn char_offset(text: &str, byte_offset: usize) -> usize {
    let mut end = byte_offset.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use friends::ResourceLimits;

    #[test]
    fn test_char_offset_counts_characters() {
        let text = "かばんちゃん は";
        assert_eq!(char_offset(text, 0), 0);
        assert_eq!(char_offset(text, "かばん".len()), 3);
        assert_eq!(char_offset(text, text.len() + 10), 8);
    }

    #[test]
    fn test_parse_error_report_names_the_source() {
        let error = friends::parse("かばんちゃん は フレンズ", &ResourceLimits::default())
            .unwrap_err()
            .with_source_id("zoo.friends:3");
        let output = format_error(&error);

        assert!(output.contains("Parse error: the statement is not well-formed"));
        assert!(output.contains("zoo.friends:3"));
    }

    #[test]
    fn test_resource_limit_report() {
        let error = FriendsError::ResourceLimitExceeded {
            limit_name: "max_query_steps".to_string(),
            limit_value: "10".to_string(),
            actual_value: "11".to_string(),
            suggestion: "Simplify the query".to_string(),
        };
        let output = format_error(&error);

        assert!(output.starts_with("Resource limit exceeded: max_query_steps"));
        assert!(output.contains("Limit: 10"));
    }
}
