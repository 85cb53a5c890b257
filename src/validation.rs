//! Input validation for profile names, quest titles and CLI set specs

/// Profile name validation errors with helpful messages
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name cannot be empty")]
    Empty,

    #[error("Name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Name contains control characters")]
    ControlCharacters,
}

/// Errors from parsing an `<exercise>:<weight>x<reps>` set spec
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SetSpecError {
    #[error("expected <exercise>:<weight>x<reps>, got '{0}'")]
    Malformed(String),

    #[error("weight must be a non-negative number, got '{0}'")]
    InvalidWeight(String),

    #[error("reps must be a whole number, got '{0}'")]
    InvalidReps(String),
}

pub const MAX_PROFILE_NAME_CHARS: usize = 30;
pub const MAX_TITLE_CHARS: usize = 80;

/// Validate a profile name; returns the trimmed name.
pub fn validate_profile_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.chars().count() > MAX_PROFILE_NAME_CHARS {
        return Err(NameError::TooLong {
            max: MAX_PROFILE_NAME_CHARS,
        });
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(NameError::ControlCharacters);
    }
    Ok(trimmed.to_string())
}

/// Trim, strip control characters and cap length. `None` when nothing is left.
pub fn sanitize_title(input: &str) -> Option<String> {
    let cleaned: String = sanitize_text(input).chars().take(MAX_TITLE_CHARS).collect();
    let cleaned = cleaned.trim_end();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}

/// Trimmed free text with control characters stripped. Line breaks and tabs
/// become spaces so neighbouring words stay apart. No length cap.
pub fn sanitize_text(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            c if c.is_control() && c.is_whitespace() => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Weights must be finite and non-negative.
pub fn validate_weight(weight: f64) -> bool {
    weight.is_finite() && weight >= 0.0
}

/// One set parsed from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct SetSpec {
    pub exercise_id: String,
    pub weight: f64,
    pub reps: u32,
}

/// Parse `e4:60x8` (also accepts `e4:60.5X8`).
pub fn parse_set_spec(spec: &str) -> Result<SetSpec, SetSpecError> {
    let malformed = || SetSpecError::Malformed(spec.to_string());
    let (exercise, load) = spec.trim().split_once(':').ok_or_else(malformed)?;
    let (weight, reps) = load
        .split_once(|c| c == 'x' || c == 'X')
        .ok_or_else(malformed)?;
    if exercise.trim().is_empty() {
        return Err(malformed());
    }

    let weight: f64 = weight
        .trim()
        .parse()
        .map_err(|_| SetSpecError::InvalidWeight(weight.to_string()))?;
    if !validate_weight(weight) {
        return Err(SetSpecError::InvalidWeight(weight.to_string()));
    }
    let reps: u32 = reps
        .trim()
        .parse()
        .map_err(|_| SetSpecError::InvalidReps(reps.to_string()))?;

    Ok(SetSpec {
        exercise_id: exercise.trim().to_string(),
        weight,
        reps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_names() {
        assert_eq!(validate_profile_name("  Sung  "), Ok("Sung".to_string()));
        assert_eq!(validate_profile_name("   "), Err(NameError::Empty));
        assert_eq!(
            validate_profile_name(&"a".repeat(31)),
            Err(NameError::TooLong { max: 30 })
        );
        assert_eq!(
            validate_profile_name("bad\u{7}name"),
            Err(NameError::ControlCharacters)
        );
        // Unicode counts by character, not byte
        assert!(validate_profile_name(&"é".repeat(30)).is_ok());
    }

    #[test]
    fn test_sanitize_title() {
        assert_eq!(sanitize_title("  Read\n20 pages "), Some("Read 20 pages".to_string()));
        assert_eq!(sanitize_title("Lift\u{7}\theavy"), Some("Lift heavy".to_string()));
        assert_eq!(sanitize_title("\t\r\n"), None);
        assert_eq!(sanitize_title(&"x".repeat(200)).map(|t| t.len()), Some(MAX_TITLE_CHARS));
    }

    #[test]
    fn test_sanitize_text_keeps_length() {
        let long = format!("{}\r\nend", "word ".repeat(40));
        let cleaned = sanitize_text(&long);
        assert!(cleaned.len() > MAX_TITLE_CHARS);
        assert!(cleaned.ends_with("word   end"));
        assert_eq!(sanitize_text(" \u{1b}[0m "), "[0m");
    }

    #[test]
    fn test_parse_set_spec() {
        let spec = parse_set_spec("e4:60.5x8").unwrap();
        assert_eq!(spec.exercise_id, "e4");
        assert_eq!(spec.weight, 60.5);
        assert_eq!(spec.reps, 8);

        assert!(matches!(parse_set_spec("e4-60x8"), Err(SetSpecError::Malformed(_))));
        assert!(matches!(parse_set_spec(":60x8"), Err(SetSpecError::Malformed(_))));
        assert!(matches!(parse_set_spec("e4:-5x8"), Err(SetSpecError::InvalidWeight(_))));
        assert!(matches!(parse_set_spec("e4:5xten"), Err(SetSpecError::InvalidReps(_))));
    }
}
