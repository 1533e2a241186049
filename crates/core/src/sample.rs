use serde::{Deserialize, Serialize};

/// One unit of code submitted for explanation.
///
/// Immutable once read: the shell constructs a sample from a file or from
/// interactive input and passes it through the pipeline unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSample {
    /// Filename or session label identifying the sample
    pub identifier: String,
    /// Full source text
    pub body: String,
    /// Error message observed when running the code, if any
    pub error_message: Option<String>,
}

impl CodeSample {
    pub fn new(identifier: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            body: body.into(),
            error_message: None,
        }
    }

    pub fn with_error(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }
}

/// A named file in the bundled error corpus.
#[derive(Debug, Clone, Copy)]
pub struct SampleFile {
    pub name: &'static str,
    pub body: &'static str,
}

/// The bundled corpus of intentionally broken Python samples.
///
/// One file per canonical error category: syntax malformation, undefined
/// name, type mismatch, out-of-range index, and a logic error that produces
/// wrong-but-valid output. The shell writes these to disk on demand; it
/// never overwrites a file that already exists.
pub fn sample_files() -> &'static [SampleFile] {
    SAMPLE_FILES
}

const SAMPLE_FILES: &[SampleFile] = &[
    SampleFile {
        name: "syntax_error.py",
        body: r#"# Syntax error example
def greet(name):
    print("Hello, " + name)
    # Missing colon in if statement
    if name == "Alice"  # Missing colon here
        print("Special greeting!")"#,
    },
    SampleFile {
        name: "variable_error.py",
        body: r#"# Variable error example
def calculate_area():
    # Using undefined variables
    area = length * width  # length and width are not defined
    return area

result = calculate_area()
print(result)"#,
    },
    SampleFile {
        name: "type_error.py",
        body: r#"# Type error example
def add_numbers(a, b):
    return a + b

# Trying to add string and number
result = add_numbers("5", 7)
print(result)"#,
    },
    SampleFile {
        name: "index_error.py",
        body: r#"# Index error example
numbers = [1, 2, 3, 4, 5]

# Trying to access non-existent index
for i in range(10):
    print(numbers[i])"#,
    },
    SampleFile {
        name: "logic_error.py",
        body: r#"# Logic error example
def find_maximum(numbers):
    max_num = 0  # Logic error: what if all numbers are negative?
    for num in numbers:
        if num > max_num:
            max_num = num
    return max_num

# Testing with negative numbers list
negative_numbers = [-5, -2, -8, -1]
result = find_maximum(negative_numbers)
print(f"Maximum: {result}")  # Will incorrectly return 0"#,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corpus_has_five_categories() {
        let names: Vec<&str> = sample_files().iter().map(|s| s.name).collect();
        assert_eq!(names.len(), 5);
        assert!(names.contains(&"syntax_error.py"));
        assert!(names.contains(&"variable_error.py"));
        assert!(names.contains(&"type_error.py"));
        assert!(names.contains(&"index_error.py"));
        assert!(names.contains(&"logic_error.py"));
    }

    #[test]
    fn test_corpus_names_are_unique() {
        let mut names: Vec<&str> = sample_files().iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), sample_files().len());
    }

    #[test]
    fn test_corpus_bodies_are_non_empty_and_trimmed() {
        for sample in sample_files() {
            assert!(!sample.body.trim().is_empty(), "{} is empty", sample.name);
            assert_eq!(sample.body, sample.body.trim(), "{} not trimmed", sample.name);
        }
    }

    #[test]
    fn test_sample_builder() {
        let sample = CodeSample::new("script.py", "print(x)").with_error("NameError: name 'x' is not defined");
        assert_eq!(sample.identifier, "script.py");
        assert_eq!(sample.body, "print(x)");
        assert_eq!(
            sample.error_message.as_deref(),
            Some("NameError: name 'x' is not defined")
        );
    }
}
