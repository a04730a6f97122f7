//! Prompt templates sent to the text provider.

/// Language assumed when a review request does not name one.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Prompt used by `/api/gemini-test` when the caller sends none.
pub const DEFAULT_TEST_PROMPT: &str = "Hello! Please respond with a brief greeting.";

/// Build the structured review prompt. `language` and `code` are embedded
/// verbatim; the output is free text and is relayed unparsed.
pub fn code_review_prompt(language: &str, code: &str) -> String {
    format!(
        r#"You are an expert {language} code reviewer. Review the following {language} code and provide detailed, constructive feedback.

Structure your review with these sections:

1. **Overall Assessment**: A short summary of what the code does and its general quality.
2. **Bugs and Errors**: Logic errors, edge cases, or runtime failures.
3. **Security Concerns**: Vulnerabilities such as injection, unsafe input handling, or leaked secrets.
4. **Performance**: Inefficient algorithms, unnecessary work, or resource leaks.
5. **Code Quality and Best Practices**: Readability, naming, structure, and idiomatic {language} usage.
6. **Suggested Improvements**: Concrete changes, with corrected code snippets where helpful.

If a section has no findings, say so briefly.

Code to review:
```{language}
{code}
```"#
    )
}
