//! Built-in keyword and pattern tables for rule-based scoring
//!
//! All phrases are lower case; reports are lower-cased before matching.

/// Phrases that strongly indicate a passing test
pub const STRONG_SUCCESS_KEYWORDS: &[&str] = &[
    "test passed",
    "test successful",
    "all tests passed",
    "success",
    "passed successfully",
    "test completed successfully",
    "all steps completed",
    "verification passed",
    "assertion passed",
    "expected result achieved",
    "test case passed",
];

/// Phrases that strongly indicate a failing test
pub const STRONG_FAILURE_KEYWORDS: &[&str] = &[
    "test failed",
    "test failure",
    "failed",
    "error occurred",
    "assertion failed",
    "test case failed",
    "unable to",
    "could not",
    "timeout",
    "exception",
    "unexpected result",
    "verification failed",
    "test unsuccessful",
];

/// Phrases that weakly indicate a passing test
pub const MODERATE_SUCCESS_KEYWORDS: &[&str] = &[
    "completed",
    "verified",
    "confirmed",
    "validated",
    "working as expected",
    "behaves correctly",
    "functioning properly",
    "meets requirements",
];

/// Phrases that weakly indicate a failing test
pub const MODERATE_FAILURE_KEYWORDS: &[&str] = &[
    "issue",
    "problem",
    "incorrect",
    "unexpected",
    "not working",
    "broken",
    "does not work",
    "missing",
    "invalid",
    "not found",
    "not available",
];

/// Structural markers of a passing report (checkmarks, completion statements)
pub const SUCCESS_PATTERNS: &[&str] = &[
    r"✓|✔|passed|success",
    r"all.*steps.*completed",
    r"test.*completed.*successfully",
    r"expected.*result.*achieved",
];

/// Structural markers of a failing report (crosses, error statements)
pub const FAILURE_PATTERNS: &[&str] = &[
    r"✗|✘|failed|failure|error",
    r"step.*failed",
    r"unable.*to.*complete",
    r"unexpected.*result",
    r"assertion.*failed",
];
