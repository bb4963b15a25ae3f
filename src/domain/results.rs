//! Result wrappers returned by collaborator services.
//!
//! A service call either produces a payload or an [`IssueLog`], never both.
//! The enum shape makes the "exactly one is meaningful" rule impossible to break.

use crate::domain::issues::IssueLog;

/// Outcome of a single-object service call.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultTO<T> {
    Success(T),
    Issues(IssueLog),
}

impl<T> ResultTO<T> {
    pub fn has_issues(&self) -> bool {
        matches!(self, ResultTO::Issues(_))
    }

    /// Returns the issue log, if the call was rejected.
    pub fn issue_log(&self) -> Option<&IssueLog> {
        match self {
            ResultTO::Success(_) => None,
            ResultTO::Issues(log) => Some(log),
        }
    }

    /// Converts into a std `Result` for `?`-style handling.
    pub fn into_result(self) -> Result<T, IssueLog> {
        match self {
            ResultTO::Success(value) => Ok(value),
            ResultTO::Issues(log) => Err(log),
        }
    }
}

/// Outcome of a list service call.
///
/// A successful listing also reports the page size the service applied and the
/// total number of matching records.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultListTO<T> {
    Listed {
        list: Vec<T>,
        page_size: u32,
        total_count: u64,
    },
    Issues(IssueLog),
}

impl<T> ResultListTO<T> {
    /// Wraps a complete, unpaged list.
    pub fn of(list: Vec<T>) -> Self {
        let len = list.len();
        ResultListTO::Listed {
            list,
            page_size: u32::try_from(len).unwrap_or(u32::MAX),
            total_count: len as u64,
        }
    }

    pub fn has_issues(&self) -> bool {
        matches!(self, ResultListTO::Issues(_))
    }

    pub fn issue_log(&self) -> Option<&IssueLog> {
        match self {
            ResultListTO::Listed { .. } => None,
            ResultListTO::Issues(log) => Some(log),
        }
    }

    /// Page size applied by the service; zero when rejected.
    pub fn page_size(&self) -> u32 {
        match self {
            ResultListTO::Listed { page_size, .. } => *page_size,
            ResultListTO::Issues(_) => 0,
        }
    }

    pub fn total_count(&self) -> u64 {
        match self {
            ResultListTO::Listed { total_count, .. } => *total_count,
            ResultListTO::Issues(_) => 0,
        }
    }

    /// Takes the listed items; a rejected call yields an empty list.
    pub fn into_list(self) -> Vec<T> {
        match self {
            ResultListTO::Listed { list, .. } => list,
            ResultListTO::Issues(_) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::issues::codes::create_transaction::AMOUNT_IS_MANDATORY;

    #[test]
    fn test_result_success() {
        let result = ResultTO::Success(5);
        assert!(!result.has_issues());
        assert!(result.issue_log().is_none());
        assert_eq!(result.into_result(), Ok(5));
    }

    #[test]
    fn test_result_issues() {
        let mut log = IssueLog::new();
        log.add(AMOUNT_IS_MANDATORY);

        let result: ResultTO<i32> = ResultTO::Issues(log.clone());
        assert!(result.has_issues());
        assert_eq!(result.issue_log(), Some(&log));
        assert_eq!(result.into_result(), Err(log));
    }

    #[test]
    fn test_list_of_reports_its_length() {
        let result = ResultListTO::of(vec!["a", "b", "c"]);
        assert_eq!(result.page_size(), 3);
        assert_eq!(result.total_count(), 3);
        assert_eq!(result.into_list(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_rejected_list_is_empty() {
        let result: ResultListTO<i32> = ResultListTO::Issues(IssueLog::new());
        assert!(result.has_issues());
        assert_eq!(result.page_size(), 0);
        assert!(result.into_list().is_empty());
    }
}
