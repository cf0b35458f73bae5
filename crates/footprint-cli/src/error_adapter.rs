//! Rendering import problems with miette.
//!
//! A fatal [`FootprintError::Parse`] yields one report per diagnostic, at
//! error level. Paths skipped during an import that otherwise succeeded are
//! reported at warning level with the same snippets. Every other error is a
//! single report without source code.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, Severity, SourceCode, SourceSpan};

use footprint::FootprintError;
use footprint_parser::{Diagnostic, Span};

/// One problem, ready for a miette report handler.
#[derive(Debug)]
pub enum Report<'a> {
    /// A diagnostic pointing into the document text
    Document {
        diag: &'a Diagnostic,
        src: &'a str,
        severity: Severity,
    },
    /// An error that is not tied to a place in the document
    Failure(&'a FootprintError),
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Document { diag, .. } => f.write_str(diag.message()),
            Report::Failure(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for Report<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Report::Document { .. } => None,
            Report::Failure(err) => err.source(),
        }
    }
}

impl MietteDiagnostic for Report<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Report::Document { diag, .. } => {
                diag.code().map(|c| Box::new(c) as Box<dyn fmt::Display>)
            }
            Report::Failure(err) => Some(Box::new(failure_code(err))),
        }
    }

    fn severity(&self) -> Option<Severity> {
        match self {
            Report::Document { severity, .. } => Some(*severity),
            Report::Failure(_) => Some(Severity::Error),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self {
            Report::Document { diag, .. } => diag.help()?,
            Report::Failure(FootprintError::Config(_)) => {
                "check the [conflation] section of the configuration file"
            }
            Report::Failure(FootprintError::Dataset(_)) => {
                "every point of the dataset needs its own id"
            }
            Report::Failure(_) => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            Report::Document { src, .. } => Some(src as &dyn SourceCode),
            Report::Failure(_) => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let Report::Document { diag, .. } = self else {
            return None;
        };
        if diag.labels().is_empty() {
            return None;
        }

        Some(Box::new(diag.labels().iter().map(|label| {
            let message = Some(label.message().to_string());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

fn failure_code(err: &FootprintError) -> &'static str {
    match err {
        FootprintError::Io(_) => "footprint::io",
        FootprintError::Parse { .. } => "footprint::parse",
        FootprintError::Dataset(_) => "footprint::dataset",
        FootprintError::Config(_) => "footprint::config",
        FootprintError::Export(_) => "footprint::export",
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Reports for an import that failed.
pub fn fatal_reports(err: &FootprintError) -> Vec<Report<'_>> {
    match err {
        FootprintError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|diag| Report::Document {
                diag,
                src,
                severity: Severity::Error,
            })
            .collect(),
        _ => vec![Report::Failure(err)],
    }
}

/// Warning reports for the paths an import skipped.
pub fn skipped_reports<'a>(skipped: &'a [Diagnostic], src: &'a str) -> Vec<Report<'a>> {
    skipped
        .iter()
        .map(|diag| Report::Document {
            diag,
            src,
            severity: Severity::Warning,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use footprint::dataset::DatasetError;
    use footprint::identifier::ExistingId;
    use footprint_parser::error::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_each_fatal_diagnostic_is_reported() {
        let diags = vec![
            Diagnostic::error("document has no viewBox")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(0..5), "here")
                .with_help("add a viewBox"),
            Diagnostic::error("root element is `<html>`, expected `<svg>`").with_code(ErrorCode::E103),
        ];
        let err = FootprintError::new_parse_error(ParseError::from(diags), "<svg/> and more");

        let reports = fatal_reports(&err);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].to_string(), "document has no viewBox");
        assert_eq!(reports[0].severity(), Some(Severity::Error));
        assert_eq!(reports[0].code().map(|c| c.to_string()).as_deref(), Some("E101"));
        assert_eq!(reports[0].help().map(|h| h.to_string()).as_deref(), Some("add a viewBox"));
        assert!(reports[0].source_code().is_some());
        assert!(reports[1].labels().is_none());
    }

    #[test]
    fn test_other_errors_have_a_code_and_no_source() {
        let err = FootprintError::Config("epsilon must be positive".to_string());

        let reports = fatal_reports(&err);
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].to_string(), "Configuration error: epsilon must be positive");
        assert_eq!(
            reports[0].code().map(|c| c.to_string()).as_deref(),
            Some("footprint::config")
        );
        assert!(reports[0].source_code().is_none());
    }

    #[test]
    fn test_dataset_errors_carry_help() {
        let err = FootprintError::Dataset(DatasetError::DuplicateId(ExistingId::new(4)));

        let reports = fatal_reports(&err);
        assert_eq!(
            reports[0].code().map(|c| c.to_string()).as_deref(),
            Some("footprint::dataset")
        );
        assert!(reports[0].help().is_some());
    }

    #[test]
    fn test_skipped_paths_are_warnings() {
        let diag = Diagnostic::error("coordinate `1x` is not a number")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(12..14), "malformed number")
            .with_secondary_label(Span::new(0..20), "in this path");
        let skipped = [diag];

        let reports = skipped_reports(&skipped, "<path d=\"M0 0l1x 0\"/>");
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].severity(), Some(Severity::Warning));

        let labels: Vec<_> = reports[0].labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[0].offset(), 12);
    }
}
