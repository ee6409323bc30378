//! User-facing arith diagnostics.
//!
//! The diagnostics module demarshalls [libarith diagnostics][libarith::diagnostics] into a form
//! pleasant for standard error.

use libarith::diagnostics::{AssociatedDiagnostic, Diagnostic, DiagnosticKind};
use libarith::{InputFile, LineDiagnostic};

use annotate_snippets::{
    display_list::{DisplayList, FormatOptions},
    snippet::{Annotation, AnnotationType, Slice, Snippet, SourceAnnotation},
};

fn sanitize_source_for_diagnostics(source: &str) -> String {
    let source = source.to_owned();
    source + " " // we might emit an end-of-input diagnostic, so add extra space.
}

/// Renders diagnostics for a single expression, such as one passed to `--parse-only`.
pub fn emit_expression_diagnostics(
    source: &str,
    diagnostics: &[Diagnostic],
    color: bool,
) -> String {
    let source = sanitize_source_for_diagnostics(source);
    let rendered: Vec<_> = diagnostics
        .iter()
        .map(|diagnostic| emit_diagnostic(None, &source, 1, diagnostic, color))
        .collect();
    rendered.join("\n")
}

/// Renders diagnostics raised while grading. `origin` names the file each input was read from.
pub fn emit_line_diagnostics<'a, F>(
    origin: F,
    diagnostics: &[LineDiagnostic],
    color: bool,
) -> String
where
    F: Fn(InputFile) -> &'a str,
{
    let rendered: Vec<_> = diagnostics
        .iter()
        .map(|line_diagnostic| {
            emit_diagnostic(
                Some(origin(line_diagnostic.file)),
                &sanitize_source_for_diagnostics(&line_diagnostic.line),
                line_diagnostic.line_number,
                &line_diagnostic.diagnostic,
                color,
            )
        })
        .collect();
    rendered.join("\n")
}

fn emit_diagnostic(
    origin: Option<&str>,
    source: &str,
    line_start: usize,
    diagnostic: &Diagnostic,
    color: bool,
) -> String {
    let main_annotation_type = convert_diagnostic_kind(&diagnostic.kind);
    let mut annotations = Vec::with_capacity(diagnostic.associated_diagnostics.len() + 1);
    // The first annotation always points to the text that generated this diagnostic.
    let label = diagnostic.msg.clone().unwrap_or_default();
    annotations.push(SourceAnnotation {
        label: &label,
        annotation_type: main_annotation_type,
        range: diagnostic.span.into(),
    });
    for associated_diagnostic in diagnostic.associated_diagnostics.iter() {
        annotations.push(SourceAnnotation {
            label: &associated_diagnostic.msg,
            annotation_type: convert_diagnostic_kind(&associated_diagnostic.kind),
            range: associated_diagnostic.span.into(),
        });
    }
    let footer = diagnostic
        .unspanned_associated_diagnostics
        .iter()
        .map(convert_associated_diagnostic)
        .collect();

    let snippet = Snippet {
        title: Some(Annotation {
            label: Some(&diagnostic.title),
            id: diagnostic.code,
            annotation_type: main_annotation_type,
        }),
        footer,
        slices: vec![Slice {
            source,
            line_start,
            origin,
            fold: true,
            annotations,
        }],
        opt: FormatOptions {
            color,
            ..Default::default()
        },
    };
    format!("{}\n", DisplayList::from(snippet))
}

/// Converts an arith AssociatedDiagnostic to an Annotation.
fn convert_associated_diagnostic(diagnostic: &AssociatedDiagnostic) -> Annotation {
    Annotation {
        label: Some(&diagnostic.msg),
        id: None,
        annotation_type: convert_diagnostic_kind(&diagnostic.kind),
    }
}

/// Converts an arith DiagnosticKind to an AnnotationType.
fn convert_diagnostic_kind(diagnostic_kind: &DiagnosticKind) -> AnnotationType {
    match diagnostic_kind {
        DiagnosticKind::Error => AnnotationType::Error,
        DiagnosticKind::Warning => AnnotationType::Warning,
        DiagnosticKind::Note => AnnotationType::Note,
        DiagnosticKind::Help => AnnotationType::Help,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libarith::grade;

    #[test]
    fn renders_line_diagnostics() {
        let grading = grade("1. 1 + abc =", "");
        let rendered = emit_line_diagnostics(|_| "Exercises.txt", &grading.diagnostics, false);
        assert!(rendered.contains("error[P0001]"), "{}", rendered);
        assert!(rendered.contains("Exercises.txt:1"), "{}", rendered);
        assert!(rendered.contains("^^^ not a number"), "{}", rendered);
    }

    #[test]
    fn renders_nothing_without_diagnostics() {
        assert_eq!(emit_expression_diagnostics("1 + 2", &[], false), "");
    }
}
