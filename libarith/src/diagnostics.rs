//! Diagnostics describing problems in exercise and answer text.
//!
//! A [Diagnostic] points at a span of a single line of input and carries a stable code. Each
//! code has a long-form explanation registered by the module that raises it; see
//! [Diagnostic::all_codes_with_explanations].

use crate::common::Span;
use std::collections::HashMap;

/// The kind of a diagnostic.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub enum DiagnosticKind {
    /// Something that prevented a line from being used at all.
    Error,
    /// Something that was recovered from, but probably not intended.
    Warning,
    /// A generic annotation, useful for expanding on a primary diagnostic.
    Note,
    /// Instructions on how the input can be corrected.
    Help,
}

/// A secondary diagnostic associated with a primary `Diagnostic`.
#[derive(Clone, Debug)]
pub struct AssociatedDiagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub msg: String,
}

/// A diagnostic for a line of exercise or answer text.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
    pub title: String,
    pub code: Option<&'static str>,
    pub msg: Option<String>,
    pub associated_diagnostics: Vec<AssociatedDiagnostic>,
    pub unspanned_associated_diagnostics: Vec<AssociatedDiagnostic>,
}

impl Diagnostic {
    fn new<S, M>(kind: DiagnosticKind, span: S, title: M, code: &'static str) -> Self
    where
        S: Into<Span>,
        M: Into<String>,
    {
        Diagnostic {
            kind,
            span: span.into(),
            title: title.into(),
            code: Some(code),
            msg: None,
            associated_diagnostics: Vec::with_capacity(1),
            unspanned_associated_diagnostics: Vec::with_capacity(1),
        }
    }

    /// Creates an error diagnostic at a span.
    pub(crate) fn span_err<S, M>(span: S, title: M, code: &'static str) -> Self
    where
        S: Into<Span>,
        M: Into<String>,
    {
        Self::new(DiagnosticKind::Error, span, title, code)
    }

    /// Creates a warning diagnostic at a span.
    pub(crate) fn span_warn<S, M>(span: S, title: M, code: &'static str) -> Self
    where
        S: Into<Span>,
        M: Into<String>,
    {
        Self::new(DiagnosticKind::Warning, span, title, code)
    }

    /// Labels the primary span of the diagnostic.
    pub(crate) fn with_label<M: Into<String>>(mut self, label: M) -> Self {
        self.msg = Some(label.into());
        self
    }

    /// Adds a note to the diagnostic.
    pub(crate) fn with_note<M: Into<String>>(mut self, note: M) -> Self {
        self.unspanned_associated_diagnostics
            .push(AssociatedDiagnostic {
                kind: DiagnosticKind::Note,
                span: self.span,
                msg: note.into(),
            });
        self
    }

    /// Adds a help message to the diagnostic.
    pub(crate) fn with_help<M: Into<String>>(mut self, help: M) -> Self {
        self.unspanned_associated_diagnostics
            .push(AssociatedDiagnostic {
                kind: DiagnosticKind::Help,
                span: self.span,
                msg: help.into(),
            });
        self
    }

    /// Adds a note at a possibly different span of the same line.
    pub(crate) fn with_spanned_note<S, M>(mut self, span: S, note: M) -> Self
    where
        S: Into<Span>,
        M: Into<String>,
    {
        self.associated_diagnostics.push(AssociatedDiagnostic {
            kind: DiagnosticKind::Note,
            span: span.into(),
            msg: note.into(),
        });
        self
    }

    /// Moves every span of the diagnostic right by `offset` characters.
    pub(crate) fn shifted(mut self, offset: usize) -> Self {
        self.span = self.span.shift(offset);
        for associated in self
            .associated_diagnostics
            .iter_mut()
            .chain(self.unspanned_associated_diagnostics.iter_mut())
        {
            associated.span = associated.span.shift(offset);
        }
        self
    }

    /// Returns all diagnostic codes and their explanations.
    pub fn all_codes_with_explanations() -> HashMap<&'static str, &'static str> {
        let mut codes = HashMap::new();
        codes.extend(crate::parser::ParseErrors::codes_with_explanations());
        codes.extend(crate::grader::GradeErrors::codes_with_explanations());
        codes
    }
}

/// A diagnostic code with its long-form explanation.
pub(crate) trait DiagnosticRecord {
    const CODE: &'static str;
    const EXPLANATION: &'static str;
}

/// A collection of diagnostic codes raised by one module.
pub trait DiagnosticRegistry {
    fn codes_with_explanations() -> Vec<(&'static str, &'static str)>;
}

/// Declares diagnostic records, whose doc comments are their explanations, and a registry
/// listing them.
macro_rules! define_errors {
    ($registry:ident; $($(#[doc = $doc:expr])+ $code:ident: $error:ident)*) => {
        $(
            $(#[doc = $doc])+
            pub(crate) struct $error;

            impl crate::diagnostics::DiagnosticRecord for $error {
                const CODE: &'static str = stringify!($code);
                const EXPLANATION: &'static str = concat!($($doc, "\n"),+);
            }
        )*

        pub struct $registry;

        impl crate::diagnostics::DiagnosticRegistry for $registry {
            fn codes_with_explanations() -> Vec<(&'static str, &'static str)> {
                vec![$((
                    <$error as crate::diagnostics::DiagnosticRecord>::CODE,
                    <$error as crate::diagnostics::DiagnosticRecord>::EXPLANATION,
                )),*]
            }
        }
    };
}
