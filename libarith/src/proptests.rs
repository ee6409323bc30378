//! Property-based tests for generation, the number codec and canonical forms.
