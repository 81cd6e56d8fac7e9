//! End-to-end tests for the skein workspace live in `tests/`.
