//! # docqa-guardrail
//!
//! Keyword safety screening applied on both sides of the answering flow:
//! inbound queries and outbound generated answers.
//!
//! The two sides use deliberately different matching rules. Queries are
//! screened with case-insensitive **substring** matching: a query can be
//! freely rephrased, so over-blocking is cheap. Generated answers are
//! screened with **whole-word** matching so that legitimate text containing
//! a blocked term inside an unrelated word ("killjoy") is not suppressed.
//! This asymmetry is part of the service contract and must not be collapsed
//! into a single rule.

pub mod keyword;

pub use keyword::{KeywordFilter, ScreeningMode};
