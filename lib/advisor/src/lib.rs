//! # chemrank Advisor
//!
//! The recommendation flow on top of the ranking engine: rank the catalog
//! for a customer's need, pass the best matches to an analysis collaborator,
//! and return a summary, safety notes and a follow-up alongside the products.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Query     │────>│  Catalog    │────>│  Analyzer   │
//! │             │     │  (ranking)  │     │ (LLM / none)│
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │ Recommend-  │
//!                                         │   ation     │
//!                                         └─────────────┘
//! ```
//!
//! Analyzer failures are absorbed: the customer gets fixed Turkish fallback
//! text, never an error.

pub mod advisor;
pub mod analysis;
pub mod openai;

pub use advisor::{Advisor, AdvisorError, Recommendation, DEFAULT_TOP_K};
pub use analysis::{parse_analysis, Analysis, AnalysisError, Analyzer, FallbackAnalyzer};
pub use openai::OpenAiAnalyzer;
