//! # splitwiser-core: Bill Splitting & Balance Engine
//!
//! This crate is the **heart** of Splitwiser. It splits bills item by item,
//! rolls bills and settlements up into group balances, and reduces those
//! balances to a short list of payments. Everything is a pure function.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Splitwiser Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              Clients (web, CLI)                                 │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ RPC / JSON                             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │   Service layer (auth, storage, group membership)               │   │
//! │  │   loads bills + settlements, calls the engine                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ splitwiser-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐    ┌───────────┐    ┌───────────┐              │   │
//! │  │   │   split   │ ─► │ balances  │ ─► │ simplify  │              │   │
//! │  │   │ per bill  │    │ per group │    │ DebtEdges │              │   │
//! │  │   └───────────┘    └───────────┘    └───────────┘              │   │
//! │  │                                                                 │   │
//! │  │   types · amount · error · validation · title · config          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records in and out (Bill, Item, Settlement, BillSplit, ...)
//! - [`split`] - Per-bill proportional split calculator
//! - [`balances`] - Cross-bill balance aggregator
//! - [`simplify`] - Greedy debt simplifier
//! - [`amount`] - Tolerances and formatting for f64 amounts
//! - [`validation`] - Record rules for callers to run before persisting
//! - [`title`] - Generated bill titles
//! - [`config`] - Engine settings
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, no state between calls
//! 2. **No I/O**: storage, network and env access are FORBIDDEN here
//! 3. **Explicit Errors**: typed errors, never panics on bad input
//! 4. **Thread Safe**: no shared mutable state, call from anywhere
//!
//! ## Example Usage
//!
//! ```rust
//! use splitwiser_core::{calculate_group_balances, Bill, Settlement};
//!
//! let dinner = Bill {
//!     title: None,
//!     items: vec![],
//!     total: 100.0,
//!     subtotal: 100.0,
//!     participants: vec!["Alice".to_string(), "Bob".to_string()],
//!     payer: Some("Alice".to_string()),
//! };
//! let payback = Settlement::record("group-1", "Bob", "Alice", 30.0, None).unwrap();
//!
//! let group = calculate_group_balances(&[dinner], &[payback]).unwrap();
//! assert_eq!(group.debts[0].to_string(), "Bob owes Alice $20.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod amount;
pub mod balances;
pub mod config;
pub mod error;
pub mod simplify;
pub mod split;
pub mod title;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use splitwiser_core::calculate_split` instead of
// `use splitwiser_core::split::calculate_split`

pub use balances::{calculate_group_balances, calculate_group_balances_with};
pub use config::EngineConfig;
pub use error::{CoreError, CoreResult, ValidationError};
pub use simplify::{simplify, simplify_with, SimplifyStrategy};
pub use split::{calculate_split, split_bill};
pub use types::*;
