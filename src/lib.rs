//! Warren - secrets scaffolding for multi-service monorepos.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── generate      # Regenerate and merge all secrets files
//! │   ├── sync          # Reconcile the user file with the service list
//! │   ├── remove        # Delete a service's footprint everywhere
//! │   └── map           # Print the per-service variable manifest
//! └── core/             # Core library components
//!     ├── project       # warren.json config + the Project orchestrator
//!     ├── generate      # Primitive secret generators (hex, base64, RSA, DB)
//!     ├── naming        # kebab-case ↔ SCREAMING_SNAKE_CASE convention
//!     ├── model         # The shared SecretsFile shape
//!     ├── framework     # Framework file builder (preserve-on-regen)
//!     ├── user          # User file builder + additive structural sync
//!     ├── merge         # User-wins merge of the two source files
//!     ├── resolve       # API_KEY and secrets-array reference resolution
//!     ├── prune         # Deep deletion of a removed service's references
//!     ├── manifest      # service → [variable names] map
//!     └── store         # JSON persistence for the three files
//! ```
//!
//! # Features
//!
//! - Deterministic merging of a generated and a hand-edited secrets file
//! - Regeneration that preserves previously-issued secret material
//! - Full-mesh API key and URL grants between backend services
//! - Structural sync that never overwrites a user's values

pub mod cli;
pub mod core;
pub mod error;

pub use crate::core::project::Project;
pub use crate::error::{Error, Result};
