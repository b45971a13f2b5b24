//! e3db-cli - command line client for the e3db encrypted record store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── register      # Create identity + profile
//! │   ├── info          # Client information
//! │   ├── ls            # Streamed record listing
//! │   ├── read / write / delete
//! │   ├── share         # Grant / revoke access
//! │   └── completions   # Shell completions
//! └── core/             # Core library components
//!     ├── identifier    # Email / ID resolution
//!     ├── profile       # Named credential profiles
//!     ├── query         # Filters and the paginated cursor
//!     ├── render        # Plain / JSON streaming output
//!     ├── share         # Access grants
//!     ├── client/       # Record-store client trait
//!     │   └── local     # file:// service implementation
//!     └── cipher        # age encryption
//! ```

pub mod cli;
pub mod core;
pub mod error;
