//! Output generation for normalized feeds.
//!
//! # Submodules
//!
//! - [`json`]: Writes a `FeedPage` to a JSON file for API consumption
//! - [`markdown`]: Renders a `FeedPage` as Markdown article cards
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2024-07-28/
//!     ├── general.json
//!     └── technology.json
//!
//! markdown_output_dir/
//! ├── 2024-07-28_general.md
//! └── 2024-07-28_technology.md
//! ```

pub mod json;
pub mod markdown;
