//! Hugo and Obsidian markdown dialect conversion
//!
//! Converts the embedded markup that differs between a Hugo content tree and
//! an Obsidian vault: mermaid diagrams, alert callouts, cross-post links and
//! local image embeds. Conversion is best-effort text rewriting; fragments
//! that do not match a rule pass through unchanged, so conversion never fails.
//!
//! # Rule precedence
//!
//! Within one direction the rules run in a fixed order: block-level
//! constructs (diagrams, then callouts) before inline links before images.
//!
//! # Example
//!
//! ```
//! use mdbridge_convert::{Direction, convert};
//!
//! let hugo = r#"[here]({{< ref "intro.md" >}})"#;
//! assert_eq!(convert(hugo, Direction::HugoToObsidian), "[[intro|here]]");
//! ```

pub mod dialect;
pub mod rules;

pub use dialect::{Dialect, Direction, detect_dialect};
pub use rules::{hugo_to_obsidian, obsidian_to_hugo};

/// Convert `content` from the source dialect of `direction` to its target.
pub fn convert(content: &str, direction: Direction) -> String {
    match direction {
        Direction::HugoToObsidian => hugo_to_obsidian(content),
        Direction::ObsidianToHugo => obsidian_to_hugo(content),
    }
}
