//! HTML in and out of sprig node trees.
//!
//! - [`serialize`] renders a subtree back to markup, pretty or minified.
//! - [`import`] builds a [`sprig_dom::DomTree`] from arbitrary (possibly
//!   malformed) HTML using `html5ever`.
//!
//! # Example
//!
//! ```
//! use sprig_dom::NodeId;
//! use sprig_html::{parse_fragment, render_minified};
//!
//! let tree = parse_fragment("<ul><li class=x>one<li>two</ul>");
//! assert_eq!(
//!     render_minified(&tree, NodeId::ROOT),
//!     r#"<ul><li class="x">one</li><li>two</li></ul>"#
//! );
//! ```

/// Tolerant HTML import via `html5ever`.
pub mod import;
/// Markup rendering.
pub mod serialize;

pub use import::{parse_fragment, parse_html};
pub use serialize::{RenderOptions, VOID_ELEMENTS, render, render_minified, render_pretty};
