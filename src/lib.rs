#![doc(html_root_url = "https://docs.rs/sapling-dom/0.1.0")]
#![warn(clippy::pedantic)]

pub use serde_json;

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod component;
pub mod create;
pub mod diff;
pub mod host;
#[cfg(feature = "memory")]
pub mod memory;
pub mod node;
pub mod state;
