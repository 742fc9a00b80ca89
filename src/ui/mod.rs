pub mod tree;

pub use tree::{render_labels, render_tree};
