pub mod extract;
pub mod lines;
pub mod tree;

pub use extract::extract_content;
pub use lines::{classify_line, default_view, parse_patch, DiffLine, DiffLineKind, ViewMode};
pub use tree::{build_file_tree, FileSummary, TreeNode};
