use serde::{Deserialize, Serialize};

use crate::model::FileChange;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Folder {
        name: String,
        path: String,
        children: Vec<TreeNode>,
    },
    File {
        name: String,
        path: String,
        #[serde(flatten)]
        change: FileSummary,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub status: crate::model::FileStatus,
    pub additions: u32,
    pub deletions: u32,
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder { name, .. } | TreeNode::File { name, .. } => name,
        }
    }

    pub fn path(&self) -> &str {
        match self {
            TreeNode::Folder { path, .. } | TreeNode::File { path, .. } => path,
        }
    }

    /// Number of files at or below this node.
    pub fn file_count(&self) -> usize {
        match self {
            TreeNode::File { .. } => 1,
            TreeNode::Folder { children, .. } => children.iter().map(TreeNode::file_count).sum(),
        }
    }
}

/// Nests flat file paths into folders. Siblings appear in first-seen order;
/// a path repeated later is ignored.
pub fn build_file_tree(files: &[FileChange]) -> Vec<TreeNode> {
    let mut root: Vec<TreeNode> = Vec::new();

    for file in files {
        let parts: Vec<&str> = file.path.split('/').filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            continue;
        }
        insert(&mut root, &parts, 0, file);
    }

    root
}

fn insert(level: &mut Vec<TreeNode>, parts: &[&str], depth: usize, file: &FileChange) {
    let name = parts[depth];
    let is_leaf = depth == parts.len() - 1;

    if is_leaf {
        if level.iter().any(|n| n.name() == name) {
            return;
        }
        level.push(TreeNode::File {
            name: name.to_string(),
            path: file.path.clone(),
            change: FileSummary {
                status: file.status,
                additions: file.additions,
                deletions: file.deletions,
            },
        });
        return;
    }

    let position = level
        .iter()
        .position(|n| matches!(n, TreeNode::Folder { name: existing, .. } if existing == name));
    let idx = match position {
        Some(idx) => idx,
        None => {
            level.push(TreeNode::Folder {
                name: name.to_string(),
                path: parts[..=depth].join("/"),
                children: Vec::new(),
            });
            level.len() - 1
        }
    };

    if let TreeNode::Folder { children, .. } = &mut level[idx] {
        insert(children, parts, depth + 1, file);
    }
}
